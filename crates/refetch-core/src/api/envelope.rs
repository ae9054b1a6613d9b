//! Response envelope rules for the v1 and v2 APIs.
//!
//! A 200 with no data is an error for both APIs. v1 additionally wraps
//! results as `{ ret, status, ... }`: `ret` 0 is success, 111 means the
//! service is down for maintenance, and a few non-zero codes are tolerated.

use serde_json::Value;

use super::error::ApiError;
use crate::request::Method;
use crate::retry::is_falsy;

const RET_NOT_LOGGED_IN: i64 = 1;
const RET_MAINTENANCE: i64 = 111;
const RET_DUPLICATE: i64 = 999;

/// Check a v1 response. `method` is the wire method (overridden verbs go as POST).
pub(crate) fn check_v1(
    method: Method,
    path: &str,
    http_status: u16,
    data: Option<Value>,
) -> Result<Value, ApiError> {
    let data = data.filter(|d| !is_falsy(d));

    let ok = match &data {
        Some(d) if http_status == 200 => {
            let ret = d.get("ret").and_then(Value::as_i64);
            let status = d.get("status").and_then(Value::as_str);
            ret == Some(0)
                || (ret == Some(RET_NOT_LOGGED_IN) && status == Some("Not logged in"))
                || (path == "/session" && method == Method::Post)
                || ret == Some(RET_DUPLICATE)
        }
        _ => false,
    };

    match data {
        Some(d) if ok => Ok(d),
        data => {
            let ret = data.as_ref().and_then(|d| d.get("ret"));
            if ret.and_then(Value::as_i64) == Some(RET_MAINTENANCE) {
                tracing::warn!("down for maintenance");
                return Err(ApiError::Maintenance);
            }
            Err(ApiError::Api {
                method,
                path: path.to_string(),
                http_status,
                ret: describe(ret),
                status: describe(data.as_ref().and_then(|d| d.get("status"))),
                data,
            })
        }
    }
}

/// Check a v2 response: anything but a 200 with data is an error.
pub(crate) fn check_v2(
    method: Method,
    path: &str,
    http_status: u16,
    data: Option<Value>,
) -> Result<Value, ApiError> {
    match data.filter(|d| !is_falsy(d)) {
        Some(d) if http_status == 200 => Ok(d),
        data => Err(ApiError::ApiV2 {
            method,
            path: path.to_string(),
            http_status,
            status: describe(data.as_ref().and_then(|d| d.get("status"))),
            data,
        }),
    }
}

/// Render an envelope field for an error message; missing or falsy is "Unknown".
fn describe(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(v) if !is_falsy(v) => v.to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn v1_ret_zero_ok() {
        let d = check_v1(Method::Get, "/message", 200, Some(json!({"ret": 0, "id": 5}))).unwrap();
        assert_eq!(d["id"], 5);
    }

    #[test]
    fn v1_tolerated_codes() {
        assert!(check_v1(
            Method::Get,
            "/session",
            200,
            Some(json!({"ret": 1, "status": "Not logged in"}))
        )
        .is_ok());
        assert!(check_v1(Method::Post, "/session", 200, Some(json!({"ret": 3}))).is_ok());
        assert!(check_v1(Method::Post, "/message", 200, Some(json!({"ret": 999}))).is_ok());
    }

    #[test]
    fn v1_other_ret_is_error() {
        let e = check_v1(
            Method::Post,
            "/message",
            200,
            Some(json!({"ret": 2, "status": "Permission denied"})),
        )
        .unwrap_err();
        assert_eq!(
            e.to_string(),
            "API Error POST /message -> ret: 2 status: Permission denied"
        );
        assert_eq!(e.http_status(), Some(200));
        assert_eq!(e.data().unwrap()["ret"], 2);

        // ret 1 is only tolerated with the exact status text.
        assert!(check_v1(Method::Get, "/user", 200, Some(json!({"ret": 1}))).is_err());
        // session GETs are not exempt.
        assert!(check_v1(Method::Get, "/session", 200, Some(json!({"ret": 3}))).is_err());
    }

    #[test]
    fn v1_maintenance() {
        let e = check_v1(Method::Get, "/message", 200, Some(json!({"ret": 111}))).unwrap_err();
        assert!(matches!(e, ApiError::Maintenance));
    }

    #[test]
    fn v1_missing_data_or_bad_status() {
        let e = check_v1(Method::Get, "/message", 200, None).unwrap_err();
        assert_eq!(e.to_string(), "API Error GET /message -> ret: Unknown status: Unknown");
        assert!(check_v1(Method::Get, "/message", 200, Some(json!(null))).is_err());
        let e = check_v1(Method::Get, "/message", 404, Some(json!({"ret": 0}))).unwrap_err();
        assert_eq!(e.http_status(), Some(404));
    }

    #[test]
    fn v2_rules() {
        assert_eq!(
            check_v2(Method::Get, "/message/1", 200, Some(json!([1, 2]))).unwrap(),
            json!([1, 2])
        );
        let e = check_v2(
            Method::Get,
            "/message/1",
            404,
            Some(json!({"status": "Not found"})),
        )
        .unwrap_err();
        assert_eq!(e.to_string(), "API Error GET /message/1 -> status: Not found");
        assert!(check_v2(Method::Get, "/message/1", 200, None).is_err());
    }
}
