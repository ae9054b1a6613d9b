//! Parsing of repeatable `Name: value` / `key=value` arguments.

use anyhow::{bail, Result};

/// "Accept: application/json" -> ("Accept", "application/json").
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header {:?}, expected \"Name: value\"", raw),
    }
}

/// "groupid=21354" -> ("groupid", "21354"). The value may be empty.
pub fn parse_param(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("invalid parameter {:?}, expected key=value", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_trims_both_sides() {
        let (n, v) = parse_header(" X-Test :  a: b ").unwrap();
        assert_eq!(n, "X-Test");
        assert_eq!(v, "a: b");
    }

    #[test]
    fn header_without_colon_rejected() {
        assert!(parse_header("Accept application/json").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn param_split_on_first_equals() {
        assert_eq!(
            parse_param("search=a=b").unwrap(),
            ("search".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_param("empty=").unwrap().1, "");
        assert!(parse_param("=x").is_err());
        assert!(parse_param("novalue").is_err());
    }
}
