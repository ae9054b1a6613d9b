//! `refetch post` – POST JSON to an API path.

use anyhow::{Context, Result};
use refetch_core::api::ApiClient;
use refetch_core::config::RefetchConfig;
use serde_json::Value;

use super::retrying_fetch;

pub async fn run_post(cfg: &RefetchConfig, path: &str, json: Option<&str>, v2: bool) -> Result<()> {
    let body: Value = match json {
        Some(raw) => serde_json::from_str(raw).context("--json is not valid JSON")?,
        None => Value::Object(Default::default()),
    };

    let client = ApiClient::new(retrying_fetch(cfg, None), &cfg.api);
    let data = if v2 {
        client.post_v2(path, body).await?
    } else {
        client.post(path, body).await?
    };
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
