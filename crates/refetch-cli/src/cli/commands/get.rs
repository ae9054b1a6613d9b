//! `refetch get` – GET an API path.

use anyhow::Result;
use refetch_core::api::ApiClient;
use refetch_core::config::RefetchConfig;

use super::retrying_fetch;
use crate::cli::args::parse_param;

pub async fn run_get(cfg: &RefetchConfig, path: &str, params: &[String], v2: bool) -> Result<()> {
    let params = params
        .iter()
        .map(|p| parse_param(p))
        .collect::<Result<Vec<_>>>()?;

    let client = ApiClient::new(retrying_fetch(cfg, None), &cfg.api);
    let data = if v2 {
        client.get_v2(path, &params).await?
    } else {
        client.get(path, &params).await?
    };
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
