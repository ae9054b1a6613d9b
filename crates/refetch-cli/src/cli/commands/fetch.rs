//! `refetch fetch` – fetch a URL through the retrying transport.

use anyhow::{bail, Context, Result};
use refetch_core::config::RefetchConfig;
use refetch_core::{FetchInit, FetchRequest, Method};

use super::retrying_fetch;
use crate::cli::args::parse_header;

pub async fn run_fetch(
    cfg: &RefetchConfig,
    url: &str,
    method: &str,
    headers: &[String],
    data: Option<String>,
    max_retries: Option<u32>,
    include: bool,
) -> Result<()> {
    let method = Method::parse(method).with_context(|| format!("unknown method {:?}", method))?;
    let mut req = FetchRequest::new(method, url);
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        req = req.header(name, value);
    }
    if let Some(body) = data {
        req = req.body(body);
    }

    let fetch = retrying_fetch(cfg, max_retries);
    tracing::info!(%method, url, "fetch");
    let response = fetch
        .execute(req.into(), &FetchInit::default())
        .await
        .with_context(|| format!("{} {} failed", method, url))?;

    if include {
        println!("HTTP {} {}", response.status, response.status_text);
        for (name, value) in &response.headers {
            println!("{}: {}", name, value);
        }
        println!();
    }
    println!("{}", response.text());

    if response.status >= 400 {
        bail!("{} {} returned HTTP {}", method, url, response.status);
    }
    Ok(())
}
