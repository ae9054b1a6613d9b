//! `refetch config` – show config path and effective settings.

use anyhow::Result;
use refetch_core::config::{self, RefetchConfig};

pub fn run_config(cfg: &RefetchConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    let effective = RefetchConfig {
        retry: Some(cfg.retry_or_default()),
        transport: Some(cfg.transport_or_default()),
        ..cfg.clone()
    };
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
