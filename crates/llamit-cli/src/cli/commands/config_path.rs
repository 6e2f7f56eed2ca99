//! `llamit config-path` – show where the config lives.

use anyhow::Result;
use llamit_core::config;

pub fn run_config_path() -> Result<()> {
    config::load_or_init()?;
    println!("{}", config::config_path()?.display());
    Ok(())
}
