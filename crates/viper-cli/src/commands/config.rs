use anyhow::{Context, Result};
use viper::ViperConfig;

pub fn execute(config: &ViperConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
