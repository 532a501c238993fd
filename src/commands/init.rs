use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Bowtie Configuration

# Scenario A is the left panel and the baseline of every comparison.
[scenario_a]
lead_count = 1000
conversion_rates = [25, 25, 25, 25]
# Positive values are churn, negative values are upsell
churn_or_upsell_rate = 25
monthly_fee = 30

[scenario_b]
lead_count = 1000
conversion_rates = [25, 25, 25, 25]
churn_or_upsell_rate = 25
monthly_fee = 30

[display]
currency_symbol = "$"
animate = true
animation_frames = 12
fps = 30

[validation]
strict = false
"#;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

/// Write the default configuration into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
