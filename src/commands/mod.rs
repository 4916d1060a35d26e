pub mod check;
pub mod generate;

use std::path::Path;

use anyhow::Result;
use meetcal_core::MeetcalConfig;

/// Load the config file and apply command-line overrides on top of it.
pub fn load_config(
    path: Option<&Path>,
    cutoff_days: Option<u32>,
    summary_limit: Option<usize>,
) -> Result<MeetcalConfig> {
    let mut config = MeetcalConfig::load(path)?;

    if let Some(days) = cutoff_days {
        config.cutoff_days = i64::from(days);
    }
    if let Some(limit) = summary_limit {
        config.summary_limit = limit;
    }
    config.validate()?;

    tracing::debug!(
        cutoff_days = config.cutoff_days,
        summary_limit = config.summary_limit,
        "Effective configuration"
    );
    Ok(config)
}
