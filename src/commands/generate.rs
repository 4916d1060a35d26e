use std::path::PathBuf;

use anyhow::{Context, Result};
use meetcal_core::{Event, EventStore, MeetcalConfig, OutputFormat, RecencyFilter};

use crate::output;
use crate::source::{self, Input, Row};

pub struct GenerateOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: MeetcalConfig,
}

/// How a generate run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// Ctrl-C arrived before the output was complete; nothing was written
    Interrupted,
}

pub async fn run(options: GenerateOptions) -> Result<Outcome> {
    let GenerateOptions {
        input,
        output,
        format,
        config,
    } = options;
    let input = Input::resolve(input.as_deref())?;

    let job = tokio::task::spawn_blocking(move || build(&input, format, &config));

    let content = tokio::select! {
        joined = job => joined.context("Calendar generation task failed")??,
        Ok(()) = tokio::signal::ctrl_c() => return Ok(Outcome::Interrupted),
    };

    output::publish(output.as_deref(), &content)?;
    Ok(Outcome::Written)
}

/// Read the input and render it. Nothing is written here.
pub fn build(input: &Input, format: OutputFormat, config: &MeetcalConfig) -> Result<String> {
    let rows = source::read_input(input)?;
    let filter = RecencyFilter::new(config.cutoff()?);
    build_from_rows(&rows, format, config, &filter)
}

/// Run rows through the parser, the recency filter and the store.
///
/// The first row with an invalid timestamp aborts the whole run.
pub fn build_from_rows(
    rows: &[Row],
    format: OutputFormat,
    config: &MeetcalConfig,
    filter: &RecencyFilter,
) -> Result<String> {
    let mut store = EventStore::new();
    let mut dropped = 0;

    for row in rows {
        let mut event = Event::from_row(&row.location, &row.summary, &row.timestamp)
            .with_context(|| format!("Invalid record {row}"))?;
        if let Some(description) = &config.description {
            event = event.with_description(description.as_str());
        }
        if !store.add(filter.apply(event)) {
            dropped += 1;
        }
    }

    tracing::info!(
        events = store.len(),
        dropped,
        threshold = %filter.threshold(),
        format = %format,
        "Rendering calendar"
    );
    Ok(store.render(format, config)?)
}
