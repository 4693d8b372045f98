//! Per-invocation run state: progress, resolved URLs and the timestamped debug trace.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info, warn};

/// A single timestamped trace line.
#[derive(Clone, Debug)]
pub struct TraceEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: {}",
            self.at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.message
        )
    }
}

/// Ordered debug trace. Every entry is mirrored to the log at the level it was pushed with.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn debug(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{message}");
        self.record(message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.record(message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.record(message);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|entry| entry.message.contains(needle))
    }

    fn record(&mut self, message: String) {
        self.entries.push(TraceEntry {
            at: Utc::now(),
            message,
        });
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(formatter, "{entry}")?;
        }
        Ok(())
    }
}

/// Progress reached once robots.txt has been consulted.
pub const PROGRESS_ROBOTS: u8 = 20;
/// Progress reached once sitemap entry points are known.
pub const PROGRESS_LOCATED: u8 = 40;
/// Progress reached once the URL set is resolved; enrichment fills the rest.
pub const PROGRESS_RESOLVED: u8 = 60;
pub const PROGRESS_DONE: u8 = 100;

/// State of one invocation. A new submission starts from [`RunState::begin`], discarding
/// whatever the previous run left behind.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    pub loading: bool,
    pub progress: u8,
    pub urls: Vec<String>,
    pub processed: Vec<String>,
    pub error: Option<String>,
    pub trace: Trace,
    pub result: Option<String>,
}

impl RunState {
    /// Resets to a fresh, loading state.
    pub fn begin(&mut self) {
        *self = Self {
            loading: true,
            ..Self::default()
        };
    }

    /// Marks `url` as enriched and moves progress linearly across the enrichment share.
    pub fn mark_processed(&mut self, url: &str, total: usize) {
        self.processed.push(url.to_string());
        self.progress = enrichment_progress(self.processed.len(), total);
    }

    /// Records a fatal failure and stops loading. Progress is left where it halted.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.trace.warn(format!("Error: {message}"));
        self.error = Some(message);
        self.loading = false;
    }

    pub fn finish(&mut self, result: String) {
        self.loading = false;
        self.progress = PROGRESS_DONE;
        self.result = Some(result);
    }
}

/// 60 + floor(40 * processed / total), capped at 100.
pub fn enrichment_progress(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return PROGRESS_RESOLVED;
    }
    let share = usize::from(PROGRESS_DONE - PROGRESS_RESOLVED) * processed.min(total) / total;
    PROGRESS_RESOLVED.saturating_add(u8::try_from(share).unwrap_or(u8::MAX))
}
