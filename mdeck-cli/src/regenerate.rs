//! Regeneration and the reload stamp
//!
//! A [`Regenerator`] owns everything needed to rebuild one deck. Each
//! successful rebuild bumps the shared [`ReloadStamp`]; polling browsers
//! compare the stamp with the one they saw at load time and reload when it
//! grows.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use mdeck_core::publish::{publish_file, BuildReport};
use mdeck_core::{DeckError, FormatRegistry};
use tracing::{info, warn};

/// Millisecond timestamp of the last successful regeneration.
///
/// Strictly increasing: two bumps inside the same millisecond still yield
/// distinct values. Writers publish with `Release` after the output file is
/// in place and readers load with `Acquire`, so a client that sees a new value
/// also sees the new file.
#[derive(Debug)]
pub struct ReloadStamp {
    millis: AtomicU64,
}

impl ReloadStamp {
    pub fn new() -> Self {
        Self {
            millis: AtomicU64::new(now_millis()),
        }
    }

    pub fn get(&self) -> u64 {
        self.millis.load(Ordering::Acquire)
    }

    /// Advance the stamp and return its new value.
    pub fn bump(&self) -> u64 {
        let now = now_millis();
        let previous = self
            .millis
            .fetch_update(Ordering::Release, Ordering::Acquire, |current| {
                Some(now.max(current + 1))
            })
            .unwrap_or_else(|current| current);
        now.max(previous + 1)
    }
}

impl Default for ReloadStamp {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Rebuilds one source file into one output file.
pub struct Regenerator {
    input: PathBuf,
    output: PathBuf,
    registry: FormatRegistry,
    options: HashMap<String, String>,
}

impl Regenerator {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, registry: FormatRegistry) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            registry,
            options: HashMap::new(),
        }
    }

    /// HTML serializer options (title, custom-css, reload-url).
    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options = options;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the pipeline once.
    pub fn build(&self) -> Result<BuildReport, DeckError> {
        publish_file(&self.input, &self.output, &self.registry, &self.options)
    }

    /// Run the pipeline and announce the result through `stamp`.
    ///
    /// Failures are logged and leave both the previous output and the stamp
    /// untouched.
    pub fn rebuild(&self, stamp: &ReloadStamp) -> Option<BuildReport> {
        match self.build() {
            Ok(report) => {
                let at = stamp.bump();
                info!(
                    slides = report.slides,
                    output = %report.output.display(),
                    stamp = at,
                    "Regenerated deck"
                );
                Some(report)
            }
            Err(err) => {
                warn!(error = %err, "Regeneration failed, keeping previous output");
                None
            }
        }
    }
}
