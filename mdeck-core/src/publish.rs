//! Deck publishing pipeline.
//!
//! Provides a high-level API for turning decks into output files.
//! This module bridges the gap between the format registry and file I/O,
//! handling both in-memory and file-based output.
//!
//! [`publish_file`] is the whole generation step used by the CLI: read the
//! source, parse it, render HTML and replace the output file. Output files
//! are written to a sibling temporary file and renamed into place, so a
//! browser polling the output never sees a half-written document.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::DeckError;
use crate::model::Deck;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Specifies how to publish a deck.
///
/// ```ignore
/// let spec = PublishSpec::new(&deck, "html")
///     .with_output_path("talk.html")
///     .with_option("title", "Quarterly review");
/// ```
///
/// If no output path is provided, the content is returned in memory.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The parsed deck to convert.
    pub deck: &'a Deck,
    /// Target format name (e.g., "html", "json").
    pub format: &'a str,
    /// Optional file path for writing output.
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., title, custom-css).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(deck: &'a Deck, format: &'a str) -> Self {
        Self {
            deck,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (no output path given).
    InMemory(String),
    /// Path to the written file.
    File(PathBuf),
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Summary of one source-to-HTML generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of retained slides.
    pub slides: usize,
    /// Where the HTML was written.
    pub output: PathBuf,
}

/// Publishes a deck as described by `spec`, using `registry` to find
/// the serializer.
pub fn publish(spec: PublishSpec<'_>, registry: &FormatRegistry) -> Result<PublishResult, DeckError> {
    let text = registry.serialize_with_options(spec.deck, spec.format, &spec.options)?;
    match spec.output {
        Some(path) => {
            write_atomic(&path, &text)?;
            Ok(PublishResult {
                artifact: PublishArtifact::File(path),
            })
        }
        None => Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        }),
    }
}

/// Reads `input`, parses it as markdown and writes the HTML deck to `output`.
///
/// # Errors
///
/// Returns [`DeckError::Read`] when the source cannot be read and
/// [`DeckError::Write`] when the output cannot be replaced. Format errors
/// surface from the registry unchanged.
pub fn publish_file(
    input: &Path,
    output: &Path,
    registry: &FormatRegistry,
    options: &HashMap<String, String>,
) -> Result<BuildReport, DeckError> {
    let source = fs::read_to_string(input).map_err(|source| DeckError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let deck = registry.parse(&source, "markdown")?;
    tracing::debug!(
        input = %input.display(),
        slides = deck.len(),
        "parsed deck source"
    );

    let spec = PublishSpec {
        deck: &deck,
        format: "html",
        output: Some(output.to_path_buf()),
        options: options.clone(),
    };
    publish(spec, registry)?;
    tracing::debug!(output = %output.display(), "wrote deck");

    Ok(BuildReport {
        slides: deck.len(),
        output: output.to_path_buf(),
    })
}

/// Replaces `path` with `contents` via a temporary file in the same directory.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), DeckError> {
    let write_error = |source| DeckError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    // Temp files start owner-only; keep what the destination had instead.
    if let Some(permissions) = output_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }
    tmp.write_all(contents.as_bytes()).map_err(write_error)?;
    tmp.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Permissions for the replaced file: the existing destination's, or
/// world-readable `0644` for a fresh one.
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
