//! Localized message catalogue for event display text.
//!
//! The catalogue is a JSON document of the form
//!
//! ```json
//! { "events": [ { "key": "DO_LOW", "text": "Fish gasp at the surface.", "severity": "warn" } ] }
//! ```
//!
//! It is loaded once and read-only afterwards. Lookups never fail: a key
//! without an entry falls back to its own wire name with
//! [`Severity::Event`]. An unrecognised severity keeps the entry's text and
//! is read as [`Severity::Event`].

use std::collections::BTreeMap;
use std::path::Path;

use pondlife_types::{EventKey, Severity};
use serde::Deserialize;
use tracing::warn;

/// Errors that can occur when loading a catalogue.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// Failed to read the catalogue file from disk.
    #[error("failed to read catalogue file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse catalogue JSON: {source}")]
    Json {
        /// The underlying JSON parse error.
        #[from]
        source: serde_json::Error,
    },
}

/// On-disk shape of the catalogue.
#[derive(Debug, Deserialize)]
struct CatalogueFile {
    #[serde(default)]
    events: Vec<CatalogueEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    key: String,
    text: String,
    #[serde(default)]
    severity: Option<String>,
}

impl CatalogueEntry {
    fn severity(&self) -> Severity {
        let Some(name) = self.severity.as_deref() else {
            return Severity::Event;
        };
        Severity::from_name(name).unwrap_or_else(|| {
            warn!(
                key = self.key.as_str(),
                severity = name,
                "unknown severity, shown as event"
            );
            Severity::Event
        })
    }
}

/// Display text and severity for one event key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    /// Text shown to the player.
    pub text: &'a str,
    /// Presentation severity.
    pub severity: Severity,
}

/// Event key to display text and severity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCatalogue {
    entries: BTreeMap<EventKey, (String, Severity)>,
}

impl EventCatalogue {
    /// Load a catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Io`] if the file cannot be read, or
    /// [`CatalogueError::Json`] if the content is not a valid catalogue.
    pub fn from_file(path: &Path) -> Result<Self, CatalogueError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a catalogue from a JSON string.
    ///
    /// Entries whose key is not a known [`EventKey`] are skipped with a
    /// warning. When a key appears twice the later entry wins.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Json`] if the string is not a valid catalogue.
    pub fn parse(json: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();
        for entry in file.events {
            match EventKey::from_name(&entry.key) {
                Some(key) => {
                    let severity = entry.severity();
                    entries.insert(key, (entry.text, severity));
                }
                None => warn!(
                    key = entry.key.as_str(),
                    "catalogue entry for unknown event key skipped"
                ),
            }
        }
        Ok(Self { entries })
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: EventKey, text: impl Into<String>, severity: Severity) {
        self.entries.insert(key, (text.into(), severity));
    }

    /// Look up the message for `key`, falling back to the raw key name.
    pub fn lookup(&self, key: EventKey) -> Message<'_> {
        self.entries.get(&key).map_or(
            Message {
                text: key.as_str(),
                severity: Severity::Event,
            },
            |(text, severity)| Message {
                text,
                severity: *severity,
            },
        )
    }

    /// Number of known entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
