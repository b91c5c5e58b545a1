//! Settings persisted as a flat JSON object of fixed keys, one blob per
//! settings group.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use pacer_core::{
    highlight::{HighlightPattern, HighlightRule},
    pacing::MicroPauseSettings,
    render::Theme,
    settings::{PersistedSettings, SettingsOverrides, SettingsStore},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

pub const KEY_READING: &str = "pacer.reading";
pub const KEY_THEME: &str = "pacer.theme";
pub const KEY_HIGHLIGHT_PATTERN: &str = "pacer.highlight_pattern";
pub const KEY_MICRO_PAUSE: &str = "pacer.micro_pause";

#[derive(Debug, Error)]
pub enum SettingsStoreError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("settings encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadingRecord {
    words_per_minute: u16,
    group_size: u8,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleRecord {
    max_word_length: u16,
    pivot_offset: u16,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MicroPauseRecord {
    enabled: bool,
    stack_pauses: bool,
    large_numbers_pause: f32,
    sentence_end_pause: f32,
    other_punctuation_pause: f32,
    paragraph_pause: f32,
    long_word_pause: f32,
}

impl From<&MicroPauseSettings> for MicroPauseRecord {
    fn from(settings: &MicroPauseSettings) -> Self {
        Self {
            enabled: settings.enabled,
            stack_pauses: settings.stack_pauses,
            large_numbers_pause: settings.large_numbers_pause,
            sentence_end_pause: settings.sentence_end_pause,
            other_punctuation_pause: settings.other_punctuation_pause,
            paragraph_pause: settings.paragraph_pause,
            long_word_pause: settings.long_word_pause,
        }
    }
}

impl From<MicroPauseRecord> for MicroPauseSettings {
    fn from(record: MicroPauseRecord) -> Self {
        Self {
            enabled: record.enabled,
            stack_pauses: record.stack_pauses,
            large_numbers_pause: record.large_numbers_pause,
            sentence_end_pause: record.sentence_end_pause,
            other_punctuation_pause: record.other_punctuation_pause,
            paragraph_pause: record.paragraph_pause,
            long_word_pause: record.long_word_pause,
        }
    }
}

/// JSON file backed [`SettingsStore`].
///
/// Loading never fails on bad content: a missing file means "no saved
/// settings", and an unreadable file or key falls back to defaults.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SettingsStoreError {
        SettingsStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    type Error = SettingsStoreError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("settings: no file at {}", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let blobs: Map<String, Value> = match serde_json::from_str(&raw) {
            Ok(blobs) => blobs,
            Err(err) => {
                warn!(
                    "settings: {} is corrupt ({}), using defaults",
                    self.path.display(),
                    err
                );
                return Ok(None);
            }
        };

        let reading = decode_key::<ReadingRecord>(&blobs, KEY_READING);
        let theme = decode_key::<String>(&blobs, KEY_THEME).and_then(|key| {
            let theme = Theme::from_key(&key);
            if theme.is_none() {
                warn!("settings: unknown theme {:?}, using default", key);
            }
            theme
        });
        let pattern = decode_key::<Vec<RuleRecord>>(&blobs, KEY_HIGHLIGHT_PATTERN).map(|rules| {
            let rules: Vec<HighlightRule> = rules
                .iter()
                .map(|rule| HighlightRule::new(rule.max_word_length, rule.pivot_offset))
                .collect();
            HighlightPattern::from_rules(&rules)
        });
        let micro_pause =
            decode_key::<MicroPauseRecord>(&blobs, KEY_MICRO_PAUSE).map(MicroPauseSettings::from);

        let overrides = SettingsOverrides {
            wpm: reading.as_ref().map(|r| r.words_per_minute),
            group_size: reading.as_ref().map(|r| r.group_size),
            theme,
            highlight_pattern: pattern,
            micro_pause,
        };

        if overrides.is_empty() {
            return Ok(None);
        }

        Ok(Some(
            overrides.apply(PersistedSettings::default()).sanitized(),
        ))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        let mut blobs = Map::new();
        blobs.insert(
            KEY_READING.into(),
            serde_json::to_value(ReadingRecord {
                words_per_minute: settings.wpm,
                group_size: settings.group_size,
            })?,
        );
        blobs.insert(KEY_THEME.into(), Value::from(settings.theme.key()));
        blobs.insert(
            KEY_HIGHLIGHT_PATTERN.into(),
            serde_json::to_value(
                settings
                    .highlight_pattern
                    .rules()
                    .iter()
                    .map(|rule| RuleRecord {
                        max_word_length: rule.max_word_length,
                        pivot_offset: rule.pivot_offset,
                    })
                    .collect::<Vec<_>>(),
            )?,
        );
        blobs.insert(
            KEY_MICRO_PAUSE.into(),
            serde_json::to_value(MicroPauseRecord::from(&settings.micro_pause))?,
        );

        let encoded = serde_json::to_string_pretty(&Value::Object(blobs))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;

        debug!("settings: saved to {}", self.path.display());
        Ok(())
    }
}

fn decode_key<T: DeserializeOwned>(blobs: &Map<String, Value>, key: &str) -> Option<T> {
    let value = blobs.get(key)?;
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!("settings: ignoring corrupt {} ({})", key, err);
            None
        }
    }
}
