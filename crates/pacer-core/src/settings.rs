//! Persisted user settings abstraction.

use crate::{
    highlight::HighlightPattern,
    pacing::MicroPauseSettings,
    playback::{DEFAULT_GROUP_SIZE, DEFAULT_WPM, PlaybackConfig},
    render::Theme,
};

pub const MIN_WPM: u16 = 100;
pub const MAX_WPM: u16 = 1_000;
pub const MIN_GROUP_SIZE: u8 = 1;
pub const MAX_GROUP_SIZE: u8 = 5;

/// User-tunable settings that should survive restarts.
#[derive(Clone, Debug, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub group_size: u8,
    pub theme: Theme,
    pub highlight_pattern: HighlightPattern,
    pub micro_pause: MicroPauseSettings,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            group_size: DEFAULT_GROUP_SIZE,
            theme: Theme::default(),
            highlight_pattern: HighlightPattern::default(),
            micro_pause: MicroPauseSettings::default(),
        }
    }
}

impl PersistedSettings {
    /// Clamp rate and grouping to the ranges the reader UI offers.
    pub fn sanitized(mut self) -> Self {
        self.wpm = self.wpm.clamp(MIN_WPM, MAX_WPM);
        self.group_size = self.group_size.clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);
        self
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            wpm: self.wpm,
            group_size: self.group_size,
            pattern: self.highlight_pattern.clone(),
            micro_pause: self.micro_pause,
        }
    }
}

/// Partial settings layered over a base value; `None` keeps the base field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsOverrides {
    pub wpm: Option<u16>,
    pub group_size: Option<u8>,
    pub theme: Option<Theme>,
    pub highlight_pattern: Option<HighlightPattern>,
    pub micro_pause: Option<MicroPauseSettings>,
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, base: PersistedSettings) -> PersistedSettings {
        PersistedSettings {
            wpm: self.wpm.unwrap_or(base.wpm),
            group_size: self.group_size.unwrap_or(base.group_size),
            theme: self.theme.unwrap_or(base.theme),
            highlight_pattern: self.highlight_pattern.unwrap_or(base.highlight_pattern),
            micro_pause: self.micro_pause.unwrap_or(base.micro_pause),
        }
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
