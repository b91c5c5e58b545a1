//! App-level view models consumed by platform renderers.

use crate::highlight::WordParts;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Sepia,
    HighContrast,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Sepia, Theme::HighContrast];

    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Sepia,
            Self::Sepia => Self::HighContrast,
            Self::HighContrast => Self::Light,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Sepia => "sepia",
            Self::HighContrast => "high-contrast",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.key() == key)
    }
}

/// App-level view model consumed by the platform renderer.
pub enum Screen<'a> {
    Reading {
        title: &'a str,
        wpm: u16,
        group_size: u8,
        word: WordParts<'a>,
        progress: &'a str,
        playing: bool,
        theme: Theme,
    },
    Finished {
        title: &'a str,
        wpm: u16,
        word_total: usize,
        /// First few words of the text, for the summary line.
        opening: &'a str,
        theme: Theme,
    },
    Status {
        title: &'a str,
        line1: &'a str,
        line2: &'a str,
        theme: Theme,
    },
}
