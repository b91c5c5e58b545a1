//! Reader application: playback engine plus UI limits, input and view model.

use log::{debug, info};

use crate::{
    input::{InputEvent, InputProvider},
    playback::{AdvanceResult, PlaybackEngine},
    render::{Screen, Theme},
    settings::{MAX_GROUP_SIZE, MAX_WPM, MIN_GROUP_SIZE, MIN_WPM, PersistedSettings},
    text::first_words_excerpt,
    text_policy::progress_label,
};

const WPM_STEP: u16 = 10;
const PROGRESS_LABEL_BYTES: usize = 24;
const OPENING_WORDS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Ranges the reader UI lets the user pick from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub wpm_step: u16,
    pub min_group_size: u8,
    pub max_group_size: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            min_wpm: MIN_WPM,
            max_wpm: MAX_WPM,
            wpm_step: WPM_STEP,
            min_group_size: MIN_GROUP_SIZE,
            max_group_size: MAX_GROUP_SIZE,
        }
    }
}

pub struct ReaderApp<IN>
where
    IN: InputProvider,
{
    engine: PlaybackEngine,
    input: IN,
    config: ReaderConfig,
    app_title: &'static str,
    theme: Theme,
    status: Option<(&'static str, &'static str)>,
    pending_redraw: bool,
    finished: bool,
    quit_requested: bool,
    words_since_drain: u32,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
