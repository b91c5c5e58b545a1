//! Playback state machine: which chunk is on screen and when the next one is
//! due.

mod timer;

use alloc::{string::String, vec::Vec};

use log::debug;

use crate::{
    highlight::{HighlightPattern, WordParts, pivot_offset, split},
    pacing::{MicroPauseSettings, base_period_ms, pause_factor, scaled_period_ms},
    text::segment,
};

pub use timer::{ArmedTimer, PacingTimer};

pub const DEFAULT_WPM: u16 = 300;
pub const DEFAULT_GROUP_SIZE: u8 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackConfig {
    pub wpm: u16,
    pub group_size: u8,
    pub pattern: HighlightPattern,
    pub micro_pause: MicroPauseSettings,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            group_size: DEFAULT_GROUP_SIZE,
            pattern: HighlightPattern::default(),
            micro_pause: MicroPauseSettings::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdvanceResult {
    /// Not running or the timer has not fired yet.
    Idle,
    Advanced,
    /// The last word was reached; playback stopped on it.
    EndOfText,
}

/// The chunk currently on screen, kept even when the index moves out of range.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct ShownChunk {
    index: Option<usize>,
    text: String,
    pivot: isize,
}

pub struct PlaybackEngine {
    text: String,
    words: Vec<String>,
    current_index: isize,
    playing: bool,
    wpm: u16,
    group_size: u8,
    pattern: HighlightPattern,
    micro_pause: MicroPauseSettings,
    shown: ShownChunk,
    timer: PacingTimer,
}

impl PlaybackEngine {
    pub fn new(text: &str, config: PlaybackConfig) -> Self {
        let mut engine = Self {
            text: String::from(text),
            words: segment(text),
            current_index: 0,
            playing: false,
            wpm: config.wpm,
            group_size: config.group_size,
            pattern: config.pattern,
            micro_pause: config.micro_pause,
            shown: ShownChunk::default(),
            timer: PacingTimer::new(),
        };
        engine.refresh_shown();
        engine
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// May be negative or past the end after a manual [`set_index`](Self::set_index).
    pub fn current_index(&self) -> isize {
        self.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn wpm(&self) -> u16 {
        self.wpm
    }

    pub fn group_size(&self) -> u8 {
        self.group_size
    }

    pub fn pattern(&self) -> &HighlightPattern {
        &self.pattern
    }

    pub fn micro_pause(&self) -> &MicroPauseSettings {
        &self.micro_pause
    }

    /// Index of the chunk on screen, `None` before anything was shown.
    pub fn shown_index(&self) -> Option<usize> {
        self.shown.index
    }

    pub fn shown_text(&self) -> &str {
        &self.shown.text
    }

    pub fn word_parts(&self) -> WordParts<'_> {
        split(&self.shown.text, self.shown.pivot)
    }

    pub fn timer(&self) -> &PacingTimer {
        &self.timer
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    /// Whether playback stopped on the final word.
    pub fn at_end(&self) -> bool {
        !self.playing
            && !self.words.is_empty()
            && self.current_index == self.words.len() as isize - 1
    }

    pub fn start(&mut self, now_ms: u64) {
        if self.words.is_empty() || self.current_index >= self.words.len() as isize {
            self.words = segment(&self.text);
            self.current_index = 0;
        }

        if self.words.is_empty() {
            debug!("playback: start ignored, no words");
            self.playing = false;
            self.sync_timer(now_ms);
            return;
        }

        self.playing = true;
        self.refresh_shown();
        self.sync_timer(now_ms);
        debug!(
            "playback: start index={} words={} wpm={}",
            self.current_index,
            self.words.len(),
            self.wpm
        );
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.playing = false;
        self.sync_timer(now_ms);
        debug!("playback: pause index={}", self.current_index);
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.playing = false;
        self.current_index = 0;
        self.refresh_shown();
        self.sync_timer(now_ms);
        debug!("playback: reset");
    }

    pub fn tick(&mut self, now_ms: u64) -> AdvanceResult {
        if !self.playing || !self.timer.fire(now_ms) {
            return AdvanceResult::Idle;
        }

        let next_index = self.current_index.saturating_add(1);
        if next_index >= self.words.len() as isize {
            self.playing = false;
            self.sync_timer(now_ms);
            debug!("playback: end of text at index={}", self.current_index);
            return AdvanceResult::EndOfText;
        }

        self.current_index = next_index;
        self.refresh_shown();
        self.sync_timer(now_ms);
        AdvanceResult::Advanced
    }

    /// Seek without clamping. Out-of-range indexes are stored as given and
    /// leave the previous chunk on screen.
    pub fn set_index(&mut self, index: isize, now_ms: u64) {
        self.current_index = index;
        self.refresh_shown();
        self.sync_timer(now_ms);
    }

    /// Changing the rate always restarts the running word's countdown from
    /// `now_ms`; time already spent on it is dropped.
    pub fn set_words_per_minute(&mut self, wpm: u16, now_ms: u64) {
        self.wpm = wpm;
        self.rearm_timer(now_ms);
    }

    /// Words shown per chunk. A tick still advances one word, so with
    /// `group_size > 1` the chunk slides forward and each word appears in up
    /// to `group_size` consecutive chunks.
    pub fn set_group_size(&mut self, group_size: u8, now_ms: u64) {
        self.group_size = group_size;
        self.refresh_shown();
        self.sync_timer(now_ms);
    }

    pub fn set_pattern(&mut self, pattern: HighlightPattern, now_ms: u64) {
        self.pattern = pattern;
        self.refresh_shown();
        self.rearm_timer(now_ms);
    }

    pub fn set_micro_pause(&mut self, micro_pause: MicroPauseSettings, now_ms: u64) {
        self.micro_pause = micro_pause;
        self.sync_timer(now_ms);
    }

    /// Replace the source text. Words are re-segmented and reading restarts
    /// from the first word; an empty text stops playback.
    pub fn set_text(&mut self, text: &str, now_ms: u64) {
        self.text = String::from(text);
        self.words = segment(text);
        self.current_index = 0;
        self.shown = ShownChunk::default();
        if self.words.is_empty() {
            self.playing = false;
        }
        self.refresh_shown();
        self.rearm_timer(now_ms);
        debug!("playback: text replaced, words={}", self.words.len());
    }

    /// Display period of the word at the current index.
    pub fn current_period_ms(&self) -> u32 {
        let base = base_period_ms(self.wpm);
        let Some(index) = self.index_in_range() else {
            return base;
        };

        let word = &self.words[index];
        let next = self.words.get(index + 1).map(String::as_str);
        scaled_period_ms(base, pause_factor(word, next, &self.micro_pause))
    }

    fn index_in_range(&self) -> Option<usize> {
        usize::try_from(self.current_index)
            .ok()
            .filter(|&index| index < self.words.len())
    }

    fn sync_timer(&mut self, now_ms: u64) {
        let period = self.playing.then(|| self.current_period_ms());
        self.timer.sync(now_ms, period);
    }

    fn rearm_timer(&mut self, now_ms: u64) {
        let period = self.playing.then(|| self.current_period_ms());
        self.timer.rearm(now_ms, period);
    }

    fn refresh_shown(&mut self) {
        let Some(index) = self.index_in_range() else {
            return;
        };

        let end = index
            .saturating_add(self.group_size.max(1) as usize)
            .min(self.words.len());
        let text = self.words[index..end].join(" ");
        let pivot = pivot_offset(&text, &self.pattern);

        self.shown = ShownChunk {
            index: Some(index),
            text,
            pivot,
        };
    }
}

#[cfg(test)]
mod tests;
