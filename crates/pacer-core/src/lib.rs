#![cfg_attr(not(test), no_std)]

//! Platform-independent core of the pacer speed reader.
//!
//! Text goes through [`text::segment`], every shown chunk is cut around its
//! focus letter by [`highlight`], and [`playback::PlaybackEngine`] walks the
//! word list on a single re-armable timer whose period is stretched by
//! [`pacing::pause_factor`].

extern crate alloc;

pub mod app;
pub mod highlight;
pub mod input;
pub mod pacing;
pub mod playback;
pub mod quiz;
pub mod render;
pub mod settings;
pub mod text;
pub mod text_policy;
