use core::fmt::Display;

use log::{info, warn};
use pacer_core::settings::{PersistedSettings, SettingsStore};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if *pending != current {
                    *pending = current;
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S>(&mut self, store: &mut S, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Display,
    {
        let due = self.pending.as_ref().is_some_and(|(_, changed_at_ms)| {
            now_ms.saturating_sub(*changed_at_ms) >= SETTINGS_SAVE_DEBOUNCE_MS
        });
        if due {
            self.flush(store, now_ms);
        }
    }

    /// Save any pending change immediately, ignoring the debounce window.
    pub(super) fn flush<S>(&mut self, store: &mut S, now_ms: u64)
    where
        S: SettingsStore,
        S::Error: Display,
    {
        let Some((candidate, _)) = self.pending.take() else {
            return;
        };

        match store.save(&candidate) {
            Ok(()) => {
                info!(
                    "settings-save: wpm={} group={} theme={}",
                    candidate.wpm,
                    candidate.group_size,
                    candidate.theme.key()
                );
                self.last_saved = candidate;
            }
            Err(err) => {
                // Retry after another debounce window.
                warn!("settings-save: failed: {}", err);
                self.pending = Some((candidate, now_ms));
            }
        }
    }
}
