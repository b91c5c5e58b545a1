/// Deadline of an armed pacing timer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArmedTimer {
    pub period_ms: u32,
    pub deadline_ms: u64,
}

/// The single repeating timer driving playback.
///
/// There is no in-place adjustment: [`PacingTimer::sync`] either keeps the
/// current deadline untouched or tears it down and arms a fresh one, and
/// [`PacingTimer::rearm`] always arms a fresh one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PacingTimer {
    armed: Option<ArmedTimer>,
}

impl PacingTimer {
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Bring the timer in line with the wanted period (`None` = stopped).
    ///
    /// Returns `true` when the timer was cancelled or re-armed. Calling it
    /// again with the same period is a no-op.
    pub fn sync(&mut self, now_ms: u64, period_ms: Option<u32>) -> bool {
        match (period_ms, self.armed) {
            (None, None) => false,
            (None, Some(_)) => {
                self.armed = None;
                true
            }
            (Some(period_ms), Some(armed)) if armed.period_ms == period_ms => false,
            (Some(period_ms), _) => {
                self.armed = Some(ArmedTimer {
                    period_ms,
                    deadline_ms: now_ms.saturating_add(period_ms as u64),
                });
                true
            }
        }
    }

    /// Tear down the current deadline and arm a fresh one from `now_ms`,
    /// even when the period is unchanged.
    pub fn rearm(&mut self, now_ms: u64, period_ms: Option<u32>) {
        self.armed = period_ms.map(|period_ms| ArmedTimer {
            period_ms,
            deadline_ms: now_ms.saturating_add(period_ms as u64),
        });
    }

    /// Consume the deadline if it has passed. A fired timer stays disarmed
    /// until the next [`sync`](Self::sync).
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.armed {
            Some(armed) if now_ms >= armed.deadline_ms => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    pub fn armed(&self) -> Option<ArmedTimer> {
        self.armed
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.armed.map(|armed| armed.deadline_ms)
    }
}
