//! Input abstraction layer.

/// Logical actions consumed by the reader app.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    TogglePlay,
    Restart,
    Faster,
    Slower,
    GroupUp,
    GroupDown,
    /// Jump to a word index, taken verbatim.
    SeekTo(isize),
    CycleTheme,
    /// Switch to the next built-in highlight pattern.
    CyclePattern,
    ToggleMicroPause,
    Quit,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}

#[cfg(test)]
pub(crate) mod scripted {
    use super::{InputEvent, InputProvider};

    /// Replays a fixed list of events, one per poll.
    pub(crate) struct ScriptedInput<'a> {
        events: &'a [InputEvent],
        cursor: usize,
    }

    impl<'a> ScriptedInput<'a> {
        pub(crate) const fn new(events: &'a [InputEvent]) -> Self {
            Self { events, cursor: 0 }
        }
    }

    impl InputProvider for ScriptedInput<'_> {
        type Error = ();

        fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
            let Some(event) = self.events.get(self.cursor).copied() else {
                return Ok(None);
            };
            self.cursor = self.cursor.saturating_add(1);
            Ok(Some(event))
        }
    }
}
