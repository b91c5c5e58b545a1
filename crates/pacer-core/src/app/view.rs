impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    pub fn new(
        text: &str,
        input: IN,
        mut config: ReaderConfig,
        settings: PersistedSettings,
        app_title: &'static str,
    ) -> Self {
        if config.max_wpm < config.min_wpm {
            core::mem::swap(&mut config.max_wpm, &mut config.min_wpm);
        }
        if config.max_group_size < config.min_group_size {
            core::mem::swap(&mut config.max_group_size, &mut config.min_group_size);
        }

        let mut settings = settings;
        settings.wpm = settings.wpm.clamp(config.min_wpm, config.max_wpm);
        settings.group_size = settings
            .group_size
            .clamp(config.min_group_size.max(1), config.max_group_size.max(1));

        Self {
            engine: PlaybackEngine::new(text, settings.playback_config()),
            input,
            config,
            app_title,
            theme: settings.theme,
            status: None,
            pending_redraw: true,
            finished: false,
            quit_requested: false,
            words_since_drain: 0,
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);

        match self.engine.tick(now_ms) {
            AdvanceResult::Advanced => {
                self.words_since_drain = self.words_since_drain.saturating_add(1);
                self.pending_redraw = false;
                TickResult::RenderRequested
            }
            AdvanceResult::EndOfText => {
                self.finished = true;
                self.pending_redraw = false;
                info!("reader: finished {} words", self.engine.word_count());
                TickResult::RenderRequested
            }
            AdvanceResult::Idle => {
                if self.pending_redraw {
                    self.pending_redraw = false;
                    TickResult::RenderRequested
                } else {
                    TickResult::NoRender
                }
            }
        }
    }

    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        if let Some((line1, line2)) = self.status {
            f(Screen::Status {
                title: self.app_title,
                line1,
                line2,
                theme: self.theme,
            });
            return;
        }

        if self.finished {
            f(Screen::Finished {
                title: self.app_title,
                wpm: self.engine.wpm(),
                word_total: self.engine.word_count(),
                opening: first_words_excerpt(self.engine.text(), OPENING_WORDS),
                theme: self.theme,
            });
            return;
        }

        let mut progress_buf = [0u8; PROGRESS_LABEL_BYTES];
        let position = self.engine.shown_index().map_or(0, |index| index + 1);
        let progress = progress_label(position, self.engine.word_count(), &mut progress_buf);

        f(Screen::Reading {
            title: self.app_title,
            wpm: self.engine.wpm(),
            group_size: self.engine.group_size(),
            word: self.engine.word_parts(),
            progress,
            playing: self.engine.is_playing(),
            theme: self.theme,
        });
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn input(&self) -> &IN {
        &self.input
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.engine.next_deadline_ms()
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings {
            wpm: self.engine.wpm(),
            group_size: self.engine.group_size(),
            theme: self.theme,
            highlight_pattern: self.engine.pattern().clone(),
            micro_pause: *self.engine.micro_pause(),
        }
    }

    /// Words shown since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }
}
