impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    pub fn play(&mut self, now_ms: u64) {
        self.finished = false;
        self.engine.start(now_ms);
        if !self.engine.is_playing() {
            self.set_status("NOTHING TO READ", "TEXT IS EMPTY", now_ms);
        }
        self.pending_redraw = true;
    }

    pub fn pause(&mut self, now_ms: u64) {
        self.engine.pause(now_ms);
        self.pending_redraw = true;
    }

    fn set_status(&mut self, line1: &'static str, line2: &'static str, now_ms: u64) {
        info!("reader: status {} / {}", line1, line2);
        self.engine.pause(now_ms);
        self.status = Some((line1, line2));
        self.pending_redraw = true;
    }

    fn adjust_wpm(&mut self, increase: bool, now_ms: u64) {
        let current = self.engine.wpm();
        let next = if increase {
            current
                .saturating_add(self.config.wpm_step)
                .min(self.config.max_wpm)
        } else {
            current
                .saturating_sub(self.config.wpm_step)
                .max(self.config.min_wpm)
        };

        if next != current {
            self.engine.set_words_per_minute(next, now_ms);
        }
    }

    fn adjust_group_size(&mut self, increase: bool, now_ms: u64) {
        let current = self.engine.group_size();
        let next = if increase {
            current.saturating_add(1).min(self.config.max_group_size)
        } else {
            current.saturating_sub(1).max(self.config.min_group_size.max(1))
        };

        if next != current {
            self.engine.set_group_size(next, now_ms);
        }
    }
}
