impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    self.set_status("INPUT ERROR", "CHECK PROVIDER", now_ms);
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        debug!("reader: input {:?}", event);

        if self.status.take().is_some() {
            self.pending_redraw = true;
            if !matches!(event, InputEvent::Quit) {
                return;
            }
        }

        match event {
            InputEvent::TogglePlay => {
                if self.engine.is_playing() {
                    self.pause(now_ms);
                } else {
                    self.play(now_ms);
                }
            }
            InputEvent::Restart => {
                self.finished = false;
                self.engine.reset(now_ms);
            }
            InputEvent::Faster => {
                self.adjust_wpm(true, now_ms);
            }
            InputEvent::Slower => {
                self.adjust_wpm(false, now_ms);
            }
            InputEvent::GroupUp => {
                self.adjust_group_size(true, now_ms);
            }
            InputEvent::GroupDown => {
                self.adjust_group_size(false, now_ms);
            }
            InputEvent::SeekTo(index) => {
                self.finished = false;
                self.engine.set_index(index, now_ms);
            }
            InputEvent::CycleTheme => {
                self.theme = self.theme.next();
            }
            InputEvent::CyclePattern => {
                let pattern = self.engine.pattern().next_preset();
                info!("reader: highlight preset {:?}", pattern.preset_index());
                self.engine.set_pattern(pattern, now_ms);
            }
            InputEvent::ToggleMicroPause => {
                let mut micro_pause = *self.engine.micro_pause();
                micro_pause.enabled = !micro_pause.enabled;
                info!("reader: micro-pauses enabled={}", micro_pause.enabled);
                self.engine.set_micro_pause(micro_pause, now_ms);
            }
            InputEvent::Quit => {
                self.quit_requested = true;
            }
        }

        self.pending_redraw = true;
    }
}
