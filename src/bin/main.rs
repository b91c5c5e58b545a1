#![deny(clippy::large_stack_frames)]

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
    process,
};

use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use log::{error, info, warn};
use pacer_core::{
    app::{ReaderApp, ReaderConfig, TickResult},
    quiz::{DEFAULT_QUIZ_QUESTIONS, LocalQuizProvider, Quiz, generate_or_mock},
    settings::{PersistedSettings, SettingsStore},
};
use pacer_host::{
    input::stdin::{HELP, StdinCommands},
    render::{ScreenRenderer, terminal::TerminalRenderer},
    storage::json_settings::JsonSettingsStore,
};

use settings_sync::SettingsSyncState;

#[path = "main/settings_sync.rs"]
mod settings_sync;

const TITLE: &str = "Pacer";
const TEXT_ENV: &str = "PACER_TEXT";
const SETTINGS_ENV: &str = "PACER_SETTINGS";
const DEFAULT_SETTINGS_PATH: &str = "pacer-settings.json";
const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const INPUT_POLL_INTERVAL_MS: u64 = 20;
const REPORT_INTERVAL_SECS: u64 = 5;

const SAMPLE_TEXT: &str = "Rapid serial visual presentation shows one word at a time in a fixed \
spot, so your eyes never have to travel across the line. The highlighted letter marks \
where to look.\n\nLonger words, numbers like 1234567, and the ends of sentences stay on \
screen a little longer. Commas, too, earn a short pause; paragraphs earn a longer one.";

fn load_text() -> io::Result<String> {
    match env::var_os(TEXT_ENV) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            info!("text: loaded {} bytes from {}", text.len(), PathBuf::from(path).display());
            Ok(text)
        }
        None => {
            info!("text: {} not set, using the built-in sample", TEXT_ENV);
            Ok(SAMPLE_TEXT.to_string())
        }
    }
}

fn load_settings(store: &mut JsonSettingsStore) -> PersistedSettings {
    match store.load() {
        Ok(Some(settings)) => {
            info!("settings restored from {}", store.path().display());
            settings
        }
        Ok(None) => {
            info!("no saved settings at {}", store.path().display());
            PersistedSettings::default()
        }
        Err(err) => {
            warn!("failed to read saved settings ({}); using defaults", err);
            PersistedSettings::default()
        }
    }
}

fn print_quiz(out: &mut impl Write, quiz: &Quiz) -> io::Result<()> {
    if quiz.questions.is_empty() {
        writeln!(out, "Quiz: the text is too short for questions.")?;
        return out.flush();
    }

    writeln!(out, "Quiz:")?;
    for (number, question) in quiz.questions.iter().enumerate() {
        writeln!(out, "{}. {}", number + 1, question.prompt)?;
        for (option, text) in question.options.iter().enumerate() {
            let marker = char::from(b'a' + (option as u8 % 26));
            writeln!(out, "   {marker}) {text}")?;
        }
    }
    if let Some(answers) = quiz
        .questions
        .iter()
        .map(|question| question.answer())
        .collect::<Option<Vec<_>>>()
    {
        writeln!(out, "Answers: {}", answers.join(", "))?;
    }
    out.flush()
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let text = match load_text() {
        Ok(text) => text,
        Err(err) => {
            error!("text: cannot read {}: {}", TEXT_ENV, err);
            process::exit(1);
        }
    };

    let settings_path =
        env::var_os(SETTINGS_ENV).map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH), PathBuf::from);
    let mut settings_store = JsonSettingsStore::new(settings_path);
    let initial_settings = load_settings(&mut settings_store);

    let input = match StdinCommands::spawn() {
        Ok(input) => input,
        Err(err) => {
            error!("input: cannot start stdin reader: {}", err);
            process::exit(1);
        }
    };

    let mut app = Box::new(ReaderApp::new(
        &text,
        input,
        ReaderConfig::default(),
        initial_settings,
        TITLE,
    ));
    let mut settings_sync = SettingsSyncState::new(app.persisted_settings());
    let mut renderer = TerminalRenderer::new(io::stdout());
    let mut render_fault_logged = false;
    let mut quiz_shown = false;

    info!(
        "reader: {} words at {} wpm, group {}",
        app.engine().word_count(),
        app.engine().wpm(),
        app.engine().group_size()
    );
    info!("{}", HELP);

    let loop_start = Instant::now();
    let mut report_start = Instant::now();
    let mut report_words: u64 = 0;

    app.play(0);

    loop {
        let now_ms = loop_start.elapsed().as_millis();

        if app.tick(now_ms) == TickResult::RenderRequested {
            app.with_screen(|screen| {
                if let Err(err) = renderer.render(screen) {
                    if !render_fault_logged {
                        warn!("render: terminal write failed: {}", err);
                        render_fault_logged = true;
                    }
                }
            });
        }

        if app.is_finished() && !quiz_shown {
            quiz_shown = true;
            let quiz = generate_or_mock(
                &mut LocalQuizProvider,
                app.engine().text(),
                DEFAULT_QUIZ_QUESTIONS,
            );
            if let Err(err) = print_quiz(&mut io::stdout(), &quiz) {
                warn!("quiz: print failed: {}", err);
            }
        } else if !app.is_finished() {
            quiz_shown = false;
        }

        settings_sync.track_current(app.persisted_settings(), now_ms);
        settings_sync.flush_if_due(&mut settings_store, now_ms);

        report_words = report_words.saturating_add(u64::from(app.drain_word_updates()));

        let elapsed = report_start.elapsed();
        if elapsed >= Duration::from_secs(REPORT_INTERVAL_SECS) {
            let elapsed_ms = elapsed.as_millis().max(1);
            let wpm_x100 = report_words * 6_000_000 / elapsed_ms;

            info!(
                "effective_wpm={}.{:02} words={} elapsed_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                report_words,
                elapsed_ms
            );

            report_words = 0;
            report_start = Instant::now();
        }

        if app.quit_requested() {
            info!("reader: quit requested");
            break;
        }
        if app.is_finished() && app.input().is_closed() {
            info!("reader: finished and input closed");
            break;
        }

        let wait_ms = app.next_deadline_ms().map_or(INPUT_POLL_INTERVAL_MS, |deadline| {
            deadline
                .saturating_sub(now_ms)
                .clamp(1, INPUT_POLL_INTERVAL_MS)
        });
        Timer::after_millis(wait_ms).await;
    }

    if let Err(err) = renderer.finish_line() {
        warn!("render: terminal write failed: {}", err);
    }
    let now_ms = loop_start.elapsed().as_millis();
    settings_sync.track_current(app.persisted_settings(), now_ms);
    settings_sync.flush(&mut settings_store, now_ms);

    // The std executor never returns on its own.
    process::exit(0);
}
