//! ANSI terminal renderer. Each reading frame rewrites one line so the focus
//! letter stays in a fixed column.

use std::io::{self, Write};

use pacer_core::{highlight::WordParts, render::Screen, render::Theme};

use super::ScreenRenderer;

const LINE_COLS: usize = 48;
const PIVOT_ANCHOR_PERCENT: usize = 42;
const CLEAR_LINE: &str = "\r\x1b[2K";
const RESET: &str = "\x1b[0m";

/// SGR parameter strings for one theme.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    pub text: &'static str,
    pub background: &'static str,
    pub pivot: &'static str,
    pub chrome: &'static str,
}

pub const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            text: "30",
            background: "47",
            pivot: "31",
            chrome: "90",
        },
        Theme::Dark => Palette {
            text: "97",
            background: "40",
            pivot: "91",
            chrome: "37",
        },
        Theme::Sepia => Palette {
            text: "38;5;94",
            background: "48;5;230",
            pivot: "38;5;160",
            chrome: "38;5;137",
        },
        Theme::HighContrast => Palette {
            text: "97;1",
            background: "40",
            pivot: "93;1",
            chrome: "97",
        },
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    line_open: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            line_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// End the current in-place line so following output starts clean.
    pub fn finish_line(&mut self) -> io::Result<()> {
        if self.line_open {
            self.line_open = false;
            writeln!(self.out, "{RESET}")?;
        }
        self.out.flush()
    }

    #[allow(clippy::too_many_arguments)]
    fn render_reading(
        &mut self,
        title: &str,
        wpm: u16,
        group_size: u8,
        word: WordParts<'_>,
        progress: &str,
        playing: bool,
        theme: Theme,
    ) -> io::Result<()> {
        let colors = palette(theme);
        let anchor = LINE_COLS * PIVOT_ANCHOR_PERCENT / 100;
        let pad = anchor.saturating_sub(word.before.chars().count());
        let state = if playing { ">" } else { "||" };

        write!(
            self.out,
            "{CLEAR_LINE}\x1b[{bg}m\x1b[{chrome}m{title} {state} {wpm}wpm x{group_size} {progress:>9} \x1b[{text}m{:pad$}{before}\x1b[{pivot}m{pivot_ch}\x1b[{text}m{after}{RESET}",
            "",
            bg = colors.background,
            chrome = colors.chrome,
            text = colors.text,
            pivot = colors.pivot,
            before = word.before,
            pivot_ch = word.pivot,
            after = word.after,
        )?;
        self.line_open = true;
        self.out.flush()
    }
}

impl<W: Write> ScreenRenderer for TerminalRenderer<W> {
    fn render(&mut self, screen: Screen<'_>) -> io::Result<()> {
        match screen {
            Screen::Reading {
                title,
                wpm,
                group_size,
                word,
                progress,
                playing,
                theme,
            } => self.render_reading(title, wpm, group_size, word, progress, playing, theme),
            Screen::Finished {
                title,
                wpm,
                word_total,
                opening,
                theme,
            } => {
                self.finish_line()?;
                let colors = palette(theme);
                write!(
                    self.out,
                    "\x1b[{}m{title}: finished {word_total} words at {wpm} wpm",
                    colors.chrome
                )?;
                if !opening.is_empty() {
                    write!(self.out, " (\"{opening} ...\")")?;
                }
                writeln!(self.out, "{RESET}")?;
                self.out.flush()
            }
            Screen::Status {
                title,
                line1,
                line2,
                theme,
            } => {
                self.finish_line()?;
                let colors = palette(theme);
                writeln!(
                    self.out,
                    "\x1b[{}m{title}: {line1} - {line2}{RESET}",
                    colors.pivot
                )?;
                self.out.flush()
            }
        }
    }
}
