use super::{DisplayStyle, PresentationSink};
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

const BUSY_TEXT: &str = "Generating idea...";
// Return to column 0 and clear the line
const ERASE_LINE: &str = "\r\x1b[2K";

struct ResultArea {
    text: String,
    style: DisplayStyle,
}

/// Result area rendered on a terminal.
///
/// Text and style are kept until [`TerminalSink::render`] prints them, the
/// same way a page element holds its content and color independently. The
/// busy indicator goes to a separate status stream right away. On an
/// interactive status stream it stays on one line and is erased once the
/// action is no longer busy.
pub struct TerminalSink {
    out: Mutex<Box<dyn Write + Send>>,
    status: Mutex<Box<dyn Write + Send>>,
    color: bool,
    erase_busy: bool,
    area: Mutex<ResultArea>,
}

impl TerminalSink {
    pub fn stdio(color: bool) -> Self {
        let erase_busy = io::stderr().is_terminal();
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()), color)
            .erase_busy_line(erase_busy)
    }

    pub fn with_writers(
        out: Box<dyn Write + Send>,
        status: Box<dyn Write + Send>,
        color: bool,
    ) -> Self {
        Self {
            out: Mutex::new(out),
            status: Mutex::new(status),
            color,
            erase_busy: false,
            area: Mutex::new(ResultArea {
                text: String::new(),
                style: DisplayStyle::Neutral,
            }),
        }
    }

    pub fn erase_busy_line(mut self, erase: bool) -> Self {
        self.erase_busy = erase;
        self
    }

    /// Prints the current result area, if it holds any text.
    pub fn render(&self) {
        let (text, style) = {
            let area = lock(&self.area);
            (neutralize(&area.text), area.style)
        };
        if text.is_empty() {
            return;
        }

        let line = match style.rgb() {
            Some((r, g, b)) if self.color => text.truecolor(r, g, b).to_string(),
            _ => text,
        };

        let mut out = lock(&self.out);
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            warn!("Failed to write result: {}", e);
        }
    }
}

impl PresentationSink for TerminalSink {
    fn show_text(&self, text: &str) {
        lock(&self.area).text = text.to_string();
    }

    fn set_style(&self, style: DisplayStyle) {
        lock(&self.area).style = style;
    }

    fn set_busy(&self, busy: bool) {
        let mut status = lock(&self.status);
        let written = match (busy, self.erase_busy) {
            (true, true) => write!(status, "{}", BUSY_TEXT),
            (true, false) => writeln!(status, "{}", BUSY_TEXT),
            (false, true) => write!(status, "{}", ERASE_LINE),
            // A finished line on a plain stream needs no cleanup
            (false, false) => return,
        };
        if let Err(e) = written.and_then(|_| status.flush()) {
            warn!("Failed to update busy indicator: {}", e);
        }
    }
}

/// Replaces control characters other than newline, tab and the carriage
/// return of a CRLF pair, so text from the backend cannot smuggle terminal
/// escape sequences.
pub fn neutralize(text: &str) -> String {
    let mut chars = text.chars().peekable();
    let mut neutral = String::with_capacity(text.len());

    while let Some(c) = chars.next() {
        let keep = match c {
            '\n' | '\t' => true,
            '\r' => chars.peek() == Some(&'\n'),
            c => !c.is_control(),
        };
        neutral.push(if keep { c } else { char::REPLACEMENT_CHARACTER });
    }

    neutral
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
