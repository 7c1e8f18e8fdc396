//! Where results end up. The orchestrator only ever talks to a
//! [`PresentationSink`]; the terminal binary plugs in [`TerminalSink`].

mod terminal;

pub use terminal::{TerminalSink, neutralize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    Neutral,
    Success,
    Error,
}

impl DisplayStyle {
    /// Color token for the style, `None` for the default foreground.
    pub fn color_token(&self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Success => Some("#757977ff"),
            Self::Error => Some("#ff6b6b"),
        }
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        self.color_token().and_then(parse_hex_color)
    }
}

/// Accepts `#rrggbb` or `#rrggbbaa`; alpha is dropped.
fn parse_hex_color(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Display target for one user-facing result area.
///
/// `show_text` must treat its argument as plain data. Implementations never
/// interpret markup or control sequences contained in it.
pub trait PresentationSink: Send + Sync {
    fn show_text(&self, text: &str);
    fn set_style(&self, style: DisplayStyle);
    fn set_busy(&self, busy: bool);
}
