//! Rich (ANSI colored/styled) text support
//!
//! Provides the capability oracle that decides whether a destination may
//! receive styled output, the `rich` renderer built on `colored`, and
//! [`RichLine`], a record line composed once in both encodings.

use crate::destinations::Destination;
use colored::{Color, ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Style options applied on top of a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RichOption {
    /// Paint the color as background, text in white
    Background,
    Underline,
    Bold,
}

/// Reports whether colors are globally enabled.
///
/// Follows the `colored` crate switch, which honours `CLICOLOR`,
/// `CLICOLOR_FORCE`, `NO_COLOR` and any `colored::control::set_override` call.
pub fn colors_enabled() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

#[cfg(windows)]
fn extended_terminal_support() -> bool {
    colored::control::set_virtual_terminal(true).is_ok()
}

#[cfg(not(windows))]
fn extended_terminal_support() -> bool {
    true
}

/// Capability oracle: a destination supports rich text iff it is
/// terminal-attached, colors are globally enabled and, on Windows, the
/// console accepts ANSI sequences. A no-op destination never does.
pub fn supports_rich(destination: &dyn Destination) -> bool {
    if destination.is_nop() || !destination.is_terminal() {
        return false;
    }

    colors_enabled() && extended_terminal_support()
}

fn styled(text: &str, color: Color, options: &[RichOption]) -> ColoredString {
    let mut value = text.color(color);
    for option in options {
        value = match option {
            RichOption::Background => value.on_color(color).color(Color::White),
            RichOption::Underline => value.underline(),
            RichOption::Bold => value.bold(),
        };
    }
    value
}

/// Render `text` with the given color and style options.
pub fn rich(text: &str, color: Color, options: &[RichOption]) -> String {
    styled(text, color, options).to_string()
}

/// One output line kept in plain and (optionally) styled encoding.
///
/// The styled buffer only exists when the line was created for a printer
/// with at least one rich destination.
#[derive(Debug, Clone, Default)]
pub struct RichLine {
    plain: String,
    rich: Option<String>,
}

impl RichLine {
    pub fn new(with_rich: bool) -> Self {
        Self {
            plain: String::new(),
            rich: with_rich.then(String::new),
        }
    }

    /// Append text that is identical in both encodings.
    pub fn push(&mut self, text: &str) {
        self.plain.push_str(text);
        if let Some(rich) = self.rich.as_mut() {
            rich.push_str(text);
        }
    }

    /// Append text that is styled in the rich encoding only.
    pub fn push_styled(&mut self, text: &str, color: Color, options: &[RichOption]) {
        self.plain.push_str(text);
        if let Some(buf) = self.rich.as_mut() {
            buf.push_str(&styled(text, color, options).to_string());
        }
    }

    /// Append a pre-rendered pair, e.g. a level tag with custom escape codes.
    pub fn push_pair(&mut self, plain: &str, styled: &str) {
        self.plain.push_str(plain);
        if let Some(rich) = self.rich.as_mut() {
            rich.push_str(styled);
        }
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn rich(&self) -> Option<&str> {
        self.rich.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }
}

impl fmt::Write for RichLine {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s);
        Ok(())
    }
}
