// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use rw_core::ColorClass;

pub mod codes {
    /// Section headers: steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Help styles matching the palette below.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    let fg = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    Styles::styled()
        .header(fg(codes::HEADER))
        .usage(fg(codes::HEADER))
        .literal(fg(codes::LITERAL))
        .placeholder(fg(codes::CONTEXT))
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Format text with the muted color (darker grey).
pub fn muted(text: &str) -> String {
    if should_colorize() {
        apply_muted(text)
    } else {
        text.to_string()
    }
}

/// Apply muted color unconditionally (caller decides whether to use this).
pub(crate) fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(codes::MUTED), text, RESET)
}

/// ANSI sequence for a status color class; `None` renders uncolored.
fn class_code(class: ColorClass) -> Option<&'static str> {
    match class {
        ColorClass::Default => None,
        ColorClass::Processing => Some("\x1b[36m"),
        ColorClass::Success => Some("\x1b[32m"),
        ColorClass::Warning => Some("\x1b[33m"),
        ColorClass::Error => Some("\x1b[31m"),
        ColorClass::Muted => Some("\x1b[38;5;240m"),
    }
}

/// Colorize a status label by its color class, respecting color settings.
pub fn status(text: &str, class: ColorClass) -> String {
    if !should_colorize() {
        return text.to_string();
    }
    apply_status(text, class)
}

/// Apply status color unconditionally (caller decides whether to use this).
pub(crate) fn apply_status(text: &str, class: ColorClass) -> String {
    match class_code(class) {
        Some(code) => format!("{code}{text}{RESET}"),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
