use std::cell::Cell;

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{colors, logging::PRINT_TARGET};

pub const TOTAL_WIDTH: usize = 64;

thread_local! {
    static KEY_WIDTH: Cell<usize> = const { Cell::new(0) }
}

/// Values that arrive already colored keep their color, plain text takes the
/// fallback.
pub trait Styled {
    fn or_color(self, fallback: Color) -> ColoredString;
}

impl Styled for &str {
    fn or_color(self, fallback: Color) -> ColoredString {
        self.color(fallback)
    }
}

impl Styled for String {
    fn or_color(self, fallback: Color) -> ColoredString {
        self.color(fallback)
    }
}

impl Styled for ColoredString {
    fn or_color(self, _fallback: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// Centers `title` in a line of `fill`.
fn titled_rule(title: &str, fill: &str, paint: fn(&str) -> ColoredString) -> String {
    let gap: usize = TOTAL_WIDTH.saturating_sub(UnicodeWidthStr::width(title));
    let left: usize = gap / 2;

    format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        paint(title),
        fill.repeat(gap - left).color(colors::SEPARATOR)
    )
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title: String = format!("⟦ MEDSCAN v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&titled_rule(&title, "═", |t| t.bright_green().bold()));
    centerln(&"Medicine authenticity checker".color(colors::TEXT_DEFAULT).to_string());
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&titled_rule(&title, "─", |t| t.bright_green()));
}

/// Closes a block of output.
pub fn separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

/// Aligns the colons of following [`aligned_line`] calls to the widest key.
pub fn set_key_width<'a>(keys: impl IntoIterator<Item = &'a str>) {
    let widest: usize = keys.into_iter().map(UnicodeWidthStr::width).max().unwrap_or(0);
    KEY_WIDTH.set(widest);
}

pub fn aligned_line(key: &str, value: impl Styled) {
    let dots: usize = (KEY_WIDTH.get() + 1).saturating_sub(UnicodeWidthStr::width(key));
    let label: String = format!(
        "{}{}",
        key.color(colors::PRIMARY),
        format!("{}:", ".".repeat(dots)).color(colors::SEPARATOR)
    );
    status(format!("{label} {}", value.or_color(colors::TEXT_DEFAULT)));
}

pub fn status(msg: impl AsRef<str>) {
    print(&format!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    ));
}

/// Prints `pairs` as branches below the previous line.
pub fn as_tree_one_level(pairs: &[(String, ColoredString)]) {
    let key_width: usize = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    for (i, (key, value)) in pairs.iter().enumerate() {
        let branch: &str = if i + 1 == pairs.len() { "└─" } else { "├─" };
        let dots: String = ".".repeat(key_width + 1 - key.len());
        print(&format!(
            " {} {}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            format!("{dots}:").color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}", space, msg));
}
