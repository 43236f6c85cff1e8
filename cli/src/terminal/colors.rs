use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 192, g: 192, b: 192 };

pub const AUTHENTIC: Color = Color::BrightGreen;
pub const FAKE: Color = Color::BrightRed;
pub const ERROR: Color = Color::Red;
