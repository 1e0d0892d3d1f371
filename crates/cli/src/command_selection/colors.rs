use crossterm::style::Color;
use treecuts_core::config::Settings;
use treecuts_core::error::{Error, Result};

/// Parses a color setting: an ANSI value such as `"201"` or a crossterm
/// color name such as `"darkcyan"`.
///
/// # Errors
///
/// Returns [`Error::UnknownColorName`] for anything else.
pub fn parse_color(value: &str) -> Result<Color> {
    let value = value.trim();

    if let Ok(ansi) = value.parse::<u8>() {
        return Ok(Color::AnsiValue(ansi));
    }

    Ok(match value.to_lowercase().as_str() {
        "black" => Color::Black,
        "darkgrey" => Color::DarkGrey,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" => Color::Grey,
        _ => return Err(Error::UnknownColorName(value.to_string())),
    })
}

/// Colors of the filter widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub indicator: Color,
    pub matched: Color,
    pub header: Color,
    pub prompt: Color,
}

impl Palette {
    /// # Errors
    ///
    /// Returns an error if any color setting cannot be parsed.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            indicator: parse_color(&settings.indicator_color)?,
            matched: parse_color(&settings.match_color)?,
            header: parse_color(&settings.header_color)?,
            prompt: parse_color(&settings.prompt_color)?,
        })
    }
}
