//! Color configuration for the storefront.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub card_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub card_hover_border: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub card_name: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub card_id: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub price_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub price_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub animation: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub indicator: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tab_active: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub tab_inactive: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(0x3b, 0x82, 0xf6),
            border: Color::DarkGray,
            card_border: Color::DarkGray,
            card_hover_border: Color::Cyan,
            card_name: Color::White,
            card_id: Color::Gray,
            price_fg: Color::White,
            price_bg: Color::Rgb(0x3b, 0x82, 0xf6),
            animation: Color::LightYellow,
            indicator: Color::Cyan,
            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a named color (`"DarkGray"`, case-insensitive) or a `#RRGGBB` /
/// `#RGB` hex code.
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex).ok_or_else(|| format!("Invalid hex color: {}", s));
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    match hex.len() {
        6 => Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        // #RGB expands each digit: #f0a -> #ff00aa
        3 => {
            let r = channel(0..1)?;
            let g = channel(1..2)?;
            let b = channel(2..3)?;
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(parse_color_string("Cyan").unwrap(), Color::Cyan);
        assert_eq!(parse_color_string("darkgrey").unwrap(), Color::DarkGray);
        assert_eq!(parse_color_string(" White ").unwrap(), Color::White);
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(
            parse_color_string("#3b82f6").unwrap(),
            Color::Rgb(0x3b, 0x82, 0xf6)
        );
        assert_eq!(parse_color_string("#f0a").unwrap(), Color::Rgb(255, 0, 170));
    }

    #[test]
    fn test_parse_invalid_colors() {
        assert!(parse_color_string("Chartreuse").is_err());
        assert!(parse_color_string("#12").is_err());
        assert!(parse_color_string("#zzzzzz").is_err());
        assert!(parse_color_string("#ééé").is_err());
    }
}
