//! Colour themes for the explorer.
//!
//! A [`Theme`] is five `#rrggbb` strings, stored verbatim in the session file so a
//! hand-edited session stays readable. Colours are validated whenever they enter the
//! program (editor input and session load) and converted to ratatui colours at
//! render time.

use anyhow::{Result, bail};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Editable colour slots, in editor order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKey {
    Background,
    Text,
    SelectedBg,
    HoverBg,
    TooltipBg,
}

impl ThemeKey {
    pub const ALL: [ThemeKey; 5] = [
        ThemeKey::Background,
        ThemeKey::Text,
        ThemeKey::SelectedBg,
        ThemeKey::HoverBg,
        ThemeKey::TooltipBg,
    ];

    /// Key name as stored in the session file
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKey::Background => "background",
            ThemeKey::Text => "text",
            ThemeKey::SelectedBg => "selected_bg",
            ThemeKey::HoverBg => "hover_bg",
            ThemeKey::TooltipBg => "tooltip_bg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    Light,
    Dark,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 2] = [ThemePreset::Light, ThemePreset::Dark];

    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Light => "Light",
            ThemePreset::Dark => "Dark",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Light => Theme {
                background: "#f0f0f0".to_string(),
                text: "#202020".to_string(),
                selected_bg: "#007acc".to_string(),
                hover_bg: "#cce4f7".to_string(),
                tooltip_bg: "#eeeeee".to_string(),
            },
            ThemePreset::Dark => Theme {
                background: "#1e1e1e".to_string(),
                text: "#dddddd".to_string(),
                selected_bg: "#007acc".to_string(),
                hover_bg: "#094771".to_string(),
                tooltip_bg: "#333333".to_string(),
            },
        }
    }
}

/// Colour scheme: `hover_bg` marks entries, `tooltip_bg` fills the preview pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub selected_bg: String,
    pub hover_bg: String,
    pub tooltip_bg: String,
}

impl Default for Theme {
    fn default() -> Self {
        ThemePreset::Dark.theme()
    }
}

impl Theme {
    pub fn get(&self, key: ThemeKey) -> &str {
        match key {
            ThemeKey::Background => &self.background,
            ThemeKey::Text => &self.text,
            ThemeKey::SelectedBg => &self.selected_bg,
            ThemeKey::HoverBg => &self.hover_bg,
            ThemeKey::TooltipBg => &self.tooltip_bg,
        }
    }

    /// Set one colour; the value must parse as `#rrggbb`
    pub fn set(&mut self, key: ThemeKey, value: &str) -> Result<()> {
        let value = value.trim();
        parse_hex_color(value)?;
        let normalized = value.to_ascii_lowercase();
        match key {
            ThemeKey::Background => self.background = normalized,
            ThemeKey::Text => self.text = normalized,
            ThemeKey::SelectedBg => self.selected_bg = normalized,
            ThemeKey::HoverBg => self.hover_bg = normalized,
            ThemeKey::TooltipBg => self.tooltip_bg = normalized,
        }
        Ok(())
    }

    /// Check every slot holds a valid colour
    pub fn validate(&self) -> Result<()> {
        for key in ThemeKey::ALL {
            if let Err(e) = parse_hex_color(self.get(key)) {
                bail!("Invalid theme colour for {}: {}", key.as_str(), e);
            }
        }
        Ok(())
    }

    /// Name of the preset this theme equals, if any
    pub fn preset_name(&self) -> Option<&'static str> {
        ThemePreset::ALL.iter().find(|p| p.theme() == *self).map(|p| p.name())
    }

    /// Resolved colour for `key`; unparsable values fall back to terminal defaults
    pub fn color(&self, key: ThemeKey) -> Color {
        parse_hex_color(self.get(key)).unwrap_or(Color::Reset)
    }
}

/// Parse `#rrggbb` (the leading `#` is required)
///
/// # Examples
///
/// ```
/// use ratatui::style::Color;
/// use filey::theme::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#007acc").unwrap(), Color::Rgb(0, 122, 204));
/// assert!(parse_hex_color("blue").is_err());
/// ```
pub fn parse_hex_color(value: &str) -> Result<Color> {
    let Some(hex) = value.strip_prefix('#') else {
        bail!("Colour must start with '#': {:?}", value);
    };
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Colour must be #rrggbb: {:?}", value);
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Linear blend between two colours; `t` is clamped to `0.0..=1.0`
pub fn blend(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}
