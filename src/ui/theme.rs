use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_correct: String,
    pub text_incorrect: String,
    pub text_incorrect_bg: String,
    pub text_pending: String,
    pub text_cursor_bg: String,
    pub text_cursor_fg: String,
    pub accent: String,
    pub accent_dim: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_empty: String,
    pub energy_bar: String,
    pub error: String,
    pub warning: String,
    pub success: String,
    /// Power bar tier colors, x1 through x4.
    pub power_tiers: [String; 4],
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes override bundled ones
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("typestorm")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename)
            && let Ok(content) = std::str::from_utf8(file.data.as_ref())
            && let Ok(theme) = toml::from_str::<Theme>(content)
        {
            return Some(theme);
        }

        None
    }

    #[allow(dead_code)]
    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("storm-dark").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#10101a".to_string(),
            fg: "#d8dee9".to_string(),
            text_correct: "#a3be8c".to_string(),
            text_incorrect: "#bf616a".to_string(),
            text_incorrect_bg: "#3b2228".to_string(),
            text_pending: "#4c566a".to_string(),
            text_cursor_bg: "#e5e9f0".to_string(),
            text_cursor_fg: "#10101a".to_string(),
            accent: "#88c0d0".to_string(),
            accent_dim: "#3b4252".to_string(),
            border: "#3b4252".to_string(),
            header_bg: "#1c1c2a".to_string(),
            header_fg: "#d8dee9".to_string(),
            bar_empty: "#252535".to_string(),
            energy_bar: "#ebcb8b".to_string(),
            error: "#bf616a".to_string(),
            warning: "#ebcb8b".to_string(),
            success: "#a3be8c".to_string(),
            power_tiers: [
                "#5e81ac".to_string(),
                "#88c0d0".to_string(),
                "#ebcb8b".to_string(),
                "#d08770".to_string(),
            ],
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color {
        Self::parse_color(&self.bg)
    }
    pub fn fg(&self) -> Color {
        Self::parse_color(&self.fg)
    }
    pub fn text_correct(&self) -> Color {
        Self::parse_color(&self.text_correct)
    }
    pub fn text_incorrect(&self) -> Color {
        Self::parse_color(&self.text_incorrect)
    }
    pub fn text_incorrect_bg(&self) -> Color {
        Self::parse_color(&self.text_incorrect_bg)
    }
    pub fn text_pending(&self) -> Color {
        Self::parse_color(&self.text_pending)
    }
    pub fn text_cursor_bg(&self) -> Color {
        Self::parse_color(&self.text_cursor_bg)
    }
    pub fn text_cursor_fg(&self) -> Color {
        Self::parse_color(&self.text_cursor_fg)
    }
    pub fn accent(&self) -> Color {
        Self::parse_color(&self.accent)
    }
    pub fn accent_dim(&self) -> Color {
        Self::parse_color(&self.accent_dim)
    }
    pub fn border(&self) -> Color {
        Self::parse_color(&self.border)
    }
    pub fn header_bg(&self) -> Color {
        Self::parse_color(&self.header_bg)
    }
    pub fn header_fg(&self) -> Color {
        Self::parse_color(&self.header_fg)
    }
    pub fn bar_empty(&self) -> Color {
        Self::parse_color(&self.bar_empty)
    }
    pub fn energy_bar(&self) -> Color {
        Self::parse_color(&self.energy_bar)
    }
    pub fn error(&self) -> Color {
        Self::parse_color(&self.error)
    }
    pub fn warning(&self) -> Color {
        Self::parse_color(&self.warning)
    }
    pub fn success(&self) -> Color {
        Self::parse_color(&self.success)
    }

    /// Color for a power tier (0-based index, clamped).
    pub fn power_tier(&self, tier_idx: usize) -> Color {
        let idx = tier_idx.min(self.power_tiers.len() - 1);
        Self::parse_color(&self.power_tiers[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_themes_parse() {
        for name in Theme::available_themes() {
            assert!(Theme::load(&name).is_some(), "theme {name} failed to load");
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(ThemeColors::parse_color("#ff0080"), Color::Rgb(255, 0, 128));
        assert_eq!(ThemeColors::parse_color("nonsense"), Color::White);
    }
}
