#[cfg(test)]
#[path = "themes_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use ratatui::style::Color;

/// Colors for one palette. Names are opaque tokens as far as the rest of the
/// app is concerned; only this registry knows what they expand to.
#[derive(Clone)]
pub struct Theme {
    pub name: String,
    pub user: Color,
    pub agent: Color,
    pub app: Color,
    pub error: Color,
    pub trace: Color,
}

pub struct Themes {}

impl Themes {
    pub fn list() -> Vec<String> {
        return vec![
            "dusk".to_string(),
            "gruvbox".to_string(),
            "mono".to_string(),
            "paper".to_string(),
        ];
    }

    pub fn get(theme_name: &str) -> Result<Theme> {
        match theme_name {
            "dusk" => {
                return Ok(Theme {
                    name: "dusk".to_string(),
                    user: Color::Cyan,
                    agent: Color::Magenta,
                    app: Color::Blue,
                    error: Color::Red,
                    trace: Color::DarkGray,
                })
            }
            "gruvbox" => {
                return Ok(Theme {
                    name: "gruvbox".to_string(),
                    user: Color::Rgb(184, 187, 38),
                    agent: Color::Rgb(250, 189, 47),
                    app: Color::Rgb(131, 165, 152),
                    error: Color::Rgb(251, 73, 52),
                    trace: Color::Rgb(146, 131, 116),
                })
            }
            "mono" => {
                return Ok(Theme {
                    name: "mono".to_string(),
                    user: Color::White,
                    agent: Color::Gray,
                    app: Color::DarkGray,
                    error: Color::White,
                    trace: Color::DarkGray,
                })
            }
            "paper" => {
                return Ok(Theme {
                    name: "paper".to_string(),
                    user: Color::Rgb(0, 95, 135),
                    agent: Color::Rgb(135, 0, 87),
                    app: Color::Rgb(78, 78, 78),
                    error: Color::Rgb(175, 0, 0),
                    trace: Color::Rgb(135, 135, 135),
                })
            }
            _ => bail!(format!("Color scheme {theme_name} does not exist")),
        }
    }
}
