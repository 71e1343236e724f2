#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// UI-only configuration: the active color scheme, the settings sidebar, and
/// trace visibility. Seeded from Config on every start, never persisted, and
/// conversation data never flows through here.
pub struct Settings {
    pub theme_name: String,
    pub panel_visible: bool,
    pub show_traces: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        return Settings {
            theme_name: Config::get(ConfigKey::Theme),
            panel_visible: false,
            show_traces: Config::get(ConfigKey::ShowTraces) == "true",
        };
    }
}

impl Settings {
    pub fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }

    pub fn toggle_traces(&mut self) {
        self.show_traces = !self.show_traces;
    }

    pub fn cycle_theme(&mut self, names: &[String]) {
        if names.is_empty() {
            return;
        }

        let idx = names
            .iter()
            .position(|name| return name == &self.theme_name)
            .unwrap_or(names.len() - 1);

        self.theme_name = names[(idx + 1) % names.len()].to_string();
    }
}
