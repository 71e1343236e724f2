use super::Settings;

fn settings() -> Settings {
    return Settings {
        theme_name: "dusk".to_string(),
        panel_visible: false,
        show_traces: false,
    };
}

#[test]
fn it_toggles_the_panel() {
    let mut settings = settings();
    settings.toggle_panel();
    assert!(settings.panel_visible);
    settings.toggle_panel();
    assert!(!settings.panel_visible);
}

#[test]
fn it_toggles_traces() {
    let mut settings = settings();
    settings.toggle_traces();
    assert!(settings.show_traces);
}

#[test]
fn it_cycles_themes_with_wraparound() {
    let names = vec![
        "dusk".to_string(),
        "gruvbox".to_string(),
        "mono".to_string(),
    ];

    let mut settings = settings();
    settings.cycle_theme(&names);
    assert_eq!(settings.theme_name, "gruvbox".to_string());
    settings.cycle_theme(&names);
    assert_eq!(settings.theme_name, "mono".to_string());
    settings.cycle_theme(&names);
    assert_eq!(settings.theme_name, "dusk".to_string());
}

#[test]
fn it_recovers_from_an_unknown_theme() {
    let names = vec!["dusk".to_string(), "gruvbox".to_string()];

    let mut settings = settings();
    settings.theme_name = "missing".to_string();
    settings.cycle_theme(&names);
    assert_eq!(settings.theme_name, "dusk".to_string());
}
