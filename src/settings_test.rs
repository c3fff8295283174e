use super::*;

const DEFAULT_URL: &str = "https://api.default.test";

#[test]
fn missing_settings_use_defaults() {
    let store = LocalStore::in_memory();
    let settings = AppSettings::load(&store);
    assert_eq!(settings, AppSettings { theme: ThemeMode::Dark, accent: AccentColor::Blue });
}

#[test]
fn corrupt_settings_use_defaults() {
    let mut store = LocalStore::in_memory();
    store.set_item(SETTINGS_KEY, "{\"theme\": 42").unwrap();
    assert_eq!(AppSettings::load(&store), AppSettings::default());
}

#[test]
fn partial_json_fills_missing_fields() {
    let mut store = LocalStore::in_memory();
    store.set_item(SETTINGS_KEY, r#"{"accent":"rose"}"#).unwrap();
    let settings = AppSettings::load(&store);
    assert_eq!(settings.theme, ThemeMode::Dark);
    assert_eq!(settings.accent, AccentColor::Rose);
}

#[test]
fn update_merges_and_persists() {
    let mut store = LocalStore::in_memory();
    AppSettings::update(&mut store, SettingsPatch { theme: Some(ThemeMode::Light), accent: None }).unwrap();
    let after = AppSettings::update(&mut store, SettingsPatch { theme: None, accent: Some(AccentColor::Amber) }).unwrap();

    assert_eq!(after, AppSettings { theme: ThemeMode::Light, accent: AccentColor::Amber });
    assert_eq!(AppSettings::load(&store), after);
    assert_eq!(store.get_item(SETTINGS_KEY), Some(r#"{"theme":"light","accent":"amber"}"#));
}

#[test]
fn parse_theme_and_accent() {
    assert_eq!("Light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
    assert_eq!("emerald".parse::<AccentColor>().unwrap(), AccentColor::Emerald);
    let err = "teal".parse::<AccentColor>().unwrap_err();
    assert_eq!(err.to_string(), "invalid accent 'teal'");
    assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
}

#[test]
fn api_url_defaults_until_set() {
    let mut store = LocalStore::in_memory();
    assert_eq!(api_base_url(&store, DEFAULT_URL), DEFAULT_URL);

    let saved = set_api_base_url(&mut store, "  https://proxy.internal.test  ", DEFAULT_URL).unwrap();
    assert_eq!(saved, "https://proxy.internal.test");
    assert_eq!(api_base_url(&store, DEFAULT_URL), "https://proxy.internal.test");
}

#[test]
fn blank_api_url_restores_default_explicitly() {
    let mut store = LocalStore::in_memory();
    set_api_base_url(&mut store, "https://proxy.test", DEFAULT_URL).unwrap();
    let saved = set_api_base_url(&mut store, "   ", DEFAULT_URL).unwrap();
    assert_eq!(saved, DEFAULT_URL);
    assert_eq!(store.get_item(API_BASE_URL_KEY), Some(DEFAULT_URL));
}
