//! Preference persistence coordination.
//!
//! Preferences are stored in eframe's storage as JSON strings, one key per
//! settings struct. Missing or unreadable entries fall back to defaults.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::Preferences;

const PREFERENCES_KEY: &str = "preferences";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    pub fn load_preferences(storage: Option<&dyn eframe::Storage>) -> Preferences {
        Self::load_setting_or(storage, PREFERENCES_KEY, Preferences::default())
    }

    pub fn save_preferences(storage: &mut dyn eframe::Storage, preferences: &Preferences) {
        Self::save_setting(storage, PREFERENCES_KEY, preferences);
    }

    /// Loads a JSON setting, or `default` if it is missing or does not parse.
    pub fn load_setting_or<T>(storage: Option<&dyn eframe::Storage>, key: &str, default: T) -> T
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.and_then(|s| s.get_string(key)) else {
            return default;
        };
        match serde_json::from_str(&json_str) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "ignoring unreadable stored setting: {}", e);
                default
            }
        }
    }

    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        if let Ok(json_str) = serde_json::to_string(value) {
            storage.set_string(key, json_str);
            storage.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage as _;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_preferences_round_trip() {
        let mut storage = MockStorage::new();
        let prefs = Preferences {
            reduced_motion: true,
            show_status_bar: false,
        };

        SettingsCoordinator::save_preferences(&mut storage, &prefs);
        assert_eq!(SettingsCoordinator::load_preferences(Some(&storage)), prefs);
    }

    #[test]
    fn test_missing_storage_gives_defaults() {
        assert_eq!(SettingsCoordinator::load_preferences(None), Preferences::default());
    }

    #[test]
    fn test_corrupt_entry_gives_default() {
        let mut storage = MockStorage::new();
        storage.set_string(PREFERENCES_KEY, "{not json".to_string());
        assert_eq!(SettingsCoordinator::load_preferences(Some(&storage)), Preferences::default());
    }

    #[test]
    fn test_theme_key_independent() {
        let mut storage = MockStorage::new();
        crate::app::ThemeCoordinator::save_theme_to_storage(&mut storage, "Light");
        assert_eq!(crate::app::ThemeCoordinator::load_theme_from_storage(Some(&storage)), "Light");
        assert_eq!(SettingsCoordinator::load_preferences(Some(&storage)), Preferences::default());
    }
}
