//! Session record and lenient decoding

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{AnimationType, DEFAULT_ANIMATION_DURATION_MS};
use crate::theme::Theme;

/// Longest transition accepted from a session file (milliseconds)
const MAX_ANIMATION_DURATION_MS: u64 = 5000;

/// State persisted across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub last_path: PathBuf,
    #[serde(rename = "anim_duration")]
    pub anim_duration_ms: u64,
    pub anim_type: AnimationType,
    pub theme: Theme,
}

impl Session {
    /// Fresh session starting in `home`
    pub fn new(home: &Path) -> Self {
        Self {
            last_path: home.to_path_buf(),
            anim_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            anim_type: AnimationType::default(),
            theme: Theme::default(),
        }
    }

    /// Decode a session field by field
    ///
    /// Every field falls back to its default on its own when absent or malformed:
    /// - `last_path` must still be a directory, else `home`; it is made absolute
    /// - `anim_duration` must be 1..=5000 ms
    /// - `theme` must carry every colour key with a valid `#rrggbb` value, else the
    ///   Dark preset
    pub fn from_json_lenient(value: &Value, home: &Path) -> Self {
        let defaults = Self::new(home);

        let last_path = value
            .get("last_path")
            .and_then(Value::as_str)
            .and_then(|p| PathBuf::from(p).canonicalize().ok())
            .filter(|p| p.is_dir())
            .unwrap_or(defaults.last_path);

        let anim_duration_ms = value
            .get("anim_duration")
            .and_then(Value::as_u64)
            .filter(|ms| (1..=MAX_ANIMATION_DURATION_MS).contains(ms))
            .unwrap_or(defaults.anim_duration_ms);

        let anim_type = value
            .get("anim_type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<AnimationType>().ok())
            .unwrap_or(defaults.anim_type);

        let theme = value
            .get("theme")
            .and_then(|t| serde_json::from_value::<Theme>(t.clone()).ok())
            .filter(|t| t.validate().is_ok())
            .unwrap_or(defaults.theme);

        Self { last_path, anim_duration_ms, anim_type, theme }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::theme::ThemePreset;

    #[test]
    fn test_full_session_decodes() {
        let dir = TempDir::new().unwrap();
        let home = Path::new("/nonexistent-home");
        let value = json!({
            "last_path": dir.path(),
            "anim_duration": 400,
            "anim_type": "Slide",
            "theme": ThemePreset::Light.theme(),
        });

        let session = Session::from_json_lenient(&value, home);
        assert_eq!(session.last_path, dir.path().canonicalize().unwrap());
        assert_eq!(session.anim_duration_ms, 400);
        assert_eq!(session.anim_type, AnimationType::Slide);
        assert_eq!(session.theme, ThemePreset::Light.theme());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let home = Path::new("/home/someone");
        let session = Session::from_json_lenient(&json!({}), home);
        assert_eq!(session, Session::new(home));
    }

    #[test]
    fn test_relative_last_path_is_made_absolute() {
        let home = Path::new("/home/someone");
        let session = Session::from_json_lenient(&json!({ "last_path": "." }), home);

        assert!(session.last_path.is_absolute());
        assert_eq!(session.last_path, std::env::current_dir().unwrap().canonicalize().unwrap());
        assert!(session.last_path.parent().is_some());
    }

    #[test]
    fn test_vanished_last_path_falls_back_to_home() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("deleted");
        let session = Session::from_json_lenient(&json!({ "last_path": gone }), dir.path());
        assert_eq!(session.last_path, dir.path());
    }

    #[test]
    fn test_incomplete_theme_falls_back_to_dark() {
        let home = Path::new("/h");
        let value = json!({ "theme": { "background": "#ffffff", "text": "#000000" } });
        let session = Session::from_json_lenient(&value, home);
        assert_eq!(session.theme, ThemePreset::Dark.theme());
    }

    #[test]
    fn test_invalid_theme_colour_falls_back_to_dark() {
        let home = Path::new("/h");
        let mut theme = serde_json::to_value(ThemePreset::Light.theme()).unwrap();
        theme["text"] = json!("not-a-colour");
        let session = Session::from_json_lenient(&json!({ "theme": theme }), home);
        assert_eq!(session.theme, ThemePreset::Dark.theme());
    }

    #[test]
    fn test_bad_animation_fields_fall_back() {
        let home = Path::new("/h");
        let value = json!({ "anim_duration": -5, "anim_type": "Spin" });
        let session = Session::from_json_lenient(&value, home);
        assert_eq!(session.anim_duration_ms, DEFAULT_ANIMATION_DURATION_MS);
        assert_eq!(session.anim_type, AnimationType::Fade);
    }

    #[test]
    fn test_serialized_keys() {
        let session = Session::new(Path::new("/h"));
        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("last_path").is_some());
        assert_eq!(value["anim_duration"], json!(200));
        assert_eq!(value["anim_type"], json!("Fade"));
        assert_eq!(value["theme"]["selected_bg"], json!("#007acc"));
    }
}
