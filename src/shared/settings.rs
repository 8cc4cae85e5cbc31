use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use ts_rs::TS;

use super::types::LanguageOption;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to determine config directory")]
    NoConfigDir,

    #[error("Settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct TextGenieSettings {
    pub preferences: UserPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "textgenie/")]
pub struct UserPreferences {
    /// Source language used when nothing has been detected yet
    pub default_source_lang: String,
    pub default_target_lang: String,
    /// Languages offered in the translate picker
    pub target_languages: Vec<LanguageOption>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            default_source_lang: "en".to_string(),
            default_target_lang: "en".to_string(),
            target_languages: vec![
                LanguageOption::new("en", "English"),
                LanguageOption::new("pt", "Portuguese"),
                LanguageOption::new("es", "Spanish"),
                LanguageOption::new("ru", "Russian"),
                LanguageOption::new("tr", "Turkish"),
                LanguageOption::new("fr", "French"),
            ],
        }
    }
}

impl UserPreferences {
    pub fn offers(&self, code: &str) -> bool {
        self.target_languages
            .iter()
            .any(|lang| lang.code.eq_ignore_ascii_case(code))
    }
}

impl TextGenieSettings {
    pub fn get_settings_path() -> SettingsResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "textgenie")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load from the platform config directory, writing defaults on first run
    pub async fn load() -> SettingsResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!("[Settings] No settings at {}, writing defaults", path.display());
            let settings = Self::default();
            settings.save_to(path).await?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await.map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    pub async fn save(&self) -> SettingsResult<()> {
        let path = Self::get_settings_path()?;
        self.save_to(&path).await
    }

    pub async fn save_to(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;

        fs::write(path, content).await.map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("textgenie-settings-{}", uuid::Uuid::new_v4()))
            .join("settings.json")
    }

    #[test]
    fn test_default_offers_six_languages() {
        let prefs = UserPreferences::default();
        let codes: Vec<_> = prefs.target_languages.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "pt", "es", "ru", "tr", "fr"]);
        assert!(prefs.offers("ES"));
        assert!(!prefs.offers("de"));
        assert_eq!(TextGenieSettings::default().preferences, prefs);
    }

    #[tokio::test]
    async fn test_load_missing_writes_defaults() {
        let path = scratch_path();
        let loaded = TextGenieSettings::load_from(&path).await.unwrap();
        assert_eq!(loaded, TextGenieSettings::default());
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = scratch_path();
        let mut settings = TextGenieSettings::default();
        settings.preferences.default_target_lang = "fr".to_string();
        settings.save_to(&path).await.unwrap();

        let loaded = TextGenieSettings::load_from(&path).await.unwrap();
        assert_eq!(loaded.preferences.default_target_lang, "fr");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = TextGenieSettings::load_from(&path).await.unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
