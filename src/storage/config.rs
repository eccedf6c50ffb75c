use super::Result;
use crate::api::constants::{DEFAULT_APPKNOX_HOST, DEFAULT_SECURE_CONNECTION};
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_secure")]
    pub secure: bool,
    pub username: Option<String>,
}

fn default_host() -> String {
    DEFAULT_APPKNOX_HOST.to_string()
}

fn default_secure() -> bool {
    DEFAULT_SECURE_CONNECTION
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: default_host(),
            secure: default_secure(),
            username: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigSaveFailed {
            message: e.to_string(),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("appknox").join("config.toml"))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Profile `name`, created with defaults if absent.
    pub fn profile_mut(&mut self, name: &str) -> &mut Profile {
        self.profiles.entry(name.to_string()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
    }

    #[test]
    fn test_profile_defaults() {
        let profile = Profile::default();
        assert_eq!(profile.host, "api.appknox.com");
        assert!(profile.secure);
        assert!(profile.username.is_none());
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();
        let profile = Profile {
            host: "staging.appknox.test".to_string(),
            secure: false,
            username: Some("alice".to_string()),
        };
        config.set_profile("staging".to_string(), profile.clone());

        assert_eq!(config.get_profile("staging"), Some(&profile));
        assert!(config.get_profile("nonexistent").is_none());

        config.profile_mut("fresh").username = Some("bob".to_string());
        let fresh = config.get_profile("fresh").expect("profile created");
        assert_eq!(fresh.host, "api.appknox.com");
        assert_eq!(fresh.username.as_deref(), Some("bob"));
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.default_profile = Some("test".to_string());
        config.set_profile(
            "test".to_string(),
            Profile {
                host: "localhost:8000".to_string(),
                secure: false,
                username: Some("alice".to_string()),
            },
        );

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");
        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_load_partial_profile_uses_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[profiles.work]\nusername = \"carol\"\n").unwrap();

        let config = Config::load(Some(config_path)).expect("Failed to load config");
        let work = config.get_profile("work").expect("profile present");
        assert_eq!(work.host, "api.appknox.com");
        assert!(work.secure);
        assert_eq!(work.username.as_deref(), Some("carol"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "profiles = [").unwrap();

        assert!(matches!(
            Config::load(Some(config_path)),
            Err(StorageError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("missing.toml")))
            .expect("Failed to load default config");
        assert_eq!(config, Config::default());
    }
}
