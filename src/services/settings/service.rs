use crate::models::settings::GridSettings;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "grid.toml";

/// Loads and saves `GridSettings` as TOML.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the platform config directory.
    pub fn from_project_dirs() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "ScheduleGrid", "ScheduleGrid")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file does not exist yet.
    pub fn load(&self) -> Result<GridSettings> {
        if !self.path.exists() {
            log::info!("No settings at {}; using defaults", self.path.display());
            return Ok(GridSettings::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let settings: GridSettings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        Ok(settings)
    }

    /// Like `load`, but logs and returns defaults on any error.
    pub fn load_or_default(&self) -> GridSettings {
        self.load().unwrap_or_else(|err| {
            log::warn!("Falling back to default grid settings: {:#}", err);
            GridSettings::default()
        })
    }

    pub fn save(&self, settings: &GridSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::TimeFormat;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("grid.toml"));
        assert_eq!(service.load().unwrap(), GridSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = SettingsService::new(dir.path().join("nested").join("grid.toml"));
        let settings = GridSettings {
            hour_height: 90.0,
            start_hour: 7,
            end_hour: 20,
            time_format: TimeFormat::TwelveHour,
            ..GridSettings::default()
        };

        service.save(&settings).unwrap();
        assert_eq!(service.load().unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_error_but_fallback_works() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.toml");
        fs::write(&path, "start_hour = 20\nend_hour = 6\n").unwrap();

        let service = SettingsService::new(&path);
        assert!(service.load().is_err());
        assert_eq!(service.load_or_default(), GridSettings::default());
    }

    #[test]
    fn test_garbage_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grid.toml");
        fs::write(&path, "hour_height = \"tall\"").unwrap();
        assert!(SettingsService::new(&path).load().is_err());
    }
}
