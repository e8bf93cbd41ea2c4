//! Site settings file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::DirSettings;
use crate::plugins::feed::ChannelSettings;

/// Site-wide settings loaded from `site.toml` at the project root.
///
/// Everything is optional; a missing file behaves like defaults. The
/// registrar itself never consults this: its directory settings are fixed.
/// The host uses it for feed metadata and directory overrides.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Site title, used as the feed channel title.
    pub title: Option<String>,

    /// Absolute base URL of the published site.
    pub url: Option<String>,

    /// One-line site description for the feed channel.
    pub description: Option<String>,

    /// Site author.
    pub author: Option<String>,

    /// Feed language code (e.g. `en-us`).
    pub language: Option<String>,

    /// Override for the input directory.
    pub input: Option<PathBuf>,

    /// Override for the output directory.
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `site.toml` under `project_root`.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join("site.toml");

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse settings file: {}", path.display()))
    }

    /// Resolves the directory pair, falling back to `src` / `_site`.
    pub fn dirs(&self) -> DirSettings {
        let defaults = DirSettings::default();
        DirSettings {
            input: self.input.clone().unwrap_or(defaults.input),
            output: self.output.clone().unwrap_or(defaults.output),
        }
    }

    /// Feed channel metadata with placeholder defaults for missing fields.
    pub fn channel(&self) -> ChannelSettings {
        ChannelSettings {
            title: self.title.clone().unwrap_or_else(|| "Site".to_string()),
            link: self.url.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            language: self.language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert!(settings.title.is_none());
        assert_eq!(settings.dirs(), DirSettings::default());
    }

    #[test]
    fn loads_fields_from_toml() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("site.toml"),
            r#"
title = "My Site"
url = "https://example.com"
description = "notes and posts"
language = "en-us"
output = "public"
"#,
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.title.as_deref(), Some("My Site"));
        assert_eq!(settings.dirs().input, PathBuf::from("src"));
        assert_eq!(settings.dirs().output, PathBuf::from("public"));

        let channel = settings.channel();
        assert_eq!(channel.title, "My Site");
        assert_eq!(channel.link, "https://example.com");
        assert_eq!(channel.language.as_deref(), Some("en-us"));
    }

    #[test]
    fn invalid_toml_is_an_error_with_path_context() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("site.toml"), "title = [unclosed").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("site.toml"));
    }

    #[test]
    fn channel_defaults_fill_missing_fields() {
        let settings = Settings::default();
        let channel = settings.channel();
        assert_eq!(channel.title, "Site");
        assert_eq!(channel.link, "");
        assert!(channel.language.is_none());
    }
}
