use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::prompt::{Template, TemplateKind};

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub prompt: PromptConfig,
    pub html: HtmlConfig,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Checkbox state file. Defaults to the platform data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PromptConfig {
    pub template: TemplateKind,
    pub profession: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: TemplateKind::Checklist,
            profession: "Expert".to_string(),
        }
    }
}

impl PromptConfig {
    pub fn template(&self) -> Template {
        self.template.with_profession(&self.profession)
    }
}

/// CSS classes put on emitted HTML elements.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HtmlConfig {
    pub list_class: String,
    pub heading_class: String,
    pub paragraph_class: String,
    pub bullet_class: String,
    pub item_class: String,
    pub checkbox_class: String,
    pub label_class: String,
    pub option_class: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            list_class: "ml-4".to_string(),
            heading_class: "text-white font-bold".to_string(),
            paragraph_class: "text-gray-200 text-sm mb-2".to_string(),
            bullet_class: "text-gray-200".to_string(),
            item_class: "text-gray-100 mb-1".to_string(),
            checkbox_class: "mr-2".to_string(),
            label_class: "select-none".to_string(),
            option_class: "option-box".to_string(),
        }
    }
}

impl Config {
    /// The defaults embedded at build time.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::compiled_default()
            }),
            Err(_) => Self::compiled_default(),
        }
    }

    /// Where checkbox state lives.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(crate::store::FileStore::default_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_code_default() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [prompt]
            template = "steps"
            profession = "Data Engineer"

            [html]
            list_class = "pl-6"
            "#,
        )
        .unwrap();

        assert_eq!(config.prompt.template, TemplateKind::Steps);
        assert_eq!(config.html.list_class, "pl-6");
        assert_eq!(config.html.label_class, "select-none");
        assert!(config.store.path.is_none());
        assert_eq!(
            config.prompt.template(),
            Template::Steps {
                profession: "Data Engineer".into()
            }
        );
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadmap.toml");
        fs::write(&path, "[prompt]\ntemplate = 7").unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn explicit_store_path_wins() {
        let config: Config = toml::from_str("[store]\npath = \"/tmp/state.json\"").unwrap();
        assert_eq!(config.store_path(), PathBuf::from("/tmp/state.json"));
    }
}
