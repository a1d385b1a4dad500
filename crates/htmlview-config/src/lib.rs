use anyhow::Context;
use htmlview_engine::{RenderOptions, StyleSheet, TlMarkupParser};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read style sheet at {stylesheet_path}: {source}")]
    StyleSheetReadError {
        stylesheet_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse style sheet at {stylesheet_path}: {source}")]
    StyleSheetParseError {
        stylesheet_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log every visited node while transforming.
    pub debug_tree: bool,
    /// Prepend a diagnostic line to every block container.
    pub debug_inline_counts: bool,
    /// Keep whitespace-only text between tags.
    pub keep_whitespace: bool,
    /// Extra style sheet file applied after the built-in classes and before
    /// `[styles]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet_path: Option<PathBuf>,
    /// Per-class overrides of the built-in style sheet.
    pub styles: StyleSheet,
}

/// Location of the config file, before tilde expansion.
const CONFIG_FILE: &str = "~/.config/htmlview/config.toml";

impl Config {
    /// Reads the config at `config_path`. A file that does not exist is not
    /// an error and yields `None`.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.stylesheet_path = config.stylesheet_path.map(expand_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    /// Writes the config as TOML, creating missing parent directories.
    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_FILE).as_ref())
    }

    /// The built-in sheet with the style sheet file and then `[styles]`
    /// applied on top, each replacing whole classes.
    pub fn style_sheet(&self) -> Result<StyleSheet, ConfigError> {
        let mut sheet = StyleSheet::base();
        if let Some(stylesheet_path) = &self.stylesheet_path {
            let content = std::fs::read_to_string(stylesheet_path).map_err(|source| {
                ConfigError::StyleSheetReadError {
                    stylesheet_path: stylesheet_path.clone(),
                    source,
                }
            })?;
            let file_sheet = StyleSheet::from_toml_str(&content).map_err(|source| {
                ConfigError::StyleSheetParseError {
                    stylesheet_path: stylesheet_path.clone(),
                    source,
                }
            })?;
            sheet = sheet.merged_with(&file_sheet);
        }
        Ok(sheet.merged_with(&self.styles))
    }

    pub fn render_options(
        &self,
        link_handler: impl Fn(&str) + 'static,
    ) -> Result<RenderOptions, ConfigError> {
        Ok(RenderOptions::new(link_handler)
            .with_style_sheet(self.style_sheet()?)
            .with_debug_tree(self.debug_tree)
            .with_debug_inline_counts(self.debug_inline_counts))
    }

    pub fn markup_parser(&self) -> TlMarkupParser {
        TlMarkupParser::new().with_keep_whitespace(self.keep_whitespace)
    }
}

/// `~` and `$VAR` expanded; left as written if a variable is unset.
fn expand_path(path: PathBuf) -> PathBuf {
    let expanded =
        shellexpand::full(&path.to_string_lossy()).map(|expanded| PathBuf::from(expanded.as_ref()));
    expanded.unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use htmlview_engine::StyleValue;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/htmlview/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_unreadable_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = Config::load_from_path(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigReadError { .. }));
    }

    #[test]
    fn test_stylesheet_path_with_tilde() {
        let expanded = expand_path(PathBuf::from("~/styles/dark.toml"));
        let expanded = expanded.to_string_lossy();

        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("styles/dark.toml"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "debug_tree = \"yes\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config {
            debug_inline_counts: true,
            ..Config::default()
        };
        test_config.styles.insert(
            "a",
            [("color".to_string(), StyleValue::from("#FF00FF"))]
                .into_iter()
                .collect(),
        );

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_styles_replace_whole_classes() {
        let config: Config = toml::from_str(
            r##"
[styles.a]
color = "#000000"

[styles.note]
fontSize = 12
"##,
        )
        .unwrap();

        let sheet = config.style_sheet().unwrap();
        let link = sheet.get("a").unwrap();
        assert_eq!(link.get("color"), Some(&StyleValue::from("#000000")));
        assert!(link.get("fontSize").is_none());
        assert!(sheet.contains("note"));
        assert!(sheet.contains("liWrapper"));
    }

    #[test]
    fn test_stylesheet_file_applies_before_inline_styles() {
        let temp_dir = TempDir::new().unwrap();
        let sheet_file = temp_dir.path().join("styles.toml");
        std::fs::write(
            &sheet_file,
            "[p]\nfontSize = 20\n\n[em]\nfontStyle = \"normal\"\n",
        )
        .unwrap();

        let mut config = Config {
            stylesheet_path: Some(sheet_file),
            ..Config::default()
        };
        config.styles.insert(
            "em",
            [("fontWeight".to_string(), StyleValue::from("bold"))]
                .into_iter()
                .collect(),
        );

        let sheet = config.style_sheet().unwrap();
        assert_eq!(
            sheet.get("p").and_then(|p| p.get("fontSize")),
            Some(&StyleValue::from(20.0))
        );
        assert!(sheet.get("em").unwrap().get("fontStyle").is_none());
    }

    #[test]
    fn test_missing_stylesheet_file_is_an_error() {
        let config = Config {
            stylesheet_path: Some(PathBuf::from("/nonexistent/htmlview/styles.toml")),
            ..Config::default()
        };
        assert!(matches!(
            config.style_sheet(),
            Err(ConfigError::StyleSheetReadError { .. })
        ));
    }

    #[test]
    fn test_stylesheet_path_with_env_var() {
        unsafe {
            env::set_var("HTMLVIEW_TEST_STYLES", "/custom/styles");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "stylesheet_path = \"$HTMLVIEW_TEST_STYLES/dark.toml\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.stylesheet_path,
            Some(PathBuf::from("/custom/styles/dark.toml"))
        );

        unsafe {
            env::remove_var("HTMLVIEW_TEST_STYLES");
        }
    }

    #[test]
    fn test_render_options_follow_config() {
        let config = Config {
            debug_tree: true,
            keep_whitespace: true,
            ..Config::default()
        };
        let options = config.render_options(|_| {}).unwrap();

        assert!(options.debug_tree);
        assert!(!options.debug_inline_counts);
        assert!(options.style_sheet.contains("root"));

        let nodes = config.markup_parser().parse_now("<ul> <li>x</li></ul>").unwrap();
        assert_eq!(nodes[0].children.len(), 2);
    }
}
