//! YAML config file discovery and loading.

use super::types::ReviewConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File names recognised in every search directory.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".test-review.yaml",
    ".test-review.yml",
    "test-review.yaml",
    "test-review.yml",
];

/// Directories searched for a config file, in priority order: the current
/// directory, the user config directory (`~/.config/test-review/`), then home.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|dir| dir.join("test-review")),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Locate the config file to use.
///
/// An explicit path wins when it exists; a missing explicit path falls back
/// to the regular search.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|path| path.exists()) {
        return Some(path.to_path_buf());
    }
    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// Loading
// ============================================================================

/// Why a config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Parse a YAML config file. Keys left out keep their defaults.
pub fn load_config_file(path: &Path) -> Result<ReviewConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load the discovered config file, falling back to defaults.
///
/// Returns the path the config came from, `None` when defaults are used.
/// An unreadable or invalid file is logged and ignored.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (ReviewConfig, Option<PathBuf>) {
    let Some(path) = discover_config_file(explicit_path) else {
        return (ReviewConfig::default(), None);
    };
    match load_config_file(&path) {
        Ok(config) => (config, Some(path)),
        Err(err) => {
            tracing::warn!(path = %path.display(), "Ignoring config file: {err}");
            (ReviewConfig::default(), None)
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = ReviewConfig::default();
    format!(
        r"# Test Review Configuration
# Place this file at .test-review.yaml in your project root or ~/.config/test-review/
# Host runner options (showScore, showCorrect, displaySectionTitles,
# displayItemTooltip, reviewLayout) override the matching settings below.
# Set header_label or footer_label to `false` to hide them.

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReviewLayout;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".test-review.yaml");
        std::fs::write(&config_path, "panel:\n  layout: fizzy\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
panel:
  layout: fizzy
  header_label: false
  filters:
    - id: all
      label: Everything
    - id: partial
      label: Partly right
item_answer:
  score_text: "Points:"
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.panel.layout, ReviewLayout::Fizzy);
        assert_eq!(config.panel.header_label, None);
        assert_eq!(config.panel.footer_label.as_deref(), Some("TOTAL"));
        assert_eq!(config.panel.filters[1].id, "partial");
        assert_eq!(config.item_answer.score_text, "Points:");
        assert!(config.item_answer.show_correct);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "panel: [not, a, mapping]\n").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, ReviewConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("panel:"));
        assert!(example.contains("score_text"));

        let body: String = example
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: ReviewConfig = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed, ReviewConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "panel:\n  show_score: false").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
