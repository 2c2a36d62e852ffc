use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{TagRequest, Tagger};
use crate::error::{Result, TagActionError};

/// Default REST endpoint used when neither the runner nor the settings file names one
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Optional settings file for git-tag-action.
///
/// Everything here has a default; the file only exists to point the action at
/// an enterprise server or to pin the tagger identity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub tagger: TaggerSettings,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("git-tag-action/{}", env!("CARGO_PKG_VERSION"))
}

/// Settings for the HTTP client.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiSettings {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout; the client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

/// Overrides for the identity recorded on annotated tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TaggerSettings {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl Settings {
    /// Tagger for `actor`, with any configured overrides applied.
    pub fn tagger_for(&self, actor: &str) -> Tagger {
        let derived = Tagger::from_actor(actor);
        Tagger {
            name: self.tagger.name.clone().unwrap_or(derived.name),
            email: self.tagger.email.clone().unwrap_or(derived.email),
        }
    }
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `gittag.toml` in current directory
/// 3. `.gittag.toml` in the user config directory
/// 4. Default settings if no file found
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_settings(settings_path: Option<&str>) -> Result<Settings> {
    let path = if let Some(path) = settings_path {
        Path::new(path).to_path_buf()
    } else if Path::new("./gittag.toml").exists() {
        Path::new("./gittag.toml").to_path_buf()
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join(".gittag.toml");
        if !path.exists() {
            return Ok(Settings::default());
        }
        path
    } else {
        return Ok(Settings::default());
    };

    let contents = fs::read_to_string(&path).map_err(|e| {
        TagActionError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    toml::from_str(&contents)
        .map_err(|e| TagActionError::config(format!("Invalid {}: {}", path.display(), e)))
}

/// Parse a boolean input the way the runner spells booleans.
///
/// Only the YAML 1.2 core schema spellings are accepted.
pub fn parse_boolean_input(value: &str) -> Result<bool> {
    match value {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(TagActionError::config(format!(
            "Input '{}' does not meet YAML 1.2 \"Core Schema\" specification. \
             Support boolean input list: `true | True | TRUE | false | False | FALSE`",
            other
        ))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Every input of one run, read once at the process boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionInputs {
    pub tag: String,
    pub token: String,
    pub repository: Option<String>,
    /// Repository the workflow runs in, used when `repository` is not given
    pub context_repository: Option<String>,
    pub message: Option<String>,
    pub sha: String,
    pub delete: bool,
    pub replace_tag: Option<String>,
    pub actor: String,
    pub api_url: Option<String>,
}

impl ActionInputs {
    /// `owner/repo` string to operate on.
    pub fn qualified_repository(&self) -> Result<String> {
        non_empty(self.repository.clone())
            .or_else(|| non_empty(self.context_repository.clone()))
            .ok_or_else(|| {
                TagActionError::config(
                    "No repository given and GITHUB_REPOSITORY is not set",
                )
            })
    }

    /// Build the request the orchestrator works from.
    pub fn to_request(&self) -> TagRequest {
        TagRequest {
            tag_name: self.tag.clone(),
            message: non_empty(self.message.clone()),
            target_sha: self.sha.clone(),
            replacement_name: non_empty(self.replace_tag.clone()),
            delete_existing: self.delete,
        }
    }

    /// Fold the runner-provided API URL into the file settings; the runner wins.
    pub fn apply_to(&self, mut settings: Settings) -> Settings {
        if let Some(url) = non_empty(self.api_url.clone()) {
            settings.api.base_url = url;
        }
        settings
    }

    pub fn check_token(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(TagActionError::config("Input required and not supplied: token"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ActionInputs {
        ActionInputs {
            tag: "v1.0.0".to_string(),
            token: "secret".to_string(),
            repository: None,
            context_repository: Some("octocat/hello-world".to_string()),
            message: Some(String::new()),
            sha: "abc123".to_string(),
            delete: false,
            replace_tag: Some(String::new()),
            actor: "octocat".to_string(),
            api_url: None,
        }
    }

    #[test]
    fn test_parse_boolean_input() {
        for value in ["true", "True", "TRUE"] {
            assert!(parse_boolean_input(value).unwrap());
        }
        for value in ["false", "False", "FALSE"] {
            assert!(!parse_boolean_input(value).unwrap());
        }
        for value in ["yes", "1", "", "tRUE"] {
            assert!(parse_boolean_input(value).unwrap_err().is_config());
        }
    }

    #[test]
    fn test_repository_falls_back_to_context() {
        let mut inputs = inputs();
        assert_eq!(inputs.qualified_repository().unwrap(), "octocat/hello-world");

        inputs.repository = Some("other/repo".to_string());
        assert_eq!(inputs.qualified_repository().unwrap(), "other/repo");

        inputs.repository = Some(String::new());
        inputs.context_repository = None;
        assert!(inputs.qualified_repository().is_err());
    }

    #[test]
    fn test_empty_optional_inputs_become_none() {
        let request = inputs().to_request();
        assert_eq!(request.message, None);
        assert_eq!(request.replacement_name, None);
        assert_eq!(request.tag_to_create(), "v1.0.0");
    }

    #[test]
    fn test_api_url_from_runner_overrides_settings() {
        let mut inputs = inputs();
        inputs.api_url = Some("https://ghe.example.com/api/v3".to_string());
        let settings = inputs.apply_to(Settings::default());
        assert_eq!(settings.api.base_url, "https://ghe.example.com/api/v3");

        inputs.api_url = None;
        let settings = inputs.apply_to(Settings::default());
        assert_eq!(settings.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_tagger_overrides() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.tagger_for("octocat").email,
            "octocat@noreply.github.com"
        );

        settings.tagger.name = Some("Release Bot".to_string());
        let tagger = settings.tagger_for("octocat");
        assert_eq!(tagger.name, "Release Bot");
        assert_eq!(tagger.email, "octocat@noreply.github.com");
    }

    #[test]
    fn test_check_token() {
        let mut inputs = inputs();
        assert!(inputs.check_token().is_ok());
        inputs.token = " ".to_string();
        assert!(inputs.check_token().is_err());
    }
}
