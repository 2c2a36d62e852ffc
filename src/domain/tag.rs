use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TagActionError};

/// Object type recorded on a tag that points straight at a commit
pub const COMMIT_OBJECT: &str = "commit";

/// What the caller asked for: which tag, where, and how to treat an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    pub tag_name: String,
    pub message: Option<String>,
    pub target_sha: String,
    pub replacement_name: Option<String>,
    pub delete_existing: bool,
}

impl TagRequest {
    /// Create a lightweight, non-replacing request for `tag_name` at `target_sha`
    pub fn new(tag_name: impl Into<String>, target_sha: impl Into<String>) -> Self {
        TagRequest {
            tag_name: tag_name.into(),
            message: None,
            target_sha: target_sha.into(),
            replacement_name: None,
            delete_existing: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_replacement(mut self, name: impl Into<String>) -> Self {
        self.replacement_name = Some(name.into());
        self
    }

    pub fn delete_existing(mut self, delete: bool) -> Self {
        self.delete_existing = delete;
        self
    }

    /// The name the new reference is created under
    pub fn tag_to_create(&self) -> &str {
        match self.replacement_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }

    /// Annotation message, if one was given
    pub fn annotation(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    /// Check every name this request will write.
    pub fn validate(&self) -> Result<()> {
        validate_tag_name(&self.tag_name)?;
        if let Some(name) = self.replacement_name.as_deref().filter(|n| !n.is_empty()) {
            validate_tag_name(name)?;
        }
        if self.target_sha.trim().is_empty() {
            return Err(TagActionError::config("Target sha must not be empty"));
        }
        Ok(())
    }
}

/// Result of looking up `tags/{name}` on the remote
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExistingTagLookup {
    pub found: bool,
    pub sha: String,
    pub object_type: String,
}

impl ExistingTagLookup {
    pub fn found(sha: impl Into<String>, object_type: impl Into<String>) -> Self {
        ExistingTagLookup {
            found: true,
            sha: sha.into(),
            object_type: object_type.into(),
        }
    }

    pub fn absent() -> Self {
        ExistingTagLookup::default()
    }
}

/// What the run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub created_tag_name: String,
    pub sha: String,
}

/// Identity recorded on annotated tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagger {
    pub name: String,
    pub email: String,
}

impl Tagger {
    /// Derive a tagger from the actor that triggered the run
    pub fn from_actor(actor: &str) -> Self {
        Tagger {
            name: actor.to_string(),
            email: format!("{}@noreply.github.com", actor),
        }
    }
}

// Characters and sequences git refuses anywhere in a ref name, plus the
// component rules: no empty component, none starting with `.`, none ending in `.lock`.
static FORBIDDEN_REF_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x1f\x7f~^:?*\[\\]|\.\.|@\{|^@$|^[-/.]|[/.]$|//|/\.|\.lock(/|$)")
        .expect("ref name pattern is valid")
});

/// Reject tag names that cannot be used as a ref.
///
/// Whitespace is never allowed; neither are the characters and sequences git
/// refuses in ref names.
pub fn validate_tag_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TagActionError::config("Tag name must not be empty"));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(TagActionError::config(format!(
            "Tag name '{}' must not contain whitespace",
            name
        )));
    }

    if FORBIDDEN_REF_SYNTAX.is_match(name) {
        return Err(TagActionError::config(format!(
            "Tag name '{}' is not a valid ref name",
            name
        )));
    }

    Ok(())
}
