use std::fmt;

use crate::error::{Result, TagActionError};

/// Owner and name of a hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepositoryRef {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Parse an `owner/repo` string.
///
/// The input must split on `/` into exactly two non-empty segments.
pub fn parse_repository(input: &str) -> Result<RepositoryRef> {
    let segments: Vec<&str> = input.split('/').collect();

    match segments.as_slice() {
        [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
            Ok(RepositoryRef::new(*owner, *repo))
        }
        _ => Err(TagActionError::config(format!(
            "Repository should be provided in syntax of '{{owner}}/{{repo}}', got '{}'",
            input
        ))),
    }
}
