//! Hosting API abstraction layer
//!
//! The orchestrator talks to the hosting service through the [TagApi] trait so
//! the tagging workflow can run against the real REST API or an in-memory
//! double.
//!
//! - [client::GitHubClient]: blocking `reqwest` implementation against the GitHub REST API
//! - [mock::MockTagApi]: recording implementation for tests
//!
//! ```rust
//! # use git_tag_action::github::TagApi;
//! # use git_tag_action::domain::RepositoryRef;
//! # fn example<A: TagApi>(api: &A) -> git_tag_action::Result<()> {
//! let repo = RepositoryRef::new("octocat", "hello-world");
//! let existing = api.get_tag_ref(&repo, "v1.0.0")?;
//! println!("v1.0.0 -> {}", existing.object.sha);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::{ApiCall, MockTagApi};

use serde::{Deserialize, Serialize};

use crate::domain::{RepositoryRef, Tagger};
use crate::error::Result;

/// Object a reference points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub object_type: String,
}

/// A git reference as returned by the refs endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitObject,
}

/// Identity block of a tag object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerPayload {
    pub name: String,
    pub email: String,
}

impl From<&Tagger> for TaggerPayload {
    fn from(tagger: &Tagger) -> Self {
        TaggerPayload {
            name: tagger.name.clone(),
            email: tagger.email.clone(),
        }
    }
}

/// Body of a create-tag-object request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTagObject {
    pub tag: String,
    pub message: String,
    pub object: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub tagger: TaggerPayload,
}

/// Annotated tag object created on the remote
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitTagObject {
    pub sha: String,
    pub tag: String,
}

/// Fully qualified name of a tag reference (`refs/tags/{tag}`)
pub fn qualified_tag_ref(tag: &str) -> String {
    format!("refs/tags/{}", tag)
}

/// Short name of a tag reference as used in ref paths (`tags/{tag}`)
pub fn short_tag_ref(tag: &str) -> String {
    format!("tags/{}", tag)
}

/// Git data operations needed to manage tags on a hosted repository
///
/// Implementations map a 404 on lookup to [crate::error::TagActionError::NotFound]
/// and every other non-success response to [crate::error::TagActionError::Api].
pub trait TagApi: Send + Sync {
    /// `GET /repos/{owner}/{repo}/git/ref/tags/{tag}`
    fn get_tag_ref(&self, repo: &RepositoryRef, tag: &str) -> Result<GitRef>;

    /// `DELETE /repos/{owner}/{repo}/git/refs/tags/{tag}`
    ///
    /// Returns the HTTP status of the response.
    fn delete_tag_ref(&self, repo: &RepositoryRef, tag: &str) -> Result<u16>;

    /// `POST /repos/{owner}/{repo}/git/tags`
    fn create_tag_object(&self, repo: &RepositoryRef, tag: &NewTagObject)
        -> Result<GitTagObject>;

    /// `POST /repos/{owner}/{repo}/git/refs` with `ref = refs/tags/{tag}`
    fn create_tag_ref(&self, repo: &RepositoryRef, tag: &str, sha: &str) -> Result<GitRef>;

    /// `PATCH /repos/{owner}/{repo}/git/refs/tags/{tag}` with `force = true`
    fn update_tag_ref(&self, repo: &RepositoryRef, tag: &str, sha: &str) -> Result<GitRef>;
}
