use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::tag::COMMIT_OBJECT;
use crate::domain::RepositoryRef;
use crate::error::{Result, TagActionError};
use crate::github::{
    qualified_tag_ref, short_tag_ref, GitObject, GitRef, GitTagObject, NewTagObject, TagApi,
};

/// A call the mock received, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetRef { ref_name: String },
    DeleteRef { ref_name: String },
    CreateTagObject {
        tag: String,
        message: String,
        object: String,
        object_type: String,
    },
    CreateRef { ref_name: String, sha: String },
    UpdateRef { ref_name: String, sha: String },
}

#[derive(Default)]
struct MockState {
    tags: HashMap<String, GitObject>,
    calls: Vec<ApiCall>,
}

/// In-memory hosting API for testing without network access
#[derive(Default)]
pub struct MockTagApi {
    state: Mutex<MockState>,
    lookup_failure: Option<u16>,
    failing_delete: Option<u16>,
    failing_create: Option<u16>,
}

impl MockTagApi {
    /// Create a new mock with no tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tag ref pointing at a commit
    pub fn with_tag(self, name: impl Into<String>, sha: impl Into<String>) -> Self {
        self.with_tag_object(name, sha, COMMIT_OBJECT)
    }

    /// Seed a tag ref pointing at an object of the given type
    pub fn with_tag_object(
        self,
        name: impl Into<String>,
        sha: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        self.lock().tags.insert(
            name.into(),
            GitObject {
                sha: sha.into(),
                object_type: object_type.into(),
            },
        );
        self
    }

    /// Make every lookup fail with a non-404 status
    pub fn failing_lookup(mut self, status: u16) -> Self {
        self.lookup_failure = Some(status);
        self
    }

    /// Make ref deletion fail with `status`
    pub fn failing_delete(mut self, status: u16) -> Self {
        self.failing_delete = Some(status);
        self
    }

    /// Make tag object and ref creation fail with `status`
    pub fn failing_create(mut self, status: u16) -> Self {
        self.failing_create = Some(status);
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Object sha a tag ref currently points at
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.lock().tags.get(name).map(|o| o.sha.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn record(&self, call: ApiCall) {
        self.lock().calls.push(call);
    }
}

fn git_ref(tag: &str, object: GitObject) -> GitRef {
    GitRef {
        ref_name: qualified_tag_ref(tag),
        object,
    }
}

impl TagApi for MockTagApi {
    fn get_tag_ref(&self, _repo: &RepositoryRef, tag: &str) -> Result<GitRef> {
        self.record(ApiCall::GetRef {
            ref_name: short_tag_ref(tag),
        });

        if let Some(status) = self.lookup_failure {
            return Err(TagActionError::api(status, "Server Error"));
        }

        let object = self.lock().tags.get(tag).cloned();
        object
            .map(|o| git_ref(tag, o))
            .ok_or_else(|| TagActionError::not_found(short_tag_ref(tag)))
    }

    fn delete_tag_ref(&self, _repo: &RepositoryRef, tag: &str) -> Result<u16> {
        self.record(ApiCall::DeleteRef {
            ref_name: short_tag_ref(tag),
        });

        if let Some(status) = self.failing_delete {
            return Err(TagActionError::api(status, "Reference cannot be deleted"));
        }

        match self.lock().tags.remove(tag) {
            Some(_) => Ok(204),
            None => Err(TagActionError::api(422, "Reference does not exist")),
        }
    }

    fn create_tag_object(
        &self,
        _repo: &RepositoryRef,
        tag: &NewTagObject,
    ) -> Result<GitTagObject> {
        self.record(ApiCall::CreateTagObject {
            tag: tag.tag.clone(),
            message: tag.message.clone(),
            object: tag.object.clone(),
            object_type: tag.object_type.clone(),
        });

        if let Some(status) = self.failing_create {
            return Err(TagActionError::api(status, "Validation Failed"));
        }

        Ok(GitTagObject {
            sha: format!("tagobj-{}", tag.object),
            tag: tag.tag.clone(),
        })
    }

    fn create_tag_ref(&self, _repo: &RepositoryRef, tag: &str, sha: &str) -> Result<GitRef> {
        self.record(ApiCall::CreateRef {
            ref_name: qualified_tag_ref(tag),
            sha: sha.to_string(),
        });

        if let Some(status) = self.failing_create {
            return Err(TagActionError::api(status, "Validation Failed"));
        }

        let mut state = self.lock();
        if state.tags.contains_key(tag) {
            return Err(TagActionError::api(422, "Reference already exists"));
        }
        let object = GitObject {
            sha: sha.to_string(),
            object_type: COMMIT_OBJECT.to_string(),
        };
        state.tags.insert(tag.to_string(), object.clone());
        Ok(git_ref(tag, object))
    }

    fn update_tag_ref(&self, _repo: &RepositoryRef, tag: &str, sha: &str) -> Result<GitRef> {
        self.record(ApiCall::UpdateRef {
            ref_name: qualified_tag_ref(tag),
            sha: sha.to_string(),
        });

        if let Some(status) = self.failing_create {
            return Err(TagActionError::api(status, "Validation Failed"));
        }

        let mut state = self.lock();
        match state.tags.get_mut(tag) {
            Some(object) => {
                object.sha = sha.to_string();
                Ok(git_ref(tag, object.clone()))
            }
            None => Err(TagActionError::api(422, "Reference does not exist")),
        }
    }
}
