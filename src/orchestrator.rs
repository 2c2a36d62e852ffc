//! Tagging workflow
//!
//! Runs the fixed sequence `validate → lookup → (delete) → create → report`
//! against a [TagApi]. Every step except the lookup aborts the run on error;
//! a lookup that answers "not found" is treated as "no existing tag".

use crate::domain::tag::COMMIT_OBJECT;
use crate::domain::{
    parse_repository, ExistingTagLookup, RepositoryRef, TagOutcome, TagRequest, Tagger,
};
use crate::error::Result;
use crate::github::{NewTagObject, TagApi, TaggerPayload};
use crate::ui;

/// Where a new tag reference should point and how to get there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTarget<'a> {
    /// Name of the reference under `refs/tags/`
    pub name: &'a str,
    /// Annotation message; `None` produces a lightweight tag
    pub message: Option<&'a str>,
    pub sha: &'a str,
    /// Type of the object at `sha`, recorded on annotated tags
    pub object_type: &'a str,
    /// Whether `refs/tags/{name}` already exists and must be updated in place
    pub ref_exists: bool,
}

/// Look up `tags/{tag}`.
///
/// A 404 is an expected answer and yields [ExistingTagLookup::absent]; any
/// other failure is returned.
pub fn lookup_tag<A: TagApi>(
    api: &A,
    repo: &RepositoryRef,
    tag: &str,
) -> Result<ExistingTagLookup> {
    match api.get_tag_ref(repo, tag) {
        Ok(git_ref) => {
            ui::display_debug(&format!(
                "Found tag {} at {} ({})",
                tag, git_ref.object.sha, git_ref.object.object_type
            ));
            Ok(ExistingTagLookup::found(
                git_ref.object.sha,
                git_ref.object.object_type,
            ))
        }
        Err(e) if e.is_not_found() => {
            ui::display_info(&format!("Didn't find tag {}", tag));
            Ok(ExistingTagLookup::absent())
        }
        Err(e) => Err(e),
    }
}

/// Remove the remote `refs/tags/{tag}`.
pub fn delete_tag<A: TagApi>(api: &A, repo: &RepositoryRef, tag: &str, sha: &str) -> Result<()> {
    ui::display_info(&format!("Deleting {} with sha {}", tag, sha));
    let status = api.delete_tag_ref(repo, tag)?;
    ui::display_debug(&format!("Delete status {}", status));
    Ok(())
}

/// Create the tag object (when annotated) and point the reference at it.
///
/// Returns the sha the reference now points at: the new tag object for an
/// annotated tag, `target.sha` otherwise.
pub fn create_tag<A: TagApi>(
    api: &A,
    repo: &RepositoryRef,
    target: &TagTarget<'_>,
    tagger: &Tagger,
) -> Result<String> {
    let ref_sha = match target.message {
        Some(message) => {
            let tag_object = api.create_tag_object(
                repo,
                &NewTagObject {
                    tag: target.name.to_string(),
                    message: message.to_string(),
                    object: target.sha.to_string(),
                    object_type: target.object_type.to_string(),
                    tagger: TaggerPayload::from(tagger),
                },
            )?;
            ui::display_debug(&format!("Created tag object {}", tag_object.sha));
            tag_object.sha
        }
        None => target.sha.to_string(),
    };

    let git_ref = if target.ref_exists {
        api.update_tag_ref(repo, target.name, &ref_sha)?
    } else {
        api.create_tag_ref(repo, target.name, &ref_sha)?
    };
    ui::display_debug(&format!("{} -> {}", git_ref.ref_name, git_ref.object.sha));

    Ok(ref_sha)
}

/// Make `request.tag_to_create()` point at the resolved commit on `repository`.
///
/// The existing tag's sha wins over `request.target_sha` unless the existing
/// tag was deleted first.
pub fn run_tag_workflow<A: TagApi>(
    api: &A,
    repository: &str,
    request: &TagRequest,
    tagger: &Tagger,
) -> Result<TagOutcome> {
    let repo = {
        let _group = ui::Group::start("Prepare");
        ui::display_debug(&format!("Repository {}", repository));
        let repo = parse_repository(repository)?;
        request.validate()?;
        repo
    };

    let existing = {
        let _group = ui::Group::start("Fetch tag if exists");
        lookup_tag(api, &repo, &request.tag_name)?
    };

    let deleted = request.delete_existing && existing.found;
    if deleted {
        let _group = ui::Group::start("Delete tag");
        delete_tag(api, &repo, &request.tag_name, &existing.sha)?;
    }

    let _group = ui::Group::start("Create tag");
    let keep_existing = existing.found && !deleted;
    let (sha, object_type) = if keep_existing {
        (existing.sha.as_str(), existing.object_type.as_str())
    } else {
        (request.target_sha.as_str(), COMMIT_OBJECT)
    };
    let name = request.tag_to_create();

    let target = TagTarget {
        name,
        message: request.annotation(),
        sha,
        object_type,
        ref_exists: keep_existing && name == request.tag_name,
    };
    create_tag(api, &repo, &target, tagger)?;

    ui::display_notice(&format!("Created {} at {}", name, sha));

    Ok(TagOutcome {
        created_tag_name: name.to_string(),
        sha: sha.to_string(),
    })
}
