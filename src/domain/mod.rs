//! Domain logic - pure rules independent of the hosting API

pub mod repository;
pub mod tag;

pub use repository::{parse_repository, RepositoryRef};
pub use tag::{validate_tag_name, ExistingTagLookup, TagOutcome, TagRequest, Tagger};
