//! Domain logic - pure business rules independent of the hosting platform

pub mod commit;
pub mod labels;
pub mod manifest;
pub mod tag;
pub mod template;
pub mod version;

pub use commit::CommitMessageTemplate;
pub use labels::{LabelCategoryMapping, LabelSet};
pub use manifest::ManifestSnapshot;
pub use tag::TagTemplate;
pub use version::{BumpCategory, Version};
