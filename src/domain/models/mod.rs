// Domain models (feed entities)
// Pure Rust, no browser or runtime dependencies

pub mod submission;

pub use submission::{SubmissionEvent, SubmittedItem, Submitter, Thumbnail};
