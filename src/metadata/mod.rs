//! Index and data stream metadata consumed by lifecycle steps
//!
//! Everything here is a read-only snapshot from the point of view of a step.
//! Only rollover clients mutate a `ProjectMetadata`.

pub mod data_stream;
pub mod index;
pub mod project;

pub use data_stream::DataStream;
pub use index::{
    AliasMetadata, IndexMetadata, RolloverInfo, LIFECYCLE_INDEXING_COMPLETE,
    LIFECYCLE_ROLLOVER_ALIAS,
};
pub use project::{ProjectMetadata, DEFAULT_PROJECT_ID};
