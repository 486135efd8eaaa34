// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_options, expand_path, run_extract};

// Re-export extraction functionality from cselinks-core
pub use cselinks_core::extract::{
    ArtifactPaths, ExtractOptions, ExtractOutput, ExtractProgressCallback, ExtractSummary,
    execute_extract,
};
