//! CLI command implementations

pub mod predict;
pub mod schema;
pub mod vocab;

use classifier_lib::{ArtifactStore, Artifacts};
use std::path::Path;

use crate::output::print_warning;

/// Load the artifacts, warning about any that failed
fn load_artifacts(dir: &Path) -> Artifacts {
    let artifacts = ArtifactStore::new(dir).load();
    for error in artifacts.errors() {
        print_warning(&format!("Error loading model files: {}", error));
    }
    artifacts
}
