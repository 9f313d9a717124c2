//! Task document serialization.
//!
//! The document layout mirrors what the annotation backend persists, so a
//! task exported here can be re-imported byte-compatible by any other
//! consumer of the same backend.

mod error;
mod project;

pub use error::FormatError;
pub use project::TaskDocument;

use std::path::Path;

/// Write a task document to a file as pretty-printed JSON.
pub fn export_task(doc: &TaskDocument, path: &Path) -> Result<(), FormatError> {
    log::info!("Exporting task {:?} to {:?}", doc.task_name, path);

    let json = doc.to_json_pretty()?;
    std::fs::write(path, json)?;

    log::info!(
        "Exported {} annotations across {} images",
        doc.total_annotations(),
        doc.annotations.len()
    );
    Ok(())
}

/// Read a task document from a JSON file.
pub fn import_task(path: &Path) -> Result<TaskDocument, FormatError> {
    log::info!("Importing task from {:?}", path);

    let json = std::fs::read_to_string(path)?;
    let doc = TaskDocument::from_json(&json)?;

    log::info!(
        "Imported task {:?} with {} annotations across {} images",
        doc.task_name,
        doc.total_annotations(),
        doc.annotations.len()
    );
    Ok(doc)
}
