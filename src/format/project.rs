//! The persisted task document.
//!
//! A task document is the JSON shape the backend stores and returns:
//! `{folderId, taskName, labelClasses, annotations}` with `annotations`
//! mapping each image URL key to its annotation array. The layout must
//! round-trip exactly; how it is transported or stored is the backend's
//! concern.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, AnnotationStore, LabelClass};
use crate::format::error::FormatError;

/// A complete annotation task: label classes plus per-image annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    /// Backend folder the task's images live in.
    pub folder_id: String,

    /// Human-readable task name.
    pub task_name: String,

    /// Label class definitions.
    #[serde(default)]
    pub label_classes: Vec<LabelClass>,

    /// Annotations keyed by image URL. Array order within an image is
    /// insertion order and must be preserved.
    #[serde(default)]
    pub annotations: BTreeMap<String, Vec<Annotation>>,
}

impl TaskDocument {
    /// Create an empty task.
    pub fn new(folder_id: impl Into<String>, task_name: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            task_name: task_name.into(),
            label_classes: Vec::new(),
            annotations: BTreeMap::new(),
        }
    }

    /// Total annotation count across all images.
    pub fn total_annotations(&self) -> usize {
        self.annotations.values().map(Vec::len).sum()
    }

    /// Look up a label class color by name.
    pub fn class_color(&self, name: &str) -> Option<&str> {
        self.label_classes
            .iter()
            .find(|class| class.name == name)
            .map(|class| class.color.as_str())
    }

    /// Every color currently in use: label class colors plus per-annotation
    /// color overrides. This is the collision set for the instance color
    /// allocator.
    pub fn used_colors(&self) -> Vec<&str> {
        let class_colors = self.label_classes.iter().map(|class| class.color.as_str());
        let annotation_colors = self
            .annotations
            .values()
            .flatten()
            .filter_map(Annotation::color);
        class_colors.chain(annotation_colors).collect()
    }

    /// Move the annotations into a store for editing.
    pub fn take_store(&mut self) -> AnnotationStore {
        let map = std::mem::take(&mut self.annotations);
        AnnotationStore::from_map(map.into_iter().collect())
    }

    /// Put an edited store's annotations back into the document.
    pub fn set_store(&mut self, store: AnnotationStore) {
        self.annotations = store.into_map().into_iter().collect();
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, dropping structurally valid annotations that
    /// violate shape invariants (with a warning) rather than failing.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let mut doc: TaskDocument = serde_json::from_str(json)?;
        if doc.folder_id.is_empty() {
            return Err(FormatError::missing_field("folderId"));
        }

        for (key, list) in &mut doc.annotations {
            let before = list.len();
            list.retain(Annotation::is_valid);
            if list.len() < before {
                log::warn!(
                    "dropped {} invalid annotation(s) on {:?} during import",
                    before - list.len(),
                    key
                );
            }
        }
        doc.annotations.retain(|_, list| !list.is_empty());
        Ok(doc)
    }
}
