//! Diary record types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kitte_mask::FrameType;

/// A persisted diary entry.
///
/// Created when a capture completes; only `memo` and `category` are
/// mutable afterwards. Deleting a record also reclaims the PNG at
/// `image_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampRecord {
    /// Record identity, also the stem of the record and image filenames.
    pub id: Uuid,
    /// Path of the masked PNG artifact, relative to the store root.
    pub image_path: PathBuf,
    /// Frame silhouette the artifact was masked with.
    pub frame: FrameType,
    /// Where the photo was taken.
    pub location: String,
    /// User-chosen category.
    pub category: String,
    /// Optional free-form note.
    pub memo: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Metadata for a record about to be inserted.
///
/// Defaults: location "Unknown", category "Daily", perforated frame,
/// no memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStamp {
    /// Frame silhouette the artifact was masked with.
    pub frame: FrameType,
    /// Where the photo was taken.
    pub location: String,
    /// User-chosen category.
    pub category: String,
    /// Optional free-form note.
    pub memo: Option<String>,
}

impl Default for NewStamp {
    fn default() -> Self {
        Self {
            frame: FrameType::default(),
            location: "Unknown".to_owned(),
            category: "Daily".to_owned(),
            memo: None,
        }
    }
}
