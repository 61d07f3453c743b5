//! Filesystem-backed album store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use image::RgbaImage;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::record::{NewStamp, StampRecord};

/// Errors that can occur while reading or writing the album store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record document failed to parse or serialize.
    #[error("record serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The masked artifact could not be encoded as PNG.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// No record with the given id exists.
    #[error("no stamp record with id {0}")]
    NotFound(Uuid),
}

/// A single-table record store rooted at a directory.
///
/// Layout:
///
/// ```text
/// <root>/images/stamp_<id>.png   masked artifacts
/// <root>/records/<id>.json       one document per record
/// ```
#[derive(Debug, Clone)]
pub struct StampStore {
    root: PathBuf,
}

impl StampStore {
    /// Open (and create, if necessary) a store at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the directories cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("images"))?;
        fs::create_dir_all(root.join("records"))?;
        info!("album store opened at {}", root.display());
        Ok(Self { root })
    }

    /// The store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Insert a finished masked artifact and its metadata.
    ///
    /// Writes the PNG first, then the record document; if the record
    /// write fails the PNG is removed so no orphan artifact remains.
    /// PNG keeps the punched alpha channel intact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Image`] when PNG encoding fails and
    /// [`StoreError::Io`]/[`StoreError::Json`] on write failures.
    pub fn insert(&self, artifact: &RgbaImage, new: NewStamp) -> Result<StampRecord, StoreError> {
        let id = Uuid::new_v4();
        let relative_image = PathBuf::from("images").join(format!("stamp_{id}.png"));
        let image_path = self.root.join(&relative_image);

        artifact.save(&image_path)?;
        debug!(
            "wrote artifact {} ({}x{})",
            image_path.display(),
            artifact.width(),
            artifact.height(),
        );

        let record = StampRecord {
            id,
            image_path: relative_image,
            frame: new.frame,
            location: new.location,
            category: new.category,
            memo: new.memo,
            created_at: Utc::now(),
        };

        if let Err(err) = self.write_record(&record) {
            // Reclaim the artifact rather than leaving an orphan PNG.
            if let Err(cleanup) = fs::remove_file(&image_path) {
                warn!(
                    "failed to remove orphan artifact {}: {cleanup}",
                    image_path.display(),
                );
            }
            return Err(err);
        }

        info!("inserted stamp record {id}");
        Ok(record)
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns `Ok(None)` when the record does not exist; other
    /// failures (unreadable or corrupt document) are errors.
    pub fn get(&self, id: Uuid) -> Result<Option<StampRecord>, StoreError> {
        let path = self.record_path(id);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// List all records, newest first.
    ///
    /// Documents that fail to parse are skipped with a warning rather
    /// than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the records directory cannot be
    /// read.
    pub fn list(&self) -> Result<Vec<StampRecord>, StoreError> {
        let mut records = Vec::new();
        for entry in fs::read_dir(self.root.join("records"))? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|json| {
                    serde_json::from_str::<StampRecord>(&json).map_err(StoreError::from)
                });
            match parsed {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping unreadable record {}: {err}", path.display()),
            }
        }
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Update the mutable fields of a record.
    ///
    /// Only `memo` and `category` can change after capture; `None`
    /// leaves a field as-is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no record with `id` exists.
    pub fn update(
        &self,
        id: Uuid,
        memo: Option<String>,
        category: Option<String>,
    ) -> Result<StampRecord, StoreError> {
        let mut record = self.get(id)?.ok_or(StoreError::NotFound(id))?;
        if let Some(memo) = memo {
            record.memo = Some(memo);
        }
        if let Some(category) = category {
            record.category = category;
        }
        self.write_record(&record)?;
        debug!("updated stamp record {id}");
        Ok(record)
    }

    /// Delete a record and reclaim its artifact.
    ///
    /// A missing artifact file is logged, not fatal: the record is the
    /// source of truth.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no record with `id` exists.
    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let record = self.get(id)?.ok_or(StoreError::NotFound(id))?;

        let image_path = self.root.join(&record.image_path);
        match fs::remove_file(&image_path) {
            Ok(()) => debug!("reclaimed artifact {}", image_path.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("artifact already missing: {}", image_path.display());
            }
            Err(err) => return Err(err.into()),
        }

        fs::remove_file(self.record_path(id))?;
        info!("deleted stamp record {id}");
        Ok(())
    }

    /// Absolute path of a record's artifact PNG.
    #[must_use]
    pub fn image_path(&self, record: &StampRecord) -> PathBuf {
        self.root.join(&record.image_path)
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.root.join("records").join(format!("{id}.json"))
    }

    fn write_record(&self, record: &StampRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(record.id), json)?;
        Ok(())
    }
}
