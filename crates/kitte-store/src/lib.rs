//! kitte-store: Local album record store.
//!
//! Persists finished stamp artifacts (masked PNGs) and their metadata
//! as a single-table record store on the local filesystem: one JSON
//! document per record under `records/`, one PNG per image under
//! `images/`. Supports insert, point-lookup by id, full listing
//! (newest first), memo/category updates, and delete with image-file
//! reclamation.
//!
//! The store is metadata-only from the mask's point of view: it
//! receives an already-masked bitmap and never recomputes geometry.

pub mod record;
pub mod store;

pub use record::{NewStamp, StampRecord};
pub use store::{StampStore, StoreError};
