//! kitte: postage-stamp photo diary CLI.
//!
//! Stands in for the mobile UI around the mask core: decodes an
//! upright photo from disk, punches the perforated stamp frame into
//! it on a worker thread, and files the result in the local album
//! store. Also exposes the vector consumer as an SVG exporter.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use uuid::Uuid;

use kitte_mask::{Dimensions, FrameType, MAX_CAPTURE_DIMENSION, MaskConfig};
use kitte_store::{NewStamp, StampStore};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Album store directory.
    #[arg(long, global = true, default_value = "album")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mask a photo with the stamp frame and file it in the album.
    Capture {
        /// Photo to capture (PNG, JPEG, BMP, WebP). Must already be
        /// upright and cropped; no EXIF correction happens here.
        input: PathBuf,

        /// Where the photo was taken.
        #[arg(long, default_value = "Unknown")]
        location: String,

        /// Album category.
        #[arg(long, default_value = "Daily")]
        category: String,

        /// Free-form note.
        #[arg(long)]
        memo: Option<String>,

        /// Frame silhouette.
        #[arg(long, value_enum, default_value = "perforated")]
        frame: FrameArg,

        /// Long-side cap in pixels; larger captures are resized before
        /// masking.
        #[arg(long, default_value_t = MAX_CAPTURE_DIMENSION)]
        max_dimension: u32,
    },

    /// List album records, newest first.
    List,

    /// Show one record as JSON.
    Show {
        /// Record id.
        id: Uuid,
    },

    /// Update a record's memo and/or category.
    Update {
        /// Record id.
        id: Uuid,

        /// New memo text.
        #[arg(long)]
        memo: Option<String>,

        /// New category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a record and reclaim its image file.
    Delete {
        /// Record id.
        id: Uuid,
    },

    /// Write the stamp outline for a frame size as an SVG document.
    Outline {
        /// Frame size as WIDTHxHEIGHT in pixels, e.g. 300x400.
        size: String,

        /// Output SVG path.
        #[arg(short, long)]
        output: PathBuf,

        /// Frame silhouette.
        #[arg(long, value_enum, default_value = "perforated")]
        frame: FrameArg,
    },
}

/// CLI-facing frame selector.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum FrameArg {
    #[default]
    Perforated,
    Plain,
}

impl From<FrameArg> for FrameType {
    fn from(arg: FrameArg) -> Self {
        match arg {
            FrameArg::Perforated => Self::Perforated,
            FrameArg::Plain => Self::Plain,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Capture {
            input,
            location,
            category,
            memo,
            frame,
            max_dimension,
        } => capture(
            &cli.store,
            &input,
            NewStamp {
                frame: frame.into(),
                location,
                category,
                memo,
            },
            max_dimension,
        ),
        Command::List => list(&cli.store),
        Command::Show { id } => show(&cli.store, id),
        Command::Update { id, memo, category } => update(&cli.store, id, memo, category),
        Command::Delete { id } => delete(&cli.store, id),
        Command::Outline {
            size,
            output,
            frame,
        } => outline(&size, &output, frame.into()),
    }
}

fn capture(
    store_dir: &Path,
    input: &Path,
    new: NewStamp,
    max_dimension: u32,
) -> Result<()> {
    let photo = image::open(input)
        .with_context(|| format!("failed to read photo {}", input.display()))?
        .to_rgba8();
    debug!(
        "decoded {} at {}x{}",
        input.display(),
        photo.width(),
        photo.height(),
    );

    let config = MaskConfig {
        frame: new.frame,
        ..MaskConfig::default()
    };

    // The punch is CPU-bound full-resolution pixel work; run it on a
    // worker thread. It completes (or fails) before anything is
    // persisted, so a failed mask is a failed capture.
    let worker = std::thread::spawn(move || kitte_mask::punch_fit(&photo, max_dimension, &config));
    let masked = worker
        .join()
        .map_err(|_| anyhow!("could not process photo: mask worker panicked"))?
        .context("could not process photo")?;

    let store = StampStore::open(store_dir)?;
    let record = store.insert(&masked, new)?;
    info!("captured {} into {}", input.display(), store_dir.display());
    println!(
        "captured {} -> {} ({}x{})",
        record.id,
        store.image_path(&record).display(),
        masked.width(),
        masked.height(),
    );
    Ok(())
}

fn list(store_dir: &Path) -> Result<()> {
    let store = StampStore::open(store_dir)?;
    let records = store.list()?;
    if records.is_empty() {
        println!("album is empty");
        return Ok(());
    }
    for record in records {
        println!(
            "{}  {}  {:<12}  {:<10}  {}",
            record.id,
            record.created_at.format("%Y.%m.%d %H:%M"),
            record.location,
            record.category,
            record.memo.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn show(store_dir: &Path, id: Uuid) -> Result<()> {
    let store = StampStore::open(store_dir)?;
    let record = store
        .get(id)?
        .ok_or_else(|| anyhow!("no stamp record with id {id}"))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn update(
    store_dir: &Path,
    id: Uuid,
    memo: Option<String>,
    category: Option<String>,
) -> Result<()> {
    if memo.is_none() && category.is_none() {
        return Err(anyhow!("nothing to update: pass --memo and/or --category"));
    }
    let store = StampStore::open(store_dir)?;
    let record = store.update(id, memo, category)?;
    println!("updated {}", record.id);
    Ok(())
}

fn delete(store_dir: &Path, id: Uuid) -> Result<()> {
    let store = StampStore::open(store_dir)?;
    store.delete(id)?;
    println!("deleted {id}");
    Ok(())
}

fn outline(size: &str, output: &Path, frame: FrameType) -> Result<()> {
    let dimensions = parse_size(size)?;
    let config = MaskConfig {
        frame,
        ..MaskConfig::default()
    };
    let path = kitte_mask::stamp_outline(dimensions, &config)?;
    let svg = kitte_export::to_svg(
        &path,
        dimensions,
        &kitte_export::SvgMetadata {
            title: output.file_stem().and_then(|stem| stem.to_str()),
            description: None,
        },
    )?;
    std::fs::write(output, svg)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {}", output.display());
    Ok(())
}

/// Parse a `WIDTHxHEIGHT` frame size.
fn parse_size(size: &str) -> Result<Dimensions> {
    let (width, height) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("size must be WIDTHxHEIGHT, got '{size}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .with_context(|| format!("invalid width '{width}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .with_context(|| format!("invalid height '{height}'"))?;
    Ok(Dimensions { width, height })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_accepts_both_separators() {
        assert_eq!(
            parse_size("300x400").unwrap(),
            Dimensions {
                width: 300,
                height: 400
            },
        );
        assert_eq!(
            parse_size("1080X1440").unwrap(),
            Dimensions {
                width: 1080,
                height: 1440
            },
        );
    }

    #[test]
    fn parse_size_rejects_garbage() {
        assert!(parse_size("300").is_err());
        assert!(parse_size("x400").is_err());
        assert!(parse_size("300xfour").is_err());
    }
}
