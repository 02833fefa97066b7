//! Pose image loading and memoization.
//!
//! [`FsImageLoader`] resolves a pose's `image_ref` against an asset
//! directory.  [`ImageCache`] wraps any [`ImagePort`], preloads every
//! image of a catalog at startup, and serves later lookups from memory.
//! A miss (the image failed to preload, or was never requested) falls
//! back to a direct fetch whose result is then kept.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::app::ports::{ImageError, ImagePort};
use crate::catalog::PoseCatalog;

// ───────────────────────────────────────────────────────────────
// Filesystem loader
// ───────────────────────────────────────────────────────────────

pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join `image_ref` under the root, refusing anything that could
    /// escape it.
    fn resolve(&self, image_ref: &str) -> Result<PathBuf, ImageError> {
        let rel = Path::new(image_ref);
        let plain = !image_ref.is_empty()
            && rel
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(ImageError::InvalidRef);
        }
        Ok(self.root.join(rel))
    }
}

impl ImagePort for FsImageLoader {
    fn fetch(&mut self, image_ref: &str) -> Result<Vec<u8>, ImageError> {
        let path = self.resolve(image_ref)?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ImageError::NotFound,
            _ => {
                warn!("image: read {} failed: {}", path.display(), e);
                ImageError::Io
            }
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Memoizing cache
// ───────────────────────────────────────────────────────────────

/// Outcome of [`ImageCache::preload`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadSummary {
    pub cached: usize,
    pub failed: usize,
}

pub struct ImageCache<P> {
    loader: P,
    entries: HashMap<String, Arc<[u8]>>,
}

impl<P: ImagePort> ImageCache<P> {
    pub fn new(loader: P) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
        }
    }

    /// Fetch every pose image once.  Failures are logged and skipped.
    pub fn preload(&mut self, catalog: &PoseCatalog) -> PreloadSummary {
        let mut summary = PreloadSummary::default();
        for pose in catalog.iter() {
            if self.entries.contains_key(pose.image_ref) {
                summary.cached += 1;
                continue;
            }
            match self.loader.fetch(pose.image_ref) {
                Ok(bytes) => {
                    self.entries.insert(pose.image_ref.to_string(), Arc::from(bytes));
                    info!("\u{2713} Cached: {}", pose.name);
                    summary.cached += 1;
                }
                Err(e) => {
                    warn!("\u{2717} Failed to cache: {} ({})", pose.name, e);
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    /// Bytes for `image_ref`, from memory when possible.
    pub fn get(&mut self, image_ref: &str) -> Result<Arc<[u8]>, ImageError> {
        if let Some(bytes) = self.entries.get(image_ref) {
            return Ok(bytes.clone());
        }
        debug!("image: cache miss for {}", image_ref);
        let bytes: Arc<[u8]> = Arc::from(self.loader.fetch(image_ref)?);
        self.entries.insert(image_ref.to_string(), bytes.clone());
        Ok(bytes)
    }

    pub fn contains(&self, image_ref: &str) -> bool {
        self.entries.contains_key(image_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
