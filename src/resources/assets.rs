//! Asset loading and caching.
//!
//! The engine never decodes pixels. It only needs to know the size and cell
//! grid of each sprite sheet and the layout of each level; the renderer loads
//! the actual textures from the resolved paths.
//!
//! - [`AssetSource`] is the seam to the outside world: [`FsAssetSource`]
//!   reads files under a root directory, [`InMemoryAssets`] serves canned
//!   data for tests and tooling.
//! - [`AssetStore`] caches loaded [`SpriteSheet`]s and [`Tilemap`]s by key.
//!   Loading a key twice is a cache hit.
//!
//! Load failures are [`AssetError`]s and are fatal to scene startup.

use std::io;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use image::{ImageError, ImageReader};
use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::resources::tilemap::Tilemap;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    Missing(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    #[error("failed to parse level {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid level {path}: {reason}")]
    BadLevel { path: PathBuf, reason: String },
    #[error("invalid cell size {cell_width}x{cell_height} for {path} ({width}x{height})")]
    BadCells {
        path: PathBuf,
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
    },
}

impl AssetError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            AssetError::Missing(path.to_path_buf())
        } else {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    fn from_image(path: &Path, source: ImageError) -> Self {
        match source {
            ImageError::IoError(e) => AssetError::from_io(path, e),
            source => AssetError::Image {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Where asset bytes come from.
pub trait AssetSource: Send + Sync {
    /// Pixel size of the image at `path`.
    fn image_size(&self, path: &Path) -> Result<(u32, u32), AssetError>;
    /// Full text content of the file at `path`.
    fn read_to_string(&self, path: &Path) -> Result<String, AssetError>;
    /// Path a renderer should open for `path`.
    fn resolve(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Reads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FsAssetSource {
    fn image_size(&self, path: &Path) -> Result<(u32, u32), AssetError> {
        let full = self.resolve(path);
        // only the header is read, pixels stay on disk for the renderer
        ImageReader::open(&full)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| AssetError::from_io(&full, e))?
            .into_dimensions()
            .map_err(|e| AssetError::from_image(&full, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, AssetError> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|e| AssetError::from_io(&full, e))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Canned assets held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    images: FxHashMap<PathBuf, (u32, u32)>,
    texts: FxHashMap<PathBuf, String>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        self.images.insert(path.into(), (width, height));
        self
    }

    pub fn with_text(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.texts.insert(path.into(), text.into());
        self
    }
}

impl AssetSource for InMemoryAssets {
    fn image_size(&self, path: &Path) -> Result<(u32, u32), AssetError> {
        self.images
            .get(path)
            .copied()
            .ok_or_else(|| AssetError::Missing(path.to_path_buf()))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, AssetError> {
        self.texts
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::Missing(path.to_path_buf()))
    }
}

/// An image split into a grid of equally sized cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    /// Path as resolved by the asset source.
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl SpriteSheet {
    pub fn columns(&self) -> u32 {
        self.width / self.cell_width
    }

    pub fn rows(&self) -> u32 {
        self.height / self.cell_height
    }

    pub fn cell_count(&self) -> usize {
        (u64::from(self.columns()) * u64::from(self.rows())) as usize
    }

    /// Top-left pixel of cell `index`, or `None` past the last cell.
    pub fn cell_origin(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.cell_count() {
            return None;
        }
        let columns = self.columns() as usize;
        let col = (index % columns) as u32;
        let row = (index / columns) as u32;
        Some((col * self.cell_width, row * self.cell_height))
    }
}

/// Reject levels whose pixel extent does not fit in a `u32`.
fn validate_level(path: &Path, tilemap: &Tilemap) -> Result<(), AssetError> {
    let bad = |reason: String| AssetError::BadLevel {
        path: path.to_path_buf(),
        reason,
    };
    if tilemap.tile_size == 0 {
        return Err(bad("tile_size is 0".to_string()));
    }
    for (name, tiles) in [("map_width", tilemap.map_width), ("map_height", tilemap.map_height)] {
        if tiles.checked_mul(tilemap.tile_size).is_none() {
            return Err(bad(format!(
                "{} {} x tile_size {} overflows",
                name, tiles, tilemap.tile_size
            )));
        }
    }
    Ok(())
}

/// Cache of loaded sprite sheets and levels.
#[derive(Resource)]
pub struct AssetStore {
    source: Box<dyn AssetSource>,
    sheets: FxHashMap<String, SpriteSheet>,
    levels: FxHashMap<String, Tilemap>,
}

impl AssetStore {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            sheets: FxHashMap::default(),
            levels: FxHashMap::default(),
        }
    }

    /// Load a single-image sheet whose only cell is the whole image.
    pub fn load_image(
        &mut self,
        key: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&SpriteSheet, AssetError> {
        self.load(key.into(), path.as_ref(), None)
    }

    /// Load a sprite sheet cut into `cell_width` x `cell_height` cells.
    pub fn load_sprite_sheet(
        &mut self,
        key: impl Into<String>,
        path: impl AsRef<Path>,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<&SpriteSheet, AssetError> {
        self.load(key.into(), path.as_ref(), Some((cell_width, cell_height)))
    }

    fn load(
        &mut self,
        key: String,
        path: &Path,
        cells: Option<(u32, u32)>,
    ) -> Result<&SpriteSheet, AssetError> {
        if !self.sheets.contains_key(&key) {
            let (width, height) = self.source.image_size(path)?;
            let (cell_width, cell_height) = cells.unwrap_or((width, height));
            if cell_width == 0 || cell_height == 0 || cell_width > width || cell_height > height
            {
                return Err(AssetError::BadCells {
                    path: path.to_path_buf(),
                    width,
                    height,
                    cell_width,
                    cell_height,
                });
            }
            let sheet = SpriteSheet {
                path: self.source.resolve(path),
                width,
                height,
                cell_width,
                cell_height,
            };
            debug!(
                "Loaded sheet '{}' {}x{} ({} cells)",
                key,
                width,
                height,
                sheet.cell_count()
            );
            self.sheets.insert(key.clone(), sheet);
        }
        Ok(&self.sheets[key.as_str()])
    }

    /// Load a level and everything it references: its tileset (keyed by the
    /// tileset path) and every placed image (keyed by image path).
    pub fn load_level(
        &mut self,
        key: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&Tilemap, AssetError> {
        let key = key.into();
        let path = path.as_ref();
        if !self.levels.contains_key(&key) {
            let text = self.source.read_to_string(path)?;
            let tilemap: Tilemap =
                serde_json::from_str(&text).map_err(|source| AssetError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            validate_level(path, &tilemap)?;
            self.load_sprite_sheet(
                tilemap.tileset.clone(),
                &tilemap.tileset,
                tilemap.tile_size,
                tilemap.tile_size,
            )?;
            for placement in &tilemap.images {
                self.load_image(placement.image.clone(), &placement.image)?;
            }
            info!(
                "Loaded level '{}': {}x{} tiles, {} placements",
                key,
                tilemap.map_width,
                tilemap.map_height,
                tilemap.tile_count()
            );
            self.levels.insert(key.clone(), tilemap);
        }
        Ok(&self.levels[key.as_str()])
    }

    pub fn sheet(&self, key: &str) -> Option<&SpriteSheet> {
        self.sheets.get(key)
    }

    pub fn level(&self, key: &str) -> Option<&Tilemap> {
        self.levels.get(key)
    }

    pub fn sheets(&self) -> impl Iterator<Item = (&str, &SpriteSheet)> {
        self.sheets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop every cached asset.
    pub fn clear(&mut self) {
        self.sheets.clear();
        self.levels.clear();
    }
}
