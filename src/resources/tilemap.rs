//! Tile-map level data.
//!
//! Levels are JSON documents laid out as below. Tile coordinates are in
//! tiles, image placements in world units. Tile ids index the tileset's cell
//! grid left-to-right, top-to-bottom.
//!
//! ```json
//! {
//!   "tile_size": 32,
//!   "map_width": 20,
//!   "map_height": 15,
//!   "tileset": "tiles.png",
//!   "layers": [
//!     { "name": "ground", "positions": [{ "x": 0, "y": 0, "id": 1 }] },
//!     { "name": "walls", "solid": true, "positions": [{ "x": 3, "y": 4, "id": 7 }] }
//!   ],
//!   "images": [{ "image": "tree.png", "x": 64.0, "y": 96.0 }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Single tile placement within a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TilePosition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Cell index in the tileset.
    pub id: u32,
}

/// A named tile layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TileLayer {
    pub name: String,
    /// Tiles of this layer block the player.
    #[serde(default)]
    pub solid: bool,
    pub positions: Vec<TilePosition>,
}

/// Free-standing image placed on the level.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImagePlacement {
    /// Image path relative to the assets root.
    pub image: String,
    pub x: f32,
    pub y: f32,
}

/// Tile-map level metadata, layers and image placements.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a square tile in pixels (and world units).
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    /// Tileset image path relative to the assets root.
    pub tileset: String,
    pub layers: Vec<TileLayer>,
    #[serde(default)]
    pub images: Vec<ImagePlacement>,
}

impl Tilemap {
    /// Level rectangle size in world units.
    pub fn bounds(&self) -> (f32, f32) {
        (
            self.map_width as f32 * self.tile_size as f32,
            self.map_height as f32 * self.tile_size as f32,
        )
    }

    pub fn tile_count(&self) -> usize {
        self.layers.iter().map(|l| l.positions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: &str = r#"{
        "tile_size": 32,
        "map_width": 10,
        "map_height": 8,
        "tileset": "tiles.png",
        "layers": [
            { "name": "ground", "positions": [{ "x": 0, "y": 0, "id": 1 }, { "x": 1, "y": 0, "id": 2 }] },
            { "name": "walls", "solid": true, "positions": [{ "x": 3, "y": 4, "id": 7 }] }
        ]
    }"#;

    #[test]
    fn parses_level_with_defaults() {
        let tilemap: Tilemap = serde_json::from_str(LEVEL).unwrap();
        assert_eq!(tilemap.bounds(), (320.0, 256.0));
        assert_eq!(tilemap.tile_count(), 3);
        assert!(!tilemap.layers[0].solid);
        assert!(tilemap.layers[1].solid);
        assert!(tilemap.images.is_empty());
    }

    #[test]
    fn bounds_of_huge_map_do_not_wrap() {
        let tilemap = Tilemap {
            tile_size: 70000,
            map_width: 70000,
            map_height: 1,
            tileset: "tiles.png".to_string(),
            layers: Vec::new(),
            images: Vec::new(),
        };
        assert_eq!(tilemap.bounds(), (4.9e9, 70000.0));
    }
}
