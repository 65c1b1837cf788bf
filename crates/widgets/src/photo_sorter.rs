//! Drag-and-drop photo ordering
//!
//! Models the sortable photo grid of an album owner. While a tile is
//! dragged, a mirror copy sits in the same container; mirrors never count
//! towards the saved order.

use crate::error::{Result, WidgetError};
use serde::{Deserialize, Serialize};

/// One tile in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoTile {
    /// Photo id
    pub id: u64,
    /// Drag mirror rather than a real tile
    #[serde(default)]
    pub mirror: bool,
}

impl PhotoTile {
    /// A real tile
    pub fn new(id: u64) -> Self {
        Self { id, mirror: false }
    }

    /// A drag mirror of a tile
    pub fn mirror_of(id: u64) -> Self {
        Self { id, mirror: true }
    }
}

/// Body of a reposition request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositionRequest {
    /// CSRF token of the page
    #[serde(rename = "_csrf_token")]
    pub csrf_token: String,
    /// Photo ids in their new order
    pub photo_ids: Vec<u64>,
}

impl RepositionRequest {
    /// Encode as a form body, with `photo_ids[]` repeated per id
    pub fn to_form_body(&self) -> String {
        let mut body = format!("_csrf_token={}", urlencoding::encode(&self.csrf_token));
        for id in &self.photo_ids {
            body.push_str("&photo_ids%5B%5D=");
            body.push_str(&id.to_string());
        }
        body
    }
}

/// A reposition request and where to send it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reposition {
    /// HTTP method
    pub method: String,
    /// Target URL
    pub url: String,
    /// Request body
    pub body: RepositionRequest,
}

/// Sortable photo grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSorter {
    reposition_url: String,
    tiles: Vec<PhotoTile>,
}

impl PhotoSorter {
    /// Create a grid posting new orders to `reposition_url`
    pub fn new(reposition_url: impl Into<String>, tiles: Vec<PhotoTile>) -> Self {
        Self { reposition_url: reposition_url.into(), tiles }
    }

    /// Tiles in display order
    pub fn tiles(&self) -> &[PhotoTile] {
        &self.tiles
    }

    /// Drop the tile at `from` so it ends up at `to`
    pub fn move_tile(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tiles.len();
        if from >= len {
            return Err(WidgetError::TileOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(WidgetError::TileOutOfRange { index: to, len });
        }
        let tile = self.tiles.remove(from);
        self.tiles.insert(to, tile);
        tracing::debug!(photo = tile.id, from, to, "moved photo");
        Ok(())
    }

    /// Photo ids in display order, skipping drag mirrors
    pub fn photo_ids(&self) -> Vec<u64> {
        self.tiles.iter().filter(|t| !t.mirror).map(|t| t.id).collect()
    }

    /// Request saving the current order
    pub fn reposition_request(&self, csrf_token: impl Into<String>) -> Reposition {
        Reposition {
            method: "PUT".to_string(),
            url: self.reposition_url.clone(),
            body: RepositionRequest { csrf_token: csrf_token.into(), photo_ids: self.photo_ids() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorter() -> PhotoSorter {
        PhotoSorter::new(
            "/albums/7/photos/reposition",
            vec![PhotoTile::new(1), PhotoTile::new(2), PhotoTile::new(3), PhotoTile::new(4)],
        )
    }

    #[test]
    fn test_move_tile() {
        let mut sorter = sorter();
        sorter.move_tile(0, 2).unwrap();
        assert_eq!(sorter.photo_ids(), vec![2, 3, 1, 4]);
        sorter.move_tile(3, 0).unwrap();
        assert_eq!(sorter.photo_ids(), vec![4, 2, 3, 1]);
        sorter.move_tile(1, 1).unwrap();
        assert_eq!(sorter.photo_ids(), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_move_out_of_range() {
        let mut sorter = sorter();
        assert_eq!(sorter.move_tile(4, 0), Err(WidgetError::TileOutOfRange { index: 4, len: 4 }));
        assert_eq!(sorter.move_tile(0, 9), Err(WidgetError::TileOutOfRange { index: 9, len: 4 }));
        assert_eq!(sorter.photo_ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reposition_skips_mirrors() {
        let sorter = PhotoSorter::new(
            "/albums/7/photos/reposition",
            vec![PhotoTile::new(3), PhotoTile::mirror_of(1), PhotoTile::new(1), PhotoTile::new(2)],
        );
        let request = sorter.reposition_request("tok");

        assert_eq!(request.method, "PUT");
        assert_eq!(request.url, "/albums/7/photos/reposition");
        assert_eq!(request.body.photo_ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_request_body_encoding() {
        let body = RepositionRequest { csrf_token: "a b/c".to_string(), photo_ids: vec![3, 1] };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["_csrf_token"], "a b/c");
        assert_eq!(json["photo_ids"], serde_json::json!([3, 1]));

        assert_eq!(body.to_form_body(), "_csrf_token=a%20b%2Fc&photo_ids%5B%5D=3&photo_ids%5B%5D=1");
    }
}
