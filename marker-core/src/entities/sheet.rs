use anyhow::{Result, ensure};

use crate::entities::Placement;
use crate::geometry::primitives::{Rect, SPolygon};
use crate::util::assertions;

/// Fabric surface of fixed width and bounded length.
/// Length runs along the x-axis, width along the y-axis, with the origin in the bottom-left corner.
///
/// Placements can only be added, never moved or removed.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub width: f64,
    pub max_length: f64,
    placements: Vec<Placement>,
}

impl Sheet {
    pub fn new(width: f64, max_length: f64) -> Result<Self> {
        ensure!(
            width > 0.0 && max_length > 0.0,
            "sheet dimensions must be positive, width: {width}, max_length: {max_length}"
        );
        Ok(Sheet {
            width,
            max_length,
            placements: vec![],
        })
    }

    pub fn bbox(&self) -> Rect {
        Rect {
            x_min: 0.0,
            y_min: 0.0,
            x_max: self.max_length,
            y_max: self.width,
        }
    }

    /// All accepted placements, in order of acceptance
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// True if `shape` conflicts with any accepted placement
    pub fn collides(&self, shape: &SPolygon) -> bool {
        self.placements.iter().any(|p| p.conflicts_with(shape))
    }

    /// True if `shape` lies within the sheet boundaries
    pub fn fits(&self, shape: &SPolygon) -> bool {
        self.bbox().almost_contains(&shape.bbox)
    }

    pub fn accept(&mut self, placement: Placement) {
        debug_assert!(assertions::placement_is_feasible(self, &placement));
        self.placements.push(placement);
    }

    /// Maximum x-extent among all accepted placements
    pub fn used_length(&self) -> f64 {
        self.placements
            .iter()
            .map(|p| p.bounds().x_max)
            .fold(0.0, f64::max)
    }
}
