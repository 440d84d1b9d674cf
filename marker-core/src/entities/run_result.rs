use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::entities::{Panel, PanelId};
use crate::geometry::Orientation;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::SPolygon;

/// Terminal state of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every panel was processed
    Completed,
    /// The run was stopped early; panels that were never reached are absent from the result
    Cancelled,
}

/// Why a panel ended up unplaced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Fewer than 3 distinct points or no enclosed area
    DegenerateInput,
    /// Exceeds the sheet width or maximum length in every orientation
    OversizedPanel,
    /// Every position of every fitting orientation conflicts with an earlier placement
    NoFeasiblePosition,
}

impl Display for UnplacedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnplacedReason::DegenerateInput => "degenerate input",
            UnplacedReason::OversizedPanel => "oversized panel",
            UnplacedReason::NoFeasiblePosition => "no feasible position",
        };
        f.write_str(s)
    }
}

/// A panel as it was placed on the sheet
#[derive(Clone, Debug)]
pub struct PlacedPanel {
    pub id: PanelId,
    pub style: String,
    pub orientation: Orientation,
    pub offset: (f64, f64),
    /// Final outline in sheet coordinates (cm, origin at the bottom-left corner of the sheet)
    pub shape: SPolygon,
}

#[derive(Clone, Debug)]
pub struct UnplacedPanel {
    pub panel: Panel,
    pub reason: UnplacedReason,
}

/// Outcome of a single run.
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Placed panels, in order of placement
    pub placed: Vec<PlacedPanel>,
    pub unplaced: Vec<UnplacedPanel>,
    pub status: RunStatus,
    pub sheet_width: f64,
    pub max_length: f64,
}

impl RunResult {
    /// Maximum x-extent among the placed panels
    pub fn used_length(&self) -> f64 {
        self.placed
            .iter()
            .map(|p| p.shape.bbox().x_max)
            .fold(0.0, f64::max)
    }

    pub fn placed_area(&self) -> f64 {
        self.placed.iter().map(|p| p.shape.area()).sum()
    }

    /// Placed area relative to the used area of the sheet, as a percentage
    pub fn efficiency(&self) -> f64 {
        let used_area = self.used_length() * self.sheet_width;
        match used_area > 0.0 {
            true => 100.0 * self.placed_area() / used_area,
            false => 0.0,
        }
    }

    /// Number of panels that were processed, placed or not
    pub fn n_processed(&self) -> usize {
        self.placed.len() + self.unplaced.len()
    }
}
