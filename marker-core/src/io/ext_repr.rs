use serde::{Deserialize, Serialize};

use crate::entities::{PanelId, RunStatus, UnplacedReason};
use crate::geometry::Orientation;

/// External representation of an [`Instance`](crate::entities::Instance).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    /// Unit of the panel coordinates
    #[serde(default)]
    pub unit: LengthUnit,
    pub sheet: ExtSheet,
    /// Number of fabric layers spread on top of each other.
    /// A panel with quantity `q` is placed `ceil(q / layers)` times.
    #[serde(default = "default_one")]
    pub layers: usize,
    pub panels: Vec<ExtPanel>,
}

/// External representation of a [`Sheet`](crate::entities::Sheet).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheet {
    /// Fabric width, in `width_unit`
    pub width: f64,
    #[serde(default)]
    pub width_unit: LengthUnit,
    /// Maximum usable length in cm
    pub max_length: f64,
    /// Minimum marker length in cm
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_length: Option<f64>,
}

/// External representation of a [`Panel`](crate::entities::Panel).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPanel {
    pub id: PanelId,
    pub style: String,
    /// Outline of the panel
    pub shape: ExtSPolygon,
    /// Number of pieces to cut
    #[serde(default = "default_one")]
    pub quantity: usize,
}

/// External representation of a [`SPolygon`](crate::geometry::primitives::SPolygon).
/// A polygon with no holes and no self-intersections.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSPolygon(pub Vec<(f64, f64)>);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Mm,
    #[default]
    Cm,
    Inch,
}

impl LengthUnit {
    /// Factor to convert a length in this unit to centimeters
    pub fn to_cm(self) -> f64 {
        match self {
            LengthUnit::Mm => 0.1,
            LengthUnit::Cm => 1.0,
            LengthUnit::Inch => 2.54,
        }
    }
}

/// External representation of a [`RunResult`](crate::entities::RunResult).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    pub status: RunStatus,
    /// Maximum x-extent of the placed panels, in cm
    pub used_length: f64,
    /// Placed area relative to the used area of the sheet, in %
    pub efficiency: f64,
    pub placed: Vec<ExtPlacedPanel>,
    pub unplaced: Vec<ExtUnplacedPanel>,
    /// Milliseconds the run took
    pub run_time_ms: u64,
}

/// External representation of a [`PlacedPanel`](crate::entities::PlacedPanel).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedPanel {
    pub id: PanelId,
    pub style: String,
    pub orientation: Orientation,
    pub offset: (f64, f64),
    /// Final outline in sheet coordinates
    pub shape: ExtSPolygon,
}

/// External representation of an [`UnplacedPanel`](crate::entities::UnplacedPanel).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtUnplacedPanel {
    pub id: PanelId,
    pub style: String,
    pub reason: UnplacedReason,
}

fn default_one() -> usize {
    1
}
