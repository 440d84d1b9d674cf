use std::fmt::Display;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, SPolygon};

/// Styles ending with this suffix are assigned to [`Lane::A`].
pub const LANE_A_SUFFIX: &str = "_A";

/// Opaque identifier of a panel, as handed over by the pattern source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelId {
    Int(u64),
    Str(String),
}

impl Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelId::Int(id) => write!(f, "{id}"),
            PanelId::Str(id) => write!(f, "{id}"),
        }
    }
}

impl From<u64> for PanelId {
    fn from(id: u64) -> Self {
        PanelId::Int(id)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        PanelId::Str(id.to_string())
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        PanelId::Str(id)
    }
}

/// Vertical scan band of a panel.
/// Lane A panels are searched from the bottom of the sheet upwards,
/// lane B panels start at half the sheet width and wrap around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    A,
    B,
}

impl Lane {
    pub fn from_style(style: &str, lane_a_suffix: &str) -> Self {
        match style.ends_with(lane_a_suffix) {
            true => Lane::A,
            false => Lane::B,
        }
    }
}

/// A single cut-pattern piece to be placed on the sheet.
/// One `Panel` corresponds to one physical copy.
#[derive(Clone, Debug)]
pub struct Panel {
    pub id: PanelId,
    pub style: String,
    pub lane: Lane,
    /// Outline as received, in centimeters
    pub outline: Vec<Point>,
    /// The outline as a simple polygon, [`None`] if the outline is degenerate (see [`SPolygon::try_new`])
    pub shape: Option<SPolygon>,
}

impl Panel {
    pub fn new(
        id: impl Into<PanelId>,
        style: impl Into<String>,
        outline: Vec<Point>,
        lane_a_suffix: &str,
    ) -> Self {
        let id = id.into();
        let style = style.into();
        let lane = Lane::from_style(&style, lane_a_suffix);
        let shape = match SPolygon::try_new(outline.clone()) {
            Ok(shape) => Some(shape),
            Err(e) => {
                warn!("panel {id} ({style}) has a degenerate outline: {e}");
                None
            }
        };
        Panel {
            id,
            style,
            lane,
            outline,
            shape,
        }
    }

    /// Area of the panel, 0 for degenerate panels
    pub fn area(&self) -> f64 {
        self.shape.as_ref().map_or(0.0, |s| s.area())
    }

    /// Largest dimension of the panel's bounding box, 0 for degenerate panels
    pub fn extent(&self) -> f64 {
        self.shape.as_ref().map_or(0.0, |s| s.bbox().extent())
    }
}
