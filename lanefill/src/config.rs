use serde::{Deserialize, Serialize};

use marker_core::entities::LANE_A_SUFFIX;

/// Configuration for the lane-fill optimizer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LFConfig {
    /// Distance (cm) between two consecutive grid positions, in both directions
    pub grid_step: f64,
    /// Distance (cm) of a single gravity compaction move
    pub compaction_step: f64,
    /// Weight of the y-coordinate in the placement score, the x-coordinate has weight 1
    pub y_tiebreak_weight: f64,
    /// Styles ending with this suffix are scanned from the bottom of the sheet upwards
    pub lane_a_suffix: String,
    /// If enabled, cancellation is also checked before every orientation, instead of only before every panel.
    /// A panel interrupted this way is reported neither as placed nor as unplaced.
    pub poll_cancel_per_orientation: bool,
}

impl Default for LFConfig {
    fn default() -> Self {
        Self {
            grid_step: 3.0,
            compaction_step: 0.5,
            y_tiebreak_weight: 0.001,
            lane_a_suffix: LANE_A_SUFFIX.to_string(),
            poll_cancel_per_orientation: true,
        }
    }
}
