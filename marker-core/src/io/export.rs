use itertools::Itertools;

use crate::entities::{PlacedPanel, RunResult, UnplacedPanel};
use crate::geometry::primitives::{Point, SPolygon};
use crate::io::ext_repr::{ExtPlacedPanel, ExtSPolygon, ExtSolution, ExtUnplacedPanel};

/// Exports a [`RunResult`] by composing an [`ExtSolution`] from it.
pub fn export_solution(result: &RunResult, run_time_ms: u64) -> ExtSolution {
    ExtSolution {
        status: result.status,
        used_length: round_2(result.used_length()),
        efficiency: round_2(result.efficiency()),
        placed: result.placed.iter().map(export_placed_panel).collect_vec(),
        unplaced: result
            .unplaced
            .iter()
            .map(export_unplaced_panel)
            .collect_vec(),
        run_time_ms,
    }
}

pub fn export_placed_panel(placed: &PlacedPanel) -> ExtPlacedPanel {
    ExtPlacedPanel {
        id: placed.id.clone(),
        style: placed.style.clone(),
        orientation: placed.orientation,
        offset: placed.offset,
        shape: export_simple_polygon(&placed.shape),
    }
}

pub fn export_unplaced_panel(unplaced: &UnplacedPanel) -> ExtUnplacedPanel {
    ExtUnplacedPanel {
        id: unplaced.panel.id.clone(),
        style: unplaced.panel.style.clone(),
        reason: unplaced.reason,
    }
}

pub fn export_simple_polygon(shape: &SPolygon) -> ExtSPolygon {
    ExtSPolygon(shape.points.iter().map(|&Point(x, y)| (x, y)).collect_vec())
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
