//Various checks to verify correctness of the state of the system
//Used in debug_assert!() blocks and in tests

use std::collections::HashMap;

use itertools::Itertools;
use log::error;

use crate::entities::{Panel, PanelId, Placement, RunResult, Sheet};
use crate::geometry::geo_traits::AlmostCollidesWith;
use crate::geometry::primitives::Rect;

pub fn placement_is_feasible(sheet: &Sheet, placement: &Placement) -> bool {
    if !sheet.fits(&placement.shape) {
        error!(
            "placement of panel {} exceeds the sheet: {:?}",
            placement.panel_idx,
            placement.bounds()
        );
        return false;
    }
    if let Some(other) = sheet
        .placements()
        .iter()
        .find(|p| p.conflicts_with(&placement.shape))
    {
        error!(
            "placement of panel {} conflicts with panel {}",
            placement.panel_idx, other.panel_idx
        );
        return false;
    }
    true
}

pub fn sheet_is_consistent(sheet: &Sheet) -> bool {
    let all_inside = sheet.placements().iter().all(|p| sheet.fits(&p.shape));
    let no_conflicts = sheet
        .placements()
        .iter()
        .tuple_combinations()
        .all(|(p1, p2)| !p1.conflicts_with(&p2.shape));
    all_inside && no_conflicts
}

/// No two placed panels of the result intersect (exact polygon test).
pub fn placed_panels_are_disjoint(result: &RunResult) -> bool {
    result
        .placed
        .iter()
        .tuple_combinations()
        .all(|(p1, p2)| {
            let disjoint = !p1.shape.almost_collides_with(&p2.shape);
            if !disjoint {
                error!("panels {} and {} intersect", p1.id, p2.id);
            }
            disjoint
        })
}

/// Every placed panel lies within `[0, max_length] x [0, sheet_width]`.
pub fn placed_panels_within_sheet(result: &RunResult) -> bool {
    let sheet_bbox = Rect {
        x_min: 0.0,
        y_min: 0.0,
        x_max: result.max_length,
        y_max: result.sheet_width,
    };
    result
        .placed
        .iter()
        .all(|p| sheet_bbox.almost_contains(&p.shape.bbox))
}

/// Every input panel appears exactly once in either the placed or the unplaced list.
pub fn result_is_partition(panels: &[Panel], result: &RunResult) -> bool {
    let mut counts: HashMap<&PanelId, isize> = HashMap::new();
    for panel in panels {
        *counts.entry(&panel.id).or_default() += 1;
    }
    let output_ids = result
        .placed
        .iter()
        .map(|p| &p.id)
        .chain(result.unplaced.iter().map(|u| &u.panel.id));
    for id in output_ids {
        *counts.entry(id).or_default() -= 1;
    }
    counts.values().all(|&c| c == 0)
}
