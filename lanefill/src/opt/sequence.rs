use std::cmp::Reverse;

use itertools::Itertools;
use ordered_float::NotNan;

use marker_core::entities::Panel;

/// Indices of `panels` in the order in which they are placed:
/// descending by area, ties broken by the larger bounding box dimension.
/// Remaining ties keep their input order, panels without a usable shape come last.
pub fn panel_placement_order(panels: &[Panel]) -> Vec<usize> {
    (0..panels.len())
        .sorted_by_cached_key(|&i| {
            let panel = &panels[i];
            let area = NotNan::new(panel.area()).expect("panel area is NaN");
            let extent = NotNan::new(panel.extent()).expect("panel extent is NaN");
            Reverse((area, extent))
        })
        .collect_vec()
}
