use itertools::Itertools;

use marker_core::entities::{Lane, OrientedShape, Sheet};
use marker_core::geometry::geo_traits::TransformableFrom;
use marker_core::geometry::{GEOM_TOLERANCE, Transformation};

use crate::config::LFConfig;

/// Scans the grid for the first position at which `oriented` does not conflict with the sheet's placements.
/// x is scanned ascending in the outer loop, y in the lane order of the panel in the inner loop.
///
/// * `x_limit` - positions with an x beyond this value are not considered (pruning against the best score so far)
/// * `eval_counter` - incremented for every position tested
pub fn first_fit(
    sheet: &Sheet,
    oriented: &OrientedShape,
    lane: Lane,
    config: &LFConfig,
    x_limit: Option<f64>,
    eval_counter: &mut usize,
) -> Option<(f64, f64)> {
    let step = config.grid_step;
    let y_positions = y_scan_order(lane, sheet.width, oriented.height(), step);
    let max_x_idx = grid_count(sheet.max_length - oriented.width(), step);

    //buffer shape that is repeatedly transformed from the reference
    let mut buffer = oriented.shape.clone();

    for x_idx in 0..=max_x_idx {
        let x = x_idx as f64 * step;
        if x_limit.is_some_and(|limit| x > limit) {
            break;
        }
        for &y in &y_positions {
            *eval_counter += 1;
            buffer.transform_from(&oriented.shape, &Transformation::from_translation((x, y)));
            debug_assert!(sheet.fits(&buffer));
            if !sheet.collides(&buffer) {
                return Some((x, y));
            }
        }
    }
    None
}

/// The y-coordinates to scan for a shape of height `height`, in order.
///
/// [`Lane::A`] scans upwards from 0.
/// [`Lane::B`] starts at the largest grid value not above half the sheet width,
/// scans upwards and then wraps around to scan from 0 up to the starting value.
pub fn y_scan_order(lane: Lane, sheet_width: f64, height: f64, step: f64) -> Vec<f64> {
    let max_y_idx = grid_count(sheet_width - height, step);
    let indices = match lane {
        Lane::A => (0..=max_y_idx).collect_vec(),
        Lane::B => {
            let start_idx = grid_count(sheet_width / 2.0, step);
            (start_idx..=max_y_idx)
                .chain(0..start_idx.min(max_y_idx + 1))
                .collect_vec()
        }
    };
    indices.into_iter().map(|i| i as f64 * step).collect_vec()
}

/// Largest number of whole steps that fits within `span`, 0 if `span` is negative.
pub fn grid_count(span: f64, step: f64) -> usize {
    debug_assert!(step > 0.0);
    ((span + GEOM_TOLERANCE) / step).floor().max(0.0) as usize
}
