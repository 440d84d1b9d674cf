use log::trace;

use marker_core::entities::{OrientedShape, Sheet};
use marker_core::geometry::Transformation;
use marker_core::geometry::geo_traits::TransformableFrom;
use marker_core::geometry::primitives::SPolygon;

use crate::config::LFConfig;

/// Slides a shape from `offset` towards the bottom-left corner of the sheet.
/// Every pass tries one step down and then one step left, each only if the moved shape
/// stays on the sheet and remains conflict free. Stops after the first pass without a move.
///
/// Returns the final offset.
pub fn compact(
    sheet: &Sheet,
    oriented: &OrientedShape,
    offset: (f64, f64),
    config: &LFConfig,
) -> (f64, f64) {
    let step = config.compaction_step;
    // x + y shrinks by at least one step in every pass that moves
    let max_passes = ((sheet.max_length + sheet.width) / step).ceil() as usize + 1;

    let mut buffer = oriented.shape.clone();
    let is_free = |buffer: &mut SPolygon, x: f64, y: f64| {
        buffer.transform_from(&oriented.shape, &Transformation::from_translation((x, y)));
        sheet.fits(buffer) && !sheet.collides(buffer)
    };

    let (mut x, mut y) = offset;
    for pass in 0..max_passes {
        let mut moved = false;
        if is_free(&mut buffer, x, y - step) {
            y -= step;
            moved = true;
        }
        if is_free(&mut buffer, x - step, y) {
            x -= step;
            moved = true;
        }
        if !moved {
            trace!(
                "[COMP] ({:.1}, {:.1}) -> ({x:.1}, {y:.1}) in {pass} passes",
                offset.0,
                offset.1
            );
            return (x, y);
        }
    }
    trace!("[COMP] pass limit reached at ({x:.1}, {y:.1})");
    (x, y)
}
