use log::trace;

use marker_core::entities::{OrientedShape, Sheet};
use marker_core::geometry::{GEOM_TOLERANCE, Orientation};
use marker_core::geometry::primitives::SPolygon;

/// All orientation variants of `shape` that fit within the dimensions of the sheet, in evaluation order.
/// An empty result means the panel is too large for the sheet in every orientation.
pub fn oriented_variants(shape: &SPolygon, sheet: &Sheet) -> Vec<OrientedShape> {
    Orientation::ALL
        .iter()
        .map(|&orientation| OrientedShape::new(shape, orientation))
        .filter(|os| {
            let fits = fits_sheet(os, sheet);
            if !fits {
                trace!(
                    "[CAND] {} rejected, {:.3}x{:.3} exceeds the sheet",
                    os.orientation,
                    os.width(),
                    os.height()
                );
            }
            fits
        })
        .collect()
}

pub fn fits_sheet(os: &OrientedShape, sheet: &Sheet) -> bool {
    os.width() <= sheet.max_length + GEOM_TOLERANCE && os.height() <= sheet.width + GEOM_TOLERANCE
}
