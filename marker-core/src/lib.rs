//! Geometry kernel and entities to model the nesting of cut-pattern panels onto a fabric sheet
//! of fixed width and bounded length.

/// Entities to model the nesting problem: panels, the sheet and the result of a run
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Importing instances into and exporting results out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
