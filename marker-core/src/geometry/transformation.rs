use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, Mul};

use ordered_float::NotNan;

//See https://pages.mtu.edu/~shene/COURSES/cs3621/NOTES/geometry/geo-tran.html

#[derive(Clone, Debug, PartialEq)]
/// Affine transformation in matrix form: any composition of rotations, reflections and translations.
pub struct Transformation {
    matrix: [[NotNan<f64>; 3]; 3],
}

impl Transformation {
    pub const fn empty() -> Self {
        Self {
            matrix: EMPTY_MATRIX,
        }
    }

    pub fn from_translation((tx, ty): (f64, f64)) -> Self {
        Self {
            matrix: transl_m((tx, ty)),
        }
    }

    /// Counterclockwise rotation around the origin, angle in radians.
    pub fn from_rotation(angle: f64) -> Self {
        Self {
            matrix: rot_m(angle),
        }
    }

    /// Reflection across the y-axis (x ↦ -x).
    pub fn from_mirror_x() -> Self {
        Self {
            matrix: MIRROR_X_MATRIX,
        }
    }

    pub fn rotate(mut self, angle: f64) -> Self {
        self.matrix = dot_prod(&rot_m(angle), &self.matrix);
        self
    }

    pub fn translate(mut self, (tx, ty): (f64, f64)) -> Self {
        self.matrix = dot_prod(&transl_m((tx, ty)), &self.matrix);
        self
    }

    pub fn mirror_x(mut self) -> Self {
        self.matrix = dot_prod(&MIRROR_X_MATRIX, &self.matrix);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.matrix == EMPTY_MATRIX
    }

    /// True if the transformation flips the orientation of shapes (negative determinant).
    pub fn is_reflection(&self) -> bool {
        let m = &self.matrix;
        let det = m[0][0] * m[1][1] - m[0][1] * m[1][0];
        det.into_inner() < 0.0
    }

    pub fn matrix(&self) -> &[[NotNan<f64>; 3]; 3] {
        &self.matrix
    }
}

const _0: NotNan<f64> = unsafe { NotNan::new_unchecked(0.0) };
const _1: NotNan<f64> = unsafe { NotNan::new_unchecked(1.0) };
const _M1: NotNan<f64> = unsafe { NotNan::new_unchecked(-1.0) };

const EMPTY_MATRIX: [[NotNan<f64>; 3]; 3] = [[_1, _0, _0], [_0, _1, _0], [_0, _0, _1]];
const MIRROR_X_MATRIX: [[NotNan<f64>; 3]; 3] = [[_M1, _0, _0], [_0, _1, _0], [_0, _0, _1]];

/// (sin, cos) of an angle. Multiples of a quarter turn are snapped to their exact values,
/// so rotating by 90° steps does not introduce any error.
fn exact_sin_cos(angle: f64) -> (f64, f64) {
    let quarters = angle / FRAC_PI_2;
    let rounded = quarters.round();
    if (quarters - rounded).abs() < 1e-12 {
        match (rounded as i64).rem_euclid(4) {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        angle.sin_cos()
    }
}

fn rot_m(angle: f64) -> [[NotNan<f64>; 3]; 3] {
    let (sin, cos) = exact_sin_cos(angle);
    let cos = NotNan::new(cos).expect("cos is NaN");
    let sin = NotNan::new(sin).expect("sin is NaN");

    [[cos, -sin, _0], [sin, cos, _0], [_0, _0, _1]]
}

fn transl_m((tx, ty): (f64, f64)) -> [[NotNan<f64>; 3]; 3] {
    let h = NotNan::new(tx).expect("tx is NaN");
    let k = NotNan::new(ty).expect("ty is NaN");

    [[_1, _0, h], [_0, _1, k], [_0, _0, _1]]
}

#[inline(always)]
fn dot_prod<T>(l: &[[T; 3]; 3], r: &[[T; 3]; 3]) -> [[T; 3]; 3]
where
    T: Add<Output = T> + Mul<Output = T> + Copy,
{
    let cell = |i: usize, j: usize| l[i][0] * r[0][j] + l[i][1] * r[1][j] + l[i][2] * r[2][j];
    [
        [cell(0, 0), cell(0, 1), cell(0, 2)],
        [cell(1, 0), cell(1, 1), cell(1, 2)],
        [cell(2, 0), cell(2, 1), cell(2, 2)],
    ]
}
