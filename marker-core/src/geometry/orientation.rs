use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::Transformation;
use crate::geometry::primitives::Point;

/// Rotation of a panel, restricted to quarter turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn radians(self) -> f64 {
        (self.degrees() as f64).to_radians()
    }
}

/// One of the eight orientation variants a panel can be placed in:
/// a quarter-turn rotation, optionally followed by a horizontal mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: Rotation,
    pub mirrored: bool,
}

impl Orientation {
    /// All variants, in the order in which they are evaluated.
    pub const ALL: [Orientation; 8] = {
        let mut all = [Orientation::IDENTITY; 8];
        let mut i = 0;
        while i < 8 {
            all[i] = Orientation {
                rotation: Rotation::ALL[i / 2],
                mirrored: i % 2 == 1,
            };
            i += 1;
        }
        all
    };

    pub const IDENTITY: Orientation = Orientation {
        rotation: Rotation::Deg0,
        mirrored: false,
    };

    /// Rotation followed by the optional mirror, both around `pivot`.
    pub fn transformation_around(&self, pivot: Point) -> Transformation {
        let Point(c_x, c_y) = pivot;
        let mut t = Transformation::from_translation((-c_x, -c_y)).rotate(self.rotation.radians());
        if self.mirrored {
            t = t.mirror_x();
        }
        t.translate((c_x, c_y))
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r: {}°", self.rotation.degrees())?;
        if self.mirrored {
            write!(f, ", mirrored")?;
        }
        Ok(())
    }
}
