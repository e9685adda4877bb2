//! Orientation bookkeeping for rotated and flipped frames

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl Rotation {
    /// Maps an angle in degrees to a rotation. Only multiples of 90 below
    /// 360 are accepted.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Rotation0),
            90 => Some(Rotation::Rotation90),
            180 => Some(Rotation::Rotation180),
            270 => Some(Rotation::Rotation270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Rotation0 => 0,
            Rotation::Rotation90 => 90,
            Rotation::Rotation180 => 180,
            Rotation::Rotation270 => 270,
        }
    }

    /// Applies `other` after `self`, modulo a full turn.
    pub fn then(self, other: Rotation) -> Rotation {
        match (self.degrees() + other.degrees()) % 360 {
            90 => Rotation::Rotation90,
            180 => Rotation::Rotation180,
            270 => Rotation::Rotation270,
            _ => Rotation::Rotation0,
        }
    }
}

/// Accumulated geometric transforms applied to a frame since acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orientation {
    pub rotation: Rotation,
    /// Mirrored left-right
    pub flip_x: bool,
    /// Mirrored top-bottom
    pub flip_y: bool,
}

impl Orientation {
    pub fn is_identity(&self) -> bool {
        *self == Orientation::default()
    }
}
