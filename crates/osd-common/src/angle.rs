//! Angle convention tags.
//!
//! Widgets speak in compass degrees (0° = up, clockwise) while trigonometry
//! wants math degrees (0° = right, counter-clockwise). Keeping them in
//! separate types means a mix-up is a type error rather than a rotated
//! widget.

/// Degrees in compass convention: 0° = up/North, increasing clockwise.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CompassAngle(pub f32);

/// Degrees in math convention: 0° = right/East, increasing counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct MathAngle(pub f32);

impl CompassAngle {
    pub fn degrees(self) -> f32 {
        self.0
    }

    /// Same bearing folded into `[0, 360)`.
    pub fn normalized(self) -> Self {
        CompassAngle(normalize_degrees(self.0))
    }

    pub fn to_math(self) -> MathAngle {
        MathAngle(90.0 - self.0)
    }
}

impl MathAngle {
    pub fn degrees(self) -> f32 {
        self.0
    }

    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    pub fn normalized(self) -> Self {
        MathAngle(normalize_degrees(self.0))
    }

    pub fn to_compass(self) -> CompassAngle {
        CompassAngle(90.0 - self.0)
    }
}

impl From<CompassAngle> for MathAngle {
    fn from(angle: CompassAngle) -> Self {
        angle.to_math()
    }
}

impl From<MathAngle> for CompassAngle {
    fn from(angle: MathAngle) -> Self {
        angle.to_compass()
    }
}

/// Fold any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let folded = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}
