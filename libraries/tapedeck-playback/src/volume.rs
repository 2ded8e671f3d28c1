//! Volume control
//!
//! Linear output volume in `[0, 1]`, the range audio primitives accept
//! directly. Out-of-range requests, infinities included, are clamped; NaN is
//! refused.

/// Clamped output volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,
}

impl Volume {
    /// Create a volume controller
    ///
    /// A NaN initial level falls back to full volume.
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level).unwrap_or(1.0),
        }
    }

    /// Set the level, clamping to `[0, 1]`
    ///
    /// Returns the applied level, or `None` when `level` is NaN and the previous
    /// level was kept.
    pub fn set_level(&mut self, level: f32) -> Option<f32> {
        let clamped = Self::clamp(level)?;
        self.level = clamped;
        Some(clamped)
    }

    /// Current level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    fn clamp(level: f32) -> Option<f32> {
        (!level.is_nan()).then(|| level.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_above_one() {
        let mut vol = Volume::new(1.0);
        assert_eq!(vol.set_level(1.4), Some(1.0));
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn clamps_below_zero() {
        let mut vol = Volume::new(1.0);
        assert_eq!(vol.set_level(-0.2), Some(0.0));
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn keeps_level_on_nan() {
        let mut vol = Volume::new(0.4);
        assert_eq!(vol.set_level(f32::NAN), None);
        assert_eq!(vol.level(), 0.4);
    }

    #[test]
    fn infinities_clamp_to_bounds() {
        let mut vol = Volume::new(0.3);
        assert_eq!(vol.set_level(f32::INFINITY), Some(1.0));
        assert_eq!(vol.set_level(f32::NEG_INFINITY), Some(0.0));
        assert_eq!(Volume::new(f32::INFINITY).level(), 1.0);
        assert_eq!(Volume::new(f32::NAN).level(), 1.0);
    }
}
