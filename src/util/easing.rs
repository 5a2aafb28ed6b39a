//! Easing curves for vantage transitions.
//!
//! Each curve maps normalized progress in [0, 1] to eased progress in
//! [0, 1] with `f(0) = 0` and `f(1) = 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a camera transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case", tag = "curve")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start.
    QuadraticIn,
    /// Slow finish.
    QuadraticOut,
    /// Slow start and finish.
    SmoothStep,
    /// Cubic Bezier through `(0, 0)`, `(·, c1)`, `(·, c2)`, `(1, 1)`.
    CubicHermite {
        /// First inner control value.
        c1: f32,
        /// Second inner control value.
        c2: f32,
    },
}

impl Easing {
    /// Natural ease-out used by broadcast-style camera cuts.
    pub const DEFAULT: Self = Self::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Eased progress at `t`. Input is clamped to [0, 1].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::CubicHermite { c1, c2 } => {
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for Easing {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Easing; 5] = [
        Easing::Linear,
        Easing::QuadraticIn,
        Easing::QuadraticOut,
        Easing::SmoothStep,
        Easing::DEFAULT,
    ];

    #[test]
    fn curves_hit_endpoints() {
        for curve in CURVES {
            assert_eq!(curve.evaluate(0.0), 0.0, "{curve:?}");
            assert!((curve.evaluate(1.0) - 1.0).abs() < 1e-6, "{curve:?}");
        }
    }

    #[test]
    fn input_is_clamped() {
        for curve in CURVES {
            assert_eq!(curve.evaluate(-0.5), 0.0);
            assert!((curve.evaluate(1.5) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn default_eases_out() {
        assert!(Easing::default().evaluate(0.25) > 0.25);
        assert_eq!(Easing::QuadraticOut.evaluate(0.5), 0.75);
        assert_eq!(Easing::SmoothStep.evaluate(0.5), 0.5);
    }
}
