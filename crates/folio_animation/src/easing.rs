//! Easing functions for animations
//!
//! Named curves follow the `family.direction` convention used by scroll
//! choreography tools (`power3.out`, `expo.out`, ...). `power1` is quadratic,
//! `power2` cubic, `power3` quartic and `power4` quintic.

use crate::error::{AnimationError, Result};

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseOutExpo,
    /// `min(1, 1.001 - 2^(-10t))`: the exponential-decay curve used for
    /// inertial smooth scrolling
    ExpoDecay,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoDecay => {
                if t <= 0.0 {
                    0.0
                } else {
                    (1.001 - 2f32.powf(-10.0 * t)).min(1.0)
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// Validated cubic bezier curve
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(AnimationError::InvalidCubicBezier(x1, y1, x2, y2));
        }
        Ok(Easing::CubicBezier(x1, y1, x2, y2))
    }

    /// Parse a named easing such as `power4.out`, `expo.out`, `none` or
    /// `cubic-bezier(0.25, 0.4, 0.25, 1)`.
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();

        if let Some(args) = name
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let values: Vec<f32> = args
                .split(',')
                .map(|v| v.trim().parse::<f32>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| AnimationError::UnknownEasing(name.to_string()))?;
            let [x1, y1, x2, y2] = values.as_slice() else {
                return Err(AnimationError::UnknownEasing(name.to_string()));
            };
            return Easing::cubic_bezier(*x1, *y1, *x2, *y2);
        }

        let easing = match name {
            "none" | "linear" => Easing::Linear,
            "power1.in" => Easing::EaseInQuad,
            "power1" | "power1.out" => Easing::EaseOutQuad,
            "power1.inOut" => Easing::EaseInOutQuad,
            "power2.in" => Easing::EaseInCubic,
            "power2" | "power2.out" => Easing::EaseOutCubic,
            "power2.inOut" => Easing::EaseInOutCubic,
            "power3.in" => Easing::EaseInQuart,
            "power3" | "power3.out" => Easing::EaseOutQuart,
            "power3.inOut" => Easing::EaseInOutQuart,
            "power4.in" => Easing::EaseInQuint,
            "power4" | "power4.out" => Easing::EaseOutQuint,
            "power4.inOut" => Easing::EaseInOutQuint,
            "expo.out" => Easing::EaseOutExpo,
            "expo.decay" => Easing::ExpoDecay,
            _ => return Err(AnimationError::UnknownEasing(name.to_string())),
        };
        Ok(easing)
    }
}

impl std::str::FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        Easing::from_name(s)
    }
}

/// Cubic bezier easing calculation (matches CSS / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// B'(t)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
