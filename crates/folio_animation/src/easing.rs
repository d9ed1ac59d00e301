//! Easing functions for animations
//!
//! Curves can be named the way page choreography is usually written:
//! `none`, `power2.out`, `power3.inOut`, `back.out(1.7)`.

use std::str::FromStr;

use crate::error::AnimationError;

/// Default overshoot for `back` curves
pub const BACK_OVERSHOOT: f32 = 1.70158;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
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
    /// Pulls back before accelerating; argument is the overshoot
    BackIn(f32),
    /// Overshoots the target then settles; argument is the overshoot
    BackOut(f32),
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
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
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
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
            Easing::BackIn(s) => (s + 1.0) * t * t * t - s * t * t,
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }

    /// `powerN` family lookup (power1 = quad ... power4 = quint)
    fn power(n: u8, mode: Mode) -> Option<Easing> {
        let curve = match (n, mode) {
            (0, _) => Easing::Linear,
            (1, Mode::In) => Easing::EaseInQuad,
            (1, Mode::Out) => Easing::EaseOutQuad,
            (1, Mode::InOut) => Easing::EaseInOutQuad,
            (2, Mode::In) => Easing::EaseInCubic,
            (2, Mode::Out) => Easing::EaseOutCubic,
            (2, Mode::InOut) => Easing::EaseInOutCubic,
            (3, Mode::In) => Easing::EaseInQuart,
            (3, Mode::Out) => Easing::EaseOutQuart,
            (3, Mode::InOut) => Easing::EaseInOutQuart,
            (4, Mode::In) => Easing::EaseInQuint,
            (4, Mode::Out) => Easing::EaseOutQuint,
            (4, Mode::InOut) => Easing::EaseInOutQuint,
            _ => return None,
        };
        Some(curve)
    }
}

#[derive(Clone, Copy)]
enum Mode {
    In,
    Out,
    InOut,
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || AnimationError::UnknownEasing(s.to_string());
        let name = s.trim();

        let (head, arg) = match name.find('(') {
            Some(open) => {
                let inner = name[open + 1..].strip_suffix(')').ok_or_else(unknown)?;
                let value = inner.trim().parse::<f32>().map_err(|_| unknown())?;
                (&name[..open], Some(value))
            }
            None => (name, None),
        };
        let head = head.to_ascii_lowercase();

        match head.as_str() {
            "none" | "linear" | "power0" => return Ok(Easing::Linear),
            "ease-in" => return Ok(Easing::EaseIn),
            "ease-out" => return Ok(Easing::EaseOut),
            "ease" | "ease-in-out" => return Ok(Easing::EaseInOut),
            _ => {}
        }

        let (family, mode) = head.split_once('.').unwrap_or((head.as_str(), "out"));
        let mode = match mode {
            "in" => Mode::In,
            "out" => Mode::Out,
            "inout" => Mode::InOut,
            _ => return Err(unknown()),
        };

        if family == "back" {
            let overshoot = arg.unwrap_or(BACK_OVERSHOOT);
            return match mode {
                Mode::In => Ok(Easing::BackIn(overshoot)),
                Mode::Out => Ok(Easing::BackOut(overshoot)),
                Mode::InOut => Err(unknown()),
            };
        }
        if arg.is_some() {
            return Err(unknown());
        }

        let n = match family {
            "quad" => 1,
            "cubic" => 2,
            "quart" => 3,
            "quint" => 4,
            other => other
                .strip_prefix("power")
                .and_then(|n| n.parse::<u8>().ok())
                .ok_or_else(unknown)?,
        };
        Easing::power(n, mode).ok_or_else(unknown)
    }
}

/// Cubic bezier easing calculation (same curve as CSS `cubic-bezier()`).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
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

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        let curves = [
            Easing::Linear,
            Easing::EaseInOutQuad,
            Easing::EaseOutQuart,
            Easing::EaseInOutQuint,
            Easing::BackIn(BACK_OVERSHOOT),
            Easing::BackOut(1.7),
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ];
        for curve in curves {
            assert!(curve.apply(0.0).abs() < 1e-5, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-5, "{curve:?} at 1");
        }
    }

    #[test]
    fn test_parse_named_curves() {
        assert_eq!("none".parse::<Easing>().unwrap(), Easing::Linear);
        assert_eq!("power3.out".parse::<Easing>().unwrap(), Easing::EaseOutQuart);
        assert_eq!(
            "power3.inOut".parse::<Easing>().unwrap(),
            Easing::EaseInOutQuart
        );
        assert_eq!("power2".parse::<Easing>().unwrap(), Easing::EaseOutCubic);
        assert_eq!(
            "back.out(1.7)".parse::<Easing>().unwrap(),
            Easing::BackOut(1.7)
        );
        assert_eq!(
            "back.in".parse::<Easing>().unwrap(),
            Easing::BackIn(BACK_OVERSHOOT)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("bounce.out".parse::<Easing>().is_err());
        assert!("power9.out".parse::<Easing>().is_err());
        assert!("power2.sideways".parse::<Easing>().is_err());
        assert!("power2.out(3)".parse::<Easing>().is_err());
        assert!("back.out(1.7".parse::<Easing>().is_err());
    }

    #[test]
    fn test_back_out_overshoots() {
        let curve = Easing::BackOut(1.7);
        let peak = (1..100)
            .map(|i| curve.apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }
}
