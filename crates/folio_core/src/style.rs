//! Animatable style properties
//!
//! `StyleProps` carries optional render properties. A field that is `None`
//! is left untouched when the props are applied to an element, which lets a
//! tween own only the properties it animates.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// RGBA color with components in 0.0..=1.0
pub type Rgba = [f32; 4];

/// Render properties that animations can interpolate
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleProps {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Scale X factor
    pub scale_x: Option<f32>,
    /// Scale Y factor
    pub scale_y: Option<f32>,
    /// Rendered width in pixels
    pub width: Option<f32>,
    /// Rendered height in pixels
    pub height: Option<f32>,
    /// Clip-path inset [top%, right%, bottom%, left%]
    pub clip_inset: Option<[f32; 4]>,
    /// Drop-shadow glow radius in pixels
    pub glow: Option<f32>,
    /// Drop-shadow glow alpha
    pub glow_alpha: Option<f32>,
    /// Border color
    pub border_color: Option<Rgba>,
}

impl StyleProps {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with uniform scale
    pub fn scale(value: f32) -> Self {
        Self {
            scale_x: Some(value),
            scale_y: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set X translation
    pub fn with_x(mut self, px: f32) -> Self {
        self.translate_x = Some(px);
        self
    }

    /// Builder: set Y translation
    pub fn with_y(mut self, px: f32) -> Self {
        self.translate_y = Some(px);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale_x = Some(value);
        self.scale_y = Some(value);
        self
    }

    /// Builder: set X scale only
    pub fn with_scale_x(mut self, value: f32) -> Self {
        self.scale_x = Some(value);
        self
    }

    pub fn with_width(mut self, px: f32) -> Self {
        self.width = Some(px);
        self
    }

    pub fn with_height(mut self, px: f32) -> Self {
        self.height = Some(px);
        self
    }

    /// Builder: set clip-path inset in percent
    pub fn with_clip_inset(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.clip_inset = Some([top, right, bottom, left]);
        self
    }

    /// Builder: set drop-shadow glow radius and alpha
    pub fn with_glow(mut self, radius: f32, alpha: f32) -> Self {
        self.glow = Some(radius);
        self.glow_alpha = Some(alpha);
        self
    }

    pub fn with_border_color(mut self, color: Rgba) -> Self {
        self.border_color = Some(color);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            scale_x: lerp_opt(self.scale_x, other.scale_x, t),
            scale_y: lerp_opt(self.scale_y, other.scale_y, t),
            width: lerp_opt(self.width, other.width, t),
            height: lerp_opt(self.height, other.height, t),
            clip_inset: lerp_opt_array4(self.clip_inset, other.clip_inset, t),
            glow: lerp_opt(self.glow, other.glow, t),
            glow_alpha: lerp_opt(self.glow_alpha, other.glow_alpha, t),
            border_color: lerp_opt_array4(self.border_color, other.border_color, t),
        }
    }

    /// Overlay every field set in `other` onto `self`
    pub fn merge(&mut self, other: &Self) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        overlay!(
            opacity,
            translate_x,
            translate_y,
            scale_x,
            scale_y,
            width,
            height,
            clip_inset,
            glow,
            glow_alpha,
            border_color
        );
    }

    /// Resolve the current value of every field set in `mask`.
    ///
    /// Fields unset on `self` fall back to their identity default, so the
    /// result always has exactly the fields of `mask`.
    pub fn capture(&self, mask: &Self) -> Self {
        Self {
            opacity: mask.opacity.map(|_| self.resolved_opacity()),
            translate_x: mask.translate_x.map(|_| self.translate_x.unwrap_or(0.0)),
            translate_y: mask.translate_y.map(|_| self.translate_y.unwrap_or(0.0)),
            scale_x: mask.scale_x.map(|_| self.scale_x.unwrap_or(1.0)),
            scale_y: mask.scale_y.map(|_| self.scale_y.unwrap_or(1.0)),
            width: mask.width.map(|_| self.width.unwrap_or(0.0)),
            height: mask.height.map(|_| self.height.unwrap_or(0.0)),
            clip_inset: mask.clip_inset.map(|_| self.resolved_clip_inset()),
            glow: mask.glow.map(|_| self.glow.unwrap_or(0.0)),
            glow_alpha: mask.glow_alpha.map(|_| self.glow_alpha.unwrap_or(0.0)),
            border_color: mask
                .border_color
                .map(|_| self.border_color.unwrap_or([0.0; 4])),
        }
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> (f32, f32) {
        (self.scale_x.unwrap_or(1.0), self.scale_y.unwrap_or(1.0))
    }

    /// Get the resolved translation (defaults to 0.0 if not set)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }

    /// Get the resolved clip inset (defaults to no clipping)
    pub fn resolved_clip_inset(&self) -> [f32; 4] {
        self.clip_inset.unwrap_or([0.0; 4])
    }

    /// Read a single scalar property
    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::Opacity => self.opacity,
            Property::X => self.translate_x,
            Property::Y => self.translate_y,
            Property::ScaleX => self.scale_x,
            Property::ScaleY => self.scale_y,
            Property::Width => self.width,
            Property::Height => self.height,
            Property::Glow => self.glow,
            Property::GlowAlpha => self.glow_alpha,
            Property::ClipTop => self.clip_inset.map(|c| c[0]),
            Property::ClipRight => self.clip_inset.map(|c| c[1]),
            Property::ClipBottom => self.clip_inset.map(|c| c[2]),
            Property::ClipLeft => self.clip_inset.map(|c| c[3]),
        }
    }

    /// Read a single scalar property, falling back to its identity default
    pub fn resolved(&self, property: Property) -> f32 {
        self.get(property).unwrap_or(match property {
            Property::Opacity | Property::ScaleX | Property::ScaleY => 1.0,
            _ => 0.0,
        })
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Helper to interpolate optional [f32; 4] arrays
fn lerp_opt_array4(a: Option<[f32; 4]>, b: Option<[f32; 4]>, t: f32) -> Option<[f32; 4]> {
    match (a, b) {
        (Some(a), Some(b)) => Some([
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// A single scalar style channel, addressable by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    X,
    Y,
    ScaleX,
    ScaleY,
    Width,
    Height,
    Glow,
    GlowAlpha,
    ClipTop,
    ClipRight,
    ClipBottom,
    ClipLeft,
}

impl Property {
    pub fn name(&self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::ScaleX => "scale_x",
            Property::ScaleY => "scale_y",
            Property::Width => "width",
            Property::Height => "height",
            Property::Glow => "glow",
            Property::GlowAlpha => "glow_alpha",
            Property::ClipTop => "clip_top",
            Property::ClipRight => "clip_right",
            Property::ClipBottom => "clip_bottom",
            Property::ClipLeft => "clip_left",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "opacity" => Property::Opacity,
            "x" | "translate_x" => Property::X,
            "y" | "translate_y" => Property::Y,
            "scale_x" | "scaleX" => Property::ScaleX,
            "scale_y" | "scaleY" => Property::ScaleY,
            "width" => Property::Width,
            "height" => Property::Height,
            "glow" => Property::Glow,
            "glow_alpha" => Property::GlowAlpha,
            "clip_top" => Property::ClipTop,
            "clip_right" => Property::ClipRight,
            "clip_bottom" => Property::ClipBottom,
            "clip_left" => Property::ClipLeft,
            other => return Err(CoreError::UnknownProperty(other.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_only_touches_set_fields() {
        let a = StyleProps::opacity(0.0).with_x(-100.0);
        let b = StyleProps::opacity(1.0).with_x(0.0);

        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.opacity, Some(0.5));
        assert_eq!(mid.translate_x, Some(-50.0));
        assert_eq!(mid.translate_y, None);
        assert_eq!(mid.clip_inset, None);
    }

    #[test]
    fn test_merge_overlays() {
        let mut base = StyleProps::opacity(0.2).with_y(10.0);
        base.merge(&StyleProps::opacity(0.9));

        assert_eq!(base.opacity, Some(0.9));
        assert_eq!(base.translate_y, Some(10.0));
    }

    #[test]
    fn test_capture_uses_identity_defaults() {
        let current = StyleProps::default().with_y(40.0);
        let mask = StyleProps::opacity(0.0).with_y(0.0).with_scale(2.0);

        let captured = current.capture(&mask);
        assert_eq!(captured.opacity, Some(1.0));
        assert_eq!(captured.translate_y, Some(40.0));
        assert_eq!(captured.scale_x, Some(1.0));
        assert_eq!(captured.translate_x, None);
    }

    #[test]
    fn test_property_names_round_trip() {
        for property in [Property::Opacity, Property::Y, Property::ClipRight] {
            assert_eq!(property.name().parse::<Property>().unwrap(), property);
        }
        assert!("rotation".parse::<Property>().is_err());
    }
}
