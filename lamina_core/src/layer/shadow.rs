// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop-shadow property group and its derived backend value.

use kurbo::Vec2;

use crate::color::Rgba;

/// A layer's stored shadow properties.
///
/// These are the raw values as set by the caller. Whether a shadow is
/// actually shown, and with which effective color, is derived by
/// [`Shadow::effective`]. The defaults (no color, zero opacity, a slight
/// upward offset, a soft radius) mean a shadow appears as soon as a color
/// and a positive opacity are both set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Base shadow color; `None` disables the shadow.
    pub color: Option<Rgba>,
    /// Opacity factor applied to the color's alpha (`0.0` disables).
    pub opacity: f32,
    /// Offset of the shadow from the layer, in layer coordinates.
    pub offset: Vec2,
    /// Blur radius in layer coordinates.
    pub blur_radius: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: None,
            opacity: 0.0,
            offset: Vec2::new(0.0, -3.0),
            blur_radius: 3.0,
        }
    }
}

impl Shadow {
    /// Derives the effective shadow to hand to the backend.
    ///
    /// Returns `None` when the shadow is disabled: opacity zero or below, no
    /// color, or a fully transparent color. Otherwise the opacity factor is
    /// folded into the color's alpha.
    #[must_use]
    pub fn effective(&self) -> Option<ShadowSpec> {
        let color = self.color?;
        if self.opacity <= 0.0 || color.a <= 0.0 {
            return None;
        }
        Some(ShadowSpec {
            offset: self.offset,
            blur_radius: self.blur_radius,
            color: color.with_alpha_scaled(self.opacity),
        })
    }
}

/// The resolved shadow value applied to a host surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowSpec {
    /// Offset of the shadow from the layer.
    pub offset: Vec2,
    /// Blur radius.
    pub blur_radius: f64,
    /// Final color, with the opacity factor already folded into alpha.
    pub color: Rgba,
}
