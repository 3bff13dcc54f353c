// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal RGBA color value.
//!
//! This type covers the subset of color handling that `lamina_core` actually
//! needs (named constants, hex parsing, alpha derivation, CSS serialization)
//! without pulling in a full color crate.

use alloc::format;
use alloc::string::String;

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// Components outside that range are stored as given; layers do not validate
/// color values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component (`0.0` transparent, `1.0` opaque).
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(1.0, 1.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from components.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a `#RRGGBB` or `#AARRGGBB` hex string (leading `#` optional).
    ///
    /// Malformed input yields [`CLEAR`](Self::CLEAR) rather than an error;
    /// color parsing is best-effort by design.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return Self::CLEAR;
        }
        let byte_at = |pos: usize| -> Option<f32> {
            let value = u8::from_str_radix(digits.get(pos..pos + 2)?, 16).ok()?;
            Some(f32::from(value) / 255.0)
        };
        let parsed = match digits.len() {
            6 => (|| Some(Self::new(byte_at(0)?, byte_at(2)?, byte_at(4)?, 1.0)))(),
            8 => (|| Some(Self::new(byte_at(2)?, byte_at(4)?, byte_at(6)?, byte_at(0)?)))(),
            _ => None,
        };
        parsed.unwrap_or(Self::CLEAR)
    }

    /// Returns this color with its alpha multiplied by `value`.
    ///
    /// Used to fold a separate opacity factor (such as shadow opacity) into
    /// the color itself.
    #[inline]
    #[must_use]
    pub const fn with_alpha_scaled(self, value: f32) -> Self {
        Self {
            a: self.a * value,
            ..self
        }
    }

    /// Renders the color as a CSS `rgba(...)` string.
    ///
    /// Channels are written as rounded byte values, alpha with six decimal
    /// places: `rgba(255, 0, 0, 0.500000)`.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "rgba({:.0}, {:.0}, {:.0}, {:.6})",
            f64::from(self.r) * 255.0,
            f64::from(self.g) * 255.0,
            f64::from(self.b) * 255.0,
            self.a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_six_digits_is_opaque() {
        let c = Rgba::from_hex("#ff8000");
        assert_eq!(c.a, 1.0);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn hex_eight_digits_carries_alpha_first() {
        let c = Rgba::from_hex("80ff0000");
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn hex_malformed_yields_clear() {
        assert_eq!(Rgba::from_hex("#abc"), Rgba::CLEAR);
        assert_eq!(Rgba::from_hex("not-a-color"), Rgba::CLEAR);
        assert_eq!(Rgba::from_hex("#ggffff"), Rgba::CLEAR);
        assert_eq!(Rgba::from_hex(""), Rgba::CLEAR);
    }

    #[test]
    fn alpha_scaling_multiplies() {
        let c = Rgba::new(1.0, 0.5, 0.0, 0.8).with_alpha_scaled(0.5);
        assert!((c.a - 0.4).abs() < 1e-6);
        assert_eq!(c.r, 1.0);
    }

    #[test]
    fn css_format_matches_renderer_expectations() {
        assert_eq!(Rgba::RED.to_css(), "rgba(255, 0, 0, 1.000000)");
        assert_eq!(
            Rgba::BLACK.with_alpha_scaled(0.5).to_css(),
            "rgba(0, 0, 0, 0.500000)"
        );
    }
}
