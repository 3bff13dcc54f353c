// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is a rectangular, style-bearing node in a retained-mode tree.
//! Each layer has:
//!
//! - An identity ([`LayerId`]) — a generational handle that becomes stale
//!   when the layer is destroyed, preventing use-after-free bugs at the API
//!   level — plus a [`ClipToken`] naming the clip region it may own in the
//!   backend.
//! - Topology — superlayer, first-sublayer, and sibling links forming an
//!   ordered tree; sublayer order is paint order, back to front.
//! - Properties set by the caller: [`frame`](LayerTree::set_frame),
//!   [`hidden`](LayerTree::set_hidden),
//!   [`corner_radius`](LayerTree::set_corner_radius), border width/color,
//!   [`background_color`](LayerTree::set_background_color),
//!   [`opacity`](LayerTree::set_opacity),
//!   [`masks_to_bounds`](LayerTree::set_masks_to_bounds), and a
//!   [`Shadow`] group.
//! - An optional host surface ([`HostId`]) — the displayable object the
//!   layer renders into; layers without one resolve their effective host by
//!   walking up the superlayer chain.
//! - A lazily-created backend binding — created on first need, exactly once
//!   (see [`LayerTree::is_materialized`]), and kept in sync with every
//!   later mutation.
//!
//! Layers are stored in struct-of-arrays layout with index-based handles
//! for cache-friendly traversal.

mod id;
mod materialize;
mod shadow;
mod tree;
mod traverse;

pub use id::{ClipToken, HostId, INVALID, LayerId};
pub use materialize::ContainerKind;
pub use shadow::{Shadow, ShadowSpec};
pub use traverse::Sublayers;
pub use tree::LayerTree;
