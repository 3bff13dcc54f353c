// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode layer tree with lazy backend materialization.
//!
//! `lamina_core` models a hierarchy of rectangular, style-bearing surfaces
//! and projects it onto a live rendering backend. It is `no_std` compatible
//! (with `alloc`) and uses array-based struct-of-arrays storage with index
//! handles for cache-friendly traversal.
//!
//! # Architecture
//!
//! The tree owns the backend and synchronizes it eagerly: each property
//! setter or hierarchy operation runs to completion on the calling thread
//! and leaves the backend reflecting the layer's full current state.
//! Backend primitives for a layer are created lazily, the first time an
//! operation needs them, and reused for the layer's lifetime:
//!
//! ```text
//!   LayerTree<B: Backend>
//!       │  set_frame / add_sublayer / set_border_width / ...
//!       ▼
//!   ensure_materialized ──► Binding { container, background, content,
//!       │                            border group + shape, [clip] }
//!       ▼
//!   B::set_size / append_child / set_stroke / host_append / ...
//! ```
//!
//! **[`layer`]** — Struct-of-arrays layer tree with generational handles.
//! Frames, visual styling (fill, border, corner rounding, opacity, shadow,
//! bounds masking), ordered sublayers, and host-surface linkage.
//!
//! **[`backend`]** — The [`Backend`](backend::Backend) trait that rendering
//! targets implement, plus the no-op [`Headless`](backend::Headless)
//! backend for layout-only trees and tests.
//!
//! **[`color`]** — The minimal [`Rgba`](color::Rgba) value used for fills,
//! strokes, and shadows.
//!
//! Geometry uses [`kurbo`] types throughout: [`kurbo::Rect`] frames,
//! [`kurbo::Point`]/[`kurbo::Size`] primitive placement, [`kurbo::Vec2`]
//! shadow offsets.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod color;
pub mod layer;
