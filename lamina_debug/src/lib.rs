// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for lamina layer trees.
//!
//! This crate provides development-time introspection over any
//! [`LayerTree`](lamina_core::layer::LayerTree), independent of backend:
//!
//! - [`pretty::write_tree`] / [`pretty::dump_tree`] — human-readable
//!   one-line-per-layer output, depth-indented to mirror the hierarchy.

pub mod pretty;
