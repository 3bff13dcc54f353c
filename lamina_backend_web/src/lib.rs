// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for lamina.
//!
//! [`SvgBackend`](svg::SvgBackend) renders a layer tree as SVG: each layer
//! becomes a small cluster of SVG elements, and host surfaces are ordinary
//! DOM containers registered by the application. The backend holds no layer
//! state of its own; it is a thin translation of
//! [`Backend`](lamina_core::backend::Backend) calls into element creation
//! and attribute updates.

#![no_std]

extern crate alloc;

pub mod svg;
