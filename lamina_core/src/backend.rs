// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for rendering integrations.
//!
//! Lamina splits rendering-target work into *backend* crates. A backend
//! provides two things:
//!
//! - **Primitives** — Opaque renderable handles (containers, shapes, groups,
//!   clip regions) that the layer tree creates once per layer and then
//!   reconfigures as properties change. The tree never inspects a primitive;
//!   it only stores handles and passes them back into the backend.
//!
//! - **Host surfaces** — Displayable objects a layer tree renders into,
//!   identified by [`HostId`]. Backends assign host IDs (e.g. one per DOM
//!   container, one per window); core passes them through uninterpreted.
//!
//! # Crate boundaries
//!
//! `lamina_core` owns the data model, the synchronization logic, and this
//! contract module. Backend crates depend on `lamina_core` and provide
//! target glue (`lamina_backend_web` maps primitives to SVG elements;
//! `lamina_scene_harness` records them in memory for tests). Application
//! code depends on both and drives the tree through
//! [`LayerTree`](crate::layer::LayerTree).
//!
//! # Attachment semantics
//!
//! Structural operations follow display-tree conventions: a primitive has at
//! most one attachment point, so [`append_child`](Backend::append_child) and
//! [`insert_before`](Backend::insert_before) first detach the child from
//! wherever it currently is (another primitive or a host surface). Removal
//! of a child that is not currently attached to the given parent is a no-op.

use kurbo::{Point, Size};

use crate::color::Rgba;
use crate::layer::{ClipToken, HostId, ShadowSpec};

/// Creates and mutates renderable primitives on behalf of a layer tree.
///
/// All operations are infallible: a backend applies each mutation
/// immediately and keeps no pending state. Implementations are expected to
/// be cheap to call per-property; the tree re-derives dependent attributes
/// eagerly on every setter.
pub trait Backend {
    /// Opaque handle to a renderable primitive.
    ///
    /// Handles are cheap to clone (an index, an id, a reference-counted
    /// element) and compare equal when they refer to the same primitive.
    type Primitive: Clone + PartialEq + core::fmt::Debug;

    // -- Primitive creation --

    /// Creates a detached root container for a layer bound to a host surface.
    fn create_surface_container(&mut self) -> Self::Primitive;

    /// Creates a detached grouping primitive with no independent sizing.
    fn create_group(&mut self) -> Self::Primitive;

    /// Creates a detached rectangular shape primitive.
    fn create_shape(&mut self) -> Self::Primitive;

    /// Creates a detached clip region named by `token`.
    ///
    /// A primitive later marked with [`set_clip`](Self::set_clip) for the
    /// same token is clipped to the union of the region's child shapes. The
    /// region itself never renders.
    fn create_clip_region(&mut self, token: ClipToken) -> Self::Primitive;

    // -- Structure --

    /// Attaches `child` as the last child of `parent`, detaching it from any
    /// current attachment point first.
    fn append_child(&mut self, parent: &Self::Primitive, child: &Self::Primitive);

    /// Attaches `child` immediately before `sibling` among `parent`'s
    /// children, detaching it from any current attachment point first.
    fn insert_before(
        &mut self,
        parent: &Self::Primitive,
        child: &Self::Primitive,
        sibling: &Self::Primitive,
    );

    /// Detaches `child` from `parent`. No-op if `child` is not currently a
    /// child of `parent`.
    fn remove_child(&mut self, parent: &Self::Primitive, child: &Self::Primitive);

    /// Returns whether `child` is currently a direct child of `parent`.
    fn contains(&self, parent: &Self::Primitive, child: &Self::Primitive) -> bool;

    /// Returns whether `child` is the last child of `parent` (`false` when
    /// `child` is not attached to `parent` at all).
    fn is_last_child(&self, parent: &Self::Primitive, child: &Self::Primitive) -> bool;

    // -- Attributes --

    /// Positions a primitive at `origin` within its parent's coordinate
    /// space.
    fn set_position(&mut self, primitive: &Self::Primitive, origin: Point);

    /// Sizes a primitive.
    fn set_size(&mut self, primitive: &Self::Primitive, size: Size);

    /// Fills a shape with a solid color. `None` is an *explicit* transparent
    /// fill, not an absent one: the shape still occupies layout space.
    fn set_fill(&mut self, primitive: &Self::Primitive, fill: Option<Rgba>);

    /// Sets a primitive's opacity (`0.0` transparent, `1.0` opaque).
    fn set_opacity(&mut self, primitive: &Self::Primitive, opacity: f32);

    /// Shows or hides a primitive. Hiding does not detach it.
    fn set_visible(&mut self, primitive: &Self::Primitive, visible: bool);

    /// Sets a shape's corner rounding radius.
    fn set_corner_radius(&mut self, primitive: &Self::Primitive, radius: f64);

    /// Strokes a primitive's outline. Applied to a group, the stroke is
    /// inherited by the group's shape children.
    fn set_stroke(&mut self, primitive: &Self::Primitive, width: f64, color: Rgba);

    /// Marks a primitive as clipped by the region named `token`.
    ///
    /// There is no unset operation; a clip reference stays in place for the
    /// primitive's lifetime.
    fn set_clip(&mut self, primitive: &Self::Primitive, token: ClipToken);

    // -- Host surfaces --

    /// Returns the number of children currently attached to `host`'s native
    /// element tree.
    fn host_child_count(&self, host: HostId) -> usize;

    /// Attaches `child` as the last child of `host`'s native element tree.
    fn host_append(&mut self, host: HostId, child: &Self::Primitive);

    /// Attaches `child` as the *first* child of `host`'s native element
    /// tree, below any host-native chrome appended after it.
    fn host_prepend(&mut self, host: HostId, child: &Self::Primitive);

    /// Detaches `child` from `host`. No-op if `child` is not currently a
    /// child of `host`.
    fn host_remove_child(&mut self, host: HostId, child: &Self::Primitive);

    /// Sets the corner rounding of the host surface itself.
    fn host_set_corner_radius(&mut self, host: HostId, radius: f64);

    /// Applies or clears the host surface's drop shadow.
    fn host_set_shadow(&mut self, host: HostId, shadow: Option<ShadowSpec>);
}

/// A backend that discards every scene mutation.
///
/// Layer state, topology, and materialization bookkeeping remain fully
/// functional over this backend, which makes it useful for layout-only
/// trees and for unit tests that do not assert on backend output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl Headless {
    /// Creates a headless backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Backend for Headless {
    type Primitive = ();

    fn create_surface_container(&mut self) -> Self::Primitive {}

    fn create_group(&mut self) -> Self::Primitive {}

    fn create_shape(&mut self) -> Self::Primitive {}

    fn create_clip_region(&mut self, _token: ClipToken) -> Self::Primitive {}

    fn append_child(&mut self, _parent: &Self::Primitive, _child: &Self::Primitive) {}

    fn insert_before(
        &mut self,
        _parent: &Self::Primitive,
        _child: &Self::Primitive,
        _sibling: &Self::Primitive,
    ) {
    }

    fn remove_child(&mut self, _parent: &Self::Primitive, _child: &Self::Primitive) {}

    fn contains(&self, _parent: &Self::Primitive, _child: &Self::Primitive) -> bool {
        false
    }

    fn is_last_child(&self, _parent: &Self::Primitive, _child: &Self::Primitive) -> bool {
        false
    }

    fn set_position(&mut self, _primitive: &Self::Primitive, _origin: Point) {}

    fn set_size(&mut self, _primitive: &Self::Primitive, _size: Size) {}

    fn set_fill(&mut self, _primitive: &Self::Primitive, _fill: Option<Rgba>) {}

    fn set_opacity(&mut self, _primitive: &Self::Primitive, _opacity: f32) {}

    fn set_visible(&mut self, _primitive: &Self::Primitive, _visible: bool) {}

    fn set_corner_radius(&mut self, _primitive: &Self::Primitive, _radius: f64) {}

    fn set_stroke(&mut self, _primitive: &Self::Primitive, _width: f64, _color: Rgba) {}

    fn set_clip(&mut self, _primitive: &Self::Primitive, _token: ClipToken) {}

    fn host_child_count(&self, _host: HostId) -> usize {
        0
    }

    fn host_append(&mut self, _host: HostId, _child: &Self::Primitive) {}

    fn host_prepend(&mut self, _host: HostId, _child: &Self::Primitive) {}

    fn host_remove_child(&mut self, _host: HostId, _child: &Self::Primitive) {}

    fn host_set_corner_radius(&mut self, _host: HostId, _radius: f64) {}

    fn host_set_shadow(&mut self, _host: HostId, _shadow: Option<ShadowSpec>) {}
}
