// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and property
//! management.

use alloc::vec::Vec;

use kurbo::{Rect, Vec2};

use crate::backend::Backend;
use crate::color::Rgba;

use super::id::{ClipToken, HostId, INVALID, LayerId};
use super::materialize::{Binding, ContainerKind};
use super::shadow::Shadow;
use super::traverse::Sublayers;

/// Struct-of-arrays storage for a tree of layers over a backend `B`.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer
/// occupies a slot in parallel arrays. Destroyed layers are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// The tree owns the backend: every property setter and hierarchy operation
/// synchronizes the backend immediately, so there is no separate flush or
/// commit step. Backend primitives for a layer are created lazily on first
/// need (see [`Self::is_materialized`]) and reused for the layer's lifetime.
#[derive(Debug)]
pub struct LayerTree<B: Backend> {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Properties (set by callers) --
    pub(crate) frame: Vec<Rect>,
    pub(crate) hidden: Vec<bool>,
    pub(crate) corner_radius: Vec<f64>,
    pub(crate) border_width: Vec<f64>,
    pub(crate) border_color: Vec<Option<Rgba>>,
    pub(crate) background_color: Vec<Option<Rgba>>,
    pub(crate) opacity: Vec<f32>,
    pub(crate) masks_to_bounds: Vec<bool>,
    pub(crate) shadow: Vec<Shadow>,

    // -- Host and backend linkage --
    pub(crate) host: Vec<Option<HostId>>,
    pub(crate) binding: Vec<Option<Binding<B::Primitive>>>,
    pub(crate) clip_token: Vec<ClipToken>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
    next_clip_token: u64,

    pub(crate) backend: B,
}

impl<B: Backend + Default> Default for LayerTree<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

impl<B: Backend> LayerTree<B> {
    /// Creates an empty layer tree over the given backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            frame: Vec::new(),
            hidden: Vec::new(),
            corner_radius: Vec::new(),
            border_width: Vec::new(),
            border_color: Vec::new(),
            background_color: Vec::new(),
            opacity: Vec::new(),
            masks_to_bounds: Vec::new(),
            shadow: Vec::new(),
            host: Vec::new(),
            binding: Vec::new(),
            clip_token: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            next_clip_token: 0,
            backend,
        }
    }

    /// Returns a reference to the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a mutable reference to the backend.
    ///
    /// Intended for callers that draw into a layer's content group (see
    /// [`Self::content_primitive`]); reconfiguring primitives owned by the
    /// tree itself will be overwritten by the next property setter.
    #[must_use]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // -- Allocation API --

    /// Creates a new layer and returns its handle.
    ///
    /// The layer starts bare: zero frame, not hidden, zero corner radius,
    /// zero border width, no border/background color, full opacity, no
    /// masking, a disabled shadow, no host, and no parent. Nothing is
    /// created in the backend until the layer first materializes.
    pub fn create_layer(&mut self) -> LayerId {
        let token = ClipToken(self.next_clip_token);
        self.next_clip_token += 1;

        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.frame[idx as usize] = Rect::ZERO;
            self.hidden[idx as usize] = false;
            self.corner_radius[idx as usize] = 0.0;
            self.border_width[idx as usize] = 0.0;
            self.border_color[idx as usize] = None;
            self.background_color[idx as usize] = None;
            self.opacity[idx as usize] = 1.0;
            self.masks_to_bounds[idx as usize] = false;
            self.shadow[idx as usize] = Shadow::default();
            self.host[idx as usize] = None;
            self.binding[idx as usize] = None;
            self.clip_token[idx as usize] = token;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.frame.push(Rect::ZERO);
            self.hidden.push(false);
            self.corner_radius.push(0.0);
            self.border_width.push(0.0);
            self.border_color.push(None);
            self.background_color.push(None);
            self.opacity.push(1.0);
            self.masks_to_bounds.push(false);
            self.shadow.push(Shadow::default());
            self.host.push(None);
            self.binding.push(None);
            self.clip_token.push(token);
            self.generation.push(0);
            idx
        };

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// The layer is unlinked from its superlayer (or its host surface, for a
    /// materialized hosted root) and its backend primitives are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the layer has sublayers (remove them first) or if the
    /// handle is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with sublayers"
        );

        if self.parent[idx as usize] != INVALID {
            self.detach_from_superlayer(idx);
        } else if let Some(host) = self.host[idx as usize] {
            // A hosted root lives directly in the host's element tree.
            let container = self.binding[idx as usize]
                .as_ref()
                .filter(|b| b.kind == ContainerKind::HostedRoot)
                .map(|b| b.container.clone());
            if let Some(container) = container {
                self.backend.host_remove_child(host, &container);
            }
        }

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.binding[idx as usize] = None;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Host linkage --

    /// Binds the layer to a host surface, or unbinds it with `None`.
    ///
    /// Assignment is state-only: nothing is replayed onto the host, and a
    /// layer that already materialized as a nested group keeps its existing
    /// binding. Bind the host before the first property setter that
    /// materializes the layer.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_host(&mut self, id: LayerId, host: Option<HostId>) {
        self.validate(id);
        self.host[id.idx as usize] = host;
    }

    /// Returns the layer's own host surface, if any.
    #[must_use]
    pub fn host(&self, id: LayerId) -> Option<HostId> {
        self.validate(id);
        self.host[id.idx as usize]
    }

    /// Resolves the host surface this layer renders into, walking up the
    /// superlayer chain when the layer has no host of its own.
    #[must_use]
    pub fn resolved_host(&self, id: LayerId) -> Option<HostId> {
        self.validate(id);
        let mut idx = id.idx;
        loop {
            if let Some(host) = self.host[idx as usize] {
                return Some(host);
            }
            let p = self.parent[idx as usize];
            if p == INVALID {
                return None;
            }
            idx = p;
        }
    }

    // -- Geometry --

    /// Sets the layer's frame (position and size in the superlayer's
    /// coordinate space) and repositions/resizes its own primitives.
    ///
    /// Sublayers are not repositioned; their frames are relative to this
    /// layer's origin through backend nesting. A zero-size frame is valid
    /// and renders as zero-area.
    ///
    /// On a host-bound layer that has not materialized yet, the value is
    /// only stored; materialization reads the then-current frame.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_frame(&mut self, id: LayerId, frame: Rect) {
        self.validate(id);
        let idx = id.idx;
        self.frame[idx as usize] = frame;
        if self.host[idx as usize].is_some() && self.binding[idx as usize].is_none() {
            return;
        }
        self.ensure_materialized(idx);
        self.apply_frame(idx);
    }

    /// Returns the layer's frame.
    #[must_use]
    pub fn frame(&self, id: LayerId) -> Rect {
        self.validate(id);
        self.frame[id.idx as usize]
    }

    // -- Hierarchy --

    /// Appends `child` as the last (top-most) sublayer of `parent`.
    ///
    /// A child that already has a superlayer is detached from it first, so
    /// re-adding an existing sublayer moves it to the top of the paint
    /// order. Both layers are materialized, the child's container is
    /// appended into the parent's, and the parent's border decoration is
    /// moved back above the new child.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or if `parent == child`.
    pub fn add_sublayer(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        assert!(parent != child, "cannot add a layer as its own sublayer");

        if self.parent[child.idx as usize] != INVALID {
            self.detach_from_superlayer(child.idx);
        }
        self.link_last(parent.idx, child.idx);

        self.ensure_materialized(parent.idx);
        self.ensure_materialized(child.idx);
        let parent_container = self.container_of(parent.idx);
        let child_container = self.container_of(child.idx);
        if let (Some(pc), Some(cc)) = (parent_container, child_container) {
            self.backend.append_child(&pc, &cc);
        }
        self.move_border_to_front(parent.idx);
    }

    /// Inserts `child` as a sublayer of `sibling`'s superlayer, immediately
    /// below `sibling` in the paint order.
    ///
    /// As with [`Self::add_sublayer`], a child that already has a
    /// superlayer is detached from it first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child == sibling`, or if
    /// `sibling` has no superlayer.
    pub fn insert_sublayer_before(&mut self, child: LayerId, sibling: LayerId) {
        self.validate(child);
        self.validate(sibling);
        assert!(child != sibling, "cannot insert a layer below itself");
        let p = self.parent[sibling.idx as usize];
        assert!(p != INVALID, "sibling has no superlayer");

        if self.parent[child.idx as usize] != INVALID {
            self.detach_from_superlayer(child.idx);
        }
        self.link_before(child.idx, sibling.idx);

        self.ensure_materialized(p);
        self.ensure_materialized(child.idx);
        let parent_container = self.container_of(p);
        let child_container = self.container_of(child.idx);
        let sibling_container = self.container_of(sibling.idx);
        if let (Some(pc), Some(cc), Some(sc)) =
            (parent_container, child_container, sibling_container)
        {
            self.backend.insert_before(&pc, &cc, &sc);
        }
        self.move_border_to_front(p);
    }

    /// Detaches the layer from its superlayer. No-op if it has none.
    ///
    /// The layer's own property state is preserved; re-attaching elsewhere
    /// reproduces the same visuals.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_from_superlayer(&mut self, id: LayerId) {
        self.validate(id);
        if self.parent[id.idx as usize] == INVALID {
            return;
        }
        self.detach_from_superlayer(id.idx);
    }

    /// Returns the superlayer of a layer, if any.
    #[must_use]
    pub fn superlayer(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(LayerId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Returns an iterator over the direct sublayers of a layer, in paint
    /// order (back to front).
    #[must_use]
    pub fn sublayers(&self, id: LayerId) -> Sublayers<'_, B> {
        self.validate(id);
        Sublayers::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the root layers (those with no superlayer).
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(LayerId {
                    idx,
                    generation: self.generation[idx as usize],
                });
            }
        }
        roots
    }

    // -- Visual properties --
    //
    // Each setter stores the value and re-derives the dependent backend
    // attributes from the full current state, so properties set in any
    // order converge to the same backend result. All setters panic on a
    // stale handle.

    /// Hides or shows the layer's own background and content.
    ///
    /// Sublayers and the border decoration are unaffected; hiding a layer
    /// does not hide its subtree.
    pub fn set_hidden(&mut self, id: LayerId, hidden: bool) {
        self.validate(id);
        self.hidden[id.idx as usize] = hidden;
        self.ensure_materialized(id.idx);
        let visible = !hidden;
        if let Some(b) = self.binding[id.idx as usize].as_ref() {
            let background = b.background.clone();
            let content = b.content.clone();
            self.backend.set_visible(&background, visible);
            self.backend.set_visible(&content, visible);
        }
    }

    /// Returns whether the layer is hidden.
    #[must_use]
    pub fn hidden(&self, id: LayerId) -> bool {
        self.validate(id);
        self.hidden[id.idx as usize]
    }

    /// Sets the corner rounding radius.
    ///
    /// On a host-bound layer the rounding is applied to the host surface's
    /// native facility; otherwise to the background shape. Negative values
    /// are stored and forwarded uninterpreted.
    pub fn set_corner_radius(&mut self, id: LayerId, radius: f64) {
        self.validate(id);
        self.corner_radius[id.idx as usize] = radius;
        if let Some(host) = self.host[id.idx as usize] {
            self.backend.host_set_corner_radius(host, radius);
        } else {
            self.ensure_materialized(id.idx);
            let background = self.binding[id.idx as usize]
                .as_ref()
                .map(|b| b.background.clone());
            if let Some(background) = background {
                self.backend.set_corner_radius(&background, radius);
            }
        }
    }

    /// Returns the corner rounding radius.
    #[must_use]
    pub fn corner_radius(&self, id: LayerId) -> f64 {
        self.validate(id);
        self.corner_radius[id.idx as usize]
    }

    /// Sets the border stroke width. The border decoration shows only while
    /// both the width is positive and a border color is set.
    pub fn set_border_width(&mut self, id: LayerId, width: f64) {
        self.validate(id);
        self.border_width[id.idx as usize] = width;
        self.refresh_border(id.idx);
    }

    /// Returns the border stroke width.
    #[must_use]
    pub fn border_width(&self, id: LayerId) -> f64 {
        self.validate(id);
        self.border_width[id.idx as usize]
    }

    /// Sets the border stroke color. The border decoration shows only while
    /// both the width is positive and a border color is set.
    pub fn set_border_color(&mut self, id: LayerId, color: Option<Rgba>) {
        self.validate(id);
        self.border_color[id.idx as usize] = color;
        self.refresh_border(id.idx);
    }

    /// Returns the border stroke color.
    #[must_use]
    pub fn border_color(&self, id: LayerId) -> Option<Rgba> {
        self.validate(id);
        self.border_color[id.idx as usize]
    }

    /// Sets the background fill color.
    ///
    /// `None` renders as an explicit transparent fill: the background shape
    /// still occupies its layout space.
    pub fn set_background_color(&mut self, id: LayerId, color: Option<Rgba>) {
        self.validate(id);
        self.background_color[id.idx as usize] = color;
        self.ensure_materialized(id.idx);
        let background = self.binding[id.idx as usize]
            .as_ref()
            .map(|b| b.background.clone());
        if let Some(background) = background {
            self.backend.set_fill(&background, color);
        }
    }

    /// Returns the background fill color.
    #[must_use]
    pub fn background_color(&self, id: LayerId) -> Option<Rgba> {
        self.validate(id);
        self.background_color[id.idx as usize]
    }

    /// Sets the opacity of the layer's own background and content.
    ///
    /// Sublayers and the border decoration are unaffected. The value is not
    /// clamped.
    pub fn set_opacity(&mut self, id: LayerId, opacity: f32) {
        self.validate(id);
        self.opacity[id.idx as usize] = opacity;
        self.ensure_materialized(id.idx);
        if let Some(b) = self.binding[id.idx as usize].as_ref() {
            let background = b.background.clone();
            let content = b.content.clone();
            self.backend.set_opacity(&background, opacity);
            self.backend.set_opacity(&content, opacity);
        }
    }

    /// Returns the layer's opacity.
    #[must_use]
    pub fn opacity(&self, id: LayerId) -> f32 {
        self.validate(id);
        self.opacity[id.idx as usize]
    }

    /// Enables or disables clipping of descendant content to the layer's
    /// own silhouette.
    ///
    /// Enabling creates (once) a clip region keyed by the layer's
    /// [`ClipToken`], refreshes its template shape from the current
    /// background geometry, and marks the container as clipped. Disabling
    /// is sticky: the stored flag flips back, but the backend clip
    /// reference stays in place. Re-enabling refreshes the template again.
    pub fn set_masks_to_bounds(&mut self, id: LayerId, masks: bool) {
        self.validate(id);
        self.masks_to_bounds[id.idx as usize] = masks;
        if masks {
            self.enable_mask(id.idx);
        }
    }

    /// Returns whether bounds masking is enabled.
    #[must_use]
    pub fn masks_to_bounds(&self, id: LayerId) -> bool {
        self.validate(id);
        self.masks_to_bounds[id.idx as usize]
    }

    // -- Shadow --
    //
    // A shadow is only observable on a layer bound directly to a host
    // surface; nested layers store shadow state without visual effect.

    /// Sets the base shadow color (`None` disables the shadow).
    pub fn set_shadow_color(&mut self, id: LayerId, color: Option<Rgba>) {
        self.validate(id);
        self.shadow[id.idx as usize].color = color;
        self.apply_shadow(id.idx);
    }

    /// Sets the shadow opacity factor (`0.0` disables the shadow).
    pub fn set_shadow_opacity(&mut self, id: LayerId, opacity: f32) {
        self.validate(id);
        self.shadow[id.idx as usize].opacity = opacity;
        self.apply_shadow(id.idx);
    }

    /// Sets the shadow offset.
    pub fn set_shadow_offset(&mut self, id: LayerId, offset: Vec2) {
        self.validate(id);
        self.shadow[id.idx as usize].offset = offset;
        self.apply_shadow(id.idx);
    }

    /// Sets the shadow blur radius.
    pub fn set_shadow_blur_radius(&mut self, id: LayerId, radius: f64) {
        self.validate(id);
        self.shadow[id.idx as usize].blur_radius = radius;
        self.apply_shadow(id.idx);
    }

    /// Returns the stored shadow property group.
    #[must_use]
    pub fn shadow(&self, id: LayerId) -> Shadow {
        self.validate(id);
        self.shadow[id.idx as usize]
    }

    // -- Backend binding queries --

    /// Returns whether backend primitives exist for this layer.
    #[must_use]
    pub fn is_materialized(&self, id: LayerId) -> bool {
        self.validate(id);
        self.binding[id.idx as usize].is_some()
    }

    /// Returns which container variant the layer materialized as, if it has.
    #[must_use]
    pub fn container_kind(&self, id: LayerId) -> Option<ContainerKind> {
        self.validate(id);
        self.binding[id.idx as usize].as_ref().map(|b| b.kind)
    }

    /// Returns the layer's root container primitive, if materialized.
    #[must_use]
    pub fn container_primitive(&self, id: LayerId) -> Option<&B::Primitive> {
        self.validate(id);
        self.binding[id.idx as usize].as_ref().map(|b| &b.container)
    }

    /// Returns the layer's content group primitive, if materialized.
    ///
    /// Callers draw a layer's visible content by appending their own
    /// primitives under this group via [`Self::backend_mut`].
    #[must_use]
    pub fn content_primitive(&self, id: LayerId) -> Option<&B::Primitive> {
        self.validate(id);
        self.binding[id.idx as usize].as_ref().map(|b| &b.content)
    }

    /// Returns the token that keys this layer's clip region in the backend.
    #[must_use]
    pub fn clip_token(&self, id: LayerId) -> ClipToken {
        self.validate(id);
        self.clip_token[id.idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Returns a clone of the container primitive at slot `idx`, if bound.
    pub(crate) fn container_of(&self, idx: u32) -> Option<B::Primitive> {
        self.binding[idx as usize].as_ref().map(|b| b.container.clone())
    }

    /// Appends `child` to the end of `parent`'s child list (links only).
    fn link_last(&mut self, parent: u32, child: u32) {
        self.parent[child as usize] = parent;
        self.prev_sibling[child as usize] = INVALID;
        self.next_sibling[child as usize] = INVALID;

        if self.first_child[parent as usize] == INVALID {
            self.first_child[parent as usize] = child;
        } else {
            // Walk to last child.
            let mut last = self.first_child[parent as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = child;
            self.prev_sibling[child as usize] = last;
        }
    }

    /// Splices `child` in directly before `sibling` (links only).
    fn link_before(&mut self, child: u32, sibling: u32) {
        let p = self.parent[sibling as usize];
        self.parent[child as usize] = p;
        self.next_sibling[child as usize] = sibling;
        self.prev_sibling[child as usize] = self.prev_sibling[sibling as usize];

        if self.prev_sibling[sibling as usize] != INVALID {
            self.next_sibling[self.prev_sibling[sibling as usize] as usize] = child;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = child;
        }
        self.prev_sibling[sibling as usize] = child;
    }

    /// Removes `idx` from its parent's child list (links only).
    pub(crate) fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
