// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy backend materialization and per-property synchronization.
//!
//! A layer's backend primitives are created exactly once, on the first
//! operation that needs them, by [`LayerTree::ensure_materialized`]. The
//! shape of the binding is the same for every layer:
//!
//! ```text
//!   container (HostedRoot: sized surface inserted into the host,
//!              NestedGroup: plain group appended into the superlayer)
//!   ├── background   rectangular fill shape
//!   ├── content      group for caller-drawn content
//!   ├── [clip region + template shape]   after bounds masking is enabled
//!   └── border group ── border shape     decoration, kept top-most
//! ```
//!
//! After materialization, every property setter re-derives the affected
//! attributes from the layer's full stored state. Replaying a setter is
//! therefore always safe, and the backend result is independent of the
//! order in which unrelated properties were assigned.

use crate::backend::Backend;

use super::tree::LayerTree;

/// Which container variant a layer materialized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    /// A sized surface container inserted directly into a host surface.
    HostedRoot,
    /// A plain grouping primitive nested in the superlayer's container.
    NestedGroup,
}

/// The backend primitives bound to one layer.
///
/// Created as a unit by materialization; the clip pair is added later, the
/// first time bounds masking is enabled.
#[derive(Debug)]
pub(crate) struct Binding<P> {
    pub(crate) kind: ContainerKind,
    pub(crate) container: P,
    pub(crate) background: P,
    pub(crate) content: P,
    pub(crate) border_group: P,
    pub(crate) border_shape: P,
    pub(crate) clip: Option<ClipBinding<P>>,
}

/// A layer's clip region and the template shape inside it.
#[derive(Debug)]
pub(crate) struct ClipBinding<P> {
    pub(crate) region: P,
    pub(crate) template: P,
}

impl<B: Backend> LayerTree<B> {
    /// Creates the backend primitives for slot `idx` if they do not exist.
    ///
    /// The only branch between the hosted-root and nested-group variants is
    /// here: which container primitive is created, and whether it is sized
    /// and inserted into the host. Everything else is shared.
    pub(crate) fn ensure_materialized(&mut self, idx: u32) {
        if self.binding[idx as usize].is_some() {
            return;
        }

        let own_host = self.host[idx as usize];
        let (kind, container) = match own_host {
            Some(_) => (
                ContainerKind::HostedRoot,
                self.backend.create_surface_container(),
            ),
            None => (ContainerKind::NestedGroup, self.backend.create_group()),
        };
        let background = self.backend.create_shape();
        let content = self.backend.create_group();
        let border_group = self.backend.create_group();
        let border_shape = self.backend.create_shape();
        self.backend.set_fill(&border_shape, None);
        self.backend.append_child(&border_group, &border_shape);

        // Replay the fill stored before the binding existed; `None` still
        // becomes an explicit transparent fill.
        self.backend
            .set_fill(&background, self.background_color[idx as usize]);
        self.backend.append_child(&container, &background);
        self.backend.append_child(&container, &content);

        if let Some(host) = own_host {
            // A hosted root owns its size, and its frame may have been
            // assigned while the binding was still deferred.
            let size = self.frame[idx as usize].size();
            self.backend.set_size(&container, size);
            self.backend.set_size(&background, size);
            self.backend.set_size(&content, size);
            // First child of the host, so host-native chrome appended
            // afterwards renders on top; append when the host is empty.
            if self.backend.host_child_count(host) == 0 {
                self.backend.host_append(host, &container);
            } else {
                self.backend.host_prepend(host, &container);
            }
        }

        self.binding[idx as usize] = Some(Binding {
            kind,
            container,
            background,
            content,
            border_group,
            border_shape,
            clip: None,
        });
    }

    /// Pushes the stored frame into every frame-dependent primitive.
    pub(crate) fn apply_frame(&mut self, idx: u32) {
        let Some(b) = self.binding[idx as usize].as_ref() else {
            return;
        };
        let container = b.container.clone();
        let background = b.background.clone();
        let content = b.content.clone();

        let frame = self.frame[idx as usize];
        self.backend.set_position(&container, frame.origin());
        self.backend.set_size(&container, frame.size());
        self.backend.set_size(&background, frame.size());
        self.backend.set_size(&content, frame.size());
        self.sync_border_shape(idx);
        self.sync_clip_template(idx);
    }

    /// Re-derives the border decoration from the stored width and color.
    ///
    /// Active (positive width and a color): the border shape is re-matched
    /// to the background's geometry, the group is stroked, shown, and moved
    /// to the top of the container. Inactive: the group is hidden in place.
    pub(crate) fn refresh_border(&mut self, idx: u32) {
        self.ensure_materialized(idx);
        let Some(b) = self.binding[idx as usize].as_ref() else {
            return;
        };
        let container = b.container.clone();
        let border_group = b.border_group.clone();

        let width = self.border_width[idx as usize];
        match self.border_color[idx as usize] {
            Some(color) if width > 0.0 => {
                self.sync_border_shape(idx);
                self.backend.set_stroke(&border_group, width, color);
                self.backend.set_visible(&border_group, true);
                self.backend.append_child(&container, &border_group);
            }
            _ => {
                self.backend.set_visible(&border_group, false);
            }
        }
    }

    /// Re-asserts the border-on-top invariant: if the border group is not
    /// the last child of the container, detach and re-append it.
    ///
    /// Runs after every sublayer insertion, since a newly appended child
    /// container would otherwise render above the border.
    pub(crate) fn move_border_to_front(&mut self, idx: u32) {
        let Some(b) = self.binding[idx as usize].as_ref() else {
            return;
        };
        let container = b.container.clone();
        let border_group = b.border_group.clone();

        if !self.backend.is_last_child(&container, &border_group) {
            if self.backend.contains(&container, &border_group) {
                self.backend.remove_child(&container, &border_group);
            }
            self.backend.append_child(&container, &border_group);
        }
    }

    /// Applies bounds masking: creates the clip region (once), refreshes
    /// its template from current geometry, and clips the container by the
    /// layer's token.
    pub(crate) fn enable_mask(&mut self, idx: u32) {
        self.ensure_materialized(idx);
        let token = self.clip_token[idx as usize];

        if self.binding[idx as usize]
            .as_ref()
            .is_some_and(|b| b.clip.is_none())
        {
            let region = self.backend.create_clip_region(token);
            let template = self.backend.create_shape();
            self.backend.append_child(&region, &template);
            if let Some(b) = self.binding[idx as usize].as_mut() {
                b.clip = Some(ClipBinding { region, template });
            }
        }

        let Some(b) = self.binding[idx as usize].as_ref() else {
            return;
        };
        let container = b.container.clone();
        let Some(region) = b.clip.as_ref().map(|c| c.region.clone()) else {
            return;
        };
        self.sync_clip_template(idx);
        self.backend.append_child(&container, &region);
        self.backend.set_clip(&container, token);
    }

    /// Pushes the effective shadow onto the layer's own host, if it has
    /// one. Nested layers have no observable shadow.
    pub(crate) fn apply_shadow(&mut self, idx: u32) {
        if let Some(host) = self.host[idx as usize] {
            let spec = self.shadow[idx as usize].effective();
            self.backend.host_set_shadow(host, spec);
        }
    }

    /// Unlinks slot `idx` from its superlayer, including the backend edge
    /// when both sides are bound and actually linked.
    pub(crate) fn detach_from_superlayer(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let parent_container = self.container_of(p);
        let child_container = self.container_of(idx);
        if let (Some(pc), Some(cc)) = (parent_container, child_container) {
            if self.backend.contains(&pc, &cc) {
                self.backend.remove_child(&pc, &cc);
            }
        }
        self.unlink_from_parent(idx);
    }

    /// Matches the border shape to the background's current geometry.
    fn sync_border_shape(&mut self, idx: u32) {
        let Some(shape) = self.binding[idx as usize]
            .as_ref()
            .map(|b| b.border_shape.clone())
        else {
            return;
        };
        let size = self.frame[idx as usize].size();
        let radius = self.silhouette_radius(idx);
        self.backend.set_size(&shape, size);
        self.backend.set_corner_radius(&shape, radius);
    }

    /// Matches the clip template to the background's current geometry, when
    /// a clip binding exists.
    fn sync_clip_template(&mut self, idx: u32) {
        let Some(template) = self.binding[idx as usize]
            .as_ref()
            .and_then(|b| b.clip.as_ref())
            .map(|c| c.template.clone())
        else {
            return;
        };
        let size = self.frame[idx as usize].size();
        let radius = self.silhouette_radius(idx);
        self.backend.set_size(&template, size);
        self.backend.set_corner_radius(&template, radius);
    }

    /// The rounding the background shape carries: zero for host-bound
    /// layers (their rounding lives on the host surface), the stored corner
    /// radius otherwise.
    fn silhouette_radius(&self, idx: u32) -> f64 {
        if self.host[idx as usize].is_some() {
            0.0
        } else {
            self.corner_radius[idx as usize]
        }
    }
}
