// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory recording backend for tests and demos.
//!
//! [`Scene`] implements [`Backend`] by recording every primitive and every
//! attribute mutation as plain data. Tests build a
//! [`LayerTree`](lamina_core::layer::LayerTree) over a [`Scene`] and assert
//! on what was recorded: which primitives exist, how they are nested, and
//! which attributes they ended up with. Demos use it as a stand-in renderer
//! when no real target is available.
//!
//! Two [`Scene`]s compare equal when they recorded the same primitives in
//! the same creation order with the same final state, which makes
//! convergence assertions across different command sequences one-liners.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Size};

use lamina_core::backend::Backend;
use lamina_core::color::Rgba;
use lamina_core::layer::{ClipToken, HostId, ShadowSpec};

/// Handle to a primitive recorded in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimId(u32);

impl PrimId {
    /// The plain index of this primitive within its scene.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// The primitive vocabulary a [`Scene`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimKind {
    /// Root container of a layer bound directly to a host surface.
    SurfaceContainer,
    /// Grouping primitive with no independent sizing.
    Group,
    /// Rectangular shape.
    Shape,
    /// Non-rendering region that clips primitives referencing its token.
    ClipRegion,
}

/// Recorded fill state of a primitive.
///
/// Keeps a fill that was never assigned distinguishable from one explicitly
/// set to transparent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Fill {
    /// No fill was ever recorded.
    #[default]
    Unset,
    /// An explicit transparent fill.
    Transparent,
    /// A solid color fill.
    Color(Rgba),
}

/// Everything recorded about one primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimState {
    /// Which kind of primitive this is.
    pub kind: PrimKind,
    /// The token naming this clip region; `None` for every other kind.
    pub region_token: Option<ClipToken>,
    /// Attached children, in paint order.
    pub children: Vec<PrimId>,
    /// Last recorded position, if any.
    pub position: Option<Point>,
    /// Last recorded size, if any.
    pub size: Option<Size>,
    /// Last recorded fill.
    pub fill: Fill,
    /// Last recorded opacity, if any.
    pub opacity: Option<f32>,
    /// Visibility; primitives start visible.
    pub visible: bool,
    /// Last recorded corner radius, if any.
    pub corner_radius: Option<f64>,
    /// Last recorded stroke width and color, if any.
    pub stroke: Option<(f64, Rgba)>,
    /// Token of the clip region this primitive is clipped by, if any.
    pub clip: Option<ClipToken>,
}

impl PrimState {
    fn new(kind: PrimKind, region_token: Option<ClipToken>) -> Self {
        Self {
            kind,
            region_token,
            children: Vec::new(),
            position: None,
            size: None,
            fill: Fill::Unset,
            opacity: None,
            visible: true,
            corner_radius: None,
            stroke: None,
            clip: None,
        }
    }
}

/// Everything recorded about one host surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostState {
    /// Attached children, in paint order.
    pub children: Vec<PrimId>,
    /// Last recorded host corner radius, if any.
    pub corner_radius: Option<f64>,
    /// Currently applied shadow; `None` when cleared or never set.
    pub shadow: Option<ShadowSpec>,
}

/// A backend that records every mutation as inspectable data.
///
/// Hosts are minted with [`Scene::create_host`]; primitives come from the
/// [`Backend`] creation methods. Structural operations follow display-tree
/// conventions: attaching a primitive detaches it from wherever it was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    prims: Vec<PrimState>,
    hosts: Vec<HostState>,
    next_prim: u32,
    next_host: u32,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prims: Vec::new(),
            hosts: Vec::new(),
            next_prim: 0,
            next_host: 0,
        }
    }

    /// Creates a host surface and returns its id.
    pub fn create_host(&mut self) -> HostId {
        let id = HostId(self.next_host);
        self.next_host += 1;
        self.hosts.push(HostState::default());
        id
    }

    /// Returns the recorded state of a primitive.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this scene.
    #[must_use]
    pub fn prim(&self, id: PrimId) -> &PrimState {
        &self.prims[id.0 as usize]
    }

    /// Returns the recorded state of a host surface.
    ///
    /// # Panics
    ///
    /// Panics if `host` was not created by this scene.
    #[must_use]
    pub fn host(&self, host: HostId) -> &HostState {
        &self.hosts[host.0 as usize]
    }

    /// Returns how many primitives have been created so far.
    #[must_use]
    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }

    /// Iterates over every recorded primitive, in creation order.
    pub fn prims(&self) -> impl Iterator<Item = (PrimId, &PrimState)> {
        (0..self.next_prim).map(PrimId).zip(self.prims.iter())
    }

    /// Returns the primitive `child` is currently attached under, if any.
    #[must_use]
    pub fn parent_of(&self, child: PrimId) -> Option<PrimId> {
        self.prims()
            .find(|(_, p)| p.children.contains(&child))
            .map(|(id, _)| id)
    }

    fn create(&mut self, kind: PrimKind, region_token: Option<ClipToken>) -> PrimId {
        let id = PrimId(self.next_prim);
        self.next_prim += 1;
        self.prims.push(PrimState::new(kind, region_token));
        id
    }

    /// Detaches `child` from whatever primitive or host currently holds it.
    fn detach(&mut self, child: PrimId) {
        for prim in &mut self.prims {
            prim.children.retain(|c| *c != child);
        }
        for host in &mut self.hosts {
            host.children.retain(|c| *c != child);
        }
    }
}

impl Backend for Scene {
    type Primitive = PrimId;

    fn create_surface_container(&mut self) -> Self::Primitive {
        self.create(PrimKind::SurfaceContainer, None)
    }

    fn create_group(&mut self) -> Self::Primitive {
        self.create(PrimKind::Group, None)
    }

    fn create_shape(&mut self) -> Self::Primitive {
        self.create(PrimKind::Shape, None)
    }

    fn create_clip_region(&mut self, token: ClipToken) -> Self::Primitive {
        self.create(PrimKind::ClipRegion, Some(token))
    }

    fn append_child(&mut self, parent: &Self::Primitive, child: &Self::Primitive) {
        self.detach(*child);
        self.prims[parent.0 as usize].children.push(*child);
    }

    fn insert_before(
        &mut self,
        parent: &Self::Primitive,
        child: &Self::Primitive,
        sibling: &Self::Primitive,
    ) {
        self.detach(*child);
        let children = &mut self.prims[parent.0 as usize].children;
        match children.iter().position(|c| c == sibling) {
            Some(at) => children.insert(at, *child),
            // Detached sibling: fall back to plain append.
            None => children.push(*child),
        }
    }

    fn remove_child(&mut self, parent: &Self::Primitive, child: &Self::Primitive) {
        self.prims[parent.0 as usize].children.retain(|c| c != child);
    }

    fn contains(&self, parent: &Self::Primitive, child: &Self::Primitive) -> bool {
        self.prims[parent.0 as usize].children.contains(child)
    }

    fn is_last_child(&self, parent: &Self::Primitive, child: &Self::Primitive) -> bool {
        self.prims[parent.0 as usize].children.last() == Some(child)
    }

    fn set_position(&mut self, primitive: &Self::Primitive, origin: Point) {
        self.prims[primitive.0 as usize].position = Some(origin);
    }

    fn set_size(&mut self, primitive: &Self::Primitive, size: Size) {
        self.prims[primitive.0 as usize].size = Some(size);
    }

    fn set_fill(&mut self, primitive: &Self::Primitive, fill: Option<Rgba>) {
        self.prims[primitive.0 as usize].fill = match fill {
            Some(color) => Fill::Color(color),
            None => Fill::Transparent,
        };
    }

    fn set_opacity(&mut self, primitive: &Self::Primitive, opacity: f32) {
        self.prims[primitive.0 as usize].opacity = Some(opacity);
    }

    fn set_visible(&mut self, primitive: &Self::Primitive, visible: bool) {
        self.prims[primitive.0 as usize].visible = visible;
    }

    fn set_corner_radius(&mut self, primitive: &Self::Primitive, radius: f64) {
        self.prims[primitive.0 as usize].corner_radius = Some(radius);
    }

    fn set_stroke(&mut self, primitive: &Self::Primitive, width: f64, color: Rgba) {
        self.prims[primitive.0 as usize].stroke = Some((width, color));
    }

    fn set_clip(&mut self, primitive: &Self::Primitive, token: ClipToken) {
        self.prims[primitive.0 as usize].clip = Some(token);
    }

    fn host_child_count(&self, host: HostId) -> usize {
        self.hosts[host.0 as usize].children.len()
    }

    fn host_append(&mut self, host: HostId, child: &Self::Primitive) {
        self.detach(*child);
        self.hosts[host.0 as usize].children.push(*child);
    }

    fn host_prepend(&mut self, host: HostId, child: &Self::Primitive) {
        self.detach(*child);
        self.hosts[host.0 as usize].children.insert(0, *child);
    }

    fn host_remove_child(&mut self, host: HostId, child: &Self::Primitive) {
        self.hosts[host.0 as usize].children.retain(|c| c != child);
    }

    fn host_set_corner_radius(&mut self, host: HostId, radius: f64) {
        self.hosts[host.0 as usize].corner_radius = Some(radius);
    }

    fn host_set_shadow(&mut self, host: HostId, shadow: Option<ShadowSpec>) {
        self.hosts[host.0 as usize].shadow = shadow;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{Rect, Vec2};

    use lamina_core::layer::{LayerId, LayerTree};

    use super::*;

    fn tree() -> LayerTree<Scene> {
        LayerTree::new(Scene::new())
    }

    fn container(tree: &LayerTree<Scene>, id: LayerId) -> PrimId {
        *tree.container_primitive(id).expect("layer is materialized")
    }

    fn content(tree: &LayerTree<Scene>, id: LayerId) -> PrimId {
        *tree.content_primitive(id).expect("layer is materialized")
    }

    /// The background shape is always the first child of the container.
    fn background(tree: &LayerTree<Scene>, id: LayerId) -> PrimId {
        tree.backend().prim(container(tree, id)).children[0]
    }

    /// The border group is appended last whenever it is (re)attached.
    fn border_group(tree: &LayerTree<Scene>, id: LayerId) -> PrimId {
        *tree
            .backend()
            .prim(container(tree, id))
            .children
            .last()
            .expect("container has children")
    }

    // -- Scene behavior on its own --

    #[test]
    fn append_detaches_from_previous_parent() {
        let mut scene = Scene::new();
        let a = scene.create_group();
        let b = scene.create_group();
        let child = scene.create_shape();

        scene.append_child(&a, &child);
        scene.append_child(&b, &child);

        assert!(!scene.contains(&a, &child));
        assert!(scene.contains(&b, &child));
        assert_eq!(scene.parent_of(child), Some(b));
    }

    #[test]
    fn insert_before_places_child_at_sibling_position() {
        let mut scene = Scene::new();
        let parent = scene.create_group();
        let first = scene.create_shape();
        let last = scene.create_shape();
        let mid = scene.create_shape();

        scene.append_child(&parent, &first);
        scene.append_child(&parent, &last);
        scene.insert_before(&parent, &mid, &last);

        assert_eq!(scene.prim(parent).children, vec![first, mid, last]);
    }

    #[test]
    fn insert_before_with_detached_sibling_appends() {
        let mut scene = Scene::new();
        let parent = scene.create_group();
        let child = scene.create_shape();
        let loose = scene.create_shape();

        scene.insert_before(&parent, &child, &loose);

        assert_eq!(scene.prim(parent).children, vec![child]);
    }

    #[test]
    fn remove_child_tolerates_non_children() {
        let mut scene = Scene::new();
        let parent = scene.create_group();
        let loose = scene.create_shape();

        scene.remove_child(&parent, &loose);

        assert!(scene.prim(parent).children.is_empty());
    }

    #[test]
    fn is_last_child_is_false_when_not_attached() {
        let mut scene = Scene::new();
        let parent = scene.create_group();
        let loose = scene.create_shape();
        assert!(!scene.is_last_child(&parent, &loose));
    }

    #[test]
    fn host_prepend_puts_child_first() {
        let mut scene = Scene::new();
        let host = scene.create_host();
        let a = scene.create_surface_container();
        let b = scene.create_surface_container();

        scene.host_append(host, &a);
        scene.host_prepend(host, &b);

        assert_eq!(scene.host(host).children, vec![b, a]);
        assert_eq!(scene.host_child_count(host), 2);
    }

    #[test]
    fn host_attachment_detaches_from_other_hosts() {
        let mut scene = Scene::new();
        let host_a = scene.create_host();
        let host_b = scene.create_host();
        let c = scene.create_surface_container();

        scene.host_append(host_a, &c);
        scene.host_prepend(host_b, &c);

        assert!(scene.host(host_a).children.is_empty());
        assert_eq!(scene.host(host_b).children, vec![c]);
    }

    #[test]
    fn fill_distinguishes_unset_from_transparent() {
        let mut scene = Scene::new();
        let a = scene.create_shape();
        let b = scene.create_shape();

        scene.set_fill(&b, None);

        assert_eq!(scene.prim(a).fill, Fill::Unset);
        assert_eq!(scene.prim(b).fill, Fill::Transparent);
    }

    // -- Materialization structure --

    #[test]
    fn materialization_builds_container_background_and_content() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_background_color(id, Some(Rgba::RED));

        let scene = tree.backend();
        let cont = container(&tree, id);
        assert_eq!(scene.prim(cont).kind, PrimKind::Group);

        let bg = background(&tree, id);
        assert_eq!(scene.prim(bg).kind, PrimKind::Shape);
        assert_eq!(scene.prim(bg).fill, Fill::Color(Rgba::RED));

        // Background paints below the content group.
        assert_eq!(scene.prim(cont).children, vec![bg, content(&tree, id)]);
    }

    #[test]
    fn repeated_setters_create_no_more_primitives() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_background_color(id, Some(Rgba::RED));
        let count = tree.backend().prim_count();

        tree.set_background_color(id, Some(Rgba::BLUE));
        tree.set_opacity(id, 0.5);
        tree.set_frame(id, Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.set_frame(id, Rect::new(0.0, 0.0, 20.0, 20.0));
        tree.set_hidden(id, true);

        assert_eq!(tree.backend().prim_count(), count);
    }

    #[test]
    fn hosted_materialization_reads_the_deferred_frame() {
        let mut tree = tree();
        let host = tree.backend_mut().create_host();
        let id = tree.create_layer();
        tree.set_host(id, Some(host));
        tree.set_frame(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(tree.backend().prim_count(), 0, "frame assignment deferred");

        tree.set_background_color(id, Some(Rgba::WHITE));

        let scene = tree.backend();
        let cont = container(&tree, id);
        assert_eq!(scene.prim(cont).kind, PrimKind::SurfaceContainer);
        assert_eq!(scene.prim(cont).size, Some(Size::new(100.0, 50.0)));
        assert_eq!(
            scene.prim(background(&tree, id)).size,
            Some(Size::new(100.0, 50.0))
        );
        assert_eq!(
            scene.prim(content(&tree, id)).size,
            Some(Size::new(100.0, 50.0))
        );
        assert_eq!(scene.host(host).children, vec![cont]);
    }

    #[test]
    fn later_hosted_roots_are_prepended() {
        let mut tree = tree();
        let host = tree.backend_mut().create_host();
        let first = tree.create_layer();
        let second = tree.create_layer();
        tree.set_host(first, Some(host));
        tree.set_host(second, Some(host));

        tree.set_background_color(first, Some(Rgba::RED));
        tree.set_background_color(second, Some(Rgba::BLUE));

        let children = &tree.backend().host(host).children;
        assert_eq!(
            *children,
            vec![container(&tree, second), container(&tree, first)]
        );
    }

    #[test]
    fn set_frame_positions_the_container_and_sizes_own_primitives() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(10.0, 20.0, 40.0, 60.0));

        let scene = tree.backend();
        let cont = container(&tree, id);
        assert_eq!(scene.prim(cont).position, Some(Point::new(10.0, 20.0)));
        assert_eq!(scene.prim(cont).size, Some(Size::new(30.0, 40.0)));
        assert_eq!(
            scene.prim(background(&tree, id)).size,
            Some(Size::new(30.0, 40.0))
        );
        assert_eq!(
            scene.prim(content(&tree, id)).size,
            Some(Size::new(30.0, 40.0))
        );
    }

    #[test]
    fn clearing_the_background_records_explicit_transparent() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_background_color(id, Some(Rgba::RED));
        tree.set_background_color(id, None);

        let bg = background(&tree, id);
        assert_eq!(tree.backend().prim(bg).fill, Fill::Transparent);
    }

    // -- Paint order --

    #[test]
    fn child_containers_stack_in_insertion_order() {
        let mut tree = tree();
        let parent = tree.create_layer();
        let b = tree.create_layer();
        let c = tree.create_layer();

        tree.add_sublayer(parent, b);
        let border = border_group(&tree, parent);
        tree.add_sublayer(parent, c);

        let cont = container(&tree, parent);
        assert_eq!(
            tree.backend().prim(cont).children,
            vec![
                background(&tree, parent),
                content(&tree, parent),
                container(&tree, b),
                container(&tree, c),
                border,
            ]
        );
    }

    #[test]
    fn border_decoration_stays_above_sublayers() {
        let mut tree = tree();
        let parent = tree.create_layer();
        tree.set_border_width(parent, 2.0);
        tree.set_border_color(parent, Some(Rgba::BLACK));
        let border = border_group(&tree, parent);
        let cont = container(&tree, parent);

        let first = tree.create_layer();
        tree.add_sublayer(parent, first);
        assert!(tree.backend().is_last_child(&cont, &border));

        let second = tree.create_layer();
        tree.add_sublayer(parent, second);
        assert!(tree.backend().is_last_child(&cont, &border));

        let third = tree.create_layer();
        tree.insert_sublayer_before(third, first);
        assert!(tree.backend().is_last_child(&cont, &border));
    }

    #[test]
    fn re_adding_a_sublayer_moves_its_container_to_the_top() {
        let mut tree = tree();
        let parent = tree.create_layer();
        let b = tree.create_layer();
        let c = tree.create_layer();

        tree.add_sublayer(parent, b);
        tree.add_sublayer(parent, c);
        tree.add_sublayer(parent, b);

        let children = &tree.backend().prim(container(&tree, parent)).children;
        let pos_b = children
            .iter()
            .position(|p| *p == container(&tree, b))
            .expect("b attached");
        let pos_c = children
            .iter()
            .position(|p| *p == container(&tree, c))
            .expect("c attached");
        assert!(pos_c < pos_b, "re-added container paints above its sibling");
        assert_eq!(
            children.iter().filter(|p| **p == container(&tree, b)).count(),
            1,
            "moved, not duplicated"
        );
    }

    #[test]
    fn insert_sublayer_before_matches_tree_order_in_the_backend() {
        let mut tree = tree();
        let parent = tree.create_layer();
        let a = tree.create_layer();
        let b = tree.create_layer();
        let c = tree.create_layer();

        tree.add_sublayer(parent, a);
        tree.add_sublayer(parent, c);
        tree.insert_sublayer_before(b, c);

        let children = &tree.backend().prim(container(&tree, parent)).children;
        let containers: Vec<PrimId> = [a, b, c].iter().map(|id| container(&tree, *id)).collect();
        let positions: Vec<usize> = containers
            .iter()
            .map(|p| children.iter().position(|q| q == p).expect("attached"))
            .collect();
        assert!(positions[0] < positions[1] && positions[1] < positions[2]);
    }

    // -- Border decoration --

    #[test]
    fn border_activation_strokes_and_shows_the_group() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(0.0, 0.0, 60.0, 40.0));
        tree.set_corner_radius(id, 5.0);
        tree.set_border_width(id, 2.0);
        tree.set_border_color(id, Some(Rgba::RED));

        let scene = tree.backend();
        let group = border_group(&tree, id);
        assert_eq!(scene.prim(group).stroke, Some((2.0, Rgba::RED)));
        assert!(scene.prim(group).visible);
        assert!(scene.is_last_child(&container(&tree, id), &group));

        let shape = scene.prim(group).children[0];
        assert_eq!(scene.prim(shape).kind, PrimKind::Shape);
        assert_eq!(scene.prim(shape).size, Some(Size::new(60.0, 40.0)));
        assert_eq!(scene.prim(shape).corner_radius, Some(5.0));
        assert_eq!(scene.prim(shape).fill, Fill::Transparent);
    }

    #[test]
    fn border_deactivation_hides_the_group_in_place() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_border_width(id, 2.0);
        tree.set_border_color(id, Some(Rgba::RED));
        let group = border_group(&tree, id);

        tree.set_border_width(id, 0.0);

        let scene = tree.backend();
        assert!(!scene.prim(group).visible);
        assert!(
            scene.contains(&container(&tree, id), &group),
            "hidden, not detached"
        );
        assert!(scene.prim(container(&tree, id)).visible);
    }

    #[test]
    fn border_geometry_tracks_frame_changes() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_border_width(id, 1.0);
        tree.set_border_color(id, Some(Rgba::BLACK));
        let group = border_group(&tree, id);
        let shape = tree.backend().prim(group).children[0];

        tree.set_frame(id, Rect::new(0.0, 0.0, 200.0, 80.0));

        assert_eq!(
            tree.backend().prim(shape).size,
            Some(Size::new(200.0, 80.0))
        );
    }

    // -- Corner rounding --

    #[test]
    fn hosted_rounding_stays_on_the_host_surface() {
        let mut tree = tree();
        let host = tree.backend_mut().create_host();
        let id = tree.create_layer();
        tree.set_host(id, Some(host));
        tree.set_corner_radius(id, 8.0);
        tree.set_border_width(id, 2.0);
        tree.set_border_color(id, Some(Rgba::BLACK));

        let scene = tree.backend();
        assert_eq!(scene.host(host).corner_radius, Some(8.0));
        let shape = scene.prim(border_group(&tree, id)).children[0];
        assert_eq!(
            scene.prim(shape).corner_radius,
            Some(0.0),
            "host-bound silhouette is square at the primitive level"
        );
    }

    #[test]
    fn nested_rounding_lands_on_background_and_border() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_corner_radius(id, 8.0);
        tree.set_border_width(id, 2.0);
        tree.set_border_color(id, Some(Rgba::BLACK));

        let scene = tree.backend();
        assert_eq!(scene.prim(background(&tree, id)).corner_radius, Some(8.0));
        let shape = scene.prim(border_group(&tree, id)).children[0];
        assert_eq!(scene.prim(shape).corner_radius, Some(8.0));
    }

    // -- Visibility and opacity scope --

    #[test]
    fn hiding_affects_only_own_background_and_content() {
        let mut tree = tree();
        let parent = tree.create_layer();
        let child = tree.create_layer();
        tree.set_border_width(parent, 1.0);
        tree.set_border_color(parent, Some(Rgba::BLACK));
        tree.add_sublayer(parent, child);

        tree.set_hidden(parent, true);

        let scene = tree.backend();
        assert!(!scene.prim(background(&tree, parent)).visible);
        assert!(!scene.prim(content(&tree, parent)).visible);
        assert!(scene.prim(border_group(&tree, parent)).visible);
        assert!(scene.prim(container(&tree, child)).visible);
        assert!(scene.prim(container(&tree, parent)).visible);
    }

    #[test]
    fn opacity_spans_background_and_content_only() {
        let mut tree = tree();
        let parent = tree.create_layer();
        let child = tree.create_layer();
        tree.add_sublayer(parent, child);

        tree.set_opacity(parent, 0.4);

        let scene = tree.backend();
        assert_eq!(scene.prim(background(&tree, parent)).opacity, Some(0.4));
        assert_eq!(scene.prim(content(&tree, parent)).opacity, Some(0.4));
        assert_eq!(scene.prim(container(&tree, parent)).opacity, None);
        assert_eq!(scene.prim(container(&tree, child)).opacity, None);
    }

    // -- Bounds masking --

    #[test]
    fn masking_creates_one_region_keyed_by_the_layer_token() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        tree.set_masks_to_bounds(id, true);

        let scene = tree.backend();
        let token = tree.clip_token(id);
        let regions: Vec<PrimId> = scene
            .prims()
            .filter(|(_, p)| p.kind == PrimKind::ClipRegion)
            .map(|(p, _)| p)
            .collect();
        assert_eq!(regions.len(), 1);
        assert_eq!(scene.prim(regions[0]).region_token, Some(token));

        let cont = container(&tree, id);
        assert_eq!(scene.prim(cont).clip, Some(token));
        assert!(scene.contains(&cont, &regions[0]));
        assert_eq!(
            scene.prims().filter(|(_, p)| p.clip.is_some()).count(),
            1,
            "no other primitive references the region"
        );

        let template = scene.prim(regions[0]).children[0];
        assert_eq!(scene.prim(template).size, Some(Size::new(100.0, 50.0)));
        assert_eq!(scene.prim(template).corner_radius, Some(0.0));
    }

    #[test]
    fn repeated_masking_reuses_the_region() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_masks_to_bounds(id, true);
        let count = tree.backend().prim_count();

        tree.set_frame(id, Rect::new(0.0, 0.0, 80.0, 30.0));
        tree.set_masks_to_bounds(id, true);

        let scene = tree.backend();
        assert_eq!(scene.prim_count(), count);
        let (_, region) = scene
            .prims()
            .find(|(_, p)| p.kind == PrimKind::ClipRegion)
            .expect("region exists");
        assert_eq!(
            scene.prim(region.children[0]).size,
            Some(Size::new(80.0, 30.0))
        );
    }

    #[test]
    fn disabling_the_mask_leaves_the_backend_clip_in_place() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        tree.set_masks_to_bounds(id, true);
        tree.set_masks_to_bounds(id, false);

        let scene = tree.backend();
        let cont = container(&tree, id);
        assert_eq!(scene.prim(cont).clip, Some(tree.clip_token(id)));

        // The applied clip keeps tracking geometry while the flag is off.
        tree.set_frame(id, Rect::new(0.0, 0.0, 120.0, 60.0));
        let scene = tree.backend();
        let (_, region) = scene
            .prims()
            .find(|(_, p)| p.kind == PrimKind::ClipRegion)
            .expect("region exists");
        assert_eq!(
            scene.prim(region.children[0]).size,
            Some(Size::new(120.0, 60.0))
        );
    }

    #[test]
    fn rounded_masking_copies_the_silhouette_radius() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        tree.set_corner_radius(id, 12.0);
        tree.set_masks_to_bounds(id, true);

        let scene = tree.backend();
        let (_, region) = scene
            .prims()
            .find(|(_, p)| p.kind == PrimKind::ClipRegion)
            .expect("region exists");
        assert_eq!(scene.prim(region.children[0]).corner_radius, Some(12.0));
    }

    // -- Shadows --

    #[test]
    fn shadow_activates_once_color_and_opacity_are_both_set() {
        let mut tree = tree();
        let host = tree.backend_mut().create_host();
        let id = tree.create_layer();
        tree.set_host(id, Some(host));

        tree.set_shadow_opacity(id, 0.5);
        assert_eq!(tree.backend().host(host).shadow, None, "no color yet");

        tree.set_shadow_color(id, Some(Rgba::BLACK));
        tree.set_shadow_offset(id, Vec2::new(0.0, -3.0));
        tree.set_shadow_blur_radius(id, 3.0);

        let spec = tree.backend().host(host).shadow.expect("shadow active");
        assert_eq!(spec.offset, Vec2::new(0.0, -3.0));
        assert_eq!(spec.blur_radius, 3.0);
        assert_eq!(spec.color, Rgba::BLACK.with_alpha_scaled(0.5));

        tree.set_shadow_opacity(id, 0.0);
        assert_eq!(tree.backend().host(host).shadow, None);
    }

    #[test]
    fn shadow_setters_touch_no_primitives() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_shadow_color(id, Some(Rgba::BLACK));
        tree.set_shadow_opacity(id, 1.0);
        assert_eq!(tree.backend().prim_count(), 0);
    }

    // -- Re-parenting and teardown --

    #[test]
    fn reparenting_moves_the_container() {
        let mut tree = tree();
        let p1 = tree.create_layer();
        let p2 = tree.create_layer();
        let child = tree.create_layer();
        tree.set_background_color(child, Some(Rgba::GREEN));

        tree.add_sublayer(p1, child);
        tree.add_sublayer(p2, child);

        let scene = tree.backend();
        let cc = container(&tree, child);
        assert!(!scene.contains(&container(&tree, p1), &cc));
        assert!(scene.contains(&container(&tree, p2), &cc));
        assert_eq!(
            scene.prim(background(&tree, child)).fill,
            Fill::Color(Rgba::GREEN)
        );
    }

    #[test]
    fn detach_and_reattach_preserves_visuals() {
        let mut tree = tree();
        let p1 = tree.create_layer();
        let p2 = tree.create_layer();
        let child = tree.create_layer();
        tree.set_background_color(child, Some(Rgba::GREEN));
        tree.set_frame(child, Rect::new(0.0, 0.0, 10.0, 10.0));

        tree.add_sublayer(p1, child);
        tree.remove_from_superlayer(child);
        let cc = container(&tree, child);
        assert_eq!(tree.backend().parent_of(cc), None);
        assert!(tree.is_materialized(child));

        let count = tree.backend().prim_count();
        tree.add_sublayer(p2, child);

        let scene = tree.backend();
        assert_eq!(scene.prim_count(), count, "binding is reused");
        assert!(scene.contains(&container(&tree, p2), &cc));
        assert_eq!(
            scene.prim(background(&tree, child)).fill,
            Fill::Color(Rgba::GREEN)
        );
    }

    #[test]
    fn destroying_a_hosted_root_detaches_it_from_the_host() {
        let mut tree = tree();
        let host = tree.backend_mut().create_host();
        let id = tree.create_layer();
        tree.set_host(id, Some(host));
        tree.set_background_color(id, Some(Rgba::WHITE));
        assert_eq!(tree.backend().host_child_count(host), 1);

        tree.destroy_layer(id);

        assert_eq!(tree.backend().host_child_count(host), 0);
    }

    #[test]
    fn destroying_a_nested_sublayer_detaches_its_container() {
        let mut tree = tree();
        let parent = tree.create_layer();
        let child = tree.create_layer();
        tree.add_sublayer(parent, child);
        let cc = container(&tree, child);

        tree.destroy_layer(child);

        assert!(!tree.backend().contains(&container(&tree, parent), &cc));
    }

    // -- Caller-drawn content --

    #[test]
    fn content_group_accepts_caller_primitives() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(0.0, 0.0, 50.0, 50.0));

        let target = content(&tree, id);
        let glyph = tree.backend_mut().create_shape();
        tree.backend_mut().append_child(&target, &glyph);

        assert_eq!(tree.backend().prim(target).children, vec![glyph]);
    }

    // -- Convergence --

    #[test]
    fn visual_state_converges_regardless_of_setter_order() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);

        let mut forward = tree();
        let a = forward.create_layer();
        forward.set_frame(a, frame);
        forward.set_background_color(a, Some(Rgba::RED));
        forward.set_opacity(a, 0.5);
        forward.set_corner_radius(a, 8.0);

        let mut reverse = tree();
        let b = reverse.create_layer();
        reverse.set_frame(b, frame);
        reverse.set_corner_radius(b, 8.0);
        reverse.set_opacity(b, 0.5);
        reverse.set_background_color(b, Some(Rgba::RED));

        assert_eq!(forward.backend(), reverse.backend());
    }
}
