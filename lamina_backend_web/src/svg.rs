// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG element management.
//!
//! Maps layer-tree primitives onto SVG elements:
//!
//! - surface containers become `<svg>` roots, absolutely positioned inside
//!   their host element,
//! - groups become `<g>`, positioned via a `matrix(...)` transform,
//! - shapes become `<rect>`, and
//! - clip regions become `<clipPath>` with a stable, token-derived `id`,
//!   referenced through the `clip-path` attribute.
//!
//! Host surfaces are plain `HtmlElement` containers handed in by the
//! application through [`SvgBackend::register_host`]. Host-level rounding
//! and shadows go through CSS (`border-radius`, `box-shadow`) rather than
//! SVG attributes, since they apply to the host element itself.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, Node, SvgElement};

use lamina_core::backend::Backend;
use lamina_core::color::Rgba;
use lamina_core::layer::{ClipToken, HostId, ShadowSpec};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Which flavor of element a primitive wraps; decides how position and size
/// updates are expressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeKind {
    Surface,
    Group,
    Shape,
    Clip,
}

/// A live SVG element managed by the backend.
///
/// Clones are handles to the same underlying element and compare equal to
/// each other.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgPrimitive {
    element: Element,
    kind: NodeKind,
}

impl SvgPrimitive {
    /// Returns the underlying DOM element.
    ///
    /// Useful for drawing application content: fetch a layer's content group
    /// and append your own SVG elements beneath it.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

/// A [`Backend`] that renders layers as SVG elements inside DOM hosts.
pub struct SvgBackend {
    document: Document,
    hosts: Vec<HtmlElement>,
    next_host: u32,
}

impl core::fmt::Debug for SvgBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SvgBackend")
            .field("document", &"Document")
            .field("hosts", &self.next_host)
            .finish()
    }
}

impl SvgBackend {
    /// Creates a backend that builds elements with the given document.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            hosts: Vec::new(),
            next_host: 0,
        }
    }

    /// Returns the document this backend creates elements with.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Registers a DOM container as a host surface and returns its id.
    ///
    /// Hosted root layers are inserted as children of this element; it
    /// should be positioned (`relative` or `absolute`) so the roots anchor
    /// to it.
    pub fn register_host(&mut self, container: HtmlElement) -> HostId {
        let id = HostId(self.next_host);
        self.next_host += 1;
        self.hosts.push(container);
        id
    }

    /// Returns the container element registered for `host`.
    ///
    /// # Panics
    ///
    /// Panics if `host` was not registered with this backend.
    #[must_use]
    pub fn host_element(&self, host: HostId) -> &HtmlElement {
        &self.hosts[host.0 as usize]
    }

    fn create_svg(&self, name: &str) -> Element {
        self.document
            .create_element_ns(Some(SVG_NS), name)
            .expect("create_element_ns failed")
    }
}

/// Returns whether `child` is currently attached directly under `parent`.
fn is_child_of(parent: &Node, child: &Element) -> bool {
    child.parent_node().as_ref() == Some(parent)
}

/// The `id` attribute value for the clip region keyed by `token`.
fn clip_dom_id(token: ClipToken) -> String {
    format!("lamina-clip-{}", token.value())
}

impl Backend for SvgBackend {
    type Primitive = SvgPrimitive;

    fn create_surface_container(&mut self) -> Self::Primitive {
        let element = self.create_svg("svg");
        let style = element.unchecked_ref::<SvgElement>().style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", "0");
        let _ = style.set_property("top", "0");
        let _ = style.set_property("display", "block");
        SvgPrimitive {
            element,
            kind: NodeKind::Surface,
        }
    }

    fn create_group(&mut self) -> Self::Primitive {
        SvgPrimitive {
            element: self.create_svg("g"),
            kind: NodeKind::Group,
        }
    }

    fn create_shape(&mut self) -> Self::Primitive {
        SvgPrimitive {
            element: self.create_svg("rect"),
            kind: NodeKind::Shape,
        }
    }

    fn create_clip_region(&mut self, token: ClipToken) -> Self::Primitive {
        let element = self.create_svg("clipPath");
        let _ = element.set_attribute("id", &clip_dom_id(token));
        SvgPrimitive {
            element,
            kind: NodeKind::Clip,
        }
    }

    fn append_child(&mut self, parent: &Self::Primitive, child: &Self::Primitive) {
        // DOM append moves an already-attached node instead of duplicating it.
        let _ = parent.element.append_child(&child.element);
    }

    fn insert_before(
        &mut self,
        parent: &Self::Primitive,
        child: &Self::Primitive,
        sibling: &Self::Primitive,
    ) {
        let _ = parent
            .element
            .insert_before(&child.element, Some(&sibling.element));
    }

    fn remove_child(&mut self, parent: &Self::Primitive, child: &Self::Primitive) {
        if self.contains(parent, child) {
            let _ = parent.element.remove_child(&child.element);
        }
    }

    fn contains(&self, parent: &Self::Primitive, child: &Self::Primitive) -> bool {
        is_child_of(parent.element.as_ref(), &child.element)
    }

    fn is_last_child(&self, parent: &Self::Primitive, child: &Self::Primitive) -> bool {
        parent.element.last_element_child().as_ref() == Some(&child.element)
    }

    fn set_position(&mut self, primitive: &Self::Primitive, origin: Point) {
        match primitive.kind {
            // An `<svg>` root inside an HTML host positions through CSS.
            NodeKind::Surface => {
                let style = primitive.element.unchecked_ref::<SvgElement>().style();
                let _ = style.set_property("left", &format!("{}px", origin.x));
                let _ = style.set_property("top", &format!("{}px", origin.y));
            }
            _ => {
                let transform = format!(
                    "matrix(1.0, 0.0, 0.0, 1.0, {:.0}, {:.0})",
                    origin.x, origin.y
                );
                let _ = primitive.element.set_attribute("transform", &transform);
            }
        }
    }

    fn set_size(&mut self, primitive: &Self::Primitive, size: Size) {
        let _ = primitive
            .element
            .set_attribute("width", &format!("{:.2}", size.width));
        let _ = primitive
            .element
            .set_attribute("height", &format!("{:.2}", size.height));
    }

    fn set_fill(&mut self, primitive: &Self::Primitive, fill: Option<Rgba>) {
        let css = match fill {
            Some(color) => color.to_css(),
            None => String::from("transparent"),
        };
        let _ = primitive.element.set_attribute("fill", &css);
    }

    fn set_opacity(&mut self, primitive: &Self::Primitive, opacity: f32) {
        let style = primitive.element.unchecked_ref::<SvgElement>().style();
        let _ = style.set_property("opacity", &format!("{opacity:.2}"));
    }

    fn set_visible(&mut self, primitive: &Self::Primitive, visible: bool) {
        let style = primitive.element.unchecked_ref::<SvgElement>().style();
        if visible {
            let _ = style.remove_property("display");
        } else {
            let _ = style.set_property("display", "none");
        }
    }

    fn set_corner_radius(&mut self, primitive: &Self::Primitive, radius: f64) {
        let _ = primitive
            .element
            .set_attribute("rx", &format!("{radius:.2}"));
        let _ = primitive
            .element
            .set_attribute("ry", &format!("{radius:.2}"));
    }

    fn set_stroke(&mut self, primitive: &Self::Primitive, width: f64, color: Rgba) {
        let style = primitive.element.unchecked_ref::<SvgElement>().style();
        let _ = style.set_property("stroke", &color.to_css());
        let _ = style.set_property("stroke-width", &format!("{width:.2}px"));
    }

    fn set_clip(&mut self, primitive: &Self::Primitive, token: ClipToken) {
        let url = format!("url(#{})", clip_dom_id(token));
        let _ = primitive.element.set_attribute("clip-path", &url);
    }

    fn host_child_count(&self, host: HostId) -> usize {
        self.hosts[host.0 as usize].child_element_count() as usize
    }

    fn host_append(&mut self, host: HostId, child: &Self::Primitive) {
        let _ = self.hosts[host.0 as usize].append_child(&child.element);
    }

    fn host_prepend(&mut self, host: HostId, child: &Self::Primitive) {
        let host = &self.hosts[host.0 as usize];
        let first = host.first_child();
        let _ = host.insert_before(&child.element, first.as_ref());
    }

    fn host_remove_child(&mut self, host: HostId, child: &Self::Primitive) {
        let host = &self.hosts[host.0 as usize];
        if is_child_of(host.as_ref(), &child.element) {
            let _ = host.remove_child(&child.element);
        }
    }

    fn host_set_corner_radius(&mut self, host: HostId, radius: f64) {
        let style = self.hosts[host.0 as usize].style();
        let _ = style.set_property("border-radius", &format!("{radius:.2}px"));
    }

    fn host_set_shadow(&mut self, host: HostId, shadow: Option<ShadowSpec>) {
        let style = self.hosts[host.0 as usize].style();
        match shadow {
            Some(spec) => {
                let css = format!(
                    "{}px {}px {}px {}",
                    spec.offset.x,
                    spec.offset.y,
                    spec.blur_radius,
                    spec.color.to_css(),
                );
                let _ = style.set_property("box-shadow", &css);
            }
            None => {
                let _ = style.remove_property("box-shadow");
            }
        }
    }
}
