// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a small card UI rendered through [`SvgBackend`].
//!
//! Builds the same card as the `layer_gallery` demo (rounded surface, masked
//! banner, bordered chip) but against live DOM: the card is a hosted root
//! inside a plain `<div>`, and everything below it is SVG managed by the
//! layer tree. A caller-owned `<text>` label dropped into the banner's
//! content group shows how foreign elements ride along with a layer.
//!
//! Build with: `wasm-pack build --target web demos/web_card`
//!
//! Then serve `demos/web_card/` and open `index.html` in a browser.
//!
//! [`SvgBackend`]: lamina_backend_web::svg::SvgBackend

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::format;

use kurbo::{Rect, Vec2};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use lamina_backend_web::svg::SvgBackend;
use lamina_core::color::Rgba;
use lamina_core::layer::LayerTree;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const CARD_W: f64 = 320.0;
const CARD_H: f64 = 200.0;

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");

    let container = create_container(&document)?;
    document.body().expect("no body").append_child(&container)?;

    let mut backend = SvgBackend::new(document);
    let host = backend.register_host(container);
    let mut tree = LayerTree::new(backend);

    // -- card: hosted root with rounding and a drop shadow -------------------
    let card = tree.create_layer();
    tree.set_host(card, Some(host));
    tree.set_frame(card, Rect::new(0.0, 0.0, CARD_W, CARD_H));
    tree.set_background_color(card, Some(Rgba::WHITE));
    tree.set_corner_radius(card, 12.0);
    tree.set_shadow_color(card, Some(Rgba::BLACK));
    tree.set_shadow_opacity(card, 0.25);
    tree.set_shadow_offset(card, Vec2::new(0.0, 3.0));
    tree.set_shadow_blur_radius(card, 6.0);

    // -- banner: masked header strip -----------------------------------------
    let banner = tree.create_layer();
    tree.set_frame(banner, Rect::new(0.0, 0.0, CARD_W, 64.0));
    tree.set_background_color(banner, Some(Rgba::from_hex("#3478f6")));
    tree.set_masks_to_bounds(banner, true);

    // -- chip: bordered rounded badge ----------------------------------------
    let chip = tree.create_layer();
    tree.set_frame(chip, Rect::new(16.0, 96.0, 128.0, 128.0));
    tree.set_background_color(chip, Some(Rgba::from_hex("#80ffcc00")));
    tree.set_corner_radius(chip, 8.0);
    tree.set_border_width(chip, 2.0);
    tree.set_border_color(chip, Some(Rgba::GRAY));

    tree.add_sublayer(card, banner);
    tree.add_sublayer(card, chip);

    // Caller-owned content: drop a label into the banner's content group.
    let label = create_label(tree.backend().document(), "Lamina")?;
    let content = tree
        .content_primitive(banner)
        .expect("banner is materialized");
    content.element().append_child(&label)?;

    Ok(())
}

fn create_container(doc: &Document) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element("div")?.unchecked_into();
    let s = el.style();
    s.set_property("position", "relative")?;
    s.set_property("width", &format!("{CARD_W}px"))?;
    s.set_property("height", &format!("{CARD_H}px"))?;
    s.set_property("margin", "48px")?;
    Ok(el)
}

fn create_label(doc: &Document, text: &str) -> Result<Element, JsValue> {
    let el = doc.create_element_ns(Some(SVG_NS), "text")?;
    el.set_attribute("x", "16")?;
    el.set_attribute("y", "40")?;
    el.set_attribute("fill", "#ffffff")?;
    el.set_attribute("font-size", "24")?;
    el.set_text_content(Some(text));
    Ok(el)
}
