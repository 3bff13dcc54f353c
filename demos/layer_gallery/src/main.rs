// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Terminal walkthrough of the layer tree over the recording scene.
//!
//! Builds a small card UI (rounded surface, masked banner, bordered chip),
//! dumps the tree with [`lamina_debug::pretty::dump_tree`], then mutates it
//! and dumps again so the structural changes are visible side by side.

use kurbo::{Rect, Vec2};
use lamina_core::color::Rgba;
use lamina_core::layer::LayerTree;
use lamina_debug::pretty::dump_tree;
use lamina_scene_harness::Scene;

fn main() {
    let mut tree = LayerTree::new(Scene::new());
    let host = tree.backend_mut().create_host();

    // -- card: hosted root with rounding and a drop shadow -------------------
    let card = tree.create_layer();
    tree.set_host(card, Some(host));
    tree.set_frame(card, Rect::new(0.0, 0.0, 320.0, 200.0));
    tree.set_background_color(card, Some(Rgba::WHITE));
    tree.set_corner_radius(card, 12.0);
    tree.set_shadow_color(card, Some(Rgba::BLACK));
    tree.set_shadow_opacity(card, 0.25);
    tree.set_shadow_offset(card, Vec2::new(0.0, 3.0));
    tree.set_shadow_blur_radius(card, 6.0);

    // -- banner: masked header strip -----------------------------------------
    let banner = tree.create_layer();
    tree.set_frame(banner, Rect::new(0.0, 0.0, 320.0, 64.0));
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

    println!("== initial tree ({} primitives) ==", tree.backend().prim_count());
    print!("{}", dump_tree(&tree));

    // -- mutate: restack the banner, then hide the card ----------------------
    tree.add_sublayer(card, banner);
    tree.set_hidden(card, true);

    println!();
    println!("== after restack + hide ({} primitives) ==", tree.backend().prim_count());
    print!("{}", dump_tree(&tree));
}
