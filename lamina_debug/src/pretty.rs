// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable layer-tree dumps.
//!
//! [`write_tree`] renders one line per layer, depth-indented, with the
//! layer's id, container kind, frame, and any non-default visual state.
//! Typical output:
//!
//! ```text
//! LayerId(0@gen0) hosted frame=(0, 0, 320x200) host=HostId(0) bg=rgba(255, 255, 255, 1.000000)
//!   LayerId(1@gen0) nested frame=(16, 16, 288x48) radius=8 masked
//!   LayerId(2@gen0) detached frame=(0, 0, 0x0)
//! ```

use std::io::{self, Write};

use lamina_core::backend::Backend;
use lamina_core::layer::{ContainerKind, LayerId, LayerTree};

/// Writes a one-line-per-layer dump of every root and its descendants.
pub fn write_tree<B: Backend>(tree: &LayerTree<B>, writer: &mut dyn Write) -> io::Result<()> {
    for root in tree.roots() {
        write_layer(tree, root, 0, writer)?;
    }
    Ok(())
}

/// Renders [`write_tree`] output into a `String`.
#[must_use]
pub fn dump_tree<B: Backend>(tree: &LayerTree<B>) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec never fails.
    let _ = write_tree(tree, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_layer<B: Backend>(
    tree: &LayerTree<B>,
    id: LayerId,
    depth: usize,
    writer: &mut dyn Write,
) -> io::Result<()> {
    write!(writer, "{:indent$}{id:?}", "", indent = depth * 2)?;

    match tree.container_kind(id) {
        Some(ContainerKind::HostedRoot) => write!(writer, " hosted")?,
        Some(ContainerKind::NestedGroup) => write!(writer, " nested")?,
        None => write!(writer, " detached")?,
    }

    let frame = tree.frame(id);
    write!(
        writer,
        " frame=({}, {}, {}x{})",
        frame.x0,
        frame.y0,
        frame.width(),
        frame.height()
    )?;

    if let Some(host) = tree.host(id) {
        write!(writer, " host={host:?}")?;
    }
    if let Some(bg) = tree.background_color(id) {
        write!(writer, " bg={}", bg.to_css())?;
    }
    let border_width = tree.border_width(id);
    if border_width > 0.0 {
        match tree.border_color(id) {
            Some(color) => write!(writer, " border={border_width}/{}", color.to_css())?,
            None => write!(writer, " border={border_width}")?,
        }
    }
    let radius = tree.corner_radius(id);
    if radius != 0.0 {
        write!(writer, " radius={radius}")?;
    }
    let opacity = tree.opacity(id);
    if opacity != 1.0 {
        write!(writer, " opacity={opacity:.2}")?;
    }
    if tree.hidden(id) {
        write!(writer, " hidden")?;
    }
    if tree.masks_to_bounds(id) {
        write!(writer, " masked")?;
    }
    if tree.shadow(id).effective().is_some() {
        write!(writer, " shadow")?;
    }
    writeln!(writer)?;

    for child in tree.sublayers(id) {
        write_layer(tree, child, depth + 1, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use lamina_core::backend::Headless;
    use lamina_core::color::Rgba;
    use lamina_core::layer::HostId;

    use super::*;

    fn tree() -> LayerTree<Headless> {
        LayerTree::new(Headless)
    }

    #[test]
    fn one_line_per_layer_with_depth_indentation() {
        let mut tree = tree();
        let root = tree.create_layer();
        let child = tree.create_layer();
        let grandchild = tree.create_layer();
        tree.add_sublayer(root, child);
        tree.add_sublayer(child, grandchild);

        let dump = dump_tree(&tree);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("LayerId(0@gen0)"));
        assert!(lines[1].starts_with("  LayerId(1@gen0)"));
        assert!(lines[2].starts_with("    LayerId(2@gen0)"));
    }

    #[test]
    fn markers_reflect_layer_state() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_host(id, Some(HostId(4)));
        tree.set_frame(id, Rect::new(0.0, 0.0, 100.0, 50.0));
        tree.set_background_color(id, Some(Rgba::RED));
        tree.set_masks_to_bounds(id, true);
        tree.set_hidden(id, true);

        let dump = dump_tree(&tree);
        assert!(dump.contains(" hosted"));
        assert!(dump.contains(" frame=(0, 0, 100x50)"));
        assert!(dump.contains(" host=HostId(4)"));
        assert!(dump.contains(" bg=rgba(255, 0, 0, 1.000000)"));
        assert!(dump.contains(" masked"));
        assert!(dump.contains(" hidden"));
        assert!(!dump.contains(" shadow"));
    }

    #[test]
    fn unmaterialized_layers_read_as_detached() {
        let mut tree = tree();
        let _ = tree.create_layer();
        let dump = dump_tree(&tree);
        assert!(dump.contains(" detached"));
        assert!(dump.contains(" frame=(0, 0, 0x0)"));
    }

    #[test]
    fn default_state_adds_no_markers() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(0.0, 0.0, 10.0, 10.0));

        let dump = dump_tree(&tree);
        for marker in [" bg=", " border=", " radius=", " opacity=", " hidden", " masked"] {
            assert!(!dump.contains(marker), "unexpected marker {marker}");
        }
    }

    #[test]
    fn empty_tree_dumps_nothing() {
        let tree = tree();
        assert!(dump_tree(&tree).is_empty());
    }

    #[test]
    fn write_tree_streams_to_any_writer() {
        let mut tree = tree();
        let id = tree.create_layer();
        tree.set_frame(id, Rect::new(5.0, 5.0, 15.0, 25.0));

        let mut out = Vec::new();
        write_tree(&tree, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("frame=(5, 5, 10x20)"));
        assert!(text.ends_with('\n'));
    }
}
