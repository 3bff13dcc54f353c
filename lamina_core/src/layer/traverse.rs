// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use crate::backend::Backend;

use super::id::{INVALID, LayerId};
use super::tree::LayerTree;

/// An iterator over the direct sublayers of a layer, in paint order.
///
/// Created by [`LayerTree::sublayers`].
#[derive(Debug)]
pub struct Sublayers<'a, B: Backend> {
    tree: &'a LayerTree<B>,
    current: u32,
}

impl<'a, B: Backend> Sublayers<'a, B> {
    pub(crate) fn new(tree: &'a LayerTree<B>, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl<B: Backend> Iterator for Sublayers<'_, B> {
    type Item = LayerId;

    fn next(&mut self) -> Option<LayerId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.next_sibling[idx as usize];
        Some(LayerId {
            idx,
            generation: self.tree.generation[idx as usize],
        })
    }
}
