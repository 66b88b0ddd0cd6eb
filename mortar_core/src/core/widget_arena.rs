// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use hashbrown::HashMap;

use crate::core::{Handler, WidgetId, WidgetState};

/// One widget: its state, its links in the tree, and its handler chain.
pub(crate) struct WidgetNode {
    pub(crate) state: WidgetState,
    /// Non-owning back link.
    pub(crate) parent: Option<WidgetId>,
    /// Owned children, in paint and hit-test order.
    pub(crate) children: Vec<WidgetId>,
    /// Most recently added first.
    pub(crate) handlers: Vec<Handler>,
}

/// Flat storage for every live widget, keyed by id.
///
/// Tree shape is encoded in the `parent` and `children` fields of each node.
/// Moving a subtree only edits those links.
#[derive(Default)]
pub(crate) struct WidgetArena {
    nodes: HashMap<WidgetId, WidgetNode>,
}

impl WidgetArena {
    pub(crate) fn insert(&mut self, state: WidgetState) {
        let id = state.id;
        self.nodes.insert(
            id,
            WidgetNode {
                state,
                parent: None,
                children: Vec::new(),
                handlers: Vec::new(),
            },
        );
    }

    pub(crate) fn remove(&mut self, id: WidgetId) -> Option<WidgetNode> {
        self.nodes.remove(&id)
    }

    pub(crate) fn has(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn try_get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn try_get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(&id)
    }

    #[track_caller]
    pub(crate) fn get(&self, id: WidgetId) -> &WidgetNode {
        match self.nodes.get(&id) {
            Some(node) => node,
            None => panic!("get: widget {id} not in widget tree"),
        }
    }

    #[track_caller]
    pub(crate) fn get_mut(&mut self, id: WidgetId) -> &mut WidgetNode {
        match self.nodes.get_mut(&id) {
            Some(node) => node,
            None => panic!("get_mut: widget {id} not in widget tree"),
        }
    }

    #[track_caller]
    pub(crate) fn state(&self, id: WidgetId) -> &WidgetState {
        &self.get(id).state
    }

    #[track_caller]
    pub(crate) fn state_mut(&mut self, id: WidgetId) -> &mut WidgetState {
        &mut self.get_mut(id).state
    }

    #[track_caller]
    pub(crate) fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).parent
    }

    #[track_caller]
    pub(crate) fn children_of(&self, id: WidgetId) -> &[WidgetId] {
        &self.get(id).children
    }

    /// Widgets without a parent, in no particular order.
    pub(crate) fn roots(&self) -> Vec<WidgetId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| *id)
            .collect()
    }
}
