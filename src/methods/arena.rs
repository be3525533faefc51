//! Id-keyed node arena for the branching methods.
//!
//! Nodes live in a `Vec` in first-seen order and refer to each other by
//! index. Parent ids are resolved only after every node has been
//! collected, so a child may appear before its parent in the transcript.

use std::collections::HashMap;

/// A node that can be linked into an [`Arena`].
pub(crate) trait ArenaNode {
    /// The node's own id.
    fn id(&self) -> &str;
    /// The id of the declared parent, if any.
    fn parent_id(&self) -> Option<&str>;
    /// Arena indices of resolved children, in link order.
    fn children(&self) -> &[usize];
    /// Record a resolved child.
    fn push_child(&mut self, index: usize);
}

/// Linked nodes plus the id lookup used to build them.
#[derive(Debug)]
pub(crate) struct Arena<N> {
    pub(crate) nodes: Vec<N>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) root: Option<usize>,
}

impl<N: ArenaNode> Arena<N> {
    /// Collect nodes and link them.
    ///
    /// A repeated id overwrites the earlier node but keeps its position.
    /// Nodes whose parent id does not resolve are left unlinked. When more
    /// than one node has no parent id, the last one becomes the root.
    pub(crate) fn build(parsed: impl IntoIterator<Item = N>) -> Self {
        let mut nodes: Vec<N> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for node in parsed {
            if let Some(&existing) = index.get(node.id()) {
                nodes[existing] = node;
            } else {
                index.insert(node.id().to_string(), nodes.len());
                nodes.push(node);
            }
        }

        let mut root = None;
        for i in 0..nodes.len() {
            let link = nodes[i].parent_id().map(|parent| index.get(parent).copied());
            match link {
                None => root = Some(i),
                Some(Some(parent)) => nodes[parent].push_child(i),
                Some(None) => {}
            }
        }

        Self { nodes, index, root }
    }

    /// Index of the resolved parent of `node`.
    pub(crate) fn parent_of(&self, node: usize) -> Option<usize> {
        self.nodes
            .get(node)
            .and_then(ArenaNode::parent_id)
            .and_then(|parent| self.index.get(parent).copied())
    }
}

/// One step of a pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Visit {
    pub(crate) node: usize,
    pub(crate) parent: Option<usize>,
}

/// Pre-order walk from `root`, siblings in link order.
///
/// Every reachable node has exactly one resolved parent, so each is
/// visited once.
pub(crate) fn preorder<N: ArenaNode>(nodes: &[N], root: Option<usize>) -> Vec<Visit> {
    let mut visits = Vec::with_capacity(nodes.len());
    let mut stack: Vec<Visit> = root
        .map(|node| Visit { node, parent: None })
        .into_iter()
        .collect();

    while let Some(visit) = stack.pop() {
        visits.push(visit);
        if let Some(node) = nodes.get(visit.node) {
            stack.extend(node.children().iter().rev().map(|&child| Visit {
                node: child,
                parent: Some(visit.node),
            }));
        }
    }
    visits
}
