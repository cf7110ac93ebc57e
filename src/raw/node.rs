use core::cmp::Ordering;
use core::mem;

use super::node_id::NodeId;

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    /// The child to descend into when the node's key compares to the query as `ordering`.
    ///
    /// A node key greater than the query sends the search left; anything else sends it
    /// right. Callers handle `Equal` before descending.
    #[inline]
    pub(crate) fn toward_query(ordering: Ordering) -> Self {
        if ordering == Ordering::Greater { Side::Left } else { Side::Right }
    }

    /// How a node key compares to the query when that node lies on this side of it.
    #[inline]
    pub(crate) fn ordering(self) -> Ordering {
        match self {
            Side::Left => Ordering::Less,
            Side::Right => Ordering::Greater,
        }
    }
}

/// One entry of the tree together with the links to its subtrees.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<NodeId> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Swaps in a new key and value, keeping the links. Returns the old pair.
    pub(crate) fn replace_entry(&mut self, key: K, value: V) -> (K, V) {
        (mem::replace(&mut self.key, key), mem::replace(&mut self.value, value))
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}
