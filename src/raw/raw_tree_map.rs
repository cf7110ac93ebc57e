use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::node::{Node, Side};
use super::node_id::NodeId;

/// Explicit traversal stack. Depth is unbounded without rebalancing, so it spills to
/// the heap past the inline size.
type Stack<T> = SmallVec<[T; 32]>;

/// The unbalanced binary search tree backing `TreeMap`.
#[derive(Clone)]
pub(crate) struct RawTreeMap<K, V> {
    /// Arena owning every node.
    nodes: Arena<Node<K, V>>,
    /// Root node, if the tree is non-empty.
    root: Option<NodeId>,
    /// Number of reachable nodes.
    len: usize,
}

/// The slot that owns a node: the root pointer or a child link of its parent.
#[derive(Clone, Copy, Debug)]
enum Link {
    Root,
    Child(NodeId, Side),
}

/// Outcome of descending the tree towards a key.
enum Probe {
    /// The key lives in `id`, which is owned by `link`.
    Found { link: Link, id: NodeId },
    /// The key is absent; `link` is the empty slot where it belongs.
    Vacant(Link),
}

impl<K, V> RawTreeMap<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        let released = self.len;
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        trace!(released, "cleared tree");
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut stack: Stack<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();
        let mut height = 0;

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(id);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }

    /// Pre-order scan of every node for a value equal to `value`.
    pub(crate) fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        // An empty tree has nothing to push, so the loop never runs.
        let mut stack: Stack<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id);
            if node.value() == value {
                return true;
            }
            stack.extend(node.right());
            stack.extend(node.left());
        }

        false
    }

    /// Calls `f` on every entry in ascending key order.
    pub(crate) fn for_each_in_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a K, &'a V),
    {
        let mut stack: Stack<NodeId> = SmallVec::new();
        let mut current = self.root;

        loop {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes.get(id).left();
            }
            let Some(id) = stack.pop() else {
                break;
            };
            let node = self.nodes.get(id);
            f(node.key(), node.value());
            current = node.right();
        }
    }

    /// Follows `side` links from the root to the end: the minimum key for `Left`, the
    /// maximum for `Right`.
    pub(crate) fn extreme_key(&self, side: Side) -> Option<&K> {
        let mut id = self.root?;
        while let Some(child) = self.nodes.get(id).child(side) {
            id = child;
        }
        Some(self.nodes.get(id).key())
    }

    fn link(&self, link: Link) -> Option<NodeId> {
        match link {
            Link::Root => self.root,
            Link::Child(parent, side) => self.nodes.get(parent).child(side),
        }
    }

    fn set_link(&mut self, link: Link, child: Option<NodeId>) {
        match link {
            Link::Root => self.root = child,
            Link::Child(parent, side) => self.nodes.get_mut(parent).set_child(side, child),
        }
    }
}

impl<K: Ord, V> RawTreeMap<K, V> {
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut link = Link::Root;

        while let Some(id) = self.link(link) {
            let ordering = self.nodes.get(id).key().borrow().cmp(key);
            if ordering == Ordering::Equal {
                return Probe::Found { link, id };
            }
            link = Link::Child(id, Side::toward_query(ordering));
        }

        Probe::Vacant(link)
    }

    fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.nodes.get(id);
            match node.key().borrow().cmp(key) {
                Ordering::Equal => return Some(id),
                ordering => current = node.child(Side::toward_query(ordering)),
            }
        }

        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|id| self.nodes.get(id).value())
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Links a new leaf into the first empty slot on the search path.
    ///
    /// Returns the pair untouched if the key is already present; the tree is not
    /// modified in that case.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<(), (K, V)> {
        let Probe::Vacant(link) = self.probe(&key) else {
            return Err((key, value));
        };

        let id = self.nodes.alloc(Node::leaf(key, value));
        self.set_link(link, Some(id));
        self.len += 1;
        trace!(len = self.len, "inserted leaf");
        Ok(())
    }

    /// Unlinks the entry for `key` and returns it.
    ///
    /// A node with two children is not unlinked itself: it takes over its in-order
    /// successor's entry, and the successor's node (which has no left child) is spliced
    /// out in its place.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Probe::Found { link, id } = self.probe(key) else {
            return None;
        };

        let node = self.nodes.get(id);
        let removed = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let mut successor_link = Link::Child(id, Side::Right);
                let mut successor = right;
                while let Some(left) = self.nodes.get(successor).left() {
                    successor_link = Link::Child(successor, Side::Left);
                    successor = left;
                }

                let successor_right = self.nodes.get(successor).right();
                self.set_link(successor_link, successor_right);
                let (successor_key, successor_value) = self.nodes.take(successor).into_entry();
                self.len -= 1;
                trace!(len = self.len, "removed node with two children via its successor");
                self.nodes.get_mut(id).replace_entry(successor_key, successor_value)
            }
            (child, None) | (None, child) => {
                self.set_link(link, child);
                self.len -= 1;
                trace!(len = self.len, spliced_child = child.is_some(), "removed node");
                self.nodes.take(id).into_entry()
            }
        };

        Some(removed)
    }

    /// Closest key to `key` on `side` of it, or `key`'s own stored key if present.
    ///
    /// `Side::Left` gives the floor, `Side::Right` the ceiling. Every node on the search
    /// path that lies on the wanted side becomes the candidate; the descent only stops
    /// at a missing child, so single-child nodes are passed through.
    pub(crate) fn nearest_key<Q>(&self, key: &Q, side: Side) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.nodes.get(id);
            let ordering = node.key().borrow().cmp(key);
            if ordering == Ordering::Equal {
                return Some(node.key());
            }
            if ordering == side.ordering() {
                best = Some(node.key());
            }
            current = node.child(Side::toward_query(ordering));
        }

        best
    }

    /// Panics unless every structural invariant holds.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.len == 0, self.root.is_none(), "root presence disagrees with len");

        let mut previous: Option<&K> = None;
        let mut reachable = 0;
        self.for_each_in_order(|key, _| {
            if let Some(previous) = previous {
                assert!(previous < key, "in-order walk is not strictly increasing");
            }
            previous = Some(key);
            reachable += 1;
        });

        assert_eq!(reachable, self.len, "reachable nodes disagree with len");
        assert_eq!(self.nodes.len(), self.len, "arena holds unreachable nodes");
    }

    #[cfg(test)]
    fn root(&self) -> Option<NodeId> {
        self.root
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;
    use core::ops::Bound;
    use proptest::prelude::*;

    fn tree_from(keys: &[i32]) -> RawTreeMap<i32, i32> {
        let mut tree = RawTreeMap::new();
        for &key in keys {
            assert!(tree.insert(key, key * 10).is_ok());
        }
        tree.assert_invariants();
        tree
    }

    #[test]
    fn empty_tree() {
        let tree: RawTreeMap<i32, i32> = RawTreeMap::new();
        tree.assert_invariants();
        assert_eq!(tree.height(), 0);
        assert!(!tree.contains_value(&0));
        assert_eq!(tree.extreme_key(Side::Left), None);
        assert_eq!(tree.nearest_key(&0, Side::Left), None);
        assert_eq!(tree.nearest_key(&0, Side::Right), None);
    }

    #[test]
    fn rejected_insert_hands_back_pair() {
        let mut tree = tree_from(&[5, 3, 8]);
        assert_eq!(tree.insert(3, 99), Err((3, 99)));
        assert_eq!(tree.get(&3), Some(&30));
        assert_eq!(tree.len(), 3);
        tree.assert_invariants();
    }

    #[test]
    fn shape_follows_insertion_order() {
        assert_eq!(tree_from(&[1, 2, 3, 4, 5, 6]).height(), 6);
        assert_eq!(tree_from(&[6, 5, 4, 3, 2, 1]).height(), 6);
        assert_eq!(tree_from(&[4, 2, 6, 1, 3, 5, 7]).height(), 3);
    }

    #[test]
    fn two_child_removal_keeps_node_in_place() {
        let mut tree = tree_from(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root();

        assert_eq!(tree.remove(&4), Some((4, 40)));
        tree.assert_invariants();

        // The root node took over its successor's entry instead of being unlinked.
        assert_eq!(tree.root(), root);
        assert_eq!(tree.root().map(|id| *tree.nodes.get(id).key()), Some(5));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn successor_with_right_child_is_spliced() {
        // 5's successor is 6, which has a right child 7 but no left child.
        let mut tree = tree_from(&[5, 2, 9, 6, 7]);
        assert_eq!(tree.remove(&5), Some((5, 50)));
        tree.assert_invariants();
        assert_eq!(tree.get(&7), Some(&70));
        assert_eq!(tree.get(&6), Some(&60));
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn removed_slots_are_reused() {
        let mut tree = tree_from(&[4, 2, 6]);
        let capacity = tree.capacity();
        assert!(tree.remove(&2).is_some());
        assert!(tree.insert(1, 10).is_ok());
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.capacity(), capacity);
        tree.assert_invariants();
    }

    #[test]
    fn nearest_passes_through_single_child_nodes() {
        // 10 has only a left child, 5 has only a right child.
        let tree = tree_from(&[10, 5, 7]);
        assert_eq!(tree.nearest_key(&8, Side::Left), Some(&7));
        assert_eq!(tree.nearest_key(&6, Side::Right), Some(&7));
        assert_eq!(tree.nearest_key(&9, Side::Right), Some(&10));
        assert_eq!(tree.nearest_key(&4, Side::Left), None);
        assert_eq!(tree.nearest_key(&11, Side::Right), None);
    }

    #[test]
    fn contains_value_reaches_every_node() {
        let tree = tree_from(&[50, 25, 75, 10, 30, 60, 90, 5]);
        for key in [50, 25, 75, 10, 30, 60, 90, 5] {
            assert!(tree.contains_value(&(key * 10)));
        }
        assert!(!tree.contains_value(&1));
    }

    #[test]
    fn deep_tree_does_not_recurse() {
        let keys: Vec<i32> = (0..5_000).collect();
        let mut tree = tree_from(&keys);
        assert_eq!(tree.height(), 5_000);
        assert!(tree.contains_value(&0));
        assert_eq!(tree.extreme_key(Side::Right), Some(&4_999));
        assert_eq!(tree.remove(&0), Some((0, 0)));
        tree.clear();
        tree.assert_invariants();
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(i16),
        Remove(i16),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            10 => (-300i16..300).prop_map(Operation::Insert),
            8 => (-300i16..300).prop_map(Operation::Remove),
            1 => Just(Operation::Clear),
        ]
    }

    proptest! {
        #[test]
        fn tree_matches_btreemap(operations in prop::collection::vec(strategy(), 0..512), probe in -310i16..310) {
            let mut tree: RawTreeMap<i16, i32> = RawTreeMap::new();
            let mut model: BTreeMap<i16, i32> = BTreeMap::new();

            for operation in operations {
                match operation {
                    Operation::Insert(key) => {
                        let value = i32::from(key) * 3;
                        let inserted = tree.insert(key, value).is_ok();
                        prop_assert_eq!(inserted, !model.contains_key(&key));
                        model.entry(key).or_insert(value);
                    }
                    Operation::Remove(key) => {
                        prop_assert_eq!(tree.remove(&key), model.remove_entry(&key));
                    }
                    Operation::Clear => {
                        tree.clear();
                        model.clear();
                    }
                }

                tree.assert_invariants();
                prop_assert_eq!(tree.len(), model.len());
                prop_assert_eq!(tree.extreme_key(Side::Left), model.keys().next());
                prop_assert_eq!(tree.extreme_key(Side::Right), model.keys().next_back());
                prop_assert_eq!(
                    tree.nearest_key(&probe, Side::Left),
                    model.range(..=probe).next_back().map(|(key, _)| key)
                );
                prop_assert_eq!(
                    tree.nearest_key(&probe, Side::Right),
                    model.range((Bound::Included(probe), Bound::Unbounded)).next().map(|(key, _)| key)
                );
            }
        }
    }
}
