use alloc::vec::Vec;
use core::mem;

use super::node_id::NodeId;

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    // Vacant slots form a LIFO free list threaded through the slot vector.
    Vacant { next_free: Option<NodeId> },
}

/// Slot storage that owns every node of a tree.
///
/// Ids stay valid until [`Arena::take`] releases them; a released slot is handed out
/// again by the next [`Arena::alloc`].
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_free: Option<NodeId>,
    occupied: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_free: None,
            occupied: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            next_free: None,
            occupied: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.occupied
    }

    pub(crate) fn alloc(&mut self, element: T) -> NodeId {
        self.occupied += 1;
        if let Some(id) = self.next_free {
            let slot = &mut self.slots[id.index()];
            match *slot {
                Slot::Vacant { next_free } => self.next_free = next_free,
                Slot::Occupied(_) => panic!("`Arena::alloc()` - free list names an occupied slot!"),
            }
            *slot = Slot::Occupied(element);
            id
        } else {
            assert!(
                self.slots.len() <= NodeId::MAX_INDEX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                NodeId::MAX_INDEX + 1
            );
            self.slots.push(Slot::Occupied(element));
            NodeId::from_index(self.slots.len() - 1)
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &T {
        match &self.slots[id.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get()` - `id` is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut T {
        match &mut self.slots[id.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get_mut()` - `id` is vacant!"),
        }
    }

    /// Moves the element out and pushes its slot onto the free list.
    pub(crate) fn take(&mut self, id: NodeId) -> T {
        let slot = &mut self.slots[id.index()];
        assert!(matches!(slot, Slot::Occupied(_)), "`Arena::take()` - `id` is vacant!");
        let Slot::Occupied(element) = mem::replace(slot, Slot::Vacant { next_free: self.next_free }) else {
            unreachable!()
        };
        self.next_free = Some(id);
        self.occupied -= 1;
        element
    }

    /// Drops every element. Allocated capacity is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.next_free = None;
        self.occupied = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_preallocates() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn released_slot_is_reused_first() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let c = arena.alloc('c');

        assert_eq!(arena.take(a), 'a');
        assert_eq!(arena.take(c), 'c');

        // LIFO: the most recently released slot comes back first.
        assert_eq!(arena.alloc('d'), c);
        assert_eq!(arena.alloc('e'), a);
        assert_eq!(*arena.get(b), 'b');
        assert_eq!(arena.len(), 3);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `id` is vacant!")]
    fn get_after_take_panics() {
        let mut arena = Arena::new();
        let id = arena.alloc(1u8);
        arena.take(id);
        let _ = arena.get(id);
    }

    #[test]
    #[should_panic(expected = "`Arena::take()` - `id` is vacant!")]
    fn double_take_panics() {
        let mut arena = Arena::new();
        let id = arena.alloc(1u8);
        arena.take(id);
        arena.take(id);
    }

    #[test]
    #[should_panic(expected = "`Arena::alloc()` - arena is at maximum capacity")]
    fn alloc_past_max_panics() {
        let mut arena = Arena::new();
        for _ in 0..=NodeId::MAX_INDEX + 1 {
            arena.alloc(());
        }
    }

    proptest! {
        #[test]
        fn arena_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(NodeId, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let id = arena.alloc(value);
                        prop_assert!(model.iter().all(|&(live, _)| live != id));
                        model.push((id, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let (id, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(id), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());

                for &(id, value) in &model {
                    prop_assert_eq!(*arena.get(id), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        GetMut(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            8 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
