use core::num::NonZero;

#[cfg(test)]
type RawNodeId = u16;
#[cfg(not(test))]
type RawNodeId = u32;

/// Names one occupied slot of the node arena.
///
/// Stored off-by-one in a `NonZero` so that `Option<NodeId>`, the type of every child
/// link, costs no more than the id itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZero<RawNodeId>);

impl NodeId {
    /// Largest slot index an id can name.
    pub(crate) const MAX_INDEX: usize = (RawNodeId::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX_INDEX, "`NodeId::from_index()` - `index` > `NodeId::MAX_INDEX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawNodeId;
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
