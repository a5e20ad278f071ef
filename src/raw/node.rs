use super::handle::Handle;
use super::size::Size;

/// A single AVL node: the stored value plus the balance and order-statistic
/// metadata maintained on every structural change.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// Height of the subtree rooted here. A leaf is 1; an absent child counts
    /// as 0. The arena caps the element count below 2^32, which bounds the
    /// height of a balanced tree well under `u8::MAX`.
    pub(crate) height: u8,
    /// Number of elements in the subtree rooted here, including this node.
    pub(crate) size: Size,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached leaf node.
    pub(crate) const fn new_leaf(value: T) -> Self {
        Self {
            value,
            height: 1,
            size: Size::ONE,
            left: None,
            right: None,
        }
    }
}
