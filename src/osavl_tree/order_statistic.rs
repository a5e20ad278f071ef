use core::borrow::Borrow;
use core::ops::Index;

use super::OSAvlTree;
use crate::Rank;

impl<T> OSAvlTree<T> {
    /// Returns the element at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds,
    /// i.e. exactly when `rank >= self.len()`. The tree is never mutated.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([10, 20, 30]);
    /// assert_eq!(tree.get_by_rank(1), Some(&20));
    /// assert!(tree.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank)
    }
}

impl<T: Ord> OSAvlTree<T> {
    /// Returns the zero-based rank of an element equal to `value` in sorted
    /// order, or `None` if no such element is present.
    ///
    /// With duplicates present, the reported rank belongs to the first equal
    /// node on the search path; any of `get_by_rank` over the returned rank's
    /// neighbors holding the same value is an equally valid occurrence.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([10, 20]);
    ///
    /// assert_eq!(tree.rank_of(&20), Some(1));
    /// assert_eq!(tree.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(value)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avos_tree::OSAvlTree;
/// use avos_tree::Rank;
///
/// let tree = OSAvlTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for OSAvlTree<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
