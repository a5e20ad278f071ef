use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Handle, MAX_HEIGHT, RawOSAvlTree};

mod order_statistic;

/// An ordered multiset based on an AVL tree with subtree-size augmentation.
///
/// Every node tracks the size of its own subtree, so the position of an
/// element in sorted order can be queried in O(log n) with
/// [`get_by_rank`](OSAvlTree::get_by_rank) and [`rank_of`](OSAvlTree::rank_of),
/// without walking the whole tree.
///
/// Unlike a set, `OSAvlTree` keeps duplicate values: [`insert`](OSAvlTree::insert)
/// always adds exactly one element, and [`remove`](OSAvlTree::remove) removes at
/// most one matching occurrence. Equal values are ordered arbitrarily among
/// themselves but never disturb the ordering of other values.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element, as determined by the [`Ord`] trait,
/// changes while it is in the tree. The behavior resulting from such a logic
/// error is not specified, but will not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use avos_tree::OSAvlTree;
///
/// let mut ratings = OSAvlTree::new();
///
/// ratings.insert(4);
/// ratings.insert(9);
/// ratings.insert(4); // duplicates are kept
/// ratings.insert(7);
///
/// assert_eq!(ratings.len(), 4);
/// assert_eq!(ratings.get_by_rank(1), Some(&4));
///
/// // Remove one of the two fours.
/// assert!(ratings.remove(&4));
/// assert!(ratings.contains(&4));
///
/// // Iterate in ascending order.
/// let sorted: Vec<_> = ratings.iter().copied().collect();
/// assert_eq!(sorted, [4, 7, 9]);
/// ```
pub struct OSAvlTree<T> {
    raw: RawOSAvlTree<T>,
}

/// An iterator over the elements of an `OSAvlTree` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OSAvlTree`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use avos_tree::OSAvlTree;
///
/// let tree = OSAvlTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OSAvlTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    tree: Option<&'a RawOSAvlTree<T>>,
    front: SmallVec<[Handle; MAX_HEIGHT]>,
    back: SmallVec<[Handle; MAX_HEIGHT]>,
    remaining: usize,
}

/// An in-order iterator pairing each element with the size of the subtree
/// rooted at its node, for debugging and verification.
///
/// This `struct` is created by the [`iter_with_sizes`] method on
/// [`OSAvlTree`]. See its documentation for more.
///
/// [`iter_with_sizes`]: OSAvlTree::iter_with_sizes
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterWithSizes<'a, T> {
    tree: Option<&'a RawOSAvlTree<T>>,
    front: SmallVec<[Handle; MAX_HEIGHT]>,
    remaining: usize,
}

/// An owning iterator over the elements of an `OSAvlTree` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`OSAvlTree`]
/// (provided by the [`IntoIterator`] trait). See its documentation for more.
///
/// [`into_iter`]: OSAvlTree#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> OSAvlTree<T> {
    /// Makes a new, empty `OSAvlTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    ///
    /// // entries can now be inserted into the empty tree
    /// tree.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> OSAvlTree<T> {
        OSAvlTree {
            raw: RawOSAvlTree::new(),
        }
    }

    /// Makes a new, empty `OSAvlTree` with at least the specified node
    /// capacity pre-allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree: OSAvlTree<i32> = OSAvlTree::with_capacity(100);
    /// assert!(tree.capacity() >= 100);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> OSAvlTree<T> {
        OSAvlTree {
            raw: RawOSAvlTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the tree can hold without reallocating
    /// node storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1);
    /// assert!(!tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single element.
    ///
    /// The AVL balance invariant keeps this below `1.44 * log2(len + 2)`
    /// regardless of insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree: OSAvlTree<i32> = (0..7).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Clears the tree, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the smallest element in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// assert_eq!(tree.first(), None);
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns a reference to the largest element in the tree, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// assert_eq!(tree.last(), None);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.last(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Gets an iterator over the elements of the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([3, 1, 2, 2]);
    /// let values: Vec<_> = tree.iter().copied().collect();
    /// assert_eq!(values, [1, 2, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(n) for a full pass.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.raw)
    }

    /// Gets an in-order iterator yielding each element together with the size
    /// of the subtree rooted at its node.
    ///
    /// This is a read-only debugging and verification aid: the sizes expose
    /// the order-statistic augmentation that [`get_by_rank`](OSAvlTree::get_by_rank)
    /// navigates by. Elements are visited in ascending order and the root's
    /// entry carries size [`len`](OSAvlTree::len).
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([2, 1, 3]);
    /// let entries: Vec<_> = tree.iter_with_sizes().map(|(v, s)| (*v, s)).collect();
    /// assert_eq!(entries, [(1, 1), (2, 3), (3, 1)]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; O(n) for a full pass.
    pub fn iter_with_sizes(&self) -> IterWithSizes<'_, T> {
        IterWithSizes::new(&self.raw)
    }
}

impl<T: Ord> OSAvlTree<T> {
    /// Adds a value to the tree.
    ///
    /// Insertion always succeeds and always grows the tree by exactly one
    /// element; a value equal to one already present is kept as a duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    ///
    /// tree.insert(2);
    /// tree.insert(2);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) {
        self.raw.insert(value);
    }

    /// If the tree contains an element equal to the value, removes one such
    /// occurrence and drops it. Returns whether an element was removed.
    ///
    /// Removing a value that is not present is a no-op. When duplicates are
    /// present, exactly one occurrence is removed; which one is unspecified.
    ///
    /// The value may be any borrowed form of the tree's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the element
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// tree.insert(2);
    /// assert_eq!(tree.remove(&2), true);
    /// assert_eq!(tree.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value).is_some()
    }

    /// Removes and returns one element equal to the given value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// tree.insert(2);
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }

    /// Returns `true` if the tree contains an element equal to the value.
    ///
    /// The value may be any borrowed form of the tree's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the element
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([1, 2, 3]);
    /// assert_eq!(tree.contains(&1), true);
    /// assert_eq!(tree.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(value)
    }
}

impl<T> Default for OSAvlTree<T> {
    fn default() -> Self {
        OSAvlTree::new()
    }
}

impl<T: Clone> Clone for OSAvlTree<T> {
    fn clone(&self) -> Self {
        OSAvlTree {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OSAvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for OSAvlTree<T> {
    fn eq(&self, other: &OSAvlTree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for OSAvlTree<T> {}

impl<T: Ord> FromIterator<T> for OSAvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = OSAvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OSAvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for OSAvlTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSAvlTree<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for OSAvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `OSAvlTree`'s contents in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avos_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([4, 1, 2, 3]);
    ///
    /// let v: Vec<_> = tree.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OSAvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(tree: &'a RawOSAvlTree<T>) -> Self {
        let mut iter = Iter {
            tree: Some(tree),
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: tree.len(),
        };
        let mut current = tree.root();
        while let Some(h) = current {
            iter.front.push(h);
            current = tree.node(h).left;
        }
        let mut current = tree.root();
        while let Some(h) = current {
            iter.back.push(h);
            current = tree.node(h).right;
        }
        iter
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;

        let node = tree.node(self.front.pop()?);
        let mut current = node.right;
        while let Some(h) = current {
            self.front.push(h);
            current = tree.node(h).left;
        }

        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree?;

        let node = tree.node(self.back.pop()?);
        let mut current = node.left;
        while let Some(h) = current {
            self.back.push(h);
            current = tree.node(h).right;
        }

        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Default for Iter<'_, T> {
    /// Creates an empty `osavl_tree::Iter`.
    ///
    /// ```
    /// # use avos_tree::osavl_tree;
    /// let iter: osavl_tree::Iter<'_, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            tree: None,
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: 0,
        }
    }
}

impl<'a, T> IterWithSizes<'a, T> {
    fn new(tree: &'a RawOSAvlTree<T>) -> Self {
        let mut iter = IterWithSizes {
            tree: Some(tree),
            front: SmallVec::new(),
            remaining: tree.len(),
        };
        let mut current = tree.root();
        while let Some(h) = current {
            iter.front.push(h);
            current = tree.node(h).left;
        }
        iter
    }
}

impl<'a, T> Iterator for IterWithSizes<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<(&'a T, usize)> {
        let tree = self.tree?;

        let node = tree.node(self.front.pop()?);
        let mut current = node.right;
        while let Some(h) = current {
            self.front.push(h);
            current = tree.node(h).left;
        }

        self.remaining -= 1;
        Some((&node.value, node.size.to_usize()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterWithSizes<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for IterWithSizes<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterWithSizes<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterWithSizes").field("remaining", &self.remaining).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("inner", &self.inner).finish()
    }
}

impl<T> Default for IntoIter<T> {
    /// Creates an empty `osavl_tree::IntoIter`.
    ///
    /// ```
    /// # use avos_tree::osavl_tree;
    /// let iter: osavl_tree::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}
