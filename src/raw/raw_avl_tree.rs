use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::size::Size;

/// Upper bound on the depth of any representable tree.
///
/// The AVL invariant keeps the height under `1.44 * log2(n + 2)` and the arena
/// caps `n` below 2^32, so 48 levels always suffice for a traversal stack.
pub(crate) const MAX_HEIGHT: usize = 48;

/// The core AVL implementation backing `OSAvlTree`.
///
/// Nodes live in a slot arena and link to each other through handles; a node
/// exclusively owns its children, and no handle ever escapes the crate.
/// Structural changes descend recursively, then recompute heights and subtree
/// sizes and rebalance on the unwind, so every invariant holds again before a
/// public operation returns.
#[derive(Clone)]
pub(crate) struct RawOSAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of elements in the tree.
    len: usize,
}

impl<T> RawOSAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with the specified capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns a handle to the root node, if any.
    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Returns the height of the tree (0 for an empty tree, 1 for a single
    /// node).
    pub(crate) fn height(&self) -> usize {
        self.height_of(self.root) as usize
    }

    /// Returns a reference to the smallest element, if any.
    pub(crate) fn first(&self) -> Option<&T> {
        let mut current = self.root?;
        loop {
            match self.nodes.get(current).left {
                Some(left) => current = left,
                None => return Some(&self.nodes.get(current).value),
            }
        }
    }

    /// Returns a reference to the largest element, if any.
    pub(crate) fn last(&self) -> Option<&T> {
        let mut current = self.root?;
        loop {
            match self.nodes.get(current).right {
                Some(right) => current = right,
                None => return Some(&self.nodes.get(current).value),
            }
        }
    }

    /// Returns the element at `rank` (0-indexed in ascending order), or `None`
    /// if `rank >= len`. Never mutates the tree.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        if rank >= self.len {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        // The rank bound above guarantees every descent lands on a live node.
        loop {
            let node = self.nodes.get(current);
            let left_size = self.size_of(node.left);
            match remaining.cmp(&left_size) {
                Equal => return Some(&node.value),
                Less => current = node.left.unwrap(),
                Greater => {
                    remaining -= left_size + 1;
                    current = node.right.unwrap();
                }
            }
        }
    }

    /// Drains all elements from the tree in ascending order.
    /// This is O(n) as it walks the tree once and skips rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len);
        let mut stack: SmallVec<[Handle; MAX_HEIGHT]> = SmallVec::new();
        let mut current = self.root;

        while current.is_some() || !stack.is_empty() {
            while let Some(h) = current {
                stack.push(h);
                current = self.nodes.get(h).left;
            }
            let node = self.nodes.take(stack.pop().unwrap());
            current = node.right;
            result.push(node.value);
        }

        self.nodes.clear();
        self.root = None;
        self.len = 0;

        result
    }

    fn height_of(&self, node: Option<Handle>) -> u8 {
        node.map_or(0, |h| self.nodes.get(h).height)
    }

    fn size_of(&self, node: Option<Handle>) -> usize {
        node.map_or(0, |h| self.nodes.get(h).size.to_usize())
    }

    fn children(&self, node: Handle) -> (Option<Handle>, Option<Handle>) {
        let node = self.nodes.get(node);
        (node.left, node.right)
    }

    fn fix_height(&mut self, node: Handle) {
        let (left, right) = self.children(node);
        let height = 1 + self.height_of(left).max(self.height_of(right));
        self.nodes.get_mut(node).height = height;
    }

    fn fix_size(&mut self, node: Handle) {
        let (left, right) = self.children(node);
        let size = Size::from_usize(1 + self.size_of(left) + self.size_of(right));
        self.nodes.get_mut(node).size = size;
    }

    /// Rotates `node` down to the left; its right child becomes the subtree
    /// root and the child's left subtree is reattached on the vacated side.
    fn rotate_left(&mut self, node: Handle) -> Handle {
        let down = self.nodes.get(node).right.unwrap();
        let middle = self.nodes.get(down).left;
        self.nodes.get_mut(node).right = middle;
        self.nodes.get_mut(down).left = Some(node);

        // Child first: the demoted node's metadata feeds the new root's.
        self.fix_size(node);
        self.fix_height(node);
        self.fix_size(down);
        self.fix_height(down);

        down
    }

    /// Mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, node: Handle) -> Handle {
        let down = self.nodes.get(node).left.unwrap();
        let middle = self.nodes.get(down).right;
        self.nodes.get_mut(node).left = middle;
        self.nodes.get_mut(down).right = Some(node);

        self.fix_size(node);
        self.fix_height(node);
        self.fix_size(down);
        self.fix_height(down);

        down
    }

    /// Double rotation for a right-heavy node whose right child leans left:
    /// rotate the right child right, then this node left.
    fn rotate_right_left(&mut self, node: Handle) -> Handle {
        let right = self.nodes.get(node).right.unwrap();
        let new_right = self.rotate_right(right);
        self.nodes.get_mut(node).right = Some(new_right);
        self.rotate_left(node)
    }

    /// Mirror of [`Self::rotate_right_left`].
    fn rotate_left_right(&mut self, node: Handle) -> Handle {
        let left = self.nodes.get(node).left.unwrap();
        let new_left = self.rotate_left(left);
        self.nodes.get_mut(node).left = Some(new_left);
        self.rotate_right(node)
    }

    /// Restores the balance invariant at `node` after a single structural
    /// change below it, returning the new subtree root.
    ///
    /// Child metadata is already correct on the unwind path, so this first
    /// recomputes the node's own height, then resolves at most one of the
    /// four imbalance shapes:
    ///
    /// - right-heavy, right child right-leaning or balanced: single left
    ///   rotation (mirror: single right rotation);
    /// - right-heavy, right child strictly left-leaning: double rotation
    ///   (mirror: double rotation the other way).
    ///
    /// With a height difference of at most 1 no rotation is needed and only
    /// the subtree size is recomputed. Rotations recompute both counters for
    /// the nodes they touch themselves.
    fn rebalance(&mut self, node: Handle) -> Handle {
        self.fix_height(node);

        let (left, right) = self.children(node);
        let left_height = self.height_of(left);
        let right_height = self.height_of(right);

        // A single insert or remove can skew sibling heights by at most 2.
        if right_height == left_height + 2 {
            let (inner_left, inner_right) = self.children(right.unwrap());
            if self.height_of(inner_right) >= self.height_of(inner_left) {
                return self.rotate_left(node);
            }
            return self.rotate_right_left(node);
        }

        if left_height == right_height + 2 {
            let (inner_left, inner_right) = self.children(left.unwrap());
            if self.height_of(inner_left) >= self.height_of(inner_right) {
                return self.rotate_right(node);
            }
            return self.rotate_left_right(node);
        }

        self.fix_size(node);
        node
    }
}

impl<T: Ord> RawOSAvlTree<T> {
    /// Inserts a value into the tree. Always succeeds; duplicates are kept.
    pub(crate) fn insert(&mut self, value: T) {
        let root = self.root;
        let new_root = self.insert_at(root, value);
        self.root = Some(new_root);
        self.len += 1;
    }

    fn insert_at(&mut self, node: Option<Handle>, value: T) -> Handle {
        let Some(h) = node else {
            return self.nodes.alloc(Node::new_leaf(value));
        };

        // Strictly smaller values descend left; equal values join the right
        // subtree, which keeps ordering intact for every other value.
        if value < self.nodes.get(h).value {
            let left = self.nodes.get(h).left;
            let new_left = self.insert_at(left, value);
            self.nodes.get_mut(h).left = Some(new_left);
        } else {
            let right = self.nodes.get(h).right;
            let new_right = self.insert_at(right, value);
            self.nodes.get_mut(h).right = Some(new_right);
        }

        self.rebalance(h)
    }

    /// Removes one occurrence of `value` and returns it, or `None` if the
    /// tree holds no matching element (in which case nothing changes).
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root;
        let (new_root, removed) = self.remove_at(root, value);
        self.root = new_root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn remove_at<Q>(&mut self, node: Option<Handle>, value: &Q) -> (Option<Handle>, Option<T>)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(h) = node else {
            return (None, None);
        };

        match value.cmp(self.nodes.get(h).value.borrow()) {
            Less => {
                let left = self.nodes.get(h).left;
                let (new_left, removed) = self.remove_at(left, value);
                self.nodes.get_mut(h).left = new_left;
                if removed.is_none() {
                    return (Some(h), None);
                }
                (Some(self.rebalance(h)), removed)
            }
            Greater => {
                let right = self.nodes.get(h).right;
                let (new_right, removed) = self.remove_at(right, value);
                self.nodes.get_mut(h).right = new_right;
                if removed.is_none() {
                    return (Some(h), None);
                }
                (Some(self.rebalance(h)), removed)
            }
            Equal => {
                let node = self.nodes.take(h);
                let Some(right) = node.right else {
                    // No right child: the left child (possibly absent)
                    // replaces the removed node directly.
                    return (node.left, Some(node.value));
                };

                // Promote the minimum of the right subtree into the vacated
                // position; detaching it already rebalanced that subtree.
                let (rest, min) = self.detach_min(right);
                {
                    let min_node = self.nodes.get_mut(min);
                    min_node.left = node.left;
                    min_node.right = rest;
                }
                (Some(self.rebalance(min)), Some(node.value))
            }
        }
    }

    /// Detaches the minimum node of the subtree rooted at `node`, returning
    /// the rebalanced remainder and the detached node. The detached node's
    /// links are stale; the caller reattaches both children.
    fn detach_min(&mut self, node: Handle) -> (Option<Handle>, Handle) {
        let Some(left) = self.nodes.get(node).left else {
            let right = self.nodes.get(node).right;
            return (right, node);
        };

        let (new_left, min) = self.detach_min(left);
        self.nodes.get_mut(node).left = new_left;
        (Some(self.rebalance(node)), min)
    }

    /// Returns the zero-based rank of a matching element, or `None` if the
    /// value is not present. With duplicates present, the reported rank is
    /// that of the first equal node on the search path.
    pub(crate) fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;

        while let Some(h) = current {
            let node = self.nodes.get(h);
            match value.cmp(node.value.borrow()) {
                Less => current = node.left,
                Greater => {
                    rank += self.size_of(node.left) + 1;
                    current = node.right;
                }
                Equal => return Some(rank + self.size_of(node.left)),
            }
        }

        None
    }

    /// Returns true if the tree contains an element equal to `value`.
    pub(crate) fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.rank_of(value).is_some()
    }
}
