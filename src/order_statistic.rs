/// A zero-based rank into the sorted order of a tree.
///
/// # Examples
///
/// ```
/// use avos_tree::{OSAvlTree, Rank};
///
/// let mut tree = OSAvlTree::new();
/// tree.insert(10);
/// tree.insert(20);
///
/// assert_eq!(tree[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
