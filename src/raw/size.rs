use core::num::NonZero;

#[cfg(test)]
type RawSize = u16;
#[cfg(not(test))]
type RawSize = u32;

/// Subtree element count stored on every node.
///
/// A node's subtree always contains the node itself, so the count is at least
/// one; storing it through `NonZero` keeps the niche available and the
/// representation as small as a `Handle`. `Size::MAX` matches the arena's
/// capacity limit, so a valid tree can never overflow a `Size`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(NonZero<RawSize>);

impl Size {
    pub(crate) const MAX: usize = (RawSize::MAX - 1) as usize;
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size >= 1, "`Size::from_usize()` - `size` < 1!");
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new(size as RawSize).unwrap())
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.get() as usize
    }
}
