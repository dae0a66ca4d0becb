//! The runtime half of `option_set!`: set algebra over a raw bit
//! representation.

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::BitXor;
use core::ops::Not;

/// An unsigned integer usable as the raw storage of an [`OptionSet`].
pub trait OptionBits:
    Copy
    + Eq
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    const EMPTY: Self;
}

macro_rules! impl_option_bits {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionBits for $ty {
                const EMPTY: Self = 0;
            }
        )*
    };
}

impl_option_bits!(u8, u16, u32, u64, u128, usize);

/// A set of flags packed into an [`OptionBits`] value. `option_set!`
/// implements the two required methods; everything else is set algebra on
/// top of them.
pub trait OptionSet: Sized + Copy {
    type RawValue: OptionBits;

    fn raw_value(self) -> Self::RawValue;
    fn from_raw_value(raw_value: Self::RawValue) -> Self;

    fn empty() -> Self {
        Self::from_raw_value(Self::RawValue::EMPTY)
    }

    fn is_empty(self) -> bool {
        self.raw_value() == Self::RawValue::EMPTY
    }

    /// Whether every flag of `other` is present in `self`.
    fn contains(self, other: Self) -> bool {
        self.raw_value() & other.raw_value() == other.raw_value()
    }

    fn union(self, other: Self) -> Self {
        Self::from_raw_value(self.raw_value() | other.raw_value())
    }

    fn intersection(self, other: Self) -> Self {
        Self::from_raw_value(self.raw_value() & other.raw_value())
    }

    fn insert(&mut self, other: Self) {
        *self = self.union(other);
    }

    fn remove(&mut self, other: Self) {
        *self = Self::from_raw_value(self.raw_value() & !other.raw_value());
    }

    fn toggle(&mut self, other: Self) {
        *self = Self::from_raw_value(self.raw_value() ^ other.raw_value());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct Flags {
        raw_value: u8,
    }

    impl OptionSet for Flags {
        type RawValue = u8;

        fn raw_value(self) -> u8 {
            self.raw_value
        }

        fn from_raw_value(raw_value: u8) -> Self {
            Self { raw_value }
        }
    }

    const A: Flags = Flags { raw_value: 1 };
    const B: Flags = Flags { raw_value: 2 };

    #[test]
    fn set_algebra() {
        let mut set = Flags::empty();
        assert!(set.is_empty());
        set.insert(A);
        assert!(set.contains(A));
        assert!(!set.contains(B));
        set.insert(B);
        assert_eq!(set.raw_value(), 3);
        assert!(set.contains(A.union(B)));
        set.remove(A);
        assert_eq!(set, B);
        set.toggle(B);
        assert!(set.is_empty());
    }

    #[test]
    fn contains_is_subset_not_overlap() {
        let both = A.union(B);
        assert!(both.contains(A));
        assert!(!A.contains(both));
        assert_eq!(both.intersection(A), A);
    }
}
