//! Type-level positions into an alternative list.
//!
//! A position is a Peano natural: [`UTerm`] is zero and `UInt<U>` is one more
//! than `U`. Positions are usually inferred from the alternative type, but can
//! be named to pick an alternative by index:
//!
//! ```rust
//! use tvariant::{Variant, index::U1};
//!
//! let v: Variant![u8, &str] = Variant::new("hi");
//! assert_eq!(v.get_at::<U1>(), Ok(&"hi"));
//! ```
//!
//! The aliases stop at [`U31`], the last slot of a dispatch table. A position
//! past it has no discriminant:
//!
//! ```rust,compile_fail
//! use tvariant::index::{Index, UInt, U31};
//!
//! assert_eq!(<UInt<U31> as Index>::TAG, 32);
//! ```

#![allow(missing_docs)]

use core::marker::PhantomData;

use crate::table::MAX_ALTERNATIVES;

pub struct UTerm;

pub struct UInt<U>(PhantomData<U>);

/// A type-level position with its discriminant value.
///
/// `TAG` is always below [`MAX_ALTERNATIVES`], so it indexes a dispatch table
/// directly and never collides with the empty discriminant.
pub trait Index {
    const TAG: u8;
}

impl Index for UTerm {
    const TAG: u8 = 0;
}

impl<U: Index> Index for UInt<U> {
    const TAG: u8 = {
        assert!(
            (U::TAG as usize) + 1 < MAX_ALTERNATIVES,
            "position past the last dispatch table slot"
        );
        U::TAG + 1
    };
}

macro_rules! positions {
    ($prev:ident) => {};
    ($prev:ident $next:ident $($rest:ident)*) => {
        pub type $next = UInt<$prev>;
        positions!($next $($rest)*);
    };
}

pub type U0 = UTerm;

positions! {
    U0 U1 U2 U3 U4 U5 U6 U7 U8 U9
    U10 U11 U12 U13 U14 U15 U16 U17 U18 U19
    U20 U21 U22 U23 U24 U25 U26 U27 U28 U29
    U30 U31
}

const _: () = assert!(U31::TAG as usize == MAX_ALTERNATIVES - 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_count_up() {
        assert_eq!(U0::TAG, 0);
        assert_eq!(U1::TAG, 1);
        assert_eq!(U9::TAG, 9);
        assert_eq!(U31::TAG, 31);
    }

    #[test]
    fn last_alias_is_last_slot() {
        assert_eq!(usize::from(U31::TAG), MAX_ALTERNATIVES - 1);
        assert_eq!(usize::from(<UInt<U30> as Index>::TAG), usize::from(U31::TAG));
    }
}
