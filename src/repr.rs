//! The storage cell and the type/index resolver behind [`Variant`].
//!
//! # Implementation details
//!
//! An alternative list is a cons-list of tuples, `(A, (B, (C, ())))`, and its
//! storage cell is a hand-written recursive union:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::{ManuallyDrop, MaybeUninit};
//!
//! struct Nil(Infallible);
//! #[repr(C)]
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawVariant3<A, B, C> {
//!     tag: u8,
//!     cell: MaybeUninit<Cons<A, Cons<B, Cons<C, Nil>>>>,
//! }
//! ```
//!
//! `#[repr(C)]` puts every alternative at offset 0 of the cell, which is what
//! lets the dispatch tables in [`table`](crate::table) work on the bare cell
//! address.
//!
//! [`Variant`]: crate::Variant

use core::{convert::Infallible, mem::ManuallyDrop, ptr};

use crate::{
    index::{Index, UInt, UTerm},
    table::{self, DropFn, MoveFn, NameFn, Table},
};

/// The terminator of the storage cell. Uninhabited: an empty list has no
/// alternative that could ever be live.
pub struct Nil(#[allow(dead_code)] Infallible);

/// One layer of the storage cell: either the head alternative or the rest.
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

mod sealed {
    use crate::index::{UInt, UTerm};

    pub trait List {}

    impl List for () {}

    impl<Head, Tail: List> List for (Head, Tail) {}

    pub trait Slot<T, I> {}

    impl<Head, Tail> Slot<Head, UTerm> for (Head, Tail) {}

    impl<Head, Tail: Slot<T, I>, T, I> Slot<T, UInt<I>> for (Head, Tail) {}
}

/// A fixed list of alternatives together with its storage cell and the
/// dispatch tables every list supports.
///
/// Sealed: only `()` and `(Head, Tail)` cons-lists are alternative lists.
///
/// ```rust,compile_fail
/// use tvariant::{repr::AltList, table::{DropFn, MoveFn, NameFn, Table}};
///
/// struct Mine;
///
/// unsafe fn drop_nothing(_: *mut u8) {}
/// unsafe fn move_nothing(_: *const u8, _: *mut u8) {}
/// fn no_name() -> &'static str { "" }
///
/// impl AltList for Mine {
///     type Storage = u8;
///     const LEN: usize = 1;
///     const NEEDS_DROP: bool = false;
///     const DROP: &'static Table<DropFn> = &[drop_nothing as DropFn; 32];
///     const MOVE: &'static Table<MoveFn> = &[move_nothing as MoveFn; 32];
///     const NAME: &'static Table<NameFn> = &[no_name as NameFn; 32];
/// }
/// ```
pub trait AltList: sealed::List {
    /// The storage cell: large and aligned enough for any alternative.
    type Storage;

    /// The number of alternatives.
    const LEN: usize;

    /// Whether any alternative has drop glue.
    const NEEDS_DROP: bool;

    #[doc(hidden)]
    const DROP: &'static Table<DropFn>;

    #[doc(hidden)]
    const MOVE: &'static Table<MoveFn>;

    #[doc(hidden)]
    const NAME: &'static Table<NameFn>;
}

impl AltList for () {
    type Storage = Nil;

    const LEN: usize = 0;
    const NEEDS_DROP: bool = false;

    const DROP: &'static Table<DropFn> = &table::vacant(table::vacant_drop as DropFn);
    const MOVE: &'static Table<MoveFn> = &table::vacant(table::vacant_move as MoveFn);
    const NAME: &'static Table<NameFn> = &table::vacant(table::vacant_name as NameFn);
}

impl<Head, Tail> AltList for (Head, Tail)
where
    Tail: AltList,
{
    type Storage = Cons<Head, Tail::Storage>;

    const LEN: usize = Tail::LEN + 1;
    const NEEDS_DROP: bool = core::mem::needs_drop::<Head>() || Tail::NEEDS_DROP;

    const DROP: &'static Table<DropFn> =
        &table::prepend(table::drop_slot::<Head> as DropFn, Tail::DROP);
    const MOVE: &'static Table<MoveFn> =
        &table::prepend(table::move_slot::<Head> as MoveFn, Tail::MOVE);
    const NAME: &'static Table<NameFn> =
        &table::prepend(core::any::type_name::<Head> as NameFn, Tail::NAME);
}

/// Implemented by a list iff `T` sits at position `I`.
///
/// A type missing from the list has no impl, so every typed operation on it
/// fails to compile. A type listed twice leaves `I` ambiguous and has to be
/// picked by naming the position:
///
/// ```rust,compile_fail
/// use tvariant::Variant;
///
/// let v: Variant![u8, u8] = Variant::new(1u8);
/// ```
///
/// Sealed like [`AltList`]: the slot addresses come from the list's own
/// layout and cannot be supplied from outside.
///
/// ```rust,compile_fail
/// use tvariant::{index::U0, repr::{AltList, Select}};
///
/// struct Wide([u64; 64]);
///
/// impl Select<Wide, U0> for (u8, ()) {
///     unsafe fn slot(cell: *const <Self as AltList>::Storage) -> *const Wide {
///         cell.cast()
///     }
///
///     unsafe fn slot_mut(cell: *mut <Self as AltList>::Storage) -> *mut Wide {
///         cell.cast()
///     }
/// }
/// ```
pub trait Select<T, I: Index>: AltList + sealed::Slot<T, I> {
    /// The address of alternative `T` inside the cell.
    ///
    /// # Safety
    ///
    /// `cell` must point into a live (possibly uninitialized) storage cell.
    #[doc(hidden)]
    unsafe fn slot(cell: *const Self::Storage) -> *const T;

    /// The address at which alternative `T` is constructed in place.
    ///
    /// # Safety
    ///
    /// `cell` must point into a live (possibly uninitialized) storage cell.
    #[doc(hidden)]
    unsafe fn slot_mut(cell: *mut Self::Storage) -> *mut T;
}

impl<Head, Tail> Select<Head, UTerm> for (Head, Tail)
where
    Tail: AltList,
{
    unsafe fn slot(cell: *const Self::Storage) -> *const Head {
        // SAFETY: the caller guarantees `cell` is in bounds; no value is read.
        let ptr = unsafe { ptr::addr_of!((*cell).data) }.cast::<Head>();
        debug_assert_eq!(ptr.cast::<u8>(), cell.cast::<u8>());
        ptr
    }

    unsafe fn slot_mut(cell: *mut Self::Storage) -> *mut Head {
        // SAFETY: the caller guarantees `cell` is in bounds; no value is read.
        let ptr = unsafe { ptr::addr_of_mut!((*cell).data) }.cast::<Head>();
        debug_assert_eq!(ptr.cast::<u8>(), cell.cast::<u8>());
        ptr
    }
}

impl<Head, Tail, T, I: Index> Select<T, UInt<I>> for (Head, Tail)
where
    Tail: Select<T, I>,
{
    unsafe fn slot(cell: *const Self::Storage) -> *const T {
        // SAFETY: `next` is in bounds of `cell`, so the tail's contract holds.
        unsafe {
            let next = ptr::addr_of!((*cell).next).cast::<Tail::Storage>();
            Tail::slot(next)
        }
    }

    unsafe fn slot_mut(cell: *mut Self::Storage) -> *mut T {
        // SAFETY: `next` is in bounds of `cell`, so the tail's contract holds.
        unsafe {
            let next = ptr::addr_of_mut!((*cell).next).cast::<Tail::Storage>();
            Tail::slot_mut(next)
        }
    }
}

/// Maps a position back to the alternative stored there.
pub trait At<I: Index>: AltList {
    /// The alternative at position `I`.
    type Output;
}

impl<Head, Tail: AltList> At<UTerm> for (Head, Tail) {
    type Output = Head;
}

impl<Head, Tail, I: Index> At<UInt<I>> for (Head, Tail)
where
    Tail: At<I>,
{
    type Output = Tail::Output;
}
