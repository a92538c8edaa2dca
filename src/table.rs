//! Discriminant-indexed dispatch tables.
//!
//! Every lifecycle operation of a [`Variant`] is a call through a table of
//! function pointers, one slot per alternative, looked up by the discriminant.
//! A list's table is its tail's table with the head's entry prepended, which
//! is computed once per list in `const` context. Slots past the end of the
//! list hold a vacant entry that is never called.
//!
//! All entries take the bare cell address: every alternative lives at offset 0
//! of the cell (see [`repr`](crate::repr)).
//!
//! The capability lists below extend [`AltList`], which is sealed, so their
//! tables are only ever built from the crate's own cons-lists.
//!
//! [`Variant`]: crate::Variant

use core::{any::TypeId, fmt, ptr};

use crate::repr::AltList;

/// The largest number of alternatives a single list may carry.
pub const MAX_ALTERNATIVES: usize = 32;

/// A dispatch table with room for [`MAX_ALTERNATIVES`] entries.
pub type Table<F> = [F; MAX_ALTERNATIVES];

#[doc(hidden)]
pub type DropFn = unsafe fn(*mut u8);
#[doc(hidden)]
pub type MoveFn = unsafe fn(*const u8, *mut u8);
#[doc(hidden)]
pub type CloneFn = unsafe fn(*const u8, *mut u8);
#[doc(hidden)]
pub type EqFn = unsafe fn(*const u8, *const u8) -> bool;
#[doc(hidden)]
pub type DebugFn = unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result;
#[doc(hidden)]
pub type NameFn = fn() -> &'static str;
#[doc(hidden)]
pub type TypeIdFn = fn() -> TypeId;

pub(crate) const fn vacant<F: Copy>(entry: F) -> Table<F> {
    [entry; MAX_ALTERNATIVES]
}

/// Shifts `tail` one slot up and puts `head` in slot 0.
pub(crate) const fn prepend<F: Copy>(head: F, tail: &Table<F>) -> Table<F> {
    let mut table = [head; MAX_ALTERNATIVES];
    let mut i = 1;
    while i < MAX_ALTERNATIVES {
        table[i] = tail[i - 1];
        i += 1;
    }
    table
}

const VACANT: &str = "dispatch through a vacant table slot";

pub(crate) unsafe fn vacant_drop(_: *mut u8) {
    unreachable!("{VACANT}")
}

pub(crate) unsafe fn vacant_move(_: *const u8, _: *mut u8) {
    unreachable!("{VACANT}")
}

unsafe fn vacant_clone(_: *const u8, _: *mut u8) {
    unreachable!("{VACANT}")
}

unsafe fn vacant_eq(_: *const u8, _: *const u8) -> bool {
    unreachable!("{VACANT}")
}

unsafe fn vacant_debug(_: *const u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
    unreachable!("{VACANT}")
}

pub(crate) fn vacant_name() -> &'static str {
    unreachable!("{VACANT}")
}

fn vacant_type_id() -> TypeId {
    unreachable!("{VACANT}")
}

/// # Safety
///
/// `cell` must hold a live `T`.
pub(crate) unsafe fn drop_slot<T>(cell: *mut u8) {
    // SAFETY: upheld by the caller.
    unsafe { ptr::drop_in_place(cell.cast::<T>()) }
}

/// # Safety
///
/// `src` must hold a live `T` that the caller stops treating as live, and
/// `dst` must be a vacant cell that does not overlap `src`.
pub(crate) unsafe fn move_slot<T>(src: *const u8, dst: *mut u8) {
    // SAFETY: upheld by the caller.
    unsafe { ptr::copy_nonoverlapping(src.cast::<T>(), dst.cast::<T>(), 1) }
}

/// # Safety
///
/// `src` must hold a live `T` and `dst` must be a vacant cell.
unsafe fn clone_slot<T: Clone>(src: *const u8, dst: *mut u8) {
    // SAFETY: upheld by the caller.
    unsafe { dst.cast::<T>().write((*src.cast::<T>()).clone()) }
}

/// # Safety
///
/// Both cells must hold a live `T`.
unsafe fn eq_slot<T: PartialEq>(lhs: *const u8, rhs: *const u8) -> bool {
    // SAFETY: upheld by the caller.
    unsafe { *lhs.cast::<T>() == *rhs.cast::<T>() }
}

/// # Safety
///
/// `cell` must hold a live `T`.
unsafe fn debug_slot<T: fmt::Debug>(cell: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // SAFETY: upheld by the caller.
    unsafe { fmt::Debug::fmt(&*cell.cast::<T>(), f) }
}

/// Lists whose alternatives are all [`Clone`].
pub trait CloneList: AltList {
    #[doc(hidden)]
    const CLONE: &'static Table<CloneFn>;
}

impl CloneList for () {
    const CLONE: &'static Table<CloneFn> = &vacant(vacant_clone as CloneFn);
}

impl<Head: Clone, Tail: CloneList> CloneList for (Head, Tail) {
    const CLONE: &'static Table<CloneFn> = &prepend(clone_slot::<Head> as CloneFn, Tail::CLONE);
}

/// Lists whose alternatives are all [`PartialEq`].
///
/// Comparing two variants is only possible over such a list; there is no
/// fallback for alternatives that cannot be compared.
pub trait EqList: AltList {
    #[doc(hidden)]
    const EQ: &'static Table<EqFn>;
}

impl EqList for () {
    const EQ: &'static Table<EqFn> = &vacant(vacant_eq as EqFn);
}

impl<Head: PartialEq, Tail: EqList> EqList for (Head, Tail) {
    const EQ: &'static Table<EqFn> = &prepend(eq_slot::<Head> as EqFn, Tail::EQ);
}

/// Lists whose alternatives are all [`Debug`](fmt::Debug).
pub trait DebugList: AltList {
    #[doc(hidden)]
    const DEBUG: &'static Table<DebugFn>;
}

impl DebugList for () {
    const DEBUG: &'static Table<DebugFn> = &vacant(vacant_debug as DebugFn);
}

impl<Head: fmt::Debug, Tail: DebugList> DebugList for (Head, Tail) {
    const DEBUG: &'static Table<DebugFn> = &prepend(debug_slot::<Head> as DebugFn, Tail::DEBUG);
}

/// Lists whose alternatives are all `'static`, and so have a [`TypeId`].
pub trait TypeList: AltList + 'static {
    #[doc(hidden)]
    const TYPE_ID: &'static Table<TypeIdFn>;
}

impl TypeList for () {
    const TYPE_ID: &'static Table<TypeIdFn> = &vacant(vacant_type_id as TypeIdFn);
}

impl<Head: 'static, Tail: TypeList> TypeList for (Head, Tail) {
    const TYPE_ID: &'static Table<TypeIdFn> = &prepend(TypeId::of::<Head> as TypeIdFn, Tail::TYPE_ID);
}

#[cfg(test)]
mod tests {
    use core::{cell::Cell, mem::MaybeUninit};
    use std::{rc::Rc, string::String};

    use super::*;

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn prepend_shifts_tail() {
        let tail = prepend(2u8, &prepend(3u8, &vacant(0u8)));
        let table = prepend(1u8, &tail);
        assert_eq!(&table[..4], &[1, 2, 3, 0]);
        assert!(table[4..].iter().all(|&slot| slot == 0));
    }

    #[test]
    fn tables_line_up_with_positions() {
        type List = crate::T![u8, String, u64];

        assert_eq!(<List as AltList>::NAME[0](), core::any::type_name::<u8>());
        assert_eq!(<List as AltList>::NAME[1](), core::any::type_name::<String>());
        assert_eq!(<List as TypeList>::TYPE_ID[2](), TypeId::of::<u64>());
    }

    #[test]
    fn drop_entry_runs_destructor_once() {
        type List = crate::T![u8, Counted];

        let drops = Rc::new(Cell::new(0));
        let mut cell = MaybeUninit::new(Counted(drops.clone()));

        // SAFETY: the cell holds a live `Counted`, dropped exactly once here.
        unsafe { <List as AltList>::DROP[1](cell.as_mut_ptr().cast()) };
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn clone_and_eq_entries() {
        type List = crate::T![u8, String];

        let src = MaybeUninit::new(String::from("hi"));
        let mut dst = MaybeUninit::<String>::uninit();

        // SAFETY: `src` holds a live `String` and `dst` is vacant.
        unsafe { <List as CloneList>::CLONE[1](src.as_ptr().cast(), dst.as_mut_ptr().cast()) };
        // SAFETY: the clone entry initialized `dst`.
        let mut dst = unsafe { dst.assume_init() };
        // SAFETY: both cells hold a live `String`.
        assert!(unsafe { <List as EqList>::EQ[1](src.as_ptr().cast(), (&dst as *const String).cast()) });

        dst.push('!');
        // SAFETY: `src` holds a live `String`.
        assert_eq!(unsafe { src.assume_init() }, "hi");
        assert_eq!(dst, "hi!");
    }
}
