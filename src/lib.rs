#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, clippy::undocumented_unsafe_blocks)]

#[cfg(test)]
extern crate std;

use core::{
    any::TypeId,
    fmt,
    mem::{self, ManuallyDrop, MaybeUninit},
};

#[macro_use]
mod macros;
mod error;
pub mod index;
pub mod repr;
pub mod table;

pub use self::{error::BadVariantAccess, table::MAX_ALTERNATIVES};
use self::{
    index::Index,
    repr::{AltList, At, Select},
    table::{CloneList, DebugList, EqList, TypeList},
};

/// The alternative at position `I` of list `S`.
pub type Alt<S, I> = <S as At<I>>::Output;

const EMPTY: u8 = u8::MAX;

/// Holds at most one value out of the alternative list `S`.
///
/// Usually spelled with the [`Variant!`] macro. The discriminant is the only
/// record of which alternative is live: it is set after a value is fully
/// written into the cell and cleared before that value is dropped.
///
/// Reads are checked: asking for an alternative that is not live returns
/// [`BadVariantAccess`] instead of reinterpreting the cell.
///
/// # Examples
///
/// ```rust
/// use tvariant::Variant;
///
/// let mut v: Variant![i32, String] = Variant::new(10i32);
/// assert_eq!(v.index(), Some(0));
///
/// v.assign(String::from("hi"));
/// assert_eq!(v.get::<String, _>().map(String::as_str), Ok("hi"));
/// assert!(v.get::<i32, _>().is_err());
///
/// let moved = v.take();
/// assert!(v.is_empty());
/// assert!(moved.eq_value(&String::from("hi")));
/// ```
pub struct Variant<S: AltList> {
    tag: u8,
    cell: MaybeUninit<S::Storage>,
}

impl<S: AltList> Variant<S> {
    /// The number of alternatives in `S`.
    pub const ALTERNATIVES: usize = S::LEN;

    /// A variant with nothing live.
    ///
    /// Every constructor starts here, so a list longer than
    /// [`MAX_ALTERNATIVES`] is rejected as soon as its variant is built:
    ///
    /// ```rust,compile_fail
    /// use tvariant::Variant;
    ///
    /// type Wide = Variant![
    ///     u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8,
    ///     u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8,
    ///     u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8,
    /// ];
    ///
    /// let _ = Wide::empty();
    /// ```
    pub const fn empty() -> Self {
        const {
            assert!(
                S::LEN <= MAX_ALTERNATIVES,
                "too many alternatives for one variant"
            )
        };
        Variant {
            tag: EMPTY,
            cell: MaybeUninit::uninit(),
        }
    }

    /// A variant holding `value`.
    pub fn new<T, I>(value: T) -> Self
    where
        S: Select<T, I>,
        I: Index,
    {
        let mut this = Self::empty();
        this.write::<T, I>(value);
        this
    }

    /// The position of the live alternative, or `None` when empty.
    pub fn index(&self) -> Option<usize> {
        (self.tag != EMPTY).then_some(usize::from(self.tag))
    }

    /// Whether nothing is live.
    pub fn is_empty(&self) -> bool {
        self.tag == EMPTY
    }

    /// Whether the alternative at `index` is live.
    pub fn holds_index(&self, index: usize) -> bool {
        self.index() == Some(index)
    }

    /// Whether alternative `T` is live.
    pub fn holds<T, I>(&self) -> bool
    where
        S: Select<T, I>,
        I: Index,
    {
        self.tag == I::TAG
    }

    /// The name of the live alternative's type.
    pub fn type_name(&self) -> Option<&'static str> {
        self.index().map(|tag| S::NAME[tag]())
    }

    /// Reads alternative `T`.
    ///
    /// # Errors
    ///
    /// [`BadVariantAccess`] when `T` is not the live alternative.
    pub fn get<T, I>(&self) -> Result<&T, BadVariantAccess>
    where
        S: Select<T, I>,
        I: Index,
    {
        self.check(I::TAG)?;
        // SAFETY: the discriminant says `T` is live.
        Ok(unsafe { &*S::slot(self.cell.as_ptr()) })
    }

    /// Mutable counterpart of [`Variant::get`].
    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, BadVariantAccess>
    where
        S: Select<T, I>,
        I: Index,
    {
        self.check(I::TAG)?;
        // SAFETY: the discriminant says `T` is live.
        Ok(unsafe { &mut *S::slot_mut(self.cell.as_mut_ptr()) })
    }

    /// Reads the alternative at position `I`.
    pub fn get_at<I>(&self) -> Result<&Alt<S, I>, BadVariantAccess>
    where
        S: At<I> + Select<Alt<S, I>, I>,
        I: Index,
    {
        self.get::<Alt<S, I>, I>()
    }

    /// Mutable counterpart of [`Variant::get_at`].
    pub fn get_at_mut<I>(&mut self) -> Result<&mut Alt<S, I>, BadVariantAccess>
    where
        S: At<I> + Select<Alt<S, I>, I>,
        I: Index,
    {
        self.get_mut::<Alt<S, I>, I>()
    }

    /// Whether `T` is live and equal to `value`.
    pub fn eq_value<T, I>(&self, value: &T) -> bool
    where
        S: Select<T, I>,
        I: Index,
        T: PartialEq,
    {
        self.get::<T, I>().map_or(false, |held| held == value)
    }

    /// Drops the live value, if any, and stores `value` instead.
    pub fn assign<T, I>(&mut self, value: T) -> &mut T
    where
        S: Select<T, I>,
        I: Index,
    {
        self.destroy();
        self.write::<T, I>(value)
    }

    /// Stores `value` and hands back the previous content.
    pub fn replace<T, I>(&mut self, value: T) -> Self
    where
        S: Select<T, I>,
        I: Index,
    {
        let old = self.take();
        self.write::<T, I>(value);
        old
    }

    /// Drops the live value, if any.
    pub fn clear(&mut self) {
        self.destroy();
    }

    /// Moves the content out, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        let mut out = Self::empty();
        self.move_into(&mut out);
        out
    }

    /// Drops the live value, if any, then moves `source`'s content in,
    /// leaving `source` empty.
    pub fn move_from(&mut self, source: &mut Self) {
        self.destroy();
        source.move_into(self);
    }

    /// Unwraps alternative `T`, or gives the variant back if another
    /// alternative (or nothing) is live.
    pub fn into_inner<T, I>(self) -> Result<T, Self>
    where
        S: Select<T, I>,
        I: Index,
    {
        if self.tag != I::TAG {
            return Err(self);
        }
        lifecycle!(index = self.tag, alternative = S::NAME[usize::from(self.tag)](), "unwrap");
        let this = ManuallyDrop::new(self);
        // SAFETY: `T` is live and `this` is never dropped, so it is read once.
        Ok(unsafe { S::slot(this.cell.as_ptr()).read() })
    }

    fn write<T, I>(&mut self, value: T) -> &mut T
    where
        S: Select<T, I>,
        I: Index,
    {
        debug_assert_eq!(self.tag, EMPTY);
        // SAFETY: the cell is vacant, so nothing live is overwritten.
        let slot = unsafe {
            let slot = S::slot_mut(self.cell.as_mut_ptr());
            slot.write(value);
            slot
        };
        self.tag = I::TAG;
        lifecycle!(index = I::TAG, alternative = core::any::type_name::<T>(), "construct");
        // SAFETY: just written, and borrowed from `self` for the returned lifetime.
        unsafe { &mut *slot }
    }

    fn destroy(&mut self) {
        let tag = mem::replace(&mut self.tag, EMPTY);
        if tag == EMPTY {
            return;
        }
        let tag = usize::from(tag);
        lifecycle!(index = tag, alternative = S::NAME[tag](), "destroy");
        if S::NEEDS_DROP {
            // SAFETY: `tag` was the live discriminant; it is already cleared.
            unsafe { S::DROP[tag](self.cell.as_mut_ptr().cast()) }
        }
    }

    fn move_into(&mut self, target: &mut Self) {
        debug_assert_eq!(target.tag, EMPTY);
        let Some(tag) = self.index() else {
            return;
        };
        lifecycle!(index = tag, alternative = S::NAME[tag](), "move");
        // SAFETY: `tag` is live in `self`, `target` is vacant, and the two are
        // distinct borrows.
        unsafe { S::MOVE[tag](self.cell.as_ptr().cast(), target.cell.as_mut_ptr().cast()) };
        target.tag = self.tag;
        self.tag = EMPTY;
    }

    fn check(&self, requested: u8) -> Result<(), BadVariantAccess> {
        if self.tag == requested {
            Ok(())
        } else {
            Err(BadVariantAccess::new(requested, self.index()))
        }
    }
}

impl<S: TypeList> Variant<S> {
    /// The [`TypeId`] of the live alternative.
    pub fn type_id(&self) -> Option<TypeId> {
        self.index().map(|tag| S::TYPE_ID[tag]())
    }

    /// Whether the live alternative is `T`. Unlike [`Variant::holds`], `T`
    /// may be any type; one outside the list is simply never held.
    pub fn holds_alternative<T: ?Sized + 'static>(&self) -> bool {
        self.type_id() == Some(TypeId::of::<T>())
    }
}

impl<S: CloneList> Variant<S> {
    fn copy_from(&mut self, source: &Self) {
        debug_assert_eq!(self.tag, EMPTY);
        let Some(tag) = source.index() else {
            return;
        };
        lifecycle!(index = tag, alternative = S::NAME[tag](), "clone");
        // SAFETY: `tag` is live in `source` and `self` is vacant.
        unsafe { S::CLONE[tag](source.cell.as_ptr().cast(), self.cell.as_mut_ptr().cast()) };
        self.tag = source.tag;
    }
}

impl<S: AltList> Default for Variant<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: AltList> Drop for Variant<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: CloneList> Clone for Variant<S> {
    fn clone(&self) -> Self {
        let mut out = Self::empty();
        out.copy_from(self);
        out
    }

    fn clone_from(&mut self, source: &Self) {
        self.destroy();
        self.copy_from(source);
    }
}

impl<S: EqList> PartialEq for Variant<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.index().map_or(true, |tag| {
                // SAFETY: both sides hold alternative `tag`.
                unsafe { S::EQ[tag](self.cell.as_ptr().cast(), other.cell.as_ptr().cast()) }
            })
    }
}

impl<S: EqList + Eq> Eq for Variant<S> {}

impl<S: DebugList> fmt::Debug for Variant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            // SAFETY: `tag` is live.
            Some(tag) => unsafe { S::DEBUG[tag](self.cell.as_ptr().cast(), f) },
            None => f.write_str("Empty"),
        }
    }
}
