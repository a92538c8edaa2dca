/// Constructs a [`struct@Variant`] type from a list of types.
///
/// # Examples
///
/// ```rust
/// use tvariant::Variant;
///
/// type Value = Variant![i32, u32, f64];
/// let v: Value = Variant::new(42u32);
/// assert_eq!(v.index(), Some(1));
/// ```
#[macro_export]
macro_rules! Variant {
    [$($t:ty),* $(,)?] => [$crate::Variant::<$crate::T![$($t,)*]>];
}

/// Constructs an alternative list (a cons-list of tuples) from a list of
/// types.
///
/// # Examples
///
/// ```rust
/// use tvariant::T;
///
/// type List = T![i32, u32, f64];
/// let _: Option<List> = None::<(i32, (u32, (f64, ())))>;
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}

/// Emits a lifecycle trace event when the `tracing` feature is enabled.
macro_rules! lifecycle {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!(target: "tvariant", $($arg)+);
    };
}
