//! `fixed_capacity_vec`: an inline, fixed-capacity vector for Rust
//!
//! Provides [`FixedCapacityVec`], a vector whose storage is an array of `CAP`
//! uninitialized slots embedded in the value itself. It never allocates and
//! never grows: exceeding the capacity is a caller bug that panics in the
//! checked API and is undefined behavior in the `*_unchecked` API.
//!
//! Most operations come in three flavours:
//! - `op` checks its preconditions and panics with a descriptive message,
//! - `try_op` returns [`None`] instead of panicking,
//! - `op_unchecked` is `unsafe` and only checks its preconditions with
//!   `debug_assert!`.
//!
//! Bounds-checked access through [`FixedCapacityVec::at`] is the one operation
//! that reports a recoverable error, [`OutOfRange`].
//!
//! ```
//! use fixed_capacity_vec::FixedCapacityVec;
//!
//! let mut vec = FixedCapacityVec::<i32, 4>::new();
//! vec.push(0);
//! vec.push(1);
//! vec.push(2);
//! vec.push(3);
//! assert_eq!(vec.len(), vec.capacity());
//! assert!(vec.at(4).is_err());
//!
//! assert_eq!(vec.erase(0), 0);
//! assert_eq!(vec, [1, 2, 3]);
//!
//! let pos = vec.erase_range(0..3);
//! assert_eq!(pos, 0);
//! assert_eq!(pos, vec.len());
//! ```
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::undocumented_unsafe_blocks)]
#![deny(clippy::multiple_unsafe_ops_per_block)]
#![deny(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::std_instead_of_core)]
#![deny(clippy::std_instead_of_alloc)]
#![deny(clippy::missing_inline_in_public_items)]
#![deny(clippy::return_self_not_must_use)]
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

/// Internal module that are not meant for users to use.
mod internal {
    /// Helper macro for creating an empty collection.
    macro_rules! empty_collection {
        () => {
            Self {
                // SAFETY: An array of MaybeUninit does not require initialization
                buf: unsafe { MaybeUninit::uninit().assume_init() },
                len: 0,
            }
        };
    }

    /// Helper macro to define unchecked, normal, and try variants of a method.
    macro_rules! define_variants {
    (
        $(#[$meta:meta])*
        fn $name:ident($self:ident : $self_ty:ty $(, $param:ident: $param_ty:ty)*) $(-> $ret:ty)?,
        $(where_clause: { $($where_clause:tt)* } )?

        normal_brief: $normal_brief:literal,
        try_brief: $try_brief:literal,
        unchecked_brief_suffix: $unchecked_brief_suffix:literal,
        ub_conditions: {
            $($ub_condition:expr => $error:literal),+ $(,)?
        },
        prefixes: {
            normal: {$($normal_prefix:tt)*},
            unchecked: {$($unchecked_prefix:tt)*},
            try: {$($try_prefix:tt)*},
        },
        unchecked_fn: $unchecked_fn:ident,
        try_fn: $try_fn:ident,
        body:  $body:tt,
        $(examples: {
            normal: { $($ex_normal:tt)* }
            try: { $($ex_try:tt)* }
        })?
    ) => {
        $(#[$meta])*
        #[doc = concat!(" ", $normal_brief, ", ", $unchecked_brief_suffix, ".")]
        ///
        #[doc = concat!(" See also [`Self::", stringify!($name), "`] for the safe version and [`Self::", stringify!($try_fn), "`] for the [`Option`] returning version.")]
        ///
        /// # Safety
        ///
        /// Calling this function when any of the following conditions are **`true`** is **undefined behavior**:
        $( #[doc = concat!(" - `", stringify!($ub_condition), "`")] )+
        #[inline]
        $($unchecked_prefix)* unsafe fn $unchecked_fn($self: $self_ty $(, $param: $param_ty)*) $(-> $ret)?
        $(where $($where_clause)*)?
        {
            $( debug_assert!(!($ub_condition), $error); )+
            $body
        }

        $(#[$meta])*
        #[doc = concat!(" ", $normal_brief, ".")]
        ///
        #[doc = concat!(" See also [`Self::", stringify!($unchecked_fn), "`] for the unchecked version and [`Self::", stringify!($try_fn), "`] for the [`Option`] returning version.")]
        ///
        /// # Panics
        ///
        $( #[doc = concat!(" - \"", $error, "\" if `", stringify!($ub_condition), "`")] )+
        $(
            ///
            /// # Examples
            ///
            $($ex_normal)*
        )?
        #[inline]
        $($normal_prefix)* fn $name($self: $self_ty $(, $param: $param_ty)*) $(-> $ret)?
        $(where $($where_clause)*)?
        {
            $( assert!(!($ub_condition), $error); )+
            // SAFETY: passed all undefined behaviour conditions above
            unsafe { $self.$unchecked_fn($($param),*) }
        }

        $(#[$meta])*
        #[doc = concat!(" ", $try_brief, ".")]
        ///
        #[doc = concat!(" See also [`Self::", stringify!($name), "`] for the panic-on-error version and [`Self::", stringify!($unchecked_fn), "`] for the unchecked version.")]
        ///
        /// Returns [`None`] if any of these conditions are **`true`**:
        $( #[doc = concat!(" - `", stringify!($ub_condition), "`")] )+
        $(
            ///
            /// # Examples
            ///
            $($ex_try)*
        )?
        #[must_use]
        #[inline]
        $($try_prefix)* fn $try_fn($self: $self_ty $(, $param: $param_ty)*) $(-> Option<$ret>)?
        $(where $($where_clause)*)?
        {
            $( if $ub_condition { return None; } )+
            // SAFETY: passed all undefined behaviour conditions above
            let result = unsafe { $self.$unchecked_fn($($param),*) };
            Some(result)
        }
    };
}

    pub(crate) use define_variants;
    pub(crate) use empty_collection;
}

/// Error types reported by the checked API.
pub mod error;

/// An inline vector with a fixed capacity.
pub mod fixed_vec;

pub use crate::error::{CapacityError, OutOfRange};
pub use crate::fixed_vec::{FixedCapacityVec, IntoIter};
