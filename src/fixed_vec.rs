use crate::error::{CapacityError, OutOfRange};
use crate::internal::{define_variants, empty_collection};

use core::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::FusedIterator,
    mem::{self, MaybeUninit},
    ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds},
    ptr, slice,
};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io;

/// A vector with inline storage for at most `CAP` elements.
///
/// The elements live in an array of uninitialized slots embedded in the value,
/// so creating, filling and dropping a `FixedCapacityVec` never touches the
/// heap. Exactly the first [`len`](Self::len) slots hold live values.
pub struct FixedCapacityVec<T, const CAP: usize> {
    /// The underlying storage for elements, embedded in the value.
    buf: [MaybeUninit<T>; CAP],

    /// The current number of initialized elements in the vector.
    len: usize,
}

/// Resolves `range` against a vector of length `len`.
///
/// Returns `None` if the range is inverted, extends past `len` or overflows.
fn resolve_range<R: RangeBounds<usize>>(range: &R, len: usize) -> Option<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Included(&i) => i,
        Bound::Excluded(&i) => i.checked_add(1)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&i) => i.checked_add(1)?,
        Bound::Excluded(&i) => i,
        Bound::Unbounded => len,
    };
    (start <= end && end <= len).then_some((start, end))
}

impl<T, const CAP: usize> FixedCapacityVec<T, CAP> {
    /// Creates a new, empty [`FixedCapacityVec`].
    ///
    /// No slot is initialized; the storage is left as-is until elements are
    /// written into it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// const SCRATCH: FixedCapacityVec<u16, 4> = FixedCapacityVec::new();
    ///
    /// let vec = SCRATCH;
    /// assert_eq!((vec.len(), vec.max_size()), (0, 4));
    /// assert!(vec.at(0).is_err());
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        empty_collection!()
    }

    /// Returns a raw pointer to the vector's buffer.
    ///
    /// The pointer is valid for reads of `self.len()` elements and is
    /// invalidated by any operation that shifts or drops elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let vec = FixedCapacityVec::<u64, 4>::from([7, 11]);
    ///
    /// // the buffer is inline: the pointer lies inside the value itself
    /// let start = core::ptr::from_ref(&vec).cast::<u8>();
    /// let offset = vec.as_ptr().cast::<u8>() as usize - start as usize;
    /// assert!(offset < size_of::<FixedCapacityVec<u64, 4>>());
    ///
    /// // SAFETY: index 1 < len, so the pointer is in bounds and initialized
    /// let second = unsafe { *vec.as_ptr().add(1) };
    /// assert_eq!(second, 11);
    /// ```
    #[expect(clippy::inline_always, reason = "this method is trivial")]
    #[must_use]
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.buf.as_ptr().cast::<T>()
    }

    /// Returns a mutable raw pointer to the vector's buffer.
    ///
    /// Using the pointer may be unsafe if:
    /// - you write to memory beyond the current length without later calling [`Self::set_len`]
    /// - you read from uninitialized elements (i.e. indices >= `self.len()`)
    /// - you overwrite a live element without dropping it first
    ///
    /// For safe mutable access, use [`Self::as_mut_slice`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<u8, 4>::from([b'a', b'b']);
    ///
    /// // SAFETY: index 1 is live and `u8` has no destructor to skip
    /// unsafe { vec.as_mut_ptr().add(1).write(b'z') };
    ///
    /// assert_eq!(vec, *b"az");
    /// ```
    #[expect(clippy::inline_always, reason = "this method is trivial")]
    #[must_use]
    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr().cast::<T>()
    }

    /// Forces the length of the vector.
    ///
    /// # Safety
    ///
    /// Calling this function when any of the following conditions are **`true`** is **undefined behavior**:
    /// - `new_len > CAP`
    /// - `self.buf` up to `new_len` are not all initialized.
    ///
    /// Shrinking the length with this function leaks the elements beyond it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<u32, 16>::new();
    ///
    /// // fill the whole buffer in place, then publish it in one step
    /// for (i, slot) in (0..16).zip(0..vec.capacity()) {
    ///     // SAFETY: slot < CAP, so the write stays inside the buffer
    ///     unsafe { vec.as_mut_ptr().add(slot).write(i * i) };
    /// }
    /// // SAFETY: all 16 slots were written above
    /// unsafe { vec.set_len(16) };
    ///
    /// assert!(vec.is_full());
    /// assert_eq!(*vec.back(), 225);
    /// ```
    #[inline]
    pub const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= CAP, "buffer capacity exceeded");
        self.len = new_len;
    }

    // push
    define_variants! {
        fn push(self: &mut Self, value: T) -> (),

        normal_brief: "Appends a value",
        try_brief: "Attempts to append a value",
        unchecked_brief_suffix: "without bound checking",
        ub_conditions: {
            self.is_full() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub},
        },
        unchecked_fn: push_unchecked,
        try_fn: try_push,
        body: {
            // SAFETY: Caller guarantees self.len < CAP
            let dst = unsafe { self.as_mut_ptr().add(self.len) };
            // SAFETY: Writing to valid uninitialized slot
            unsafe {
                dst.write(value);
            }
            self.len += 1;
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::new();
                /// for i in 0..4 {
                ///     vec.push(i);
                ///     assert_eq!(vec.len(), i as usize + 1);
                /// }
                ///
                /// assert_eq!(vec.len(), vec.max_size());
                /// ```
                ///
                /// The capacity never grows:
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<char, 1>::from(['a']);
                ///
                /// // this will panic at runtime
                /// vec.push('b');
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<&str, 2>::new();
                /// let accepted = ["ok", "ok", "dropped"]
                ///     .into_iter()
                ///     .filter_map(|s| vec.try_push(s))
                ///     .count();
                ///
                /// assert_eq!(accepted, 2);
                /// assert_eq!(vec, ["ok", "ok"]);
                /// ```
            }
        }
    }

    // push_with
    define_variants! {
        fn push_with(self: &mut Self, f: impl FnOnce() -> T) -> &mut T,

        normal_brief: "Constructs a value with `f` directly in the next free slot and returns a reference to it",
        try_brief: "Attempts to construct a value with `f` in the next free slot; `f` is not called if the vector is full",
        unchecked_brief_suffix: "without bound checking",
        ub_conditions: {
            self.is_full() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: push_with_unchecked,
        try_fn: try_push_with,
        body: {
            let value = f();
            // SAFETY: Caller guarantees self.len < CAP
            let dst = unsafe { self.as_mut_ptr().add(self.len) };
            // SAFETY: Writing to valid uninitialized slot
            unsafe {
                dst.write(value);
            }
            self.len += 1;
            // SAFETY: dst was just initialized and is borrowed through self
            unsafe { &mut *dst }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<(u8, char), 4>::new();
                /// let slot = vec.push_with(|| (7, 'x'));
                /// slot.0 += 1;
                ///
                /// assert_eq!(vec[0], (8, 'x'));
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<u32, 1>::new();
                /// assert_eq!(vec.try_push_with(|| 5).copied(), Some(5));
                /// assert!(vec.try_push_with(|| unreachable!()).is_none());
                /// ```
            }
        }
    }

    // insert
    define_variants! {
        fn insert(self: &mut Self, index: usize, element: T) -> usize,

        normal_brief: "Inserts an element at position `index`, shifting all elements after it, and returns `index + 1`",
        try_brief: "Attempts to insert an element at `index`, shifting all elements after it",
        unchecked_brief_suffix: "without bound or capacity checking",
        ub_conditions: {
            index > self.len() => "index out of bounds",
            self.is_full() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub},
        },

        unchecked_fn: insert_unchecked,
        try_fn: try_insert,
        body: {
            // SAFETY: Caller guarantees index <= self.len
            let src = unsafe { self.as_mut_ptr().add(index) };
            // SAFETY: Computing destination for shifted elements
            let shifted_src = unsafe { src.add(1) };
            // SAFETY: Shifting elements right by 1; ranges are valid
            unsafe {
                ptr::copy(src, shifted_src, self.len - index);
            }
            // SAFETY: Writing element to the slot vacated by the shift
            unsafe {
                ptr::write(src, element);
            }
            self.len += 1;
            index + 1
        },
        examples: {
            normal: {
                /// Basic usage:
                ///
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 8>::from([1, 3]);
                ///
                /// assert_eq!(vec.insert(1, 2), 2);
                /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
                ///
                /// // inserting at the end appends
                /// assert_eq!(vec.insert(3, 4), 4);
                /// assert_eq!(vec.as_slice(), &[1, 2, 3, 4]);
                /// ```
                ///
                /// A panic if the index is out of bounds:
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 8>::from([40]);
                ///
                /// // this will panic at runtime
                /// vec.insert(2, 10);
                /// ```
                ///
                /// A panic upon overflow:
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::from([40, 50]);
                /// assert!(vec.is_full());
                ///
                /// // this will panic at runtime
                /// vec.insert(1, 19);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 3>::from([10, 20]);
                ///
                /// // index out of bounds
                /// assert!(vec.try_insert(3, 30).is_none());
                ///
                /// assert_eq!(vec.try_insert(1, 30), Some(2));
                /// assert_eq!(vec.as_slice(), &[10, 30, 20]);
                ///
                /// // vector is full
                /// assert!(vec.try_insert(3, 10).is_none());
                /// ```
            }
        }
    }

    // insert_with
    define_variants! {
        fn insert_with(self: &mut Self, index: usize, f: impl FnOnce() -> T) -> &mut T,

        normal_brief: "Constructs a value with `f` at position `index`, shifting all elements after it, and returns a reference to it",
        try_brief: "Attempts to construct a value with `f` at position `index`; `f` is not called if the insertion is rejected",
        unchecked_brief_suffix: "without bound or capacity checking",
        ub_conditions: {
            index > self.len() => "index out of bounds",
            self.is_full() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: insert_with_unchecked,
        try_fn: try_insert_with,
        body: {
            let value = f();
            // SAFETY: Caller guarantees index <= self.len < CAP
            unsafe {
                self.insert_unchecked(index, value);
            }
            // SAFETY: index now holds the element written above
            unsafe { self.get_unchecked_mut(index) }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([1, 3]);
                /// *vec.insert_with(1, || 1) += 1;
                ///
                /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::from([1]);
                /// assert!(vec.try_insert_with(5, || 0).is_none());
                /// assert_eq!(vec.try_insert_with(0, || 0).copied(), Some(0));
                /// assert!(vec.try_insert_with(0, || unreachable!()).is_none());
                /// ```
            }
        }
    }

    /// Shifts `[index, len)` right by `count` slots and returns a pointer to the
    /// first slot of the gap.
    ///
    /// While the gap is open the length is `index`: the shifted tail and the gap
    /// are not considered live, so a panic before [`Self::close_gap`] leaks them
    /// instead of dropping uninitialized slots.
    ///
    /// # Safety
    ///
    /// `index <= self.len` and `count <= CAP - self.len`.
    #[inline]
    const unsafe fn open_gap(&mut self, index: usize, count: usize) -> *mut T {
        let tail_len = self.len - index;
        self.len = index;
        // SAFETY: Caller guarantees index <= len
        let src = unsafe { self.as_mut_ptr().add(index) };
        // SAFETY: index + count + tail_len <= CAP per caller contract
        let dst = unsafe { src.add(count) };
        // SAFETY: Relocating the initialized tail inside the buffer; copy handles overlap
        unsafe {
            ptr::copy(src, dst, tail_len);
        }
        src
    }

    /// Marks the gap opened by [`Self::open_gap`] as filled.
    ///
    /// # Safety
    ///
    /// `new_len` must be the length before the gap was opened plus the gap
    /// size, and every gap slot must have been written.
    #[inline]
    const unsafe fn close_gap(&mut self, new_len: usize) {
        debug_assert!(new_len <= CAP, "buffer capacity exceeded");
        self.len = new_len;
    }

    // insert_fill
    define_variants! {
        fn insert_fill(self: &mut Self, index: usize, count: usize, value: &T) -> usize,
        where_clause: { T: Clone }

        normal_brief: "Inserts `count` clones of `value` at position `index` and returns `index + count`",
        try_brief: "Attempts to insert `count` clones of `value` at position `index`",
        unchecked_brief_suffix: "without bound or capacity checking",
        ub_conditions: {
            index > self.len() => "index out of bounds",
            count > self.remaining_capacity() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: insert_fill_unchecked,
        try_fn: try_insert_fill,
        body: {
            let new_len = self.len + count;
            // SAFETY: Caller guarantees index <= len and count fits
            let gap = unsafe { self.open_gap(index, count) };
            for i in 0..count {
                // SAFETY: i < count, so the slot lies inside the gap
                let slot = unsafe { gap.add(i) };
                // SAFETY: Gap slots are uninitialized
                unsafe {
                    slot.write(value.clone());
                }
            }
            // SAFETY: All count gap slots were written above
            unsafe {
                self.close_gap(new_len);
            }
            index + count
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 8>::from([1, 5]);
                ///
                /// assert_eq!(vec.insert_fill(1, 3, &0), 4);
                /// assert_eq!(vec.as_slice(), &[1, 0, 0, 0, 5]);
                /// ```
                ///
                /// A panic upon overflow:
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2]);
                ///
                /// // this will panic at runtime
                /// vec.insert_fill(0, 3, &9);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2]);
                /// assert!(vec.try_insert_fill(0, 3, &9).is_none());
                /// assert_eq!(vec.try_insert_fill(2, 2, &9), Some(4));
                /// assert_eq!(vec.as_slice(), &[1, 2, 9, 9]);
                /// ```
            }
        }
    }

    // insert_from_slice
    define_variants! {
        fn insert_from_slice(self: &mut Self, index: usize, slice: &[T]) -> usize,
        where_clause: { T: Clone }

        normal_brief: "Inserts clones of the elements of `slice` at position `index` and returns `index + slice.len()`",
        try_brief: "Attempts to insert clones of the elements of `slice` at position `index`",
        unchecked_brief_suffix: "without bound or capacity checking",
        ub_conditions: {
            index > self.len() => "index out of bounds",
            slice.len() > self.remaining_capacity() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: insert_from_slice_unchecked,
        try_fn: try_insert_from_slice,
        body: {
            let new_len = self.len + slice.len();
            // SAFETY: Caller guarantees index <= len and slice.len() fits
            let gap = unsafe { self.open_gap(index, slice.len()) };
            for (i, item) in slice.iter().enumerate() {
                // SAFETY: i < slice.len(), so the slot lies inside the gap
                let slot = unsafe { gap.add(i) };
                // SAFETY: Gap slots are uninitialized
                unsafe {
                    slot.write(item.clone());
                }
            }
            // SAFETY: All slice.len() gap slots were written above
            unsafe {
                self.close_gap(new_len);
            }
            index + slice.len()
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 8>::from([1, 5]);
                ///
                /// assert_eq!(vec.insert_from_slice(1, &[2, 3, 4]), 4);
                /// assert_eq!(vec.as_slice(), &[1, 2, 3, 4, 5]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 3>::from([1]);
                /// assert!(vec.try_insert_from_slice(0, &[2, 3, 4]).is_none());
                /// assert_eq!(vec.try_insert_from_slice(0, &[2, 3]), Some(2));
                /// assert_eq!(vec.as_slice(), &[2, 3, 1]);
                /// ```
            }
        }
    }

    // remove
    define_variants! {
        fn remove(self: &mut Self, index: usize) -> T,

        normal_brief: "Removes and returns the element at `index`",
        try_brief: "Attempts to remove and return the element at `index`",
        unchecked_brief_suffix: "without bounds checking",
        ub_conditions: {
            index >= self.len() => "index out of bounds",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: remove_unchecked,
        try_fn: try_remove,
        body: {
            // SAFETY: Caller guarantees index < self.len
            let ptr_to_remove = unsafe { self.as_mut_ptr().add(index) };
            // SAFETY: Reading initialized element at valid index
            let result = unsafe { ptr::read(ptr_to_remove) };
            // SAFETY: Computing source pointer for shift
            let src = unsafe { ptr_to_remove.add(1) };
            // SAFETY: Shifting remaining elements left by 1
            unsafe {
                ptr::copy(src, ptr_to_remove, self.len - index - 1);
            }
            self.len -= 1;
            result
        },
        examples: {
            normal: {
                /// Unlike [`Self::erase`], the element is handed back instead of
                /// being dropped:
                ///
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut queue = FixedCapacityVec::<String, 4>::new();
                /// queue.push("first".to_owned());
                /// queue.push("second".to_owned());
                ///
                /// let head: String = queue.remove(0);
                /// assert_eq!(head, "first");
                /// assert_eq!(queue.as_slice(), &["second"]);
                /// ```
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<u8, 4>::from([1]);
                ///
                /// // this will panic at runtime
                /// vec.remove(vec.len());
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::from([-1]);
                ///
                /// assert_eq!(vec.try_remove(0), Some(-1));
                /// assert_eq!(vec.try_remove(0), None);
                /// ```
            }
        }
    }

    // erase
    define_variants! {
        fn erase(self: &mut Self, index: usize) -> usize,

        normal_brief: "Drops the element at `index`, closes the gap and returns `index`, the position of the element that followed it",
        try_brief: "Attempts to drop the element at `index` and close the gap",
        unchecked_brief_suffix: "without bounds checking",
        ub_conditions: {
            index >= self.len() => "index out of bounds",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: erase_unchecked,
        try_fn: try_erase,
        body: {
            // SAFETY: Caller guarantees index < self.len
            let erased = unsafe { self.remove_unchecked(index) };
            drop(erased);
            index
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
                ///
                /// assert_eq!(vec.erase(0), 0);
                /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
                ///
                /// // erasing the last element returns the new length
                /// assert_eq!(vec.erase(2), vec.len());
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([7]);
                /// assert_eq!(vec.try_erase(1), None);
                /// assert_eq!(vec.try_erase(0), Some(0));
                /// assert!(vec.is_empty());
                /// ```
            }
        }
    }

    /// Drops the elements in `[start, end)` in index order and shifts the tail
    /// down to close the gap.
    ///
    /// # Safety
    ///
    /// `start <= end <= self.len`.
    #[inline]
    unsafe fn erase_span(&mut self, start: usize, end: usize) {
        let old_len = self.len;
        // elements from `start` on are leaked if a destructor panics
        self.len = start;
        // SAFETY: Caller guarantees start <= len
        let first = unsafe { self.as_mut_ptr().add(start) };
        let erased = ptr::slice_from_raw_parts_mut(first, end - start);
        // SAFETY: [start, end) are initialized and no longer counted as live
        unsafe {
            ptr::drop_in_place(erased);
        }
        // SAFETY: Caller guarantees end <= len
        let tail = unsafe { first.add(end - start) };
        // SAFETY: Moving the initialized tail down over the dropped range
        unsafe {
            ptr::copy(tail, first, old_len - end);
        }
        self.len = old_len - (end - start);
    }

    /// Drops the elements in `range`, shifts the remaining tail down to close
    /// the gap, and returns the start of the range.
    ///
    /// The returned position is the index of the first element after the
    /// erased range, or [`Self::len`] if the range reached the end.
    ///
    /// # Panics
    ///
    /// - "range out of bounds" if the start of the range is after its end or
    ///   the end is past [`Self::len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([0, 1, 2, 3, 4]);
    ///
    /// assert_eq!(vec.erase_range(1..3), 1);
    /// assert_eq!(vec.as_slice(), &[0, 3, 4]);
    ///
    /// let pos = vec.erase_range(..);
    /// assert_eq!(pos, 0);
    /// assert_eq!(pos, vec.len());
    /// ```
    ///
    /// ```should_panic
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([0, 1]);
    ///
    /// // this will panic at runtime
    /// vec.erase_range(1..3);
    /// ```
    #[inline]
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
        let Some((start, end)) = resolve_range(&range, self.len) else {
            panic!("range out of bounds");
        };
        // SAFETY: resolve_range guarantees start <= end <= len
        unsafe {
            self.erase_span(start, end);
        }
        start
    }

    /// Attempts to drop the elements in `range` and close the gap.
    ///
    /// See also [`Self::erase_range`] for the panic-on-error version.
    ///
    /// Returns [`None`] if the range is inverted or extends past [`Self::len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([0, 1, 2]);
    /// assert_eq!(vec.try_erase_range(2..5), None);
    /// assert_eq!(vec.try_erase_range(..=1), Some(0));
    /// assert_eq!(vec.as_slice(), &[2]);
    /// ```
    #[must_use]
    #[inline]
    pub fn try_erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> Option<usize> {
        let (start, end) = resolve_range(&range, self.len)?;
        // SAFETY: resolve_range guarantees start <= end <= len
        unsafe {
            self.erase_span(start, end);
        }
        Some(start)
    }

    // pop
    define_variants! {
        fn pop(self: &mut Self) -> T,

        normal_brief: "Removes and returns the last element",
        try_brief: "Attempts to remove and return the last element",
        unchecked_brief_suffix: "without bound checking",
        ub_conditions: {
            self.is_empty() => "vector is empty",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: pop_unchecked,
        try_fn: try_pop,
        body: {
            self.len -= 1;
            // SAFETY: self.len was > 0, now points to last initialized element
            let ptr = unsafe { self.as_ptr().add(self.len) };
            // SAFETY: Reading from initialized element
            unsafe { ptr.read() }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                /// use std::rc::Rc;
                ///
                /// let shared = Rc::new(0);
                /// let mut vec = FixedCapacityVec::<Rc<i32>, 4>::new();
                /// vec.push(Rc::clone(&shared));
                ///
                /// // the handle moves out; the count only drops once it is released
                /// let handle = vec.pop();
                /// assert_eq!(Rc::strong_count(&shared), 2);
                /// drop(handle);
                /// assert_eq!(Rc::strong_count(&shared), 1);
                /// ```
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([1]);
                /// vec.pop();
                ///
                /// // this will panic at runtime
                /// vec.pop();
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
                ///
                /// let mut drained = 0;
                /// while let Some(x) = vec.try_pop() {
                ///     drained += x;
                /// }
                /// assert_eq!(drained, 6);
                /// assert!(vec.is_empty());
                /// ```
            }
        }
    }

    // pop_back
    define_variants! {
        fn pop_back(self: &mut Self) -> (),

        normal_brief: "Drops the last element in place",
        try_brief: "Attempts to drop the last element in place",
        unchecked_brief_suffix: "without bound checking",
        ub_conditions: {
            self.is_empty() => "vector is empty",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: pop_back_unchecked,
        try_fn: try_pop_back,
        body: {
            self.len -= 1;
            // SAFETY: self.len was > 0, now points to last initialized element
            let last = unsafe { self.as_mut_ptr().add(self.len) };
            // SAFETY: last is initialized and no longer counted as live
            unsafe {
                ptr::drop_in_place(last);
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<String, 4>::new();
                /// vec.push("a".to_owned());
                /// vec.push("b".to_owned());
                ///
                /// vec.pop_back();
                /// assert_eq!(vec.as_slice(), &["a"]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([1]);
                /// assert!(vec.try_pop_back().is_some());
                /// assert!(vec.try_pop_back().is_none());
                /// ```
            }
        }
    }

    // swap_remove
    define_variants! {
        fn swap_remove(self: &mut Self, index: usize) -> T,

        normal_brief: "Removes and returns the element at `index` **without** shifting, replacing it with the last element (swap remove)",
        try_brief: "Attempts to remove and return the element at `index` **without** shifting, replacing it with the last element (swap remove)",
        unchecked_brief_suffix: "without bound checking",
        ub_conditions: {
            index >= self.len() => "index out of bounds",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: swap_remove_unchecked,
        try_fn: try_swap_remove,
        body: {
            // SAFETY: Caller guarantees index < self.len
            let dst = unsafe { self.as_mut_ptr().add(index) };
            // SAFETY: Reading initialized element at valid index
            let result = unsafe { ptr::read(dst) };
            self.len -= 1;
            if index != self.len {
                // SAFETY: Computing pointer to last element
                let last_ptr = unsafe { self.as_ptr().add(self.len) };
                // SAFETY: Reading last element after decrementing len
                let last = unsafe { last_ptr.read() };
                // SAFETY: Writing to previously read position
                unsafe {
                    ptr::write(dst, last);
                }
            }
            result
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<char, 4>::from(['a', 'b', 'c', 'd']);
                ///
                /// // the last element fills the hole, so order is not kept
                /// assert_eq!(vec.swap_remove(0), 'a');
                /// assert_eq!(vec, ['d', 'b', 'c']);
                ///
                /// // removing the last element moves nothing
                /// assert_eq!(vec.swap_remove(2), 'c');
                /// assert_eq!(vec, ['d', 'b']);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<char, 4>::from(['x', 'y']);
                ///
                /// assert_eq!(vec.try_swap_remove(2), None);
                /// assert_eq!(vec.try_swap_remove(0), Some('x'));
                /// assert_eq!(vec, ['y']);
                /// ```
            }
        }
    }

    // index
    define_variants! {
        fn index(self: &Self, index: usize) -> &T,

        normal_brief: "Returns a reference to the element at `index`",
        try_brief: "Attempts to return a reference to the element at `index`",
        unchecked_brief_suffix: "without bounds checking",
        ub_conditions: {
            index >= self.len => "index out of bounds",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: get_unchecked,
        try_fn: get,
        body: {
            // SAFETY: Caller guarantees index < self.len
            let ptr = unsafe { self.buf.as_ptr().add(index) };
            // SAFETY: Creating reference to initialized element
            let elem_ref = unsafe { &*ptr };
            // SAFETY: Element at index is initialized
            unsafe { elem_ref.assume_init_ref() }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
                /// vec.erase(0);
                ///
                /// // indices follow the live elements, not the original slots
                /// assert_eq!(*vec.index(0), 1);
                /// assert_eq!(vec[2], 3);
                /// ```
                ///
                /// Slots past the length are not addressable even though the
                /// storage exists:
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 8>::from([1]);
                ///
                /// // this will panic at runtime
                /// vec.index(1);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 8>::from([5, 6]);
                ///
                /// assert_eq!(vec.get(1), Some(&6));
                /// assert_eq!(vec.get(2), None);
                /// assert_eq!(vec.get(2).ok_or(()), vec.at(2).map_err(|_| ()));
                /// ```
            }
        }
    }

    // index_mut
    define_variants! {
        fn index_mut(self: &mut Self, index: usize) -> &mut T,

        normal_brief: "Returns a mutable reference to the element at `index`",
        try_brief: "Attempts to return a mutable reference to the element at `index`",
        unchecked_brief_suffix: "without bounds checking",
        ub_conditions: {
            index >= self.len => "index out of bounds",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: get_unchecked_mut,
        try_fn: get_mut,
        body: {
            // SAFETY: Caller guarantees index < self.len
            let ptr = unsafe { self.buf.as_mut_ptr().add(index) };
            // SAFETY: Creating mutable reference to initialized element
            let elem_ref = unsafe { &mut *ptr };
            // SAFETY: Element at index is initialized
            unsafe { elem_ref.assume_init_mut() }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut counters = FixedCapacityVec::<u32, 3>::from([0; 3]);
                ///
                /// for bucket in [2, 0, 2, 2] {
                ///     *counters.index_mut(bucket) += 1;
                /// }
                /// assert_eq!(counters, [1, 0, 3]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<String, 2>::new();
                /// vec.push("a".to_owned());
                ///
                /// if let Some(s) = vec.get_mut(0) {
                ///     s.push('!');
                /// }
                /// assert_eq!(vec[0], "a!");
                /// assert!(vec.get_mut(1).is_none());
                /// ```
            }
        }
    }

    /// Returns a reference to the element at `index`, or [`OutOfRange`] if
    /// `index >= self.len()`.
    ///
    /// This is the recoverable counterpart of indexing: the error carries the
    /// requested index and the current length.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] when `index` does not address a live element.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::{FixedCapacityVec, OutOfRange};
    ///
    /// let vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
    ///
    /// assert_eq!(vec.at(3), Ok(&3));
    /// assert_eq!(vec.at(4), Err(OutOfRange { index: 4, len: 4 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        self.get(index).ok_or(OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Returns a mutable reference to the element at `index`, or
    /// [`OutOfRange`] if `index >= self.len()`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] when `index` does not address a live element.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 4>::from([0, 1]);
    ///
    /// *vec.at_mut(1).unwrap() = 10;
    /// assert_eq!(vec.as_slice(), &[0, 10]);
    /// assert!(vec.at_mut(2).is_err());
    /// ```
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.get_mut(index).ok_or(OutOfRange { index, len })
    }

    // front
    define_variants! {
        fn front(self: &Self) -> &T,

        normal_brief: "Returns a reference to the first element",
        try_brief: "Attempts to return a reference to the first element",
        unchecked_brief_suffix: "without checking for emptiness",
        ub_conditions: {
            self.is_empty() => "vector is empty",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: front_unchecked,
        try_fn: try_front,
        body: {
            // SAFETY: Caller guarantees the vector is not empty
            unsafe { self.get_unchecked(0) }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
                /// assert_eq!(*vec.front(), 0);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 4>::new();
                /// assert_eq!(vec.try_front(), None);
                /// ```
            }
        }
    }

    // front_mut
    define_variants! {
        fn front_mut(self: &mut Self) -> &mut T,

        normal_brief: "Returns a mutable reference to the first element",
        try_brief: "Attempts to return a mutable reference to the first element",
        unchecked_brief_suffix: "without checking for emptiness",
        ub_conditions: {
            self.is_empty() => "vector is empty",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: front_mut_unchecked,
        try_fn: try_front_mut,
        body: {
            // SAFETY: Caller guarantees the vector is not empty
            unsafe { self.get_unchecked_mut(0) }
        },
    }

    // back
    define_variants! {
        fn back(self: &Self) -> &T,

        normal_brief: "Returns a reference to the last element",
        try_brief: "Attempts to return a reference to the last element",
        unchecked_brief_suffix: "without checking for emptiness",
        ub_conditions: {
            self.is_empty() => "vector is empty",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: back_unchecked,
        try_fn: try_back,
        body: {
            // SAFETY: Caller guarantees the vector is not empty, so len - 1 is live
            unsafe { self.get_unchecked(self.len - 1) }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
                /// assert_eq!(*vec.back(), 3);
                /// ```
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 4>::new();
                ///
                /// // this will panic at runtime
                /// vec.back();
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let vec = FixedCapacityVec::<i32, 4>::from([5]);
                /// assert_eq!(vec.try_back(), Some(&5));
                /// ```
            }
        }
    }

    // back_mut
    define_variants! {
        fn back_mut(self: &mut Self) -> &mut T,

        normal_brief: "Returns a mutable reference to the last element",
        try_brief: "Attempts to return a mutable reference to the last element",
        unchecked_brief_suffix: "without checking for emptiness",
        ub_conditions: {
            self.is_empty() => "vector is empty",
        },
        prefixes: {
            normal: {pub const},
            unchecked: {pub const},
            try: {pub const},
        },
        unchecked_fn: back_mut_unchecked,
        try_fn: try_back_mut,
        body: {
            let last = self.len - 1;
            // SAFETY: Caller guarantees the vector is not empty, so last is live
            unsafe { self.get_unchecked_mut(last) }
        },
    }

    define_variants! {
        fn extend_from_slice(self: &mut Self, slice: &[T]) -> (),
        where_clause: { T: Clone }

        normal_brief: "Extends the vector with clones of the elements of a slice",
        try_brief: "Attempts to extend the vector with clones of the elements of a slice",
        unchecked_brief_suffix: "without capacity checking",
        ub_conditions: {
            slice.len() > self.remaining_capacity() => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: extend_from_slice_unchecked,
        try_fn: try_extend_from_slice,
        body: {
            for item in slice {
                // SAFETY: Caller guarantees sufficient capacity
                unsafe {
                    self.push_unchecked(item.clone());
                }
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                /// use std::rc::Rc;
                ///
                /// let shared = Rc::new("cfg");
                /// let mut vec = FixedCapacityVec::<Rc<&str>, 4>::new();
                /// vec.extend_from_slice(&[Rc::clone(&shared), Rc::clone(&shared)]);
                ///
                /// // each element was cloned once, the temporaries are gone
                /// assert_eq!(Rc::strong_count(&shared), 3);
                /// ```
                ///
                /// Nothing is appended when the slice does not fit:
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([0, 0]);
                ///
                /// // this will panic at runtime
                /// vec.extend_from_slice(&[1, 2, 3]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<u8, 4>::from([1]);
                ///
                /// // all or nothing
                /// assert!(vec.try_extend_from_slice(&[2, 3, 4, 5]).is_none());
                /// assert_eq!(vec, [1]);
                /// assert!(vec.try_extend_from_slice(&[2, 3, 4]).is_some());
                /// assert!(vec.is_full());
                /// ```
            }
        }
    }

    // assign_from_slice
    define_variants! {
        fn assign_from_slice(self: &mut Self, slice: &[T]) -> (),
        where_clause: { T: Clone }

        normal_brief: "Replaces the contents with clones of the elements of a slice",
        try_brief: "Attempts to replace the contents with clones of the elements of a slice; the vector is left untouched on failure",
        unchecked_brief_suffix: "without capacity checking",
        ub_conditions: {
            slice.len() > CAP => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: assign_from_slice_unchecked,
        try_fn: try_assign_from_slice,
        body: {
            self.clear();
            // SAFETY: Caller guarantees slice.len() <= CAP and the vector is empty
            unsafe {
                self.extend_from_slice_unchecked(slice);
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([9, 9]);
                /// vec.assign_from_slice(&[0, 1, 2, 3]);
                ///
                /// assert_eq!(vec.as_slice(), &[0, 1, 2, 3]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::from([9]);
                /// assert!(vec.try_assign_from_slice(&[0, 1, 2]).is_none());
                /// assert_eq!(vec.as_slice(), &[9]);
                /// ```
            }
        }
    }

    // assign_fill
    define_variants! {
        fn assign_fill(self: &mut Self, count: usize, value: &T) -> (),
        where_clause: { T: Clone }

        normal_brief: "Replaces the contents with `count` clones of `value`",
        try_brief: "Attempts to replace the contents with `count` clones of `value`; the vector is left untouched on failure",
        unchecked_brief_suffix: "without capacity checking",
        ub_conditions: {
            count > CAP => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: assign_fill_unchecked,
        try_fn: try_assign_fill,
        body: {
            self.clear();
            for _ in 0..count {
                // SAFETY: Caller guarantees count <= CAP and the vector started empty
                unsafe {
                    self.push_unchecked(value.clone());
                }
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2, 3]);
                /// vec.assign_fill(4, &0);
                ///
                /// assert_eq!(vec.as_slice(), &[0, 0, 0, 0]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::new();
                /// assert!(vec.try_assign_fill(5, &0).is_none());
                /// assert!(vec.try_assign_fill(2, &7).is_some());
                /// assert_eq!(vec.as_slice(), &[7, 7]);
                /// ```
            }
        }
    }

    /// Replaces the contents with the items of `iter`.
    ///
    /// The vector is cleared first, then each item is appended in order.
    ///
    /// # Panics
    ///
    /// - "buffer capacity exceeded" if `iter` yields more than `CAP` items.
    ///   The items that fit are kept and the rest of the iterator is not
    ///   consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let source = vec![0, 1, 2, 3];
    /// let mut vec = FixedCapacityVec::<i32, 4>::from([7]);
    /// vec.assign(source.iter().copied());
    ///
    /// assert_eq!(vec.as_slice(), &[0, 1, 2, 3]);
    /// ```
    #[inline]
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.clear();
        self.extend(iter);
    }

    // resize
    define_variants! {
        fn resize(self: &mut Self, new_len: usize, value: T) -> (),
        where_clause: { T: Clone }

        normal_brief: "Resizes the vector to `new_len`, dropping trailing elements or filling with clones of `value`",
        try_brief: "Attempts to resize the vector to `new_len`, dropping trailing elements or filling with clones of `value`",
        unchecked_brief_suffix: "without capacity checking",
        ub_conditions: {
            new_len > CAP => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: resize_unchecked,
        try_fn: try_resize,
        body: {
            if new_len <= self.len {
                self.truncate(new_len);
            } else {
                while self.len + 1 < new_len {
                    // SAFETY: self.len + 1 < new_len <= CAP
                    unsafe {
                        self.push_unchecked(value.clone());
                    }
                }
                // SAFETY: self.len == new_len - 1 < CAP
                unsafe {
                    self.push_unchecked(value);
                }
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 8>::from([1, 2]);
                ///
                /// vec.resize(4, 0);
                /// assert_eq!(vec.as_slice(), &[1, 2, 0, 0]);
                ///
                /// vec.resize(1, 0);
                /// assert_eq!(vec.as_slice(), &[1]);
                /// ```
                ///
                /// ```should_panic
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::new();
                ///
                /// // this will panic at runtime
                /// vec.resize(3, 0);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::new();
                /// assert!(vec.try_resize(3, 0).is_none());
                /// assert!(vec.try_resize(2, 5).is_some());
                /// assert_eq!(vec.as_slice(), &[5, 5]);
                /// ```
            }
        }
    }

    // resize_with
    define_variants! {
        fn resize_with(self: &mut Self, new_len: usize, f: impl FnMut() -> T) -> (),

        normal_brief: "Resizes the vector to `new_len`, dropping trailing elements or filling with values returned by `f`",
        try_brief: "Attempts to resize the vector to `new_len`, dropping trailing elements or filling with values returned by `f`",
        unchecked_brief_suffix: "without capacity checking",
        ub_conditions: {
            new_len > CAP => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: resize_with_unchecked,
        try_fn: try_resize_with,
        body: {
            let mut f = f;
            if new_len <= self.len {
                self.truncate(new_len);
            } else {
                while self.len < new_len {
                    let value = f();
                    // SAFETY: self.len < new_len <= CAP
                    unsafe {
                        self.push_unchecked(value);
                    }
                }
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut next = 0;
                /// let mut vec = FixedCapacityVec::<i32, 8>::new();
                /// vec.resize_with(3, || {
                ///     next += 1;
                ///     next
                /// });
                ///
                /// assert_eq!(vec.as_slice(), &[1, 2, 3]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 2>::new();
                /// assert!(vec.try_resize_with(3, || 0).is_none());
                /// assert!(vec.is_empty());
                /// ```
            }
        }
    }

    // resize_default
    define_variants! {
        fn resize_default(self: &mut Self, new_len: usize) -> (),
        where_clause: { T: Default }

        normal_brief: "Resizes the vector to `new_len`, dropping trailing elements or filling with `T::default()`",
        try_brief: "Attempts to resize the vector to `new_len`, dropping trailing elements or filling with `T::default()`",
        unchecked_brief_suffix: "without capacity checking",
        ub_conditions: {
            new_len > CAP => "buffer capacity exceeded",
        },
        prefixes: {
            normal: {pub},
            unchecked: {pub},
            try: {pub},
        },
        unchecked_fn: resize_default_unchecked,
        try_fn: try_resize_default,
        body: {
            // SAFETY: Caller guarantees new_len <= CAP
            unsafe {
                self.resize_with_unchecked(new_len, T::default);
            }
        },
        examples: {
            normal: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::from([3]);
                /// vec.resize_default(3);
                ///
                /// assert_eq!(vec.as_slice(), &[3, 0, 0]);
                /// ```
            }
            try: {
                /// ```
                /// use fixed_capacity_vec::FixedCapacityVec;
                ///
                /// let mut vec = FixedCapacityVec::<i32, 4>::new();
                /// assert!(vec.try_resize_default(5).is_none());
                /// ```
            }
        }
    }

    /// Retains only elements that satisfy the predicate.
    ///
    /// If the predicate or a destructor panics, the elements not yet visited
    /// are leaked rather than dropped twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut readings = FixedCapacityVec::<i32, 8>::from([12, -1, 40, -1, 7]);
    ///
    /// // drop the sentinels and clamp the rest in a single pass
    /// readings.retain(|r| {
    ///     *r = (*r).min(20);
    ///     *r >= 0
    /// });
    /// assert_eq!(readings, [12, 20, 7]);
    /// ```
    #[inline]
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        let len = mem::replace(&mut self.len, 0);
        let mut kept = 0;
        for i in 0..len {
            // SAFETY: i < len, so this is a valid and initialized element
            let ptr = unsafe { self.as_mut_ptr().add(i) };
            // SAFETY: ptr points to valid initialized element
            let elem = unsafe { &mut *ptr };
            if f(elem) {
                if kept != i {
                    // SAFETY: kept < i < len, ranges don't overlap
                    let dst = unsafe { self.as_mut_ptr().add(kept) };
                    // SAFETY: Copying single element from valid source to valid dest
                    unsafe {
                        ptr::copy_nonoverlapping(ptr, dst, 1);
                    }
                }
                kept += 1;
                self.len = kept;
            } else {
                // SAFETY: Dropping initialized element that won't be kept
                unsafe {
                    ptr::drop_in_place(ptr);
                }
            }
        }
        self.len = kept;
    }

    /// Returns the contents as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([3, 1, 2]);
    /// vec.pop_back();
    ///
    /// // only the live prefix is visible, never the spare capacity
    /// assert_eq!(vec.as_slice(), &[3, 1]);
    /// assert_eq!(vec.as_slice().len(), vec.len());
    /// ```
    #[must_use]
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: First self.len elements are initialized
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Returns the contents as a mutable slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([3, 1, 2]);
    /// vec.as_mut_slice().sort_unstable();
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[must_use]
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: First self.len elements are initialized
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Returns an iterator over the elements, front to back.
    ///
    /// The iterator is double-ended: `vec.iter().rev()` walks the elements
    /// back to front.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
    ///
    /// let forward: FixedCapacityVec<i32, 4> = vec.iter().copied().collect();
    /// let backward: FixedCapacityVec<i32, 4> = vec.iter().rev().copied().collect();
    /// assert_eq!(forward, [0, 1, 2, 3]);
    /// assert_eq!(backward, [3, 2, 1, 0]);
    /// ```
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator that allows modifying each value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2, 3]);
    ///
    /// let mut acc = 0;
    /// for x in vec.iter_mut() {
    ///     acc += *x;
    ///     *x = acc;
    /// }
    /// assert_eq!(vec, [1, 3, 6]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Drops the elements in `[new_len, len)` in index order.
    ///
    /// The length is lowered before any destructor runs, so a panicking
    /// destructor leaks the remaining tail instead of double-dropping it.
    #[inline]
    fn drop_tail(&mut self, new_len: usize) {
        let old_len = self.len;
        if new_len >= old_len {
            return;
        }
        self.len = new_len;
        if mem::needs_drop::<T>() {
            // SAFETY: new_len < old_len <= CAP
            let first = unsafe { self.as_mut_ptr().add(new_len) };
            let tail = ptr::slice_from_raw_parts_mut(first, old_len - new_len);
            // SAFETY: [new_len, old_len) are initialized and no longer counted as live
            unsafe {
                ptr::drop_in_place(tail);
            }
        }
    }

    /// Truncates the vector to the specified length.
    ///
    /// Does nothing if `len >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// use std::rc::Rc;
    ///
    /// let token = Rc::new(());
    /// let mut vec = FixedCapacityVec::<Rc<()>, 8>::new();
    /// vec.resize(5, Rc::clone(&token));
    ///
    /// vec.truncate(2);
    /// assert_eq!(Rc::strong_count(&token), 3);
    ///
    /// // a longer target leaves the vector alone
    /// vec.truncate(vec.capacity());
    /// assert_eq!(vec.len(), 2);
    /// ```
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.drop_tail(len);
    }

    /// Clears the vector, dropping all live elements in index order,
    /// and resets the length to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<String, 2>::new();
    /// vec.push("kept until clear".to_owned());
    ///
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.remaining_capacity(), 2);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.drop_tail(0);
    }

    /// Moves every element into a new vector and leaves `self` empty.
    ///
    /// Only the live elements are relocated; their destructors and reference
    /// counts are not touched. Combined with assignment this gives move
    /// assignment: `dst = src.take()` drops the old contents of `dst`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    /// use std::rc::Rc;
    ///
    /// let shared = Rc::new(5);
    /// let mut src = FixedCapacityVec::<Rc<i32>, 4>::new();
    /// src.push(Rc::clone(&shared));
    ///
    /// let dst = src.take();
    /// assert!(src.is_empty());
    /// assert_eq!(dst.len(), 1);
    /// assert_eq!(Rc::strong_count(&shared), 2);
    /// ```
    #[must_use]
    #[inline]
    pub const fn take(&mut self) -> Self {
        let mut out = Self::new();
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: Moving len initialized elements into a distinct buffer of the same capacity
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), out.as_mut_ptr(), len);
        }
        out.len = len;
        out
    }

    /// Exchanges the contents of `self` and `other`.
    ///
    /// The whole inline buffer is exchanged, so the cost is proportional to
    /// `CAP` rather than to the number of live elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut a = FixedCapacityVec::<i32, 4>::from([1, 2, 3]);
    /// let mut b = FixedCapacityVec::<i32, 4>::from([9]);
    ///
    /// a.swap_with(&mut b);
    /// assert_eq!(a.as_slice(), &[9]);
    /// assert_eq!(b.as_slice(), &[1, 2, 3]);
    /// ```
    #[inline]
    pub const fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns the current length.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([0, 1, 2, 3, 4]);
    ///
    /// vec.erase_range(1..3);
    /// assert_eq!(vec.len(), 3);
    /// assert_eq!(vec.len() + vec.remaining_capacity(), vec.capacity());
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let full = FixedCapacityVec::<u8, 3>::from([1, 2, 3]);
    /// let empty = FixedCapacityVec::<u8, 3>::new();
    ///
    /// // fixed by the type, independent of the contents
    /// assert_eq!(full.capacity(), empty.capacity());
    /// ```
    #[expect(clippy::inline_always, reason = "this method is trivial")]
    #[inline(always)]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Returns the maximum number of elements the vector can hold.
    ///
    /// Always equal to [`Self::capacity`].
    #[expect(clippy::inline_always, reason = "this method is trivial")]
    #[inline(always)]
    #[must_use]
    pub const fn max_size(&self) -> usize {
        CAP
    }

    /// Returns the remaining capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<u8, 6>::from([1, 2]);
    /// let extra = [9; 8];
    ///
    /// // append only what fits
    /// let room = vec.remaining_capacity();
    /// vec.extend_from_slice(&extra[..room]);
    /// assert_eq!(vec, [1, 2, 9, 9, 9, 9]);
    /// ```
    #[must_use]
    #[inline]
    pub const fn remaining_capacity(&self) -> usize {
        CAP - self.len
    }

    /// Returns `true` if the vector is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the vector is at full capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 4>::new();
    /// vec.resize_default(4);
    /// assert!(vec.is_full());
    ///
    /// vec.pop_back();
    /// assert!(!vec.is_full());
    /// ```
    #[must_use]
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len >= CAP
    }
}

impl<T, const CAP: usize> Default for FixedCapacityVec<T, CAP> {
    /// Returns a new empty `FixedCapacityVec<T, CAP>`.
    ///
    /// This is equivalent to [`Self::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAP: usize> Drop for FixedCapacityVec<T, CAP> {
    /// Drops every live element in index order.
    #[inline]
    fn drop(&mut self) {
        self.drop_tail(0);
    }
}

impl<'vec, T, const CAP: usize> IntoIterator for &'vec FixedCapacityVec<T, CAP> {
    type Item = &'vec T;
    type IntoIter = slice::Iter<'vec, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'vec, T, const CAP: usize> IntoIterator for &'vec mut FixedCapacityVec<T, CAP> {
    type Item = &'vec mut T;
    type IntoIter = slice::IterMut<'vec, T>;

    /// Converts the vector into a mutable iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut names = FixedCapacityVec::<String, 4>::new();
    /// names.push("ada".to_owned());
    /// names.push("bob".to_owned());
    ///
    /// for name in &mut names {
    ///     name.make_ascii_uppercase();
    /// }
    /// assert_eq!(names, ["ADA", "BOB"].map(str::to_owned));
    /// ```
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Owning iterator for [`FixedCapacityVec`]: supports double-ended iteration and is exact-size.
pub struct IntoIter<T, const CAP: usize> {
    /// The current front index of the iterator.
    start: usize,

    /// The current back index of the iterator.
    end: usize,

    /// The owned vector being iterated. Its length is zero; `[start, end)`
    /// tracks the elements not yet yielded.
    v: FixedCapacityVec<T, CAP>,
}

impl<T, const CAP: usize> IntoIter<T, CAP> {
    /// Returns the elements not yet yielded as a slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let vec = FixedCapacityVec::<i32, 4>::from([0, 1, 2, 3]);
    /// let mut iter = vec.into_iter();
    /// iter.next();
    /// iter.next_back();
    /// assert_eq!(iter.as_slice(), &[1, 2]);
    /// ```
    #[must_use]
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY: start <= end <= CAP
        let first = unsafe { self.v.as_ptr().add(self.start) };
        // SAFETY: [start, end) are initialized and not yet yielded
        unsafe { slice::from_raw_parts(first, self.end - self.start) }
    }
}

impl<T, const CAP: usize> Iterator for IntoIter<T, CAP> {
    type Item = T;

    /// Returns the next element in the iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<String, 2>::new();
    /// vec.push("owned".to_owned());
    ///
    /// // the elements are moved out, not cloned
    /// let mut iter = vec.into_iter();
    /// let s: String = iter.next().unwrap();
    /// assert_eq!(s, "owned");
    /// assert_eq!(iter.next(), None);
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    fn next(&mut self) -> Option<T> {
        (self.start < self.end).then(|| {
            let idx = self.start;
            self.start += 1;
            // SAFETY: idx is within range [start, end) which are valid initialized elements
            let elem = unsafe { self.v.buf.get_unchecked(idx) };
            // SAFETY: Taking ownership of initialized element
            unsafe { elem.assume_init_read() }
        })
    }

    /// Returns the remaining number of elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<u8, 8>::from([1, 2, 3, 4]);
    /// vec.erase(0);
    ///
    /// // counts live elements only, never the spare capacity
    /// let iter = vec.into_iter();
    /// assert_eq!(iter.size_hint(), (3, Some(3)));
    /// ```
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.end - self.start;
        (rem, Some(rem))
    }
}

impl<T, const CAP: usize> DoubleEndedIterator for IntoIter<T, CAP> {
    /// Returns the next element from the back of the iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let vec = FixedCapacityVec::<char, 4>::from(['a', 'b', 'c']);
    ///
    /// let reversed: String = vec.into_iter().rev().collect();
    /// assert_eq!(reversed, "cba");
    /// ```
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        (self.start < self.end).then(|| {
            self.end -= 1;
            let idx = self.end;
            // SAFETY: idx is within range [start, end) which are valid initialized elements
            let elem_ptr = unsafe { self.v.buf.get_unchecked(idx) };
            // SAFETY: elem_ptr points to an initialized element that we are taking ownership of
            unsafe { elem_ptr.assume_init_read() }
        })
    }
}

impl<T, const CAP: usize> ExactSizeIterator for IntoIter<T, CAP> {}

impl<T, const CAP: usize> FusedIterator for IntoIter<T, CAP> {}

impl<T, const CAP: usize> Drop for IntoIter<T, CAP> {
    /// Drops the elements that were not yielded.
    #[inline]
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // nothing is left to drop if a destructor below panics
        self.start = self.end;
        // SAFETY: start <= CAP
        let first = unsafe { self.v.as_mut_ptr().add(self.end - remaining) };
        let rest = ptr::slice_from_raw_parts_mut(first, remaining);
        // SAFETY: these elements are initialized and were never yielded
        unsafe {
            ptr::drop_in_place(rest);
        }
    }
}

impl<T, const CAP: usize> IntoIterator for FixedCapacityVec<T, CAP> {
    type Item = T;
    type IntoIter = IntoIter<T, CAP>;

    /// Converts the vector into an owning iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// use std::rc::Rc;
    ///
    /// let shared = Rc::new(0);
    /// let vec = FixedCapacityVec::<Rc<i32>, 4>::from([Rc::clone(&shared), Rc::clone(&shared)]);
    ///
    /// // elements not taken from the iterator are dropped with it
    /// let mut iter = vec.into_iter();
    /// let first = iter.next();
    /// drop(iter);
    /// assert_eq!(Rc::strong_count(&shared), 2);
    /// drop(first);
    /// assert_eq!(Rc::strong_count(&shared), 1);
    /// ```
    #[inline]
    fn into_iter(mut self) -> Self::IntoIter {
        // the iterator owns the elements from here on
        let len = mem::replace(&mut self.len, 0);
        IntoIter {
            start: 0,
            end: len,
            v: self,
        }
    }
}

impl<T, const CAP: usize> Deref for FixedCapacityVec<T, CAP> {
    type Target = [T];

    /// Returns the contents as a slice.
    ///
    /// This is equivalent to [`Self::as_slice`].
    #[inline]
    fn deref(&self) -> &Self::Target {
        Self::as_slice(self)
    }
}

impl<T, const CAP: usize> DerefMut for FixedCapacityVec<T, CAP> {
    /// Returns the contents as a mutable slice.
    ///
    /// This is equivalent to [`Self::as_mut_slice`].
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        Self::as_mut_slice(self)
    }
}

impl<T, const CAP: usize> AsRef<[T]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, const CAP: usize> AsMut<[T]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut *self
    }
}

impl<T, const CAP: usize> Borrow<[T]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, const CAP: usize> BorrowMut<[T]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [T] {
        &mut *self
    }
}

impl<T: fmt::Debug, const CAP: usize> fmt::Debug for FixedCapacityVec<T, CAP> {
    /// Formats the live elements as a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 8>::from([1, 2, 3]);
    /// vec.pop_back();
    ///
    /// assert_eq!(format!("{vec:?}"), "[1, 2]");
    /// ```
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: PartialEq, const CAP: usize> PartialEq for FixedCapacityVec<T, CAP> {
    /// Checks if two vectors are equal element by element.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// // equal contents compare equal however they were reached
    /// let mut built = FixedCapacityVec::<i32, 4>::from([0, 9, 1]);
    /// built.erase(1);
    /// let direct = FixedCapacityVec::<i32, 4>::from([0, 1]);
    ///
    /// assert_eq!(built, direct);
    /// assert_ne!(built, FixedCapacityVec::from([0, 1, 2]));
    /// ```
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: PartialEq, const CAP: usize> PartialEq<[T]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn eq(&self, other: &[T]) -> bool {
        **self == *other
    }
}

impl<T: PartialEq, const CAP: usize> PartialEq<&[T]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn eq(&self, other: &&[T]) -> bool {
        **self == **other
    }
}

impl<T: PartialEq, const CAP: usize, const M: usize> PartialEq<[T; M]> for FixedCapacityVec<T, CAP> {
    #[inline]
    fn eq(&self, other: &[T; M]) -> bool {
        **self == other[..]
    }
}

impl<T: Eq, const CAP: usize> Eq for FixedCapacityVec<T, CAP> {}

impl<T: PartialOrd, const CAP: usize> PartialOrd for FixedCapacityVec<T, CAP> {
    /// Performs lexicographic ordering on the vector contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut versions = [
    ///     FixedCapacityVec::<u16, 3>::from([1, 10]),
    ///     FixedCapacityVec::from([1, 2, 7]),
    ///     FixedCapacityVec::from([1, 2]),
    /// ];
    /// versions.sort();
    ///
    /// assert_eq!(versions[0], [1, 2]);
    /// assert_eq!(versions[2], [1, 10]);
    /// ```
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord, const CAP: usize> Ord for FixedCapacityVec<T, CAP> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash, const CAP: usize> Hash for FixedCapacityVec<T, CAP> {
    /// Hashes the live elements; two vectors with equal contents hash equally
    /// regardless of capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    /// use std::collections::hash_map::DefaultHasher;
    /// use std::hash::{Hash, Hasher};
    ///
    /// fn digest<V: Hash + ?Sized>(value: &V) -> u64 {
    ///     let mut hasher = DefaultHasher::new();
    ///     value.hash(&mut hasher);
    ///     hasher.finish()
    /// }
    ///
    /// let small = FixedCapacityVec::<i32, 3>::from([1, 2, 3]);
    /// let large = FixedCapacityVec::<i32, 16>::from([1, 2, 3]);
    /// assert_eq!(digest(&small), digest(&large));
    /// assert_eq!(digest(&small), digest(&[1, 2, 3][..]));
    /// ```
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Clone, const CAP: usize> Clone for FixedCapacityVec<T, CAP> {
    /// Clones every live element into a new vector, one element at a time.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    /// use std::rc::Rc;
    ///
    /// let shared = Rc::new(1);
    /// let mut v1 = FixedCapacityVec::<Rc<i32>, 4>::new();
    /// v1.push(Rc::clone(&shared));
    ///
    /// let v2 = v1.clone();
    /// assert_eq!(v1, v2);
    /// assert_eq!(Rc::strong_count(&shared), 3);
    /// ```
    #[inline]
    fn clone(&self) -> Self {
        let mut out = Self::new();
        // SAFETY: self.len <= CAP and out is empty
        unsafe {
            out.extend_from_slice_unchecked(self);
        }
        out
    }

    /// Replaces the contents of `self` with clones of the elements of
    /// `source`, dropping the previous contents first.
    #[inline]
    fn clone_from(&mut self, source: &Self) {
        // SAFETY: source.len <= CAP
        unsafe {
            self.assign_from_slice_unchecked(source);
        }
    }
}

impl<T: Clone, const CAP: usize> TryFrom<&[T]> for FixedCapacityVec<T, CAP> {
    type Error = CapacityError;

    /// Attempts to create a vector from clones of the elements of a slice.
    ///
    /// Returns an error if the slice length exceeds the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// use fixed_capacity_vec::CapacityError;
    ///
    /// let header: &[u8] = b"GET / HTTP/1.1";
    ///
    /// let fits = FixedCapacityVec::<u8, 16>::try_from(header).unwrap();
    /// assert_eq!(fits.remaining_capacity(), 2);
    ///
    /// let err = FixedCapacityVec::<u8, 8>::try_from(header).unwrap_err();
    /// assert_eq!(err, CapacityError { required: 14, capacity: 8 });
    /// ```
    #[inline]
    fn try_from(slice: &[T]) -> Result<Self, Self::Error> {
        if slice.len() > CAP {
            return Err(CapacityError {
                required: slice.len(),
                capacity: CAP,
            });
        }

        let mut vec = Self::new();
        // SAFETY: We verified slice.len() <= CAP
        unsafe {
            vec.extend_from_slice_unchecked(slice);
        }
        Ok(vec)
    }
}

impl<T, const CAP: usize, const M: usize> From<[T; M]> for FixedCapacityVec<T, CAP> {
    /// Moves the elements of an array into a new vector.
    ///
    /// # Panics
    ///
    /// - "buffer capacity exceeded" if `M > CAP`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let v = FixedCapacityVec::<&str, 4>::from(["a", "b"]);
    /// assert_eq!(v.as_slice(), &["a", "b"]);
    /// ```
    ///
    /// ```should_panic
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// // this will panic at runtime
    /// let v = FixedCapacityVec::<i32, 2>::from([1, 2, 3]);
    /// ```
    #[inline]
    fn from(array: [T; M]) -> Self {
        assert!(M <= CAP, "buffer capacity exceeded");
        let mut vec = Self::new();
        for item in array {
            // SAFETY: M <= CAP, so every array element fits
            unsafe {
                vec.push_unchecked(item);
            }
        }
        vec
    }
}

impl<T, const CAP: usize> FromIterator<T> for FixedCapacityVec<T, CAP> {
    /// Creates a vector from an iterator.
    ///
    /// # Panics
    ///
    /// A panic if the iterator produces more than `CAP` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let squares: FixedCapacityVec<u32, 4> = (0..4).map(|n| n * n).collect();
    /// assert_eq!(squares, [0, 1, 4, 9]);
    /// ```
    ///
    /// ```should_panic
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// // this will panic at runtime: the range yields five items
    /// let v: FixedCapacityVec<u32, 4> = (0..5).collect();
    /// ```
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const CAP: usize> Extend<T> for FixedCapacityVec<T, CAP> {
    /// Extends the vector with elements from an iterator.
    ///
    /// # Panics
    ///
    /// A panic if adding all elements would exceed capacity. The elements
    /// that fit stay in the vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 4>::from([0]);
    /// vec.extend((1..).take(3));
    /// assert_eq!(vec, [0, 1, 2, 3]);
    /// ```
    ///
    /// The iterator is consumed lazily, so an unbounded one panics as soon
    /// as the vector is full:
    ///
    /// ```should_panic
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let mut vec = FixedCapacityVec::<i32, 3>::new();
    ///
    /// // this will panic at runtime
    /// vec.extend(0..);
    /// ```
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            assert!(self.len < CAP, "buffer capacity exceeded");
            // SAFETY: We just verified self.len < CAP
            unsafe {
                self.push_unchecked(item);
            }
        }
    }
}

impl<'a, T: Copy + 'a, const CAP: usize> Extend<&'a T> for FixedCapacityVec<T, CAP> {
    /// Extends the vector with copies of borrowed elements.
    ///
    /// # Panics
    ///
    /// A panic if adding all elements would exceed capacity.
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const CAP: usize> Index<usize> for FixedCapacityVec<T, CAP> {
    type Output = T;

    /// Returns a reference to the element at `index`.
    ///
    /// Equivalent to [`Self::index`].
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        Self::index(self, index)
    }
}

impl<T, const CAP: usize> IndexMut<usize> for FixedCapacityVec<T, CAP> {
    /// Returns a mutable reference to the element at `index`.
    ///
    /// Equivalent to [`Self::index_mut`].
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        Self::index_mut(self, index)
    }
}

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
impl<T, const CAP: usize> From<FixedCapacityVec<T, CAP>> for Vec<T> {
    /// Moves the elements into a heap-allocated [`Vec`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let vec = FixedCapacityVec::<i32, 4>::from([1, 2]);
    /// assert_eq!(Vec::from(vec), vec![1, 2]);
    /// ```
    #[inline]
    fn from(value: FixedCapacityVec<T, CAP>) -> Self {
        let mut out = Self::with_capacity(value.len());
        out.extend(value);
        out
    }
}

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
impl<T, const CAP: usize> TryFrom<Vec<T>> for FixedCapacityVec<T, CAP> {
    type Error = CapacityError;

    /// Moves the elements of a [`Vec`] into a new vector.
    ///
    /// Returns an error if the [`Vec`] holds more than `CAP` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    ///
    /// let vec = FixedCapacityVec::<i32, 4>::try_from(vec![1, 2]).unwrap();
    /// assert_eq!(vec.as_slice(), &[1, 2]);
    ///
    /// assert!(FixedCapacityVec::<i32, 1>::try_from(vec![1, 2]).is_err());
    /// ```
    #[inline]
    fn try_from(value: Vec<T>) -> Result<Self, Self::Error> {
        if value.len() > CAP {
            return Err(CapacityError {
                required: value.len(),
                capacity: CAP,
            });
        }
        Ok(value.into_iter().collect())
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<const CAP: usize> io::Write for FixedCapacityVec<u8, CAP> {
    /// Appends as many bytes of `buf` as fit.
    ///
    /// Returns `Ok(0)` once the vector is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixed_capacity_vec::FixedCapacityVec;
    /// use std::io::Write;
    ///
    /// let mut vec = FixedCapacityVec::<u8, 8>::new();
    /// assert_eq!(vec.write(b"1234").unwrap(), 4);
    /// assert_eq!(vec.write(b"567890").unwrap(), 4);
    /// assert_eq!(vec.as_slice(), b"12345678");
    /// assert_eq!(vec.write(b"9").unwrap(), 0);
    /// ```
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let to_write = buf.len().min(self.remaining_capacity());
        // SAFETY: to_write <= remaining capacity
        unsafe {
            self.extend_from_slice_unchecked(&buf[..to_write]);
        }
        Ok(to_write)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::FixedCapacityVec;

    use core::{fmt, marker::PhantomData};
    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, SeqAccess, Visitor},
    };

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl<T: Serialize, const CAP: usize> Serialize for FixedCapacityVec<T, CAP> {
        #[inline]
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self)
        }
    }

    /// Collects a sequence of at most `CAP` elements.
    struct FixedCapacityVecVisitor<T, const CAP: usize>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>, const CAP: usize> Visitor<'de> for FixedCapacityVecVisitor<T, CAP> {
        type Value = FixedCapacityVec<T, CAP>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a sequence of at most {CAP} elements")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = FixedCapacityVec::new();
            while let Some(value) = seq.next_element()? {
                if vec.try_push(value).is_none() {
                    return Err(Error::invalid_length(CAP + 1, &self));
                }
            }
            Ok(vec)
        }
    }

    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    impl<'de, T: Deserialize<'de>, const CAP: usize> Deserialize<'de> for FixedCapacityVec<T, CAP> {
        #[inline]
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_seq(FixedCapacityVecVisitor(PhantomData))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use core::cell::Cell;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::panic::{AssertUnwindSafe, catch_unwind};

    struct DropCounter(i32, Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.1.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counted<const CAP: usize>(values: &[i32], counter: &Arc<AtomicUsize>) -> FixedCapacityVec<DropCounter, CAP> {
        values.iter().map(|&v| DropCounter(v, Arc::clone(counter))).collect()
    }

    fn ids<const CAP: usize>(vec: &FixedCapacityVec<DropCounter, CAP>) -> FixedCapacityVec<i32, CAP> {
        vec.iter().map(|dc| dc.0).collect()
    }

    #[test]
    fn insert_at_boundaries() {
        let mut vec = FixedCapacityVec::<i32, 8>::new();

        assert_eq!(vec.insert(0, 1_i32), 1);
        assert_eq!(vec[0], 1_i32);

        assert_eq!(vec.insert(0, 0_i32), 1);
        assert_eq!(vec.as_slice(), &[0_i32, 1_i32]);

        assert_eq!(vec.insert(2, 2), 3);
        assert_eq!(vec.as_slice(), &[0_i32, 1_i32, 2_i32]);
    }

    #[test]
    fn small_int_scenario() {
        let mut vec = FixedCapacityVec::<i32, 4>::new();
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.max_size(), 4);
        assert_eq!(vec.capacity(), 4);
        assert!(vec.is_empty());

        vec.push(0);
        assert_eq!(vec.at(0), Ok(&0));
        vec.push_with(|| 1);
        assert_eq!(vec.as_slice(), &[0, 1]);

        vec.push(2);
        vec.push(3);
        assert_eq!(vec.len(), vec.max_size());
        assert_eq!(vec.at(4), Err(OutOfRange { index: 4, len: 4 }));

        vec.clear();
        assert!(vec.is_empty());

        vec.assign_from_slice(&[0, 1, 2, 3]);
        assert_eq!(*vec.front(), 0);
        assert_eq!(*vec.back(), 3);

        vec.assign_fill(4, &0);
        assert_eq!(vec.as_slice(), &[0, 0, 0, 0]);

        vec.assign([0, 1, 2, 3]);
        assert_eq!(vec.as_slice(), &[0, 1, 2, 3]);

        let pos = vec.erase(0);
        assert_eq!(pos, 0);
        assert_eq!(vec.as_slice(), &[1, 2, 3]);

        let pos = vec.erase_range(0..3);
        assert_eq!(pos, 0);
        assert_eq!(pos, vec.len());
    }

    #[test]
    fn multi_insert_returns_end_of_inserted_range() {
        let mut vec = FixedCapacityVec::<i32, 8>::from([1, 6]);

        assert_eq!(vec.insert(1, 2), 2);
        assert_eq!(vec.insert_from_slice(2, &[3, 4]), 4);
        assert_eq!(vec.insert_fill(4, 1, &5), 5);
        let pos = vec.insert_fill(0, 2, &0);
        assert_eq!(pos, 2);
        assert_eq!(vec.as_slice(), &[0, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn insert_nothing_is_a_no_op() {
        let mut vec = FixedCapacityVec::<i32, 2>::from([1, 2]);
        assert_eq!(vec.insert_from_slice(1, &[]), 1);
        assert_eq!(vec.insert_fill(2, 0, &9), 2);
        assert_eq!(vec.as_slice(), &[1, 2]);
    }

    #[test]
    fn erase_range_drops_only_the_range() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = counted::<8>(&[0, 1, 2, 3, 4, 5], &counter);

        assert_eq!(vec.erase_range(1..=3), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(ids(&vec).as_slice(), &[0, 4, 5]);

        assert_eq!(vec.erase_range(2..2), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        drop(vec);
        assert_eq!(counter.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn erase_and_pop_back_drop_in_place() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = counted::<4>(&[1, 2, 3], &counter);

        vec.erase(1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(ids(&vec).as_slice(), &[1, 3]);

        vec.pop_back();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(ids(&vec).as_slice(), &[1]);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2, 3]);
        assert_eq!(vec.try_erase_range((Bound::Included(2), Bound::Excluded(1))), None);
        assert_eq!(vec.try_erase_range(0..4), None);
        assert_eq!(vec.try_erase_range((Bound::Excluded(usize::MAX), Bound::Unbounded)), None);
        assert_eq!(vec.as_slice(), &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "range out of bounds")]
    fn erase_range_past_end_panics() {
        let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2]);
        vec.erase_range(..3);
    }

    #[test]
    #[should_panic(expected = "buffer capacity exceeded")]
    fn push_past_capacity_panics() {
        let mut vec = FixedCapacityVec::<i32, 1>::from([1]);
        vec.push(2);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn erase_past_end_panics() {
        let mut vec = FixedCapacityVec::<i32, 4>::from([1]);
        vec.erase(1);
    }

    #[test]
    #[should_panic(expected = "vector is empty")]
    fn pop_back_on_empty_panics() {
        let mut vec = FixedCapacityVec::<i32, 4>::new();
        vec.pop_back();
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = counted::<6>(&[1, 2, 3, 4], &counter);

        vec.resize_with(2, || unreachable!());
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        vec.resize_with(5, || DropCounter(9, Arc::clone(&counter)));
        assert_eq!(ids(&vec).as_slice(), &[1, 2, 9, 9, 9]);

        let mut ints = FixedCapacityVec::<i32, 4>::new();
        ints.resize_default(2);
        ints.resize(4, 7);
        assert_eq!(ints.as_slice(), &[0, 0, 7, 7]);
        ints.resize(4, 1);
        assert_eq!(ints.as_slice(), &[0, 0, 7, 7]);
    }

    #[test]
    fn resize_clones_all_but_the_last_slot() {
        #[derive(Debug)]
        struct Tracked<'a>(&'a Cell<usize>);

        impl Clone for Tracked<'_> {
            fn clone(&self) -> Self {
                self.0.set(self.0.get() + 1);
                Self(self.0)
            }
        }

        let clones = Cell::new(0);
        let mut vec = FixedCapacityVec::<Tracked<'_>, 4>::new();
        vec.resize(3, Tracked(&clones));
        assert_eq!(clones.get(), 2);
        assert_eq!(vec.len(), 3);

        let copy = vec.clone();
        assert_eq!(clones.get(), 5);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn take_leaves_source_empty() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut src = counted::<4>(&[1, 2, 3], &counter);

        let dst = src.take();
        assert!(src.is_empty());
        assert_eq!(ids(&dst).as_slice(), &[1, 2, 3]);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        drop(src);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        drop(dst);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn move_assignment_drops_previous_contents() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut dst = counted::<4>(&[1, 2], &counter);
        let mut src = counted::<4>(&[3], &counter);
        assert_eq!(dst.len(), 2);

        dst = src.take();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(ids(&dst).as_slice(), &[3]);
        assert!(src.is_empty());
    }

    #[test]
    fn clone_from_replaces_contents() {
        let mut dst = FixedCapacityVec::<i32, 4>::from([9, 9, 9]);
        let src = FixedCapacityVec::<i32, 4>::from([1]);
        dst.clone_from(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn swap_with_exchanges_contents() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut a = counted::<4>(&[1, 2], &counter);
        let mut b = counted::<4>(&[3], &counter);

        a.swap_with(&mut b);
        assert_eq!(ids(&a).as_slice(), &[3]);
        assert_eq!(ids(&b).as_slice(), &[1, 2]);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn retain_with_drops() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = counted::<8>(&[1, 2, 3, 4], &counter);

        vec.retain(|dc| (dc.0 & 1_i32) == 0);

        assert_eq!(ids(&vec).as_slice(), &[2, 4]);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        drop(vec);
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn truncate_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut vec = counted::<4>(&[1, 2, 3], &counter);

        vec.truncate(1);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        vec.clear();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn main_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let _vec = counted::<4>(&[1, 2, 3], &counter);

            // At this point, nothing is dropped yet
            assert_eq!(counter.load(Ordering::SeqCst), 0);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn into_iter_partial_drop() {
        let counter = Arc::new(AtomicUsize::new(0));
        let vec = counted::<8>(&[1, 2, 3], &counter);

        let mut iter = vec.into_iter();
        let first = iter.next();
        assert_eq!(first.as_ref().map(|dc| dc.0), Some(1));
        assert_eq!(iter.as_slice().iter().map(|dc| dc.0).collect::<FixedCapacityVec<i32, 8>>(), [2, 3]);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        drop(iter);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        drop(first);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn reverse_iteration() {
        let mut vec = FixedCapacityVec::<i32, 4>::from([1, 2, 3]);
        for x in vec.iter_mut().rev().take(1) {
            *x = 30;
        }
        let reversed: FixedCapacityVec<i32, 4> = vec.iter().rev().copied().collect();
        assert_eq!(reversed, [30, 2, 1]);

        let owned: FixedCapacityVec<i32, 4> = vec.into_iter().rev().collect();
        assert_eq!(owned, [30, 2, 1]);
    }

    #[test]
    fn zero_sized_elements() {
        let mut vec = FixedCapacityVec::<(), 3>::new();
        vec.push(());
        vec.insert_fill(0, 2, &());
        assert!(vec.is_full());
        assert_eq!(vec.erase_range(..2), 0);
        assert_eq!(vec.len(), 1);
    }

    #[derive(Default)]
    struct Tally {
        created: AtomicUsize,
        dropped: AtomicUsize,
        clones_left: AtomicUsize,
    }

    impl Tally {
        fn with_clones(clones: usize) -> Arc<Self> {
            Arc::new(Self {
                clones_left: AtomicUsize::new(clones),
                ..Self::default()
            })
        }

        fn created(&self) -> usize {
            self.created.load(Ordering::SeqCst)
        }

        fn dropped(&self) -> usize {
            self.dropped.load(Ordering::SeqCst)
        }
    }

    /// Element whose `clone` fails once the shared budget runs out and whose
    /// destructor can be armed to panic.
    struct Fragile {
        id: i32,
        tally: Arc<Tally>,
        panic_on_drop: bool,
    }

    impl Fragile {
        fn new(id: i32, tally: &Arc<Tally>) -> Self {
            tally.created.fetch_add(1, Ordering::SeqCst);
            Self {
                id,
                tally: Arc::clone(tally),
                panic_on_drop: false,
            }
        }
    }

    impl Clone for Fragile {
        fn clone(&self) -> Self {
            let left = self.tally.clones_left.load(Ordering::SeqCst);
            assert!(left > 0, "clone budget exhausted");
            self.tally.clones_left.store(left - 1, Ordering::SeqCst);
            Self::new(self.id, &self.tally)
        }
    }

    impl Drop for Fragile {
        fn drop(&mut self) {
            self.tally.dropped.fetch_add(1, Ordering::SeqCst);
            assert!(!self.panic_on_drop, "armed destructor");
        }
    }

    fn fragile<const CAP: usize>(count: i32, tally: &Arc<Tally>) -> FixedCapacityVec<Fragile, CAP> {
        (0..count).map(|id| Fragile::new(id, tally)).collect()
    }

    fn fragile_ids<const CAP: usize>(vec: &FixedCapacityVec<Fragile, CAP>) -> FixedCapacityVec<i32, CAP> {
        vec.iter().map(|f| f.id).collect()
    }

    #[test]
    fn insert_fill_with_failing_clone_leaks_the_tail() {
        let tally = Tally::with_clones(1);
        let mut vec = fragile::<8>(4, &tally);
        let template = Fragile::new(-1, &tally);

        let result = catch_unwind(AssertUnwindSafe(|| vec.insert_fill(1, 3, &template)));
        assert!(result.is_err());

        // the shifted tail and the one finished clone are leaked, never dropped
        assert_eq!(fragile_ids(&vec).as_slice(), &[0]);
        assert_eq!(tally.dropped(), 0);

        drop(vec);
        drop(template);
        assert_eq!(tally.created(), 6);
        assert_eq!(tally.dropped(), 2);
        assert!(tally.dropped() <= tally.created());
    }

    #[test]
    fn insert_from_slice_with_failing_clone_leaks_the_tail() {
        let tally = Tally::with_clones(1);
        let mut vec = fragile::<8>(3, &tally);
        let source = [Fragile::new(10, &tally), Fragile::new(11, &tally)];

        let result = catch_unwind(AssertUnwindSafe(|| vec.insert_from_slice(0, &source)));
        assert!(result.is_err());
        assert!(vec.is_empty());

        drop(vec);
        drop(source);
        assert_eq!(tally.created(), 6);
        assert_eq!(tally.dropped(), 2);
        assert!(tally.dropped() <= tally.created());
    }

    #[test]
    fn retain_with_panicking_predicate_keeps_the_processed_prefix() {
        let tally = Tally::with_clones(0);
        let mut vec = fragile::<8>(5, &tally);

        let result = catch_unwind(AssertUnwindSafe(|| {
            vec.retain(|f| {
                assert!(f.id != 3, "predicate failed");
                f.id % 2 == 0
            });
        }));
        assert!(result.is_err());

        assert_eq!(fragile_ids(&vec).as_slice(), &[0, 2]);
        assert_eq!(tally.dropped(), 1);

        drop(vec);
        assert_eq!(tally.dropped(), 3);
        assert!(tally.dropped() <= tally.created());
    }

    #[test]
    fn drop_with_panicking_destructor_drops_each_element_once() {
        let tally = Tally::with_clones(0);
        let mut vec = fragile::<4>(4, &tally);
        vec[1].panic_on_drop = true;

        let result = catch_unwind(AssertUnwindSafe(|| drop(vec)));
        assert!(result.is_err());

        // the elements after the panicking one still drop while unwinding
        assert_eq!(tally.dropped(), 4);
        assert_eq!(tally.dropped(), tally.created());
    }

    #[test]
    fn erase_range_with_panicking_destructor_shrinks_to_the_start() {
        let tally = Tally::with_clones(0);
        let mut vec = fragile::<8>(5, &tally);
        vec[1].panic_on_drop = true;

        let result = catch_unwind(AssertUnwindSafe(|| vec.erase_range(1..3)));
        assert!(result.is_err());

        assert_eq!(fragile_ids(&vec).as_slice(), &[0]);
        assert_eq!(tally.dropped(), 2);

        drop(vec);
        assert_eq!(tally.dropped(), 3);
        assert!(tally.dropped() <= tally.created());
    }

    #[test]
    fn into_iter_drop_with_panicking_destructor_drops_each_element_once() {
        let tally = Tally::with_clones(0);
        let mut vec = fragile::<8>(4, &tally);
        vec[2].panic_on_drop = true;

        let mut iter = vec.into_iter();
        drop(iter.next());
        assert_eq!(tally.dropped(), 1);

        let result = catch_unwind(AssertUnwindSafe(|| drop(iter)));
        assert!(result.is_err());

        assert_eq!(tally.dropped(), 4);
        assert_eq!(tally.dropped(), tally.created());
    }
}
