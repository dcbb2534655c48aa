use thiserror::Error;

/// Returned by [`FixedCapacityVec::at`] and [`FixedCapacityVec::at_mut`] when the
/// requested index does not address a live element.
///
/// [`FixedCapacityVec::at`]: crate::FixedCapacityVec::at
/// [`FixedCapacityVec::at_mut`]: crate::FixedCapacityVec::at_mut
///
/// # Examples
///
/// ```
/// use fixed_capacity_vec::{FixedCapacityVec, OutOfRange};
///
/// let vec: FixedCapacityVec<i32, 4> = FixedCapacityVec::from([1, 2]);
/// let err = vec.at(2).unwrap_err();
/// assert_eq!(err, OutOfRange { index: 2, len: 2 });
/// assert_eq!(err.to_string(), "index 2 out of range for length 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("index {index} out of range for length {len}")]
pub struct OutOfRange {
    /// The index that was requested.
    pub index: usize,

    /// The length of the vector at the time of the access.
    pub len: usize,
}

/// Returned by fallible conversions when the source holds more elements than
/// the vector can store.
///
/// # Examples
///
/// ```
/// use fixed_capacity_vec::{CapacityError, FixedCapacityVec};
///
/// let err = FixedCapacityVec::<i32, 2>::try_from(&[1, 2, 3][..]).unwrap_err();
/// assert_eq!(err, CapacityError { required: 3, capacity: 2 });
/// assert_eq!(err.to_string(), "buffer capacity exceeded: 3 elements for capacity 2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("buffer capacity exceeded: {required} elements for capacity {capacity}")]
pub struct CapacityError {
    /// Number of elements the conversion needed to store.
    pub required: usize,

    /// Fixed capacity of the target vector.
    pub capacity: usize,
}
