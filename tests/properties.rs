//! Property-based tests for `FixedCapacityVec`.

use proptest::prelude::*;

use fixed_capacity_vec::{FixedCapacityVec, OutOfRange};

use std::rc::Rc;

const CAP: usize = 8;

type Vec8 = FixedCapacityVec<i32, CAP>;

fn values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..=CAP)
}

//
// -----------------------------------------------------------------------------
// Length & Contents
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_push_increments_len(values in values()) {
        let mut v = Vec8::new();

        for (i, x) in values.iter().enumerate() {
            prop_assert_eq!(v.len(), i);
            v.push(*x);
            prop_assert_eq!(v.len(), i + 1);
            prop_assert_eq!(v.remaining_capacity(), CAP - i - 1);
        }

        prop_assert_eq!(v.as_slice(), values.as_slice());
        prop_assert_eq!(v.is_full(), values.len() == CAP);
    }
}

proptest! {
    #[test]
    fn prop_clear_then_push_matches_fresh(old in values(), new in values()) {
        let mut reused = Vec8::new();
        reused.extend(old.iter().copied());
        reused.clear();
        for x in &new {
            reused.push(*x);
        }

        let mut fresh = Vec8::new();
        for x in &new {
            fresh.push(*x);
        }

        prop_assert_eq!(reused, fresh);
    }
}

proptest! {
    #[test]
    fn prop_assign_yields_sequence(old in values(), seq in values()) {
        let mut v: Vec8 = old.iter().copied().collect();
        v.assign(seq.iter().copied());

        let collected: Vec<i32> = v.iter().copied().collect();
        prop_assert_eq!(collected, seq);
    }
}

proptest! {
    #[test]
    fn prop_push_past_capacity_is_rejected(values in prop::collection::vec(any::<i32>(), CAP..=2 * CAP)) {
        let mut v = Vec8::new();
        let accepted = values.iter().take_while(|x| v.try_push(**x).is_some()).count();

        prop_assert_eq!(accepted, CAP);
        prop_assert_eq!(v.as_slice(), &values[..CAP]);
    }
}

//
// -----------------------------------------------------------------------------
// Access
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_at_matches_slice(values in values(), index in 0usize..2 * CAP) {
        let v: Vec8 = values.iter().copied().collect();

        match values.get(index) {
            Some(x) => prop_assert_eq!(v.at(index), Ok(x)),
            None => prop_assert_eq!(v.at(index), Err(OutOfRange { index, len: values.len() })),
        }
        prop_assert_eq!(v.try_front(), values.first());
        prop_assert_eq!(v.try_back(), values.last());
    }
}

//
// -----------------------------------------------------------------------------
// Positional Insert & Erase
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_erase_prefix_keeps_suffix(values in values(), k in 0usize..=CAP) {
        let k = k.min(values.len());
        let mut v: Vec8 = values.iter().copied().collect();

        let pos = v.erase_range(0..k);

        prop_assert_eq!(pos, 0);
        prop_assert_eq!(v.len(), values.len() - k);
        prop_assert_eq!(v.as_slice(), &values[k..]);
    }
}

proptest! {
    #[test]
    fn prop_erase_range_matches_vec_drain(values in values(), a in 0usize..=CAP, b in 0usize..=CAP) {
        let (start, end) = (a.min(b).min(values.len()), a.max(b).min(values.len()));
        let mut v: Vec8 = values.iter().copied().collect();
        let mut expected = values.clone();
        expected.drain(start..end);

        prop_assert_eq!(v.erase_range(start..end), start);
        prop_assert_eq!(v.as_slice(), expected.as_slice());
    }
}

proptest! {
    #[test]
    fn prop_insert_from_slice_matches_vec_splice(
        values in values(),
        extra in prop::collection::vec(any::<i32>(), 0..=CAP),
        index in 0usize..=CAP
    ) {
        let index = index.min(values.len());
        let mut v: Vec8 = values.iter().copied().collect();

        let result = v.try_insert_from_slice(index, &extra);

        if values.len() + extra.len() > CAP {
            prop_assert_eq!(result, None);
            prop_assert_eq!(v.as_slice(), values.as_slice());
        } else {
            let mut expected = values.clone();
            expected.splice(index..index, extra.iter().copied());
            prop_assert_eq!(result, Some(index + extra.len()));
            prop_assert_eq!(v.as_slice(), expected.as_slice());
        }
    }
}

proptest! {
    #[test]
    fn prop_insert_then_erase_restores(values in prop::collection::vec(any::<i32>(), 0..CAP), index in 0usize..CAP, x: i32) {
        let index = index.min(values.len());
        let mut v: Vec8 = values.iter().copied().collect();

        let next = v.insert(index, x);
        prop_assert_eq!(next, index + 1);
        prop_assert_eq!(v[index], x);

        prop_assert_eq!(v.erase(index), index);
        prop_assert_eq!(v.as_slice(), values.as_slice());
    }
}

//
// -----------------------------------------------------------------------------
// Resize & Ownership
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_resize_matches_vec(values in values(), new_len in 0usize..=CAP, fill: i32) {
        let mut v: Vec8 = values.iter().copied().collect();
        let mut expected = values.clone();

        v.resize(new_len, fill);
        expected.resize(new_len, fill);

        prop_assert_eq!(v.as_slice(), expected.as_slice());
    }
}

proptest! {
    #[test]
    fn prop_take_leaves_source_empty(values in values()) {
        let mut src: Vec8 = values.iter().copied().collect();
        let dst = src.take();

        prop_assert!(src.is_empty());
        prop_assert_eq!(dst.as_slice(), values.as_slice());
    }
}

proptest! {
    #[test]
    fn prop_rc_count_tracks_slots(pushes in 1usize..=CAP, pops in 0usize..=CAP, erase_at in 0usize..CAP) {
        let shared = Rc::new(0_u8);
        let mut v = FixedCapacityVec::<Rc<u8>, CAP>::new();

        for _ in 0..pushes {
            v.push(Rc::clone(&shared));
        }
        prop_assert_eq!(Rc::strong_count(&shared), pushes + 1);

        let copy = v.clone();
        prop_assert_eq!(Rc::strong_count(&shared), 2 * pushes + 1);
        drop(copy);

        for _ in 0..pops.min(v.len()) {
            v.pop_back();
        }
        prop_assert_eq!(Rc::strong_count(&shared), v.len() + 1);

        if erase_at < v.len() {
            v.erase(erase_at);
        }
        prop_assert_eq!(Rc::strong_count(&shared), v.len() + 1);

        let moved = v.take();
        prop_assert_eq!(Rc::strong_count(&shared), moved.len() + 1);

        drop(moved);
        prop_assert_eq!(Rc::strong_count(&shared), 1);
    }
}
