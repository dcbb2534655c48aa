#![cfg(feature = "serde")]

use fixed_capacity_vec::FixedCapacityVec;

#[test]
fn serializes_live_elements_as_sequence() {
    let mut v = FixedCapacityVec::<u16, 8>::from([1, 2, 3]);
    v.pop_back();

    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, "[1,2]");
}

#[test]
fn deserializes_within_capacity() {
    let v: FixedCapacityVec<String, 3> = serde_json::from_str(r#"["a","b","c"]"#).unwrap();
    assert_eq!(v, ["a", "b", "c"].map(str::to_owned));

    let empty: FixedCapacityVec<String, 3> = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn rejects_sequences_longer_than_capacity() {
    let err = serde_json::from_str::<FixedCapacityVec<u8, 2>>("[1,2,3]").unwrap_err();
    assert!(err.to_string().contains("at most 2 elements"), "{err}");
}
