use super::*;

#[test]
fn too_many_errors_display() {
    let err = FatalError::TooManyErrors { count: 10 };
    assert_eq!(err.to_string(), "too many errors");
}

#[test]
#[should_panic(expected = "internal compiler error: structfirst: not struct")]
fn ice_panics_with_marker() {
    ice("structfirst: not struct");
}
