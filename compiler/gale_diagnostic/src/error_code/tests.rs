use super::*;

#[test]
fn as_str_round_trips_through_from_str() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
}

#[test]
fn from_str_is_case_insensitive() {
    assert_eq!("e2003".parse::<ErrorCode>(), Ok(ErrorCode::E2003));
    assert!("E0000".parse::<ErrorCode>().is_err());
}

#[test]
fn internal_range() {
    assert!(ErrorCode::E9002.is_internal_error());
    assert!(!ErrorCode::E2001.is_internal_error());
    assert!(ErrorCode::E2001.is_type_error());
}
