use wms_lib::proximity::{distance, AISLE_WEIGHT, LEVEL_WEIGHT, SHELF_WEIGHT};
use wms_lib::{Error, LocationCode};

fn code(value: &str) -> LocationCode {
    LocationCode::parse(value).expect("valid code")
}

#[test]
fn parses_and_renders_canonical_form() {
    let parsed = code(" b-03-2-a ");
    assert_eq!(parsed.aisle(), "B");
    assert_eq!(parsed.shelf_number(), 3);
    assert_eq!(parsed.level(), 2);
    assert_eq!(parsed.position(), "A");
    assert_eq!(parsed.to_string(), "B-03-02-A");
}

#[test]
fn rejects_wrong_token_counts() {
    for input in ["A-01-01", "A-01-01-A-X", "", "A--01-A"] {
        let err = LocationCode::parse(input).unwrap_err();
        assert!(
            matches!(err, Error::InvalidLocationCode { .. }),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn weights_follow_structural_nesting() {
    assert_eq!(distance(&code("A-01-01-A"), &code("A-01-02-A")), LEVEL_WEIGHT);
    assert_eq!(distance(&code("A-01-01-A"), &code("A-03-01-A")), 2.0 * SHELF_WEIGHT);
    assert_eq!(distance(&code("A-01-01-A"), &code("B-01-01-A")), AISLE_WEIGHT);
}

#[test]
fn distance_is_symmetric_across_demo_codes() {
    let codes = ["A-01-01-A", "A-05-04-B", "B-02-03-A", "C-01-01-B", "C-05-02-A"];
    for a in codes {
        for b in codes {
            assert_eq!(
                distance(&code(a), &code(b)),
                distance(&code(b), &code(a)),
                "{a} vs {b}"
            );
        }
    }
}

#[test]
fn canonical_form_pads_unpadded_shelves_and_levels() {
    assert_eq!(code("A-01-3-A").to_string(), "A-01-03-A");
    assert_eq!(code("A-1-3-A"), code("A-01-03-A"));
}
