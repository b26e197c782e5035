use corrosion_assistant::pipeline::normalize::normalize;
use proptest::prelude::*;

#[test]
fn strips_punctuation_and_newlines() {
    assert_eq!(
        normalize("Acidic Environment!\n50% NaCl"),
        "acidic environment 50% nacl"
    );
}

#[test]
fn keeps_the_retained_charset() {
    assert_eq!(normalize("pH 8.9 - 200ppm Cl"), "ph 8.9 - 200ppm cl");
}

#[test]
fn empty_input_is_a_no_op() {
    assert_eq!(normalize(""), "");
}

proptest! {
    #[test]
    fn output_is_restricted_to_the_retained_charset(s in "\\PC*") {
        let out = normalize(&s);
        prop_assert!(out
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '%' | '.' | '-' | ' ')));
    }

    #[test]
    fn normalize_is_idempotent(s in "\\PC*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }
}
