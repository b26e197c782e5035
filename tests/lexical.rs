use corrosion_assistant::pipeline::lexical::{extract, COLUMNS};

const FLAG_COUNT: usize = 13;

#[test]
fn extracts_nacl_percent_and_ph() {
    let features = extract("50% NaCl and pH 8.9");
    assert_eq!(features.get("lex_nacl_pct"), Some(50.0));
    assert_eq!(features.get("lex_ph"), Some(8.9));
    for flag in COLUMNS.iter().take(FLAG_COUNT) {
        assert_eq!(features.get(flag), Some(0.0), "unexpected flag {flag}");
    }
}

#[test]
fn empty_comment_yields_zero_flags_and_missing_quantities() {
    let features = extract("");
    for flag in COLUMNS.iter().take(FLAG_COUNT) {
        assert_eq!(features.get(flag), Some(0.0));
    }
    for quantity in COLUMNS.iter().skip(FLAG_COUNT) {
        assert!(
            features.get(quantity).is_some_and(f64::is_nan),
            "{quantity} should be missing"
        );
    }
}

#[test]
fn presence_flags_match_whole_words() {
    let features = extract("static, aerated, pH 8");
    assert_eq!(features.get("lex_static"), Some(1.0));
    assert_eq!(features.get("lex_aerated"), Some(1.0));
    assert_eq!(features.get("lex_ph"), Some(8.0));
    assert_eq!(features.get("lex_stagnant"), Some(0.0));
}

#[test]
fn patterns_are_case_insensitive_on_the_raw_comment() {
    let features = extract("GLACIAL acetic acid, 200 ppm Cl");
    assert_eq!(features.get("lex_glacial"), Some(1.0));
    assert_eq!(features.get("lex_cl_ppm"), Some(200.0));
}

#[test]
fn values_follow_the_fixed_column_order() {
    let features = extract("aerated, 5% HCl");
    let values = features.values();
    assert_eq!(values.len(), COLUMNS.len());
    for (idx, column) in COLUMNS.iter().enumerate() {
        let by_name = features.get(column).unwrap();
        if by_name.is_nan() {
            assert!(values[idx].is_nan());
        } else {
            assert_eq!(values[idx], by_name);
        }
    }
}
