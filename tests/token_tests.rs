use numdiff_rs::token::{tokens_equal, TokenComparator, TokenVerdict};
use numdiff_rs::ComparisonOptions;

fn tolerances(aeps: f64, reps: f64) -> ComparisonOptions {
    ComparisonOptions::default().with_epsilons(aeps, reps).unwrap()
}

#[test]
fn test_every_token_equals_itself() {
    let options = ComparisonOptions::default();
    for token in ["", "abc", "1", "-0", "1.5e3", " x ", "nan", "NaN", "1.2.3", "0x1f"] {
        assert!(tokens_equal(token, token, &options), "{token:?}");
    }
}

#[test]
fn test_default_tolerances() {
    let options = ComparisonOptions::default();
    assert!(tokens_equal("1.00000000001", "1", &options));
    assert!(tokens_equal("1e-9", "0", &options));
    assert!(tokens_equal("2.5E+03", "2500", &options));
    assert!(tokens_equal("-0.0", "0", &options));
    assert!(!tokens_equal("1.0001", "1", &options));
    assert!(!tokens_equal("1e-7", "0", &options));
}

#[test]
fn test_relative_tolerance_uses_second_operand() {
    let options = tolerances(0.0, 0.105);
    assert!(tokens_equal("90", "100", &options));
    assert!(!tokens_equal("100", "90", &options));
}

#[test]
fn test_absolute_tolerance() {
    let options = tolerances(0.5, 0.0);
    assert!(tokens_equal("10", "10.5", &options));
    assert!(tokens_equal("10.5", "10", &options));
    assert!(!tokens_equal("10", "10.6", &options));
}

#[test]
fn test_integers_compared_numerically() {
    let options = tolerances(0.0, 0.01);
    assert!(tokens_equal("100", "101", &options));
    assert!(tokens_equal("+7", "7", &options));
    assert!(!tokens_equal("100", "103", &options));
}

#[test]
fn test_non_numeric_tokens_must_match_literally() {
    let options = tolerances(1.0, 1.0);
    assert!(!tokens_equal("abc", "abd", &options));
    assert!(!tokens_equal("x1", "x2", &options));
    assert!(!tokens_equal("1.0", "one", &options));
}

#[test]
fn test_unparsable_number_is_unequal() {
    let options = tolerances(1.0, 1.0);
    assert!(!tokens_equal("0x10", "16", &options));
    assert!(!tokens_equal("1.5kg", "1.5", &options));
    assert!(!tokens_equal("1.2.3", "1.2", &options));
}

#[test]
fn test_infinities_and_nan() {
    let options = ComparisonOptions::default();
    assert!(tokens_equal("1e999", "1e999", &options));
    assert!(tokens_equal("1e999", "2e999", &options));
    assert!(!tokens_equal("1e999", "-1e999", &options));
    assert!(!tokens_equal("1e999", "1", &options));
}

#[test]
fn test_verdicts() {
    let comparator = TokenComparator::new(&ComparisonOptions::default());
    assert_eq!(comparator.compare("1", "1"), TokenVerdict::Literal);
    assert_eq!(comparator.compare("1.0", "1"), TokenVerdict::Tolerated);
    assert_eq!(comparator.compare("1", "2"), TokenVerdict::Differ);
    assert!(TokenVerdict::Tolerated.is_equal());
    assert!(!TokenVerdict::Differ.is_equal());
}
