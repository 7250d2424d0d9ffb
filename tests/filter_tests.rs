use numdiff_rs::{ConfigError, ExcludeFilter};

#[test]
fn test_literal_name() {
    let filter = ExcludeFilter::new().exclude(".svn").unwrap();
    assert!(filter.is_excluded(".svn"));
    assert!(!filter.is_excluded(".svnignore"));
    assert!(!filter.is_excluded("svn"));
}

#[test]
fn test_wildcards() {
    let filter = ExcludeFilter::from_patterns(&["*.log", "tmp?", "[ab]*"]).unwrap();
    assert!(filter.is_excluded("run.log"));
    assert!(filter.is_excluded("tmp1"));
    assert!(!filter.is_excluded("tmp12"));
    assert!(filter.is_excluded("alpha"));
    assert!(filter.is_excluded("beta.txt"));
    assert!(!filter.is_excluded("gamma.txt"));
}

#[test]
fn test_patterns_match_names_not_paths() {
    let filter = ExcludeFilter::from_patterns(&["out"]).unwrap();
    assert!(filter.is_excluded("out"));
    assert!(!filter.is_excluded("build/out"));
}

#[test]
fn test_from_owned_strings() {
    let patterns = vec!["*.o".to_string(), "core".to_string()];
    let filter = ExcludeFilter::from_patterns(&patterns).unwrap();
    assert!(!filter.is_empty());
    assert!(filter.is_excluded("main.o"));
    assert!(filter.is_excluded("core"));
}

#[test]
fn test_invalid_pattern_is_reported() {
    let err = ExcludeFilter::new().exclude("a[").unwrap_err();
    match err {
        ConfigError::InvalidGlob { pattern, .. } => assert_eq!(pattern, "a["),
        other => panic!("unexpected error: {other}"),
    }
}
