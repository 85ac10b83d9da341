//! Tests for salted identifier hashing.

use deid_model::HashingConfig;
use deid_transform::{DIGEST_HEX_LEN, TransformError, hash_identifier_columns, salted_digest};
use polars::prelude::*;
use proptest::prelude::*;

fn hashing() -> HashingConfig {
    HashingConfig::new("_hash", "pepper")
}

fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn digest_matches_sha256_of_value_and_salt() {
    insta::assert_snapshot!(
        salted_digest(Some("12345"), "pepper"),
        @"f7b8a802717e4c7ff6f38e95fd26bf4a41854a777ada3876532c0f38f9e37c69"
    );
}

#[test]
fn empty_value_hashes_salt_alone() {
    insta::assert_snapshot!(
        salted_digest(Some(""), "pepper"),
        @"8cbbcf29d9cef89675c5f5c1dcfe827d0570416a5aaba30dd0de159661ad905b"
    );
}

#[test]
fn null_value_uses_marker_byte() {
    insta::assert_snapshot!(
        salted_digest(None, "pepper"),
        @"9e1dcaf53debc6fd5fffed1c4a3d58534e9288feb70a769c1f843316125f1dac"
    );
}

#[test]
fn hashed_column_replaces_original_at_the_end() {
    let df = DataFrame::new(vec![
        Series::new("client_id".into(), vec!["C-001", "C-002", "C-001"]).into(),
        Series::new("amount".into(), vec![10i64, 20, 30]).into(),
    ])
    .unwrap();

    let hashed = hash_identifier_columns(&df, &["client_id"], &hashing()).unwrap();

    assert_eq!(names(&hashed), vec!["amount", "client_id_hash"]);
    let digests = hashed.column("client_id_hash").unwrap().str().unwrap();
    assert_eq!(
        digests.get(0),
        Some("f293e168e5bf3964be12ec3eb988a42bc5c20167d3a83f354084b2611a95ed40")
    );
    // Equal identifiers hash equally, distinct ones do not.
    assert_eq!(digests.get(0), digests.get(2));
    assert_ne!(digests.get(0), digests.get(1));
    // Input frame is untouched.
    assert_eq!(names(&df), vec!["client_id", "amount"]);
}

#[test]
fn null_and_empty_identifiers_hash_distinctly() {
    let df = DataFrame::new(vec![
        Series::new("client_id".into(), &[Some(""), None, Some("C-001")]).into(),
    ])
    .unwrap();

    let hashed = hash_identifier_columns(&df, &["client_id"], &hashing()).unwrap();
    let digests = hashed.column("client_id_hash").unwrap().str().unwrap();

    assert_eq!(digests.null_count(), 0);
    assert_eq!(digests.get(0), Some(salted_digest(Some(""), "pepper").as_str()));
    assert_eq!(digests.get(1), Some(salted_digest(None, "pepper").as_str()));
    assert_ne!(digests.get(0), digests.get(1));
}

#[test]
fn numeric_identifiers_are_hashed_as_text() {
    let df = DataFrame::new(vec![Series::new("client_id".into(), vec![12345i64]).into()]).unwrap();

    let hashed = hash_identifier_columns(&df, &["client_id"], &hashing()).unwrap();
    let digests = hashed.column("client_id_hash").unwrap().str().unwrap();

    assert_eq!(
        digests.get(0),
        Some("f7b8a802717e4c7ff6f38e95fd26bf4a41854a777ada3876532c0f38f9e37c69")
    );
}

#[test]
fn multiple_columns_keep_requested_order() {
    let df = DataFrame::new(vec![
        Series::new("b_id".into(), vec!["x"]).into(),
        Series::new("a_id".into(), vec!["y"]).into(),
        Series::new("value".into(), vec![1i32]).into(),
    ])
    .unwrap();

    let hashed = hash_identifier_columns(&df, &["a_id", "b_id", "a_id"], &hashing()).unwrap();

    assert_eq!(names(&hashed), vec!["value", "a_id_hash", "b_id_hash"]);
}

#[test]
fn missing_identifier_column_is_a_schema_error() {
    let df = DataFrame::new(vec![Series::new("amount".into(), vec![1i32]).into()]).unwrap();

    let error = hash_identifier_columns(&df, &["client_id"], &hashing()).unwrap_err();

    match error {
        TransformError::MissingColumn { column, available } => {
            assert_eq!(column, "client_id");
            assert_eq!(available, vec!["amount".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn existing_digest_column_name_is_not_overwritten() {
    let df = DataFrame::new(vec![
        Series::new("client_id".into(), vec!["C-001"]).into(),
        Series::new("client_id_hash".into(), vec!["keep-me"]).into(),
    ])
    .unwrap();

    let error = hash_identifier_columns(&df, &["client_id"], &hashing()).unwrap_err();

    assert!(matches!(
        error,
        TransformError::HashTargetExists { ref column, ref target }
            if column == "client_id" && target == "client_id_hash"
    ));
}

proptest! {
    #[test]
    fn digest_is_deterministic_and_fixed_length(value in ".*", salt in ".*") {
        let first = salted_digest(Some(value.as_str()), &salt);
        let second = salted_digest(Some(value.as_str()), &salt);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), DIGEST_HEX_LEN);
        prop_assert!(first.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_values_get_distinct_digests(left in "[a-z0-9]{0,12}", right in "[a-z0-9]{0,12}") {
        prop_assume!(left != right);
        prop_assert_ne!(
            salted_digest(Some(left.as_str()), "pepper"),
            salted_digest(Some(right.as_str()), "pepper")
        );
    }

    #[test]
    fn null_never_collides_with_a_value(value in ".*") {
        prop_assert_ne!(salted_digest(None, "pepper"), salted_digest(Some(value.as_str()), "pepper"));
    }
}
