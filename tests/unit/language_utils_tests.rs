/*!
 * Tests for language utility functions
 */

use songlingo::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1, validate_language_code,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldSucceed() {
    // ISO 639-1
    assert!(validate_language_code("ko").is_ok());
    assert!(validate_language_code("es").is_ok());

    // ISO 639-2/T and 639-2/B
    assert!(validate_language_code("kor").is_ok());
    assert!(validate_language_code("fre").is_ok());
    assert!(validate_language_code("ger").is_ok());

    // Whitespace and case
    assert!(validate_language_code(" EN ").is_ok());
}

#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("qqq").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization of language codes to ISO 639-1 format
#[test]
fn test_normalize_to_part1_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part1("ko").unwrap(), "ko");
    assert_eq!(normalize_to_part1("kor").unwrap(), "ko");
    assert_eq!(normalize_to_part1("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1(" JPN ").unwrap(), "ja");
}

#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("kor").unwrap(), "Korean");
    assert!(get_language_name("qqq").is_err());
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("fr", "fra"));
    assert!(language_codes_match("fre", "fr"));
    assert!(language_codes_match("DE", "ger"));
    assert!(!language_codes_match("es", "pt"));
    assert!(!language_codes_match("es", "qqq"));
}
