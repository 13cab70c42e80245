use super::*;
use crate::schema::{LICENSE_DOCUMENT, PLATE};

#[test]
fn phone_keeps_digits_only() {
    assert_eq!(filter_input(FieldKind::Phone, "(512) 345-67-89"), "5123456789");
}

#[test]
fn overlong_digit_input_is_not_truncated() {
    assert_eq!(filter_input(FieldKind::Phone, "0 532 123 45 67"), "05321234567");
    assert_eq!(filter_input(FieldKind::NationalId, "123 456 789 01 2"), "123456789012");
}

#[test]
fn numeric_strips_non_digits() {
    assert_eq!(filter_input(FieldKind::Numeric, "1.250 m²"), "1250");
}

#[test]
fn date_keeps_separators() {
    assert_eq!(filter_input(FieldKind::Date, "1990-05-17T00"), "1990-05-1700");
    assert_eq!(filter_input(FieldKind::Date, "17.05.1990"), "17.05.1990");
}

#[test]
fn free_text_is_untouched() {
    assert_eq!(filter_input(FieldKind::Text, "  Ayşe Demir "), "  Ayşe Demir ");
    assert_eq!(filter_input(FieldKind::Email, "a@b.co"), "a@b.co");
}

#[test]
fn plate_letters_are_uppercased() {
    assert_eq!(filter_part(&PLATE.parts[1], "ab1c"), "ABC");
    assert_eq!(filter_part(&PLATE.parts[1], "abcdef"), "ABCDEF");
}

#[test]
fn plate_digits_keep_their_full_length() {
    assert_eq!(filter_part(&PLATE.parts[0], "3a45"), "345");
    assert_eq!(filter_part(&PLATE.parts[2], "12-345"), "12345");
}

#[test]
fn document_parts_filter_by_charset() {
    assert_eq!(filter_part(&LICENSE_DOCUMENT.parts[0], "a-b"), "AB");
    assert_eq!(filter_part(&LICENSE_DOCUMENT.parts[1], "12 34 56"), "123456");
}
