use super::*;
use crate::schema::{LICENSE_DOCUMENT, PLATE};

const PHONE: FieldDescriptor = FieldDescriptor { label: "Telefon", key: "telefon", kind: FieldKind::Phone, required: true };
const TC: FieldDescriptor =
    FieldDescriptor { label: "T.C. Kimlik No", key: "tc_kimlik", kind: FieldKind::NationalId, required: true };
const EMAIL: FieldDescriptor = FieldDescriptor { label: "E-posta", key: "eposta", kind: FieldKind::Email, required: false };
const NOTE: FieldDescriptor =
    FieldDescriptor { label: "Notunuz", key: "not", kind: FieldKind::MultilineText, required: false };
const PLATE_FIELD: FieldDescriptor =
    FieldDescriptor { label: "Plaka", key: "plaka", kind: FieldKind::Composite(&PLATE), required: true };
const DOC_FIELD: FieldDescriptor =
    FieldDescriptor { label: "Ruhsat Seri No", key: "ruhsat", kind: FieldKind::Composite(&LICENSE_DOCUMENT), required: true };

fn parts(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

#[test]
fn phone_requires_exactly_ten_digits() {
    assert!(is_valid_phone("5123456789"));
    assert!(!is_valid_phone("512345678"));
    assert!(!is_valid_phone("51234567890"));
    assert!(!is_valid_phone("512-345-6789"));
}

#[test]
fn national_id_requires_exactly_eleven_digits() {
    assert!(is_valid_national_id("12345678901"));
    assert!(!is_valid_national_id("1234567890"));
    assert!(!is_valid_national_id("123456789012"));
    assert!(!is_valid_national_id("1234567890a"));
}

#[test]
fn email_shape() {
    assert!(is_valid_email("ayse@example.com"));
    assert!(is_valid_email("a.b@mail.example.com.tr"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("ayse example.com"));
    assert!(!is_valid_email("@example.com"));
}

#[test]
fn required_empty_names_the_field() {
    let err = validate_single(&PHONE, "   ").unwrap_err();
    assert_eq!(err, IntakeError::Missing { label: "Telefon" });
    assert!(err.to_string().contains("Telefon"));
    assert_eq!(err.field_label(), Some("Telefon"));
}

#[test]
fn optional_empty_is_omitted() {
    assert_eq!(validate_single(&EMAIL, ""), Ok(None));
    assert_eq!(validate_single(&NOTE, "  "), Ok(None));
}

#[test]
fn single_values_are_trimmed() {
    assert_eq!(validate_single(&PHONE, " 5123456789 "), Ok(Some("5123456789".to_owned())));
    assert_eq!(validate_single(&NOTE, "  acil  "), Ok(Some("acil".to_owned())));
}

#[test]
fn malformed_values_are_rejected_per_kind() {
    assert_eq!(validate_single(&PHONE, "512345678"), Err(IntakeError::InvalidPhone { label: "Telefon" }));
    assert_eq!(validate_single(&TC, "1234567890"), Err(IntakeError::InvalidNationalId { label: "T.C. Kimlik No" }));
    assert_eq!(validate_single(&EMAIL, "a@b"), Err(IntakeError::InvalidEmail { label: "E-posta" }));
    assert_eq!(validate_single(&EMAIL, "a@b.co"), Ok(Some("a@b.co".to_owned())));
}

#[test]
fn plate_assembles_from_parts() {
    let value = validate_composite(&PLATE_FIELD, &PLATE, &parts(&["34", "abc", "1234"])).unwrap();
    assert_eq!(value.as_deref(), Some("34-ABC-1234"));
}

#[test]
fn plate_with_empty_part_is_rejected() {
    let err = validate_composite(&PLATE_FIELD, &PLATE, &parts(&["34", "", "1234"])).unwrap_err();
    assert_eq!(err, IntakeError::IncompletePart { label: "Plaka", part: "Harf" });
}

#[test]
fn plate_all_empty_is_missing_when_required() {
    let err = validate_composite(&PLATE_FIELD, &PLATE, &[]).unwrap_err();
    assert_eq!(err, IntakeError::Missing { label: "Plaka" });
}

#[test]
fn optional_composite_left_blank_is_omitted() {
    let optional = FieldDescriptor { required: false, ..PLATE_FIELD };
    assert_eq!(validate_composite(&optional, &PLATE, &parts(&["", " ", ""])), Ok(None));
}

#[test]
fn optional_composite_partially_filled_is_rejected() {
    let optional = FieldDescriptor { required: false, ..PLATE_FIELD };
    let err = validate_composite(&optional, &PLATE, &parts(&["34", "", ""])).unwrap_err();
    assert!(matches!(err, IntakeError::IncompletePart { part: "Harf", .. }));
}

#[test]
fn document_assembles_from_parts() {
    let value = validate_composite(&DOC_FIELD, &LICENSE_DOCUMENT, &parts(&["AB", "123456"])).unwrap();
    assert_eq!(value.as_deref(), Some("AB-123456"));
}

#[test]
fn document_rejects_bad_series_or_number() {
    let err = validate_composite(&DOC_FIELD, &LICENSE_DOCUMENT, &parts(&["A", "123456"])).unwrap_err();
    assert_eq!(err, IntakeError::InvalidPart { label: "Ruhsat Seri No", part: "Seri" });

    let err = validate_composite(&DOC_FIELD, &LICENSE_DOCUMENT, &parts(&["AB", "12345"])).unwrap_err();
    assert_eq!(err, IntakeError::InvalidPart { label: "Ruhsat Seri No", part: "Numara" });

    let err = validate_composite(&DOC_FIELD, &LICENSE_DOCUMENT, &parts(&["A1", "123456"])).unwrap_err();
    assert!(matches!(err, IntakeError::InvalidPart { part: "Seri", .. }));
}

#[test]
fn non_field_errors_have_no_label() {
    assert_eq!(IntakeError::NoCategory.field_label(), None);
    assert_eq!(IntakeError::SubmitInFlight.field_label(), None);
}
