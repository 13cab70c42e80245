//! Submit-time validation of field values.
//!
//! Every check is pure: it takes the descriptor and the raw value(s) and
//! either yields the final string for the submitted mapping, `None` for an
//! optional field left blank, or an [`IntakeError`] naming the field.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::{Charset, CompositeRule, FieldDescriptor, FieldKind};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Client-side intake errors. Messages are shown to the visitor as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("Lütfen önce bir hizmet seçin.")]
    NoCategory,
    #[error("Bilinmeyen alan: {0}")]
    UnknownField(String),
    #[error("Lütfen {label} alanını doldurun.")]
    Missing { label: &'static str },
    #[error("{label} 10 haneli olmalıdır (ör. 5XXXXXXXXX).")]
    InvalidPhone { label: &'static str },
    #[error("{label} 11 haneli olmalıdır.")]
    InvalidNationalId { label: &'static str },
    #[error("Lütfen geçerli bir {label} adresi girin.")]
    InvalidEmail { label: &'static str },
    #[error("Lütfen {label} alanının {part} kısmını doldurun.")]
    IncompletePart { label: &'static str, part: &'static str },
    #[error("{label} alanının {part} kısmı geçersiz.")]
    InvalidPart { label: &'static str, part: &'static str },
    #[error("Talebiniz gönderiliyor, lütfen bekleyin.")]
    SubmitInFlight,
}

impl IntakeError {
    /// Label of the offending field, when the error concerns one.
    #[must_use]
    pub fn field_label(&self) -> Option<&'static str> {
        match self {
            Self::Missing { label }
            | Self::InvalidPhone { label }
            | Self::InvalidNationalId { label }
            | Self::InvalidEmail { label }
            | Self::IncompletePart { label, .. }
            | Self::InvalidPart { label, .. } => Some(*label),
            Self::NoCategory | Self::UnknownField(_) | Self::SubmitInFlight => None,
        }
    }
}

/// True when `value` is exactly 10 ASCII digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    is_digits_of_len(value, 10)
}

/// True when `value` is exactly 11 ASCII digits.
#[must_use]
pub fn is_valid_national_id(value: &str) -> bool {
    is_digits_of_len(value, 11)
}

/// True when `value` has a `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn is_digits_of_len(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a single-valued field.
///
/// # Errors
///
/// Returns the first rule the trimmed value violates.
pub fn validate_single(field: &FieldDescriptor, raw: &str) -> Result<Option<String>, IntakeError> {
    let value = raw.trim();
    if value.is_empty() {
        return if field.required { Err(IntakeError::Missing { label: field.label }) } else { Ok(None) };
    }

    let label = field.label;
    match field.kind {
        FieldKind::Phone if !is_valid_phone(value) => Err(IntakeError::InvalidPhone { label }),
        FieldKind::NationalId if !is_valid_national_id(value) => Err(IntakeError::InvalidNationalId { label }),
        FieldKind::Email if !is_valid_email(value) => Err(IntakeError::InvalidEmail { label }),
        _ => Ok(Some(value.to_owned())),
    }
}

/// Validate and assemble a composite field from its sub-part values.
///
/// All parts blank counts as an empty field. Otherwise every part must be
/// present and well-formed before the parts are joined.
///
/// # Errors
///
/// Returns [`IntakeError::Missing`], [`IntakeError::IncompletePart`] or
/// [`IntakeError::InvalidPart`] for the first violation.
pub fn validate_composite(
    field: &FieldDescriptor,
    rule: &CompositeRule,
    raw_parts: &[String],
) -> Result<Option<String>, IntakeError> {
    let label = field.label;
    let parts: Vec<String> = rule
        .parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let value = raw_parts.get(i).map_or("", |s| s.trim());
            match part.charset {
                Charset::Letters => value.to_ascii_uppercase(),
                Charset::Digits => value.to_owned(),
            }
        })
        .collect();

    if parts.iter().all(String::is_empty) {
        return if field.required { Err(IntakeError::Missing { label }) } else { Ok(None) };
    }

    for (part, value) in rule.parts.iter().zip(&parts) {
        if value.is_empty() {
            return Err(IntakeError::IncompletePart { label, part: part.label });
        }
        if !part.accepts(value) {
            return Err(IntakeError::InvalidPart { label, part: part.label });
        }
    }

    Ok(Some(rule.assemble(&parts)))
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
