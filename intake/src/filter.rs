//! Keystroke-level character filtering.
//!
//! Applied on every edit so inputs never hold characters their kind cannot
//! accept. Only the character set is enforced here, never the length: an
//! overlong value must reach submit intact so validation can reject it.

use crate::schema::{Charset, FieldKind, PartRule};

/// Filter raw input for a single-valued field of `kind`.
///
/// Composite kinds are filtered per part through [`filter_part`]; passing
/// one here returns the input unchanged.
#[must_use]
pub fn filter_input(kind: FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::Phone | FieldKind::NationalId | FieldKind::Numeric => keep(raw, |c| c.is_ascii_digit()),
        FieldKind::Date => keep(raw, |c| c.is_ascii_digit() || c == '-' || c == '.'),
        FieldKind::Text | FieldKind::MultilineText | FieldKind::Email | FieldKind::Composite(_) => raw.to_owned(),
    }
}

/// Filter raw input for one composite sub-part.
#[must_use]
pub fn filter_part(rule: &PartRule, raw: &str) -> String {
    let filtered = keep(raw, |c| rule.charset.admits(c));
    match rule.charset {
        Charset::Letters => filtered.to_ascii_uppercase(),
        Charset::Digits => filtered,
    }
}

fn keep(raw: &str, admit: impl Fn(char) -> bool) -> String {
    raw.chars().filter(|c| admit(*c)).collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
