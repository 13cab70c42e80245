//! Intake form controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends own rendering and input events; this type owns everything
//! else: which schema is active, what each field currently holds, whether
//! a submission is outstanding, and which notice to show afterwards.
//!
//! LIFECYCLE
//! =========
//! `select_category` -> `update_field`* -> `begin_submit` -> (one relay call)
//! -> `finish_submit`. While a submission is pending `begin_submit` refuses,
//! so a double click cannot send twice.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::filter::{filter_input, filter_part};
use crate::schema::{FieldDescriptor, FieldKind, ServiceCategory};
use crate::validate::{IntakeError, validate_composite, validate_single};
use crate::wire::{RelayError, RelayReply, RelayTransport, ServiceRequest};

/// Separator between a composite field key and a part key (`plaka.harf`).
pub const PART_SEPARATOR: char = '.';

/// Message shown after a submission resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Relay accepted the request; the form has been cleared.
    Submitted,
    /// Relay failed; entered values are kept for another attempt.
    RetryLater,
}

impl Notice {
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Self::Submitted => "Talebiniz alındı. En kısa sürede sizinle iletişime geçeceğiz.",
            Self::RetryLater => "Talebiniz şu anda gönderilemedi. Lütfen daha sonra tekrar deneyin.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum FieldValue {
    Single(String),
    Parts(Vec<String>),
}

/// Form state for one visitor.
#[derive(Debug, Default)]
pub struct IntakeForm {
    category: Option<ServiceCategory>,
    values: HashMap<&'static str, FieldValue>,
    destination: Option<String>,
    pending: bool,
    notice: Option<Notice>,
}

impl IntakeForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(&self) -> Option<ServiceCategory> {
        self.category
    }

    /// Active schema, empty when no category is selected.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self.category {
            Some(category) => category.fields(),
            None => &[],
        }
    }

    /// True while a submission is awaiting the relay. Front ends disable
    /// the submit control for as long as this holds.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Switch to `category` and discard every previous value.
    pub fn select_category(&mut self, category: ServiceCategory) {
        self.category = Some(category);
        self.reset_values();
        self.destination = None;
        self.notice = None;
    }

    /// Route the request to `to` instead of the server's default inbox.
    pub fn set_destination(&mut self, to: Option<String>) {
        self.destination = to.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
    }

    /// Store filtered input for `key`.
    ///
    /// Composite sub-parts are addressed as `field.part`, e.g. `plaka.il`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NoCategory`] before a category is selected and
    /// [`IntakeError::UnknownField`] for keys outside the active schema.
    pub fn update_field(&mut self, key: &str, raw: &str) -> Result<(), IntakeError> {
        let category = self.category.ok_or(IntakeError::NoCategory)?;
        let (field_key, part_key) = match key.split_once(PART_SEPARATOR) {
            Some((field, part)) => (field, Some(part)),
            None => (key, None),
        };
        let field = category.field(field_key).ok_or_else(|| IntakeError::UnknownField(key.to_owned()))?;

        match (field.kind, part_key) {
            (FieldKind::Composite(rule), Some(part_key)) => {
                let index = rule.part_index(part_key).ok_or_else(|| IntakeError::UnknownField(key.to_owned()))?;
                let filtered = filter_part(&rule.parts[index], raw);
                let entry =
                    self.values.entry(field.key).or_insert_with(|| FieldValue::Parts(vec![String::new(); rule.parts.len()]));
                if let FieldValue::Parts(parts) = entry {
                    parts[index] = filtered;
                }
            }
            (FieldKind::Composite(_), None) | (_, Some(_)) => return Err(IntakeError::UnknownField(key.to_owned())),
            (kind, None) => {
                self.values.insert(field.key, FieldValue::Single(filter_input(kind, raw)));
            }
        }
        Ok(())
    }

    /// Current (filtered, untrimmed) value of a single field or sub-part.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        match key.split_once(PART_SEPARATOR) {
            Some((field_key, part_key)) => {
                let rule = match self.category?.field(field_key)?.kind {
                    FieldKind::Composite(rule) => rule,
                    _ => return None,
                };
                let index = rule.part_index(part_key)?;
                match self.values.get(field_key)? {
                    FieldValue::Parts(parts) => parts.get(index).map(String::as_str),
                    FieldValue::Single(_) => None,
                }
            }
            None => match self.values.get(key)? {
                FieldValue::Single(value) => Some(value.as_str()),
                FieldValue::Parts(_) => None,
            },
        }
    }

    /// Validate every field in schema order, first violation wins.
    ///
    /// # Errors
    ///
    /// Returns the first [`IntakeError`] encountered.
    pub fn validate(&self) -> Result<ServiceRequest, IntakeError> {
        let category = self.category.ok_or(IntakeError::NoCategory)?;
        let mut data = Map::new();

        for field in category.fields() {
            let value = match (field.kind, self.values.get(field.key)) {
                (FieldKind::Composite(rule), Some(FieldValue::Parts(parts))) => validate_composite(field, rule, parts)?,
                (FieldKind::Composite(rule), _) => validate_composite(field, rule, &[])?,
                (_, Some(FieldValue::Single(raw))) => validate_single(field, raw)?,
                _ => validate_single(field, "")?,
            };
            if let Some(value) = value {
                data.insert(field.label.to_owned(), Value::String(value));
            }
        }

        Ok(ServiceRequest { service_name: category.name().to_owned(), data, to: self.destination.clone() })
    }

    /// Validate and mark the form pending.
    ///
    /// The caller must send the returned request exactly once and report
    /// the outcome through [`IntakeForm::finish_submit`].
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::SubmitInFlight`] while a previous submission is
    /// outstanding, or the first validation error. The form is not left
    /// pending on error.
    pub fn begin_submit(&mut self) -> Result<ServiceRequest, IntakeError> {
        if self.pending {
            return Err(IntakeError::SubmitInFlight);
        }
        let request = self.validate()?;
        self.pending = true;
        self.notice = None;
        Ok(request)
    }

    /// Apply the relay outcome: clear on success, keep values on failure.
    pub fn finish_submit(&mut self, outcome: &Result<RelayReply, RelayError>) -> Notice {
        self.pending = false;
        let notice = match outcome {
            Ok(reply) if reply.ok => {
                self.reset_values();
                Notice::Submitted
            }
            Ok(_) | Err(_) => Notice::RetryLater,
        };
        self.notice = Some(notice.clone());
        notice
    }

    /// Validate, send once through `transport`, and apply the outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`IntakeError`] when validation fails or a submission is
    /// already pending; nothing is sent in that case. Relay failures are not
    /// errors here: they yield [`Notice::RetryLater`].
    pub async fn submit(&mut self, transport: &dyn RelayTransport) -> Result<Notice, IntakeError> {
        let request = self.begin_submit()?;
        let outcome = transport.send(&request).await;
        Ok(self.finish_submit(&outcome))
    }

    fn reset_values(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
