use std::fmt::{self, Write as _};

use serde_json::{Value, json};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{Field, FieldType},
    form::FormState,
};

const VALUE_INDENT: &str = "    ";
const EMPTY_MARKER: &str = "(empty)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    FormInvalid,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::FormInvalid => {
                f.write_str("Please fill in all fields correctly before submitting.")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// One-based display position.
    pub position: usize,
    pub label: String,
    pub field_type: FieldType,
    pub value: String,
    pub note: Option<&'static str>,
}

impl PreviewEntry {
    fn from_field(position: usize, field: &Field) -> Self {
        let note = match field.field_type {
            _ if field.value.is_empty() => None,
            FieldType::Email => Some("Valid email format"),
            FieldType::Number => Some("Number is greater than 0"),
            FieldType::Text => None,
        };
        Self {
            position,
            label: field.label.clone(),
            field_type: field.field_type,
            value: field.value.clone(),
            note,
        }
    }
}

/// What a submission of the current form would contain, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPreview {
    entries: Vec<PreviewEntry>,
}

impl SubmissionPreview {
    pub fn from_state(state: &FormState) -> Self {
        let entries = state
            .iter()
            .enumerate()
            .map(|(index, field)| PreviewEntry::from_field(index + 1, field))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[PreviewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `{"fields": [{"label", "type", "value"}, ...]}`
    pub fn payload(&self) -> Value {
        let fields = self
            .entries
            .iter()
            .map(|entry| {
                json!({
                    "label": entry.label,
                    "type": entry.field_type.as_str(),
                    "value": entry.value,
                })
            })
            .collect::<Vec<_>>();
        json!({ "fields": fields })
    }

    pub fn render_text(&self, width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Form Submission Preview");
        if self.entries.is_empty() {
            let _ = writeln!(out, "No fields to preview");
            return out;
        }
        let _ = writeln!(
            out,
            "Here's how your form data will be submitted with {} fields.",
            self.entries.len()
        );

        let marker_width = format!("#{}", self.entries.len()).len();
        let label_width = self
            .entries
            .iter()
            .map(|entry| UnicodeWidthStr::width(entry.label.as_str()))
            .max()
            .unwrap_or(0);
        let wrap_width = width.saturating_sub(VALUE_INDENT.len()).max(1);

        for entry in &self.entries {
            let marker = format!("#{}", entry.position);
            let mut header = format!("{marker:<marker_width$} {}", entry.label);
            let mut current = UnicodeWidthStr::width(entry.label.as_str());
            while current < label_width {
                header.push(' ');
                current += 1;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "{header}  [{}]", entry.field_type.display_name());

            if entry.value.is_empty() {
                let _ = writeln!(out, "{VALUE_INDENT}{EMPTY_MARKER}");
            } else {
                for line in wrap(&entry.value, wrap_width) {
                    let _ = writeln!(out, "{VALUE_INDENT}{line}");
                }
            }
            if let Some(note) = entry.note {
                let _ = writeln!(out, "{VALUE_INDENT}+ {note}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldId;

    fn field(id: &str, field_type: FieldType, label: &str, value: &str) -> Field {
        Field {
            id: FieldId::from(id),
            field_type,
            label: label.to_string(),
            value: value.to_string(),
            error: None,
        }
    }

    fn sample() -> SubmissionPreview {
        let state = FormState::from_fields([
            field("a", FieldType::Text, "Name", "Ada Lovelace"),
            field("b", FieldType::Email, "Contact", "ada@example.com"),
            field("c", FieldType::Number, "Age", "36"),
        ])
        .unwrap();
        SubmissionPreview::from_state(&state)
    }

    #[test]
    fn entries_follow_display_order_with_notes() {
        let preview = sample();
        let positions: Vec<_> = preview.entries().iter().map(|e| e.position).collect();
        assert_eq!(positions, [1, 2, 3]);
        assert_eq!(preview.entries()[0].note, None);
        assert_eq!(preview.entries()[1].note, Some("Valid email format"));
        assert_eq!(preview.entries()[2].note, Some("Number is greater than 0"));
    }

    #[test]
    fn payload_lists_labels_types_and_values() {
        let payload = sample().payload();
        assert_eq!(
            payload,
            json!({"fields": [
                {"label": "Name", "type": "text", "value": "Ada Lovelace"},
                {"label": "Contact", "type": "email", "value": "ada@example.com"},
                {"label": "Age", "type": "number", "value": "36"}
            ]})
        );
    }

    #[test]
    fn text_report_aligns_labels_and_wraps_values() {
        let state = FormState::from_fields([
            field("a", FieldType::Text, "Bio", "one two three four five six"),
            field("b", FieldType::Email, "Contact", "ada@example.com"),
        ])
        .unwrap();
        let text = SubmissionPreview::from_state(&state).render_text(17);
        assert!(text.contains("with 2 fields."), "{text}");
        assert!(text.contains("#1 Bio      [Text]"), "{text}");
        assert!(text.contains("#2 Contact  [Email]"), "{text}");
        assert!(text.contains("    one two three\n    four five six\n"), "{text}");
        assert!(text.contains("    + Valid email format"), "{text}");
    }

    #[test]
    fn empty_preview_says_so() {
        let text = SubmissionPreview::from_state(&FormState::new()).render_text(80);
        assert!(text.contains("No fields to preview"));
    }

    #[test]
    fn submit_error_uses_user_text() {
        assert_eq!(
            SubmitError::FormInvalid.to_string(),
            "Please fill in all fields correctly before submitting."
        );
    }
}
