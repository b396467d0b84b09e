//! Presentation settings shared by every render strategy.

use serde::Deserialize;

/// CSS classes and fixed markup the renderer uses.
///
/// Defaults produce Bootstrap 5 markup. Every key is optional when the theme
/// is loaded from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Prefix of generated element ids.
    pub id_prefix: String,
    /// Class of the wrapper around one rendered row.
    pub row_class: String,
    /// Class of labels.
    pub label_class: String,
    /// Extra class of labels of required fields.
    pub required_label_class: String,
    /// Markup appended to labels of required fields.
    pub required_marker: String,
    /// Class of text-like inputs and textareas.
    pub input_class: String,
    /// Class of select elements.
    pub select_class: String,
    /// Class of the wrapper around a checkbox or radio.
    pub check_class: String,
    /// Class of checkbox and radio inputs.
    pub check_input_class: String,
    /// Class of checkbox and radio labels.
    pub check_label_class: String,
    /// Class added to inputs whose field has errors.
    pub input_error_class: String,
    /// Class of the per-field error container.
    pub error_class: String,
    /// Class of hint wrappers.
    pub hint_class: String,
    /// Class of the error summary container.
    pub summary_class: String,
    /// Class of the wrapper around the buttons.
    pub buttons_class: String,
    /// Class of buttons without a class of their own.
    pub button_class: String,
    /// Whether whole-form rendering includes the error summary.
    pub show_error_summary: bool,
    /// Visible rows of list boxes.
    pub list_box_size: usize,
    /// Value posted for an unchecked checkbox or radio.
    pub uncheck_value: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            id_prefix: "id_".to_string(),
            row_class: "mb-3".to_string(),
            label_class: "form-label".to_string(),
            required_label_class: "required".to_string(),
            required_marker: r#" <span class="required">*</span>"#.to_string(),
            input_class: "form-control".to_string(),
            select_class: "form-select".to_string(),
            check_class: "form-check".to_string(),
            check_input_class: "form-check-input".to_string(),
            check_label_class: "form-check-label".to_string(),
            input_error_class: "is-invalid".to_string(),
            error_class: "invalid-feedback".to_string(),
            hint_class: "form-text".to_string(),
            summary_class: "alert alert-danger".to_string(),
            buttons_class: "mt-3".to_string(),
            button_class: "btn btn-primary".to_string(),
            show_error_summary: true,
            list_box_size: 4,
            uncheck_value: "0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_theme_from_json() {
        let theme: Theme =
            serde_json::from_str(r#"{"input_error_class": "error", "show_error_summary": false}"#)
                .unwrap();
        assert_eq!(theme.input_error_class, "error");
        assert!(!theme.show_error_summary);
        assert_eq!(theme.input_class, Theme::default().input_class);
    }

    #[test]
    fn test_unknown_theme_keys_are_rejected() {
        assert!(serde_json::from_str::<Theme>(r#"{"colour": "red"}"#).is_err());
    }
}
