//! Input rendering strategies, one per [`InputType`].

use indexmap::IndexMap;

use super::theme::Theme;
use crate::definition::InputType;
use crate::html::{html_escape, Attributes};
use crate::model::FieldValue;

/// Everything a widget needs to render one input.
pub(crate) struct WidgetContext<'a> {
    /// Field name, used for the `name` attribute.
    pub name: &'a str,
    /// Element id.
    pub id: String,
    /// Current field value.
    pub value: Option<&'a FieldValue>,
    /// Choices of list types.
    pub items: Option<&'a IndexMap<String, String>>,
    /// Caption of single checkboxes and radios.
    pub label: Option<String>,
    /// Whether the caption carries the required marker.
    pub required: bool,
    /// Pass-through attributes without `id` and `class`.
    pub attrs: Attributes,
    /// Class from the element configuration.
    pub extra_class: Option<String>,
    /// Whether the field has errors.
    pub has_error: bool,
    /// Presentation settings.
    pub theme: &'a Theme,
}

impl WidgetContext<'_> {
    /// Joins a widget's base class with configured and error classes.
    fn class(&self, base: &str) -> String {
        let mut attrs = Attributes::new();
        attrs.add_class(base);
        if let Some(extra) = &self.extra_class {
            attrs.add_class(extra);
        }
        if self.has_error {
            attrs.add_class(&self.theme.input_error_class);
        }
        attrs.get("class").cloned().unwrap_or_default()
    }

    fn text_value(&self) -> Option<String> {
        match self.value? {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::List(items) => Some(items.join(",")),
        }
    }

    fn is_selected(&self, option: &str) -> bool {
        self.value.is_some_and(|v| v.matches(option))
    }
}

/// Strategy rendering one kind of input.
pub(crate) trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    fn render(&self, ctx: &WidgetContext<'_>) -> String;
}

const TEXT: TextInput = TextInput::new("text");
const PASSWORD: TextInput = TextInput::password();
const FILE: TextInput = TextInput::file();
const URL: TextInput = TextInput::new("url");
const EMAIL: TextInput = TextInput::new("email");
const NUMBER: TextInput = TextInput::new("number");
const RANGE: TextInput = TextInput::new("range");
const DATE: TextInput = TextInput::new("date");

/// Returns the strategy registered for an input type.
pub(crate) fn widget_for(kind: InputType) -> &'static dyn Widget {
    match kind {
        InputType::Text => &TEXT,
        InputType::Hidden => &HiddenInput,
        InputType::Password => &PASSWORD,
        InputType::Textarea => &TextareaInput,
        InputType::File => &FILE,
        InputType::Radio => &CheckInput { input_type: "radio" },
        InputType::Checkbox => &CheckInput {
            input_type: "checkbox",
        },
        InputType::ListBox => &SelectInput { list_box: true },
        InputType::DropDownList => &SelectInput { list_box: false },
        InputType::CheckBoxList => &ChoiceListInput {
            input_type: "checkbox",
        },
        InputType::RadioList => &ChoiceListInput { input_type: "radio" },
        InputType::Url => &URL,
        InputType::Email => &EMAIL,
        InputType::Number => &NUMBER,
        InputType::Range => &RANGE,
        InputType::Date => &DATE,
    }
}

/// Text-like `<input>` widget.
struct TextInput {
    input_type: &'static str,
    echo_value: bool,
}

impl TextInput {
    const fn new(input_type: &'static str) -> Self {
        Self {
            input_type,
            echo_value: true,
        }
    }

    const fn password() -> Self {
        Self {
            input_type: "password",
            echo_value: false,
        }
    }

    const fn file() -> Self {
        Self {
            input_type: "file",
            echo_value: false,
        }
    }
}

impl Widget for TextInput {
    fn render(&self, ctx: &WidgetContext<'_>) -> String {
        let value_attr = ctx
            .text_value()
            .filter(|_| self.echo_value)
            .map(|v| format!(r#" value="{}""#, html_escape(&v)))
            .unwrap_or_default();

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{}{}>"#,
            self.input_type,
            html_escape(&ctx.class(&ctx.theme.input_class)),
            html_escape(&ctx.id),
            html_escape(ctx.name),
            value_attr,
            ctx.attrs.to_html()
        )
    }
}

/// Hidden `<input>` widget.
struct HiddenInput;

impl Widget for HiddenInput {
    fn render(&self, ctx: &WidgetContext<'_>) -> String {
        let value = ctx.text_value().unwrap_or_default();
        format!(
            r#"<input type="hidden" id="{}" name="{}" value="{}"{}>"#,
            html_escape(&ctx.id),
            html_escape(ctx.name),
            html_escape(&value),
            ctx.attrs.to_html()
        )
    }
}

/// `<textarea>` widget.
struct TextareaInput;

impl Widget for TextareaInput {
    fn render(&self, ctx: &WidgetContext<'_>) -> String {
        let content = ctx.text_value().map(|v| html_escape(&v)).unwrap_or_default();
        format!(
            r#"<textarea class="{}" id="{}" name="{}"{}>{}</textarea>"#,
            html_escape(&ctx.class(&ctx.theme.input_class)),
            html_escape(&ctx.id),
            html_escape(ctx.name),
            ctx.attrs.to_html(),
            content
        )
    }
}

/// `<select>` widget for drop-down lists and list boxes.
///
/// A `prompt` attribute becomes a leading option with an empty value. List
/// boxes allow several selections.
struct SelectInput {
    list_box: bool,
}

impl Widget for SelectInput {
    fn render(&self, ctx: &WidgetContext<'_>) -> String {
        let mut attrs = ctx.attrs.clone();
        let prompt = attrs.remove("prompt");
        if self.list_box {
            if attrs.get("size").is_none() {
                attrs.set("size", ctx.theme.list_box_size.to_string());
            }
            attrs.set("multiple", "multiple");
        }

        let mut options = String::new();
        if let Some(prompt) = prompt {
            options.push_str(&format!(
                r#"<option value="">{}</option>"#,
                html_escape(&prompt)
            ));
        }

        for (opt_value, text) in ctx.items.into_iter().flatten() {
            let selected_attr = if ctx.is_selected(opt_value) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(opt_value),
                html_escape(text)
            ));
        }

        format!(
            r#"<select class="{}" id="{}" name="{}"{}>{}</select>"#,
            html_escape(&ctx.class(&ctx.theme.select_class)),
            html_escape(&ctx.id),
            html_escape(ctx.name),
            attrs.to_html(),
            options
        )
    }
}

/// Single checkbox or radio, preceded by a hidden field carrying the
/// unchecked value.
struct CheckInput {
    input_type: &'static str,
}

impl Widget for CheckInput {
    fn render(&self, ctx: &WidgetContext<'_>) -> String {
        let checked = ctx.value.is_some_and(FieldValue::as_bool);
        let checked_attr = if checked { " checked" } else { "" };

        let label_html = ctx
            .label
            .as_ref()
            .map(|l| {
                let mut classes = Attributes::new();
                classes.add_class(&ctx.theme.check_label_class);
                let marker = if ctx.required {
                    classes.add_class(&ctx.theme.required_label_class);
                    ctx.theme.required_marker.as_str()
                } else {
                    ""
                };
                format!(
                    r#"<label class="{}" for="{}">{}{marker}</label>"#,
                    html_escape(&classes.get("class").cloned().unwrap_or_default()),
                    html_escape(&ctx.id),
                    html_escape(l)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<div class="{}"><input type="hidden" name="{}" value="{}"><input type="{}" class="{}" id="{}" name="{}" value="1"{checked_attr}{}>{}</div>"#,
            html_escape(&ctx.theme.check_class),
            html_escape(ctx.name),
            html_escape(&ctx.theme.uncheck_value),
            self.input_type,
            html_escape(&ctx.class(&ctx.theme.check_input_class)),
            html_escape(&ctx.id),
            html_escape(ctx.name),
            ctx.attrs.to_html(),
            label_html
        )
    }
}

/// Group of checkboxes or radios built from `items`.
///
/// Checkbox groups start with an empty hidden field so that clearing every
/// box still submits the field.
struct ChoiceListInput {
    input_type: &'static str,
}

impl Widget for ChoiceListInput {
    fn render(&self, ctx: &WidgetContext<'_>) -> String {
        let mut html = String::new();
        if self.input_type == "checkbox" {
            html.push_str(&format!(
                r#"<input type="hidden" name="{}" value="">"#,
                html_escape(ctx.name)
            ));
        }

        for (i, (opt_value, text)) in ctx.items.into_iter().flatten().enumerate() {
            let id = format!("{}_{i}", ctx.id);
            let checked_attr = if ctx.is_selected(opt_value) {
                " checked"
            } else {
                ""
            };

            html.push_str(&format!(
                r#"<div class="{}"><input type="{}" class="{}" id="{}" name="{}" value="{}"{checked_attr}{}><label class="{}" for="{}">{}</label></div>"#,
                html_escape(&ctx.theme.check_class),
                self.input_type,
                html_escape(&ctx.class(&ctx.theme.check_input_class)),
                html_escape(&id),
                html_escape(ctx.name),
                html_escape(opt_value),
                ctx.attrs.to_html(),
                html_escape(&ctx.theme.check_label_class),
                html_escape(&id),
                html_escape(text)
            ));
        }

        format!(r#"<div id="{}">{}</div>"#, html_escape(&ctx.id), html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(
        theme: &'a Theme,
        value: Option<&'a FieldValue>,
        items: Option<&'a IndexMap<String, String>>,
    ) -> WidgetContext<'a> {
        WidgetContext {
            name: "field",
            id: "id_field".to_string(),
            value,
            items,
            label: None,
            required: false,
            attrs: Attributes::new(),
            extra_class: None,
            has_error: false,
            theme,
        }
    }

    fn colors() -> IndexMap<String, String> {
        [("r", "Red"), ("g", "Green"), ("b", "Blue")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_text_input() {
        let theme = Theme::default();
        let value = FieldValue::from("a<b");
        let mut c = ctx(&theme, Some(&value), None);
        c.attrs.set("maxlength", "32");
        let html = widget_for(InputType::Email).render(&c);
        assert_eq!(
            html,
            r#"<input type="email" class="form-control" id="id_field" name="field" value="a&lt;b" maxlength="32">"#
        );
    }

    #[test]
    fn test_password_never_echoes_value() {
        let theme = Theme::default();
        let value = FieldValue::from("secret");
        let html = widget_for(InputType::Password).render(&ctx(&theme, Some(&value), None));
        assert!(html.contains(r#"type="password""#));
        assert!(!html.contains("secret"));
    }

    #[test]
    fn test_error_class_is_added() {
        let theme = Theme::default();
        let mut c = ctx(&theme, None, None);
        c.extra_class = Some("wide".to_string());
        c.has_error = true;
        let html = widget_for(InputType::Textarea).render(&c);
        assert!(html.contains(r#"class="form-control wide is-invalid""#));
    }

    #[test]
    fn test_dropdown_marks_current_value() {
        let theme = Theme::default();
        let items = colors();
        let value = FieldValue::from("g");
        let mut c = ctx(&theme, Some(&value), Some(&items));
        c.attrs.set("prompt", "Pick one");
        let html = widget_for(InputType::DropDownList).render(&c);
        assert_eq!(
            html,
            concat!(
                r#"<select class="form-select" id="id_field" name="field">"#,
                r#"<option value="">Pick one</option>"#,
                r#"<option value="r">Red</option>"#,
                r#"<option value="g" selected>Green</option>"#,
                r#"<option value="b">Blue</option>"#,
                "</select>"
            )
        );
    }

    #[test]
    fn test_list_box_has_size_and_multiple_selection() {
        let theme = Theme::default();
        let items = colors();
        let value = FieldValue::List(vec!["r".to_string(), "b".to_string()]);
        let html = widget_for(InputType::ListBox).render(&ctx(&theme, Some(&value), Some(&items)));
        assert!(html.contains(r#"size="4" multiple="multiple""#));
        assert_eq!(html.matches(" selected").count(), 2);
    }

    #[test]
    fn test_checkbox_carries_uncheck_value() {
        let theme = Theme::default();
        let value = FieldValue::Bool(true);
        let mut c = ctx(&theme, Some(&value), None);
        c.label = Some("Remember me".to_string());
        let html = widget_for(InputType::Checkbox).render(&c);
        assert!(html.contains(r#"<input type="hidden" name="field" value="0">"#));
        assert!(html.contains(r#"value="1" checked"#));
        assert!(html.contains(
            r#"<label class="form-check-label" for="id_field">Remember me</label>"#
        ));
    }

    #[test]
    fn test_required_checkbox_label_has_marker() {
        let theme = Theme::default();
        let mut c = ctx(&theme, None, None);
        c.label = Some("Terms".to_string());
        c.required = true;
        let html = widget_for(InputType::Checkbox).render(&c);
        assert!(html.contains(
            r#"<label class="form-check-label required" for="id_field">Terms <span class="required">*</span></label>"#
        ));
    }

    #[test]
    fn test_radio_list() {
        let theme = Theme::default();
        let items = colors();
        let value = FieldValue::from("b");
        let html = widget_for(InputType::RadioList).render(&ctx(&theme, Some(&value), Some(&items)));
        assert_eq!(html.matches(r#"type="radio""#).count(), 3);
        assert!(html.contains(r#"id="id_field_2" name="field" value="b" checked"#));
        assert!(!html.contains(r#"type="hidden""#));
    }

    #[test]
    fn test_checkbox_list_posts_when_cleared() {
        let theme = Theme::default();
        let items = colors();
        let html = widget_for(InputType::CheckBoxList).render(&ctx(&theme, None, Some(&items)));
        assert!(html.starts_with(r#"<div id="id_field"><input type="hidden" name="field" value="">"#));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_hidden_input() {
        let theme = Theme::default();
        let value = FieldValue::from("42");
        let html = widget_for(InputType::Hidden).render(&ctx(&theme, Some(&value), None));
        assert_eq!(html, r#"<input type="hidden" id="id_field" name="field" value="42">"#);
    }
}
