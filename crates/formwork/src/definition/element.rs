//! Input and button elements of a form definition.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigurationError;
use crate::html::Attributes;
use crate::i18n::Translator;

/// Declared type of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Single-line text box.
    Text,
    /// Hidden field.
    Hidden,
    /// Password box.
    Password,
    /// Multi-line text.
    Textarea,
    /// File upload.
    File,
    /// Single radio button.
    Radio,
    /// Single checkbox.
    Checkbox,
    /// List box (select with a visible size).
    ListBox,
    /// Drop-down list.
    DropDownList,
    /// Group of checkboxes.
    CheckBoxList,
    /// Group of radio buttons.
    RadioList,
    /// URL box.
    Url,
    /// Email box.
    Email,
    /// Number box.
    Number,
    /// Range slider.
    Range,
    /// Date picker.
    Date,
}

impl InputType {
    /// Every input type, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Text,
        Self::Hidden,
        Self::Password,
        Self::Textarea,
        Self::File,
        Self::Radio,
        Self::Checkbox,
        Self::ListBox,
        Self::DropDownList,
        Self::CheckBoxList,
        Self::RadioList,
        Self::Url,
        Self::Email,
        Self::Number,
        Self::Range,
        Self::Date,
    ];

    /// Parses a configuration type name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns the configuration name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Hidden => "hidden",
            Self::Password => "password",
            Self::Textarea => "textarea",
            Self::File => "file",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::ListBox => "listbox",
            Self::DropDownList => "dropdownlist",
            Self::CheckBoxList => "checkboxlist",
            Self::RadioList => "radiolist",
            Self::Url => "url",
            Self::Email => "email",
            Self::Number => "number",
            Self::Range => "range",
            Self::Date => "date",
        }
    }

    /// Whether the type renders a choice set from `items`.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::ListBox | Self::DropDownList | Self::CheckBoxList | Self::RadioList
        )
    }

    /// Whether a submission may carry several values for the field.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::ListBox | Self::CheckBoxList)
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a button element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonType {
    /// `<button type="button">`.
    HtmlButton,
    /// `<button type="reset">`.
    HtmlReset,
    /// `<button type="submit">`.
    HtmlSubmit,
    /// `<input type="submit">`.
    Submit,
    /// `<input type="button">`.
    Button,
    /// `<input type="image">`.
    Image,
    /// `<input type="reset">`.
    Reset,
    /// Link that submits the form.
    Link,
}

impl ButtonType {
    /// Every button type, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::HtmlButton,
        Self::HtmlReset,
        Self::HtmlSubmit,
        Self::Submit,
        Self::Button,
        Self::Image,
        Self::Reset,
        Self::Link,
    ];

    /// Parses a configuration type name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns the configuration name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HtmlButton => "htmlButton",
            Self::HtmlReset => "htmlReset",
            Self::HtmlSubmit => "htmlSubmit",
            Self::Submit => "submit",
            Self::Button => "button",
            Self::Image => "image",
            Self::Reset => "reset",
            Self::Link => "link",
        }
    }
}

impl std::fmt::Display for ButtonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row template used when an element declares no layout.
pub const DEFAULT_LAYOUT: &str = "{label}\n{input}\n{hint}\n{error}";

/// Row template of single checkboxes and radios, which carry their own label.
pub const CHECK_LAYOUT: &str = "{input}\n{hint}\n{error}";

/// A configured input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputElement {
    /// Element name; matches a model field.
    pub name: String,
    /// Declared input type.
    pub kind: InputType,
    /// Label overriding the model's label.
    pub label: Option<String>,
    /// Hint text shown below the input.
    pub hint: Option<String>,
    /// Choices as submit-value to display-text, for list types.
    pub items: Option<IndexMap<String, String>>,
    /// Row template.
    pub layout: Option<String>,
    /// Whether whole-form rendering shows the element.
    pub visible: bool,
    /// Pass-through presentation attributes.
    pub attributes: Attributes,
}

impl InputElement {
    /// Returns the row template of this element.
    pub fn layout(&self) -> &str {
        match (&self.layout, self.kind) {
            (Some(layout), _) => layout,
            (None, InputType::Checkbox | InputType::Radio) => CHECK_LAYOUT,
            (None, _) => DEFAULT_LAYOUT,
        }
    }
}

/// A configured button element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonElement {
    /// Button name; its presence in a payload marks a submission.
    pub name: String,
    /// Declared button type.
    pub kind: ButtonType,
    /// Caption.
    pub label: Option<String>,
    /// Pass-through presentation attributes.
    pub attributes: Attributes,
}

/// Configuration of one input element as it appears in a document.
///
/// Keys other than the named ones are collected into `attributes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementConfig {
    /// Input type name; `text` when absent.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Label.
    #[serde(default)]
    pub label: Option<String>,
    /// Hint.
    #[serde(default)]
    pub hint: Option<String>,
    /// Choices for list types.
    #[serde(default)]
    pub items: Option<IndexMap<String, Value>>,
    /// Row template.
    #[serde(default)]
    pub layout: Option<String>,
    /// Visibility flag.
    #[serde(default)]
    pub visible: Option<bool>,
    /// Every remaining key.
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

/// Configuration of one button as it appears in a document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ButtonConfig {
    /// Button type name; `submit` when absent.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Caption.
    #[serde(default)]
    pub label: Option<String>,
    /// Every remaining key.
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl ElementConfig {
    pub(crate) fn build(
        self,
        name: &str,
        translator: &dyn Translator,
    ) -> Result<InputElement, ConfigurationError> {
        let kind = match self.kind.as_deref() {
            None => InputType::Text,
            Some(s) => InputType::parse(s).ok_or_else(|| ConfigurationError::UnknownInputType {
                element: name.to_string(),
                kind: s.to_string(),
            })?,
        };

        if kind.is_list() && self.items.is_none() {
            return Err(ConfigurationError::MissingItems {
                element: name.to_string(),
                kind: kind.to_string(),
            });
        }

        let items = self.items.map(|items| {
            items
                .into_iter()
                .map(|(value, text)| (value, translator.translate(&scalar_text(&text), &[])))
                .collect()
        });

        Ok(InputElement {
            name: name.to_string(),
            kind,
            label: self.label.map(|l| translator.translate(&l, &[])),
            hint: self.hint.map(|h| translator.translate(&h, &[])),
            items,
            layout: self.layout,
            visible: self.visible.unwrap_or(true),
            attributes: control_attributes(name, self.attributes)?,
        })
    }
}

impl ButtonConfig {
    pub(crate) fn build(
        self,
        name: &str,
        translator: &dyn Translator,
    ) -> Result<ButtonElement, ConfigurationError> {
        let kind = match self.kind.as_deref() {
            None => ButtonType::Submit,
            Some(s) => ButtonType::parse(s).ok_or_else(|| ConfigurationError::UnknownButtonType {
                button: name.to_string(),
                kind: s.to_string(),
            })?,
        };

        Ok(ButtonElement {
            name: name.to_string(),
            kind,
            label: self.label.map(|l| translator.translate(&l, &[])),
            attributes: control_attributes(name, self.attributes)?,
        })
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Attributes every input and button widget writes from the element itself.
const RESERVED_ATTRIBUTES: [&str; 2] = ["name", "value"];

/// Residual keys of an input or button; reserved keys are rejected.
fn control_attributes(
    name: &str,
    raw: IndexMap<String, Value>,
) -> Result<Attributes, ConfigurationError> {
    if let Some(key) = raw
        .keys()
        .find(|key| RESERVED_ATTRIBUTES.contains(&key.to_ascii_lowercase().as_str()))
    {
        return Err(ConfigurationError::ReservedAttribute {
            element: name.to_string(),
            attribute: key.clone(),
        });
    }
    Ok(collect_attributes(raw))
}

/// Converts residual configuration keys into presentation attributes.
///
/// `true` becomes `key="key"`; `false` and `null` are dropped.
pub(crate) fn collect_attributes(raw: IndexMap<String, Value>) -> Attributes {
    let mut attrs = Attributes::new();
    for (key, value) in raw {
        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Bool(true) => attrs.set(key.clone(), key),
            other => attrs.set(key, scalar_text(&other)),
        }
    }
    attrs
}
