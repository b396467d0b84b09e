//! HTML rendering of bound forms.
//!
//! [`RenderDispatcher`] turns a [`Form`] into markup. Each input type and
//! each button type has its own strategy; the dispatcher picks one by the
//! element's declared type and assembles labels, hints, errors and rows
//! around it.

mod buttons;
mod theme;
mod widgets;

pub use theme::Theme;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};
use tracing::{debug, warn};

use crate::definition::{ButtonElement, InputElement, InputType};
use crate::error::{FormError, Result};
use crate::form::Form;
use crate::html::{html_escape, is_tag_name, Attributes};
use crate::i18n::Translator;
use crate::model::{humanize, FormModel};
use crate::token::TokenStore;

use buttons::{button_widget_for, ButtonContext};
use widgets::{widget_for, WidgetContext};

/// Message key of the default error summary header.
pub const SUMMARY_HEADER: &str = "Please fix the following input errors:";

/// Renders the parts of a bound form, or the whole of it.
pub struct RenderDispatcher<'a, M> {
    form: &'a Form<M>,
    translator: &'a dyn Translator,
    theme: &'a Theme,
}

impl<'a, M: FormModel> RenderDispatcher<'a, M> {
    /// Creates a dispatcher for `form`.
    pub fn new(form: &'a Form<M>, translator: &'a dyn Translator, theme: &'a Theme) -> Self {
        Self {
            form,
            translator,
            theme,
        }
    }

    fn model(&self) -> &M {
        self.form.model()
    }

    fn element(&self, name: &str) -> Result<&'a InputElement> {
        self.form
            .definition()
            .element(name)
            .ok_or_else(|| FormError::UnknownElement(name.to_string()))
    }

    /// Id of the rendered input: the configured one, or prefix plus name.
    fn id_for(&self, name: &str) -> String {
        self.form
            .definition()
            .element(name)
            .and_then(|e| e.attributes.get("id").cloned())
            .unwrap_or_else(|| format!("{}{name}", self.theme.id_prefix))
    }

    /// The element's own label, else the model's.
    fn label_text(&self, name: &str) -> String {
        self.form
            .definition()
            .element(name)
            .and_then(|e| e.label.clone())
            .unwrap_or_else(|| self.model().label_for(name))
    }

    /// Renders the `<label>` of a field.
    ///
    /// With `required_marker`, labels of required fields get the theme's
    /// required class and marker. Unlike the other per-element renderers this
    /// never fails: a model field with no element of its own still gets the
    /// model's label, so hand-written inputs can be labelled too.
    pub fn render_label(&self, name: &str, required_marker: bool) -> String {
        let id = self.id_for(name);
        let text = self.label_text(name);
        let required = required_marker && self.model().is_required(name);

        let mut classes = Attributes::new();
        classes.add_class(&self.theme.label_class);
        if required {
            classes.add_class(&self.theme.required_label_class);
        }
        let css = classes.get("class").cloned().unwrap_or_default();
        let marker = self.theme.required_marker.clone();

        html! { label.for_(#id).class(#css) }
            .text(&text)
            .when(required, |l| l.raw(&marker))
            .render()
    }

    /// Renders the input of a field with the strategy of its type.
    pub fn render_input(&self, name: &str) -> Result<String> {
        let element = self.element(name)?;
        Ok(self.input_markup(element))
    }

    fn input_markup(&self, element: &InputElement) -> String {
        let name = element.name.as_str();
        let mut attrs = element.attributes.clone();
        let id = attrs
            .remove("id")
            .unwrap_or_else(|| format!("{}{name}", self.theme.id_prefix));
        let extra_class = attrs.remove("class");
        let label = matches!(element.kind, InputType::Checkbox | InputType::Radio)
            .then(|| self.label_text(name));
        let required = label.is_some() && self.model().is_required(name);

        let ctx = WidgetContext {
            name,
            id,
            value: self.model().field(name),
            items: element.items.as_ref(),
            label,
            required,
            attrs,
            extra_class,
            has_error: self.model().errors().has(name),
            theme: self.theme,
        };
        widget_for(element.kind).render(&ctx)
    }

    /// Renders the error messages of a field; empty when it has none.
    pub fn render_error(&self, name: &str) -> String {
        let Some(messages) = self.model().errors().get(name) else {
            return String::new();
        };
        let css = self.theme.error_class.clone();

        html! { div.class(#css) }
            .children(messages, |message, div: Element<Div>| div.text(message))
            .render()
    }

    /// Renders every error of the model as one block.
    ///
    /// Empty exactly when the model has no errors. `header` and `footer` are
    /// inserted as given; the header defaults to a translated paragraph.
    pub fn render_error_summary(&self, header: Option<&str>, footer: Option<&str>) -> String {
        let errors = self.model().errors();
        if errors.is_empty() {
            return String::new();
        }

        let header = match header {
            Some(h) => h.to_string(),
            None => format!(
                "<p>{}</p>",
                html_escape(&self.translator.translate(SUMMARY_HEADER, &[]))
            ),
        };
        let footer = footer.unwrap_or_default().to_string();
        let messages: Vec<String> = errors
            .all_errors()
            .into_iter()
            .map(|(_, message)| message.to_string())
            .collect();
        let css = self.theme.summary_class.clone();

        html! { div.class(#css) }
            .attr("role", "alert")
            .raw(&header)
            .child::<Ul, _>(|ul| {
                ul.class("mb-0")
                    .children(messages.iter(), |message, li: Element<Li>| li.text(message))
            })
            .raw(&footer)
            .render()
    }

    /// Renders the hint of a field, optionally inside a `wrapper` tag.
    ///
    /// Empty when the element has no hint. A wrapper that is not a plain tag
    /// name is ignored.
    pub fn render_hint(&self, name: &str, wrapper: Option<&str>) -> String {
        let Some(hint) = self
            .form
            .definition()
            .element(name)
            .and_then(|e| e.hint.as_deref())
        else {
            return String::new();
        };
        let text = html_escape(hint);

        match wrapper {
            None => text,
            Some(tag) if is_tag_name(tag) => format!(
                r#"<{tag} class="{}">{text}</{tag}>"#,
                html_escape(&self.theme.hint_class)
            ),
            Some(tag) => {
                warn!(tag, field = name, "ignoring invalid hint wrapper tag");
                text
            }
        }
    }

    /// Renders a button with the strategy of its type.
    pub fn render_button(&self, name: &str) -> Result<String> {
        let button = self
            .form
            .definition()
            .button(name)
            .ok_or_else(|| FormError::UnknownButton(name.to_string()))?;
        Ok(self.button_markup(button))
    }

    fn button_markup(&self, button: &ButtonElement) -> String {
        let mut attrs = button.attributes.clone();
        if attrs.get("class").is_none() {
            attrs.set("class", self.theme.button_class.clone());
        }
        let label = button
            .label
            .clone()
            .unwrap_or_else(|| self.translator.translate(&humanize(&button.name), &[]));

        let ctx = ButtonContext {
            name: &button.name,
            label,
            attrs,
        };
        button_widget_for(button.kind).render(&ctx)
    }

    /// Opens the form and embeds a freshly issued integrity token.
    ///
    /// `current_url` is the action when the definition has none.
    pub fn render_begin(&self, tokens: &mut dyn TokenStore, current_url: &str) -> String {
        let definition = self.form.definition();
        let mut attrs = Attributes::new()
            .with("action", definition.action().unwrap_or(current_url))
            .with("method", definition.method().as_str().to_lowercase());
        if definition.has_file_input() {
            attrs.set("enctype", "multipart/form-data");
        }
        for (key, value) in &definition.attributes().attrs {
            attrs.set(key.clone(), value.clone());
        }

        let token = tokens.issue();
        format!(
            r#"<form{}><input type="hidden" name="{}" value="{}">"#,
            attrs.to_html(),
            html_escape(tokens.field_name()),
            html_escape(&token)
        )
    }

    /// Closes the form.
    pub fn render_end(&self) -> String {
        "</form>".to_string()
    }

    /// Renders one field through its row layout.
    ///
    /// Hidden fields render as the bare input.
    pub fn render_row(&self, name: &str) -> Result<String> {
        let element = self.element(name)?;
        Ok(self.row_markup(element))
    }

    fn row_markup(&self, element: &InputElement) -> String {
        if element.kind == InputType::Hidden {
            return self.input_markup(element);
        }

        let name = element.name.as_str();
        let body = expand_layout(element.layout(), |placeholder| match placeholder {
            "label" => Some(self.render_label(name, true)),
            "input" => Some(self.input_markup(element)),
            "hint" => Some(self.render_hint(name, Some("div"))),
            "error" => Some(self.render_error(name)),
            _ => None,
        });

        format!(
            r#"<div class="{}">{body}</div>"#,
            html_escape(&self.theme.row_class)
        )
    }

    /// Renders every button in declaration order.
    pub fn render_buttons(&self) -> String {
        let buttons: String = self
            .form
            .definition()
            .buttons()
            .map(|b| self.button_markup(b))
            .collect();
        if buttons.is_empty() {
            return buttons;
        }
        format!(
            r#"<div class="{}">{buttons}</div>"#,
            html_escape(&self.theme.buttons_class)
        )
    }

    /// Renders the whole form: title, description, error summary, every
    /// visible row and the buttons.
    pub fn render(&self, tokens: &mut dyn TokenStore, current_url: &str) -> String {
        let definition = self.form.definition();
        let mut html = self.render_begin(tokens, current_url);

        if let Some(title) = definition.title() {
            html.push_str(&format!("<fieldset><legend>{}</legend>", html_escape(title)));
        }
        if let Some(description) = definition.description() {
            html.push_str(&format!(
                r#"<p class="description">{}</p>"#,
                html_escape(description)
            ));
        }
        if self.theme.show_error_summary {
            html.push_str(&self.render_error_summary(None, None));
        }

        let mut rows = 0usize;
        for element in definition.elements().filter(|e| e.visible) {
            html.push_str(&self.row_markup(element));
            rows += 1;
        }

        if definition.title().is_some() {
            html.push_str("</fieldset>");
        }
        html.push_str(&self.render_buttons());
        html.push_str(&self.render_end());

        debug!(rows, "rendered form");
        html
    }
}

/// Substitutes `{name}` placeholders in one pass.
///
/// Unknown placeholders are kept verbatim, and substituted text is never
/// scanned again.
fn expand_layout(layout: &str, mut resolve: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(layout.len());
    let mut rest = layout;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('}') {
            Some(end) => match resolve(&tail[1..end]) {
                Some(text) => {
                    out.push_str(&text);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
