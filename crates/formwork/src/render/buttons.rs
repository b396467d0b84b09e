//! Button rendering strategies, one per [`ButtonType`].

use crate::definition::ButtonType;
use crate::html::{html_escape, Attributes};

/// Everything a button strategy needs.
pub(crate) struct ButtonContext<'a> {
    /// Button name; posted when the button submits the form.
    pub name: &'a str,
    /// Caption.
    pub label: String,
    /// Attributes including the resolved class.
    pub attrs: Attributes,
}

/// Strategy rendering one kind of button.
pub(crate) trait ButtonWidget: Send + Sync {
    /// Renders the button as HTML.
    fn render(&self, ctx: &ButtonContext<'_>) -> String;
}

/// Returns the strategy registered for a button type.
pub(crate) fn button_widget_for(kind: ButtonType) -> &'static dyn ButtonWidget {
    match kind {
        ButtonType::HtmlButton => &HtmlButton {
            button_type: "button",
        },
        ButtonType::HtmlReset => &HtmlButton {
            button_type: "reset",
        },
        ButtonType::HtmlSubmit => &HtmlButton {
            button_type: "submit",
        },
        ButtonType::Submit => &InputButton {
            input_type: "submit",
        },
        ButtonType::Button => &InputButton {
            input_type: "button",
        },
        ButtonType::Image => &ImageButton,
        ButtonType::Reset => &InputButton {
            input_type: "reset",
        },
        ButtonType::Link => &LinkButton,
    }
}

/// `<button>` element.
struct HtmlButton {
    button_type: &'static str,
}

impl ButtonWidget for HtmlButton {
    fn render(&self, ctx: &ButtonContext<'_>) -> String {
        format!(
            r#"<button type="{}" name="{}" value="{}"{}>{}</button>"#,
            self.button_type,
            html_escape(ctx.name),
            html_escape(&ctx.label),
            ctx.attrs.to_html(),
            html_escape(&ctx.label)
        )
    }
}

/// `<input>` button whose caption is its value.
struct InputButton {
    input_type: &'static str,
}

impl ButtonWidget for InputButton {
    fn render(&self, ctx: &ButtonContext<'_>) -> String {
        format!(
            r#"<input type="{}" name="{}" value="{}"{}>"#,
            self.input_type,
            html_escape(ctx.name),
            html_escape(&ctx.label),
            ctx.attrs.to_html()
        )
    }
}

/// Image submit button; the caption becomes the alt text.
struct ImageButton;

impl ButtonWidget for ImageButton {
    fn render(&self, ctx: &ButtonContext<'_>) -> String {
        let mut attrs = ctx.attrs.clone();
        if attrs.get("alt").is_none() {
            attrs.set("alt", ctx.label.clone());
        }
        format!(
            r#"<input type="image" name="{}"{}>"#,
            html_escape(ctx.name),
            attrs.to_html()
        )
    }
}

/// Link that submits the enclosing form with its name as a parameter.
struct LinkButton;

impl ButtonWidget for LinkButton {
    fn render(&self, ctx: &ButtonContext<'_>) -> String {
        let mut attrs = ctx.attrs.clone();
        let href = attrs.remove("href").unwrap_or_else(|| "#".to_string());
        format!(
            r#"<a href="{}" data-submit="{}"{}>{}</a>"#,
            html_escape(&href),
            html_escape(ctx.name),
            attrs.to_html(),
            html_escape(&ctx.label)
        )
    }
}
