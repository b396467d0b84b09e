#![allow(dead_code)]

use formwork::model::ModelField;
use formwork::validation::{LengthValidator, RequiredValidator};
use formwork::{
    DynamicModel, Form, FormDefinition, FormRequest, IdentityTranslator, SessionTokens,
};

pub const TOKEN: &str = "4f1c0d2e9b";

pub fn definition(json: &str) -> FormDefinition {
    FormDefinition::from_json(json, &IdentityTranslator)
        .unwrap_or_else(|e| panic!("Failed to load definition: {json}\nError: {e:?}"))
}

/// Username (required, at most 16 characters) and a remember-me checkbox.
pub fn login_form() -> Form<DynamicModel> {
    let definition = definition(
        r#"{
            "title": "Login",
            "elements": {
                "username": {"type": "text"},
                "remember": {"type": "checkbox"}
            },
            "buttons": {"submit": {"type": "submit", "label": "Login"}}
        }"#,
    );
    let model = DynamicModel::new()
        .with_field(
            ModelField::new("username")
                .rule(RequiredValidator::new())
                .rule(LengthValidator::max(16)),
        )
        .with_field(ModelField::new("remember"));
    Form::bind(definition, model).expect("login form binds")
}

/// Record editor with three submit buttons.
pub fn record_form() -> Form<DynamicModel> {
    let definition = definition(
        r#"{
            "elements": {"name": {}},
            "buttons": {
                "update": {"label": "Update"},
                "delete": {"label": "Delete"},
                "duplicate": {"type": "htmlSubmit", "label": "Duplicate"}
            }
        }"#,
    );
    let model = DynamicModel::new().with_field(ModelField::new("name"));
    Form::bind(definition, model).expect("record form binds")
}

pub fn tokens() -> SessionTokens {
    SessionTokens::new().with_token(TOKEN)
}

/// A POST to `/form` carrying the valid token and `params`.
pub fn post(params: &[(&str, &str)]) -> FormRequest {
    params
        .iter()
        .fold(FormRequest::post("/form").body_param("_token", TOKEN), |r, (k, v)| {
            r.body_param(*k, *v)
        })
}
