//! A record editor with update, delete and duplicate buttons.
//!
//! Run with `cargo run -p formwork --example multi_button`.

use formwork::model::ModelField;
use formwork::validation::RequiredValidator;
use formwork::{
    DynamicModel, Form, FormDefinition, FormModel, FormRequest, IdentityTranslator,
    RenderDispatcher, SessionTokens, Theme, TokenStore,
};

const DEFINITION: &str = r#"{
    "title": "Edit product",
    "elements": {
        "name": {"type": "text", "hint": "Shown in the catalogue"},
        "category": {
            "type": "dropdownlist",
            "items": {"tools": "Tools", "garden": "Garden", "kitchen": "Kitchen"},
            "prompt": "Choose a category"
        }
    },
    "buttons": {
        "update": {"type": "submit", "label": "Update"},
        "delete": {"type": "submit", "label": "Delete", "class": "btn btn-danger"},
        "duplicate": {"type": "htmlSubmit", "label": "Duplicate"}
    }
}"#;

fn bind() -> formwork::Result<Form<DynamicModel>> {
    let definition = FormDefinition::from_json(DEFINITION, &IdentityTranslator)?;
    let model = DynamicModel::new()
        .with_field(ModelField::new("name").rule(RequiredValidator::new()))
        .with_field(ModelField::new("category"));
    Ok(Form::bind(definition, model)?)
}

fn main() -> formwork::Result<()> {
    let theme = Theme::default();
    let mut tokens = SessionTokens::new();

    let form = bind()?;
    let html = RenderDispatcher::new(&form, &IdentityTranslator, &theme)
        .render(&mut tokens, "/products/7");
    println!("{html}\n");

    let token = tokens.expected().unwrap_or_default().to_string();
    let request = FormRequest::post("/products/7")
        .body_param("_token", token)
        .body_param("name", "Hammer")
        .body_param("category", "tools")
        .body_param("duplicate", "Duplicate");

    for button in ["update", "delete", "duplicate"] {
        let mut form = bind()?;
        if form.submitted(&request, &tokens, Some(button)) && form.validate()? {
            let name = form.model().field("name").and_then(|v| v.as_text()).unwrap_or("");
            println!("{button}: {name}");
        } else {
            println!("{button}: not clicked");
        }
    }

    Ok(())
}
