//! # formwork
//!
//! Declarative HTML forms bound to data models.
//!
//! This crate provides:
//! - Form definitions loaded from JSON configuration
//! - Binding of a definition to a model and the submission protocol
//! - Validation rules with per-field error collection
//! - Rendering of labels, inputs, hints, errors, rows and whole forms
//!
//! ## Quick Start
//!
//! ```rust
//! use formwork::{
//!     DynamicModel, Form, FormDefinition, FormRequest, IdentityTranslator,
//!     RenderDispatcher, SessionTokens, Theme, TokenStore,
//! };
//!
//! let definition = FormDefinition::from_json(
//!     r#"{
//!         "title": "Login",
//!         "elements": {
//!             "username": {"type": "text", "maxlength": 32},
//!             "remember": {"type": "checkbox"}
//!         },
//!         "buttons": {"login": {"type": "submit"}}
//!     }"#,
//!     &IdentityTranslator,
//! )
//! .unwrap();
//! let model = DynamicModel::from_json(
//!     r#"{"fields": {"username": {"rules": [{"rule": "required"}]}, "remember": {}}}"#,
//! )
//! .unwrap();
//! let mut form = Form::bind(definition, model).unwrap();
//!
//! // First request: render the empty form with a fresh token.
//! let mut tokens = SessionTokens::new();
//! let theme = Theme::default();
//! let html = RenderDispatcher::new(&form, &IdentityTranslator, &theme)
//!     .render(&mut tokens, "/login");
//! assert!(html.contains(r#"name="username""#));
//!
//! // Second request: the browser posts the form back.
//! let token = tokens.expected().unwrap().to_string();
//! let request = FormRequest::post("/login")
//!     .body_param("_token", token)
//!     .body_param("username", "alice")
//!     .body_param("login", "Login");
//!
//! assert!(form.submitted(&request, &tokens, None));
//! assert!(form.validate().unwrap());
//! assert_eq!(form.clicked_button(), Some("login"));
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use formwork::model::{DynamicModel, FormModel, ModelField};
//! use formwork::validation::{PatternValidator, RequiredValidator};
//!
//! let mut model = DynamicModel::new().with_field(
//!     ModelField::new("email")
//!         .rule(RequiredValidator::new())
//!         .rule(PatternValidator::email())
//!         .value("not-an-email"),
//! );
//!
//! assert!(!model.validate());
//! assert!(model.errors().has("email"));
//! ```

pub mod definition;
mod error;
mod form;
pub mod html;
pub mod i18n;
pub mod model;
pub mod render;
pub mod request;
pub mod token;
pub mod validation;

pub use definition::{ButtonType, FormConfig, FormDefinition, InputType};
pub use error::{ConfigurationError, FormError, Result, ValidationErrors};
pub use form::{Form, SubmissionState};
pub use i18n::{IdentityTranslator, MessageCatalog, Translator};
pub use model::{DynamicModel, FieldValue, FormModel};
pub use render::{RenderDispatcher, Theme};
pub use request::{FormRequest, Method, Params, PostedValue};
pub use token::{SessionTokens, TokenStore, DEFAULT_TOKEN_FIELD};
