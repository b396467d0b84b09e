//! A form definition bound to a model, and the submission protocol.

use tracing::debug;

use crate::definition::{FormDefinition, InputElement, InputType};
use crate::error::{ConfigurationError, FormError, Result};
use crate::i18n::{IdentityTranslator, Translator};
use crate::model::{FieldValue, FormModel};
use crate::request::{FormRequest, PostedValue};
use crate::token::TokenStore;

/// Where a form is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// No matching submission has been seen.
    Unsubmitted,
    /// Values were copied onto the model; validation has not run.
    Submitted,
    /// Validation ran and found errors.
    Invalid,
    /// Validation ran and passed.
    Valid,
}

/// A [`FormDefinition`] bound to a [`FormModel`].
///
/// ```rust
/// use formwork::{Form, FormDefinition, FormRequest, SessionTokens, TokenStore};
/// use formwork::i18n::IdentityTranslator;
/// use formwork::model::{DynamicModel, ModelField};
/// use formwork::validation::RequiredValidator;
///
/// let definition = FormDefinition::from_json(
///     r#"{"elements": {"username": {}}, "buttons": {"submit": {}}}"#,
///     &IdentityTranslator,
/// )
/// .unwrap();
/// let model = DynamicModel::new()
///     .with_field(ModelField::new("username").rule(RequiredValidator::new()));
/// let mut form = Form::bind(definition, model).unwrap();
///
/// let mut tokens = SessionTokens::new();
/// let token = tokens.issue();
/// let request = FormRequest::post("/login")
///     .body_param("username", "alice")
///     .body_param("submit", "Submit")
///     .body_param(tokens.field_name(), token);
///
/// assert!(form.submitted(&request, &tokens, None));
/// assert!(form.validate().unwrap());
/// ```
#[derive(Debug)]
pub struct Form<M> {
    definition: FormDefinition,
    model: M,
    state: SubmissionState,
    clicked: Option<String>,
}

impl<M: FormModel> Form<M> {
    /// Binds a definition to a model.
    ///
    /// Fails when an element names a field the model does not declare.
    pub fn bind(definition: FormDefinition, model: M) -> std::result::Result<Self, ConfigurationError> {
        if let Some(element) = definition.elements().find(|e| !model.has_field(&e.name)) {
            return Err(ConfigurationError::UnknownField(element.name.clone()));
        }
        debug!(
            elements = definition.elements().count(),
            "bound form definition to model"
        );

        Ok(Self {
            definition,
            model,
            state: SubmissionState::Unsubmitted,
            clicked: None,
        })
    }

    /// Decides whether this form was submitted by `request`.
    ///
    /// The integrity token must match before any button is considered. With
    /// `button`, only that name counts; without, any declared button does.
    /// On success every posted value of a declared element is copied onto
    /// the model. A request that does not count leaves the form untouched.
    pub fn submitted(
        &mut self,
        request: &FormRequest,
        tokens: &dyn TokenStore,
        button: Option<&str>,
    ) -> bool {
        let params = request.params_for(self.definition.method());

        let posted_token = params.get(tokens.field_name()).map(PostedValue::last);
        if !tokens.verify(posted_token) {
            debug!(
                token_present = posted_token.is_some(),
                "integrity token mismatch; treating form as not submitted"
            );
            return false;
        }

        let clicked = match button {
            Some(name) => params.contains(name).then(|| name.to_string()),
            None => self
                .definition
                .buttons()
                .find(|b| params.contains(&b.name))
                .map(|b| b.name.clone()),
        };

        let Some(clicked) = clicked else {
            debug!(expected = ?button, "no matching button posted");
            return false;
        };

        let mut copied = 0usize;
        for element in self.definition.elements() {
            if let Some(posted) = params.get(&element.name) {
                self.model
                    .set_field(&element.name, posted_to_value(element, posted));
                copied += 1;
            }
        }

        debug!(button = %clicked, copied, "form submitted");
        self.clicked = Some(clicked);
        self.state = SubmissionState::Submitted;
        true
    }

    /// Runs the model's validation rules.
    ///
    /// Returns whether every field passed. Calling this before
    /// [`Form::submitted`] returned true is a usage error.
    pub fn validate(&mut self) -> Result<bool> {
        self.validate_with(&IdentityTranslator)
    }

    /// Like [`Form::validate`], with error messages passed through
    /// `translator`.
    pub fn validate_with(&mut self, translator: &dyn Translator) -> Result<bool> {
        if self.state == SubmissionState::Unsubmitted {
            return Err(FormError::Usage(
                "validate() called before a successful submitted()".to_string(),
            ));
        }

        let valid = self.model.validate_with(translator);
        self.state = if valid {
            SubmissionState::Valid
        } else {
            SubmissionState::Invalid
        };
        debug!(valid, errors = self.model.errors().len(), "form validated");
        Ok(valid)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// The button that triggered the accepted submission.
    pub fn clicked_button(&self) -> Option<&str> {
        self.clicked.as_deref()
    }

    /// The bound definition.
    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    /// The bound model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the bound model, e.g. to preload values.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Unbinds the form and returns the model.
    pub fn into_model(self) -> M {
        self.model
    }
}

/// Converts a posted value to the shape the element's type implies.
fn posted_to_value(element: &InputElement, posted: &PostedValue) -> FieldValue {
    match element.kind {
        InputType::Checkbox | InputType::Radio => {
            FieldValue::Text(posted.last().to_string()).as_bool().into()
        }
        kind if kind.is_multi_valued() => FieldValue::List(
            posted
                .all()
                .into_iter()
                .filter(|v| !v.is_empty())
                .collect(),
        ),
        _ => FieldValue::Text(posted.last().to_string()),
    }
}
