//! Integration tests for loading, binding, submission and validation.

mod common;
use common::*;

use formwork::model::ModelField;
use formwork::{
    ConfigurationError, DynamicModel, FieldValue, Form, FormError, FormModel, FormRequest,
    IdentityTranslator, MessageCatalog, RenderDispatcher, SessionTokens, SubmissionState, Theme,
    TokenStore,
};

// =============================================================================
// Loading and binding
// =============================================================================

#[test]
fn list_types_without_items_fail_to_load() {
    for kind in ["listbox", "dropdownlist", "checkboxlist", "radiolist"] {
        let json = format!(r#"{{"elements": {{"pick": {{"type": "{kind}"}}}}}}"#);
        let err = formwork::FormDefinition::from_json(&json, &IdentityTranslator).unwrap_err();
        assert!(
            matches!(
                err,
                FormError::Configuration(ConfigurationError::MissingItems { ref element, .. })
                    if element == "pick"
            ),
            "{kind}: {err:?}"
        );
    }
}

#[test]
fn unknown_input_type_fails_to_load() {
    let err = formwork::FormDefinition::from_json(
        r#"{"elements": {"when": {"type": "datetime"}}}"#,
        &IdentityTranslator,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        FormError::Configuration(ConfigurationError::UnknownInputType { .. })
    ));
}

#[test]
fn binding_rejects_fields_missing_from_model() {
    let definition = definition(r#"{"elements": {"username": {}, "email": {}}}"#);
    let model = DynamicModel::new().with_field(ModelField::new("username"));
    let err = Form::bind(definition, model).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownField("email".to_string()));
}

// =============================================================================
// Submission detection
// =============================================================================

#[test]
fn valid_login_round_trip() {
    let mut form = login_form();
    let request = post(&[("username", "alice"), ("submit", "1")]);

    assert!(form.submitted(&request, &tokens(), None));
    assert_eq!(form.state(), SubmissionState::Submitted);
    assert_eq!(form.model().field("username"), Some(&FieldValue::from("alice")));
    assert!(!form.model().field("remember").unwrap().as_bool());

    assert!(form.validate().unwrap());
    assert_eq!(form.state(), SubmissionState::Valid);
}

#[test]
fn invalid_token_is_never_a_submission() {
    let mut form = login_form();
    let request = FormRequest::post("/form")
        .body_param("_token", "forged")
        .body_param("submit", "1");

    assert!(!form.submitted(&request, &tokens(), None));
    assert_eq!(form.state(), SubmissionState::Unsubmitted);

    let missing = FormRequest::post("/form").body_param("submit", "1");
    assert!(!form.submitted(&missing, &tokens(), None));

    // A store that never issued a token accepts nothing.
    assert!(!form.submitted(&post(&[("submit", "1")]), &SessionTokens::new(), None));
}

#[test]
fn rejected_token_leaves_model_untouched() {
    let mut form = login_form();
    form.model_mut().set_field("username", "alice".into());
    let request = FormRequest::post("/form")
        .body_param("_token", "forged")
        .body_param("username", "mallory")
        .body_param("remember", "1")
        .body_param("submit", "1");

    assert!(!form.submitted(&request, &tokens(), None));
    assert_eq!(form.model().field("username"), Some(&FieldValue::from("alice")));
    assert_eq!(form.model().field("remember"), Some(&FieldValue::Null));
    assert_eq!(form.clicked_button(), None);
}

#[test]
fn no_button_means_no_submission() {
    let mut form = login_form();
    let request = post(&[("username", "alice")]);

    assert!(!form.submitted(&request, &tokens(), None));
    assert_eq!(form.model().field("username"), Some(&FieldValue::Null));
}

#[test]
fn any_declared_button_submits() {
    for button in ["update", "delete", "duplicate"] {
        let mut form = record_form();
        assert!(form.submitted(&post(&[(button, "x")]), &tokens(), None));
        assert_eq!(form.clicked_button(), Some(button));
    }
}

#[test]
fn named_button_must_be_present() {
    let mut form = record_form();
    let request = post(&[("update", "Update"), ("name", "Widget")]);
    assert!(!form.submitted(&request, &tokens(), Some("delete")));
    assert!(form.submitted(&request, &tokens(), Some("update")));

    let mut form = record_form();
    let both = post(&[("update", "Update"), ("delete", "Delete")]);
    assert!(form.submitted(&both, &tokens(), Some("delete")));
    assert_eq!(form.clicked_button(), Some("delete"));
}

#[test]
fn get_forms_read_the_query_string() {
    let definition = definition(
        r#"{"method": "get", "elements": {"q": {}}, "buttons": {"search": {}}}"#,
    );
    let model = DynamicModel::new().with_field(ModelField::new("q"));
    let mut form = Form::bind(definition, model).unwrap();

    let in_body = post(&[("q", "rust"), ("search", "1")]);
    assert!(!form.submitted(&in_body, &tokens(), None));

    let request = FormRequest::get("/search")
        .query_param("_token", TOKEN)
        .query_param("q", "rust")
        .query_param("search", "1");
    assert!(form.submitted(&request, &tokens(), None));
    assert_eq!(form.model().field("q"), Some(&FieldValue::from("rust")));
}

#[test]
fn only_declared_elements_are_copied() {
    let mut form = login_form();
    let request = post(&[("username", "alice"), ("is_admin", "1"), ("submit", "1")]);

    assert!(form.submitted(&request, &tokens(), None));
    assert!(!form.model().has_field("is_admin"));
    assert_eq!(form.model().field("is_admin"), None);
}

#[test]
fn multi_valued_elements_collect_every_value() {
    let definition = definition(
        r#"{
            "elements": {
                "tags": {"type": "checkboxlist", "items": {"a": "A", "b": "B", "c": "C"}}
            },
            "buttons": {"save": {}}
        }"#,
    );
    let model = DynamicModel::new().with_field(ModelField::new("tags"));
    let mut form = Form::bind(definition, model).unwrap();

    let request = post(&[("tags", "a"), ("tags", "c"), ("save", "1")]);
    assert!(form.submitted(&request, &tokens(), None));
    assert_eq!(
        form.model().field("tags"),
        Some(&FieldValue::List(vec!["a".to_string(), "c".to_string()]))
    );
}

#[test]
fn issued_token_round_trips_through_rendering() {
    let mut form = login_form();
    let mut store = SessionTokens::new();
    let theme = Theme::default();
    let html = RenderDispatcher::new(&form, &IdentityTranslator, &theme).render(&mut store, "/login");

    let token = store.expected().unwrap().to_string();
    assert!(html.contains(&token));

    let request = FormRequest::post("/login")
        .body_param(store.field_name(), token)
        .body_param("username", "bob")
        .body_param("submit", "Login");
    assert!(form.submitted(&request, &store, None));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn validate_before_submission_is_a_usage_error() {
    let mut form = login_form();
    assert!(matches!(form.validate(), Err(FormError::Usage(_))));
}

#[test]
fn validation_failures_are_reported_per_field() {
    let mut form = login_form();
    let request = post(&[("username", "a-name-far-beyond-sixteen"), ("submit", "1")]);
    assert!(form.submitted(&request, &tokens(), None));

    assert!(!form.validate().unwrap());
    assert_eq!(form.state(), SubmissionState::Invalid);
    assert!(form.model().errors().has("username"));
    assert!(!form.model().errors().has("remember"));
}

#[test]
fn summary_is_empty_exactly_when_valid() {
    let theme = Theme::default();
    for (username, valid) in [("alice", true), ("", false)] {
        let mut form = login_form();
        assert!(form.submitted(&post(&[("username", username), ("submit", "1")]), &tokens(), None));
        assert_eq!(form.validate().unwrap(), valid);

        let summary =
            RenderDispatcher::new(&form, &IdentityTranslator, &theme).render_error_summary(None, None);
        assert_eq!(summary.is_empty(), valid, "username {username:?}");
    }
}

#[test]
fn translated_messages_name_their_field() {
    let mut form = login_form();
    let request = post(&[("username", "a-name-far-beyond-sixteen"), ("submit", "1")]);
    assert!(form.submitted(&request, &tokens(), None));

    let catalog = MessageCatalog::new().message(
        "{attribute} should contain at most {max} characters.",
        "{attribute}: höchstens {max} Zeichen.",
    );
    assert!(!form.validate_with(&catalog).unwrap());
    assert_eq!(
        form.model().errors().get("username"),
        Some(&vec!["Username: höchstens 16 Zeichen.".to_string()])
    );
}

#[test]
fn resubmission_clears_previous_errors() {
    let mut form = login_form();
    assert!(form.submitted(&post(&[("username", ""), ("submit", "1")]), &tokens(), None));
    assert!(!form.validate().unwrap());

    assert!(form.submitted(&post(&[("username", "carol"), ("submit", "1")]), &tokens(), None));
    assert!(form.validate().unwrap());
    assert!(form.model().errors().is_empty());
}
