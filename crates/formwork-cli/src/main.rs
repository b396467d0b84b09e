//! formwork CLI
//!
//! Command-line tool for checking and rendering form definitions.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use formwork::{
    DynamicModel, Form, FormDefinition, FormModel, FormRequest, IdentityTranslator,
    MessageCatalog, Method, RenderDispatcher, SessionTokens, Theme, TokenStore, Translator,
};

/// Check and render declarative HTML forms.
#[derive(Parser)]
#[command(name = "formwork")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON message catalog used to translate labels and messages.
    #[arg(short, long, env = "FORMWORK_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a form definition and report configuration errors.
    Check {
        /// Form definition file.
        form: PathBuf,

        /// Model schema file; checks that every element names a field.
        #[arg(short, long)]
        model: Option<PathBuf>,
    },

    /// Render a form as HTML, optionally after simulating a submission.
    Render {
        /// Form definition file.
        form: PathBuf,

        /// Model schema file.
        #[arg(short, long)]
        model: PathBuf,

        /// Theme file; Bootstrap 5 defaults when absent.
        #[arg(short, long)]
        theme: Option<PathBuf>,

        /// Action URL used when the definition has none.
        #[arg(short, long, default_value = "/")]
        action: String,

        /// Submitted value as `name=value`; repeat for several.
        #[arg(short, long = "data", value_parser = parse_pair)]
        data: Vec<(String, String)>,

        /// Only count the submission when this button was clicked.
        #[arg(short, long)]
        button: Option<String>,
    },
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got `{s}`"))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Box<dyn Translator>> {
    match path {
        Some(path) => {
            let catalog: MessageCatalog = serde_json::from_str(&read(path)?)
                .with_context(|| format!("invalid message catalog {}", path.display()))?;
            info!(messages = catalog.len(), "loaded message catalog");
            Ok(Box::new(catalog))
        }
        None => Ok(Box::new(IdentityTranslator)),
    }
}

fn load_definition(path: &Path, translator: &dyn Translator) -> anyhow::Result<FormDefinition> {
    FormDefinition::from_json(&read(path)?, translator)
        .with_context(|| format!("invalid form definition {}", path.display()))
}

fn load_model(path: &Path) -> anyhow::Result<DynamicModel> {
    DynamicModel::from_json(&read(path)?)
        .with_context(|| format!("invalid model schema {}", path.display()))
}

/// Loads the definition, and binds it when a model is given. Returns a
/// one-line summary.
fn check(form: &Path, model: Option<&Path>, translator: &dyn Translator) -> anyhow::Result<String> {
    let definition = load_definition(form, translator)?;
    let summary = format!(
        "{}: {} element(s), {} button(s), method {}",
        form.display(),
        definition.elements().count(),
        definition.buttons().count(),
        definition.method()
    );

    if let Some(model) = model {
        Form::bind(definition, load_model(model)?)
            .with_context(|| format!("{} does not fit {}", form.display(), model.display()))?;
    }

    Ok(summary)
}

struct RenderOptions<'a> {
    theme: Option<&'a Path>,
    action: &'a str,
    data: &'a [(String, String)],
    button: Option<&'a str>,
}

/// Binds the form, replays `data` as a submission when given, and renders
/// the result.
fn render(
    form: &Path,
    model: &Path,
    options: &RenderOptions<'_>,
    translator: &dyn Translator,
) -> anyhow::Result<String> {
    let definition = load_definition(form, translator)?;
    let mut form = Form::bind(definition, load_model(model)?)?;
    let theme = match options.theme {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("invalid theme {}", path.display()))?,
        None => Theme::default(),
    };

    let mut tokens = SessionTokens::new();
    if !options.data.is_empty() {
        let token = tokens.issue();
        let method = form.definition().method();
        let request = simulated_request(method, options.action, &tokens, token, options.data);

        if form.submitted(&request, &tokens, options.button) {
            let valid = form.validate_with(translator)?;
            info!(
                button = form.clicked_button().unwrap_or_default(),
                valid,
                errors = form.model().errors().len(),
                "submission accepted"
            );
        } else {
            warn!(button = ?options.button, "submission not recognised; rendering unbound values");
        }
    }

    Ok(RenderDispatcher::new(&form, translator, &theme).render(&mut tokens, options.action))
}

/// Builds the request a browser would send for `data`.
fn simulated_request(
    method: Method,
    action: &str,
    tokens: &dyn TokenStore,
    token: String,
    data: &[(String, String)],
) -> FormRequest {
    let pairs = std::iter::once((tokens.field_name().to_string(), token))
        .chain(data.iter().cloned());
    match method {
        Method::Get => pairs.fold(FormRequest::get(action), |r, (k, v)| r.query_param(k, v)),
        Method::Post => pairs.fold(FormRequest::post(action), |r, (k, v)| r.body_param(k, v)),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let translator = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Check { form, model } => {
            let summary = check(&form, model.as_deref(), translator.as_ref())?;
            println!("{summary}");
        }

        Commands::Render {
            form,
            model,
            theme,
            action,
            data,
            button,
        } => {
            let options = RenderOptions {
                theme: theme.as_deref(),
                action: &action,
                data: &data,
                button: button.as_deref(),
            };
            println!("{}", render(&form, &model, &options, translator.as_ref())?);
        }
    }

    Ok(())
}
