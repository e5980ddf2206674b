use super::help;
use super::options::{CliOptions, SigintCallback, SigintHandler};
use crate::args::{ArgsConfig, ParsedArgs, parse_args};
use crate::error::{ClirkError, Result};
use crate::exit::{self, Cause, Shutdown};
use crate::package::{self, PackageInfo};
use crate::ui;
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_USAGE_LABEL: &str = "USAGE";
const DEFAULT_PARAMETERS_LABEL: &str = "PARAMETERS";
const DEFAULT_OPTIONS_LABEL: &str = "OPTIONS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliParameter {
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    pub description: Vec<String>,
    pub aliases: IndexSet<String>,
    pub is_boolean: bool,
    pub is_string: bool,
}

/// Resolved runtime view of a CLI: parsed arguments, package metadata and
/// normalized help content.
#[derive(Clone)]
pub struct ClirkContext {
    pub args_options: ArgsConfig,
    pub args: ParsedArgs,
    pub title: String,
    pub name: String,
    pub icon: Option<String>,
    pub package: PackageInfo,
    /// Basename of the program path the CLI was invoked with
    pub command_name: String,
    pub description: Vec<String>,
    pub examples: Vec<String>,
    pub usage: Vec<String>,
    pub usage_label: String,
    pub parameters: IndexMap<String, CliParameter>,
    pub parameters_label: String,
    pub options: IndexMap<String, CliOption>,
    pub options_label: String,
    pub sigint_handler: Option<SigintCallback>,
    pub sigint_message: String,
}

impl fmt::Debug for ClirkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClirkContext")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("command_name", &self.command_name)
            .field("package", &self.package)
            .field("args", &self.args)
            .field("sigint_handler", &self.sigint_handler.is_some())
            .finish_non_exhaustive()
    }
}

impl ClirkContext {
    pub fn help_message(&self) -> String {
        help::generate_help_message(self)
    }

    pub fn version_message(&self) -> String {
        help::generate_version_message(self)
    }
}

/// Build the context for `options`: resolve the package, parse the arguments
/// and normalize every descriptive field.
pub fn create_context(options: &CliOptions, shutdown: &Shutdown) -> Result<ClirkContext> {
    if options.package_path.trim().is_empty() {
        return Err(ClirkError::MissingPackagePath);
    }

    let package = package::find_up_package(&options.package_path)?.ok_or_else(|| {
        ClirkError::PackageNotFound {
            path: PathBuf::from(&options.package_path),
        }
    })?;

    let argv = options
        .argv
        .clone()
        .unwrap_or_else(|| std::env::args().collect());
    let command_name = argv
        .first()
        .map(|arg0| exit::command_basename(arg0))
        .unwrap_or_else(|| options.name.clone());

    let args_options = options.args_options.clone().unwrap_or_default();
    let args = parse_args(argv.get(1..).unwrap_or_default(), &args_options);

    let description = match &options.description {
        Some(description) => description.lines(),
        None => package.description.iter().cloned().collect(),
    };
    let (sigint_handler, sigint_message) = resolve_sigint(options, shutdown);

    Ok(ClirkContext {
        parameters: parameters_map(options),
        options: options_map(options, &args_options),
        examples: examples(options),
        usage: options.usage.lines(),
        description,
        args_options,
        args,
        title: options.title.clone(),
        name: options.name.clone(),
        icon: options.icon.clone(),
        package,
        command_name,
        usage_label: label(&options.usage_label, DEFAULT_USAGE_LABEL),
        parameters_label: label(&options.parameters_label, DEFAULT_PARAMETERS_LABEL),
        options_label: label(&options.options_label, DEFAULT_OPTIONS_LABEL),
        sigint_handler,
        sigint_message,
    })
}

fn label(custom: &Option<String>, default: &str) -> String {
    custom.clone().unwrap_or_else(|| default.to_string())
}

fn examples(options: &CliOptions) -> Vec<String> {
    let examples = options.examples.lines();
    if examples.is_empty() {
        vec![options.name.clone()]
    } else {
        examples
    }
}

fn parameters_map(options: &CliOptions) -> IndexMap<String, CliParameter> {
    options
        .parameters
        .iter()
        .map(|(key, value)| {
            (
                key.clone(),
                CliParameter {
                    description: value.lines(),
                },
            )
        })
        .collect()
}

fn options_map(options: &CliOptions, args_options: &ArgsConfig) -> IndexMap<String, CliOption> {
    let string_flags = args_options.string.sequence().unwrap_or_default();

    options
        .options
        .iter()
        .map(|(key, value)| {
            let aliases = args_options
                .alias
                .get(key)
                .map(|aliases| aliases.lines().into_iter().collect())
                .unwrap_or_default();
            let option = CliOption {
                description: value.lines(),
                aliases,
                is_boolean: args_options.boolean.is_all() || args_options.boolean.contains(key),
                is_string: string_flags.contains(key),
            };
            (key.clone(), option)
        })
        .collect()
}

fn resolve_sigint(options: &CliOptions, shutdown: &Shutdown) -> (Option<SigintCallback>, String) {
    let message = options
        .sigint_message
        .clone()
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| ui::terminated("Received SIGINT"));

    let handler = match &options.sigint_handler {
        SigintHandler::Disabled => None,
        SigintHandler::Custom(handler) => Some(Arc::clone(handler)),
        SigintHandler::Default => {
            let shutdown = shutdown.clone();
            let message = message.clone();
            let handler: SigintCallback = Arc::new(move || default_sigint(&shutdown, &message));
            Some(handler)
        }
    };

    (handler, message)
}

fn default_sigint(shutdown: &Shutdown, message: &str) {
    println!("{}", message);
    shutdown.graceful_exit(Cause::None, Some(1))
}
