use crate::args::ArgsConfig;
use crate::error::{ClirkError, Result};
use crate::utils::text_input::TextInput;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub type SigintCallback = Arc<dyn Fn() + Send + Sync>;

/// What happens on Ctrl+C.
#[derive(Clone, Default)]
pub enum SigintHandler {
    /// Print the SIGINT message and exit gracefully with code 1
    #[default]
    Default,
    /// Leave SIGINT alone
    Disabled,
    Custom(SigintCallback),
}

impl fmt::Debug for SigintHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigintHandler::Default => f.write_str("Default"),
            SigintHandler::Disabled => f.write_str("Disabled"),
            SigintHandler::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Definition files can only say `sigintHandler: false`.
impl<'de> Deserialize<'de> for SigintHandler {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match bool::deserialize(deserializer)? {
            true => SigintHandler::Default,
            false => SigintHandler::Disabled,
        })
    }
}

/// Everything a CLI declares about itself.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliOptions {
    /// Any path inside the CLI's package (or a `file://` URL); the package
    /// manifest is searched upwards from here.
    pub package_path: String,
    pub args_options: Option<ArgsConfig>,
    /// Printable title
    pub title: String,
    /// Command name
    pub name: String,
    pub icon: Option<String>,
    /// Defaults to the package description when absent.
    pub description: Option<TextInput>,
    /// Defaults to the command name.
    pub examples: TextInput,
    pub usage: TextInput,
    pub usage_label: Option<String>,
    pub parameters: IndexMap<String, TextInput>,
    pub parameters_label: Option<String>,
    pub options: IndexMap<String, TextInput>,
    pub options_label: Option<String>,
    pub sigint_handler: SigintHandler,
    pub sigint_message: Option<String>,
    /// Full argument vector including the program path. Defaults to the
    /// process arguments.
    #[serde(skip)]
    pub argv: Option<Vec<String>>,
}

impl CliOptions {
    pub fn new(
        package_path: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            package_path: package_path.into(),
            name: name.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<TextInput>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn examples(mut self, examples: impl Into<TextInput>) -> Self {
        self.examples = examples.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<TextInput>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, description: impl Into<TextInput>) -> Self {
        self.parameters.insert(name.into(), description.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, description: impl Into<TextInput>) -> Self {
        self.options.insert(name.into(), description.into());
        self
    }

    pub fn args(mut self, args_options: ArgsConfig) -> Self {
        self.args_options = Some(args_options);
        self
    }

    pub fn on_sigint<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.sigint_handler = SigintHandler::Custom(Arc::new(handler));
        self
    }

    pub fn disable_sigint(mut self) -> Self {
        self.sigint_handler = SigintHandler::Disabled;
        self
    }

    pub fn sigint_message(mut self, message: impl Into<String>) -> Self {
        self.sigint_message = Some(message.into());
        self
    }

    pub fn argv<I, S>(mut self, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv = Some(argv.into_iter().map(Into::into).collect());
        self
    }

    /// Load a CLI definition from a JSON, YAML or TOML file, chosen by
    /// extension. Relative `packagePath` values resolve against the file's
    /// directory; an empty one means the file's directory itself.
    pub fn from_path(path: &Path) -> Result<Self> {
        let definition_error = |message: String| ClirkError::Definition {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| definition_error(e.to_string()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("json")
            .to_ascii_lowercase();

        let mut options: CliOptions = match extension.as_str() {
            "yaml" | "yml" => {
                serde_yml::from_str(&content).map_err(|e| definition_error(e.to_string()))?
            }
            "toml" => toml::from_str(&content).map_err(|e| definition_error(e.to_string()))?,
            _ => serde_json::from_str(&content).map_err(|e| definition_error(e.to_string()))?,
        };

        let base = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if !options.package_path.starts_with("file://")
            && Path::new(&options.package_path).is_relative()
        {
            options.package_path = base
                .join(&options.package_path)
                .to_string_lossy()
                .into_owned();
        }

        Ok(options)
    }
}
