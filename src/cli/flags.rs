//! Built-in `--help` / `--version` flags.

use super::options::CliOptions;
use crate::args::{ArgsConfig, BooleanFlags};
use crate::utils::text_input::TextInput;

const HELP: &str = "help";
const VERSION: &str = "version";

/// Which built-in flags to inject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinFlags {
    pub help: bool,
    pub version: bool,
}

impl BuiltinFlags {
    pub fn all() -> Self {
        Self {
            help: true,
            version: true,
        }
    }

    fn requested(self) -> impl Iterator<Item = (&'static str, &'static str)> {
        [
            (self.help, HELP, "Display this help message."),
            (self.version, VERSION, "Display the package name and version."),
        ]
        .into_iter()
        .filter(|(wanted, _, _)| *wanted)
        .map(|(_, flag, description)| (flag, description))
    }
}

/// A flag counts as defined when it is a named boolean or has an alias entry.
pub fn is_flag_defined(config: Option<&ArgsConfig>, flag: &str) -> bool {
    config.is_some_and(|config| config.boolean.contains(flag) || config.alias.contains_key(flag))
}

/// Copy of `options` with the requested built-in flags declared: boolean,
/// single letter alias and a default description unless one exists.
pub fn add_flags_to_options(options: &CliOptions, flags: BuiltinFlags) -> CliOptions {
    let mut result = options.clone();
    let mut args = result.args_options.take().unwrap_or_default();

    let mut booleans: Option<Vec<String>> = match &args.boolean {
        BooleanFlags::All(true) => None,
        other => {
            let mut names: Vec<String> = Vec::new();
            for name in other.names() {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            Some(names)
        }
    };

    for (flag, description) in flags.requested() {
        if let Some(names) = booleans.as_mut()
            && !names.iter().any(|name| name == flag)
        {
            names.push(flag.to_string());
        }
        let short: String = flag.chars().take(1).collect();
        args.alias.insert(flag.to_string(), TextInput::from(vec![short]));
        result
            .options
            .entry(flag.to_string())
            .or_insert_with(|| TextInput::from(description));
    }

    if let Some(names) = booleans {
        args.boolean = BooleanFlags::Named(names);
    }
    result.args_options = Some(args);
    result
}
