//! Command line argument parsing with minimist semantics.
//!
//! Flags are not declared up front: any `--key` is accepted. The
//! [`ArgsConfig`] only tells the parser which flags are booleans (never take a
//! value), which are strings (default to `""` instead of `true`) and which
//! names are aliases of each other.

use crate::utils::text_input::TextInput;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Boolean flag declaration: either a list of names or `true` for "every
/// `--flag` without `=value` is a boolean".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BooleanFlags {
    All(bool),
    Named(Vec<String>),
}

impl Default for BooleanFlags {
    fn default() -> Self {
        BooleanFlags::Named(Vec::new())
    }
}

impl BooleanFlags {
    pub fn is_all(&self) -> bool {
        matches!(self, BooleanFlags::All(true))
    }

    /// Explicitly named flags; empty for `true`/`false`.
    pub fn names(&self) -> &[String] {
        match self {
            BooleanFlags::Named(names) => names,
            BooleanFlags::All(_) => &[],
        }
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.names().iter().any(|name| name == flag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgsConfig {
    pub boolean: BooleanFlags,
    pub string: TextInput,
    pub alias: IndexMap<String, TextInput>,
}

impl ArgsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn booleans<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all: Vec<String> = self.boolean.names().to_vec();
        all.extend(names.into_iter().map(Into::into));
        self.boolean = BooleanFlags::Named(all);
        self
    }

    pub fn all_booleans(mut self) -> Self {
        self.boolean = BooleanFlags::All(true);
        self
    }

    pub fn strings<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = self.string.lines();
        all.extend(names.into_iter().map(Into::into));
        self.string = all.into();
        self
    }

    pub fn alias(mut self, key: impl Into<String>, aliases: impl Into<TextInput>) -> Self {
        self.alias.insert(key.into(), aliases.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Str(String),
    /// A flag given more than once
    List(Vec<ArgValue>),
}

impl ArgValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            ArgValue::Bool(b) => *b,
            ArgValue::Str(s) => !s.is_empty(),
            ArgValue::List(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    /// Non-flag arguments, in order
    pub positional: Vec<String>,
    pub flags: BTreeMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn get(&self, flag: &str) -> Option<&ArgValue> {
        self.flags.get(flag)
    }

    /// Present and truthy.
    pub fn is_set(&self, flag: &str) -> bool {
        self.get(flag).is_some_and(ArgValue::is_truthy)
    }

    /// Last string value given for `flag`.
    pub fn value(&self, flag: &str) -> Option<&str> {
        match self.get(flag)? {
            ArgValue::List(values) => values.iter().rev().find_map(ArgValue::as_str),
            other => other.as_str(),
        }
    }
}

/// Serialized like minimist output: `{"_": [...], "flag": value, ...}`.
impl Serialize for ParsedArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.flags.len() + 1))?;
        map.serialize_entry("_", &self.positional)?;
        for (key, value) in &self.flags {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct FlagTable {
    bools: HashSet<String>,
    all_bools: bool,
    strings: HashSet<String>,
    aliases: HashMap<String, Vec<String>>,
}

impl FlagTable {
    fn new(config: &ArgsConfig) -> Self {
        let mut aliases: HashMap<String, Vec<String>> = HashMap::new();
        for (key, names) in &config.alias {
            let names = names.lines();
            aliases.insert(key.clone(), names.clone());
            for name in &names {
                let mut group = vec![key.clone()];
                group.extend(names.iter().filter(|n| *n != name).cloned());
                aliases.insert(name.clone(), group);
            }
        }

        let mut bools: HashSet<String> = config.boolean.names().iter().cloned().collect();
        let mut strings: HashSet<String> = config.string.lines().into_iter().collect();
        for set in [&mut bools, &mut strings] {
            let extra: Vec<String> = set
                .iter()
                .filter_map(|key| aliases.get(key))
                .flatten()
                .cloned()
                .collect();
            set.extend(extra);
        }

        Self {
            bools,
            all_bools: config.boolean.is_all(),
            strings,
            aliases,
        }
    }

    fn is_bool(&self, key: &str) -> bool {
        self.bools.contains(key)
    }

    fn empty_value(&self, key: &str) -> ArgValue {
        if self.strings.contains(key) {
            ArgValue::Str(String::new())
        } else {
            ArgValue::Bool(true)
        }
    }

    fn coerce(&self, key: &str, value: &str) -> ArgValue {
        if self.is_bool(key) {
            ArgValue::Bool(value != "false")
        } else {
            ArgValue::Str(value.to_string())
        }
    }
}

struct Parser<'a> {
    table: FlagTable,
    args: &'a [String],
    parsed: ParsedArgs,
}

impl<'a> Parser<'a> {
    fn set(&mut self, key: &str, value: ArgValue) {
        let names: Vec<String> = std::iter::once(key.to_string())
            .chain(self.table.aliases.get(key).into_iter().flatten().cloned())
            .collect();
        for name in names {
            // Booleans are overwritten, everything else accumulates.
            let accumulate = !self.table.is_bool(&name)
                && self
                    .parsed
                    .flags
                    .get(&name)
                    .is_some_and(|existing| !matches!(existing, ArgValue::Bool(_)));

            if !accumulate {
                self.parsed.flags.insert(name, value.clone());
                continue;
            }
            match self.parsed.flags.get_mut(&name) {
                Some(ArgValue::List(values)) => values.push(value.clone()),
                Some(existing) => {
                    let previous = existing.clone();
                    *existing = ArgValue::List(vec![previous, value.clone()]);
                }
                None => {}
            }
        }
    }

    /// Value for a flag that may consume the following argument. Returns how
    /// many extra arguments were consumed.
    fn set_with_next(&mut self, key: &str, next: Option<&str>) -> usize {
        match next {
            Some(next)
                if !is_flag_like(next)
                    && !self.table.is_bool(key)
                    && !self.table.all_bools =>
            {
                self.set(key, ArgValue::Str(next.to_string()));
                1
            }
            Some(next @ ("true" | "false")) => {
                self.set(key, ArgValue::Bool(next == "true"));
                1
            }
            _ => {
                let value = self.table.empty_value(key);
                self.set(key, value);
                0
            }
        }
    }

    fn short_flags(&mut self, arg: &str, next: Option<&str>) -> usize {
        let letters: Vec<char> = arg[1..].chars().collect();
        let mut offset = 1;

        for (j, letter) in letters.iter().enumerate().take(letters.len().saturating_sub(1)) {
            let key = letter.to_string();
            offset += letter.len_utf8();
            let rest = &arg[offset..];

            if rest == "-" {
                self.set(&key, ArgValue::Str(rest.to_string()));
                continue;
            }
            if letter.is_ascii_alphabetic() {
                if let Some(value) = rest.strip_prefix('=') {
                    let value = self.table.coerce(&key, value);
                    self.set(&key, value);
                    return 0;
                }
                if is_number(rest) {
                    self.set(&key, ArgValue::Str(rest.to_string()));
                    return 0;
                }
            }
            if !is_word_char(letters[j + 1]) {
                self.set(&key, ArgValue::Str(rest.to_string()));
                return 0;
            }
            let value = self.table.empty_value(&key);
            self.set(&key, value);
        }

        match letters.last() {
            Some('-') | None => 0,
            Some(last) => self.set_with_next(&last.to_string(), next),
        }
    }

    fn run(mut self) -> ParsedArgs {
        let defaults: Vec<String> = self.table.bools.iter().cloned().collect();
        for key in defaults {
            self.parsed.flags.insert(key, ArgValue::Bool(false));
        }

        let args = self.args;
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let next = args.get(i + 1).map(String::as_str);

            if let Some(long) = arg.strip_prefix("--") {
                if let Some((key, value)) = long.split_once('=') {
                    let value = self.table.coerce(key, value);
                    self.set(key, value);
                } else if let Some(key) = long.strip_prefix("no-") {
                    self.set(key, ArgValue::Bool(false));
                } else {
                    i += self.set_with_next(long, next);
                }
            } else if arg.len() > 1 && arg.starts_with('-') {
                i += self.short_flags(arg, next);
            } else {
                self.parsed.positional.push(arg.to_string());
            }

            i += 1;
        }

        self.parsed
    }
}

/// `-x`, `--x` and friends, but not a lone `-` (stdin) or a negative number.
fn is_flag_like(arg: &str) -> bool {
    let rest = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'));
    match rest {
        Some(rest) => !rest.is_empty() && !rest.starts_with('-') && !is_number(arg),
        None => false,
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok_and(f64::is_finite)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse `args` (program name excluded) against `config`.
pub fn parse_args(args: &[String], config: &ArgsConfig) -> ParsedArgs {
    let (flag_args, rest) = match args.iter().position(|arg| arg == "--") {
        Some(index) => (&args[..index], &args[index + 1..]),
        None => (args, &[][..]),
    };

    let mut parsed = Parser {
        table: FlagTable::new(config),
        args: flag_args,
        parsed: ParsedArgs::default(),
    }
    .run();
    parsed.positional.extend(rest.iter().cloned());
    parsed
}
