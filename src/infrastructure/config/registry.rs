//! Layered key/value store behind the resolver.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::parser::ValueSource;
use clap::ArgMatches;
use figment::providers::{Format, Json, Toml, Yaml};
use figment::value::{Dict, Tag, Value};
use figment::Figment;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::error::{ConfigError, ConfigFileError};

/// Layer a resolved value came from, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// A command-line flag the user supplied explicitly
    Flag,
    /// A bound, non-empty environment variable, matched by exact name
    Env,
    /// The loaded configuration file
    File,
    /// A programmatic default registered with [`Registry::set_default`]
    Default,
    /// The default of a bound flag the user did not supply
    FlagDefault,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flag => "flag",
            Self::Env => "env",
            Self::File => "file",
            Self::Default => "default",
            Self::FlagDefault => "flag default",
        };
        f.write_str(name)
    }
}

/// Parsed value of a command-line flag and whether the user set it.
#[derive(Debug, Clone, Default)]
pub struct FlagValue {
    value: Option<Value>,
    changed: bool,
}

impl FlagValue {
    /// A flag the user supplied on the command line
    pub fn explicit(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            changed: true,
        }
    }

    /// A flag left at its declared default
    pub fn unchanged(default: impl Into<Value>) -> Self {
        Self {
            value: Some(default.into()),
            changed: false,
        }
    }

    /// Capture flag `id` from clap matches.
    ///
    /// The flag only counts as explicit when clap saw it on the command line;
    /// a declared default is kept as the lowest-precedence fallback. An id
    /// that is unknown or of a different type yields an empty, unchanged flag.
    pub fn from_matches<T>(matches: &ArgMatches, id: &str) -> Self
    where
        T: Clone + Send + Sync + Into<Value> + 'static,
    {
        // `value_source` panics on ids clap does not know, so only ask once
        // the lookup has proven the id is declared with this type.
        let Ok(value) = matches.try_get_one::<T>(id) else {
            return Self::default();
        };
        let value = value.cloned().map(Into::into);
        let changed = matches!(matches.value_source(id), Some(ValueSource::CommandLine));

        Self { value, changed }
    }

    /// Whether the user supplied the flag
    pub const fn is_changed(&self) -> bool {
        self.changed
    }
}

/// Layered key/value configuration store.
///
/// Keys are dotted, case-insensitive paths such as `server.port`. Every
/// lookup walks the layers top-down and returns the first present value
/// whole:
///
/// 1. explicit flag
/// 2. non-empty environment variable
/// 3. configuration file
/// 4. programmatic default
/// 5. default of an unchanged flag
///
/// Values are never merged across layers. The registry is filled once at
/// startup and only read afterwards, so it can be shared across threads
/// without locking.
#[derive(Debug, Default)]
pub struct Registry {
    flags: BTreeMap<String, FlagValue>,
    env: BTreeMap<String, String>,
    defaults: BTreeMap<String, Value>,
    file: Option<Value>,
    config_file: Option<PathBuf>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to a command-line flag
    pub fn bind_flag(&mut self, key: &str, flag: FlagValue) {
        debug!(key, changed = flag.changed, "bound flag");
        self.flags.insert(normalize(key), flag);
    }

    /// Bind `key` to the environment variable `variable`
    pub fn bind_env(&mut self, key: &str, variable: impl Into<String>) {
        let variable = variable.into();
        debug!(key, %variable, "bound environment variable");
        self.env.insert(normalize(key), variable);
    }

    /// Register a fallback for `key` that ranks below the configuration file
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        self.defaults.insert(normalize(key), value.into());
    }

    /// Load the configuration document at `path` into the file layer.
    ///
    /// The format follows the extension (`yaml`, `yml`, `json`, `toml`).
    /// An empty path is a no-op.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        let document = read_document(path).map_err(|source| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            keys = document.len(),
            "loaded configuration file"
        );

        self.file = Some(lowercase_keys(Value::Dict(Tag::Default, document)));
        self.config_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Path of the loaded configuration file, if any
    pub fn config_file_used(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Resolved value of `key` as a string, `""` when unset.
    ///
    /// Numbers, booleans and characters are rendered as text; lists and maps
    /// resolve to `""`.
    pub fn get_string(&self, key: &str) -> String {
        self.lookup(key)
            .map(|(_, value)| value_to_string(&value))
            .unwrap_or_default()
    }

    /// Resolved value of `key` as an integer, `0` when unset or unparsable
    pub fn get_int(&self, key: &str) -> i64 {
        self.lookup(key)
            .map(|(_, value)| value_to_int(&value))
            .unwrap_or_default()
    }

    /// Structurally decode the resolved value of `key` into `T`.
    ///
    /// An unset key decodes to `T::default()`.
    pub fn decode<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        let Some((_, value)) = self.lookup(key) else {
            return Ok(T::default());
        };

        value.deserialize::<T>().map_err(|err| ConfigError::Decode {
            key: key.to_string(),
            source: Box::new(err),
        })
    }

    /// Whether any layer supplies `key`
    pub fn is_set(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Layer the resolved value of `key` comes from
    pub fn source(&self, key: &str) -> Option<Source> {
        self.lookup(key).map(|(source, _)| source)
    }

    fn lookup(&self, key: &str) -> Option<(Source, Value)> {
        let normalized = normalize(key);
        let resolved = self.resolve(&normalized);

        match &resolved {
            Some((source, _)) => debug!(key, ?source, "resolved configuration key"),
            None => debug!(key, "configuration key not set"),
        }

        resolved
    }

    fn resolve(&self, key: &str) -> Option<(Source, Value)> {
        let flag = self.flags.get(key);

        if let Some(value) = flag.filter(|f| f.changed).and_then(|f| f.value.clone()) {
            return Some((Source::Flag, value));
        }

        if let Some(value) = self
            .env
            .get(key)
            .and_then(|variable| std::env::var(variable).ok())
            .filter(|value| !value.is_empty())
        {
            return Some((Source::Env, Value::from(value)));
        }

        if let Some(value) = self
            .file
            .as_ref()
            .and_then(|file| file.find_ref(key))
            .filter(|value| !matches!(value, Value::Empty(..)))
        {
            return Some((Source::File, value.clone()));
        }

        if let Some(value) = self.defaults.get(key) {
            return Some((Source::Default, value.clone()));
        }

        flag.and_then(|f| f.value.clone())
            .map(|value| (Source::FlagDefault, value))
    }
}

fn normalize(key: &str) -> String {
    key.to_lowercase()
}

#[derive(Debug, Clone, Copy)]
enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

fn read_document(path: &Path) -> Result<Dict, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .unwrap_or_default()
        .to_lowercase();
    let format = FileFormat::from_extension(&extension)
        .ok_or(ConfigFileError::UnsupportedFormat(extension))?;

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Dict::new());
    }

    let figment = match format {
        FileFormat::Yaml => Figment::from(Yaml::string(&contents)),
        FileFormat::Json => Figment::from(Json::string(&contents)),
        FileFormat::Toml => Figment::from(Toml::string(&contents)),
    };

    Ok(figment.extract::<Dict>()?)
}

/// Lower-case every map key, including maps nested in lists.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Dict(tag, dict) => Value::Dict(
            tag,
            dict.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(tag, items) => {
            Value::Array(tag, items.into_iter().map(lowercase_keys).collect())
        }
        other => other,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(_, s) => s.clone(),
        Value::Char(_, c) => c.to_string(),
        Value::Bool(_, b) => b.to_string(),
        Value::Num(..) => value
            .deserialize::<i64>()
            .map(|n| n.to_string())
            .or_else(|_| value.deserialize::<u64>().map(|n| n.to_string()))
            .or_else(|_| value.deserialize::<f64>().map(|n| n.to_string()))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn value_to_int(value: &Value) -> i64 {
    match value {
        Value::String(_, s) => s.trim().parse().unwrap_or_default(),
        Value::Bool(_, b) => i64::from(*b),
        Value::Num(..) => value
            .deserialize::<i64>()
            .or_else(|_| value.deserialize::<f64>().map(|n| n as i64))
            .unwrap_or_default(),
        _ => 0,
    }
}
