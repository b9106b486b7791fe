use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{PresetError, Result};

/// Build environment selecting which conditional branches of the
/// configuration activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "development" => Some(Environment::Development),
            "production" => Some(Environment::Production),
            "test" => Some(Environment::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Module wrapping format handed to the language-feature preset.
///
/// `Disabled` keeps import/export statements untouched and serializes as
/// JSON `false`, which is the form the transform engine expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleFormat {
    Amd,
    Umd,
    Systemjs,
    Commonjs,
    Cjs,
    Auto,
    Disabled,
}

impl Default for ModuleFormat {
    fn default() -> Self {
        ModuleFormat::Disabled
    }
}

impl ModuleFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "amd" => Some(ModuleFormat::Amd),
            "umd" => Some(ModuleFormat::Umd),
            "systemjs" => Some(ModuleFormat::Systemjs),
            "commonjs" => Some(ModuleFormat::Commonjs),
            "cjs" => Some(ModuleFormat::Cjs),
            "auto" => Some(ModuleFormat::Auto),
            "disabled" => Some(ModuleFormat::Disabled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Amd => "amd",
            ModuleFormat::Umd => "umd",
            ModuleFormat::Systemjs => "systemjs",
            ModuleFormat::Commonjs => "commonjs",
            ModuleFormat::Cjs => "cjs",
            ModuleFormat::Auto => "auto",
            ModuleFormat::Disabled => "disabled",
        }
    }

    /// Parse the raw JSON form of the `modules` option. JSON `false` is the
    /// wire-format alias for `disabled`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(false) => Ok(ModuleFormat::Disabled),
            Value::String(s) => ModuleFormat::from_str(s).ok_or_else(|| PresetError::InvalidModules {
                received: s.clone(),
            }),
            other => Err(PresetError::InvalidModules {
                received: other.to_string(),
            }),
        }
    }
}

impl Serialize for ModuleFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ModuleFormat::Disabled => serializer.serialize_bool(false),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

/// Caller-supplied partial options.
///
/// Fields are kept as raw JSON values so validation can report the exact
/// offending field instead of a generic deserialization error. Unset fields
/// fall back to their documented defaults during [`Options::resolve`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    pub modules: Option<Value>,

    #[serde(rename = "useESModules")]
    pub use_es_modules: Option<Value>,

    #[serde(rename = "absoluteRuntime")]
    pub absolute_runtime: Option<Value>,

    pub typescript: Option<Value>,

    pub helpers: Option<Value>,

    pub flow: Option<Value>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document (the shape callers put in their
    /// preset options block).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_modules(mut self, modules: ModuleFormat) -> Self {
        self.modules = Some(match modules {
            ModuleFormat::Disabled => Value::Bool(false),
            other => Value::String(other.as_str().to_string()),
        });
        self
    }

    pub fn with_use_es_modules(mut self, value: bool) -> Self {
        self.use_es_modules = Some(Value::Bool(value));
        self
    }

    pub fn with_absolute_runtime(mut self, value: bool) -> Self {
        self.absolute_runtime = Some(Value::Bool(value));
        self
    }

    pub fn with_typescript(mut self, value: bool) -> Self {
        self.typescript = Some(Value::Bool(value));
        self
    }

    pub fn with_helpers(mut self, value: bool) -> Self {
        self.helpers = Some(Value::Bool(value));
        self
    }

    pub fn with_flow(mut self, value: bool) -> Self {
        self.flow = Some(Value::Bool(value));
        self
    }
}

/// Fully resolved option set after defaulting and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub modules: ModuleFormat,
    pub use_es_modules: bool,
    pub absolute_runtime: bool,
    pub typescript: bool,
    pub helpers: bool,
    pub flow: bool,
}

impl Options {
    /// Merge raw options over the defaults and validate field types.
    ///
    /// The `useESModules` default depends on the environment (true for
    /// development and production, false for test), so resolution takes the
    /// already-parsed environment. `None` stands for an unrecognized
    /// environment: options are still validated first so a bad option is
    /// reported before the environment error.
    pub fn resolve(environment: Option<Environment>, raw: &RawOptions) -> Result<Self> {
        let default_es_modules = matches!(
            environment,
            Some(Environment::Development) | Some(Environment::Production)
        );

        let modules = match &raw.modules {
            Some(value) => ModuleFormat::from_value(value)?,
            None => ModuleFormat::default(),
        };

        Ok(Options {
            modules,
            use_es_modules: resolve_bool(&raw.use_es_modules, "useESModules", default_es_modules)?,
            absolute_runtime: resolve_bool(&raw.absolute_runtime, "absoluteRuntime", true)?,
            typescript: resolve_bool(&raw.typescript, "typescript", true)?,
            helpers: resolve_bool(&raw.helpers, "helpers", true)?,
            flow: resolve_bool(&raw.flow, "flow", true)?,
        })
    }
}

fn resolve_bool(value: &Option<Value>, name: &'static str, default: bool) -> Result<bool> {
    match value {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(PresetError::NonBooleanOption { name }),
    }
}
