//! The configuration factory.
//!
//! `create` turns an environment selector and a partial option set into a
//! complete [`TransformConfig`]. It never mutates its inputs and owns no
//! state across calls; the only side effect is the runtime package lookup
//! when `absoluteRuntime` is enabled.

use std::path::Path;

use serde_json::{json, Value};

use crate::config::{Entry, FilePattern, OverrideEntry, TransformConfig};
use crate::error::{PresetError, Result};
use crate::locator::RuntimeLocator;
use crate::options::{Environment, Options, RawOptions};

/// Support package resolved when `absoluteRuntime` is enabled.
pub const RUNTIME_PACKAGE: &str = "@babel/runtime";

// Preset references
const PRESET_ENV: &str = "@babel/preset-env";
const PRESET_REACT: &str = "@babel/preset-react";
const PRESET_TYPESCRIPT: &str = "@babel/preset-typescript";

// Plugin references
const FLOW_STRIP_TYPES: &str = "@babel/plugin-transform-flow-strip-types";
const MACROS: &str = "babel-plugin-macros";
const DESTRUCTURING: &str = "@babel/plugin-transform-destructuring";
const DECORATORS: &str = "@babel/plugin-proposal-decorators";
const CLASS_PROPERTIES: &str = "@babel/plugin-proposal-class-properties";
const OBJECT_REST_SPREAD: &str = "@babel/plugin-proposal-object-rest-spread";
const TRANSFORM_RUNTIME: &str = "@babel/plugin-transform-runtime";
const REMOVE_PROP_TYPES: &str = "babel-plugin-transform-react-remove-prop-types";
const SYNTAX_DYNAMIC_IMPORT: &str = "@babel/plugin-syntax-dynamic-import";
const DYNAMIC_IMPORT_NODE: &str = "babel-plugin-dynamic-import-node";

/// Build a validated transform configuration for the given environment.
///
/// Fails with a [`PresetError`] naming the violated option, the unrecognized
/// environment, or the unresolvable runtime package; no partial
/// configuration is ever returned.
pub fn create(
    environment: &str,
    raw: &RawOptions,
    locator: &dyn RuntimeLocator,
) -> Result<TransformConfig> {
    let env = Environment::from_str(environment);

    // Options are validated before the environment so a bad option is
    // reported even when the environment is also wrong.
    let opts = Options::resolve(env, raw)?;

    let env = env.ok_or_else(|| PresetError::UnknownEnvironment {
        received: environment.to_string(),
    })?;

    let is_development = env == Environment::Development;
    let is_production = env == Environment::Production;
    let is_test = env == Environment::Test;

    let absolute_runtime_path = if opts.absolute_runtime {
        Some(locator.locate(RUNTIME_PACKAGE)?)
    } else {
        None
    };

    let presets = [
        // ES features for the version of Node running the tests.
        is_test.then(|| {
            Entry::with_options(
                PRESET_ENV,
                json!({
                    "targets": { "node": "current" },
                }),
            )
        }),
        // Fixed legacy baseline; the caller's browserslist config is
        // ignored because the output is tuned for ES5 support.
        (is_development || is_production).then(|| {
            Entry::with_options(
                PRESET_ENV,
                json!({
                    "targets": { "ie": 9 },
                    "ignoreBrowserslistConfig": true,
                    "useBuiltIns": false,
                    "modules": opts.modules,
                    // transform-typeof-symbol slows all code paths.
                    "exclude": ["transform-typeof-symbol"],
                }),
            )
        }),
        Some(Entry::with_options(
            PRESET_REACT,
            json!({
                "development": is_development || is_test,
                "useBuiltIns": true,
            }),
        )),
        opts.typescript.then(|| Entry::bare(PRESET_TYPESCRIPT)),
    ];

    let plugins = [
        // Registered disabled to pin its position; the flow override below
        // enables it for everything except typed sources, where it clashes
        // with the decorator transform.
        opts.flow.then(|| Entry::disabled(FLOW_STRIP_TYPES)),
        Some(Entry::bare(MACROS)),
        // Later transforms assume destructuring has already run.
        Some(Entry::bare(DESTRUCTURING)),
        // Same pattern as flow-strip-types: position pinned here, enabled
        // per typed file via an override.
        opts.typescript.then(|| Entry::disabled(DECORATORS)),
        // Loose mode: assignment semantics instead of defineProperty.
        Some(Entry::with_options(CLASS_PROPERTIES, json!({ "loose": true }))),
        // Relies on the native Object.assign built-in.
        Some(Entry::with_options(OBJECT_REST_SPREAD, json!({ "useBuiltIns": true }))),
        Some(Entry::with_options(
            TRANSFORM_RUNTIME,
            runtime_options(&opts, absolute_runtime_path.as_deref()),
        )),
        is_production.then(|| {
            Entry::with_options(REMOVE_PROP_TYPES, json!({ "removeImport": true }))
        }),
        Some(Entry::bare(SYNTAX_DYNAMIC_IMPORT)),
        // The test runner has no lazy module loading; import() becomes a
        // synchronous load.
        is_test.then(|| Entry::bare(DYNAMIC_IMPORT_NODE)),
    ];

    let overrides = [
        opts.flow.then(|| OverrideEntry {
            test: None,
            exclude: Some(FilePattern::typed_sources()),
            plugins: vec![Entry::bare(FLOW_STRIP_TYPES)],
        }),
        // The only place decorators are actually enabled.
        opts.typescript.then(|| OverrideEntry {
            test: Some(FilePattern::typed_sources()),
            exclude: None,
            plugins: vec![Entry::with_options(DECORATORS, json!({ "legacy": true }))],
        }),
    ];

    Ok(TransformConfig {
        presets: presets.into_iter().flatten().collect(),
        plugins: plugins.into_iter().flatten().collect(),
        overrides: overrides.into_iter().flatten().collect(),
    })
}

fn runtime_options(opts: &Options, absolute_runtime: Option<&Path>) -> Value {
    let mut options = json!({
        "corejs": false,
        "helpers": opts.helpers,
        "regenerator": true,
        "useESModules": opts.use_es_modules,
    });

    // The key is only present when the path was resolved; there is no
    // default path to fall back to.
    if let Some(path) = absolute_runtime {
        options["absoluteRuntime"] = Value::String(path.display().to_string());
    }

    options
}
