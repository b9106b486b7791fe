//! Configuration factory for react-app style Babel transform pipelines.
//!
//! Given a build environment and a partial option set, the factory produces
//! a validated [`TransformConfig`]: the ordered presets, plugins, and
//! per-file-pattern overrides a downstream transform engine applies in
//! sequence. The factory transforms nothing itself and reads no ambient
//! state; the environment selector is an explicit parameter and package
//! resolution goes through an injected [`RuntimeLocator`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bpx_preset::{create, NodeModulesLocator, RawOptions};
//!
//! let options = RawOptions::new().with_typescript(false);
//! let locator = NodeModulesLocator::new("/path/to/project");
//!
//! let config = create("production", &options, &locator).unwrap();
//! println!("{}", config.to_json_pretty().unwrap());
//! ```

pub mod config;
pub mod error;
pub mod locator;
pub mod options;
pub mod preset;

pub use config::{Entry, EntryOptions, FilePattern, OverrideEntry, TransformConfig};
pub use error::{PresetError, Result};
pub use locator::{NodeModulesLocator, RuntimeLocator};
pub use options::{Environment, ModuleFormat, Options, RawOptions};
pub use preset::{create, RUNTIME_PACKAGE};
