//! simparams-core: typed parameters for simulation drivers.
//!
//! Reads a flat `name=value` source and serves schema-checked, typed values
//! through a define-then-read registry.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Params`] -- the registry: `define`, `get`, introspection
//! - [`DefineStatus`] -- result of a `define` call
//! - [`ParamError`] / [`ErrorKind`] -- error type and its categories
//! - [`ParamType`], [`ScalarKind`], [`Value`] -- type descriptors and values
//! - [`Param`] -- Rust types usable with `define::<T>` and `get::<T>`
//! - [`RawSource`], [`SourceOptions`], [`SourceProvider`] -- source loading
//!
//! ```
//! use simparams_core::Params;
//!
//! let mut params = Params::parse("steps=8589934593\nsizes=4,8\n").unwrap();
//! assert!(params.define::<i64>("steps", "number of sweeps").ok());
//! assert!(params.define::<Vec<i32>>("sizes", "lattice sizes").ok());
//! assert_eq!(params.get::<i64>("steps").unwrap(), 8589934593);
//! assert_eq!(params.get::<Vec<i32>>("sizes").unwrap(), vec![4, 8]);
//! ```

pub mod coerce;
pub mod error;
pub mod registry;
pub mod source;
pub mod token;
pub mod types;

// ── Convenience re-exports ───────────────────────────────────────────

pub use coerce::{coerce, coerce_scalar};
pub use error::{ErrorKind, ParamError};
pub use registry::{DefaultValue, DefineStatus, ParamSpec, Params};
pub use source::{
    load_source, parse_source, FileSystemProvider, InMemoryProvider, RawEntry, RawSource,
    SourceOptions, SourceProvider,
};
pub use types::{Param, ParamType, ScalarKind, ScalarParam, UnknownType, Value};
