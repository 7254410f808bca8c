//! The parameter registry.
//!
//! [`Params`] owns the raw source and the set of parameter definitions. A
//! name must be defined before it can be read; the declared type decides how
//! the raw text is coerced. Reads recompute the value from the raw text each
//! time, so they never observe partial state and `&Params` can be shared
//! freely once the define phase is over.

use std::collections::BTreeMap;
use std::path::Path;

use crate::coerce::coerce;
use crate::error::ParamError;
use crate::source::{
    load_source, parse_source, FileSystemProvider, RawSource, SourceOptions, SourceProvider,
};
use crate::types::{Param, ParamType, Value};

/// Default value of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Text coerced at read time, exactly like a source value.
    Raw(String),
    /// A value supplied through the typed API.
    Typed(Value),
}

/// A parameter definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub default: Option<DefaultValue>,
}

/// Outcome of a `define` call.
///
/// Definition failures are recoverable: the caller decides whether to abort
/// setup or carry on without the parameter.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a failed definition is only reported through the returned status"]
pub struct DefineStatus(Result<(), ParamError>);

impl DefineStatus {
    pub fn ok(&self) -> bool {
        self.0.is_ok()
    }

    pub fn error(&self) -> Option<&ParamError> {
        self.0.as_ref().err()
    }

    pub fn into_result(self) -> Result<(), ParamError> {
        self.0
    }
}

/// Typed parameter registry built from a flat `name=value` source.
#[derive(Debug, Clone, Default)]
pub struct Params {
    raw: RawSource,
    specs: BTreeMap<String, ParamSpec>,
}

impl Params {
    /// Build a registry over an already parsed source.
    pub fn from_raw(raw: RawSource) -> Self {
        Params {
            raw,
            specs: BTreeMap::new(),
        }
    }

    /// Parse source text with the default [`SourceOptions`].
    pub fn parse(text: &str) -> Result<Self, ParamError> {
        Self::parse_with(text, &SourceOptions::default())
    }

    pub fn parse_with(text: &str, options: &SourceOptions) -> Result<Self, ParamError> {
        parse_source(text, options).map(Self::from_raw)
    }

    /// Read and parse a file with the default [`SourceOptions`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParamError> {
        Self::load(&FileSystemProvider, path.as_ref(), &SourceOptions::default())
    }

    pub fn load(
        provider: &dyn SourceProvider,
        path: &Path,
        options: &SourceOptions,
    ) -> Result<Self, ParamError> {
        load_source(provider, path, options).map(Self::from_raw)
    }

    // ──────────────────────────────────────────────
    // Define phase
    // ──────────────────────────────────────────────

    /// Define `name` as a parameter of type `T` with no default.
    ///
    /// The name does not have to be present in the source yet; a missing
    /// value is reported when the parameter is read.
    pub fn define<T: Param>(&mut self, name: &str, description: &str) -> DefineStatus {
        self.insert_spec(name, T::param_type(), description, None)
    }

    /// Define `name` as a parameter of type `T`, falling back to `default`
    /// when the source does not assign it.
    pub fn define_with_default<T: Param>(
        &mut self,
        name: &str,
        description: &str,
        default: T,
    ) -> DefineStatus {
        self.insert_spec(
            name,
            T::param_type(),
            description,
            Some(DefaultValue::Typed(default.into_value())),
        )
    }

    /// Type-erased definition, for schemas that are only known at runtime.
    /// A raw default is coerced on read like a source value.
    pub fn define_type(
        &mut self,
        name: &str,
        param_type: ParamType,
        description: &str,
        default: Option<&str>,
    ) -> DefineStatus {
        self.insert_spec(
            name,
            param_type,
            description,
            default.map(|d| DefaultValue::Raw(d.to_string())),
        )
    }

    fn insert_spec(
        &mut self,
        name: &str,
        param_type: ParamType,
        description: &str,
        default: Option<DefaultValue>,
    ) -> DefineStatus {
        if let Some(existing) = self.specs.get(name) {
            if existing.param_type == param_type {
                // Same type: no-op, first definition is kept.
                tracing::debug!(name, %param_type, "parameter redefined with same type");
                return DefineStatus(Ok(()));
            }
            tracing::warn!(
                name,
                existing = %existing.param_type,
                requested = %param_type,
                "conflicting parameter definition"
            );
            return DefineStatus(Err(ParamError::SchemaConflict {
                name: name.to_string(),
                existing: existing.param_type,
                requested: param_type,
            }));
        }

        tracing::debug!(name, %param_type, "parameter defined");
        self.specs.insert(
            name.to_string(),
            ParamSpec {
                name: name.to_string(),
                param_type,
                description: description.to_string(),
                default,
            },
        );
        DefineStatus(Ok(()))
    }

    // ──────────────────────────────────────────────
    // Read phase
    // ──────────────────────────────────────────────

    /// Read a defined parameter as `T`.
    ///
    /// `UndefinedParameter` and `TypeRequest` errors mean the calling code is
    /// wrong (see [`ParamError::is_contract_violation`]); other errors
    /// describe bad or missing input data.
    pub fn get<T: Param>(&self, name: &str) -> Result<T, ParamError> {
        let spec = self.lookup(name)?;
        let requested = T::param_type();
        if spec.param_type != requested {
            return Err(ParamError::TypeRequest {
                name: name.to_string(),
                declared: spec.param_type,
                requested,
            });
        }
        let value = self.resolve(spec)?;
        T::from_value(value).map_err(|e| e.for_parameter(name))
    }

    /// Read a defined parameter as a [`Value`] of its declared type.
    pub fn value(&self, name: &str) -> Result<Value, ParamError> {
        self.lookup(name).and_then(|spec| self.resolve(spec))
    }

    fn lookup(&self, name: &str) -> Result<&ParamSpec, ParamError> {
        self.specs.get(name).ok_or_else(|| {
            tracing::error!(name, "read of undefined parameter");
            ParamError::UndefinedParameter {
                name: name.to_string(),
            }
        })
    }

    fn resolve(&self, spec: &ParamSpec) -> Result<Value, ParamError> {
        if let Some(raw) = self.raw.get(&spec.name) {
            return coerce(raw, spec.param_type).map_err(|e| e.for_parameter(&spec.name));
        }
        match &spec.default {
            Some(DefaultValue::Raw(raw)) => {
                coerce(raw, spec.param_type).map_err(|e| e.for_parameter(&spec.name))
            }
            Some(DefaultValue::Typed(value)) => Ok(value.clone()),
            None => Err(ParamError::MissingValue {
                name: spec.name.clone(),
            }),
        }
    }

    /// Read every defined parameter and collect the failures, in name order.
    ///
    /// Values are checked against their declared parameter type only. `i32`
    /// is an `int64` parameter read through a narrower view, so a value that
    /// fits `int64` but not `i32` passes here and only fails in
    /// `get::<i32>`.
    pub fn validate(&self) -> Vec<ParamError> {
        self.specs
            .values()
            .filter_map(|spec| self.resolve(spec).err())
            .collect()
    }

    // ──────────────────────────────────────────────
    // Introspection
    // ──────────────────────────────────────────────

    pub fn is_defined(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// True if `name` is defined and has either a source value or a default.
    pub fn exists(&self, name: &str) -> bool {
        self.specs
            .get(name)
            .is_some_and(|spec| self.raw.contains(name) || spec.default.is_some())
    }

    /// True if the source assigns `name`, whether or not it is defined.
    pub fn supplied(&self, name: &str) -> bool {
        self.raw.contains(name)
    }

    pub fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.get(name)
    }

    /// All definitions in name order.
    pub fn specs(&self) -> impl Iterator<Item = &ParamSpec> {
        self.specs.values()
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.raw.get(name)
    }

    pub fn raw_source(&self) -> &RawSource {
        &self.raw
    }

    /// Source names that no definition claims, in name order.
    pub fn unused(&self) -> Vec<&str> {
        self.raw
            .iter()
            .map(|(name, _)| name)
            .filter(|name| !self.specs.contains_key(*name))
            .collect()
    }
}
