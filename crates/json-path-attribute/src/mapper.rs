//! Entry point: maps documents onto registered types.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::coerce::TypeCoercer;
use crate::document::{normalize, normalize_nested, IntoDocument};
use crate::error::{value_kind, MapError, Result};
use crate::mapped::MappedType;
use crate::record::Record;
use crate::registry::MappingRegistry;

/// Mapper settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Deepest allowed nesting of mapped types; the top-level record is
    /// depth 0.
    pub max_depth: usize,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Maps documents onto the types declared in a [`MappingRegistry`].
///
/// The mapper only reads the registry, so one registry can back any number
/// of mappers, including on different threads.
#[derive(Debug, Clone, Copy)]
pub struct DocumentMapper<'r> {
    registry: &'r MappingRegistry,
    options: MapperOptions,
}

impl<'r> DocumentMapper<'r> {
    pub fn new(registry: &'r MappingRegistry) -> Self {
        Self::with_options(registry, MapperOptions::default())
    }

    pub fn with_options(registry: &'r MappingRegistry, options: MapperOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &'r MappingRegistry {
        self.registry
    }

    pub fn options(&self) -> MapperOptions {
        self.options
    }

    /// Map `input` onto `type_name`.
    pub fn parse<I: IntoDocument>(&self, type_name: &str, input: I) -> Result<Record> {
        let document = normalize(input)?;
        self.parse_at_depth(type_name, Arc::new(document), 0)
    }

    /// Map every element of a sequence input onto `type_name`. The first
    /// failing element aborts the whole call.
    pub fn parse_collection<I: IntoDocument>(
        &self,
        type_name: &str,
        input: I,
    ) -> Result<Vec<Record>> {
        let elements = sequence(normalize(input)?)?;
        debug!(type_name, count = elements.len(), "mapping collection");
        elements
            .into_iter()
            .map(|element| {
                let document = normalize_nested(element)?;
                self.parse_at_depth(type_name, Arc::new(document), 0)
            })
            .collect()
    }

    /// Map only the first element of a sequence input onto `type_name`.
    pub fn parse_first<I: IntoDocument>(&self, type_name: &str, input: I) -> Result<Record> {
        let first = sequence(normalize(input)?)?
            .into_iter()
            .next()
            .ok_or(MapError::EmptySequence)?;
        self.parse_at_depth(type_name, Arc::new(normalize_nested(first)?), 0)
    }

    pub fn parse_as<T: MappedType, I: IntoDocument>(&self, input: I) -> Result<T> {
        T::from_record(self.parse(T::NAME, input)?)
    }

    pub fn parse_collection_as<T: MappedType, I: IntoDocument>(&self, input: I) -> Result<Vec<T>> {
        self.parse_collection(T::NAME, input)?
            .into_iter()
            .map(T::from_record)
            .collect()
    }

    pub fn parse_first_as<T: MappedType, I: IntoDocument>(&self, input: I) -> Result<T> {
        T::from_record(self.parse_first(T::NAME, input)?)
    }

    pub(crate) fn parse_at_depth(
        &self,
        type_name: &str,
        document: Arc<Value>,
        depth: usize,
    ) -> Result<Record> {
        if depth > self.options.max_depth {
            return Err(MapError::DepthExceeded(self.options.max_depth));
        }

        let definitions = self
            .registry
            .definitions_for(type_name)
            .ok_or_else(|| MapError::UnknownType(type_name.to_string()))?;

        debug!(type_name, depth, fields = definitions.len(), "mapping document");

        let coercer = TypeCoercer::new(self, depth);
        let mut fields = IndexMap::with_capacity(definitions.len());

        for (name, definition) in definitions {
            match definition.extract(&document, &coercer)? {
                Some(value) => {
                    trace!(type_name, field = %name, kind = value.kind(), "field assigned");
                    fields.insert(name.clone(), value);
                }
                None => {
                    trace!(
                        type_name,
                        field = %name,
                        query = definition.path().query(),
                        "no value; field left unset"
                    );
                }
            }
        }

        Ok(Record::new(type_name, fields, document))
    }
}

fn sequence(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(elements) => Ok(elements),
        other => Err(MapError::NotASequence {
            found: value_kind(&other),
        }),
    }
}
