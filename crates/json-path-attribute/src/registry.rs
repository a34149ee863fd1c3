//! Per-type field declarations.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::attr_type::AttrType;
use crate::definition::AttributeDefinition;
use crate::error::Result;
use crate::mapped::MappedType;

/// Field declarations of every mapped type, keyed by type name.
///
/// Populate it up front, then share it by reference with any number of
/// mappers. Fields keep their declaration order; declaring a field again
/// replaces its definition in place. Nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    types: HashMap<String, IndexMap<String, AttributeDefinition>>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `definition` under (`type_name`, `name`), replacing any previous one.
    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        name: impl Into<String>,
        definition: AttributeDefinition,
    ) {
        self.types
            .entry(type_name.into())
            .or_default()
            .insert(name.into(), definition);
    }

    pub fn definitions_for(&self, type_name: &str) -> Option<&IndexMap<String, AttributeDefinition>> {
        self.types.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Start declaring fields for `type_name`. The type becomes known even
    /// if no field is added.
    pub fn declare(&mut self, type_name: impl Into<String>) -> TypeDeclaration<'_> {
        let type_name = type_name.into();
        self.types.entry(type_name.clone()).or_default();
        TypeDeclaration {
            registry: self,
            type_name,
        }
    }

    /// Register a typed struct and, through its declaration, every mapped
    /// type it references. Already registered types are left untouched.
    ///
    /// Registration is all or nothing: if any declaration fails, every type
    /// added by this call is removed again, so a later call starts over.
    pub fn register_type<T: MappedType>(&mut self) -> Result<&mut Self> {
        if self.contains(T::NAME) {
            return Ok(self);
        }

        let known: HashSet<String> = self.types.keys().cloned().collect();
        let outcome = {
            let mut declaration = self.declare(T::NAME);
            T::declare(&mut declaration)
        };
        if let Err(err) = outcome {
            self.types.retain(|name, _| known.contains(name));
            return Err(err);
        }
        Ok(self)
    }
}

/// Builder returned by [`MappingRegistry::declare`].
pub struct TypeDeclaration<'r> {
    registry: &'r mut MappingRegistry,
    type_name: String,
}

impl TypeDeclaration<'_> {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn attribute(&mut self, name: impl Into<String>, definition: AttributeDefinition) -> &mut Self {
        self.registry
            .register(self.type_name.clone(), name, definition);
        self
    }

    pub fn field(&mut self, name: impl Into<String>, path: &str, declared: AttrType) -> Result<&mut Self> {
        let definition = AttributeDefinition::new(path, declared, false)?;
        Ok(self.attribute(name, definition))
    }

    pub fn array_field(
        &mut self,
        name: impl Into<String>,
        path: &str,
        declared: AttrType,
    ) -> Result<&mut Self> {
        let definition = AttributeDefinition::new(path, declared, true)?;
        Ok(self.attribute(name, definition))
    }

    /// Field holding one instance of `T`; registers `T` too.
    pub fn mapped_field<T: MappedType>(&mut self, name: impl Into<String>, path: &str) -> Result<&mut Self> {
        self.registry.register_type::<T>()?;
        self.field(name, path, AttrType::mapped(T::NAME))
    }

    /// Field holding a sequence of `T`; registers `T` too.
    pub fn mapped_array_field<T: MappedType>(
        &mut self,
        name: impl Into<String>,
        path: &str,
    ) -> Result<&mut Self> {
        self.registry.register_type::<T>()?;
        self.array_field(name, path, AttrType::mapped(T::NAME))
    }
}
