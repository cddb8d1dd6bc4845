use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a kind of declarative metadata attached to application types.
///
/// Discovery is explicit: hosts declare their facts up front through
/// [`MetadataRegistry::builder`] and resolvers query them back by marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(&'static str);

impl Marker {
    /// Entry-point aliases binding activity classes to request paths.
    pub const PAGE_ALIAS: Marker = Marker("page-alias");
    /// Candidate runtime-configuration strategies.
    pub const CONFIGURATOR: Marker = Marker("configurator-implementor");

    pub const fn new(name: &'static str) -> Self {
        Marker(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Names a registered application type. Equality is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    name: String,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One declared metadata fact: a key/value pair and the type declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
    pub declaring_type: TypeRef,
}

impl MetadataEntry {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        declaring_type: TypeRef,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            declaring_type,
        }
    }
}

/// Ordered metadata entries grouped by marker.
///
/// Entry order within a marker is registration order. Resolvers rely on it:
/// last-match-wins tie-breaks are part of their contract.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    entries: HashMap<Marker, Vec<MetadataEntry>>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> MetadataRegistryBuilder {
        MetadataRegistryBuilder::default()
    }

    /// All entries declared for `marker`, in registration order.
    pub fn entries(&self, marker: Marker) -> &[MetadataEntry] {
        self.entries.get(&marker).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Startup manifest collecting declared metadata before the registry is
/// sealed for querying.
#[derive(Debug, Default)]
pub struct MetadataRegistryBuilder {
    entries: HashMap<Marker, Vec<MetadataEntry>>,
}

impl MetadataRegistryBuilder {
    pub fn annotate(
        mut self,
        marker: Marker,
        key: impl Into<String>,
        value: impl Into<String>,
        declaring_type: TypeRef,
    ) -> Self {
        self.entries
            .entry(marker)
            .or_default()
            .push(MetadataEntry::new(key, value, declaring_type));
        self
    }

    /// Declare an activity class reachable under a request-path alias.
    pub fn page_alias(self, alias: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.annotate(
            Marker::PAGE_ALIAS,
            crate::activity::ALIAS_KEY,
            alias,
            TypeRef::new(type_name),
        )
    }

    /// Declare the internal discoverer placeholder activity.
    pub fn discoverer(self, type_name: impl Into<String>) -> Self {
        self.annotate(
            Marker::PAGE_ALIAS,
            crate::activity::ALIAS_KEY,
            crate::activity::DISCOVERER_VALUE,
            TypeRef::new(type_name),
        )
    }

    /// Declare a candidate configurator implementation.
    pub fn configurator(self, type_name: impl Into<String>) -> Self {
        let type_ref = TypeRef::new(type_name);
        let key = type_ref.name().to_string();
        self.annotate(Marker::CONFIGURATOR, key, String::new(), type_ref)
    }

    pub fn build(self) -> MetadataRegistry {
        MetadataRegistry {
            entries: self.entries,
        }
    }
}
