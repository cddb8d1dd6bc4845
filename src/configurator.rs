use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::executor::{DirectExecutor, TaskExecutor};
use crate::metadata::{MetadataEntry, TypeRef};

/// Pluggable strategy controlling runtime behaviour, most importantly which
/// executor processes host events.
pub trait Configurator: Send + Sync + std::fmt::Debug {
    /// Name of the implementing type, used for logging and for recognising
    /// the default during resolution.
    fn type_name(&self) -> &str;

    /// The executor host events are submitted through.
    fn executor(&self) -> Arc<dyn TaskExecutor>;
}

/// Type name the built-in fallback configurator is registered under.
pub const DEFAULT_CONFIGURATOR_TYPE: &str = "gantry.DefaultConfigurator";

/// Built-in fallback used when no custom configurator is declared. Processes
/// events synchronously on the dispatching thread.
#[derive(Debug)]
pub struct DefaultConfigurator {
    executor: Arc<dyn TaskExecutor>,
}

impl DefaultConfigurator {
    pub fn new() -> Self {
        Self {
            executor: Arc::new(DirectExecutor),
        }
    }

    pub fn type_ref() -> TypeRef {
        TypeRef::new(DEFAULT_CONFIGURATOR_TYPE)
    }
}

impl Default for DefaultConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurator for DefaultConfigurator {
    fn type_name(&self) -> &str {
        DEFAULT_CONFIGURATOR_TYPE
    }

    fn executor(&self) -> Arc<dyn TaskExecutor> {
        Arc::clone(&self.executor)
    }
}

/// Creates configurator instances for declared candidate types.
pub trait InstanceFactory: Send + Sync {
    fn create(&self, type_ref: &TypeRef) -> anyhow::Result<Arc<dyn Configurator>>;
}

/// Instance factory backed by closures registered per type name.
#[derive(Default)]
pub struct FactoryTable {
    factories: HashMap<String, ConfiguratorFn>,
}

type ConfiguratorFn = Box<dyn Fn() -> anyhow::Result<Arc<dyn Configurator>> + Send + Sync>;

impl FactoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(mut self, type_name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> anyhow::Result<Arc<dyn Configurator>> + Send + Sync + 'static,
    {
        self.factories.insert(type_name.into(), Box::new(factory));
        self
    }
}

impl InstanceFactory for FactoryTable {
    fn create(&self, type_ref: &TypeRef) -> anyhow::Result<Arc<dyn Configurator>> {
        match self.factories.get(type_ref.name()) {
            Some(make) => make(),
            None => anyhow::bail!("no factory registered for type '{}'", type_ref.name()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("failed to instantiate configurator '{type_name}'")]
    Instantiation {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Resolve exactly one configurator from the declared candidate entries.
///
/// Starts from the built-in default. Every entry not declaring the default
/// type itself is instantiated, in registry order, and each instantiation
/// overwrites the running selection: the last declared implementor wins.
/// Earlier candidates are still constructed, so their construction side
/// effects happen before they are discarded. Any instantiation failure aborts
/// resolution; there is no fallback to the default past a failed candidate.
pub fn resolve_configurator(
    entries: &[MetadataEntry],
    factory: &dyn InstanceFactory,
) -> Result<Arc<dyn Configurator>, ConfiguratorError> {
    let default_type = DefaultConfigurator::type_ref();
    let mut selected: Arc<dyn Configurator> = Arc::new(DefaultConfigurator::new());

    for entry in entries {
        if entry.declaring_type == default_type {
            continue;
        }

        selected = factory.create(&entry.declaring_type).map_err(|source| {
            ConfiguratorError::Instantiation {
                type_name: entry.declaring_type.name().to_string(),
                source,
            }
        })?;
    }

    debug!(target = "gantry", configurator = selected.type_name(), "configurator resolved");
    Ok(selected)
}
