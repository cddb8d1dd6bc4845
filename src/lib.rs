// Library exports for embedding hosts and tests

pub mod activity;
pub mod bootstrap;
pub mod bridge;
pub mod configurator;
pub mod context;
pub mod deferred;
pub mod events;
pub mod executor;
pub mod metadata;
pub mod parameters;

// Re-export commonly used types for hosts
pub use bootstrap::{Bootstrap, BootstrapError, BootstrapOutcome, Launcher};
pub use bridge::{EventBridge, EventSink};
pub use configurator::{Configurator, DefaultConfigurator, FactoryTable, InstanceFactory};
pub use context::RuntimeContext;
pub use deferred::{DebugProbe, DeferredRunner, HostNotifier};
pub use events::{EventNode, HostEvent};
pub use executor::{DirectExecutor, SpawnExecutor, TaskExecutor};
pub use metadata::{Marker, MetadataEntry, MetadataRegistry, TypeRef};
pub use parameters::{ParametersHandler, QueryStringParameters};
