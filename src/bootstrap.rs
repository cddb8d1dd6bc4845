use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::activity::{self, CLASS_PARAMETER};
use crate::configurator::{resolve_configurator, ConfiguratorError, InstanceFactory};
use crate::context::RuntimeContext;
use crate::metadata::{Marker, MetadataRegistry};
use crate::parameters::ParametersHandler;

/// Diagnostic emitted when no activity class can be resolved at bootstrap.
pub const NO_ACTIVITY_DIAGNOSTIC: &str =
    "Please specify activity class to execute in querystring parameter 'class'";

/// Instantiates and runs a resolved activity class.
pub trait Launcher: Send + Sync {
    fn launch(&self, class_name: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configurator resolution failed")]
    Configurator(#[from] ConfiguratorError),
    #[error("failed to launch activity class '{class_name}'")]
    Launch {
        class_name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result of a bootstrap call. An unresolved activity class is a soft no-op,
/// not an error; the context is returned either way so the host can still
/// wire events.
pub enum BootstrapOutcome {
    Launched {
        context: Arc<RuntimeContext>,
        class_name: String,
    },
    NoActivity {
        context: Arc<RuntimeContext>,
    },
}

impl std::fmt::Debug for BootstrapOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BootstrapOutcome::Launched { class_name, .. } => f
                .debug_struct("Launched")
                .field("class_name", class_name)
                .finish_non_exhaustive(),
            BootstrapOutcome::NoActivity { .. } => {
                f.debug_struct("NoActivity").finish_non_exhaustive()
            }
        }
    }
}

impl BootstrapOutcome {
    pub fn context(&self) -> &Arc<RuntimeContext> {
        match self {
            BootstrapOutcome::Launched { context, .. } => context,
            BootstrapOutcome::NoActivity { context } => context,
        }
    }
}

/// Wires resolver output into the runtime context and hands off to the
/// launcher. The single entry point the host invokes to start the
/// application.
pub struct Bootstrap {
    registry: Arc<MetadataRegistry>,
    factory: Arc<dyn InstanceFactory>,
    parameters: Arc<dyn ParametersHandler>,
    launcher: Arc<dyn Launcher>,
}

impl Bootstrap {
    pub fn new(
        registry: Arc<MetadataRegistry>,
        factory: Arc<dyn InstanceFactory>,
        parameters: Arc<dyn ParametersHandler>,
        launcher: Arc<dyn Launcher>,
    ) -> Self {
        Self {
            registry,
            factory,
            parameters,
            launcher,
        }
    }

    /// Resolve the configurator and the activity class, then launch.
    ///
    /// Launch failures are logged and re-raised, never swallowed; only "no
    /// class resolved" is a soft outcome.
    pub fn execute_main_class(&self) -> Result<BootstrapOutcome, BootstrapError> {
        let configurator = resolve_configurator(
            self.registry.entries(Marker::CONFIGURATOR),
            self.factory.as_ref(),
        )
        .map_err(|err| {
            error!(target = "gantry", error = %err, "configurator resolution failed");
            err
        })?;
        let context = Arc::new(RuntimeContext::new(configurator));

        let explicit = self.parameters.parameter(CLASS_PARAMETER);
        let request_url = self.parameters.request_url();
        let class_name = activity::resolve_activity_class(
            explicit.as_deref(),
            &request_url,
            self.registry.entries(Marker::PAGE_ALIAS),
        );

        let Some(class_name) = class_name else {
            warn!(target = "gantry", "{NO_ACTIVITY_DIAGNOSTIC}");
            return Ok(BootstrapOutcome::NoActivity { context });
        };

        info!(target = "gantry", class = %class_name, "launching activity");
        if let Err(source) = self.launcher.launch(&class_name) {
            error!(target = "gantry", class = %class_name, error = %source, "activity launch failed");
            return Err(BootstrapError::Launch { class_name, source });
        }

        Ok(BootstrapOutcome::Launched {
            context,
            class_name,
        })
    }
}
