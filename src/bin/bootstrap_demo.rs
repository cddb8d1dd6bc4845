use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use url::Url;

use gantry::configurator::Configurator;
use gantry::events::{self, HostEvent};
use gantry::executor::{DirectExecutor, TaskExecutor};
use gantry::{
    Bootstrap, BootstrapOutcome, DebugProbe, DeferredRunner, EventBridge, EventSink, FactoryTable,
    HostNotifier, Launcher, MetadataRegistry, QueryStringParameters,
};

#[derive(Debug)]
struct EchoConfigurator;

impl Configurator for EchoConfigurator {
    fn type_name(&self) -> &str {
        "demo.EchoConfigurator"
    }

    fn executor(&self) -> Arc<dyn TaskExecutor> {
        Arc::new(DirectExecutor)
    }
}

struct PrintlnLauncher;

impl Launcher for PrintlnLauncher {
    fn launch(&self, class_name: &str) -> Result<()> {
        println!("launching activity: {class_name}");
        Ok(())
    }
}

struct PrintlnSink;

impl EventSink for PrintlnSink {
    fn process(&self, event: HostEvent) {
        let target = events::event_target_id(&event).unwrap_or_else(|| String::from("<no id>"));
        println!("processed '{}' event on element {target}", event.name);
    }
}

struct EnvDebugProbe;

impl DebugProbe for EnvDebugProbe {
    fn is_remote_debugging(&self) -> bool {
        std::env::var("GANTRY_REMOTE_DEBUG").is_ok_and(|value| value == "1")
    }
}

struct PrintlnNotifier;

impl HostNotifier for PrintlnNotifier {
    fn alert(&self, message: &str) {
        println!("[alert] {message}");
    }
}

fn main() -> Result<()> {
    let subscriber_result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
    if subscriber_result.is_err() {
        // tracing was already initialised; continue silently
    }

    let raw_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("http://localhost/app/home"));
    let request_url = Url::parse(&raw_url)?;

    let registry = Arc::new(
        MetadataRegistry::builder()
            .page_alias("/home", "demo.HomeActivity")
            .page_alias("/settings", "demo.SettingsActivity")
            .configurator("demo.EchoConfigurator")
            .build(),
    );

    let factory = Arc::new(FactoryTable::new().register("demo.EchoConfigurator", || {
        Ok(Arc::new(EchoConfigurator) as Arc<dyn Configurator>)
    }));

    let bootstrap = Bootstrap::new(
        registry,
        factory,
        Arc::new(QueryStringParameters::new(request_url)),
        Arc::new(PrintlnLauncher),
    );

    let runner = DeferredRunner::new(Arc::new(EnvDebugProbe), Arc::new(PrintlnNotifier));
    runner.run_application(move || match bootstrap.execute_main_class() {
        Ok(BootstrapOutcome::Launched {
            context,
            class_name,
        }) => {
            println!("bootstrap complete, running {class_name}");

            let bridge = EventBridge::new(Arc::clone(&context), Arc::new(PrintlnSink));
            let payload = r#"{
                "name": "click",
                "currentTarget": { "attributes": { "data-element-id": "save-button" } }
            }"#;
            match serde_json::from_str::<HostEvent>(payload) {
                Ok(event) => bridge.on_event(event),
                Err(err) => eprintln!("bad event payload: {err}"),
            }
        }
        Ok(BootstrapOutcome::NoActivity { .. }) => {
            println!("nothing to launch for this URL");
        }
        Err(err) => {
            eprintln!("bootstrap failed: {err:#}");
        }
    });

    if runner.has_pending() {
        println!("start deferred for remote debugging; triggering now");
        runner.run_pending();
    }

    Ok(())
}
