use std::env;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const DEFAULT_FILTER: &str = "peez_lobby=debug,tower_http=debug,axum::rejection=trace,warn";

#[cfg(feature = "telemetry")]
fn env_flag(name: &str) -> bool {
    env::var(name)
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false)
}

fn json_format() -> bool {
    env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if json_format() {
        fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .json()
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .boxed()
    };

    let registry = Registry::default().with(fmt_layer).with(env_filter);

    #[cfg(feature = "telemetry")]
    if env_flag("ENABLE_TELEMETRY") {
        let jaeger_endpoint = env::var("JAEGER_ENDPOINT")
            .unwrap_or_else(|_| "http://jaeger:14268/api/traces".to_string());
        let tracer = jaeger_tracer(service_name, &jaeger_endpoint)?;

        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;

        tracing::info!(%service_name, %jaeger_endpoint, "Telemetry initialized");
        return Ok(());
    }

    registry.try_init()?;
    tracing::debug!(%service_name, "Telemetry disabled");
    Ok(())
}

#[cfg(feature = "telemetry")]
fn jaeger_tracer(
    service_name: &str,
    endpoint: &str,
) -> Result<opentelemetry::sdk::trace::Tracer, opentelemetry::trace::TraceError> {
    use opentelemetry::sdk::propagation::TraceContextPropagator;
    use opentelemetry::sdk::{
        trace::{self, RandomIdGenerator, Sampler},
        Resource,
    };
    use opentelemetry::{global, KeyValue};

    global::set_text_map_propagator(TraceContextPropagator::new());

    opentelemetry_jaeger::new_collector_pipeline()
        .with_service_name(service_name.to_string())
        .with_endpoint(endpoint)
        .with_isahc()
        .with_trace_config(
            trace::config()
                .with_sampler(Sampler::AlwaysOn)
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(Resource::new(vec![
                    KeyValue::new("service.name", service_name.to_string()),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ])),
        )
        .with_timeout(std::time::Duration::from_secs(2))
        .install_batch(opentelemetry::runtime::Tokio)
}

/// Flushes pending spans when telemetry was enabled.
pub fn shutdown_telemetry() {
    #[cfg(feature = "telemetry")]
    if env_flag("ENABLE_TELEMETRY") {
        opentelemetry::global::shutdown_tracer_provider();
    }
}
