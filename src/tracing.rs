//! Tracing (logging)

use crate::cli::CommandLineArgs;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initlialise tracing (logging)
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back to enable debug
/// logging for this crate and tower_http if not set.
/// If Jaeger is enabled, spans are also exported to a Jaeger agent.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn init_tracing(args: &CommandLineArgs) {
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer());
    if args.enable_jaeger {
        opentelemetry::global::set_text_map_propagator(opentelemetry_jaeger::Propagator::new());
        let tracer = opentelemetry_jaeger::new_agent_pipeline()
            .with_service_name("climate-api")
            .install_batch(opentelemetry::runtime::Tokio)
            .expect("Failed to initialise Jaeger tracer");
        let opentelemetry = tracing_opentelemetry::layer().with_tracer(tracer);
        subscriber.with(opentelemetry).init();
    } else {
        subscriber.init();
    }
}

/// Flush any remaining spans and shut down the tracer provider.
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}
