//! Web server

use crate::cli;

use std::{net::SocketAddr, process::exit, str::FromStr, time::Duration};

use axum::ServiceExt;
use axum_server::{tls_rustls::RustlsConfig, Handle};
use expanduser::expanduser;
use tokio::signal;

/// Serve the climate API
///
/// # Arguments
///
/// * `args`: Command line arguments
/// * `service`: The [crate::app::Service] to serve
pub async fn serve(args: &cli::CommandLineArgs, service: crate::app::Service) {
    let addr = SocketAddr::from_str(&format!("{}:{}", args.host, args.port))
        .expect("invalid host name, IP address or port number");

    // Catch ctrl+c and try to shutdown gracefully
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(
        handle.clone(),
        args.graceful_shutdown_timeout,
    ));

    let result = if args.https {
        let abs_cert_file = absolute_path(&args.cert_file, "TLS certificate");
        let abs_key_file = absolute_path(&args.key_file, "TLS key");
        // Set up TLS config
        let tls_config = RustlsConfig::from_pem_file(abs_cert_file, abs_key_file)
            .await
            .expect("Failed to load TLS certificate files");
        tracing::info!("listening on https://{}", addr);
        // run HTTPS server with hyper
        axum_server::bind_rustls(addr, tls_config)
            .handle(handle)
            .serve(service.into_make_service())
            .await
    } else {
        tracing::info!("listening on http://{}", addr);
        // run HTTP server with hyper
        axum_server::bind(addr)
            .handle(handle)
            .serve(service.into_make_service())
            .await
    };
    if let Err(err) = result {
        tracing::error!("server error: {}", err);
        exit(1)
    }
}

/// Expand `~` in a TLS file path and check that the file exists, exiting if it does not.
fn absolute_path(path: &str, description: &str) -> std::path::PathBuf {
    let abs_path = expanduser(path)
        .expect("Failed to expand ~ to user name. Please provide an absolute path instead.");
    if !abs_path.exists() {
        tracing::error!(
            "{} file expected at '{}' but not found.",
            description,
            abs_path.display()
        );
        exit(1)
    }
    abs_path
        .canonicalize()
        .expect("failed to determine absolute path to TLS file")
}

/// Graceful shutdown handler
///
/// Installs signal handlers to catch Ctrl-C or SIGTERM and trigger a graceful shutdown.
async fn shutdown_signal(handle: Handle, timeout: u64) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
    // Force shutdown if graceful shutdown takes longer than the timeout
    handle.graceful_shutdown(Some(Duration::from_secs(timeout)));
}
