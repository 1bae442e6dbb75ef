use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Diagnostics already cover the
/// non-verbose run, so tracing stays quiet there.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "camt2csv=debug"
    } else {
        "off"
    }
}

/// Diagnostics own stdout, so tracing output goes to stderr.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
