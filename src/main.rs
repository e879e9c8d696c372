//! ts2go CLI entry point

fn main() {
    // Generated code goes to stdout, so only warnings and errors are logged unless RUST_LOG says otherwise
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    ts2go::cli::run();
}
