use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, writing to stderr so stdout stays
/// machine-readable.
///
/// Filtering follows `LATTICE_LOG` (e.g. `LATTICE_LOG=lattice_guards=debug`)
/// and defaults to `info`.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_env("LATTICE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
