//! Global `tracing` subscriber setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the fmt subscriber once; later calls are ignored.
///
/// `RUST_LOG` wins when set. Otherwise the level is `info`, or `debug`
/// for the bunting crates when `verbose` is on.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "info,bunting_cloth=debug,bunting_scene=debug,bunting_cli=debug"
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        // A subscriber may already be installed by an embedding process.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::debug!("logging initialized");
    });
}
