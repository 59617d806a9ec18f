pub mod catalog;
mod error;
pub mod importer;

pub use catalog::{compile, compile_directory, compile_to_file, CompiledRow};
pub use error::CatalogError;

/// Install the global fmt subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
