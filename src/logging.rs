use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize diagnostics on stderr. `FOLIO_LOG` (or `RUST_LOG`) overrides the level.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "folio=debug" } else { "folio=warn" };

    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
