use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "folio_core=info,folio_animation=info,folio_app=info,folio_cli=info";
const VERBOSE_FILTER: &str =
    "folio_core=debug,folio_animation=debug,folio_app=debug,folio_cli=debug,info";

/// Install a compact stderr subscriber. `RUST_LOG` overrides the defaults.
pub fn init_cli_logger(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

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
