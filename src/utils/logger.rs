use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "starticulation";

/// `RUST_LOG` wins; otherwise this crate at info, or debug when verbose.
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = if verbose {
            format!("{}=debug,info", CRATE_TARGET)
        } else {
            format!("{}=info", CRATE_TARGET)
        };
        EnvFilter::new(directives)
    })
}

fn base_layer<S>() -> fmt::Layer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Compact human-readable lines, or JSON lines for runs collected by a log shipper.
pub fn init_logger(verbose: bool, json: bool) {
    let (human, structured) = if json {
        (None, Some(base_layer().json()))
    } else {
        (Some(base_layer().compact()), None)
    };

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(human)
        .with(structured)
        .init();
}

pub fn init_cli_logger(verbose: bool) {
    init_logger(verbose, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_directives() {
        // Only meaningful when RUST_LOG is not set for the test run.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert!(default_filter(false).to_string().contains("starticulation=info"));
        assert!(default_filter(true).to_string().contains("starticulation=debug"));
    }
}
