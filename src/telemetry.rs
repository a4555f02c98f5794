//! Logging setup.

/// Install a `tracing` fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the vidfx crates log at debug (trace
/// when `verbose`). Returns `false` if a global subscriber was already set.
pub fn init_tracing(verbose: bool) -> bool {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_ok()
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "vidfx=trace,vf_av=trace,vf_core=debug"
    } else {
        "vidfx=debug,vf_av=debug,vf_core=info"
    }
}
