//! Debug logging gated by caller-supplied options
//!
//! Lines go through the `log` facade under the `gsearch` target. Nothing is
//! emitted unless the caller passes enabled [`DebugOptions`]; failures are the
//! exception and are always logged at `warn`.

use crate::types::DebugOptions;

const TARGET: &str = "gsearch";

/// Whether `options` are enabled and pass the extra `gate`
fn enabled(options: &Option<DebugOptions>, gate: impl Fn(&DebugOptions) -> bool) -> bool {
    options
        .as_ref()
        .is_some_and(|opts| opts.enabled && gate(opts))
}

/// Log a message if debugging is enabled
pub fn log(options: &Option<DebugOptions>, message: &str, data: &str) {
    if enabled(options, |_| true) {
        log::debug!(target: TARGET, "{message}: {data}");
    }
}

/// Log request details if request logging is enabled
pub fn log_request(options: &Option<DebugOptions>, message: &str, data: &str) {
    if enabled(options, |opts| opts.log_requests) {
        log::debug!(target: TARGET, "REQUEST: {message}: {data}");
    }
}

/// Log response details if response logging is enabled
pub fn log_response(options: &Option<DebugOptions>, message: &str) {
    if enabled(options, |opts| opts.log_responses) {
        log::debug!(target: TARGET, "RESPONSE: {message}");
    }
}

/// Log a failure that degraded a search to zero results
pub fn log_failure(engine: &str, stage: &str, error: &dyn std::fmt::Display) {
    log::warn!(target: TARGET, "{engine} Search : {stage} : ERROR : {error}");
}

/// Create default debug options with all logging enabled
pub fn debug_all() -> DebugOptions {
    DebugOptions {
        enabled: true,
        log_requests: true,
        log_responses: true,
    }
}

/// Create debug options with only basic logging enabled
pub fn debug_basic() -> DebugOptions {
    DebugOptions {
        enabled: true,
        log_requests: false,
        log_responses: false,
    }
}
