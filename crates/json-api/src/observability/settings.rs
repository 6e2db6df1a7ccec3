//! Observability settings read on every request.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy)]
struct RuntimeSettings {
    slow_request_threshold: Duration,
    parent_propagation: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            parent_propagation: false,
        }
    }
}

static SETTINGS: OnceLock<RuntimeSettings> = OnceLock::new();

/// Fix the settings for the lifetime of the process; later calls are ignored.
pub(super) fn apply_runtime_config(config: &ObservabilityConfig) {
    let _already_set = SETTINGS.set(RuntimeSettings {
        slow_request_threshold: Duration::from_millis(config.slow_request_threshold_ms),
        parent_propagation: config.otel_enabled && config.otel_parent_propagation_enabled,
    });
}

fn current() -> RuntimeSettings {
    SETTINGS.get().copied().unwrap_or_default()
}

pub(super) fn slow_request_threshold() -> Duration {
    current().slow_request_threshold
}

/// Parent contexts are only honoured while traces are exported.
pub(super) fn otel_parent_propagation_enabled() -> bool {
    current().parent_propagation
}
