//! Shared text rendering helpers for collector reports.

use std::time::Duration;

/// Separator between the per-name section of a rendering and its totals.
pub(crate) const SEPARATOR: &str = "-----------";

/// Renders a runtime as integer hours, integer minutes and seconds with four
/// decimal digits, in the shape `{hours}h {minutes}m {seconds}s`.
pub(crate) fn runtime_breakdown(runtime: Duration) -> String {
    let hours = runtime.as_secs() / 3600;
    let minutes = (runtime.as_secs() % 3600) / 60;
    let seconds = (runtime.as_secs() % 60) as f64 + f64::from(runtime.subsec_nanos()) / 1e9;
    format!("{hours}h {minutes}m {seconds:.4}s")
}
