//! Metric recording helpers for API operations.

use metrics::counter;

pub(crate) fn record_design_operation(op: &'static str) {
    counter!("mehandi_design_operations_total", "op" => op).increment(1);
}

pub(crate) fn record_booking_operation(op: &'static str) {
    counter!("mehandi_booking_operations_total", "op" => op).increment(1);
}

pub(crate) fn record_auth_failure() {
    counter!("mehandi_auth_failures_total").increment(1);
}
