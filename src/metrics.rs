//! Prometheus counters for store activity
//!
//! Registered in the default registry, so `GET /metrics` picks them up
//! through `prometheus::gather()`.

use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Connection acquisitions, labelled `ok` or `failed`
    pub static ref STORE_CONNECTIONS: IntCounterVec = register_int_counter_vec!(
        "shopping_list_store_connections_total",
        "Database connection acquisitions by outcome",
        &["outcome"]
    )
    .unwrap();

    /// Store errors surfaced to the request layer, labelled by kind
    pub static ref STORE_ERRORS: IntCounterVec = register_int_counter_vec!(
        "shopping_list_store_errors_total",
        "Store errors by kind",
        &["kind"]
    )
    .unwrap();

    /// User cascade deletions, labelled `ok` or `failed`
    pub static ref CASCADE_DELETES: IntCounterVec = register_int_counter_vec!(
        "shopping_list_cascade_deletes_total",
        "User cascade deletions by outcome",
        &["outcome"]
    )
    .unwrap();
}

fn outcome(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "failed"
    }
}

pub fn record_connection(ok: bool) {
    STORE_CONNECTIONS.with_label_values(&[outcome(ok)]).inc();
}

pub fn record_store_error(kind: &str) {
    STORE_ERRORS.with_label_values(&[kind]).inc();
}

pub fn record_cascade(ok: bool) {
    CASCADE_DELETES.with_label_values(&[outcome(ok)]).inc();
}
