use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    events_total: AtomicU64,
    events_ignored_total: AtomicU64,
    replies_delivered_total: AtomicU64,
    delivery_auth_failures_total: AtomicU64,
    delivery_failures_total: AtomicU64,
    generation_failures_total: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub events_total: u64,
    pub events_ignored_total: u64,
    pub replies_delivered_total: u64,
    pub delivery_auth_failures_total: u64,
    pub delivery_failures_total: u64,
    pub generation_failures_total: u64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_event(&self) {
        self.events_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_ignored(&self) {
        self.events_ignored_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_delivered(&self) {
        self.replies_delivered_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_delivery_auth_failure(&self) {
        self.delivery_auth_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_delivery_failure(&self) {
        self.delivery_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_generation_failure(&self) {
        self.generation_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_total: self.events_total.load(Ordering::Relaxed),
            events_ignored_total: self.events_ignored_total.load(Ordering::Relaxed),
            replies_delivered_total: self.replies_delivered_total.load(Ordering::Relaxed),
            delivery_auth_failures_total: self.delivery_auth_failures_total.load(Ordering::Relaxed),
            delivery_failures_total: self.delivery_failures_total.load(Ordering::Relaxed),
            generation_failures_total: self.generation_failures_total.load(Ordering::Relaxed),
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,insure_api=info,insure_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
