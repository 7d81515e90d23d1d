use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};
use stakeboard_types::Protocol;

const METER_NAME: &str = "stakeboard";

#[derive(Debug)]
pub struct MetricsRegistry {
    pub refresh: Arc<RefreshMetrics>,
    pub snapshots: Arc<SnapshotMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            refresh: RefreshMetrics::new(),
            snapshots: SnapshotMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct RefreshMetrics {
    passes: Counter<u64>,
    protocol_failures: Counter<u64>,
}

impl RefreshMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter(METER_NAME);
        let passes = meter
            .u64_counter("refresh_passes_total")
            .with_description("Number of protocol statistics refresh passes executed")
            .with_unit("count")
            .init();

        let protocol_failures = meter
            .u64_counter("protocol_refresh_failures_total")
            .with_description("Number of protocols whose statistics could not be refreshed")
            .with_unit("count")
            .init();

        Arc::new(Self {
            passes,
            protocol_failures,
        })
    }

    pub fn record_pass(&self) {
        self.passes.add(1, &[]);
    }

    pub fn record_protocol_failure(&self, protocol: Protocol) {
        self.protocol_failures
            .add(1, &[KeyValue::new("protocol", protocol.as_str())]);
    }
}

#[derive(Debug)]
pub struct SnapshotMetrics {
    written: Counter<u64>,
    failed: Counter<u64>,
}

impl SnapshotMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter(METER_NAME);
        let written = meter
            .u64_counter("wallet_snapshots_written_total")
            .with_description("Number of wallet snapshots persisted")
            .with_unit("count")
            .init();

        let failed = meter
            .u64_counter("wallet_snapshot_failures_total")
            .with_description("Number of wallet snapshots that failed to persist")
            .with_unit("count")
            .init();

        Arc::new(Self { written, failed })
    }

    pub fn record_written(&self, protocol: Protocol) {
        self.written
            .add(1, &[KeyValue::new("protocol", protocol.as_str())]);
    }

    pub fn record_failed(&self, protocol: Protocol) {
        self.failed
            .add(1, &[KeyValue::new("protocol", protocol.as_str())]);
    }
}
