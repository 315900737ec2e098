//! Metrics collection for observability
//!
//! This module provides Prometheus metrics for monitoring the bet book.
//!
//! # Metrics
//!
//! - `betbook_bets_created_total` - Total number of bets created
//! - `betbook_bets_updated_total` - Total number of field edits applied
//! - `betbook_bets_deleted_total` - Total number of bets deleted
//! - `betbook_bets_stored` - Bets currently held

use prometheus::{IntCounter, IntGauge, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Every collector owns its registry, so several books can live in one
/// process (tests, report runs) without name clashes.
#[derive(Clone, Debug)]
pub struct Metrics {
    /// Total bets created
    pub bets_created: IntCounter,

    /// Total field edits
    pub bets_updated: IntCounter,

    /// Total bets deleted
    pub bets_deleted: IntCounter,

    /// Bets currently stored
    pub bets_stored: IntGauge,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let bets_created =
            IntCounter::new("betbook_bets_created_total", "Total number of bets created")?;
        registry.register(Box::new(bets_created.clone()))?;

        let bets_updated = IntCounter::new(
            "betbook_bets_updated_total",
            "Total number of field edits applied",
        )?;
        registry.register(Box::new(bets_updated.clone()))?;

        let bets_deleted =
            IntCounter::new("betbook_bets_deleted_total", "Total number of bets deleted")?;
        registry.register(Box::new(bets_deleted.clone()))?;

        let bets_stored = IntGauge::new("betbook_bets_stored", "Bets currently held")?;
        registry.register(Box::new(bets_stored.clone()))?;

        Ok(Self {
            bets_created,
            bets_updated,
            bets_deleted,
            bets_stored,
            registry,
        })
    }

    /// Record bet creation
    pub fn record_created(&self) {
        self.bets_created.inc();
        self.bets_stored.inc();
    }

    /// Record a field edit
    pub fn record_updated(&self) {
        self.bets_updated.inc();
    }

    /// Record bet deletion
    pub fn record_deleted(&self) {
        self.bets_deleted.inc();
        self.bets_stored.dec();
    }

    /// Reset stored gauge (after a snapshot import)
    pub fn set_stored(&self, count: usize) {
        self.bets_stored.set(count as i64);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.bets_created.get(), 0);
        assert_eq!(metrics.bets_stored.get(), 0);
        assert_eq!(metrics.registry().gather().len(), 4);
    }

    #[test]
    fn test_independent_registries() {
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.record_created();
        assert_eq!(a.bets_created.get(), 1);
        assert_eq!(b.bets_created.get(), 0);
    }

    #[test]
    fn test_create_and_delete_track_stored() {
        let metrics = Metrics::new().unwrap();
        metrics.record_created();
        metrics.record_created();
        metrics.record_deleted();
        assert_eq!(metrics.bets_stored.get(), 1);
        assert_eq!(metrics.bets_deleted.get(), 1);

        metrics.set_stored(10);
        assert_eq!(metrics.bets_stored.get(), 10);
    }
}
