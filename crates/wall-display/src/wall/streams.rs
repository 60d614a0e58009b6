//! Stream cache maintenance.

use futures_util::future::join_all;
use tracing::{debug, warn};
use wall_common::LoadError;

use crate::site::SiteId;
use crate::stream::{StreamInfo, StreamLoader};

use super::Wall;

/// Outcome of one [`Wall::ensure_streams`] pass.
#[derive(Debug, Default)]
pub struct EnsureReport {
    /// Sites whose cache entry was filled by this pass.
    pub resolved: Vec<SiteId>,
    /// Sites whose loader call failed. Their entries stay absent.
    pub failed: Vec<(SiteId, LoadError)>,
}

impl EnsureReport {
    /// Nothing needed fetching.
    pub fn is_noop(&self) -> bool {
        self.resolved.is_empty() && self.failed.is_empty()
    }

    pub fn all_resolved(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Wall {
    /// Insert or overwrite the cache entry for `id`.
    pub fn set_stream_for(&mut self, id: SiteId, info: StreamInfo) {
        self.streams.insert(id, info);
    }

    /// Resolve every selected site that has no cache entry yet.
    ///
    /// Missing sites are resolved concurrently, one loader call per site.
    /// A failing call leaves only that site unresolved; it is retried on
    /// the next pass. A warm cache performs no calls at all.
    pub async fn ensure_streams<L>(&mut self, loader: &L) -> EnsureReport
    where
        L: StreamLoader + ?Sized,
    {
        let pending: Vec<_> = self
            .selected
            .iter()
            .filter(|site| !self.streams.contains_key(&site.id))
            .cloned()
            .collect();

        let mut report = EnsureReport::default();
        if pending.is_empty() {
            return report;
        }

        debug!(count = pending.len(), "resolving streams");
        let results = join_all(pending.iter().map(|site| loader.resolve(&site.id))).await;

        for (site, result) in pending.into_iter().zip(results) {
            match result {
                Ok(info) => {
                    let info = info.or_title(&site.display_name);
                    self.set_stream_for(site.id.clone(), info);
                    report.resolved.push(site.id);
                }
                Err(e) => {
                    warn!(site_id = %site.id, error = %e, "stream resolution failed");
                    report.failed.push((site.id, e));
                }
            }
        }
        report
    }
}
