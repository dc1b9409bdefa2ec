//! Reloadable handle to the current index.
//!
//! [`SharedIndex`] holds the serving [`PoiIndex`] behind an
//! `Arc<RwLock<Arc<PoiIndex>>>`. The lock only guards the pointer: readers
//! take a `parking_lot` read lock long enough to clone the inner `Arc`, then
//! query their snapshot with no lock held. Reads are therefore not strictly
//! lock-free. [`SharedIndex::snapshot`] briefly contends with a swap, and
//! everything after it runs on an immutable index with no synchronisation. A reload builds the replacement index first, with no
//! lock held, and then swaps the pointer under a brief write lock.
//!
//! Consequences:
//!
//! - no reader ever sees a partially built index;
//! - queries already running keep using the snapshot they started with;
//! - a failed reload leaves the current index in service untouched.
//!
//! # Examples
//!
//! ```rust
//! use forage::{PoiIndex, RawPoiRecord, SharedIndex};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let shared = SharedIndex::new(PoiIndex::build(Vec::new())?);
//!
//! let reader = shared.clone();
//! let handle = thread::spawn(move || {
//!     let snapshot = reader.snapshot();
//!     snapshot.find_nearby(-0.35, 51.56, 500.0).map(|hits| hits.len())
//! });
//!
//! shared.reload(vec![
//!     RawPoiRecord::new(-0.35, 51.56)
//!         .with_id("1")
//!         .with_name("Pizza Palace")
//!         .with_tag("amenity", "restaurant"),
//! ])?;
//!
//! let seen = handle.join().unwrap()?;
//! assert!(seen == 0 || seen == 1);
//! assert_eq!(shared.snapshot().len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::builder::{BuildStats, CatalogBuilder};
use crate::config::Config;
use crate::error::Result;
use crate::index::PoiIndex;
use crate::record::RawPoiRecord;
use crate::source::RecordSource;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

#[derive(Debug)]
struct Slot {
    index: Arc<PoiIndex>,
    generation: u64,
}

/// Thread-safe, atomically swappable handle to the serving index.
///
/// Clones share the same slot, so a reload through any clone is observed by
/// all of them.
#[derive(Debug, Clone)]
pub struct SharedIndex {
    slot: Arc<RwLock<Slot>>,
    /// Serialises reloads so generations are assigned in swap order.
    reload_lock: Arc<Mutex<()>>,
}

impl SharedIndex {
    /// Start serving `index` as generation 0.
    pub fn new(index: PoiIndex) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot {
                index: Arc::new(index),
                generation: 0,
            })),
            reload_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Start with an empty index.
    pub fn empty(config: Config) -> Self {
        Self::new(PoiIndex::empty(config))
    }

    /// The index currently being served.
    pub fn snapshot(&self) -> Arc<PoiIndex> {
        Arc::clone(&self.slot.read().index)
    }

    /// Number of successful swaps since construction.
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Rebuild from `records` with the serving index's configuration and swap
    /// the result in.
    pub fn reload<I>(&self, records: I) -> Result<BuildStats>
    where
        I: IntoIterator<Item = RawPoiRecord>,
    {
        let _guard = self.reload_lock.lock();
        let config = self.snapshot().config().clone();
        self.commit(CatalogBuilder::new().config(config).build(records))
    }

    /// Rebuild from `source`. When the source cannot be read the error is
    /// returned and the serving index is left in place.
    pub fn reload_from<S>(&self, source: &S) -> Result<BuildStats>
    where
        S: RecordSource + ?Sized,
    {
        self.reload_with(source, None)
    }

    /// Rebuild from `source` under a new configuration.
    pub fn reload_with_config<S>(&self, source: &S, config: Config) -> Result<BuildStats>
    where
        S: RecordSource + ?Sized,
    {
        self.reload_with(source, Some(config))
    }

    /// Serve an index built elsewhere. Returns the index it replaced.
    pub fn replace(&self, index: PoiIndex) -> Arc<PoiIndex> {
        let _guard = self.reload_lock.lock();
        let mut slot = self.slot.write();
        slot.generation += 1;
        std::mem::replace(&mut slot.index, Arc::new(index))
    }

    fn reload_with<S>(&self, source: &S, config: Option<Config>) -> Result<BuildStats>
    where
        S: RecordSource + ?Sized,
    {
        let _guard = self.reload_lock.lock();
        let config = config.unwrap_or_else(|| self.snapshot().config().clone());
        self.commit(CatalogBuilder::new().config(config).build_from(source))
    }

    /// Swap in a successful build, or log the failure and keep serving.
    /// Caller holds `reload_lock`.
    fn commit(&self, built: Result<PoiIndex>) -> Result<BuildStats> {
        match built {
            Ok(index) => Ok(self.swap(index)),
            Err(e) => {
                log::error!(
                    "POI index reload failed, keeping generation {}: {}",
                    self.generation(),
                    e
                );
                Err(e)
            }
        }
    }

    /// Caller holds `reload_lock`.
    fn swap(&self, index: PoiIndex) -> BuildStats {
        let stats = *index.stats();
        let index = Arc::new(index);
        let mut slot = self.slot.write();
        slot.index = index;
        slot.generation += 1;
        log::info!(
            "Swapped in POI index generation {} ({} entries)",
            slot.generation,
            stats.accepted
        );
        stats
    }
}
