//! The frozen catalog + spatial index pair.

use crate::builder::{BuildStats, CatalogBuilder};
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::error::Result;
use crate::record::RawPoiRecord;
use crate::spatial_index::SpatialIndex;

/// A catalog and the spatial index built over it.
///
/// The two are constructed together by [`CatalogBuilder`] and never change
/// afterward, so a `PoiIndex` can be shared between threads behind an `Arc`
/// and queried without any locking. Query methods live in
/// [`crate::query`].
#[derive(Debug, Clone)]
pub struct PoiIndex {
    catalog: Catalog,
    spatial: SpatialIndex,
    config: Config,
    stats: BuildStats,
}

impl PoiIndex {
    pub(crate) fn new(
        catalog: Catalog,
        spatial: SpatialIndex,
        config: Config,
        stats: BuildStats,
    ) -> Self {
        debug_assert_eq!(catalog.len(), spatial.len());
        Self {
            catalog,
            spatial,
            config,
            stats,
        }
    }

    /// Build with the default configuration.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawPoiRecord>,
    {
        CatalogBuilder::new().build(records)
    }

    /// An index with no entries.
    pub fn empty(config: Config) -> Self {
        Self::new(
            Catalog::default(),
            SpatialIndex::empty(),
            config,
            BuildStats::default(),
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.spatial
    }

    /// The configuration the index was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Identifier-keyed lookup.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.catalog.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = PoiIndex::empty(Config::default());
        assert!(index.is_empty());
        assert!(index.spatial_index().is_empty());
        assert_eq!(index.stats(), &BuildStats::default());
    }

    #[test]
    fn test_parts_have_matching_sizes() {
        let index = PoiIndex::build((0..25).map(|i| {
            RawPoiRecord::new(i as f64 * 0.01, 51.0)
                .with_id(i.to_string())
                .with_name(format!("Cafe {i}"))
                .with_tag("amenity", "cafe")
        }))
        .unwrap();
        assert_eq!(index.catalog().len(), 25);
        assert_eq!(index.spatial_index().len(), 25);
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PoiIndex>();
    }
}
