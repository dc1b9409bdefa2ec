//! Catalog construction.
//!
//! [`CatalogBuilder`] turns a sequence of [`RawPoiRecord`]s into a frozen
//! [`PoiIndex`]. For each record, in input order:
//!
//! 1. decode the tag mapping (an undecodable mapping counts as no tags);
//! 2. take the display name from the record and the category from `amenity`;
//! 3. drop it when the name is blank or the category is missing, unknown or
//!    not accepted by the [`Config`];
//! 4. drop it when its position cannot be projected;
//! 5. drop it when its identifier was already taken by an earlier surviving
//!    record. The identifier is the `fhrs:id` tag, or the record's own id
//!    when that tag is absent or blank.
//!
//! Bad records are never an error; they only show up in [`BuildStats`]. The
//! spatial index is bulk-built over the survivors once the input is drained.

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::error::{ForageError, Result, SourceError};
use crate::index::PoiIndex;
use crate::projection;
use crate::record::{AMENITY_TAG, FHRS_ID_TAG, RawPoiRecord, RawTags, Tags};
use crate::source::RecordSource;
use crate::spatial_index::SpatialIndex;
use forage_types::category::Category;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::time::Instant;

/// Outcome counters for one catalog build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records read from the input.
    pub records_seen: usize,
    /// Records that became catalog entries.
    pub accepted: usize,
    /// Records whose tag mapping could not be decoded. These are still
    /// processed, as records without tags.
    pub malformed_tags: usize,
    pub missing_name: usize,
    pub missing_category: usize,
    /// `amenity` present but not one of the known categories.
    pub unsupported_category: usize,
    /// Known category that the configuration does not accept.
    pub excluded_category: usize,
    pub invalid_position: usize,
    pub missing_id: usize,
    pub duplicate_id: usize,
}

impl BuildStats {
    /// Records dropped for any reason.
    pub fn rejected(&self) -> usize {
        self.missing_name
            + self.missing_category
            + self.unsupported_category
            + self.excluded_category
            + self.invalid_position
            + self.missing_id
            + self.duplicate_id
    }
}

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingName,
    MissingCategory,
    UnsupportedCategory,
    ExcludedCategory,
    InvalidPosition,
    MissingId,
    DuplicateId,
}

/// Builder for a [`PoiIndex`].
///
/// ```
/// use forage::{CatalogBuilder, RawPoiRecord};
///
/// let index = CatalogBuilder::new()
///     .build(vec![
///         RawPoiRecord::new(-0.35, 51.56)
///             .with_id("1")
///             .with_name("Pizza Palace")
///             .with_tag("amenity", "restaurant"),
///     ])?;
/// assert_eq!(index.len(), 1);
/// # Ok::<(), forage::ForageError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    config: Config,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build from an in-memory sequence. Fails only on invalid configuration.
    pub fn build<I>(self, records: I) -> Result<PoiIndex>
    where
        I: IntoIterator<Item = RawPoiRecord>,
    {
        self.try_build(records.into_iter().map(Ok::<_, SourceError>))
    }

    /// Build from a fallible sequence. The first `Err` aborts the build with
    /// [`ForageError::Source`]; nothing partially built escapes.
    pub fn try_build<I, E>(self, records: I) -> Result<PoiIndex>
    where
        I: IntoIterator<Item = std::result::Result<RawPoiRecord, E>>,
        E: Into<SourceError>,
    {
        self.config.validate()?;

        let started = Instant::now();
        let mut pipeline = Pipeline::new(&self.config);
        for record in records {
            let record = record.map_err(ForageError::from_source)?;
            pipeline.push(record);
        }
        let (catalog, stats) = pipeline.finish();
        let spatial = SpatialIndex::build(
            catalog
                .entries()
                .iter()
                .enumerate()
                .map(|(slot, entry)| (slot, entry.metric_position())),
        );

        log::info!(
            "Built POI catalog: {} entries from {} records ({} rejected) in {:?}",
            stats.accepted,
            stats.records_seen,
            stats.rejected(),
            started.elapsed()
        );
        log::debug!("Catalog build stats: {:?}", stats);

        Ok(PoiIndex::new(catalog, spatial, self.config, stats))
    }

    /// Read every record from `source` and build from them.
    pub fn build_from<S>(self, source: &S) -> Result<PoiIndex>
    where
        S: RecordSource + ?Sized,
    {
        let records = source.read_records().map_err(ForageError::Source)?;
        self.build(records)
    }
}

/// Filter and dedup state for a single build.
struct Pipeline<'a> {
    config: &'a Config,
    seen_ids: FxHashSet<String>,
    entries: Vec<CatalogEntry>,
    stats: BuildStats,
}

impl<'a> Pipeline<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            seen_ids: FxHashSet::default(),
            entries: Vec::new(),
            stats: BuildStats::default(),
        }
    }

    fn push(&mut self, record: RawPoiRecord) {
        self.stats.records_seen += 1;
        match self.admit(record) {
            Ok(entry) => {
                self.stats.accepted += 1;
                self.entries.push(entry);
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    fn admit(&mut self, record: RawPoiRecord) -> std::result::Result<CatalogEntry, Rejection> {
        let RawPoiRecord {
            id,
            name,
            tags,
            position,
        } = record;

        let had_tags = !matches!(tags, RawTags::Absent);
        let tags = match tags.into_tags() {
            Some(tags) => tags,
            None => {
                if had_tags {
                    self.stats.malformed_tags += 1;
                }
                Tags::new()
            }
        };

        let name = name
            .filter(|name| !name.trim().is_empty())
            .ok_or(Rejection::MissingName)?;

        let category = self.category(&tags)?;

        if !projection::is_projectable(position) {
            return Err(Rejection::InvalidPosition);
        }

        let id = tags
            .get(FHRS_ID_TAG)
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .or_else(|| id.filter(|id| !id.trim().is_empty()))
            .ok_or(Rejection::MissingId)?;

        if self.seen_ids.contains(&id) {
            log::trace!("Dropping duplicate POI id {}", id);
            return Err(Rejection::DuplicateId);
        }
        self.seen_ids.insert(id.clone());

        Ok(CatalogEntry::new(id, name, category, position, tags))
    }

    fn category(&self, tags: &Tags) -> std::result::Result<Category, Rejection> {
        let value = tags.get(AMENITY_TAG).ok_or(Rejection::MissingCategory)?;
        let category: Category = value
            .parse()
            .map_err(|_| Rejection::UnsupportedCategory)?;
        if !self.config.accepts(category) {
            return Err(Rejection::ExcludedCategory);
        }
        Ok(category)
    }

    fn reject(&mut self, rejection: Rejection) {
        let counter = match rejection {
            Rejection::MissingName => &mut self.stats.missing_name,
            Rejection::MissingCategory => &mut self.stats.missing_category,
            Rejection::UnsupportedCategory => &mut self.stats.unsupported_category,
            Rejection::ExcludedCategory => &mut self.stats.excluded_category,
            Rejection::InvalidPosition => &mut self.stats.invalid_position,
            Rejection::MissingId => &mut self.stats.missing_id,
            Rejection::DuplicateId => &mut self.stats.duplicate_id,
        };
        *counter += 1;
    }

    fn finish(self) -> (Catalog, BuildStats) {
        (Catalog::from_unique(self.entries), self.stats)
    }
}
