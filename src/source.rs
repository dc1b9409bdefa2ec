//! The extract-reader seam.
//!
//! How raw records are produced (file parsing, a database read, a network
//! fetch) is outside the index. A [`RecordSource`] only has to hand over the
//! complete record sequence, or report that it could not.

use crate::error::SourceError;
use crate::record::RawPoiRecord;

/// Supplies the full raw record sequence for one catalog build.
pub trait RecordSource {
    /// Read every record. An `Err` means the source as a whole is unreadable;
    /// individual bad records are returned as-is and filtered by the builder.
    fn read_records(&self) -> Result<Vec<RawPoiRecord>, SourceError>;
}

impl RecordSource for Vec<RawPoiRecord> {
    fn read_records(&self) -> Result<Vec<RawPoiRecord>, SourceError> {
        Ok(self.clone())
    }
}

impl RecordSource for [RawPoiRecord] {
    fn read_records(&self) -> Result<Vec<RawPoiRecord>, SourceError> {
        Ok(self.to_vec())
    }
}

/// A [`RecordSource`] backed by a closure. Created with [`from_fn`].
#[derive(Debug, Clone)]
pub struct FnSource<F> {
    read: F,
}

/// Wrap a closure as a record source.
///
/// ```
/// use forage::source::{from_fn, RecordSource};
/// use forage::RawPoiRecord;
///
/// let source = from_fn(|| Ok::<_, std::io::Error>(vec![RawPoiRecord::new(0.0, 0.0)]));
/// assert_eq!(source.read_records().unwrap().len(), 1);
/// ```
pub fn from_fn<F, E>(read: F) -> FnSource<F>
where
    F: Fn() -> Result<Vec<RawPoiRecord>, E>,
    E: Into<SourceError>,
{
    FnSource { read }
}

impl<F, E> RecordSource for FnSource<F>
where
    F: Fn() -> Result<Vec<RawPoiRecord>, E>,
    E: Into<SourceError>,
{
    fn read_records(&self) -> Result<Vec<RawPoiRecord>, SourceError> {
        (self.read)().map_err(Into::into)
    }
}
