use filetime::FileTime;

use crate::snapshot::FileMetadata;

/// Verdict returned by [`compare`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Comparison {
    /// Size and whole-second modification time match; no write is needed.
    Identical,
    /// The destination must be rewritten.
    Differs,
}

impl Comparison {
    /// Returns `true` for [`Comparison::Differs`].
    #[must_use]
    pub const fn is_different(self) -> bool {
        matches!(self, Self::Differs)
    }
}

/// Truncates a timestamp to whole seconds since the Unix epoch.
///
/// Sub-second components are discarded. Timestamps before the epoch round
/// toward negative infinity.
#[must_use]
pub fn truncate_to_seconds(time: FileTime) -> i64 {
    time.unix_seconds()
}

/// Compares a source snapshot against the destination for the same relative
/// path.
#[must_use]
pub fn compare(source: &FileMetadata, destination: &FileMetadata) -> Comparison {
    if source.len() != destination.len() {
        return Comparison::Differs;
    }

    if truncate_to_seconds(source.modified()) == truncate_to_seconds(destination.modified()) {
        Comparison::Identical
    } else {
        Comparison::Differs
    }
}

/// Returns `true` when the destination must be created or overwritten.
#[must_use]
pub fn differs(source: &FileMetadata, destination: &FileMetadata) -> bool {
    compare(source, destination).is_different()
}
