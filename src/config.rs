/// The page size. A single compile-time constant governs the page size for
/// the whole system; it is part of the on-disk format.
pub const PAGE_SIZE: usize = 4 * 1024;

/// Size of the slotted-page header: entry count (u16) and data start (u16).
pub const PAGE_HEADER_SIZE: usize = 4;

/// Size of one slot directory entry: record offset (u16) and record length
/// (u16).
pub const SLOT_SIZE: usize = 4;
