//! The system catalog: a slotted page at page 0 holding one record per user
//! table.
//!
//! The catalog reuses the slotted-page format as a heap of exactly one page.
//! It never grows past page 0; running out of room there is a hard error.

use fixbuf::Buff;
use tracing::info;

use crate::{
    catalog::entry::TableEntry,
    config::PAGE_SIZE,
    error::{DbResult, Error},
    heap::Heap,
    page::{slotted, PageId},
    pager::SharedPager,
    util::io::Serde,
};

pub mod column;
pub mod entry;
pub mod table_schema;
pub mod ty;

/// Reader and writer for the catalog page.
pub struct Catalog {
    pager: SharedPager,
}

impl Catalog {
    /// Constructs a new catalog over the given pager.
    pub fn new(pager: SharedPager) -> Catalog {
        Catalog { pager }
    }

    /// Writes an initialized, empty catalog page if the file has no pages
    /// yet.
    ///
    /// A fresh file is indistinguishable from one whose page 0 is all zeros,
    /// and a zeroed header has `data_start = 0`; appending to such a page
    /// would write at offset 0 and clobber the header. The header must be
    /// set before the first append.
    pub fn init_if_empty(&self) -> DbResult<()> {
        let mut pager = self.pager.borrow_mut();
        if pager.next_page_id()?.get() == 0 {
            info!("first access; initializing catalog page");
            let mut page = Box::new([0_u8; PAGE_SIZE]);
            slotted::init(&mut page[..]);
            pager.write_page(PageId::ZERO, &page[..])?;
        }
        Ok(())
    }

    /// Returns all catalog entries, in insertion order.
    pub fn load(&self) -> DbResult<Vec<TableEntry>> {
        let page = self.pager.borrow_mut().read_page(PageId::ZERO)?;

        let mut entries = Vec::with_capacity(slotted::entry_count(&page[..]) as usize);
        for record in slotted::records(&page[..]) {
            entries.push(decode_entry(record?)?);
        }
        Ok(entries)
    }

    /// Appends a new catalog entry to page 0.
    pub fn append(&self, entry: &TableEntry) -> DbResult<()> {
        let mut pager = self.pager.borrow_mut();
        let mut page = pager.read_page(PageId::ZERO)?;

        let record = encode_entry(entry)?;
        if !Heap::insert_raw(&mut page[..], &record) {
            return Err(Error::CatalogFull);
        }
        pager.write_page(PageId::ZERO, &page[..])
    }

    /// Rewrites the entry for `name` with a new page count, in place.
    ///
    /// Only `page_count` changes, a fixed-width field, so the new encoding
    /// must be exactly as long as the stored one.
    pub fn update_page_count(&self, name: &str, page_count: u32) -> DbResult<()> {
        let mut pager = self.pager.borrow_mut();
        let mut page = pager.read_page(PageId::ZERO)?;

        for index in 0..slotted::entry_count(&page[..]) {
            let slot = slotted::slot(&page[..], index);
            let mut entry = decode_entry(slotted::record(&page[..], slot)?)?;
            if entry.name != name {
                continue;
            }

            entry.page_count = page_count;
            let encoded = encode_entry(&entry)?;
            if encoded.len() != slot.len as usize {
                return Err(Error::CorruptedEntry("length changed on page count update"));
            }

            let lo = slot.offset as usize;
            page[lo..lo + encoded.len()].copy_from_slice(&encoded);
            info!(name, page_count, "updated catalog entry");
            return pager.write_page(PageId::ZERO, &page[..]);
        }

        Err(Error::TableNotFound(name.to_owned()))
    }

    /// Computes the first page id for a new heap: one past the furthest page
    /// reserved by any existing table, and never page 0.
    pub fn next_start_page(entries: &[TableEntry]) -> PageId {
        let max_end = entries.iter().map(TableEntry::end_page).max().unwrap_or(0);
        PageId::new(max_end.max(1))
    }
}

fn encode_entry(entry: &TableEntry) -> DbResult<Vec<u8>> {
    let mut data = vec![0; entry.size() as usize];
    let mut buf = Buff::new(&mut data);
    entry.serialize(&mut buf)?;
    debug_assert_eq!(buf.remaining(), 0);
    Ok(data)
}

fn decode_entry(record: &[u8]) -> DbResult<TableEntry> {
    let mut data = record.to_vec();
    let mut buf = Buff::new(&mut data);
    TableEntry::deserialize(&mut buf)
}
