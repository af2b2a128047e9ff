use tracing::{info, warn};

use crate::{
    catalog::column::Column,
    config::{PAGE_HEADER_SIZE, PAGE_SIZE, SLOT_SIZE},
    error::{DbResult, Error},
    page::{slotted, PageId},
    pager::SharedPager,
    record::{self, Row},
};

/// Notifier invoked with the new page count right after the heap has grown
/// and the new page has been written.
pub type GrowthNotifier = Box<dyn FnMut(u32) -> DbResult<()>>;

/// An append-only sequence of records stored across the contiguous page
/// range `[first_page, first_page + page_count)` of a single file.
///
/// The heap never frees space, never compacts, never skips ids within its
/// range, and never writes outside it. Handing out non-overlapping ranges is
/// the catalog's job.
pub struct Heap {
    pager: SharedPager,
    first_page: PageId,
    page_count: u32,
    on_growth: Option<GrowthNotifier>,
}

impl Heap {
    /// Constructs an in-memory heap descriptor with no pages. The file is
    /// not touched.
    pub fn new(pager: SharedPager, first_page: PageId) -> Heap {
        Heap {
            pager,
            first_page,
            page_count: 0,
            on_growth: None,
        }
    }

    /// Replaces the in-memory page count. Used at open time to rehydrate a
    /// heap that already exists on disk.
    pub fn set_page_count(&mut self, page_count: u32) {
        self.page_count = page_count;
    }

    /// Registers a notifier invoked whenever a new page has been allocated
    /// and written.
    ///
    /// A notifier failure is surfaced to the caller of [`Heap::insert`], but
    /// the insert itself is not undone.
    pub fn set_growth_notifier(&mut self, notifier: GrowthNotifier) {
        self.on_growth = Some(notifier);
    }

    /// The first page id owned by this heap.
    pub fn first_page(&self) -> PageId {
        self.first_page
    }

    /// The number of pages currently owned by this heap.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Appends `record` to the heap.
    ///
    /// The record goes into the heap's last page when it fits; otherwise a
    /// fresh page is allocated at the end of the heap's range, written, and
    /// the growth notifier runs.
    pub fn insert(&mut self, record: &[u8]) -> DbResult<()> {
        if SLOT_SIZE + record.len() > PAGE_SIZE - PAGE_HEADER_SIZE {
            return Err(Error::RecordTooLarge(record.len()));
        }

        if self.page_count > 0 {
            let last = self.page_id(u64::from(self.page_count) - 1);
            let read = self.pager.borrow_mut().read_page(last);
            match read {
                Ok(mut page) => {
                    if slotted::try_append(&mut page[..], record) {
                        return self.pager.borrow_mut().write_page(last, &page[..]);
                    }
                }
                Err(error) => {
                    warn!(?last, %error, "failed to read last heap page; allocating a fresh one");
                }
            }
        }

        let id = self.page_id(u64::from(self.page_count));
        let mut page = Box::new([0_u8; PAGE_SIZE]);
        slotted::init(&mut page[..]);
        let appended = Self::insert_raw(&mut page[..], record);
        debug_assert!(appended, "record must fit in an empty page");

        self.pager.borrow_mut().write_page(id, &page[..])?;
        self.page_count += 1;
        info!(?id, page_count = self.page_count, "allocated heap page");

        if let Some(notify) = self.on_growth.as_mut() {
            notify(self.page_count)?;
        }
        Ok(())
    }

    /// Appends `record` into a caller-supplied page buffer, without any I/O.
    ///
    /// Returns false when the page cannot fit the record. The catalog uses
    /// this to append entries to page 0 without the heap owning that page.
    pub fn insert_raw(page: &mut [u8], record: &[u8]) -> bool {
        slotted::try_append(page, record)
    }

    /// Visits every record in the heap in page order then slot order,
    /// decoding each against `schema`.
    ///
    /// Iteration stops early when the visitor returns false. Pages within
    /// the range that lie past the end of the file read back zero-filled and
    /// so contribute no rows; actual read failures are surfaced.
    pub fn iterate<F>(&self, schema: &[Column], mut visitor: F) -> DbResult<()>
    where
        F: FnMut(Row) -> bool,
    {
        for number in 0..u64::from(self.page_count) {
            let page = self.pager.borrow_mut().read_page(self.page_id(number))?;
            for bytes in slotted::records(&page[..]) {
                let row = record::decode_row(bytes?, schema)?;
                if !visitor(row) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn page_id(&self, number: u64) -> PageId {
        PageId::new(self.first_page.get() + number)
    }
}
