use std::{
    cell::RefCell,
    fs::{File, OpenOptions},
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
    rc::Rc,
};

use tracing::{debug, info};

use crate::{
    config::PAGE_SIZE,
    error::DbResult,
    page::{PageBuf, PageId},
};

/// A shared handle to the pager.
///
/// The system is single-threaded and synchronous; each borrow spans exactly
/// one page operation.
pub type SharedPager = Rc<RefCell<Pager>>;

/// Fixed-size block I/O over a single backing file.
///
/// The pager knows nothing about records. It performs no caching: every read
/// allocates a fresh buffer and every write goes straight to the file.
pub struct Pager {
    file: File,
}

impl Pager {
    /// Opens the file at the provided path, creating it when absent, and
    /// constructs a new pager instance that wraps over it.
    ///
    /// The file is never truncated and its contents are not validated.
    pub fn open(path: &Path) -> DbResult<Pager> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        info!(?path, "opened database file");

        Ok(Pager { file })
    }

    /// Reads the page with the given id into a freshly allocated buffer.
    ///
    /// Bytes at or past the end of the file read as zeros; end-of-file is
    /// not an error.
    pub fn read_page(&mut self, id: PageId) -> DbResult<PageBuf> {
        debug!(?id, "reading page");
        let mut page: PageBuf = Box::new([0; PAGE_SIZE]);

        let size = self.file.metadata()?.len();
        let offset = id.offset();
        if offset < size {
            let available = (size - offset).min(PAGE_SIZE as u64) as usize;
            self.file.seek(SeekFrom::Start(offset))?;
            self.file.read_exact(&mut page[..available])?;
        }

        Ok(page)
    }

    /// Writes the contents of the provided buffer at the offset from the
    /// given page id, extending the file as needed.
    ///
    /// # Panics
    ///
    /// Panics if `page`'s length is different than [`PAGE_SIZE`].
    pub fn write_page(&mut self, id: PageId, page: &[u8]) -> DbResult<()> {
        debug!(?id, "writing page");
        assert_eq!(page.len(), PAGE_SIZE);

        self.file.seek(SeekFrom::Start(id.offset()))?;
        self.file.write_all(page)?;

        Ok(())
    }

    /// Returns the id of the page one past the last page physically present
    /// in the file.
    ///
    /// This reflects file size only; a heap may own ids at or beyond it
    /// whose pages have not been written yet.
    pub fn next_page_id(&self) -> DbResult<PageId> {
        let size = self.file.metadata()?.len();
        Ok(PageId::new(size / PAGE_SIZE as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_pager() -> (tempfile::TempDir, Pager) {
        let dir = tempfile::tempdir().unwrap();
        let pager = Pager::open(&dir.path().join("t.db")).unwrap();
        (dir, pager)
    }

    #[test]
    fn test_fresh_file_has_no_pages() {
        let (_dir, pager) = temp_pager();
        assert_eq!(pager.next_page_id().unwrap(), PageId::new(0));
    }

    #[test]
    fn test_read_past_eof_is_zero_filled() {
        let (_dir, mut pager) = temp_pager();
        let page = pager.read_page(PageId::new(7)).unwrap();
        assert!(page.iter().all(|byte| *byte == 0));
        // Reading did not extend the file.
        assert_eq!(pager.next_page_id().unwrap(), PageId::new(0));
    }

    #[test]
    fn test_write_extends_and_reads_back() {
        let (_dir, mut pager) = temp_pager();

        let mut page = Box::new([0_u8; PAGE_SIZE]);
        page[0] = 0xAB;
        page[PAGE_SIZE - 1] = 0xCD;

        pager.write_page(PageId::new(2), &page[..]).unwrap();
        assert_eq!(pager.next_page_id().unwrap(), PageId::new(3));

        let read = pager.read_page(PageId::new(2)).unwrap();
        assert_eq!(&read[..], &page[..]);

        // The hole before page 2 reads as zeros.
        let hole = pager.read_page(PageId::new(1)).unwrap();
        assert!(hole.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_next_page_id_is_monotonic_over_rewrites() {
        let (_dir, mut pager) = temp_pager();
        let page = Box::new([0_u8; PAGE_SIZE]);

        pager.write_page(PageId::new(4), &page[..]).unwrap();
        assert_eq!(pager.next_page_id().unwrap(), PageId::new(5));
        pager.write_page(PageId::new(0), &page[..]).unwrap();
        assert_eq!(pager.next_page_id().unwrap(), PageId::new(5));
    }
}
