use std::fmt;

mod impls;

/// Represents a type with a fixed-width little-endian byte representation.
pub trait AsBytes: Sized {
    /// The serialized representation.
    type Repr;

    /// Serializes the type to its byte representation.
    fn serialize(&self) -> Self::Repr;

    /// Deserializes the byte representation to its corresponding type.
    fn deserialize(src: Self::Repr) -> Self;
}

/// A cursor over a fixed-size buffer.
///
/// # Panics
///
/// All read and write methods panic if there is not enough capacity.
pub struct Buff<'a> {
    inner: &'a mut [u8],
    pos: usize,
}

impl<'a> Buff<'a> {
    /// Creates a new fixed-size buffer cursor positioned at the start.
    pub fn new(inner: &'a mut [u8]) -> Buff<'a> {
        Buff { inner, pos: 0 }
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.inner.len()
    }

    /// Returns the remaining bytes after the current position.
    pub fn remaining(&self) -> usize {
        self.capacity() - self.pos()
    }

    /// Returns the current cursor position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to the given absolute position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` exceeds the buffer capacity.
    pub fn seek(&mut self, pos: usize) {
        assert!(pos <= self.capacity(), "seek past buffer end");
        self.pos = pos;
    }

    /// Returns a view over the bytes up to the current position.
    pub fn get(&self) -> &[u8] {
        &self.inner[..self.pos]
    }

    /// Reads the type represented by [`AsBytes`].
    pub fn read<const S: usize, T>(&mut self) -> T
    where
        T: AsBytes<Repr = [u8; S]>,
    {
        let mut buf = [0; S];
        self.read_slice(&mut buf);
        T::deserialize(buf)
    }

    /// Reads exactly the amount of bytes necessary to fill the given slice.
    pub fn read_slice(&mut self, dest: &mut [u8]) {
        dest.copy_from_slice(self.slice_to(dest.len()));
    }

    /// Writes the type represented by [`AsBytes`].
    pub fn write<T>(&mut self, src: T)
    where
        T: AsBytes,
        T::Repr: AsRef<[u8]>,
    {
        let data = src.serialize();
        self.write_slice(data.as_ref());
    }

    /// Writes the byte sequence into the buffer, starting at the current
    /// position.
    pub fn write_slice(&mut self, src: &[u8]) {
        self.slice_to(src.len()).copy_from_slice(src);
    }

    /// Creates a scope in which exactly `count` bytes must be advanced (by
    /// reads or writes). This method shall be used as a sanity check scope.
    ///
    /// # Panics
    ///
    /// Panics if the scope didn't advance `count` bytes.
    pub fn scoped_exact<F>(&mut self, count: usize, scope: F)
    where
        F: FnOnce(&mut Self),
    {
        let start = self.pos;
        scope(self);
        assert_eq!(self.pos - start, count);
    }
}

// Private utilities.
impl Buff<'_> {
    /// Attempts to get the slice with length `count` starting at the current
    /// position. Asserts that the current buffer has enough capacity to fit
    /// `count` more bytes.
    ///
    /// This method also advances `self.pos` by `count`.
    #[inline(always)]
    fn slice_to(&mut self, count: usize) -> &mut [u8] {
        let lo = self.pos;
        let hi = lo + count;
        if hi > self.capacity() {
            panic!("not enough capacity for {count} more bytes");
        }
        self.pos = hi;
        &mut self.inner[lo..hi]
    }
}

impl fmt::Debug for Buff<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buff")
            .field("pos", &self.pos())
            .field("remaining", &self.remaining())
            .field("capacity", &self.capacity())
            .field("inner", &"<bytes>")
            .finish()
    }
}
