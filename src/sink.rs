//! Output side of the engine.
//!
//! A [`Formatter`] receives the bytes a conversion produces. Every method
//! may fail (a full buffer, a closed console); the failure travels back
//! through the dispatchers and the scanner to the caller untouched.

use crate::error::FormatError;

/// Destination for formatted output.
pub trait Formatter {
    type Error;

    fn append(&mut self, byte: u8) -> Result<(), Self::Error>;

    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.append(byte)?;
        }
        Ok(())
    }

    fn append_str(&mut self, text: &str) -> Result<(), Self::Error> {
        self.append_bytes(text.as_bytes())
    }

    /// Appends one wide character, UTF-8 encoded. Invalid code points
    /// become U+FFFD.
    fn append_wide(&mut self, unit: u32) -> Result<(), Self::Error> {
        let ch = char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER);
        let mut encoded = [0u8; 4];
        self.append_str(ch.encode_utf8(&mut encoded))
    }

    fn pad(&mut self, byte: u8, count: usize) -> Result<(), Self::Error> {
        for _ in 0..count {
            self.append(byte)?;
        }
        Ok(())
    }
}

impl<F: Formatter + ?Sized> Formatter for &mut F {
    type Error = F::Error;

    fn append(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).append(byte)
    }

    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).append_bytes(bytes)
    }

    fn append_wide(&mut self, unit: u32) -> Result<(), Self::Error> {
        (**self).append_wide(unit)
    }

    fn pad(&mut self, byte: u8, count: usize) -> Result<(), Self::Error> {
        (**self).pad(byte, count)
    }
}

// ============================================================================
// Bounded Buffers
// ============================================================================

/// Writes into a borrowed byte slice and fails once it is full.
///
/// Bytes that fit before the failure stay in the buffer.
#[derive(Debug)]
pub struct SliceFormatter<'b> {
    buf: &'b mut [u8],
    len: usize,
}

impl<'b> SliceFormatter<'b> {
    pub fn new(buf: &'b mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    fn full(&self) -> FormatError {
        FormatError::BufferFull {
            capacity: self.buf.len(),
        }
    }
}

impl Formatter for SliceFormatter<'_> {
    type Error = FormatError;

    fn append(&mut self, byte: u8) -> Result<(), FormatError> {
        if self.len == self.buf.len() {
            return Err(self.full());
        }
        self.buf[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        let room = self.buf.len() - self.len;
        let fit = bytes.len().min(room);
        self.buf[self.len..self.len + fit].copy_from_slice(&bytes[..fit]);
        self.len += fit;
        if fit < bytes.len() {
            return Err(self.full());
        }
        Ok(())
    }
}

impl<const N: usize> Formatter for heapless::Vec<u8, N> {
    type Error = FormatError;

    fn append(&mut self, byte: u8) -> Result<(), FormatError> {
        self.push(byte)
            .map_err(|_| FormatError::BufferFull { capacity: N })
    }

    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        let room = N - self.len();
        let fit = bytes.len().min(room);
        // Cannot fail: `fit` never exceeds the remaining room.
        let _ = self.extend_from_slice(&bytes[..fit]);
        if fit < bytes.len() {
            return Err(FormatError::BufferFull { capacity: N });
        }
        Ok(())
    }
}

#[cfg(feature = "alloc")]
impl Formatter for alloc::vec::Vec<u8> {
    type Error = core::convert::Infallible;

    fn append(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte);
        Ok(())
    }

    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// core::fmt Bridge
// ============================================================================

/// Forwards output to any [`core::fmt::Write`], such as a serial console.
///
/// Byte runs that are not valid UTF-8 are written with U+FFFD in place of
/// each invalid sequence.
#[derive(Debug)]
pub struct FmtWriteFormatter<W> {
    inner: W,
}

impl<W: core::fmt::Write> FmtWriteFormatter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: core::fmt::Write> Formatter for FmtWriteFormatter<W> {
    type Error = FormatError;

    fn append(&mut self, byte: u8) -> Result<(), FormatError> {
        self.append_bytes(&[byte])
    }

    fn append_bytes(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        for chunk in bytes.utf8_chunks() {
            self.inner.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                self.inner.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }

    fn append_str(&mut self, text: &str) -> Result<(), FormatError> {
        Ok(self.inner.write_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_formatter_keeps_prefix_on_overflow() {
        let mut buf = [0u8; 4];
        let mut out = SliceFormatter::new(&mut buf);
        assert_eq!(out.append_str("abc"), Ok(()));
        assert_eq!(
            out.append_str("def"),
            Err(FormatError::BufferFull { capacity: 4 })
        );
        assert_eq!(out.written(), b"abcd");
        assert_eq!(out.append(b'x'), Err(FormatError::BufferFull { capacity: 4 }));
    }

    #[test]
    fn test_heapless_vec_formatter() {
        let mut out: heapless::Vec<u8, 3> = heapless::Vec::new();
        out.append_bytes(b"ab").unwrap();
        out.pad(b' ', 1).unwrap();
        assert_eq!(out.as_slice(), b"ab ");
        assert!(out.append(b'!').is_err());
    }

    #[test]
    fn test_wide_units_are_utf8_encoded() {
        let mut out: heapless::Vec<u8, 8> = heapless::Vec::new();
        out.append_wide(u32::from('é')).unwrap();
        out.append_wide(0xD800).unwrap();
        assert_eq!(out.as_slice(), "é\u{FFFD}".as_bytes());
    }

    #[test]
    fn test_fmt_write_bridge_replaces_invalid_bytes() {
        let mut out = FmtWriteFormatter::new(String::new());
        out.append_bytes(b"ok\xff!").unwrap();
        out.append_str(" done").unwrap();
        assert_eq!(out.into_inner(), "ok\u{FFFD}! done");
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_alloc_vec_formatter() {
        let mut out: alloc::vec::Vec<u8> = alloc::vec::Vec::new();
        out.append_str("ab").unwrap();
        out.pad(b'.', 2).unwrap();
        out.append_wide(0x263A).unwrap();
        assert_eq!(out, "ab..\u{263A}".as_bytes());
    }
}
