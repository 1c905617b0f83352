//! Packed bit stream of concatenated codewords.

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::code::{Bits, Codeword};
use crate::error::{Error, Result};

/// Encoder output: a sequence of bits packed MSB-first into bytes.
///
/// The bit length is kept explicitly; padding in the last byte is never part
/// of the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedStream {
    bits: Bits,
}

impl EncodedStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Bits::with_capacity(bits),
        }
    }

    /// Append a codeword.
    pub fn push_codeword(&mut self, code: &Codeword) {
        self.bits.extend_from_bitslice(code.bits());
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the stream holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Iterate over the bits in stream order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Drop every bit after the first `len`.
    pub fn truncate(&mut self, len: usize) {
        self.bits.truncate(len);
    }

    /// The packed bytes. The last byte may carry padding past [`Self::len`].
    pub fn as_raw_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Split into packed bytes and bit length.
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        let len = self.bits.len();
        let mut bytes = self.bits.into_vec();
        // Zero the padding so equal streams always pack to equal bytes.
        let live = len % 8;
        if live != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - live);
            }
        }
        (bytes, len)
    }

    /// Rebuild a stream from packed bytes and a bit length.
    ///
    /// # Errors
    /// Returns [`Error::InvalidStream`] unless `bytes` holds exactly the
    /// `ceil(bit_len / 8)` bytes needed for `bit_len` bits.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        if bytes.len() != bit_len.div_ceil(8) {
            return Err(Error::InvalidStream {
                position: bit_len.min(bytes.len() * 8),
            });
        }
        let mut bits = Bits::from_vec(bytes);
        bits.truncate(bit_len);
        Ok(Self { bits })
    }

    /// Write the stream: `u64` bit length followed by the packed bytes.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        w.write_u64::<LittleEndian>(self.bits.len() as u64)?;
        let (bytes, _) = self.clone().into_parts();
        w.write_all(&bytes)?;
        Ok(())
    }

    /// Read a stream written by [`EncodedStream::write_to`].
    ///
    /// # Errors
    /// [`Error::Io`] if the reader ends before the bytes announced by the
    /// header. The header alone never decides how much memory is allocated.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self> {
        let bit_len = r.read_u64::<LittleEndian>()?;
        let byte_len = bit_len.div_ceil(8);
        let mut bytes = Vec::new();
        r.take(byte_len).read_to_end(&mut bytes)?;
        if bytes.len() as u64 != byte_len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        let bit_len = usize::try_from(bit_len).map_err(|_| Error::InvalidStream { position: 0 })?;
        Self::from_parts(bytes, bit_len)
    }
}

impl FromIterator<bool> for EncodedStream {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
