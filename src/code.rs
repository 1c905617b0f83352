//! Codewords and code tables.
//!
//! A [`CodeTable`] maps each symbol to the root-to-leaf path of its leaf in
//! the code tree (`0` = left, `1` = right). Tables produced by [`generate`]
//! are prefix-free by construction; tables supplied from outside go through
//! [`CodeTable::from_codewords`], which checks the same invariants.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::io::{Read, Write};

use bitvec::prelude::*;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::CodeNode;

/// Bits of a codeword, first bit first.
pub type Bits = BitVec<u8, Msb0>;

/// The bit sequence assigned to one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Codeword {
    bits: Bits,
}

impl Codeword {
    /// Wrap a bit sequence.
    pub fn new(bits: Bits) -> Self {
        Self { bits }
    }

    /// Parse a codeword from `'0'`/`'1'` text. Returns `None` on any other
    /// character.
    pub fn parse(text: &str) -> Option<Self> {
        text.chars()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Bits>>()
            .map(Self::new)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the codeword has no bits. Never true for a valid table entry.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits of the codeword.
    pub fn bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Whether `self` is a prefix of `other` (equal codewords included).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(self.bits.as_bitslice())
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from symbol to codeword satisfying the prefix property.
#[derive(Debug, Clone)]
pub struct CodeTable<S> {
    entries: Vec<(S, Codeword)>,
    index: HashMap<S, usize>,
}

impl<S: PartialEq> PartialEq for CodeTable<S> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<S: Eq> Eq for CodeTable<S> {}

impl<S> CodeTable<S> {
    /// Number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (the table of an empty input).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(symbol, codeword)` pairs in tree order (left first).
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Codeword)> + '_ {
        self.entries.iter().map(|(s, c)| (s, c))
    }

    /// Length of the longest codeword, 0 for an empty table.
    pub fn max_len(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Whether no codeword is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Bits> = self.entries.iter().map(|(_, c)| &c.bits).collect();
        // In lexicographic order a prefix sorts right before the words that extend it.
        codes.sort_by(|a, b| a.iter().by_vals().cmp(b.iter().by_vals()));
        codes.windows(2).all(|w| !w[1].starts_with(w[0].as_bitslice()))
    }
}

impl<S: Eq + Hash + Clone> CodeTable<S> {
    fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a table from externally supplied codewords.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTable`] if a codeword is empty, a symbol
    /// appears twice, or one codeword is a prefix of another.
    pub fn from_codewords<I>(codewords: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Codeword)>,
    {
        let mut table = Self::empty();
        for (symbol, code) in codewords {
            if code.is_empty() {
                return Err(Error::InvalidTable("empty codeword"));
            }
            if table.index.contains_key(&symbol) {
                return Err(Error::InvalidTable("duplicate symbol"));
            }
            table.push(symbol, code);
        }
        if !table.is_prefix_free() {
            return Err(Error::InvalidTable("codeword is a prefix of another codeword"));
        }
        Ok(table)
    }

    fn push(&mut self, symbol: S, code: Codeword) {
        self.index.insert(symbol.clone(), self.entries.len());
        self.entries.push((symbol, code));
    }

    /// Codeword of `symbol`.
    pub fn get(&self, symbol: &S) -> Option<&Codeword> {
        self.index.get(symbol).map(|&i| &self.entries[i].1)
    }

    /// Exact number of bits needed to encode a sequence with these counts.
    ///
    /// Returns `None` if a counted symbol has no codeword.
    pub fn encoded_len(&self, freqs: &FrequencyTable<S>) -> Option<u64> {
        freqs
            .iter()
            .map(|(s, w)| self.get(s).map(|c| c.len() as u64 * w))
            .sum()
    }

    /// Expected codeword length in bits per symbol for these counts.
    pub fn average_len(&self, freqs: &FrequencyTable<S>) -> Option<f64> {
        let total = freqs.total();
        if total == 0 {
            return Some(0.0);
        }
        self.encoded_len(freqs).map(|bits| bits as f64 / total as f64)
    }
}

/// Assign a codeword to every leaf of `root`.
///
/// The sentinel leaf of a one-symbol tree gets no entry.
pub fn generate<S: Eq + Hash + Clone>(root: &CodeNode<S>) -> CodeTable<S> {
    let mut table = CodeTable::empty();
    let mut path = Bits::new();
    assign(root, &mut path, &mut table);
    table
}

fn assign<S: Eq + Hash + Clone>(node: &CodeNode<S>, path: &mut Bits, table: &mut CodeTable<S>) {
    match node {
        CodeNode::Leaf { symbol, .. } => {
            table.push(symbol.clone(), Codeword::new(path.clone()));
        }
        CodeNode::Sentinel => {}
        CodeNode::Internal { left, right, .. } => {
            path.push(false);
            assign(left, path, table);
            path.pop();

            path.push(true);
            assign(right, path, table);
            path.pop();
        }
    }
}

impl CodeTable<u8> {
    /// Write the table for out-of-band storage.
    ///
    /// Layout: `u16` entry count, then per entry the symbol, the codeword
    /// length in bits and the codeword packed MSB-first into whole bytes.
    ///
    /// # Errors
    /// [`Error::InvalidTable`] if a codeword is longer than 255 bits, in which
    /// case nothing is written.
    pub fn write_to<W: Write>(&self, mut w: W) -> Result<()> {
        let lens = self
            .entries
            .iter()
            .map(|(_, code)| u8::try_from(code.len()))
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|_| Error::InvalidTable("codeword longer than 255 bits"))?;
        w.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        for ((symbol, code), len) in self.entries.iter().zip(lens) {
            w.write_u8(*symbol)?;
            w.write_u8(len)?;
            w.write_all(code.bits.as_raw_slice())?;
        }
        Ok(())
    }

    /// Read a table written by [`CodeTable::write_to`].
    ///
    /// # Errors
    /// [`Error::Io`] on a short read, [`Error::InvalidTable`] if the decoded
    /// codewords do not form a valid prefix code.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self> {
        let count = r.read_u16::<LittleEndian>()?;
        if count > 256 {
            return Err(Error::InvalidTable("more than 256 byte symbols"));
        }
        let mut codewords = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let symbol = r.read_u8()?;
            let len = r.read_u8()? as usize;
            let mut raw = vec![0u8; len.div_ceil(8)];
            r.read_exact(&mut raw)?;
            let mut bits = Bits::from_vec(raw);
            bits.truncate(len);
            codewords.push((symbol, Codeword::new(bits)));
        }
        Self::from_codewords(codewords)
    }
}
