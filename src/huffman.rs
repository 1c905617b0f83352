//! Huffman encoder and decoder.
//!
//! Encoding is a lookup per symbol followed by a bit append; the encoder never
//! touches the tree.
//!
//! The decoder walks a binary decode tree one bit at a time. It emits a symbol
//! whenever it reaches a leaf and then restarts at the root; since no codeword
//! is a prefix of another, the first leaf reached is the only possible match.
//! The tree is rebuilt from the code table (or converted from a [`CodeNode`]),
//! so a decoder never needs the frequencies that produced the code.

use std::hash::Hash;

use log::debug;

use crate::code::{generate, CodeTable};
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::stream::EncodedStream;
use crate::tree::{build, CodeNode};

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder<S> {
    table: CodeTable<S>,
}

impl<S: Eq + Hash + Clone> HuffmanEncoder<S> {
    /// Create an encoder for an existing code table.
    pub fn new(table: CodeTable<S>) -> Self {
        Self { table }
    }

    /// Create an encoder from symbol frequencies.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInput`] if `freqs` is empty.
    pub fn from_frequencies(freqs: &FrequencyTable<S>) -> Result<Self> {
        Ok(Self::new(generate(&build(freqs)?)))
    }

    /// The code table in use.
    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    /// Give back the code table.
    pub fn into_table(self) -> CodeTable<S> {
        self.table
    }

    /// Encode a symbol sequence into a bit stream.
    ///
    /// # Errors
    /// Returns [`Error::UnknownSymbol`] with the index of the first symbol
    /// that has no codeword. No stream is produced in that case.
    pub fn encode(&self, data: &[S]) -> Result<EncodedStream> {
        encode(data, &self.table)
    }
}

/// Child slot of a decode tree node.
#[derive(Debug, Clone)]
enum Link<S> {
    /// No codeword continues this way.
    Vacant,
    /// Index of the next internal node.
    Branch(usize),
    /// A complete codeword.
    Symbol(S),
}

/// Huffman decoder.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder<S> {
    /// Internal nodes as `[bit 0, bit 1]` children; index 0 is the root.
    nodes: Vec<[Link<S>; 2]>,
}

impl<S: Clone> HuffmanDecoder<S> {
    /// Create a decoder for a code table.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTable`] if the table is not a prefix code.
    pub fn new(table: &CodeTable<S>) -> Result<Self> {
        let mut nodes = vec![[Link::Vacant, Link::Vacant]];
        for (symbol, code) in table.iter() {
            let Some((last, path)) = code.bits().split_last() else {
                return Err(Error::InvalidTable("empty codeword"));
            };
            let mut at = 0;
            for bit in path.iter().by_vals() {
                let next = match &nodes[at][bit as usize] {
                    Link::Branch(next) => Some(*next),
                    Link::Vacant => None,
                    Link::Symbol(_) => {
                        return Err(Error::InvalidTable("codeword is a prefix of another codeword"))
                    }
                };
                at = match next {
                    Some(next) => next,
                    None => {
                        nodes.push([Link::Vacant, Link::Vacant]);
                        let next = nodes.len() - 1;
                        nodes[at][bit as usize] = Link::Branch(next);
                        next
                    }
                };
            }
            let slot = &mut nodes[at][*last as usize];
            if !matches!(slot, Link::Vacant) {
                return Err(Error::InvalidTable("codeword is a prefix of another codeword"));
            }
            *slot = Link::Symbol(symbol.clone());
        }
        debug!(
            "prepared decoder: {} symbols, {} internal nodes",
            table.len(),
            nodes.len()
        );
        Ok(Self { nodes })
    }

    /// Create a decoder that walks a code tree directly.
    pub fn from_tree(root: &CodeNode<S>) -> Self {
        let mut nodes = vec![[Link::Vacant, Link::Vacant]];
        if let CodeNode::Internal { left, right, .. } = root {
            let children = [
                Self::link(left, &mut nodes),
                Self::link(right, &mut nodes),
            ];
            nodes[0] = children;
        }
        Self { nodes }
    }

    fn link(node: &CodeNode<S>, nodes: &mut Vec<[Link<S>; 2]>) -> Link<S> {
        match node {
            CodeNode::Leaf { symbol, .. } => Link::Symbol(symbol.clone()),
            CodeNode::Sentinel => Link::Vacant,
            CodeNode::Internal { left, right, .. } => {
                let at = nodes.len();
                nodes.push([Link::Vacant, Link::Vacant]);
                let children = [Self::link(left, nodes), Self::link(right, nodes)];
                nodes[at] = children;
                Link::Branch(at)
            }
        }
    }

    /// Decode a bit stream into a symbol sequence.
    ///
    /// # Errors
    /// Returns [`Error::InvalidStream`] if a bit leads to no codeword or the
    /// stream ends in the middle of a codeword. `position` is the bit offset
    /// where the unmatched codeword starts.
    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<S>> {
        let mut out = Vec::new();
        let mut at = 0;
        let mut start = 0;
        for (i, bit) in stream.iter().enumerate() {
            match &self.nodes[at][bit as usize] {
                Link::Branch(next) => at = *next,
                Link::Symbol(symbol) => {
                    out.push(symbol.clone());
                    at = 0;
                    start = i + 1;
                }
                Link::Vacant => return Err(Error::InvalidStream { position: start }),
            }
        }
        if at != 0 {
            return Err(Error::InvalidStream { position: start });
        }
        Ok(out)
    }
}

/// Encode `data` with `table`.
pub fn encode<S: Eq + Hash + Clone>(data: &[S], table: &CodeTable<S>) -> Result<EncodedStream> {
    let mut out = EncodedStream::with_capacity(data.len());
    for (position, symbol) in data.iter().enumerate() {
        out.push_codeword(table.get(symbol).ok_or(Error::UnknownSymbol { position })?);
    }
    Ok(out)
}

/// Decode `stream` with `table`.
pub fn decode<S: Clone>(stream: &EncodedStream, table: &CodeTable<S>) -> Result<Vec<S>> {
    HuffmanDecoder::new(table)?.decode(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Codeword;
    use crate::frequency::analyze;
    use proptest::prelude::*;

    #[test]
    fn test_huffman_roundtrip() {
        let data = b"abracadabra";
        let freqs = analyze(data);

        let encoder = HuffmanEncoder::from_frequencies(&freqs).unwrap();
        let bits = encoder.encode(data).unwrap();

        let decoder = HuffmanDecoder::new(encoder.table()).unwrap();
        let decoded = decoder.decode(&bits).unwrap();

        assert_eq!(data.to_vec(), decoded);
    }

    #[test]
    fn test_encode_aaaabbc() {
        let data = b"aaaabbc";
        let table = generate(&build(&analyze(data)).unwrap());
        let bits = encode(data, &table).unwrap();
        assert_eq!(bits.to_string(), "1111010100");
    }

    #[test]
    fn test_encode_unknown_symbol() {
        let table = generate(&build(&analyze(b"ab")).unwrap());
        let err = encode(b"abbz", &table).unwrap_err();
        assert!(matches!(err, Error::UnknownSymbol { position: 3 }));
    }

    #[test]
    fn test_decode_truncated_stream() {
        let data = b"aaaabbc";
        let table = generate(&build(&analyze(data)).unwrap());
        let mut bits = encode(data, &table).unwrap();
        bits.truncate(bits.len() - 1);
        // The final codeword "00" starts at bit 8.
        assert!(matches!(
            decode(&bits, &table),
            Err(Error::InvalidStream { position: 8 })
        ));
    }

    #[test]
    fn test_decode_single_symbol_rejects_sentinel_path() {
        let root = build(&analyze(b"aaa")).unwrap();
        let table = generate(&root);
        let bits: EncodedStream = [false, true].into_iter().collect();
        assert!(matches!(
            decode(&bits, &table),
            Err(Error::InvalidStream { position: 1 })
        ));
        assert!(matches!(
            HuffmanDecoder::from_tree(&root).decode(&bits),
            Err(Error::InvalidStream { position: 1 })
        ));
    }

    #[test]
    fn test_decode_empty_table() {
        let table: CodeTable<u8> = CodeTable::from_codewords([]).unwrap();
        assert_eq!(decode(&EncodedStream::new(), &table).unwrap(), Vec::<u8>::new());
        let bits: EncodedStream = [true].into_iter().collect();
        assert!(matches!(
            decode(&bits, &table),
            Err(Error::InvalidStream { position: 0 })
        ));
    }

    #[test]
    fn test_decode_incomplete_table() {
        let code = |t: &str| Codeword::parse(t).unwrap();
        let table = CodeTable::from_codewords([('x', code("0")), ('y', code("10"))]).unwrap();
        let ok: EncodedStream = "0100".chars().map(|c| c == '1').collect();
        assert_eq!(decode(&ok, &table).unwrap(), vec!['x', 'y', 'x']);
        let bad: EncodedStream = "011".chars().map(|c| c == '1').collect();
        assert!(matches!(
            decode(&bad, &table),
            Err(Error::InvalidStream { position: 1 })
        ));
    }

    proptest! {
        #[test]
        fn prop_tree_and_table_decoders_agree(data in prop::collection::vec(0..20u8, 1..300)) {
            let root = build(&analyze(&data)).unwrap();
            let table = generate(&root);
            let bits = encode(&data, &table).unwrap();
            let from_table = HuffmanDecoder::new(&table).unwrap().decode(&bits).unwrap();
            let from_tree = HuffmanDecoder::from_tree(&root).decode(&bits).unwrap();
            prop_assert_eq!(&from_table, &data);
            prop_assert_eq!(from_tree, from_table);
        }
    }
}
