//! # Huffman Coding
//!
//! *Optimal prefix codes from symbol frequencies.*
//!
//! ## Intuition First
//!
//! Morse code gives the most common letter, `E`, a single dot, and rare letters
//! like `Q` four signals. Huffman coding does the same thing systematically:
//! frequent symbols get short bit strings, rare symbols get long ones, and no
//! bit string is the start of another, so a stream of them can be split back
//! apart without separators.
//!
//! ## The Algorithm
//!
//! 1. **Analyze**: count how often each symbol occurs.
//! 2. **Build**: put one leaf per symbol in a min-priority queue keyed by count.
//!    Pop the two lightest nodes, join them under a new node whose weight is
//!    their sum, push it back, and repeat until one root remains.
//! 3. **Generate**: walk the tree; a left edge is `0`, a right edge is `1`. The
//!    path to a leaf is its symbol's codeword.
//! 4. **Encode**: concatenate codewords. **Decode**: walk the tree bit by bit,
//!    emit a symbol at each leaf and start over at the root.
//!
//! ```text
//!            (7)
//!           0/ \1
//!          (3)  a:4        a -> 1
//!         0/ \1            b -> 01
//!       c:1   b:2          c -> 00
//! ```
//!
//! ## Determinism
//!
//! Equal weights are popped in the order they were pushed: leaves in the order
//! their symbols first occur in the input, merged nodes after every node pushed
//! before them. The same input therefore always yields the same code.
//!
//! A one-symbol alphabet would give a tree that is a single leaf, with an empty
//! path. The builder pairs that leaf with a zero-weight sentinel so the symbol
//! gets the one-bit codeword `0`; the sentinel never appears in a code table.
//!
//! ## Complexity Analysis
//!
//! - **Build**: $O(n \log n)$ for $n$ distinct symbols.
//! - **Encode / decode**: $O(1)$ per bit.
//! - **Rate**: the average codeword length $L$ satisfies $H \le L < H + 1$,
//!   where $H$ is the Shannon entropy of the frequencies.
//!
//! ## Failure Modes
//!
//! 1. **Table mismatch**: encoding a symbol missing from the table fails with
//!    [`Error::UnknownSymbol`].
//! 2. **Corruption or truncation**: a stream that does not split into
//!    codewords fails with [`Error::InvalidStream`]; no partial output is
//!    returned.
//!
//! The code table is not embedded in the stream. Callers store it next to the
//! stream (see [`CodeTable::write_to`] for byte symbols).
//!
//! ## Example
//!
//! ```
//! let (stream, table) = huffman::compress(b"aaaabbc").unwrap();
//! assert_eq!(stream.to_string(), "1111010100");
//! assert_eq!(huffman::decompress(&stream, &table).unwrap(), b"aaaabbc");
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Shannon, C. E. (1948). "A Mathematical Theory of Communication."

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::hash::Hash;

use log::trace;

pub mod code;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod stream;
pub mod tree;

pub use code::{generate, CodeTable, Codeword};
pub use error::{Error, Result};
pub use frequency::{analyze, FrequencyTable};
pub use huffman::{decode, encode, HuffmanDecoder, HuffmanEncoder};
pub use stream::EncodedStream;
pub use tree::{build, CodeNode};

/// Build a code for `data` and encode `data` with it.
///
/// Empty input yields an empty stream and an empty table.
pub fn compress<S: Eq + Hash + Clone>(data: &[S]) -> Result<(EncodedStream, CodeTable<S>)> {
    let freqs = analyze(data);
    if freqs.is_empty() {
        return Ok((EncodedStream::new(), CodeTable::from_codewords([])?));
    }
    let table = generate(&build(&freqs)?);
    let stream = encode(data, &table)?;
    trace!(
        "compressed {} symbols ({} distinct) into {} bits, entropy {:.3} bits/symbol",
        data.len(),
        table.len(),
        stream.len(),
        freqs.entropy()
    );
    Ok((stream, table))
}

/// Decode a stream produced by [`compress`] with its table.
pub fn decompress<S: Clone>(stream: &EncodedStream, table: &CodeTable<S>) -> Result<Vec<S>> {
    decode(stream, table)
}
