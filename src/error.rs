//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for Huffman operations.
#[derive(Debug, Error)]
pub enum Error {
    /// There are no symbols to build a code tree from.
    #[error("empty input: no symbols to build a code tree from")]
    EmptyInput,

    /// The summed weights of two subtrees do not fit in a `u64`.
    #[error("weight overflow: combined symbol counts exceed u64::MAX")]
    WeightOverflow,

    /// A symbol being encoded has no codeword in the supplied table.
    #[error("unknown symbol at input position {position}")]
    UnknownSymbol {
        /// Index of the offending symbol in the input sequence.
        position: usize,
    },

    /// The bit stream does not split into codewords of the supplied table.
    #[error("invalid stream: no codeword matches the bits starting at bit {position}")]
    InvalidStream {
        /// Bit offset at which the unmatched codeword starts.
        position: usize,
    },

    /// A code table supplied from outside violates the prefix code invariants.
    #[error("invalid code table: {0}")]
    InvalidTable(&'static str),

    /// An I/O error occurred while reading or writing a table or stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
