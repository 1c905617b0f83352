use huffman::{analyze, compress, decompress, CodeTable, EncodedStream, Error};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_roundtrip(input in prop::collection::vec(any::<u8>(), 0..1000)) {
        let (stream, table) = compress(&input).unwrap();
        let output = decompress(&stream, &table).unwrap();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_roundtrip_skewed(
        input in prop::collection::vec(prop::sample::select(vec![0u16, 0, 0, 0, 1, 1, 2, 300]), 0..500),
    ) {
        let (stream, table) = compress(&input).unwrap();
        prop_assert_eq!(decompress(&stream, &table).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_text(input in "\\PC{0,200}") {
        let chars: Vec<char> = input.chars().collect();
        let (stream, table) = compress(&chars).unwrap();
        let output: String = decompress(&stream, &table).unwrap().into_iter().collect();
        prop_assert_eq!(input, output);
    }

    #[test]
    fn test_deterministic(input in prop::collection::vec(0..8u8, 0..300)) {
        let first = compress(&input).unwrap();
        let second = compress(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_prefix_free(input in prop::collection::vec(any::<u8>(), 1..500)) {
        let (_, table) = compress(&input).unwrap();
        prop_assert!(table.is_prefix_free());
        prop_assert_eq!(table.len(), analyze(&input).len());
    }

    #[test]
    fn test_weight_order(input in prop::collection::vec(0..10u8, 1..500)) {
        let freqs = analyze(&input);
        let (_, table) = compress(&input).unwrap();
        for (x, fx) in freqs.iter() {
            for (y, fy) in freqs.iter() {
                if fx > fy {
                    prop_assert!(table.get(x).unwrap().len() <= table.get(y).unwrap().len());
                }
            }
        }
    }

    #[test]
    fn test_rate_within_one_bit_of_entropy(input in prop::collection::vec(0..32u8, 2..500)) {
        let freqs = analyze(&input);
        prop_assume!(freqs.len() > 1);
        let (stream, table) = compress(&input).unwrap();
        let avg = table.average_len(&freqs).unwrap();
        let entropy = freqs.entropy();
        prop_assert!(avg + 1e-9 >= entropy);
        prop_assert!(avg < entropy + 1.0);
        prop_assert_eq!(table.encoded_len(&freqs), Some(stream.len() as u64));
    }

    #[test]
    fn test_truncated_stream_is_rejected(input in prop::collection::vec(0..6u8, 1..300)) {
        let (mut stream, table) = compress(&input).unwrap();
        // Dropping the whole of a one-bit final codeword leaves a valid stream.
        let last = input.last().and_then(|s| table.get(s)).unwrap();
        prop_assume!(last.len() > 1);
        stream.truncate(stream.len() - 1);
        let rejected = matches!(decompress(&stream, &table), Err(Error::InvalidStream { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn test_serialized_roundtrip(input in prop::collection::vec(any::<u8>(), 0..600)) {
        let (stream, table) = compress(&input).unwrap();

        let mut table_bytes = Vec::new();
        table.write_to(&mut table_bytes).unwrap();
        let mut stream_bytes = Vec::new();
        stream.write_to(&mut stream_bytes).unwrap();

        let table = CodeTable::read_from(table_bytes.as_slice()).unwrap();
        let stream = EncodedStream::read_from(stream_bytes.as_slice()).unwrap();
        prop_assert_eq!(decompress(&stream, &table).unwrap(), input);
    }
}

#[test]
fn test_aaaabbc_scenario() {
    let (stream, table) = compress(b"aaaabbc").unwrap();
    assert_eq!(table.get(&b'a').unwrap().to_string(), "1");
    assert_eq!(table.get(&b'b').unwrap().to_string(), "01");
    assert_eq!(table.get(&b'c').unwrap().to_string(), "00");
    assert_eq!(decompress(&stream, &table).unwrap(), b"aaaabbc".to_vec());
}

#[test]
fn test_single_symbol() {
    let (stream, table) = compress(b"aaa").unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&b'a').unwrap().len(), 1);
    assert_eq!(stream.to_string(), "000");
    assert_eq!(decompress(&stream, &table).unwrap(), b"aaa".to_vec());
}

#[test]
fn test_empty_input() {
    let (stream, table) = compress::<u8>(&[]).unwrap();
    assert!(stream.is_empty());
    assert!(table.is_empty());
    assert_eq!(decompress(&stream, &table).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_mismatched_table_is_rejected() {
    let (_, table) = compress(b"aaaabbc").unwrap();
    assert!(matches!(
        huffman::encode(b"abcd", &table),
        Err(Error::UnknownSymbol { position: 3 })
    ));
}
