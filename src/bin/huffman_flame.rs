use huffman::{compress, HuffmanDecoder};

fn main() {
    let input = (0..100_000u32)
        .map(|i| (i.wrapping_mul(2654435761) >> 26) as u8 % 23)
        .collect::<Vec<_>>();

    for _ in 0..200 {
        let (stream, table) = compress(&input).unwrap();
        let decoder = HuffmanDecoder::new(&table).unwrap();
        let output = decoder.decode(&stream).unwrap();
        assert_eq!(output.len(), input.len());
    }
}
