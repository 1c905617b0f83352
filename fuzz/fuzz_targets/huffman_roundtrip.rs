#![no_main]
use huffman::{compress, decompress, EncodedStream, Error};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, Vec<u8>, u16)| {
    let (input, noise, cut) = data;

    let (stream, table) = compress(&input).unwrap();
    assert_eq!(decompress(&stream, &table).unwrap(), input);

    // Arbitrary bits must either decode cleanly or fail with InvalidStream.
    let bit_len = (noise.len() * 8).saturating_sub(cut as usize % 8);
    if let Ok(garbage) = EncodedStream::from_parts(noise, bit_len) {
        match decompress(&garbage, &table) {
            Ok(_) | Err(Error::InvalidStream { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
});
