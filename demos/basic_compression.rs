use huffcode::{CodecConfig, HuffmanCodec};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create a sample file
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    std::fs::write("sample.txt", sample_text)?;

    println!("Created sample file: {} bytes", sample_text.len());

    // Compress the file
    let input = File::open("sample.txt")?;
    let output = File::create("sample.huf")?;
    HuffmanCodec::encode_from_file(input, output, CodecConfig::default())?;

    let compressed_size = std::fs::metadata("sample.huf")?.len();
    let compression_ratio = compressed_size as f64 / sample_text.len() as f64;

    println!(
        "Compressed to: {} bytes ({:.1}% of original, table included)",
        compressed_size,
        compression_ratio * 100.0
    );

    // Show the code table built for the sample
    let codec = HuffmanCodec::from_bytes(sample_text.as_bytes(), CodecConfig::default())?;
    for (symbol, code) in codec.code_table().iter() {
        println!("  {:?} -> {}", symbol as char, code);
    }

    // Decompress the file
    let compressed = File::open("sample.huf")?;
    let decompressed = File::create("decompressed.txt")?;
    HuffmanCodec::decode_from_file(compressed, decompressed)?;

    let decompressed_text = std::fs::read_to_string("decompressed.txt")?;

    if sample_text == decompressed_text {
        println!("Decompression successful! Data matches exactly.");
    } else {
        println!("Decompression failed! Data mismatch.");
        return Err("Decompression verification failed".into());
    }

    // Cleanup
    std::fs::remove_file("sample.txt")?;
    std::fs::remove_file("sample.huf")?;
    std::fs::remove_file("decompressed.txt")?;

    Ok(())
}
