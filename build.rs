//! Build script to generate the embedded word catalog
//!
//! Reads one word list per length bucket and generates Rust source code with const arrays.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("catalog.rs");

    let mut output = fs::File::create(&output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated word catalog").unwrap();
    writeln!(output).unwrap();

    for length in 4..=8 {
        let input_path = format!("data/words_{length}.txt");
        generate_bucket(&mut output, &input_path, length);

        // Rebuild if word lists change
        println!("cargo:rerun-if-changed={input_path}");
    }
}

fn generate_bucket(output: &mut fs::File, input_path: &str, length: usize) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let words: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let count = words.len();

    writeln!(output, "/// Embedded {length}-letter words ({count} words)").unwrap();
    writeln!(output, "pub const WORDS_{length}: &[&str] = &[").unwrap();

    for word in words {
        writeln!(output, "    \"{word}\",").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of words in WORDS_{length}").unwrap();
    writeln!(output, "pub const WORDS_{length}_COUNT: usize = {count};").unwrap();
    writeln!(output).unwrap();
}
