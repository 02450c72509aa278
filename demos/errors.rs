//! Demonstrate output from the various crate errors.

use std::error::Error;

use puzzle_address::primitives::hrp::KnownPrefix;
use puzzle_address::PuzzleHash;

fn main() {
    crate_decode();
    crate_encode();
    puzzle_hash_parse();
    primitives_hrp();
}

/// Demonstrates `puzzle_address::decode` errors, one per decoding gate.
fn crate_decode() {
    use puzzle_address::decode;
    let function = "puzzle_address::decode";

    // The arguments to pass to `function`.
    let strings = vec![
        "xchqqqq",
        "xch1qqbqqq",
        "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3y",
        "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lpzrrhvs",
        "xch1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnlgaqhp",
    ];

    for s in strings {
        let err = decode(s).unwrap_err();
        println!("\n\n* Call `{}(\"{}\")` -> {:?}", function, s, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates `puzzle_address::encode` errors.
fn crate_encode() {
    use puzzle_address::encode;
    let function = "puzzle_address::encode";

    let short = [0x00; 20];
    let hash = [0x00; 32];
    let cases: Vec<(&[u8], &str)> =
        vec![(&short[..], "xch"), (&hash[..], ""), (&hash[..], "x\u{e9}")];

    for (hash, prefix) in cases {
        let err = encode(hash, prefix).unwrap_err();
        println!("\n\n* Call `{}([..; {}], {:?})` -> {:?}", function, hash.len(), prefix, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates parsing a puzzle hash from hex.
fn puzzle_hash_parse() {
    let strings =
        vec!["0xabcd", "zz8622123401acf18bda97dfaa9d2c5e81f2be8c737c283e18903b35d209553e"];

    for s in strings {
        let err = s.parse::<PuzzleHash>().unwrap_err();
        println!("\n\n* Call `\"{}\".parse::<PuzzleHash>()` -> {:?}", s, err);
        println!("\n------------");
        print_source(&err);
        println!("------------");
    }
}

/// Demonstrates the `hrp::Error` variants and the unknown prefix error.
fn primitives_hrp() {
    use puzzle_address::primitives::hrp::Error::*;

    println!("\n\n* All errors when parsing an invalid prefix");
    let errs = vec![Empty, NonAsciiChar('\u{e9}'), InvalidAsciiByte(b' ')];
    println!("\n------------");

    for e in errs.iter() {
        println!("Debug: {:?}\nError: {}\n", e.clone(), e);
    }
    let err = "bc".parse::<KnownPrefix>().unwrap_err();
    println!("Debug: {:?}\nError: {}", err, err);
    println!("------------");
}

/// Prints `e` in a similar fashion to the output created by `anyhow`.
fn print_source(mut e: &dyn Error) {
    println!("Error: {}", e);

    if e.source().is_some() {
        let mut counter = 0;
        println!("\nCaused by: ");

        while let Some(inner) = e.source() {
            println!("\t{}: {}", counter, inner);
            e = inner;
            counter += 1;
        }
    }
}
