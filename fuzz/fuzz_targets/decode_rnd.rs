use honggfuzz::fuzz;
use puzzle_address::address::UncheckedAddress;
use puzzle_address::{Bech32, Bech32m};

// Checks that we do not crash if passed random data while decoding.
fn do_test(data: &[u8]) {
    let data_str = String::from_utf8_lossy(data);
    let _ = puzzle_address::decode(&data_str);

    // Drive every gate by hand, including the ones `decode` never reaches with Bech32.
    if let Ok(parsed) = UncheckedAddress::new(&data_str).and_then(|u| u.validate_characters()) {
        let _ = parsed.fe_iter().count();
        if let Ok(checked) = parsed.validate_checksum::<Bech32>() {
            let _ = checked.puzzle_hash();
        }
        if let Ok(checked) = parsed.validate_checksum::<Bech32m>() {
            let _ = checked.puzzle_hash();
        }
    }
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn duplicate_crash() {
        let a = hex::decode("78636831717171717171").expect("valid hex");
        super::do_test(&a);
    }
}
