use std::str;

use honggfuzz::fuzz;
use puzzle_address::PuzzleHash;

// First byte is the prefix length, then the prefix, then 32 bytes of puzzle hash.
fn do_test(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let hrp_end = (data[0] as usize) + 1;

    if data.len() < hrp_end + 32 {
        return;
    }

    let prefix = match str::from_utf8(&data[1..hrp_end]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let hash = &data[hrp_end..hrp_end + 32];

    let address = match puzzle_address::encode(hash, prefix) {
        Ok(addr) => addr,
        Err(_) => return,
    };

    let info = puzzle_address::decode_address_info(&address)
        .expect("should be able to decode own encoding");
    assert_eq!(info.prefix, prefix.to_ascii_lowercase());
    assert_eq!(info.puzzle_hash, PuzzleHash::try_from(hash).expect("32 bytes"));
    assert_eq!(info.encode().expect("prefix already validated"), address);
}

fn main() {
    loop {
        fuzz!(|data| {
            do_test(data);
        });
    }
}
