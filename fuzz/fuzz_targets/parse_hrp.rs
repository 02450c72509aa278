use honggfuzz::fuzz;
use puzzle_address::{Hrp, KnownPrefix};

fn do_test(data: &[u8]) {
    let s = String::from_utf8_lossy(data);

    // Make sure parsing garbage doesn't make us crash (from_utf8_lossy should
    // contain some garbage, perhaps even invalid chars).
    if let Ok(hrp) = Hrp::parse(&s) {
        assert_eq!(hrp.lowercase_char_iter().count(), hrp.len());
        assert_eq!(hrp.to_lowercase(), s.to_ascii_lowercase());
    }
    let _ = s.parse::<KnownPrefix>();
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
        let a = hex::decode("ff6c2d").expect("valid hex");
        super::do_test(&a);
    }
}
