//! Test `no_std` build of `puzzle-address`.
//!
//! Build with: `cargo rustc -- -C link-arg=-nostartfiles`.
//!

#![no_std]
#![no_main]

use core::fmt::{self, Write};
use core::panic::PanicInfo;

use puzzle_address::{decode, encode_to_fmt, PuzzleHash};

// Note: `#[global_allocator]` is NOT set.

const ADDRESS: &str = "xch1pwrzyy35qxk0rz76jl0648fvt6ql905vwd7zs0scjqant5sf25lql4hz3z";

/// Fixed capacity buffer, enough for any address with a prefix of up to 31 characters.
struct Buf {
    bytes: [u8; 90],
    len: usize,
}

impl Write for Buf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        self.bytes.get_mut(self.len..end).ok_or(fmt::Error)?.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

fn round_trip() -> bool {
    let hash: PuzzleHash = match decode(ADDRESS) {
        Ok(hash) => hash,
        Err(_) => return false,
    };
    let mut buf = Buf { bytes: [0; 90], len: 0 };
    if encode_to_fmt(&mut buf, hash.as_bytes(), "xch").is_err() {
        return false;
    }
    &buf.bytes[..buf.len] == ADDRESS.as_bytes()
}

/// This function is called on panic, defining this ensures build will fail if `std` is enabled
/// because `panic` will be defined twice.
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

#[no_mangle]
pub extern "C" fn _start() -> ! {
    if !round_trip() {
        panic!("round trip failed");
    }
    loop {}
}
