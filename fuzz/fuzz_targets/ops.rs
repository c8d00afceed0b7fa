#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    spelltrie::fuzz_ops_bytes(data);
});
