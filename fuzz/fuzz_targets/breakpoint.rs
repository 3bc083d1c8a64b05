#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let _ = fortune_sweep::arbitrary::arbtests::breakpoint_on_both_arcs(&mut u);
});
