#![no_main]

use jsfold_core::{fold_source, FoldConfig, ShiftSemantics};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Folding must never panic; unsupported input surfaces as an error
    if let Ok(source) = std::str::from_utf8(data) {
        let _ = fold_source("fuzz.js", source, &FoldConfig::default());
        let unsigned = FoldConfig::default().with_shift_semantics(ShiftSemantics::Unsigned);
        let _ = fold_source("fuzz.js", source, &unsigned);
    }
});
