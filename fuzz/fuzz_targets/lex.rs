#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text through the lexer, then the whole front end - should never panic
    if let Ok(s) = std::str::from_utf8(data) {
        if lyra::lexer::lex(s).is_ok() {
            let _ = lyra::parse(s);
        }
    }
});
