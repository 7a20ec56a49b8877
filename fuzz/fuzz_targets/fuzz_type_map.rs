#![no_main]

use libfuzzer_sys::fuzz_target;
use tokio_mimetype::{LineTokenizer, TypeMap};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for token in LineTokenizer::new(s) {
            if token.is_err() {
                break;
            }
        }

        let mut map = TypeMap::new();
        let _ = map.parse_str(s);
    }
});
