#![no_main]

use libfuzzer_sys::fuzz_target;
use tokio_mimetype::MediaType;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that parses must format to text that parses back the same
        if let Ok(media_type) = MediaType::parse(s) {
            let reparsed = MediaType::parse(&media_type.to_string())
                .expect("formatted media type should parse");
            assert_eq!(reparsed, media_type);
        }
    }
});
