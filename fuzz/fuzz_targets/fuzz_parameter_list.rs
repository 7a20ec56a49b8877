#![no_main]

use libfuzzer_sys::fuzz_target;
use tokio_mimetype::grammar::{quote, unquote};
use tokio_mimetype::ParameterList;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = s.parse::<ParameterList>();

        let quoted = quote(s);
        let inner = quoted
            .strip_prefix('"')
            .and_then(|q| q.strip_suffix('"'))
            .unwrap_or(&quoted);
        assert_eq!(unquote(inner), s);
    }
});
