#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use tandem_pin::converter::TandemConverter;
use tandem_pin::options::ParseOptions;
use tandem_pin::sink::MemorySink;
use tandem_pin::tandem::TandemStreamer;

fuzz_target!(|data: &[u8]| {
    // Malformed documents must end in an error, never a panic
    if let Ok(streamer) = TandemStreamer::new(Cursor::new(data)) {
        for group in streamer.groups().take(100) {
            if group.is_err() {
                break;
            }
        }
    }

    if let Ok(converter) = TandemConverter::new(ParseOptions::default()) {
        let mut sink = MemorySink::new();
        let _ = converter.convert_bytes("fuzz", data, false, &mut sink);
    }
});
