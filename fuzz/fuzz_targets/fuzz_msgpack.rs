#![no_main]
use datamap_tools::parsers::{DocumentDecoder, MessagePackDecoder};
use libfuzzer_sys::fuzz_target;

/// Fuzz the MessagePack decoder and the validator behind it.
fuzz_target!(|data: &[u8]| {
    if let Ok(document) = MessagePackDecoder::new().decode(data) {
        let _ = datamap_tools::parsers::validate(&document);
    }
});
