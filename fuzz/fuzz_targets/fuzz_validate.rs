#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the JSON load path.
///
/// Arbitrary UTF-8 is decoded as JSON and, when it decodes, run through the
/// schema validator. A validated file is then diffed against itself under a
/// different version, which must find nothing.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(mut save) = datamap_tools::parse_save_file_str(s) {
        let left = save.clone();
        save.game_version.push('~');
        let outcome = datamap_tools::DiffEngine::new().diff(&left, &save);
        assert!(!outcome.has_changes());
    }
});
