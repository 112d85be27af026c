#![no_main]

use libfuzzer_sys::fuzz_target;
use parse_locus::config::ConfigParser;
use parse_locus::{ ParserOptions, Range };

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let mut p = ConfigParser::with_reporter(|locus: &Range, _: &str| {
        assert!(locus.begin().line() >= 1 && locus.begin().column() >= 1);
    })
    .with_options(ParserOptions::collect_all());
    let _ = p.parse_str("fuzz.conf", text);
});
