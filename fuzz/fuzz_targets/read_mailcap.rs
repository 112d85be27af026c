#![no_main]

use libfuzzer_sys::fuzz_target;
use parse_locus::mailcap::MailcapParser;
use parse_locus::Silent;

fuzz_target!(|data: &[u8]| {
    let mut cursor = std::io::Cursor::new(data);
    let mut p = MailcapParser::with_reporter(Silent);
    let _ = p.read_mailcap("fuzz", &mut cursor);
});
