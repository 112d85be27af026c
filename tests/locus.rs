use parse_locus::*;
use parse_locus::config::ConfigParser;
use parse_locus::mailcap::MailcapParser;

fn range(src: &str, l1: usize, c1: usize, l2: usize, c2: usize) -> Range {
    Range::new(Point::new(src, l1, c1), Point::new(src, l2, c2))
}

#[test]
fn formatter_cases() {
    assert_eq!(format_range(&range("file", 2, 3, 2, 3)), "file:2.3-3");
    assert_eq!(format_range(&range("a.txt", 5, 2, 5, 9)), "a.txt:5.2-9");
    assert_eq!(format_range(&range("a.txt", 5, 2, 7, 1)), "a.txt:5.2-7.1");
    let across = Range::new(Point::new("a.txt", 5, 2), Point::new("b.txt", 1, 1));
    assert_eq!(format_range(&across), "a.txt:5.2-b.txt:1.1");
    assert_eq!(format_point(&Point::new("a.txt", 5, 2)), "a.txt:5.2");
}

#[test]
fn merge_over_symbols() {
    let rhs = [range("f", 1, 1, 1, 5), range("f", 1, 6, 1, 9), range("f", 2, 1, 2, 3)];
    let merged = Range::merge(&rhs, &range("f", 1, 1, 1, 1));
    assert_eq!(merged, range("f", 1, 1, 2, 3));
}

#[test]
fn merge_empty_production() {
    let previous = range("f", 3, 10, 3, 10);
    assert_eq!(Range::merge(&[], &previous), range("f", 3, 10, 3, 10));
    // only the end of the previous symbol counts
    let previous = range("f", 3, 1, 3, 10);
    let empty = Range::merge(&[], &previous);
    assert!(empty.is_zero_width());
    assert_eq!(empty.to_string(), "f:3.10-10");
}

#[test]
fn copy_is_independent_of_the_name_buffer() {
    let mut name = String::from("input.conf");
    let original = Range::point(Point::new(name.as_str(), 4, 2));
    let copy = original.copy().unwrap();
    name.clear();
    name.push_str("other.conf");
    assert_eq!(copy, original);
    assert_eq!(copy.to_string(), "input.conf:4.2-2");
}

#[test]
fn get_locus_on_parsed_config() {
    let mut p = ConfigParser::with_reporter(Collector::new());
    let config = p.parse_str("c.conf", "a = 1\nb {\n  c = [x, y]\n}\n").unwrap();

    let mut out = Range::default();
    get_locus(config.get("b.c"), Some(&mut out)).unwrap();
    assert_eq!(out.to_string(), "c.conf:3.3-12");

    get_locus(config.value("b.c"), Some(&mut out)).unwrap();
    assert_eq!(out.to_string(), "c.conf:3.7-12");

    get_locus(config.get("b"), Some(&mut out)).unwrap();
    assert_eq!(out.to_string(), "c.conf:2.1-4.1");
}

#[test]
fn get_locus_contract() {
    let mut p = MailcapParser::with_reporter(Silent);
    let mailcap = p.parse_str("mc", "text/plain; cat\n").unwrap();
    let entry = &mailcap.entries[0];

    assert!(matches!(get_locus::<Range>(None, None), Err(Error::InvalidArgument)));
    assert!(matches!(get_locus(Some(entry), None), Err(Error::NullOutputTarget)));

    let before = range("unchanged", 9, 9, 9, 9);
    let mut out = before.clone();
    let hand_built = parse_locus::mailcap::MailcapEntry::new("text/plain", "cat");
    assert!(matches!(get_locus(Some(&hand_built), Some(&mut out)), Err(Error::NotFound)));
    assert_eq!(out, before);

    get_locus(Some(entry), Some(&mut out)).unwrap();
    assert_eq!(out.to_string(), "mc:1.1-15");
}

#[test]
fn ranges_cross_threads() {
    let r = range("shared", 1, 1, 1, 4);
    let handle = std::thread::spawn(move || r.to_string());
    assert_eq!(handle.join().unwrap(), "shared:1.1-4");
}
