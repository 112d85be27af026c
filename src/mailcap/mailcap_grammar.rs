//! PEG grammar for a single mailcap entry.
//!
//! The grammar only delimits the pieces of an entry and records their byte
//! offsets; unescaping and locus computation happen in the parser. An entry
//! may span several physical lines joined by a backslash before the newline.

/// Byte offsets of a piece of an entry, end exclusive.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Span<'a> {
    pub begin: usize,
    pub end: usize,
    pub text: &'a str,
}

/// A `name` or `name=value` field.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RawField<'a> {
    pub name: Span<'a>,
    pub value: Option<Span<'a>>,
}

/// An entry as delimited by the grammar.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RawEntry<'a> {
    pub mime_type: Span<'a>,
    pub command: Span<'a>,
    pub fields: Vec<RawField<'a>>,
}

peg::parser!{pub grammar grammar() for str {

rule continuation()
	= "\\" "\r"? "\n"

rule ws()
	= quiet!{([' '|'\t'] / continuation())*}

rule gap()
	= quiet!{([' '|'\t'] / continuation())+}

rule token() -> &'input str
	= quiet!{$(['a'..='z'|'A'..='Z'|'0'..='9'|'!'|'#'|'$'|'&'|'.'|'+'|'-'|'^'|'_'|'*']+)}
	/ expected!("token")

rule chunk()
	= quiet!{("\\" !("\r"? "\n") [_] / !['\\'|';'|'\n'|'\r'|' '|'\t'] [_])+}

pub rule mime_type() -> Span<'input>
	= b:position!() t:$(token() ("/" token())?) e:position!() {
		Span { begin: b, end: e, text: t }
	}

pub rule text() -> Span<'input>
	= b:position!() t:$(chunk() ++ gap()) e:position!() {
		Span { begin: b, end: e, text: t }
	}
	/ expected!("text")

rule field_name() -> Span<'input>
	= b:position!() t:token() e:position!() {
		Span { begin: b, end: e, text: t }
	}

pub rule field() -> RawField<'input>
	= name:field_name() ws() "=" ws() value:text() {
		RawField { name, value: Some(value) }
	}
	/ name:field_name() {
		RawField { name, value: None }
	}

rule line_end()
	= "\r"? "\n" / ![_]

pub rule entry() -> RawEntry<'input>
	= ws() mime_type:mime_type() ws() ";" ws() command:text() fields:(ws() ";" ws() f:field()? { f })* ws() line_end() {
		RawEntry { mime_type, command, fields: fields.into_iter().flatten().collect() }
	}

}}

#[cfg(test)]
mod tests {
    use super::grammar as g;
    use super::*;
    macro_rules! assert_ok {
        ($e:expr) => (
            match $e {
                Ok(obj) => (obj),
                Err(e) => panic!("{}", e),
            }
        );
        ($e:expr , $o:expr) => (
            let obj = assert_ok!($e);
            assert_eq!(obj, $o);
        );
    }
    macro_rules! assert_err {
        ($e:expr) => (
            let result = $e;
            assert!(result.is_err());
        );
    }
    #[test]
    fn mime_type_ok() {
        assert_ok!(g::mime_type("text/plain"), Span { begin: 0, end: 10, text: "text/plain" });
        assert_eq!(assert_ok!(g::mime_type("image/*")).text, "image/*");
        assert_eq!(assert_ok!(g::mime_type("audio")).text, "audio");
        assert_eq!(assert_ok!(g::mime_type("application/x-tar+gzip")).text, "application/x-tar+gzip");
    }
    #[test]
    fn mime_type_err() {
        assert_err!(g::mime_type("text/"));
        assert_err!(g::mime_type("/plain"));
        assert_err!(g::mime_type("text plain"));
        assert_err!(g::mime_type(""));
    }
    #[test]
    fn text_ok() {
        assert_eq!(assert_ok!(g::text("less %s")).text, "less %s");
        assert_eq!(assert_ok!(g::text(r"echo a\;b")).text, r"echo a\;b");
        assert_eq!(assert_ok!(g::text("cat \\\n  %s")).text, "cat \\\n  %s");
    }
    #[test]
    fn text_err() {
        assert_err!(g::text(""));
        assert_err!(g::text("a;b"));
        assert_err!(g::text("a "));
    }
    #[test]
    fn field_ok() {
        let f = assert_ok!(g::field("needsterminal"));
        assert_eq!(f.name.text, "needsterminal");
        assert!(f.value.is_none());
        let f = assert_ok!(g::field("test = test -n \"$DISPLAY\""));
        assert_eq!(f.name.text, "test");
        assert_eq!(f.value.unwrap().text, "test -n \"$DISPLAY\"");
        assert_eq!(f.value.unwrap().begin, 7);
    }
    #[test]
    fn entry_ok() {
        let e = assert_ok!(g::entry("text/html; lynx -dump %s; copiousoutput\n"));
        assert_eq!(e.mime_type.text, "text/html");
        assert_eq!(e.command, Span { begin: 11, end: 24, text: "lynx -dump %s" });
        assert_eq!(e.fields.len(), 1);
        assert_ok!(g::entry("text/plain; cat %s;"));
        assert_ok!(g::entry("  text/plain ;cat %s ; ; needsterminal \r\n"));
        let e = assert_ok!(g::entry("image/*; xv %s; \\\n  test=test -n \"$DISPLAY\"\n"));
        assert_eq!(e.fields[0].name.text, "test");
    }
    #[test]
    fn entry_err() {
        assert_err!(g::entry("text/plain\n"));
        assert_err!(g::entry("text/plain;\n"));
        assert_err!(g::entry("text/plain; cat %s\nmore"));
        assert_err!(g::entry("text/plain; cat; needsterminal junk"));
        assert_err!(g::entry("text/plain; cat; =x"));
    }
}
