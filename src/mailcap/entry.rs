//! Mailcap entries.

use serde::{ Deserialize, Serialize };

use super::{ Addable, KeyMap };
use crate::locus::{ Located, Range };

/// A `name` flag or a `name=value` field of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Name as written.
    pub name: String,
    /// Unescaped value; `None` for flags such as `needsterminal`.
    pub value: Option<String>,
    pub locus: Option<Range>,
}

impl Field {
    pub fn flag(name: impl Into<String>) -> Self {
        Field { name: name.into(), value: None, locus: None }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Field { name: name.into(), value: Some(value.into()), locus: None }
    }
}

impl Located for Field {
    fn locus(&self) -> Option<&Range> {
        self.locus.as_ref()
    }
}

/// One line (or continued line) of a mailcap file.
///
/// ```text
/// text/html; lynx -dump %s; copiousoutput; description="HTML Text"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailcapEntry {
    mime_type: String,
    command: String,
    fields: KeyMap<Field>,
    locus: Option<Range>,
}

impl MailcapEntry {
    /// Creates an entry without fields and without a locus.
    pub fn new(mime_type: impl Into<String>, command: impl Into<String>) -> Self {
        MailcapEntry { mime_type: mime_type.into(), command: command.into(), fields: KeyMap::new(), locus: None }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.add(field);
        self
    }

    pub(crate) fn with_locus(mut self, locus: Range) -> Self {
        self.locus = Some(locus);
        self
    }

    /// The type as written, e.g. `text/plain`, `image/*` or `audio`.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The view command with `\;` and `\\` unescaped. `%s` and friends are
    /// left for the caller to expand.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Looks up a field by case-insensitive name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(&name.to_ascii_lowercase())
    }

    /// Value of the field `name`; `None` when missing or a flag.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name)?.value.as_deref()
    }

    /// Returns `true` when `name` is present, with or without a value.
    pub fn flag(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn test(&self) -> Option<&str> {
        self.value("test")
    }

    pub fn print(&self) -> Option<&str> {
        self.value("print")
    }

    pub fn compose(&self) -> Option<&str> {
        self.value("compose")
    }

    pub fn edit(&self) -> Option<&str> {
        self.value("edit")
    }

    pub fn description(&self) -> Option<&str> {
        self.value("description")
    }

    pub fn name_template(&self) -> Option<&str> {
        self.value("nametemplate")
    }

    pub fn needs_terminal(&self) -> bool {
        self.flag("needsterminal")
    }

    pub fn copious_output(&self) -> bool {
        self.flag("copiousoutput")
    }

    /// Returns `true` if this entry handles `mime_type`.
    ///
    /// Comparison ignores case. An entry for `image/*` or plain `image`
    /// handles every `image` subtype.
    pub fn matches(&self, mime_type: &str) -> bool {
        let (main, sub) = split_type(&self.mime_type);
        let (want_main, want_sub) = split_type(mime_type);
        if !main.eq_ignore_ascii_case(want_main) {
            return false;
        }
        match (sub, want_sub) {
            (None, _) | (Some("*"), _) => true,
            (Some(sub), Some(want)) => sub.eq_ignore_ascii_case(want),
            (Some(_), None) => false,
        }
    }
}

fn split_type(mime_type: &str) -> (&str, Option<&str>) {
    match mime_type.split_once('/') {
        Some((main, sub)) => (main, Some(sub)),
        None => (mime_type, None),
    }
}

impl Located for MailcapEntry {
    fn locus(&self) -> Option<&Range> {
        self.locus.as_ref()
    }
}

/// A parsed mailcap file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailcap {
    pub entries: Vec<MailcapEntry>,
}

impl Mailcap {
    pub fn new() -> Self {
        Mailcap { entries: Vec::new() }
    }

    /// Entries handling `mime_type`, in file order.
    pub fn find<'a>(&'a self, mime_type: &'a str) -> impl Iterator<Item = &'a MailcapEntry> + 'a {
        self.entries.iter().filter(move |e| e.matches(mime_type))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::locus::get_locus;

    #[test]
    fn fields_are_case_insensitive() {
        let e = MailcapEntry::new("text/plain", "cat %s")
            .with_field(Field::flag("NeedsTerminal"))
            .with_field(Field::with_value("Test", "true"));
        assert!(e.needs_terminal());
        assert!(!e.copious_output());
        assert_eq!(e.test(), Some("true"));
        assert_eq!(e.field("TEST").unwrap().name, "Test");
    }

    #[test]
    fn later_field_wins() {
        let e = MailcapEntry::new("a/b", "x")
            .with_field(Field::with_value("print", "one"))
            .with_field(Field::with_value("edit", "e"))
            .with_field(Field::with_value("print", "two"));
        assert_eq!(e.print(), Some("two"));
        let names: Vec<&str> = e.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["print", "edit"]);
    }

    #[test]
    fn type_matching() {
        let wild = MailcapEntry::new("image/*", "xv %s");
        let bare = MailcapEntry::new("audio", "play %s");
        let exact = MailcapEntry::new("text/plain", "cat %s");
        assert!(wild.matches("image/png"));
        assert!(wild.matches("IMAGE/gif"));
        assert!(!wild.matches("text/plain"));
        assert!(bare.matches("audio/basic"));
        assert!(exact.matches("Text/Plain"));
        assert!(!exact.matches("text/html"));
        assert!(!exact.matches("text"));
    }

    #[test]
    fn hand_built_entry_has_no_locus() {
        let e = MailcapEntry::new("text/plain", "cat");
        let mut out = Range::default();
        assert!(matches!(get_locus(Some(&e), Some(&mut out)), Err(Error::NotFound)));
    }
}
