//! Delimiters owned by each indexed construct. The scanner refers to these
//! constants and never hardcodes `[[`, `#` or `` ` ``.

/// Backtick code span. A raw zone: nothing inside is indexed.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

/// `[[target]]` or `[[target|alias]]`
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
}

/// `#name` or `#name/sub`, only at line start or after whitespace
pub struct Tag;

impl Tag {
    pub const HASH: u8 = b'#';

    /// Bytes allowed in a tag name. Non-ASCII bytes are accepted so tags can
    /// use any script.
    pub fn is_name_byte(b: u8) -> bool {
        !b.is_ascii() || b.is_ascii_alphanumeric() || matches!(b, b'/' | b'-' | b'_')
    }

    /// A name never starts with the `/` separator, so `#/usr/bin` is no tag
    pub fn is_name_start(b: u8) -> bool {
        b != b'/' && Self::is_name_byte(b)
    }
}
