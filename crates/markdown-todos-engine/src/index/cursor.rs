/// Byte cursor over a single line of a document.
///
/// Positions are byte offsets into the line. The indexer only stops on ASCII
/// delimiters, so every offset it slices at is a char boundary.
#[derive(Clone)]
pub struct LineCursor<'a> {
    line: &'a str,
    i: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.line.len()
    }

    /// Current byte without advancing
    pub fn peek(&self) -> Option<u8> {
        self.line.as_bytes().get(self.i).copied()
    }

    /// Byte just before the cursor, `None` at line start
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|i| self.line.as_bytes().get(i).copied())
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.line
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.line.len());
    }

    /// Advance while `pred` holds for the current byte
    pub fn bump_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.line[start..end]
    }
}
