use core::fmt::{self, Write as _};

/// Line-oriented report text where every line starts with a comment marker.
#[derive(Debug, Clone)]
pub struct Report {
    comment: char,
    out: String,
}

impl Report {
    pub fn new(comment: char) -> Self {
        Self {
            comment,
            out: String::new(),
        }
    }

    pub fn comment(&self) -> char {
        self.comment
    }

    /// Writes the marker, `text`, and a line break.
    pub fn line(&mut self, text: impl fmt::Display) {
        let _ = writeln!(self.out, "{}{text}", self.comment);
    }

    /// Writes a line holding only the marker.
    pub fn blank(&mut self) {
        self.out.push(self.comment);
        self.out.push('\n');
    }

    /// Appends text verbatim.
    pub fn push_str(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// The underlying buffer, for writers that append unmarked text.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.out
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
