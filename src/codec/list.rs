//! Slim list text encoding
//!
//! A list is written as its item count followed by length-prefixed items:
//! ```text
//! [<count>:<len>:<item>:<len>:<item>:...]
//! ```
//! Counts and lengths are zero-padded to six decimal digits and lengths are
//! measured in characters, so `["a", "bc"]` becomes `[000002:000001:a:000002:bc:]`.
//!
//! Decoding is one level deep. An item holding a nested list keeps its encoded
//! text, and callers decode it again when they need to look inside.

use thiserror::Error;

/// Failure to read a Slim list. Callers usually treat it as "not a list".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("list must start with '['")]
    MissingOpen,

    #[error("list must end with ']'")]
    MissingClose,

    #[error("expected a decimal length at offset {0}")]
    InvalidLength(usize),

    #[error("expected ':' at offset {0}")]
    MissingSeparator(usize),

    #[error("item of {expected} characters is cut short at offset {offset}")]
    ShortItem { expected: usize, offset: usize },

    #[error("unexpected data after the last item at offset {0}")]
    TrailingData(usize),
}

/// Encode items as a Slim list
pub fn encode<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = format!("[{:06}:", items.len());
    for item in items {
        let item = item.as_ref();
        out.push_str(&format!("{:06}:{}:", item.chars().count(), item));
    }
    out.push(']');
    out
}

/// Decode one level of a Slim list
pub fn decode(text: &str) -> Result<Vec<String>, CodecError> {
    let body = text.strip_prefix('[').ok_or(CodecError::MissingOpen)?;
    let body = body.strip_suffix(']').ok_or(CodecError::MissingClose)?;

    let mut reader = Reader { body, pos: 0 };
    let count = reader.length()?;

    // The count comes from untrusted input, so don't preallocate from it blindly
    let mut items = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let len = reader.length()?;
        let item = reader.chars(len)?;
        reader.separator()?;
        items.push(item.to_string());
    }

    if reader.pos != body.len() {
        return Err(CodecError::TrailingData(reader.pos + 1));
    }
    Ok(items)
}

/// Render items the way they appear in exception messages: `["a", "b"]`
pub fn render<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("\"{}\"", item.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Cursor over the body of a list (between the brackets).
/// Offsets in errors are relative to the full text, hence the `+ 1`.
struct Reader<'a> {
    body: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn rest(&self) -> &'a str {
        &self.body[self.pos..]
    }

    /// Read `<digits>:`
    fn length(&mut self) -> Result<usize, CodecError> {
        let rest = self.rest();
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(CodecError::InvalidLength(self.pos + 1));
        }
        let value = rest[..digits]
            .parse()
            .map_err(|_| CodecError::InvalidLength(self.pos + 1))?;
        self.pos += digits;
        self.separator()?;
        Ok(value)
    }

    fn separator(&mut self) -> Result<(), CodecError> {
        if self.rest().starts_with(':') {
            self.pos += 1;
            Ok(())
        } else {
            Err(CodecError::MissingSeparator(self.pos + 1))
        }
    }

    /// Take exactly `count` characters
    fn chars(&mut self, count: usize) -> Result<&'a str, CodecError> {
        let rest = self.rest();
        let end = if count == 0 {
            0
        } else {
            match rest.char_indices().nth(count - 1) {
                Some((i, c)) => i + c.len_utf8(),
                None => {
                    return Err(CodecError::ShortItem {
                        expected: count,
                        offset: self.pos + 1,
                    })
                }
            }
        };
        self.pos += end;
        Ok(&rest[..end])
    }
}
