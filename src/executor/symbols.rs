//! Symbol table and `$name` substitution
//!
//! A reference is the marker `$` followed by the longest run of ASCII
//! alphanumerics (possibly empty). Each successful replacement restarts the
//! scan from the start of the new text, so a value may itself contain
//! references (`a -> "$b"`, `b -> "x"` turns `"$a"` into `"x"`). Unresolved
//! references are left in place and scanning continues after them.
//!
//! Only nested expansion (a replacement inside text produced by an earlier
//! replacement) counts against the substitution limit, so independent
//! references in a long operand are all replaced.

use std::collections::HashMap;

use crate::codec;

/// Character introducing a symbol reference
pub const SYMBOL_MARKER: char = '$';

/// Named string values bound during a session
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, String>,
    /// Maximum nesting depth of one reference's expansion
    substitution_limit: usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(crate::common::config::ExecutorConfig::default().substitution_limit)
    }
}

impl SymbolTable {
    pub fn new(substitution_limit: usize) -> Self {
        Self {
            symbols: HashMap::new(),
            substitution_limit,
        }
    }

    /// Bind `name` to `value`, replacing any previous binding
    pub fn bind(&mut self, name: &str, value: &str) {
        tracing::trace!(symbol = name, value, "Binding symbol");
        self.symbols.insert(name.to_string(), value.to_string());
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Replace every resolvable symbol reference in `text`
    pub fn substitute(&self, text: &str) -> String {
        let mut current = text.to_string();
        let mut cursor = 0;
        // End of the text produced by the expansion in progress, and its depth
        let mut frontier = 0;
        let mut depth = 0;

        while let Some(offset) = current[cursor..].find(SYMBOL_MARKER) {
            let marker = cursor + offset;
            let name_start = marker + SYMBOL_MARKER.len_utf8();
            let name_len = current[name_start..]
                .bytes()
                .take_while(u8::is_ascii_alphanumeric)
                .count();
            let name_end = name_start + name_len;

            match self.symbols.get(&current[name_start..name_end]) {
                Some(value) => {
                    if marker >= frontier {
                        depth = 0;
                        frontier = name_end;
                    }
                    if depth == self.substitution_limit {
                        tracing::warn!(
                            limit = self.substitution_limit,
                            text,
                            "Symbol substitution limit reached, symbols are probably self-referential"
                        );
                        break;
                    }
                    depth += 1;
                    frontier = frontier.max(name_end) - (name_end - marker) + value.len();
                    current.replace_range(marker..name_end, value);
                    cursor = 0;
                }
                // Trailing marker is literal
                None if name_start == current.len() => break,
                None => cursor = name_end,
            }
        }

        current
    }

    /// Substitute every element in place, descending into elements that are
    /// themselves encoded lists and re-encoding them afterwards
    pub fn substitute_list(&self, items: &mut [String]) {
        for item in items.iter_mut() {
            match codec::decode(item) {
                Ok(mut nested) => {
                    self.substitute_list(&mut nested);
                    *item = codec::encode(&nested);
                }
                Err(_) => *item = self.substitute(item),
            }
        }
    }
}
