//! Type definitions of a low-level SQL string representation.

/// An accumulator for SQL text.
///
/// Identifiers and values are interpolated into the text as-is — this engine
/// emits raw literals rather than bound parameters, and the quoting rules
/// live in the AST conversion, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

impl SQL {
    pub fn new() -> SQL {
        SQL { sql: String::new() }
    }

    /// Append a fragment of SQL syntax.
    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a table or column identifier. Identifiers are not quoted; the
    /// spec format feeds them through verbatim.
    pub fn append_identifier(&mut self, name: &str) {
        self.sql.push_str(name);
    }

    /// Append a single-quoted string literal.
    pub fn append_string_literal(&mut self, value: &str) {
        self.sql.push('\'');
        self.sql.push_str(value);
        self.sql.push('\'');
    }

    /// Append a double-quoted string literal, as used inside literal sets.
    pub fn append_set_string_literal(&mut self, value: &str) {
        self.sql.push('"');
        self.sql.push_str(value);
        self.sql.push('"');
    }
}
