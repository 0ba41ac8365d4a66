//! Scope-local display numbers (contract, PR, PO, cash request numbers).
//!
//! Numbers are derived by scanning existing records in the scope and taking
//! max + 1. Nothing in storage enforces uniqueness, so two writers racing in
//! the same scope can compute the same number; callers run single-writer.

/// Next value in a plain counter: max + 1, or 1 for an empty scope.
pub fn next_number<I: IntoIterator<Item = u32>>(existing: I) -> u32 {
    existing
        .into_iter()
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

/// `PREFIX` + zero-padded counter, e.g. `CON-001` or `PR-2026-014`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNumberFormat {
    prefix: String,
    width: usize,
}

impl DisplayNumberFormat {
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn format(&self, n: u32) -> String {
        format!("{}{:0width$}", self.prefix, n, width = self.width)
    }

    /// Counter part of `display` if it belongs to this format's scope.
    pub fn suffix(&self, display: &str) -> Option<u32> {
        let rest = display.trim().strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        rest.parse().ok()
    }

    /// Next display number given the numbers already issued in scope.
    ///
    /// Numbers with another prefix or an unparsable suffix are ignored.
    pub fn next<'a, I>(&self, existing: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        let n = next_number(existing.into_iter().filter_map(|s| self.suffix(s)));
        self.format(n)
    }
}
