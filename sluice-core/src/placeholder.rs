use std::fmt::{self, Display, Write};

/// One occurrence of a bind parameter (`?`) in the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder {
    /// Character offset of the `?` in the statement text.
    pub source_position: usize,
    /// Parameter index. Provisional (discovery order) until the placeholder
    /// is normalized, then its rank in source order.
    pub index: u32,
}

impl Placeholder {
    pub const fn new(source_position: usize, index: u32) -> Self {
        Self {
            source_position,
            index,
        }
    }
}

impl Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Placeholder[index: {}, position: {}]",
            self.index, self.source_position
        )
    }
}

/// Turn the placeholder handles collected by the parser into the canonical
/// sequence: empty handles are dropped, the rest is ordered by source position
/// and renumbered `0..N-1`.
///
/// Placeholders sharing a source position keep their discovery order.
pub fn normalize(handles: Vec<Option<Placeholder>>) -> Vec<Placeholder> {
    let discovered = handles.len();
    let mut placeholders = handles.into_iter().flatten().collect::<Vec<_>>();
    if placeholders.len() != discovered {
        // The parser is not expected to leave empty slots, keep a trace of it
        log::debug!(
            "Discarded {} empty placeholder handles out of {} discovered",
            discovered - placeholders.len(),
            discovered
        );
    }
    placeholders.sort_by_key(|v| v.source_position);
    for (index, placeholder) in placeholders.iter_mut().enumerate() {
        placeholder.index = index as u32;
    }
    log::debug!("Normalized {} placeholders", placeholders.len());
    placeholders
}

/// A `PREPARE name AS query` statement, sole owner of its placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareStatement {
    pub name: String,
    pub query: String,
    placeholders: Vec<Placeholder>,
}

impl PrepareStatement {
    /// Create the statement taking ownership of the placeholders discovered
    /// while parsing `query`, see [`normalize`].
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        handles: Vec<Option<Placeholder>>,
    ) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            placeholders: normalize(handles),
        }
    }

    /// Normalized placeholders, in index order.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn parameters_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Diagnostic tree of the statement, each level is indented by two spaces.
    pub fn write_info(&self, out: &mut String, indent: usize) {
        let pad = |level: usize| "  ".repeat(level);
        let _ = writeln!(out, "{}PrepareStatement", pad(indent));
        let _ = writeln!(out, "{}Name: {}", pad(indent + 1), self.name);
        let _ = writeln!(out, "{}Query: {}", pad(indent + 1), self.query);
        for placeholder in &self.placeholders {
            let _ = writeln!(out, "{}{}", pad(indent + 1), placeholder);
        }
    }
}

impl Display for PrepareStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_info(&mut out, 0);
        f.write_str(&out)
    }
}
