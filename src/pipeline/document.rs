pub const HEADLINE_PREFIX: &str = "HEADLINE: ";
pub const BODY_MARKER: &str = "ARTICLE BODY:";

/// Surviving lines after the cap. The first line is the headline, the rest
/// is the body; position carries the role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Keep at most `max_lines`, earliest first.
    pub fn assemble(mut lines: Vec<String>, max_lines: usize) -> Self {
        lines.truncate(max_lines);
        Document { lines }
    }

    pub fn headline(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn body(&self) -> &[String] {
        self.lines.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `HEADLINE: <first>`, `ARTICLE BODY:`, then one record per body line.
    /// An empty document has no records at all.
    pub fn records(&self) -> Vec<String> {
        let Some(headline) = self.headline() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.lines.len() + 1);
        out.push(format!("{}{}", HEADLINE_PREFIX, headline));
        out.push(BODY_MARKER.to_string());
        out.extend(self.body().iter().cloned());
        out
    }
}
