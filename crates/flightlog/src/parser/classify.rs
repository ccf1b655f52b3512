/// Line classification and byte-order-mark handling
///
/// Logs exported from desktop tools frequently start with a UTF-8 BOM and
/// carry `#` comment lines (device info, firmware versions). Both have to be
/// recognised before a line is tokenized or considered for header detection.

const BOM: char = '\u{feff}';

/// What the classifier decided about a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only (after removing a leading BOM)
    Blank,
    /// First visible character is `#`
    Comment,
    /// Anything else: a header or data row
    Content,
}

impl LineKind {
    pub fn is_skippable(&self) -> bool {
        !matches!(self, LineKind::Content)
    }
}

/// Strip a single leading UTF-8 byte-order mark, if present.
///
/// Returns the original slice untouched when there is no BOM.
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix(BOM).unwrap_or(line)
}

/// Classify a line without tokenizing it.
pub fn classify(line: &str) -> LineKind {
    let without_bom = strip_bom(line);
    if without_bom.trim().is_empty() {
        return LineKind::Blank;
    }

    // Only BOM, space and tab are skipped ahead of the comment marker
    let visible = without_bom.trim_start_matches([BOM, ' ', '\t']);
    if visible.starts_with('#') {
        return LineKind::Comment;
    }

    LineKind::Content
}
