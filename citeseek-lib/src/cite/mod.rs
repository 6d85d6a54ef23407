//! Citation formatting
//!
//! Reconstructs a human-readable source reference (document + section) for
//! a retrieved passage. Section markers are hierarchical numbering patterns
//! like `1.` or `2.3` at the start of a heading; the text up to the next
//! sentence break is taken as the section title.
//!
//! Two strategies exist behind one entry point:
//! - text-derived: parse the passage at query time (default);
//! - metadata-derived: return the `section_label` precomputed at ingestion,
//!   avoiding a re-parse that could resolve an ambiguous passage
//!   differently run-to-run.
//!
//! The numbering regex is heuristic; prose containing number-dot patterns
//! can produce false positives, and that behavior is the contract.

use std::sync::OnceLock;

use regex::Regex;

use crate::chunk::ChunkMetadata;

/// Failure sentinel when neither a section marker nor a title is available.
pub const CITATION_UNAVAILABLE: &str = "Issues with citation";

/// Which citation strategy an engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CitationStyle {
    /// Parse the passage text at query time
    #[default]
    TextDerived,
    /// Prefer the section label precomputed at ingestion
    MetadataDerived,
}

fn section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A hierarchical section number followed by its heading text
    RE.get_or_init(|| Regex::new(r"\b((?:\d+\.)+\d*)\s*(.+)").expect("static regex"))
}

/// Formats citations for retrieved passages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CitationFormatter {
    style: CitationStyle,
}

impl CitationFormatter {
    #[must_use]
    pub fn new(style: CitationStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> CitationStyle {
        self.style
    }

    /// Produce the citation for a passage.
    ///
    /// With [`CitationStyle::MetadataDerived`] and a stored label, the label
    /// is returned as-is; otherwise the passage text is parsed.
    #[must_use]
    pub fn format(&self, passage: &str, metadata: &ChunkMetadata) -> String {
        if self.style == CitationStyle::MetadataDerived {
            if let Some(label) = &metadata.section_label {
                return label.clone();
            }
        }

        Self::derive(passage, metadata.document_title.as_deref())
    }

    /// Parse a citation out of passage text.
    ///
    /// Also used at ingestion to precompute `section_label`. Never fails:
    /// a passage without a recognizable section marker resolves to a
    /// sentinel string.
    #[must_use]
    pub fn derive(passage: &str, document_title: Option<&str>) -> String {
        let title = document_title.filter(|t| !t.is_empty());

        if let Some(caps) = section_re().captures(passage) {
            let number = caps[1].trim_end_matches('.');
            // First sentence of the heading text serves as the title
            let section_title = caps[2]
                .split('.')
                .next()
                .unwrap_or_default()
                .trim();

            match title {
                Some(t) => format!("{t}.pdf - Section {number}. {section_title}"),
                None => format!("Section {number}. {section_title}"),
            }
        } else {
            match title {
                Some(t) => format!("{t} - Section not found"),
                None => CITATION_UNAVAILABLE.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: Option<&str>, label: Option<&str>) -> ChunkMetadata {
        ChunkMetadata {
            chunk_id: 0,
            document_title: title.map(str::to_string),
            section_label: label.map(str::to_string),
        }
    }

    #[test]
    fn test_hierarchical_section_with_title() {
        let fmt = CitationFormatter::new(CitationStyle::TextDerived);
        let citation = fmt.format(
            "1.1 Public data can be shared externally. More rules follow.",
            &meta(Some("policy"), None),
        );
        assert_eq!(
            citation,
            "policy.pdf - Section 1.1. Public data can be shared externally"
        );
    }

    #[test]
    fn test_section_without_document_title() {
        let fmt = CitationFormatter::new(CitationStyle::TextDerived);
        let citation = fmt.format(
            "2.1 All LLM usage must be approved by security.",
            &meta(None, None),
        );
        assert_eq!(
            citation,
            "Section 2.1. All LLM usage must be approved by security"
        );
    }

    #[test]
    fn test_trailing_dot_stripped_from_number() {
        let citation = CitationFormatter::derive(
            "3. Incident Response procedures are defined below.",
            Some("handbook"),
        );
        assert_eq!(
            citation,
            "handbook.pdf - Section 3. Incident Response procedures are defined below"
        );
    }

    #[test]
    fn test_no_marker_with_title() {
        let fmt = CitationFormatter::new(CitationStyle::TextDerived);
        let citation = fmt.format(
            "random prose with no section markers at all",
            &meta(Some("policy"), None),
        );
        assert_eq!(citation, "policy - Section not found");
    }

    #[test]
    fn test_no_marker_no_title_sentinel() {
        let fmt = CitationFormatter::new(CitationStyle::TextDerived);
        let citation = fmt.format("random text with no numbers", &meta(None, None));
        assert_eq!(citation, CITATION_UNAVAILABLE);
    }

    #[test]
    fn test_empty_title_treated_as_absent() {
        let fmt = CitationFormatter::new(CitationStyle::TextDerived);
        let citation = fmt.format("no numbers here either", &meta(Some(""), None));
        assert_eq!(citation, CITATION_UNAVAILABLE);
    }

    #[test]
    fn test_metadata_derived_prefers_stored_label() {
        let fmt = CitationFormatter::new(CitationStyle::MetadataDerived);
        let citation = fmt.format(
            "1.1 Public data can be shared externally.",
            &meta(Some("policy"), Some("policy.pdf - Section 9.9. Stored label")),
        );
        assert_eq!(citation, "policy.pdf - Section 9.9. Stored label");
    }

    #[test]
    fn test_metadata_derived_falls_back_to_parse() {
        let fmt = CitationFormatter::new(CitationStyle::MetadataDerived);
        let citation = fmt.format(
            "1.1 Public data can be shared externally.",
            &meta(Some("policy"), None),
        );
        assert_eq!(
            citation,
            "policy.pdf - Section 1.1. Public data can be shared externally"
        );
    }

    #[test]
    fn test_text_derived_ignores_stored_label() {
        let fmt = CitationFormatter::new(CitationStyle::TextDerived);
        let citation = fmt.format(
            "1.1 Public data can be shared externally.",
            &meta(Some("policy"), Some("stale label")),
        );
        assert!(citation.starts_with("policy.pdf - Section 1.1"));
    }
}
