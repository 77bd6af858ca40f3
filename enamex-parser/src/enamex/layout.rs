//! Input layouts
//!
//!     A conversion run reads exactly one layout:
//!
//!         - Legacy: tab separated `token  class  [sense]`, bare class names, a single
//!           implicit document.
//!         - Conll: space separated four-column records with a `B-`/`I-` prefixed
//!           label in column 3, and `-DOCSTART-` lines separating documents.
//!
//!     [`LayoutProfile`] bundles the per-layout knobs that the rest of the pipeline
//!     consults (punctuation for spacing, the document marker, the span attribute name).
//!     The built-in profiles reproduce the historical converters; the config crate can
//!     override each field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::spacing::Spacer;

pub const DEFAULT_DOCUMENT_MARKER: &str = "-DOCSTART-";

const LEGACY_PUNCTUATION: &[char] = &[':', ';', '.', ','];
const CONLL_PUNCTUATION: &[char] = &[':', ';', '.', ',', '"', '(', ')', '[', ']'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    Legacy,
    Conll,
}

impl Layout {
    pub fn name(self) -> &'static str {
        match self {
            Layout::Legacy => "legacy",
            Layout::Conll => "conll",
        }
    }

    pub fn column_separator(self) -> char {
        match self {
            Layout::Legacy => '\t',
            Layout::Conll => ' ',
        }
    }

    /// Whether spacing decisions look at the markup-escaped token text.
    pub fn spaces_escaped_text(self) -> bool {
        matches!(self, Layout::Conll)
    }

    /// Whether document names carry a per-marker counter suffix.
    pub fn numbers_documents(self) -> bool {
        matches!(self, Layout::Conll)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Layout::Legacy),
            "conll" => Ok(Layout::Conll),
            other => Err(format!("Unknown layout '{other}' (expected legacy or conll)")),
        }
    }
}

/// Everything a conversion run needs to know about its input layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProfile {
    pub layout: Layout,
    /// Characters that suppress the separator before a token containing them.
    pub punctuation: Vec<char>,
    /// Line prefix that starts a new document. Only honored by the conll layout.
    pub document_marker: Option<String>,
    /// Attribute name carrying the entity class on span elements.
    pub class_attribute: String,
}

impl LayoutProfile {
    pub fn legacy() -> Self {
        Self {
            layout: Layout::Legacy,
            punctuation: LEGACY_PUNCTUATION.to_vec(),
            document_marker: None,
            class_attribute: "class".to_string(),
        }
    }

    pub fn conll() -> Self {
        Self {
            layout: Layout::Conll,
            punctuation: CONLL_PUNCTUATION.to_vec(),
            document_marker: Some(DEFAULT_DOCUMENT_MARKER.to_string()),
            class_attribute: "type".to_string(),
        }
    }

    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::Legacy => Self::legacy(),
            Layout::Conll => Self::conll(),
        }
    }

    pub fn with_punctuation(mut self, punctuation: impl IntoIterator<Item = char>) -> Self {
        self.punctuation = punctuation.into_iter().collect();
        self
    }

    /// Ignored for the legacy layout, which has no document boundaries.
    pub fn with_document_marker(mut self, marker: impl Into<String>) -> Self {
        if self.layout == Layout::Conll {
            self.document_marker = Some(marker.into());
        }
        self
    }

    pub fn with_class_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.class_attribute = attribute.into();
        self
    }

    pub fn spacer(&self) -> Spacer {
        Spacer::new(
            self.punctuation.iter().copied(),
            self.layout.spaces_escaped_text(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trips_through_name() {
        for layout in [Layout::Legacy, Layout::Conll] {
            assert_eq!(layout.name().parse::<Layout>(), Ok(layout));
        }
        assert!("csv".parse::<Layout>().is_err());
    }

    #[test]
    fn test_builtin_profiles() {
        let legacy = LayoutProfile::legacy();
        assert_eq!(legacy.document_marker, None);
        assert_eq!(legacy.class_attribute, "class");
        assert_eq!(legacy.punctuation.len(), 4);

        let conll = LayoutProfile::conll();
        assert_eq!(conll.document_marker.as_deref(), Some("-DOCSTART-"));
        assert_eq!(conll.class_attribute, "type");
        assert!(conll.punctuation.contains(&'['));
    }

    #[test]
    fn test_legacy_ignores_document_marker() {
        let legacy = LayoutProfile::legacy().with_document_marker("###");
        assert_eq!(legacy.document_marker, None);

        let conll = LayoutProfile::conll().with_document_marker("###");
        assert_eq!(conll.document_marker.as_deref(), Some("###"));
    }
}
