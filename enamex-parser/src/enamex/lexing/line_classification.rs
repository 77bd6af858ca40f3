//! Line Classification
//!
//! Core classification logic for turning one raw line into a [`LineRecord`].
//! The checks run in a fixed order: document marker first (on the raw line, before any
//! trimming), then blank, then the layout-specific column split.
use crate::enamex::labels::normalize;
use crate::enamex::layout::{Layout, LayoutProfile};
use crate::enamex::token::{LineRecord, Token};

/// Legacy sense column value meaning "no sense given".
const NO_SENSE: &str = "N/A";
/// Column holding the label in the conll layout.
const CONLL_LABEL_COLUMN: usize = 3;

/// Classifies raw lines for one layout.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    layout: Layout,
    document_marker: Option<String>,
}

impl LineClassifier {
    pub fn new(profile: &LayoutProfile) -> Self {
        let document_marker = match profile.layout {
            Layout::Conll => profile.document_marker.clone(),
            Layout::Legacy => None,
        };
        Self {
            layout: profile.layout,
            document_marker,
        }
    }

    /// Determine the record for a line (without its line terminator).
    pub fn classify(&self, line: &str) -> LineRecord {
        if let Some(marker) = &self.document_marker {
            if line.starts_with(marker.as_str()) {
                return LineRecord::DocumentStart;
            }
        }
        let stripped = line.trim();
        if stripped.is_empty() {
            return LineRecord::Blank;
        }
        match self.layout {
            Layout::Legacy => classify_legacy(stripped),
            Layout::Conll => classify_conll(stripped),
        }
    }
}

/// `token<TAB>class[<TAB>sense]`. Anything but two or three columns is malformed.
fn classify_legacy(stripped: &str) -> LineRecord {
    let columns: Vec<&str> = stripped.split(Layout::Legacy.column_separator()).collect();
    match columns.as_slice() {
        [text, class] => token_record(text, class, None, Layout::Legacy),
        [text, class, sense] => {
            let sense = (*sense != NO_SENSE).then(|| sense.to_string());
            token_record(text, class, sense, Layout::Legacy)
        }
        _ => LineRecord::Malformed {
            columns: columns.len(),
        },
    }
}

/// `token pos chunk label [...]`. Fewer than four columns is malformed.
fn classify_conll(stripped: &str) -> LineRecord {
    let columns: Vec<&str> = stripped.split(Layout::Conll.column_separator()).collect();
    if columns.len() <= CONLL_LABEL_COLUMN {
        return LineRecord::Malformed {
            columns: columns.len(),
        };
    }
    token_record(columns[0], columns[CONLL_LABEL_COLUMN], None, Layout::Conll)
}

fn token_record(text: &str, raw_label: &str, sense: Option<String>, layout: Layout) -> LineRecord {
    LineRecord::Token {
        token: Token::new(text, raw_label),
        label: normalize(raw_label, layout),
        sense,
    }
}
