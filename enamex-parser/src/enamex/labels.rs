//! Label Normalization
//!
//!     Every token line carries a raw label. Before the span state machine can decide
//!     anything, that label is mapped onto a canonical entity class plus a flag telling
//!     whether the label explicitly starts a new span.
//!
//!     The two layouts speak different label vocabularies:
//!
//!         - Legacy layout: bare class names (`PERSON`, `LOCATION`, ...) that are already
//!           canonical. `O` means outside of any entity. There is no begin marker.
//!         - Four-column layout: `B-`/`I-` prefixed short codes (`B-ORG`, `I-PER`, ...).
//!           `B-` forces a new span, `I-` continues. Codes are translated through a
//!           fixed table and anything outside it collapses to outside.
//!
//!     Normalization never fails. A malformed label column must not abort the
//!     conversion, so unknown four-column codes silently become outside and unknown
//!     legacy names are carried verbatim in [`EntityClass::Unrecognized`].

use serde::{Serialize, Serializer};
use std::fmt;

use super::layout::Layout;

/// Marker used by both layouts for "not part of any entity".
pub const OUTSIDE: &str = "O";

/// Canonical entity classes of the NER model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Unknown,
    Person,
    Location,
    Organisation,
    Acronym,
    Animal,
    Artifact,
    Business,
    Institution,
    Measure,
    Award,
    Concept,
    Conceptual,
    Creation,
    Event,
    Legal,
    Identifier,
    Installation,
    Media,
    National,
    Substance,
    Plant,
    Period,
    Title,
    PersonType,
    Website,
    AthleticTeam,
    /// A legacy class name outside the table, kept as written.
    Unrecognized(String),
}

impl EntityClass {
    /// Resolve a bare (legacy) class name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "UNKNOWN" => EntityClass::Unknown,
            "PERSON" => EntityClass::Person,
            "LOCATION" => EntityClass::Location,
            "ORGANISATION" => EntityClass::Organisation,
            "ACRONYM" => EntityClass::Acronym,
            "ANIMAL" => EntityClass::Animal,
            "ARTIFACT" => EntityClass::Artifact,
            "BUSINESS" => EntityClass::Business,
            "INSTITUTION" => EntityClass::Institution,
            "MEASURE" => EntityClass::Measure,
            "AWARD" => EntityClass::Award,
            "CONCEPT" => EntityClass::Concept,
            "CONCEPTUAL" => EntityClass::Conceptual,
            "CREATION" => EntityClass::Creation,
            "EVENT" => EntityClass::Event,
            "LEGAL" => EntityClass::Legal,
            "IDENTIFIER" => EntityClass::Identifier,
            "INSTALLATION" => EntityClass::Installation,
            "MEDIA" => EntityClass::Media,
            "NATIONAL" => EntityClass::National,
            "SUBSTANCE" => EntityClass::Substance,
            "PLANT" => EntityClass::Plant,
            "PERIOD" => EntityClass::Period,
            "TITLE" => EntityClass::Title,
            "PERSON_TYPE" => EntityClass::PersonType,
            "WEBSITE" => EntityClass::Website,
            "ATHLETIC_TEAM" => EntityClass::AthleticTeam,
            other => EntityClass::Unrecognized(other.to_string()),
        }
    }

    /// Translate a four-column short code. `None` means outside.
    pub fn from_conll_code(code: &str) -> Option<Self> {
        match code {
            "ORG" => Some(EntityClass::Organisation),
            "PER" => Some(EntityClass::Person),
            "LOC" => Some(EntityClass::Location),
            "MISC" => Some(EntityClass::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EntityClass::Unknown => "UNKNOWN",
            EntityClass::Person => "PERSON",
            EntityClass::Location => "LOCATION",
            EntityClass::Organisation => "ORGANISATION",
            EntityClass::Acronym => "ACRONYM",
            EntityClass::Animal => "ANIMAL",
            EntityClass::Artifact => "ARTIFACT",
            EntityClass::Business => "BUSINESS",
            EntityClass::Institution => "INSTITUTION",
            EntityClass::Measure => "MEASURE",
            EntityClass::Award => "AWARD",
            EntityClass::Concept => "CONCEPT",
            EntityClass::Conceptual => "CONCEPTUAL",
            EntityClass::Creation => "CREATION",
            EntityClass::Event => "EVENT",
            EntityClass::Legal => "LEGAL",
            EntityClass::Identifier => "IDENTIFIER",
            EntityClass::Installation => "INSTALLATION",
            EntityClass::Media => "MEDIA",
            EntityClass::National => "NATIONAL",
            EntityClass::Substance => "SUBSTANCE",
            EntityClass::Plant => "PLANT",
            EntityClass::Period => "PERIOD",
            EntityClass::Title => "TITLE",
            EntityClass::PersonType => "PERSON_TYPE",
            EntityClass::Website => "WEBSITE",
            EntityClass::AthleticTeam => "ATHLETIC_TEAM",
            EntityClass::Unrecognized(name) => name,
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EntityClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A normalized label: the entity class (`None` for outside) and the begin flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLabel {
    pub class: Option<EntityClass>,
    pub is_explicit_begin: bool,
}

impl CanonicalLabel {
    pub fn outside() -> Self {
        Self {
            class: None,
            is_explicit_begin: false,
        }
    }

    pub fn entity(class: EntityClass, is_explicit_begin: bool) -> Self {
        Self {
            class: Some(class),
            is_explicit_begin,
        }
    }

    pub fn is_outside(&self) -> bool {
        self.class.is_none()
    }
}

/// Normalize a raw label according to the layout it was read from.
pub fn normalize(raw_label: &str, layout: Layout) -> CanonicalLabel {
    match layout {
        Layout::Legacy => normalize_bare(raw_label),
        Layout::Conll => normalize_prefixed(raw_label),
    }
}

/// Legacy labels are canonical already. An empty class column counts as outside.
pub fn normalize_bare(raw_label: &str) -> CanonicalLabel {
    if raw_label == OUTSIDE || raw_label.is_empty() {
        return CanonicalLabel::outside();
    }
    CanonicalLabel::entity(EntityClass::from_name(raw_label), false)
}

/// Four-column labels: strip the `B-`/`I-` prefix, then translate the short code.
pub fn normalize_prefixed(raw_label: &str) -> CanonicalLabel {
    let (code, is_explicit_begin) = match raw_label.strip_prefix("B-") {
        Some(code) => (code, true),
        None => (raw_label.strip_prefix("I-").unwrap_or(raw_label), false),
    };

    match EntityClass::from_conll_code(code) {
        Some(class) => CanonicalLabel::entity(class, is_explicit_begin),
        None => CanonicalLabel::outside(),
    }
}
