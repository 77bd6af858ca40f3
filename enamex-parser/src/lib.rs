//! # enamex
//!
//! Converts flat, line-oriented tagged-token corpora into nested, span-annotated
//! documents serialized as ENAMEX markup.
//!
//! File Layout
//!
//! Two input layouts share one conversion core. The layouts differ only in how a raw
//! line is split and how its label is normalized; everything after that (span
//! decisions, sentence and document tracking, spacing, tree assembly, serialization)
//! is common code.
//!
//! src/enamex
//!   ├── lexing       Raw lines to records (blank, document start, token, malformed)
//!   ├── labels       Label normalization into canonical classes
//!   ├── spacing      Separator inference between tokens
//!   ├── parsing      The span state machine (records to structural events)
//!   ├── assembling   Structural events to the document tree
//!   ├── ast          The Corpus / Document / Sentence / Span tree
//!   ├── formats      Serializers over the finished tree
//!   └── pipeline     End to end entry points
//!
//! The usual entry point is [`enamex::pipeline::convert_file`] together with a
//! [`enamex::layout::LayoutProfile`].

pub mod enamex;
