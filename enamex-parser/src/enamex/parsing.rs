//! Parsing module
//!
//!     Parsing turns the record stream produced by [lexing](crate::enamex::lexing) into
//!     a stream of structural events: documents, sentences and spans opening and
//!     closing around emitted tokens. This is where span boundaries are reconstructed
//!     from a label stream that only carries label continuity and optional explicit
//!     begin markers, and where separator decisions are made.
//!
//!     The events are consumed by the [assembling](crate::enamex::assembling) stage.

pub mod events;
pub mod state;

pub use events::{Event, EventSink};
pub use state::{DocumentState, MachineState, SentenceState, SpanMachine, SpanState};
