//! Span state machine
//!
//!     The machine tracks three nesting levels (document, sentence, span), each as its
//!     own small state enum. The combined [`MachineState`] is a plain value: every
//!     [`SpanMachine::step`] takes the current state by value together with one record,
//!     pushes the resulting events into a sink and hands back the next state. A whole
//!     conversion is a fold over the records.
//!
//! Transition rules
//!
//!     Document start (conll only): with a document open, close span, sentence and
//!     document, then open a new document with no sentence. The first marker opens the
//!     first document together with its first sentence.
//!
//!     Blank line: close the open span and sentence, open a fresh sentence. With no
//!     sentence open, just open one. Before the first document (conll only) a blank
//!     line carries nothing and is dropped.
//!
//!     Outside token: close an open span (the closing is a word boundary, so the
//!     spacer decides the separator). Otherwise the token is separated unless it is the
//!     first token of its sentence.
//!
//!     Entity token:
//!         - no span open: open one, separated as above (the separator goes in front of
//!           the span opening);
//!         - same class, no explicit begin: the span continues;
//!         - different class or explicit begin: close and reopen. The first token of
//!           the reopened span is glued to the closing.
//!
//!     Malformed records have no structural effect.
//!
//!     At the end of input everything still open is closed, innermost first.
//!
//!     A token arriving before any document (or outside any sentence) implicitly opens
//!     what is missing.

use crate::enamex::error::Result;
use crate::enamex::labels::{CanonicalLabel, EntityClass};
use crate::enamex::layout::{Layout, LayoutProfile};
use crate::enamex::spacing::Spacer;
use crate::enamex::token::{LineRecord, Token};

use super::events::{Event, EventSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceState {
    Closed,
    Open { first_token: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanState {
    Closed,
    Open(EntityClass),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineState {
    pub document: DocumentState,
    pub sentence: SentenceState,
    pub span: SpanState,
}

impl MachineState {
    pub fn initial() -> Self {
        Self {
            document: DocumentState::Closed,
            sentence: SentenceState::Closed,
            span: SpanState::Closed,
        }
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::initial()
    }
}

/// The transition function. Holds only read-only configuration; all mutable
/// state lives in the [`MachineState`] values threaded through it.
#[derive(Debug, Clone)]
pub struct SpanMachine {
    layout: Layout,
    spacer: Spacer,
}

impl SpanMachine {
    pub fn new(profile: &LayoutProfile) -> Self {
        Self {
            layout: profile.layout,
            spacer: profile.spacer(),
        }
    }

    /// Produce the opening events. The legacy layout has a single implicit document
    /// which is open from the very first line.
    pub fn start<S: EventSink>(&self, sink: &mut S) -> Result<MachineState> {
        let state = MachineState::initial();
        match self.layout {
            Layout::Legacy => self.open_first_document(sink),
            Layout::Conll => Ok(state),
        }
    }

    pub fn step<S: EventSink>(
        &self,
        state: MachineState,
        record: LineRecord,
        sink: &mut S,
    ) -> Result<MachineState> {
        match record {
            LineRecord::DocumentStart => self.document_start(state, sink),
            LineRecord::Blank => self.sentence_break(state, sink),
            LineRecord::Token {
                token,
                label,
                sense,
            } => self.token(state, token, label, sense, sink),
            LineRecord::Malformed { .. } => Ok(state),
        }
    }

    /// Close whatever is still open.
    pub fn finish<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<()> {
        self.close_document(state, sink).map(|_| ())
    }

    /// Run a complete conversion over in-memory records.
    pub fn run<I, S>(&self, records: I, sink: &mut S) -> Result<()>
    where
        I: IntoIterator<Item = LineRecord>,
        S: EventSink,
    {
        let state = self.start(sink)?;
        let state = records
            .into_iter()
            .try_fold(state, |state, record| self.step(state, record, sink))?;
        self.finish(state, sink)
    }

    fn document_start<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<MachineState> {
        match state.document {
            DocumentState::Open => {
                self.close_document(state, sink)?;
                sink.accept(Event::OpenDocument)?;
                Ok(MachineState {
                    document: DocumentState::Open,
                    sentence: SentenceState::Closed,
                    span: SpanState::Closed,
                })
            }
            DocumentState::Closed => self.open_first_document(sink),
        }
    }

    fn sentence_break<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<MachineState> {
        if state.document == DocumentState::Closed {
            tracing::debug!("blank line before the first document, ignored");
            return Ok(state);
        }
        let state = self.close_sentence(state, sink)?;
        sink.accept(Event::OpenSentence)?;
        Ok(MachineState {
            sentence: SentenceState::Open { first_token: true },
            ..state
        })
    }

    fn token<S: EventSink>(
        &self,
        state: MachineState,
        token: Token,
        label: CanonicalLabel,
        sense: Option<String>,
        sink: &mut S,
    ) -> Result<MachineState> {
        let state = self.ensure_document(state, sink)?;
        let (state, first_token) = self.ensure_sentence(state, sink)?;
        let separated = self.spacer.needs_separator_before(&token.text);
        let MachineState { document, span, .. } = state;

        let (span, space_before) = match (label.class, span) {
            (None, SpanState::Open(_)) => {
                sink.accept(Event::CloseSpan)?;
                (SpanState::Closed, separated)
            }
            (None, SpanState::Closed) => (SpanState::Closed, separated && !first_token),
            (Some(class), SpanState::Closed) => {
                sink.accept(Event::OpenSpan {
                    class: class.clone(),
                    sense,
                })?;
                (SpanState::Open(class), separated && !first_token)
            }
            (Some(class), SpanState::Open(current))
                if class == current && !label.is_explicit_begin =>
            {
                (SpanState::Open(current), separated)
            }
            (Some(class), SpanState::Open(_)) => {
                sink.accept(Event::CloseSpan)?;
                sink.accept(Event::OpenSpan {
                    class: class.clone(),
                    sense,
                })?;
                (SpanState::Open(class), false)
            }
        };

        sink.accept(Event::Token {
            token,
            space_before,
        })?;
        Ok(MachineState {
            document,
            sentence: SentenceState::Open { first_token: false },
            span,
        })
    }

    fn open_first_document<S: EventSink>(&self, sink: &mut S) -> Result<MachineState> {
        sink.accept(Event::OpenDocument)?;
        sink.accept(Event::OpenSentence)?;
        Ok(MachineState {
            document: DocumentState::Open,
            sentence: SentenceState::Open { first_token: true },
            span: SpanState::Closed,
        })
    }

    fn ensure_document<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<MachineState> {
        match state.document {
            DocumentState::Open => Ok(state),
            DocumentState::Closed => {
                tracing::warn!("content before the first document marker, opening a document");
                self.open_first_document(sink)
            }
        }
    }

    fn ensure_sentence<S: EventSink>(
        &self,
        state: MachineState,
        sink: &mut S,
    ) -> Result<(MachineState, bool)> {
        match state.sentence {
            SentenceState::Open { first_token } => Ok((state, first_token)),
            SentenceState::Closed => {
                tracing::warn!("token outside of a sentence, opening one");
                sink.accept(Event::OpenSentence)?;
                let state = MachineState {
                    sentence: SentenceState::Open { first_token: true },
                    ..state
                };
                Ok((state, true))
            }
        }
    }

    fn close_span<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<MachineState> {
        if let SpanState::Open(_) = state.span {
            sink.accept(Event::CloseSpan)?;
        }
        Ok(MachineState {
            span: SpanState::Closed,
            ..state
        })
    }

    fn close_sentence<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<MachineState> {
        let state = self.close_span(state, sink)?;
        if let SentenceState::Open { .. } = state.sentence {
            sink.accept(Event::CloseSentence)?;
        }
        Ok(MachineState {
            sentence: SentenceState::Closed,
            ..state
        })
    }

    fn close_document<S: EventSink>(&self, state: MachineState, sink: &mut S) -> Result<MachineState> {
        let state = self.close_sentence(state, sink)?;
        if state.document == DocumentState::Open {
            sink.accept(Event::CloseDocument)?;
        }
        Ok(MachineState::initial())
    }
}
