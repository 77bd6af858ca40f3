//! Structural events
//!
//! The span state machine speaks in events; whoever consumes them implements
//! [`EventSink`]. The document assembler builds the tree from them, tests simply
//! collect them into a `Vec`.

use crate::enamex::error::Result;
use crate::enamex::labels::EntityClass;
use crate::enamex::token::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    OpenDocument,
    CloseDocument,
    OpenSentence,
    CloseSentence,
    OpenSpan {
        class: EntityClass,
        sense: Option<String>,
    },
    CloseSpan,
    /// `space_before` is the separator decision for this token. When the token opens a
    /// span, the separator belongs in front of the span opening.
    Token { token: Token, space_before: bool },
}

/// Consumer of the event stream.
pub trait EventSink {
    fn accept(&mut self, event: Event) -> Result<()>;
}

impl EventSink for Vec<Event> {
    fn accept(&mut self, event: Event) -> Result<()> {
        self.push(event);
        Ok(())
    }
}
