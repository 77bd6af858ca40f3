//! Assembling module
//!
//!     The assembling stage consumes the structural events of the span state machine
//!     and materializes the [`Corpus`] tree. It owns the tree exclusively until
//!     [`DocumentAssembler::finish`] hands it over.
//!
//!     Identifiers are assigned here:
//!
//!         - document `i` (0-based) gets the paragraph id `P<i>`;
//!         - its sentences are `P<i>E<n>`, with `n` counting from 1 within the document;
//!         - document names are the source name, suffixed with `_<k>` (k counting from 1)
//!           when the layout numbers its documents.
//!
//!     The assembler validates structural containment only: a token outside a sentence,
//!     a close without an open, or a span without tokens are structure errors. The span
//!     state machine never produces any of them.

use super::ast::{Corpus, Document, PlacedToken, Sentence, Span};
use super::error::{ConvertError, Result};
use super::labels::EntityClass;
use super::layout::Layout;
use super::parsing::{Event, EventSink};
use tracing::trace;

/// A span that has been opened but not yet closed.
#[derive(Debug)]
struct OpenSpan {
    class: EntityClass,
    sense: Option<String>,
    token_start: usize,
}

#[derive(Debug)]
pub struct DocumentAssembler {
    source_name: String,
    numbered: bool,
    corpus: Corpus,
    document: Option<Document>,
    sentence: Option<Sentence>,
    span: Option<OpenSpan>,
    documents_opened: usize,
}

impl DocumentAssembler {
    pub fn new(source_name: impl Into<String>, layout: Layout) -> Self {
        Self {
            source_name: source_name.into(),
            numbered: layout.numbers_documents(),
            corpus: Corpus::default(),
            document: None,
            sentence: None,
            span: None,
            documents_opened: 0,
        }
    }

    /// Hand over the finished tree. Fails if anything is still open.
    pub fn finish(self) -> Result<Corpus> {
        if self.span.is_some() || self.sentence.is_some() || self.document.is_some() {
            return Err(structure("conversion ended with open elements"));
        }
        Ok(self.corpus)
    }

    fn open_document(&mut self) -> Result<()> {
        if self.document.is_some() {
            return Err(structure("document opened inside a document"));
        }
        let index = self.corpus.documents.len();
        self.documents_opened += 1;
        let name = if self.numbered {
            format!("{}_{}", self.source_name, self.documents_opened)
        } else {
            self.source_name.clone()
        };
        self.document = Some(Document {
            name,
            paragraph_id: format!("P{index}"),
            sentences: Vec::new(),
        });
        Ok(())
    }

    fn close_document(&mut self) -> Result<()> {
        if self.sentence.is_some() {
            return Err(structure("document closed with an open sentence"));
        }
        let document = self
            .document
            .take()
            .ok_or_else(|| structure("document closed without being opened"))?;
        self.corpus.documents.push(document);
        Ok(())
    }

    fn open_sentence(&mut self) -> Result<()> {
        if self.sentence.is_some() {
            return Err(structure("sentence opened inside a sentence"));
        }
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| structure("sentence opened outside a document"))?;
        let number = document.sentences.len() + 1;
        self.sentence = Some(Sentence::new(format!("{}E{number}", document.paragraph_id)));
        Ok(())
    }

    fn close_sentence(&mut self) -> Result<()> {
        if self.span.is_some() {
            return Err(structure("sentence closed with an open span"));
        }
        let sentence = self
            .sentence
            .take()
            .ok_or_else(|| structure("sentence closed without being opened"))?;
        trace!(id = %sentence.id, empty = sentence.is_empty(), text = %sentence.text(), "sentence");
        match self.document.as_mut() {
            Some(document) => {
                document.sentences.push(sentence);
                Ok(())
            }
            None => Err(structure("sentence closed outside a document")),
        }
    }

    fn open_span(&mut self, class: EntityClass, sense: Option<String>) -> Result<()> {
        if self.span.is_some() {
            return Err(structure("span opened inside a span"));
        }
        let sentence = self
            .sentence
            .as_ref()
            .ok_or_else(|| structure("span opened outside a sentence"))?;
        self.span = Some(OpenSpan {
            class,
            sense,
            token_start: sentence.tokens.len(),
        });
        Ok(())
    }

    fn close_span(&mut self) -> Result<()> {
        let open = self
            .span
            .take()
            .ok_or_else(|| structure("span closed without being opened"))?;
        let sentence = self
            .sentence
            .as_mut()
            .ok_or_else(|| structure("span closed outside a sentence"))?;
        if sentence.tokens.len() <= open.token_start {
            return Err(structure("span closed without tokens"));
        }
        let span = Span {
            class: open.class,
            sense: open.sense,
            token_start: open.token_start,
            token_end: sentence.tokens.len() - 1,
        };
        trace!(
            class = %span.class,
            tokens = span.token_count(),
            text = %sentence.span_text(&span),
            "span"
        );
        sentence.spans.push(span);
        Ok(())
    }

    fn push_token(&mut self, token: PlacedToken) -> Result<()> {
        let sentence = self
            .sentence
            .as_mut()
            .ok_or_else(|| structure("token outside a sentence"))?;
        sentence.tokens.push(token);
        Ok(())
    }
}

impl EventSink for DocumentAssembler {
    fn accept(&mut self, event: Event) -> Result<()> {
        match event {
            Event::OpenDocument => self.open_document(),
            Event::CloseDocument => self.close_document(),
            Event::OpenSentence => self.open_sentence(),
            Event::CloseSentence => self.close_sentence(),
            Event::OpenSpan { class, sense } => self.open_span(class, sense),
            Event::CloseSpan => self.close_span(),
            Event::Token {
                token,
                space_before,
            } => self.push_token(PlacedToken {
                token,
                space_before,
            }),
        }
    }
}

fn structure(message: &str) -> ConvertError {
    ConvertError::Structure(message.to_string())
}
