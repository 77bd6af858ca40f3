//! Conversion pipeline
//!
//!     reader -> lexing -> span machine -> assembler -> Corpus
//!
//!     The whole conversion is one fold over the record stream. Serializing the corpus
//!     is left to the caller (see [`formats`](crate::enamex::formats)), as is writing it
//!     out; [`write_output`] exists so callers report write failures the same way.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use tracing::{debug, info};

use super::assembling::DocumentAssembler;
use super::ast::Corpus;
use super::error::{ConvertError, Result};
use super::layout::LayoutProfile;
use super::lexing::records;
use super::parsing::SpanMachine;

/// Convert a tagged-token stream into a corpus tree.
///
/// `source_name` names the documents: it is used as is by the legacy layout and
/// suffixed with `_<k>` by the conll layout.
pub fn convert<R: BufRead>(reader: R, source_name: &str, profile: &LayoutProfile) -> Result<Corpus> {
    let machine = SpanMachine::new(profile);
    let mut assembler = DocumentAssembler::new(source_name, profile.layout);
    let mut skipped = 0usize;

    let state = machine.start(&mut assembler)?;
    let state = records(reader, profile).try_fold(state, |state, item| {
        let (line, record) = item?;
        if record.is_malformed() {
            skipped += 1;
        }
        debug!(line, ?record, "record");
        machine.step(state, record, &mut assembler)
    })?;
    machine.finish(state, &mut assembler)?;
    let corpus = assembler.finish()?;

    info!(
        source = source_name,
        layout = %profile.layout,
        documents = corpus.documents.len(),
        sentences = corpus.sentence_count(),
        spans = corpus.span_count(),
        skipped,
        "conversion finished"
    );
    Ok(corpus)
}

pub fn convert_str(source: &str, source_name: &str, profile: &LayoutProfile) -> Result<Corpus> {
    convert(Cursor::new(source), source_name, profile)
}

/// Convert a file. Documents are named after the file's base name.
pub fn convert_file(path: &Path, profile: &LayoutProfile) -> Result<Corpus> {
    let file = File::open(path).map_err(|source| ConvertError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    convert(BufReader::new(file), &source_name(path), profile)
}

/// Write serialized output, replacing any existing file.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
