//! Property-based tests for span reconstruction
//!
//! Random label streams (with sentence breaks and document markers mixed in) are run
//! through the state machine and the pipeline. Whatever the stream, the structural
//! guarantees below must hold.

use enamex_parser::enamex::ast::Corpus;
use enamex_parser::enamex::labels::normalize;
use enamex_parser::enamex::layout::{Layout, LayoutProfile};
use enamex_parser::enamex::lexing::lex;
use enamex_parser::enamex::parsing::{Event, SpanMachine};
use enamex_parser::enamex::pipeline::convert_str;
use proptest::prelude::*;

const MARKER: &str = "-DOCSTART- -X- -X- O";

#[derive(Debug, Clone)]
enum Line {
    Token(String, String),
    Blank,
    Marker,
}

fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z]{1,8}",
        1 => prop::sample::select(vec![":", ";", ".", ",", "(", "&", "'s"]).prop_map(String::from),
    ]
}

fn conll_label_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "O", "O", "B-ORG", "I-ORG", "B-PER", "I-PER", "B-LOC", "I-LOC", "B-MISC", "I-MISC",
        "I-XYZ",
    ])
    .prop_map(String::from)
}

fn legacy_label_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["O", "O", "PERSON", "LOCATION", "ORGANISATION", "ANIMAL"])
        .prop_map(String::from)
}

fn conll_source_strategy() -> impl Strategy<Value = (String, usize)> {
    let line = prop_oneof![
        8 => (word_strategy(), conll_label_strategy()).prop_map(|(w, l)| Line::Token(w, l)),
        2 => Just(Line::Blank),
        1 => Just(Line::Marker),
    ];
    (0..3usize, prop::collection::vec(line, 0..60)).prop_map(|(leading_blanks, lines)| {
        // Blank lines ahead of the first marker open nothing
        let mut source = "\n".repeat(leading_blanks);
        source.push_str(MARKER);
        source.push('\n');
        let mut markers = 1;
        for line in lines {
            match line {
                Line::Token(word, label) => source.push_str(&format!("{word} NN I-NP {label}\n")),
                Line::Blank => source.push('\n'),
                Line::Marker => {
                    markers += 1;
                    source.push_str(MARKER);
                    source.push('\n');
                }
            }
        }
        (source, markers)
    })
}

fn legacy_source_strategy() -> impl Strategy<Value = (String, usize)> {
    let line = prop_oneof![
        5 => (word_strategy(), legacy_label_strategy()).prop_map(|(w, l)| Line::Token(w, l)),
        1 => Just(Line::Blank),
    ];
    prop::collection::vec(line, 0..60).prop_map(|lines| {
        let mut source = String::new();
        let mut blanks = 0;
        for line in lines {
            match line {
                Line::Token(word, label) => source.push_str(&format!("{word}\t{label}\n")),
                Line::Blank | Line::Marker => {
                    blanks += 1;
                    source.push('\n');
                }
            }
        }
        (source, blanks)
    })
}

fn events(source: &str, profile: &LayoutProfile) -> Vec<Event> {
    let mut sink = Vec::new();
    SpanMachine::new(profile)
        .run(lex(source, profile), &mut sink)
        .unwrap();
    sink
}

fn check_spans(corpus: &Corpus, layout: Layout) -> Result<(), TestCaseError> {
    for sentence in corpus.documents.iter().flat_map(|d| &d.sentences) {
        for (index, placed) in sentence.tokens.iter().enumerate() {
            let label = normalize(&placed.token.raw_label, layout);
            let covering = sentence.span_covering(index);

            // Outside never inside a span, entity tokens always inside one
            prop_assert_eq!(label.is_outside(), covering.is_none());

            if index == 0 {
                continue;
            }
            let previous = normalize(&sentence.tokens[index - 1].token.raw_label, layout);
            if let (Some(class), Some(previous_class)) = (&label.class, &previous.class) {
                let starts_here = sentence.span_starting_at(index).is_some();
                if class == previous_class && !label.is_explicit_begin {
                    prop_assert!(!starts_here, "continuation split at token {}", index);
                } else {
                    prop_assert!(starts_here, "missing split at token {}", index);
                }
            }
        }
    }
    Ok(())
}

fn check_punctuation(corpus: &Corpus) -> Result<(), TestCaseError> {
    for sentence in corpus.documents.iter().flat_map(|d| &d.sentences) {
        for placed in &sentence.tokens {
            if [":", ";", ".", ","].contains(&placed.token.text.as_str()) {
                prop_assert!(!placed.space_before, "separator before {:?}", placed.token.text);
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn span_events_are_balanced((source, _) in conll_source_strategy()) {
        let events = events(&source, &LayoutProfile::conll());
        let opened = events.iter().filter(|e| matches!(e, Event::OpenSpan { .. })).count();
        let closed = events.iter().filter(|e| **e == Event::CloseSpan).count();
        prop_assert_eq!(opened, closed);

        let sentences_opened = events.iter().filter(|e| **e == Event::OpenSentence).count();
        let sentences_closed = events.iter().filter(|e| **e == Event::CloseSentence).count();
        prop_assert_eq!(sentences_opened, sentences_closed);
    }

    #[test]
    fn conll_spans_follow_labels((source, _) in conll_source_strategy()) {
        let corpus = convert_str(&source, "eng", &LayoutProfile::conll()).unwrap();
        check_spans(&corpus, Layout::Conll)?;
        check_punctuation(&corpus)?;
    }

    #[test]
    fn legacy_spans_follow_labels((source, _) in legacy_source_strategy()) {
        let corpus = convert_str(&source, "legacy.tsv", &LayoutProfile::legacy()).unwrap();
        check_spans(&corpus, Layout::Legacy)?;
        check_punctuation(&corpus)?;
    }

    #[test]
    fn legacy_blank_lines_separate_sentences((source, blanks) in legacy_source_strategy()) {
        let corpus = convert_str(&source, "legacy.tsv", &LayoutProfile::legacy()).unwrap();
        prop_assert_eq!(corpus.documents.len(), 1);
        prop_assert_eq!(corpus.sentence_count(), blanks + 1);
    }

    #[test]
    fn one_document_per_marker((source, markers) in conll_source_strategy()) {
        let corpus = convert_str(&source, "eng", &LayoutProfile::conll()).unwrap();
        let names: Vec<String> = corpus.documents.iter().map(|d| d.name.clone()).collect();
        let expected: Vec<String> = (1..=markers).map(|k| format!("eng_{k}")).collect();
        prop_assert_eq!(names, expected);

        for (index, document) in corpus.documents.iter().enumerate() {
            let prefix = format!("P{index}E");
            for (n, sentence) in document.sentences.iter().enumerate() {
                prop_assert_eq!(&sentence.id, &format!("{prefix}{}", n + 1));
            }
        }
    }
}
