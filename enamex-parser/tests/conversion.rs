//! End to end conversion tests
//!
//! Sources go through the full pipeline and the `enamex` formatter. Assertions look at
//! the serialized sentence lines, which is what downstream training tools consume.

use std::path::PathBuf;

use enamex_parser::enamex::ast::Corpus;
use enamex_parser::enamex::error::ConvertError;
use enamex_parser::enamex::formats::{FormatError, FormatRegistry, MarkupOptions};
use enamex_parser::enamex::layout::{Layout, LayoutProfile};
use enamex_parser::enamex::pipeline::{convert_file, convert_str};
use rstest::rstest;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn serialize(corpus: &Corpus, profile: &LayoutProfile) -> String {
    FormatRegistry::with_defaults(MarkupOptions::for_profile(profile))
        .serialize(corpus, "enamex")
        .unwrap()
}

fn render(source: &str, profile: &LayoutProfile) -> String {
    let corpus = convert_str(source, "inline", profile).unwrap();
    serialize(&corpus, profile)
}

/// The `<sentence>` lines of a rendered corpus, indentation stripped.
fn sentence_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("<sentence"))
        .map(str::to_string)
        .collect()
}

#[rstest]
#[case::single_location_then_blank(
    Layout::Legacy,
    "Paris\tLOCATION\n\n",
    &[
        r#"<sentence xml:id="P0E1"><ENAMEX class="LOCATION">Paris</ENAMEX></sentence>"#,
        r#"<sentence xml:id="P0E2"></sentence>"#,
    ]
)]
#[case::organisation_then_outside(
    Layout::Conll,
    "EU NNP B-NP B-ORG\nrejects VBZ B-VP O\n",
    &[r#"<sentence xml:id="P0E1"><ENAMEX type="ORGANISATION">EU</ENAMEX> rejects</sentence>"#]
)]
#[case::explicit_begins_split(
    Layout::Conll,
    "New NNP I-NP B-LOC\nYork NNP I-NP B-LOC\n",
    &[r#"<sentence xml:id="P0E1"><ENAMEX type="LOCATION">New</ENAMEX><ENAMEX type="LOCATION">York</ENAMEX></sentence>"#]
)]
#[case::continuation_merges(
    Layout::Conll,
    "New NNP I-NP I-LOC\nYork NNP I-NP I-LOC\n",
    &[r#"<sentence xml:id="P0E1"><ENAMEX type="LOCATION">New York</ENAMEX></sentence>"#]
)]
#[case::unknown_code_is_outside(
    Layout::Conll,
    "Foo NNP B-NP B-XYZ\nbar NN I-NP O\n",
    &[r#"<sentence xml:id="P0E1">Foo bar</sentence>"#]
)]
#[case::punctuation_glues(
    Layout::Legacy,
    "Hello\tO\n,\tO\nworld\tO\n.\tO\n",
    &[r#"<sentence xml:id="P0E1">Hello, world.</sentence>"#]
)]
fn test_scenarios(#[case] layout: Layout, #[case] source: &str, #[case] expected: &[&str]) {
    let output = render(source, &LayoutProfile::for_layout(layout));
    assert_eq!(sentence_lines(&output), expected);
}

#[test]
fn test_legacy_fixture() {
    let profile = LayoutProfile::legacy();
    let corpus = convert_file(&fixture("lemonde.tsv"), &profile).unwrap();

    assert_eq!(corpus.documents.len(), 1);
    assert_eq!(corpus.documents[0].name, "lemonde.tsv");
    assert_eq!(corpus.sentence_count(), 2);
    assert_eq!(corpus.span_count(), 3);

    let lines = sentence_lines(&serialize(&corpus, &profile));
    insta::assert_snapshot!(lines[0], @r#"<sentence xml:id="P0E1">The <ENAMEX class="INSTITUTION" sense="bank/N1">Bank of England</ENAMEX> raised rates in <ENAMEX class="LOCATION">London</ENAMEX>.</sentence>"#);
    insta::assert_snapshot!(lines[1], @r#"<sentence xml:id="P0E2"><ENAMEX class="PERSON">Mr Smith</ENAMEX> said: yes</sentence>"#);
}

#[test]
fn test_conll_fixture() {
    let profile = LayoutProfile::conll();
    let corpus = convert_file(&fixture("eng.sample"), &profile).unwrap();

    let names: Vec<_> = corpus.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["eng.sample_1", "eng.sample_2"]);

    let output = serialize(&corpus, &profile);
    assert!(output.contains("\t\t<document name=\"eng.sample_2\">\n\t\t\t<paragraph xml:id=\"P1\">\n"));

    let lines = sentence_lines(&output);
    assert_eq!(lines.len(), 4);
    insta::assert_snapshot!(lines[0], @r#"<sentence xml:id="P0E1"></sentence>"#);
    insta::assert_snapshot!(lines[1], @r#"<sentence xml:id="P0E2"><ENAMEX type="ORGANISATION">EU</ENAMEX> rejects <ENAMEX type="UNKNOWN">German</ENAMEX> call.</sentence>"#);
    insta::assert_snapshot!(lines[2], @r#"<sentence xml:id="P0E3"></sentence>"#);
    insta::assert_snapshot!(lines[3], @r#"<sentence xml:id="P1E1"><ENAMEX type="PERSON">Peter Blackburn</ENAMEX><ENAMEX type="ORGANISATION">AT&amp;T</ENAMEX></sentence>"#);
}

#[test]
fn test_blank_lines_before_first_marker() {
    let profile = LayoutProfile::conll();
    let corpus = convert_str("\n-DOCSTART- -X- -X- O\n\nEU NNP B-NP B-ORG\n", "eng", &profile).unwrap();

    let names: Vec<_> = corpus.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["eng_1"]);
    assert_eq!(
        sentence_lines(&serialize(&corpus, &profile)),
        vec![
            r#"<sentence xml:id="P0E1"></sentence>"#,
            r#"<sentence xml:id="P0E2"><ENAMEX type="ORGANISATION">EU</ENAMEX></sentence>"#,
        ]
    );
}

#[test]
fn test_output_envelope() {
    let output = render("Paris\tLOCATION\n", &LayoutProfile::legacy());
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<corpus>\n\t<subcorpus>\n"));
    assert!(output.ends_with("\t\t\t</paragraph>\n\t\t</document>\n\t</subcorpus>\n</corpus>\n"));
}

#[test]
fn test_profile_overrides() {
    let profile = LayoutProfile::conll()
        .with_document_marker("#doc")
        .with_class_attribute("class")
        .with_punctuation(['!']);
    let output = render("#doc\nHi NNP B-NP B-PER\n! . O O\n, , O O\n", &profile);

    assert!(output.contains(r#"<document name="inline_1">"#));
    assert_eq!(
        sentence_lines(&output),
        vec![r#"<sentence xml:id="P0E1"><ENAMEX class="PERSON">Hi</ENAMEX>! ,</sentence>"#]
    );
}

#[test]
fn test_json_format() {
    let profile = LayoutProfile::legacy();
    let corpus = convert_str("Paris\tLOCATION\n", "paris.tsv", &profile).unwrap();
    let output = FormatRegistry::default().serialize(&corpus, "json").unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["documents"][0]["sentences"][0]["spans"][0]["class"], "LOCATION");
    assert_eq!(value["documents"][0]["sentences"][0]["tokens"][0]["text"], "Paris");
}

#[test]
fn test_unknown_format() {
    let corpus = convert_str("", "empty", &LayoutProfile::conll()).unwrap();
    let result = FormatRegistry::default().serialize(&corpus, "xml");
    assert_eq!(result, Err(FormatError::FormatNotFound("xml".to_string())));
}

#[test]
fn test_missing_input_reports_path() {
    let path = fixture("does-not-exist.tsv");
    let err = convert_file(&path, &LayoutProfile::legacy()).unwrap_err();
    assert!(matches!(err, ConvertError::Open { .. }));
    assert!(err.to_string().contains("does-not-exist.tsv"));
}
