//! Tests for logging functionality
//!
//! Only one global subscriber can be installed per test binary, so most of
//! these check that initialization fails gracefully rather than panicking.

use std::io;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use xml2models::core::logging::{init_logging, LogFormat, DEFAULT_LOG_LEVEL};

const CONFLICTING_REVERSE_NAMES: &str = r#"<model><classes>
    <class ID="A"><relations>
        <relation ID="R"><sourceClass target="A"/><targetClass target="B"/><name>r</name><reverseName>x</reverseName></relation>
        <relation ID="R"><sourceClass target="A"/><targetClass target="B"/><name>r</name><reverseName>y</reverseName></relation>
    </relations></class>
</classes></model>"#;

/// Collects formatted events so a test can inspect them
#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl CaptureWriter {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("").is_err());
}

#[test]
fn test_default_level_shows_warnings() {
    assert_eq!(DEFAULT_LOG_LEVEL, "warn");
}

#[test]
fn test_init_logging_with_levels() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(Some("xml2models::model=trace"), None);
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_extraction_runs_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));
    // Conflicting reverse names only produce a warning event
    let db = xml2models::extract(CONFLICTING_REVERSE_NAMES, "m.xml").unwrap();
    assert_eq!(db.relation("r").unwrap().name_reverse, "x");
}

#[test]
fn test_reverse_name_mismatch_emits_warning() {
    let writer = CaptureWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let db = xml2models::extract(CONFLICTING_REVERSE_NAMES, "m.xml").unwrap();
    assert_eq!(db.relation("r").unwrap().name_reverse, "x");

    let output = writer.contents();
    assert!(output.contains("WARN"), "captured: {output}");
    assert!(output.contains("Reverse name mismatch"), "captured: {output}");
    assert!(output.contains("kept=x"), "captured: {output}");
    assert!(output.contains("dropped=y"), "captured: {output}");
}

#[test]
fn test_consistent_relations_emit_no_warning() {
    let writer = CaptureWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let input = CONFLICTING_REVERSE_NAMES.replace("<reverseName>y<", "<reverseName>x<");
    xml2models::extract(&input, "m.xml").unwrap();

    assert!(!writer.contents().contains("Reverse name mismatch"));
}
