use super::*;
use std::sync::{Arc, Mutex};

/// Writer whose bytes stay readable after being boxed into an `OutputWriter`
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let out = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (out, buffer)
}

#[test]
fn human_messages_are_plain_without_color() {
    let (mut out, buffer) = writer(OutputFormat::Human, false);
    out.info("Generating Tutorial for: Recursion").unwrap();
    out.warning("No plan titles found").unwrap();
    out.section("Prompt").unwrap();

    assert_eq!(
        buffer.contents(),
        "Generating Tutorial for: Recursion\nWARNING: No plan titles found\n\n=== Prompt ===\n"
    );
}

#[test]
fn quiet_suppresses_info_but_not_warnings() {
    let (mut out, buffer) = writer(OutputFormat::Human, true);
    out.info("hidden").unwrap();
    out.success("hidden too").unwrap();
    out.warning("shown").unwrap();

    assert_eq!(buffer.contents(), "WARNING: shown\n");
}

#[test]
fn machine_formats_only_carry_data() {
    let (mut out, buffer) = writer(OutputFormat::Json, false);
    out.info("not json").unwrap();
    out.data(&serde_json::json!({"title": "Recursion"})).unwrap();

    assert_eq!(buffer.contents(), "{\"title\":\"Recursion\"}\n");
}

#[test]
fn yaml_data_is_not_double_terminated() {
    let (mut out, buffer) = writer(OutputFormat::Yaml, false);
    out.data(&serde_json::json!({"title": "Recursion"})).unwrap();

    assert_eq!(buffer.contents(), "title: Recursion\n");
}

#[test]
fn table_aligns_columns() {
    let (mut out, buffer) = writer(OutputFormat::Human, false);
    out.table(
        &["Difficulty", "Title"],
        vec![
            vec!["Basic".to_string(), "Linear Algebra".to_string()],
            vec!["Advanced".to_string(), "Topology".to_string()],
        ],
    )
    .unwrap();

    let text = buffer.contents();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "Difficulty │ Title");
    assert_eq!(lines[2], "Basic      │ Linear Algebra");
    assert_eq!(lines[3], "Advanced   │ Topology");
}

#[test]
fn custom_writers_never_spin() {
    let (out, _) = writer(OutputFormat::Human, false);
    assert!(out.spinner("Generating content...").is_none());
}

#[test]
fn formatter_serializes_by_format() {
    let value = serde_json::json!({"a": 1});
    assert_eq!(OutputFormat::Json.format(&value).unwrap(), "{\"a\":1}");
    assert_eq!(OutputFormat::Yaml.format(&value).unwrap(), "a: 1\n");
    assert!(OutputFormat::JsonPretty.format(&value).unwrap().contains("\n"));
}
