use md2rtf_clipboard::{ClipboardBackend, ClipboardError, MemoryClipboard};

fn round_trip(backend: &mut dyn ClipboardBackend, text: &str) -> Result<String, ClipboardError> {
    backend.write_text(text)?;
    backend.read_text()
}

#[test]
fn trait_object_round_trips_text() {
    let mut clipboard = MemoryClipboard::new();
    let value = round_trip(&mut clipboard, "Привет, мир").expect("round trip");
    assert_eq!(value, "Привет, мир");
}

#[test]
fn boxed_backend_forwards_calls() {
    let mut boxed: Box<dyn ClipboardBackend> = Box::new(MemoryClipboard::with_text("- item"));
    assert_eq!(boxed.read_text().expect("read"), "- item");
    boxed.write_text("done").expect("write");
    assert_eq!(boxed.read_text().expect("read"), "done");
}

#[test]
fn errors_render_readable_messages() {
    assert_eq!(ClipboardError::Empty.to_string(), "clipboard holds no text");
    assert_eq!(
        ClipboardError::Unavailable("no display".to_string()).to_string(),
        "clipboard unavailable: no display"
    );
}

#[test]
fn boxed_backend_forwards_persist() {
    let mut clipboard = MemoryClipboard::new();
    {
        let mut forwarded: Box<&mut MemoryClipboard> = Box::new(&mut clipboard);
        forwarded.persist().expect("persist");
    }
    assert_eq!(clipboard.persist_count(), 1);
}
