use std::io::{self, Write};

/// An in-memory sink that renderers can write to in unit tests.
///
/// Renderers write bytes, but tests almost always want to compare against a string literal, so
/// the buffer is decoded on the way out.
#[derive(Debug, Default)]
pub(crate) struct StringWriter {
    buffer: Vec<u8>,
}

impl StringWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the writer and return everything that was written to it.
    ///
    /// # Panics
    ///
    /// If the renderer wrote invalid UTF-8.
    pub fn consume(self) -> String {
        String::from_utf8(self.buffer).expect("renderers should only write UTF-8")
    }
}

impl Write for StringWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
