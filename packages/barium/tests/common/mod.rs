use std::io::Write;
use std::sync::{Arc, Mutex};

/// A cloneable in-memory sink for inspecting what a bar wrote.
#[derive(Clone, Default)]
pub struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// The non-empty lines written so far, `\r` treated as a line break.
    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .split(['\n', '\r'])
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.to_string())
            .collect()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
