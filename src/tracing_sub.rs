use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

use crate::logbuf::{LogBufferHandle, LogBufferWriter, global_log_buffer, set_global_log_buffer};

/// Per-event writer. Every line lands in the in-memory buffer when one is
/// installed and is mirrored to the log file when one was given. Nothing is
/// written to the terminal the desktop is drawing on.
pub struct DelegatingWriter {
    buffer: Option<LogBufferWriter>,
    file: Option<Arc<File>>,
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(w) = self.buffer.as_mut() {
            w.write_all(buf)?;
        }
        if let Some(file) = self.file.as_deref() {
            let mut file: &File = file;
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(w) = self.buffer.as_mut() {
            w.flush()?;
        }
        if let Some(file) = self.file.as_deref() {
            let mut file: &File = file;
            file.flush()?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<File>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter {
            buffer: global_log_buffer().map(|h| h.writer()),
            file: self.file.clone(),
        }
    }
}

/// Installs the global subscriber at `level`, creating the in-memory log
/// buffer if nobody has yet. With `log_file`, lines are appended there too.
/// Later calls leave the existing subscriber in place.
pub fn init(level: Level, log_file: Option<&Path>) -> io::Result<()> {
    if global_log_buffer().is_none() {
        set_global_log_buffer(LogBufferHandle::default());
    }
    let file = match log_file {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter { file })
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}

/// Debug-level subscriber writing only to the in-memory buffer.
pub fn init_default() {
    let _ = init(Level::DEBUG, None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn writer_mirrors_into_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("desk.log");
        let file = Arc::new(File::create(&path).unwrap());
        let make = SubscriberMakeWriter { file: Some(file) };
        let mut writer = make.make_writer();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
