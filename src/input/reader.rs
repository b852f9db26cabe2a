//! Line reader over plain or gzip-compressed log files.

use crate::utils::config::GZIP_MAGIC;
use crate::utils::error::InputError;
use flate2::read::MultiGzDecoder;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads a log one line at a time
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected; GC
/// logs are ASCII in practice.
pub struct LogReader {
    inner: Box<dyn BufRead>,
    source: String,
    buf: Vec<u8>,
}

impl LogReader {
    /// Wrap any buffered reader; `source` names it in error messages
    pub fn new(inner: Box<dyn BufRead>, source: impl Into<String>) -> Self {
        Self {
            inner,
            source: source.into(),
            buf: Vec::new(),
        }
    }

    /// Next line without its trailing newline, `None` at end of input
    pub fn next_line(&mut self) -> Result<Option<String>, InputError> {
        self.buf.clear();

        let read = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| InputError::Read {
                path: self.source.clone(),
                source,
            })?;

        if read == 0 {
            return Ok(None);
        }

        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl Iterator for LogReader {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Open a log file, transparently decompressing gzip content
///
/// Compression is detected from the leading magic bytes, not the file name.
///
/// # Errors
/// * `InputError::Open` - the file cannot be opened
/// * `InputError::Read` - the first bytes cannot be read
pub fn open_log(path: impl AsRef<Path>) -> Result<LogReader, InputError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    debug!("Opening log file: {}", display);

    let file = File::open(path).map_err(|source| InputError::Open {
        path: display.clone(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let is_gzip = reader
        .fill_buf()
        .map_err(|source| InputError::Read {
            path: display.clone(),
            source,
        })?
        .starts_with(&GZIP_MAGIC);

    let inner: Box<dyn BufRead> = if is_gzip {
        info!("Reading gzip-compressed log: {}", display);
        Box::new(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        info!("Reading log: {}", display);
        Box::new(reader)
    };

    Ok(LogReader::new(inner, display))
}
