use std::{
    io::{self, ErrorKind, Read, Write},
    path::PathBuf,
};

use log::warn;

use super::error::ExportError;

const MASK_DELTA: u32 = 0xa282_ead8;
const HEADER_LEN: usize = 12;
const FOOTER_LEN: usize = 4;

/// The masked CRC-32C used by TFRecord framing
pub fn masked_crc(data: &[u8]) -> u32 {
    let crc = crc32c::crc32c(data);
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

/// Reads TFRecord-framed payloads:
/// `u64 length | u32 masked_crc(length) | payload | u32 masked_crc(payload)`, little endian.
///
/// A record cut short at the end of the stream is treated as the end of the stream, since
/// the writer may still be appending to it.
pub struct RecordReader<R> {
    inner: R,
    path: PathBuf,
    offset: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    /// `path` is only used to label errors
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            offset: 0,
            done: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<Vec<u8>>, ExportError> {
        let start = self.offset;

        let mut header = [0u8; HEADER_LEN];
        match self.fill(&mut header)? {
            0 => return Ok(None),
            HEADER_LEN => {}
            _ => return Ok(self.truncated(start)),
        }
        let (len_bytes, len_crc) = header.split_at(8);
        if masked_crc(len_bytes) != u32::from_le_bytes(len_crc.try_into().expect("4 bytes")) {
            return Err(self.checksum_error(start));
        }
        let len = u64::from_le_bytes(len_bytes.try_into().expect("8 bytes")) as usize;

        let mut data = vec![0u8; len];
        if self.fill(&mut data)? < len {
            return Ok(self.truncated(start));
        }
        let mut footer = [0u8; FOOTER_LEN];
        if self.fill(&mut footer)? < FOOTER_LEN {
            return Ok(self.truncated(start));
        }
        if masked_crc(&data) != u32::from_le_bytes(footer) {
            return Err(self.checksum_error(start + HEADER_LEN as u64));
        }

        Ok(Some(data))
    }

    /// Read until `buf` is full or the stream ends, returning the bytes read
    fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut n = 0;
        while n < buf.len() {
            match self.inner.read(&mut buf[n..]) {
                Ok(0) => break,
                Ok(k) => n += k,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        self.offset += n as u64;
        Ok(n)
    }

    fn truncated(&self, start: u64) -> Option<Vec<u8>> {
        warn!(
            "ignoring truncated record at byte {start} of {}",
            self.path.display()
        );
        None
    }

    fn checksum_error(&self, offset: u64) -> ExportError {
        ExportError::Checksum {
            path: self.path.clone(),
            offset,
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Vec<u8>, ExportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let record = self.read_record().transpose();
        if !matches!(record, Some(Ok(_))) {
            self.done = true;
        }
        record
    }
}

/// Writes TFRecord-framed payloads
pub struct RecordWriter<W> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write_record(&mut self, data: &[u8]) -> io::Result<()> {
        let len = (data.len() as u64).to_le_bytes();
        self.inner.write_all(&len)?;
        self.inner.write_all(&masked_crc(&len).to_le_bytes())?;
        self.inner.write_all(data)?;
        self.inner.write_all(&masked_crc(data).to_le_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
