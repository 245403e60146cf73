//! Byte source and sink helpers. Failures surface as
//! [`HuffmanError::Io`](crate::error::HuffmanError::Io) and are not retried.

use std::io::{Read, Write};

use crate::error::Result;

pub fn read_all<R: Read>(mut source: R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    source.read_to_end(&mut data)?;
    Ok(data)
}

pub fn write_all<W: Write>(mut sink: W, data: &[u8]) -> Result<()> {
    sink.write_all(data)?;
    sink.flush()?;
    Ok(())
}
