//! XFEATURE COMPRESS GZIP support
//!
//! Once negotiated, the server sends overview blocks as a zlib stream. The
//! stream is inflated straight out of the session's read buffer, so no byte
//! past the end of the compressed data is taken from the connection and the
//! next status line is read uncompressed as usual.

use flate2::{Decompress, FlushDecompress, Status};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, trace};

use super::NntpClient;
use super::io::{read_wire_line, strip_byte_stuffing, strip_line_ending};
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::{Expect, codes};

/// Inflate output chunk size
const INFLATE_CHUNK_SIZE: usize = 64 * 1024;

/// Lines of one compressed block plus its wire and inflated sizes
#[derive(Debug)]
pub(crate) struct InflatedBlock {
    pub lines: Vec<String>,
    pub compressed: u64,
    pub decompressed: u64,
}

/// Move complete lines out of `pending`
///
/// Sets `terminated` at the `.` line; anything inflated after it is dropped.
fn drain_lines(pending: &mut Vec<u8>, lines: &mut Vec<String>, terminated: &mut bool) {
    while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
        let raw: Vec<u8> = pending.drain(..=pos).collect();
        push_line(strip_line_ending(&raw), lines, terminated);
    }
}

fn push_line(raw: &[u8], lines: &mut Vec<String>, terminated: &mut bool) {
    if *terminated {
        return;
    }
    let line = String::from_utf8_lossy(raw);
    if line == "." {
        *terminated = true;
    } else {
        lines.push(strip_byte_stuffing(&line).to_string());
    }
}

/// Read one zlib-compressed dot block from `reader`
///
/// The block ends at a `.` line inside the inflated text, or, when the zlib
/// stream ends without one, at a `.` line that must follow the compressed
/// bytes on the wire. The decompressor lives only for this call.
pub(crate) async fn inflate_dot_block<R>(reader: &mut R) -> Result<InflatedBlock>
where
    R: AsyncBufRead + Unpin,
{
    let mut inflater = Decompress::new(true);
    let mut out = vec![0u8; INFLATE_CHUNK_SIZE];
    let mut pending = Vec::new();
    let mut lines = Vec::new();
    let mut terminated = false;

    loop {
        let input = reader.fill_buf().await?;
        if input.is_empty() {
            return Err(NntpError::protocol(format!(
                "unexpected end of stream inside compressed block after {} lines",
                lines.len()
            )));
        }

        let before_in = inflater.total_in();
        let before_out = inflater.total_out();
        let status = inflater
            .decompress(input, &mut out, FlushDecompress::None)
            .map_err(|e| NntpError::protocol(format!("corrupt compressed block: {}", e)))?;
        let consumed = (inflater.total_in() - before_in) as usize;
        let produced = (inflater.total_out() - before_out) as usize;
        reader.consume(consumed);

        pending.extend_from_slice(&out[..produced]);
        drain_lines(&mut pending, &mut lines, &mut terminated);

        if status == Status::StreamEnd {
            break;
        }
        if consumed == 0 && produced == 0 {
            return Err(NntpError::protocol("compressed block made no progress"));
        }
    }

    if !pending.is_empty() {
        push_line(strip_line_ending(&pending), &mut lines, &mut terminated);
    }

    if !terminated {
        let mut buf = Vec::new();
        match read_wire_line(reader, &mut buf).await? {
            Some(line) if line == "." => {}
            Some(line) => {
                return Err(NntpError::protocol(format!(
                    "expected '.' after compressed block, got: {}",
                    line.chars().take(100).collect::<String>()
                )));
            }
            None => {
                return Err(NntpError::protocol(
                    "unexpected end of stream after compressed block",
                ));
            }
        }
    }

    Ok(InflatedBlock {
        lines,
        compressed: inflater.total_in(),
        decompressed: inflater.total_out(),
    })
}

impl NntpClient {
    /// Negotiate XFEATURE COMPRESS GZIP
    ///
    /// Expects 290. From then on overview blocks are read through the zlib
    /// adapter; there is no way to switch compression off again.
    ///
    /// # Errors
    ///
    /// - [`NntpError::Server`] - the server does not offer the feature
    pub async fn enable_compression(&mut self) -> Result<()> {
        self.command(
            commands::xfeature_compress_gzip(),
            Expect::Code(codes::FEATURE_ENABLED),
        )
        .await?;
        self.compression_enabled = true;
        debug!("XFEATURE COMPRESS GZIP enabled");
        Ok(())
    }

    /// Check if compression has been negotiated
    #[must_use]
    pub fn is_compression_enabled(&self) -> bool {
        self.compression_enabled
    }

    /// Get bandwidth statistics (compressed vs decompressed bytes)
    ///
    /// Both counters cover compressed blocks only.
    #[must_use]
    pub fn bandwidth_stats(&self) -> (u64, u64) {
        (self.bytes_compressed, self.bytes_decompressed)
    }

    /// Read a compressed block following a status line
    pub(super) async fn read_compressed_block(&mut self) -> Result<Vec<String>> {
        match inflate_dot_block(&mut self.stream).await {
            Ok(block) => {
                trace!(
                    "Inflated {} bytes to {} bytes ({} lines)",
                    block.compressed,
                    block.decompressed,
                    block.lines.len()
                );
                self.bytes_compressed += block.compressed;
                self.bytes_decompressed += block.decompressed;
                Ok(block.lines)
            }
            Err(e) => {
                self.mark_broken();
                Err(e)
            }
        }
    }
}
