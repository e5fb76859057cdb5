//! Low-level I/O for NNTP protocol communication
//!
//! This module provides the primitives every session command is built on:
//! - Line framing (CRLF out, CRLF or bare LF in)
//! - Status line dispatch against an [`Expect`]
//! - Dot-terminated multiline blocks, read and written with dot-stuffing

use std::borrow::Cow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use super::NntpClient;
use crate::commands;
use crate::error::{NntpError, Result};
use crate::response::{Expect, NntpResponse};

const LINE_INITIAL_CAPACITY: usize = 512;
const BLOCK_INITIAL_CAPACITY: usize = 64;

/// Strip the line terminator (`\r\n` or `\n`) from raw wire bytes
pub(crate) fn strip_line_ending(bytes: &[u8]) -> &[u8] {
    match bytes {
        [rest @ .., b'\r', b'\n'] => rest,
        [rest @ .., b'\n'] => rest,
        _ => bytes,
    }
}

/// Undo dot-stuffing on a payload line
///
/// A line starting with a dot and carrying more text loses exactly one
/// leading dot (`"..A"` becomes `".A"`). The bare terminator never gets here.
pub(crate) fn strip_byte_stuffing(line: &str) -> &str {
    match line.strip_prefix('.') {
        Some(rest) if !rest.is_empty() => rest,
        _ => line,
    }
}

/// Dot-stuff a payload line for the wire
pub(crate) fn stuff_line(line: &[u8]) -> Cow<'_, [u8]> {
    if line.first() == Some(&b'.') {
        let mut stuffed = Vec::with_capacity(line.len() + 1);
        stuffed.push(b'.');
        stuffed.extend_from_slice(line);
        Cow::Owned(stuffed)
    } else {
        Cow::Borrowed(line)
    }
}

/// Read one line, without its terminator
///
/// Returns `None` at end of stream. Invalid UTF-8 is replaced, not rejected.
pub(crate) async fn read_wire_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let n = reader.read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(
        String::from_utf8_lossy(strip_line_ending(buf)).into_owned(),
    ))
}

/// Read a dot-terminated block
///
/// The terminating `.` line is consumed and not returned. Running out of
/// input before it is a protocol error.
pub(crate) async fn read_dot_block<R>(reader: &mut R) -> Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = Vec::with_capacity(BLOCK_INITIAL_CAPACITY);
    let mut buf = Vec::with_capacity(LINE_INITIAL_CAPACITY);
    loop {
        let Some(line) = read_wire_line(reader, &mut buf).await? else {
            return Err(NntpError::protocol(format!(
                "unexpected end of stream after {} lines of multiline block",
                lines.len()
            )));
        };
        if line == "." {
            return Ok(lines);
        }
        lines.push(strip_byte_stuffing(&line).to_string());
    }
}

/// Copy `source` to `sink` as a dot-terminated block
///
/// Line endings are normalized to CRLF, a final line without terminator is
/// sent like any other, and the `.` terminator is written last. Returns the
/// number of payload lines.
pub(crate) async fn write_dot_block<R, W>(source: &mut R, sink: &mut W) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut count = 0u64;
    let mut buf = Vec::with_capacity(LINE_INITIAL_CAPACITY);
    loop {
        buf.clear();
        if source.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        sink.write_all(&stuff_line(strip_line_ending(&buf))).await?;
        sink.write_all(b"\r\n").await?;
        count += 1;
    }
    sink.write_all(b".\r\n").await?;
    sink.flush().await?;
    Ok(count)
}

/// Mask the password of AUTHINFO PASS before it reaches a log
fn loggable(line: &str) -> Cow<'_, str> {
    const PASS: &str = "AUTHINFO PASS";
    match line.get(..PASS.len()) {
        Some(verb) if verb.eq_ignore_ascii_case(PASS) => Cow::Owned(format!("{} ****", verb)),
        _ => Cow::Borrowed(line),
    }
}

impl NntpClient {
    /// Send one command line, CRLF appended
    pub(super) async fn send_line(&mut self, line: &str) -> Result<()> {
        if line.contains(['\r', '\n']) {
            return Err(NntpError::protocol(format!(
                "command line contains a line terminator: {:?}",
                loggable(line)
            )));
        }
        trace!("Sending command: {}", loggable(line));

        let mut wire = Vec::with_capacity(line.len() + 2);
        wire.extend_from_slice(line.as_bytes());
        wire.extend_from_slice(b"\r\n");

        let stream = self.stream.get_mut();
        let result = match stream.write_all(&wire).await {
            Ok(()) => stream.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.mark_broken();
            return Err(e.into());
        }
        Ok(())
    }

    /// Read one raw line from the connection
    ///
    /// End of stream here means the server hung up.
    pub(super) async fn read_line(&mut self) -> Result<String> {
        let mut buf = Vec::with_capacity(LINE_INITIAL_CAPACITY);
        match read_wire_line(&mut self.stream, &mut buf).await {
            Ok(Some(line)) => Ok(line),
            Ok(None) => {
                self.mark_broken();
                Err(NntpError::ConnectionClosed)
            }
            Err(e) => {
                self.mark_broken();
                Err(e)
            }
        }
    }

    /// Read a status line and check it against `expect`
    pub(super) async fn read_status(&mut self, expect: Expect) -> Result<(u16, String)> {
        let line = self.read_line().await?;
        trace!("Received: {}", line);

        let (code, message) = match commands::parse_response_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.mark_broken();
                return Err(e);
            }
        };

        if !expect.matches(code) {
            return Err(NntpError::Server { code, message });
        }
        Ok((code, message))
    }

    /// Read the dot-terminated block following a status line
    pub(super) async fn read_block(&mut self) -> Result<Vec<String>> {
        match read_dot_block(&mut self.stream).await {
            Ok(lines) => {
                trace!("Read multiline block of {} lines", lines.len());
                Ok(lines)
            }
            Err(e) => {
                self.mark_broken();
                Err(e)
            }
        }
    }

    /// Send a command line and read its status
    ///
    /// `line` must not contain CR or LF; such a line is rejected before
    /// anything is written. A status that does not satisfy `expect` becomes
    /// [`NntpError::Server`] carrying the code and text as received.
    ///
    /// ```no_run
    /// # use nntp_session::{Expect, NntpClient};
    /// # async fn example(client: &mut NntpClient) -> nntp_session::Result<()> {
    /// let (code, message) = client.command("MODE READER", Expect::Class(2)).await?;
    /// println!("{} {}", code, message);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn command(&mut self, line: &str, expect: Expect) -> Result<(u16, String)> {
        self.ensure_open()?;
        self.send_line(line).await?;
        self.read_status(expect).await
    }

    /// Send a command whose success reply carries a multiline block
    ///
    /// The block is only read when the status satisfies `expect`; error
    /// replies never carry one.
    pub async fn multiline_command(&mut self, line: &str, expect: Expect) -> Result<NntpResponse> {
        let (code, message) = self.command(line, expect).await?;
        let lines = self.read_block().await?;
        debug!("{} returned {} lines", line.split(' ').next().unwrap_or(line), lines.len());
        Ok(NntpResponse {
            code,
            message,
            lines,
        })
    }
}
