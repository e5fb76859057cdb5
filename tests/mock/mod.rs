//! Scripted in-memory NNTP server
//!
//! The server greets, then for every scripted step reads what the client
//! sends and writes the canned reply. Everything the client sent is handed
//! back when the script runs out or the client hangs up.

#![allow(dead_code)]

use nntp_session::NntpClient;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::task::JoinHandle;

/// What the server reads before answering
enum Read {
    /// One command line
    Line,
    /// Lines up to and including a lone `.` (the article after POST's 340)
    Block,
}

/// Convert `\n` line endings to the CRLF the wire uses
pub fn crlf(text: &str) -> Vec<u8> {
    text.replace('\n', "\r\n").into_bytes()
}

pub struct MockServer {
    greeting: Vec<u8>,
    steps: Vec<(Read, Vec<u8>)>,
}

impl MockServer {
    pub fn new() -> Self {
        Self {
            greeting: b"200 mock news server ready\r\n".to_vec(),
            steps: Vec::new(),
        }
    }

    pub fn greeting(mut self, line: &str) -> Self {
        self.greeting = crlf(&format!("{}\n", line));
        self
    }

    /// Answer the next command line with `text` (`\n` becomes CRLF)
    pub fn reply(self, text: &str) -> Self {
        self.reply_bytes(crlf(text))
    }

    /// Answer the next command line with raw bytes
    pub fn reply_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.steps.push((Read::Line, bytes));
        self
    }

    /// Swallow a dot-terminated block, then answer with `text`
    pub fn reply_after_block(mut self, text: &str) -> Self {
        self.steps.push((Read::Block, crlf(text)));
        self
    }

    /// Run the server and open a session against it
    pub async fn start(self) -> (NntpClient, JoinHandle<Vec<String>>) {
        let (client_side, server_side) = tokio::io::duplex(64 * 1024);
        let server = tokio::spawn(self.serve(server_side));
        let client = NntpClient::from_stream(client_side)
            .await
            .expect("greeting should be accepted");
        (client, server)
    }

    async fn serve(self, stream: DuplexStream) -> Vec<String> {
        let mut stream = BufReader::new(stream);
        let mut received = Vec::new();

        if stream.get_mut().write_all(&self.greeting).await.is_err() {
            return received;
        }

        for (read, reply) in self.steps {
            loop {
                let mut line = String::new();
                match stream.read_line(&mut line).await {
                    Ok(0) | Err(_) => return received,
                    Ok(_) => {}
                }
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                let done = match read {
                    Read::Line => true,
                    Read::Block => line == ".",
                };
                received.push(line);
                if done {
                    break;
                }
            }
            if stream.get_mut().write_all(&reply).await.is_err() {
                return received;
            }
        }
        received
    }
}
