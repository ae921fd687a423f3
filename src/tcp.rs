/*
Copyright 2021 Timo Saarinen

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! A reconnecting pull adapter (C8) over a `tokio::net::TcpStream`, for feeds delivered over a
//! raw line-delimited TCP socket rather than a file.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::ais::AisMessage;
use crate::assembler::FragmentAssembler;
use crate::bitbuffer::BitBuffer;
use crate::sentence;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Reconnects to `addr` with exponential backoff (1s initial, 30s cap) whenever the connection
/// drops, and decodes the line-delimited AIS feed it carries.
///
/// Dropping this value (or ending iteration over [`TcpAisStream::next_message`]) releases the
/// current socket; no task is spawned, so there is nothing left running after the drop.
pub struct TcpAisStream {
    addr: String,
    read_timeout: Duration,
    backoff: Duration,
    reader: Option<BufReader<TcpStream>>,
    assembler: FragmentAssembler,
}

impl TcpAisStream {
    pub fn new(addr: impl Into<String>) -> Self {
        TcpAisStream {
            addr: addr.into(),
            read_timeout: Duration::from_secs(60),
            backoff: INITIAL_BACKOFF,
            reader: None,
            assembler: FragmentAssembler::new(),
        }
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    async fn ensure_connected(&mut self) {
        while self.reader.is_none() {
            match TcpStream::connect(&self.addr).await {
                Ok(stream) => {
                    log::info!("connected to {}", self.addr);
                    self.reader = Some(BufReader::new(stream));
                    self.backoff = INITIAL_BACKOFF;
                }
                Err(e) => {
                    log::warn!(
                        "connect to {} failed ({}), retrying in {:?}",
                        self.addr,
                        e,
                        self.backoff
                    );
                    tokio::time::sleep(self.backoff).await;
                    self.backoff = (self.backoff * 2).min(MAX_BACKOFF);
                }
            }
        }
    }

    /// Reads and decodes the next assembled message, reconnecting as needed. Returns `None` only
    /// if the caller drops this value; otherwise it runs until a message decodes.
    pub async fn next_message(&mut self) -> Option<AisMessage> {
        loop {
            self.ensure_connected().await;
            let reader = self.reader.as_mut().expect("just connected");
            let mut line = String::new();
            let read = timeout(self.read_timeout, reader.read_line(&mut line)).await;
            let n = match read {
                Ok(Ok(n)) => n,
                Ok(Err(e)) => {
                    log::warn!("read from {} failed: {}", self.addr, e);
                    self.reader = None;
                    continue;
                }
                Err(_) => {
                    log::warn!(
                        "read from {} timed out after {:?}, dropping pending fragment group",
                        self.addr,
                        self.read_timeout
                    );
                    self.assembler = FragmentAssembler::new();
                    continue;
                }
            };
            if n == 0 {
                log::warn!("connection to {} closed by peer, reconnecting", self.addr);
                self.reader = None;
                continue;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let sentence = match sentence::parse(trimmed) {
                Ok(s) => s,
                Err(e) => {
                    log::debug!("skipping unparsable line {:?}: {}", trimmed, e);
                    continue;
                }
            };
            let assembled = match self.assembler.push(&sentence) {
                Ok(Some(assembled)) => assembled,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("dropping fragment group: {}", e);
                    continue;
                }
            };
            let buf = BitBuffer::from_bits(assembled.bits);
            match crate::ais::decode(&buf) {
                Ok(msg) => return Some(msg),
                Err(e) => {
                    log::warn!("dropping undecodable message: {}", e);
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn decodes_a_line_delivered_over_a_real_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C\r\n")
                .await
                .unwrap();
        });
        let mut stream = TcpAisStream::new(addr.to_string());
        match stream.next_message().await.unwrap() {
            AisMessage::Type1(r) => assert_eq!(r.mmsi_str(), "366053209"),
            other => panic!("expected Type1, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn reconnects_after_the_peer_closes_the_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // First connection closes immediately without sending data.
            let (socket, _) = listener.accept().await.unwrap();
            drop(socket);
            // Second connection delivers the real sentence.
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"!AIVDM,1,1,,B,15M67FC000G?ufbE`FepT@3n00Sa,0*5C\r\n")
                .await
                .unwrap();
        });
        let mut stream = TcpAisStream::new(addr.to_string());
        match stream.next_message().await.unwrap() {
            AisMessage::Type1(r) => assert_eq!(r.mmsi_str(), "366053209"),
            other => panic!("expected Type1, got {:?}", other),
        }
    }
}
