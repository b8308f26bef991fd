//! JSON-lines client transport over TCP.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use super::{wire, BridgeError, BridgeLink, ConnectionState, InboundEvent};
use crate::shutdown::ShutdownHandle;

/// Why a session ended.
enum SessionEnd {
    /// Peer closed the connection or failed mid-stream.
    Lost(Option<BridgeError>),
    /// Shutdown requested or the meter side went away.
    Stop,
}

pub struct TcpUpstream {
    address: String,
    reconnect_delay: Duration,
}

impl TcpUpstream {
    pub fn new(address: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            address: address.into(),
            reconnect_delay,
        }
    }

    /// Connect, pump events both ways, reconnect on loss. Returns once
    /// shutdown is signaled or the meter side of `link` is dropped.
    pub async fn run(self, mut link: BridgeLink, shutdown: ShutdownHandle) {
        loop {
            if shutdown.is_shutting_down() {
                break;
            }
            if link.emit(connection(ConnectionState::Connecting)).await.is_err() {
                break;
            }

            let connected = tokio::select! {
                result = TcpStream::connect(self.address.as_str()) => result,
                _ = shutdown.wait() => break,
            };

            let end = match connected {
                Ok(stream) => {
                    tracing::info!(address = %self.address, "upstream connected");
                    if link.emit(connection(ConnectionState::Connected)).await.is_err() {
                        break;
                    }
                    self.session(stream, &mut link, &shutdown).await
                }
                Err(err) => SessionEnd::Lost(Some(err.into())),
            };

            let state = match end {
                SessionEnd::Stop => break,
                SessionEnd::Lost(Some(err)) => {
                    tracing::warn!(address = %self.address, error = %err, "upstream connection failed");
                    ConnectionState::Error(err.to_string())
                }
                SessionEnd::Lost(None) => {
                    tracing::info!(address = %self.address, "upstream closed the connection");
                    ConnectionState::Disconnected
                }
            };
            if link.emit(connection(state)).await.is_err() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.reconnect_delay) => {}
                _ = shutdown.wait() => break,
            }
        }
    }

    async fn session(
        &self,
        stream: TcpStream,
        link: &mut BridgeLink,
        shutdown: &ShutdownHandle,
    ) -> SessionEnd {
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match wire::decode(&line) {
                            Ok(event) => {
                                if link.events.send(event).await.is_err() {
                                    return SessionEnd::Stop;
                                }
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, line = %line, "skipping upstream message");
                            }
                        }
                    }
                    Ok(None) => return SessionEnd::Lost(None),
                    Err(err) => return SessionEnd::Lost(Some(err.into())),
                },
                request = link.requests.recv() => {
                    let Some(request) = request else {
                        return SessionEnd::Stop;
                    };
                    let written = match wire::encode(request) {
                        Ok(mut text) => {
                            text.push('\n');
                            writer.write_all(text.as_bytes()).await
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to encode request");
                            continue;
                        }
                    };
                    if let Err(err) = written {
                        return SessionEnd::Lost(Some(err.into()));
                    }
                    tracing::debug!(?request, "request sent upstream");
                }
                _ = shutdown.wait() => return SessionEnd::Stop,
            }
        }
    }
}

fn connection(state: ConnectionState) -> InboundEvent {
    InboundEvent::Connection(state)
}
