//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Outbound half of a connection

use crate::{ClientError, Result};
use bytes::Bytes;
use darkwind_telnetcodec::{TelnetCodec, TelnetCommand, TelnetFrame, TelnetOption};
use futures::SinkExt;
use metrics::counter;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::select;
use tokio::sync::Mutex;
use tokio_util::codec::FramedWrite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};

pub(crate) type BoxedWrite = Box<dyn AsyncWrite + Send + Unpin>;

type FramedTransport = FramedWrite<BoxedWrite, TelnetCodec>;

/// Writes frames to the peer
///
/// Clones share one transport. Each write is encoded into a single buffer and
/// flushed while holding the write lock, so bytes from concurrent writers never
/// interleave. Writes made before the transport is attached, after it has been
/// released, or while the connection is being cancelled, fail with
/// [`ClientError::NotConnected`].
#[derive(Clone)]
pub struct TelnetWriter {
    inner: Arc<WriterInner>,
}

struct WriterInner {
    framed: Mutex<Option<FramedTransport>>,
    line_terminator: String,
    cancel: CancellationToken,
}

impl TelnetWriter {
    pub(crate) fn new(line_terminator: impl Into<String>, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::new(WriterInner {
                framed: Mutex::new(None),
                line_terminator: line_terminator.into(),
                cancel,
            }),
        }
    }

    pub(crate) async fn attach(&self, write: BoxedWrite, codec: TelnetCodec) {
        *self.inner.framed.lock().await = Some(FramedWrite::new(write, codec));
    }

    /// Shut down the transport and drop it.
    ///
    /// Bytes left buffered by a cancelled write are discarded rather than flushed,
    /// so a peer that stopped reading cannot hold this up.
    pub(crate) async fn detach(&self) {
        let framed = self.inner.framed.lock().await.take();
        if let Some(framed) = framed {
            let discarded = framed.write_buffer().len();
            if discarded > 0 {
                debug!(discarded, "Dropping unflushed output");
            }
            let mut write = framed.into_inner();
            if let Err(error) = write.shutdown().await {
                debug!(%error, "Error shutting down transport");
            }
        }
    }

    /// Returns true while a transport is attached.
    pub async fn is_attached(&self) -> bool {
        self.inner.framed.lock().await.is_some()
    }

    /// Encode and flush one frame.
    ///
    /// Both waiting for the write lock and the flush itself give way to
    /// cancellation, which is reported as [`ClientError::NotConnected`].
    pub async fn send(&self, frame: TelnetFrame) -> Result<()> {
        let cancel = &self.inner.cancel;
        let mut guard = select! {
            biased;
            () = cancel.cancelled() => return Err(ClientError::NotConnected),
            guard = self.inner.framed.lock() => guard,
        };
        let framed = guard.as_mut().ok_or(ClientError::NotConnected)?;
        trace!(?frame, "Sending frame");
        select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Write abandoned on cancellation");
                return Err(ClientError::NotConnected);
            }
            result = framed.send(frame) => result?,
        }
        counter!("darkwind.frames.sent").increment(1);
        Ok(())
    }

    /// Send text as Latin-1. Characters above U+00FF are sent as `?`.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn write_text(&self, text: &str) -> Result<()> {
        self.send(TelnetFrame::Text(text.to_string())).await
    }

    /// Send text followed by the configured line terminator.
    pub async fn write_line(&self, text: &str) -> Result<()> {
        let mut line = String::with_capacity(text.len() + self.inner.line_terminator.len());
        line.push_str(text);
        line.push_str(&self.inner.line_terminator);
        self.write_text(&line).await
    }

    /// Send raw bytes. Any `0xFF` is still escaped.
    pub async fn write_bytes(&self, bytes: impl Into<Bytes>) -> Result<()> {
        self.send(TelnetFrame::Raw(bytes.into())).await
    }

    /// Send `IAC <command> <option>`, or `IAC <command>` for commands that take no option.
    #[instrument(skip_all, fields(verb = %command, option = %option))]
    pub async fn send_command(&self, command: TelnetCommand, option: TelnetOption) -> Result<()> {
        self.send(TelnetFrame::Command(command, option)).await
    }

    /// Send `IAC SB <option> <payload> IAC SE` with a text payload.
    ///
    /// GMCP text goes out as UTF-8, anything else as Latin-1.
    #[instrument(skip_all, fields(option = %option))]
    pub async fn send_sub_command(&self, option: TelnetOption, payload: &str) -> Result<()> {
        self.send(TelnetFrame::subnegotiate_text(option, payload))
            .await
    }

    /// Send `IAC SB <option> <payload> IAC SE` with a binary payload.
    pub async fn send_sub_command_bytes(
        &self,
        option: TelnetOption,
        payload: impl Into<Bytes>,
    ) -> Result<()> {
        self.send(TelnetFrame::Subnegotiate(option, payload.into()))
            .await
    }

    /// Send a GMCP message, such as `Char.Vitals` or `Core.Hello {..}`.
    pub async fn send_gmcp(&self, payload: &str) -> Result<()> {
        self.send_sub_command(TelnetOption::GMCP, payload).await
    }
}

impl std::fmt::Debug for TelnetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetWriter")
            .field("line_terminator", &self.inner.line_terminator)
            .finish_non_exhaustive()
    }
}
