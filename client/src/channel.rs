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

//! Bounded message channel between the read task and its consumers.
//!
//! The read task is the only producer. When the buffer is full it stops in
//! [`MessageSender::enqueue`] and reads nothing more from the transport until a consumer
//! catches up. Consumers share one receiver, so each message is delivered once.

use crate::{ClientError, Result};
use darkwind_telnetcodec::TelnetMessage;
use futures::Stream;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// What a consumer receives: a message, or the fault that ended the connection.
pub type MessageResult = Result<TelnetMessage>;

/// Create a bounded channel holding at most `capacity` undelivered messages.
pub fn message_channel(capacity: usize) -> (MessageSender, Messages) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        MessageSender { tx: Some(tx) },
        Messages {
            rx: Arc::new(Mutex::new(rx)),
        },
    )
}

/// Producing half, owned by the read task.
#[derive(Debug)]
pub struct MessageSender {
    tx: Option<mpsc::Sender<MessageResult>>,
}

impl MessageSender {
    /// Queue a message, waiting for space while the buffer is full.
    pub async fn enqueue(&mut self, message: TelnetMessage) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(ClientError::ChannelClosed)?;
        tx.send(Ok(message))
            .await
            .map_err(|_| ClientError::ChannelClosed)
    }

    /// Close the channel. Buffered messages stay readable. A given `error` is delivered
    /// after them as the final item.
    pub async fn close(&mut self, error: Option<ClientError>) {
        if let Some(tx) = self.tx.take() {
            if let Some(error) = error {
                // Nobody is listening if this fails.
                let _ = tx.send(Err(error)).await;
            }
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.tx.is_none()
    }
}

/// Consuming half. Clones share the same queue.
#[derive(Clone, Debug)]
pub struct Messages {
    rx: Arc<Mutex<mpsc::Receiver<MessageResult>>>,
}

impl Messages {
    /// Wait for the next item. `None` means the channel is closed and drained.
    pub async fn recv(&self) -> Option<MessageResult> {
        self.rx.lock().await.recv().await
    }

    /// Take the next item if one is already buffered.
    pub fn try_recv(&self) -> Option<MessageResult> {
        let mut rx = self.rx.try_lock().ok()?;
        rx.try_recv().ok()
    }

    /// Consume the channel as an asynchronous stream.
    pub fn into_stream(self) -> impl Stream<Item = MessageResult> + Send + 'static {
        futures::stream::unfold(self, |messages| async move {
            let item = messages.recv().await?;
            Some((item, messages))
        })
    }
}
