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

//! Background read task of a connection
//!
//! The worker pulls events out of the framed transport and routes them: messages to the
//! channel, negotiation replies straight back to the peer, and first enablements to the
//! registered hook. It suspends at the transport read, at the channel when the consumer
//! is behind, and at writes, and wakes from any of them when the connection is cancelled.

use crate::channel::MessageSender;
use crate::{ClientError, OptionHandler, TelnetWriter};
use darkwind_telnetcodec::{CodecError, TelnetCodec, TelnetEvent, TelnetOption};
use futures::StreamExt;
use metrics::{counter, gauge};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::io::AsyncRead;
use tokio::select;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

pub(crate) type HandlerMap = Arc<RwLock<HashMap<TelnetOption, Arc<dyn OptionHandler>>>>;

/// Why the read loop stopped
#[derive(Debug)]
enum Termination {
    /// The owner cancelled the connection
    Cancelled,
    /// The peer closed the transport, or it failed
    Closed,
    /// The inbound stream broke a protocol limit
    Faulted(CodecError),
}

pub(crate) struct ReadWorker<R> {
    reader: FramedRead<R, TelnetCodec>,
    sender: MessageSender,
    writer: TelnetWriter,
    handlers: HandlerMap,
    cancel: CancellationToken,
    connected: Arc<AtomicBool>,
}

impl<R> ReadWorker<R>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    pub(crate) fn new(
        reader: FramedRead<R, TelnetCodec>,
        sender: MessageSender,
        writer: TelnetWriter,
        handlers: HandlerMap,
        cancel: CancellationToken,
        connected: Arc<AtomicBool>,
    ) -> Self {
        Self {
            reader,
            sender,
            writer,
            handlers,
            cancel,
            connected,
        }
    }

    /// Run until cancelled, closed or faulted, then close the channel.
    pub(crate) async fn run(mut self) {
        let termination = self.event_loop().await;
        self.cleanup(termination).await;
    }

    async fn event_loop(&mut self) -> Termination {
        loop {
            let next = select! {
                biased;
                () = self.cancel.cancelled() => return Termination::Cancelled,
                next = self.reader.next() => next,
            };
            let event = match next {
                Some(Ok(event)) => event,
                None => return Termination::Closed,
                Some(Err(CodecError::Io(error))) => {
                    debug!(%error, "Transport read failed");
                    return Termination::Closed;
                }
                Some(Err(error)) => return Termination::Faulted(error),
            };
            if let Some(termination) = self.dispatch(event).await {
                return termination;
            }
        }
    }

    async fn dispatch(&mut self, event: TelnetEvent) -> Option<Termination> {
        match event {
            TelnetEvent::Message(message) => {
                trace!(option = message.option_code(), len = message.as_str().len(), "Message");
                counter!("darkwind.messages.received").increment(1);
                select! {
                    biased;
                    () = self.cancel.cancelled() => return Some(Termination::Cancelled),
                    result = self.sender.enqueue(message) => {
                        if result.is_err() {
                            return Some(Termination::Closed);
                        }
                    }
                }
            }
            TelnetEvent::Reply(frame) => {
                debug!(?frame, "Negotiation reply");
                counter!("darkwind.negotiation.replies").increment(1);
                select! {
                    biased;
                    () = self.cancel.cancelled() => return Some(Termination::Cancelled),
                    result = self.writer.send(frame) => {
                        if let Err(error) = result {
                            warn!(%error, "Failed to send negotiation reply");
                            return Some(Termination::Closed);
                        }
                    }
                }
            }
            TelnetEvent::OptionEnabled(option) => {
                let handler = self
                    .handlers
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get(&option)
                    .cloned();
                if let Some(handler) = handler {
                    debug!(%option, "Running option hook");
                    select! {
                        biased;
                        () = self.cancel.cancelled() => return Some(Termination::Cancelled),
                        result = handler.on_enabled(option, &self.writer) => {
                            if let Err(error) = result {
                                warn!(%option, %error, "Option hook failed");
                            }
                        }
                    }
                } else {
                    debug!(%option, "Option enabled");
                }
            }
        }
        None
    }

    async fn cleanup(&mut self, termination: Termination) {
        self.connected.store(false, Ordering::Release);
        gauge!("darkwind.connections.active").decrement(1.0);

        match termination {
            Termination::Cancelled => {
                info!("Connection cancelled");
                self.sender.close(None).await;
            }
            Termination::Closed => {
                info!("Connection closed");
                self.sender.close(None).await;
            }
            Termination::Faulted(fault) => {
                error!(error = %fault, "Connection faulted");
                let error = ClientError::Faulted(fault);
                select! {
                    biased;
                    () = self.cancel.cancelled() => {}
                    () = self.sender.close(Some(error)) => {}
                }
            }
        }
    }
}
