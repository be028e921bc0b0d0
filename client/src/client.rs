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

//! GMCP-aware Telnet client
//!
//! A [`TelnetClient`] owns one connection: the option table shared with its codec, the
//! outbound [`TelnetWriter`], the message channel, and the background read task.

use crate::channel::{MessageSender, Messages, message_channel};
use crate::worker::{HandlerMap, ReadWorker};
use crate::{ClientConfig, ClientError, OptionRegistration, Result, TelnetWriter};
use bytes::Bytes;
use darkwind_telnetcodec::{
    NegotiatedState, Preference, SharedOptions, TelnetCodec, TelnetCommand, TelnetOption,
};
use metrics::gauge;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::select;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, instrument};

enum Lifecycle {
    /// Not yet connected. Holds the producing half until the read task takes it.
    Idle(MessageSender),
    /// Read task started. It may since have stopped on its own.
    Running(JoinHandle<()>),
    /// Disposed
    Disposed,
}

/// Telnet client connection
///
/// # Example
///
/// ```no_run
/// use darkwind_client::{ClientConfig, OptionRegistration, TelnetClient};
///
/// # async fn example() -> darkwind_client::Result<()> {
/// let client = TelnetClient::new(ClientConfig::new("darkwind.org", 3000));
/// client.register_option(OptionRegistration::gmcp());
/// client.connect().await?;
///
/// let messages = client.messages();
/// while let Some(message) = messages.recv().await {
///     println!("{}", message?);
/// }
/// client.dispose().await;
/// # Ok(())
/// # }
/// ```
pub struct TelnetClient {
    config: ClientConfig,
    options: SharedOptions,
    handlers: HandlerMap,
    writer: TelnetWriter,
    messages: Messages,
    cancel: CancellationToken,
    lifecycle: Mutex<Lifecycle>,
    connected: Arc<AtomicBool>,
    peer_addr: RwLock<Option<SocketAddr>>,
}

impl TelnetClient {
    /// Create an unconnected client
    pub fn new(config: ClientConfig) -> Self {
        let (sender, messages) = message_channel(config.message_capacity);
        let cancel = CancellationToken::new();
        Self {
            writer: TelnetWriter::new(config.line_terminator.clone(), cancel.clone()),
            config,
            options: SharedOptions::new(),
            handlers: HandlerMap::default(),
            messages,
            cancel,
            lifecycle: Mutex::new(Lifecycle::Idle(sender)),
            connected: Arc::new(AtomicBool::new(false)),
            peer_addr: RwLock::new(None),
        }
    }

    /// The configuration this client was created with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set the preference and enablement hook for an option.
    ///
    /// Registering again replaces both. Negotiated state is kept, and a hook that has
    /// already fired on this connection does not fire again. An option given by its
    /// code, such as `TelnetOption::Unknown(201)`, is the same option as its named form.
    pub fn register_option(&self, registration: OptionRegistration) {
        let OptionRegistration {
            option,
            preference,
            handler,
        } = registration;
        let option = TelnetOption::from_u8(option.to_u8());
        debug!(%option, ?preference, "Registering option");
        self.options.register(option, preference);
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match handler {
            Some(handler) => handlers.insert(option, handler),
            None => handlers.remove(&option),
        };
    }

    /// Negotiated state of an option
    pub fn option_state(&self, option: TelnetOption) -> NegotiatedState {
        self.options.get(option).state
    }

    /// Registered preference of an option
    pub fn preference(&self, option: TelnetOption) -> Preference {
        self.options.get(option).preference
    }

    /// The option table shared with the codec
    pub fn options(&self) -> &SharedOptions {
        &self.options
    }

    /// Returns true while the read task is running
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Remote address, when connected over TCP
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        *self.peer_addr.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inbound messages. Every clone reads from the same queue.
    pub fn messages(&self) -> Messages {
        self.messages.clone()
    }

    /// The outbound half, for sharing with other tasks
    pub fn writer(&self) -> &TelnetWriter {
        &self.writer
    }

    /// Connect to the configured host and port
    pub async fn connect(&self) -> Result<()> {
        let ClientConfig { host, port, .. } = &self.config;
        self.connect_to(host, *port).await
    }

    /// Connect to `host:port` over TCP.
    ///
    /// Does nothing if already connected. Fails with [`ClientError::SessionEnded`] when
    /// the client is disposed before or while connecting.
    #[instrument(skip(self))]
    pub async fn connect_to(&self, host: &str, port: u16) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock().await;
        if !self.ready(&lifecycle)? {
            return Ok(());
        }

        let address = format!("{host}:{port}");
        info!(%address, "Connecting");
        let attempt = timeout(self.config.connect_timeout, TcpStream::connect(&address));
        let stream = select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(%address, "Connect abandoned");
                return Err(ClientError::SessionEnded);
            }
            result = attempt => match result {
                Ok(Ok(stream)) => stream,
                Ok(Err(source)) => return Err(ClientError::Connect { address, source }),
                Err(_) => return Err(ClientError::ConnectionTimeout(address)),
            },
        };
        if let Err(error) = stream.set_nodelay(true) {
            debug!(%error, "Unable to set TCP_NODELAY");
        }
        let peer = stream.peer_addr().ok();
        *self
            .peer_addr
            .write()
            .unwrap_or_else(PoisonError::into_inner) = peer;

        self.start(&mut lifecycle, stream).await
    }

    /// Run the connection over an already open transport.
    ///
    /// Does nothing if already connected.
    pub async fn connect_stream<S>(&self, stream: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let mut lifecycle = self.lifecycle.lock().await;
        if self.ready(&lifecycle)? {
            self.start(&mut lifecycle, stream).await?;
        }
        Ok(())
    }

    /// Ok(true) when a connection can be started, Ok(false) when one is already running.
    fn ready(&self, lifecycle: &Lifecycle) -> Result<bool> {
        match lifecycle {
            Lifecycle::Idle(_) if !self.cancel.is_cancelled() => Ok(true),
            Lifecycle::Running(_) if self.is_connected() => Ok(false),
            _ => Err(ClientError::SessionEnded),
        }
    }

    async fn start<S>(&self, lifecycle: &mut Lifecycle, stream: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        if self.cancel.is_cancelled() {
            return Err(ClientError::SessionEnded);
        }
        let sender = match std::mem::replace(lifecycle, Lifecycle::Disposed) {
            Lifecycle::Idle(sender) => sender,
            other => {
                *lifecycle = other;
                return Ok(());
            }
        };

        let codec = TelnetCodec::new(self.options.clone())
            .with_max_subnegotiation_len(self.config.max_subnegotiation_len);
        let (read_half, write_half) = tokio::io::split(stream);
        self.writer.attach(Box::new(write_half), codec.clone()).await;
        let reader = FramedRead::with_capacity(read_half, codec, self.config.read_buffer_size);

        self.connected.store(true, Ordering::Release);
        gauge!("darkwind.connections.active").increment(1.0);

        let worker = ReadWorker::new(
            reader,
            sender,
            self.writer.clone(),
            Arc::clone(&self.handlers),
            self.cancel.clone(),
            Arc::clone(&self.connected),
        );
        let span = info_span!("telnet_read", peer = ?self.peer_addr());
        *lifecycle = Lifecycle::Running(tokio::spawn(worker.run().instrument(span)));
        info!("Connected");
        Ok(())
    }

    /// Stop the read task and release the transport.
    ///
    /// Returns once the read task has finished. Consumers waiting on [`messages`](Self::messages)
    /// see the channel end. Safe to call more than once.
    #[instrument(skip(self))]
    pub async fn dispose(&self) {
        self.cancel.cancel();
        let mut lifecycle = self.lifecycle.lock().await;
        match std::mem::replace(&mut *lifecycle, Lifecycle::Disposed) {
            Lifecycle::Disposed => return,
            Lifecycle::Idle(mut sender) => sender.close(None).await,
            Lifecycle::Running(handle) => {
                if let Err(error) = handle.await {
                    error!(%error, "Read task did not finish cleanly");
                }
            }
        }
        self.writer.detach().await;
        self.connected.store(false, Ordering::Release);
        info!("Disposed");
    }

    /// Send text as Latin-1
    pub async fn write_text(&self, text: &str) -> Result<()> {
        self.writer.write_text(text).await
    }

    /// Send text followed by the configured line terminator
    pub async fn write_line(&self, text: &str) -> Result<()> {
        self.writer.write_line(text).await
    }

    /// Send raw bytes with `IAC` escaped
    pub async fn write_bytes(&self, bytes: impl Into<Bytes>) -> Result<()> {
        self.writer.write_bytes(bytes).await
    }

    /// Send a command
    pub async fn send_command(&self, command: TelnetCommand, option: TelnetOption) -> Result<()> {
        self.writer.send_command(command, option).await
    }

    /// Send a subnegotiation with a text payload
    pub async fn send_sub_command(&self, option: TelnetOption, payload: &str) -> Result<()> {
        self.writer.send_sub_command(option, payload).await
    }

    /// Send a subnegotiation with a binary payload
    pub async fn send_sub_command_bytes(
        &self,
        option: TelnetOption,
        payload: impl Into<Bytes>,
    ) -> Result<()> {
        self.writer.send_sub_command_bytes(option, payload).await
    }

    /// Send a GMCP message
    pub async fn send_gmcp(&self, payload: &str) -> Result<()> {
        self.writer.send_gmcp(payload).await
    }
}

impl Default for TelnetClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Drop for TelnetClient {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for TelnetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnetClient")
            .field("address", &self.config.address())
            .field("connected", &self.is_connected())
            .field("peer_addr", &self.peer_addr())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OptionHandler, TelnetWriter};
    use async_trait::async_trait;
    use darkwind_telnetcodec::consts;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};
    use tracing_test::traced_test;

    struct FailingHook;

    #[async_trait]
    impl OptionHandler for FailingHook {
        async fn on_enabled(&self, _option: TelnetOption, _writer: &TelnetWriter) -> Result<()> {
            Err(ClientError::ChannelClosed)
        }
    }

    #[derive(Default)]
    struct CountingHook {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OptionHandler for CountingHook {
        async fn on_enabled(&self, _option: TelnetOption, _writer: &TelnetWriter) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn hook_failure_is_logged_and_reading_continues() {
        let client = TelnetClient::default();
        client.register_option(
            OptionRegistration::wanted(TelnetOption::Echo).with_handler(FailingHook),
        );
        let (local, mut remote) = duplex(256);
        client.connect_stream(local).await.unwrap();

        let mut input = vec![consts::IAC, consts::WILL, consts::option::ECHO];
        input.extend(b"still here\n");
        remote.write_all(&input).await.unwrap();

        let message = client.messages().recv().await.unwrap().unwrap();
        assert_eq!(message.as_str(), "still here\n");
        assert!(logs_contain("Option hook failed"));
        assert!(client.is_connected());
        client.dispose().await;
    }

    #[tokio::test]
    async fn hook_fires_once_per_connection() {
        let hook = Arc::new(CountingHook::default());
        let client = TelnetClient::default();
        client.register_option(
            OptionRegistration::wanted(TelnetOption::Echo).with_shared_handler(hook.clone()),
        );
        let (local, mut remote) = duplex(256);
        client.connect_stream(local).await.unwrap();

        let echo = consts::option::ECHO;
        let mut input = vec![consts::IAC, consts::WILL, echo];
        input.extend([consts::IAC, consts::WONT, echo]);
        input.extend([consts::IAC, consts::WILL, echo]);
        input.extend(b"done\n");
        remote.write_all(&input).await.unwrap();

        let mut replies = [0u8; 9];
        remote.read_exact(&mut replies).await.unwrap();
        assert_eq!(
            replies,
            [
                consts::IAC, consts::DO, echo,
                consts::IAC, consts::DONT, echo,
                consts::IAC, consts::DO, echo,
            ]
        );
        let message = client.messages().recv().await.unwrap().unwrap();
        assert_eq!(message.as_str(), "done\n");
        assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.option_state(TelnetOption::Echo), NegotiatedState::Enabled);
        client.dispose().await;
    }

    #[tokio::test]
    async fn option_given_by_code_matches_its_named_form() {
        let hook = Arc::new(CountingHook::default());
        let client = TelnetClient::default();
        client.register_option(
            OptionRegistration::wanted(TelnetOption::Unknown(consts::option::GMCP))
                .with_shared_handler(hook.clone()),
        );
        assert_eq!(client.preference(TelnetOption::GMCP), Preference::Wanted);
        let (local, mut remote) = duplex(256);
        client.connect_stream(local).await.unwrap();

        let mut input = vec![consts::IAC, consts::WILL, consts::option::GMCP];
        input.extend(b"ok\n");
        remote.write_all(&input).await.unwrap();

        let mut reply = [0u8; 3];
        remote.read_exact(&mut reply).await.unwrap();
        assert_eq!(reply, [consts::IAC, consts::DO, consts::option::GMCP]);
        let message = client.messages().recv().await.unwrap().unwrap();
        assert_eq!(message.as_str(), "ok\n");
        assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
        client.dispose().await;
    }

    #[tokio::test]
    async fn start_refuses_once_cancelled() {
        let client = TelnetClient::default();
        client.cancel.cancel();
        let mut lifecycle = client.lifecycle.lock().await;
        assert!(matches!(
            client.start(&mut lifecycle, duplex(8).0).await,
            Err(ClientError::SessionEnded)
        ));
        assert!(matches!(*lifecycle, Lifecycle::Idle(_)));
        drop(lifecycle);
        assert!(!client.is_connected());
        assert!(!client.writer().is_attached().await);
    }

    #[tokio::test]
    async fn reregistration_replaces_preference_and_keeps_state() {
        let client = TelnetClient::default();
        client.register_option(OptionRegistration::wanted(TelnetOption::GMCP));
        let (local, mut remote) = duplex(256);
        client.connect_stream(local).await.unwrap();

        remote
            .write_all(&[consts::IAC, consts::WILL, consts::option::GMCP])
            .await
            .unwrap();
        let mut reply = [0u8; 3];
        remote.read_exact(&mut reply).await.unwrap();
        assert_eq!(client.option_state(TelnetOption::GMCP), NegotiatedState::Enabled);

        client.register_option(OptionRegistration::not_wanted(TelnetOption::GMCP));
        assert_eq!(client.preference(TelnetOption::GMCP), Preference::NotWanted);
        assert_eq!(client.option_state(TelnetOption::GMCP), NegotiatedState::Enabled);
        client.dispose().await;
    }

    #[tokio::test]
    async fn dropping_the_client_stops_the_read_task() {
        let client = TelnetClient::default();
        let (local, _remote) = duplex(64);
        client.connect_stream(local).await.unwrap();
        let messages = client.messages();
        drop(client);

        let end = tokio::time::timeout(Duration::from_secs(5), messages.recv())
            .await
            .unwrap();
        assert!(end.is_none());
    }

    #[tokio::test]
    async fn dispose_before_connect_ends_channel() {
        let client = TelnetClient::default();
        client.dispose().await;
        client.dispose().await;
        assert!(client.messages().recv().await.is_none());
        assert!(matches!(
            client.connect_stream(duplex(8).0).await,
            Err(ClientError::SessionEnded)
        ));
    }
}
