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

//! # DarkWind Telnet Client
//!
//! Connection orchestration for a GMCP-capable MUD client, built on
//! [`darkwind_telnetcodec`].
//!
//! ## Features
//!
//! - **Automatic negotiation** - replies to `DO`/`DONT`/`WILL`/`WONT` from a per-option
//!   preference table, without negotiation loops
//! - **Enablement hooks** - run a handshake the first time an option turns on, such as the
//!   GMCP [`GmcpHandshake`]
//! - **Backpressure** - inbound messages wait in a bounded channel and the connection stops
//!   reading while it is full
//! - **Cancellation** - [`TelnetClient::dispose`] stops the read task wherever it is waiting
//!
//! ## Quick Start
//!
//! ```no_run
//! use darkwind_client::{ClientConfig, OptionRegistration, TelnetClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TelnetClient::new(ClientConfig::new("darkwind.org", 3000));
//!     client.register_option(OptionRegistration::gmcp());
//!     client.connect().await?;
//!
//!     let messages = client.messages();
//!     while let Some(message) = messages.recv().await {
//!         let message = message?;
//!         match message.gmcp() {
//!             Some(gmcp) => println!("GMCP {}: {:?}", gmcp.package(), gmcp.data()),
//!             None => print!("{}", message.as_str()),
//!         }
//!     }
//!
//!     client.dispose().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Sending Data
//!
//! ```no_run
//! # use darkwind_client::{ClientError, TelnetClient, TelnetCommand, TelnetOption};
//! # async fn example(client: &TelnetClient) -> Result<(), ClientError> {
//! // Send a line (appends the configured terminator)
//! client.write_line("look").await?;
//!
//! // Send a GMCP message
//! client.send_gmcp("Char.Skills.Get").await?;
//!
//! // Send a negotiation command
//! client.send_command(TelnetCommand::Dont, TelnetOption::Echo).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! A connection ends in one of three ways. When it is cancelled or the peer closes the
//! transport, the message channel simply ends. When the inbound stream breaks a protocol
//! limit, consumers receive one [`ClientError::Faulted`] before the channel ends.

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

mod channel;
mod client;
mod config;
mod connection;
mod error;
mod handler;
mod registry;
mod worker;

pub use channel::{MessageResult, MessageSender, Messages, message_channel};
pub use client::TelnetClient;
pub use config::{ClientConfig, DEFAULT_MESSAGE_CAPACITY};
pub use connection::TelnetWriter;
pub use error::{ClientError, Result};
pub use handler::{GmcpHandshake, OptionHandler, OptionRegistration};
pub use registry::SessionRegistry;

// Re-export types from darkwind_telnetcodec
pub use darkwind_telnetcodec::{
    CodecError, NegotiatedState, Preference, TelnetCommand, TelnetMessage, TelnetOption, gmcp,
};
