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

//! # DarkWind Telnet Protocol Codec
//!
//! Byte-level Telnet ([RFC 854](https://tools.ietf.org/html/rfc854)) parsing and option
//! negotiation for a MUD client, packaged as a `tokio_util::codec` codec.
//!
//! ## Overview
//!
//! The decoder turns a raw byte stream from a NVT server into a sequence of
//! [`TelnetEvent`]s:
//!
//! - **Messages**: plain text, split at line boundaries and command boundaries, and completed
//!   subnegotiation payloads, both as [`TelnetMessage`]
//! - **Replies**: `WILL`/`WONT`/`DO`/`DONT` answers to the peer's negotiation, to be written
//!   straight back to the transport
//! - **Enablement**: a one-shot notice the first time an option is turned on, so the owner can
//!   run a handshake such as the GMCP `Core.Hello`
//!
//! The encoder writes [`TelnetFrame`]s with every literal `0xFF` escaped as `IAC IAC`.
//!
//! ## Core Components
//!
//! ### [`TelnetOptions`]
//!
//! The per-connection option table: one entry per option code, holding what the caller
//! wants ([`Preference`]) and what the wire decided ([`NegotiatedState`]). A peer that
//! repeats a request gets no second reply, which keeps two endpoints from negotiating
//! forever.
//!
//! ### [`translate`]
//!
//! Maps NVT control bytes to display text and decides where plain text is flushed.
//!
//! ### [`TelnetCodec`]
//!
//! The state machine. State survives across reads, so commands and subnegotiations may be
//! split at any byte.
//!
//! ## Usage Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use darkwind_telnetcodec::{
//!     Preference, SharedOptions, TelnetCodec, TelnetCommand, TelnetEvent, TelnetFrame,
//!     TelnetOption,
//! };
//! use tokio_util::codec::Decoder;
//!
//! let options = SharedOptions::new();
//! options.register(TelnetOption::GMCP, Preference::Wanted);
//! let mut codec = TelnetCodec::new(options);
//!
//! // Server offers GMCP
//! let mut input = BytesMut::from(&b"\xFF\xFB\xC9"[..]);
//! assert_eq!(
//!     codec.decode(&mut input).unwrap(),
//!     Some(TelnetEvent::Reply(TelnetFrame::Command(TelnetCommand::Do, TelnetOption::GMCP)))
//! );
//! assert_eq!(
//!     codec.decode(&mut input).unwrap(),
//!     Some(TelnetEvent::OptionEnabled(TelnetOption::GMCP))
//! );
//! ```
//!
//! ## Error Handling
//!
//! [`CodecError::Io`] surfaces transport failures through `FramedRead`. The only stream
//! fault the decoder raises itself is [`CodecError::SubnegotiationOverflow`]. Malformed
//! input such as a stray `IAC SE` or an unknown command is logged and skipped.
//!
//! ## Related RFCs
//!
//! - RFC 854: Telnet Protocol Specification
//! - RFC 855: Telnet Option Specifications
//! - RFC 857: Telnet Echo Option
//! - RFC 858: Telnet Suppress Go Ahead Option

#![warn(
    clippy::cargo,
    missing_docs,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms
)]
#![allow(
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

mod codec;
mod command;
pub mod consts;
mod event;
mod frame;
pub mod gmcp;
mod message;
mod options;
mod result;
mod translate;

pub use self::codec::{DEFAULT_MAX_SUBNEGOTIATION_LEN, TelnetCodec};
pub use self::command::TelnetCommand;
pub use self::event::TelnetEvent;
pub use self::frame::{TelnetFrame, latin1_bytes};
pub use self::message::TelnetMessage;
pub use self::options::{
    NegotiatedState, Negotiation, OptionEntry, Preference, SharedOptions, TelnetOption,
    TelnetOptions,
};
pub use self::result::{CodecError, CodecResult};
pub use self::translate::{Translated, Translation, translate};
