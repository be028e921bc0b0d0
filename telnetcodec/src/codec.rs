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

use crate::frame::latin1_bytes;
use crate::options::SharedOptions;
use crate::translate::translate;
use crate::{
    CodecError, TelnetCommand, TelnetEvent, TelnetFrame, TelnetMessage, TelnetOption, consts,
};
use bytes::{Buf, BufMut, BytesMut};
use std::collections::VecDeque;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace, warn};

/// Default ceiling on a single subnegotiation payload.
pub const DEFAULT_MAX_SUBNEGOTIATION_LEN: usize = 64 * 1024;

/// A codec for the Telnet protocol.
///
/// Decoding turns a raw byte stream into [`TelnetEvent`]s, answering option
/// negotiation against a [`SharedOptions`] table as it goes. Encoding turns
/// [`TelnetFrame`]s into wire bytes with `IAC` escaped.
///
/// Parser state lives in the codec, so a command or subnegotiation split across
/// any number of reads is reassembled without re-examining earlier bytes.
///
/// ```
/// use bytes::BytesMut;
/// use darkwind_telnetcodec::{TelnetCodec, TelnetEvent, TelnetMessage};
/// use tokio_util::codec::Decoder;
///
/// let mut codec = TelnetCodec::default();
/// let mut src = BytesMut::from(&b"Hello\r\n"[..]);
/// assert_eq!(
///     codec.decode(&mut src).unwrap(),
///     Some(TelnetEvent::Message(TelnetMessage::text("Hello\r\n")))
/// );
/// assert_eq!(codec.decode(&mut src).unwrap(), None);
/// ```
#[derive(Clone, Debug)]
pub struct TelnetCodec {
    options: SharedOptions,
    decoder_state: DecoderState,
    subnegotiation: Option<TelnetOption>,
    text: String,
    payload: BytesMut,
    pending: VecDeque<TelnetEvent>,
    max_subnegotiation_len: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DecoderState {
    Normal,
    InterpretAsCommand,
    /// Verb known, option byte pending
    Negotiate(TelnetCommand),
}

impl TelnetCodec {
    /// Create a codec that negotiates against `options`.
    pub fn new(options: SharedOptions) -> TelnetCodec {
        TelnetCodec {
            options,
            decoder_state: DecoderState::Normal,
            subnegotiation: None,
            text: String::new(),
            payload: BytesMut::new(),
            pending: VecDeque::new(),
            max_subnegotiation_len: DEFAULT_MAX_SUBNEGOTIATION_LEN,
        }
    }

    /// Set the largest subnegotiation payload accepted before the stream faults.
    pub fn with_max_subnegotiation_len(mut self, limit: usize) -> TelnetCodec {
        self.max_subnegotiation_len = limit;
        self
    }

    /// The option table this codec negotiates against.
    pub fn options(&self) -> &SharedOptions {
        &self.options
    }

    /// Option of the subnegotiation currently being collected, if any.
    pub fn active_subnegotiation(&self) -> Option<TelnetOption> {
        self.subnegotiation
    }

    fn step(&mut self, byte: u8) -> Result<(), CodecError> {
        match (self.decoder_state, byte) {
            (DecoderState::Normal, consts::IAC) => {
                self.decoder_state = DecoderState::InterpretAsCommand;
            }
            (DecoderState::Normal, _) => {
                self.data(byte)?;
            }
            (DecoderState::InterpretAsCommand, consts::IAC) => {
                self.decoder_state = DecoderState::Normal;
                self.data(consts::IAC)?;
            }
            (DecoderState::InterpretAsCommand, consts::SE) => {
                self.decoder_state = DecoderState::Normal;
                self.end_subnegotiation();
            }
            (DecoderState::InterpretAsCommand, _) => {
                let command = TelnetCommand::from_u8(byte);
                if command.takes_option() {
                    self.decoder_state = DecoderState::Negotiate(command);
                } else {
                    self.decoder_state = DecoderState::Normal;
                    match command {
                        TelnetCommand::GoAhead | TelnetCommand::EndOfRecord => {
                            trace!(%command, "Prompt marker");
                        }
                        TelnetCommand::Unknown(_) => {
                            warn!("Received Unknown Command {:#X}", byte);
                        }
                        _ => {
                            debug!(%command, "Ignoring command");
                        }
                    }
                    self.flush_after_command();
                }
            }
            (DecoderState::Negotiate(TelnetCommand::Subnegotiate), _) => {
                self.decoder_state = DecoderState::Normal;
                self.begin_subnegotiation(TelnetOption::from_u8(byte));
            }
            (DecoderState::Negotiate(verb), _) => {
                self.decoder_state = DecoderState::Normal;
                self.negotiate(verb, TelnetOption::from_u8(byte));
                self.flush_after_command();
            }
        }
        Ok(())
    }

    fn data(&mut self, byte: u8) -> Result<(), CodecError> {
        if let Some(option) = self.subnegotiation {
            if self.payload.len() >= self.max_subnegotiation_len {
                self.subnegotiation = None;
                self.payload.clear();
                return Err(CodecError::SubnegotiationOverflow {
                    option,
                    limit: self.max_subnegotiation_len,
                });
            }
            self.payload.put_u8(byte);
        } else {
            let translated = translate(byte);
            translated.push_to(&mut self.text);
            if translated.flush {
                self.flush_text();
            }
        }
        Ok(())
    }

    fn negotiate(&mut self, verb: TelnetCommand, option: TelnetOption) {
        trace!(%verb, %option, "Received negotiation");
        let outcome = self.options.receive(verb, option);
        if let Some(reply) = outcome.reply {
            self.pending
                .push_back(TelnetEvent::Reply(TelnetFrame::Command(reply, option)));
        }
        if outcome.first_enabled {
            self.pending.push_back(TelnetEvent::OptionEnabled(option));
        }
    }

    fn begin_subnegotiation(&mut self, option: TelnetOption) {
        self.flush_text();
        self.options.touch(option);
        if let Some(previous) = self.subnegotiation.replace(option) {
            warn!(
                %previous,
                %option,
                discarded = self.payload.len(),
                "Subnegotiation restarted before IAC SE"
            );
        }
        trace!(%option, "Subnegotiation begin");
        self.payload.clear();
    }

    fn end_subnegotiation(&mut self) {
        match self.subnegotiation.take() {
            Some(option) => {
                let payload = match (option, std::str::from_utf8(&self.payload)) {
                    (TelnetOption::GMCP, Ok(text)) => text.to_string(),
                    _ => self.payload.iter().map(|byte| *byte as char).collect(),
                };
                self.payload.clear();
                trace!(%option, len = payload.len(), "Subnegotiation end");
                self.pending.push_back(TelnetEvent::Message(
                    TelnetMessage::subnegotiation(option, payload),
                ));
            }
            None => {
                warn!("Received IAC SE outside of a subnegotiation");
            }
        }
    }

    /// Pending text must not wait behind a command.
    fn flush_after_command(&mut self) {
        if self.subnegotiation.is_none() {
            self.flush_text();
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.pending
                .push_back(TelnetEvent::Message(TelnetMessage::text(text)));
        }
    }
}

impl Default for TelnetCodec {
    fn default() -> Self {
        TelnetCodec::new(SharedOptions::default())
    }
}

impl Decoder for TelnetCodec {
    type Item = TelnetEvent;
    type Error = CodecError;

    /// Consumes `src` one byte at a time, returning as soon as an event is ready.
    ///
    /// Events produced by a single byte are queued and handed out in order: a
    /// negotiation reply, then `OptionEnabled`, then any text flushed by the
    /// command. Once `src` is exhausted, plain text still pending is returned as
    /// one message so a prompt without a trailing newline is not held back.
    /// Subnegotiation payload is never flushed early.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(Some(event));
            }
            if !src.has_remaining() {
                break;
            }
            let byte = src.get_u8();
            self.step(byte)?;
        }
        self.flush_text();
        Ok(self.pending.pop_front())
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<TelnetEvent>, Self::Error> {
        let event = self.decode(src)?;
        if event.is_none() {
            if let Some(option) = self.subnegotiation.take() {
                warn!(
                    %option,
                    discarded = self.payload.len(),
                    "Stream ended inside a subnegotiation"
                );
                self.payload.clear();
            }
            if self.decoder_state != DecoderState::Normal {
                warn!(state = ?self.decoder_state, "Stream ended inside a command");
                self.decoder_state = DecoderState::Normal;
            }
        }
        Ok(event)
    }
}

fn put_escaped(dst: &mut BytesMut, bytes: &[u8]) {
    dst.reserve(bytes.len());
    for byte in bytes {
        if *byte == consts::IAC {
            dst.put_u8(consts::IAC);
        }
        dst.put_u8(*byte);
    }
}

impl Encoder<TelnetFrame> for TelnetCodec {
    type Error = CodecError;

    /// Encodes a `TelnetFrame` into `dst`.
    ///
    /// - `Text` is encoded as ISO-8859-1, characters above U+00FF become `?`.
    /// - `Text`, `Raw` and subnegotiation payloads have every `IAC` doubled.
    /// - `Command` writes `IAC verb option` for negotiation verbs and `IAC verb`
    ///   for everything else.
    ///
    /// # Errors
    ///
    /// [`CodecError::Encoding`] for `SB`, `SE` and `IAC` as a bare command, which
    /// would desynchronise the peer's parser.
    fn encode(&mut self, item: TelnetFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            TelnetFrame::Text(text) => {
                put_escaped(dst, &latin1_bytes(&text));
            }
            TelnetFrame::Raw(bytes) => {
                put_escaped(dst, &bytes);
            }
            TelnetFrame::Command(command, option) => match command {
                TelnetCommand::Subnegotiate
                | TelnetCommand::SubnegotiationEnd
                | TelnetCommand::InterpretAsCommand => {
                    return Err(CodecError::Encoding { command });
                }
                command if command.is_negotiation() => {
                    dst.reserve(3);
                    dst.put_u8(consts::IAC);
                    dst.put_u8(command.to_u8());
                    dst.put_u8(option.to_u8());
                }
                command => {
                    dst.reserve(2);
                    dst.put_u8(consts::IAC);
                    dst.put_u8(command.to_u8());
                }
            },
            TelnetFrame::Subnegotiate(option, payload) => {
                dst.reserve(payload.len() + 5);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SB);
                dst.put_u8(option.to_u8());
                put_escaped(dst, &payload);
                dst.put_u8(consts::IAC);
                dst.put_u8(consts::SE);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NegotiatedState, Preference};
    use bytes::Bytes;
    use tracing_test::traced_test;

    // ============================================================================
    // Helper Functions
    // ============================================================================

    /// Feed one read worth of bytes and collect everything the decoder emits.
    fn read(codec: &mut TelnetCodec, bytes: &[u8]) -> Vec<TelnetEvent> {
        let mut src = BytesMut::from(bytes);
        let mut out = Vec::new();
        while let Some(event) = codec.decode(&mut src).expect("decode should not error") {
            out.push(event);
        }
        assert!(src.is_empty());
        out
    }

    fn text(text: &str) -> TelnetEvent {
        TelnetEvent::Message(TelnetMessage::text(text))
    }

    fn reply(command: TelnetCommand, option: TelnetOption) -> TelnetEvent {
        TelnetEvent::Reply(TelnetFrame::Command(command, option))
    }

    fn encode(frame: TelnetFrame) -> Vec<u8> {
        let mut dst = BytesMut::new();
        TelnetCodec::default()
            .encode(frame, &mut dst)
            .expect("encode ok");
        dst.to_vec()
    }

    fn subnegotiation_bytes(option: u8, payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![consts::IAC, consts::SB, option];
        bytes.extend_from_slice(payload);
        bytes.extend_from_slice(&[consts::IAC, consts::SE]);
        bytes
    }

    fn wanting(option: TelnetOption) -> TelnetCodec {
        let options = SharedOptions::new();
        options.register(option, Preference::Wanted);
        TelnetCodec::new(options)
    }

    // ============================================================================
    // Plain text
    // ============================================================================

    #[test]
    fn hello_line_is_one_message() {
        let mut codec = TelnetCodec::default();
        assert_eq!(read(&mut codec, b"Hello\r\n"), vec![text("Hello\r\n")]);
    }

    #[test]
    fn each_line_feed_flushes() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(&mut codec, b"one\ntwo\nthr"),
            vec![text("one\n"), text("two\n"), text("thr")]
        );
    }

    #[test]
    fn control_bytes_are_translated() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(&mut codec, b"a\x00\x02b\x03\x1fc"),
            vec![text("a\tb^C,c")]
        );
    }

    #[test]
    fn vertical_tab_flushes() {
        let mut codec = TelnetCodec::default();
        assert_eq!(read(&mut codec, b"top\x0bbottom"), vec![text("top\n"), text("bottom")]);
    }

    #[test]
    fn escaped_iac_is_literal() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(&mut codec, &[b'a', consts::IAC, consts::IAC, b'b']),
            vec![text("a\u{FF}b")]
        );
    }

    #[test]
    fn empty_read_emits_nothing() {
        let mut codec = TelnetCodec::default();
        assert!(read(&mut codec, b"").is_empty());
    }

    // ============================================================================
    // Negotiation
    // ============================================================================

    #[test]
    fn unsolicited_do_is_refused_once() {
        let mut codec = TelnetCodec::default();
        let bytes = [consts::IAC, consts::DO, consts::option::ECHO];
        assert_eq!(
            read(&mut codec, &bytes),
            vec![reply(TelnetCommand::Wont, TelnetOption::Echo)]
        );
        assert!(read(&mut codec, &bytes).is_empty());
        assert_eq!(
            codec.options().get(TelnetOption::Echo).state,
            NegotiatedState::Disabled
        );
    }

    #[test]
    fn wanted_will_is_accepted_and_enabled() {
        let mut codec = wanting(TelnetOption::GMCP);
        let bytes = [consts::IAC, consts::WILL, consts::option::GMCP];
        assert_eq!(
            read(&mut codec, &bytes),
            vec![
                reply(TelnetCommand::Do, TelnetOption::GMCP),
                TelnetEvent::OptionEnabled(TelnetOption::GMCP),
            ]
        );
        assert!(read(&mut codec, &bytes).is_empty());
    }

    #[test]
    fn negotiation_flushes_pending_text() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(
                &mut codec,
                &[b'>', consts::IAC, consts::WILL, consts::option::SGA, b'x']
            ),
            vec![
                reply(TelnetCommand::Dont, TelnetOption::SuppressGoAhead),
                text(">"),
                text("x"),
            ]
        );
    }

    #[test]
    fn go_ahead_flushes_prompt() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(&mut codec, &[b'>', b' ', consts::IAC, consts::GA, b'l']),
            vec![text("> "), text("l")]
        );
    }

    #[test]
    fn two_byte_command_does_not_swallow_data() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(&mut codec, &[consts::IAC, consts::NOP, b'o', b'k']),
            vec![text("ok")]
        );
        assert_eq!(
            read(&mut codec, &[consts::IAC, 0x10, b'!']),
            vec![text("!")]
        );
    }

    // ============================================================================
    // Read boundaries
    // ============================================================================

    #[test]
    fn lone_iac_waits_for_next_read() {
        let mut codec = wanting(TelnetOption::GMCP);
        assert!(read(&mut codec, &[consts::IAC]).is_empty());
        assert_eq!(
            read(&mut codec, &[consts::WILL, consts::option::GMCP]),
            vec![
                reply(TelnetCommand::Do, TelnetOption::GMCP),
                TelnetEvent::OptionEnabled(TelnetOption::GMCP),
            ]
        );
    }

    #[test]
    fn verb_without_option_waits_for_next_read() {
        let mut codec = TelnetCodec::default();
        assert!(read(&mut codec, &[consts::IAC, consts::DO]).is_empty());
        assert_eq!(
            read(&mut codec, &[consts::option::NAWS, b'z']),
            vec![reply(TelnetCommand::Wont, TelnetOption::WindowSize), text("z")]
        );
    }

    #[test]
    fn split_escape_is_literal() {
        let mut codec = TelnetCodec::default();
        assert_eq!(read(&mut codec, &[b'a', consts::IAC]), vec![text("a")]);
        assert_eq!(read(&mut codec, &[consts::IAC, b'b']), vec![text("\u{FF}b")]);
    }

    // ============================================================================
    // Subnegotiation
    // ============================================================================

    #[test]
    fn subnegotiation_across_reads_is_one_message() {
        let mut codec = TelnetCodec::default();
        let mut first = vec![consts::IAC, consts::SB, consts::option::GMCP];
        first.extend_from_slice(b"Core.H");
        let mut second = b"ello {}".to_vec();
        second.extend_from_slice(&[consts::IAC, consts::SE]);

        assert!(read(&mut codec, &first).is_empty());
        assert_eq!(codec.active_subnegotiation(), Some(TelnetOption::GMCP));
        assert_eq!(
            read(&mut codec, &second),
            vec![TelnetEvent::Message(TelnetMessage::subnegotiation(
                TelnetOption::GMCP,
                "Core.Hello {}"
            ))]
        );
        assert_eq!(codec.active_subnegotiation(), None);
    }

    #[test]
    fn subnegotiation_flushes_text_first() {
        let mut codec = TelnetCodec::default();
        let mut bytes = b"hp: ".to_vec();
        bytes.extend_from_slice(&[consts::IAC, consts::SB, consts::option::MSSP]);
        bytes.extend_from_slice(b"x");
        bytes.extend_from_slice(&[consts::IAC, consts::SE]);
        assert_eq!(
            read(&mut codec, &bytes),
            vec![
                text("hp: "),
                TelnetEvent::Message(TelnetMessage::subnegotiation(TelnetOption::MSSP, "x")),
            ]
        );
    }

    #[test]
    fn subnegotiation_payload_is_not_translated() {
        let mut codec = TelnetCodec::default();
        let mut bytes = vec![consts::IAC, consts::SB, consts::option::MSSP];
        bytes.extend_from_slice(&[1, b'a', 2, b'\n', consts::IAC, consts::IAC]);
        bytes.extend_from_slice(&[consts::IAC, consts::SE]);
        assert_eq!(
            read(&mut codec, &bytes),
            vec![TelnetEvent::Message(TelnetMessage::subnegotiation(
                TelnetOption::MSSP,
                "\u{1}a\u{2}\n\u{FF}"
            ))]
        );
    }

    #[test]
    fn gmcp_payload_is_utf8() {
        let mut codec = TelnetCodec::default();
        let body = "Char.Name {\"name\":\"Zo\u{eb}\"}";
        let bytes = subnegotiation_bytes(consts::option::GMCP, body.as_bytes());
        assert_eq!(
            read(&mut codec, &bytes),
            vec![TelnetEvent::Message(TelnetMessage::subnegotiation(TelnetOption::GMCP, body))]
        );
    }

    #[test]
    fn gmcp_payload_that_is_not_utf8_falls_back_to_latin1() {
        let mut codec = TelnetCodec::default();
        let bytes = subnegotiation_bytes(consts::option::GMCP, b"Room.Name caf\xE9");
        assert_eq!(
            read(&mut codec, &bytes),
            vec![TelnetEvent::Message(TelnetMessage::subnegotiation(
                TelnetOption::GMCP,
                "Room.Name caf\u{e9}"
            ))]
        );
    }

    #[test]
    fn other_payloads_stay_latin1() {
        let mut codec = TelnetCodec::default();
        let bytes = subnegotiation_bytes(consts::option::MSSP, "\u{eb}".as_bytes());
        assert_eq!(
            read(&mut codec, &bytes),
            vec![TelnetEvent::Message(TelnetMessage::subnegotiation(
                TelnetOption::MSSP,
                "\u{c3}\u{ab}"
            ))]
        );
    }

    #[test]
    fn negotiation_inside_subnegotiation_still_replies() {
        let mut codec = TelnetCodec::default();
        let mut bytes = vec![consts::IAC, consts::SB, consts::option::GMCP, b'a'];
        bytes.extend_from_slice(&[consts::IAC, consts::DO, consts::option::ECHO, b'b']);
        bytes.extend_from_slice(&[consts::IAC, consts::SE]);
        assert_eq!(
            read(&mut codec, &bytes),
            vec![
                reply(TelnetCommand::Wont, TelnetOption::Echo),
                TelnetEvent::Message(TelnetMessage::subnegotiation(TelnetOption::GMCP, "ab")),
            ]
        );
    }

    #[test]
    fn stray_se_is_ignored() {
        let mut codec = TelnetCodec::default();
        assert_eq!(
            read(&mut codec, &[b'a', consts::IAC, consts::SE, b'b']),
            vec![text("ab")]
        );
    }

    #[test]
    #[traced_test]
    fn anomalies_are_logged() {
        let mut codec = TelnetCodec::default();
        read(&mut codec, &[consts::IAC, 0x10, consts::IAC, consts::SE]);
        assert!(logs_contain("Received Unknown Command 0x10"));
        assert!(logs_contain("IAC SE outside of a subnegotiation"));
    }

    #[test]
    fn oversized_subnegotiation_faults() {
        let mut codec = TelnetCodec::default().with_max_subnegotiation_len(4);
        let mut src = BytesMut::from(&[consts::IAC, consts::SB, consts::option::GMCP][..]);
        src.extend_from_slice(b"Core.Hello");
        let error = loop {
            match codec.decode(&mut src) {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("expected overflow"),
                Err(error) => break error,
            }
        };
        assert!(matches!(
            error,
            CodecError::SubnegotiationOverflow {
                option: TelnetOption::GMCP,
                limit: 4
            }
        ));
        assert_eq!(codec.active_subnegotiation(), None);
    }

    #[test]
    fn eof_discards_unterminated_subnegotiation() {
        let mut codec = TelnetCodec::default();
        let mut src = BytesMut::from(&[consts::IAC, consts::SB, consts::option::GMCP, b'x'][..]);
        assert_eq!(codec.decode_eof(&mut src).expect("decode"), None);
        assert_eq!(codec.active_subnegotiation(), None);
    }

    // ============================================================================
    // Encoding
    // ============================================================================

    #[test]
    fn encode_text_doubles_iac() {
        assert_eq!(
            encode(TelnetFrame::Text("a\u{FF}b".to_string())),
            vec![b'a', consts::IAC, consts::IAC, b'b']
        );
    }

    #[test]
    fn encode_text_replaces_wide_characters() {
        assert_eq!(encode(TelnetFrame::Text("\u{263A}".to_string())), b"?".to_vec());
    }

    #[test]
    fn encode_raw_doubles_iac() {
        assert_eq!(
            encode(TelnetFrame::Raw(Bytes::from_static(&[consts::IAC, 0]))),
            vec![consts::IAC, consts::IAC, 0]
        );
    }

    #[test]
    fn encode_negotiation_command() {
        assert_eq!(
            encode(TelnetFrame::Command(TelnetCommand::Will, TelnetOption::GMCP)),
            vec![consts::IAC, consts::WILL, consts::option::GMCP]
        );
    }

    #[test]
    fn encode_two_byte_command_omits_option() {
        assert_eq!(
            encode(TelnetFrame::Command(TelnetCommand::AreYouThere, TelnetOption::Echo)),
            vec![consts::IAC, consts::AYT]
        );
    }

    #[test]
    fn encode_rejects_framing_commands() {
        let mut dst = BytesMut::new();
        let result = TelnetCodec::default().encode(
            TelnetFrame::Command(TelnetCommand::SubnegotiationEnd, TelnetOption::GMCP),
            &mut dst,
        );
        assert!(matches!(
            result,
            Err(CodecError::Encoding {
                command: TelnetCommand::SubnegotiationEnd
            })
        ));
        assert!(dst.is_empty());
    }

    #[test]
    fn encode_gmcp_text_as_utf8() {
        let mut expected = vec![consts::IAC, consts::SB, consts::option::GMCP];
        expected.extend_from_slice("Char.Name {\"name\":\"Zo\u{eb}\"}".as_bytes());
        expected.extend_from_slice(&[consts::IAC, consts::SE]);
        assert_eq!(
            encode(TelnetFrame::subnegotiate_text(
                TelnetOption::GMCP,
                "Char.Name {\"name\":\"Zo\u{eb}\"}"
            )),
            expected
        );
    }

    #[test]
    fn encode_subnegotiation() {
        let mut expected = vec![consts::IAC, consts::SB, consts::option::GMCP];
        expected.extend_from_slice(b"Core.Ping");
        expected.extend_from_slice(&[consts::IAC, consts::SE]);
        assert_eq!(
            encode(TelnetFrame::subnegotiate_text(TelnetOption::GMCP, "Core.Ping")),
            expected
        );
    }
}
