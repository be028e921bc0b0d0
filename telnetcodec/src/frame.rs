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

use crate::{TelnetCommand, TelnetOption};
use bytes::Bytes;

///
/// Outbound unit written to the transport by [`crate::TelnetCodec`].
///
/// Each frame is encoded as one contiguous byte sequence, so a frame is never
/// interleaved with another on the wire as long as frames are written one at a time.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TelnetFrame {
    /// Text, encoded as ISO-8859-1 with `IAC` doubled.
    Text(String),
    /// Raw data bytes with `IAC` doubled.
    Raw(Bytes),
    /// `IAC <command> <option>`, or `IAC <command>` for commands without an option.
    Command(TelnetCommand, TelnetOption),
    /// `IAC SB <option> <payload> IAC SE` with `IAC` in the payload doubled.
    Subnegotiate(TelnetOption, Bytes),
}

impl TelnetFrame {
    /// Subnegotiation carrying a text payload.
    ///
    /// GMCP payloads are sent as UTF-8. Any other option's text is encoded the same
    /// way as [`TelnetFrame::Text`].
    pub fn subnegotiate_text(option: TelnetOption, payload: &str) -> Self {
        let bytes = match option {
            TelnetOption::GMCP => Bytes::copy_from_slice(payload.as_bytes()),
            _ => Bytes::from(latin1_bytes(payload)),
        };
        TelnetFrame::Subnegotiate(option, bytes)
    }
}

/// Encode text as ISO-8859-1, replacing characters above U+00FF with `?`.
pub fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}
