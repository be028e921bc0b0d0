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

//! NVT control byte translation for plain text.

use crate::consts;

/// Text produced for a single data byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Translation {
    /// The byte is swallowed.
    Nothing,
    /// A single character.
    Char(char),
    /// A fixed replacement string.
    Text(&'static str),
}

/// Result of [`translate`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Translated {
    /// Text to append to the plain text buffer
    pub text: Translation,
    /// Whether pending plain text should be emitted after appending.
    pub flush: bool,
}

impl Translated {
    const fn new(text: Translation, flush: bool) -> Self {
        Translated { text, flush }
    }

    /// Append the translated text to `buffer`.
    pub fn push_to(&self, buffer: &mut String) {
        match self.text {
            Translation::Nothing => {}
            Translation::Char(ch) => buffer.push(ch),
            Translation::Text(text) => buffer.push_str(text),
        }
    }
}

/// Map one inbound data byte to display text and a flush signal.
///
/// Bytes without a special meaning map to the ISO-8859-1 character with the same
/// code point.
pub const fn translate(byte: u8) -> Translated {
    match byte {
        // NUL, ENQ, ACK, BEL, BS
        0 | 5 | 6 | 7 | 8 => Translated::new(Translation::Nothing, false),
        // SOH
        1 => Translated::new(Translation::Text("\n \n"), false),
        // STX
        2 => Translated::new(Translation::Char('\t'), false),
        // ETX
        3 => Translated::new(Translation::Text("^C"), false),
        // EOT
        4 => Translated::new(Translation::Text("^D"), false),
        // VT, FF
        11 | 12 => Translated::new(Translation::Char('\n'), true),
        // NAK
        21 => Translated::new(Translation::Text("NAK: Retransmit last message."), false),
        // US
        31 => Translated::new(Translation::Char(','), false),
        consts::LF => Translated::new(Translation::Char('\n'), true),
        byte => Translated::new(Translation::Char(byte as char), false),
    }
}
