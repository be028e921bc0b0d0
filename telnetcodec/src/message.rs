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

use crate::TelnetOption;
use crate::gmcp::GmcpMessage;
use std::fmt;

///
/// Unit of decoded output delivered to the application.
///
/// Plain text carries no option. A completed subnegotiation carries the option it
/// was addressed to and its payload as text.
///
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TelnetMessage {
    option: Option<TelnetOption>,
    text: String,
}

impl TelnetMessage {
    /// Plain application text.
    pub fn text<S: Into<String>>(text: S) -> Self {
        TelnetMessage {
            option: None,
            text: text.into(),
        }
    }

    /// Payload of a completed subnegotiation.
    pub fn subnegotiation<S: Into<String>>(option: TelnetOption, payload: S) -> Self {
        TelnetMessage {
            option: Some(option),
            text: payload.into(),
        }
    }

    /// The option this payload belongs to, or `None` for plain text.
    pub fn option(&self) -> Option<TelnetOption> {
        self.option
    }

    /// Wire code of the option, `0` for plain text.
    pub fn option_code(&self) -> u8 {
        self.option.map(TelnetOption::to_u8).unwrap_or(0)
    }

    /// True for plain application text.
    pub fn is_plain_text(&self) -> bool {
        self.option.is_none()
    }

    /// Message body
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the message, returning its body.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Split a GMCP payload into package and data.
    ///
    /// Returns `None` for anything that is not a GMCP subnegotiation.
    pub fn gmcp(&self) -> Option<GmcpMessage> {
        match self.option {
            Some(TelnetOption::GMCP) => Some(GmcpMessage::parse(&self.text)),
            _ => None,
        }
    }
}

impl fmt::Display for TelnetMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.option {
            None => write!(f, "{}", self.text),
            Some(option) => write!(f, "[{option}] {}", self.text),
        }
    }
}
