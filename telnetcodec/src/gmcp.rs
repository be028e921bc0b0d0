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

use std::fmt;

///
/// GMCP (Generic Mud Communication Protocol) Message
///
/// Each GMCP payload is a package name optionally followed by a single space and
/// a JSON body. The body is kept as opaque text; decoding it is left to the
/// consumer.
///
/// ```text
/// Core.Hello {"Client":"DarkWind","Version":"1.0.0"}
/// Char.Vitals {"hp": 100, "maxhp": 120}
/// Core.Ping
/// ```
///
/// # References
///
/// - [GMCP Protocol Specification](https://tintin.mudhalla.net/protocols/gmcp/)
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GmcpMessage {
    package: String,
    data: Option<String>,
}

impl GmcpMessage {
    /// Creates a new GMCP message with a package name and optional data.
    ///
    /// ```
    /// use darkwind_telnetcodec::gmcp::GmcpMessage;
    ///
    /// let msg = GmcpMessage::new("Core.Hello", Some(r#"{"Client":"DarkWind"}"#));
    /// assert_eq!(msg.to_string(), r#"Core.Hello {"Client":"DarkWind"}"#);
    /// ```
    pub fn new<S: Into<String>, D: Into<String>>(package: S, data: Option<D>) -> Self {
        Self {
            package: package.into(),
            data: data.map(|d| d.into()),
        }
    }

    /// Creates a GMCP message without data.
    pub fn command<S: Into<String>>(package: S) -> Self {
        Self {
            package: package.into(),
            data: None,
        }
    }

    /// Splits a subnegotiation payload at the first space.
    ///
    /// ```
    /// use darkwind_telnetcodec::gmcp::GmcpMessage;
    ///
    /// let msg = GmcpMessage::parse("Core.Ping");
    /// assert_eq!(msg.package(), "Core.Ping");
    /// assert_eq!(msg.data(), None);
    /// ```
    pub fn parse(text: &str) -> Self {
        match text.split_once(' ') {
            Some((package, data)) => Self::new(package, Some(data)),
            None => Self::command(text),
        }
    }

    /// Returns the package name.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Returns the JSON data if present.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Checks if this message has data.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl fmt::Display for GmcpMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package)?;
        if let Some(ref data) = self.data {
            write!(f, " {}", data)?;
        }
        Ok(())
    }
}
