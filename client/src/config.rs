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

//! Client configuration

use std::time::Duration;

/// Default number of messages buffered between the read task and the consumer.
pub const DEFAULT_MESSAGE_CAPACITY: usize = 25;

/// Telnet client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server hostname or IP address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Messages buffered before the read task stops reading
    pub message_capacity: usize,

    /// Initial capacity of the transport read buffer
    pub read_buffer_size: usize,

    /// Largest subnegotiation payload accepted before the connection faults
    pub max_subnegotiation_len: usize,

    /// Appended by `write_line`
    pub line_terminator: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 23,
            connect_timeout: Duration::from_secs(10),
            message_capacity: DEFAULT_MESSAGE_CAPACITY,
            read_buffer_size: 4096,
            max_subnegotiation_len: darkwind_telnetcodec::DEFAULT_MAX_SUBNEGOTIATION_LEN,
            line_terminator: "\n".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the connection timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the message channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_message_capacity(mut self, capacity: usize) -> Self {
        self.message_capacity = capacity.max(1);
        self
    }

    /// Set the read buffer size
    #[must_use]
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Set the subnegotiation payload limit
    #[must_use]
    pub fn with_max_subnegotiation_len(mut self, limit: usize) -> Self {
        self.max_subnegotiation_len = limit;
        self
    }

    /// Set the line terminator used by `write_line`
    #[must_use]
    pub fn with_line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.line_terminator = terminator.into();
        self
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
