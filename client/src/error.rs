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

//! Client error types

use darkwind_telnetcodec::CodecError;
use std::io;

/// Client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport could not be opened
    #[error("Failed to connect to {address}: {source}")]
    Connect {
        /// Address that was dialled
        address: String,
        /// Underlying socket error
        #[source]
        source: io::Error,
    },

    /// The transport did not open within the configured timeout
    #[error("Connection to {0} timed out")]
    ConnectionTimeout(String),

    /// No transport is attached
    #[error("Not connected")]
    NotConnected,

    /// The message channel was closed
    #[error("Message channel closed")]
    ChannelClosed,

    /// The session already ended; a new client is needed to connect again
    #[error("Session has ended")]
    SessionEnded,

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A frame could not be encoded
    #[error("Codec error: {0}")]
    Codec(CodecError),

    /// The inbound byte stream broke a protocol limit and the connection was stopped
    #[error("Connection faulted: {0}")]
    Faulted(CodecError),
}

impl ClientError {
    /// Returns true if the error means the transport is unusable.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. }
                | Self::ConnectionTimeout(_)
                | Self::NotConnected
                | Self::SessionEnded
                | Self::Io(_)
        )
    }
}

impl From<CodecError> for ClientError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Io(error) => Self::Io(error),
            other => Self::Codec(other),
        }
    }
}

/// Client result type
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use darkwind_telnetcodec::{TelnetCommand, TelnetOption};

    #[test]
    fn codec_io_becomes_io() {
        let error = ClientError::from(CodecError::Io(io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(matches!(error, ClientError::Io(_)));
        assert!(error.is_connection_error());
    }

    #[test]
    fn codec_faults_stay_codec() {
        let error = ClientError::from(CodecError::Encoding {
            command: TelnetCommand::SubnegotiationEnd,
        });
        assert!(matches!(error, ClientError::Codec(_)));
        assert!(!error.is_connection_error());
    }

    #[test]
    fn display() {
        let error = ClientError::Faulted(CodecError::SubnegotiationOverflow {
            option: TelnetOption::GMCP,
            limit: 4,
        });
        assert_eq!(
            error.to_string(),
            "Connection faulted: Subnegotiation for GMCP exceeded 4 bytes"
        );
        assert_eq!(ClientError::NotConnected.to_string(), "Not connected");
    }
}
