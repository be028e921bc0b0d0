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

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while decoding or encoding the Telnet stream.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// An I/O error occurred while reading from or writing to the underlying stream.
    ///
    /// The connection treats this as the transport closing, not as a fault.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A subnegotiation payload grew past the configured limit before `IAC SE`.
    #[error("Subnegotiation for {option} exceeded {limit} bytes")]
    SubnegotiationOverflow {
        /// Option being subnegotiated
        option: TelnetOption,
        /// Configured payload limit
        limit: usize,
    },

    /// A frame cannot be represented on the wire.
    #[error("Cannot encode {command} as a command frame")]
    Encoding {
        /// The offending command
        command: TelnetCommand,
    },
}

impl CodecError {
    /// Returns true if this error came from the transport rather than the byte stream.
    pub fn is_io(&self) -> bool {
        matches!(self, CodecError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let error: CodecError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset").into();
        assert!(error.is_io());
        assert_eq!(error.to_string(), "IO error: reset");
    }

    #[test]
    fn overflow_names_option() {
        let error = CodecError::SubnegotiationOverflow {
            option: TelnetOption::GMCP,
            limit: 16,
        };
        assert!(!error.is_io());
        assert_eq!(
            error.to_string(),
            "Subnegotiation for GMCP exceeded 16 bytes"
        );
    }
}
