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

use crate::{TelnetFrame, TelnetMessage, TelnetOption};

///
/// `TelnetEvent` is what the decoder hands to the connection driving it.
///
/// Messages go to the application, replies go back to the transport, and
/// `OptionEnabled` tells the connection to run the enablement hook for an option.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TelnetEvent {
    /// Plain text or a completed subnegotiation
    Message(TelnetMessage),
    /// Negotiation reply that must be written back to the peer
    Reply(TelnetFrame),
    /// The option was enabled for the first time on this connection.
    /// Always follows the `Reply` that accepted it.
    OptionEnabled(TelnetOption),
}
