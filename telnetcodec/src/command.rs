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

use crate::consts;
use std::fmt;

///
/// Telnet command byte following an `IAC`.
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetCommand {
    /// [`consts::EOR`] End of Record
    EndOfRecord,
    /// [`consts::SE`] End of subnegotiation
    SubnegotiationEnd,
    /// [`consts::NOP`] No operation
    NoOperation,
    /// [`consts::DM`] Data Mark
    DataMark,
    /// [`consts::BRK`] Break
    Break,
    /// [`consts::IP`] Interrupt Process
    InterruptProcess,
    /// [`consts::AO`] Abort Output
    AbortOutput,
    /// [`consts::AYT`] Are You There
    AreYouThere,
    /// [`consts::EC`] Erase Character
    EraseCharacter,
    /// [`consts::EL`] Erase Line
    EraseLine,
    /// [`consts::GA`] Go Ahead
    GoAhead,
    /// [`consts::SB`] Begin subnegotiation
    Subnegotiate,
    /// [`consts::WILL`] Sender offers to enable an option
    Will,
    /// [`consts::WONT`] Sender refuses an option
    Wont,
    /// [`consts::DO`] Sender asks the receiver to enable an option
    Do,
    /// [`consts::DONT`] Sender forbids an option
    Dont,
    /// [`consts::IAC`] Escaped literal 0xFF
    InterpretAsCommand,
    /// Any other byte
    Unknown(u8),
}

impl TelnetCommand {
    /// Wire value of this command.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetCommand::EndOfRecord => consts::EOR,
            TelnetCommand::SubnegotiationEnd => consts::SE,
            TelnetCommand::NoOperation => consts::NOP,
            TelnetCommand::DataMark => consts::DM,
            TelnetCommand::Break => consts::BRK,
            TelnetCommand::InterruptProcess => consts::IP,
            TelnetCommand::AbortOutput => consts::AO,
            TelnetCommand::AreYouThere => consts::AYT,
            TelnetCommand::EraseCharacter => consts::EC,
            TelnetCommand::EraseLine => consts::EL,
            TelnetCommand::GoAhead => consts::GA,
            TelnetCommand::Subnegotiate => consts::SB,
            TelnetCommand::Will => consts::WILL,
            TelnetCommand::Wont => consts::WONT,
            TelnetCommand::Do => consts::DO,
            TelnetCommand::Dont => consts::DONT,
            TelnetCommand::InterpretAsCommand => consts::IAC,
            TelnetCommand::Unknown(byte) => byte,
        }
    }

    /// Decode a command byte.
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::EOR => TelnetCommand::EndOfRecord,
            consts::SE => TelnetCommand::SubnegotiationEnd,
            consts::NOP => TelnetCommand::NoOperation,
            consts::DM => TelnetCommand::DataMark,
            consts::BRK => TelnetCommand::Break,
            consts::IP => TelnetCommand::InterruptProcess,
            consts::AO => TelnetCommand::AbortOutput,
            consts::AYT => TelnetCommand::AreYouThere,
            consts::EC => TelnetCommand::EraseCharacter,
            consts::EL => TelnetCommand::EraseLine,
            consts::GA => TelnetCommand::GoAhead,
            consts::SB => TelnetCommand::Subnegotiate,
            consts::WILL => TelnetCommand::Will,
            consts::WONT => TelnetCommand::Wont,
            consts::DO => TelnetCommand::Do,
            consts::DONT => TelnetCommand::Dont,
            consts::IAC => TelnetCommand::InterpretAsCommand,
            byte => TelnetCommand::Unknown(byte),
        }
    }

    /// `DO`, `DONT`, `WILL` or `WONT`.
    pub fn is_negotiation(self) -> bool {
        matches!(
            self,
            TelnetCommand::Do | TelnetCommand::Dont | TelnetCommand::Will | TelnetCommand::Wont
        )
    }

    /// Whether an option byte follows this command on the wire.
    pub fn takes_option(self) -> bool {
        self.is_negotiation() || self == TelnetCommand::Subnegotiate
    }
}

impl From<u8> for TelnetCommand {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetCommand> for u8 {
    fn from(command: TelnetCommand) -> Self {
        command.to_u8()
    }
}

impl fmt::Display for TelnetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelnetCommand::EndOfRecord => write!(f, "EOR"),
            TelnetCommand::SubnegotiationEnd => write!(f, "SE"),
            TelnetCommand::NoOperation => write!(f, "NOP"),
            TelnetCommand::DataMark => write!(f, "DM"),
            TelnetCommand::Break => write!(f, "BRK"),
            TelnetCommand::InterruptProcess => write!(f, "IP"),
            TelnetCommand::AbortOutput => write!(f, "AO"),
            TelnetCommand::AreYouThere => write!(f, "AYT"),
            TelnetCommand::EraseCharacter => write!(f, "EC"),
            TelnetCommand::EraseLine => write!(f, "EL"),
            TelnetCommand::GoAhead => write!(f, "GA"),
            TelnetCommand::Subnegotiate => write!(f, "SB"),
            TelnetCommand::Will => write!(f, "WILL"),
            TelnetCommand::Wont => write!(f, "WONT"),
            TelnetCommand::Do => write!(f, "DO"),
            TelnetCommand::Dont => write!(f, "DONT"),
            TelnetCommand::InterpretAsCommand => write!(f, "IAC"),
            TelnetCommand::Unknown(byte) => write!(f, "Unknown({byte})"),
        }
    }
}
