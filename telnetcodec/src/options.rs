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

use crate::{TelnetCommand, consts};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

///
/// [Telnet Terminal Options](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
///
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TelnetOption {
    /// [`consts::option::ECHO`] Echo
    Echo,
    /// [`consts::option::SGA`] Suppress Go Ahead
    SuppressGoAhead,
    /// [`consts::option::STATUS`] Status
    Status,
    /// [`consts::option::TM`] Timing Mark
    TimingMark,
    /// [`consts::option::NAOL`] Output Line Width
    OutputLineWidth,
    /// [`consts::option::NAOP`] Output Page Size
    OutputPageSize,
    /// [`consts::option::NAOCRD`] Output Carriage-Return Disposition
    OutputCarriageReturnDisposition,
    /// [`consts::option::NAOHTS`] Output Horizontal Tab Stops
    OutputHorizontalTabstops,
    /// [`consts::option::NAOHTD`] Output Horizontal Tab Disposition
    OutputHorizontalTabDisposition,
    /// [`consts::option::NAOVTS`] Output Vertical Tab Stops
    OutputVerticalTabstops,
    /// [`consts::option::NAOVTD`] Output Vertical Tab Disposition
    OutputVerticalTabDisposition,
    /// [`consts::option::LOGOUT`] Logout
    Logout,
    /// [`consts::option::TTYPE`] Terminal Type
    TerminalType,
    /// [`consts::option::EOR`] End of Record
    EndOfRecord,
    /// [`consts::option::TUID`] User Identification
    UserIdentification,
    /// [`consts::option::NAWS`] Negotiate About Window Size
    WindowSize,
    /// [`consts::option::TSPEED`] Terminal Speed
    TerminalSpeed,
    /// [`consts::option::LFLOW`] Remote Flow Control
    RemoteFlowControl,
    /// [`consts::option::LINEMODE`] Linemode
    Linemode,
    /// [`consts::option::XDISPLOC`] X Display Location
    XDisplayLocation,
    /// [`consts::option::OLD_ENVIRONMENT`] Environment Variables
    EnvironmentVariables,
    /// [`consts::option::NEW_ENVIRONMENT`] Telnet Environment Option
    TelnetEnvironmentOption,
    /// [`consts::option::MSSP`] Mud Server Status Protocol
    MSSP,
    /// [`consts::option::GMCP`] Generic Mud Communication Protocol
    GMCP,
    /// Any option code outside the catalogue
    Unknown(u8),
}

impl TelnetOption {
    /// Converts a `TelnetOption` into its wire option code.
    pub fn to_u8(self) -> u8 {
        match self {
            TelnetOption::Echo => consts::option::ECHO,
            TelnetOption::SuppressGoAhead => consts::option::SGA,
            TelnetOption::Status => consts::option::STATUS,
            TelnetOption::TimingMark => consts::option::TM,
            TelnetOption::OutputLineWidth => consts::option::NAOL,
            TelnetOption::OutputPageSize => consts::option::NAOP,
            TelnetOption::OutputCarriageReturnDisposition => consts::option::NAOCRD,
            TelnetOption::OutputHorizontalTabstops => consts::option::NAOHTS,
            TelnetOption::OutputHorizontalTabDisposition => consts::option::NAOHTD,
            TelnetOption::OutputVerticalTabstops => consts::option::NAOVTS,
            TelnetOption::OutputVerticalTabDisposition => consts::option::NAOVTD,
            TelnetOption::Logout => consts::option::LOGOUT,
            TelnetOption::TerminalType => consts::option::TTYPE,
            TelnetOption::EndOfRecord => consts::option::EOR,
            TelnetOption::UserIdentification => consts::option::TUID,
            TelnetOption::WindowSize => consts::option::NAWS,
            TelnetOption::TerminalSpeed => consts::option::TSPEED,
            TelnetOption::RemoteFlowControl => consts::option::LFLOW,
            TelnetOption::Linemode => consts::option::LINEMODE,
            TelnetOption::XDisplayLocation => consts::option::XDISPLOC,
            TelnetOption::EnvironmentVariables => consts::option::OLD_ENVIRONMENT,
            TelnetOption::TelnetEnvironmentOption => consts::option::NEW_ENVIRONMENT,
            TelnetOption::MSSP => consts::option::MSSP,
            TelnetOption::GMCP => consts::option::GMCP,
            TelnetOption::Unknown(byte) => byte,
        }
    }

    /// Converts a wire option code into a `TelnetOption`.
    ///
    /// Codes outside the catalogue map to [`TelnetOption::Unknown`] so that every
    /// value `0..=255` round trips through [`TelnetOption::to_u8`].
    pub fn from_u8(byte: u8) -> Self {
        match byte {
            consts::option::ECHO => TelnetOption::Echo,
            consts::option::SGA => TelnetOption::SuppressGoAhead,
            consts::option::STATUS => TelnetOption::Status,
            consts::option::TM => TelnetOption::TimingMark,
            consts::option::NAOL => TelnetOption::OutputLineWidth,
            consts::option::NAOP => TelnetOption::OutputPageSize,
            consts::option::NAOCRD => TelnetOption::OutputCarriageReturnDisposition,
            consts::option::NAOHTS => TelnetOption::OutputHorizontalTabstops,
            consts::option::NAOHTD => TelnetOption::OutputHorizontalTabDisposition,
            consts::option::NAOVTS => TelnetOption::OutputVerticalTabstops,
            consts::option::NAOVTD => TelnetOption::OutputVerticalTabDisposition,
            consts::option::LOGOUT => TelnetOption::Logout,
            consts::option::TTYPE => TelnetOption::TerminalType,
            consts::option::EOR => TelnetOption::EndOfRecord,
            consts::option::TUID => TelnetOption::UserIdentification,
            consts::option::NAWS => TelnetOption::WindowSize,
            consts::option::TSPEED => TelnetOption::TerminalSpeed,
            consts::option::LFLOW => TelnetOption::RemoteFlowControl,
            consts::option::LINEMODE => TelnetOption::Linemode,
            consts::option::XDISPLOC => TelnetOption::XDisplayLocation,
            consts::option::OLD_ENVIRONMENT => TelnetOption::EnvironmentVariables,
            consts::option::NEW_ENVIRONMENT => TelnetOption::TelnetEnvironmentOption,
            consts::option::MSSP => TelnetOption::MSSP,
            consts::option::GMCP => TelnetOption::GMCP,
            byte => TelnetOption::Unknown(byte),
        }
    }
}

impl std::fmt::Display for TelnetOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelnetOption::Echo => write!(f, "Echo"),
            TelnetOption::SuppressGoAhead => write!(f, "SuppressGoAhead"),
            TelnetOption::Status => write!(f, "Status"),
            TelnetOption::TimingMark => write!(f, "TimingMark"),
            TelnetOption::OutputLineWidth => write!(f, "OutputLineWidth"),
            TelnetOption::OutputPageSize => write!(f, "OutputPageSize"),
            TelnetOption::OutputCarriageReturnDisposition => {
                write!(f, "OutputCarriageReturnDisposition")
            }
            TelnetOption::OutputHorizontalTabstops => write!(f, "OutputHorizontalTabstops"),
            TelnetOption::OutputHorizontalTabDisposition => {
                write!(f, "OutputHorizontalTabDisposition")
            }
            TelnetOption::OutputVerticalTabstops => write!(f, "OutputVerticalTabstops"),
            TelnetOption::OutputVerticalTabDisposition => write!(f, "OutputVerticalTabDisposition"),
            TelnetOption::Logout => write!(f, "Logout"),
            TelnetOption::TerminalType => write!(f, "TerminalType"),
            TelnetOption::EndOfRecord => write!(f, "EndOfRecord"),
            TelnetOption::UserIdentification => write!(f, "UserIdentification"),
            TelnetOption::WindowSize => write!(f, "WindowSize"),
            TelnetOption::TerminalSpeed => write!(f, "TerminalSpeed"),
            TelnetOption::RemoteFlowControl => write!(f, "RemoteFlowControl"),
            TelnetOption::Linemode => write!(f, "Linemode"),
            TelnetOption::XDisplayLocation => write!(f, "XDisplayLocation"),
            TelnetOption::EnvironmentVariables => write!(f, "EnvironmentVariables"),
            TelnetOption::TelnetEnvironmentOption => write!(f, "TelnetEnvironmentOption"),
            TelnetOption::MSSP => write!(f, "MSSP"),
            TelnetOption::GMCP => write!(f, "GMCP"),
            TelnetOption::Unknown(option) => write!(f, "Unknown({option})"),
        }
    }
}

impl From<u8> for TelnetOption {
    fn from(byte: u8) -> Self {
        Self::from_u8(byte)
    }
}

impl From<TelnetOption> for u8 {
    fn from(option: TelnetOption) -> Self {
        option.to_u8()
    }
}

/// What the local side wants for an option, set by the caller.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Preference {
    /// Accept the option when the peer offers or requests it.
    Wanted,
    /// Refuse the option.
    NotWanted,
    /// No opinion. Treated as a refusal.
    #[default]
    NoPreference,
}

/// Result of negotiation so far, mutated only by the decoder.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum NegotiatedState {
    /// Neither side has said anything about the option yet.
    #[default]
    Unknown,
    /// The option is on.
    Enabled,
    /// The option is off.
    Disabled,
}

/// Per-option negotiation bookkeeping.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OptionEntry {
    /// Caller supplied preference
    pub preference: Preference,
    /// Negotiated state
    pub state: NegotiatedState,
    /// Set once the option has been enabled by accepting a `DO` or `WILL`.
    pub enabled_once: bool,
    /// Set once the option has been registered or seen on the wire.
    pub known: bool,
}

/// Outcome of processing one inbound negotiation verb.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Negotiation {
    /// The verb to send back, if the state changed.
    pub reply: Option<TelnetCommand>,
    /// True only the first time the option becomes enabled on this table.
    pub first_enabled: bool,
}

/// The option table of one connection.
///
/// Entries are indexed directly by option code so lookup is constant time over the
/// whole `0..=255` domain. No entry is ever removed.
#[derive(Clone, Debug)]
pub struct TelnetOptions {
    entries: [OptionEntry; 256],
}

impl Default for TelnetOptions {
    fn default() -> Self {
        TelnetOptions {
            entries: [OptionEntry::default(); 256],
        }
    }
}

impl TelnetOptions {
    /// Returns the entry for `option`, which is all defaults if it was never touched.
    pub fn get(&self, option: TelnetOption) -> OptionEntry {
        self.entries[option.to_u8() as usize]
    }

    /// Returns the entry for `option`, marking it as known.
    pub fn entry_mut(&mut self, option: TelnetOption) -> &mut OptionEntry {
        let entry = &mut self.entries[option.to_u8() as usize];
        entry.known = true;
        entry
    }

    /// Record that `option` was seen on the wire without changing its state.
    pub fn touch(&mut self, option: TelnetOption) {
        self.entry_mut(option);
    }

    /// Seeds the preference for an option.
    ///
    /// Negotiated state is left alone, so registering the same preference twice is a
    /// no-op and registering late never rewrites what the wire already decided.
    pub fn register(&mut self, option: TelnetOption, preference: Preference) {
        self.entry_mut(option).preference = preference;
    }

    /// Iterate over every option that was registered or seen on the wire.
    pub fn known(&self) -> impl Iterator<Item = (TelnetOption, OptionEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.known)
            .map(|(code, entry)| (TelnetOption::from_u8(code as u8), *entry))
    }

    /// Apply an inbound `DO`, `DONT`, `WILL` or `WONT`.
    ///
    /// A reply is produced only when the negotiated state actually changes, which
    /// keeps a peer that repeats itself from pulling us into a negotiation loop.
    /// Any other verb leaves the table untouched.
    pub fn receive(&mut self, verb: TelnetCommand, option: TelnetOption) -> Negotiation {
        let (accept, refuse) = match verb {
            TelnetCommand::Do | TelnetCommand::Dont => (TelnetCommand::Will, TelnetCommand::Wont),
            TelnetCommand::Will | TelnetCommand::Wont => (TelnetCommand::Do, TelnetCommand::Dont),
            _ => return Negotiation::default(),
        };
        let entry = self.entry_mut(option);
        let mut outcome = Negotiation::default();
        match verb {
            TelnetCommand::Do | TelnetCommand::Will => match entry.preference {
                Preference::Wanted => {
                    if entry.state != NegotiatedState::Enabled {
                        entry.state = NegotiatedState::Enabled;
                        outcome.reply = Some(accept);
                        outcome.first_enabled = !entry.enabled_once;
                        entry.enabled_once = true;
                    }
                }
                Preference::NotWanted | Preference::NoPreference => {
                    if entry.state != NegotiatedState::Disabled {
                        entry.state = NegotiatedState::Disabled;
                        outcome.reply = Some(refuse);
                    }
                }
            },
            _ => {
                if entry.state != NegotiatedState::Disabled {
                    outcome.reply = Some(refuse);
                }
                entry.state = NegotiatedState::Disabled;
            }
        }
        debug!(%verb, %option, reply = ?outcome.reply, state = ?entry.state, "Negotiation");
        outcome
    }
}

/// Cloneable handle to a connection's option table.
///
/// The decoder and the connection that owns it both hold one; the lock is never
/// held across an await point.
#[derive(Clone, Debug, Default)]
pub struct SharedOptions {
    inner: Arc<Mutex<TelnetOptions>>,
}

impl SharedOptions {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TelnetOptions> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`TelnetOptions::get`]
    pub fn get(&self, option: TelnetOption) -> OptionEntry {
        self.lock().get(option)
    }

    /// See [`TelnetOptions::register`]
    pub fn register(&self, option: TelnetOption, preference: Preference) {
        self.lock().register(option, preference);
    }

    /// See [`TelnetOptions::touch`]
    pub fn touch(&self, option: TelnetOption) {
        self.lock().touch(option);
    }

    /// See [`TelnetOptions::receive`]
    pub fn receive(&self, verb: TelnetCommand, option: TelnetOption) -> Negotiation {
        self.lock().receive(verb, option)
    }

    /// Snapshot of the table.
    pub fn snapshot(&self) -> TelnetOptions {
        self.lock().clone()
    }
}
