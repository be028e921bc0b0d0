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

//! Telnet command and option byte values ([RFC854](https://tools.ietf.org/html/rfc854)).

/// End of Record
pub const EOR: u8 = 239;
/// End of subnegotiation parameters
pub const SE: u8 = 240;
/// No operation
pub const NOP: u8 = 241;
/// Data Mark, the data stream portion of a Synch
pub const DM: u8 = 242;
/// NVT character BRK
pub const BRK: u8 = 243;
/// Interrupt Process
pub const IP: u8 = 244;
/// Abort Output
pub const AO: u8 = 245;
/// Are You There
pub const AYT: u8 = 246;
/// Erase Character
pub const EC: u8 = 247;
/// Erase Line
pub const EL: u8 = 248;
/// Go Ahead
pub const GA: u8 = 249;
/// Begin subnegotiation of the indicated option
pub const SB: u8 = 250;
/// Sender wants to begin performing the indicated option
pub const WILL: u8 = 251;
/// Sender refuses to perform the indicated option
pub const WONT: u8 = 252;
/// Sender requests the receiver perform the indicated option
pub const DO: u8 = 253;
/// Sender demands the receiver stop performing the indicated option
pub const DONT: u8 = 254;
/// Interpret As Command
pub const IAC: u8 = 255;

/// Carriage Return
pub const CR: u8 = b'\r';
/// Line Feed
pub const LF: u8 = b'\n';

/// Option codes from the [IANA registry](https://www.iana.org/assignments/telnet-options/telnet-options.xhtml)
/// plus the MUD extensions this engine knows by name.
pub mod option {
    /// Echo [RFC857](https://tools.ietf.org/html/rfc857)
    pub const ECHO: u8 = 1;
    /// Suppress Go Ahead [RFC858](https://tools.ietf.org/html/rfc858)
    pub const SGA: u8 = 3;
    /// Status [RFC859](https://tools.ietf.org/html/rfc859)
    pub const STATUS: u8 = 5;
    /// Timing Mark [RFC860](https://tools.ietf.org/html/rfc860)
    pub const TM: u8 = 6;
    /// Output Line Width
    pub const NAOL: u8 = 8;
    /// Output Page Size
    pub const NAOP: u8 = 9;
    /// Output Carriage-Return Disposition [RFC652](https://tools.ietf.org/html/rfc652)
    pub const NAOCRD: u8 = 10;
    /// Output Horizontal Tab Stops [RFC653](https://tools.ietf.org/html/rfc653)
    pub const NAOHTS: u8 = 11;
    /// Output Horizontal Tab Disposition [RFC654](https://tools.ietf.org/html/rfc654)
    pub const NAOHTD: u8 = 12;
    /// Output Vertical Tab Stops [RFC656](https://tools.ietf.org/html/rfc656)
    pub const NAOVTS: u8 = 14;
    /// Output Vertical Tab Disposition [RFC657](https://tools.ietf.org/html/rfc657)
    pub const NAOVTD: u8 = 15;
    /// Logout [RFC727](https://tools.ietf.org/html/rfc727)
    pub const LOGOUT: u8 = 18;
    /// Terminal Type [RFC1091](https://tools.ietf.org/html/rfc1091)
    pub const TTYPE: u8 = 24;
    /// End of Record [RFC885](https://tools.ietf.org/html/rfc885)
    pub const EOR: u8 = 25;
    /// TACACS User Identification [RFC927](https://tools.ietf.org/html/rfc927)
    pub const TUID: u8 = 26;
    /// Negotiate About Window Size [RFC1073](https://tools.ietf.org/html/rfc1073)
    pub const NAWS: u8 = 31;
    /// Terminal Speed [RFC1079](https://tools.ietf.org/html/rfc1079)
    pub const TSPEED: u8 = 32;
    /// Remote Flow Control [RFC1372](https://tools.ietf.org/html/rfc1372)
    pub const LFLOW: u8 = 33;
    /// Linemode [RFC1184](https://tools.ietf.org/html/rfc1184)
    pub const LINEMODE: u8 = 34;
    /// X Display Location [RFC1096](https://tools.ietf.org/html/rfc1096)
    pub const XDISPLOC: u8 = 35;
    /// Environment Option [RFC1408](https://tools.ietf.org/html/rfc1408)
    pub const OLD_ENVIRONMENT: u8 = 36;
    /// New Environment Option [RFC1572](https://tools.ietf.org/html/rfc1572)
    pub const NEW_ENVIRONMENT: u8 = 39;
    /// Mud Server Status Protocol [MSSP](https://tintin.sourceforge.io/protocols/mssp/)
    pub const MSSP: u8 = 70;
    /// Generic Mud Communication Protocol [GMCP](https://www.gammon.com.au/gmcp)
    pub const GMCP: u8 = 201;
}
