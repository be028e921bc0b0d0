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

//! Option enablement hooks

use crate::{Result, TelnetWriter};
use async_trait::async_trait;
use darkwind_telnetcodec::gmcp::GmcpMessage;
use darkwind_telnetcodec::{Preference, TelnetOption};
use serde_json::json;
use std::sync::Arc;

/// Hook run the first time an option is enabled on a connection
///
/// The hook runs on the read task after the accepting reply has been written, so it
/// may write to the peer straight away. No further input is processed until it
/// returns. An error is logged and does not stop the connection.
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use darkwind_client::{OptionHandler, Result, TelnetOption, TelnetWriter};
///
/// struct RequestVitals;
///
/// #[async_trait]
/// impl OptionHandler for RequestVitals {
///     async fn on_enabled(&self, _option: TelnetOption, writer: &TelnetWriter) -> Result<()> {
///         writer.send_gmcp("Char.Vitals").await
///     }
/// }
/// ```
#[async_trait]
pub trait OptionHandler: Send + Sync + 'static {
    /// Called once per connection when `option` becomes enabled.
    async fn on_enabled(&self, option: TelnetOption, writer: &TelnetWriter) -> Result<()>;
}

/// The GMCP greeting: `Core.Hello`, `Core.Supports.Set`, then `Core.Ping`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GmcpHandshake {
    /// Client name reported in `Core.Hello`
    pub client: String,
    /// Client version reported in `Core.Hello`
    pub version: String,
    /// Packages listed in `Core.Supports.Set`, such as `"Char 1"`
    pub supports: Vec<String>,
}

impl GmcpHandshake {
    /// A handshake announcing `client` at `version` with no supported packages.
    pub fn new(client: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            version: version.into(),
            supports: Vec::new(),
        }
    }

    /// The handshake sent by the DarkWind client.
    pub fn darkwind() -> Self {
        Self::new("DarkWind", "1.0.0")
            .with_support("Char 1")
            .with_support("Char.Skills 1")
            .with_support("Char.Items 1")
    }

    /// Add a package to `Core.Supports.Set`.
    #[must_use]
    pub fn with_support(mut self, package: impl Into<String>) -> Self {
        self.supports.push(package.into());
        self
    }

    /// `Core.Hello {"Client":"..","Version":".."}`
    pub fn hello(&self) -> GmcpMessage {
        let data = json!({ "Client": self.client, "Version": self.version });
        GmcpMessage::new("Core.Hello", Some(data.to_string()))
    }

    /// `Core.Supports.Set [ "..", ".." ]`
    pub fn supports_set(&self) -> GmcpMessage {
        let packages: Vec<String> = self.supports.iter().map(|p| json!(p).to_string()).collect();
        GmcpMessage::new("Core.Supports.Set", Some(format!("[ {} ]", packages.join(", "))))
    }
}

impl Default for GmcpHandshake {
    fn default() -> Self {
        Self::darkwind()
    }
}

#[async_trait]
impl OptionHandler for GmcpHandshake {
    async fn on_enabled(&self, _option: TelnetOption, writer: &TelnetWriter) -> Result<()> {
        writer.send_gmcp(&self.hello().to_string()).await?;
        writer.send_gmcp(&self.supports_set().to_string()).await?;
        writer
            .send_gmcp(&GmcpMessage::command("Core.Ping").to_string())
            .await
    }
}

/// How the connection should answer negotiation of one option, and what to run
/// once it is on.
#[derive(Clone)]
pub struct OptionRegistration {
    /// The option
    pub option: TelnetOption,
    /// Whether to accept it
    pub preference: Preference,
    /// Hook run on first enablement
    pub handler: Option<Arc<dyn OptionHandler>>,
}

impl OptionRegistration {
    /// Accept `option` when the peer offers or requests it.
    pub fn wanted(option: TelnetOption) -> Self {
        Self {
            option,
            preference: Preference::Wanted,
            handler: None,
        }
    }

    /// Refuse `option`.
    pub fn not_wanted(option: TelnetOption) -> Self {
        Self {
            option,
            preference: Preference::NotWanted,
            handler: None,
        }
    }

    /// Accept GMCP and greet the server with [`GmcpHandshake::darkwind`].
    pub fn gmcp() -> Self {
        Self::wanted(TelnetOption::GMCP).with_handler(GmcpHandshake::darkwind())
    }

    /// Attach an enablement hook.
    #[must_use]
    pub fn with_handler<H: OptionHandler>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Attach a hook that is shared with other registrations or inspected elsewhere.
    #[must_use]
    pub fn with_shared_handler(mut self, handler: Arc<dyn OptionHandler>) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl std::fmt::Debug for OptionRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionRegistration")
            .field("option", &self.option)
            .field("preference", &self.preference)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}
