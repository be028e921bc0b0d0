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

//! # GMCP Client Example
//!
//! Connects to a MUD, greets it over GMCP, prints everything it sends and forwards
//! lines typed on stdin.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example gmcp_client -- darkwind.org 3000
//! ```
//!
//! Press Ctrl-C or close stdin to disconnect.

use darkwind_client::{ClientConfig, OptionRegistration, TelnetClient, TelnetOption};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let host = args.get(1).map_or("darkwind.org", String::as_str);
    let port = match args.get(2) {
        Some(port) => port.parse()?,
        None => 3000,
    };

    let client = Arc::new(TelnetClient::new(ClientConfig::new(host, port)));
    client.register_option(OptionRegistration::gmcp());
    client.register_option(OptionRegistration::wanted(TelnetOption::SuppressGoAhead));
    client.connect().await?;
    info!("Connected to {}:{}", host, port);

    let messages = client.messages();
    let printer = tokio::spawn(async move {
        while let Some(message) = messages.recv().await {
            match message {
                Ok(message) => match message.gmcp() {
                    Some(gmcp) => info!(package = gmcp.package(), data = ?gmcp.data(), "GMCP"),
                    None if message.is_plain_text() => {
                        print!("{}", message.as_str());
                        let _ = std::io::stdout().flush();
                    }
                    None => info!(option = message.option_code(), "{}", message.as_str()),
                },
                Err(e) => error!("Connection failed: {}", e),
            }
        }
        info!("Server closed the connection");
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    if let Err(e) = client.write_line(&line).await {
                        error!("Send failed: {}", e);
                        break;
                    }
                }
                None => break,
            },
        }
    }

    client.dispose().await;
    printer.await?;
    Ok(())
}
