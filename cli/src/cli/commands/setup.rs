//! Setup command handler: browser login against a Crest cluster.

use std::time::Duration;

use chrono::Utc;

use crate::auth::{CredentialStore, HttpFlowTransport, StoredCredentials, TokenFlow};
use crate::config::{load_config, save_config};
use crate::error::Result;

/// Handle the `crest setup` command.
///
/// Resolves the cluster coordinates (arguments override the config file),
/// runs the browser-login flow, then persists the issued API key to the
/// system keyring and the chosen cluster back to the config file.
pub async fn handle_setup(
    host: Option<String>,
    port: Option<u16>,
    timeout_secs: Option<u64>,
    no_browser: bool,
) -> Result<()> {
    let mut config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let overall_timeout =
        Duration::from_secs(timeout_secs.unwrap_or(config.flow.login_timeout_secs));

    println!("Setting up Crest CLI for {host}:{port}");
    println!();

    let transport = HttpFlowTransport::for_host(&host, port)?;
    let flow = TokenFlow::new(transport);
    let result = flow.start_flow(overall_timeout, !no_browser).await?;

    println!();
    println!("Authentication complete!");

    // The flow keeps no copy of the credential; persistence happens here.
    let creds = StoredCredentials {
        api_key: result.api_key,
        workspace: result.workspace,
        host: host.clone(),
        port,
        acquired_at: Utc::now(),
    };
    let store = CredentialStore::new()?;
    store.save(&creds)?;

    config.server.host = host;
    config.server.port = port;
    save_config(&config)?;

    println!("Credentials stored in the system keyring.");
    if let Some(workspace) = &creds.workspace {
        println!("Workspace: {workspace}");
    }
    println!();
    println!("Setup complete! Try these commands:");
    println!("  crest auth status   - Show who you are logged in as");
    println!("  crest auth logout   - Remove stored credentials");

    Ok(())
}
