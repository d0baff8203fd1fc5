//! Authentication command handlers.
//!
//! These operate purely on locally stored credentials; no network traffic.

use crate::auth::CredentialStore;
use crate::error::Result;

/// Handle the `crest auth status` command.
pub fn handle_status() -> Result<()> {
    let store = CredentialStore::new()?;

    match store.load()? {
        Some(creds) => {
            println!("Logged in");
            println!();
            println!("  Cluster:    {}:{}", creds.host, creds.port);
            if let Some(workspace) = &creds.workspace {
                println!("  Workspace:  {workspace}");
            }
            println!(
                "  Since:      {}",
                creds.acquired_at.format("%Y-%m-%d %H:%M UTC")
            );
        },
        None => {
            println!("Not logged in");
            println!();
            println!("Run 'crest setup' to authenticate.");
        },
    }

    Ok(())
}

/// Handle the `crest auth logout` command.
pub fn handle_logout() -> Result<()> {
    let store = CredentialStore::new()?;

    if store.has_credentials() {
        store.delete()?;
        println!("Credentials removed.");
    } else {
        println!("Not currently logged in.");
    }

    Ok(())
}
