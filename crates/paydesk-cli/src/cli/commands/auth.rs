//! Auth command handlers.

use anyhow::{Context, Result, bail};
use paydesk_core::portal::PortalClient;
use paydesk_core::routes::{self, RouteDecision};
use paydesk_core::session::SessionStore;

pub async fn login(portal: &PortalClient, email: &str, password: &str) -> Result<()> {
    // Guest gate: a live session is sent back to the dashboard.
    if routes::guard_guest(portal.store().is_logged_in()) == RouteDecision::ToDashboard {
        println!("Already logged in. Run `paydesk logout` to switch accounts.");
        return Ok(());
    }

    let res = portal.login(email, password).await?;
    if !res.success {
        if res.status == 0 {
            bail!("{}", res.message);
        }
        bail!("Login failed: {}", res.message);
    }

    let session = portal
        .store()
        .current()
        .context("session missing after login")?;
    println!("Logged in as {} ({})", session.user_id, session.role.label());
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if !store.is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }
    store.clear().context("clear session")?;
    println!("Logged out.");
    Ok(())
}

pub fn status(store: &SessionStore) {
    let Some(session) = store.current() else {
        println!("Not logged in.");
        return;
    };

    println!("Logged in as {} ({})", session.user_id, session.role.label());
    println!("API key:    {}", session.api_key);
    println!("API secret: {}", session.masked_secret());
    println!();
    println!("Navigation:");
    for item in routes::visible_menu(session.role) {
        println!("  {:<18} {}", item.title, item.path);
    }
}
