//! Command handlers.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod developer;
pub mod merchants;
pub mod reports;
pub mod services;

use anyhow::{Result, bail};
use paydesk_core::http::ApiResponse;
use paydesk_core::routes::{self, RouteDecision};
use paydesk_core::session::SessionStore;

/// Runs the route guard for `dest_id` before a command executes.
///
/// A redirect decision becomes a command error naming where the user was
/// sent, without touching the backend.
pub(crate) fn guard(store: &SessionStore, dest_id: &str) -> Result<()> {
    let Some(dest) = routes::find(dest_id) else {
        bail!("Unknown destination '{dest_id}'");
    };
    match routes::guard_protected(store.is_logged_in(), store.role(), dest) {
        RouteDecision::Render | RouteDecision::ToDashboard => Ok(()),
        RouteDecision::ToLogin => bail!("Not logged in. Run `paydesk login` first."),
        RouteDecision::ToUnauthorized => {
            bail!("Your role does not have access to {}.", dest.path)
        }
    }
}

/// Converts an envelope failure into a command error.
pub(crate) fn check(res: ApiResponse) -> Result<ApiResponse> {
    if res.success {
        Ok(res)
    } else if res.status == 0 {
        bail!("{}", res.message)
    } else {
        bail!("{} (HTTP {})", res.message, res.status)
    }
}

/// Pretty-prints the backend payload of a response.
pub(crate) fn print_payload(res: &ApiResponse) {
    match res.payload() {
        Some(payload) => match serde_json::to_string_pretty(payload) {
            Ok(text) => println!("{text}"),
            Err(_) => println!("{payload}"),
        },
        None => println!("{}", res.message),
    }
}

/// Prints list rows with a trailing count summary.
pub(crate) fn print_list(items: &[serde_json::Value], total: u64, noun: &str) {
    if items.is_empty() {
        println!("No {noun} found.");
        return;
    }
    for item in items {
        println!("{item}");
    }
    println!("Showing {} of {} {}", items.len(), total, noun);
}
