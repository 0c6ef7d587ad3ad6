//! Dashboard and profile command handlers.

use anyhow::Result;
use paydesk_core::portal::PortalClient;
use paydesk_core::roles::Role;
use serde_json::Value;

pub async fn run(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "dashboard")?;

    let res = super::check(portal.dashboard_stats().await)?;
    let stats = res.payload().and_then(|p| p.get("stats")).cloned();
    match stats {
        Some(stats) => {
            println!("Dashboard");
            print_counter(&stats, "Total orders", "total_orders", "total_orders_amount");
            print_counter(
                &stats,
                "Processed orders",
                "processed_orders",
                "total_processed_amount",
            );
            print_counter(
                &stats,
                "Pending orders",
                "pending_orders",
                "total_pending_amount",
            );
            print_counter(
                &stats,
                "Cancelled orders",
                "cancelled_orders",
                "total_cancelled_amount",
            );
        }
        None => super::print_payload(&res),
    }

    if portal.role() == Role::User {
        let res = super::check(portal.wallet_balance().await)?;
        let balance = res
            .payload()
            .and_then(|p| p.get("wallet"))
            .and_then(|w| w.get("balance"))
            .cloned();
        if let Some(balance) = balance {
            println!("Wallet balance: {balance}");
        }
    }

    Ok(())
}

pub async fn profile(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "profile")?;
    let res = super::check(portal.profile().await)?;
    super::print_payload(&res);
    Ok(())
}

fn print_counter(stats: &Value, label: &str, count_key: &str, amount_key: &str) {
    let count = stats
        .get(count_key)
        .map_or_else(|| "0".to_string(), Value::to_string);
    let amount = stats
        .get(amount_key)
        .map_or_else(|| "0".to_string(), Value::to_string);
    println!("  {label:<18} {count:>8}  (amount {amount})");
}
