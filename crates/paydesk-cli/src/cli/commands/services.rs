//! Service and processor command handlers.

use anyhow::Result;
use paydesk_core::portal::PortalClient;
use serde_json::Value;

pub async fn list(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "service")?;
    let res = super::check(portal.services().await)?;
    let services = res
        .payload()
        .and_then(|p| p.get("services"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if services.is_empty() {
        println!("No services found.");
        return Ok(());
    }
    for service in &services {
        let name = service
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("(unnamed)");
        let active = service
            .get("is_active")
            .and_then(Value::as_i64)
            .unwrap_or(0)
            != 0;
        let state = if active { "active" } else { "inactive" };
        println!("{name:<24} {state}");
    }
    Ok(())
}

pub async fn toggle(portal: &PortalClient, name: &str, active: bool) -> Result<()> {
    super::guard(portal.store(), "service")?;
    super::check(portal.toggle_service(name, active).await)?;
    let state = if active { "enabled" } else { "disabled" };
    println!("Service {name} {state}");
    Ok(())
}

pub async fn processors(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "apimanager")?;
    let res = super::check(portal.processors().await)?;
    let processors = res
        .payload()
        .and_then(|p| p.get("processors"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    super::print_list(&processors, processors.len() as u64, "processors");
    Ok(())
}
