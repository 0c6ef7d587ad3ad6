//! Developer settings command handlers (API keys, IP whitelist, webhook).

use anyhow::Result;
use paydesk_core::portal::PortalClient;
use serde_json::Value;

pub async fn show_keys(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "setting")?;
    let res = super::check(portal.api_keys().await)?;
    super::print_payload(&res);
    Ok(())
}

pub async fn rotate_keys(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "setting")?;
    let res = super::check(portal.regenerate_api_keys().await)?;

    let payload = res.payload();
    let api_key = payload.and_then(|p| p.get("api_key")).and_then(Value::as_str);
    let api_secret = payload
        .and_then(|p| p.get("api_secret"))
        .and_then(Value::as_str);
    match (api_key, api_secret) {
        (Some(key), Some(secret)) => {
            println!("New API key pair generated. The secret is shown only once.");
            println!("API key:    {key}");
            println!("API secret: {secret}");
        }
        _ => super::print_payload(&res),
    }
    Ok(())
}

pub async fn list_ips(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "setting")?;
    let res = super::check(portal.whitelist_ips().await)?;
    let ips = res
        .payload()
        .and_then(|p| p.get("ips"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if ips.is_empty() {
        println!("No whitelisted IP addresses.");
    } else {
        for ip in &ips {
            match ip.get("ip").and_then(Value::as_str) {
                Some(addr) => println!("{addr}"),
                None => println!("{ip}"),
            }
        }
    }
    Ok(())
}

pub async fn add_ip(portal: &PortalClient, ip: &str) -> Result<()> {
    super::guard(portal.store(), "setting")?;
    let res = super::check(portal.add_whitelist_ip(ip).await)?;
    println!("{}", confirmation(&res, "IP address whitelisted."));
    Ok(())
}

pub async fn remove_ip(portal: &PortalClient, ip: &str) -> Result<()> {
    super::guard(portal.store(), "setting")?;
    let res = super::check(portal.delete_whitelist_ip(ip).await)?;
    println!("{}", confirmation(&res, "IP address removed."));
    Ok(())
}

pub async fn set_webhook(portal: &PortalClient, url: &str) -> Result<()> {
    super::guard(portal.store(), "setting")?;
    let res = super::check(portal.update_webhook(url).await)?;
    println!("{}", confirmation(&res, "Webhook URL updated."));
    Ok(())
}

/// Prefers the backend's nested confirmation message when it sends one.
fn confirmation(res: &paydesk_core::http::ApiResponse, fallback: &str) -> String {
    res.payload()
        .and_then(|p| p.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}
