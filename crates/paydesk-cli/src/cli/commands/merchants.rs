//! Merchant administration command handlers.

use anyhow::Result;
use paydesk_core::portal::{self, MerchantUpdate, OnboardMerchant, PortalClient};
use serde_json::{Value, json};

/// Arguments for onboarding a new merchant.
pub struct OnboardArgs {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub pancard: String,
}

pub async fn list(portal: &PortalClient, page: u32, page_size: u32) -> Result<()> {
    super::guard(portal.store(), "merchant")?;
    let res = super::check(portal.merchants(page, page_size).await)?;
    let (items, total) = portal::list_and_total(&res, "merchants");
    super::print_list(&items, total, "merchants");
    Ok(())
}

pub async fn onboard(portal: &PortalClient, args: OnboardArgs) -> Result<()> {
    super::guard(portal.store(), "merchant")?;
    let form = OnboardMerchant {
        company_name: args.company_name,
        email: args.email,
        password: args.password,
        pancard: args.pancard,
    };
    let res = super::check(portal.onboard_merchant(&form).await)?;
    match res.payload().and_then(|p| p.get("merchant_id")) {
        Some(id) => println!("Merchant onboarded with id {id}"),
        None => println!("Merchant onboarded."),
    }
    Ok(())
}

pub async fn update(
    portal: &PortalClient,
    merchant: &str,
    status: &str,
    integration: &str,
    webhook: &str,
) -> Result<()> {
    super::guard(portal.store(), "merchant")?;
    let update = MerchantUpdate {
        merchant: merchant.to_string(),
        status: status.to_string(),
        integration: integration.to_string(),
        webhook: webhook.to_string(),
        pricing: json!([]),
    };
    super::check(portal.update_merchant(&update).await)?;
    println!("Updated merchant {merchant}");
    Ok(())
}

pub async fn bulk(
    portal: &PortalClient,
    merchants: &[String],
    action: &str,
    value: &str,
) -> Result<()> {
    super::guard(portal.store(), "merchant")?;
    super::check(
        portal
            .bulk_update_merchants(merchants, action, &Value::String(value.to_string()))
            .await,
    )?;
    println!("Applied {action} to {} merchants", merchants.len());
    Ok(())
}
