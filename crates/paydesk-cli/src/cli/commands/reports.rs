//! Report command handlers (orders, ledger, virtual accounts, van logs).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use paydesk_core::portal::{self, ListQuery, PortalClient};

/// Paging and date-range filters shared by the report commands.
#[derive(Debug, Clone)]
pub struct ReportFilters {
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl ReportFilters {
    fn into_query(self) -> Result<ListQuery> {
        let from = self.from.as_deref().map(day_start).transpose()?;
        let to = self.to.as_deref().map(day_start).transpose()?;
        Ok(ListQuery::new(self.page, self.page_size)
            .filter_opt("status", self.status)
            .filter_opt("from_date", from)
            .filter_opt("to_date", to))
    }
}

/// Parses `YYYY-MM-DD` into the RFC 3339 instant at the start of that day.
fn day_start(value: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{value}', expected YYYY-MM-DD"))?;
    let instant = date
        .and_hms_opt(0, 0, 0)
        .context("invalid time of day")?
        .and_utc();
    Ok(instant.to_rfc3339())
}

pub async fn orders(portal: &PortalClient, filters: ReportFilters) -> Result<()> {
    super::guard(portal.store(), "transaction")?;
    let query = filters.into_query()?.sorted("creation", "desc");
    let res = super::check(portal.orders(&query).await)?;
    let (items, total) = portal::list_and_total(&res, "orders");
    super::print_list(&items, total, "orders");
    Ok(())
}

pub async fn ledger(
    portal: &PortalClient,
    entry_type: Option<String>,
    filters: ReportFilters,
) -> Result<()> {
    super::guard(portal.store(), "ledger")?;
    let query = filters.into_query()?.filter_opt("type", entry_type);
    let res = super::check(portal.ledger_entries(&query).await)?;
    let (items, total) = portal::list_and_total(&res, "entries");
    super::print_list(&items, total, "entries");
    Ok(())
}

pub async fn accounts(portal: &PortalClient) -> Result<()> {
    super::guard(portal.store(), "virtual_accounts")?;
    let res = super::check(portal.virtual_accounts().await)?;
    let (items, total) = portal::list_and_total(&res, "accounts");
    super::print_list(&items, total, "accounts");
    Ok(())
}

pub async fn van_logs(portal: &PortalClient, filters: ReportFilters) -> Result<()> {
    super::guard(portal.store(), "vanlog")?;
    let query = filters.into_query()?;
    let res = super::check(portal.van_logs(&query).await)?;
    let (items, total) = portal::list_and_total(&res, "logs");
    super::print_list(&items, total, "logs");
    Ok(())
}
