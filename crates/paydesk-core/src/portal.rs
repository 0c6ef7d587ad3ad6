//! Typed portal operations over the RPC-style backend.
//!
//! Each operation resolves its action path from the endpoint map for the
//! current role and returns the normalized envelope. Asking for a feature
//! the role cannot reach produces an envelope failure instead of a request
//! to an undefined URL.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::Config;
use crate::endpoints::{self, Feature, LOGIN};
use crate::http::{ApiClient, ApiResponse};
use crate::roles::Role;
use crate::session::{Session, SessionStore};

/// Paged list request shared by the report operations.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Filter fields, sent as a JSON-encoded string under `filter_data`.
    pub filter: Value,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            filter: json!({}),
            page,
            page_size,
            sort_by: None,
            sort_order: None,
        }
    }

    /// Adds a filter field when `value` is present.
    pub fn filter_opt(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.filter[key] = Value::String(value);
        }
        self
    }

    /// Sets the sort column and direction.
    pub fn sorted(mut self, by: &str, order: &str) -> Self {
        self.sort_by = Some(by.to_string());
        self.sort_order = Some(order.to_string());
        self
    }

    /// Builds the request body. `filter_data` is serialized to a string,
    /// which is how the backend expects it.
    fn to_body(&self) -> Value {
        let mut body = json!({
            "filter_data": self.filter.to_string(),
            "page": self.page,
            "page_size": self.page_size,
        });
        if let Some(sort_by) = &self.sort_by {
            body["sort_by"] = Value::String(sort_by.clone());
        }
        if let Some(sort_order) = &self.sort_order {
            body["sort_order"] = Value::String(sort_order.clone());
        }
        body
    }
}

/// Fields for onboarding a new merchant (admin).
#[derive(Debug, Clone, Serialize)]
pub struct OnboardMerchant {
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub pancard: String,
}

/// Fields for updating an existing merchant (admin).
#[derive(Debug, Clone, Serialize)]
pub struct MerchantUpdate {
    pub merchant: String,
    pub status: String,
    pub integration: String,
    pub webhook: String,
    pub pricing: Value,
}

/// Token grant returned by a successful login.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    user_id: String,
    api_key: String,
    api_secret: String,
    role: Option<String>,
}

/// High-level client for the merchant/admin portal backend.
pub struct PortalClient {
    api: ApiClient,
    store: Arc<SessionStore>,
}

impl PortalClient {
    /// Creates a client from configuration and a session store.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing or the HTTP client
    /// cannot be built.
    pub fn new(config: &Config, store: Arc<SessionStore>) -> Result<Self> {
        let base_url = config.resolve_base_url()?;
        let api = ApiClient::new(base_url, Arc::clone(&store))?;
        Ok(Self { api, store })
    }

    /// Creates a client for an explicit base URL (tests, tooling).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>, store: Arc<SessionStore>) -> Result<Self> {
        let api = ApiClient::new(base_url, Arc::clone(&store))?;
        Ok(Self { api, store })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Role used for endpoint selection; an unreadable session falls back
    /// to the least-privileged role.
    pub fn role(&self) -> Role {
        self.store.role().unwrap_or(Role::User)
    }

    async fn get_feature(&self, feature: Feature, params: &[(&str, String)]) -> ApiResponse {
        match endpoints::endpoint(self.role(), feature) {
            Some(path) => self.api.get(path, params).await,
            None => ApiResponse::unavailable(feature.label()),
        }
    }

    async fn post_feature(&self, feature: Feature, body: &Value) -> ApiResponse {
        match endpoints::endpoint(self.role(), feature) {
            Some(path) => self.api.post(path, body).await,
            None => ApiResponse::unavailable(feature.label()),
        }
    }

    /// Exchanges credentials for a token grant and saves the session.
    ///
    /// Backend outcomes (bad credentials, transport failures) come back in
    /// the envelope; only a local persistence failure is an `Err`.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse> {
        let res = self
            .api
            .post(LOGIN, &json!({"usr": email, "pwd": password}))
            .await;
        if !res.success {
            return Ok(res);
        }

        let Some(grant) = res
            .payload()
            .cloned()
            .and_then(|p| serde_json::from_value::<TokenGrant>(p).ok())
        else {
            return Ok(ApiResponse::send_failure(
                "Login response did not contain a token grant",
            ));
        };

        let session = Session {
            user_id: grant.user_id,
            api_key: grant.api_key,
            api_secret: grant.api_secret,
            role: Role::resolve(grant.role.as_deref()),
        };
        self.store.save(&session).context("persist session")?;
        Ok(res)
    }

    /// Clears the persisted session.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn logout(&self) -> Result<()> {
        self.store.clear().context("clear session")
    }

    // Dashboard

    pub async fn dashboard_stats(&self) -> ApiResponse {
        self.get_feature(Feature::DashboardStats, &[]).await
    }

    pub async fn wallet_balance(&self) -> ApiResponse {
        self.get_feature(Feature::WalletBalance, &[]).await
    }

    pub async fn profile(&self) -> ApiResponse {
        self.get_feature(Feature::Profile, &[]).await
    }

    // Reports

    pub async fn orders(&self, query: &ListQuery) -> ApiResponse {
        self.post_feature(Feature::Orders, &query.to_body()).await
    }

    pub async fn ledger_entries(&self, query: &ListQuery) -> ApiResponse {
        self.post_feature(Feature::LedgerEntries, &query.to_body())
            .await
    }

    pub async fn virtual_accounts(&self) -> ApiResponse {
        self.get_feature(Feature::VirtualAccounts, &[]).await
    }

    pub async fn van_logs(&self, query: &ListQuery) -> ApiResponse {
        self.post_feature(Feature::VanLogs, &query.to_body()).await
    }

    // Developer settings

    pub async fn api_keys(&self) -> ApiResponse {
        self.get_feature(Feature::ApiKeys, &[]).await
    }

    pub async fn regenerate_api_keys(&self) -> ApiResponse {
        self.post_feature(Feature::RegenerateApiKeys, &json!({}))
            .await
    }

    pub async fn whitelist_ips(&self) -> ApiResponse {
        self.get_feature(Feature::WhitelistIps, &[]).await
    }

    pub async fn add_whitelist_ip(&self, ip: &str) -> ApiResponse {
        self.post_feature(Feature::AddWhitelistIp, &json!({"ip_address": ip}))
            .await
    }

    pub async fn delete_whitelist_ip(&self, ip: &str) -> ApiResponse {
        self.post_feature(Feature::DeleteWhitelistIp, &json!({"ip_name": ip}))
            .await
    }

    pub async fn update_webhook(&self, url: &str) -> ApiResponse {
        self.post_feature(Feature::UpdateWebhook, &json!({"webhook_url": url}))
            .await
    }

    // Admin

    pub async fn merchants(&self, page: u32, page_size: u32) -> ApiResponse {
        self.post_feature(
            Feature::Merchants,
            &json!({"page": page, "page_size": page_size}),
        )
        .await
    }

    pub async fn onboard_merchant(&self, form: &OnboardMerchant) -> ApiResponse {
        let body = serde_json::to_value(form).unwrap_or_else(|_| json!({}));
        self.post_feature(Feature::OnboardMerchant, &body).await
    }

    pub async fn update_merchant(&self, update: &MerchantUpdate) -> ApiResponse {
        let body = serde_json::to_value(update).unwrap_or_else(|_| json!({}));
        self.post_feature(Feature::UpdateMerchant, &body).await
    }

    pub async fn bulk_update_merchants(
        &self,
        merchants: &[String],
        action: &str,
        value: &Value,
    ) -> ApiResponse {
        self.post_feature(
            Feature::BulkUpdateMerchants,
            &json!({"merchants": merchants, "action": action, "value": value}),
        )
        .await
    }

    pub async fn processors(&self) -> ApiResponse {
        self.get_feature(Feature::Processors, &[]).await
    }

    pub async fn services(&self) -> ApiResponse {
        self.post_feature(Feature::Services, &json!({})).await
    }

    pub async fn toggle_service(&self, name: &str, active: bool) -> ApiResponse {
        self.post_feature(
            Feature::ToggleService,
            &json!({"service_name": name, "is_active": active}),
        )
        .await
    }
}

/// Extracts a paged list and its total from a report response.
///
/// Falls back to an empty list and the list length when the payload is
/// missing the expected fields.
pub fn list_and_total(res: &ApiResponse, list_field: &str) -> (Vec<Value>, u64) {
    let payload = res.payload();
    let items = payload
        .and_then(|p| p.get(list_field))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let total = payload
        .and_then(|p| p.get("total"))
        .and_then(Value::as_u64)
        .unwrap_or(items.len() as u64);
    (items, total)
}
