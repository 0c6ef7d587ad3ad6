//! Action-name endpoint map for the RPC-style backend.
//!
//! Every backend operation is a dotted action name under `/method/`. The
//! lookup is an exhaustive `(Role, Feature)` match, so a missing mapping is
//! a compile-time hole rather than an undefined URL at runtime; pairs the
//! backend genuinely does not offer return `None`.

use crate::roles::Role;

/// Login action, the only role-independent endpoint.
pub const LOGIN: &str = "/method/generate_token";

/// Backend operations the portal performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    DashboardStats,
    WalletBalance,
    Profile,
    ApiKeys,
    RegenerateApiKeys,
    WhitelistIps,
    AddWhitelistIp,
    DeleteWhitelistIp,
    UpdateWebhook,
    Orders,
    VirtualAccounts,
    LedgerEntries,
    VanLogs,
    Merchants,
    OnboardMerchant,
    UpdateMerchant,
    BulkUpdateMerchants,
    Processors,
    Services,
    ToggleService,
}

impl Feature {
    /// Returns all features.
    pub fn all() -> &'static [Feature] {
        &[
            Feature::DashboardStats,
            Feature::WalletBalance,
            Feature::Profile,
            Feature::ApiKeys,
            Feature::RegenerateApiKeys,
            Feature::WhitelistIps,
            Feature::AddWhitelistIp,
            Feature::DeleteWhitelistIp,
            Feature::UpdateWebhook,
            Feature::Orders,
            Feature::VirtualAccounts,
            Feature::LedgerEntries,
            Feature::VanLogs,
            Feature::Merchants,
            Feature::OnboardMerchant,
            Feature::UpdateMerchant,
            Feature::BulkUpdateMerchants,
            Feature::Processors,
            Feature::Services,
            Feature::ToggleService,
        ]
    }

    /// Returns the human-readable label for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Feature::DashboardStats => "dashboard stats",
            Feature::WalletBalance => "wallet balance",
            Feature::Profile => "profile",
            Feature::ApiKeys => "API keys",
            Feature::RegenerateApiKeys => "API key regeneration",
            Feature::WhitelistIps => "IP whitelist",
            Feature::AddWhitelistIp => "IP whitelisting",
            Feature::DeleteWhitelistIp => "IP whitelist removal",
            Feature::UpdateWebhook => "webhook update",
            Feature::Orders => "orders",
            Feature::VirtualAccounts => "virtual accounts",
            Feature::LedgerEntries => "ledger entries",
            Feature::VanLogs => "virtual account logs",
            Feature::Merchants => "merchants",
            Feature::OnboardMerchant => "merchant onboarding",
            Feature::UpdateMerchant => "merchant update",
            Feature::BulkUpdateMerchants => "bulk merchant update",
            Feature::Processors => "processors",
            Feature::Services => "services",
            Feature::ToggleService => "service toggling",
        }
    }
}

/// Returns the request path for `feature` as seen by `role`, or `None` when
/// the backend has no such action for that role.
pub fn endpoint(role: Role, feature: Feature) -> Option<&'static str> {
    match feature {
        Feature::DashboardStats => Some(match role {
            Role::Admin => "/method/portal.admin_api.get_dashboard_stats",
            Role::User => "/method/portal.merchant_api.get_dashboard_stats",
        }),
        Feature::Profile => Some(match role {
            Role::Admin => "/method/portal.admin_api.get_admin_profile",
            Role::User => "/method/portal.merchant_api.get_merchant_profile",
        }),
        Feature::Orders => Some(match role {
            Role::Admin => "/method/portal.admin_api.get_orders",
            Role::User => "/method/portal.merchant_api.get_orders",
        }),
        Feature::VirtualAccounts => Some(match role {
            Role::Admin => "/method/portal.admin_api.get_virtual_accounts",
            Role::User => "/method/portal.merchant_api.get_virtual_accounts",
        }),
        Feature::VanLogs => Some(match role {
            Role::Admin => "/method/portal.admin_api.get_van_logs",
            Role::User => "/method/portal.merchant_api.get_van_logs",
        }),
        Feature::WalletBalance => match role {
            Role::User => Some("/method/portal.merchant_api.get_wallet_balance"),
            Role::Admin => None,
        },
        Feature::ApiKeys => match role {
            Role::User => Some("/method/portal.merchant_api.get_api_keys"),
            Role::Admin => None,
        },
        Feature::RegenerateApiKeys => match role {
            Role::User => Some("/method/portal.merchant_api.generate_api_keys"),
            Role::Admin => None,
        },
        Feature::WhitelistIps => match role {
            Role::User => Some("/method/portal.merchant_api.get_whitelist_ips"),
            Role::Admin => None,
        },
        Feature::AddWhitelistIp => match role {
            Role::User => Some("/method/portal.merchant_api.add_whitelist_ip"),
            Role::Admin => None,
        },
        Feature::DeleteWhitelistIp => match role {
            Role::User => Some("/method/portal.merchant_api.delete_whitelist_ip"),
            Role::Admin => None,
        },
        Feature::UpdateWebhook => match role {
            Role::User => Some("/method/portal.merchant_api.update_webhook_url"),
            Role::Admin => None,
        },
        Feature::LedgerEntries => match role {
            Role::User => Some("/method/portal.merchant_api.get_ledger_entries"),
            Role::Admin => None,
        },
        Feature::Merchants => match role {
            Role::Admin => Some("/method/portal.admin_api.get_merchants"),
            Role::User => None,
        },
        Feature::OnboardMerchant => match role {
            Role::Admin => Some("/method/portal.admin_api.onboard_merchant"),
            Role::User => None,
        },
        Feature::UpdateMerchant => match role {
            Role::Admin => Some("/method/portal.admin_api.update_merchant"),
            Role::User => None,
        },
        Feature::BulkUpdateMerchants => match role {
            Role::Admin => Some("/method/portal.admin_api.bulk_update_merchants"),
            Role::User => None,
        },
        Feature::Processors => match role {
            Role::Admin => Some("/method/portal.admin_api.get_processors"),
            Role::User => None,
        },
        Feature::Services => match role {
            Role::Admin => Some("/method/portal.admin_api.get_services"),
            Role::User => None,
        },
        Feature::ToggleService => match role {
            Role::Admin => Some("/method/portal.admin_api.toggle_service_status"),
            Role::User => None,
        },
    }
}
