//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use paydesk_core::config::Config;
use paydesk_core::portal::PortalClient;
use paydesk_core::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "paydesk")]
#[command(version)]
#[command(about = "Merchant/admin portal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in to the portal
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the current session and visible navigation
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show dashboard stats (and wallet balance for merchants)
    Dashboard,
    /// Show the account profile
    Profile,
    /// List orders
    Orders {
        #[command(flatten)]
        filters: ReportArgs,
    },
    /// List ledger entries (merchants only)
    Ledger {
        /// Filter by entry type
        #[arg(long, value_name = "TYPE")]
        entry_type: Option<String>,
        #[command(flatten)]
        filters: ReportArgs,
    },
    /// List virtual accounts
    Accounts,
    /// List virtual account logs
    Vanlogs {
        #[command(flatten)]
        filters: ReportArgs,
    },
    /// Manage merchants (admins only)
    Merchants {
        #[command(subcommand)]
        command: MerchantCommands,
    },
    /// Manage API keys (merchants only)
    Keys {
        #[command(subcommand)]
        command: KeyCommands,
    },
    /// Manage the IP whitelist (merchants only)
    Ips {
        #[command(subcommand)]
        command: IpCommands,
    },
    /// Manage the webhook URL (merchants only)
    Webhook {
        #[command(subcommand)]
        command: WebhookCommands,
    },
    /// Manage payment services (admins only)
    Services {
        #[command(subcommand)]
        command: ServiceCommands,
    },
    /// List payment processors (admins only)
    Processors,
}

/// Common paging and date-range arguments for the report commands.
#[derive(clap::Args, Debug, Clone)]
struct ReportArgs {
    /// Filter by status
    #[arg(long)]
    status: Option<String>,
    /// Include records from this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    from: Option<String>,
    /// Include records up to this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    to: Option<String>,
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Rows per page
    #[arg(long, default_value_t = 25)]
    page_size: u32,
}

impl ReportArgs {
    fn into_filters(self) -> commands::reports::ReportFilters {
        commands::reports::ReportFilters {
            status: self.status,
            from: self.from,
            to: self.to,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
enum MerchantCommands {
    /// List merchants
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rows per page
        #[arg(long, default_value_t = 25)]
        page_size: u32,
    },
    /// Onboard a new merchant
    Onboard {
        #[arg(long)]
        company_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        pancard: String,
    },
    /// Update a merchant's status, integration, or webhook
    Update {
        /// Merchant identifier
        #[arg(value_name = "MERCHANT")]
        merchant: String,
        #[arg(long)]
        status: String,
        #[arg(long, default_value = "")]
        integration: String,
        #[arg(long, default_value = "")]
        webhook: String,
    },
    /// Apply an action to several merchants at once
    Bulk {
        /// Action to apply (e.g. status)
        #[arg(long)]
        action: String,
        /// Value for the action
        #[arg(long)]
        value: String,
        /// Merchant identifiers
        #[arg(value_name = "MERCHANT", required = true)]
        merchants: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
enum KeyCommands {
    /// Show the current API keys
    Show,
    /// Generate a new API key pair
    Rotate,
}

#[derive(clap::Subcommand)]
enum IpCommands {
    /// List whitelisted IP addresses
    List,
    /// Whitelist an IP address
    Add {
        #[arg(value_name = "IP")]
        ip: String,
    },
    /// Remove an IP address from the whitelist
    Remove {
        #[arg(value_name = "IP")]
        ip: String,
    },
}

#[derive(clap::Subcommand)]
enum WebhookCommands {
    /// Set the webhook URL
    Set {
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[derive(clap::Subcommand)]
enum ServiceCommands {
    /// List services and their status
    List,
    /// Enable or disable a service
    Toggle {
        /// Service name
        #[arg(value_name = "SERVICE")]
        name: String,
        /// New status
        #[arg(long)]
        active: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Opens the session store rooted at the paydesk home directory.
fn open_store() -> Arc<SessionStore> {
    Arc::new(SessionStore::open_default())
}

/// Builds the portal client for commands that talk to the backend.
fn open_portal() -> Result<PortalClient> {
    let config = Config::load().context("load config")?;
    PortalClient::new(&config, open_store())
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&open_portal()?, &email, &password).await
        }
        Commands::Logout => commands::auth::logout(&open_store()),
        Commands::Status => {
            commands::auth::status(&open_store());
            Ok(())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Commands::Dashboard => commands::dashboard::run(&open_portal()?).await,
        Commands::Profile => commands::dashboard::profile(&open_portal()?).await,
        Commands::Orders { filters } => {
            commands::reports::orders(&open_portal()?, filters.into_filters()).await
        }
        Commands::Ledger {
            entry_type,
            filters,
        } => {
            commands::reports::ledger(&open_portal()?, entry_type, filters.into_filters()).await
        }
        Commands::Accounts => commands::reports::accounts(&open_portal()?).await,
        Commands::Vanlogs { filters } => {
            commands::reports::van_logs(&open_portal()?, filters.into_filters()).await
        }
        Commands::Merchants { command } => match command {
            MerchantCommands::List { page, page_size } => {
                commands::merchants::list(&open_portal()?, page, page_size).await
            }
            MerchantCommands::Onboard {
                company_name,
                email,
                password,
                pancard,
            } => {
                commands::merchants::onboard(
                    &open_portal()?,
                    commands::merchants::OnboardArgs {
                        company_name,
                        email,
                        password,
                        pancard,
                    },
                )
                .await
            }
            MerchantCommands::Update {
                merchant,
                status,
                integration,
                webhook,
            } => {
                commands::merchants::update(
                    &open_portal()?,
                    &merchant,
                    &status,
                    &integration,
                    &webhook,
                )
                .await
            }
            MerchantCommands::Bulk {
                action,
                value,
                merchants,
            } => commands::merchants::bulk(&open_portal()?, &merchants, &action, &value).await,
        },
        Commands::Keys { command } => match command {
            KeyCommands::Show => commands::developer::show_keys(&open_portal()?).await,
            KeyCommands::Rotate => commands::developer::rotate_keys(&open_portal()?).await,
        },
        Commands::Ips { command } => match command {
            IpCommands::List => commands::developer::list_ips(&open_portal()?).await,
            IpCommands::Add { ip } => commands::developer::add_ip(&open_portal()?, &ip).await,
            IpCommands::Remove { ip } => {
                commands::developer::remove_ip(&open_portal()?, &ip).await
            }
        },
        Commands::Webhook { command } => match command {
            WebhookCommands::Set { url } => {
                commands::developer::set_webhook(&open_portal()?, &url).await
            }
        },
        Commands::Services { command } => match command {
            ServiceCommands::List => commands::services::list(&open_portal()?).await,
            ServiceCommands::Toggle { name, active } => {
                commands::services::toggle(&open_portal()?, &name, active).await
            }
        },
        Commands::Processors => commands::services::processors(&open_portal()?).await,
    }
}
