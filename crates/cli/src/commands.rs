//! CLI commands

use crate::context::AppContext;
use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use evcharge_core::Role;
use evcharge_http::services::{
    BookingService, DashboardService, EvOwnerService, StationService, UserService,
};
use evcharge_http::types::{
    BookingFilter, BookingStatus, ChargerType, CreateBookingRequest, StationRequest,
};
use evcharge_http::{CheckTrigger, SessionCheck, SessionController};
use serde::Serialize;
use serde_json::json;
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the session in the state directory
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "EVCHARGE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and delete stored credentials
    Logout,

    /// Show the signed-in profile as the backend sees it
    Whoami,

    /// Inspect or renew the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Charging stations
    Stations {
        #[command(subcommand)]
        command: StationCommands,
    },

    /// EV owner accounts
    Owners {
        #[command(subcommand)]
        command: OwnerCommands,
    },

    /// Back office accounts
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Reservations
    Bookings {
        #[command(subcommand)]
        command: BookingCommands,
    },

    /// Headline counters
    Dashboard,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Print the stored session without contacting the backend
    Status,

    /// Renew the access token now
    Refresh,

    /// Keep the session alive until interrupted or it can no longer be renewed
    Keepalive,
}

#[derive(Subcommand)]
pub enum StationCommands {
    List {
        /// Only active stations
        #[arg(long)]
        active: bool,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long, value_enum)]
        charger: ChargerArg,
        #[arg(long)]
        slots: u32,
        #[arg(long)]
        latitude: Option<f64>,
        #[arg(long)]
        longitude: Option<f64>,
        #[arg(long)]
        operator: Option<String>,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
    /// Bookable windows on a day (defaults to today)
    Availability {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum OwnerCommands {
    List,
    Show { nic: String },
    Activate { nic: String },
    Deactivate { nic: String },
}

#[derive(Subcommand)]
pub enum UserCommands {
    List,
    Activate { id: String },
    Deactivate { id: String },
}

#[derive(Subcommand)]
pub enum BookingCommands {
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long)]
        station: Option<String>,
    },
    /// Bookings of the signed-in EV owner
    Mine,
    Create {
        #[arg(long)]
        station: String,
        /// RFC 3339 start time, e.g. 2030-02-01T08:00:00Z
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long, default_value_t = 60)]
        duration: u32,
        /// Owner NIC; defaults to the signed-in owner
        #[arg(long)]
        owner: Option<String>,
    },
    Approve {
        id: String,
    },
    Cancel {
        id: String,
    },
    Complete {
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ChargerArg {
    Ac,
    Dc,
}

impl From<ChargerArg> for ChargerType {
    fn from(arg: ChargerArg) -> Self {
        match arg {
            ChargerArg::Ac => Self::Ac,
            ChargerArg::Dc => Self::Dc,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StatusArg {
    Pending,
    Approved,
    Cancelled,
    Completed,
}

impl From<StatusArg> for BookingStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Approved => Self::Approved,
            StatusArg::Cancelled => Self::Cancelled,
            StatusArg::Completed => Self::Completed,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl Commands {
    /// Commands that run until interrupted are exempt from the global timeout
    pub fn is_long_running(&self) -> bool {
        matches!(
            self,
            Self::Session {
                command: SessionCommands::Keepalive
            }
        )
    }

    pub async fn execute(self, ctx: AppContext) -> Result<()> {
        match self {
            Self::Login { username, password } => {
                let user = ctx.client.login(username, password).await?;
                print_json(&user)
            }
            Self::Logout => {
                ctx.client.logout().await?;
                print_json(&json!({ "signedOut": true }))
            }
            Self::Whoami => print_json(&ctx.client.me().await?),
            Self::Session { command } => command.execute(ctx).await,
            Self::Stations { command } => command.execute(ctx).await,
            Self::Owners { command } => command.execute(ctx).await,
            Self::Users { command } => command.execute(ctx).await,
            Self::Bookings { command } => command.execute(ctx).await,
            Self::Dashboard => print_json(&DashboardService::new(ctx.client).stats().await?),
        }
    }
}

impl SessionCommands {
    pub async fn execute(self, ctx: AppContext) -> Result<()> {
        let tokens = ctx.client.tokens();
        match self {
            Self::Status => {
                let record = tokens.restore();
                print_json(&json!({
                    "authenticated": record.is_some(),
                    "user": record.as_ref().map(|record| &record.user),
                    "expiresAt": record.as_ref().map(|record| record.expires_at),
                    "refreshDue": tokens.should_refresh(),
                }))
            }
            Self::Refresh => {
                if !tokens.is_authenticated() {
                    bail!("Not signed in");
                }
                ctx.client.refresh_session().await?;
                print_json(&json!({ "expiresAt": tokens.read().map(|record| record.expires_at) }))
            }
            Self::Keepalive => {
                if !tokens.is_authenticated() {
                    bail!("Not signed in");
                }
                let controller =
                    SessionController::new(ctx.client.clone(), ctx.config.session_check_interval());
                if controller.check(CheckTrigger::Focus).await == SessionCheck::Terminated {
                    bail!("Session could not be renewed");
                }

                info!(interval = ?controller.interval(), "Keeping session alive");
                let timer = controller.spawn();
                tokio::select! {
                    () = timer.finished() => Err(anyhow!("Session ended")),
                    result = tokio::signal::ctrl_c() => {
                        result?;
                        info!("Interrupted, session left in place");
                        Ok(())
                    }
                }
            }
        }
    }
}

impl StationCommands {
    pub async fn execute(self, ctx: AppContext) -> Result<()> {
        let stations = StationService::new(ctx.client);
        match self {
            Self::List { active } => print_json(&stations.list(active).await?),
            Self::Show { id } => print_json(&stations.get(&id).await?),
            Self::Create {
                name,
                location,
                charger,
                slots,
                latitude,
                longitude,
                operator,
            } => {
                let request = StationRequest {
                    name,
                    location,
                    latitude,
                    longitude,
                    charger_type: charger.into(),
                    total_slots: slots,
                    operator_id: operator,
                };
                print_json(&stations.create(&request).await?)
            }
            Self::Activate { id } => print_json(&stations.activate(&id).await?),
            Self::Deactivate { id } => print_json(&stations.deactivate(&id).await?),
            Self::Availability { id, date } => {
                let date = date.unwrap_or_else(|| Utc::now().date_naive());
                print_json(&stations.availability(&id, date).await?)
            }
        }
    }
}

impl OwnerCommands {
    pub async fn execute(self, ctx: AppContext) -> Result<()> {
        let owners = EvOwnerService::new(ctx.client);
        match self {
            Self::List => print_json(&owners.list().await?),
            Self::Show { nic } => print_json(&owners.get(&nic).await?),
            Self::Activate { nic } => print_json(&owners.set_active(&nic, true).await?),
            Self::Deactivate { nic } => print_json(&owners.set_active(&nic, false).await?),
        }
    }
}

impl UserCommands {
    pub async fn execute(self, ctx: AppContext) -> Result<()> {
        let users = UserService::new(ctx.client);
        match self {
            Self::List => print_json(&users.list().await?),
            Self::Activate { id } => print_json(&users.set_active(&id, true).await?),
            Self::Deactivate { id } => print_json(&users.set_active(&id, false).await?),
        }
    }
}

impl BookingCommands {
    pub async fn execute(self, ctx: AppContext) -> Result<()> {
        let signed_in_owner = ctx
            .client
            .tokens()
            .user()
            .filter(|user| user.role == Role::EvOwner)
            .map(|user| user.id);
        let bookings = BookingService::new(ctx.client);

        match self {
            Self::List { status, station } => {
                let filter = BookingFilter {
                    status: status.map(Into::into),
                    station_id: station,
                };
                print_json(&bookings.list(&filter).await?)
            }
            Self::Mine => {
                let Some(nic) = signed_in_owner else {
                    bail!("Sign in as an EV owner to list your bookings");
                };
                print_json(&bookings.for_owner(&nic).await?)
            }
            Self::Create {
                station,
                start,
                duration,
                owner,
            } => {
                let Some(owner_nic) = owner.or(signed_in_owner) else {
                    bail!("Pass --owner or sign in as an EV owner");
                };
                let request = CreateBookingRequest {
                    owner_nic,
                    station_id: station,
                    reservation_start: start,
                    duration_minutes: duration,
                };
                print_json(&bookings.create(&request).await?)
            }
            Self::Approve { id } => print_json(&bookings.approve(&id).await?),
            Self::Cancel { id } => print_json(&bookings.cancel(&id).await?),
            Self::Complete { id } => print_json(&bookings.complete(&id).await?),
        }
    }
}
