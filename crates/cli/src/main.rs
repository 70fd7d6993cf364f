//! Driftwave CLI - drives the demo funnel from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Visit the landing page (captures campaign attribution from the URL)
//! dw-cli visit landing --url "https://driftwave.dev/?utm_source=twitter&utm_campaign=launch"
//!
//! # Sign up and walk the funnel
//! dw-cli signup -e ann@example.com -n "Ann"
//! dw-cli plans
//! dw-cli checkout --plan pro --method card
//!
//! # Work with projects
//! dw-cli project create --name "Demo" --description "First analytics project"
//! dw-cli project list
//!
//! # Inspect or reset the session
//! dw-cli whoami
//! dw-cli reset
//! ```
//!
//! # Commands
//!
//! - `visit` - Record a page view
//! - `click` - Simulate a landing-page interaction
//! - `signup` - Create the session user
//! - `plans` - Show the plan catalog (the pricing page)
//! - `checkout` - Run the simulated payment for a plan
//! - `project` - Create, list, and show projects (the dashboard)
//! - `whoami` - Show the session user
//! - `reset` - Clear the session

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

use driftwave_funnel::config::FunnelConfig;
use driftwave_funnel::state::AppState;
use driftwave_funnel::tracking::Page;

mod commands;

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(author, version, about = "Driftwave funnel demo CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a page view
    Visit {
        /// Page to visit
        #[arg(value_enum)]
        page: PageArg,

        /// Navigation URL (landing page only; campaign parameters are captured)
        #[arg(long)]
        url: Option<String>,

        /// Referring page (landing page only)
        #[arg(long)]
        referrer: Option<String>,
    },
    /// Simulate a landing-page interaction
    Click {
        #[command(subcommand)]
        target: ClickTarget,
    },
    /// Create the session user
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Show the plan catalog (the pricing page)
    Plans,
    /// Run the simulated payment for a plan
    Checkout {
        /// Plan ID (starter, pro, enterprise)
        #[arg(long)]
        plan: String,

        /// Payment method
        #[arg(long, value_enum, default_value = "card")]
        method: MethodArg,
    },
    /// Create, list, and show projects (the dashboard)
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Show the session user
    Whoami,
    /// Clear the session
    Reset,
}

#[derive(Subcommand)]
enum ClickTarget {
    /// A call-to-action button
    Cta {
        /// Where on the page the button sits (e.g. hero, footer)
        #[arg(long, default_value = "hero")]
        location: String,
    },
    /// The pricing link in the navigation
    PricingLink,
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Create a new project
    Create {
        /// Project name
        #[arg(short, long)]
        name: String,

        /// Project description (10 to 500 characters)
        #[arg(short, long)]
        description: String,
    },
    /// List the session user's projects
    List,
    /// Show one project
    Show {
        /// Project ID
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PageArg {
    Landing,
    Pricing,
    Signup,
    Checkout,
    Dashboard,
}

impl From<PageArg> for Page {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Landing => Self::Landing,
            PageArg::Pricing => Self::Pricing,
            PageArg::Signup => Self::Signup,
            PageArg::Checkout => Self::Checkout,
            PageArg::Dashboard => Self::Dashboard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Card,
    Paypal,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "driftwave_funnel=info,driftwave_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = FunnelConfig::from_env()?;
    let tracking_enabled = config.analytics.is_enabled();
    let state = AppState::from_config(config)?;

    match cli.command {
        Commands::Visit {
            page,
            url,
            referrer,
        } => commands::pages::visit(&state, page.into(), url.as_deref(), referrer.as_deref())?,
        Commands::Click { target } => match target {
            ClickTarget::Cta { location } => commands::pages::click_cta(&state, &location),
            ClickTarget::PricingLink => commands::pages::click_pricing_link(&state),
        },
        Commands::Signup { email, name } => commands::session::signup(&state, &email, &name)?,
        Commands::Plans => commands::plans::show(&state),
        Commands::Checkout { plan, method } => {
            let method = match method {
                MethodArg::Card => driftwave_funnel::services::payments::PaymentMethod::Card,
                MethodArg::Paypal => driftwave_funnel::services::payments::PaymentMethod::Paypal,
            };
            commands::checkout::run(&state, &plan, method).await?;
        }
        Commands::Project { action } => match action {
            ProjectAction::Create { name, description } => {
                commands::projects::create(&state, &name, &description)?;
            }
            ProjectAction::List => commands::projects::list(&state),
            ProjectAction::Show { id } => commands::projects::show(&state, &id)?,
        },
        Commands::Whoami => commands::session::whoami(&state),
        Commands::Reset => commands::session::reset(&state)?,
    }

    if tracking_enabled {
        // Let in-flight fire-and-forget analytics deliveries drain before exit.
        tokio::time::sleep(std::time::Duration::from_millis(250)).await;
    }

    Ok(())
}
