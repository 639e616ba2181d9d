//! Gatekeeper CLI - Main entry point

use clap::{Parser, Subcommand};
use gatekeeper_core::{Height, Identity, PolicyId};
use gatekeeper_engine::GateConfig;
use gatekeeper_rpc::{commands, GateContext};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gatekeeper")]
#[command(about = "Gatekeeper - Compliance gating engine", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Config file (administrator + limits) used when seeding fresh state
    #[arg(long)]
    config: Option<PathBuf>,

    /// Administrator identity used when no config file is given
    #[arg(long, default_value = "ADMIN")]
    admin: Identity,

    /// Current logical clock height
    #[arg(long, global = true, default_value_t = 0)]
    height: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grant officer privilege to an identity (administrator only)
    GrantOfficer {
        /// Calling identity
        #[arg(long)]
        caller: Identity,
        /// Identity receiving the grant
        target: Identity,
    },

    /// Create a policy
    CreatePolicy {
        /// Calling identity
        #[arg(long)]
        caller: Identity,
        /// Policy name
        name: String,
        /// Required compliance level (0-4)
        #[arg(long, default_value_t = 1)]
        level: u8,
        /// Validity window in ticks
        #[arg(long)]
        duration: u64,
        /// Minimum reputation score
        #[arg(long, default_value_t = 0)]
        min_reputation: u32,
        /// Violation ceiling
        #[arg(long, default_value_t = 3)]
        max_violations: u32,
    },

    /// Register an identity with starter standing
    Register {
        /// Identity to register
        identity: Identity,
    },

    /// Overwrite an identity's compliance standing
    UpdateCompliance {
        /// Calling identity
        #[arg(long)]
        caller: Identity,
        /// Identity being updated
        identity: Identity,
        /// New compliance level (0-4)
        #[arg(long)]
        level: u8,
        /// New reputation score
        #[arg(long)]
        reputation: u32,
        /// Verification window in ticks
        #[arg(long)]
        window: u64,
    },

    /// Record a violation against a subject
    RecordViolation {
        /// Calling identity
        #[arg(long)]
        caller: Identity,
        /// Subject of the violation
        subject: Identity,
        /// Referenced policy id
        #[arg(long)]
        policy: u64,
        /// Violation type
        #[arg(long)]
        kind: String,
        /// Severity (1-10)
        #[arg(long)]
        severity: u8,
    },

    /// Approve a subject for a policy
    Approve {
        /// Calling identity
        #[arg(long)]
        caller: Identity,
        /// Subject receiving the approval
        subject: Identity,
        /// Policy id
        #[arg(long)]
        policy: u64,
        /// Approval window in ticks
        #[arg(long)]
        duration: u64,
    },

    /// Run the lightweight compliance query
    Verify {
        /// Identity to check
        identity: Identity,
        /// Policy id
        #[arg(long)]
        policy: u64,
    },

    /// Run the full enforcement decision
    Enforce {
        /// Identity to check
        identity: Identity,
        /// Policy id
        #[arg(long)]
        policy: u64,
        /// Extra reputation margin above the policy minimum
        #[arg(long, default_value_t = 0)]
        boost: u32,
    },

    /// Show counters across the stores
    Stats,

    /// Show one identity's standing and violations
    Show {
        /// Identity to show
        identity: Identity,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GateConfig::from_file(path)?,
        None => GateConfig::new(cli.admin.clone()),
    };

    let mut ctx = GateContext::open(&cli.data, config)?;
    let height = Height::new(cli.height);

    match cli.command {
        Commands::GrantOfficer { caller, target } => {
            commands::grant_officer(&mut ctx, &caller, &target, height)?;
        }

        Commands::CreatePolicy {
            caller,
            name,
            level,
            duration,
            min_reputation,
            max_violations,
        } => {
            commands::create_policy(
                &mut ctx,
                &caller,
                &name,
                level,
                duration,
                min_reputation,
                max_violations,
                height,
            )?;
        }

        Commands::Register { identity } => {
            commands::register(&mut ctx, &identity, height)?;
        }

        Commands::UpdateCompliance {
            caller,
            identity,
            level,
            reputation,
            window,
        } => {
            commands::update_compliance(
                &mut ctx,
                &caller,
                &identity,
                level,
                reputation,
                window,
                height,
            )?;
        }

        Commands::RecordViolation {
            caller,
            subject,
            policy,
            kind,
            severity,
        } => {
            commands::record_violation(
                &mut ctx,
                &caller,
                &subject,
                PolicyId::new(policy),
                &kind,
                severity,
                height,
            )?;
        }

        Commands::Approve {
            caller,
            subject,
            policy,
            duration,
        } => {
            commands::approve(
                &mut ctx,
                &caller,
                &subject,
                PolicyId::new(policy),
                duration,
                height,
            )?;
        }

        Commands::Verify { identity, policy } => {
            commands::verify(&ctx, &identity, PolicyId::new(policy), height)?;
        }

        Commands::Enforce {
            identity,
            policy,
            boost,
        } => {
            commands::enforce(&ctx, &identity, PolicyId::new(policy), boost, height)?;
        }

        Commands::Stats => {
            commands::stats(&ctx)?;
        }

        Commands::Show { identity } => {
            commands::show(&ctx, &identity)?;
        }
    }

    Ok(())
}
