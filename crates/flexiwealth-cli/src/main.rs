mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

use flexiwealth_site::SiteConfig;

use commands::goals::{CrorepatiArgs, GoalTimelineArgs, InflatedGoalArgs};
use commands::investment::{CompareArgs, CompoundingArgs, SipArgs};
use commands::loans::EmiArgs;
use commands::retirement::{NpsArgs, RetirementArgs};
use commands::site::{ContactArgs, DisplayArgs};
use commands::statutory::{EpfArgs, PpfArgs};
use commands::wealth::{HlvArgs, NetWorthArgs};
use output::OutputOptions;

/// Personal-finance calculators for Indian investors
#[derive(Parser)]
#[command(
    name = "fw",
    version,
    about = "FlexiWealth personal-finance calculators",
    long_about = "A CLI for the FlexiWealth calculators with decimal precision. \
                  Covers SIP, EMI, compounding, goal and education planning, \
                  retirement, NPS, EPF, PPF, net worth and human life value, \
                  plus the site's contact form and display data."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Show rupee amounts with Indian digit grouping (table and minimal output)
    #[arg(long, global = true)]
    inr: bool,

    /// Site configuration file (YAML or JSON) for contact and display commands
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log more detail to stderr (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Future value of a monthly SIP
    Sip(SipArgs),
    /// Monthly instalment, interest and amortization of a loan
    Emi(EmiArgs),
    /// Lump-sum growth at a chosen compounding frequency
    Compounding(CompoundingArgs),
    /// Grow one lump sum across typical Indian asset classes
    Compare(CompareArgs),
    /// Monthly SIP needed to build a target corpus (one crore by default)
    Crorepati(CrorepatiArgs),
    /// Monthly SIP for an inflation-adjusted financial goal
    Goal(InflatedGoalArgs),
    /// Monthly SIP for a child's education cost
    Education(InflatedGoalArgs),
    /// How long a fixed SIP takes to reach a target
    GoalTimeline(GoalTimelineArgs),
    /// Retirement corpus and the SIP that closes the shortfall
    Retirement(RetirementArgs),
    /// NPS corpus, lump sum and monthly pension
    Nps(NpsArgs),
    /// EPF corpus at retirement
    Epf(EpfArgs),
    /// PPF maturity value
    Ppf(PpfArgs),
    /// Assets less liabilities
    NetWorth(NetWorthArgs),
    /// Life cover from the human life value method
    Hlv(HlvArgs),
    /// Validate and deliver a contact-form submission
    Contact(ContactArgs),
    /// Headline stats shown on the site
    Stats(DisplayArgs),
    /// Client testimonials shown on the site
    Testimonials(DisplayArgs),
    /// Print version information
    Version,
}

impl Commands {
    /// Calculator results carry rupee amounts; site listings carry ids and counters.
    fn shows_rupees(&self) -> bool {
        !matches!(
            self,
            Commands::Contact(_) | Commands::Stats(_) | Commands::Testimonials(_) | Commands::Version
        )
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_site_config(path: Option<&str>) -> Result<SiteConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let resolved = input::file::resolve_path(p)?;
            let config = SiteConfig::from_path(Path::new(&resolved))?;
            tracing::info!(path = %resolved.display(), remote = config.content.is_some(), "loaded site configuration");
            Ok(config)
        }
        None => Ok(SiteConfig::default()),
    }
}

fn run(command: Commands, config: Option<&str>) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    match command {
        Commands::Sip(args) => commands::investment::run_sip(args),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Compounding(args) => commands::investment::run_compounding(args),
        Commands::Compare(args) => commands::investment::run_compare(args),
        Commands::Crorepati(args) => commands::goals::run_crorepati(args),
        Commands::Goal(args) => commands::goals::run_goal(args),
        Commands::Education(args) => commands::goals::run_education(args),
        Commands::GoalTimeline(args) => commands::goals::run_goal_timeline(args),
        Commands::Retirement(args) => commands::retirement::run_retirement(args),
        Commands::Nps(args) => commands::retirement::run_nps(args),
        Commands::Epf(args) => commands::statutory::run_epf(args),
        Commands::Ppf(args) => commands::statutory::run_ppf(args),
        Commands::NetWorth(args) => commands::wealth::run_net_worth(args),
        Commands::Hlv(args) => commands::wealth::run_hlv(args),
        Commands::Contact(args) => commands::site::run_contact(args, &load_site_config(config)?),
        Commands::Stats(args) => commands::site::run_stats(args, &load_site_config(config)?),
        Commands::Testimonials(args) => {
            commands::site::run_testimonials(args, &load_site_config(config)?)
        }
        Commands::Version => Ok(serde_json::json!({
            "version": format!("fw {}", env!("CARGO_PKG_VERSION")),
        })),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = OutputOptions {
        format: cli.output,
        inr: cli.inr && cli.command.shows_rupees(),
    };

    match run(cli.command, cli.config.as_deref()) {
        Ok(value) => {
            output::format_output(&options, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupee_display_skips_site_listings() {
        for args in [
            vec!["fw", "--inr", "stats", "--offline"],
            vec!["fw", "--inr", "testimonials", "--offline"],
            vec!["fw", "--inr", "version"],
        ] {
            let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
            assert!(!cli.command.shows_rupees(), "{args:?}");
        }
    }

    #[test]
    fn test_rupee_display_applies_to_calculators() {
        let cli = Cli::try_parse_from(["fw", "--inr", "sip", "--years", "10"]).unwrap();
        assert!(cli.inr);
        assert!(cli.command.shows_rupees());
    }
}
