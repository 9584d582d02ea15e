use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fundingzest::api::{AppState, run_http_server};
use fundingzest::config::{ServeArgs, SiteArgs};
use fundingzest::content::format::{format_rate, format_usd};
use fundingzest::core::LoanQuote;
use fundingzest::seo::{build_sitemap, render_sitemap_xml};

#[derive(Parser, Debug)]
#[command(
    name = "fundingzest",
    version,
    about = "Loan comparison site server and repayment calculator"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "FUNDINGZEST_LOG_JSON",
        help = "Emit logs as JSON lines"
    )]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site over HTTP.
    Serve(ServeArgs),
    /// Price one fixed-rate loan.
    Quote {
        #[arg(long, allow_negative_numbers = true)]
        principal: f64,
        #[arg(long, allow_negative_numbers = true, help = "Annual percentage rate, e.g. 36")]
        apr: f64,
        #[arg(long, allow_negative_numbers = true, help = "Term in whole months")]
        term: f64,
        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },
    /// Write sitemap.xml to stdout.
    Sitemap(SiteArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Serve(args) => {
            let config = args.site.into_config(args.lead_form_script);
            let state = AppState::load(config).context("failed to load site content")?;
            run_http_server(args.bind, state)
                .await
                .with_context(|| format!("HTTP server on {} failed", args.bind))
        }
        Command::Quote {
            principal,
            apr,
            term,
            json,
        } => {
            let quote = LoanQuote::from_raw_term(principal, apr, term)
                .context("cannot price this loan")?;
            let result = quote.repayment();
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} at {} over {} months",
                    format_usd(quote.principal()),
                    format_rate(quote.apr_percent()),
                    quote.term_months()
                );
                println!("Monthly payment: {}", format_usd(result.monthly_payment));
                println!("Total cost:      {}", format_usd(result.total_cost));
                println!("Total interest:  {}", format_usd(result.total_interest));
            }
            Ok(())
        }
        Command::Sitemap(site) => {
            let state = AppState::load(site.into_config(None)).context("failed to load site content")?;
            let entries = build_sitemap(
                &state.config,
                &state.loans,
                &state.states,
                &state.guides,
                Utc::now().date_naive(),
            );
            print!("{}", render_sitemap_xml(&entries));
            Ok(())
        }
    }
}

/// Logs go to stderr so `sitemap` and `quote` output stays clean.
fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
