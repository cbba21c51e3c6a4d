//! `opsrank` -- agent performance leaderboard CLI.
//!
//! Fetches call, rating, and leave snapshots from the record store,
//! computes the composite ranking, prints the leaderboard and insights,
//! and writes CSV/JSON artifacts.
//!
//! # Environment variables
//!
//! | Variable                    | Required | Default | Description                       |
//! |-----------------------------|----------|---------|-----------------------------------|
//! | `RECORD_STORE_URL`          | yes      | --      | GraphQL endpoint of the store     |
//! | `RECORD_STORE_ADMIN_SECRET` | yes      | --      | Admin secret header value         |
//! | `CALL_FETCH_LIMIT`          | no       | `1000`  | Max call records per run          |
//! | `RATING_FETCH_LIMIT`        | no       | `1000`  | Max rating records per run        |
//! | `LEAVE_LOOKBACK_DAYS`       | no       | `30`    | Leave eligibility window          |
//! | `OUTPUT_DIR`                | no       | `.`     | Directory for CSV/JSON artifacts  |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use opsrank_core::analysis::analyze_agent;
use opsrank_core::insights::derive_insights;
use opsrank_core::ranking::rank_all;
use opsrank_core::records::Snapshots;
use opsrank_core::scoring::{DirectSum, NormalizedWeighted, ScoringStrategy};
use opsrank_fetch::config::FetchConfig;
use opsrank_fetch::store::RecordStore;
use opsrank_report::csv;
use opsrank_report::report::write_report_json;
use opsrank_report::table::{render_agent_analysis, render_insights, render_rankings};

/// Number of leaderboard rows printed by default.
const DEFAULT_TOP: usize = 10;

#[derive(Parser)]
#[command(name = "opsrank", version, about = "Agent performance ranking")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Full run: fetch, rank, print, and export artifacts.
    Rank {
        /// Number of leaderboard rows to print.
        #[arg(long, default_value_t = DEFAULT_TOP)]
        top: usize,
        /// Composite scoring formula.
        #[arg(long, value_enum, default_value_t = Strategy::DirectSum)]
        strategy: Strategy,
    },
    /// Detailed analysis for a single agent.
    Analyze {
        /// Agent UUID to analyze.
        agent_id: Uuid,
    },
    /// Print the top N agents without writing artifacts.
    Top {
        n: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Production formula: plain sum of the four component metrics.
    DirectSum,
    /// Experimental formula: normalized components with weights.
    Normalized,
}

impl Strategy {
    fn scoring(self) -> Box<dyn ScoringStrategy> {
        match self {
            Strategy::DirectSum => Box::new(DirectSum),
            Strategy::Normalized => Box::new(NormalizedWeighted::default()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsrank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = FetchConfig::from_env().context("record store configuration")?;
    let store = RecordStore::new(config);

    match cli.command.unwrap_or(Command::Rank {
        top: DEFAULT_TOP,
        strategy: Strategy::DirectSum,
    }) {
        Command::Rank { top, strategy } => run_ranking(&store, top, strategy).await,
        Command::Analyze { agent_id } => run_analysis(&store, agent_id).await,
        Command::Top { n } => run_top(&store, n).await,
    }
}

async fn run_ranking(store: &RecordStore, top: usize, strategy: Strategy) -> anyhow::Result<()> {
    let scoring = strategy.scoring();
    let snapshots = fetch_snapshots(store).await;
    let board = rank_all(&snapshots, scoring.as_ref());

    if board.is_empty() {
        println!("No ranking data available. Check the record store connection and data.");
        return Ok(());
    }

    println!("{}", render_rankings(&board, top));
    let insights = derive_insights(&board);
    println!("{}", render_insights(&insights));

    let output_dir = output_dir()?;
    let csv_path = csv::write_rankings_csv(&output_dir, &board).context("rankings CSV")?;
    let report_path =
        write_report_json(&output_dir, &board, &insights, None, scoring.label())
            .context("JSON report")?;
    let top_path =
        csv::write_top_performers_csv(&output_dir, &board, csv::DEFAULT_TOP_PERCENTILE)
            .context("top performers CSV")?;

    println!("Rankings CSV:   {}", csv_path.display());
    println!("JSON report:    {}", report_path.display());
    println!("Top performers: {}", top_path.display());
    Ok(())
}

async fn run_analysis(store: &RecordStore, agent_id: Uuid) -> anyhow::Result<()> {
    let snapshots = fetch_snapshots(store).await;
    let analysis = analyze_agent(agent_id, &snapshots, &DirectSum);

    println!("{}", render_agent_analysis(&analysis));

    let output_dir = output_dir()?;
    let report_path = write_report_json(
        &output_dir,
        &[],
        &Default::default(),
        Some(&analysis),
        DirectSum.label(),
    )
    .context("analysis report")?;
    println!("Analysis report: {}", report_path.display());
    Ok(())
}

async fn run_top(store: &RecordStore, n: usize) -> anyhow::Result<()> {
    let snapshots = fetch_snapshots(store).await;
    let board = rank_all(&snapshots, &DirectSum);
    println!("{}", render_rankings(&board, n));
    Ok(())
}

async fn fetch_snapshots(store: &RecordStore) -> Snapshots {
    tracing::info!("Fetching record snapshots");
    let snapshots = store.snapshots().await;
    tracing::info!(
        calls = snapshots.calls.len(),
        ratings = snapshots.ratings.len(),
        leaves = snapshots.leaves().map(<[_]>::len),
        "Snapshots ready",
    );
    snapshots
}

fn output_dir() -> anyhow::Result<PathBuf> {
    let dir = PathBuf::from(std::env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".into()));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    Ok(dir)
}
