//! dipcalc -- order legality checks for Diplomacy-style variants.
//!
//! Loads a variant, optionally places its default units, and reports
//! whether the given orders are legal.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dipcalc::board::{Order, OrderUnit, TerritoryId, UnitKind};
use dipcalc::config::{Settings, DEFAULT_VARIANT, DEFAULT_VARIANTS_ROOT, VARIANTS_ENV};
use dipcalc::rules::Violation;
use dipcalc::Adjudicator;

#[derive(Parser)]
#[command(name = "dipcalc")]
#[command(about = "Check unit placements and orders against a Diplomacy variant")]
struct Cli {
    /// Name of a bundled variant, or a path to a variant directory
    #[arg(long, default_value = DEFAULT_VARIANT)]
    variant: String,

    /// Directory holding named variants
    #[arg(long, env = VARIANTS_ENV, default_value = DEFAULT_VARIANTS_ROOT)]
    variants_root: PathBuf,

    /// Load the variant's default unit positions
    #[arg(long)]
    start_positions: bool,

    /// Log placement details to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test the validity of a unit move/attack
    Move {
        /// A (army) or F (fleet)
        unit: String,
        /// Territory the unit moves from
        from: String,
        /// Territory the unit moves to
        to: String,
        /// Faction claiming the unit
        faction: Option<String>,
        /// Require the unit to stand in FROM
        #[arg(long)]
        require_occupancy: bool,
    },

    /// Validate one order written as 'FACTION UNIT TERRITORY TYPE: TARGETS'
    Order {
        text: String,
        #[arg(long)]
        require_occupancy: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every order in a file, one per line
    Check {
        path: PathBuf,
        #[arg(long)]
        require_occupancy: bool,
    },

    /// Show a territory's attributes and neighbours
    Show { code: String },
}

#[derive(Serialize)]
struct OrderReport {
    order: String,
    valid: bool,
    violation: Option<Violation>,
    reason: Option<&'static str>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings {
        variant: cli.variant,
        variants_root: cli.variants_root,
        start_positions: cli.start_positions,
    };
    let adj = Adjudicator::from_settings(&settings)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Move {
            unit,
            from,
            to,
            faction,
            require_occupancy,
        } => report_move(&adj, &mut out, &unit, &from, &to, faction.as_deref(), require_occupancy)?,
        Commands::Order {
            text,
            require_occupancy,
            json,
        } => report_order(&adj, &mut out, &text, require_occupancy, json)?,
        Commands::Check {
            path,
            require_occupancy,
        } => report_file(&adj, &mut out, &path, require_occupancy)?,
        Commands::Show { code } => report_territory(&adj, &mut out, &code)?,
    }

    out.flush()?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn report_move<W: Write>(
    adj: &Adjudicator,
    out: &mut W,
    unit: &str,
    from: &str,
    to: &str,
    faction: Option<&str>,
    require_occupancy: bool,
) -> anyhow::Result<()> {
    let map = &adj.variant().map;
    let kind = UnitKind::from_token(unit).ok_or_else(|| anyhow!("unknown unit type '{unit}'"))?;
    let from_id = map
        .lookup(from)
        .ok_or_else(|| anyhow!("unknown territory '{}'", from.to_uppercase()))?;
    let to_id = map
        .lookup(to)
        .ok_or_else(|| anyhow!("unknown territory '{}'", to.to_uppercase()))?;
    let faction = match faction {
        Some(code) => Some(
            adj.variant()
                .factions
                .lookup(code)
                .ok_or_else(|| anyhow!("unknown faction '{}'", code.to_uppercase()))?,
        ),
        None => None,
    };

    let order = Order::Move {
        unit: OrderUnit {
            faction,
            kind,
            territory: from_id,
        },
        dest: to_id,
    };
    let valid = adj.validate(&order, require_occupancy);

    writeln!(out, "{:#^60}", " ORDERS ")?;
    if let Some(f) = faction.and_then(|id| adj.variant().factions.faction(id)) {
        writeln!(out, "[{}]", f.name.to_uppercase())?;
    }

    let label = |id| {
        let t = map.territory(id).context("territory vanished from map")?;
        Ok::<_, anyhow::Error>(format!("{} ({})", t.code.to_uppercase(), truncate(&t.name, 14)))
    };
    let status = if valid { "[VALID]" } else { "[INVALID]" };
    writeln!(
        out,
        "{}  {:<21}{:<21}{:>15}",
        kind.letter(),
        label(from_id)?,
        label(to_id)?,
        status
    )?;
    Ok(())
}

fn report_order<W: Write>(
    adj: &Adjudicator,
    out: &mut W,
    text: &str,
    require_occupancy: bool,
    json: bool,
) -> anyhow::Result<()> {
    let order = adj.parse_order(text)?;
    let verdict = adj.check(&order, require_occupancy);
    let report = OrderReport {
        order: adj.format_order(&order),
        valid: verdict.is_legal(),
        violation: verdict.violation(),
        reason: verdict.violation().map(Violation::describe),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string(&report)?)?;
    } else {
        match report.reason {
            None => writeln!(out, "{:<30}[VALID]", report.order)?,
            Some(reason) => writeln!(out, "{:<30}[INVALID] {}", report.order, reason)?,
        }
    }
    Ok(())
}

fn report_file<W: Write>(
    adj: &Adjudicator,
    out: &mut W,
    path: &Path,
    require_occupancy: bool,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut orders = Vec::new();
    let mut failures = 0;
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match adj.parse_order(line) {
            Ok(order) => orders.push(order),
            Err(e) => {
                failures += 1;
                writeln!(out, "line {}: {}", idx + 1, e)?;
            }
        }
    }

    let results = adj.validate_all(&orders, require_occupancy);
    for (order, valid) in orders.iter().zip(results) {
        let status = if valid { "[VALID]" } else { "[INVALID]" };
        writeln!(out, "{:<30}{}", adj.format_order(order), status)?;
    }

    if failures > 0 {
        bail!("{failures} order(s) in {} could not be parsed", path.display());
    }
    Ok(())
}

fn report_territory<W: Write>(adj: &Adjudicator, out: &mut W, code: &str) -> anyhow::Result<()> {
    let map = &adj.variant().map;
    let id = map
        .lookup(code)
        .ok_or_else(|| anyhow!("unknown territory '{}'", code.to_uppercase()))?;
    let t = map.territory(id).context("territory vanished from map")?;

    let codes = |ids: &[TerritoryId]| {
        ids.iter()
            .map(|&i| map.code(i).to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    };

    writeln!(out, "{} ({})", t.code.to_uppercase(), t.name)?;
    writeln!(out, "terrain:  {}", t.terrain.describe())?;
    writeln!(out, "capital:  {}", if t.is_capital { "yes" } else { "no" })?;
    writeln!(out, "borders:  {}", codes(map.neighbours(id)))?;
    if let Some(parent) = t.parent {
        writeln!(out, "parent:   {}", map.code(parent).to_uppercase())?;
    }
    if !map.children(id).is_empty() {
        writeln!(out, "coasts:   {}", codes(map.children(id)))?;
    }
    if let Some(position) = adj.positions().get(id) {
        let owner = adj
            .variant()
            .factions
            .faction(position.faction)
            .map_or("?", |f| f.name.as_str());
        writeln!(out, "unit:     {} {}", owner, position.kind.letter())?;
    }
    Ok(())
}
