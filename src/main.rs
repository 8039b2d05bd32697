use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use kira_evalboard::input::DataSource;
use kira_evalboard::model::criteria::{Direction, FilterCriteria, GroupKey, SortKey};
use kira_evalboard::model::schema::{AbilitySchema, SCORE_MAX, SCORE_MIN};
use kira_evalboard::pipeline::stage6_views::{PersonProfile, ViewOptions};
use kira_evalboard::pipeline::stage7_export::{ExportInput, write_exports};
use kira_evalboard::session::{Request, Session};

#[derive(Debug, Parser)]
#[command(name = "kira-evalboard", version, about = "Filter, score and rank personnel evaluation tables")]
struct Cli {
    /// Log filter directive (overrides RUST_LOG), e.g. `debug`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a table and write the export bundle.
    Run(RunArgs),
    /// Atomically replace the backing table with a validated new one.
    Replace(ReplaceArgs),
}

#[derive(Debug, Clone, Args)]
struct SchemaArgs {
    /// JSON ability profile; overrides --preset.
    #[arg(long)]
    profile: Option<PathBuf>,
    #[arg(long, default_value = "procuratorial")]
    preset: String,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[command(flatten)]
    schema: SchemaArgs,
    /// Department to keep; repeatable. Omit to keep all.
    #[arg(long = "dept")]
    departments: Vec<String>,
    #[arg(long)]
    min_score: Option<f64>,
    #[arg(long)]
    max_score: Option<f64>,
    /// Per-dimension minimum as DIMENSION=VALUE; repeatable.
    #[arg(long = "min", value_parser = parse_threshold)]
    dimension_min: Vec<(String, f64)>,
    /// Case-insensitive substring of the name.
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    min_age: Option<f64>,
    /// `composite` or an ability dimension name.
    #[arg(long, default_value = "composite")]
    sort: String,
    #[arg(long)]
    ascending: bool,
    #[arg(long, default_value_t = 5)]
    top: usize,
    /// Group key for the mean table.
    #[arg(long, value_enum, default_value = "department")]
    group_by: GroupArg,
    /// Person to profile; all filtered people when omitted.
    #[arg(long)]
    person: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum GroupArg {
    Department,
    Political,
    Role,
}

impl From<GroupArg> for GroupKey {
    fn from(value: GroupArg) -> Self {
        match value {
            GroupArg::Department => GroupKey::Department,
            GroupArg::Political => GroupKey::PoliticalAffiliation,
            GroupArg::Role => GroupKey::Role,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct ReplaceArgs {
    #[arg(long)]
    target: PathBuf,
    #[arg(long)]
    from: PathBuf,
    #[command(flatten)]
    schema: SchemaArgs,
}

fn parse_threshold(s: &str) -> Result<(String, f64), String> {
    let (dim, value) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected DIMENSION=VALUE, got {s}"))?;
    let dim = dim.trim();
    if dim.is_empty() {
        return Err(format!("empty dimension in {s}"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid minimum in {s}: {e}"))?;
    Ok((dim.to_string(), value))
}

fn main() {
    let cli = Cli::parse();
    kira_evalboard::tracing::init(cli.log_level.as_deref());
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Run(args) => run_evaluation(&args),
        Command::Replace(args) => run_replace(&args),
    }
}

fn load_schema(args: &SchemaArgs) -> Result<AbilitySchema, String> {
    match &args.profile {
        Some(path) => AbilitySchema::load(path),
        None => AbilitySchema::preset(&args.preset),
    }
    .map_err(|e| e.to_string())
}

fn build_criteria(args: &RunArgs, schema: &AbilitySchema) -> Result<FilterCriteria, String> {
    let mut criteria = FilterCriteria::default();
    if !args.departments.is_empty() {
        criteria = criteria.with_departments(args.departments.iter().cloned());
    }
    if args.min_score.is_some() || args.max_score.is_some() {
        criteria = criteria.with_score_range(
            args.min_score.unwrap_or(SCORE_MIN),
            args.max_score.unwrap_or(SCORE_MAX),
        );
    }
    for (dim, min) in &args.dimension_min {
        criteria = criteria
            .with_dimension_min(schema, dim, *min)
            .map_err(|e| e.to_string())?;
    }
    if let Some(name) = &args.name {
        criteria = criteria.with_name_contains(name.clone());
    }
    if let Some(min_age) = args.min_age {
        criteria = criteria.with_min_age(min_age);
    }
    Ok(criteria)
}

fn run_evaluation(args: &RunArgs) -> Result<(), String> {
    let schema = Arc::new(load_schema(&args.schema)?);
    let criteria = build_criteria(args, &schema)?;
    let sort = SortKey::parse(&args.sort, &schema).map_err(|e| e.to_string())?;
    let direction = if args.ascending {
        Direction::Ascending
    } else {
        Direction::Descending
    };

    let options = ViewOptions {
        sort,
        direction,
        limit: Some(args.top),
        group_key: args.group_by.into(),
    };
    let mut session = Session::new(DataSource::new(&args.input, Arc::clone(&schema)))
        .with_options(options)
        .with_selection(args.person.clone());
    let view = session
        .handle(Request::FilterChanged(criteria.clone()))
        .map_err(|e| e.to_string())?;

    info!(
        total = view.dashboard.kpis.total_records,
        filtered = view.filtered.len(),
        "evaluation complete"
    );

    let profiles: Vec<PersonProfile> = match (&args.person, &view.profile) {
        (Some(_), Some(profile)) => vec![profile.clone()],
        (Some(name), None) => {
            tracing::warn!(person = %name, "selected person not in filtered set");
            Vec::new()
        }
        (None, _) => view
            .filtered
            .records
            .iter()
            .map(|r| PersonProfile::from_record(r, view.filtered.dimensions()))
            .collect(),
    };

    let input = ExportInput {
        filtered: &view.filtered,
        view: &view.dashboard,
        criteria: &criteria,
        stats: session.source().stats(),
        profiles: &profiles,
    };
    write_exports(&input, &args.out).map_err(|e| e.to_string())?;
    Ok(())
}

fn run_replace(args: &ReplaceArgs) -> Result<(), String> {
    let schema = Arc::new(load_schema(&args.schema)?);
    let mut source = DataSource::new(&args.target, schema);
    let rows = source
        .replace(Path::new(&args.from))
        .map_err(|e| e.to_string())?;
    println!("replaced {} with {} rows", args.target.display(), rows);
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
