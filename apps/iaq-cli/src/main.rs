use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use iaq_app::{
    AppError, AppResult, BatchOutcome, ScenarioFile, SizingTables, load_scenarios, run_batch,
    run_scenario,
};
use iaq_core::flow_cfm;
use iaq_solver::{InfeasibilityReport, OutputUnits, RawParams, SizingResult, SolverError};

#[derive(Parser)]
#[command(name = "iaq-cli")]
#[command(about = "IAQP CLI - outdoor airflow sizing by indoor air quality", long_about = None)]
struct Cli {
    /// Log resolution decisions and per-constraint requirements
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size one scenario from flags (optionally on top of a scenario file)
    Solve(SolveArgs),
    /// Size every scenario in a YAML or JSON file
    Batch {
        /// Path to the scenario file
        path: PathBuf,
        /// Print the batch report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List occupancy categories and their ventilation rates
    Occupancies {
        /// Case-insensitive substring filter
        query: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Scenario file supplying defaults (and a base scenario with --scenario)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Name of the scenario in --file to start from
    #[arg(long, requires = "file")]
    scenario: Option<String>,
    /// Occupancy category, e.g. "Office space"
    #[arg(long)]
    occupancy: Option<String>,
    /// Floor area [m2]
    #[arg(long)]
    area_m2: Option<f64>,
    /// Floor area [ft2]
    #[arg(long)]
    area_ft2: Option<f64>,
    /// Number of occupants (default: from occupancy density)
    #[arg(long)]
    people: Option<u32>,
    /// Recirculated share of supply air, 0 <= R < 1
    #[arg(long)]
    recirculation_ratio: Option<f64>,
    /// Recirculation airflow [cfm]
    #[arg(long)]
    recirc_cfm: Option<f64>,
    /// Recirculation airflow [m3/h]
    #[arg(long)]
    recirc_cmh: Option<f64>,
    /// Global cleaner efficiency (0 disables cleaning)
    #[arg(long)]
    ef: Option<f64>,
    /// Zone air-distribution effectiveness
    #[arg(long)]
    ez: Option<f64>,
    /// Allowed fraction of each limit, in (0, 1]
    #[arg(long)]
    safety_factor: Option<f64>,
    /// Cleaner position: A (mixed air) or B (recirculated air)
    #[arg(long)]
    filter_position: Option<String>,
    /// Air-handling system: cv or vav
    #[arg(long)]
    system: Option<String>,
    /// VAV flow-reduction fraction
    #[arg(long)]
    flow_reduction: Option<f64>,
    /// Cleaner type: generic or uniform
    #[arg(long)]
    cleaner: Option<String>,
    /// Output airflow units: cfm, cmh or both
    #[arg(long)]
    units: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl SolveArgs {
    /// Flags override the base scenario field by field.
    fn overlay(&self, base: RawParams) -> RawParams {
        RawParams {
            name: base.name,
            occupancy: self.occupancy.clone().or(base.occupancy),
            area_m2: self.area_m2.or(base.area_m2),
            area_ft2: self.area_ft2.or(base.area_ft2),
            num_people: self.people.or(base.num_people),
            recirculation_ratio: self.recirculation_ratio.or(base.recirculation_ratio),
            recirc_cfm: self.recirc_cfm.or(base.recirc_cfm),
            recirc_cmh: self.recirc_cmh.or(base.recirc_cmh),
            ef: self.ef.or(base.ef),
            ez: self.ez.or(base.ez),
            safety_factor: self.safety_factor.or(base.safety_factor),
            filter_position: self.filter_position.clone().or(base.filter_position),
            system: self.system.clone().or(base.system),
            flow_reduction: self.flow_reduction.or(base.flow_reduction),
            cleaner: self.cleaner.clone().or(base.cleaner),
            units: self.units.clone().or(base.units),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Solve(args) => cmd_solve(&args),
        Commands::Batch { path, json } => cmd_batch(&path, json),
        Commands::Occupancies { query, json } => cmd_occupancies(query.as_deref(), json),
    };

    match outcome {
        Ok(code) => code,
        Err(AppError::Solver(SolverError::Infeasible(report))) => {
            print_infeasible(&report);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Serialize(e.to_string()))
}

fn cmd_solve(args: &SolveArgs) -> AppResult<ExitCode> {
    let file = match &args.file {
        Some(path) => load_scenarios(path)?,
        None => ScenarioFile::default(),
    };
    let base = match &args.scenario {
        Some(name) => file.scenario(name)?.clone(),
        None => RawParams::default(),
    };
    let raw = args.overlay(base);

    let tables = SizingTables::standard()?;
    let result = run_scenario(&raw, &file.defaults, &tables)?;

    if args.json {
        println!("{}", to_json(&result)?);
    } else {
        print_result(&result);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_batch(path: &Path, json: bool) -> AppResult<ExitCode> {
    let file = load_scenarios(path)?;
    let tables = SizingTables::standard()?;
    let report = run_batch(&file, &tables);

    if json {
        println!("{}", to_json(&report)?);
    } else {
        for entry in &report.entries {
            println!("== {} ==", entry.label);
            match &entry.outcome {
                BatchOutcome::Sized { result } => print_result(result),
                BatchOutcome::Infeasible { report } => print_infeasible(report),
                BatchOutcome::Failed { error } => println!("error: {error}"),
            }
            println!();
        }
        println!(
            "{} scenarios: {} sized, {} infeasible, {} failed",
            report.entries.len(),
            report.sized(),
            report.infeasible(),
            report.failed()
        );
    }

    Ok(if report.failed() > 0 {
        ExitCode::FAILURE
    } else if report.infeasible() > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_occupancies(query: Option<&str>, json: bool) -> AppResult<ExitCode> {
    let tables = SizingTables::standard()?;
    let matches = tables.catalog.filter_occupancies(query.unwrap_or(""));

    if json {
        println!("{}", to_json(&matches)?);
    } else if matches.is_empty() {
        println!("No occupancy categories match");
    } else {
        println!(
            "{:<48} {:>8} {:>8} {:>10}",
            "Occupancy", "Rp", "Ra", "#/1000ft2"
        );
        for occ in matches {
            println!(
                "{:<48} {:>8.2} {:>8.2} {:>10.0}",
                occ.name,
                occ.rp_cfm_per_person,
                occ.ra_cfm_per_ft2,
                occ.default_density_per_1000ft2
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn airflow(m3h: f64, units: OutputUnits) -> String {
    let cfm = flow_cfm(iaq_core::m3ph(m3h));
    match units {
        OutputUnits::Cfm => format!("{:.1} cfm", cfm),
        OutputUnits::Cmh => format!("{:.1} m3/h", m3h),
        OutputUnits::Both => format!("{:.1} cfm ({:.1} m3/h)", cfm, m3h),
    }
}

fn print_result(result: &SizingResult) {
    let units = result.units;
    let flows = &result.airflows;

    println!("Occupancy:        {}", result.occupancy);
    println!(
        "Outdoor airflow:  {}  [governed by {}]",
        airflow(result.outdoor_airflow_m3h(), units),
        result.governing
    );
    println!(
        "Baseline:         {}",
        airflow(iaq_core::flow_m3ph(result.baseline_airflow), units)
    );
    println!("Recirculated:     {}", airflow(flows.recirculated_m3h, units));
    println!("Total:            {}", airflow(flows.total_m3h, units));
    println!("Outdoor share:    {:.1} %", flows.outdoor_fraction * 100.0);
    println!();
    println!(
        "  {:<24} {:>10} {:>10} {:>12} {:>12} {:>8}",
        "Compound", "Ef", "N ug/h", "Limit ug/m3", "Conc ug/m3", "% limit"
    );
    for c in &result.contaminants {
        println!(
            "  {:<24} {:>10.3} {:>10.1} {:>12.2} {:>12.2} {:>8.1}",
            c.compound,
            c.efficiency,
            c.emission_rate,
            c.design_limit,
            c.concentration,
            c.percent_of_limit
        );
    }
    if !result.groups.is_empty() {
        println!();
        for g in &result.groups {
            println!(
                "  {:<36} {:.3} of {:.2} allowed  ({})",
                g.name,
                g.combined_fraction,
                g.allowed,
                g.members.join(", ")
            );
        }
    }
}

fn print_infeasible(report: &InfeasibilityReport) {
    println!("Infeasible: no outdoor airflow keeps these under their limits");
    for c in &report.constraints {
        println!(
            "  {}: {:.3} of its limit at unlimited airflow (allowed {:.3})",
            c.constraint, c.asymptotic_fraction, c.allowed
        );
    }
}
