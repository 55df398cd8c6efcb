//! # Predim CLI Application
//!
//! Terminal front end for the pre-sizing engine. Loads a `.pdm` project (or
//! the built-in two-zone office), runs every calculator and prints totals
//! and grouped warnings, or the full report as JSON.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use predim_core::calculations::CalcOutput;
use predim_core::catalog;
use predim_core::file_io::{load_project_with_lock_check, save_project, FileLock};
use predim_core::project::Project;
use predim_core::report::BuildingReport;
use predim_core::tables::systems;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct PredimArgs {
    #[command(subcommand)]
    command: Command,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the pre-sizing report for a project
    Report {
        /// Project file (.pdm); the sample office is used when omitted
        project: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Only show one section
        #[arg(long, short)]
        module: Option<Section>,
    },
    /// Write the sample office project to a new file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long, default_value_t = false)]
        force: bool,
        /// User recorded in the lock while writing
        #[arg(long, default_value = "predim")]
        user: String,
    },
    /// List every usage known to the reference tables
    Usages,
    /// Suitable HVAC systems per application
    Systems {
        /// Application name; all applications are listed when omitted
        application: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Climate,
    Ventilation,
    Electrical,
    Water,
    Space,
    Fire,
}

fn main() -> anyhow::Result<()> {
    let args = PredimArgs::parse();

    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting tracing subscriber failed")?;

    match args.command {
        Command::Report { project, json, module } => run_report(project.as_deref(), json, module),
        Command::Init { path, force, user } => run_init(&path, force, &user),
        Command::Usages => {
            for usage in catalog::all_usages() {
                println!("{}", usage);
            }
            Ok(())
        }
        Command::Systems { application } => run_systems(application.as_deref()),
    }
}

fn run_report(path: Option<&Path>, json: bool, module: Option<Section>) -> anyhow::Result<()> {
    let project = match path {
        Some(path) => {
            let (project, lock) = load_project_with_lock_check(path)
                .with_context(|| format!("could not load {}", path.display()))?;
            if let Some(holder) = lock {
                eprintln!("Note: {} is open by {} since {}", path.display(), holder.label(), holder.since);
            }
            project
        }
        None => {
            debug!("no project given, using the sample office");
            Project::sample_office()
        }
    };

    let report = BuildingReport::compute(&project.zones, &project.settings)?;

    if json {
        let text = match module {
            None => serde_json::to_string_pretty(&report)?,
            Some(Section::Climate) => serde_json::to_string_pretty(&report.climate)?,
            Some(Section::Ventilation) => serde_json::to_string_pretty(&report.ventilation)?,
            Some(Section::Electrical) => serde_json::to_string_pretty(&report.electrical)?,
            Some(Section::Water) => serde_json::to_string_pretty(&report.water)?,
            Some(Section::Space) => serde_json::to_string_pretty(&report.space)?,
            Some(Section::Fire) => serde_json::to_string_pretty(&report.fire)?,
        };
        println!("{}", text);
        return Ok(());
    }

    print_header(&project);
    let show = |s: Section| module.map_or(true, |m| m == s);

    if show(Section::Climate) {
        print_climate(&report);
    }
    if show(Section::Ventilation) {
        print_ventilation(&report);
    }
    if show(Section::Electrical) {
        print_electrical(&report);
    }
    if show(Section::Water) {
        print_water(&report);
    }
    if show(Section::Space) {
        print_space(&report);
    }
    if show(Section::Fire) {
        print_fire(&report);
    }

    let groups = report.grouped_warnings();
    if module.is_none() && !groups.is_empty() {
        heading(&format!("WARNINGS ({})", report.warning_count()));
        for group in groups {
            println!("  {}", group);
        }
    }
    Ok(())
}

fn run_init(path: &Path, force: bool, user: &str) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let _lock = FileLock::acquire(path, user)?;
    save_project(&Project::sample_office(), path)?;
    println!("Wrote sample project to {}", path.display());
    Ok(())
}

fn run_systems(application: Option<&str>) -> anyhow::Result<()> {
    match application {
        Some(app) => {
            let Some(found) = systems::suitable_systems(app) else {
                bail!("unknown application '{}' (run `predim systems` for the list)", app);
            };
            println!("{}:", app);
            for system in found {
                println!("  - {}", system);
            }
        }
        None => {
            for app in systems::applications() {
                let names: Vec<String> = systems::suitable_systems(app)
                    .unwrap_or_default()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("{}: {}", app, names.join(", "));
            }
        }
    }
    Ok(())
}

// ============================================================================
// Text report
// ============================================================================

fn heading(title: &str) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

fn cell(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", decimals, v))
}

fn print_header(project: &Project) {
    let meta = &project.meta;
    println!("{}", if meta.title.is_empty() { "Pre-sizing report" } else { meta.title.as_str() });
    if !meta.job_id.is_empty() || !meta.client.is_empty() {
        println!("Job {} - {}", meta.job_id, meta.client);
    }
    println!("{} zones, {:.0} m²", project.zone_count(), project.total_area());
}

fn print_rows<R, T>(output: &CalcOutput<R, T>, line: impl Fn(&R) -> String) {
    for row in &output.rows {
        println!("  {}", line(row));
    }
}

fn print_climate(report: &BuildingReport) {
    heading("CLIMATE LOADS");
    print_rows(&report.climate, |r| {
        format!(
            "{:<32} {:>8.0} m²  cooling {:>8} kW  heating {:>8} kW",
            r.zone,
            r.area_m2,
            cell(r.cooling_kw, 1),
            cell(r.heating_kw, 1)
        )
    });
    let t = &report.climate.totals;
    println!("  Total cooling: {:.1} kW (generator {:.1} kW)", t.cooling_kw, t.cooling_generator_kw);
    println!("  Total heating: {:.1} kW (generator {:.1} kW)", t.heating_kw, t.heating_generator_kw);
}

fn print_ventilation(report: &BuildingReport) {
    heading("VENTILATION");
    print_rows(&report.ventilation, |r| {
        format!(
            "{:<32} ventilation {:>8} L/s  all-air {:>8} L/s",
            r.zone,
            cell(r.ventilation_ls, 0),
            cell(r.all_air_ls, 0)
        )
    });
    let t = &report.ventilation.totals;
    println!("  Above grade: {:.0} L/s ({:.0} m³/h)", t.above_grade_ls, t.above_grade_m3h);
    if t.parking_spaces > 0 {
        println!(
            "  Garage ({} spaces, {}): supply {:.0} m³/h, extract {:.0} m³/h",
            t.parking_spaces, t.parking_mode, t.garage_supply_m3h, t.garage_extract_m3h
        );
    }
    if t.all_air_ls > 0.0 {
        println!("  All-air: {:.0} L/s ({:.0} m³/h)", t.all_air_ls, t.all_air_m3h);
    }
}

fn print_electrical(report: &BuildingReport) {
    heading("ELECTRICAL DEMAND");
    print_rows(&report.electrical, |r| {
        format!(
            "{:<32} normal {:>8} kW  supplementary {:>8.1} kW",
            r.zone,
            cell(r.normal_kw, 1),
            r.supplementary_kw
        )
    });
    let t = &report.electrical.totals;
    println!("  Total: {:.1} kW ({})", t.total_kw, t.service);
    if t.utility_reserve_advised {
        println!("  A utility reserve area is advised.");
    }
    for motor in &t.motors {
        println!(
            "  Motor {}: {:.1} A rated, {:.1} A starting",
            motor.name, motor.rated_current_a, motor.starting_current_a
        );
    }
}

fn print_water(report: &BuildingReport) {
    heading("WATER");
    print_rows(&report.water, |r| {
        format!(
            "{:<32} cold {:>8} L/day  hot {:>8} L/day",
            r.zone,
            cell(r.cold_water_l_day, 0),
            cell(r.hot_water_l_day, 0)
        )
    });
    let t = &report.water.totals;
    println!("  Cold water: {:.2} m³/day", t.cold_water_m3_day);
    println!("  Hot water: {:.2} m³/day, {:.1} kW", t.hot_water_m3_day, t.hot_water_kw);
}

fn print_space(report: &BuildingReport) {
    heading("SPACE RESERVATION");
    let t = &report.space.totals;
    for c in &t.categories {
        println!("  {:<32} {:>8.0} m²  {:.0}-{:.0} m²", c.category, c.area_m2, c.min_m2, c.max_m2);
    }
    println!("  Global: {:.0}-{:.0} m² of {:.0} m²", t.global_min_m2, t.global_max_m2, t.total_area_m2);
    print_rows(&report.space, |r| format!("{:<32} {:.1}-{:.1} m²", r.installation, r.min_m2, r.max_m2));
}

fn print_fire(report: &BuildingReport) {
    heading("FIRE PROTECTION RESERVE");
    print_rows(&report.fire, |r| {
        format!(
            "{:<36} {:>8} L/s  {:>4} h  {:>8} m³",
            r.system.to_string(),
            cell(r.flow_ls, 2),
            cell(r.duration_h, 1),
            cell(r.reserve_m3, 2)
        )
    });
    println!("  Total reserve: {:.2} m³", report.fire.totals.total_reserve_m3);
}
