use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use mission_csv::Rows;
use mission_plan::{doctor, loader, route_length_m, CsvCfg, Limits};

#[derive(Debug, Parser)]
#[command(name = "mission", version, about = "Waypoint mission CSV tools")]
struct Cli {
    /// TOML config; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one field of every row of a delimited file.
    Dump {
        file: PathBuf,
        /// Field number, counted from 1.
        #[arg(long, default_value_t = 4)]
        field: usize,
    },
    /// Load the configured mission and print a summary.
    Plan,
    /// Check config and mission against the configured limits.
    Doctor,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Config {
    csv: CsvCfg,
    mission: MissionCfg,
    limits: Limits,
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
struct MissionCfg {
    /// Waypoint rows.
    file: PathBuf,
    /// Mission settings rows; defaults to `file`'s sibling `init.csv`.
    init_file: Option<PathBuf>,
    init_row: usize,
}

impl Default for MissionCfg {
    fn default() -> Self {
        Self { file: PathBuf::from("waypoints.csv"), init_file: None, init_row: 1 }
    }
}

impl MissionCfg {
    fn init_path(&self) -> PathBuf {
        match &self.init_file {
            Some(p) => p.clone(),
            None => self.file.with_file_name("init.csv"),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else { return Ok(Config::default()); };
    let s = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    parse_config(&s)
}

fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s).context("parse config toml")?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;

    match cli.cmd {
        Command::Dump { file, field } => {
            dump(&cfg, &file, field, &mut io::stdout().lock())?;
        }
        Command::Plan => plan(&cfg, &mut io::stdout().lock())?,
        Command::Doctor => doctor_cmd(&cfg)?,
    }
    Ok(())
}

fn dump(cfg: &Config, file: &Path, field: usize, out: &mut impl Write) -> Result<usize> {
    anyhow::ensure!(field >= 1, "--field counts from 1");
    let f = File::open(file).with_context(|| format!("open {}", file.display()))?;
    let mut reader = BufReader::new(f);

    let mut short = 0;
    let n = Rows::with_delimiter(&mut reader, cfg.csv.delimiter).for_each_row(|row| {
        match row.get(field) {
            Some(v) => writeln!(out, "{}", v)?,
            None => {
                short += 1;
                writeln!(out)?;
            }
        }
        Ok::<_, io::Error>(())
    })?;

    if short > 0 {
        warn!("dump: {} row(s) have fewer than {} field(s)", short, field);
    }
    info!("dump: {} row(s) from {}", n, file.display());
    Ok(n)
}

fn plan(cfg: &Config, out: &mut impl Write) -> Result<()> {
    let init_path = cfg.mission.init_path();
    let init = loader::load_init(&init_path, cfg.mission.init_row, &cfg.csv)
        .with_context(|| format!("mission settings from {}", init_path.display()))?;
    let wps = loader::load_waypoints(&cfg.mission.file, &cfg.csv)
        .with_context(|| format!("waypoints from {}", cfg.mission.file.display()))?;

    writeln!(out, "waypoints={}", wps.len())?;
    writeln!(out, "route_length_m={:.1}", route_length_m(&wps))?;
    writeln!(
        out,
        "max_velocity_mps={} idle_velocity_mps={} executive_times={}",
        init.max_velocity_mps, init.idle_velocity_mps, init.executive_times
    )?;
    writeln!(
        out,
        "finish_action={} yaw_mode={} trace_mode={} rc_lost_action={} gimbal_pitch_mode={}",
        init.finish_action, init.yaw_mode, init.trace_mode, init.rc_lost_action, init.gimbal_pitch_mode
    )?;
    for wp in &wps {
        writeln!(
            out,
            "wp {} lat={} lon={} alt_m={} yaw_deg={} gimbal_pitch_deg={} damping_m={}",
            wp.index, wp.lat, wp.lon, wp.alt_m, wp.yaw_deg, wp.gimbal_pitch_deg, wp.damping_m
        )?;
    }
    Ok(())
}

fn doctor_cmd(cfg: &Config) -> Result<()> {
    info!("doctor: starting");

    doctor::check_limits(&cfg.limits)?;
    anyhow::ensure!(cfg.mission.init_row >= 1, "mission.init_row counts from 1");
    if cfg.csv.delimiter == '\n' || cfg.csv.delimiter == '\r' {
        anyhow::bail!("csv.delimiter cannot be a line break");
    }

    let init = loader::load_init(cfg.mission.init_path(), cfg.mission.init_row, &cfg.csv)?;
    let wps = loader::load_waypoints(&cfg.mission.file, &cfg.csv)?;
    doctor::check_mission(&init, &wps, &cfg.limits)?;

    info!("doctor: OK ({} waypoints)", wps.len());
    Ok(())
}
