//! Command line interface over the project and profile stores.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use img2gcode_designer::{write_svg, AutoConfirm};
use img2gcode_devicedb::{LaserSettings, ProfileManager};

use crate::{open_session, open_store, SharedStore};

#[derive(Parser, Debug)]
#[command(name = "img2gcode", version, about = "Laser engraving design projects and machine profiles")]
pub struct Cli {
    /// Path of the JSON store holding projects, profiles and preferences
    #[arg(long, env = "IMG2GCODE_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Saved design projects
    Projects(ProjectsCommand),
    /// Image insertion
    Image(ImageCommand),
    /// Machine and laser profiles
    Profiles(ProfilesCommand),
}

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub command: ProjectsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsSubcommand {
    List,
    /// Write a project as an SVG document in millimetres
    Export { name: String, output: PathBuf },
    Delete { name: String },
    Duplicate { from: String, to: String },
}

#[derive(Args, Debug)]
pub struct ImageCommand {
    #[command(subcommand)]
    pub command: ImageSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageSubcommand {
    /// Add an image file to a project, creating the project if needed
    Add {
        file: PathBuf,
        #[arg(long)]
        project: String,
        #[arg(long)]
        grayscale: bool,
    },
}

#[derive(Args, Debug)]
pub struct ProfilesCommand {
    #[command(subcommand)]
    pub command: ProfilesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfilesSubcommand {
    List,
    Save {
        name: String,
        /// Feed speed in mm/min
        #[arg(long, default_value_t = LaserSettings::default().speed)]
        speed: f64,
        /// Laser power in percent
        #[arg(long, default_value_t = LaserSettings::default().power)]
        power: f64,
        /// Line spacing in mm
        #[arg(long, default_value_t = LaserSettings::default().precision)]
        precision: f64,
        #[arg(long, default_value_t = 1)]
        passes: u32,
    },
    Delete { name: String },
    Activate { name: String },
    /// Print all profiles as JSON, or write them to a file
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Import { file: PathBuf },
}

/// Runs a parsed command, writing its report to `out`.
pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let store = open_store(cli.store.as_deref())?;
    match cli.command {
        Command::Projects(cmd) => run_projects(cmd.command, store, out),
        Command::Image(cmd) => run_image(cmd.command, store, out),
        Command::Profiles(cmd) => run_profiles(cmd.command, store, out),
    }
}

fn run_projects(cmd: ProjectsSubcommand, store: SharedStore, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut state = open_session(store, Box::new(AutoConfirm(true)))?;
    match cmd {
        ProjectsSubcommand::List => {
            let projects = state.list_projects()?;
            if projects.is_empty() {
                writeln!(out, "No saved projects")?;
            }
            for p in projects {
                writeln!(
                    out,
                    "{}\t{}\t{} objects",
                    p.name,
                    p.timestamp.format("%Y-%m-%d %H:%M"),
                    p.object_count
                )?;
            }
        }
        ProjectsSubcommand::Export { name, output } => {
            state.load_project(&name)?;
            let count = write_svg(&state.canvas, &state.workspace, &output)
                .with_context(|| format!("exporting '{}'", name))?;
            writeln!(out, "Exported '{}' to {} ({} objects)", name, output.display(), count)?;
        }
        ProjectsSubcommand::Delete { name } => {
            state.delete_project(&name)?;
            writeln!(out, "Deleted '{}'", name)?;
        }
        ProjectsSubcommand::Duplicate { from, to } => {
            let copy = state.duplicate_project(&from, &to)?;
            writeln!(out, "Copied '{}' to '{}'", from, copy.name)?;
        }
    }
    Ok(())
}

fn run_image(cmd: ImageSubcommand, store: SharedStore, out: &mut dyn Write) -> anyhow::Result<()> {
    let ImageSubcommand::Add {
        file,
        project,
        grayscale,
    } = cmd;
    let mut state = open_session(store, Box::new(AutoConfirm(true)))?;
    if state.projects().exists(&project)? {
        state.load_project(&project)?;
    }
    if grayscale {
        state.set_grayscale(true);
    }
    let id = state
        .add_image_file(&file)
        .with_context(|| format!("adding {}", file.display()))?;
    state.save_project(&project)?;
    writeln!(out, "Added image {} to '{}'", id, project)?;
    Ok(())
}

fn run_profiles(cmd: ProfilesSubcommand, store: SharedStore, out: &mut dyn Write) -> anyhow::Result<()> {
    let profiles = ProfileManager::new(store);
    match cmd {
        ProfilesSubcommand::List => {
            let active = profiles.active_key()?;
            let all = profiles.list()?;
            if all.is_empty() {
                writeln!(out, "No machine profiles")?;
            }
            for p in all {
                let marker = if active.as_deref() == Some(p.key.as_str()) { '*' } else { ' ' };
                writeln!(
                    out,
                    "{} {} ({}): {} mm/min, {}%, {} mm, {} pass(es)",
                    marker,
                    p.name,
                    p.key,
                    p.settings.speed,
                    p.settings.power,
                    p.settings.precision,
                    p.settings.passes
                )?;
            }
        }
        ProfilesSubcommand::Save {
            name,
            speed,
            power,
            precision,
            passes,
        } => {
            let settings = LaserSettings {
                speed,
                power,
                precision,
                passes,
            };
            let profile = profiles.save(&name, settings)?;
            writeln!(out, "Saved profile '{}' ({})", profile.name, profile.key)?;
        }
        ProfilesSubcommand::Delete { name } => {
            let removed = profiles.delete(&name)?;
            writeln!(out, "Deleted profile '{}'", removed.name)?;
        }
        ProfilesSubcommand::Activate { name } => {
            let profile = profiles.set_active(&name)?;
            writeln!(out, "Active profile: {}", profile.name)?;
        }
        ProfilesSubcommand::Export { output } => {
            let json = profiles.export_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    writeln!(out, "Exported profiles to {}", path.display())?;
                }
                None => writeln!(out, "{}", json)?,
            }
        }
        ProfilesSubcommand::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let count = profiles.import_json(&json)?;
            writeln!(out, "Imported {} profile(s)", count)?;
        }
    }
    Ok(())
}
