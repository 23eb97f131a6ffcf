use colored::Colorize;
use env_logger::Env;
use log::error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rusqlite::{Connection, Result};

mod libflagfinder;

use crate::libflagfinder::db;
use crate::libflagfinder::db::Setting;
use crate::libflagfinder::settings::{Settings, Theme};

#[derive(Parser, Debug)]
#[command(name = "Paramètres (FlagFinder)")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "info")]
    log_level: String,
    #[arg(short, long, value_name = "FILE", default_value = "parametres.db")]
    settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Affiche les préférences enregistrées.
    Show,
    /// Active ou désactive le minuteur et règle sa durée.
    Timer {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long, value_name = "SECONDES")]
        duration: Option<u32>,
    },
    /// Choisit le thème de l'interface.
    Theme {
        #[arg(value_enum)]
        theme: Theme,
    },
    /// Réinitialise toutes les préférences.
    Reset,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let path = args.settings.unwrap_or(PathBuf::from("parametres.db"));
    let conn = match db::create_or_open(&path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("{}{}", "Impossible d'ouvrir les préférences : ".red(), err);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Show => show(&conn),
        Commands::Timer { enabled, duration } => set_timer(&conn, enabled, duration),
        Commands::Theme { theme } => set_theme(&conn, theme),
        Commands::Reset => reset(&conn),
    };

    if let Err(err) = result {
        error!("{}{}", "Erreur : ".red(), err);
        db::close_db(conn).unwrap();
        std::process::exit(1);
    }
    db::close_db(conn).unwrap()
}

fn show(conn: &Connection) -> Result<()> {
    let settings = Settings::load(conn)?;
    println!("{}", "Paramètres".cyan().bold());
    println!(
        "├ Minuteur : {}",
        if settings.timer_enabled {
            "activé".green()
        } else {
            "désactivé".yellow()
        }
    );
    println!("├ Durée : {} s", settings.timer_duration);
    println!("└ Thème : {}", settings.theme);
    if Setting::get_all(conn)?.is_empty() {
        println!("{}", "(valeurs par défaut, rien d'enregistré)".dimmed());
    }
    Ok(())
}

fn set_timer(conn: &Connection, enabled: Option<bool>, duration: Option<u32>) -> Result<()> {
    if enabled.is_none() && duration.is_none() {
        println!(
            "{}",
            "Rien à modifier (utilisez --enabled et/ou --duration).".yellow()
        );
        return Ok(());
    }
    if let Some(enabled) = enabled {
        Settings::store_timer_enabled(conn, enabled)?;
        println!(
            "{}",
            format!(
                "Minuteur {}.",
                if enabled { "activé" } else { "désactivé" }
            )
            .green()
        );
    }
    if let Some(duration) = duration {
        Settings::store_timer_duration(conn, duration)?;
        println!("{}", format!("Durée du minuteur : {} s.", duration).green());
    }
    Ok(())
}

fn set_theme(conn: &Connection, theme: Theme) -> Result<()> {
    Settings::store_theme(conn, theme)?;
    println!("{}", format!("Thème : {}.", theme).green());
    Ok(())
}

fn reset(conn: &Connection) -> Result<()> {
    Settings::reset(conn)?;
    println!("{}", "Préférences réinitialisées.".green());
    Ok(())
}
