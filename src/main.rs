use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use log::{debug, warn};
use std::path::PathBuf;
use thiserror::Error;

mod libflagfinder;

cfg_if::cfg_if! {
    if #[cfg(feature = "gui")] {
        mod gui;
    } else {
        mod cli;
    }
}

use crate::libflagfinder::dataset;
use crate::libflagfinder::db;
use crate::libflagfinder::question::QuizKind;
use crate::libflagfinder::session::Session;
use crate::libflagfinder::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "FlagFinder")]
#[command(version, about, long_about = None)]
struct Args {
    /// Mode de jeu.
    #[arg(value_enum, default_value_t = QuizKind::Flags)]
    quiz: QuizKind,
    #[arg(short, long, value_name = "FILE", default_value = "parametres.db")]
    settings: Option<PathBuf>,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("le jeu de données est vide !")]
    EmptyDataset,
    #[error("jeu de données invalide : {0}")]
    Dataset(#[from] serde_json::Error),
    #[error(transparent)]
    Db(#[from] rusqlite::Error),
    #[cfg(feature = "gui")]
    #[error(transparent)]
    Gui(#[from] eframe::Error),
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let settings_path = args.settings.unwrap_or(PathBuf::from("parametres.db"));
    let conn = db::create_or_open(&settings_path)?;
    debug!("[DB] Database Connection Successful!");

    // preferences are read once at startup, the quiz itself never writes
    let settings = Settings::load(&conn)?;
    db::close_db(conn)?;
    debug!("[Setup] Settings: {:?}", settings);

    let entries = match args.quiz {
        QuizKind::Flags => dataset::flag_entries()?,
        QuizKind::Scripts => dataset::script_entries()?,
    };
    debug!("[Setup] Loaded {} entries.", entries.len());

    let session = match Session::new(entries, args.quiz, &settings) {
        Some(session) => session,
        None => {
            warn!("[Setup] No entries found.");
            println!("{}", "Le jeu de données est vide !".yellow());
            return Err(Error::EmptyDataset);
        }
    };

    cfg_if::cfg_if! {
        if #[cfg(feature = "gui")] {
            gui::run(session, &settings)
        } else {
            cli::cli_loop(session)
        }
    }
}
