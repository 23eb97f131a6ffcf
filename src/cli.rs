use crate::libflagfinder::question::QuizKind;
use crate::libflagfinder::session::{Answer, Session};
use crate::Error;
use colored::Colorize;
use log::debug;
use std::io::Write;
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::{io, thread};
use text_io::read;

#[derive(Debug, PartialEq)]
enum Choice {
    Option(usize),
    Invalid,
    Quit,
}

impl Choice {
    fn from_str(choices_count: usize, input: &str) -> Choice {
        match input.trim() {
            "q" => Choice::Quit,
            input => match input.parse::<usize>() {
                Ok(num) if (1..=choices_count).contains(&num) => Choice::Option(num - 1),
                _ => Choice::Invalid,
            },
        }
    }
}

/// Stdin lives on its own thread so the answer prompt can be bounded by
/// the countdown: the main loop does a recv_timeout against the timer's
/// remaining time and resolves the question itself when it runs out.
fn spawn_input_thread() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        let line: String = read!("{}\n");
        if tx.send(line).is_err() {
            break;
        }
    });
    rx
}

pub fn cli_loop(mut session: Session) -> Result<(), Error> {
    let input = spawn_input_thread();
    let mut index = 1u32;
    loop {
        render_question(&session, index);
        if !answer_phase(&mut session, &input) {
            break;
        }
        if !advance_phase(&mut session, &input) {
            break;
        }
        index += 1;
    }
    println!(
        "{}",
        format!(
            "Score : {}/{}",
            session.correct_count, session.answered_count
        )
        .cyan()
    );
    Ok(())
}

fn render_question(session: &Session, index: u32) {
    let leading = format!("{}. ", index);
    let indent = " ".repeat(leading.len());
    match session.kind() {
        QuizKind::Flags => {
            println!(
                "{}{} {}",
                leading.cyan(),
                "Quel pays a ce drapeau ?".black().bold().on_white(),
                session.question.correct.flag()
            );
        }
        QuizKind::Scripts => {
            println!(
                "{}{}",
                leading.cyan(),
                "Dans quelle langue est écrite cette phrase ?"
                    .black()
                    .bold()
                    .on_white()
            );
            if let Some(sentence) = &session.question.sentence {
                println!("{}{}", indent, sentence.bold());
            }
        }
    }
    for (i, option) in session.question.options.iter().enumerate() {
        println!("{}{} {}", indent, format!("{}.", i + 1).bold(), option.name);
    }
    if let Some(remaining) = session.timer.remaining() {
        println!("{}", format!("⏱ {} s", remaining.as_secs()).yellow());
    }
}

/// Reads until the question is resolved, by a selection or by the timer.
/// Returns false when the player quits or stdin is gone.
fn answer_phase(session: &mut Session, input: &Receiver<String>) -> bool {
    loop {
        print!(
            "{} ",
            format!(
                "Réponse (1-{}, q pour quitter) :",
                session.question.options.len()
            )
            .cyan()
        );
        let _ = io::stdout().flush();

        let line = if let Some(remaining) = session.timer.remaining() {
            match input.recv_timeout(remaining) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => {
                    if let Answer::TimedOut { correct } = session.time_up() {
                        println!();
                        println!("{}", "Temps écoulé !".yellow());
                        println!(
                            "{}",
                            format!("La bonne réponse était {}.", correct.name).green()
                        );
                    }
                    return true;
                }
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        } else {
            match input.recv() {
                Ok(line) => line,
                Err(_) => return false,
            }
        };

        // Entrée sans réponse donnée : rien ne se passe
        if line.trim().is_empty() {
            continue;
        }

        let choice = Choice::from_str(session.question.options.len(), &line);
        debug!("choice: {:?}", choice);
        match choice {
            Choice::Quit => return false,
            Choice::Invalid => {
                println!("{}", "Entrée invalide.".bright_red());
            }
            Choice::Option(num) => {
                let code = session.question.options[num].code.clone();
                match session.select(&code) {
                    Answer::Correct => println!("{}", "Bonne réponse !".bright_green()),
                    Answer::Incorrect { correct } => {
                        println!("{}", "Mauvaise réponse !".bright_red());
                        println!(
                            "{}",
                            format!("La bonne réponse était {}.", correct.name).green()
                        );
                    }
                    _ => {}
                }
                return true;
            }
        }
    }
}

/// Feedback is on screen; only Enter advances, anything else but `q` is
/// ignored.
fn advance_phase(session: &mut Session, input: &Receiver<String>) -> bool {
    println!(
        "{}",
        "Entrée pour la question suivante, q pour quitter.".cyan()
    );
    loop {
        match input.recv() {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "q" {
                    return false;
                }
                if trimmed.is_empty() && session.handle_enter() {
                    return true;
                }
            }
            Err(_) => return false,
        }
    }
}
