//! The `majorchooser quiz` command.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::Serialize;

use majorchooser_core::affinity::{AffinitySession, MajorAffinity};
use majorchooser_core::model::{Answer, Major};
use majorchooser_core::session::QuizSession;

use super::open_question_store;
use crate::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    answers: Option<String>,
    show_scores: bool,
    format: String,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let (catalog, store) = open_question_store(global)?;
    let mut session = QuizSession::new(&catalog, store.questions());

    match answers {
        Some(list) => {
            let answers = parse_answers(&list)?;
            let (_, total) = session.progress();
            anyhow::ensure!(
                answers.len() == total,
                "expected {total} answers, got {}",
                answers.len()
            );
            for answer in &answers {
                session.answer(*answer)?;
                if show_scores {
                    eprintln!("{}", score_table(session.affinities()));
                }
            }
            print_result(&session, &answers, show_scores, &format)
        }
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            run_interactive(
                &mut session,
                &mut input,
                &mut io::stderr(),
                show_scores,
                |session, answers| print_result(session, answers, show_scores, &format),
            )
        }
    }
}

fn print_result(
    session: &QuizSession,
    answers: &[Answer],
    show_scores: bool,
    format: &str,
) -> Result<()> {
    let recommended = session
        .recommendation()
        .context("the catalog has no majors to recommend")?;

    if format == "json" {
        let outcome = QuizOutcome::new(answers, recommended, session.affinities());
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Major Simulation Result: {}", recommended.major.name);
        println!("{}", recommended.major.college);
        println!("{}", recommended.major.description.academics);
        if show_scores {
            println!("\n{}", ranking_table(session.affinities()));
        }
    }

    Ok(())
}

fn parse_answers(list: &str) -> Result<Vec<Answer>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Answer>().map_err(|e| anyhow::anyhow!(e)))
        .collect()
}

/// One line of interactive input.
#[derive(Debug, PartialEq)]
enum Input {
    Answer(Answer),
    Browse(u32),
    Reset,
    Quit,
    Invalid,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim().to_lowercase();
    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("major" | "m"), Some(id), None) => {
            id.parse().map(Input::Browse).unwrap_or(Input::Invalid)
        }
        (Some("reset"), None, _) => Input::Reset,
        (Some("quit" | "q" | "exit"), None, _) => Input::Quit,
        (Some(word), None, _) => word.parse().map(Input::Answer).unwrap_or(Input::Invalid),
        _ => Input::Invalid,
    }
}

/// Ask every question on `out`, reading answers from `input`.
///
/// `on_finish` receives each completed attempt. Afterwards the user may
/// attempt again; end of input or "no" at that prompt ends the quiz.
fn run_interactive<R, W, F>(
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
    show_scores: bool,
    mut on_finish: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&QuizSession, &[Answer]) -> Result<()>,
{
    let mut answers = Vec::new();
    let mut line = String::new();

    loop {
        if let Some(text) = session.current_question().map(|q| q.text.clone()) {
            let (answered, total) = session.progress();
            write!(out, "({}/{}) {} [yes/no] ", answered + 1, total, text)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                anyhow::bail!("quiz aborted: input ended at question {}", answered + 1);
            }

            match parse_input(&line) {
                Input::Answer(answer) => {
                    session.answer(answer)?;
                    answers.push(answer);
                    if show_scores {
                        writeln!(out, "{}", score_table(session.affinities()))?;
                    }
                }
                Input::Browse(id) => browse(session, id, out)?,
                Input::Reset => {
                    session.reset();
                    answers.clear();
                    writeln!(out, "Starting over.")?;
                }
                Input::Quit => anyhow::bail!("quiz aborted"),
                Input::Invalid => writeln!(
                    out,
                    "Please answer yes or no ('major <id>' to browse, 'reset', 'quit')."
                )?,
            }
            continue;
        }

        on_finish(session, &answers)?;

        // Finished: offer another attempt until a decision is read
        loop {
            write!(out, "Attempt again? [yes/no] ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match parse_input(&line) {
                Input::Answer(Answer::Yes) | Input::Reset => {
                    session.reset();
                    answers.clear();
                    writeln!(out, "Starting over.")?;
                    break;
                }
                Input::Answer(Answer::No) | Input::Quit => return Ok(()),
                Input::Browse(id) => browse(session, id, out)?,
                Input::Invalid => writeln!(
                    out,
                    "Please answer yes or no ('major <id>' to browse)."
                )?,
            }
        }
    }
}

fn browse<W: Write>(session: &mut QuizSession, id: u32, out: &mut W) -> Result<()> {
    match session.select_major(id) {
        Ok(major) => writeln!(out, "{}", describe_major(major))?,
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

/// Full description shown when browsing a major.
pub fn describe_major(major: &Major) -> String {
    format!(
        "Selected Major: {}\n{}\n\nAcademics\n  {}\nExperience\n  {}\nOpportunities\n  {}",
        major.name,
        major.college,
        major.description.academics,
        major.description.experience,
        major.description.opportunities
    )
}

fn score_table(affinities: &AffinitySession) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Major", "Affinity"]);
    for entry in affinities.entries() {
        table.add_row(vec![
            Cell::new(&entry.major.name),
            Cell::new(entry.affinity),
        ]);
    }
    table
}

fn ranking_table(affinities: &AffinitySession) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Rank", "Major", "College", "Affinity"]);
    for (i, entry) in affinities.ranked().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.major.name),
            Cell::new(&entry.major.college),
            Cell::new(entry.affinity),
        ]);
    }
    table
}

#[derive(Debug, Serialize)]
struct QuizOutcome<'a> {
    recommended: &'a Major,
    affinity: f64,
    answers: &'a [Answer],
    scores: Vec<ScoreEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ScoreEntry<'a> {
    id: u32,
    name: &'a str,
    affinity: f64,
}

impl<'a> QuizOutcome<'a> {
    fn new(
        answers: &'a [Answer],
        recommended: &'a MajorAffinity,
        affinities: &'a AffinitySession,
    ) -> Self {
        let scores = affinities
            .entries()
            .iter()
            .map(|e| ScoreEntry {
                id: e.major.id,
                name: &e.major.name,
                affinity: e.affinity,
            })
            .collect();
        Self {
            recommended: &recommended.major,
            affinity: recommended.affinity,
            answers,
            scores,
        }
    }
}
