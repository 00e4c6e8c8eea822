//! The `quizbank take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizbank_core::model::OptionIndex;
use quizbank_core::report::ExamReport;
use quizbank_core::session::{select_questions, ExamOutcome, ExamSession};

use super::preface::print_preface;

const HELP: &str = "Commands: 1-4 answer, n next, p previous, s star/unstar, \
                    g <number> go to question, l list starred, f finish, h help";

pub async fn execute(
    bank: String,
    max_questions: Option<String>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let limit = super::question_limit(max_questions.as_deref(), &config)?;
    let loaded = super::load_bank(&bank, &config).await?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let questions = select_questions(&loaded.questions, limit, &mut rng);
    anyhow::ensure!(!questions.is_empty(), "no questions selected from '{bank}'");

    let session = ExamSession::new(questions);
    print_preface(&loaded.name, &session.preface());
    println!("\n{HELP}\n");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run_exam(session, stdin.lock(), stdout.lock())?;

    println!();
    super::print_summary(&outcome.score);

    if let Some(dir) = output {
        let report = ExamReport::from_outcome(&loaded.name, &outcome);
        let path = dir.join(format!("exam-{}.json", report.id));
        report.save_json(&path)?;
        println!("\nReport saved to: {}", path.display());
    }

    Ok(())
}

/// Drive a session from line-based input until the learner finishes or the
/// input ends. Finishing needs the last question answered; closing the input
/// ends the attempt wherever it stands.
fn run_exam<R: BufRead, W: Write>(
    mut session: ExamSession,
    input: R,
    mut out: W,
) -> Result<ExamOutcome> {
    let mut lines = input.lines();

    loop {
        render_question(&session, &mut out)?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out, "\nInput closed, finishing exam.")?;
            break;
        };
        let line = line?;
        let command = line.trim();

        let result = match command {
            "f" | "finish" => match session.can_finish() {
                Ok(()) => break,
                Err(e) => Err(e),
            },
            "n" | "next" => session.next().map(|_| ()),
            "p" | "prev" | "previous" => session.previous().map(|_| ()),
            "s" | "star" => {
                let starred = session.toggle_star();
                writeln!(
                    out,
                    "{} question {}",
                    if starred { "Starred" } else { "Unstarred" },
                    session.position() + 1
                )?;
                Ok(())
            }
            "l" | "starred" => {
                let starred = session.starred();
                if starred.is_empty() {
                    writeln!(out, "No starred questions.")?;
                } else {
                    let numbers: Vec<String> =
                        starred.iter().map(|p| (p + 1).to_string()).collect();
                    writeln!(out, "Starred: {}", numbers.join(", "))?;
                }
                Ok(())
            }
            "h" | "help" | "?" => {
                writeln!(out, "{HELP}")?;
                Ok(())
            }
            "" => Ok(()),
            other => {
                if let Some(target) = other.strip_prefix('g').map(str::trim) {
                    match target.parse::<usize>() {
                        Ok(number) if number >= 1 => session.jump_to(number - 1),
                        _ => {
                            writeln!(out, "Usage: g <question number>")?;
                            Ok(())
                        }
                    }
                } else if let Ok(option) = other.parse::<OptionIndex>() {
                    session.select_answer(option)
                } else {
                    writeln!(out, "Unknown command '{other}'. {HELP}")?;
                    Ok(())
                }
            }
        };

        if let Err(e) = result {
            writeln!(out, "  {e}")?;
        }
    }

    Ok(session.finish())
}

fn render_question<W: Write>(session: &ExamSession, out: &mut W) -> io::Result<()> {
    let Some(question) = session.current() else {
        return Ok(());
    };
    let position = session.position();
    let star = if session.is_starred(position) { " *" } else { "" };

    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} ({:.0}%){star}",
        position + 1,
        session.len(),
        session.progress_percent()
    )?;
    if !question.topic.is_empty() {
        if question.subtopic.is_empty() {
            writeln!(out, "[{}]", question.topic)?;
        } else {
            writeln!(out, "[{} / {}]", question.topic, question.subtopic)?;
        }
    }
    writeln!(out, "{}", question.text)?;

    let selected = session.current_answer();
    for (index, text) in question.options() {
        let marker = if selected == Some(index) { ">" } else { " " };
        writeln!(out, " {marker} {index}) {text}")?;
    }
    if session.is_last() {
        writeln!(out, "(last question, enter f to finish)")?;
    }
    Ok(())
}
