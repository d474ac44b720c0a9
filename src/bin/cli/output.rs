use chrono::{DateTime, Utc};
use clap::ValueEnum;
use quizmaster::models::{
    Answer, CorrectDisplay, EvaluationResult, QuestionKind, QuestionRecord, ScoreReport, Session,
    ShuffleMap,
};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just counts)
    pub quiet: bool,
}

/// The end-of-round summary as written in JSON mode
#[derive(Serialize)]
struct RoundSummary<'a> {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a ScoreReport,
}

/// One row of the `inspect` listing
#[derive(Serialize)]
struct InspectRow<'a> {
    position: usize,
    kind: QuestionKind,
    scorable: bool,
    prompt: &'a str,
    options: &'a [String],
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("Error: failed to serialize output: {}", err),
    }
}

/// Prints the interactive commands
pub fn print_help() {
    println!("Type an option number to answer (several for multiple choice, e.g. \"1 3\"),");
    println!("or type your answer for free-text questions.");
    println!("Commands: n/next (or Enter), p/prev, s/shuffle options, h/help, q/quit");
    println!("On free-text questions write commands with a leading '/', e.g. /q");
}

/// Prints a one-line message to the player
pub fn print_notice(message: &str) {
    println!("! {}", message);
}

/// Prints the question at `position` with its options in presented order
pub fn print_question(session: &Session, position: usize, map: &ShuffleMap) {
    let Some(question) = session.question(position) else {
        return;
    };

    println!();
    println!(
        "Question {}/{} ({})",
        position + 1,
        session.len(),
        question.get_kind()
    );
    println!("{}", question.get_prompt());
    if let Some(image) = question.get_image() {
        println!("Image: {}", image);
    }

    let answer = session.answer(position);
    for (index, text) in map.get_shuffled_options().iter().enumerate() {
        let selected = answer.is_some_and(|answer| answer.selects(index));
        let marker = match (question.get_kind(), selected) {
            (QuestionKind::MultipleChoice, true) => "[x]",
            (QuestionKind::MultipleChoice, false) => "[ ]",
            (_, true) => "(*)",
            (_, false) => "( )",
        };
        println!("  {} {}) {}", marker, index + 1, text);
    }

    if let Some(Answer::Text(text)) = answer {
        println!("Your answer: {}", text);
    }
}

/// Prints the outcome of evaluating a question
pub fn print_evaluation(result: &EvaluationResult) {
    if !result.scorable {
        println!("Answer recorded (this question is not auto-graded)");
        return;
    }

    let verdict = if result.correct { "Correct!" } else { "Incorrect." };
    match &result.correct_display {
        CorrectDisplay::Option { position, text } => {
            println!("{} Correct answer: {}) {}", verdict, position + 1, text);
        }
        CorrectDisplay::Options { positions } => {
            println!("{} Correct answers: {}", verdict, one_based(positions.iter().copied()));
        }
        CorrectDisplay::Text { text } => {
            println!("{} Correct answer: {}", verdict, text.trim());
        }
        CorrectDisplay::Unavailable => println!("{}", verdict),
    }
}

/// Prints the current multiple-choice selection
pub fn print_selection(selection: &BTreeSet<usize>) {
    if selection.is_empty() {
        println!("Nothing selected");
    } else {
        println!("Selected: {}", one_based(selection.iter().copied()));
    }
}

fn one_based(indices: impl Iterator<Item = usize>) -> String {
    indices
        .map(|index| (index + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints the score report of a finished round
pub fn print_score_report(session: &Session, report: &ScoreReport, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}/{}", report.correct_count, report.total);
                return;
            }
            println!();
            println!(
                "Score: {}/{} ({}%)",
                report.correct_count, report.total, report.accuracy_percent
            );
            if report.is_perfect() {
                println!("Perfect run!");
                return;
            }
            println!("Missed:");
            for (question, original) in report.missed_questions.iter().zip(&report.missed_positions) {
                println!("  #{} {}", original + 1, question.get_prompt());
            }
        }
        OutputFormat::Json => {
            print_json(&RoundSummary {
                session_id: session.get_id(),
                started_at: session.get_started_at(),
                report,
            });
        }
    }
}

/// Prints the questions of a question set with their resolved kind
pub fn print_inspection(questions: &[QuestionRecord], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", questions.len());
                return;
            }
            if questions.is_empty() {
                println!("No questions found.");
                return;
            }
            println!("{:<4}  {:<15}  {:<8}  PROMPT", "#", "KIND", "SCORABLE");
            for (position, question) in questions.iter().enumerate() {
                println!(
                    "{:<4}  {:<15}  {:<8}  {}",
                    position + 1,
                    question.get_kind().to_string(),
                    if question.is_scorable() { "yes" } else { "no" },
                    question.get_prompt()
                );
            }
        }
        OutputFormat::Json => {
            let rows: Vec<InspectRow<'_>> = questions
                .iter()
                .enumerate()
                .map(|(position, question)| InspectRow {
                    position,
                    kind: question.get_kind(),
                    scorable: question.is_scorable(),
                    prompt: question.get_prompt(),
                    options: question.get_options(),
                })
                .collect();
            print_json(&rows);
        }
    }
}
