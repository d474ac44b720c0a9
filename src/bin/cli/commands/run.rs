use anyhow::{Context, Result};
use clap::Args;
use quizmaster::config::Config;
use quizmaster::models::{AdvanceOutcome, QuestionKind, Session};
use quizmaster::source::{self, QuestionSource};
use quizmaster::{QuizError, QuizResult, quiz};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info};

use crate::input::{self, Input};
use crate::output::{self, OutputConfig};

type InputLines = Lines<BufReader<Stdin>>;

/// Arguments of the `run` command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Question set: a JSON file path or an http(s) URL
    pub source: String,

    /// Write the missed questions of the last round to this file
    #[arg(long)]
    pub missed_out: Option<PathBuf>,

    /// Start another round over the missed questions until none are left
    #[arg(long)]
    pub retry_missed: bool,

    /// How many times to play the whole question set
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,
}

/// How a round of play ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundEnd {
    Completed,
    Quit,
}

/// What the loop should do after handling one line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Redraw,
    Stay,
    Quit,
}

/// Plays a quiz on the terminal
pub async fn execute(args: RunArgs, config: &Config, output_config: &OutputConfig) -> Result<()> {
    let source = QuestionSource::parse(&args.source)?;
    let questions = source::load_questions(&source).await?;

    // Every round draws its own generator from this one, so a seed fixes the whole run
    let mut rng = config.session_rng();
    let mut session = quiz::start_with_rng(&questions, config.shuffle_questions, StdRng::from_rng(&mut rng))
        .with_context(|| format!("Cannot start a quiz from {}", source))?;
    quiz::set_shuffle_options_enabled(&mut session, config.shuffle_options);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    output::print_help();
    let mut full_round = 1;

    loop {
        let end = play_round(&mut session, &mut lines, config).await?;
        let report = quiz::score(&session);
        output::print_score_report(&session, &report, output_config);

        if let Some(path) = &args.missed_out {
            source::write_questions(path, &report.missed_questions).await?;
        }

        if end == RoundEnd::Quit {
            return Ok(());
        }

        if args.retry_missed && !report.missed_positions.is_empty() {
            info!("Retrying {} missed questions", report.missed_positions.len());
            session = quiz::restart_filtered(session, report.missed_positions, config.shuffle_questions)?;
            output::print_notice("Another round with the questions you missed");
        } else if full_round < args.rounds {
            full_round += 1;
            info!(round = full_round, "Restarting the whole question set");
            let shuffle_options = session.is_shuffle_options_enabled();
            session = quiz::start_with_rng(&questions, config.shuffle_questions, StdRng::from_rng(&mut rng))?;
            quiz::set_shuffle_options_enabled(&mut session, shuffle_options);
            output::print_notice(&format!("Round {} of {}", full_round, args.rounds));
        } else {
            return Ok(());
        }
    }
}

/// Reads input until the session is complete, the player quits or stdin closes
async fn play_round(session: &mut Session, lines: &mut InputLines, config: &Config) -> Result<RoundEnd> {
    let mut redraw = true;

    while !session.is_complete() {
        let position = session.get_current_index();
        if redraw {
            show_question(session, position)?;
            redraw = false;
        }

        // A pending auto-advance races the next line; whichever comes first wins
        let line = match quiz::pending_auto_advance(session).copied() {
            Some(pending) => tokio::select! {
                _ = tokio::time::sleep_until(pending.due_at.into()) => {
                    if let Some(outcome) = quiz::fire_auto_advance(session, pending.ticket)? {
                        redraw = matches!(outcome, AdvanceOutcome::MovedTo(_));
                    }
                    continue;
                }
                line = lines.next_line() => line?,
            },
            None => lines.next_line().await?,
        };

        let Some(line) = line else {
            debug!("Input closed");
            return Ok(RoundEnd::Quit);
        };

        let Some(question) = session.current_question() else {
            break;
        };
        let kind = question.get_kind();
        let option_count = question.get_options().len();

        let parsed = match input::parse_input(&line, kind, option_count) {
            Ok(parsed) => parsed,
            Err(message) => {
                output::print_notice(&message);
                continue;
            }
        };

        match apply_input(session, position, kind, parsed, config) {
            Ok(Step::Quit) => return Ok(RoundEnd::Quit),
            Ok(step) => redraw = step == Step::Redraw,
            Err(err) => output::print_notice(&describe(&err)),
        }
    }

    Ok(RoundEnd::Completed)
}

/// Prints the question, plus its feedback if it is already locked
fn show_question(session: &mut Session, position: usize) -> QuizResult<()> {
    let map = quiz::get_or_create_shuffle_map(session, position)?;
    output::print_question(session, position, &map);
    if session.is_evaluated(position) {
        output::print_evaluation(&quiz::evaluate(session, position)?);
    }
    Ok(())
}

fn apply_input(
    session: &mut Session,
    position: usize,
    kind: QuestionKind,
    input: Input,
    config: &Config,
) -> QuizResult<Step> {
    match input {
        Input::Pick(option) => {
            let result = quiz::record_choice(session, position, option)?;
            output::print_evaluation(&result);
            quiz::schedule_auto_advance(session, config.auto_advance_delay());
            Ok(Step::Stay)
        }
        Input::Toggle(options) => {
            let mut selection = Default::default();
            for option in options {
                selection = quiz::toggle_choice(session, position, option)?;
            }
            output::print_selection(&selection);
            Ok(Step::Stay)
        }
        Input::Text(text) => {
            // Enter submits a typed answer
            quiz::record_text(session, position, &text)?;
            output::print_evaluation(&quiz::evaluate(session, position)?);
            Ok(Step::Stay)
        }
        Input::Next => next(session, position, kind, config),
        Input::Prev => {
            quiz::go_back(session);
            Ok(Step::Redraw)
        }
        Input::Shuffle => {
            let enabled = !session.is_shuffle_options_enabled();
            quiz::set_shuffle_options_enabled(session, enabled);
            output::print_notice(if enabled {
                "Option shuffling on"
            } else {
                "Option shuffling off"
            });
            Ok(Step::Redraw)
        }
        Input::Help => {
            output::print_help();
            Ok(Step::Stay)
        }
        Input::Quit => Ok(Step::Quit),
    }
}

/// Submits an unlocked multiple-choice or free-text question, otherwise moves on
///
/// Submitting shows the feedback first; multiple choice then moves on by
/// itself after the auto-advance delay, free text on the next `next`.
fn next(session: &mut Session, position: usize, kind: QuestionKind, config: &Config) -> QuizResult<Step> {
    if !session.is_evaluated(position) && kind != QuestionKind::SingleChoice {
        let result = quiz::evaluate(session, position)?;
        output::print_evaluation(&result);
        if kind == QuestionKind::MultipleChoice {
            quiz::schedule_auto_advance(session, config.auto_advance_delay());
        }
        return Ok(Step::Stay);
    }

    match quiz::advance(session)? {
        AdvanceOutcome::MovedTo(_) => Ok(Step::Redraw),
        AdvanceOutcome::Blocked(reason) => {
            output::print_notice(&format!("Cannot continue: {}", reason));
            Ok(Step::Stay)
        }
        AdvanceOutcome::QuizComplete => Ok(Step::Stay),
    }
}

/// Phrases an engine rejection for the player
fn describe(err: &QuizError) -> String {
    match err {
        QuizError::NoAnswerSelected { .. } => "Select at least one option first".to_string(),
        QuizError::InvalidQuestionState { .. } => {
            "This question is already answered; press Enter to continue".to_string()
        }
        other => other.to_string(),
    }
}
