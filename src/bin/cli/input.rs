use quizmaster::models::QuestionKind;

/// One line typed during a quiz, interpreted against the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Pick one option of a single-choice question (0-based)
    Pick(usize),
    /// Toggle options of a multiple-choice question (0-based)
    Toggle(Vec<usize>),
    /// Typed answer to a free-text question, verbatim
    Text(String),
    Next,
    Prev,
    Shuffle,
    Help,
    Quit,
}

/// Parses a line of input
///
/// An empty line means `next`. Commands (`n`, `p`, `s`, `h`, `q` and their
/// long forms) may be written with a leading `/` on every question, and bare
/// on choice questions. On a free-text question any other line is the
/// answer, verbatim; on choice questions it is a list of 1-based option
/// numbers.
///
/// ### Arguments
///
/// * `line` - The line as read, without its newline
/// * `kind` - The kind of the question on screen
/// * `option_count` - How many options the question shows
///
/// ### Errors
///
/// Returns a message for the user when the line is not valid for the question
pub fn parse_input(line: &str, kind: QuestionKind, option_count: usize) -> Result<Input, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Next);
    }
    if let Some(command) = trimmed.strip_prefix('/').and_then(parse_command) {
        return Ok(command);
    }

    if kind == QuestionKind::FreeText {
        return Ok(Input::Text(line.to_string()));
    }
    if let Some(command) = parse_command(trimmed) {
        return Ok(command);
    }

    if option_count == 0 {
        return Err("This question has no options, press Enter to continue".to_string());
    }

    let picks = parse_option_numbers(trimmed, option_count)?;
    if picks.is_empty() {
        return Err("Type an option number or 'h' for help".to_string());
    }
    match kind {
        QuestionKind::SingleChoice => match picks.as_slice() {
            [pick] => Ok(Input::Pick(*pick)),
            _ => Err("Pick exactly one option".to_string()),
        },
        _ => Ok(Input::Toggle(picks)),
    }
}

fn parse_command(word: &str) -> Option<Input> {
    match word.to_lowercase().as_str() {
        "n" | "next" => Some(Input::Next),
        "p" | "prev" | "back" => Some(Input::Prev),
        "s" | "shuffle" => Some(Input::Shuffle),
        "h" | "help" | "?" => Some(Input::Help),
        "q" | "quit" | "exit" => Some(Input::Quit),
        _ => None,
    }
}

/// Parses whitespace or comma separated 1-based option numbers into 0-based indices
fn parse_option_numbers(text: &str, option_count: usize) -> Result<Vec<usize>, String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<usize>() {
            Ok(number) if (1..=option_count).contains(&number) => Ok(number - 1),
            Ok(_) => Err(format!("Option {} does not exist, pick 1-{}", part, option_count)),
            Err(_) => Err(format!(
                "Unrecognised input {:?}, type an option number or 'h' for help",
                part
            )),
        })
        .collect()
}
