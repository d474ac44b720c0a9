use anyhow::Result;
use clap::Args;
use quizmaster::source::{self, QuestionSource};

use crate::output::{self, OutputConfig};

/// Arguments of the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Question set: a JSON file path or an http(s) URL
    pub source: String,
}

/// Lists the questions of a question set with their resolved kind
pub async fn execute(args: InspectArgs, config: &OutputConfig) -> Result<()> {
    let source = QuestionSource::parse(&args.source)?;
    let questions = source::load_questions(&source).await?;
    output::print_inspection(&questions, config);
    Ok(())
}
