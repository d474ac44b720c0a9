use anyhow::{Context, Result, bail};
use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::models::QuestionRecord;

/// Where a question set is loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// A JSON file on disk
    File(PathBuf),
    /// A JSON document served over HTTP(S)
    Url(Url),
}

impl QuestionSource {
    /// Interprets a command line argument as a source
    ///
    /// Anything starting with `http://` or `https://` is a URL, everything
    /// else a file path.
    ///
    /// ### Errors
    ///
    /// Returns an error if an `http(s)://` argument is not a valid URL
    pub fn parse(raw: &str) -> Result<Self> {
        let lowered = raw.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            let url = Url::parse(raw).with_context(|| format!("Invalid question set URL {:?}", raw))?;
            Ok(QuestionSource::Url(url))
        } else {
            Ok(QuestionSource::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::File(path) => write!(f, "{}", path.display()),
            QuestionSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Parses a question set from its JSON wire format
pub fn parse_questions(text: &str) -> Result<Vec<QuestionRecord>> {
    serde_json::from_str(text).context("Question set is not a JSON array of questions")
}

/// Loads a question set
///
/// ### Errors
///
/// Returns an error if the file cannot be read, the server cannot be reached
/// or answers with an error status, or the document is not a question set
#[instrument(skip(source), fields(%source))]
pub async fn load_questions(source: &QuestionSource) -> Result<Vec<QuestionRecord>> {
    let text = match source {
        QuestionSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read question set {}", path.display()))?,
        QuestionSource::Url(url) => fetch(url).await?,
    };

    let questions = parse_questions(&text).with_context(|| format!("Failed to load {}", source))?;
    info!("Loaded {} questions", questions.len());
    Ok(questions)
}

async fn fetch(url: &Url) -> Result<String> {
    let response = reqwest::get(url.clone())
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Server error ({}) fetching {}", status.as_u16(), url);
    }

    response
        .text()
        .await
        .with_context(|| format!("Failed to read response from {}", url))
}

/// Writes questions in the wire format, e.g. the missed questions of a run
pub async fn write_questions(path: &Path, questions: &[QuestionRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(questions).context("Failed to serialize questions")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(count = questions.len(), "Wrote questions to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionKind;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"[
        {"question": "Pick B", "options": ["A", "B", "C"], "correctAnswerIndex": 1},
        {"type": "multiple", "question": "Primes", "options": ["2", "4", "5"], "correctAnswerIndices": [0, 2]},
        {"type": "fill_in_blank", "question": "Capital of France?", "correctAnswer": " Paris "}
    ]"#;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            QuestionSource::parse("questions.json").unwrap(),
            QuestionSource::File(PathBuf::from("questions.json"))
        );
        assert!(matches!(
            QuestionSource::parse("https://example.com/quiz.json").unwrap(),
            QuestionSource::Url(url) if url.host_str() == Some("example.com")
        ));
        assert!(matches!(
            QuestionSource::parse("HTTP://example.com/a.json").unwrap(),
            QuestionSource::Url(_)
        ));
        assert!(QuestionSource::parse("http://").is_err());
    }

    #[test]
    fn test_parse_questions() {
        let questions = parse_questions(SAMPLE).unwrap();
        let kinds: Vec<QuestionKind> = questions.iter().map(|q| q.get_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                QuestionKind::SingleChoice,
                QuestionKind::MultipleChoice,
                QuestionKind::FreeText
            ]
        );
    }

    #[test]
    fn test_parse_questions_rejects_object() {
        assert!(parse_questions(r#"{"question": "not a list"}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("quiz.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let questions = load_questions(&QuestionSource::File(path)).await.unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[2].get_correct_text(), Some(" Paris "));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let source = QuestionSource::File(temp_dir.path().join("missing.json"));

        let err = load_questions(&source).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read question set"));
    }

    #[tokio::test]
    async fn test_write_then_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("missed.json");
        let questions = parse_questions(SAMPLE).unwrap();

        write_questions(&path, &questions).await.unwrap();
        let loaded = load_questions(&QuestionSource::File(path)).await.unwrap();
        assert_eq!(loaded, questions);
    }
}
