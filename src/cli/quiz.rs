//! `profilometer-lab quiz` - score an answer file
//!
//! Answer files are JSON objects mapping the zero-based question index to
//! the chosen option text, e.g. `{"0": "A diamond", "2": "..."}`.

use anyhow::{Context, Result};
use profilometer_core::{score, standard_key, AnswerMap, QuizAnswerKey, QuizScore};
use std::path::{Path, PathBuf};

#[derive(clap::Args, Debug)]
pub struct QuizArgs {
    /// JSON file with the chosen answers
    #[arg(long, short = 'a')]
    pub answers: PathBuf,

    /// Custom answer key (JSON array of questions); defaults to the standard quiz
    #[arg(long, short = 'k')]
    pub key: Option<PathBuf>,

    /// Print the score as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the quiz command
pub fn run(args: QuizArgs) -> Result<()> {
    let key = match &args.key {
        Some(path) => load_key(path)?,
        None => standard_key().clone(),
    };
    let answers = load_answers(&args.answers)?;
    let result = score(&answers, &key);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_score(&result, &key));
    }
    Ok(())
}

/// Read an answer map from `path`
pub fn load_answers(path: &Path) -> Result<AnswerMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid answer file {}", path.display()))
}

/// Read and validate a custom answer key from `path`
pub fn load_key(path: &Path) -> Result<QuizAnswerKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answer key from {}", path.display()))?;
    QuizAnswerKey::from_json(&content)
        .with_context(|| format!("Invalid answer key {}", path.display()))
}

/// Per-question marks followed by the summary line
pub fn render_score(result: &QuizScore, key: &QuizAnswerKey) -> String {
    let mut lines = Vec::with_capacity(result.total + 1);
    for (i, (outcome, question)) in result
        .per_question
        .iter()
        .zip(key.questions())
        .enumerate()
    {
        let mark = match (outcome.answered, outcome.correct) {
            (false, _) => "-",
            (true, true) => "✓",
            (true, false) => "✗",
        };
        lines.push(format!("{} {}. {}", mark, i + 1, question.question));
        if outcome.answered && !outcome.correct {
            lines.push(format!("     correct answer: {}", question.correct_answer));
        }
    }
    lines.push(format!(
        "Score: {}/{} ({}%), {} answered",
        result.correct_count, result.total, result.percentage, result.answered_count
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_answer_file_scored_against_standard_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("answers.json");
        let key = standard_key();
        let answers = serde_json::json!({
            "0": key.questions()[0].correct_answer,
            "1": key.questions()[1].correct_answer,
            "3": "not an option",
        });
        std::fs::write(&path, answers.to_string()).unwrap();

        let loaded = load_answers(&path).unwrap();
        let result = score(&loaded, key);
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.answered_count, 3);
        assert_eq!(result.total, 5);
        assert_eq!(result.percentage, 40);
    }

    #[test]
    fn test_custom_key_is_validated() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("key.json");
        std::fs::write(
            &good,
            r#"[{"question": "Ra is", "options": ["mean", "peak"], "correctAnswer": "mean"}]"#,
        )
        .unwrap();
        assert_eq!(load_key(&good).unwrap().len(), 1);

        let bad = dir.path().join("bad.json");
        std::fs::write(
            &bad,
            r#"[{"question": "Ra is", "options": ["mean"], "correctAnswer": "median"}]"#,
        )
        .unwrap();
        assert!(load_key(&bad).is_err());
    }

    #[test]
    fn test_render_unanswered_question() {
        let key = standard_key();
        let text = render_score(&score(&AnswerMap::new(), key), key);
        assert_eq!(text.lines().count(), 6);
        assert!(text.lines().all(|l| !l.contains("correct answer")));
        assert!(text.starts_with("- 1."));
        assert!(text.ends_with("Score: 0/5 (0%), 0 answered\n"));
    }

    #[test]
    fn test_render_marks_each_question() {
        let key = standard_key();
        let mut answers = AnswerMap::new();
        answers.set(0, key.questions()[0].correct_answer.clone());
        answers.set(1, "definitely wrong");

        let text = render_score(&score(&answers, key), key);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("✓ 1."));
        assert!(lines[1].starts_with("✗ 2."));
        assert!(lines[2].contains("correct answer:"));
        assert!(text.ends_with("Score: 1/5 (20%), 2 answered\n"));
    }
}
