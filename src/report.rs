//! Formatting of collected answers.
//!
//! Pure functions — (answers, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::types::OutputFormat;

/// A typed value obtained from one prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Int(i64),
    Float(f64),
}

/// One prompt and what the user answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// The prompt text, without the trailing ": ".
    pub prompt: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(prompt: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            prompt: prompt.into(),
            value,
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Text(s) => write!(f, "{}", s),
            AnswerValue::Int(i) => write!(f, "{}", i),
            AnswerValue::Float(x) => write!(f, "{}", x),
        }
    }
}

/// Format a single answer the way it is echoed interactively.
pub fn format_echo(answer: &Answer) -> String {
    format!("Input: {}\n", answer.value)
}

/// Format all answers for output.
pub fn format_answers(answers: &[Answer], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => answers.iter().map(format_echo).collect(),
        OutputFormat::Json => format_json(answers),
    }
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct AnswerDocument<'a> {
    answers: &'a [Answer],
}

fn format_json(answers: &[Answer]) -> String {
    // Non-finite floats have no JSON form; serde_json writes them as null.
    let mut out = serde_json::to_string_pretty(&AnswerDocument { answers })
        .unwrap_or_else(|e| format!("{{\"error\": {:?}}}", e.to_string()));
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answers() -> Vec<Answer> {
        vec![
            Answer::new("Menu", AnswerValue::Text("b".into())),
            Answer::new("Integer input", AnswerValue::Int(-7)),
            Answer::new("Float input", AnswerValue::Float(3.5)),
        ]
    }

    // --- Human format tests ---

    #[test]
    fn echo_prefixes_input() {
        let answer = Answer::new("String input", AnswerValue::Text("hello".into()));
        assert_eq!(format_echo(&answer), "Input: hello\n");
    }

    #[test]
    fn human_format_echoes_each_answer() {
        let output = format_answers(&sample_answers(), OutputFormat::Human);
        assert_eq!(output, "Input: b\nInput: -7\nInput: 3.5\n");
    }

    #[test]
    fn human_format_empty() {
        assert_eq!(format_answers(&[], OutputFormat::Human), "");
    }

    // --- JSON format tests ---

    #[test]
    fn json_format_is_valid_json() {
        let output = format_answers(&sample_answers(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("Invalid JSON");
        assert!(parsed["answers"].is_array());
    }

    #[test]
    fn json_format_keeps_value_types() {
        let output = format_answers(&sample_answers(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let answers = parsed["answers"].as_array().unwrap();

        assert_eq!(answers[0]["prompt"], "Menu");
        assert_eq!(answers[0]["value"], "b");
        assert_eq!(answers[1]["value"], -7);
        assert_eq!(answers[2]["value"], 3.5);
    }

    #[test]
    fn json_format_nan_becomes_null() {
        let answers = vec![Answer::new("f", AnswerValue::Float(f64::NAN))];
        let output = format_answers(&answers, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["answers"][0]["value"].is_null());
    }

    #[test]
    fn json_format_empty() {
        let output = format_answers(&[], OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["answers"].as_array().unwrap().len(), 0);
    }
}
