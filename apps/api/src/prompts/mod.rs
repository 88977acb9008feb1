//! Prompt Template Builder: turns a task kind plus its input fields into a
//! finished `PromptSpec`. Pure and stateless; no I/O happens here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod templates;

use templates::*;

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("Unknown task kind '{0}'")]
    InvalidTaskKind(String),

    #[error("Missing field '{field}' for task kind {kind}")]
    MissingField { kind: TaskKind, field: &'static str },
}

/// The fixed set of operations the service knows how to prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    BugAnalysis,
    PerformanceOptimization,
    CodeGeneration,
    CodeReview,
    TestGeneration,
    DocstringGeneration,
    ReadmeGeneration,
}

impl TaskKind {
    pub const ALL: [TaskKind; 7] = [
        TaskKind::BugAnalysis,
        TaskKind::PerformanceOptimization,
        TaskKind::CodeGeneration,
        TaskKind::CodeReview,
        TaskKind::TestGeneration,
        TaskKind::DocstringGeneration,
        TaskKind::ReadmeGeneration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::BugAnalysis => "bug_analysis",
            TaskKind::PerformanceOptimization => "performance_optimization",
            TaskKind::CodeGeneration => "code_generation",
            TaskKind::CodeReview => "code_review",
            TaskKind::TestGeneration => "test_generation",
            TaskKind::DocstringGeneration => "docstring_generation",
            TaskKind::ReadmeGeneration => "readme_generation",
        }
    }

    /// Input fields substituted into this kind's user template.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            TaskKind::BugAnalysis => &["error_message", "code_snippet"],
            TaskKind::PerformanceOptimization => &["code"],
            TaskKind::CodeGeneration => &["prompt", "language"],
            TaskKind::CodeReview => &["code", "language"],
            TaskKind::TestGeneration => &["code", "framework"],
            TaskKind::DocstringGeneration => &["function_code"],
            TaskKind::ReadmeGeneration => &["project_info"],
        }
    }

    fn system_instruction(self) -> &'static str {
        match self {
            TaskKind::BugAnalysis => BUG_ANALYSIS_SYSTEM,
            TaskKind::PerformanceOptimization => PERFORMANCE_SYSTEM,
            TaskKind::CodeGeneration => CODE_GENERATION_SYSTEM,
            TaskKind::CodeReview => CODE_REVIEW_SYSTEM,
            TaskKind::TestGeneration => TEST_GENERATION_SYSTEM,
            TaskKind::DocstringGeneration => DOCSTRING_SYSTEM,
            TaskKind::ReadmeGeneration => README_SYSTEM,
        }
    }

    fn user_template(self) -> &'static str {
        match self {
            TaskKind::BugAnalysis => BUG_ANALYSIS_TEMPLATE,
            TaskKind::PerformanceOptimization => PERFORMANCE_TEMPLATE,
            TaskKind::CodeGeneration => CODE_GENERATION_TEMPLATE,
            TaskKind::CodeReview => CODE_REVIEW_TEMPLATE,
            TaskKind::TestGeneration => TEST_GENERATION_TEMPLATE,
            TaskKind::DocstringGeneration => DOCSTRING_TEMPLATE,
            TaskKind::ReadmeGeneration => README_TEMPLATE,
        }
    }

    pub fn max_output_tokens(self) -> u32 {
        match self {
            TaskKind::BugAnalysis => 1200,
            TaskKind::PerformanceOptimization => 1500,
            TaskKind::CodeGeneration => 800,
            TaskKind::CodeReview => 1500,
            TaskKind::TestGeneration => 1000,
            TaskKind::DocstringGeneration => 800,
            TaskKind::ReadmeGeneration => 1200,
        }
    }

    pub fn sampling_temperature(self) -> f64 {
        match self {
            TaskKind::BugAnalysis => 0.2,
            TaskKind::ReadmeGeneration => 0.4,
            _ => 0.3,
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PromptError::InvalidTaskKind(s.to_string()))
    }
}

/// Named plain-text inputs for one task. Empty values are legal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRequest {
    fields: BTreeMap<String, String>,
}

impl TaskRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }
}

/// A finished prompt plus the sampling parameters it is sent with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptSpec {
    pub system_instruction: String,
    pub user_content: String,
    pub max_output_tokens: u32,
    pub sampling_temperature: f64,
}

/// Builds the prompt for `kind` from `request`.
///
/// Fails with `MissingField` when `request` lacks one of `kind.fields()`.
/// Extra fields are ignored.
pub fn build(kind: TaskKind, request: &TaskRequest) -> Result<PromptSpec, PromptError> {
    if let Some(field) = kind.fields().iter().copied().find(|f| request.get(f).is_none()) {
        return Err(PromptError::MissingField { kind, field });
    }

    Ok(PromptSpec {
        system_instruction: kind.system_instruction().to_string(),
        user_content: render(kind.user_template(), kind.fields(), request),
        max_output_tokens: kind.max_output_tokens(),
        sampling_temperature: kind.sampling_temperature(),
    })
}

/// [`build`] for a kind given by its wire name, e.g. `"code_review"`.
#[allow(dead_code)]
pub fn build_named(kind: &str, request: &TaskRequest) -> Result<PromptSpec, PromptError> {
    build(kind.parse()?, request)
}

/// Single-pass substitution of `{field}` markers.
///
/// Inserted values are copied verbatim and never scanned again, so a code
/// snippet that happens to contain `{language}` survives untouched.
fn render(template: &str, fields: &[&str], request: &TaskRequest) -> String {
    let extra: usize = request.values().map(str::len).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after
            .find('}')
            .map(|close| (&after[..close], &after[close + 1..]))
            .filter(|(name, _)| fields.contains(name));

        match placeholder {
            Some((name, tail)) => {
                out.push_str(request.get(name).unwrap_or_default());
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
