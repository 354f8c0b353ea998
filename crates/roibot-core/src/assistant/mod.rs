//! Assistant orchestration: runs the knowledge-base pipeline for a prompt and
//! decides between the composed answer, the no-match reply and the external
//! fallback.

pub mod fallback;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::answer::{compose, NO_MATCH_MESSAGE};
use crate::catalog::KnowledgeBase;
use crate::error::{Result, RoiError};
use crate::levers::rank_levers;
use crate::matcher::{MatchKind, ProblemMatcher};
use crate::stories::{find_stories, DEFAULT_STORY_LIMIT};

pub use fallback::{FallbackProvider, GeminiClient};

/// Reply when hybrid mode has no fallback provider
pub const FALLBACK_UNCONFIGURED_MESSAGE: &str = "Web/AI fallback isn’t configured (missing GEMINI_API_KEY). Ask an admin to enable it, or switch to In-house only.";

/// Reply when the fallback provider returns empty text
pub const EMPTY_FALLBACK_MESSAGE: &str = "No response.";

/// Reply body for any internal fault
pub const ERROR_MESSAGE: &str = "Assistant error. Check logs.";

/// Answer mode requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Knowledge base only
    Kb,
    /// Knowledge base, then the external fallback
    #[default]
    Hybrid,
}

impl Mode {
    /// Lenient parse for request bodies: `kb` (any case) selects
    /// knowledge-base only, anything else is hybrid
    pub fn from_request(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "kb" => Mode::Kb,
            _ => Mode::Hybrid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Kb => "kb",
            Mode::Hybrid => "hybrid",
        }
    }
}

impl FromStr for Mode {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kb" => Ok(Mode::Kb),
            "hybrid" => Ok(Mode::Hybrid),
            other => Err(RoiError::invalid_value("mode", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which branch produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnswerPath {
    #[serde(rename = "kb")]
    Kb,
    #[serde(rename = "kb-nohit")]
    KbNoHit,
    #[serde(rename = "fallback-ai")]
    FallbackAi,
    #[serde(rename = "error")]
    Error,
}

impl AnswerPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerPath::Kb => "kb",
            AnswerPath::KbNoHit => "kb-nohit",
            AnswerPath::FallbackAi => "fallback-ai",
            AnswerPath::Error => "error",
        }
    }
}

impl fmt::Display for AnswerPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the problem was identified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    pub kind: MatchKind,
    pub phrase: String,
    pub score: f64,
}

/// Assistant reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub path: AnswerPath,
    /// Effective mode after policy was applied
    pub mode: Mode,
    pub problem: Option<String>,
    #[serde(rename = "match")]
    pub matched: Option<MatchDetail>,
}

/// Answers prompts from a shared knowledge base
pub struct Assistant {
    kb: Arc<KnowledgeBase>,
    allow_external: bool,
    fallback: Option<Box<dyn FallbackProvider>>,
}

impl fmt::Debug for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assistant")
            .field("kb", &self.kb.counts())
            .field("allow_external", &self.allow_external)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl Assistant {
    /// Knowledge-base only assistant; hybrid requests are answered as `kb`
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            kb,
            allow_external: false,
            fallback: None,
        }
    }

    /// Allow hybrid requests to reach the fallback branch
    pub fn allow_external(mut self, allow: bool) -> Self {
        self.allow_external = allow;
        self
    }

    pub fn with_fallback(mut self, provider: Box<dyn FallbackProvider>) -> Self {
        self.fallback = Some(provider);
        self
    }

    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn allows_external(&self) -> bool {
        self.allow_external
    }

    /// Requested mode after policy: without external access every request is `kb`
    pub fn effective_mode(&self, requested: Mode) -> Mode {
        if self.allow_external {
            requested
        } else {
            Mode::Kb
        }
    }

    /// Answer a prompt.
    ///
    /// Only the fallback call can fail; the knowledge-base branches are total.
    pub fn respond(&self, prompt: &str, requested: Mode) -> Result<Reply> {
        let mode = self.effective_mode(requested);
        let matcher = ProblemMatcher::from_kb(&self.kb);
        let found = matcher.find_match(prompt);

        let problem = found.as_ref().map(|m| m.problem);
        let use_cases: &[String] = problem
            .map(|p| self.kb.use_cases_for(p))
            .unwrap_or_default();

        let (levers, stories) = if use_cases.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (
                rank_levers(use_cases, &self.kb.levers),
                find_stories(use_cases, &self.kb.stories, DEFAULT_STORY_LIMIT),
            )
        };

        let matched = found.as_ref().map(|m| MatchDetail {
            kind: m.kind,
            phrase: m.phrase.clone(),
            score: m.score,
        });
        let reply = |text: String, path: AnswerPath| Reply {
            text,
            path,
            mode,
            problem: problem.map(str::to_string),
            matched: matched.clone(),
        };

        if !use_cases.is_empty() || !levers.is_empty() || !stories.is_empty() {
            tracing::debug!(
                problem,
                use_cases = use_cases.len(),
                levers = levers.len(),
                stories = stories.len(),
                "kb_answer"
            );
            return Ok(reply(compose(problem, use_cases, &levers, &stories), AnswerPath::Kb));
        }

        if mode == Mode::Kb {
            tracing::debug!(problem, "kb_no_hit");
            return Ok(reply(NO_MATCH_MESSAGE.to_string(), AnswerPath::KbNoHit));
        }

        let Some(provider) = self.fallback.as_ref() else {
            tracing::warn!("fallback requested but no provider is configured");
            return Ok(reply(
                FALLBACK_UNCONFIGURED_MESSAGE.to_string(),
                AnswerPath::FallbackAi,
            ));
        };

        let text = provider.generate(&fallback_prompt(prompt))?;
        let text = if text.is_empty() {
            EMPTY_FALLBACK_MESSAGE.to_string()
        } else {
            text
        };
        Ok(reply(text, AnswerPath::FallbackAi))
    }
}

/// Prompt sent to the fallback provider
pub fn fallback_prompt(prompt: &str) -> String {
    format!("User question: {prompt}\n\nReturn a concise, plain-text answer.")
}
