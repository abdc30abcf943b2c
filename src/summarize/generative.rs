//! Generative summarization with a local language model.
//!
//! The model is loaded lazily, at most once per [`GenerativeSummarizer`],
//! on the first summary request. A missing model or runner makes the
//! strategy unavailable; it never fails startup. Each generation runs under
//! a wall-clock timeout and is abandoned (its child process killed) when the
//! timeout fires.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::options::Options;
use crate::patterns::BULLET_LINE;
use crate::query::Query;
use crate::result::{SearchDigest, StrategyUsed, Summary};
use crate::summarize::{GenerationOutcome, Summarizer};
use crate::text;

/// Marker that ends the prompt; the answer follows it.
pub const RESPONSE_MARKER: &str = "Response:";

/// Generated text is cut to this many characters.
pub const MAX_OUTPUT_CHARS: usize = 4000;

/// Key points taken from generated text.
const MAX_KEY_POINTS: usize = 5;
const MIN_POINT_CHARS: usize = 15;
const MAX_POINT_CHARS: usize = 150;

/// Trailers some runners print after the generated text.
const OUTPUT_TRAILERS: &[&str] = &["[end of text]", "<|endoftext|>", "<eos>", "</s>"];

/// Errors from loading or running a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("no model configured")]
    NoModelConfigured,

    #[error("model file not found: {0}")]
    ModelMissing(PathBuf),

    #[error("model runner not found: {0}")]
    RunnerMissing(String),

    #[error("failed to run model: {0}")]
    Io(String),

    #[error("model runner exited with {status}: {stderr}")]
    Runner { status: String, stderr: String },

    #[error("model produced no output")]
    EmptyOutput,
}

/// A loaded model that turns a prompt into text.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError>;
}

/// Locates and prepares a model. Called at most once per summarizer.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Generator>, GenerationError>;
}

/// Loads a GGUF model file for the `llama-cli` runner.
#[derive(Debug, Clone)]
pub struct LlamaCliLoader {
    model_path: Option<PathBuf>,
    runner: String,
}

impl LlamaCliLoader {
    #[must_use]
    pub fn new(model_path: Option<PathBuf>, runner: impl Into<String>) -> Self {
        Self {
            model_path,
            runner: runner.into(),
        }
    }

    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.model_path.clone(), options.model_runner.clone())
    }
}

#[async_trait]
impl ModelLoader for LlamaCliLoader {
    async fn load(&self) -> Result<Arc<dyn Generator>, GenerationError> {
        let model_path = self
            .model_path
            .clone()
            .ok_or(GenerationError::NoModelConfigured)?;
        match tokio::fs::metadata(&model_path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return Err(GenerationError::ModelMissing(model_path)),
        }
        let runner = resolve_executable(&self.runner)
            .ok_or_else(|| GenerationError::RunnerMissing(self.runner.clone()))?;

        info!(model = %model_path.display(), runner = %runner.display(), "local model ready");
        Ok(Arc::new(LlamaCliGenerator { runner, model_path }))
    }
}

/// Find `program` as a path or on `PATH`.
fn resolve_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

/// Runs one generation per call as a `llama-cli` child process.
#[derive(Debug, Clone)]
pub struct LlamaCliGenerator {
    runner: PathBuf,
    model_path: PathBuf,
}

#[async_trait]
impl Generator for LlamaCliGenerator {
    async fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError> {
        let output = Command::new(&self.runner)
            .arg("-m")
            .arg(&self.model_path)
            .arg("-p")
            .arg(prompt)
            .arg("-n")
            .arg(max_tokens.to_string())
            .args(["--temp", "0.7", "--top-p", "0.9", "--no-display-prompt", "-no-cnv"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| GenerationError::Io(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerationError::Runner {
                status: output.status.to_string(),
                stderr: text::truncate_chars(stderr.trim(), 500).to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The generative strategy.
pub struct GenerativeSummarizer {
    loader: Arc<dyn ModelLoader>,
    model: OnceCell<Option<Arc<dyn Generator>>>,
    timeout: Duration,
    max_tokens: usize,
    prompt_piece_cap: usize,
}

impl GenerativeSummarizer {
    #[must_use]
    pub fn new(loader: Arc<dyn ModelLoader>, options: &Options) -> Self {
        Self {
            loader,
            model: OnceCell::new(),
            timeout: options.ai_timeout,
            max_tokens: options.max_generated_tokens,
            prompt_piece_cap: options.prompt_piece_cap,
        }
    }

    /// A summarizer backed by [`LlamaCliLoader`].
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(Arc::new(LlamaCliLoader::from_options(options)), options)
    }

    /// Whether a load has been attempted (successfully or not).
    #[must_use]
    pub fn load_attempted(&self) -> bool {
        self.model.initialized()
    }

    /// The loaded model, loading it on first use. Concurrent first callers
    /// wait on the same load. A failed load is remembered.
    async fn model(&self) -> Option<Arc<dyn Generator>> {
        self.model
            .get_or_init(|| async {
                match self.loader.load().await {
                    Ok(model) => Some(model),
                    Err(e) => {
                        warn!(error = %e, "generative summarizer unavailable");
                        None
                    }
                }
            })
            .await
            .clone()
    }
}

#[async_trait]
impl Summarizer for GenerativeSummarizer {
    async fn summarize(&self, query: &Query, digest: &SearchDigest) -> GenerationOutcome {
        if digest.is_empty() {
            return GenerationOutcome::Failed("nothing to summarize".to_string());
        }
        let Some(model) = self.model().await else {
            return GenerationOutcome::Unavailable;
        };

        let prompt = build_prompt(query, digest, self.prompt_piece_cap);
        debug!(prompt_chars = prompt.len(), timeout = ?self.timeout, "generating summary");

        let raw = match tokio::time::timeout(self.timeout, model.generate(&prompt, self.max_tokens)).await {
            Err(_) => return GenerationOutcome::TimedOut,
            Ok(Err(e)) => return GenerationOutcome::Failed(e.to_string()),
            Ok(Ok(raw)) => raw,
        };

        let answer = post_process(&raw, &prompt);
        if answer.is_empty() {
            return GenerationOutcome::Failed(GenerationError::EmptyOutput.to_string());
        }

        let (narrative, key_points) = split_key_points(&answer);
        GenerationOutcome::Ok(Summary {
            narrative,
            key_points,
            keywords: digest.keywords.clone(),
            strategy_used: StrategyUsed::Generative,
        })
    }
}

/// Instruction, query, up to `piece_cap` numbered source passages, then the
/// response marker.
#[must_use]
pub fn build_prompt(query: &Query, digest: &SearchDigest, piece_cap: usize) -> String {
    let mut prompt = String::from(
        "You are a helpful search assistant. Provide an informative response to the following search query.\n\
         Answer in a short paragraph, then list the key points as lines starting with \"- \".\n",
    );
    prompt.push_str(&format!("\nQuery: {}\n", query.as_str()));

    let mut pieces = digest.pieces().take(piece_cap).peekable();
    if pieces.peek().is_some() {
        prompt.push_str("\nRelevant information from search results:\n");
        for (i, piece) in pieces.enumerate() {
            prompt.push_str(&format!("{}. [{}] {}\n", i + 1, piece.source_host, piece.text));
        }
    }

    prompt.push('\n');
    prompt.push_str(RESPONSE_MARKER);
    prompt.push('\n');
    prompt
}

/// Strip an echoed prompt and runner trailers, keep the text after the last
/// response marker, and cap the length.
#[must_use]
pub fn post_process(raw: &str, prompt: &str) -> String {
    let mut answer = raw.trim_start();
    if let Some(rest) = answer.strip_prefix(prompt.trim_start()) {
        answer = rest;
    }
    if let Some(idx) = answer.rfind(RESPONSE_MARKER) {
        answer = &answer[idx + RESPONSE_MARKER.len()..];
    }

    let mut answer = answer.trim().to_string();
    for trailer in OUTPUT_TRAILERS {
        if let Some(idx) = answer.find(trailer) {
            answer.truncate(idx);
        }
    }
    text::truncate_chars(answer.trim(), MAX_OUTPUT_CHARS)
        .trim_end()
        .to_string()
}

/// Split generated text into narrative and key points.
///
/// Bullet lines become key points and the remaining lines the narrative.
/// Without bullets, the whole text is the narrative and key points are its
/// sentences of 15 to 150 characters.
#[must_use]
pub fn split_key_points(answer: &str) -> (String, Vec<String>) {
    let mut narrative_lines = Vec::new();
    let mut bullets = Vec::new();
    for line in answer.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match BULLET_LINE.captures(line).and_then(|c| c.get(1)) {
            Some(point) => bullets.push(point.as_str().trim().to_string()),
            None => narrative_lines.push(line),
        }
    }

    if bullets.is_empty() {
        let key_points = text::split_sentences(answer)
            .into_iter()
            .filter(|s| (MIN_POINT_CHARS..=MAX_POINT_CHARS).contains(&s.chars().count()))
            .take(MAX_KEY_POINTS)
            .collect();
        return (answer.trim().to_string(), key_points);
    }

    bullets.truncate(MAX_KEY_POINTS);
    let narrative = if narrative_lines.is_empty() {
        bullets.join(" ")
    } else {
        narrative_lines.join(" ")
    };
    (narrative, bullets)
}
