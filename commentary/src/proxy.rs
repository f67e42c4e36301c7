use degen_protocol::*;
use reqwest::StatusCode;

use crate::*;

pub const SYSTEM_PROMPT: &str = "You are a sarcastic, degen-style commentator for a Minesweeper game.";
pub const USER_PROMPT: &str = "The player just hit a mine in a meme-themed Minesweeper game. \
    Respond with a sarcastic, degen-style comment under 20 words.";
pub const MAX_TOKENS: u32 = 50;
pub const TEMPERATURE: f32 = 0.7;

const METHOD_NOT_ALLOWED: &str = "Method not allowed";
const FAILED_RESPONSE: &str = "Failed to get AI response";

/// Status and JSON body the proxy endpoint answers with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyReply {
    pub status: u16,
    pub body: ProxyBody,
}

impl ProxyReply {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: ProxyBody::error(message),
        }
    }
}

/// Turns a commentary request into a chat completion call against the upstream model API.
#[derive(Debug)]
pub struct CommentaryProxy {
    config: ProxyConfig,
    http: reqwest::Client,
}

impl CommentaryProxy {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Answers one call to the endpoint. Failures never escape, they become a 4xx/5xx reply.
    pub async fn handle(&self, method: &str, request: Option<CommentaryRequest>) -> ProxyReply {
        if !method.eq_ignore_ascii_case("POST") {
            return ProxyReply::error(405, METHOD_NOT_ALLOWED);
        }

        match self.request_comment(&request.unwrap_or_default()).await {
            Ok(comment) => ProxyReply {
                status: 200,
                body: ProxyBody::comment(comment),
            },
            Err(CommentaryError::MissingApiKey) => {
                log::error!("{} is not set", API_KEY_VAR);
                ProxyReply::error(500, "API key not configured")
            }
            Err(err) => {
                log::error!("Error calling upstream model API: {}", err);
                ProxyReply::error(500, FAILED_RESPONSE)
            }
        }
    }

    /// Asks the upstream model for a comment.
    pub async fn request_comment(&self, request: &CommentaryRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CommentaryError::MissingApiKey)?;

        let response = self
            .http
            .post(&self.config.upstream_url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&self.chat_request(request))
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        log::debug!("Upstream answered {} with {} bytes", status, body.len());

        parse_upstream(status, &body)
    }

    pub fn chat_request(&self, request: &CommentaryRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(user_prompt(request)),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

fn user_prompt(request: &CommentaryRequest) -> String {
    let mut prompt = USER_PROMPT.to_owned();
    match (&request.difficulty, request.elapsed_secs) {
        (Some(difficulty), Some(secs)) => {
            prompt.push_str(&format!(" They lasted {secs} seconds on {difficulty}."));
        }
        (Some(difficulty), None) => prompt.push_str(&format!(" They were playing {difficulty}.")),
        (None, Some(secs)) => prompt.push_str(&format!(" They lasted {secs} seconds.")),
        (None, None) => {}
    }
    prompt
}

/// Turns a non-2xx reply into [`CommentaryError::Status`] carrying whatever message the body holds.
pub(crate) fn check_status(status: u16, body: &[u8]) -> Result<()> {
    if StatusCode::from_u16(status).is_ok_and(|code| code.is_success()) {
        Ok(())
    } else {
        Err(CommentaryError::Status {
            status,
            message: error_message(body),
        })
    }
}

/// Reads the comment out of an upstream answer.
pub fn parse_upstream(status: u16, body: &[u8]) -> Result<String> {
    check_status(status, body)?;
    let chat: ChatResponse = serde_json::from_slice(body)?;
    chat.first_content()
        .map(str::to_owned)
        .ok_or(CommentaryError::Empty)
}

/// Best-effort text of an error body: `{"error": "..."}`, `{"error": {"message": "..."}}`, or the raw text.
pub(crate) fn error_message(body: &[u8]) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    let error = parsed.as_ref().and_then(|value| value.get("error"));
    match error {
        Some(serde_json::Value::String(message)) => message.clone(),
        Some(value) => value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| value.to_string(), str::to_owned),
        None => String::from_utf8_lossy(body).trim().to_owned(),
    }
}
