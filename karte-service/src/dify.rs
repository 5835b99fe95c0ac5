//! Client for the Dify-compatible chat-messages endpoint.
//!
//! The wizard never fails on a bad generation: every failure mode maps to a
//! fixed displayable string, and the caller only ever sees a `String`.

use std::time::Duration;

use karte_flow::TreatmentInfo;
use reqwest::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};

use crate::config::{AppConfig, PLACEHOLDER_API_KEY};

/// Proposal returned in demo mode (no API credential configured)
pub const DEMO_PROPOSAL: &str = "（デモ）お客様の髪質は柔らかめですので、今のトリートメントを継続することで美しい色味を長く楽しめます。次回は少し早めのメンテナンスがおすすめです！";

/// Shown when the API answers with a non-200 status
pub const GENERATION_FAILED_FALLBACK: &str = "（AI提案文の生成に失敗しました。手動で入力してください。）";

/// Shown when the request itself fails (connect, timeout, bad JSON)
pub const GENERATION_ERROR_FALLBACK: &str = "（エラーが発生しました。申し訳ありません。）";

const GENERATION_TIMEOUT: Duration = Duration::from_secs(90);

/// Failure modes of one generation request.
///
/// Exhaustive: every variant has a fixed fallback string, so the
/// "always returns displayable text" contract holds by construction.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation API returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GenerationError {
    /// Placeholder text shown in place of a proposal.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            GenerationError::Status { .. } => GENERATION_FAILED_FALLBACK,
            GenerationError::Transport(_) => GENERATION_ERROR_FALLBACK,
        }
    }
}

/// Blocking-mode client for proposal generation
pub struct GenerationClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl GenerationClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.dify_api_key.clone(),
            api_url: config.dify_api_url.clone(),
        }
    }

    fn demo_mode(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }

    /// Produce a proposal for the given treatment.
    ///
    /// Always returns a displayable string; API failures degrade to the
    /// fixed fallback texts and are logged server-side.
    pub async fn propose(&self, info: &TreatmentInfo) -> String {
        if self.demo_mode() {
            info!("no generation API key configured, returning demo proposal");
            return DEMO_PROPOSAL.to_string();
        }

        match self.request_proposal(info).await {
            Ok(answer) => answer,
            Err(err) => {
                error!(error = %err, "proposal generation failed");
                err.fallback_text().to_string()
            }
        }
    }

    async fn request_proposal(&self, info: &TreatmentInfo) -> Result<String, GenerationError> {
        let body = json!({
            "inputs": {},
            "query": build_prompt(info),
            "response_mode": "blocking",
            "user": "app-user",
            "files": [],
        });

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(GENERATION_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let payload: Value = response.json().await?;
        Ok(payload
            .get("answer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

/// Build the generation prompt from the treatment details.
fn build_prompt(info: &TreatmentInfo) -> String {
    format!(
        "以下の施術情報を元に、お客様へのおすすめヘアケア法やスタイリング剤等の提案文を50文字〜100文字程度で作成してください。\n\n【施術情報】\n・利用したサービス: {}\n・リクエストしたスタイル: {}\n・特殊技術: {}\n・髪のタイプ: {}",
        info.services_display(),
        info.style,
        info.tech,
        info.hair_type
    )
}
