//! OCR API 客户端
//!
//! 封装 Mathpix PDF 接口：提交文档 → 轮询状态 → 下载 mmd 文本 → 清洗。

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::OcrError;
use crate::models::UploadedDocument;
use crate::utils::poll::poll_until;

/// 文档识别能力
///
/// 请求处理器只依赖这个 trait，测试中可以直接返回固定文本。
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn read_document(&self, document: &UploadedDocument) -> Result<String, OcrError>;
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    pdf_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: Option<String>,
}

/// 清洗 OCR 文本
///
/// 依次删除 `{`、`}`、`\section*`，再把 `$\qquad$` 替换成 `__`（填空占位）。
pub fn clean_ocr_text(raw: &str) -> String {
    raw.replace(['{', '}'], "")
        .replace(r"\section*", "")
        .replace(r"$\qquad$", "__")
}

/// 提交时的转换选项
fn conversion_options() -> serde_json::Value {
    json!({
        "conversion_formats": { "docx": true, "tex.zip": true },
        "math_inline_delimiters": ["$", "$"],
        "rm_spaces": true
    })
}

/// OCR API 客户端
pub struct OcrClient {
    http: Client,
    base_url: String,
    app_id: String,
    app_key: String,
    poll_interval: Duration,
    max_polls: usize,
}

impl OcrClient {
    /// 创建新的 OCR 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.ocr_api_base_url.trim_end_matches('/').to_string(),
            app_id: config.ocr_app_id.clone(),
            app_key: config.ocr_app_key.clone(),
            poll_interval: Duration::from_secs(config.ocr_poll_interval_secs),
            max_polls: config.ocr_max_polls,
        }
    }

    /// 提交文档，返回任务 ID
    async fn submit(&self, document: &UploadedDocument) -> Result<String, OcrError> {
        let submit_failed = |source| OcrError::SubmitFailed {
            file_name: document.file_name.clone(),
            source,
        };

        let mut part = Part::bytes(document.bytes.clone()).file_name(document.file_name.clone());
        if let Some(content_type) = &document.content_type {
            part = part.mime_str(content_type).map_err(submit_failed)?;
        }
        let form = Form::new()
            .text("options_json", conversion_options().to_string())
            .part("file", part);

        let body: serde_json::Value = self
            .http
            .post(format!("{}/v3/pdf", self.base_url))
            .header("app_id", &self.app_id)
            .header("app_key", &self.app_key)
            .multipart(form)
            .send()
            .await
            .map_err(submit_failed)?
            .json()
            .await
            .map_err(submit_failed)?;

        let parsed: SubmitResponse =
            serde_json::from_value(body.clone()).unwrap_or(SubmitResponse { pdf_id: None });
        parsed.pdf_id.ok_or_else(|| OcrError::MissingJobId {
            response: body.to_string(),
        })
    }

    /// 查询一次状态，完成时返回 `Some(())`
    async fn check_status(&self, pdf_id: &str, attempt: usize) -> anyhow::Result<Option<()>> {
        info!("📄 轮询第 {} 次，任务 {}", attempt, pdf_id);
        let status: StatusResponse = self
            .http
            .get(format!("{}/v3/pdf/{}.json", self.base_url, pdf_id))
            .header("app_id", &self.app_id)
            .header("app_key", &self.app_key)
            .send()
            .await
            .context("状态请求失败")?
            .json()
            .await
            .context("状态响应解析失败")?;

        debug!("任务 {} 状态: {:?}", pdf_id, status.status);
        Ok((status.status.as_deref() == Some("completed")).then_some(()))
    }

    /// 下载 mmd 文本
    async fn fetch_text(&self, pdf_id: &str) -> Result<String, OcrError> {
        let fetch_failed = |source| OcrError::FetchFailed {
            pdf_id: pdf_id.to_string(),
            source,
        };

        self.http
            .get(format!("{}/v3/pdf/{}.mmd", self.base_url, pdf_id))
            .header("app_id", &self.app_id)
            .header("app_key", &self.app_key)
            .send()
            .await
            .map_err(fetch_failed)?
            .text()
            .await
            .map_err(fetch_failed)
    }
}

#[async_trait]
impl DocumentReader for OcrClient {
    async fn read_document(&self, document: &UploadedDocument) -> Result<String, OcrError> {
        info!("📤 提交文档到 OCR: {}", document.file_name);
        let pdf_id = self.submit(document).await?;

        let job_id = pdf_id.as_str();
        let completed = poll_until(
            move |attempt| self.check_status(job_id, attempt),
            self.poll_interval,
            self.max_polls,
        )
        .await
        .map_err(|source| OcrError::StatusFailed {
            pdf_id: pdf_id.clone(),
            source,
        })?;

        if completed.is_none() {
            warn!("⚠️ 任务 {} 超过 {} 次轮询仍未完成", pdf_id, self.max_polls);
            return Err(OcrError::Timeout {
                pdf_id,
                attempts: self.max_polls,
            });
        }

        let raw = self.fetch_text(&pdf_id).await?;
        info!("✓ 文档 {} 识别完成，{} 字符", document.file_name, raw.len());
        Ok(clean_ocr_text(&raw))
    }
}
