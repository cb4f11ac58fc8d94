//! HTTP 路由
//!
//! - `GET /`：存活检查
//! - `POST /upload`：上传试卷 + 答案，返回最终工作簿

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::error::{AppError, AppResult, UploadError};
use crate::models::UploadedDocument;
use crate::orchestrator::request_processor::RequestProcessor;

/// 试卷字段名
pub const QUESTION_FIELD: &str = "questionPaper";
/// 答案字段名
pub const ANSWER_FIELD: &str = "answerSheet";
/// 返回的文件名
pub const OUTPUT_FILE_NAME: &str = "final_output.xlsx";
/// 存活检查返回的文本
pub const HEALTH_MESSAGE: &str = " Backend is up and working!";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<RequestProcessor>,
}

/// 构建路由
pub fn routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 存活检查
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// 上传处理
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> AppResult<Response> {
    let mut question_paper = None;
    let mut answer_sheet = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let slot = match field.name() {
            Some(QUESTION_FIELD) => &mut question_paper,
            Some(ANSWER_FIELD) => &mut answer_sheet,
            _ => continue,
        };
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;
        *slot = Some(UploadedDocument::new(file_name, content_type, bytes.to_vec()));
    }

    let (question_paper, answer_sheet) =
        validate_upload(question_paper, answer_sheet).inspect_err(|e| warn!("⚠️ 上传参数无效: {}", e))?;

    let bytes = state.processor.process(&question_paper, &answer_sheet).await?;
    Ok(xlsx_response(bytes))
}

/// 检查两个文件都已上传且文件名非空
pub fn validate_upload(
    question_paper: Option<UploadedDocument>,
    answer_sheet: Option<UploadedDocument>,
) -> AppResult<(UploadedDocument, UploadedDocument)> {
    let question_paper = question_paper.ok_or_else(|| AppError::missing_field(QUESTION_FIELD))?;
    let answer_sheet = answer_sheet.ok_or_else(|| AppError::missing_field(ANSWER_FIELD))?;

    if question_paper.file_name.is_empty() {
        return Err(AppError::empty_file_name(QUESTION_FIELD));
    }
    if answer_sheet.file_name.is_empty() {
        return Err(AppError::empty_file_name(ANSWER_FIELD));
    }

    Ok((question_paper, answer_sheet))
}

fn xlsx_response(bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME);
    (
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
