use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 上传参数错误（用户错误，400）
    #[error("上传错误: {0}")]
    Upload(#[from] UploadError),
    /// OCR 服务错误（500）
    #[error("OCR错误: {0}")]
    Ocr(#[from] OcrError),
    /// 工作簿生成错误
    #[error("工作簿错误: {0}")]
    Workbook(#[source] anyhow::Error),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 上传参数错误
#[derive(Debug, Error)]
pub enum UploadError {
    /// 缺少某个文件字段
    #[error("缺少上传字段: {field}")]
    MissingField { field: &'static str },
    /// 文件名为空
    #[error("上传字段 {field} 的文件名为空")]
    EmptyFileName { field: &'static str },
    /// multipart 读取失败
    #[error("multipart 解析失败: {0}")]
    Multipart(String),
}

/// OCR 服务错误
#[derive(Debug, Error)]
pub enum OcrError {
    /// 提交文档失败
    #[error("提交文档失败 ({file_name}): {source}")]
    SubmitFailed {
        file_name: String,
        #[source]
        source: reqwest::Error,
    },
    /// 提交响应中没有任务 ID
    #[error("OCR 响应中缺少 pdf_id: {response}")]
    MissingJobId { response: String },
    /// 轮询状态失败
    #[error("查询任务状态失败 ({pdf_id}): {source}")]
    StatusFailed {
        pdf_id: String,
        #[source]
        source: anyhow::Error,
    },
    /// 轮询次数用完仍未完成
    #[error("任务 {pdf_id} 在 {attempts} 次轮询后仍未完成")]
    Timeout { pdf_id: String, attempts: usize },
    /// 下载识别结果失败
    #[error("下载识别结果失败 ({pdf_id}): {source}")]
    FetchFailed {
        pdf_id: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 缺少上传字段
    pub fn missing_field(field: &'static str) -> Self {
        AppError::Upload(UploadError::MissingField { field })
    }

    /// 上传文件名为空
    pub fn empty_file_name(field: &'static str) -> Self {
        AppError::Upload(UploadError::EmptyFileName { field })
    }

    /// 工作簿生成失败
    pub fn workbook(source: anyhow::Error) -> Self {
        AppError::Workbook(source)
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回给调用方的简短说明
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Upload(UploadError::MissingField { .. }) => "Missing files",
            AppError::Upload(UploadError::EmptyFileName { .. }) => "No selected file",
            AppError::Upload(UploadError::Multipart(_)) => "Invalid upload",
            AppError::Ocr(_) => "Failed to process files with Mathpix",
            AppError::Workbook(_) => "Failed to generate workbook",
            AppError::Other(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
