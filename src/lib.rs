//! # Question Sheet
//!
//! 把试卷 PDF 和答案 PDF 转换成题库导入用的 Excel 工作簿的 HTTP 服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 与外部服务通信，只暴露能力
//! - `OcrClient` - 提交文档、轮询状态、下载 Markdown 文本
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个能力只处理一份输入
//! - `segmenter` - 按题号切分文本
//! - `classifier` / `answer_key` - 分类题目、标记正确选项
//! - `prompt_builder` / `LlmService` / `enrichment_parser` - LLM 补全字段
//! - `workbook_writer` - 写出三张表的工作簿
//!
//! ### ③ 流程层（Workflow）
//! - `classify_flow` - 两份文本 → 三类题目集合
//! - `enrich_flow` - 逐行调用 LLM 补全，失败的行保留原值
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用生命周期，HTTP 服务
//! - `orchestrator/routes` - 路由与上传校验
//! - `orchestrator/request_processor` - 单次上传的完整流程

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{DocumentReader, OcrClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ClassifiedQuestion, QuestionSets, SheetKind, UploadedDocument, WorkbookStage};
pub use orchestrator::{App, RequestProcessor};
pub use services::{ChatBackend, ChatRequest, LlmService};
pub use workflow::{classify_documents, EnrichFlow};
