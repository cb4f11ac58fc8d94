//! 单次上传处理器 - 编排层
//!
//! 一次请求的完整流程（严格顺序执行）：
//! 1. OCR 识别试卷、答案
//! 2. 切分 + 分类 + 标记正确选项
//! 3. 写出中间工作簿（请求独占的临时目录）
//! 4. 逐行 LLM 补全
//! 5. 生成最终工作簿字节

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::clients::DocumentReader;
use crate::error::{AppError, AppResult};
use crate::models::{QuestionSets, UploadedDocument, WorkbookStage};
use crate::services::{workbook_writer, ChatBackend};
use crate::utils::logging::{log_classified, log_request_start};
use crate::workflow::{classify_documents, EnrichFlow};

/// 中间工作簿文件名
pub const INTERMEDIATE_FILE_NAME: &str = "intermediate_output.xlsx";

/// 单次上传处理器
///
/// 不持有任何跨请求的可变状态，每个请求自己的临时文件在返回前清理。
pub struct RequestProcessor {
    reader: Arc<dyn DocumentReader>,
    enrich_flow: EnrichFlow,
}

impl RequestProcessor {
    pub fn new(
        reader: Arc<dyn DocumentReader>,
        backend: Arc<dyn ChatBackend>,
        verbose_logging: bool,
    ) -> Self {
        Self {
            reader,
            enrich_flow: EnrichFlow::new(backend, verbose_logging),
        }
    }

    /// 处理一对上传文档
    ///
    /// # 返回
    /// 最终工作簿的 xlsx 字节；任一文档 OCR 失败则整个请求失败
    pub async fn process(
        &self,
        question_paper: &UploadedDocument,
        answer_sheet: &UploadedDocument,
    ) -> AppResult<Vec<u8>> {
        log_request_start(&question_paper.file_name, &answer_sheet.file_name);

        info!("📄 正在识别试卷...");
        let question_text = self.reader.read_document(question_paper).await?;
        info!("📄 正在识别答案...");
        let answer_text = self.reader.read_document(answer_sheet).await?;

        let mut sets = classify_documents(&question_text, &answer_text);
        log_classified(
            sets.objective.len(),
            sets.subjective.len(),
            sets.descriptive.len(),
        );

        let workdir = tempfile::tempdir().context("无法创建临时目录")?;
        let intermediate_path = workdir.path().join(INTERMEDIATE_FILE_NAME);
        workbook_writer::save_to_path(&sets.to_tables(WorkbookStage::Intermediate), &intermediate_path)
            .map_err(AppError::workbook)?;
        info!("✓ 中间工作簿已生成: {}", intermediate_path.display());

        let stats = self.enrich_flow.run(&mut sets).await;
        info!(
            "✓ LLM 补全完成: 成功 {}，失败 {}，跳过 {}",
            stats.enriched, stats.failed, stats.skipped
        );

        let bytes = render_final(&sets)?;
        info!("📤 最终工作簿 {} 字节，发送给调用方", bytes.len());
        Ok(bytes)
    }
}

/// 生成最终工作簿
pub fn render_final(sets: &QuestionSets) -> AppResult<Vec<u8>> {
    workbook_writer::render_to_bytes(&sets.to_tables(WorkbookStage::Final)).map_err(AppError::workbook)
}
