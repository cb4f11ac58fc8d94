//! 补全流程 - 流程层
//!
//! 逐表、逐行调用 LLM 补全元数据。
//!
//! 单行失败（调用出错或响应无法使用）只记录日志，该行保留默认值并留在表中，
//! 继续处理下一行；任何一行失败都不会中断整批。

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::vocabulary::{is_known_category, CognitiveSkill};
use crate::models::{
    DescriptiveQuestion, EnrichmentFields, ObjectiveQuestion, QuestionSets, SheetKind,
    SubjectiveQuestion,
};
use crate::services::{enrichment_parser, prompt_builder, ChatBackend};
use crate::utils::logging::log_sheet_complete;
use crate::utils::truncate_text;

/// 可被补全的一行
pub trait EnrichableRow {
    fn label(&self) -> &str;
    fn question_text(&self) -> &str;
    fn apply_enrichment(&mut self, fields: &EnrichmentFields);
}

impl EnrichableRow for ObjectiveQuestion {
    fn label(&self) -> &str {
        &self.meta.label
    }

    fn question_text(&self) -> &str {
        &self.stem
    }

    fn apply_enrichment(&mut self, fields: &EnrichmentFields) {
        self.meta.apply(fields);
    }
}

impl EnrichableRow for SubjectiveQuestion {
    fn label(&self) -> &str {
        &self.meta.label
    }

    fn question_text(&self) -> &str {
        &self.stem
    }

    fn apply_enrichment(&mut self, fields: &EnrichmentFields) {
        self.meta.apply(fields);
        self.answer = fields.answer_content.clone().unwrap_or_default();
    }
}

impl EnrichableRow for DescriptiveQuestion {
    fn label(&self) -> &str {
        &self.meta.label
    }

    fn question_text(&self) -> &str {
        &self.stem
    }

    fn apply_enrichment(&mut self, fields: &EnrichmentFields) {
        self.meta.apply(fields);
        self.answer_content = fields.answer_content.clone().unwrap_or_default();
    }
}

/// 单张工作表的补全统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichStats {
    pub enriched: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl EnrichStats {
    fn merge(&mut self, other: EnrichStats) {
        self.enriched += other.enriched;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// 补全流程
///
/// - 严格顺序执行，一次只有一个 LLM 请求
/// - 不持有任何题目数据
pub struct EnrichFlow {
    backend: Arc<dyn ChatBackend>,
    verbose_logging: bool,
}

impl EnrichFlow {
    /// 创建新的补全流程
    pub fn new(backend: Arc<dyn ChatBackend>, verbose_logging: bool) -> Self {
        Self {
            backend,
            verbose_logging,
        }
    }

    /// 补全全部三张表（顺序：Objective, Subjective, Descriptive）
    pub async fn run(&self, sets: &mut QuestionSets) -> EnrichStats {
        let mut total = EnrichStats::default();
        total.merge(self.enrich_sheet(SheetKind::Objective, &mut sets.objective).await);
        total.merge(self.enrich_sheet(SheetKind::Subjective, &mut sets.subjective).await);
        total.merge(self.enrich_sheet(SheetKind::Descriptive, &mut sets.descriptive).await);
        total
    }

    /// 补全一张表
    pub async fn enrich_sheet<R: EnrichableRow>(&self, kind: SheetKind, rows: &mut [R]) -> EnrichStats {
        let mut stats = EnrichStats::default();
        info!("🤖 开始补全工作表 {}，共 {} 行", kind, rows.len());

        for row in rows.iter_mut() {
            let question = row.question_text().trim().to_string();
            if question.is_empty() {
                stats.skipped += 1;
                continue;
            }

            match self.fetch_fields(kind, &question).await {
                Ok(fields) => {
                    self.check_vocabulary(row.label(), &fields);
                    row.apply_enrichment(&fields);
                    stats.enriched += 1;
                }
                Err(e) => {
                    warn!("[{} {}] ⚠️ 补全失败，保留默认值: {}", kind, row.label(), e);
                    stats.failed += 1;
                }
            }
        }

        log_sheet_complete(kind, stats.enriched, stats.failed, rows.len());
        stats
    }

    /// 调用 LLM 并解析单行结果
    async fn fetch_fields(&self, kind: SheetKind, question: &str) -> Result<EnrichmentFields> {
        let request = prompt_builder::build_request(kind, question);
        let response = self.backend.complete(&request).await?;

        if self.verbose_logging {
            info!("LLM 响应 ({}): {}", kind, truncate_text(&response, 200));
        }

        Ok(enrichment_parser::parse(&response).resolve(kind))
    }

    fn check_vocabulary(&self, label: &str, fields: &EnrichmentFields) {
        if !fields.category.is_empty() && !is_known_category(&fields.category) {
            debug!("[{}] 分类不在词表中: {}", label, fields.category);
        }
        if !fields.cognitive_skill.is_empty()
            && CognitiveSkill::parse(&fields.cognitive_skill).is_none()
        {
            debug!("[{}] 认知技能不在词表中: {}", label, fields.cognitive_skill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ChatRequest;
    use crate::workflow::classify_documents;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 按顺序返回预设响应的后端，`Err` 项模拟调用失败
    struct ScriptedBackend {
        responses: Mutex<Vec<Result<String, String>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<&str, &str>>) -> Self {
            let mut responses: Vec<_> = responses
                .into_iter()
                .map(|r| r.map(str::to_string).map_err(str::to_string))
                .collect();
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, request: &ChatRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            match self.responses.lock().unwrap().pop() {
                Some(Ok(text)) => Ok(text),
                Some(Err(msg)) => Err(anyhow::anyhow!(msg)),
                None => Err(anyhow::anyhow!("no scripted response")),
            }
        }
    }

    #[tokio::test]
    async fn test_failed_row_keeps_defaults_and_order() {
        let mut sets = classify_documents("1) Explain A.\n2) Explain B.\n3) Explain C.", "");
        let backend = Arc::new(ScriptedBackend::new(vec![
            Ok("Question Category: LAT Questions\nMarks: 5\nAnswer Content: define (2), apply (3)"),
            Err("timeout"),
            Ok("Question Category: Describe Questions\nLevel of Difficulty: High"),
        ]));
        let flow = EnrichFlow::new(backend.clone(), false);

        let stats = flow.run(&mut sets).await;

        assert_eq!(stats, EnrichStats { enriched: 2, failed: 1, skipped: 0 });
        let labels: Vec<_> = sets.descriptive.iter().map(|q| q.meta.label.as_str()).collect();
        assert_eq!(labels, vec!["Q1", "Q2", "Q3"]);

        assert_eq!(sets.descriptive[0].meta.category, "LAT Questions");
        assert_eq!(sets.descriptive[0].meta.marks, Some(5));
        assert_eq!(sets.descriptive[0].answer_content, "define (2), apply (3)");

        assert_eq!(sets.descriptive[1].meta.category, "");
        assert_eq!(sets.descriptive[1].meta.marks, Some(1));

        assert_eq!(sets.descriptive[2].meta.difficulty, "High");
        assert_eq!(sets.descriptive[2].meta.marks, None);

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].user_message.ends_with("Question Content: 1) Explain A."));
    }

    #[tokio::test]
    async fn test_subjective_answer_from_marking_scheme() {
        let mut sets = classify_documents("1) Water boils at ____ °C.", "1) 100");
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(
            "1. Question Category: Fill in the Blanks\n2. Cognitive Skills: Remembering\n6. Answer Type: Numbers\n7. Answer Content: 100 degrees (1 mark)",
        )]));

        EnrichFlow::new(backend, false).run(&mut sets).await;

        let row = &sets.subjective[0];
        assert_eq!(row.meta.category, "Fill in the Blanks");
        assert_eq!(row.meta.answer_type, "Numbers");
        assert_eq!(row.answer, "100 degrees (1 mark)");
        assert_eq!(row.explanation, "1) 100");
    }

    #[tokio::test]
    async fn test_sheets_processed_in_order() {
        let questions = "1) Q\na) 1\nb) 2\nc) 3\nd) 4\n2) The ___ sat.\n3) Describe it.";
        let mut sets = classify_documents(questions, "");
        let backend = Arc::new(ScriptedBackend::new(vec![Ok("a: b"), Ok("a: b"), Ok("a: b")]));

        EnrichFlow::new(backend.clone(), false).run(&mut sets).await;

        let requests = backend.requests.lock().unwrap();
        let tokens: Vec<_> = requests.iter().map(|r| r.max_tokens).collect();
        assert_eq!(tokens, vec![150, 1500, 300]);
    }

    #[tokio::test]
    async fn test_blank_question_is_skipped() {
        let mut rows = vec![SubjectiveQuestion {
            number: 1,
            meta: crate::models::QuestionMeta::new(1),
            stem: "   ".to_string(),
            answer: String::new(),
            answer_display: "yes".to_string(),
            weightage: 1,
            placeholder: String::new(),
            explanation: String::new(),
        }];
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let flow = EnrichFlow::new(backend.clone(), false);

        let stats = flow.enrich_sheet(SheetKind::Subjective, &mut rows).await;

        assert_eq!(stats.skipped, 1);
        assert!(backend.requests.lock().unwrap().is_empty());
    }
}
