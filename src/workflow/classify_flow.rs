//! 分类流程 - 流程层
//!
//! 一对文档（试卷 + 答案）的完整分类流程：
//! 切分 → 按编号配对答案 → 分类 → 标记客观题正确选项

use tracing::debug;

use crate::models::{ClassifiedQuestion, QuestionSets};
use crate::services::{answer_key, classifier, segmenter};
use crate::utils::truncate_text;

/// 对一对 OCR 文本分类
///
/// # 参数
/// - `question_text`: 试卷文本
/// - `answer_text`: 答案文本
///
/// # 返回
/// 按题型分好的三组题目，组内保持原题顺序。没有对应答案的题目解析为空串。
pub fn classify_documents(question_text: &str, answer_text: &str) -> QuestionSets {
    let questions = segmenter::segment(question_text);
    let answers = segmenter::answer_lookup(&segmenter::segment(answer_text));

    debug!("试卷切分出 {} 个单元，答案 {} 个", questions.len(), answers.len());

    let mut sets = QuestionSets::default();
    for unit in &questions {
        let explanation = answers.get(&unit.number).map(String::as_str).unwrap_or("");
        let mut question = classifier::classify(unit, explanation);

        if let ClassifiedQuestion::Objective(objective) = &mut question {
            let letter = answer_key::mark_correct_answer(objective);
            debug!(
                "{} 正确选项: {:?} | {}",
                objective.meta.label,
                letter,
                truncate_text(&objective.explanation, 40)
            );
        }

        sets.push(question);
    }

    sets
}
