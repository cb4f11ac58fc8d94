//! 答案键解析 - 业务能力层
//!
//! 从客观题的答案解析文本中找出正确选项字母，并标记对应选项。
//! 只取第一个匹配；解析文本里更早出现的无关括号字母会导致误判。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ObjectiveQuestion;

static ANSWER_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[(\s]([a-d])[).\s]").expect("答案字母正则无效"));

/// 提取正确选项字母（小写）
///
/// # 参数
/// - `explanation`: 答案解析文本
///
/// # 返回
/// 字母前必须是 `(` 或空白，后面是 `)`、`.` 或空白；找不到返回 `None`
pub fn extract_correct_letter(explanation: &str) -> Option<char> {
    ANSWER_LETTER_RE
        .captures(explanation)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_lowercase())
}

/// 根据解析文本标记客观题的正确选项
///
/// 正确选项的分值等于题目分数，其余选项为 0 分。
pub fn mark_correct_answer(question: &mut ObjectiveQuestion) -> Option<char> {
    let letter = extract_correct_letter(&question.explanation);
    let marks = question.meta.marks.unwrap_or(0);

    for slot in question.options.iter_mut() {
        let is_correct = match (&slot.content, letter) {
            (Some(content), Some(letter)) => content.trim().starts_with(&format!("{})", letter)),
            _ => false,
        };
        slot.correct = is_correct;
        slot.weightage = if is_correct { marks } else { 0 };
    }

    letter
}
