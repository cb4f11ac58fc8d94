//! LLM 响应解析 - 业务能力层
//!
//! 把 LLM 返回的自由文本解析成 [`EnrichmentFields`]。纯函数，不做任何网络调用。
//!
//! 解析规则：
//! 1. 按行切分，丢弃空行
//! 2. 遇到 `Answer Content:` / `Answer:`（可带序号前缀，忽略大小写）或包含
//!    `solution will involve` 的行，进入评分方案模式，之后所有行都算评分方案
//! 3. 进入该模式之前，含 `": "` 的行按第一个 `": "` 拆成 key / value，
//!    key 的序号前缀（`1. `）去掉，重复 key 以最后一次为准

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::models::{EnrichmentFields, SheetKind};

static ANSWER_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+\.\s*)?(Answer Content|Answer):\s*").expect("评分方案标题正则无效")
});

static ORDINAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("序号正则无效"));

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s\-•*]+").expect("项目符号正则无效"));

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("数字正则无效"));

const SOLUTION_PHRASE: &str = "solution will involve";

/// 解析中间结果：key/value 表 + 评分方案行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialFields {
    pub pairs: HashMap<String, String>,
    pub answer_content: Vec<String>,
}

impl PartialFields {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    /// 合并后的评分方案文本
    pub fn answer_content_text(&self) -> String {
        self.answer_content.join("\n")
    }

    /// 按工作表类型取出需要的字段
    ///
    /// - 找不到的字符串字段为空串，并去掉两端引号
    /// - `Marks` 取原始值中第一段数字，没有则为 `None`
    /// - 主观题取 `Answer`，论述题取 `Answer Content`；key 不存在时用评分方案文本
    pub fn resolve(&self, kind: SheetKind) -> EnrichmentFields {
        let text = |key: &str| strip_quotes(self.get(key).unwrap_or_default());

        let answer_key = match kind {
            SheetKind::Objective => None,
            SheetKind::Subjective => Some("Answer"),
            SheetKind::Descriptive => Some("Answer Content"),
        };
        let answer_content = answer_key.map(|key| match self.get(key) {
            Some(value) => strip_quotes(value),
            None => strip_quotes(&self.answer_content_text()),
        });

        EnrichmentFields {
            category: text("Question Category"),
            cognitive_skill: text("Cognitive Skills"),
            source: text("Question Source"),
            difficulty: text("Level of Difficulty"),
            marks: self.get("Marks").and_then(parse_marks),
            answer_type: text("Answer Type"),
            answer_content,
        }
    }
}

/// 解析 LLM 响应文本
pub fn parse(response: &str) -> PartialFields {
    let mut fields = PartialFields::default();
    let mut in_answer_content = false;

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if ANSWER_HEADER_RE.is_match(line) || line.to_lowercase().contains(SOLUTION_PHRASE) {
            in_answer_content = true;
            let rest = ANSWER_HEADER_RE.replace(line, "");
            let rest = rest.trim();
            if !rest.is_empty() {
                fields.answer_content.push(rest.to_string());
            }
            continue;
        }

        if in_answer_content {
            let clean = BULLET_RE.replace(line, "");
            if !clean.is_empty() {
                fields.answer_content.push(clean.to_string());
            }
        } else if line.contains(": ") {
            let line = ORDINAL_RE.replace(line, "");
            if let Some((key, value)) = line.split_once(": ") {
                fields
                    .pairs
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    fields
}

/// 取分数字段中的第一段数字，超出 `u32` 范围时取最大值
pub fn parse_marks(raw: &str) -> Option<u32> {
    DIGITS_RE
        .find(raw)
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

fn strip_quotes(value: &str) -> String {
    value.trim_matches(|c| c == '"' || c == '\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJECTIVE_RESPONSE: &str = r#"1. Question Category: Multiple Choice Question
2. Cognitive Skills: Remembering

3. Question Source: UpSchool DB
4. Level of Difficulty: "Less"
5. Marks: 1 mark
6. Answer Type: Numbers"#;

    #[test]
    fn test_parse_numbered_pairs() {
        let fields = parse(OBJECTIVE_RESPONSE);
        assert_eq!(fields.get("Question Category"), Some("Multiple Choice Question"));
        assert_eq!(fields.get("Level of Difficulty"), Some("\"Less\""));
        assert!(fields.answer_content.is_empty());

        let resolved = fields.resolve(SheetKind::Objective);
        assert_eq!(resolved.category, "Multiple Choice Question");
        assert_eq!(resolved.cognitive_skill, "Remembering");
        assert_eq!(resolved.source, "UpSchool DB");
        assert_eq!(resolved.difficulty, "Less");
        assert_eq!(resolved.marks, Some(1));
        assert_eq!(resolved.answer_type, "Numbers");
        assert_eq!(resolved.answer_content, None);
    }

    #[test]
    fn test_answer_content_mode() {
        let response = "Question Category: LAT Questions\n\
                        Marks: (3)\n\
                        7. Answer Content: Step 1 - define terms (1 mark)\n\
                        - Step 2: explain process (1 mark)\n\
                        • Step 3: conclusion (1 mark)";
        let fields = parse(response);

        assert_eq!(fields.pairs.len(), 2);
        assert_eq!(
            fields.answer_content,
            vec![
                "Step 1 - define terms (1 mark)",
                "Step 2: explain process (1 mark)",
                "Step 3: conclusion (1 mark)",
            ]
        );

        let resolved = fields.resolve(SheetKind::Descriptive);
        assert_eq!(resolved.marks, Some(3));
        assert_eq!(
            resolved.answer_content.as_deref(),
            Some("Step 1 - define terms (1 mark)\nStep 2: explain process (1 mark)\nStep 3: conclusion (1 mark)")
        );
    }

    #[test]
    fn test_solution_phrase_enters_answer_mode() {
        let response = "Answer Type: Words\nThe solution will involve two steps\nMarks: 2";
        let fields = parse(response);

        assert_eq!(fields.get("Answer Type"), Some("Words"));
        assert!(fields.get("Marks").is_none());
        assert_eq!(
            fields.answer_content,
            vec!["The solution will involve two steps", "Marks: 2"]
        );
        assert_eq!(fields.resolve(SheetKind::Subjective).marks, None);
    }

    #[test]
    fn test_answer_header_case_insensitive_and_empty_rest() {
        let fields = parse("answer:\n* identify blank (1)");
        assert_eq!(fields.answer_content, vec!["identify blank (1)"]);
        assert_eq!(
            fields.resolve(SheetKind::Subjective).answer_content.as_deref(),
            Some("identify blank (1)")
        );
    }

    #[test]
    fn test_last_duplicate_wins() {
        let fields = parse("Marks: 1\nMarks: 4");
        assert_eq!(fields.resolve(SheetKind::Objective).marks, Some(4));
    }

    #[test]
    fn test_unparseable_response_falls_back_to_empty() {
        let resolved = parse("I cannot help with that.").resolve(SheetKind::Descriptive);
        assert_eq!(resolved.category, "");
        assert_eq!(resolved.marks, None);
        assert_eq!(resolved.answer_content.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_marks() {
        assert_eq!(parse_marks("2 marks"), Some(2));
        assert_eq!(parse_marks("Marks (5)"), Some(5));
        assert_eq!(parse_marks("one"), None);
        assert_eq!(parse_marks("Marks: 99999999999999999999"), Some(u32::MAX));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let fields = parse("Question Category: SAT Questions (2 Marks): short");
        assert_eq!(
            fields.get("Question Category"),
            Some("SAT Questions (2 Marks): short")
        );
    }
}
