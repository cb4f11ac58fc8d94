//! 题目分类 - 业务能力层
//!
//! 只负责把一个题目单元归入三种题型之一：
//! 1. 恰好 4 个字母选项（`a) ...` / `B. ...`）→ 客观题
//! 2. 去掉选项后含有 2 个以上连续下划线 → 主观题（填空）
//! 3. 其他 → 论述题
//!
//! 选项数不是 4 的题目不会丢失，按 2/3 继续判断。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    ClassifiedQuestion, DescriptiveQuestion, ObjectiveQuestion, OptionSlot, QuestionMeta,
    SubjectiveQuestion, TextUnit,
};

static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-dA-D][).] [^\n]+").expect("选项正则无效"));

static BLANK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").expect("填空正则无效"));

/// 客观题要求的选项数
pub const OBJECTIVE_OPTION_COUNT: usize = 4;

/// 提取文本中所有选项片段（按出现顺序）
pub fn find_options(text: &str) -> Vec<&str> {
    OPTION_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// 去掉所有选项片段后的题干
pub fn strip_options(text: &str) -> String {
    OPTION_RE.replace_all(text, "").trim().to_string()
}

/// 是否含填空标记
pub fn has_blank(text: &str) -> bool {
    BLANK_RE.is_match(text)
}

/// 对单个题目单元分类
///
/// # 参数
/// - `unit`: 题目单元
/// - `explanation`: 同编号的答案文本，没有时为空串
pub fn classify(unit: &TextUnit, explanation: &str) -> ClassifiedQuestion {
    let options = find_options(&unit.text);
    let stem = strip_options(&unit.text);
    let meta = QuestionMeta::new(unit.number);

    if options.len() == OBJECTIVE_OPTION_COUNT {
        let slot = |i: usize| OptionSlot::new(options.get(i).map(|s| s.to_string()));
        return ClassifiedQuestion::Objective(ObjectiveQuestion {
            number: unit.number,
            meta,
            stem,
            options: [slot(0), slot(1), slot(2), slot(3)],
            explanation: explanation.to_string(),
        });
    }

    if has_blank(&stem) {
        return ClassifiedQuestion::Subjective(SubjectiveQuestion {
            number: unit.number,
            meta,
            stem: unit.text.trim().to_string(),
            answer: String::new(),
            answer_display: "yes".to_string(),
            weightage: 1,
            placeholder: String::new(),
            explanation: explanation.to_string(),
        });
    }

    let explanation = explanation.trim().to_string();
    ClassifiedQuestion::Descriptive(DescriptiveQuestion {
        number: unit.number,
        meta,
        stem: unit.text.replace('\n', " ").trim().to_string(),
        display_answer: explanation.clone(),
        answer_weightage: String::new(),
        answer_content: String::new(),
        explanation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(text: &str) -> TextUnit {
        TextUnit::new(1, text)
    }

    #[test]
    fn test_four_options_is_objective() {
        let q = classify(&unit("1) What is 2+2?\na) 3\nb) 4\nc) 5\nd) 6"), "");
        let ClassifiedQuestion::Objective(q) = q else {
            panic!("应为客观题");
        };
        assert_eq!(q.stem, "1) What is 2+2?");
        let contents: Vec<_> = q.options.iter().map(|o| o.content.as_deref()).collect();
        assert_eq!(
            contents,
            vec![Some("a) 3"), Some("b) 4"), Some("c) 5"), Some("d) 6")]
        );
        assert!(q.options.iter().all(|o| !o.correct && o.weightage == 0));
        assert_eq!(q.meta.marks, Some(1));
    }

    #[test]
    fn test_mixed_case_and_period_options() {
        let q = classify(&unit("2) Pick one\nA. red\nB. green\nc) blue\nD) black"), "");
        assert!(matches!(q, ClassifiedQuestion::Objective(_)));
    }

    #[test]
    fn test_blank_marker_is_subjective() {
        let q = classify(&unit("2) Water boils at ____ °C."), "2) 100");
        let ClassifiedQuestion::Subjective(q) = q else {
            panic!("应为主观题");
        };
        assert_eq!(q.stem, "2) Water boils at ____ °C.");
        assert_eq!(q.explanation, "2) 100");
        assert_eq!(q.answer_display, "yes");
        assert_eq!(q.weightage, 1);
    }

    #[test]
    fn test_single_underscore_is_not_blank() {
        let q = classify(&unit("3) Explain snake_case naming."), "");
        assert_eq!(q.kind(), crate::models::SheetKind::Descriptive);
    }

    #[test]
    fn test_two_options_with_blank_falls_through_to_subjective() {
        let q = classify(&unit("4) Fill: __\na) yes\nb) no"), "");
        assert!(matches!(q, ClassifiedQuestion::Subjective(_)));
    }

    #[test]
    fn test_five_options_falls_through_to_descriptive() {
        let text = "5) Which?\na) 1\nb) 2\nc) 3\nd) 4\nA) 5";
        let q = classify(&unit(text), "");
        assert!(matches!(q, ClassifiedQuestion::Descriptive(_)));
    }

    #[test]
    fn test_descriptive_joins_lines() {
        let q = classify(&unit("6) Describe the water cycle\nin detail."), " 6) Evaporation... ");
        let ClassifiedQuestion::Descriptive(q) = q else {
            panic!("应为论述题");
        };
        assert_eq!(q.stem, "6) Describe the water cycle in detail.");
        assert_eq!(q.display_answer, "6) Evaporation...");
        assert_eq!(q.explanation, "6) Evaporation...");
        assert_eq!(q.meta.label, "Q1");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "1) a?\na) x\nb) y\nc) z\nd) w";
        assert_eq!(classify(&unit(text), "b"), classify(&unit(text), "b"));
    }
}
