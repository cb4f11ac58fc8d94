//! 固定词表
//!
//! 题目分类、认知技能等受控词表，进程内只读常量，随 prompt 一起发给 LLM。

use phf::phf_set;

/// 题目分类词表（按 prompt 中出现的顺序）
pub const QUESTION_CATEGORIES: &[&str] = &[
    "Answer the following correctly",
    "Evaluate the following",
    "Simplify the following expr.",
    "Choose the ODD one Out",
    "Numerical/application based",
    "Very Short Answer Questions",
    "True or False",
    "CBQ with sub questions",
    "LAT with sub questions",
    "LAT Questions",
    "SAT Questions (3 Marks)",
    "SAT Questions (2 Marks)",
    "Dialogues completion",
    "Sentence completion",
    "Rearrange the following words",
    "Identifying the following",
    "Sentence Transformation",
    "Sentence reordering",
    "Editing and Omission",
    "Error correction",
    "Joining Sentences",
    "Fill in the Blanks",
    "Passage based questions",
    "Composition writing",
    "Short Answer Type (3 marks)",
    "Short Answer Type (2 marks)",
    "Extract based question",
    "Choose the correct answers",
    "Locating and Plotting on map",
    "Extract based on Map Survey",
    "Assertion & Reasons Type",
    "Mark Questions",
    "2 Marks Question",
    "5 Mark Question",
    "4 Mark Question",
    "3 Mark Question",
    "1 Mark Question",
    "Match the following Questions",
    "Multiple Choice Question",
    "Describe Questions",
    "Direct Question",
];

static CATEGORY_SET: phf::Set<&'static str> = phf_set! {
    "Answer the following correctly",
    "Evaluate the following",
    "Simplify the following expr.",
    "Choose the ODD one Out",
    "Numerical/application based",
    "Very Short Answer Questions",
    "True or False",
    "CBQ with sub questions",
    "LAT with sub questions",
    "LAT Questions",
    "SAT Questions (3 Marks)",
    "SAT Questions (2 Marks)",
    "Dialogues completion",
    "Sentence completion",
    "Rearrange the following words",
    "Identifying the following",
    "Sentence Transformation",
    "Sentence reordering",
    "Editing and Omission",
    "Error correction",
    "Joining Sentences",
    "Fill in the Blanks",
    "Passage based questions",
    "Composition writing",
    "Short Answer Type (3 marks)",
    "Short Answer Type (2 marks)",
    "Extract based question",
    "Choose the correct answers",
    "Locating and Plotting on map",
    "Extract based on Map Survey",
    "Assertion & Reasons Type",
    "Mark Questions",
    "2 Marks Question",
    "5 Mark Question",
    "4 Mark Question",
    "3 Mark Question",
    "1 Mark Question",
    "Match the following Questions",
    "Multiple Choice Question",
    "Describe Questions",
    "Direct Question",
};

/// 是否为词表中的分类
pub fn is_known_category(category: &str) -> bool {
    CATEGORY_SET.contains(category)
}

/// 题库来源（固定值）
pub const QUESTION_SOURCE: &str = "UpSchool DB";

/// 题目出现位置（固定值）
pub const QUESTION_APPEARS_IN: &str = "Pre/Post-Worksheet/Test";

/// 认知技能
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CognitiveSkill {
    Remembering,
    Understanding,
    Applying,
    Analysing,
    Evaluating,
    Creating,
}

impl CognitiveSkill {
    pub const ALL: [CognitiveSkill; 6] = [
        CognitiveSkill::Remembering,
        CognitiveSkill::Understanding,
        CognitiveSkill::Applying,
        CognitiveSkill::Analysing,
        CognitiveSkill::Evaluating,
        CognitiveSkill::Creating,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            CognitiveSkill::Remembering => "Remembering",
            CognitiveSkill::Understanding => "Understanding",
            CognitiveSkill::Applying => "Applying",
            CognitiveSkill::Analysing => "Analysing",
            CognitiveSkill::Evaluating => "Evaluating",
            CognitiveSkill::Creating => "Creating",
        }
    }

    /// 尝试从字符串解析（忽略大小写）
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|skill| skill.name().eq_ignore_ascii_case(s))
    }

    /// 逗号分隔的全部技能，用于 prompt
    pub fn joined() -> String {
        Self::ALL
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_table_and_set_agree() {
        assert_eq!(QUESTION_CATEGORIES.len(), CATEGORY_SET.len());
        for category in QUESTION_CATEGORIES {
            assert!(is_known_category(category), "{} 不在分类集合中", category);
        }
        assert!(!is_known_category("Essay"));
    }

    #[test]
    fn test_skill_parse() {
        assert_eq!(
            CognitiveSkill::parse(" applying "),
            Some(CognitiveSkill::Applying)
        );
        assert_eq!(CognitiveSkill::parse("Memorising"), None);
        assert_eq!(
            CognitiveSkill::joined(),
            "Remembering, Understanding, Applying, Analysing, Evaluating, Creating"
        );
    }
}
