//! 分类后的题目
//!
//! 三种题型各自对应一张工作表，列顺序在 `*_HEADERS` 中固定。

use crate::models::enrichment::EnrichmentFields;
use crate::models::sheet::{Cell, SheetKind, SheetTable};
use crate::models::vocabulary::QUESTION_APPEARS_IN;

/// 客观题每个选项的默认答案类型
pub const DEFAULT_OPTION_ANSWER_TYPE: &str = "Words";

/// 各题型共有的元数据列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionMeta {
    pub label: String,
    pub category: String,
    pub cognitive_skill: String,
    pub source: String,
    pub appears_in: String,
    pub difficulty: String,
    pub marks: Option<u32>,
    pub answer_type: String,
}

impl QuestionMeta {
    /// 分类阶段的默认值：1 分，其余待 LLM 补全
    pub fn new(number: usize) -> Self {
        Self {
            label: format!("Q{}", number),
            category: String::new(),
            cognitive_skill: String::new(),
            source: String::new(),
            appears_in: QUESTION_APPEARS_IN.to_string(),
            difficulty: String::new(),
            marks: Some(1),
            answer_type: String::new(),
        }
    }

    /// 用 LLM 补全结果覆盖元数据列
    pub fn apply(&mut self, fields: &EnrichmentFields) {
        self.category = fields.category.clone();
        self.cognitive_skill = fields.cognitive_skill.clone();
        self.source = fields.source.clone();
        self.difficulty = fields.difficulty.clone();
        self.marks = fields.marks;
        self.answer_type = fields.answer_type.clone();
    }

    fn leading_cells(&self, stem: &str) -> Vec<Cell> {
        vec![
            Cell::text(&self.label),
            Cell::text(&self.category),
            Cell::text(&self.cognitive_skill),
            Cell::text(&self.source),
            Cell::text(&self.appears_in),
            Cell::text(&self.difficulty),
            Cell::text(stem),
            Cell::opt_number(self.marks),
        ]
    }
}

const LEADING_HEADERS: [&str; 8] = [
    "Question Label",
    "Question Category",
    "Cognitive Skills",
    "Question Source",
    "Question Appears in",
    "Level of Difficulty",
    "Question",
    "Marks",
];

/// 客观题的一个选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSlot {
    pub content: Option<String>,
    pub answer_type: String,
    pub correct: bool,
    pub weightage: u32,
}

impl OptionSlot {
    pub fn new(content: Option<String>) -> Self {
        Self {
            content,
            answer_type: DEFAULT_OPTION_ANSWER_TYPE.to_string(),
            correct: false,
            weightage: 0,
        }
    }
}

/// 客观题（恰好四个字母选项）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveQuestion {
    pub number: usize,
    pub meta: QuestionMeta,
    pub stem: String,
    pub options: [OptionSlot; 4],
    pub explanation: String,
}

/// 主观题（填空）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectiveQuestion {
    pub number: usize,
    pub meta: QuestionMeta,
    pub stem: String,
    pub answer: String,
    pub answer_display: String,
    pub weightage: u32,
    pub placeholder: String,
    pub explanation: String,
}

/// 论述题（其余所有题目）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptiveQuestion {
    pub number: usize,
    pub meta: QuestionMeta,
    pub stem: String,
    pub display_answer: String,
    pub answer_weightage: String,
    pub answer_content: String,
    pub explanation: String,
}

/// 分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedQuestion {
    Objective(ObjectiveQuestion),
    Subjective(SubjectiveQuestion),
    Descriptive(DescriptiveQuestion),
}

impl ClassifiedQuestion {
    pub fn kind(&self) -> SheetKind {
        match self {
            ClassifiedQuestion::Objective(_) => SheetKind::Objective,
            ClassifiedQuestion::Subjective(_) => SheetKind::Subjective,
            ClassifiedQuestion::Descriptive(_) => SheetKind::Descriptive,
        }
    }

    pub fn number(&self) -> usize {
        match self {
            ClassifiedQuestion::Objective(q) => q.number,
            ClassifiedQuestion::Subjective(q) => q.number,
            ClassifiedQuestion::Descriptive(q) => q.number,
        }
    }
}

/// 工作簿阶段：中间产物不含 LLM 补全列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookStage {
    Intermediate,
    Final,
}

/// 按题型分好的三组题目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSets {
    pub objective: Vec<ObjectiveQuestion>,
    pub subjective: Vec<SubjectiveQuestion>,
    pub descriptive: Vec<DescriptiveQuestion>,
}

impl QuestionSets {
    pub fn push(&mut self, question: ClassifiedQuestion) {
        match question {
            ClassifiedQuestion::Objective(q) => self.objective.push(q),
            ClassifiedQuestion::Subjective(q) => self.subjective.push(q),
            ClassifiedQuestion::Descriptive(q) => self.descriptive.push(q),
        }
    }

    pub fn len(&self) -> usize {
        self.objective.len() + self.subjective.len() + self.descriptive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 转换为三张工作表（顺序固定：Objective, Subjective, Descriptive）
    pub fn to_tables(&self, stage: WorkbookStage) -> Vec<SheetTable> {
        vec![
            objective_table(&self.objective, stage),
            subjective_table(&self.subjective),
            descriptive_table(&self.descriptive),
        ]
    }
}

fn objective_table(questions: &[ObjectiveQuestion], stage: WorkbookStage) -> SheetTable {
    let mut headers: Vec<String> = LEADING_HEADERS.iter().map(|h| h.to_string()).collect();
    for i in 1..=4 {
        headers.push(format!("Answer Type{}", i));
        headers.push(format!("Answer Content{}", i));
        headers.push(format!("Correct Answer{}", i));
        headers.push(format!("Answer Weightage{}", i));
    }
    headers.push("Answer Explanation".to_string());
    if stage == WorkbookStage::Final {
        headers.push("Answer Type".to_string());
    }

    let rows = questions
        .iter()
        .map(|q| {
            let mut row = q.meta.leading_cells(&q.stem);
            for slot in &q.options {
                row.push(Cell::text(&slot.answer_type));
                row.push(
                    slot.content
                        .as_deref()
                        .map(Cell::text)
                        .unwrap_or(Cell::Empty),
                );
                row.push(Cell::text(if slot.correct { "Yes" } else { "No" }));
                row.push(Cell::number(slot.weightage));
            }
            row.push(Cell::text(&q.explanation));
            if stage == WorkbookStage::Final {
                row.push(Cell::text(&q.meta.answer_type));
            }
            row
        })
        .collect();

    SheetTable {
        kind: SheetKind::Objective,
        headers,
        rows,
    }
}

fn subjective_table(questions: &[SubjectiveQuestion]) -> SheetTable {
    let mut headers: Vec<String> = LEADING_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.extend(
        [
            "Answer Type",
            "Answer",
            "Answer Display",
            "Weightage",
            "Placeholder",
            "answer_explanation",
        ]
        .iter()
        .map(|h| h.to_string()),
    );

    let rows = questions
        .iter()
        .map(|q| {
            let mut row = q.meta.leading_cells(&q.stem);
            row.push(Cell::text(&q.meta.answer_type));
            row.push(Cell::text(&q.answer));
            row.push(Cell::text(&q.answer_display));
            row.push(Cell::number(q.weightage));
            row.push(Cell::text(&q.placeholder));
            row.push(Cell::text(&q.explanation));
            row
        })
        .collect();

    SheetTable {
        kind: SheetKind::Subjective,
        headers,
        rows,
    }
}

fn descriptive_table(questions: &[DescriptiveQuestion]) -> SheetTable {
    let mut headers: Vec<String> = LEADING_HEADERS.iter().map(|h| h.to_string()).collect();
    headers.extend(
        [
            "Display Answer",
            "Answer Type",
            "Answer Weightage",
            "Answer Content",
            "Answer Explanation",
        ]
        .iter()
        .map(|h| h.to_string()),
    );

    let rows = questions
        .iter()
        .map(|q| {
            let mut row = q.meta.leading_cells(&q.stem);
            row.push(Cell::text(&q.display_answer));
            row.push(Cell::text(&q.meta.answer_type));
            row.push(Cell::text(&q.answer_weightage));
            row.push(Cell::text(&q.answer_content));
            row.push(Cell::text(&q.explanation));
            row
        })
        .collect();

    SheetTable {
        kind: SheetKind::Descriptive,
        headers,
        rows,
    }
}
