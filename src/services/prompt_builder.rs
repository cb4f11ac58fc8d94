//! 补全请求构建 - 业务能力层
//!
//! 按工作表类型生成发给 LLM 的请求，三种题型的提示词、token 上限和温度各不相同。

use crate::models::vocabulary::{CognitiveSkill, QUESTION_CATEGORIES, QUESTION_SOURCE};
use crate::models::SheetKind;
use crate::services::llm_service::ChatRequest;

const CATEGORIZE_SYSTEM: &str = "You are a helpful assistant that categorizes questions.";
const CATEGORIZE_DETAILS_SYSTEM: &str =
    "You are a helpful assistant that categorizes questions and provides additional details.";

const DIFFICULTY_GUIDE: &str = "('Less' - Remembering, Understanding (simple), 'Moderate'- Understanding (complex), Applying (simple), Creating (Simple) 'High' - Applying (complex), Analysing, Evaluating, Creating (Complex). Just give the response as 'Less', 'Moderate' or 'High' only.)";

const MARKING_SCHEME_GUIDE: &str = "(Understanding the question and answer explanation generate a detailed marking scheme based on the answer allotted to it. \
Break the answer into specific logical or conceptual steps/ pointers based on what is actually written in the solution. \
Each step/ point should include a brief description and the marks awarded. The marking scheme should be context-specific, \
not generic, and should allow for variations in variable names, wording, or approach as long as the logic is correct. Avoid verification step in the rubrics. \
Give the output points in a single line and not as bullet points.)";

/// 分类词表，格式为 `["a", "b", ...]`
fn category_list() -> String {
    let quoted: Vec<String> = QUESTION_CATEGORIES
        .iter()
        .map(|c| format!("'{}'", c))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// 构建补全请求
///
/// # 参数
/// - `kind`: 题目所在工作表
/// - `question`: 题干文本
pub fn build_request(kind: SheetKind, question: &str) -> ChatRequest {
    let categories = category_list();
    let skills = CognitiveSkill::joined();

    match kind {
        SheetKind::Objective => ChatRequest {
            system_message: CATEGORIZE_SYSTEM.to_string(),
            user_message: format!(
                r#"Based on the following question content, provide the following details:
1. Question Category: {categories}  please select any one of this
2. Cognitive Skills: [{skills}]
3. Question Source: {QUESTION_SOURCE}
4. Level of Difficulty: Less/Moderate/Highly
5. Marks: 1
6. Answer Type: Words/Numbers/Equation/Alpha Numeric please select any one of these.

Question Content: {question}"#
            ),
            max_tokens: 150,
            temperature: Some(0.0),
        },
        SheetKind::Subjective => ChatRequest {
            system_message: CATEGORIZE_DETAILS_SYSTEM.to_string(),
            user_message: format!(
                r#"Based on the following question content, provide the following details:
1. Question Category: {categories} from the provided list
2. Cognitive Skills ({skills}) please select any one of these only
3. Question Source ({QUESTION_SOURCE})
4. Level of Difficulty {DIFFICULTY_GUIDE}
5. Marks (1, 2, 3, 4, 5, 6... as given in the question paper within brackets)
6. Answer Type (Words,Numbers,Equation) Please select any one of these
7. Answer Content: {MARKING_SCHEME_GUIDE}

Question Categories:
{joined}

Question Content: {question}"#,
                joined = QUESTION_CATEGORIES.join(", ")
            ),
            max_tokens: 1500,
            temperature: Some(0.0),
        },
        SheetKind::Descriptive => ChatRequest {
            system_message: CATEGORIZE_SYSTEM.to_string(),
            user_message: format!(
                r#"Based on the following question content, provide the following details:
1. Question Category {categories} select from the provided list
2. Cognitive Skills ({skills}) please select any one of these only
3. Question Source ({QUESTION_SOURCE})
4. Level of Difficulty {DIFFICULTY_GUIDE}
5. Marks (1, 2, 3, 4, 5, 6... as given in the question paper within brackets)
6. Answer Type (Equation, Phrases) Please select any one of these
7. Answer Content: {MARKING_SCHEME_GUIDE}

Question Content: {question}"#
            ),
            max_tokens: 300,
            temperature: None,
        },
    }
}
