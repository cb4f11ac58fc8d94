/// 文本单元：OCR 文本中一个带编号的题目块或答案块
///
/// `number` 按切分顺序从 1 开始递增，与原文中的题号无关。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub number: usize,
    pub text: String,
}

impl TextUnit {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// 题目标签，例如 `Q3`
    pub fn label(&self) -> String {
        format!("Q{}", self.number)
    }
}
