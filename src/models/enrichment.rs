/// LLM 补全后解析出的元数据
///
/// 未能从响应中解析出的字段为空字符串（`marks` 为 `None`）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentFields {
    pub category: String,
    pub cognitive_skill: String,
    pub source: String,
    pub difficulty: String,
    pub marks: Option<u32>,
    pub answer_type: String,
    /// 评分方案，仅主观题/论述题使用
    pub answer_content: Option<String>,
}
