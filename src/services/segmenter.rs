//! 文本切分 - 业务能力层
//!
//! 把一份 OCR 文本切成带编号的 [`TextUnit`]。
//!
//! 规则：
//! - 去掉行首空白后以 `12)`、`(12.`、`3.` 这类题号开头的行是一个新单元的起点
//! - 空行直接丢弃，不会打断单元
//! - 编号只按切出的先后顺序递增，不使用行里的数字

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::models::TextUnit;

static BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?\s*[0-9]+\s*[).]").expect("题号正则无效"));

/// 判断一行是否为单元起点
pub fn is_boundary(line: &str) -> bool {
    BOUNDARY_RE.is_match(line.trim_start())
}

/// 切分文本
///
/// # 参数
/// - `content`: OCR 得到的整份文本
///
/// # 返回
/// 按出现顺序排列的文本单元；没有任何题号行时整份文本是编号 1 的单元
pub fn segment(content: &str) -> Vec<TextUnit> {
    let mut units = Vec::new();
    let mut current = String::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_boundary(line) {
            flush(&mut units, &mut current);
            current.push_str(line);
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    flush(&mut units, &mut current);

    units
}

fn flush(units: &mut Vec<TextUnit>, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() {
        units.push(TextUnit::new(units.len() + 1, text));
    }
    current.clear();
}

/// 答案查找表：编号 → 答案文本
pub fn answer_lookup(units: &[TextUnit]) -> HashMap<usize, String> {
    units
        .iter()
        .map(|unit| (unit.number, unit.text.clone()))
        .collect()
}
