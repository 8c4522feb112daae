//! 背包文本格式：`name1:count1,name2:count2,...`
//!
//! `,` 与 `:` 是保留字符，不做转义，物品名里不允许出现。

use std::collections::BTreeMap;
use thiserror::Error;

pub const ITEM_SEPARATOR: char = ',';
pub const COUNT_SEPARATOR: char = ':';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("token {index} ({token:?}) has no ':' separator")]
    MissingSeparator { index: usize, token: String },
    #[error("token {index} has an empty item name")]
    EmptyName { index: usize },
    #[error("count {value:?} of item {name:?} is not an integer")]
    InvalidCount { name: String, value: String },
    #[error("item name {0:?} contains a reserved character (',' or ':')")]
    ReservedCharacter(String),
}

/// 序列化整张表；按名字排序，同一张表两次编码结果一致
pub fn encode(counts: &BTreeMap<String, i32>) -> Result<String, CodecError> {
    let mut out = String::new();
    for (name, count) in counts {
        if name.contains([ITEM_SEPARATOR, COUNT_SEPARATOR]) {
            return Err(CodecError::ReservedCharacter(name.clone()));
        }
        if !out.is_empty() {
            out.push(ITEM_SEPARATOR);
        }
        out.push_str(name);
        out.push(COUNT_SEPARATOR);
        out.push_str(&count.to_string());
    }
    Ok(out)
}

/// 反序列化；空文本就是空背包。重复的名字以最后一次为准
pub fn decode(text: &str) -> Result<BTreeMap<String, i32>, CodecError> {
    let mut counts = BTreeMap::new();
    if text.is_empty() {
        return Ok(counts);
    }

    for (index, token) in text.split(ITEM_SEPARATOR).enumerate() {
        let Some((name, value)) = token.split_once(COUNT_SEPARATOR) else {
            return Err(CodecError::MissingSeparator {
                index,
                token: token.to_string(),
            });
        };
        if name.is_empty() {
            return Err(CodecError::EmptyName { index });
        }
        let count = value.parse::<i32>().map_err(|_| CodecError::InvalidCount {
            name: name.to_string(),
            value: value.to_string(),
        })?;
        counts.insert(name.to_string(), count);
    }
    Ok(counts)
}
