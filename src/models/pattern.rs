//! 模式（Pattern）数据结构
//!
//! 数据集里的每个模式都带有三个题目池，键名与 JSON 中保持一致：
//! `"Speaking I"`、`"Speaking II"`、`"Unscramble"`。

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// 题目分区类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "Speaking I")]
    SpeakingI,
    #[serde(rename = "Speaking II")]
    SpeakingII,
    #[serde(rename = "Unscramble")]
    Unscramble,
}

static SECTION_KEYS: phf::Map<&'static str, SectionKind> = phf::phf_map! {
    "Speaking I" => SectionKind::SpeakingI,
    "Speaking II" => SectionKind::SpeakingII,
    "Unscramble" => SectionKind::Unscramble,
};

impl SectionKind {
    /// 练习卷中的固定顺序
    pub const ALL: [SectionKind; 3] = [
        SectionKind::SpeakingI,
        SectionKind::SpeakingII,
        SectionKind::Unscramble,
    ];

    /// 数据集中的键名，同时也是练习卷中的分区标题
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::SpeakingI => "Speaking I",
            SectionKind::SpeakingII => "Speaking II",
            SectionKind::Unscramble => "Unscramble",
        }
    }

    /// 从数据集键名解析
    pub fn from_key(key: &str) -> Option<Self> {
        SECTION_KEYS.get(key).copied()
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 规范化后的题目
///
/// 无论原始数据是字符串还是对象，加载后都统一成这个形状。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    /// 题干（韩语句子或问题）
    #[serde(rename = "koreanOrQuestion", default)]
    pub prompt_text: String,
    /// 打乱顺序的英文提示，例如 `I/want/an/apple`
    #[serde(rename = "scrambled", default)]
    pub scrambled_hint: String,
}

impl QuestionItem {
    pub fn new(prompt_text: impl Into<String>, scrambled_hint: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            scrambled_hint: scrambled_hint.into(),
        }
    }

    /// 只有题干、没有提示的题目
    pub fn prompt_only(prompt_text: impl Into<String>) -> Self {
        Self::new(prompt_text, String::new())
    }

    pub fn has_hint(&self) -> bool {
        !self.scrambled_hint.is_empty()
    }
}

/// 数据集中题目的原始形状
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawQuestionItem {
    /// 纯字符串
    Text(String),
    /// 结构化对象
    Structured(StructuredItem),
    /// 其他任何 JSON 值，规范化为空题目
    Other(serde_json::Value),
}

/// 结构化题目，字段缺失或为 null 时按空字符串处理
///
/// 只接受 JSON 对象；数组之类的值落到 `RawQuestionItem::Other`。
#[derive(Debug, Clone, Default)]
pub struct StructuredItem {
    pub korean_or_question: Option<String>,
    pub scrambled: Option<String>,
}

impl<'de> Deserialize<'de> for StructuredItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StructuredItemVisitor;

        impl<'de> Visitor<'de> for StructuredItemVisitor {
            type Value = StructuredItem;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a question object with koreanOrQuestion / scrambled")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut item = StructuredItem::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "koreanOrQuestion" => item.korean_or_question = map.next_value()?,
                        "scrambled" => item.scrambled = map.next_value()?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(item)
            }
        }

        deserializer.deserialize_map(StructuredItemVisitor)
    }
}

impl From<RawQuestionItem> for QuestionItem {
    fn from(raw: RawQuestionItem) -> Self {
        match raw {
            RawQuestionItem::Text(text) => QuestionItem::prompt_only(text),
            RawQuestionItem::Structured(item) => QuestionItem::new(
                item.korean_or_question.unwrap_or_default(),
                item.scrambled.unwrap_or_default(),
            ),
            RawQuestionItem::Other(value) => {
                debug!("无法识别的题目格式，按空题目处理: {}", value);
                QuestionItem::default()
            }
        }
    }
}

/// 一个模式及其题目池
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPatternRecord")]
pub struct PatternRecord {
    pub number: u32,
    pub name: String,
    pub sections: BTreeMap<SectionKind, Vec<QuestionItem>>,
}

impl PatternRecord {
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            sections: BTreeMap::new(),
        }
    }

    /// 设置某个分区的题目池
    pub fn with_section(mut self, kind: SectionKind, items: Vec<QuestionItem>) -> Self {
        self.sections.insert(kind, items);
        self
    }

    /// 获取某个分区的题目池，不存在时返回空切片
    pub fn pool(&self, kind: SectionKind) -> &[QuestionItem] {
        self.sections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 卡片上显示的标签，例如 `3. I want to ~`
    pub fn label(&self) -> String {
        format!("{}. {}", self.number, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct RawPatternRecord {
    number: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    sections: HashMap<String, Option<Vec<RawQuestionItem>>>,
}

impl From<RawPatternRecord> for PatternRecord {
    fn from(raw: RawPatternRecord) -> Self {
        let mut sections = BTreeMap::new();
        for (key, items) in raw.sections {
            match SectionKind::from_key(&key) {
                Some(kind) => {
                    let items = items
                        .unwrap_or_default()
                        .into_iter()
                        .map(QuestionItem::from)
                        .collect();
                    sections.insert(kind, items);
                }
                None => debug!("模式 {} 包含未知分区 '{}'，已忽略", raw.number, key),
            }
        }

        Self {
            number: raw.number,
            name: raw.name,
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(SectionKind::from_key("Writing"), None);
    }

    #[test]
    fn test_string_and_object_items_are_normalized() {
        let json = r#"{
            "number": 2,
            "name": "I want ~",
            "sections": {
                "Speaking II": ["What do you want?", {"koreanOrQuestion": "무엇을 원해?"}],
                "Unscramble": [
                    {"koreanOrQuestion": "나는 사과를 원해", "scrambled": "I/want/an/apple"},
                    {"scrambled": "he/goes"},
                    {"koreanOrQuestion": null, "scrambled": null},
                    42
                ]
            }
        }"#;

        let record: PatternRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.number, 2);
        assert_eq!(
            record.pool(SectionKind::SpeakingII),
            &[
                QuestionItem::prompt_only("What do you want?"),
                QuestionItem::prompt_only("무엇을 원해?"),
            ]
        );
        assert_eq!(
            record.pool(SectionKind::Unscramble),
            &[
                QuestionItem::new("나는 사과를 원해", "I/want/an/apple"),
                QuestionItem::new("", "he/goes"),
                QuestionItem::default(),
                QuestionItem::default(),
            ]
        );
    }

    #[test]
    fn test_array_item_is_not_read_as_object() {
        let json = r#"{"number": 3, "sections": {"Unscramble": [["x", "y"], {"koreanOrQuestion": "나", "extra": [1]}]}}"#;
        let record: PatternRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            record.pool(SectionKind::Unscramble),
            &[QuestionItem::default(), QuestionItem::new("나", "")]
        );
    }

    #[test]
    fn test_missing_sections_yield_empty_pools() {
        let record: PatternRecord = serde_json::from_str(r#"{"number": 7}"#).unwrap();
        assert_eq!(record.name, "");
        for kind in SectionKind::ALL {
            assert!(record.pool(kind).is_empty());
        }
    }

    #[test]
    fn test_unknown_section_key_is_ignored() {
        let json = r#"{"number": 1, "name": "x", "sections": {"Writing": ["a"], "Speaking I": null}}"#;
        let record: PatternRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.sections.len(), 1);
        assert!(record.pool(SectionKind::SpeakingI).is_empty());
    }

    #[test]
    fn test_serialized_record_reloads_identically() {
        let record = PatternRecord::new(4, "Can I ~?").with_section(
            SectionKind::Unscramble,
            vec![QuestionItem::new("내가 가도 돼?", "can/I/go")],
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"Unscramble\""));
        assert!(json.contains("\"koreanOrQuestion\""));

        let reloaded: PatternRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, record);
        assert_eq!(reloaded.label(), "4. Can I ~?");
    }
}
