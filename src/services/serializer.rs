//! 文档序列化
//!
//! 二进制格式（docx / pdf）由外部工具生成，这里只提供纯文本和 JSON 两种交接格式。

use crate::error::{AppError, AppResult, WorksheetError};
use crate::models::document::{Block, DocumentModel};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 把文档模型转换成可下载的字节
pub trait DocumentSerializer: Send + Sync {
    /// 文件扩展名（不含点）
    fn extension(&self) -> &'static str;

    fn serialize(&self, document: &DocumentModel) -> AppResult<Vec<u8>>;
}

/// 纯文本输出
#[derive(Debug, Clone)]
pub struct PlainTextSerializer {
    /// 书写线宽度（字符数）
    pub rule_width: usize,
}

impl Default for PlainTextSerializer {
    fn default() -> Self {
        Self { rule_width: 60 }
    }
}

impl DocumentSerializer for PlainTextSerializer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn serialize(&self, document: &DocumentModel) -> AppResult<Vec<u8>> {
        let mut lines: Vec<String> = Vec::with_capacity(document.len() * 2);

        for block in document.blocks() {
            match block {
                Block::Title { text } => {
                    lines.push(text.clone());
                    lines.push("=".repeat(text.chars().count()));
                }
                Block::Heading { text } => {
                    lines.push(String::new());
                    lines.push(text.clone());
                    lines.push("-".repeat(text.chars().count()));
                }
                Block::Paragraph(paragraph) => {
                    lines.push(paragraph.text.clone());
                    if paragraph.spacing_after > 6 {
                        lines.push(String::new());
                    }
                }
                Block::Rule => {
                    lines.push(format!("   {}", "_".repeat(self.rule_width)));
                    lines.push(String::new());
                }
                // 换页符
                Block::PageBreak => lines.push("\u{000C}".to_string()),
            }
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output.into_bytes())
    }
}

/// JSON 输出，供外部文档生成工具读取
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    pub pretty: bool,
}

impl DocumentSerializer for JsonSerializer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn serialize(&self, document: &DocumentModel) -> AppResult<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        Ok(bytes)
    }
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn serializer(self) -> Box<dyn DocumentSerializer> {
        match self {
            OutputFormat::Text => Box::new(PlainTextSerializer::default()),
            OutputFormat::Json => Box::new(JsonSerializer { pretty: true }),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Worksheet(WorksheetError::UnsupportedFormat {
                format: other.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Paragraph;

    fn sample_document() -> DocumentModel {
        let mut doc = DocumentModel::new();
        doc.push(Block::title("Worksheet"));
        doc.push(Block::heading("Unscramble"));
        doc.push(Paragraph::new("1. 그는 간다 (he/goes)"));
        doc.push(Block::Rule);
        doc.push(Block::PageBreak);
        doc.push(Paragraph::new("GRADE").bold());
        doc
    }

    #[test]
    fn test_plain_text_layout() {
        let serializer = PlainTextSerializer { rule_width: 5 };
        let text = String::from_utf8(serializer.serialize(&sample_document()).unwrap()).unwrap();

        let expected = "Worksheet\n=========\n\nUnscramble\n----------\n1. 그는 간다 (he/goes)\n   _____\n\n\u{000C}\nGRADE\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_json_output_lists_blocks() {
        let bytes = JsonSerializer::default().serialize(&sample_document()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let blocks = value["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks[0]["type"], "title");
        assert_eq!(blocks[4]["type"], "page_break");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::Json.serializer().extension(), "json");
        assert!("docx".parse::<OutputFormat>().is_err());
    }
}
