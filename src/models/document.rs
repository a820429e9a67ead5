//! 文档模型
//!
//! 组装器输出的结构化文档，交给外部序列化器生成最终文件。
//! 间距和字号只作为元数据携带，具体排版由渲染端决定。

use serde::Serialize;

/// 段落
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// 字号（磅）
    pub size: u16,
    /// 段后间距（磅）
    pub spacing_after: u16,
}

impl Paragraph {
    pub const DEFAULT_SIZE: u16 = 11;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            size: Self::DEFAULT_SIZE,
            spacing_after: 0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn spacing_after(mut self, spacing: u16) -> Self {
        self.spacing_after = spacing;
        self
    }
}

/// 文档块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Heading { text: String },
    Paragraph(Paragraph),
    /// 下划线样式的分隔线，留作书写空间
    Rule,
    PageBreak,
}

impl Block {
    pub fn title(text: impl Into<String>) -> Self {
        Block::Title { text: text.into() }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    /// 块中的文字，Rule 和 PageBreak 没有文字
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Title { text } | Block::Heading { text } => Some(text),
            Block::Paragraph(p) => Some(&p.text),
            Block::Rule | Block::PageBreak => None,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Block::Title { .. })
    }

    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

/// 有序的文档块序列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentModel {
    blocks: Vec<Block>,
}

impl DocumentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// 按分页符切分后的各页
    pub fn pages(&self) -> Vec<&[Block]> {
        if self.blocks.is_empty() {
            return Vec::new();
        }
        self.blocks.split(Block::is_page_break).collect()
    }

    pub fn page_break_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_page_break()).count()
    }

    /// 所有段落文字
    pub fn paragraph_texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p.text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_split_on_page_breaks() {
        let mut doc = DocumentModel::new();
        doc.push(Block::title("A"));
        doc.push(Paragraph::new("1. x"));
        doc.push(Block::PageBreak);
        doc.push(Block::title("B"));

        let pages = doc.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 2);
        assert_eq!(pages[1], &[Block::title("B")]);
        assert_eq!(doc.page_break_count(), 1);
        assert!(DocumentModel::new().pages().is_empty());
    }

    #[test]
    fn test_block_json_shape() {
        let block: Block = Paragraph::new("GRADE").bold().into();
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "paragraph");
        assert_eq!(json["text"], "GRADE");
        assert_eq!(json["bold"], true);

        let rule = serde_json::to_value(Block::Rule).unwrap();
        assert_eq!(rule["type"], "rule");
    }
}
