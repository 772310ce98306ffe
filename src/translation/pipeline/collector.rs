//! 文本收集器模块
//!
//! 在宿主侧解析标记，按文档顺序收集包含中文的文本节点。
//! 只用于"立即翻译全部可见内容"，注入脚本本身不依赖这里。

use std::collections::HashSet;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::translation::config::constants;
use crate::translation::error::{TranslationError, TranslationResult};
use crate::translation::pipeline::filters::is_script_native;

/// 收集到的文本节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    /// 文本节点原始内容（未修剪）
    pub text: String,
    /// 父元素标签名
    pub parent_tag: Option<String>,
    /// 父元素 id 属性
    pub parent_id: Option<String>,
    /// 在DOM中的深度
    pub depth: usize,
}

/// 文本收集器
#[derive(Debug, Clone, Default)]
pub struct TextCollector {
    /// 为 true 时相同文本只保留第一次出现
    pub dedupe: bool,
}

impl TextCollector {
    pub fn new() -> Self {
        Self { dedupe: true }
    }

    /// 解析标记并收集待翻译文本
    pub fn collect(&self, markup: &str) -> TranslationResult<Vec<TextItem>> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| TranslationError::MalformedContent(format!("解析HTML失败: {}", e)))?;

        let mut items = Vec::new();
        let mut seen = HashSet::new();
        self.walk(&dom.document, None, 0, &mut items, &mut seen);

        tracing::debug!("收集到 {} 个待翻译文本", items.len());
        Ok(items)
    }

    fn walk(
        &self,
        node: &Handle,
        parent: Option<&Handle>,
        depth: usize,
        items: &mut Vec<TextItem>,
        seen: &mut HashSet<String>,
    ) {
        match node.data {
            NodeData::Text { ref contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() || !is_script_native(&text) {
                    return;
                }
                if self.dedupe && !seen.insert(text.clone()) {
                    return;
                }
                items.push(TextItem {
                    text,
                    parent_tag: parent.and_then(element_name),
                    parent_id: parent.and_then(|p| element_attr(p, "id")),
                    depth,
                });
            }
            NodeData::Element { ref name, .. } => {
                if constants::SKIP_ELEMENTS.contains(&&*name.local) {
                    return;
                }
                for child in node.children.borrow().iter() {
                    self.walk(child, Some(node), depth + 1, items, seen);
                }
            }
            _ => {
                for child in node.children.borrow().iter() {
                    self.walk(child, parent, depth + 1, items, seen);
                }
            }
        }
    }
}

fn element_name(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn element_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>配置</title><style>.a::after{content:"样式"}</style></head>
<body>
  <div id="toolbar"><button>编译</button><button id="flash">烧录</button></div>
  <p>Plain English</p>
  <p>混合 text</p>
  <span>编译</span>
  <script>console.log("脚本")</script>
</body></html>"#;

    #[test]
    fn test_collects_in_document_order() {
        let items = TextCollector::new().collect(PAGE).unwrap();
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["配置", "编译", "烧录", "混合 text"]);
    }

    #[test]
    fn test_records_parent_information() {
        let items = TextCollector::new().collect(PAGE).unwrap();
        let flash = items.iter().find(|i| i.text == "烧录").unwrap();
        assert_eq!(flash.parent_tag.as_deref(), Some("button"));
        assert_eq!(flash.parent_id.as_deref(), Some("flash"));

        let compile = items.iter().find(|i| i.text == "编译").unwrap();
        assert_eq!(compile.parent_id, None);
    }

    #[test]
    fn test_without_dedupe_keeps_repeats() {
        let collector = TextCollector { dedupe: false };
        let items = collector.collect(PAGE).unwrap();
        assert_eq!(items.iter().filter(|i| i.text == "编译").count(), 2);
    }

    #[test]
    fn test_empty_and_english_markup() {
        assert!(TextCollector::new().collect("").unwrap().is_empty());
        assert!(TextCollector::new()
            .collect("<body><p>Hello</p></body>")
            .unwrap()
            .is_empty());
    }
}
