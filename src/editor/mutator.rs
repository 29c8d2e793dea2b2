/// 文档修改策略
///
/// 对单个文档执行“找到则更新，否则插入”：
/// 1. 目标元素存在：全部设为新值，每处计一次修改（不与旧值比较）
/// 2. 目标元素不存在但锚点元素存在：仅在第一个锚点之后插入一个目标元素，计一次修改
/// 3. 两者都不存在：不修改
///
/// 更新是“处处设置”，插入是“只建一次”，这一不对称是有意保留的行为。

use serde::Serialize;
use xmltree::{Element, XMLNode};
use crate::document::ProjectDocument;
use crate::{LANG_VERSION_TAG, OUTPUT_TYPE_TAG};

/// 单个文档的修改结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum MutationOutcome {
    /// 更新了已有的目标元素
    Updated(usize),
    /// 在锚点之后插入了新的目标元素
    Inserted,
    /// 目标元素与锚点元素都不存在
    NoTarget,
}

impl MutationOutcome {
    /// 修改次数
    pub fn change_count(&self) -> usize {
        match self {
            MutationOutcome::Updated(count) => *count,
            MutationOutcome::Inserted => 1,
            MutationOutcome::NoTarget => 0,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.change_count() > 0
    }
}

/// 元素更新器：目标元素名 + 锚点元素名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementUpdater {
    target: String,
    anchor: String,
}

impl Default for ElementUpdater {
    fn default() -> Self {
        Self::lang_version()
    }
}

impl ElementUpdater {
    pub fn new(target: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            anchor: anchor.into(),
        }
    }

    /// `LangVersion`，锚点为 `OutputType`
    pub fn lang_version() -> Self {
        Self::new(LANG_VERSION_TAG, OUTPUT_TYPE_TAG)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// 对文档执行修改，返回修改结果
    pub fn apply(&self, document: &mut ProjectDocument, value: &str) -> MutationOutcome {
        let targets = document.locate(&self.target).paths();

        if !targets.is_empty() {
            let mut count = 0;
            for path in &targets {
                if let Some(element) = document.element_at_mut(path) {
                    set_text(element, value);
                    count += 1;
                }
            }
            return MutationOutcome::Updated(count);
        }

        // 只使用第一个锚点
        let first_anchor = document.locate(&self.anchor).paths().into_iter().next();
        if let Some(anchor_path) = first_anchor {
            let element = self.new_target(document.namespace(), value);
            if document.insert_after(&anchor_path, element) {
                return MutationOutcome::Inserted;
            }
        }

        MutationOutcome::NoTarget
    }

    fn new_target(&self, namespace: Option<&str>, value: &str) -> Element {
        let mut element = Element::new(&self.target);
        element.namespace = namespace.map(str::to_string);
        element.children.push(XMLNode::Text(value.to_string()));
        element
    }
}

/// 用单个文本节点替换元素的全部内容
fn set_text(element: &mut Element, value: &str) {
    element.children.clear();
    element.children.push(XMLNode::Text(value.to_string()));
}
