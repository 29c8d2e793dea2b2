//! 项目文件文档模型
//!
//! 封装 `xmltree` 的 DOM，提供两项能力：
//! - **命名空间解析**：加载时从根元素的 `xmlns` 声明读取默认命名空间，仅解析一次
//! - **元素定位**：按本地名 + 已解析命名空间在整棵树中惰性查找元素（文档顺序）

use std::io::Cursor;
use xmltree::{Element, EmitterConfig, XMLNode};

/// 已解析的项目文件
///
/// 由处理它的 `ProjectEditor` 独占，生命周期为单个文件的处理过程
#[derive(Debug, Clone)]
pub struct ProjectDocument {
    root: Element,
    namespace: Option<String>,
}

/// 元素在树中的位置：从根开始，每层在父元素 `children` 中的下标
pub type NodePath = Vec<usize>;

impl ProjectDocument {
    /// 从原始字节解析文档
    pub fn parse(bytes: &[u8]) -> Result<Self, xmltree::ParseError> {
        let root = Element::parse(Cursor::new(bytes))?;
        Ok(Self::from_root(root))
    }

    /// 从已有的根元素构建文档，并解析命名空间
    pub fn from_root(root: Element) -> Self {
        let namespace = resolve_namespace(&root);
        Self { root, namespace }
    }

    /// 文档的默认命名空间（None 表示无命名空间）
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// 按本地名查找所有元素（文档顺序，惰性，可通过 clone 重新开始）
    pub fn locate<'a>(&'a self, local_name: &'a str) -> ElementLocator<'a> {
        ElementLocator::new(&self.root, self.namespace.as_deref(), local_name)
    }

    /// 按路径获取可变元素
    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let mut current = &mut self.root;
        for &index in path {
            current = match current.children.get_mut(index)? {
                XMLNode::Element(child) => child,
                _ => return None,
            };
        }
        Some(current)
    }

    /// 在 `path` 指向的元素之后插入同级元素
    ///
    /// 根元素没有同级位置，此时返回 false
    pub fn insert_after(&mut self, path: &[usize], element: Element) -> bool {
        let Some((&index, parent_path)) = path.split_last() else {
            return false;
        };
        match self.element_at_mut(parent_path) {
            Some(parent) if index < parent.children.len() => {
                parent.children.insert(index + 1, XMLNode::Element(element));
                true
            }
            _ => false,
        }
    }

    /// 序列化为字节（带 XML 声明，两空格缩进，不保留原始空白）
    pub fn to_bytes(&self) -> Result<Vec<u8>, xmltree::Error> {
        let config = EmitterConfig::new()
            .perform_indent(true)
            .indent_string("  ");
        let mut output = Vec::new();
        self.root.write_with_config(&mut output, config)?;
        Ok(output)
    }
}

/// 从根元素的默认命名空间声明解析命名空间
///
/// 未声明（或声明为空）时返回 None，这是很多 SDK 风格项目文件的正常情况
pub fn resolve_namespace(root: &Element) -> Option<String> {
    root.namespaces
        .as_ref()
        .and_then(|namespaces| namespaces.get(""))
        .filter(|uri| !uri.is_empty())
        .map(str::to_string)
}

/// 判断元素是否匹配本地名与命名空间（空命名空间等同于无命名空间）
pub fn is_match(element: &Element, namespace: Option<&str>, local_name: &str) -> bool {
    let element_ns = element.namespace.as_deref().filter(|ns| !ns.is_empty());
    let namespace = namespace.filter(|ns| !ns.is_empty());
    element.name == local_name && element_ns == namespace
}

/// 元素定位器：先序遍历根元素的所有后代，产出匹配的元素
///
/// 根元素本身不参与匹配；不区分后代深度；可 clone 以从当前位置分叉遍历
#[derive(Debug, Clone)]
pub struct ElementLocator<'a> {
    namespace: Option<&'a str>,
    local_name: &'a str,
    // 逆序压入子元素以保持文档顺序
    stack: Vec<(&'a Element, NodePath)>,
}

impl<'a> ElementLocator<'a> {
    pub fn new(root: &'a Element, namespace: Option<&'a str>, local_name: &'a str) -> Self {
        Self {
            namespace,
            local_name,
            stack: vec![(root, Vec::new())],
        }
    }

    /// 收集剩余匹配元素的路径（供随后的可变访问使用）
    pub fn paths(mut self) -> Vec<NodePath> {
        std::iter::from_fn(|| self.advance().map(|(_, path)| path)).collect()
    }

    fn advance(&mut self) -> Option<(&'a Element, NodePath)> {
        while let Some((element, path)) = self.stack.pop() {
            for (index, child) in element.children.iter().enumerate().rev() {
                if let XMLNode::Element(child) = child {
                    let mut child_path = path.clone();
                    child_path.push(index);
                    self.stack.push((child, child_path));
                }
            }

            // 根元素（空路径）只作为遍历起点
            if !path.is_empty() && is_match(element, self.namespace, self.local_name) {
                return Some((element, path));
            }
        }
        None
    }
}

impl<'a> Iterator for ElementLocator<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(|(element, _)| element)
    }
}
