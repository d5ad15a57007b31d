//! JSON结构树：按展开路径集把递归文档投影为可见行的扁平列表

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

/// 标量行的值类型（与 UI 展示解耦）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarKind {
    String,
    Number,
    Bool,
    Null,
}

/// 结构视图中的一行。路径规则：根为 `root`，对象子节点为
/// `父路径.key`，数组子节点为 `父路径[索引]`；同一文档每次展平
/// 得到的路径完全一致，可作为节点位置的稳定标识。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum JsonTreeItem {
    Object {
        path: String,
        depth: u32,
        expanded: bool,
        key: Option<String>,
        from_array: bool,
        array_index: Option<usize>,
        /// 对象字段数，便于 UI 懒加载展示
        entry_count: usize,
    },
    Array {
        path: String,
        depth: u32,
        expanded: bool,
        key: Option<String>,
        from_array: bool,
        array_index: Option<usize>,
        item_count: usize,
    },
    Primitive {
        path: String,
        depth: u32,
        /// 对象内为键名，数组内为索引的字符串形式
        key: String,
        from_array: bool,
        array_index: Option<usize>,
        kind: ScalarKind,
        /// 渲染后的值文本（字符串不带引号）
        value: String,
    },
}

impl JsonTreeItem {
    pub fn path(&self) -> &str {
        match self {
            JsonTreeItem::Object { path, .. }
            | JsonTreeItem::Array { path, .. }
            | JsonTreeItem::Primitive { path, .. } => path,
        }
    }

    pub fn depth(&self) -> u32 {
        match self {
            JsonTreeItem::Object { depth, .. }
            | JsonTreeItem::Array { depth, .. }
            | JsonTreeItem::Primitive { depth, .. } => *depth,
        }
    }

    /// 标量行永远不可展开
    pub fn expanded(&self) -> bool {
        match self {
            JsonTreeItem::Object { expanded, .. } | JsonTreeItem::Array { expanded, .. } => {
                *expanded
            }
            JsonTreeItem::Primitive { .. } => false,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            JsonTreeItem::Object { key, .. } | JsonTreeItem::Array { key, .. } => key.as_deref(),
            JsonTreeItem::Primitive { key, .. } => Some(key),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, JsonTreeItem::Object { .. } | JsonTreeItem::Array { .. })
    }

    /// 轻量预览（字符串截断、容器的子元素计数）
    pub fn preview(&self) -> String {
        match self {
            JsonTreeItem::Object { entry_count, .. } => format!("{{..}} ({} keys)", entry_count),
            JsonTreeItem::Array { item_count, .. } => format!("[..] ({} items)", item_count),
            JsonTreeItem::Primitive { kind, value, .. } => match kind {
                ScalarKind::String => {
                    if value.chars().count() > 32 {
                        let truncated: String = value.chars().take(32).collect();
                        format!("\"{}...\"", truncated)
                    } else {
                        format!("\"{}\"", value)
                    }
                }
                _ => value.clone(),
            },
        }
    }
}

/// 把 JSON 文档投影为可见行列表。
///
/// 前序遍历：先输出当前节点，仅当 `expand_all` 或路径在 `expanded`
/// 集合中时递归子节点（对象按原始键序、数组按下标序，深度 +1）。
/// 相同的 `(root, expanded)` 输入总是产出完全相同的列表。
pub fn flatten_json_tree(
    root: &Value,
    expanded: &HashSet<String>,
    expand_all: bool,
) -> Vec<JsonTreeItem> {
    let mut out = Vec::with_capacity(64);
    walk(&mut out, root, expanded, expand_all, "root", 0, None, false, None);
    out
}

#[allow(clippy::too_many_arguments)]
fn walk(
    out: &mut Vec<JsonTreeItem>,
    value: &Value,
    expanded: &HashSet<String>,
    expand_all: bool,
    path: &str,
    depth: u32,
    key: Option<&str>,
    from_array: bool,
    array_index: Option<usize>,
) {
    match value {
        Value::Object(map) => {
            let is_expanded = expand_all || expanded.contains(path);
            out.push(JsonTreeItem::Object {
                path: path.to_string(),
                depth,
                expanded: is_expanded,
                key: key.map(str::to_string),
                from_array,
                array_index,
                entry_count: map.len(),
            });
            if is_expanded {
                for (k, child) in map {
                    let child_path = format!("{}.{}", path, k);
                    walk(out, child, expanded, expand_all, &child_path, depth + 1, Some(k.as_str()), false, None);
                }
            }
        }
        Value::Array(arr) => {
            let is_expanded = expand_all || expanded.contains(path);
            out.push(JsonTreeItem::Array {
                path: path.to_string(),
                depth,
                expanded: is_expanded,
                key: key.map(str::to_string),
                from_array,
                array_index,
                item_count: arr.len(),
            });
            if is_expanded {
                for (idx, child) in arr.iter().enumerate() {
                    let child_path = format!("{}[{}]", path, idx);
                    walk(out, child, expanded, expand_all, &child_path, depth + 1, None, true, Some(idx));
                }
            }
        }
        scalar => {
            let (kind, rendered) = scalar_parts(scalar);
            out.push(JsonTreeItem::Primitive {
                path: path.to_string(),
                depth,
                key: key
                    .map(str::to_string)
                    .or_else(|| array_index.map(|i| i.to_string()))
                    .unwrap_or_default(),
                from_array,
                array_index,
                kind,
                value: rendered,
            });
        }
    }
}

fn scalar_parts(value: &Value) -> (ScalarKind, String) {
    match value {
        Value::String(s) => (ScalarKind::String, s.clone()),
        Value::Number(n) => (ScalarKind::Number, n.to_string()),
        Value::Bool(b) => (ScalarKind::Bool, b.to_string()),
        _ => (ScalarKind::Null, "null".to_string()),
    }
}

/// 切换容器路径的展开状态。
///
/// 展开只加入自身；折叠时连同所有已展开的后代路径一起移除
/// （前缀为 `路径.` 或 `路径[` 的条目），保证集合中任何路径的
/// 祖先也都在集合中，否则该节点在视图里不可达。
pub fn toggle_expanded_path(expanded: &mut HashSet<String>, path: &str) {
    if expanded.contains(path) {
        let dot_prefix = format!("{}.", path);
        let bracket_prefix = format!("{}[", path);
        expanded
            .retain(|p| p != path && !p.starts_with(&dot_prefix) && !p.starts_with(&bracket_prefix));
    } else {
        expanded.insert(path.to_string());
    }
}
