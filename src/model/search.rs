//! 结构视图搜索：对展平行列表做键/值子串匹配并维护匹配游标

use serde::Serialize;

use crate::model::json_tree::JsonTreeItem;

/// 搜索结果快照：匹配行下标（指向当前投影）、零起始游标、
/// 当前高亮行。每次查询变更整体重算，游标归零。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub matched_item_indices: Vec<usize>,
    pub current_match_index: usize,
    pub matched_item_index: Option<usize>,
}

impl SearchState {
    pub fn has_matches(&self) -> bool {
        !self.matched_item_indices.is_empty()
    }

    pub fn has_next_match(&self) -> bool {
        self.has_matches() && self.current_match_index < self.matched_item_indices.len() - 1
    }

    pub fn has_previous_match(&self) -> bool {
        self.has_matches() && self.current_match_index > 0
    }

    /// 1 起始的当前匹配序号，用于 "第 n / 共 m 个" 展示
    pub fn current_match_ordinal(&self) -> usize {
        if self.has_matches() { self.current_match_index + 1 } else { 0 }
    }

    pub fn total_matches(&self) -> usize {
        self.matched_item_indices.len()
    }

    /// 游标前进一格；已到末尾或无匹配时返回 None（不回绕）
    pub fn next(&self) -> Option<SearchState> {
        if !self.has_next_match() {
            return None;
        }
        let next_index = self.current_match_index + 1;
        Some(SearchState {
            matched_item_indices: self.matched_item_indices.clone(),
            current_match_index: next_index,
            matched_item_index: Some(self.matched_item_indices[next_index]),
        })
    }

    /// 游标后退一格；已在起点或无匹配时返回 None
    pub fn previous(&self) -> Option<SearchState> {
        if !self.has_previous_match() {
            return None;
        }
        let previous_index = self.current_match_index - 1;
        Some(SearchState {
            matched_item_indices: self.matched_item_indices.clone(),
            current_match_index: previous_index,
            matched_item_index: Some(self.matched_item_indices[previous_index]),
        })
    }
}

/// 大小写不敏感的子串匹配。容器行只比对键名（无键名的行，
/// 比如根，永远不匹配）；标量行比对键名或渲染后的值文本。
pub fn item_matches_search(item: &JsonTreeItem, query: &str) -> bool {
    if query.trim().is_empty() {
        return false;
    }
    let lowercase_query = query.to_lowercase();

    match item {
        JsonTreeItem::Object { key, .. } | JsonTreeItem::Array { key, .. } => key
            .as_deref()
            .map(|k| k.to_lowercase().contains(&lowercase_query))
            .unwrap_or(false),
        JsonTreeItem::Primitive { key, value, .. } => {
            key.to_lowercase().contains(&lowercase_query)
                || value.to_lowercase().contains(&lowercase_query)
        }
    }
}

/// 扫描整个行列表，按行序收集匹配下标。调用方必须先用
/// `expand_all = true` 展平，否则折叠子树里的匹配不可发现。
pub fn search_tree_items(items: &[JsonTreeItem], query: &str) -> SearchState {
    if query.trim().is_empty() {
        return SearchState::default();
    }
    let matched_item_indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item_matches_search(item, query))
        .map(|(index, _)| index)
        .collect();
    let matched_item_index = matched_item_indices.first().copied();

    SearchState { matched_item_indices, current_match_index: 0, matched_item_index }
}
