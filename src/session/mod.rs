//! 会话：应用核心状态的单一持有者
//!
//! 文档、展开集、投影行列表、搜索状态与生成结果都由会话独占，
//! 每次变更整体替换快照（文档以 `Arc<Value>` 共享，解析后只读），
//! 渲染方只读引用，不存在环境全局状态。

pub mod notify;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::emit::{render_schema, GeneratedType};
use crate::model::events::SessionEvent;
use crate::model::json_tree::{flatten_json_tree, toggle_expanded_path, JsonTreeItem};
use crate::model::schema::infer_schema;
use crate::model::search::{search_tree_items, SearchState};
use crate::model::target_language::TargetLanguage;
use crate::session::notify::NotificationHub;
use crate::utils::clipboard;
use crate::utils::debounce::Debouncer;
use crate::utils::fs::{choose_save_directory, save_generated_type_to_files, SaveFileResult};
use crate::utils::naming::to_class_name_camel_case;

/// 搜索输入的静默窗口
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("状态错误: {0}")]
    State(String),
}

pub struct JsonSession {
    /// 解析成功后的只读文档快照
    document: Option<Arc<Value>>,
    expanded_nodes: HashSet<String>,
    flattened_items: Vec<JsonTreeItem>,
    search_state: SearchState,
    target_language: TargetLanguage,
    generated_type: Option<GeneratedType>,
    /// 上一次用于生成的原始文本，语言/配置变更时重新生成
    last_type_input: String,
    /// 类型生成侧的通知（解析失败、复制、保存）
    type_events: NotificationHub,
    /// 结构视图侧的通知（解析失败）
    structure_events: NotificationHub,
    search_debouncer: Debouncer<String>,
}

impl JsonSession {
    pub fn new() -> Self {
        Self::with_search_debounce(SEARCH_DEBOUNCE)
    }

    /// 自定义搜索防抖窗口（测试与嵌入方用）
    pub fn with_search_debounce(window: Duration) -> Self {
        Self {
            document: None,
            expanded_nodes: HashSet::new(),
            flattened_items: Vec::new(),
            search_state: SearchState::default(),
            target_language: TargetLanguage::default(),
            generated_type: None,
            last_type_input: String::new(),
            type_events: NotificationHub::new(),
            structure_events: NotificationHub::new(),
            search_debouncer: Debouncer::new(window),
        }
    }

    // === 只读访问 ===

    pub fn document(&self) -> Option<&Arc<Value>> {
        self.document.as_ref()
    }

    pub fn flattened_items(&self) -> &[JsonTreeItem] {
        &self.flattened_items
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search_state
    }

    pub fn generated_type(&self) -> Option<&GeneratedType> {
        self.generated_type.as_ref()
    }

    pub fn target_language(&self) -> &TargetLanguage {
        &self.target_language
    }

    pub fn type_notification(&self) -> Option<SessionEvent> {
        self.type_events.current()
    }

    pub fn structure_notification(&self) -> Option<SessionEvent> {
        self.structure_events.current()
    }

    // === 结构视图 ===

    /// 解析新文档。失败时保留旧文档，发出解析失败通知；
    /// 成功时展开集清空、搜索归零、行列表整体替换。
    pub fn parse_structure(&mut self, text: &str) -> Result<(), AppError> {
        self.structure_events.clear_parse_failure();
        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                self.document = Some(Arc::new(value));
                self.expanded_nodes.clear();
                self.search_state = SearchState::default();
                self.search_debouncer.cancel();
                self.reflatten(false);
                tracing::info!("文档解析成功，共 {} 行", self.flattened_items.len());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("文档解析失败: {}", e);
                self.structure_events.publish(SessionEvent::JsonParsingFailed);
                Err(AppError::Parse(e))
            }
        }
    }

    /// 切换节点展开状态并重建投影
    pub fn toggle_node_expanded(&mut self, path: &str) {
        toggle_expanded_path(&mut self.expanded_nodes, path);
        self.reflatten(false);
    }

    fn reflatten(&mut self, expand_all: bool) {
        self.flattened_items = match &self.document {
            Some(document) => flatten_json_tree(document, &self.expanded_nodes, expand_all),
            None => Vec::new(),
        };
    }

    // === 搜索 ===

    /// 提交查询文本；静默窗口内的连续输入合并为一次扫描
    pub fn submit_search_query(&mut self, query: &str) {
        self.search_debouncer.submit(query.to_string());
    }

    /// 轮询防抖器，查询沉淀后执行同步搜索；执行了返回 true
    pub fn poll_search(&mut self) -> bool {
        match self.search_debouncer.poll() {
            Some(query) => {
                self.apply_search_query(&query);
                true
            }
            None => false,
        }
    }

    /// 立即执行一次搜索。非空查询先把整棵树强制展开再扫描，
    /// 折叠子树里的匹配才可发现；空查询重置搜索状态，且仅在
    /// 没有任何行保持展开时回落到全折叠投影。
    pub fn apply_search_query(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.search_state = SearchState::default();
            if !self.flattened_items.iter().any(|item| item.expanded()) {
                self.reflatten(false);
            }
            return;
        }
        self.reflatten(true);
        self.search_state = search_tree_items(&self.flattened_items, query);
        tracing::debug!("搜索 \"{}\" 命中 {} 处", query, self.search_state.total_matches());
    }

    /// 清空查询并丢弃未沉淀的输入
    pub fn clear_search_query(&mut self) {
        self.search_debouncer.cancel();
        self.apply_search_query("");
    }

    /// 游标前进；无匹配或已在末尾返回 false
    pub fn navigate_to_next_match(&mut self) -> bool {
        match self.search_state.next() {
            Some(next) => {
                self.search_state = next;
                true
            }
            None => false,
        }
    }

    /// 游标后退；无匹配或已在起点返回 false
    pub fn navigate_to_previous_match(&mut self) -> bool {
        match self.search_state.previous() {
            Some(previous) => {
                self.search_state = previous;
                true
            }
            None => false,
        }
    }

    // === 类型生成 ===

    /// 解析文本并生成当前目标语言的类型声明，整体替换旧结果
    pub fn generate_type_from_json(&mut self, text: &str) -> Result<(), AppError> {
        self.type_events.clear_parse_failure();
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("类型生成输入解析失败: {}", e);
                self.type_events.publish(SessionEvent::JsonParsingFailed);
                return Err(AppError::Parse(e));
            }
        };

        let schema = infer_schema(&value, self.target_language.effective_class_name());
        let generated = render_schema(&schema, &self.target_language);
        tracing::info!(
            "已生成 {} 个 {} 类型",
            generated.classes.len(),
            self.target_language.display_name()
        );
        self.last_type_input = text.to_string();
        self.generated_type = Some(generated);
        Ok(())
    }

    /// 切换目标语言（或其配置）；已经生成过就按新配置重新生成
    pub fn set_target_language(&mut self, language: TargetLanguage) {
        self.target_language = language;
        self.regenerate_if_needed();
    }

    /// 规整用户输入的类名后写回当前语言配置
    pub fn set_class_name(&mut self, raw: &str) {
        self.type_events.clear_parse_failure();
        let formatted = to_class_name_camel_case(raw);
        self.target_language = self.target_language.with_class_name(&formatted);
        self.regenerate_if_needed();
    }

    fn regenerate_if_needed(&mut self) {
        if self.generated_type.is_some() {
            let text = self.last_type_input.clone();
            // 上次生成已解析成功，重放同一文本不会失败
            let _ = self.generate_type_from_json(&text);
        }
    }

    /// 原样美化输入文本；空白或非法输入返回 None
    pub fn format_json(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let value: Value = serde_json::from_str(text).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }

    // === 外部协作 ===

    /// 复制文本到剪贴板并发通知；失败也有可见通知
    pub fn copy_to_clipboard(&mut self, text: &str) {
        match clipboard::copy_to_clipboard(text) {
            Ok(()) => self.type_events.publish(SessionEvent::ContentCopied),
            Err(e) => {
                tracing::warn!("剪贴板写入失败: {}", e);
                self.type_events.publish(SessionEvent::ClipboardFailed);
            }
        }
    }

    /// 把生成结果写入目录。`directory` 为 None 时弹目录选择框，
    /// 用户取消只返回 Cancelled，不发任何通知。
    pub fn save_generated_type(&mut self, directory: Option<PathBuf>) -> SaveFileResult {
        let Some(generated) = &self.generated_type else {
            return SaveFileResult::Cancelled;
        };
        let directory = match directory.or_else(choose_save_directory) {
            Some(directory) => directory,
            None => return SaveFileResult::Cancelled,
        };

        let result = save_generated_type_to_files(
            generated,
            self.target_language.file_extension(),
            self.target_language.save_classes_as_separate_files(),
            &directory,
        );
        match result {
            SaveFileResult::Success => self.type_events.publish(SessionEvent::FileSaved),
            SaveFileResult::Failure => self.type_events.publish(SessionEvent::FileSavedError),
            SaveFileResult::Cancelled => {}
        }
        result
    }
}

impl Default for JsonSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::target_language::{GoConfig, JavaConfig};
    use tempfile::TempDir;

    fn session() -> JsonSession {
        // 测试不关心防抖节奏，用零窗口让 poll 立即生效
        JsonSession::with_search_debounce(Duration::ZERO)
    }

    #[test]
    fn test_parse_builds_collapsed_projection() {
        let mut s = session();
        s.parse_structure(r#"{"a": {"b": 1}}"#).expect("解析应该成功");

        assert_eq!(s.flattened_items().len(), 1, "新文档默认全折叠");
        assert_eq!(s.flattened_items()[0].path(), "root");
    }

    #[test]
    fn test_parse_failure_yields_event_and_no_rows() {
        let mut s = session();
        let result = s.parse_structure(r#"{"a": 1,"#);

        assert!(result.is_err());
        assert_eq!(s.flattened_items().len(), 0, "失败不得产出部分树");
        assert_eq!(s.structure_notification(), Some(SessionEvent::JsonParsingFailed));

        // 重新解析的第一步清除滞留的失败通知
        s.parse_structure(r#"{"a": 1}"#).expect("解析应该成功");
        assert_eq!(s.structure_notification(), None);
    }

    #[test]
    fn test_new_parse_resets_expansion() {
        let mut s = session();
        s.parse_structure(r#"{"a": {"b": 1}}"#).unwrap();
        s.toggle_node_expanded("root");
        s.toggle_node_expanded("root.a");
        assert!(s.flattened_items().len() > 1);

        s.parse_structure(r#"{"x": 1}"#).unwrap();
        assert_eq!(s.flattened_items().len(), 1, "展开集必须随新文档清空");
    }

    #[test]
    fn test_search_forces_full_expansion() {
        let mut s = session();
        s.parse_structure(r#"{"a": {"b": {"deep": "axx"}}}"#).unwrap();
        assert_eq!(s.flattened_items().len(), 1);

        s.submit_search_query("ax");
        assert!(s.poll_search(), "零窗口下查询应立即沉淀");

        // 折叠子树里的行在扫描用投影里必须可见
        let paths: Vec<&str> = s.flattened_items().iter().map(|i| i.path()).collect();
        assert!(paths.contains(&"root.a.b.deep"));
        assert_eq!(s.search_state().total_matches(), 1);
        assert_eq!(
            s.search_state().matched_item_index,
            Some(3),
            "高亮应指向匹配行 {:?}",
            paths
        );
    }

    #[test]
    fn test_navigation_through_session() {
        let mut s = session();
        s.parse_structure(r#"{"k1": "hit", "k2": "hit"}"#).unwrap();
        s.apply_search_query("hit");

        assert!(!s.navigate_to_previous_match(), "游标在起点时 previous 是无操作");
        assert!(s.navigate_to_next_match());
        assert!(!s.navigate_to_next_match(), "游标在末尾时 next 是无操作");
        assert!(s.navigate_to_previous_match());
        assert_eq!(s.search_state().current_match_index, 0);
    }

    #[test]
    fn test_clear_query_keeps_rows_that_stay_expanded() {
        let mut s = session();
        s.parse_structure(r#"{"a": {"b": 1}}"#).unwrap();
        s.apply_search_query("b");
        assert!(s.flattened_items().len() > 1);

        // 强制展开的投影里行都带 expanded 标记，清空查询保持现状
        s.clear_search_query();
        assert!(!s.search_state().has_matches());
        assert!(s.flattened_items().len() > 1, "有行保持展开时不回落");
    }

    #[test]
    fn test_generate_and_regenerate_on_language_change() {
        let mut s = session();
        s.generate_type_from_json(r#"{"id": 1}"#).expect("生成应该成功");
        let kotlin_text = s.generated_type().unwrap().string_representation.clone();
        assert!(kotlin_text.contains("data class JsonClass"));

        s.set_target_language(TargetLanguage::Java(JavaConfig::default()));
        let java_text = &s.generated_type().unwrap().string_representation;
        assert!(java_text.contains("public class JsonClass"), "换语言应重新生成: {}", java_text);
    }

    #[test]
    fn test_generate_failure_publishes_event() {
        let mut s = session();
        assert!(s.generate_type_from_json(r#"{"broken"#).is_err());
        assert!(s.generated_type().is_none(), "失败不得留下部分结果");
        assert_eq!(s.type_notification(), Some(SessionEvent::JsonParsingFailed));

        s.generate_type_from_json(r#"{"ok": true}"#).unwrap();
        assert_eq!(s.type_notification(), None, "成功解析应清除滞留的失败通知");
    }

    #[test]
    fn test_set_class_name_normalizes_and_regenerates() {
        let mut s = session();
        s.generate_type_from_json(r#"{"id": 1}"#).unwrap();
        s.set_class_name("user profile");

        assert_eq!(s.target_language().class_name(), "UserProfile");
        let text = &s.generated_type().unwrap().string_representation;
        assert!(text.contains("data class UserProfile"));
    }

    #[test]
    fn test_save_without_generation_is_cancelled() {
        let mut s = session();
        let dir = TempDir::new().unwrap();
        assert_eq!(s.save_generated_type(Some(dir.path().to_path_buf())), SaveFileResult::Cancelled);
        assert_eq!(s.type_notification(), None, "取消不发通知");
    }

    #[test]
    fn test_save_go_single_file() {
        let mut s = session();
        s.set_target_language(TargetLanguage::Go(GoConfig::default()));
        s.generate_type_from_json(r#"{"id": 1}"#).unwrap();

        let dir = TempDir::new().unwrap();
        let result = s.save_generated_type(Some(dir.path().to_path_buf()));
        assert_eq!(result, SaveFileResult::Success);
        assert!(dir.path().join("JsonStruct.go").exists());
        assert_eq!(s.type_notification(), Some(SessionEvent::FileSaved));
    }

    #[test]
    fn test_save_java_separate_files() {
        let mut s = session();
        s.set_target_language(TargetLanguage::Java(JavaConfig::default()));
        s.generate_type_from_json(r#"{"inner": {"x": 1}}"#).unwrap();

        let dir = TempDir::new().unwrap();
        assert_eq!(s.save_generated_type(Some(dir.path().to_path_buf())), SaveFileResult::Success);
        assert!(dir.path().join("JsonClass.java").exists());
        assert!(dir.path().join("Inner.java").exists(), "Java 默认按类拆分文件");
    }

    #[test]
    fn test_format_json() {
        let s = session();
        assert_eq!(s.format_json("   "), None);
        assert_eq!(s.format_json(r#"{"a":1,"#), None);

        let pretty = s.format_json(r#"{"a":1}"#).expect("合法输入应能美化");
        assert_eq!(pretty, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_debounce_coalesces_queries() {
        let mut s = JsonSession::with_search_debounce(Duration::from_millis(200));
        s.parse_structure(r#"{"alpha": 1}"#).unwrap();

        s.submit_search_query("a");
        s.submit_search_query("al");
        assert!(!s.poll_search(), "窗口未满不应扫描");
        assert!(!s.search_state().has_matches());

        std::thread::sleep(Duration::from_millis(250));
        assert!(s.poll_search());
        assert_eq!(s.search_state().total_matches(), 1, "只按最后一次输入扫描");
    }
}
