//! 会话事件：带自动过期时长的瞬时通知

use std::time::Duration;

/// 一次操作的结果通知。`timeout` 为零的事件不自动过期，
/// 停留到被新事件顶替或被显式清除为止。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ContentCopied,
    JsonParsingFailed,
    FileSaved,
    FileSavedError,
    ClipboardFailed,
}

impl SessionEvent {
    pub fn message(&self) -> &'static str {
        match self {
            SessionEvent::ContentCopied => "内容已复制到剪贴板",
            SessionEvent::JsonParsingFailed => "JSON解析失败，输入无效",
            SessionEvent::FileSaved => "生成的类型已保存",
            SessionEvent::FileSavedError => "保存文件出错",
            SessionEvent::ClipboardFailed => "复制到剪贴板失败",
        }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            // 解析错误停留到下一次解析清除
            SessionEvent::JsonParsingFailed => Duration::ZERO,
            _ => Duration::from_secs(3),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            SessionEvent::JsonParsingFailed
                | SessionEvent::FileSavedError
                | SessionEvent::ClipboardFailed
        )
    }
}
