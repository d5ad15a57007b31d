//! Clipboard  跨平台剪贴板封装
//!
//! 尽力而为：失败由调用方决定是否提示，这里不重试

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("剪贴板错误: {0}")]
    Clip(String),
}

/// 将文本复制到系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

/// 从系统剪贴板获取文本（用于测试回读）
#[cfg(test)]
pub fn get_clipboard_contents() -> Result<String, ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.get_contents()
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_roundtrip() {
        let test_text = "生成的类型声明";

        // 无显示服务的环境没有剪贴板，直接跳过
        if copy_to_clipboard(test_text).is_err() {
            return;
        }

        let clipboard_content = get_clipboard_contents().expect("从剪贴板读取应该成功");
        assert_eq!(clipboard_content, test_text, "剪贴板内容应该与复制的文本一致");
    }

    #[test]
    fn test_clipboard_unicode() {
        let unicode_text = "data class 用户(val 名称: String? = null) ✨";

        if copy_to_clipboard(unicode_text).is_err() {
            return;
        }

        let clipboard_content = get_clipboard_contents().expect("从剪贴板读取应该成功");
        assert_eq!(clipboard_content, unicode_text, "剪贴板应该正确处理Unicode字符");
    }
}
