//! IO helper: JSON 读写与生成结果落盘

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::emit::GeneratedType;
use crate::session::AppError;

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将JSON数据保存到文件（格式化输出）
pub fn write_json_file(p: &Path, value: &Value) -> Result<(), AppError> {
    let f = File::create(p)?;
    serde_json::to_writer_pretty(f, value)?;
    Ok(())
}

/// 保存结果的三种结局。取消（未选目录）不是错误，
/// 调用方对它不弹任何通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFileResult {
    Success,
    Failure,
    Cancelled,
}

/// 弹目录选择对话框；用户取消时返回 None
pub fn choose_save_directory() -> Option<PathBuf> {
    rfd::FileDialog::new().set_title("选择保存目录").pick_folder()
}

/// 把生成产物写入目录：`separate` 为真时每个类型一个文件
/// （import 块在每个文件里重复一次），否则整体写入单个文件
pub fn save_generated_type_to_files(
    generated: &GeneratedType,
    file_extension: &str,
    separate: bool,
    directory: &Path,
) -> SaveFileResult {
    if separate {
        for class in &generated.classes {
            let class_name =
                if class.class_name.is_empty() { "JsonClass" } else { class.class_name.as_str() };
            let file_name = format!("{}{}", class_name, file_extension);
            let mut content = String::new();
            if let Some(imports) = &generated.imports {
                content.push_str(imports);
                content.push('\n');
            }
            content.push('\n');
            content.push_str(&class.class_body);
            content.push('\n');
            if save_file(&content, directory, &file_name).is_err() {
                return SaveFileResult::Failure;
            }
        }
        SaveFileResult::Success
    } else {
        let base =
            if generated.file_name.is_empty() { "JsonClass" } else { generated.file_name.as_str() };
        let file_name = format!("{}{}", base, file_extension);
        match save_file(&generated.string_representation, directory, &file_name) {
            Ok(()) => SaveFileResult::Success,
            Err(_) => SaveFileResult::Failure,
        }
    }
}

/// 覆盖写入目标文件
fn save_file(content: &str, directory: &Path, file_name: &str) -> Result<(), AppError> {
    let target = directory.join(file_name);
    std::fs::write(&target, content)?;
    tracing::info!("已保存: {}", target.display());
    Ok(())
}
