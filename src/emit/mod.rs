//! 代码生成：把推断出的类型模式渲染为目标语言的声明文本
//!
//! 每次生成整体替换上一次的结果；相同输入与配置必须产出
//! 字节级相同的文本。

pub mod golang;
pub mod java;
pub mod kotlin;

use serde::Serialize;

use crate::model::schema::TypeSchema;
use crate::model::target_language::TargetLanguage;

/// 单个类型声明：类型名 + 渲染好的类体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClass {
    pub class_name: String,
    pub class_body: String,
}

/// 一次生成的完整产物
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedType {
    /// 不含扩展名的主文件名
    pub file_name: String,
    /// import 块，每个文件只出现一次
    pub imports: Option<String>,
    /// 按模式顺序排列：根类型在前，嵌套类型按字段声明序深度优先
    pub classes: Vec<GeneratedClass>,
    /// 拼接后的整体文本
    pub string_representation: String,
}

/// 按当前目标语言分发渲染
pub fn render_schema(schema: &TypeSchema, language: &TargetLanguage) -> GeneratedType {
    match language {
        TargetLanguage::Kotlin(config) => kotlin::render(schema, config),
        TargetLanguage::Java(config) => java::render(schema, config),
        TargetLanguage::Go(config) => golang::render(schema, config),
    }
}

/// 公共装配：import 块在前，类体之间空一行
pub(crate) fn assemble(
    file_name: String,
    imports: Option<String>,
    classes: Vec<GeneratedClass>,
) -> GeneratedType {
    let bodies: Vec<&str> = classes.iter().map(|c| c.class_body.as_str()).collect();
    let mut string_representation = String::new();
    if let Some(block) = &imports {
        string_representation.push_str(block);
        string_representation.push_str("\n\n");
    }
    string_representation.push_str(&bodies.join("\n\n"));

    GeneratedType { file_name, imports, classes, string_representation }
}
