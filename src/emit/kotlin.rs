//! Kotlin 生成器：data class + 序列化框架注解

use crate::emit::{assemble, GeneratedClass, GeneratedType};
use crate::model::schema::{Field, FieldType, PrimitiveKind, RecordType, TypeSchema};
use crate::model::target_language::{KotlinConfig, KotlinSerializationFramework};
use crate::utils::naming::{avoid_reserved, to_camel_case};

/// Kotlin 硬关键字，不能直接用作属性名
const KOTLIN_RESERVED: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

pub fn render(schema: &TypeSchema, config: &KotlinConfig) -> GeneratedType {
    let classes: Vec<GeneratedClass> = schema
        .records
        .iter()
        .map(|record| GeneratedClass {
            class_name: record.name.clone(),
            class_body: render_class(record, config),
        })
        .collect();

    assemble(schema.root.clone(), Some(imports_for(config.serialization_framework)), classes)
}

fn imports_for(framework: KotlinSerializationFramework) -> String {
    match framework {
        KotlinSerializationFramework::Kotlinx => {
            "import kotlinx.serialization.SerialName\nimport kotlinx.serialization.Serializable"
                .to_string()
        }
        KotlinSerializationFramework::Gson => {
            "import com.google.gson.annotations.SerializedName".to_string()
        }
        KotlinSerializationFramework::Jackson => {
            "import com.fasterxml.jackson.annotation.JsonProperty".to_string()
        }
    }
}

fn render_class(record: &RecordType, config: &KotlinConfig) -> String {
    let mut out = String::new();
    if config.serialization_framework == KotlinSerializationFramework::Kotlinx {
        out.push_str("@Serializable\n");
    }
    if record.fields.is_empty() {
        out.push_str(&format!("class {}", record.name));
        return out;
    }

    out.push_str(&format!("data class {}(\n", record.name));
    for field in &record.fields {
        out.push_str(&render_field(field, config));
    }
    out.push(')');
    out
}

fn render_field(field: &Field, config: &KotlinConfig) -> String {
    let annotation = match config.serialization_framework {
        KotlinSerializationFramework::Kotlinx => format!("@SerialName(\"{}\")", field.json_name),
        KotlinSerializationFramework::Gson => format!("@SerializedName(\"{}\")", field.json_name),
        KotlinSerializationFramework::Jackson => format!("@JsonProperty(\"{}\")", field.json_name),
    };
    let property = avoid_reserved(to_camel_case(&field.json_name), KOTLIN_RESERVED);
    let optional = config.all_properties_optional || field.optional;
    let ty = type_text(&field.ty);
    let suffix = if optional { "? = null" } else { "" };

    format!("    {}\n    val {}: {}{},\n", annotation, property, ty, suffix)
}

fn type_text(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(kind) => match kind {
            PrimitiveKind::String => "String".to_string(),
            PrimitiveKind::Int => "Int".to_string(),
            PrimitiveKind::Long => "Long".to_string(),
            PrimitiveKind::Double => "Double".to_string(),
            PrimitiveKind::Bool => "Boolean".to_string(),
        },
        FieldType::ArrayOf(inner) => format!("List<{}>", element_text(inner)),
        FieldType::Reference(name) => name.clone(),
        FieldType::UnknownOrNull => "Any".to_string(),
    }
}

/// 列表元素未知时渲染为可空 Any
fn element_text(ty: &FieldType) -> String {
    match ty {
        FieldType::UnknownOrNull => "Any?".to_string(),
        other => type_text(other),
    }
}
