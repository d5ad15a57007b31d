//! Java 生成器：record / Lombok / 普通类三种类体风格

use crate::emit::{assemble, GeneratedClass, GeneratedType};
use crate::model::schema::{FieldType, PrimitiveKind, RecordType, TypeSchema};
use crate::model::target_language::{JavaConfig, JavaSerializationFramework};
use crate::utils::naming::{avoid_reserved, to_camel_case};

const JAVA_RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "record", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while",
];

pub fn render(schema: &TypeSchema, config: &JavaConfig) -> GeneratedType {
    let classes: Vec<GeneratedClass> = schema
        .records
        .iter()
        .map(|record| GeneratedClass {
            class_name: record.name.clone(),
            class_body: render_class(record, config),
        })
        .collect();

    assemble(schema.root.clone(), imports_for(schema, config), classes)
}

/// 只在确有需要时生成 import 块：List 容器与 Lombok 注解
fn imports_for(schema: &TypeSchema, config: &JavaConfig) -> Option<String> {
    let mut imports = Vec::new();
    let uses_list = !config.use_arrays
        && schema
            .records
            .iter()
            .flat_map(|r| r.fields.iter())
            .any(|f| matches!(f.ty, FieldType::ArrayOf(_)));
    if uses_list {
        imports.push("import java.util.List;");
    }
    if config.serialization_framework == JavaSerializationFramework::Lombok {
        imports.push("import lombok.Data;");
    }
    if imports.is_empty() {
        None
    } else {
        Some(imports.join("\n"))
    }
}

fn render_class(record: &RecordType, config: &JavaConfig) -> String {
    match config.serialization_framework {
        JavaSerializationFramework::Records => render_record(record, config),
        JavaSerializationFramework::Lombok => render_fields_class(record, config, true),
        JavaSerializationFramework::PlainTypes => render_fields_class(record, config, false),
    }
}

fn render_record(record: &RecordType, config: &JavaConfig) -> String {
    if record.fields.is_empty() {
        return format!("public record {}() {{}}", record.name);
    }
    let components: Vec<String> = record
        .fields
        .iter()
        .map(|f| format!("        {} {}", type_text(&f.ty, config), field_name(&f.json_name)))
        .collect();
    format!("public record {}(\n{}\n) {{}}", record.name, components.join(",\n"))
}

fn render_fields_class(record: &RecordType, config: &JavaConfig, lombok: bool) -> String {
    let mut out = String::new();
    if lombok {
        out.push_str("@Data\n");
    }
    out.push_str(&format!("public class {} {{\n", record.name));
    // Lombok 生成访问器，普通类直接暴露公有字段
    let modifier = if lombok { "private" } else { "public" };
    for field in &record.fields {
        out.push_str(&format!(
            "    {} {} {};\n",
            modifier,
            type_text(&field.ty, config),
            field_name(&field.json_name)
        ));
    }
    out.push('}');
    out
}

fn field_name(json_name: &str) -> String {
    avoid_reserved(to_camel_case(json_name), JAVA_RESERVED)
}

fn type_text(ty: &FieldType, config: &JavaConfig) -> String {
    match ty {
        FieldType::Primitive(kind) => primitive_text(*kind).to_string(),
        FieldType::ArrayOf(inner) => {
            let element = match inner.as_ref() {
                FieldType::UnknownOrNull => "Object".to_string(),
                other => type_text(other, config),
            };
            if config.use_arrays {
                format!("{}[]", element)
            } else {
                format!("List<{}>", element)
            }
        }
        FieldType::Reference(name) => name.clone(),
        FieldType::UnknownOrNull => "Object".to_string(),
    }
}

/// 引用类型包装类，字段可空时不需要额外标记
fn primitive_text(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "String",
        PrimitiveKind::Int => "Integer",
        PrimitiveKind::Long => "Long",
        PrimitiveKind::Double => "Double",
        PrimitiveKind::Bool => "Boolean",
    }
}
