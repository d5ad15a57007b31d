//! Go 生成器：struct + json tag，可选字段用指针与 omitempty 表达

use crate::emit::{assemble, GeneratedClass, GeneratedType};
use crate::model::schema::{Field, FieldType, PrimitiveKind, RecordType, TypeSchema};
use crate::model::target_language::GoConfig;
use crate::utils::naming::to_pascal_case;

pub fn render(schema: &TypeSchema, config: &GoConfig) -> GeneratedType {
    let classes: Vec<GeneratedClass> = schema
        .records
        .iter()
        .map(|record| GeneratedClass {
            class_name: record.name.clone(),
            class_body: render_struct(record, config),
        })
        .collect();

    // Go 不需要 import 块，json tag 来自标准库
    assemble(schema.root.clone(), None, classes)
}

fn render_struct(record: &RecordType, config: &GoConfig) -> String {
    if record.fields.is_empty() {
        return format!("type {} struct{{}}", record.name);
    }
    let mut out = format!("type {} struct {{\n", record.name);
    for field in &record.fields {
        out.push_str(&render_field(field, config));
    }
    out.push('}');
    out
}

fn render_field(field: &Field, config: &GoConfig) -> String {
    let name = to_pascal_case(&field.json_name);
    let base = type_text(&field.ty, config);
    let optional = config.all_properties_optional || field.optional;
    let ty = if optional && config.use_pointers && !base.starts_with("interface") {
        format!("*{}", base)
    } else {
        base
    };
    let tag = if optional && config.omit_empty {
        format!("`json:\"{},omitempty\"`", field.json_name)
    } else {
        format!("`json:\"{}\"`", field.json_name)
    };
    format!("\t{} {} {}\n", name, ty, tag)
}

fn type_text(ty: &FieldType, config: &GoConfig) -> String {
    match ty {
        FieldType::Primitive(kind) => primitive_text(*kind).to_string(),
        FieldType::ArrayOf(inner) => format!("[]{}", type_text(inner, config)),
        FieldType::Reference(name) => name.clone(),
        FieldType::UnknownOrNull => "interface{}".to_string(),
    }
}

fn primitive_text(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => "string",
        PrimitiveKind::Int => "int",
        PrimitiveKind::Long => "int64",
        PrimitiveKind::Double => "float64",
        PrimitiveKind::Bool => "bool",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::infer_schema;
    use serde_json::json;

    #[test]
    fn test_struct_shape_with_tags() {
        let doc = json!({"user_id": 1, "name": "张三", "score": 1.5});
        let schema = infer_schema(&doc, "JsonStruct");
        let generated = render(&schema, &GoConfig::default());

        let body = &generated.classes[0].class_body;
        assert!(body.starts_with("type JsonStruct struct {\n"));
        assert!(body.contains("\tUserId int `json:\"user_id\"`\n"));
        assert!(body.contains("\tName string `json:\"name\"`\n"));
        assert!(body.contains("\tScore float64 `json:\"score\"`\n"));
        assert_eq!(generated.imports, None);
    }

    #[test]
    fn test_optional_field_pointer_and_omitempty() {
        let doc = json!({"nick": null, "id": 1});
        let schema = infer_schema(&doc, "JsonStruct");
        let generated = render(&schema, &GoConfig::default());

        let body = &generated.classes[0].class_body;
        // null 源值：interface{} 不加指针，但 tag 带 omitempty
        assert!(body.contains("\tNick interface{} `json:\"nick,omitempty\"`\n"), "{}", body);
        assert!(body.contains("\tId int `json:\"id\"`\n"));
    }

    #[test]
    fn test_nested_and_slice_types() {
        let doc = json!({"profile": {"bio": "x"}, "tags": ["a"], "rows": [[1]]});
        let schema = infer_schema(&doc, "JsonStruct");
        let generated = render(&schema, &GoConfig::default());

        let body = &generated.classes[0].class_body;
        assert!(body.contains("\tProfile Profile `json:\"profile\"`\n"));
        assert!(body.contains("\tTags []string `json:\"tags\"`\n"));
        assert!(body.contains("\tRows [][]int `json:\"rows\"`\n"));
    }

    #[test]
    fn test_all_properties_optional_uses_pointers() {
        let doc = json!({"id": 1, "name": "x"});
        let schema = infer_schema(&doc, "JsonStruct");
        let config = GoConfig { all_properties_optional: true, ..GoConfig::default() };
        let generated = render(&schema, &config);

        let body = &generated.classes[0].class_body;
        assert!(body.contains("\tId *int `json:\"id,omitempty\"`\n"), "{}", body);
        assert!(body.contains("\tName *string `json:\"name,omitempty\"`\n"));
    }

    #[test]
    fn test_empty_struct() {
        let schema = infer_schema(&json!("scalar"), "JsonStruct");
        let generated = render(&schema, &GoConfig::default());
        assert_eq!(generated.classes[0].class_body, "type JsonStruct struct{}");
    }
}
