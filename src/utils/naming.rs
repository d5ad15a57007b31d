//! 标识符规整：类名/字段名的大小写转换与保留字规避
//!
//! 尽力而为：只保证常见键名能生成合法标识符，病态键名不做完整转义

/// 按非字母数字字符切分并把每段首字母大写，段内其余字符保持原样
/// （"user_name" -> "UserName"，"userName" -> "UserName"）
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for ch in s.chars() {
        if !ch.is_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// PascalCase 后再把首字母小写（"user_name" -> "userName"）
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// 用户输入的类名规整：PascalCase 且不能以数字开头
pub fn to_class_name_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    match pascal.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", pascal),
        _ => pascal,
    }
}

/// 与目标语言保留字冲突时追加下划线
pub fn avoid_reserved(name: String, reserved: &[&str]) -> String {
    if reserved.contains(&name.as_str()) {
        format!("{}_", name)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case_variants() {
        assert_eq!(to_pascal_case("user_name"), "UserName");
        assert_eq!(to_pascal_case("user-name"), "UserName");
        assert_eq!(to_pascal_case("user name"), "UserName");
        assert_eq!(to_pascal_case("userName"), "UserName");
        assert_eq!(to_pascal_case("already"), "Already");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("UserName"), "userName");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_class_name_normalization() {
        assert_eq!(to_class_name_camel_case("my class"), "MyClass");
        assert_eq!(to_class_name_camel_case("3d_model"), "_3dModel");
        assert_eq!(to_class_name_camel_case(""), "");
    }

    #[test]
    fn test_avoid_reserved() {
        assert_eq!(avoid_reserved("type".to_string(), &["type", "func"]), "type_");
        assert_eq!(avoid_reserved("name".to_string(), &["type"]), "name");
    }
}
