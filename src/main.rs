//! 程序入口：初始化日志，从文件读取JSON并打印生成的类型声明

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::fmt::SubscriberBuilder;

use json_gongjiang::{
    GoConfig, JavaConfig, JsonSession, KotlinConfig, TargetLanguage,
};

fn main() -> Result<()> {
    SubscriberBuilder::default().init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("用法: json_gongjiang <JSON文件> [kotlin|java|go] [类名]");
    };
    let language_name = args.next().unwrap_or_else(|| "kotlin".to_string());
    let class_name = args.next();

    let language = match language_name.as_str() {
        "kotlin" => TargetLanguage::Kotlin(KotlinConfig::default()),
        "java" => TargetLanguage::Java(JavaConfig::default()),
        "go" => TargetLanguage::Go(GoConfig::default()),
        other => bail!("不支持的目标语言: {}", other),
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("读取文件失败: {}", path.display()))?;

    let mut session = JsonSession::new();
    session.set_target_language(language);
    if let Some(name) = class_name {
        session.set_class_name(&name);
    }

    // 结构视图走同一份文本，顺带校验并记录规模
    if session.parse_structure(&text).is_err() {
        bail!("无法解析 {}: 不是合法的JSON", path.display());
    }
    session.generate_type_from_json(&text)?;

    let generated = session
        .generated_type()
        .context("生成结果缺失")?;
    tracing::info!(
        "{} -> {} 个 {} 类型",
        path.display(),
        generated.classes.len(),
        session.target_language().display_name()
    );
    println!("{}", generated.string_representation);

    Ok(())
}
