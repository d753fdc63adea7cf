//! Voxloc - 语音文化解析引擎
//!
//! 验证报告入口: 加载配置与授权数据，
//! 输出各文化的覆盖率与缺失翻译清单

use voxloc::application::{
    CultureCoverage, ImportVoiceData, ListCultures, UnresolvedLines, VoiceDataStorePort,
};
use voxloc::config::{load_config, print_config};
use voxloc::infrastructure::adapters::InMemoryAssetProvider;
use voxloc::infrastructure::persistence::json::JsonVoiceDataStore;
use voxloc::EngineState;

fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},voxloc={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Voxloc - 语音文化解析引擎");
    print_config(&config);

    // 资产句柄由外部资产系统提供；报告工具只做解析诊断，用空表即可
    let asset_provider = InMemoryAssetProvider::new().arc();
    let data_store = JsonVoiceDataStore::new(&config.data.voice_data_path).arc();

    // 配置期错误（非法回退链、未注册初始文化）在此处致命失败
    let engine = EngineState::init(&config, asset_provider, data_store.clone())?;

    // 载入授权数据
    if config.data.autoload && data_store.exists() {
        let imported = engine.import_voice_data_handler.handle(ImportVoiceData)?;
        tracing::info!(
            lines = imported.lines,
            assets = imported.assets,
            skipped_lines = imported.skipped_lines,
            skipped_assets = imported.skipped_assets,
            "Voice data loaded"
        );
    } else {
        tracing::warn!(
            path = %data_store.path().display(),
            "No voice data snapshot loaded, report covers an empty table"
        );
    }

    // 覆盖率报告
    let report = engine.culture_coverage_handler.handle(CultureCoverage)?;
    println!();
    println!("Voice culture coverage ({})", report.generated_at.to_rfc3339());
    println!("{:<12} {:>8} {:>8} {:>9}", "culture", "voiced", "total", "coverage");
    for entry in &report.entries {
        println!(
            "{:<12} {:>8} {:>8} {:>8.1}%",
            entry.culture.as_str(),
            entry.lines_with_culture,
            entry.total_lines,
            entry.coverage() * 100.0
        );
    }

    // 缺失翻译清单（逐文化）
    let cultures = engine.list_cultures_handler.handle(ListCultures)?;
    for culture in cultures {
        let unresolved = engine.unresolved_lines_handler.handle(UnresolvedLines {
            culture: culture.code.clone(),
        })?;
        if unresolved.missing.is_empty() {
            continue;
        }
        println!();
        println!(
            "Missing voice lines for '{}' ({} of {}):",
            unresolved.culture,
            unresolved.missing.len(),
            unresolved.total_lines
        );
        for dialogue_id in &unresolved.missing {
            println!("  {}", dialogue_id);
        }
    }

    engine.shutdown();

    Ok(())
}
