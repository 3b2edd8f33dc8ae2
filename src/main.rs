use thesaurus::{
    config::StoreConfig, handlers::word_handler::WordBook, logging,
    services::word_service::WordStore, ui::ThesaurusApp,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志系统
    logging::init();

    // 2. 加载 .env 并构造数据库配置
    let store = WordStore::new(StoreConfig::from_env());

    // 3. 界面线程上的单线程运行时，数据库调用同步阻塞执行
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // 建表失败不退出，窗体打开后会弹出连接错误
    if let Err(e) = rt.block_on(store.ensure_schema()) {
        tracing::error!("!!! 初始化表结构失败: {}", e);
    }

    // 4. 启动窗体，关闭窗口后退出
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("📚 The Thesaurus - Desktop Edition")
            .with_inner_size([1100.0, 800.0]),
        ..Default::default()
    };

    tracing::info!("🚀 Thesaurus window starting");
    eframe::run_native(
        "The Thesaurus",
        native_options,
        Box::new(move |_cc| Box::new(ThesaurusApp::new(rt, WordBook::new(store)))),
    )?;
    Ok(())
}
