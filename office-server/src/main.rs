use office_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载环境 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置并准备工作目录
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    // 3. 初始化日志 (stdout + work_dir/logs 按天滚动)
    let logs_dir = config.logs_dir();
    init_logger_with_file(None, logs_dir.to_str());

    print_banner();
    tracing::info!("Ember Office server starting...");

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await;

    // 5. 启动 HTTP 服务器 (Server::run 会自动启动后台任务)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
