use directory_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载 .env 与配置
    let _ = dotenv::dotenv();
    let config = Config::from_env();

    // 2. 日志
    setup_environment(&config)?;
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Directory server starting..."
    );

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
