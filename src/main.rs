use report_hub::{start_server, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    // 加载.env文件
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    info!(
        "报表服务配置 - 端口: {}, 默认每页: {}, 每页上限: {:?}, 缓存: {}",
        config.port, config.default_page_size, config.max_page_size, config.cache_enabled
    );

    match start_server(config).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("报表服务启动失败: {}", e);
            // 打印错误的源链
            let mut source = e.source();
            while let Some(err) = source {
                error!("  由于: {}", err);
                source = err.source();
            }
            Err(e)
        }
    }
}
