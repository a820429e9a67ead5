use anyhow::Result;
use pattern_worksheet::utils::logging;
use pattern_worksheet::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，命令行参数中的模式编号优先
    let selected: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env().with_selected_patterns(selected.join(" "));

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    app.run().await?;

    Ok(())
}
