mod commands;
mod mode;
mod plan;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use mode::Mode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dwh", version)]
#[command(about = "Redshift クラスタと IAM ロールを作成・削除する", long_about = None)]
struct Cli {
    /// true でクラスタとロールを削除、false で作成
    #[arg(value_name = "DELETE", value_parser = mode::parse_mode, default_value = "false")]
    mode: Mode,

    /// 設定ファイルのパス（省略時は dwh.cfg を探索）
    #[arg(short, long, env = "DWH_CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrへ。RUST_LOG で上書き可能
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Passed value for delete: {}", cli.mode.is_teardown());

    let (config_path, settings) =
        dwhflow_config::load_settings(cli.config).context("設定ファイルを読み込めませんでした")?;
    println!(
        "{} {}",
        "設定ファイル:".bold(),
        config_path.display().to_string().cyan()
    );

    let clients = dwhflow_cloud_aws::AwsClients::connect(&plan::credentials(&settings)).await;
    let plan = plan::deployment_plan(&settings);

    match cli.mode {
        Mode::Provision => {
            let endpoint = commands::up::handle(&clients, &plan).await?;
            tracing::debug!("Provisioned endpoint {}", endpoint);
        }
        Mode::Teardown => {
            commands::down::handle(&clients, &plan).await?;
        }
    }

    Ok(())
}
