use anyhow::Context;
use colored::Colorize;
use dwhflow_cloud::{ClusterRequest, DeploymentPlan, Providers, provision};
use dwhflow_cloud_aws::{AwsClients, PostgresProbe};

/// ロール → クラスタ → available 待ち → ingress → 接続確認
///
/// 成功時はエンドポイントのホスト名を返す。
pub async fn handle(clients: &AwsClients, plan: &DeploymentPlan) -> anyhow::Result<String> {
    println!("{}", "Redshift クラスタを作成中...".yellow());
    println!("クラスタ: {}", plan.cluster.identifier.cyan());
    println!(
        "構成: {} / {}",
        plan.cluster.cluster_type.cyan(),
        plan.cluster.node_type.cyan()
    );
    println!("ロール: {}", plan.role.name.cyan());

    let identity = clients.identity();
    let warehouse = clients.warehouse();
    let network = clients.network();
    let providers = Providers {
        identity: &identity,
        warehouse: &warehouse,
        network: &network,
        probe: &PostgresProbe,
    };

    let report = provision(providers, plan)
        .await
        .with_context(|| format!("クラスタ '{}' の作成に失敗しました", plan.cluster.identifier))?;

    println!();
    if report.role.created {
        println!("  ✓ ロール作成: {}", report.role.arn);
    } else {
        println!("  ℹ ロールは既に存在します: {}", report.role.arn);
    }
    match report.cluster_request {
        ClusterRequest::Created => println!("  ✓ クラスタ作成リクエスト完了"),
        ClusterRequest::AlreadyExists => println!("  ℹ クラスタは既に存在します"),
    }
    println!("  ✓ ステータス: {}", report.cluster.status);
    if report.ingress.is_open() {
        println!("  ✓ ingress: {}", report.ingress);
    } else {
        println!("  {} ingress: {}", "⚠".yellow(), report.ingress);
    }
    println!(
        "  ✓ 接続確認: {}@{}",
        plan.cluster.master_username, plan.cluster.db_name
    );

    println!();
    println!("{}", "✓ クラスタの準備ができました".green().bold());
    println!("{}", report.endpoint);

    Ok(report.endpoint)
}
