use colored::Colorize;
use dwhflow_cloud::{DeploymentPlan, Providers, decommission};
use dwhflow_cloud_aws::{AwsClients, PostgresProbe};

/// クラスタ（最終スナップショットなし）とロールを削除
///
/// 削除完了までは待たない。失敗したステップがあればエラーを返す。
pub async fn handle(clients: &AwsClients, plan: &DeploymentPlan) -> anyhow::Result<()> {
    println!("{}", "Redshift クラスタを削除中...".yellow());
    println!("クラスタ: {}", plan.cluster.identifier.cyan());
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

    let report = decommission(providers, plan).await;

    println!();
    for step in &report.succeeded {
        println!("  ✓ {}", step.message);
    }
    for step in &report.failed {
        println!(
            "  {} {}: {}",
            "✗".red(),
            step.step,
            step.error.as_deref().unwrap_or_default()
        );
    }

    println!();
    if report.is_success() {
        println!("{}", "✓ 削除をリクエストしました".green().bold());
        Ok(())
    } else {
        anyhow::bail!("削除に失敗したステップがあります ({})", report)
    }
}
