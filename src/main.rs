use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    pairterm::cli::run_cli().await
}
