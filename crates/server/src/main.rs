#[tokio::main]
async fn main() -> anyhow::Result<()> {
    adforge_server::start().await
}
