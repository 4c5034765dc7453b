use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hostex_mcp::main_entry().await
}
