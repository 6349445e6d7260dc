#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    hcp_terraform_mcp::run().await
}
