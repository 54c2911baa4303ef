use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    coffeeshop_api::app::run().await
}
