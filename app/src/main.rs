#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  cancionero_lib::run().await
}
