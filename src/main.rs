#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cinema_club_lib::run().await
}
