#[tokio::main]
async fn main() {
    campus_events_backend::run().await;
}
