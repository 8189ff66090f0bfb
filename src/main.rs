#[tokio::main]
async fn main() {
    if let Err(e) = mediscan::run().await {
        eprintln!("mediscan failed to start: {e}");
        std::process::exit(1);
    }
}
