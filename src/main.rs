// Kiln - production build orchestrator
// Entry point with clean separation of concerns

use kiln::cli::CliHandler;

#[tokio::main]
async fn main() {
    let handler = CliHandler::new();
    handler.run().await;
}
