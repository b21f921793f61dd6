use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match event_hub::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("event-hub failed to start: {e}");
            ExitCode::FAILURE
        }
    }
}
