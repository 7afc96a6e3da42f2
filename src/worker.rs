use crate::r#gen::{ContentGenClient, parse_questions};
use crate::logger;
use crate::models::{GenEvent, GenRequest};
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Spawn the background thread that services generation-API requests. The UI
/// thread owns all state; this thread only turns requests into events.
pub fn spawn_gen_worker(
    event_tx: Sender<GenEvent>,
    request_rx: Receiver<GenRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("mcq-studio::gen_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Failed to start worker runtime: {e}"));
                    return;
                }
            };
            let client = match ContentGenClient::from_env() {
                Ok(client) => client,
                Err(e) => {
                    logger::log(&format!("Failed to build content-gen client: {e}"));
                    return;
                }
            };

            loop {
                match request_rx.recv() {
                    Ok(GenRequest::FetchPrompt { process_name }) => {
                        logger::log(&format!("Fetching prompt for {process_name}"));
                        match rt.block_on(client.fetch_prompt(&process_name)) {
                            Ok(prompt) => {
                                let _ = event_tx.send(GenEvent::PromptLoaded { prompt });
                            }
                            Err(e) => {
                                logger::log(&format!("Prompt fetch failed: {e}"));
                                let _ = event_tx.send(GenEvent::PromptFailed {
                                    error: e.to_string(),
                                });
                            }
                        }
                    }
                    Ok(GenRequest::Generate(params)) => {
                        logger::log(&format!(
                            "Generating {} questions via {}",
                            params.number_of_question, params.process_name
                        ));
                        match rt.block_on(client.generate(&params)) {
                            Ok(message) => match parse_questions(&message) {
                                Ok((records, dropped)) => {
                                    logger::log(&format!(
                                        "Parsed {} questions ({} dropped)",
                                        records.len(),
                                        dropped
                                    ));
                                    let _ = event_tx.send(GenEvent::Generated { records, dropped });
                                }
                                Err(error) => {
                                    logger::log(&format!("Normalization failed: {error}"));
                                    let _ = event_tx.send(GenEvent::GenerateFailed { error });
                                }
                            },
                            Err(e) => {
                                logger::log(&format!("Generate request failed: {e}"));
                                let _ = event_tx.send(GenEvent::GenerateFailed {
                                    error: format!("Generation failed: {e}"),
                                });
                            }
                        }
                    }
                    Err(_) => {
                        // Channel disconnected, exit worker
                        logger::log("Worker channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn generation worker thread")
}
