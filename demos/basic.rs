//! Basic Tableread Example
//!
//! Demonstrates the shared-script room in embedded mode: two editors join,
//! push edits, and hear from the simulated collaborator.
//!
//! Run with: cargo run --example basic

use std::time::Duration;

use tableread_core::{RoomConfig, ScriptRoom, UpdateOrigin};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("Tableread Basic Example\n");

    let mut config = RoomConfig::default();
    // Speed the collaborator up so the demo finishes quickly.
    config.peer_interval = Duration::from_secs(2);
    let room = ScriptRoom::with_config(config);

    // Two editors join; each gets the current scene synchronously.
    let mut jane = room.connect();
    let mut leo = room.connect();
    println!("=== Opening scene ===\n\n{}\n", jane.initial_content());

    // Jane pushes an edit; everyone receives it, Jane included.
    let revised = format!("{}\n\nJANE\nOr maybe it was two bad reviews.", jane.initial_content());
    room.update_script(&revised);

    let seen_by_leo = leo.recv().await.ok_or("room closed")?;
    println!("leo sees revision {}", seen_by_leo.revision);
    let echo = jane.recv().await.ok_or("room closed")?;
    println!("jane hears her own edit echoed back as revision {}", echo.revision);

    // Pushing identical content is a no-op; nobody is woken.
    room.update_script(&revised);

    // Wait for the simulated collaborator to chime in.
    let update = leo.recv().await.ok_or("room closed")?;
    assert_eq!(update.origin, UpdateOrigin::SimulatedPeer);
    println!("\n=== Collaborator edit (revision {}) ===\n", update.revision);
    if let Some(block) = update.content.rsplit("\n\n").next() {
        println!("{}\n", block);
    }

    // Leaving empties the room and stops the collaborator.
    room.disconnect(jane.id());
    room.disconnect(leo.id());
    println!("room after close: {:?}", room.stats());

    Ok(())
}
