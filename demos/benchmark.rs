//! Tableread Fan-out Benchmark
//!
//! Measures broadcast throughput of the shared-script room in embedded mode.
//!
//! Run with: cargo run --example benchmark --release

use std::time::{Duration, Instant};

use tableread_core::{RoomConfig, ScriptRoom};

/// Benchmark results
#[derive(Debug)]
struct BenchResults {
    name: String,
    subscribers: usize,
    updates: u64,
    duration: Duration,
    updates_per_sec: f64,
    deliveries_per_sec: f64,
}

impl BenchResults {
    fn print(&self) {
        println!("\n╔══════════════════════════════════════════════════════════╗");
        println!("║  {} ", self.name);
        println!("╠══════════════════════════════════════════════════════════╣");
        println!("║  Subscribers:         {:>10}                         ║", self.subscribers);
        println!("║  Accepted updates:    {:>10}                         ║", self.updates);
        println!("║  Duration:            {:>10.2?}                       ║", self.duration);
        println!("║  Updates/sec:         {:>10.0}                         ║", self.updates_per_sec);
        println!("║  Deliveries/sec:      {:>10.0}                         ║", self.deliveries_per_sec);
        println!("╚══════════════════════════════════════════════════════════╝");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Tableread Fan-out Benchmark");

    for &subscribers in &[1usize, 10, 100] {
        let results = run_fanout(subscribers, 1_000)?;
        results.print();
    }

    Ok(())
}

fn run_fanout(subscribers: usize, updates: u64) -> Result<BenchResults, Box<dyn std::error::Error>> {
    let mut config = RoomConfig::default();
    // Keep the simulated collaborator out of the measurement.
    config.peer_interval = Duration::from_secs(3600);
    let room = ScriptRoom::with_config(config);

    let mut subs: Vec<_> = (0..subscribers).map(|_| room.connect()).collect();

    let start = Instant::now();
    for i in 0..updates {
        room.update_script(&format!("INT. SOUNDSTAGE - DAY\n\nTake {i}."));
    }
    let duration = start.elapsed();

    // Every subscriber must have received every accepted update exactly once.
    for sub in &mut subs {
        let mut received = 0u64;
        while sub.try_recv().is_some() {
            received += 1;
        }
        if received != updates {
            return Err(format!("expected {updates} deliveries, got {received}").into());
        }
    }
    for sub in &subs {
        room.disconnect(sub.id());
    }

    let secs = duration.as_secs_f64();
    Ok(BenchResults {
        name: format!("Fan-out x{subscribers}"),
        subscribers,
        updates,
        duration,
        updates_per_sec: updates as f64 / secs,
        deliveries_per_sec: (updates * subscribers as u64) as f64 / secs,
    })
}
