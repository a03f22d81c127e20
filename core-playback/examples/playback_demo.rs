//! # Playback Controller Example
//!
//! Drives an [`AudioController`] with a scripted media engine that plays a
//! short fake track: it buffers, plays for a few seconds, then ends.
//!
//! Run with: `cargo run --example playback_demo --package core-playback`

use bridge_traits::{ListenerId, MediaEngine, MediaEventHandler, MediaEventKind};
use core_playback::AudioController;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Scripted engine
// ============================================================================

#[derive(Default)]
struct Shared {
    position: f64,
    duration: Option<f64>,
    next_listener: u64,
    listeners: Vec<(ListenerId, MediaEventKind, MediaEventHandler)>,
}

/// Pretends to play a four second track at ten times real speed.
#[derive(Clone, Default)]
struct ScriptedEngine {
    shared: Arc<Mutex<Shared>>,
}

impl ScriptedEngine {
    fn emit(&self, kind: MediaEventKind) {
        let handlers: Vec<MediaEventHandler> = self
            .shared
            .lock()
            .unwrap()
            .listeners
            .iter()
            .filter(|(_, registered, _)| *registered == kind)
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(kind);
        }
    }

    async fn run_track(self) {
        self.emit(MediaEventKind::LoadStart);
        self.shared.lock().unwrap().duration = Some(4.0);
        self.emit(MediaEventKind::LoadMetadata);
        self.emit(MediaEventKind::CanPlay);
        self.emit(MediaEventKind::Playing);

        for second in 1..=4 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.shared.lock().unwrap().position = second as f64;
            self.emit(MediaEventKind::TimeUpdate);
        }
        self.emit(MediaEventKind::Pause);
        self.emit(MediaEventKind::Ended);
    }
}

impl MediaEngine for ScriptedEngine {
    fn set_source(&self, url: &str) {
        println!("   engine: source = {url}");
    }

    fn load(&self) {}

    fn play(&self) {
        tokio::spawn(self.clone().run_track());
    }

    fn pause(&self) {}

    fn current_time(&self) -> f64 {
        self.shared.lock().unwrap().position
    }

    fn set_current_time(&self, seconds: f64) {
        self.shared.lock().unwrap().position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.shared.lock().unwrap().duration
    }

    fn add_listener(&self, kind: MediaEventKind, handler: MediaEventHandler) -> ListenerId {
        let mut shared = self.shared.lock().unwrap();
        shared.next_listener += 1;
        let id = ListenerId::new(shared.next_listener);
        shared.listeners.push((id, kind, handler));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.shared
            .lock()
            .unwrap()
            .listeners
            .retain(|(listener, _, _)| *listener != id);
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default().with_format(LogFormat::Compact))?;

    println!("=== Playback Controller Demo ===\n");

    let controller = Arc::new(AudioController::new(Arc::new(ScriptedEngine::default())));

    let observer = {
        let state = controller.get_state();
        tokio::spawn(async move {
            let mut snapshots = Box::pin(state.into_stream());
            while let Some(snapshot) = snapshots.next().await {
                println!(
                    "   state: playing={} position={:>8} duration={:>8} error={}",
                    snapshot.playing,
                    snapshot.readable_current_time,
                    snapshot.readable_duration,
                    snapshot.error
                );
            }
        })
    };

    println!("1. Playing stream...");
    let mut events = controller.play_stream("https://cdn.example/demo.mp3?token=secret")?;
    while let Some(event) = events.next().await {
        println!(
            "   event: {:<12} at {}",
            event.kind.to_string(),
            controller.format_time(event.current_time)
        );
    }

    println!("\n2. Final state: {:?}", controller.current_state());

    observer.abort();
    println!("\n=== Demo Complete ===");
    Ok(())
}
