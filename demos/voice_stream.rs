//! Real-time voice moderation
//!
//! Streams a raw audio file (16 kHz mono PCM) to the voice endpoint in 100 ms
//! chunks and prints server events as they arrive.
//!
//! Usage:
//!   TUTELIQ_API_KEY="your_key" cargo run --example voice_stream -- path/to/audio.pcm

use std::time::Duration;
use tuteliq::types::{
    VoiceAlertEvent, VoiceAnalysisType, VoiceReadyEvent, VoiceTranscriptionEvent,
};
use tuteliq::{TuteliqClient, VoiceStreamConfig, VoiceStreamHandler};

const CHUNK_BYTES: usize = 3200;

struct Printer;

impl VoiceStreamHandler for Printer {
    fn on_ready(&mut self, event: &VoiceReadyEvent) {
        println!("session {} ready ({}s windows)", event.session_id, event.config.interval_seconds);
    }

    fn on_transcription(&mut self, event: &VoiceTranscriptionEvent) {
        println!("[{}] {}", event.flush_index, event.text);
    }

    fn on_alert(&mut self, event: &VoiceAlertEvent) {
        println!("ALERT {} ({}, risk {:.2})", event.category, event.severity, event.risk_score);
    }

    fn on_close(&mut self, code: u16, reason: &str) {
        println!("closed: {code} {reason}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: voice_stream <audio.pcm>")?;
    let audio = tokio::fs::read(&path).await?;

    let client = TuteliqClient::from_env()?;
    let config = VoiceStreamConfig::new()
        .with_interval_seconds(10)
        .with_analysis_types([VoiceAnalysisType::Bullying, VoiceAnalysisType::Unsafe]);
    let session = client.voice_stream(Some(config), Printer)?;
    session.ready().await?;

    for chunk in audio.chunks(CHUNK_BYTES) {
        session.send_audio(chunk.to_vec())?;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let summary = session.end().await?;
    println!(
        "\nsummary: {} flushes, overall risk {} ({:.2})",
        summary.total_flushes, summary.overall_risk, summary.overall_risk_score
    );
    println!("transcript: {}", summary.transcript);
    session.close();

    Ok(())
}
