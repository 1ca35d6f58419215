//! Basic usage: text moderation, emotions and usage headers
//!
//! The API key is read from `TUTELIQ_API_KEY` (or the OS keyring entry
//! `tuteliq` / `api_key`).
//!
//! Usage:
//!   TUTELIQ_API_KEY="your_key" cargo run --example basic_usage

use tuteliq::types::{EmotionMessage, GroomingMessage};
use tuteliq::{
    AnalyzeEmotionsInput, DetectGroomingInput, DetectionInput, ErrorKind, TuteliqClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = TuteliqClient::from_env()?;

    let bullying = client
        .detect_bullying(DetectionInput::new("Nobody wants you here, just leave").with_context("chat"))
        .await?;
    println!(
        "bullying: {} (risk {:.2}, action {})",
        bullying.is_bullying, bullying.risk_score, bullying.recommended_action
    );

    let grooming = client
        .detect_grooming(
            DetectGroomingInput::new(vec![
                GroomingMessage::adult("This is our little secret, ok?"),
                GroomingMessage::child("ok"),
            ])
            .with_child_age(12),
        )
        .await;
    match grooming {
        Ok(result) => println!("grooming risk: {:?} {:?}", result.grooming_risk, result.flags),
        Err(e) if e.kind() == ErrorKind::TierAccessRestricted => {
            println!("grooming detection not on this plan: {}", e.message());
            if let Some(suggestion) = e.suggestion() {
                println!("  hint: {}", suggestion);
            }
        }
        Err(e) => return Err(e.into()),
    }

    let analysis = client.analyze("I want to hurt myself").await?;
    println!("combined: {:?} - {}", analysis.risk_level, analysis.summary);

    let emotions = client
        .analyze_emotions(AnalyzeEmotionsInput::from_messages(vec![
            EmotionMessage::new("child", "I had a terrible day at school"),
            EmotionMessage::new("child", "Everyone ignored me again"),
        ]))
        .await?;
    println!("emotions: {:?} (trend {:?})", emotions.dominant_emotions, emotions.trend);

    if let Some(usage) = client.usage() {
        println!("\nUsage: {}/{} messages this month", usage.used, usage.limit);
    }
    if let Some(id) = client.last_request_id() {
        println!("Last request id: {id}");
    }

    Ok(())
}
