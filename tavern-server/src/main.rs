//! Tavern Server
//!
//! Runs a scripted session against an in-memory store and logs every
//! action result.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tavern::{
    ActionParams, DeterministicRng, Dispatcher, GameConfig, MemoryStore, RuntimeConfig,
    UserId, UserSnapshot, UserStore, VERSION,
};

fn main() -> anyhow::Result<()> {
    let runtime = RuntimeConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&runtime.log_filter))
        .context("invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Tavern Server v{}", VERSION);

    demo_session(&runtime)
}

/// One scripted afternoon in the tavern.
fn demo_session(runtime: &RuntimeConfig) -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");

    let config = GameConfig::default();
    let start = Utc::now();
    let user_id = UserId::random();
    let user = UserSnapshot::new(user_id, "Wanderer", &config, start);

    let store = MemoryStore::new();
    store.save(&user)?;
    let dispatcher = Dispatcher::new(store, config);

    info!("User {}", user_id);
    match runtime.rng_seed {
        Some(seed) => info!("RNG Seed: {}", seed),
        None => info!("RNG Seed: derived per action"),
    }

    for action in dispatcher.available_actions(&user_id)? {
        info!("  {} ({} energy): {}", action.id, action.energy_cost, action.label);
    }

    let script: [(i64, &str, ActionParams); 9] = [
        (0, "trainStrength", ActionParams::none()),
        (1, "trainStrength", ActionParams::none()),
        (2, "trainDefense", ActionParams::none()),
        (5, "fight", ActionParams::enemy("mouse")),
        (6, "fight", ActionParams::none()),
        (8, "heal", ActionParams::none()),
        (30, "fight", ActionParams::enemy("turtle")),
        (31, "heal", ActionParams::none()),
        (32, "meditate", ActionParams::none()),
    ];

    let mut fixed_rng = runtime.rng_seed.map(DeterministicRng::new);

    for (minute, action_id, params) in &script {
        let now = start + Duration::minutes(*minute);
        let mut derived_rng;
        let rng = match fixed_rng.as_mut() {
            Some(rng) => rng,
            None => {
                derived_rng = DeterministicRng::for_action(&user_id, action_id, now);
                &mut derived_rng
            }
        };

        let result = dispatcher.dispatch(&user_id, action_id, params, now, rng)?;
        match result.failure {
            Some(kind) => info!(
                "[+{:>2}m] {}: {} (status {})",
                minute,
                action_id,
                result.message,
                kind.status_code()
            ),
            None => info!("[+{:>2}m] {}: {}", minute, action_id, result.message),
        }

        if let Some(lines) = result.extra("text").and_then(|v| v.as_array()) {
            for line in lines.iter().filter_map(|l| l.as_str()) {
                info!("        {}", line);
            }
        }
    }

    let end: DateTime<Utc> = start + Duration::minutes(60);
    let view = dispatcher.character(&user_id, end)?;
    info!("=== Final Character ===");
    info!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}
