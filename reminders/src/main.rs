//! Walks through a morning of watering with the reminder store.

use anyhow::Context;
use my_plants::progress::{CELEBRATION_SUBTITLE, CELEBRATION_TITLE};
use my_plants::{
    build_store, HeaderStatus, ListView, ProgressReport, ReminderAction, ReminderConfig,
    ReminderDraft, ReminderState, ReminderStore,
};
use my_plants_core::environment::SystemClock;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BAR_WIDTH: usize = 24;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ReminderConfig::from_env().context("loading configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(?config, "Starting My Plants");

    let store = build_store(&config, Arc::new(SystemClock));
    let mut updates = store.subscribe();

    println!("=== My Plants 🌱 ===\n");
    print_checklist(&store).await;

    println!("\n>>> Watering everything on the list");
    let due: Vec<_> = store.state(|s| s.due_today().map(|r| r.id).collect()).await;
    for id in due {
        store.send(ReminderAction::ToggleDone { id }).await?;
    }
    print_checklist(&store).await;

    while let Some(action) = updates.try_recv() {
        if let ReminderAction::StatusChanged { to, .. } = action {
            tracing::debug!(%to, "Header update received");
        }
    }

    println!("\n>>> Adding a Fern from the reminder form");
    let fern = ReminderDraft::named("Fern").into_reminder();
    store
        .send(ReminderAction::AddReminder { reminder: fern })
        .await?;
    print_checklist(&store).await;

    println!("\n>>> Swiping away the first row");
    store
        .send(ReminderAction::DeleteAtPositions {
            view: ListView::DueToday,
            positions: vec![0],
        })
        .await?;
    print_checklist(&store).await;

    let snapshot = store.state(ReminderState::snapshot).await;
    println!(
        "\nFinal snapshot:\n{}",
        serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?
    );

    store.shutdown();
    Ok(())
}

async fn print_checklist(store: &ReminderStore) {
    let (report, rows) = store
        .state(|s| {
            let rows: Vec<String> = s
                .due_today()
                .map(|r| {
                    let mark = if r.is_done { "✓" } else { " " };
                    format!(
                        "  [{mark}] {:<10} in {:<12} ☀ {:<12} 💧 {}",
                        r.plant_name, r.room, r.light, r.water_amount
                    )
                })
                .collect();
            (ProgressReport::from_state(s), rows)
        })
        .await;

    if report.status == HeaderStatus::AllComplete {
        println!("{CELEBRATION_TITLE}");
        println!("{CELEBRATION_SUBTITLE}");
        return;
    }

    println!("{}", report.status.message());
    let filled = report.bar_cells(BAR_WIDTH);
    println!(
        "[{}{}] {}/{}",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        report.completed,
        report.total
    );
    for row in rows {
        println!("{row}");
    }
}
