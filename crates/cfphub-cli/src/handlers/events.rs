//! Event command handlers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use cfphub_core::EventSort;

use crate::bootstrap::CliContext;
use crate::presentation::{format_date, print_separator, truncate_string};

pub async fn list(ctx: &CliContext, sort: EventSort) -> Result<()> {
    let events = ctx.app().events().list(sort).await?;

    if events.is_empty() {
        println!("No events aggregated yet. Run 'cfphub aggregate' first.");
        return Ok(());
    }

    println!(
        "{:<18} {:<30} {:<12} {:<12} {:>8} {:>6}",
        "Portal", "Event", "From", "To", "Speakers", "Talks"
    );
    print_separator(91);
    for event in &events {
        println!(
            "{:<18} {:<30} {:<12} {:<12} {:>8} {:>6}",
            truncate_string(&event.portal_name, 17),
            truncate_string(&event.name, 29),
            format_date(event.from_date),
            format_date(event.to_date),
            event.speakers.len(),
            event.talks.len(),
        );
    }
    Ok(())
}

pub async fn show(ctx: &CliContext, portal: &str) -> Result<()> {
    let Some(event) = ctx.app().events().get_by_portal(portal).await? else {
        bail!("No event stored for portal '{portal}'");
    };

    println!("{} ({})", event.name, event.portal_name);
    println!(
        "  {} to {}{}",
        format_date(event.from_date),
        format_date(event.to_date),
        event
            .time_zone
            .as_deref()
            .map(|tz| format!(" [{tz}]"))
            .unwrap_or_default()
    );
    if let Some(website) = &event.website_url {
        println!("  {website}");
    }

    println!("\nTalks ({}):", event.talks.len());
    for talk in &event.talks {
        let presenters: Vec<String> = event
            .speakers
            .iter()
            .filter(|speaker| speaker.talk_ids.contains(&talk.id))
            .map(|speaker| speaker.display_name())
            .collect();
        println!(
            "  - {} [{}]",
            truncate_string(&talk.title, 70),
            presenters.join(", ")
        );
    }

    println!("\nSpeakers ({}):", event.speakers.len());
    for speaker in &event.speakers {
        println!(
            "  - {} ({}), {} talk(s)",
            speaker.display_name(),
            speaker.company.as_deref().unwrap_or("--"),
            event.talks_of(speaker).count()
        );
    }
    Ok(())
}

pub async fn export(ctx: &CliContext, output: Option<&Path>) -> Result<()> {
    let document = ctx.app().events().export().await?;
    let json = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!(
                "Exported {} portal(s) and {} event(s) to {}",
                document.portals.len(),
                document.events.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
