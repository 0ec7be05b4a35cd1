//! Portal command handlers.

use anyhow::Result;
use cfphub_core::{Portal, PortalType};

use crate::bootstrap::CliContext;
use crate::presentation::{format_optional, print_separator, truncate_string};

pub async fn list(ctx: &CliContext) -> Result<()> {
    let portals = ctx.app().portals().list().await?;

    if portals.is_empty() {
        println!("No portals stored.");
        println!("Use 'cfphub portals add <name> --base-url <url> --type <type>' to add one.");
        return Ok(());
    }

    println!("{:<20} {:<11} {:<40} Description", "Name", "Type", "Base URL");
    print_separator(95);
    for portal in portals {
        println!(
            "{:<20} {:<11} {:<40} {}",
            truncate_string(&portal.name, 19),
            portal.portal_type,
            truncate_string(&portal.base_url, 39),
            format_optional(portal.description.as_ref(), "--"),
        );
    }
    Ok(())
}

pub async fn add(
    ctx: &CliContext,
    name: String,
    base_url: String,
    portal_type: PortalType,
    description: Option<String>,
) -> Result<()> {
    let portal = Portal {
        name,
        base_url,
        portal_type,
        description,
    };
    let saved = ctx.app().portals().save(portal).await?;
    println!("Saved portal '{}' ({})", saved.name, saved.portal_type);
    Ok(())
}

pub async fn remove(ctx: &CliContext, name: &str) -> Result<()> {
    ctx.app().portals().delete(name).await?;
    println!("Removed portal '{name}'");
    Ok(())
}

pub async fn speakers(ctx: &CliContext, name: &str, company: Option<&str>) -> Result<()> {
    let speakers = ctx.app().portals().speakers(name, company).await?;

    if speakers.is_empty() {
        println!("No speakers found.");
        return Ok(());
    }

    println!("{:<30} {:<25} Country", "Name", "Company");
    print_separator(70);
    for speaker in &speakers {
        let full_name = [speaker.first_name.as_deref(), speaker.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<30} {:<25} {}",
            truncate_string(&full_name, 29),
            truncate_string(speaker.company.as_deref().unwrap_or("--"), 24),
            speaker.country.as_deref().unwrap_or("--"),
        );
    }
    println!("\n{} speaker(s)", speakers.len());
    Ok(())
}
