//! Aggregate command handler.

use anyhow::Result;
use cfphub_core::{AggregationSummary, TalkSearchCriteria};

use crate::bootstrap::CliContext;
use crate::presentation::print_separator;

/// Criteria from the command line, or the configured default search when
/// no flag was given.
pub fn criteria_from_args(
    ctx: &CliContext,
    keywords: &[String],
    companies: &[String],
) -> TalkSearchCriteria {
    if keywords.is_empty() && companies.is_empty() {
        return ctx.config().default_criteria();
    }
    TalkSearchCriteria::builder()
        .talk_keywords(keywords)
        .speaker_companies(companies)
        .build()
}

pub async fn execute(
    ctx: &CliContext,
    keywords: &[String],
    companies: &[String],
    reload: bool,
) -> Result<()> {
    let criteria = criteria_from_args(ctx, keywords, companies);
    let aggregation = ctx.app().aggregation();

    let summary = if reload {
        aggregation
            .recreate_events(ctx.config().portals(), &criteria)
            .await?
    } else {
        aggregation.create_events(&criteria).await?
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &AggregationSummary) {
    if summary.portals.is_empty() {
        println!("No portals to aggregate.");
        println!("Use 'cfphub portals add' or 'cfphub aggregate --reload' first.");
        return;
    }

    println!("{:<25} {:>8} {:>8}", "Portal", "Speakers", "Talks");
    print_separator(43);
    for portal in &summary.portals {
        println!(
            "{:<25} {:>8} {:>8}",
            portal.portal, portal.speakers, portal.talks
        );
    }
    print_separator(43);
    println!(
        "{:<25} {:>8} {:>8}",
        "Total", summary.total_speakers, summary.total_talks
    );
    println!("\nFinished in {} ms", summary.duration_ms);
}
