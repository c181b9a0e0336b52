//! Text report of the averaging mode: one `prettytable` table per direction with
//! the top reactions of every species, their mean rate over the window and their
//! share of the species' total.
use crate::Rates::analysis::AverageSummary;
use crate::Rates::rate_reader::ReactionDictionary;
use crate::Rates::ranking::RankedMean;
use indexmap::IndexMap;
use prettytable::{Table, row};

fn reaction_text(reactions: &ReactionDictionary, number: u32) -> String {
    reactions
        .text(number)
        .map(str::to_string)
        .unwrap_or_else(|| format!("reaction {}", number))
}

/// rows of one direction; the share column is left out for reversible rates
pub fn direction_table(
    rows: &IndexMap<String, Vec<RankedMean>>,
    reactions: &ReactionDictionary,
    with_share: bool,
) -> Table {
    let mut table = Table::new();
    if with_share {
        table.set_titles(row!["Species", "Reaction", "Average rate / molecule cm-3 s-1", "Share"]);
    } else {
        table.set_titles(row!["Species", "Reaction", "Average rate / molecule cm-3 s-1"]);
    }
    for (species, ranked) in rows {
        for (i, entry) in ranked.iter().enumerate() {
            let name = if i == 0 { species.as_str() } else { "" };
            let rate = format!("{:.3e}", entry.mean);
            let text = reaction_text(reactions, entry.reaction);
            match (with_share, entry.share) {
                (true, Some(share)) => {
                    table.add_row(row![name, text, rate, format!("{:.3}%", share)]);
                }
                _ => {
                    table.add_row(row![name, text, rate]);
                }
            }
        }
    }
    table
}

/// `(heading, table)` for production, loss and reversible rates
pub fn averages_tables(
    summary: &AverageSummary,
    production_reactions: &ReactionDictionary,
    loss_reactions: &ReactionDictionary,
) -> Vec<(String, Table)> {
    vec![
        (
            "PRODUCTION".to_string(),
            direction_table(&summary.production, production_reactions, true),
        ),
        (
            "LOSS".to_string(),
            direction_table(&summary.loss, loss_reactions, true),
        ),
        (
            // netted pairs are keyed by the production reaction
            "REVERSIBLE (+ve = net production, -ve = net loss)".to_string(),
            direction_table(&summary.reversible, production_reactions, false),
        ),
    ]
}

pub fn averages_report(
    summary: &AverageSummary,
    production_reactions: &ReactionDictionary,
    loss_reactions: &ReactionDictionary,
) -> String {
    let mut report = format!("Showing top {} rate(s)\n", summary.top_n);
    for (heading, table) in averages_tables(summary, production_reactions, loss_reactions) {
        report.push_str(&format!("\n{}\n{}", heading, table));
    }
    report
}

pub fn print_averages(
    summary: &AverageSummary,
    production_reactions: &ReactionDictionary,
    loss_reactions: &ReactionDictionary,
) {
    println!("Showing top {} rate(s)", summary.top_n);
    for (heading, table) in averages_tables(summary, production_reactions, loss_reactions) {
        println!("\n{}", heading);
        table.printstd();
    }
}
