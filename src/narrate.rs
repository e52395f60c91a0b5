//! Human-readable narration of search progress.
//!
//! Formats the event stream into the running commentary the log pane of the
//! original desktop tool showed: a start banner, the frontier listing per
//! iteration, the chosen city, its connections, and an added/updated/rejected
//! line per examined connection, closed by the final path or a no-path note.

use std::io::Write;

use crate::search::events::{SearchEvent, SearchObserver};
use crate::types::{City, Heuristic};

const RULE: &str = "----------------------------------------";

/// Writes narration lines for each observed event.
///
/// Write errors are swallowed: narration is a best-effort sink and event
/// delivery is never retried.
pub struct Narrator<W: Write> {
    out: W,
}

impl<W: Write> Narrator<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn narrate(&mut self, event: &SearchEvent) {
        let _ = self.write_event(event);
    }

    fn write_event(&mut self, event: &SearchEvent) -> std::io::Result<()> {
        match event {
            SearchEvent::Started {
                start,
                goal,
                heuristic,
            } => {
                writeln!(self.out, "{RULE}")?;
                writeln!(self.out, "Searching for a path: {start} -> {goal}")?;
                let label = match heuristic {
                    Heuristic::Distance => "straight-line distance",
                    Heuristic::Hops => "number of hops",
                };
                writeln!(self.out, "Heuristic: {label}")?;
                writeln!(self.out, "{RULE}")?;
            }
            SearchEvent::Frontier { found, open } => {
                writeln!(self.out)?;
                writeln!(self.out, "Found so far:   {}", join(found))?;
                writeln!(self.out, "Still to check: {}", join(open))?;
            }
            SearchEvent::BestSelected {
                city,
                cost_from_start,
                total_estimate,
            } => {
                writeln!(self.out)?;
                writeln!(
                    self.out,
                    "Next best city: {city} (from start {cost_from_start:.2}, estimate {total_estimate:.2})"
                )?;
            }
            SearchEvent::EdgesChecked { from, to } => {
                if to.is_empty() {
                    writeln!(self.out, "{from} has no outgoing connections")?;
                } else {
                    writeln!(self.out, "Connections of {from}: {}", join(to))?;
                }
            }
            SearchEvent::CityAdded {
                city,
                cost_from_start,
                total_estimate,
            } => {
                writeln!(
                    self.out,
                    "  added    {city}: from start {cost_from_start:.2}, estimate {total_estimate:.2}"
                )?;
            }
            SearchEvent::CityUpdated {
                city,
                old_cost,
                new_cost,
            } => {
                writeln!(
                    self.out,
                    "  updated  {city}: from start {old_cost:.2} -> {new_cost:.2}"
                )?;
            }
            SearchEvent::CityRejected {
                city,
                offered_cost,
                kept_cost,
            } => {
                writeln!(
                    self.out,
                    "  rejected {city}: offered {offered_cost:.2}, keeping {kept_cost:.2}"
                )?;
            }
            SearchEvent::CityExplored { city } => {
                writeln!(self.out, "{city} is now explored")?;
            }
            SearchEvent::PathFound { path, length } => {
                writeln!(self.out)?;
                writeln!(self.out, "{RULE}")?;
                writeln!(self.out, "Optimal path: {}", join_arrows(path))?;
                writeln!(self.out, "Total length: {length:.2}")?;
            }
            SearchEvent::NoPath => {
                writeln!(self.out)?;
                writeln!(self.out, "{RULE}")?;
                writeln!(self.out, "Cannot find a path between the chosen cities.")?;
            }
            SearchEvent::Ended => {
                writeln!(self.out, "{RULE}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write + Send> SearchObserver for Narrator<W> {
    fn on_event(&mut self, event: &SearchEvent) {
        self.narrate(event);
    }
}

fn join(cities: &[City]) -> String {
    if cities.is_empty() {
        return "(none)".to_string();
    }
    cities
        .iter()
        .map(City::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_arrows(cities: &[City]) -> String {
    cities
        .iter()
        .map(City::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
