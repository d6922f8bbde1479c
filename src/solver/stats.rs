use prettytable::{Cell, Row, Table};

/// Counters describing a single [`Solver::solve`](crate::solver::Solver::solve) run.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Choice points opened, plus the final completeness check.
    pub nodes_visited: u64,
    /// Candidate words undone after failing, at any depth.
    pub backtracks: u64,
    /// Calls to the directed revision step.
    pub revisions: u64,
    /// Words removed from domains by revision.
    pub prunings: u64,
    /// Wall-clock time spent inside propagation.
    pub propagation_micros: u64,
}

/// Renders the statistics as a table for terminal output.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
    table.add_row(Row::new(vec![
        Cell::new("Nodes visited"),
        Cell::new(&stats.nodes_visited.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Backtracks"),
        Cell::new(&stats.backtracks.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Revise calls"),
        Cell::new(&stats.revisions.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Words pruned"),
        Cell::new(&stats.prunings.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Propagation time (ms)"),
        Cell::new(&format!("{:.2}", stats.propagation_micros as f64 / 1000.0)),
    ]));
    let per_revise = if stats.revisions > 0 {
        stats.propagation_micros as f64 / stats.revisions as f64
    } else {
        0.0
    };
    table.add_row(Row::new(vec![
        Cell::new("Time / revise (µs)"),
        Cell::new(&format!("{per_revise:.2}")),
    ]));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_counter() {
        let stats = SearchStats {
            nodes_visited: 7,
            backtracks: 2,
            revisions: 31,
            prunings: 12,
            propagation_micros: 1500,
        };
        let table = render_stats_table(&stats);
        assert!(table.contains("Nodes visited"));
        assert!(table.contains("31"));
        assert!(table.contains("1.50"));
    }
}
