//! Most-improved-player standings built from a CSV of players.

use crate::core::calculator::Calculator;
use crate::core::view::{format_number, format_percentage, format_tenths};
use crate::core::{Formula, RuleProvider, TargetRequest};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

/// One CSV row. Values stay as text so they go through the same checks as
/// the interactive form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    /// 1-based data row number, header excluded.
    #[serde(skip)]
    pub row: usize,
    pub player: String,
    pub starting_index: String,
    pub ending_index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub player: String,
    pub starting_index: f64,
    pub ending_index: f64,
    pub improvement_factor: f64,
    pub percentage_improvement: Option<f64>,
    /// Ending index this player would have needed to beat the leader.
    /// `None` for leaders and when that index is below the allowed minimum.
    pub target_to_win: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based data row number, header excluded.
    pub row: usize,
    pub player: String,
    pub reason: String,
}

/// Rows read from a CSV, with the records that could not be read at all.
#[derive(Debug, Clone, Default)]
pub struct PlayerRows {
    pub rows: Vec<PlayerRow>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leaderboard {
    pub standings: Vec<Standing>,
    pub skipped: Vec<SkippedRow>,
}

impl Leaderboard {
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

/// Reads player rows. A malformed record is skipped and reported; only a
/// missing header or an I/O failure ends the read.
pub fn read_rows<R: Read>(reader: R) -> Result<PlayerRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut result = PlayerRows::default();

    for (i, record) in csv_reader.records().enumerate() {
        let row = i + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable row {}: {}", row, e);
                result.skipped.push(SkippedRow {
                    row,
                    player: String::new(),
                    reason: format!("Unreadable row: {}", e),
                });
                continue;
            }
        };

        let player = record.get(0).unwrap_or_default().to_string();

        if record.len() != headers.len() {
            tracing::warn!(
                "⚠️ Skipping row {} ({}): {} fields, expected {}",
                row,
                player,
                record.len(),
                headers.len()
            );
            result.skipped.push(SkippedRow {
                row,
                player,
                reason: format!(
                    "Expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            });
            continue;
        }

        match record.deserialize::<PlayerRow>(Some(&headers)) {
            Ok(mut parsed) => {
                parsed.row = row;
                result.rows.push(parsed);
            }
            Err(e) => {
                tracing::warn!("⚠️ Skipping row {} ({}): {}", row, player, e);
                result.skipped.push(SkippedRow {
                    row,
                    player,
                    reason: format!("Unreadable row: {}", e),
                });
            }
        }
    }

    Ok(result)
}

pub fn read_rows_from_path<P: AsRef<Path>>(path: P) -> Result<PlayerRows> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

pub fn build_leaderboard<F: Formula, R: RuleProvider>(
    calculator: &Calculator<F, R>,
    input: &PlayerRows,
) -> Leaderboard {
    let mut standings = Vec::new();
    let mut skipped = input.skipped.clone();

    for row in &input.rows {
        let start = Some(row.starting_index.as_str());
        let end = Some(row.ending_index.as_str());
        match calculator.calculate_improvement(start, end) {
            Ok((pair, result)) => standings.push(Standing {
                rank: 0,
                player: row.player.clone(),
                starting_index: pair.starting_index,
                ending_index: pair.ending_index,
                improvement_factor: result.improvement_factor,
                percentage_improvement: result.percentage_improvement,
                target_to_win: None,
            }),
            Err(e) => {
                tracing::warn!("⚠️ Skipping row {} ({}): {}", row.row, row.player, e);
                skipped.push(SkippedRow {
                    row: row.row,
                    player: row.player.clone(),
                    reason: e.user_friendly_message(),
                });
            }
        }
    }
    skipped.sort_by_key(|s| s.row);

    // 穩定排序：同分時保留輸入順序
    standings.sort_by(|a, b| b.improvement_factor.total_cmp(&a.improvement_factor));

    let mut previous: Option<(f64, usize)> = None;
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = match previous {
            Some((factor, rank)) if factor == standing.improvement_factor => rank,
            _ => i + 1,
        };
        previous = Some((standing.improvement_factor, standing.rank));
    }

    let rules = calculator.rules();
    if rules.supports_target_solve() {
        if let Some(leader_factor) = standings.first().map(|s| s.improvement_factor) {
            for standing in standings.iter_mut().filter(|s| s.rank > 1) {
                let request = TargetRequest::new(standing.starting_index, leader_factor);
                match calculator.solve_target(request) {
                    // 低於下限的目標無法達成，不列出
                    Ok(target) if target.target_ending_index < rules.min_index() => {
                        tracing::debug!(
                            "No reachable target for {}: needs {}",
                            standing.player,
                            target.target_ending_index
                        );
                    }
                    Ok(target) => standing.target_to_win = Some(target.target_ending_index),
                    Err(e) => tracing::warn!("⚠️ No target for {}: {}", standing.player, e),
                }
            }
        }
    }

    tracing::info!(
        "🏆 Leaderboard built: {} ranked, {} skipped",
        standings.len(),
        skipped.len()
    );

    Leaderboard { standings, skipped }
}

pub fn write_csv<W: Write>(writer: W, leaderboard: &Leaderboard) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for standing in &leaderboard.standings {
        csv_writer.serialize(standing)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_to_path<P: AsRef<Path>>(path: P, leaderboard: &Leaderboard) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv(file, leaderboard)
}

impl fmt::Display for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🏆 Most Improved Player Standings")?;
        for s in &self.standings {
            write!(
                f,
                "  {:>3}. {:<20} {:>6} -> {:<6} factor {}",
                s.rank,
                s.player,
                format_number(s.starting_index),
                format_number(s.ending_index),
                format_number(s.improvement_factor)
            )?;
            if let Some(percentage) = s.percentage_improvement {
                write!(f, " ({})", format_percentage(percentage))?;
            }
            if let Some(target) = s.target_to_win {
                write!(f, ", needed {} to win", format_tenths(target))?;
            }
            writeln!(f)?;
        }

        if !self.skipped.is_empty() {
            writeln!(f, "Skipped rows:")?;
            for skipped in &self.skipped {
                writeln!(f, "  row {} ({}): {}", skipped.row, skipped.player, skipped.reason)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::variant::Variant;
    use crate::core::formula::StandardFormula;

    const SAMPLE: &str = "player,starting_index,ending_index
Alice,18.5,15.2
Bob,10,10
Cara,20,14
Dan,,12
";

    #[test]
    fn test_read_rows_keeps_blank_fields() {
        let input = read_rows(SAMPLE.as_bytes()).unwrap();
        assert_eq!(input.rows.len(), 4);
        assert!(input.skipped.is_empty());
        assert_eq!(input.rows[3].row, 4);
        assert_eq!(input.rows[3].starting_index, "");
    }

    #[test]
    fn test_standings_sorted_and_invalid_rows_skipped() {
        let rows = read_rows(SAMPLE.as_bytes()).unwrap();
        let calculator = Calculator::new(StandardFormula, Variant::Extended.rules());
        let board = build_leaderboard(&calculator, &rows);

        let names: Vec<&str> = board.standings.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(names, vec!["Cara", "Alice", "Bob"]);
        assert_eq!(board.leader().unwrap().improvement_factor, 1.2308);
        assert_eq!(board.skipped.len(), 1);
        assert_eq!(board.skipped[0].row, 4);

        assert_eq!(board.standings[0].target_to_win, None);
        assert!(board.standings[1].target_to_win.is_some());
    }

    #[test]
    fn test_ties_share_rank() {
        let rows = read_rows("player,starting_index,ending_index\nA,10,10\nB,5,5\nC,4,6\n".as_bytes())
            .unwrap();
        assert_eq!(rows.rows.len(), 3);
        let calculator = Calculator::new(StandardFormula, Variant::Classic.rules());
        let board = build_leaderboard(&calculator, &rows);

        let ranks: Vec<usize> = board.standings.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
        assert_eq!(board.standings[0].player, "A");
        // classic 變體沒有目標計算
        assert!(board.standings.iter().all(|s| s.target_to_win.is_none()));
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let csv = "player,starting_index,ending_index
Alice,18.5,15.2
Bob,10
Cara,20,14
Dee,12,11,extra
";
        let input = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(input.rows.len(), 2);

        let skipped: Vec<(usize, &str)> = input
            .skipped
            .iter()
            .map(|s| (s.row, s.player.as_str()))
            .collect();
        assert_eq!(skipped, vec![(2, "Bob"), (4, "Dee")]);

        let calculator = Calculator::new(StandardFormula, Variant::Extended.rules());
        let board = build_leaderboard(&calculator, &input);
        let names: Vec<&str> = board.standings.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(names, vec!["Cara", "Alice"]);
        assert_eq!(board.skipped.len(), 2);
        assert!(board.skipped[0].reason.contains("Expected 3 fields, found 2"));
    }
}
