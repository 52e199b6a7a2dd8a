use anyhow::Result;
use mip_calc::core::leaderboard::{
    build_leaderboard, read_rows, read_rows_from_path, write_csv_to_path,
};
use mip_calc::{Calculator, StandardFormula, TomlConfig, Variant};
use tempfile::TempDir;

const PLAYERS: &str = "player,starting_index,ending_index
Alice, 18.5, 15.2
Bob, 10, 10
Cara, 20, 14
Dev, -4, -7
Eli, abc, 12
";

#[test]
fn test_leaderboard_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("players.csv");
    let output = temp_dir.path().join("out").join("standings.csv");
    std::fs::write(&input, PLAYERS)?;

    let rows = read_rows_from_path(&input)?;
    let calculator = Calculator::new(StandardFormula, Variant::Extended.rules());
    let board = build_leaderboard(&calculator, &rows);

    // Dev: 8 / 5 = 1.6
    let leader = board.leader().unwrap();
    assert_eq!(leader.player, "Dev");
    assert_eq!(leader.improvement_factor, 1.6);
    assert_eq!(board.standings.len(), 4);
    assert_eq!(board.skipped.len(), 1);
    assert_eq!(board.skipped[0].player, "Eli");

    // 追上領先者所需的結束差點
    let alice = board.standings.iter().find(|s| s.player == "Alice").unwrap();
    assert_eq!(alice.target_to_win, Some(7.1));

    write_csv_to_path(&output, &board)?;
    let written = std::fs::read_to_string(&output)?;
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("rank,player,starting_index,ending_index,improvement_factor,percentage_improvement,target_to_win")
    );
    assert!(lines.next().unwrap().starts_with("1,Dev,"));
    Ok(())
}

#[test]
fn test_classic_rules_skip_plus_handicaps() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("players.csv");
    std::fs::write(&input, PLAYERS)?;

    let config = TomlConfig::from_toml_str("[calculator]\nvariant = \"classic\"\n")?;
    let calculator = Calculator::new(StandardFormula, config.rules());
    let board = build_leaderboard(&calculator, &read_rows_from_path(&input)?);

    assert_eq!(board.leader().unwrap().player, "Cara");
    assert_eq!(board.leader().unwrap().percentage_improvement, Some(23.1));
    assert_eq!(board.skipped.len(), 2);
    assert!(board.standings.iter().all(|s| s.target_to_win.is_none()));

    let text = board.to_string();
    assert!(text.contains("Skipped rows:"));
    Ok(())
}

#[test]
fn test_missing_input_file_is_an_io_error() {
    let err = read_rows_from_path("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, mip_calc::CalcError::IoError(_)));
}

#[test]
fn test_unreachable_target_is_left_empty() -> Result<()> {
    // Dev 領先 (8 / 5 = 1.6)；Finn 從 -10 出發需要約 -10.8，低於下限
    let csv = "player,starting_index,ending_index
Dev,-4,-7
Finn,-10,-9
Alice,18.5,15.2
";
    let input = read_rows(csv.as_bytes())?;
    let calculator = Calculator::new(StandardFormula, Variant::Extended.rules());
    let board = build_leaderboard(&calculator, &input);

    let finn = board.standings.iter().find(|s| s.player == "Finn").unwrap();
    assert_eq!(finn.target_to_win, None);

    let alice = board.standings.iter().find(|s| s.player == "Alice").unwrap();
    assert_eq!(alice.target_to_win, Some(7.1));
    Ok(())
}

#[test]
fn test_short_and_long_rows_do_not_abort_the_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("players.csv");
    std::fs::write(
        &input,
        "player,starting_index,ending_index\nAlice,18.5,15.2\nBob,10\nCara,20,14\nDee,12,11,9\n",
    )?;

    let calculator = Calculator::new(StandardFormula, Variant::Classic.rules());
    let board = build_leaderboard(&calculator, &read_rows_from_path(&input)?);

    let names: Vec<&str> = board.standings.iter().map(|s| s.player.as_str()).collect();
    assert_eq!(names, vec!["Cara", "Alice"]);
    let skipped_rows: Vec<usize> = board.skipped.iter().map(|s| s.row).collect();
    assert_eq!(skipped_rows, vec![2, 4]);
    assert!(board.to_string().contains("row 2 (Bob)"));
    Ok(())
}
