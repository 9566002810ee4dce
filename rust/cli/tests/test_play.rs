//! Scripted hot-seat games driven through `run_with_input`.

fn play(args: &[&str], input: &str) -> (i32, String, String) {
    let mut argv = vec!["chipstack", "play"];
    argv.extend_from_slice(args);
    let mut input = input.as_bytes();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = chipstack_cli::run_with_input(argv, &mut input, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn header_echoes_the_resolved_settings() {
    let (code, stdout, _) = play(&["--players", "ann,bob", "--seed", "42"], "q\n");
    assert_eq!(code, 0);
    assert!(
        stdout.starts_with("play: players=ann,bob chips=1000 small_blind=10 seed=42"),
        "unexpected header: {stdout}"
    );
}

#[test]
fn quit_terminates_after_the_first_hand() {
    let (code, stdout, stderr) = play(&["--players", "ann,bob", "--seed", "42"], "pot\nq\n");
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("Hand #1 begins."));
    assert!(stdout.contains("Pot: 30"));
    assert!(stdout.contains("The game has been terminated."));
    assert!(stdout.contains("Game over (ended by command)."));
    assert!(stdout.contains("Game terminated after 1 hand(s)."));
}

#[test]
fn hole_cards_are_labelled_with_their_owner() {
    let (_, stdout, _) = play(&["--players", "ann,bob", "--seed", "42"], "q\n");
    assert!(stdout.contains("[ann] Your cards: "));
    assert!(stdout.contains("[bob] Your cards: "));
}

#[test]
fn prompt_names_the_player_to_act() {
    let (_, stdout, _) = play(&["--players", "ann,bob", "--seed", "42"], "q\n");
    assert!(stdout.contains("ann to act> ") || stdout.contains("bob to act> "));
}

#[test]
fn bad_lines_are_reported_and_the_game_goes_on() {
    let (code, stdout, stderr) = play(
        &["--players", "ann,bob", "--seed", "42"],
        "zed call\nhello\nann bet lots\nq\n",
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("Error: zed is not seated at this table"));
    assert!(stderr.contains("Error: Unrecognized command 'hello'"));
    assert!(stderr.contains("Error: Invalid bet amount 'lots'"));
    assert!(stdout.contains("Game terminated after 1 hand(s)."));
}

#[test]
fn chips_query_reports_the_stack() {
    let (code, stdout, _) = play(
        &["--players", "ann,bob,cat", "--seed", "42"],
        "chips cat\nq\n",
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("cat has "), "stdout: {stdout}");
}

#[test]
fn all_in_hands_play_down_to_a_winner() {
    // One blind covers a whole stack, so every hand is decided at once.
    let script = "ann allin\nbob allin\n".repeat(50);
    let (code, stdout, stderr) = play(
        &[
            "--players",
            "ann,bob",
            "--chips",
            "20",
            "--small-blind",
            "10",
            "--seed",
            "5",
        ],
        &script,
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("wins the game!"));
    assert!(stdout.contains("Game over. Winner: "));
    assert!(stdout.contains(" won after "));
}

#[test]
fn input_ending_mid_game_is_an_interruption() {
    let (code, stdout, stderr) = play(&["--players", "ann,bob", "--seed", "42"], "pot\n");
    assert_eq!(code, 130);
    assert!(stdout.contains("Game terminated after 1 hand(s)."));
    assert!(stderr.contains("Interrupted: input closed before the game finished"));
}

#[test]
fn turn_timeout_is_announced() {
    let (code, _, stderr) = play(
        &["--players", "ann,bob", "--seed", "42", "--turn-timeout", "60"],
        "q\n",
    );
    assert_eq!(code, 0);
    assert!(stderr.contains("WARNING: Players who do not act within 60s are folded automatically."));
}

#[test]
fn a_lone_player_cannot_start_a_game() {
    let (code, stdout, stderr) = play(&["--players", "solo"], "");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("between 2 and"));
}

#[test]
fn duplicate_names_are_refused() {
    let (code, _, stderr) = play(&["--players", "ann,ann", "--seed", "1"], "");
    assert_eq!(code, 2);
    assert!(stderr.contains("seated twice"), "stderr: {stderr}");
}
