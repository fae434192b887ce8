use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(home: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("droidsave");
    cmd.env("HOME", home.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let home = TempDir::new().expect("temp home");

    // top-level
    run_help(&home, &[]);

    // device commands
    run_help(&home, &["status"]);
    run_help(&home, &["apply"]);
    run_help(&home, &["restrict"]);
    run_help(&home, &["vendor"]);
    run_help(&home, &["optimize-background"]);
    run_help(&home, &["revert"]);
    run_help(&home, &["menu"]);

    // grouped subcommands
    run_help(&home, &["whitelist"]);
    run_help(&home, &["whitelist", "list"]);
    run_help(&home, &["whitelist", "add"]);
    run_help(&home, &["whitelist", "remove"]);
    run_help(&home, &["whitelist", "search"]);
}

#[test]
fn unknown_tier_is_rejected_by_the_parser() {
    let home = TempDir::new().expect("temp home");
    let mut cmd = cargo_bin_cmd!("droidsave");
    cmd.env("HOME", home.path())
        .args(["apply", "turbo"])
        .assert()
        .failure()
        .code(2);
}
