use assert_cmd::cargo::cargo_bin_cmd;

fn help_output(args: &[&str]) -> String {
    let assert = cargo_bin_cmd!("pyfind").args(args).assert().success();
    let stdout = &assert.get_output().stdout;
    String::from_utf8_lossy(stdout).into_owned()
}

#[test]
fn top_level_help_lists_commands_and_request_forms() {
    let output = help_output(&["--help"]);
    for needle in ["find", "explain", "names", "pypy3", "--python"] {
        assert!(output.contains(needle), "help missing {needle}: {output}");
    }
}

#[test]
fn explain_help_mentions_usage() {
    let output = help_output(&["explain", "--help"]);
    assert!(
        output.contains("pyfind explain [-p SPEC]"),
        "explain usage missing: {output}"
    );
}
