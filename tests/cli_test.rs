use clap::Parser;
use kiln::cli::{Args, Mode};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("kiln")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_defaults() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert_eq!(parsed.template, ".");
    assert_eq!(parsed.output_dir, PathBuf::from("."));
    assert_eq!(parsed.mode, Mode::Auto);
    assert_eq!(parsed.answers, None);
    assert!(!parsed.stdin);
    assert!(!parsed.force);
    assert!(!parsed.skip_env_setup);
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--template",
        "./template",
        "--output-dir",
        "./output",
        "--mode",
        "new-dir",
        "--answers",
        "answers.yml",
        "--force",
        "--skip-env-setup",
        "--verbose",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template, "./template");
    assert_eq!(parsed.output_dir, PathBuf::from("./output"));
    assert_eq!(parsed.mode, Mode::NewDir);
    assert_eq!(parsed.answers, Some(PathBuf::from("answers.yml")));
    assert!(parsed.force);
    assert!(parsed.skip_env_setup);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let parsed = Args::try_parse_from(make_args(&["-f", "-v", "-s", "-m", "in-place"])).unwrap();

    assert!(parsed.force);
    assert!(parsed.verbose);
    assert!(parsed.stdin);
    assert_eq!(parsed.mode, Mode::InPlace);
}

#[test]
fn test_git_url_template() {
    let args = make_args(&["-t", "https://github.com/user/template.git"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template, "https://github.com/user/template.git");
}

#[test]
fn test_unknown_mode() {
    assert!(Args::try_parse_from(make_args(&["--mode", "sideways"])).is_err());
}

#[test]
fn test_stdin_conflicts_with_answers_file() {
    assert!(Args::try_parse_from(make_args(&["--stdin", "--answers", "a.json"])).is_err());
}

#[test]
fn test_positional_args_rejected() {
    assert!(Args::try_parse_from(make_args(&["./template"])).is_err());
}
