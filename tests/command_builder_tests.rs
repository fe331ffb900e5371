// Command construction tests covering interpreter-manager resolution,
// custom command override, option ordering, and path rewriting
use rucop::command::{shell_split, CommandBuilder};
use rucop::config::RunnerConfig;
use std::path::{Path, PathBuf};

#[cfg(unix)]
fn fake_executable(dir: &Path, name: &str) -> PathBuf {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_rvm_prefix_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let rvm = fake_executable(dir.path(), "rvm-auto-ruby");

    let mut config = RunnerConfig::default();
    config.check_for_rvm = true;
    config.rvm_auto_ruby_path = rvm.clone();

    let invocation = CommandBuilder::new(&config).build(&[], &[PathBuf::from("some_path")]);
    let argv = invocation.argv();
    assert_eq!(argv.len(), 4);
    assert_eq!(argv[0], rvm.to_string_lossy());
    assert_eq!(argv[1], "-S");
    assert_eq!(argv[2], "rubocop");
    assert_eq!(argv[3], "some_path");
}

#[cfg(unix)]
#[test]
fn test_rbenv_prefix_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let rbenv = fake_executable(dir.path(), "rbenv");

    let mut config = RunnerConfig::default();
    config.check_for_rbenv = true;
    config.rbenv_path = rbenv.clone();

    let invocation = CommandBuilder::new(&config).build(&[], &[PathBuf::from("some_path")]);
    let argv = invocation.argv();
    assert_eq!(argv.len(), 4);
    assert_eq!(argv[0], rbenv.to_string_lossy());
    assert_eq!(argv[1], "exec");
    assert_eq!(argv[2], "rubocop");
    assert_eq!(argv[3], "some_path");
}

#[cfg(unix)]
#[test]
fn test_non_executable_manager_falls_back_to_bare_rubocop() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    // Present but not executable
    let rvm = dir.path().join("rvm-auto-ruby");
    fs::write(&rvm, "").unwrap();
    fs::set_permissions(&rvm, fs::Permissions::from_mode(0o644)).unwrap();

    let mut config = RunnerConfig::default();
    config.check_for_rvm = true;
    config.rvm_auto_ruby_path = rvm;

    let invocation = CommandBuilder::new(&config).build(&[], &[]);
    assert_eq!(invocation.argv(), ["rubocop"]);
}

#[test]
fn test_custom_command_overrides_interpreter_managers() {
    let mut config = RunnerConfig::default();
    config.check_for_rvm = true;
    config.check_for_rbenv = true;
    config.rubocop_command = Some("bundle exec rubocop".to_string());

    let invocation = CommandBuilder::new(&config).build(&[], &[PathBuf::from("some_path")]);
    assert_eq!(
        invocation.argv(),
        ["bundle", "exec", "rubocop", "some_path"]
    );
}

#[test]
fn test_custom_command_shell_word_splitting() {
    let mut config = RunnerConfig::default();
    config.rubocop_command = Some(r#"ruby "/opt/my tools/rubocop""#.to_string());

    let invocation = CommandBuilder::new(&config).build(&[], &[]);
    assert_eq!(invocation.argv(), ["ruby", "/opt/my tools/rubocop"]);
    assert_eq!(shell_split(r#""a b" c"#), vec!["a b", "c"]);
}

#[test]
fn test_options_precede_config_flag_and_targets() {
    let mut config = RunnerConfig::default();
    config.rubocop_command = Some("rubocop".to_string());
    config.config_file = Some(PathBuf::from("custom/.rubocop.yml"));

    let options = vec!["--format".to_string(), "emacs".to_string()];
    let targets = vec![PathBuf::from("a.rb"), PathBuf::from("b.rb")];
    let invocation = CommandBuilder::new(&config).build(&options, &targets);

    assert_eq!(
        invocation.argv(),
        [
            "rubocop",
            "--format",
            "emacs",
            "-c",
            "custom/.rubocop.yml",
            "a.rb",
            "b.rb"
        ]
    );
}

#[test]
fn test_windows_backslash_rewrite() {
    let mut config = RunnerConfig::default();
    config.rubocop_command = Some("rubocop".to_string());

    config.on_windows = true;
    let invocation = CommandBuilder::new(&config).build(&[], &[PathBuf::from(r"a\b\c.rb")]);
    assert_eq!(invocation.argv(), ["rubocop", "a/b/c.rb"]);

    config.on_windows = false;
    let invocation = CommandBuilder::new(&config).build(&[], &[PathBuf::from(r"a\b\c.rb")]);
    assert_eq!(invocation.argv(), ["rubocop", r"a\b\c.rb"]);
}

#[test]
fn test_each_target_is_its_own_token() {
    let config = RunnerConfig::default();
    let targets = vec![
        PathBuf::from("path with spaces.rb"),
        PathBuf::from("other.rb"),
    ];
    let invocation = CommandBuilder::new(&config).build(&[], &targets);

    // Paths are never merged into a single token
    assert_eq!(invocation.argv().len(), 3);
    assert_eq!(invocation.argv()[1], "path with spaces.rb");
    assert_eq!(invocation.argv()[2], "other.rb");
}

#[test]
fn test_working_directory_resolution() {
    let config = RunnerConfig::default();
    let invocation =
        CommandBuilder::new(&config).build(&[], &[PathBuf::from("/repo/app/user.rb")]);
    assert_eq!(invocation.working_dir(), Some(Path::new("/repo/app")));

    let mut config = RunnerConfig::default();
    config.working_directory = Some(PathBuf::from("/elsewhere"));
    let invocation =
        CommandBuilder::new(&config).build(&[], &[PathBuf::from("/repo/app/user.rb")]);
    assert_eq!(invocation.working_dir(), Some(Path::new("/elsewhere")));
}
