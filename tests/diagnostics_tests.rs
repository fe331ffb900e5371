// Diagnostic parsing tests for the emacs-format output
use rucop::diagnostics::{parse_file_list, parse_line, parse_output};
use std::path::PathBuf;

#[test]
fn test_single_offense_line() {
    let diagnostic =
        parse_line("app/models/user.rb:12:3: W: Useless assignment to variable.").unwrap();
    assert_eq!(diagnostic.line, 11); // 1-based in raw text, 0-based here
    assert_eq!(diagnostic.message, "Useless assignment to variable.");
    assert_eq!(diagnostic.severity, 'W');
    assert_eq!(diagnostic.column, 3);
}

#[test]
fn test_severity_letters_accepted() {
    for severity in ['C', 'W', 'E', 'F'] {
        let line = format!("a.rb:1:1: {severity}: message");
        assert_eq!(parse_line(&line).unwrap().severity, severity);
    }
}

#[test]
fn test_paths_with_colons_and_spaces() {
    let diagnostic = parse_line("C:/work/my app/user.rb:3:1: C: msg").unwrap();
    assert_eq!(diagnostic.path, "C:/work/my app/user.rb");
    assert_eq!(diagnostic.line, 2);
}

#[test]
fn test_banners_and_summaries_ignored() {
    let output = "\
Inspecting 2 files
..

2 files inspected, no offenses detected
";
    assert!(parse_output(output).is_empty());
}

#[test]
fn test_full_check_output() {
    let output = "\
app/models/user.rb:12:3: W: Useless assignment to variable.
app/models/user.rb:30:1: C: Missing top-level class documentation comment.
app/models/user.rb:44:80: C: Line is too long. [95/79]

1 file inspected, 3 offenses detected
";
    let annotations = parse_output(output);
    assert_eq!(annotations.len(), 3);
    assert_eq!(
        annotations.message_at(11),
        Some("Useless assignment to variable.")
    );
    assert_eq!(annotations.message_at(43), Some("Line is too long. [95/79]"));
    assert_eq!(annotations.message_at(12), None);
}

#[test]
fn test_last_offense_wins_on_shared_line() {
    let output = "\
user.rb:8:1: C: first offense
user.rb:8:20: W: second offense
";
    let annotations = parse_output(output);
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations.message_at(7), Some("second offense"));
}

#[test]
fn test_file_list_output() {
    let output = "app/models/user.rb\nlib/tasks/db.rake\n\n";
    assert_eq!(
        parse_file_list(output),
        vec![
            PathBuf::from("app/models/user.rb"),
            PathBuf::from("lib/tasks/db.rake"),
        ]
    );
    assert!(parse_file_list("").is_empty());
}
