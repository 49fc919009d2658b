//! End-to-end tests for the interactive session
//!
//! Scripts are fed through an in-memory reader; output is captured uncolored.

use std::fs::{self, Metadata};
use std::io::{self, Cursor};
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use filebot::application::services::FileOpsService;
use filebot::application::{Session, SessionState};
use filebot::infrastructure::traits::{FileSystem, RealFileSystem};
use filebot::util::testing;

const PROMPT: &str = "filebot>";

fn run_with(fs: Arc<dyn FileSystem>, root: &Path, script: &str) -> (String, SessionState) {
    run_bytes(fs, root, script.as_bytes())
}

fn run_bytes(fs: Arc<dyn FileSystem>, root: &Path, script: &[u8]) -> (String, SessionState) {
    testing::init_test_setup();
    colored::control::set_override(false);

    let ops = FileOpsService::new(fs, root.to_path_buf());
    let mut session = Session::new(ops, Cursor::new(script.to_vec()), Vec::new());
    session.run().expect("session streams");
    let state = session.state();
    let output = String::from_utf8(session.into_output()).expect("utf-8 output");
    (output, state)
}

fn run(root: &Path, script: &str) -> String {
    run_with(Arc::new(RealFileSystem), root, script).0
}

fn snapshot(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================
// Session lifecycle
// ============================================================

#[test]
fn given_exit_when_run_then_terminates_without_further_prompts() {
    let temp = TempDir::new().unwrap();

    let (output, state) = run_with(
        Arc::new(RealFileSystem),
        temp.path(),
        "exit\ncreate file late.txt\n",
    );

    assert_eq!(state, SessionState::Terminated);
    assert_eq!(output.matches(PROMPT).count(), 1);
    assert!(output.ends_with("Goodbye!\n"));
    assert!(!temp.path().join("late.txt").exists());
}

#[test]
fn given_end_of_input_when_run_then_terminates() {
    let temp = TempDir::new().unwrap();

    let (output, state) = run_with(Arc::new(RealFileSystem), temp.path(), "help\n");

    assert_eq!(state, SessionState::Terminated);
    assert_eq!(output.matches(PROMPT).count(), 2);
    assert!(output.contains("move file <source> to <destination>"));
}

#[test]
fn given_uppercase_exit_with_padding_when_run_then_terminates() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), "   EXIT  \nhelp\n");

    assert_eq!(output.matches(PROMPT).count(), 1);
    assert!(!output.contains("Available commands"));
}

#[test]
fn given_unknown_input_when_run_then_reports_and_leaves_filesystem_unchanged() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("keep.txt"), "k").unwrap();
    let before = snapshot(temp.path());

    let output = run(temp.path(), "make me a sandwich\n\nremove file keep.txt\nexit\n");

    assert_eq!(
        output
            .matches("Unknown command. Type 'help' for assistance.")
            .count(),
        3
    );
    assert_eq!(snapshot(temp.path()), before);
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn given_undecodable_line_when_run_then_reported_and_later_commands_run() {
    let temp = TempDir::new().unwrap();

    let (output, state) = run_bytes(
        Arc::new(RealFileSystem),
        temp.path(),
        b"create file \xff\xfe.txt\ncreate file ok.txt\nexit\n",
    );

    assert_eq!(state, SessionState::Terminated);
    assert!(output.contains("error: input line is not valid UTF-8"));
    assert!(output.contains("✓ File 'ok.txt' created."));
    assert_eq!(output.matches(PROMPT).count(), 3);
    assert!(output.ends_with("Goodbye!\n"));
    assert_eq!(snapshot(temp.path()), vec!["ok.txt".to_string()]);
}

// ============================================================
// Filesystem commands
// ============================================================

#[test]
fn given_new_file_when_created_then_read_shows_empty_contents() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), "create file notes.txt\nread file notes.txt\nexit\n");

    assert!(output.contains("✓ File 'notes.txt' created."));
    assert!(output.contains("File contents:\n\n"));
    assert_eq!(fs::read(temp.path().join("notes.txt")).unwrap(), b"");
}

#[test]
fn given_create_twice_when_run_then_warns_and_keeps_contents() {
    let temp = TempDir::new().unwrap();

    let output = run(
        temp.path(),
        "create file a.txt\ncreate file a.txt\nexit\n",
    );

    assert!(output.contains("Warning: file already exists: a.txt"));
    assert_eq!(output.matches("created.").count(), 1);
}

#[test]
fn given_existing_content_when_create_again_then_content_untouched() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "precious").unwrap();

    run(temp.path(), "create file a.txt\nexit\n");

    assert_eq!(
        fs::read_to_string(temp.path().join("a.txt")).unwrap(),
        "precious"
    );
}

#[test]
fn given_present_file_when_deleted_then_read_reports_not_found() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("old.txt"), "bye").unwrap();

    let output = run(temp.path(), "delete file old.txt\nread file old.txt\nexit\n");

    assert!(output.contains("✓ File 'old.txt' deleted."));
    assert!(output.contains("Warning: file not found: old.txt"));
}

#[test]
fn given_file_with_text_when_read_then_prints_contents() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("poem.txt"), "roses are red\n").unwrap();

    let output = run(temp.path(), "read file poem.txt\nexit\n");

    assert!(output.contains("File contents:\nroses are red\n"));
}

#[test]
fn given_mixed_case_name_when_created_then_lowercased_on_disk() {
    let temp = TempDir::new().unwrap();

    run(temp.path(), "Create File README.MD\nexit\n");

    assert!(temp.path().join("readme.md").exists());
}

#[test]
fn given_empty_filename_when_create_then_error_reported_and_session_continues() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), "create file\nhelp\nexit\n");

    assert!(output.contains("error: create file ''"));
    assert!(output.contains("Available commands"));
}

#[test]
fn given_folder_when_created_then_listed() {
    let temp = TempDir::new().unwrap();

    let output = run(
        temp.path(),
        "create folder data\ncreate folder data\nlist files\nexit\n",
    );

    assert!(output.contains("✓ Folder 'data' created."));
    assert!(output.contains("Warning: folder already exists: data"));
    assert!(output.contains("Files and folders:\n  - data\n"));
    assert!(temp.path().join("data").is_dir());
}

#[test]
fn given_empty_directory_when_list_then_says_empty() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), "list files\nexit\n");

    assert!(output.contains("Directory is empty."));
}

#[test]
fn given_missing_directory_when_list_then_error_reported() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), "list files nowhere\nexit\n");

    assert!(output.contains("error: list directory 'nowhere'"));
}

// ============================================================
// Move command
// ============================================================

#[test]
fn given_source_when_moved_then_destination_holds_original_bytes() {
    let temp = TempDir::new().unwrap();
    let original: &[u8] = b"exact bytes \xff\x00 kept";
    fs::write(temp.path().join("a.bin"), original).unwrap();

    let output = run(temp.path(), "move file a.bin to b.bin\nexit\n");

    assert!(output.contains("✓ Moved 'a.bin' to 'b.bin'."));
    assert!(!temp.path().join("a.bin").exists());
    assert_eq!(fs::read(temp.path().join("b.bin")).unwrap(), original);
}

#[test]
fn given_missing_source_when_moved_then_not_found_and_no_destination() {
    let temp = TempDir::new().unwrap();

    let output = run(temp.path(), "move file a.txt to b.txt\nexit\n");

    assert!(output.contains("Warning: source file not found: a.txt"));
    assert!(!temp.path().join("b.txt").exists());
}

#[test]
fn given_source_below_a_regular_file_when_moved_then_error_not_missing_warning() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "x").unwrap();

    let output = run(temp.path(), "move file a.txt/inner to b\nexit\n");

    assert!(output.contains("error: move file 'a.txt/inner'"));
    assert!(!output.contains("source file not found"));
    assert!(!temp.path().join("b").exists());
}

#[test]
fn given_move_without_delimiter_when_run_then_format_error_and_no_mutation() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("onlyone"), "x").unwrap();
    let before = snapshot(temp.path());

    let output = run(temp.path(), "move file onlyone\nexit\n");

    assert!(output.contains("Warning: invalid move command format"));
    assert_eq!(snapshot(temp.path()), before);
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn given_folder_destination_when_moved_then_file_lands_inside() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "in").unwrap();

    let output = run(
        temp.path(),
        "create folder box\nmove file a.txt to box\nexit\n",
    );

    let inside = Path::new("box").join("a.txt");
    assert!(output.contains(&format!("✓ Moved 'a.txt' to '{}'.", inside.display())));
    assert!(temp.path().join(inside).exists());
}

// ============================================================
// Generic failures never end the session
// ============================================================

/// Filesystem where every primitive is refused.
struct DeniedFileSystem;

fn denied<T>() -> io::Result<T> {
    Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
}

impl FileSystem for DeniedFileSystem {
    fn read_dir_names(&self, _path: &Path) -> io::Result<Vec<String>> {
        denied()
    }
    fn create_new(&self, _path: &Path) -> io::Result<()> {
        denied()
    }
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        denied()
    }
    fn remove_file(&self, _path: &Path) -> io::Result<()> {
        denied()
    }
    fn create_dir(&self, _path: &Path) -> io::Result<()> {
        denied()
    }
    fn symlink_metadata(&self, _path: &Path) -> io::Result<Metadata> {
        denied()
    }
    fn is_dir(&self, _path: &Path) -> bool {
        false
    }
    fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        denied()
    }
    fn copy_any(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        denied()
    }
    fn remove_any(&self, _path: &Path) -> io::Result<()> {
        denied()
    }
}

#[test]
fn given_denied_filesystem_when_every_command_fails_then_session_survives() {
    let temp = TempDir::new().unwrap();
    let script = "list files\ncreate file a\nread file a\ndelete file a\n\
                  create folder d\nmove file a to b\nhelp\nexit\n";

    let (output, state) = run_with(Arc::new(DeniedFileSystem), temp.path(), script);

    assert_eq!(state, SessionState::Terminated);
    assert_eq!(output.matches("error: ").count(), 6);
    assert!(output.contains("error: read file 'a': permission denied"));
    assert!(output.contains("error: move file 'a': permission denied"));
    assert!(output.contains("Available commands"));
    assert!(output.ends_with("Goodbye!\n"));
}
