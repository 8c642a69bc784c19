//! `GitCli` against real repositories. Skipped when `git` is not installed.

use std::fs;
use std::path::Path;

use agentpolicy_core::NOTES_GLOBS;
use agentpolicy_index::{GitCli, IndexOutcome, MemoryIndex, VcsIndex};
use tempfile::TempDir;

fn git_or_skip() -> Option<GitCli> {
    let git = GitCli::default();
    if git.is_available() {
        Some(git)
    } else {
        eprintln!("git not available; skipping");
        None
    }
}

fn git_ok(git: &GitCli, root: &Path, args: &[&str]) {
    let output = git.run(root, args).expect("spawn git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write fixture");
}

fn commit_everything(git: &GitCli, root: &Path) {
    git_ok(git, root, &["init", "-q"]);
    git_ok(git, root, &["add", "-f", "."]);
    git_ok(
        git,
        root,
        &[
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=test",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-qm",
            "seed",
        ],
    );
}

/// A committed repository holding exactly `files`.
fn repo_with(git: &GitCli, files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    for rel in files {
        write(dir.path(), rel, "content\n");
    }
    commit_everything(git, dir.path());
    dir
}

/// A committed repository containing guidance and notes at several depths.
fn seeded_repo(git: &GitCli) -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    write(root, "AGENTS.md", "guidance\n");
    write(root, "AGENT_NOTES.md", "notes\n");
    write(root, "sub/AGENT_NOTES_EXTRA.md", "nested note\n");
    write(root, "a/b/.agentsmd", "dot\n");
    write(root, "README.md", "readme\n");
    commit_everything(git, root);
    dir
}

#[test]
fn plain_directory_is_not_a_work_tree() {
    let Some(git) = git_or_skip() else { return };
    let dir = TempDir::new().expect("tempdir");
    // Guard against a TMPDIR that itself lives inside a repository.
    if git.is_inside_work_tree(dir.path().parent().expect("parent")) {
        return;
    }
    assert!(!git.is_inside_work_tree(dir.path()));
}

#[test]
fn nonexistent_root_is_not_a_work_tree() {
    let Some(git) = git_or_skip() else { return };
    let dir = TempDir::new().expect("tempdir");
    assert!(!git.is_inside_work_tree(&dir.path().join("missing")));
}

#[test]
fn lists_notes_at_every_depth() {
    let Some(git) = git_or_skip() else { return };
    let repo = seeded_repo(&git);
    assert!(git.is_inside_work_tree(repo.path()));

    let mut listed = git
        .list_tracked(repo.path(), &NOTES_GLOBS)
        .ok()
        .expect("query");
    listed.sort();
    assert_eq!(
        listed,
        vec![
            "AGENT_NOTES.md".to_string(),
            "a/b/.agentsmd".to_string(),
            "sub/AGENT_NOTES_EXTRA.md".to_string(),
        ]
    );
}

#[test]
fn untrack_keeps_file_on_disk_and_second_call_misses() {
    let Some(git) = git_or_skip() else { return };
    let repo = seeded_repo(&git);
    let root = repo.path();

    assert_eq!(git.untrack(root, "sub/AGENT_NOTES_EXTRA.md"), IndexOutcome::Ok(()));
    assert!(!git.is_tracked(root, "sub/AGENT_NOTES_EXTRA.md"));
    assert_eq!(
        fs::read_to_string(root.join("sub/AGENT_NOTES_EXTRA.md")).expect("read"),
        "nested note\n"
    );

    assert_eq!(
        git.untrack(root, "sub/AGENT_NOTES_EXTRA.md"),
        IndexOutcome::PerItemMiss {
            path: "sub/AGENT_NOTES_EXTRA.md".to_string()
        }
    );
    assert!(git.is_tracked(root, "AGENTS.md"));
}

#[test]
fn corrupted_index_makes_query_unavailable() {
    let Some(git) = git_or_skip() else { return };
    let repo = seeded_repo(&git);
    fs::write(repo.path().join(".git").join("index"), b"garbage").expect("corrupt index");

    assert!(matches!(
        git.list_tracked(repo.path(), &NOTES_GLOBS),
        IndexOutcome::Unavailable { .. }
    ));
}

#[test]
fn listing_agrees_with_memory_index() {
    let Some(git) = git_or_skip() else { return };
    let files = [
        "AGENTS.md",
        "AGENT_NOTES.md",
        "AGENT_NOTES_archive/README.md",
        "AGENT_NOTES/old.md",
        ".agentsmd/guide.txt",
        "docs/.agentsmd",
        "docs/AGENT_NOTES_v2.md",
        "docs/AGENT_NOTES_v2.md.orig",
    ];
    let repo = repo_with(&git, &files);
    let memory = MemoryIndex::with_tracked(files);

    let mut from_git = git
        .list_tracked(repo.path(), &NOTES_GLOBS)
        .ok()
        .expect("git query");
    from_git.sort();
    let from_memory = memory
        .list_tracked(repo.path(), &NOTES_GLOBS)
        .ok()
        .expect("memory query");

    assert_eq!(from_git, from_memory);
    assert_eq!(
        from_git,
        vec![
            "AGENT_NOTES.md".to_string(),
            "docs/.agentsmd".to_string(),
            "docs/AGENT_NOTES_v2.md".to_string(),
        ]
    );
}

#[test]
fn untrack_treats_path_literally() {
    let Some(git) = git_or_skip() else { return };
    let repo = repo_with(&git, &["AGENT_NOTES[1].md", "AGENT_NOTES1.md"]);
    let root = repo.path();

    assert_eq!(git.untrack(root, "AGENT_NOTES[1].md"), IndexOutcome::Ok(()));
    assert!(!git.is_tracked(root, "AGENT_NOTES[1].md"));
    assert!(git.is_tracked(root, "AGENT_NOTES1.md"));
}
