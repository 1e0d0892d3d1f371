//! Integration tests for treecuts-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end.

use std::collections::{HashSet, VecDeque};
use std::fs;

use treecuts_core::{
    builder::{BuildOptions, TreeBuilder},
    criteria::{Criteria, FilterMode},
    document::RawValue,
    element::Tree,
    error::{Error, FilterError},
    file_handling::{ensure_history_file, read_document, read_history},
    history::History,
    navigator::{Filter, FilterOutcome, FilterRequest, Navigator, NavigatorOptions, Outcome},
    template::TEMPLATE_TAG,
};

/// Picks candidates by name, in order, then aborts.
struct PickByName {
    script: VecDeque<&'static str>,
    levels: Vec<Vec<String>>,
}

impl PickByName {
    fn new(script: &[&'static str]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            levels: Vec::new(),
        }
    }
}

impl Filter for PickByName {
    fn run(&mut self, request: &FilterRequest<'_>) -> Result<FilterOutcome, FilterError> {
        self.levels.push(request.candidates.to_vec());

        Ok(match self.script.pop_front() {
            Some(name) => FilterOutcome::Picked {
                index: 0,
                matches: vec![name.to_string()],
            },
            None => FilterOutcome::Aborted,
        })
    }
}

fn build(yaml: &str, options: BuildOptions) -> Tree {
    TreeBuilder::new(options)
        .build(&RawValue::from_yaml_str("test", yaml).unwrap())
        .unwrap()
}

fn tag_options(tags: &[&str]) -> BuildOptions {
    BuildOptions {
        criteria: Criteria::new(
            FilterMode::Tags,
            tags.iter().map(|tag| (*tag).to_string()).collect(),
        ),
        ..BuildOptions::default()
    }
}

const CONTENT: &str = r"
ops ^ operations @infra:
  kubectl get <> -n <> ^ @comm @kube:
    - pods, default ^ list pods
    - services, kube-system
  docker:
    - docker ps ^ running containers @containers
    - docker images
git ^ @vcs:
  - git status
  - git log --oneline ^ short log
history:
  - pwd
";

/// Test choosing a command end to end, with the history file updated
#[test]
fn test_complete_selection_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.yml");
    ensure_history_file(&history_path).unwrap();

    let mut tree = build(
        "group10:\n  - ls -la\n  - echo hi\nhistory:\n  - pwd\n",
        BuildOptions::default(),
    );
    let mut filter = PickByName::new(&["group10", "ls -la"]);
    let mut sink: Vec<String> = Vec::new();

    let outcome = Navigator::new(
        &mut tree,
        &mut filter,
        &mut sink,
        History::new(Some(history_path.clone()), 11),
        NavigatorOptions::default(),
    )
    .run()
    .unwrap();

    assert_eq!(outcome, Outcome::Committed("ls -la".to_string()));
    assert_eq!(sink, vec!["ls -la"]);
    assert_eq!(History::entries(&tree)[0], "ls -la");
    assert_eq!(read_history(&history_path).unwrap(), vec!["ls -la", "pwd"]);
}

/// Test that aborting emits the fallback and leaves history alone
#[test]
fn test_abort_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = dir.path().join("history.yml");
    ensure_history_file(&history_path).unwrap();
    let before = fs::read_to_string(&history_path).unwrap();

    let mut tree = build(CONTENT, BuildOptions::default());
    let mut filter = PickByName::new(&[]);
    let mut sink: Vec<String> = Vec::new();

    let outcome = Navigator::new(
        &mut tree,
        &mut filter,
        &mut sink,
        History::new(Some(history_path.clone()), 11),
        NavigatorOptions::default(),
    )
    .run()
    .unwrap();

    assert_eq!(outcome, Outcome::Aborted);
    assert_eq!(sink, vec!["pwd"]);
    assert_eq!(History::entries(&tree), vec!["pwd"]);
    assert_eq!(fs::read_to_string(&history_path).unwrap(), before);
}

/// Test navigating into a template group renders the chosen command
#[test]
fn test_template_workflow() {
    let mut tree = build(CONTENT, BuildOptions::default());
    let mut filter = PickByName::new(&["ops", "kubectl get <> -n <>", "services, kube-system"]);
    let mut sink: Vec<String> = Vec::new();

    let outcome = Navigator::new(
        &mut tree,
        &mut filter,
        &mut sink,
        History::new(None, 11),
        NavigatorOptions::default(),
    )
    .run()
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::Committed("kubectl get services -n kube-system".to_string())
    );
    assert_eq!(History::entries(&tree)[0], "kubectl get services -n kube-system");
}

/// Test that a group emptied by tag filtering is skipped on the way back up
#[test]
fn test_navigation_recovery() {
    let mut tree = build(CONTENT, tag_options(&["vcs"]));
    let mut filter = PickByName::new(&["ops", "git", "git status"]);
    let mut sink: Vec<String> = Vec::new();

    let outcome = Navigator::new(
        &mut tree,
        &mut filter,
        &mut sink,
        History::new(None, 11),
        NavigatorOptions::default(),
    )
    .run()
    .unwrap();

    assert_eq!(outcome, Outcome::Committed("git status".to_string()));
    // `ops` holds only groups that filtering emptied, so it is offered once
    // and then dropped from the root.
    assert_eq!(filter.levels[0], vec!["ops", "git", "history"]);
    assert_eq!(filter.levels[1], vec!["git", "history"]);
}

/// Test parent and child links agree for every reachable element
#[test]
fn test_tree_integrity() {
    let tree = build(CONTENT, BuildOptions::default());

    for id in tree.descendants(tree.root()) {
        let element = tree.get(id);
        assert_eq!(element.children().len(), element.child_keys.len());

        for &child in element.children() {
            assert_eq!(tree.parent(child), Some(id));
            assert_eq!(element.child(&tree.get(child).content), Some(child));
        }
    }
}

/// Test every element carries its parent's tags except the template tag
#[test]
fn test_tag_inheritance() {
    let tree = build(CONTENT, BuildOptions::default());

    for id in tree.descendants(tree.root()) {
        let Some(parent) = tree.parent(id) else {
            continue;
        };
        let tags: HashSet<&String> = tree.get(id).tags.iter().collect();

        for tag in &tree.get(parent).tags {
            if tag != TEMPLATE_TAG {
                assert!(tags.contains(tag), "{} lacks `{tag}`", tree.get(id));
            }
        }
    }

    let ops = tree.get(tree.root()).child("ops").unwrap();
    let kubectl = tree.get(ops).child("kubectl get <> -n <>").unwrap();
    let pods = tree.get(kubectl).child("pods, default").unwrap();
    assert_eq!(tree.get(pods).tags, vec!["kube", "infra"]);
}

/// Test tag filtering keeps exactly the matching commands
#[test]
fn test_admission_soundness() {
    let unfiltered = build(CONTENT, BuildOptions::default());
    let filtered = build(CONTENT, tag_options(&["kube", "contain"]));

    let commands = |tree: &Tree| -> HashSet<String> {
        tree.descendants(tree.root())
            .into_iter()
            .filter(|&id| tree.get(id).is_command)
            .filter(|&id| tree.parent(id) != tree.history())
            .map(|id| tree.get(id).content.clone())
            .collect()
    };

    let kept = commands(&filtered);
    assert_eq!(
        kept,
        HashSet::from([
            "pods, default".to_string(),
            "services, kube-system".to_string(),
            "docker ps".to_string(),
        ])
    );

    for id in unfiltered.descendants(unfiltered.root()) {
        let element = unfiltered.get(id);
        if !element.is_command || unfiltered.parent(id) == unfiltered.history() {
            continue;
        }
        let matches = element
            .tags
            .iter()
            .any(|tag| tag.contains("kube") || tag.contains("contain"));
        assert_eq!(kept.contains(&element.content), matches, "{element}");
    }
}

/// Test flat mode projects and renders every command under the root
#[test]
fn test_flat_workflow() {
    let options = BuildOptions {
        flat: true,
        ..BuildOptions::default()
    };
    let mut tree = build(CONTENT, options);
    let root = tree.get(tree.root());
    let contents: Vec<&str> = root
        .children()
        .iter()
        .map(|&id| tree.get(id).content.as_str())
        .collect();

    assert_eq!(
        contents,
        vec![
            "kubectl get pods -n default",
            "kubectl get services -n kube-system",
            "docker ps",
            "docker images",
            "git status",
            "git log --oneline",
        ]
    );

    let mut filter = PickByName::new(&["docker images"]);
    let mut sink: Vec<String> = Vec::new();
    let outcome = Navigator::new(
        &mut tree,
        &mut filter,
        &mut sink,
        History::new(None, 11),
        NavigatorOptions::default(),
    )
    .run()
    .unwrap();

    assert_eq!(outcome, Outcome::Committed("docker images".to_string()));
}

/// Test flat mode with nothing admitted is reported
#[test]
fn test_flat_without_matches() {
    let options = BuildOptions {
        flat: true,
        ..tag_options(&["missing"])
    };
    let result = TreeBuilder::new(options).build(&RawValue::from_yaml_str("test", CONTENT).unwrap());

    let error = result.unwrap_err();
    assert!(matches!(error, Error::NoMatchingContent));
    assert_eq!(error.exit_code(), 2);
}

/// Test the history stays bounded and unique over many commits
#[test]
fn test_history_bound() {
    let mut tree = build("group: [ls]\nhistory: [pwd]\n", BuildOptions::default());
    let history = History::new(None, 4);

    for i in 0..20 {
        history.record(&mut tree, &format!("cmd{}", i % 3));
    }

    let entries = History::entries(&tree);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0], "cmd1");
    assert_eq!(entries.iter().collect::<HashSet<_>>().len(), 4);
}

/// Test merging documents read from files
#[test]
fn test_merged_documents() {
    let dir = tempfile::tempdir().unwrap();
    let user = dir.path().join("user.yml");
    let local = dir.path().join("local.yml");
    fs::write(&user, "shared: [ls]\nuser: [whoami]\n").unwrap();
    fs::write(&local, "shared: [pwd]\n").unwrap();

    let mut document = read_document("content", &user).unwrap().unwrap();
    document.merge(read_document("content", &local).unwrap().unwrap());

    let tree = build_document(&document);
    let shared = tree.get(tree.root()).child("shared").unwrap();
    let commands: Vec<&str> = tree
        .get(shared)
        .children()
        .iter()
        .map(|&id| tree.get(id).content.as_str())
        .collect();

    assert_eq!(commands, vec!["pwd"]);
    assert!(tree.get(tree.root()).child("user").is_some());
}

fn build_document(document: &RawValue) -> Tree {
    TreeBuilder::new(BuildOptions::default())
        .build(document)
        .unwrap()
}
