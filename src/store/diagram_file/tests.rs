// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{load_diagram, save_diagram, LoadError, SaveError, WriteDurability};
use crate::model::{Diagram, DiagramType, NodeType, Point};

struct StoreTestCtx {
    tmp: TempDir,
}

impl StoreTestCtx {
    fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn entries(&self) -> Vec<String> {
        let mut names = fs::read_dir(self.tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

#[fixture]
fn ctx() -> StoreTestCtx {
    StoreTestCtx {
        tmp: tempfile::tempdir().unwrap(),
    }
}

fn prerequisite_tree() -> Diagram {
    let mut diagram = Diagram::new(DiagramType::PrerequisiteTree);
    let goal = diagram.add_node(NodeType::Statement.instantiate("Launch", Some(Point::new(0, 0))));
    let obstacle = diagram.add_node(NodeType::Obstacle.instantiate("No staging env", None));
    diagram.add_link(obstacle, goal).unwrap();
    diagram
}

#[rstest]
#[case(WriteDurability::BestEffort)]
#[case(WriteDurability::Durable)]
fn save_then_load_round_trips(ctx: StoreTestCtx, #[case] durability: WriteDurability) {
    let path = ctx.path("plan.jthink");
    let diagram = prerequisite_tree();

    save_diagram(&path, &diagram, durability).unwrap();
    let loaded = load_diagram(&path).unwrap();

    assert_eq!(loaded, diagram);
    assert_eq!(ctx.entries(), vec!["plan.jthink".to_owned()]);
}

#[rstest]
fn save_replaces_existing_file(ctx: StoreTestCtx) {
    let path = ctx.write("plan.jthink", "old contents");
    let diagram = prerequisite_tree();

    save_diagram(&path, &diagram, WriteDurability::BestEffort).unwrap();

    assert_eq!(load_diagram(&path).unwrap(), diagram);
    assert_eq!(ctx.entries(), vec!["plan.jthink".to_owned()]);
}

#[rstest]
fn save_into_missing_directory_fails_without_leftovers(ctx: StoreTestCtx) {
    let path = ctx.path("missing/plan.jthink");

    let err = save_diagram(&path, &prerequisite_tree(), WriteDurability::BestEffort)
        .expect_err("parent does not exist");

    assert!(matches!(err, SaveError::Io { .. }), "unexpected error: {err:?}");
    assert!(ctx.entries().is_empty());
}

#[cfg(unix)]
#[rstest]
fn save_refuses_to_follow_symlinks(ctx: StoreTestCtx) {
    let target = ctx.write("target.jthink", "keep me");
    let link = ctx.path("link.jthink");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let err = save_diagram(&link, &prerequisite_tree(), WriteDurability::BestEffort)
        .expect_err("symlink");

    assert!(matches!(err, SaveError::SymlinkRefused { .. }));
    assert_eq!(fs::read_to_string(&target).unwrap(), "keep me");
}

#[rstest]
fn load_missing_file_is_an_io_error(ctx: StoreTestCtx) {
    let path = ctx.path("nope.jthink");

    let err = load_diagram(&path).expect_err("missing file");

    assert!(matches!(err, LoadError::Io { .. }), "unexpected error: {err:?}");
    assert_eq!(err.path(), path.as_path());
}

#[rstest]
fn load_mismatched_tags_is_malformed(ctx: StoreTestCtx) {
    let path = ctx.write(
        "broken.jthink",
        r#"<diagram type="current-reality-tree"><node id="a" kind="task"></diagram>"#,
    );

    let err = load_diagram(&path).expect_err("malformed");

    assert!(matches!(err, LoadError::Malformed { .. }), "unexpected error: {err:?}");
}

#[rstest]
fn load_truncated_file_is_malformed(ctx: StoreTestCtx) {
    let path = ctx.write(
        "cut.jthink",
        r#"<diagram type="prerequisite-tree"><node id="a" kind="task"/>"#,
    );

    let err = load_diagram(&path).expect_err("truncated");

    assert!(matches!(err, LoadError::Malformed { .. }), "unexpected error: {err:?}");
    assert_eq!(err.path(), path.as_path());
}

#[rstest]
#[case::unknown_type(r#"<diagram type="org-chart"/>"#)]
#[case::not_xml("just some words")]
fn load_foreign_documents_is_unsupported_schema(ctx: StoreTestCtx, #[case] contents: &str) {
    let path = ctx.write("foreign.jthink", contents);

    let err = load_diagram(&path).expect_err("unsupported");

    assert!(
        matches!(err, LoadError::UnsupportedSchema { .. }),
        "unexpected error: {err:?}"
    );
}
