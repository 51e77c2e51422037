//! Branch labeling integration tests.
//!
//! These tests apply add and clear to branches and check the stored labels.

use kin_tests::prelude::*;

fn parents_of_p1() -> BranchSpec {
    BranchSpec::new("T1", "P1").with_ancestors(1)
}

fn add(mode: OverwriteMode, label: &str) -> LabelRequest {
    LabelRequest::new(Action::Add(mode), label)
}

mod leave {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("leave", nuclear_family())
            .apply("label_b1", parents_of_p1(), add(OverwriteMode::Leave, "B1"), |a| {
                a.persons(&["P1", "P2", "P3"])
                    .families(&["F1"])
                    .updated(3)
                    .skipped(1)
                    .label("P1", "B1")
                    .label("P2", "OLD")
                    .label("P3", "B1")
                    .family_label("F1", "B1")
                    .status(OperationStatus::Complete)
            })
            .apply("again", parents_of_p1(), add(OverwriteMode::Leave, "B1"), |a| {
                a.updated(0).skipped(4)
            })
    }

    #[test]
    fn test_leave_keeps_existing_labels() {
        scenario().run().unwrap();
    }
}

mod append {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("append", nuclear_family())
            .apply("first", parents_of_p1(), add(OverwriteMode::Append, "B1"), |a| {
                a.updated(4).label("P2", "OLD,B1").label("P1", "B1")
            })
            .apply("second", parents_of_p1(), add(OverwriteMode::Append, "B1"), |a| {
                a.updated(0).skipped(4).label("P2", "OLD,B1")
            })
            .apply("other_branch", parents_of_p1(), add(OverwriteMode::Append, "B2"), |a| {
                a.updated(4).label("P2", "OLD,B1,B2")
            })
    }

    #[test]
    fn test_append_is_idempotent() {
        scenario().run().unwrap();
    }
}

mod overwrite_and_clear {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("overwrite_and_clear", nuclear_family())
            .apply("overwrite", parents_of_p1(), add(OverwriteMode::Overwrite, "B1"), |a| {
                a.updated(4).label("P2", "B1")
            })
            .apply("append_b2", BranchSpec::new("T1", "P1"), add(OverwriteMode::Append, "B2"), |a| {
                a.updated(1).label("P1", "B1,B2")
            })
            .apply("clear_b1", parents_of_p1(), LabelRequest::new(Action::Clear, "B1"), |a| {
                a.updated(4).label("P1", "B2").label("P2", "").family_label("F1", "")
            })
            .apply("clear_again", parents_of_p1(), LabelRequest::new(Action::Clear, "B1"), |a| {
                a.updated(0).skipped(4)
            })
    }

    #[test]
    fn test_overwrite_then_clear() {
        scenario().run().unwrap();
    }
}

mod exact_entries {
    use super::*;

    fn tree() -> TreeFixture {
        TreeFixture::new("T1")
            .labeled("P1", "B10")
            .labeled("P2", "B1,B10")
            .persons(&["P3"])
            .family("F1", "P2", "P3", &["P1"])
            .family_labeled("B1, B10")
    }

    pub fn scenario() -> Scenario {
        Scenario::new("exact_entries", tree())
            .apply("clear_b1", parents_of_p1(), LabelRequest::new(Action::Clear, "B1"), |a| {
                a.updated(2)
                    .skipped(2)
                    .label("P1", "B10")
                    .label("P2", "B10")
                    .family_label("F1", "B10")
            })
    }

    #[test]
    fn test_clear_matches_whole_entries() {
        scenario().run().unwrap();
    }
}

mod label_rules {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("label_rules", nuclear_family())
            .apply("separator", parents_of_p1(), add(OverwriteMode::Leave, "B1,B2"), |a| {
                a.error("must not contain ','")
            })
            .apply("spaces", parents_of_p1(), add(OverwriteMode::Leave, "Smith line"), |a| {
                a.error_matches("must match")
            })
            .apply("blank", parents_of_p1(), LabelRequest::new(Action::Clear, " "), |a| {
                a.error_matches("(?i)label")
            })
            .apply("untouched", BranchSpec::new("T1", "P2"), LabelRequest::new(Action::Clear, "X"), |a| {
                a.skipped(1).label("P2", "OLD")
            })
    }

    #[test]
    fn test_labels_are_validated() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_empty_pattern_allows_spaces() {
        Scenario::new("free_text", nuclear_family())
            .config(SessionConfig::new().with_label_pattern(""))
            .apply(
                "spaces",
                BranchSpec::new("T1", "P1"),
                add(OverwriteMode::Leave, "Smith line"),
                |a| a.updated(1).label("P1", "Smith line"),
            )
            .run()
            .unwrap();
    }
}

mod registered {
    use super::*;

    fn smith() -> BranchDef {
        BranchDef {
            tree: "T1".into(),
            id: "smith".into(),
            description: "Descendants of the Smith grandparents".to_string(),
            root: "G1".into(),
            ancestor_generations: 0,
            descendant_of_ancestor_generations: 0,
            descendant_generations: 2,
            include_spouses: false,
        }
    }

    pub fn scenario() -> Scenario {
        Scenario::new("registered", sample_tree())
            .branch(smith())
            .apply_branch("apply", "T1", "smith", add(OverwriteMode::Leave, "SMITH"), |a| {
                a.persons(&["A1", "G1", "H1", "P1", "P2"])
                    .label("H1", "SMITH")
                    .label("P3", "")
            })
            .apply_branch("unknown", "T1", "jones", add(OverwriteMode::Leave, "JONES"), |a| {
                a.error("unknown branch: jones")
            })
    }

    #[test]
    fn test_registered_branch_is_applied() {
        scenario().run().unwrap();
    }
}

#[test]
fn test_labels_survive_between_sessions() {
    // GIVEN a tree labeled in one session
    let tree = Scenario::new("first", nuclear_family())
        .apply("label", parents_of_p1(), add(OverwriteMode::Append, "B1"), |a| a.updated(4))
        .run()
        .unwrap();

    // WHEN a new session searches for the label
    let session = BranchSession::new(tree, SessionConfig::default()).unwrap();
    let labeled: Vec<String> = session
        .store()
        .records_with_label("B1")
        .map(|r| r.to_string())
        .collect();

    // THEN every branch record is found
    assert_eq!(
        labeled,
        vec!["person:P1", "person:P2", "person:P3", "family:F1"]
    );
}
