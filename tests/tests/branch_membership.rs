//! Branch membership integration tests.
//!
//! These tests preview branches of the reference tree and check who is in them.

use kin_tests::prelude::*;

fn look() -> LabelRequest {
    LabelRequest::new(Action::Add(OverwriteMode::Overwrite), "B1")
}

mod bounds {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("bounds", sample_tree())
            .preview("root_only", BranchSpec::new("T1", "P1"), look(), |a| {
                a.persons(&["P1"]).families(&[]).targets(1)
            })
            .preview(
                "parents",
                BranchSpec::new("T1", "P1").with_ancestors(1),
                look(),
                |a| a.persons(&["P1", "P2", "P3"]).families(&["F1"])
            )
            .preview(
                "grandparents",
                BranchSpec::new("T1", "P1").with_ancestors(2),
                look(),
                |a| {
                    a.persons(&["G1", "G2", "G3", "G4", "P1", "P2", "P3"])
                        .families(&["F1", "F10", "F11"])
                }
            )
            .preview(
                "children",
                BranchSpec::new("T1", "P1").with_descendants(1),
                look(),
                |a| a.persons(&["C1", "C2", "P1"]).families(&["F2"]).excludes("GC1")
            )
            .preview(
                "grandchildren",
                BranchSpec::new("T1", "P1").with_descendants(2),
                look(),
                |a| a.persons(&["C1", "C2", "GC1", "P1"]).families(&["F2", "F4"])
            )
    }

    #[test]
    fn test_generation_bounds() {
        scenario().run().unwrap();
    }
}

mod collateral {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("collateral", sample_tree())
            .preview(
                "siblings_and_half_siblings",
                BranchSpec::new("T1", "P1")
                    .with_ancestors(1)
                    .with_descendants_of_ancestors(1),
                look(),
                |a| {
                    a.persons(&["A1", "H1", "P1", "P2", "P3"])
                        .families(&["F1", "F3"])
                        .excludes("S1")
                }
            )
            .preview(
                "with_spouses",
                BranchSpec::new("T1", "P1")
                    .with_ancestors(1)
                    .with_descendants_of_ancestors(1)
                    .with_spouses(true),
                look(),
                |a| a.includes("S1").includes("W1").excludes("W2")
            )
    }

    #[test]
    fn test_collateral_lines() {
        scenario().run().unwrap();
    }
}

mod pedigree_collapse {
    use super::*;

    fn cousins() -> TreeFixture {
        // first cousins H and W share grandparents GA + GB
        TreeFixture::new("T1")
            .persons(&["GA", "GB", "M", "N", "X", "Y", "H", "W", "R"])
            .family("F0", "GA", "GB", &["M", "N"])
            .family("F1", "M", "X", &["H"])
            .family("F2", "Y", "N", &["W"])
            .family("F3", "H", "W", &["R"])
    }

    pub fn scenario() -> Scenario {
        Scenario::new("pedigree_collapse", cousins())
            .apply(
                "label_ancestry",
                BranchSpec::new("T1", "R").with_ancestors(3),
                LabelRequest::new(Action::Add(OverwriteMode::Append), "R-LINE"),
                |a| {
                    a.persons(&["GA", "GB", "H", "M", "N", "R", "W", "X", "Y"])
                        .cycles(0)
                        .updated(13)
                        .label("GA", "R-LINE")
                }
            )
    }

    #[test]
    fn test_shared_ancestors_counted_once() {
        scenario().run().unwrap();
    }
}

mod errors {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("errors", sample_tree())
            .preview("missing_root", BranchSpec::new("T1", "NOPE"), look(), |a| {
                a.error("Person not found: NOPE")
            })
            .preview("blank_root", BranchSpec::new("T1", "  "), look(), |a| {
                a.error_matches("(?i)invalid branch spec")
            })
            .preview("other_tree", BranchSpec::new("T9", "P1"), look(), |a| {
                a.error("Tree mismatch")
            })
            .preview(
                "over_cap",
                BranchSpec::new("T1", "P1").with_ancestors(100),
                look(),
                |a| a.error_matches("(?i)invalid branch spec.*99")
            )
    }

    #[test]
    fn test_rejected_requests() {
        scenario().run().unwrap();
    }
}

#[test]
fn test_cancelled_preview_reports_partial_progress() {
    let tree = sample_tree().build().unwrap();
    let session = BranchSession::new(tree, SessionConfig::default()).unwrap();
    let token = CancelToken::new();
    token.cancel();

    let err = session
        .preview(
            &BranchSpec::new("T1", "P1").with_ancestors(3),
            &look().with_cancel(token),
        )
        .unwrap_err();

    assert!(err.to_string().contains("cancelled"));
}
