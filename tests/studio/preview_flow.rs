use glyphcodex::service::RitualKind;
use glyphcodex::studio::{Mode, RitualOutcome};

use super::ritual_harness::seeded_rig;

#[tokio::test]
async fn cancelled_preview_leaves_no_trace() {
    let rig = seeded_rig().await;
    let lineage = rig.studio.lineage();
    let current = rig.studio.current();

    rig.orchestrator.set_mode(Mode::Test);
    let outcome = rig.orchestrator.run_ritual(RitualKind::Evolve).await.unwrap();
    assert_eq!(outcome, RitualOutcome::Previewed);
    assert!(rig.studio.ghost().is_some());
    assert_eq!(rig.studio.lineage(), lineage);
    assert_eq!(rig.studio.current(), current);

    assert!(rig.orchestrator.cancel());
    assert!(rig.studio.ghost().is_none());
    assert_eq!(rig.studio.lineage(), lineage);
    assert_eq!(rig.studio.current(), current);
}

#[tokio::test]
async fn committed_preview_matches_a_live_run() {
    let live = seeded_rig().await;
    live.orchestrator.run_ritual(RitualKind::Mutate).await.unwrap();

    let test = seeded_rig().await;
    test.orchestrator.set_mode(Mode::Test);
    test.orchestrator.run_ritual(RitualKind::Mutate).await.unwrap();
    assert_eq!(test.orchestrator.commit(), Some(1));

    let strip = |entries: Vec<glyphcodex::lineage::LineageEntry>| {
        entries
            .into_iter()
            .map(|e| (e.svg, e.glyph, e.ritual))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(live.studio.lineage()), strip(test.studio.lineage()));
    assert_eq!(live.studio.current(), test.studio.current());
    assert!(test.studio.ghost().is_none());
}

#[tokio::test]
async fn commit_and_cancel_without_ghost_are_noops() {
    let rig = seeded_rig().await;
    rig.orchestrator.set_mode(Mode::Test);
    assert_eq!(rig.orchestrator.commit(), None);
    assert!(!rig.orchestrator.cancel());
    assert_eq!(rig.studio.lineage_len(), 1);
}

#[tokio::test]
async fn failed_preview_keeps_the_previous_ghost() {
    let rig = seeded_rig().await;
    rig.orchestrator.set_mode(Mode::Test);
    rig.orchestrator.run_ritual(RitualKind::Evolve).await.unwrap();
    let ghost = rig.studio.ghost();

    rig.service.fail("mutate");
    assert!(rig.orchestrator.run_ritual(RitualKind::Mutate).await.is_err());
    assert_eq!(rig.studio.ghost(), ghost);
}
