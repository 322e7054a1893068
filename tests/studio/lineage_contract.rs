use glyphcodex::lineage::RitualTag;
use glyphcodex::service::RitualKind;
use glyphcodex::studio::RitualOutcome;

use super::ritual_harness::seeded_rig;

#[tokio::test]
async fn seed_then_evolve_appends_two_entries() {
    let rig = seeded_rig().await;
    let outcome = rig.orchestrator.run_ritual(RitualKind::Evolve).await.unwrap();
    assert_eq!(outcome, RitualOutcome::Committed { index: 1 });

    let lineage = rig.studio.lineage();
    let tags: Vec<_> = lineage.iter().map(|e| e.ritual).collect();
    assert_eq!(tags, vec![RitualTag::Init, RitualTag::Evolve]);
    assert_eq!(rig.studio.current().unwrap(), lineage[1].artifact());
}

#[tokio::test]
async fn mixed_operations_only_ever_append() {
    let rig = seeded_rig().await;
    let mut seen = rig.studio.lineage();

    for step in 0..6 {
        match step % 3 {
            0 => {
                rig.orchestrator.run_ritual(RitualKind::Evolve).await.unwrap();
            }
            1 => {
                rig.orchestrator.run_ritual(RitualKind::Compress).await.unwrap();
            }
            _ => {
                rig.orchestrator.restore(0).unwrap();
            }
        }
        let now = rig.studio.lineage();
        assert_eq!(now.len(), seen.len() + 1);
        assert_eq!(&now[..seen.len()], &seen[..]);
        seen = now;
    }

    assert_eq!(seen[3].ritual, RitualTag::Manual);
    assert_eq!(seen[3].svg, seen[0].svg);
    assert!(seen[2].compressed.is_some());
}

#[tokio::test]
async fn failed_ritual_shares_the_error_channel() {
    let rig = seeded_rig().await;
    let mut events = rig.studio.subscribe();
    let before = rig.studio.lineage();

    rig.service.fail("mutate");
    tokio_test::assert_err!(rig.orchestrator.run_ritual(RitualKind::Mutate).await);
    assert_eq!(rig.studio.lineage(), before);
    assert!(rig.studio.last_error().unwrap().contains("500"));

    let mut saw_failure = false;
    while let Ok(event) = events.try_recv() {
        if let glyphcodex::events::StudioEvent::RitualFailed { ritual, .. } = event {
            assert_eq!(ritual, "mutate");
            saw_failure = true;
        }
    }
    assert!(saw_failure);

    rig.service.heal();
    tokio_test::assert_ok!(rig.orchestrator.run_ritual(RitualKind::Mutate).await);
    assert!(rig.studio.last_error().is_none());
}

#[tokio::test]
async fn reflect_is_suggested_after_mutate_then_evolve() {
    let rig = seeded_rig().await;
    rig.orchestrator.run_ritual(RitualKind::Mutate).await.unwrap();
    assert!(rig.studio.suggestions().is_empty());
    rig.orchestrator.run_ritual(RitualKind::Evolve).await.unwrap();

    let suggestions = rig.studio.suggestions();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].ritual, RitualKind::Reflect);

    rig.orchestrator
        .run_suggestion(&suggestions[0])
        .await
        .unwrap();
    assert!(rig.studio.suggestions().is_empty());
    assert!(rig.studio.insight().is_some());
}

#[tokio::test]
async fn evolve_then_mutate_suggests_nothing() {
    let rig = seeded_rig().await;
    rig.orchestrator.run_ritual(RitualKind::Evolve).await.unwrap();
    rig.orchestrator.run_ritual(RitualKind::Mutate).await.unwrap();
    assert!(rig.studio.suggestions().is_empty());
}
