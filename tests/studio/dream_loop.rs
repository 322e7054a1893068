use std::time::Duration;

use glyphcodex::dream::DreamState;
use glyphcodex::events::StudioEvent;
use glyphcodex::lineage::RitualTag;
use glyphcodex::service::RitualKind;

use super::ritual_harness::{DREAM_INTERVAL, seeded_rig};

#[tokio::test(start_paused = true)]
async fn one_flush_advances_step_lineage_and_log() {
    let rig = seeded_rig().await;
    rig.dream.start().await.unwrap();

    let status = rig.dream.status();
    assert_eq!(status.state, DreamState::Running);
    assert_eq!(status.step_count, 1);
    assert_eq!(status.log_len, 3);

    let tags: Vec<_> = rig.studio.lineage().iter().map(|e| e.ritual).collect();
    assert_eq!(
        tags,
        vec![
            RitualTag::Init,
            RitualTag::Evolve,
            RitualTag::Mutate,
            RitualTag::Reflect
        ]
    );
    // Mutate works on the glyph evolve just produced.
    let requests = rig.service.requests();
    let evolved = rig.studio.lineage()[1].glyph.clone();
    assert!(matches!(
        &requests[2],
        glyphcodex::service::RitualRequest::Mutate { glyph, .. } if *glyph == evolved
    ));
    rig.dream.stop();
}

#[tokio::test(start_paused = true)]
async fn step_count_only_grows_while_running() {
    let rig = seeded_rig().await;
    rig.dream.start().await.unwrap();

    let mut last = rig.dream.status().step_count;
    tokio::time::sleep(Duration::from_millis(50)).await;
    for _ in 0..4 {
        tokio::time::sleep(DREAM_INTERVAL).await;
        let now = rig.dream.status().step_count;
        assert!(now >= last);
        last = now;
    }
    assert_eq!(last, 5);

    rig.dream.stop();
    assert_eq!(rig.dream.status().step_count, 0);
    assert_eq!(rig.dream.status().log_len, 15);

    rig.dream.clear_log();
    assert_eq!(rig.dream.status().log_len, 0);
}

#[tokio::test(start_paused = true)]
async fn pause_twice_then_resume_once() {
    let rig = seeded_rig().await;
    rig.dream.start().await.unwrap();

    rig.dream.pause();
    rig.dream.pause();
    assert_eq!(rig.dream.status().state, DreamState::Paused);
    rig.dream.resume();
    assert_eq!(rig.dream.status().state, DreamState::Running);

    tokio::time::sleep(DREAM_INTERVAL + Duration::from_millis(50)).await;
    assert_eq!(rig.dream.status().step_count, 2);
}

#[tokio::test(start_paused = true)]
async fn dream_failure_goes_idle_on_shared_channel() {
    let rig = seeded_rig().await;
    let mut events = rig.studio.subscribe();
    rig.dream.start().await.unwrap();

    rig.service.fail("reflect");
    tokio::time::sleep(DREAM_INTERVAL + Duration::from_millis(50)).await;

    let status = rig.dream.status();
    assert_eq!(status.state, DreamState::Idle);
    assert_eq!(status.step_count, 0);
    // Evolve and mutate of the second tick landed before reflect failed.
    assert_eq!(rig.studio.lineage_len(), 1 + 3 + 2);
    assert!(rig.studio.last_error().unwrap().contains("reflect"));

    let mut failed = None;
    while let Ok(event) = events.try_recv() {
        if let StudioEvent::DreamFailed { ritual, .. } = event {
            failed = Some(ritual);
        }
    }
    assert_eq!(failed, Some(RitualKind::Reflect));

    // No more ticks after the failure.
    let calls = rig.service.call_count();
    tokio::time::sleep(DREAM_INTERVAL * 3).await;
    assert_eq!(rig.service.call_count(), calls);
}

#[tokio::test(start_paused = true)]
async fn manual_rituals_interleave_with_dreaming() {
    let rig = seeded_rig().await;
    rig.dream.start().await.unwrap();
    rig.dream.pause();

    rig.orchestrator
        .run_ritual(RitualKind::Compress)
        .await
        .unwrap();
    assert_eq!(rig.studio.lineage_len(), 5);

    rig.dream.resume();
    tokio::time::sleep(DREAM_INTERVAL + Duration::from_millis(50)).await;
    assert_eq!(rig.studio.lineage_len(), 8);
    assert_eq!(
        rig.studio.lineage()[4].ritual,
        RitualTag::Compress
    );
    rig.dream.stop();
}
