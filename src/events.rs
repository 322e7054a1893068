use crate::lineage::RitualTag;
use crate::service::RitualKind;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events emitted by the studio for front ends and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StudioEvent {
    LineageAppended {
        index: usize,
        ritual: RitualTag,
    },
    GhostPreviewed {
        ritual: RitualKind,
    },
    GhostDiscarded,
    SuggestionsChanged {
        count: usize,
    },
    InsightRaised {
        text: String,
    },
    InsightCleared,
    DreamStarted {
        session_id: String,
    },
    DreamStepCompleted {
        step: u64,
    },
    DreamPaused,
    DreamResumed,
    DreamStopped {
        session_id: String,
    },
    /// A dream sub-step failed and the loop went idle.
    DreamFailed {
        ritual: RitualKind,
        message: String,
    },
    RitualFailed {
        ritual: String,
        message: String,
    },
}

pub type EventSender = broadcast::Sender<StudioEvent>;
pub type EventReceiver = broadcast::Receiver<StudioEvent>;

/// Create a broadcast event bus with the given capacity.
pub fn event_bus(capacity: usize) -> (EventSender, EventReceiver) {
    broadcast::channel(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_bus_creation() {
        let (tx, _rx) = event_bus(16);
        assert_eq!(tx.receiver_count(), 1);
    }

    #[tokio::test]
    async fn event_bus_send_receive() {
        let (tx, mut rx) = event_bus(16);

        tx.send(StudioEvent::LineageAppended {
            index: 0,
            ritual: RitualTag::Init,
        })
        .unwrap();

        match rx.recv().await.unwrap() {
            StudioEvent::LineageAppended { index, ritual } => {
                assert_eq!(index, 0);
                assert_eq!(ritual, RitualTag::Init);
            }
            other => panic!("expected LineageAppended, got {other:?}"),
        }
    }

    #[test]
    fn events_serialize_with_kind_tag() {
        let json = serde_json::to_value(StudioEvent::DreamStepCompleted { step: 3 }).unwrap();
        assert_eq!(json["kind"], "dream_step_completed");
        assert_eq!(json["step"], 3);
    }
}
