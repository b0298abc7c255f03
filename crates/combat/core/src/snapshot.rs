//! Read-only actor snapshots and the state digest.

use glam::Vec3;

use crate::state::{ActorId, ActorKind, ActorState};

/// Everything simulation-relevant about one actor at one instant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub kind: ActorKind,
    pub state: ActorState,
    pub previous_state: ActorState,
    pub health: f32,
    pub stamina: Option<f32>,
    pub poise: f32,
    pub is_invulnerable: bool,
    pub is_staggered: bool,
    pub is_dead: bool,
    pub velocity: Vec3,
    pub facing: f32,
    pub combo: u8,
    pub phase: Option<u8>,
}

/// SHA-256 over the bincode encoding of `records`, in order.
///
/// Two simulations fed identical inputs produce identical digests, which a
/// replay or rollback layer can compare frame by frame.
///
/// # Panics
///
/// If a record fails to serialize. Snapshots are plain data with no maps or
/// custom serializers, so bincode cannot fail on them.
#[cfg(feature = "serde")]
pub fn compute_state_digest<T: serde::Serialize>(records: &[T]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for record in records {
        let bytes = bincode::serialize(record).expect("snapshot serialization should not fail");
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::config::PlayerConfig;
    use crate::state::Trigger;

    #[test]
    fn digest_tracks_state() {
        let mut actor = Actor::player(ActorId::PLAYER, &PlayerConfig::default()).unwrap();
        let idle = compute_state_digest(&[actor.snapshot()]);
        assert_eq!(idle, compute_state_digest(&[actor.snapshot()]));

        actor.fire(Trigger::Dodge).unwrap();
        let dodging = compute_state_digest(&[actor.snapshot()]);
        assert_ne!(hex::encode(idle), hex::encode(dodging));
    }

    #[test]
    fn digest_covers_every_record() {
        let actor = Actor::player(ActorId::PLAYER, &PlayerConfig::default()).unwrap();
        let one = compute_state_digest(&[actor.snapshot()]);
        let two = compute_state_digest(&[actor.snapshot(), actor.snapshot()]);
        assert_ne!(one, two);
    }

    #[test]
    #[should_panic(expected = "snapshot serialization should not fail")]
    fn unserializable_record_is_not_skipped() {
        struct Broken;
        impl serde::Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("broken"))
            }
        }
        compute_state_digest(&[Broken]);
    }
}
