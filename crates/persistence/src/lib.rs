#![deny(warnings)]

//! Session snapshots: JSON for inspection, bincode for compact saves.
//!
//! Nothing here touches the filesystem; callers decide where bytes go.

use outbreak_core::{validate_state, GameState, UpgradeStore, ValidationError};
use outbreak_runtime::{NewsTracker, Session};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Snapshot format version; bumped on incompatible layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("unsupported snapshot version {0}")]
    Version(u32),
    #[error("rng position out of range")]
    RngPosition,
    #[error("invalid state: {0}")]
    Invalid(#[from] ValidationError),
}

/// Where a ChaCha stream was when the snapshot was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngCursor {
    pub seed: [u8; 32],
    pub stream: u64,
    pub word_pos: u64,
}

impl RngCursor {
    fn capture(rng: &ChaCha8Rng) -> Result<Self, SnapshotError> {
        Ok(Self {
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: u64::try_from(rng.get_word_pos()).map_err(|_| SnapshotError::RngPosition)?,
        })
    }

    fn restore(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(u128::from(self.word_pos));
        rng
    }
}

/// Everything needed to resume a session exactly where it stopped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub state: GameState,
    pub store: UpgradeStore,
    pub news: NewsTracker,
    pub rng: RngCursor,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Result<Self, SnapshotError> {
        Ok(Self {
            version: SNAPSHOT_VERSION,
            state: session.state().clone(),
            store: session.store().clone(),
            news: session.news().clone(),
            rng: RngCursor::capture(session.rng())?,
        })
    }

    /// Rebuild the session. Rejects unknown versions and inconsistent states.
    pub fn restore(self) -> Result<Session, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(self.version));
        }
        validate_state(&self.state)?;
        debug!(day = self.state.day, "snapshot restored");
        let rng = self.rng.restore();
        Ok(Session::from_parts(self.state, self.store, self.news, rng))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let bytes = bincode::serialize(self)?;
        debug!(len = bytes.len(), day = self.state.day, "snapshot encoded");
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
