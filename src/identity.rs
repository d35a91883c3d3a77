// src/identity.rs
use crate::error::{LoadgenError, LoadgenResult};
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

/// Where a virtual user's asset uids come from: a fixed pool of test
/// accounts, or a generator producing fixed-length alphanumeric ids.
#[derive(Debug, Clone)]
pub enum IdentitySource {
    FixedPool(Vec<String>),
    RandomAlphanumeric { len: usize },
}

impl IdentitySource {
    /// The three-account pool the fixed variant shipped with.
    pub fn default_pool() -> Self {
        IdentitySource::FixedPool(vec![
            "user1".to_string(),
            "user2".to_string(),
            "user3".to_string(),
        ])
    }

    pub fn random_alphanumeric(len: usize) -> Self {
        IdentitySource::RandomAlphanumeric { len }
    }

    /// Reject configurations that can never produce a uid.
    pub fn validate(&self) -> LoadgenResult<()> {
        match self {
            IdentitySource::FixedPool(pool) if pool.is_empty() => Err(
                LoadgenError::IdentitySourceError("fixed pool is empty".to_string()),
            ),
            IdentitySource::RandomAlphanumeric { len: 0 } => Err(
                LoadgenError::IdentitySourceError("random id length is zero".to_string()),
            ),
            _ => Ok(()),
        }
    }

    /// Draw a fresh uid. Each call is independent; no state is kept
    /// between draws.
    pub fn next_uid<R: Rng>(&self, rng: &mut R) -> LoadgenResult<String> {
        match self {
            IdentitySource::FixedPool(pool) => pool
                .choose(rng)
                .cloned()
                .ok_or_else(|| LoadgenError::IdentitySourceError("fixed pool is empty".to_string())),
            IdentitySource::RandomAlphanumeric { len } => {
                if *len == 0 {
                    return Err(LoadgenError::IdentitySourceError(
                        "random id length is zero".to_string(),
                    ));
                }
                Ok(rng
                    .sample_iter(&Alphanumeric)
                    .take(*len)
                    .map(char::from)
                    .collect())
            }
        }
    }
}
