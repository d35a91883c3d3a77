// src/user.rs
use crate::client::ActionClient;
use crate::error::{LoadgenError, LoadgenResult};
use crate::request;
use crate::selection::WeightedChoice;
use crate::stats::StatsCollector;
use crate::types::{ActionKind, ActionRequest, UserConfig, WaitRange};
use rand::Rng;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info};
use uuid::Uuid;

fn sample_wait<R: Rng>(range: &WaitRange, rng: &mut R) -> Duration {
    Duration::from_secs_f64(rng.gen_range(range.min_secs..=range.max_secs))
}

/// One simulated client. Owns its configuration; shares nothing with other
/// users besides the stats collector.
pub struct VirtualUser {
    id: Uuid,
    config: UserConfig,
    choice: WeightedChoice<ActionKind>,
    client: ActionClient,
    stats: StatsCollector,
}

impl VirtualUser {
    pub fn new(
        config: UserConfig,
        client: ActionClient,
        stats: StatsCollector,
    ) -> LoadgenResult<Self> {
        config.identity.validate()?;
        if config.wait.min_secs < 0.0 || config.wait.max_secs < config.wait.min_secs {
            return Err(LoadgenError::InvalidConfiguration(format!(
                "bad wait range: {:?}",
                config.wait
            )));
        }
        let choice = WeightedChoice::new(config.weights.entries())?;

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            choice,
            client,
            stats,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Pick the next action and build its request. All randomness happens
    /// here, synchronously, so the loop holds no rng across await points.
    fn next_request(&self) -> LoadgenResult<(ActionRequest, Duration)> {
        let mut rng = rand::thread_rng();
        let kind = *self.choice.pick(&mut rng);
        let request = request::build_for_action(
            kind,
            &self.config.identity,
            &self.config.headers,
            &mut rng,
        )?;
        let wait = sample_wait(&self.config.wait, &mut rng);
        Ok((request, wait))
    }

    /// Action loop: pick, build, send, record, pace, until shutdown flips.
    /// A failed action is counted and the loop continues.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> LoadgenResult<()> {
        info!(user = %self.id, "virtual user started");

        while !*shutdown.borrow() {
            let (request, wait) = self.next_request()?;
            debug!(user = %self.id, action = request.kind.as_str(), "dispatching");

            let outcome = self.client.execute(&request).await;
            self.stats.record(&outcome).await;

            tokio::select! {
                _ = sleep(wait) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!(user = %self.id, "virtual user stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionWeights;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wait_sample_within_bounds() {
        let range = WaitRange {
            min_secs: 0.5,
            max_secs: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..1000 {
            let wait = sample_wait(&range, &mut rng);
            assert!(wait >= Duration::from_millis(500));
            assert!(wait <= Duration::from_secs(1));
        }
    }

    #[test]
    fn test_rejects_inverted_wait_range() {
        let mut config = UserConfig::fixed_pool();
        config.wait = WaitRange {
            min_secs: 2.0,
            max_secs: 1.0,
        };
        let client = ActionClient::new("http://localhost:1").unwrap();
        assert!(VirtualUser::new(config, client, StatsCollector::new()).is_err());
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let mut config = UserConfig::random_ids();
        config.weights = ActionWeights {
            add_asset: 0,
            get_balances: 0,
            get_balance: 0,
        };
        let client = ActionClient::new("http://localhost:1").unwrap();
        assert!(VirtualUser::new(config, client, StatsCollector::new()).is_err());
    }

    #[test]
    fn test_next_request_respects_fixed_pool() {
        let config = UserConfig::fixed_pool();
        let client = ActionClient::new("http://localhost:1").unwrap();
        let user = VirtualUser::new(config, client, StatsCollector::new()).unwrap();

        for _ in 0..50 {
            let (request, _) = user.next_request().unwrap();
            if let Some(body) = &request.body {
                let uid = body["uid"].as_str().unwrap();
                assert!(["user1", "user2", "user3"].contains(&uid));
            }
        }
    }
}
