use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::application::ports::service_directory::{ServiceDirectory, ServiceRegistration};

/// Capability names announced to the directory, one per exposed operation.
pub const CAPABILITIES: [&str; 2] = ["get-research", "add-paper"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Fixed pause between a failed attempt and the next one.
    pub interval: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationState {
    Idle,
    Attempting {
        attempt: u32,
    },
    Registered {
        attempts: u32,
        at: chrono::DateTime<chrono::Utc>,
    },
    GaveUp {
        attempts: u32,
    },
}

impl RegistrationState {
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationState::Idle => "idle",
            RegistrationState::Attempting { .. } => "attempting",
            RegistrationState::Registered { .. } => "registered",
            RegistrationState::GaveUp { .. } => "gave_up",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RegistrationState::Registered { .. } | RegistrationState::GaveUp { .. }
        )
    }
}

/// One-shot announcement of this service to the external directory.
///
/// `run` consumes the handshake, so a process can only go through Idle ->
/// Attempting -> Registered | GaveUp once. Failures stay inside this type; the
/// terminal state is reported through the watch channel and the return value.
pub struct RegistrationHandshake {
    directory: Arc<dyn ServiceDirectory>,
    registration: ServiceRegistration,
    policy: RetryPolicy,
    state: watch::Sender<RegistrationState>,
}

impl RegistrationHandshake {
    pub fn new(
        directory: Arc<dyn ServiceDirectory>,
        registration: ServiceRegistration,
        policy: RetryPolicy,
    ) -> Self {
        let (state, _) = watch::channel(RegistrationState::Idle);
        Self {
            directory,
            registration,
            policy,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RegistrationState> {
        self.state.subscribe()
    }

    pub fn spawn(self) -> JoinHandle<RegistrationState> {
        tokio::spawn(self.run())
    }

    pub async fn run(self) -> RegistrationState {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;
        let outcome = loop {
            attempt += 1;
            self.state
                .send_replace(RegistrationState::Attempting { attempt });
            info!(
                service = %self.registration.name,
                attempt,
                max_attempts,
                "registration_attempt"
            );

            let result = timeout(
                self.policy.attempt_timeout,
                self.directory.register(&self.registration),
            )
            .await;
            match result {
                Ok(Ok(())) => {
                    info!(service = %self.registration.name, attempt, "registration_succeeded");
                    break RegistrationState::Registered {
                        attempts: attempt,
                        at: chrono::Utc::now(),
                    };
                }
                Ok(Err(e)) => warn!(attempt, error = ?e, "registration_attempt_failed"),
                Err(_) => warn!(
                    attempt,
                    timeout_ms = self.policy.attempt_timeout.as_millis() as u64,
                    "registration_attempt_timed_out"
                ),
            }

            if attempt >= max_attempts {
                warn!(
                    service = %self.registration.name,
                    attempts = attempt,
                    "registration_gave_up_continuing_without_directory"
                );
                break RegistrationState::GaveUp { attempts: attempt };
            }
            sleep(self.policy.interval).await;
        };
        self.state.send_replace(outcome.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::papers::list_accessible::ListAccessiblePapers;
    use crate::infrastructure::memory::{InMemoryMembershipIndex, InMemoryPaperRepository};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    enum Behaviour {
        FailUntil(u32),
        Hang,
    }

    struct ScriptedDirectory {
        behaviour: Behaviour,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedDirectory {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ServiceDirectory for ScriptedDirectory {
        async fn register(&self, _registration: &ServiceRegistration) -> anyhow::Result<()> {
            let n = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(Instant::now());
                calls.len() as u32
            };
            match self.behaviour {
                Behaviour::FailUntil(success_at) if n >= success_at => Ok(()),
                Behaviour::FailUntil(_) => anyhow::bail!("directory unavailable"),
                Behaviour::Hang => std::future::pending().await,
            }
        }
    }

    fn registration() -> ServiceRegistration {
        ServiceRegistration {
            name: "Ku Research".into(),
            capabilities: CAPABILITIES.iter().map(|c| c.to_string()).collect(),
            callback_url: "http://localhost:8083".into(),
        }
    }

    fn gaps(calls: &[Instant]) -> Vec<Duration> {
        calls.windows(2).map(|w| w[1] - w[0]).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn always_failing_directory_gets_exactly_five_spaced_attempts() {
        let directory = ScriptedDirectory::new(Behaviour::FailUntil(u32::MAX));
        let handshake =
            RegistrationHandshake::new(directory.clone(), registration(), RetryPolicy::default());

        let outcome = handshake.run().await;

        assert_eq!(outcome, RegistrationState::GaveUp { attempts: 5 });
        let calls = directory.calls();
        assert_eq!(calls.len(), 5);
        assert!(gaps(&calls).iter().all(|g| *g == Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_success_on_third_attempt() {
        let directory = ScriptedDirectory::new(Behaviour::FailUntil(3));
        let handshake =
            RegistrationHandshake::new(directory.clone(), registration(), RetryPolicy::default());
        let status = handshake.subscribe();

        let outcome = handshake.spawn().await.unwrap();
        assert!(matches!(outcome, RegistrationState::Registered { attempts: 3, .. }));

        // Nothing else fires later.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(directory.calls().len(), 3);
        assert_eq!(status.borrow().label(), "registered");
    }

    #[tokio::test(start_paused = true)]
    async fn hung_directory_is_bounded_by_attempt_timeout() {
        let directory = ScriptedDirectory::new(Behaviour::Hang);
        let policy = RetryPolicy::default();
        let handshake = RegistrationHandshake::new(directory.clone(), registration(), policy);

        let started = Instant::now();
        let outcome = handshake.run().await;

        assert_eq!(outcome, RegistrationState::GaveUp { attempts: 5 });
        let bound = policy.attempt_timeout * 5 + policy.interval * 4;
        let elapsed = started.elapsed();
        assert!(elapsed >= bound && elapsed < bound + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempt_policy_still_tries_once() {
        let directory = ScriptedDirectory::new(Behaviour::FailUntil(u32::MAX));
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        let outcome = RegistrationHandshake::new(directory.clone(), registration(), policy)
            .run()
            .await;
        assert_eq!(outcome, RegistrationState::GaveUp { attempts: 1 });
        assert_eq!(directory.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn serving_path_stays_responsive_while_retrying() {
        let repo = InMemoryPaperRepository::new();
        let memberships = InMemoryMembershipIndex::default();
        let directory = ScriptedDirectory::new(Behaviour::FailUntil(u32::MAX));
        let handshake =
            RegistrationHandshake::new(directory.clone(), registration(), RetryPolicy::default());
        let status = handshake.subscribe();
        assert_eq!(*status.borrow(), RegistrationState::Idle);

        let handle = handshake.spawn();
        tokio::task::yield_now().await;

        let list = ListAccessiblePapers {
            repo: &repo,
            memberships: &memberships,
        };
        assert!(list.execute(1).await.is_empty());
        assert!(!status.borrow().is_terminal());

        assert_eq!(
            handle.await.unwrap(),
            RegistrationState::GaveUp { attempts: 5 }
        );
        assert!(list.execute(1).await.is_empty());
        assert_eq!(status.borrow().label(), "gave_up");
    }
}
