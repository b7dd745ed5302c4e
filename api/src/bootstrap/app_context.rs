use std::sync::Arc;

use tokio::sync::watch;

use crate::application::ports::membership_index::MembershipIndex;
use crate::application::ports::paper_repository::PaperRepository;
use crate::application::services::registration::RegistrationState;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    paper_repo: Arc<dyn PaperRepository>,
    memberships: Arc<dyn MembershipIndex>,
    registration: watch::Receiver<RegistrationState>,
}

impl AppServices {
    pub fn new(
        paper_repo: Arc<dyn PaperRepository>,
        memberships: Arc<dyn MembershipIndex>,
        registration: watch::Receiver<RegistrationState>,
    ) -> Self {
        Self {
            paper_repo,
            memberships,
            registration,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn paper_repo(&self) -> Arc<dyn PaperRepository> {
        self.services.paper_repo.clone()
    }

    pub fn memberships(&self) -> Arc<dyn MembershipIndex> {
        self.services.memberships.clone()
    }

    pub fn registration_state(&self) -> RegistrationState {
        self.services.registration.borrow().clone()
    }
}
