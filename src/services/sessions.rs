//! Onboarding wizard sessions
//!
//! One wizard per session id. Every change runs through the wizard reducer;
//! a session that reaches submission is closed and its draft becomes a client.
//! Idle sessions expire after the configured TTL and are purged lazily.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::directory::Directory;
use super::notifications::notify_client_added;
use crate::domain::onboarding::{FieldErrors, OnboardingForm};
use crate::domain::wizard::{Wizard, WizardAction, WizardError, WizardState, WizardStep};
use crate::domain::Client;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("onboarding session {0} not found")]
    NotFound(Uuid),

    #[error("too many open onboarding sessions (limit {0})")]
    LimitReached(usize),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

struct Session {
    wizard: Wizard,
    touched: Instant,
}

/// What a session looks like after an action
#[derive(Debug)]
pub enum SessionOutcome {
    Editing(Wizard),
    Submitted {
        form: OnboardingForm,
        client: Client,
    },
}

#[derive(Clone)]
pub struct WizardSessions {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    directory: Directory,
    ttl: Duration,
    max_sessions: usize,
}

impl WizardSessions {
    pub fn new(directory: Directory, ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            directory,
            ttl,
            max_sessions,
        }
    }

    fn purge_expired(&self, sessions: &mut HashMap<Uuid, Session>) {
        let ttl = self.ttl;
        sessions.retain(|id, session| {
            let live = session.touched.elapsed() < ttl;
            if !live {
                info!(session_id = %id, "Onboarding session expired");
            }
            live
        });
    }

    pub fn open(&self) -> Result<(Uuid, Wizard), SessionError> {
        let mut sessions = self.sessions.lock();
        self.purge_expired(&mut sessions);

        if sessions.len() >= self.max_sessions {
            warn!(limit = self.max_sessions, "Onboarding session limit reached");
            return Err(SessionError::LimitReached(self.max_sessions));
        }

        let id = Uuid::new_v4();
        let wizard = Wizard::new();
        sessions.insert(
            id,
            Session {
                wizard: wizard.clone(),
                touched: Instant::now(),
            },
        );

        info!(session_id = %id, "Onboarding session opened");
        Ok((id, wizard))
    }

    pub fn get(&self, id: Uuid) -> Result<Wizard, SessionError> {
        let mut sessions = self.sessions.lock();
        self.purge_expired(&mut sessions);

        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touched = Instant::now();
        Ok(session.wizard.clone())
    }

    /// Errors for one step of the session's draft. Does not change the session.
    pub fn validate(&self, id: Uuid, step: WizardStep) -> Result<FieldErrors, SessionError> {
        Ok(self.get(id)?.validate(step))
    }

    pub fn apply(&self, id: Uuid, action: WizardAction) -> Result<SessionOutcome, SessionError> {
        let mut sessions = self.sessions.lock();
        self.purge_expired(&mut sessions);

        let session = sessions.remove(&id).ok_or(SessionError::NotFound(id))?;
        let is_advance = matches!(action, WizardAction::Advance);
        let from_step = session.wizard.step();

        match WizardState::Editing(session.wizard).apply(action)? {
            WizardState::Editing(wizard) => {
                if is_advance {
                    if wizard.errors().is_empty() {
                        debug!(session_id = %id, from = ?from_step, to = ?wizard.step(), "Wizard advanced");
                    } else {
                        let fields: Vec<_> = wizard.errors().fields().collect();
                        debug!(session_id = %id, step = ?from_step, ?fields, "Wizard step blocked");
                    }
                }
                sessions.insert(
                    id,
                    Session {
                        wizard: wizard.clone(),
                        touched: Instant::now(),
                    },
                );
                Ok(SessionOutcome::Editing(wizard))
            }
            WizardState::Submitted { form } => {
                drop(sessions);
                let client = self.finish(id, &form);
                Ok(SessionOutcome::Submitted { form, client })
            }
        }
    }

    fn finish(&self, id: Uuid, form: &OnboardingForm) -> Client {
        info!(
            session_id = %id,
            business_name = %form.business_name,
            services = ?form.services,
            "Onboarding submitted"
        );

        let client = form.to_client(Uuid::new_v4().to_string());
        self.directory.insert_client(client.clone());
        notify_client_added(&self.directory, &client);

        info!(client_id = %client.id, branch = %client.branch, "Client created from onboarding");
        client
    }

    /// Discard a session without effect.
    pub fn abandon(&self, id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.sessions.lock();
        self.purge_expired(&mut sessions);

        sessions.remove(&id).ok_or(SessionError::NotFound(id))?;
        info!(session_id = %id, "Onboarding session abandoned");
        Ok(())
    }

    pub fn len(&self) -> usize {
        let mut sessions = self.sessions.lock();
        self.purge_expired(&mut sessions);
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
