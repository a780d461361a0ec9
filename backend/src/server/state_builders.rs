//! Builders wiring repositories into the HTTP port bundle.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{CourseRepository, EnrollmentRepository, UserRepository};
use crate::domain::{AccountService, EnrollmentService, RosterService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryRecordStore;
use crate::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselEnrollmentRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build handler state from one repository per record kind.
///
/// Every driving port shares the same repositories, so reads observe the
/// writes made through [`EnrollmentService`].
pub fn http_state_from_repositories<U, C, E>(
    users: Arc<U>,
    courses: Arc<C>,
    enrollments: Arc<E>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EnrollmentRepository + 'static,
{
    let enrollment_service = Arc::new(EnrollmentService::new(
        Arc::clone(&users),
        Arc::clone(&courses),
        enrollments,
        clock,
    ));
    let roster = Arc::new(RosterService::new(Arc::clone(&users), courses));
    HttpState::new(HttpStatePorts {
        enrollments: enrollment_service.clone(),
        enrollments_query: enrollment_service,
        courses: roster.clone(),
        students: roster,
        login: Arc::new(AccountService::new(users)),
    })
}

/// Build handler state over a single in-memory store.
pub fn http_state_in_memory(store: Arc<InMemoryRecordStore>, clock: Arc<dyn Clock>) -> HttpState {
    http_state_from_repositories(Arc::clone(&store), Arc::clone(&store), store, clock)
}

fn http_state_with_pool(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    http_state_from_repositories(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselCourseRepository::new(pool.clone())),
        Arc::new(DieselEnrollmentRepository::new(pool.clone())),
        clock,
    )
}

/// Select the record store named by `config`.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => http_state_with_pool(pool, Arc::clone(&config.clock)),
        None => {
            tracing::warn!("no database configured; using an empty in-memory record store");
            http_state_in_memory(
                Arc::new(InMemoryRecordStore::new()),
                Arc::clone(&config.clock),
            )
        }
    }
}
