//! Tutor directory screen.

use std::sync::Arc;

use crate::domain::{StateMachine, Tutor};
use crate::ports::BookingGateway;

use super::ScreenPhase;

/// Controller for the tutor directory.
///
/// The listing is public, so no session is required. A failed refresh
/// keeps the previously loaded tutors on screen next to the error.
pub struct TutorsScreen {
    gateway: Arc<dyn BookingGateway>,
    phase: ScreenPhase,
    tutors: Vec<Tutor>,
    error: Option<String>,
}

impl TutorsScreen {
    /// Creates the screen in its idle phase.
    pub fn new(gateway: Arc<dyn BookingGateway>) -> Self {
        Self {
            gateway,
            phase: ScreenPhase::Idle,
            tutors: Vec::new(),
            error: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// The loaded tutors, most recent successful load.
    pub fn tutors(&self) -> &[Tutor] {
        &self.tutors
    }

    /// User-facing error text from the last failed refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loads or reloads the tutor listing. A refresh that arrives while
    /// one is already in flight is dropped.
    pub async fn refresh(&mut self) {
        if !self.phase.can_transition_to(&ScreenPhase::Loading) {
            return;
        }
        self.phase = ScreenPhase::Loading;
        self.error = None;

        match self.gateway.list_tutors().await {
            Ok(tutors) => {
                self.tutors = tutors;
                self.phase = ScreenPhase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "tutor refresh failed");
                self.error = Some(err.to_string());
                self.phase = ScreenPhase::Failed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryGateway;
    use crate::domain::TutorId;
    use crate::ports::GatewayError;

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    fn tutor(id: &str, name: &str) -> Tutor {
        Tutor {
            id: TutorId::new(id),
            name: name.to_string(),
            expertise: vec!["maths".to_string()],
            qualifications: String::new(),
            rate: 300.0,
            location: "Remote".to_string(),
        }
    }

    #[test]
    fn refresh_loads_tutors_and_reaches_ready() {
        let gateway = Arc::new(InMemoryGateway::new().with_tutor(tutor("t1", "Thandi")));
        let mut screen = TutorsScreen::new(gateway);
        assert_eq!(screen.phase(), ScreenPhase::Idle);

        run(screen.refresh());

        assert_eq!(screen.phase(), ScreenPhase::Ready);
        assert_eq!(screen.tutors().len(), 1);
        assert!(screen.error().is_none());
    }

    #[test]
    fn failed_refresh_keeps_previous_tutors() {
        let gateway = Arc::new(InMemoryGateway::new().with_tutor(tutor("t1", "Thandi")));
        let mut screen = TutorsScreen::new(Arc::clone(&gateway) as Arc<dyn BookingGateway>);
        run(screen.refresh());
        assert_eq!(screen.tutors().len(), 1);

        gateway.fail_with(GatewayError::Network("offline".to_string()));
        run(screen.refresh());

        assert_eq!(screen.phase(), ScreenPhase::Failed);
        assert_eq!(screen.tutors().len(), 1);
        assert!(screen.error().expect("error set").contains("offline"));
    }

    #[test]
    fn failed_screen_can_retry() {
        let gateway = Arc::new(
            InMemoryGateway::new()
                .with_tutor(tutor("t1", "Thandi"))
                .with_error(GatewayError::Network("offline".to_string())),
        );
        let mut screen = TutorsScreen::new(Arc::clone(&gateway) as Arc<dyn BookingGateway>);

        run(screen.refresh());
        assert_eq!(screen.phase(), ScreenPhase::Failed);

        gateway.clear_error();
        run(screen.refresh());
        assert_eq!(screen.phase(), ScreenPhase::Ready);
        assert!(screen.error().is_none());
    }
}
