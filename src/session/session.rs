use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::form::{AsteroidParameters, Field, FieldError, FormState};
use crate::predict::{PredictClient, PredictError, PredictionResult};

use super::error::SessionError;
use super::notification::Notification;

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PresentationState {
    Idle,
    Loading {
        submission: Uuid,
        started: DateTime<Utc>,
    },
    Settled {
        submission: Uuid,
        success: bool,
    },
}

impl PresentationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PresentationState::Loading { .. })
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SessionStatus {
    pub state: PresentationState,
    pub loading: bool,
    pub params: AsteroidParameters,
    pub result: Option<PredictionResult>,
    pub notification: Option<Notification>,
}

#[derive(Debug)]
struct Shared {
    form: FormState,
    state: PresentationState,
    result: Option<PredictionResult>,
    notification: Option<Notification>,
}

/// Form values, the latest prediction and the loading flag of one page.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct Session {
    client: PredictClient,
    notification_ttl: Duration,
    shared: Arc<StdMutex<Shared>>,
    events: broadcast::Sender<Notification>,
}

impl Session {
    pub fn new(client: PredictClient, notification_ttl: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            client,
            notification_ttl,
            shared: Arc::new(StdMutex::new(Shared {
                form: FormState::default(),
                state: PresentationState::Idle,
                result: None,
                notification: None,
            })),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Notifications emitted as submissions settle.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.events.subscribe()
    }

    pub fn params(&self) -> AsteroidParameters {
        self.lock().form.snapshot()
    }

    pub fn set_field(&self, field: Field, raw: &str) -> Result<f64, FieldError> {
        let outcome = self.lock().form.set_field(field, raw);
        if let Err(e) = &outcome {
            debug!("Ignoring form update: {}", e);
        }
        outcome
    }

    pub fn reset_form(&self) {
        self.lock().form.reset();
    }

    pub fn status(&self) -> SessionStatus {
        let now = Utc::now();
        let locked = self.lock();
        SessionStatus {
            state: locked.state.clone(),
            loading: locked.state.is_loading(),
            params: locked.form.snapshot(),
            result: locked.result.clone(),
            notification: locked
                .notification
                .clone()
                .filter(|n| n.is_active_at(now)),
        }
    }

    /// Sends the current form to the prediction service and settles the
    /// session with the outcome.
    ///
    /// Any previous result is cleared before the request goes out. A trigger
    /// while another submission is loading is refused with
    /// [`SessionError::InFlight`]. The request and its settlement run in a
    /// spawned task, so dropping the returned future still settles the
    /// session.
    pub async fn submit(&self) -> Result<PredictionResult, SessionError> {
        let (submission, params) = {
            let mut locked = self.lock();
            if locked.state.is_loading() {
                return Err(SessionError::InFlight);
            }
            let submission = Uuid::new_v4();
            locked.result = None;
            locked.state = PresentationState::Loading {
                submission,
                started: Utc::now(),
            };
            (submission, locked.form.snapshot())
        };

        info!(
            "Submitting prediction {} to {}",
            submission,
            self.client.endpoint()
        );

        let session = self.clone();
        let request = tokio::spawn(async move {
            let outcome = session.client.predict(&params).await;
            session.settle(submission, outcome)
        });

        match request.await {
            Ok(settled) => settled,
            Err(e) => {
                error!("Prediction {} task failed: {}", submission, e);
                self.fail(submission);
                Err(SessionError::Aborted(e.to_string()))
            }
        }
    }

    fn settle(
        &self,
        submission: Uuid,
        outcome: Result<PredictionResult, PredictError>,
    ) -> Result<PredictionResult, SessionError> {
        match outcome {
            Ok(result) => {
                info!(
                    "Prediction {} settled: {} (MOID {} AU)",
                    submission, result.risk, result.predicted_moid_au
                );
                let notification = Notification::success(self.notification_ttl);
                {
                    let mut locked = self.lock();
                    locked.result = Some(result.clone());
                    locked.state = PresentationState::Settled {
                        submission,
                        success: true,
                    };
                    locked.notification = Some(notification.clone());
                }
                let _ = self.events.send(notification);
                Ok(result)
            }
            Err(e) => {
                warn!("Prediction {} failed: {}", submission, e);
                self.fail(submission);
                Err(e.into())
            }
        }
    }

    fn fail(&self, submission: Uuid) {
        let notification = Notification::failure(self.notification_ttl);
        {
            let mut locked = self.lock();
            locked.result = None;
            locked.state = PresentationState::Settled {
                submission,
                success: false,
            };
            locked.notification = Some(notification.clone());
        }
        let _ = self.events.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NotificationKind;
    use crate::testing::{
        spawn_backend, spawn_fixed_backend, unreachable_endpoint, HAZARDOUS_BODY,
    };
    use axum::{
        http::{header::CONTENT_TYPE, StatusCode},
        routing::post,
        Router,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use url::Url;

    fn session_for(endpoint: Url) -> Session {
        let client = PredictClient::new(endpoint, None).unwrap();
        Session::new(client, Duration::seconds(5))
    }

    fn hazardous() -> PredictionResult {
        serde_json::from_str(HAZARDOUS_BODY).unwrap()
    }

    /// Backend that holds each response until `release` is notified.
    async fn gated_backend(release: Arc<Notify>) -> Url {
        spawn_backend(Router::new().route(
            "/predict",
            post(move || {
                let release = release.clone();
                async move {
                    release.notified().await;
                    ([(CONTENT_TYPE, "application/json")], HAZARDOUS_BODY)
                }
            }),
        ))
        .await
    }

    async fn wait_until_settled(session: &Session) {
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while session.status().loading {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }

    async fn wait_for_loading(session: &Session) {
        while !session.status().loading {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn starts_idle_with_defaults() {
        let session = session_for(unreachable_endpoint().await);
        let status = session.status();

        assert_eq!(status.state, PresentationState::Idle);
        assert!(!status.loading);
        assert_eq!(status.params, AsteroidParameters::default());
        assert!(status.result.is_none());
        assert!(status.notification.is_none());
    }

    #[tokio::test]
    async fn success_populates_result() {
        let session = session_for(spawn_fixed_backend(StatusCode::OK, HAZARDOUS_BODY).await);
        let mut events = session.subscribe();

        let result = session.submit().await.unwrap();
        assert_eq!(result, hazardous());

        let status = session.status();
        assert_eq!(status.result, Some(hazardous()));
        assert!(!status.loading);
        assert!(matches!(
            status.state,
            PresentationState::Settled { success: true, .. }
        ));
        assert_eq!(
            status.notification.map(|n| n.kind),
            Some(NotificationKind::Success)
        );
        assert_eq!(events.recv().await.unwrap().kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn unreachable_service_settles_as_failure() {
        let session = session_for(unreachable_endpoint().await);
        let mut events = session.subscribe();

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, SessionError::Predict(PredictError::Network(_))));

        let status = session.status();
        assert!(status.result.is_none());
        assert!(!status.loading);
        assert!(matches!(
            status.state,
            PresentationState::Settled { success: false, .. }
        ));

        let note = events.recv().await.unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.message.contains("backend is running"));
    }

    #[tokio::test]
    async fn server_error_and_bad_body_settle_as_failure() {
        for (status, body) in [
            (StatusCode::INTERNAL_SERVER_ERROR, HAZARDOUS_BODY),
            (StatusCode::OK, "not json"),
        ] {
            let session = session_for(spawn_fixed_backend(status, body).await);

            assert!(session.submit().await.is_err());
            assert!(session.status().result.is_none());
            assert!(!session.status().loading);
        }
    }

    #[tokio::test]
    async fn failure_clears_previous_result() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let endpoint = spawn_backend(Router::new().route(
            "/predict",
            post(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        (StatusCode::OK, HAZARDOUS_BODY)
                    } else {
                        (StatusCode::SERVICE_UNAVAILABLE, "")
                    }
                }
            }),
        ))
        .await;
        let session = session_for(endpoint);

        session.submit().await.unwrap();
        assert!(session.status().result.is_some());

        session.submit().await.unwrap_err();
        assert!(session.status().result.is_none());
        assert!(!session.status().loading);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn result_is_cleared_while_loading() {
        let release = Arc::new(Notify::new());
        let session = session_for(gated_backend(release.clone()).await);

        release.notify_one();
        session.submit().await.unwrap();
        assert!(session.status().result.is_some());

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });
        wait_for_loading(&session).await;

        let status = session.status();
        assert!(status.loading);
        assert!(status.result.is_none());

        release.notify_one();
        assert_eq!(pending.await.unwrap().unwrap(), hazardous());
        assert_eq!(session.status().result, Some(hazardous()));
        assert!(!session.status().loading);
    }

    #[tokio::test]
    async fn refuses_a_second_trigger_while_loading() {
        let release = Arc::new(Notify::new());
        let session = session_for(gated_backend(release.clone()).await);

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });
        wait_for_loading(&session).await;

        assert!(matches!(
            session.submit().await,
            Err(SessionError::InFlight)
        ));
        assert!(session.status().loading);

        release.notify_one();
        pending.await.unwrap().unwrap();
        assert!(!session.status().loading);
    }

    #[tokio::test]
    async fn sequential_submissions_are_independent() {
        let bodies: Arc<StdMutex<Vec<serde_json::Value>>> = Arc::default();
        let recorder = bodies.clone();
        let endpoint = spawn_backend(Router::new().route(
            "/predict",
            post(move |axum::Json(body): axum::Json<serde_json::Value>| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(body);
                    ([(CONTENT_TYPE, "application/json")], HAZARDOUS_BODY)
                }
            }),
        ))
        .await;
        let session = session_for(endpoint);

        let first = session.submit().await.unwrap();
        let first_state = session.status().state;
        let second = session.submit().await.unwrap();
        let second_state = session.status().state;

        assert_eq!(first, second);
        assert_ne!(first_state, second_state);
        let bodies = bodies.lock().unwrap();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0], bodies[1]);
    }

    #[tokio::test]
    async fn submits_edited_form() {
        let seen: Arc<StdMutex<Option<serde_json::Value>>> = Arc::default();
        let recorder = seen.clone();
        let endpoint = spawn_backend(Router::new().route(
            "/predict",
            post(move |axum::Json(body): axum::Json<serde_json::Value>| {
                let recorder = recorder.clone();
                async move {
                    *recorder.lock().unwrap() = Some(body);
                    ([(CONTENT_TYPE, "application/json")], HAZARDOUS_BODY)
                }
            }),
        ))
        .await;
        let session = session_for(endpoint);

        session.set_field(Field::Diameter, "1.75").unwrap();
        assert!(session.set_field(Field::Albedo, "bright").is_err());
        session.submit().await.unwrap();

        let body = seen.lock().unwrap().take().unwrap();
        assert_eq!(body["diameter"], 1.75);
        assert_eq!(body["albedo"], 0.15);
    }

    #[tokio::test]
    async fn dropped_submitter_still_settles() {
        let release = Arc::new(Notify::new());
        let session = session_for(gated_backend(release.clone()).await);

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.submit().await }
        });
        wait_for_loading(&session).await;

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());
        assert!(session.status().loading);

        release.notify_one();
        wait_until_settled(&session).await;

        let status = session.status();
        assert_eq!(status.result, Some(hazardous()));
        assert!(matches!(
            status.state,
            PresentationState::Settled { success: true, .. }
        ));

        release.notify_one();
        assert_eq!(session.submit().await.unwrap(), hazardous());
    }

    #[tokio::test]
    async fn timed_out_request_settles_as_failure() {
        let endpoint = spawn_backend(Router::new().route(
            "/predict",
            post(std::future::pending::<&'static str>),
        ))
        .await;
        let client =
            PredictClient::new(endpoint, Some(std::time::Duration::from_millis(50))).unwrap();
        let session = Session::new(client, Duration::seconds(5));

        let err = session.submit().await.unwrap_err();
        assert!(
            matches!(err, SessionError::Predict(PredictError::Network(ref e)) if e.is_timeout()),
            "{err:?}"
        );

        let status = session.status();
        assert!(!status.loading);
        assert!(status.result.is_none());
        assert_eq!(
            status.notification.map(|n| n.kind),
            Some(NotificationKind::Error)
        );
    }
}
