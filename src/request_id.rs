//! Per-request identifier, carried in a task-local so error responses can
//! echo the id without threading it through every call.

use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct RequestId(String);

impl Default for RequestId {
    fn default() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }
}

impl RequestId {
    pub fn new(value: impl Into<String>) -> Self {
        RequestId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

tokio::task_local! {
    static CURRENT_REQUEST_ID: RequestId;
}

/// Runs `future` with `request_id` installed as the current id.
pub async fn scope<F>(request_id: RequestId, future: F) -> F::Output
where
    F: std::future::Future,
{
    CURRENT_REQUEST_ID.scope(request_id, future).await
}

/// The current request id, if the caller runs inside a request scope.
pub fn current() -> Option<RequestId> {
    CURRENT_REQUEST_ID.try_with(|rid| rid.clone()).ok()
}
