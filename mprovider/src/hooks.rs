//! Operational hook contracts for provider call observability.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::{ProviderError, ProviderId};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_call_start(&self, _provider: ProviderId, _operation: &str) {}

    fn on_call_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {}

    fn on_call_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs a single provider call and reports its outcome to the hooks.
/// Calls are never retried here; each upstream failure belongs to exactly
/// one user-visible turn.
pub async fn observe_call<T, Fut>(
    provider: ProviderId,
    operation: &str,
    hooks: &dyn ProviderOperationHooks,
    call: Fut,
) -> Result<T, ProviderError>
where
    Fut: Future<Output = Result<T, ProviderError>>,
{
    hooks.on_call_start(provider, operation);
    let started = Instant::now();

    match call.await {
        Ok(value) => {
            hooks.on_call_success(provider, operation, started.elapsed());
            Ok(value)
        }
        Err(error) => {
            hooks.on_call_failure(provider, operation, started.elapsed(), &error);
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ProviderErrorKind;

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ProviderOperationHooks for RecordingHooks {
        fn on_call_start(&self, provider: ProviderId, operation: &str) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{provider}:{operation}"));
        }

        fn on_call_success(&self, provider: ProviderId, operation: &str, _elapsed: Duration) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{provider}:{operation}"));
        }

        fn on_call_failure(
            &self,
            provider: ProviderId,
            operation: &str,
            _elapsed: Duration,
            error: &ProviderError,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{provider}:{operation}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn observe_call_reports_success() {
        let hooks = RecordingHooks::default();

        let result = observe_call(ProviderId::Gemini, "generate", &hooks, async { Ok("ok") })
            .await
            .expect("call should succeed");

        assert_eq!(result, "ok");
        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![
                "start:gemini:generate".to_string(),
                "success:gemini:generate".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn observe_call_reports_failure_and_propagates_error() {
        let hooks = RecordingHooks::default();

        let result = observe_call::<(), _>(ProviderId::Gemini, "generate", &hooks, async {
            Err(ProviderError::timeout("slow upstream"))
        })
        .await;

        let error = result.expect_err("call should fail");
        assert_eq!(error.kind, ProviderErrorKind::Timeout);

        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"failure:gemini:generate:Timeout".to_string()));
    }
}
