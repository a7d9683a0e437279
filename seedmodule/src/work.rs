use std::{any::Any, sync::Arc};

use seedmodule_core::{
    error::SeedError,
    request::{Completion, SleepRequest, SleepResult},
    sleep::Sleep,
};

/// Runs on a blocking-pool thread. Nothing here may touch the caller's state.
fn execute(request: &SleepRequest, sleeper: &dyn Sleep) -> SleepResult {
    sleeper.sleep(request.sleep_time());
    SleepResult::from(request)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<&'static str>() {
        Ok(msg) => (*msg).to_string(),
        Err(payload) => match payload.downcast::<String>() {
            Ok(msg) => *msg,
            Err(_) => "worker panicked".to_string(),
        },
    }
}

/// Sleeps on the blocking pool of the current runtime.
pub(crate) async fn run(request: SleepRequest, sleeper: Arc<dyn Sleep + Send + Sync>) -> Completion {
    tokio::task::spawn_blocking(move || execute(&request, sleeper.as_ref()))
        .await
        .map_err(|e| {
            if e.is_panic() {
                SeedError::WorkFailed(panic_message(e.into_panic()))
            } else {
                SeedError::ModuleClosed
            }
        })
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Mutex,
        time::{Duration, Instant},
    };

    use seedmodule_core::sleep::StdSleeper;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl Sleep for RecordSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    #[derive(Debug)]
    struct PanicSleeper;

    impl Sleep for PanicSleeper {
        fn sleep(&self, _: Duration) {
            panic!("sleeper broke");
        }
    }

    #[test]
    fn execute_returns_requested_time() {
        let sleeper = RecordSleeper::default();
        let req = SleepRequest::from_millis(3000).unwrap();

        let res = execute(&req, &sleeper);

        assert_eq!(Duration::from_millis(3000), res.slept_time());
        assert_eq!(vec![Duration::from_millis(3000)], *sleeper.slept.lock().unwrap());
    }

    #[tokio::test]
    async fn run_sleeps() {
        let req = SleepRequest::from_millis(20).unwrap();

        let start = Instant::now();
        let res = run(req, Arc::new(StdSleeper)).await;

        assert_eq!(Ok(Duration::from_millis(20)), res.map(|r| r.slept_time()));
        assert!(Duration::from_millis(20) <= start.elapsed());
    }

    #[tokio::test]
    async fn run_reports_panic() {
        let req = SleepRequest::from_millis(0).unwrap();

        let res = run(req, Arc::new(PanicSleeper)).await;

        assert_eq!(Err(SeedError::WorkFailed("sleeper broke".to_string())), res);
    }

    #[rstest::rstest]
    #[case("static", Box::new("static"))]
    #[case("owned", Box::new("owned".to_string()))]
    #[case("worker panicked", Box::new(42))]
    #[test]
    fn panic_payload(#[case] expect: &str, #[case] payload: Box<dyn Any + Send>) {
        assert_eq!(expect, panic_message(payload));
    }
}
