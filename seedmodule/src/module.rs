use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{mpsc, Arc},
    task::{Context, Poll},
    time::{Duration, Instant},
};

use seedmodule_core::{
    error::SeedError,
    request::{Completion, RequestId, SleepRequest},
    sleep::Sleep,
};
use tokio::{runtime::Runtime, sync::oneshot};

use crate::{option::ModuleOption, work};

type Callback = Box<dyn FnOnce(Completion)>;

/// An asynchronous sleep module.
///
/// Sleeps run on the blocking pool of a runtime owned by the module. Callbacks
/// passed to [`SeedModule::invoke_async`] never leave the thread that owns the
/// module: they are invoked from [`SeedModule::poll`], [`SeedModule::run_once`],
/// [`SeedModule::run`], [`SeedModule::run_timeout`], or when the module is dropped.
pub struct SeedModule {
    runtime: Option<Runtime>,
    handle: tokio::runtime::Handle,
    sleeper: Arc<dyn Sleep + Send + Sync>,
    callbacks: HashMap<RequestId, Callback>,
    next_id: RequestId,
    tx: mpsc::Sender<(RequestId, Completion)>,
    rx: mpsc::Receiver<(RequestId, Completion)>,
}

impl std::fmt::Debug for SeedModule {
    // GRCOV_EXCL_START
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedModule")
            .field("sleeper", &self.sleeper)
            .field("pending", &self.callbacks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
    // GRCOV_EXCL_STOP
}

impl SeedModule {
    /// Creates a new [`SeedModule`] with the default [`ModuleOption`].
    pub fn new() -> Result<Self, SeedError> {
        Self::with_option(ModuleOption::default())
    }

    /// Creates a new [`SeedModule`] using the sleeper selected by [`ModuleOption::timer_strategy`].
    pub fn with_option(option: ModuleOption) -> Result<Self, SeedError> {
        let sleeper = option.timer_strategy.sleeper();
        Self::build(option, sleeper)
    }

    /// Creates a new [`SeedModule`] with a user-defined sleeper.
    ///
    /// [`ModuleOption::timer_strategy`] is ignored.
    pub fn with_sleeper(
        option: ModuleOption,
        sleeper: impl Sleep + Send + Sync + 'static,
    ) -> Result<Self, SeedError> {
        Self::build(option, Arc::new(sleeper))
    }

    fn build(option: ModuleOption, sleeper: Arc<dyn Sleep + Send + Sync>) -> Result<Self, SeedError> {
        let mut builder = tokio::runtime::Builder::new_multi_thread();
        builder.thread_name(option.thread_name.clone());
        if let Some(n) = option.worker_threads {
            builder.worker_threads(n.get());
        }
        if let Some(n) = option.max_blocking_threads {
            builder.max_blocking_threads(n.get());
        }
        let runtime = builder.build()?;
        tracing::debug!("Module runtime started: {:?}", option);

        let (tx, rx) = mpsc::channel();
        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
            sleeper,
            callbacks: HashMap::new(),
            next_id: RequestId::new(0),
            tx,
            rx,
        })
    }

    /// Schedules a sleep of `duration` and returns immediately.
    ///
    /// `callback` is invoked exactly once, on this thread, with the slept time or the error
    /// that occurred on the worker. It is never invoked from within this call, even if
    /// `duration` is zero.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DurationOutOfRange`] if `duration` exceeds [`MAX_SLEEP_TIME`].
    /// In that case nothing is scheduled and `callback` is dropped without being called.
    ///
    /// # Follow-up requests
    ///
    /// The module is mutably borrowed while callbacks run, so a callback cannot call
    /// `invoke_async` itself. Record what to do next in shared state (e.g. an
    /// `Rc<RefCell<_>>`) and issue the follow-up after [`SeedModule::run_once`] returns.
    ///
    /// [`MAX_SLEEP_TIME`]: seedmodule_core::request::MAX_SLEEP_TIME
    #[tracing::instrument(level = "debug", skip(self, callback))]
    pub fn invoke_async(
        &mut self,
        duration: Duration,
        callback: impl FnOnce(Completion) + 'static,
    ) -> Result<RequestId, SeedError> {
        let request = SleepRequest::new(duration)?;

        let id = self.next_id;
        self.next_id = id.next();
        self.callbacks.insert(id, Box::new(callback));

        let tx = self.tx.clone();
        let sleeper = self.sleeper.clone();
        self.handle.spawn(async move {
            let completion = work::run(request, sleeper).await;
            tracing::debug!("Request {} completed: {:?}", id, completion);
            if tx.send((id, completion)).is_err() {
                tracing::warn!("Request {} completed after the module was dropped", id);
            }
        });
        tracing::debug!("Request {} scheduled", id);

        Ok(id)
    }

    /// Schedules a sleep of `duration` and returns a future resolving to its completion.
    ///
    /// The future does not need the completion loop to make progress and can be awaited
    /// from any executor.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DurationOutOfRange`] if `duration` exceeds [`MAX_SLEEP_TIME`].
    ///
    /// [`MAX_SLEEP_TIME`]: seedmodule_core::request::MAX_SLEEP_TIME
    pub fn sleep(&self, duration: Duration) -> Result<SleepFuture, SeedError> {
        let request = SleepRequest::new(duration)?;

        let (tx, rx) = oneshot::channel();
        let sleeper = self.sleeper.clone();
        self.handle.spawn(async move {
            _ = tx.send(work::run(request, sleeper).await);
        });

        Ok(SleepFuture { rx })
    }

    /// The number of callbacks not yet invoked.
    pub fn pending(&self) -> usize {
        self.callbacks.len()
    }

    /// Invokes the callbacks of every request that has already completed, without blocking.
    ///
    /// Returns the number of callbacks invoked.
    pub fn poll(&mut self) -> usize {
        let mut n = 0;
        while let Ok((id, completion)) = self.rx.try_recv() {
            if self.dispatch(id, completion) {
                n += 1;
            }
        }
        n
    }

    /// Blocks until one callback has been invoked.
    ///
    /// Returns `false` without blocking if no request is pending.
    pub fn run_once(&mut self) -> bool {
        while !self.callbacks.is_empty() {
            match self.rx.recv() {
                Ok((id, completion)) => {
                    if self.dispatch(id, completion) {
                        return true;
                    }
                }
                Err(_) => return false, // GRCOV_EXCL_LINE
            }
        }
        false
    }

    /// Blocks until every pending callback has been invoked.
    pub fn run(&mut self) {
        while self.run_once() {}
    }

    /// Blocks until every pending callback has been invoked or `timeout` has elapsed.
    ///
    /// Returns the number of callbacks invoked.
    ///
    /// A `timeout` too large to be represented as a deadline waits without bound.
    pub fn run_timeout(&mut self, timeout: Duration) -> usize {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            let mut n = 0;
            while self.run_once() {
                n += 1;
            }
            return n;
        };
        let mut n = 0;
        while !self.callbacks.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok((id, completion)) => {
                    if self.dispatch(id, completion) {
                        n += 1;
                    }
                }
                Err(_) => break,
            }
        }
        n
    }

    fn dispatch(&mut self, id: RequestId, completion: Completion) -> bool {
        match self.callbacks.remove(&id) {
            Some(callback) => {
                tracing::debug!("Invoking callback of request {}", id);
                callback(completion);
                true
            }
            None => {
                tracing::warn!("Dropping completion of unknown request {}", id);
                false
            }
        }
    }
}

impl Drop for SeedModule {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::warn!(
                "Dropping {} pending request(s) while panicking",
                self.callbacks.len()
            );
        } else if !self.callbacks.is_empty() {
            tracing::debug!(
                "Waiting for {} pending request(s) before closing",
                self.callbacks.len()
            );
            self.run();
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// A future returned by [`SeedModule::sleep`].
///
/// Resolves to [`SeedError::ModuleClosed`] if the module is dropped first.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct SleepFuture {
    rx: oneshot::Receiver<Completion>,
}

impl Future for SleepFuture {
    type Output = Completion;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.unwrap_or_else(|_| Err(SeedError::ModuleClosed)))
    }
}
