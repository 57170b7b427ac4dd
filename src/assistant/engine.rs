use crate::assistant::registry::ServiceRegistry;
use crate::assistant::resolver::resolve;
use crate::assistant::responses::APOLOGY;
use crate::assistant::service::ServiceId;
use crate::event::AppEvent;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::time::{self, Duration};

/// Drives the reply pipeline off the UI thread. The registry lives
/// behind the engine so connects and reply resolution see one state.
#[derive(Clone)]
pub struct AssistantEngine {
    tx: mpsc::Sender<AppEvent>,
    registry: Arc<RwLock<ServiceRegistry>>,
    runtime_handle: Handle,
    thinking_delay: Duration,
}

impl AssistantEngine {
    pub fn new(
        registry: ServiceRegistry,
        tx: mpsc::Sender<AppEvent>,
        runtime_handle: Handle,
        thinking_delay: Duration,
    ) -> Self {
        Self {
            tx,
            registry: Arc::new(RwLock::new(registry)),
            runtime_handle,
            thinking_delay,
        }
    }

    /// Resolves a reply after the artificial thinking delay. Sends
    /// exactly one `ReplyReady` per call: the work runs in its own task
    /// and a supervisor awaits it, so even a panic in the pipeline
    /// still produces the apology reply and unblocks the composer.
    pub fn send(&self, prompt: String) {
        let tx = self.tx.clone();
        let registry = Arc::clone(&self.registry);
        let delay = self.thinking_delay;
        let work_handle = self.runtime_handle.clone();

        self.runtime_handle.spawn(async move {
            let work = work_handle.spawn(async move {
                time::sleep(delay).await;
                let registry = registry.read().await;
                resolve(&prompt, &registry)
            });

            let reply = match work.await {
                Ok(reply) => reply,
                Err(err) => {
                    tracing::error!("reply pipeline failed: {err}");
                    APOLOGY.to_string()
                }
            };
            let _ = tx.send(AppEvent::ReplyReady(reply));
        });
    }

    /// Marks a service connected and persists the set. The in-memory
    /// connect always takes effect; a failed save is reported to the
    /// diagnostics log only.
    pub fn connect(&self, service: ServiceId) {
        let tx = self.tx.clone();
        let registry = Arc::clone(&self.registry);

        self.runtime_handle.spawn(async move {
            let mut registry = registry.write().await;
            if let Err(err) = registry.connect(service) {
                tracing::warn!("failed to persist connected services: {err}");
                let _ = tx.send(AppEvent::EngineWarning(format!(
                    "failed to persist connected services: {err}"
                )));
            }
            let _ = tx.send(AppEvent::ServiceConnected(service));
        });
    }
}
