use crate::assistant::service::ServiceId;

/// Events the engine sends back to the UI thread. Exactly one
/// `ReplyReady` arrives per submitted prompt; the app's busy flag is
/// cleared on that event and nothing else.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ReplyReady(String),
    ServiceConnected(ServiceId),
    EngineWarning(String),
}
