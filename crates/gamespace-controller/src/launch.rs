//! How the tracker was (re)started

/// Explicit trigger carried by a launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchIntent {
    /// Start tracking, optionally naming the app already in front
    Start { app_id: Option<String> },
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchContext {
    pub intent: Option<LaunchIntent>,
    /// How many times the host has started the tracker in this boot
    pub restart_count: u32,
}

impl LaunchContext {
    pub fn start() -> Self {
        Self {
            intent: Some(LaunchIntent::Start { app_id: None }),
            restart_count: 1,
        }
    }

    pub fn start_with(app_id: impl Into<String>) -> Self {
        Self {
            intent: Some(LaunchIntent::Start {
                app_id: Some(app_id.into()),
            }),
            restart_count: 1,
        }
    }

    /// Brought back by the system after being killed
    pub fn restarted(restart_count: u32) -> Self {
        Self {
            intent: None,
            restart_count,
        }
    }

    pub fn is_restart(&self) -> bool {
        self.intent.is_none() && self.restart_count > 1
    }

    /// App named by the intent, if any
    pub fn app_id(&self) -> Option<&str> {
        match &self.intent {
            Some(LaunchIntent::Start { app_id }) => app_id.as_deref(),
            _ => None,
        }
    }
}
