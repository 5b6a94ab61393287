//! Controller state machine

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Active(String),
}

/// What a foreground change requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Ignore,
    Enter(String),
    /// Restore `from` before registering `to`
    Switch { from: String, to: String },
    Leave(String),
}

impl ControllerState {
    pub fn active_app(&self) -> Option<&str> {
        match self {
            ControllerState::Idle => None,
            ControllerState::Active(app_id) => Some(app_id),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ControllerState::Active(_))
    }

    pub fn on_foreground(&self, app_id: &str, managed: bool) -> Transition {
        match self {
            ControllerState::Idle if managed => Transition::Enter(app_id.to_string()),
            ControllerState::Idle => Transition::Ignore,
            ControllerState::Active(prev) if prev == app_id => Transition::Ignore,
            ControllerState::Active(prev) if managed => Transition::Switch {
                from: prev.clone(),
                to: app_id.to_string(),
            },
            ControllerState::Active(prev) => Transition::Leave(prev.clone()),
        }
    }

    /// State after `transition` has been carried out
    pub fn apply(&self, transition: &Transition) -> ControllerState {
        match transition {
            Transition::Ignore => self.clone(),
            Transition::Enter(app_id) | Transition::Switch { to: app_id, .. } => {
                ControllerState::Active(app_id.clone())
            }
            Transition::Leave(_) => ControllerState::Idle,
        }
    }
}
