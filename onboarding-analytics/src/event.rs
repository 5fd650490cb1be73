//! Tracker-facing event record

use crate::taxonomy::EventType;
use crate::types::{ParameterValue, Parameters};
use std::collections::HashMap;

/// An event ready to be handed to a sink
///
/// Built right before tracking and discarded afterwards. None of the
/// constructors merge anything; that only happens in
/// [`crate::EventTracker::track`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_type: EventType,
    parameters: Option<Parameters>,
}

impl Event {
    /// Event carrying the type's own parameters
    pub fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            parameters: event_type.parameters(),
        }
    }

    /// Event carrying exactly the given parameters
    ///
    /// The type's own parameters are not added.
    pub fn with_parameters(event_type: EventType, parameters: Option<Parameters>) -> Self {
        Self {
            event_type,
            parameters,
        }
    }

    /// Event whose parameters are keyed by other taxonomy values
    ///
    /// Each entry is stored under the key of its `EventType`. An absent mapping
    /// yields an empty (present) parameter set.
    pub fn with_keyed_parameters(
        event_type: EventType,
        parameters: Option<HashMap<EventType, ParameterValue>>,
    ) -> Self {
        let parameters = parameters
            .map(|map| {
                map.into_iter()
                    .map(|(event, value)| (event.key(), value))
                    .collect::<Parameters>()
            })
            .unwrap_or_default();

        Self {
            event_type,
            parameters: Some(parameters),
        }
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn key(&self) -> String {
        self.event_type.key()
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }
}

impl From<EventType> for Event {
    fn from(event_type: EventType) -> Self {
        Event::new(event_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Extension, OnboardingAction, Screen};

    #[test]
    fn test_new_uses_intrinsic_parameters() {
        let event_type = EventType::general(OnboardingAction::BackSelected(Screen::EmojiRequest));
        let event = Event::new(event_type);

        assert_eq!(event.key(), "ONBOARDING_back_selected");
        assert_eq!(event.parameters(), event_type.parameters().as_ref());
    }

    #[test]
    fn test_with_parameters_is_verbatim() {
        let event_type =
            EventType::first_start(OnboardingAction::VideoInstructionsDismissed(Extension::Keyboard));

        let event = Event::with_parameters(event_type, None);
        assert_eq!(event.parameters(), None);

        let mut custom = Parameters::new();
        custom.insert("source".into(), "push".into());
        let event = Event::with_parameters(event_type, Some(custom.clone()));
        assert_eq!(event.parameters(), Some(&custom));
    }

    #[test]
    fn test_keyed_parameters_use_event_keys() {
        let mut keyed = HashMap::new();
        keyed.insert(EventType::general(OnboardingAction::Start), ParameterValue::from(1i64));
        keyed.insert(
            EventType::general(OnboardingAction::ScreenShown(Screen::GameReward)),
            ParameterValue::from(true),
        );

        let event = Event::with_keyed_parameters(EventType::general(OnboardingAction::Complete), Some(keyed));
        let params = event.parameters().unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params["ONBOARDING_start"], ParameterValue::Integer(1));
        assert_eq!(params["ONBOARDING_screen_shown"], ParameterValue::Boolean(true));
    }

    #[test]
    fn test_keyed_parameters_absent_become_empty() {
        let event = Event::with_keyed_parameters(EventType::general(OnboardingAction::Start), None);
        assert_eq!(event.parameters(), Some(&Parameters::new()));
    }
}
