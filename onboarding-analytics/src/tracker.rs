//! Event tracker
//!
//! Combines a taxonomy value with caller parameters and hands the result to an
//! [`AnalyticsSink`]. Every `track*` call except [`EventTracker::track_event_end`]
//! results in exactly one sink invocation.

use crate::event::Event;
use crate::sink::AnalyticsSink;
use crate::taxonomy::EventType;
use crate::types::Parameters;

/// Merge caller parameters with the parameters intrinsic to an event
///
/// Caller entries are applied first and intrinsic entries laid on top, so on a
/// key collision the taxonomy value wins. The result is `None` only when both
/// sides are `None`.
pub fn merge_parameters(
    caller: Option<Parameters>,
    intrinsic: Option<Parameters>,
) -> Option<Parameters> {
    match (caller, intrinsic) {
        (None, None) => None,
        (Some(caller), None) => Some(caller),
        (None, Some(intrinsic)) => Some(intrinsic),
        (Some(mut merged), Some(intrinsic)) => {
            for (key, value) in intrinsic {
                if let Some(previous) = merged.insert(key.clone(), value) {
                    log::trace!("intrinsic parameter '{}' replaces caller value {}", key, previous);
                }
            }
            Some(merged)
        }
    }
}

/// Forwards events to a sink
pub struct EventTracker<S> {
    sink: S,
}

impl<S: AnalyticsSink> EventTracker<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Track an event, merging in caller-supplied parameters
    ///
    /// See [`merge_parameters`] for precedence.
    pub fn track(&mut self, event_type: EventType, parameters: Option<Parameters>) {
        let merged = merge_parameters(parameters, event_type.parameters());
        self.track_event(&Event::with_parameters(event_type, merged));
    }

    /// Forward a prepared event as-is; absent parameters are sent as an empty mapping
    pub fn track_event(&mut self, event: &Event) {
        let key = event.key();
        log::debug!("tracking {}", key);

        match event.parameters() {
            Some(parameters) => self.sink.log(&key, parameters),
            None => self.sink.log(&key, &Parameters::new()),
        }
    }

    /// Track the start of a timed event
    ///
    /// Sinks have no notion of timed events, so this is tracked as a regular
    /// event with the type's own parameters.
    pub fn track_event_start(&mut self, event_type: EventType) {
        self.track_event(&Event::with_parameters(event_type, event_type.parameters()));
    }

    /// Track the end of a timed event
    ///
    /// Intentionally does nothing: there is no end event to send. It exists so
    /// call sites can pair it with [`EventTracker::track_event_start`].
    pub fn track_event_end(&mut self, event_type: EventType) {
        log::trace!("ignoring end of {}", event_type);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use crate::taxonomy::{Extension, OnboardingAction, Screen};
    use crate::types::ParameterValue;

    fn params(entries: &[(&str, &str)]) -> Parameters {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), ParameterValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_merge_intrinsic_wins() {
        let merged = merge_parameters(
            Some(params(&[("screen", "OVERRIDE"), ("extra", "x")])),
            Some(params(&[("screen", "Keyboard Install")])),
        );
        assert_eq!(merged, Some(params(&[("screen", "Keyboard Install"), ("extra", "x")])));
    }

    #[test]
    fn test_merge_absent_sides() {
        assert_eq!(merge_parameters(None, None), None);
        assert_eq!(
            merge_parameters(Some(params(&[("a", "1")])), None),
            Some(params(&[("a", "1")]))
        );
        assert_eq!(
            merge_parameters(None, Some(params(&[("b", "2")]))),
            Some(params(&[("b", "2")]))
        );
        assert_eq!(merge_parameters(Some(Parameters::new()), None), Some(Parameters::new()));
    }

    #[test]
    fn test_track_merges_caller_parameters() {
        let mut tracker = EventTracker::new(RecordingSink::new());
        tracker.track(
            EventType::general(OnboardingAction::ScreenShown(Screen::KeyboardInstall)),
            Some(params(&[("screen", "OVERRIDE"), ("extra", "x")])),
        );

        let events = tracker.sink().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, "ONBOARDING_screen_shown");
        assert_eq!(
            events[0].parameters,
            params(&[("screen", "Keyboard Install"), ("extra", "x")])
        );
    }

    #[test]
    fn test_track_without_any_parameters_sends_empty_mapping() {
        let mut tracker = EventTracker::new(RecordingSink::new());
        tracker.track(EventType::general(OnboardingAction::RewardCollected), None);

        let events = tracker.sink().events();
        assert_eq!(events[0].key, "ONBOARDING_reward_collected");
        assert!(events[0].parameters.is_empty());
    }

    #[test]
    fn test_track_event_with_absent_parameters() {
        let mut tracker = EventTracker::new(RecordingSink::new());
        let event = Event::with_parameters(
            EventType::first_start(OnboardingAction::InstallConfirmed(Extension::IMessage)),
            None,
        );
        tracker.track_event(&event);

        let events = tracker.sink().events();
        assert_eq!(events[0].key, "FIRST_OPEN_INTRO_install_confirmed");
        assert_eq!(events[0].parameters, Parameters::new());
    }

    #[test]
    fn test_track_event_start_uses_intrinsic_parameters() {
        let mut tracker = EventTracker::new(RecordingSink::new());
        let event_type = EventType::first_start(OnboardingAction::FlowDismissed(Screen::EmojiGames));
        tracker.track_event_start(event_type);

        let events = tracker.sink().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, "FIRST_OPEN_INTRO_flow_dismissed");
        assert_eq!(events[0].parameters, params(&[("screen", "Emoji Games")]));
    }

    #[test]
    fn test_track_event_end_is_noop() {
        let mut tracker = EventTracker::new(RecordingSink::new());
        tracker.track_event_end(EventType::general(OnboardingAction::Start));
        tracker.track_event_end(EventType::first_start(OnboardingAction::CtaSelected(Screen::GameReward)));

        assert!(tracker.into_sink().is_empty());
    }
}
