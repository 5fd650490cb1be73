//! Onboarding event taxonomy
//!
//! A closed hierarchy of trackable events. Every value projects to a stable
//! string key and an optional parameter mapping:
//!
//! ```text
//! EventType::Onboarding
//!     └── OnboardingEvent::{General, FirstStart}      prefix "ONBOARDING_" / "FIRST_OPEN_INTRO_"
//!             └── OnboardingAction::*                 fixed snake-case name
//!                     └── Screen | Extension          {"screen": ..} / {"extension": ..}
//! ```
//!
//! Keys are matched by backend dashboards, so the strings here are part of the
//! public contract.

use crate::types::{ParameterValue, Parameters, Result, TaxonomyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Parameter key carrying the screen label
pub const PARAMETER_SCREEN: &str = "screen";

/// Parameter key carrying the extension name
pub const PARAMETER_EXTENSION: &str = "extension";

/// Top-level trackable event
///
/// Equality and hashing are defined on [`EventType::key`] only. Two values whose
/// actions carry different payloads but share a key are the same event as far
/// as tracking is concerned, which is what allows `EventType` to be used as a
/// lookup key (see [`crate::Event::with_keyed_parameters`]).
#[derive(Debug, Clone, Copy)]
pub enum EventType {
    /// Onboarding flow event
    Onboarding(OnboardingEvent),
}

impl EventType {
    /// Shorthand for an action in the regular onboarding flow
    pub fn general(action: OnboardingAction) -> Self {
        EventType::Onboarding(OnboardingEvent::General(action))
    }

    /// Shorthand for an action in the first-launch intro
    pub fn first_start(action: OnboardingAction) -> Self {
        EventType::Onboarding(OnboardingEvent::FirstStart(action))
    }

    /// Tracking key sent to the analytics backend
    pub fn key(&self) -> String {
        match self {
            EventType::Onboarding(event) => event.key(),
        }
    }

    /// Parameters intrinsic to this event, `None` when it carries no payload
    pub fn parameters(&self) -> Option<Parameters> {
        match self {
            EventType::Onboarding(event) => event.parameters(),
        }
    }

    /// Every key the taxonomy can produce, category by category
    pub fn all_keys() -> Vec<String> {
        [OnboardingEvent::GENERAL_PREFIX, OnboardingEvent::FIRST_START_PREFIX]
            .iter()
            .flat_map(|prefix| {
                OnboardingAction::ALL_NAMES
                    .iter()
                    .map(move |name| format!("{}{}", prefix, name))
            })
            .collect()
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<OnboardingEvent> for EventType {
    fn from(event: OnboardingEvent) -> Self {
        EventType::Onboarding(event)
    }
}

/// Onboarding category, deciding the key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingEvent {
    /// Onboarding opened from within the app
    General(OnboardingAction),
    /// Intro shown on the very first launch
    FirstStart(OnboardingAction),
}

impl OnboardingEvent {
    pub const GENERAL_PREFIX: &'static str = "ONBOARDING_";
    pub const FIRST_START_PREFIX: &'static str = "FIRST_OPEN_INTRO_";

    /// Build an event from a category name (`general` or `first_start`)
    pub fn from_category(category: &str, action: OnboardingAction) -> Result<Self> {
        match category {
            "general" => Ok(OnboardingEvent::General(action)),
            "first_start" => Ok(OnboardingEvent::FirstStart(action)),
            other => Err(TaxonomyError::UnknownCategory(other.to_string())),
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            OnboardingEvent::General(_) => Self::GENERAL_PREFIX,
            OnboardingEvent::FirstStart(_) => Self::FIRST_START_PREFIX,
        }
    }

    pub fn action(&self) -> OnboardingAction {
        match self {
            OnboardingEvent::General(action) | OnboardingEvent::FirstStart(action) => *action,
        }
    }

    pub fn key(&self) -> String {
        format!("{}{}", self.prefix(), self.action().name())
    }

    pub fn parameters(&self) -> Option<Parameters> {
        self.action().parameters()
    }
}

/// Something the user did or saw during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingAction {
    ScreenShown(Screen),
    RewardCollected,
    BackSelected(Screen),
    FlowDismissed(Screen),
    ScreenSkipped(Screen),
    CtaSelected(Screen),
    InstallConfirmed(Extension),
    VideoInstructionsDismissed(Extension),
    Start,
    Complete,
}

impl OnboardingAction {
    /// Names of all actions, in declaration order
    pub const ALL_NAMES: [&'static str; 10] = [
        "screen_shown",
        "reward_collected",
        "back_selected",
        "flow_dismissed",
        "screen_skipped",
        "cta_selected",
        "install_confirmed",
        "video_instructions_dismissed",
        "start",
        "complete",
    ];

    /// Fixed snake-case name; the payload never takes part in it
    pub fn name(&self) -> &'static str {
        match self {
            OnboardingAction::ScreenShown(_) => "screen_shown",
            OnboardingAction::RewardCollected => "reward_collected",
            OnboardingAction::BackSelected(_) => "back_selected",
            OnboardingAction::FlowDismissed(_) => "flow_dismissed",
            OnboardingAction::ScreenSkipped(_) => "screen_skipped",
            OnboardingAction::CtaSelected(_) => "cta_selected",
            OnboardingAction::InstallConfirmed(_) => "install_confirmed",
            OnboardingAction::VideoInstructionsDismissed(_) => "video_instructions_dismissed",
            OnboardingAction::Start => "start",
            OnboardingAction::Complete => "complete",
        }
    }

    /// Single-entry mapping for payload-carrying actions, `None` otherwise
    pub fn parameters(&self) -> Option<Parameters> {
        let (key, value) = match self {
            OnboardingAction::ScreenShown(screen)
            | OnboardingAction::BackSelected(screen)
            | OnboardingAction::FlowDismissed(screen)
            | OnboardingAction::ScreenSkipped(screen)
            | OnboardingAction::CtaSelected(screen) => (PARAMETER_SCREEN, screen.label()),
            OnboardingAction::InstallConfirmed(ext)
            | OnboardingAction::VideoInstructionsDismissed(ext) => {
                (PARAMETER_EXTENSION, ext.as_str())
            }
            OnboardingAction::RewardCollected
            | OnboardingAction::Start
            | OnboardingAction::Complete => return None,
        };

        let mut params = Parameters::new();
        params.insert(key.to_string(), ParameterValue::from(value));
        Some(params)
    }

    /// Build an action from its name and whichever payload it needs
    ///
    /// Payloads the action does not use are ignored.
    pub fn from_parts(
        name: &str,
        screen: Option<Screen>,
        extension: Option<Extension>,
    ) -> Result<Self> {
        let need_screen = |action: &'static str| {
            screen.ok_or(TaxonomyError::MissingPayload {
                action,
                payload: PARAMETER_SCREEN,
            })
        };
        let need_extension = |action: &'static str| {
            extension.ok_or(TaxonomyError::MissingPayload {
                action,
                payload: PARAMETER_EXTENSION,
            })
        };

        let action = match name {
            "screen_shown" => OnboardingAction::ScreenShown(need_screen("screen_shown")?),
            "reward_collected" => OnboardingAction::RewardCollected,
            "back_selected" => OnboardingAction::BackSelected(need_screen("back_selected")?),
            "flow_dismissed" => OnboardingAction::FlowDismissed(need_screen("flow_dismissed")?),
            "screen_skipped" => OnboardingAction::ScreenSkipped(need_screen("screen_skipped")?),
            "cta_selected" => OnboardingAction::CtaSelected(need_screen("cta_selected")?),
            "install_confirmed" => {
                OnboardingAction::InstallConfirmed(need_extension("install_confirmed")?)
            }
            "video_instructions_dismissed" => OnboardingAction::VideoInstructionsDismissed(
                need_extension("video_instructions_dismissed")?,
            ),
            "start" => OnboardingAction::Start,
            "complete" => OnboardingAction::Complete,
            other => return Err(TaxonomyError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }
}

/// Onboarding screens, serialized by their human-readable label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[serde(rename = "Game Reward")]
    GameReward,
    #[serde(rename = "iMessage Install")]
    IMessageInstall,
    #[serde(rename = "Keyboard Install")]
    KeyboardInstall,
    #[serde(rename = "Emoji Request")]
    EmojiRequest,
    #[serde(rename = "Emoji Games")]
    EmojiGames,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::GameReward,
        Screen::IMessageInstall,
        Screen::KeyboardInstall,
        Screen::EmojiRequest,
        Screen::EmojiGames,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::GameReward => "Game Reward",
            Screen::IMessageInstall => "iMessage Install",
            Screen::KeyboardInstall => "Keyboard Install",
            Screen::EmojiRequest => "Emoji Request",
            Screen::EmojiGames => "Emoji Games",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Screen {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.label() == s)
            .ok_or_else(|| TaxonomyError::UnknownScreen(s.to_string()))
    }
}

/// App extensions that onboarding walks the user through installing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extension {
    #[serde(rename = "iMessage")]
    IMessage,
    Keyboard,
}

impl Extension {
    pub const ALL: [Extension; 2] = [Extension::IMessage, Extension::Keyboard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Extension::IMessage => "iMessage",
            Extension::Keyboard => "Keyboard",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Extension {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self> {
        Extension::ALL
            .into_iter()
            .find(|ext| ext.as_str() == s)
            .ok_or_else(|| TaxonomyError::UnknownExtension(s.to_string()))
    }
}
