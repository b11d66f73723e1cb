use serde::Deserialize;
use std::collections::HashMap;

pub const SEARCH_BOOK_INTENT: &str = "SearchBook";
pub const BOOK_SLOT: &str = "book";

/// Inbound voice-platform envelope. Only the fields the skill consumes
/// are modeled; everything else is ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    pub context: Context,
    pub request: InboundRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: System,
}

#[derive(Debug, Clone, Deserialize)]
pub struct System {
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(rename = "apiEndpoint", default)]
    pub api_endpoint: Option<String>,
    #[serde(rename = "apiAccessToken", default)]
    pub api_access_token: Option<String>,
}

impl System {
    pub fn consent_token(&self) -> Option<&str> {
        self.user.permissions.as_ref()?.consent_token.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct User {
    #[serde(default)]
    pub permissions: Option<Permissions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Permissions {
    #[serde(rename = "consentToken", default)]
    pub consent_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    #[serde(rename = "deviceId")]
    pub device_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum InboundRequest {
    #[serde(rename = "LaunchRequest")]
    Launch,
    #[serde(rename = "IntentRequest")]
    Intent { intent: IntentPayload },
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

/// The closed set of turns this skill answers. Unknown intent names fall
/// back to Help so no turn goes unanswered.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillIntent<'a> {
    Launch,
    SearchBook { title: Option<&'a str> },
    Help,
    CancelOrStop,
    SessionEnded,
    Unrecognized,
}

impl RequestEnvelope {
    pub fn intent(&self) -> SkillIntent<'_> {
        match &self.request {
            InboundRequest::Launch => SkillIntent::Launch,
            InboundRequest::SessionEnded => SkillIntent::SessionEnded,
            InboundRequest::Unrecognized => SkillIntent::Unrecognized,
            InboundRequest::Intent { intent } => match intent.name.as_str() {
                SEARCH_BOOK_INTENT => SkillIntent::SearchBook {
                    title: intent
                        .slots
                        .get(BOOK_SLOT)
                        .and_then(|slot| slot.value.as_deref()),
                },
                "AMAZON.CancelIntent" | "AMAZON.StopIntent" => SkillIntent::CancelOrStop,
                _ => SkillIntent::Help,
            },
        }
    }
}
