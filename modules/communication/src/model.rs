use chrono::{DateTime, Utc};
use licensing_common::validation::MOBILE;
use licensing_entity::{sms, status::MessageStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A text message to send.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct SmsSend {
    /// The receiving number
    #[validate(regex(path = *MOBILE), length(max = 15))]
    pub mobile: String,
    #[validate(length(min = 1, max = 1600))]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SmsDetails {
    pub id: i32,
    pub mobile: String,
    #[schema(required)]
    pub message: Option<String>,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
}

impl From<sms::Model> for SmsDetails {
    fn from(value: sms::Model) -> Self {
        Self {
            id: value.id,
            mobile: value.mobile,
            message: value.message,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
pub struct SmsFilter {
    /// Only messages with this status
    #[param(inline)]
    pub status: Option<MessageStatus>,
}
