use crate::Error;
use chrono::{DateTime, Utc};
use licensing_common::validation::{non_blank, FieldErrors};
use licensing_entity::{software, status::Status};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct SoftwareCreate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub specification: Option<String>,
    /// Copyright or patent information
    pub indemnity: Option<String>,
    pub status: Status,
}

impl SoftwareCreate {
    pub fn prepare(&mut self) -> Result<(), Error> {
        self.name = self.name.trim().to_string();
        self.specification = non_blank(self.specification.take());
        self.indemnity = non_blank(self.indemnity.take());

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        if self.status == Status::Delete {
            errors.add("status", "\"Delete\" is not a valid choice.");
        }

        Ok(errors.into_result()?)
    }
}

/// Changes to a software, absent fields stay as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct SoftwareUpdate {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    pub specification: Option<String>,
    pub indemnity: Option<String>,
    pub status: Option<Status>,
}

impl SoftwareUpdate {
    pub fn prepare(&mut self) -> Result<(), Error> {
        if let Some(name) = &mut self.name {
            *name = name.trim().to_string();
        }

        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(err) => err.into(),
        };
        if self.status == Some(Status::Delete) {
            errors.add("status", "\"Delete\" is not a valid choice.");
        }

        Ok(errors.into_result()?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SoftwareDetails {
    pub id: i32,
    pub name: String,
    #[schema(required)]
    pub specification: Option<String>,
    /// Location of the uploaded user guide, relative to the media root
    #[schema(required)]
    pub user_guide_document: Option<String>,
    #[schema(required)]
    pub indemnity: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl From<software::Model> for SoftwareDetails {
    fn from(value: software::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            specification: value.specification,
            user_guide_document: value.user_guide_document,
            indemnity: value.indemnity,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
pub struct UserGuideUpload {
    /// Name of the uploaded file
    pub filename: Option<String>,
}
