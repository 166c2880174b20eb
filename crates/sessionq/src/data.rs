//! Data structures exchanged over the sessionq HTTP API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// One row of conference session metadata.
///
/// Field names match the backing `sessions` table columns and are serialized as-is.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Session {
    pub id: i64,
    pub session_code: String,
    pub title: String,
    pub description: Option<String>,
    pub speaker_name: Option<String>,
    pub duration_minutes: Option<i64>,
    pub session_type: Option<String>,
    pub nextstep_link: Option<String>,
    pub nextstep_category: Option<String>,
    pub index_value: Option<i64>,
    pub session_level: Option<String>,
    pub tags: Option<String>,
    pub recorded_status: Option<String>,
    pub session_web_link: Option<String>,
    pub slidedeck_link: Option<String>,
}

/// The optional query parameters accepted by `/sessions/filter`.
///
/// Every parameter is a partial match; blank values are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(
    feature = "openapi",
    derive(IntoParams),
    into_params(parameter_in = Query)
)]
pub struct SessionFilter {
    pub topic: Option<String>,
    pub tag: Option<String>,
    pub learning_category: Option<String>,
    pub session_level: Option<String>,
    pub session_type: Option<String>,
    pub speaker_name: Option<String>,
}

impl SessionFilter {
    /// Returns the value supplied for `field`, if any.
    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Topic => self.topic.as_deref(),
            FilterField::Tag => self.tag.as_deref(),
            FilterField::LearningCategory => self.learning_category.as_deref(),
            FilterField::SessionLevel => self.session_level.as_deref(),
            FilterField::SessionType => self.session_type.as_deref(),
            FilterField::SpeakerName => self.speaker_name.as_deref(),
        }
    }

    /// Iterates over every filter field together with its supplied value.
    pub fn fields(&self) -> impl Iterator<Item = (FilterField, Option<&str>)> {
        FilterField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

/// A parameter of the filter endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Topic,
    Tag,
    LearningCategory,
    SessionLevel,
    SessionType,
    SpeakerName,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Topic,
        FilterField::Tag,
        FilterField::LearningCategory,
        FilterField::SessionLevel,
        FilterField::SessionType,
        FilterField::SpeakerName,
    ];

    /// The query string name of this parameter.
    pub const fn param_name(self) -> &'static str {
        match self {
            FilterField::Topic => "topic",
            FilterField::Tag => "tag",
            FilterField::LearningCategory => "learningCategory",
            FilterField::SessionLevel => "sessionLevel",
            FilterField::SessionType => "sessionType",
            FilterField::SpeakerName => "speakerName",
        }
    }
}

/// A categorical field whose distinct values populate a filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slicer {
    Tags,
    LearningCategories,
    SessionLevels,
    SessionTypes,
    SpeakerNames,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UptimeInfo {
    pub seconds: i64,
    pub human: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StoreInfo {
    /// `"up"` when the backing store answered, `"down"` otherwise.
    pub status: String,
    pub sessions: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub started_at: String,
    pub uptime: UptimeInfo,
    pub store: StoreInfo,
}
