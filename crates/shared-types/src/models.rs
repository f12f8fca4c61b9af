use serde::{Deserialize, Serialize};

/// Platform role stored on a profile row.
///
/// Parsing is strict: anything other than the three known values is treated
/// as "no role" rather than being coerced into a default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Superadmin,
    Mentor,
    Mentee,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Superadmin, UserRole::Mentor, UserRole::Mentee];

    /// Parse a role string from a profile row. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "superadmin" => Some(UserRole::Superadmin),
            "mentor" => Some(UserRole::Mentor),
            "mentee" => Some(UserRole::Mentee),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Superadmin => "superadmin",
            UserRole::Mentor => "mentor",
            UserRole::Mentee => "mentee",
        }
    }
}

/// Deserialize an optional role leniently: null, missing or unrecognized
/// strings all become `None` instead of failing the whole row.
fn lenient_role<'de, D>(deserializer: D) -> Result<Option<UserRole>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(UserRole::parse))
}

/// Authenticated user as reported by the backend's session lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Token pair issued by password sign-in or refresh. Never sent to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
    pub user: SessionUser,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 6, message = "Password must be at least 6 characters"))
    )]
    pub password: String,
}

/// Result of a sign-out. Local session state is always cleared; this only
/// reports whether the backend also revoked the token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SignOutOutcome {
    pub remote_revoked: bool,
}

/// A user's public profile. One row per user; `id` equals the user id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub years_experience: Option<i32>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub industry_focus: Vec<String>,
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn full_name_or_empty(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }

    pub fn bio_or_empty(&self) -> &str {
        self.bio.as_deref().unwrap_or("")
    }

    pub fn company_or_empty(&self) -> &str {
        self.company.as_deref().unwrap_or("")
    }

    pub fn position_or_empty(&self) -> &str {
        self.position.as_deref().unwrap_or("")
    }

    pub fn years_experience_or_zero(&self) -> i32 {
        self.years_experience.unwrap_or(0)
    }
}

fn nullable_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// Null and missing both read as the empty string.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// Mentee fields embedded in a match row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MenteeSummary {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// One mentor/mentee pairing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MentorshipMatch {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub mentor_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub mentee_id: String,
    #[serde(default)]
    pub mentee: Option<MenteeSummary>,
}

impl MentorshipMatch {
    /// Display name of the embedded mentee, empty when the embed is missing.
    pub fn mentee_name(&self) -> &str {
        self.mentee
            .as_ref()
            .and_then(|m| m.full_name.as_deref())
            .unwrap_or("")
    }
}

/// A learning path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Curriculum {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub industry_focus: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// A user's status on a single module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserProgress {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub user_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub module_id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub status: String,
}

impl UserProgress {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }
}
