use serde::{Deserialize, Serialize};
use std::fmt;

/// A child tracked by the parent app.
///
/// The health snapshot fields are optional: a freshly added child has no
/// measurements until the first growth log. `bmi` and `bmi_status` are
/// derived from the latest height/weight pair and are only ever replaced
/// together with it (see `GrowthSnapshot`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: i64,
    pub name: String,
    /// Free-text age in the `"2y 3m"` / `"6m"` format
    pub age: String,
    pub gender: String,
    /// Single-glyph avatar shown on the child card
    #[serde(default)]
    pub avatar: String,
    /// Hex color tag for the child card
    #[serde(default)]
    pub color: String,
    /// Height in cm from the most recent growth log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kg from the most recent growth log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_status: Option<BmiStatus>,
    /// Overall development score, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub development_score: Option<u8>,
    /// Formatted date of the last checkup, e.g. "July 25, 2025"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checkup: Option<String>,
    /// Signed height delta string, e.g. "+2.0 cm"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_change: Option<String>,
    /// Signed weight delta string, e.g. "+0.5 kg"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_change: Option<String>,
}

impl Child {
    /// Avatar glyph, falling back to the first letter of the name.
    pub fn avatar_glyph(&self) -> String {
        if !self.avatar.is_empty() {
            return self.avatar.clone();
        }
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }

    /// Whether at least one growth log has been recorded.
    pub fn has_growth_data(&self) -> bool {
        matches!(self.height, Some(h) if h > 0.0) && matches!(self.weight, Some(w) if w > 0.0)
    }

    /// Replace the health snapshot with the result of a new growth log.
    pub fn apply_growth(&mut self, snapshot: &GrowthSnapshot) {
        self.height = Some(snapshot.height);
        self.weight = Some(snapshot.weight);
        self.bmi = Some(snapshot.bmi);
        self.bmi_status = Some(snapshot.bmi_status);
        self.height_change = Some(snapshot.height_change.clone());
        self.weight_change = Some(snapshot.weight_change.clone());
        self.last_checkup = Some(snapshot.last_checkup.clone());
    }
}

/// BMI classification band.
///
/// Band boundaries are half-open on the lower bound: a BMI of exactly
/// 16.0 is `Normal`, 25.0 is `Overweight`, 30.0 is `Obese`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiStatus {
    /// Classify a BMI value into its band.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 16.0 {
            BmiStatus::Underweight
        } else if bmi < 25.0 {
            BmiStatus::Normal
        } else if bmi < 30.0 {
            BmiStatus::Overweight
        } else {
            BmiStatus::Obese
        }
    }
}

impl fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BmiStatus::Underweight => "Underweight",
            BmiStatus::Normal => "Normal",
            BmiStatus::Overweight => "Overweight",
            BmiStatus::Obese => "Obese",
        };
        write!(f, "{}", s)
    }
}

/// The complete derived result of one growth log.
///
/// Applied to a `Child` as a unit so the derived fields can never drift
/// from the height/weight pair they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSnapshot {
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub bmi_status: BmiStatus,
    pub height_change: String,
    pub weight_change: String,
    pub last_checkup: String,
}

/// Partial update for a child record.
///
/// Only descriptive fields are patchable individually; the health
/// snapshot travels as one `GrowthSnapshot` so bmi/status can never be
/// set independently of height and weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildUpdate {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub avatar: Option<String>,
    pub color: Option<String>,
    pub growth: Option<GrowthSnapshot>,
}

impl ChildUpdate {
    /// An update carrying only a new growth snapshot.
    pub fn from_growth(snapshot: GrowthSnapshot) -> Self {
        Self {
            growth: Some(snapshot),
            ..Self::default()
        }
    }
}

/// An authenticated user of either app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub telephone: String,
}

/// Which app a registration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// TikiriCare: parents tracking child health
    Parent,
    /// TikiriPiyasa: care-center providers
    Caregiver,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Parent => write!(f, "parent"),
            UserRole::Caregiver => write!(f, "caregiver"),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub telephone: String,
    pub role: UserRole,
}

/// Token + user pair carried by a successful auth response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Envelope variant of the auth response: `{success, data: {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<AuthPayload>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Wire shape of `POST /auth/login` and `POST /auth/register` responses.
///
/// The backend has shipped two shapes: an envelope with a `success` flag
/// and the payload under `data`, and an earlier bare `{token, user}`.
/// Both are accepted and normalized at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthResponse {
    Enveloped(AuthEnvelope),
    Bare(AuthPayload),
}

/// Response of `GET /children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Body of `POST /children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    pub name: String,
    pub gender: String,
    /// ISO 8601 date, `YYYY-MM-DD`
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Response of `POST /children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildResponse {
    pub child: Child,
}

/// Body of `POST /children/:id/growth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecordRequest {
    pub height: f64,
    pub weight: f64,
    /// ISO 8601 date the measurement was taken
    pub recorded_date: String,
}

/// A care-center provider listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caregiver {
    pub id: i64,
    pub name: String,
    pub specialization: String,
    pub experience: String,
    pub location: String,
    pub contact_number: String,
    #[serde(default)]
    pub services: Vec<String>,
}

/// Body of `POST /caregivers/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCaregiverRequest {
    pub name: String,
    pub specialization: String,
    pub experience: String,
    pub location: String,
    pub contact_number: String,
    pub services: Vec<String>,
}

/// Response of `GET /caregivers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaregiverListResponse {
    pub caregivers: Vec<Caregiver>,
}

/// Response of `POST /caregivers/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaregiverResponse {
    pub caregiver: Caregiver,
}

/// Lifecycle of a care request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareRequestStatus {
    Pending,
    Accepted,
    Declined,
    Completed,
}

/// A parent's request for care-center services for one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareRequest {
    pub id: i64,
    pub child_id: i64,
    pub service_type: String,
    pub description: String,
    /// Preferred date, `YYYY-MM-DD`
    pub preferred_date: String,
    /// Preferred time slot, free text (e.g. "morning", "14:00")
    pub preferred_time: String,
    pub status: CareRequestStatus,
}

/// Body of `POST /care-requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCareRequest {
    pub child_id: i64,
    pub service_type: String,
    pub description: String,
    pub preferred_date: String,
    pub preferred_time: String,
}

/// Response of `GET /care-requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareRequestListResponse {
    pub care_requests: Vec<CareRequest>,
}

/// Response of `POST /care-requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareRequestResponse {
    pub care_request: CareRequest,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Best available human-readable detail, if any.
    pub fn detail(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: Option<String>,
}

/// Registration form input, validated before any network call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Client-side registration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    MissingFields,
    InvalidEmail,
    PasswordTooShort { min: usize },
    PasswordMismatch,
    InvalidTelephone,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::MissingFields => write!(f, "Please fill in all fields"),
            RegistrationError::InvalidEmail => write!(f, "Please enter a valid email address"),
            RegistrationError::PasswordTooShort { min } => {
                write!(f, "Password must be at least {} characters", min)
            }
            RegistrationError::PasswordMismatch => write!(f, "Passwords do not match"),
            RegistrationError::InvalidTelephone => {
                write!(f, "Please enter a valid telephone number")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

const MIN_PASSWORD_LEN: usize = 6;
const MIN_TELEPHONE_LEN: usize = 10;

impl RegisterForm {
    /// Validate the form and produce the registration request body.
    ///
    /// Checks run in the same order the original forms applied them:
    /// required fields, email shape, password length, confirmation
    /// match, telephone length. The first failure wins.
    pub fn validate(&self, role: UserRole) -> Result<RegisterRequest, RegistrationError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.telephone.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(RegistrationError::MissingFields);
        }
        if !self.email.contains('@') {
            return Err(RegistrationError::InvalidEmail);
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(RegistrationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.telephone.trim().len() < MIN_TELEPHONE_LEN {
            return Err(RegistrationError::InvalidTelephone);
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            telephone: self.telephone.trim().to_string(),
            role,
        })
    }
}
