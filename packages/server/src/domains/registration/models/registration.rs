//! Registration form input and the persisted attendee record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::utils::normalize_email;

/// Raw form input as the modal collects it.
///
/// `state` only applies to Indian nationals and `custom_occupation` only
/// when occupation is "other"; `validate` enforces both rules and
/// `resolved_*` accessors apply them.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    /// Date of birth as the form submits it (YYYY-MM-DD)
    pub dob: String,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
    pub state: Option<String>,
    pub occupation: String,
    pub custom_occupation: Option<String>,
    pub success: String,
    pub meet_people: String,
    pub strengths: String,
    pub weaknesses: String,
    pub hobby: String,
}

impl RegistrationForm {
    /// Check required fields and the two conditional rules. Returns the
    /// first problem found, phrased for direct display.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("date of birth", &self.dob),
            ("gender", &self.gender),
            ("nationality", &self.nationality),
            ("occupation", &self.occupation),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(format!("please fill in your {}", label));
            }
        }
        if self.age <= 0 {
            return Err("please enter a valid age".to_string());
        }
        if self.nationality == "India"
            && self
                .state
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            return Err("please select your state".to_string());
        }
        if self.occupation == "other"
            && self
                .custom_occupation
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            return Err("please describe your occupation".to_string());
        }
        Ok(())
    }

    /// The occupation that gets persisted: the free-text value when "other"
    /// was selected, otherwise the enumerated one.
    pub fn resolved_occupation(&self) -> String {
        if self.occupation == "other" {
            self.custom_occupation
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string()
        } else {
            self.occupation.clone()
        }
    }

    /// State is only recorded for Indian nationals; anything entered while
    /// another nationality was selected is discarded.
    pub fn resolved_state(&self) -> Option<String> {
        if self.nationality == "India" {
            self.state.clone()
        } else {
            None
        }
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// An attachment supplied through the form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// The persisted registration record.
///
/// Field names are camelCase to match the store's documents.
/// `registered_at` is absent here: the store stamps it server-side at
/// write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    /// Document id, `user_<epoch-millis>`
    pub uid: String,
    /// Identity-provider account id
    pub auth_uid: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub dob: String,
    pub age: i32,
    pub gender: String,
    pub nationality: String,
    pub state: Option<String>,
    pub occupation: String,
    pub skills: Vec<String>,
    pub success: String,
    pub meet_people: String,
    pub strengths: String,
    pub weaknesses: String,
    pub hobby: String,
    pub profile_pic_url: Option<String>,
    pub payment_screenshot_url: Option<String>,
    pub approval_status: String,
}

impl RegistrationRecord {
    /// Assemble the record from validated form input and workflow outputs.
    pub fn assemble(
        uid: String,
        auth_uid: String,
        form: &RegistrationForm,
        skills: Vec<String>,
        profile_pic_url: Option<String>,
        payment_screenshot_url: Option<String>,
    ) -> Self {
        Self {
            uid,
            auth_uid,
            name: form.name.clone(),
            email: form.normalized_email(),
            email_verified: true,
            dob: form.dob.clone(),
            age: form.age,
            gender: form.gender.clone(),
            nationality: form.nationality.clone(),
            state: form.resolved_state(),
            occupation: form.resolved_occupation(),
            skills,
            success: form.success.clone(),
            meet_people: form.meet_people.clone(),
            strengths: form.strengths.clone(),
            weaknesses: form.weaknesses.clone(),
            hobby: form.hobby.clone(),
            profile_pic_url,
            payment_screenshot_url,
            approval_status: "pending".to_string(),
        }
    }

    /// Serialize to the document shape the store expects.
    pub fn to_document(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
