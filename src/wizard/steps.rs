use serde::{Deserialize, Serialize};

use crate::util::validation::{
    normalize_phone, validate_email, CITY_MAX_LEN, NAME_MAX_LEN, PHONE_DIGITS,
    QUOTE_MESSAGE_MAX_LEN, SERVICE_MAX_LEN, STATE_MAX_LEN,
};

pub const ADDRESS_MAX_LEN: usize = 200;

/// The five wizard screens, strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    Service,
    Details,
    Media,
    Contact,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Service,
        WizardStep::Details,
        WizardStep::Media,
        WizardStep::Contact,
        WizardStep::Review,
    ];

    /// 1-based position shown in the progress indicator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Service => 1,
            WizardStep::Details => 2,
            WizardStep::Media => 3,
            WizardStep::Contact => 4,
            WizardStep::Review => 5,
        }
    }

    /// Advance by exactly one; the review screen has nowhere further to go.
    pub fn next(self) -> Self {
        match self {
            WizardStep::Service => WizardStep::Details,
            WizardStep::Details => WizardStep::Media,
            WizardStep::Media => WizardStep::Contact,
            WizardStep::Contact => WizardStep::Review,
            WizardStep::Review => WizardStep::Review,
        }
    }

    /// Step back by one; going back from the first screen stays put.
    pub fn prev(self) -> Self {
        match self {
            WizardStep::Service => WizardStep::Service,
            WizardStep::Details => WizardStep::Service,
            WizardStep::Media => WizardStep::Details,
            WizardStep::Contact => WizardStep::Media,
            WizardStep::Review => WizardStep::Contact,
        }
    }

    pub(crate) fn bit(self) -> u8 {
        1 << (self.number() - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Exploring,
    WithinThreeMonths,
    AsSoonAsPossible,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Urgency::Exploring => "Just exploring",
            Urgency::WithinThreeMonths => "Within 3 months",
            Urgency::AsSoonAsPossible => "As soon as possible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSize {
    Small,
    Medium,
    Large,
    FullHome,
}

impl ProjectSize {
    pub fn label(self) -> &'static str {
        match self {
            ProjectSize::Small => "Small (single room refresh)",
            ProjectSize::Medium => "Medium (full room remodel)",
            ProjectSize::Large => "Large (multiple rooms)",
            ProjectSize::FullHome => "Full home",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredContact {
    Email,
    Phone,
    Text,
}

/// Step 1: what work the visitor wants done.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSelection {
    pub service: String,
    pub urgency: Option<Urgency>,
    pub scope_tags: Vec<String>,
}

impl ServiceSelection {
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let service = self.service.trim();
        if service.is_empty() {
            errors.push("Select a service to continue".to_string());
        } else if service.chars().count() > SERVICE_MAX_LEN {
            errors.push(format!(
                "Service must be at most {} characters",
                SERVICE_MAX_LEN
            ));
        }
        if self.urgency.is_none() {
            errors.push("Let us know how soon you want to start".to_string());
        }
        errors
    }
}

/// Step 2: the property and the rough scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub project_size: Option<ProjectSize>,
    pub property_address: String,
    pub property_city: String,
    pub property_state: String,
    pub timeline: String,
}

impl ProjectDetails {
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.project_size.is_none() {
            errors.push("Pick the size of your project".to_string());
        }
        let city = self.property_city.trim();
        if city.is_empty() {
            errors.push("City is required".to_string());
        } else if city.chars().count() > CITY_MAX_LEN {
            errors.push(format!("City must be at most {} characters", CITY_MAX_LEN));
        }
        let state = self.property_state.trim();
        if state.is_empty() {
            errors.push("State is required".to_string());
        } else if state.chars().count() > STATE_MAX_LEN {
            errors.push(format!("State must be at most {} characters", STATE_MAX_LEN));
        }
        if self.property_address.trim().chars().count() > ADDRESS_MAX_LEN {
            errors.push(format!(
                "Address must be at most {} characters",
                ADDRESS_MAX_LEN
            ));
        }
        errors
    }
}

/// Step 3's free-text half; photos are validated per file as they arrive.
pub fn validate_description(description: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if description.trim().chars().count() > QUOTE_MESSAGE_MAX_LEN {
        errors.push(format!(
            "Project description must be at most {} characters",
            QUOTE_MESSAGE_MAX_LEN
        ));
    }
    errors
}

/// Step 4: how to reach the visitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_contact: Option<PreferredContact>,
    pub best_time: String,
}

impl ContactDetails {
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        } else if name.chars().count() > NAME_MAX_LEN {
            errors.push(format!("Name must be at most {} characters", NAME_MAX_LEN));
        }
        if !validate_email(self.email.trim()) {
            errors.push("A valid email address is required".to_string());
        }
        let phone = self.phone.trim();
        if !phone.is_empty() && normalize_phone(phone).is_none() {
            errors.push(format!(
                "Phone number must contain exactly {} digits",
                PHONE_DIGITS
            ));
        }
        errors
    }
}
