//! Recipient variables that can be referenced from template text as
//! `{{name}}`, and the profile that supplies their values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The variables the editor offers in its "Insert Variable" menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateVariable {
    FirstName,
    LastName,
    FullName,
    Email,
    Department,
    Company,
    Position,
    Phone,
}

impl TemplateVariable {
    pub const ALL: [TemplateVariable; 8] = [
        TemplateVariable::FirstName,
        TemplateVariable::LastName,
        TemplateVariable::FullName,
        TemplateVariable::Email,
        TemplateVariable::Department,
        TemplateVariable::Company,
        TemplateVariable::Position,
        TemplateVariable::Phone,
    ];

    /// Name used inside the placeholder delimiters.
    pub fn name(self) -> &'static str {
        match self {
            TemplateVariable::FirstName => "firstName",
            TemplateVariable::LastName => "lastName",
            TemplateVariable::FullName => "fullName",
            TemplateVariable::Email => "email",
            TemplateVariable::Department => "department",
            TemplateVariable::Company => "company",
            TemplateVariable::Position => "position",
            TemplateVariable::Phone => "phone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateVariable::FirstName => "First Name",
            TemplateVariable::LastName => "Last Name",
            TemplateVariable::FullName => "Full Name",
            TemplateVariable::Email => "Email",
            TemplateVariable::Department => "Department",
            TemplateVariable::Company => "Company",
            TemplateVariable::Position => "Position",
            TemplateVariable::Phone => "Phone",
        }
    }

    /// The placeholder as it appears in template text, e.g. `{{firstName}}`.
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }
}

/// Values for one recipient, keyed by variable name.
///
/// Any subset of variables may be present, and callers may add names that
/// are not in [`TemplateVariable`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientProfile {
    values: BTreeMap<String, String>,
}

impl RecipientProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample recipient used for previews when no employee is available.
    pub fn sample() -> Self {
        Self::new()
            .with(TemplateVariable::FirstName, "John")
            .with(TemplateVariable::LastName, "Smith")
            .with(TemplateVariable::FullName, "John Smith")
            .with(TemplateVariable::Email, "john.smith@company.com")
            .with(TemplateVariable::Department, "Sales")
            .with(TemplateVariable::Company, "Acme Corporation")
            .with(TemplateVariable::Position, "Sales Manager")
            .with(TemplateVariable::Phone, "+1 (555) 123-4567")
    }

    /// Builds a preview profile from an employee roster entry.
    ///
    /// The first word of `name` is the first name and the rest is the last
    /// name. Company, position and phone are the preview placeholders.
    pub fn from_employee(name: &str, email: &str, department: &str) -> Self {
        let name = name.trim();
        let (first, last) = match name.split_once(' ') {
            Some((first, last)) => (first, last.trim()),
            None => (name, ""),
        };
        Self::new()
            .with(TemplateVariable::FirstName, first)
            .with(TemplateVariable::LastName, last)
            .with(TemplateVariable::FullName, name)
            .with(TemplateVariable::Email, email)
            .with(TemplateVariable::Department, department)
            .with(TemplateVariable::Company, "Acme Corporation")
            .with(TemplateVariable::Position, "Employee")
            .with(TemplateVariable::Phone, "+1 (555) 123-4567")
    }

    pub fn with(mut self, variable: TemplateVariable, value: impl Into<String>) -> Self {
        self.set(variable.name(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecipientProfile {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_uses_double_braces() {
        assert_eq!(TemplateVariable::FirstName.token(), "{{firstName}}");
        assert_eq!(TemplateVariable::Phone.token(), "{{phone}}");
    }

    #[test]
    fn test_sample_profile_covers_every_variable() {
        let profile = RecipientProfile::sample();
        for variable in TemplateVariable::ALL {
            assert!(profile.contains(variable.name()), "{}", variable.name());
        }
        assert_eq!(profile.get("fullName"), Some("John Smith"));
    }

    #[test]
    fn test_from_employee_splits_name() {
        let profile =
            RecipientProfile::from_employee("Ana Maria Lopez", "ana@corp.test", "Finance");
        assert_eq!(profile.get("firstName"), Some("Ana"));
        assert_eq!(profile.get("lastName"), Some("Maria Lopez"));
        assert_eq!(profile.get("fullName"), Some("Ana Maria Lopez"));
        assert_eq!(profile.get("position"), Some("Employee"));

        let single = RecipientProfile::from_employee("Cher", "cher@corp.test", "Ops");
        assert_eq!(single.get("lastName"), Some(""));
    }

    #[test]
    fn test_profile_serializes_as_plain_map() {
        let profile: RecipientProfile = [("firstName", "Ana")].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&profile).unwrap(),
            r#"{"firstName":"Ana"}"#
        );
    }
}
