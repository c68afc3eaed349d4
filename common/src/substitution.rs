//! # Variable substitution
//!
//! Replaces `{{variableName}}` placeholders with values from a
//! [`RecipientProfile`].
//!
//! - Names are bare identifiers (`[A-Za-z_][A-Za-z0-9_]*`). `{{ name }}` with
//!   inner spaces is not a placeholder and is left as written.
//! - A placeholder whose name is not in the profile is left verbatim, so an
//!   unresolved variable stays visible in the preview.
//! - Replacement is a single pass: a substituted value is never scanned again.

use crate::model::variable::RecipientProfile;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z_][A-Za-z0-9_]*)\}\}").expect("placeholder pattern is valid")
});

/// Substitutes every known placeholder in `text`.
pub fn substitute(text: &str, profile: &RecipientProfile) -> String {
    substitute_cow(text, profile).into_owned()
}

/// Like [`substitute`], borrowing `text` when nothing was replaced.
pub fn substitute_cow<'a>(text: &'a str, profile: &RecipientProfile) -> Cow<'a, str> {
    PLACEHOLDER.replace_all(text, |caps: &Captures| match profile.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
    })
}

/// Distinct variable names referenced by `text`, in order of first use.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Variables referenced by `text` that `profile` has no value for.
pub fn unresolved(text: &str, profile: &RecipientProfile) -> Vec<String> {
    placeholders(text)
        .into_iter()
        .filter(|name| !profile.contains(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pairs: &[(&str, &str)]) -> RecipientProfile {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_unresolved_placeholder_is_left_verbatim() {
        let result = substitute(
            "Hi {{firstName}}, from {{company}}",
            &profile(&[("firstName", "Ana")]),
        );
        assert_eq!(result, "Hi Ana, from {{company}}");
    }

    #[test]
    fn test_substitution_is_not_recursive() {
        let result = substitute(
            "{{company}}",
            &profile(&[("company", "{{firstName}} Inc"), ("firstName", "Ana")]),
        );
        assert_eq!(result, "{{firstName}} Inc");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let result = substitute(
            "{{firstName}} {{firstName}}!{{firstName}}",
            &profile(&[("firstName", "Bo")]),
        );
        assert_eq!(result, "Bo Bo!Bo");
    }

    #[test]
    fn test_only_exact_delimiters_match() {
        let p = profile(&[("email", "a@b.test")]);
        assert_eq!(substitute("{{ email }}", &p), "{{ email }}");
        assert_eq!(substitute("{email}", &p), "{email}");
        assert_eq!(substitute("{{{email}}}", &p), "{a@b.test}");
        assert_eq!(substitute("{{em-ail}}", &p), "{{em-ail}}");
    }

    #[test]
    fn test_values_are_inserted_literally() {
        let p = profile(&[("company", "$1 & ${name}")]);
        assert_eq!(substitute("At {{company}}", &p), "At $1 & ${name}");
    }

    #[test]
    fn test_borrows_when_untouched() {
        let p = profile(&[]);
        assert!(matches!(substitute_cow("plain text", &p), Cow::Borrowed(_)));
    }

    #[test]
    fn test_placeholders_and_unresolved() {
        let text = "{{firstName}} {{company}} {{firstName}} {{position}}";
        assert_eq!(placeholders(text), vec!["firstName", "company", "position"]);
        assert_eq!(
            unresolved(text, &profile(&[("company", "Acme")])),
            vec!["firstName", "position"]
        );
    }
}
