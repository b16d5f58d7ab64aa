//! Field rules and their tag syntax.

use std::fmt::{self, Display};
use std::str::FromStr;

/// A check applied to a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Non-empty values must be Kubernetes qualified names.
    QualifiedName,
    /// The field must be present and non-empty.
    Required,
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QualifiedName" => Ok(Rule::QualifiedName),
            "Required" => Ok(Rule::Required),
            other => Err(RuleParseError::UnknownRule(other.to_string())),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::QualifiedName => write!(f, "QualifiedName"),
            Rule::Required => write!(f, "Required"),
        }
    }
}

/// Parses a comma separated rule tag such as `QualifiedName,Required`.
///
/// An empty tag or `-` yields no rules.
///
/// # Example
///
/// ```rust
/// use fielderr::validators::{parse_rules, Rule};
///
/// let rules = parse_rules("QualifiedName, Required").unwrap();
/// assert_eq!(rules, vec![Rule::QualifiedName, Rule::Required]);
///
/// assert!(parse_rules("-").unwrap().is_empty());
/// assert!(parse_rules("Unique").is_err());
/// ```
pub fn parse_rules(tag: &str) -> Result<Vec<Rule>, RuleParseError> {
    let tag = tag.trim();
    if tag == "-" {
        return Ok(Vec::new());
    }
    let mut rules = Vec::new();
    for part in tag.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let rule: Rule = part.parse()?;
        if !rules.contains(&rule) {
            rules.push(rule);
        }
    }
    Ok(rules)
}

/// Errors that can occur while parsing a rule tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    /// The tag names a rule that does not exist.
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_rule() {
        assert_eq!(parse_rules("Required").unwrap(), vec![Rule::Required]);
    }

    #[test]
    fn test_parse_ignores_blanks_and_duplicates() {
        assert_eq!(
            parse_rules(" Required,,QualifiedName , Required ").unwrap(),
            vec![Rule::Required, Rule::QualifiedName]
        );
    }

    #[test]
    fn test_parse_empty_and_skip() {
        assert!(parse_rules("").unwrap().is_empty());
        assert!(parse_rules(" - ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_unknown_rule() {
        let err = parse_rules("Required,Unique").unwrap_err();
        assert_eq!(err, RuleParseError::UnknownRule("Unique".to_string()));
        assert_eq!(err.to_string(), "unknown validation rule 'Unique'");
    }

    #[test]
    fn test_rule_display_round_trips() {
        for rule in [Rule::QualifiedName, Rule::Required] {
            assert_eq!(rule.to_string().parse::<Rule>().unwrap(), rule);
        }
    }
}
