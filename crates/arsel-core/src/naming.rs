//! Alias validation for the selected sequence.
//!
//! Two corrective policies apply, in order: a name that collides with another
//! alias gets a numeric suffix, otherwise (in strict mode) characters outside
//! `[A-Za-z0-9_]` are replaced with underscores.

/// Why an alias was changed on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCorrection {
    /// Collided with an existing alias and received a `_N` suffix.
    Duplicate,
    /// Contained characters outside `[A-Za-z0-9_]`.
    InvalidCharacters,
}

/// Outcome of validating a candidate alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedName {
    pub accepted: String,
    pub correction: Option<NameCorrection>,
}

impl ValidatedName {
    pub fn is_corrected(&self) -> bool {
        self.correction.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NameValidator {
    strict: bool,
}

impl NameValidator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Validate `candidate` against the aliases of every *other* entry.
    pub fn validate<'a, I>(&self, candidate: &str, others: I) -> ValidatedName
    where
        I: IntoIterator<Item = &'a str>,
    {
        let others: Vec<&str> = others.into_iter().collect();
        if others.contains(&candidate) {
            return ValidatedName {
                accepted: dedupe(candidate, &others),
                correction: Some(NameCorrection::Duplicate),
            };
        }
        if self.strict && !is_valid_identifier(candidate) {
            return ValidatedName {
                accepted: sanitize(candidate),
                correction: Some(NameCorrection::InvalidCharacters),
            };
        }
        ValidatedName {
            accepted: candidate.to_string(),
            correction: None,
        }
    }

    /// Initial alias for a freshly selected catalog name.
    pub fn initial_alias(&self, name: &str) -> String {
        if self.strict {
            sanitize(name)
        } else {
            name.to_string()
        }
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_valid_identifier(name: &str) -> bool {
    name.chars().all(is_identifier_char)
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|ch| if is_identifier_char(ch) { ch } else { '_' })
        .collect()
}

fn dedupe(base: &str, taken: &[&str]) -> String {
    let mut suffix = 1usize;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !taken.contains(&candidate.as_str()) {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_gets_first_free_suffix() {
        let validator = NameValidator::default();
        let result = validator.validate("x", ["x", "y"]);
        assert_eq!(result.accepted, "x_1");
        assert_eq!(result.correction, Some(NameCorrection::Duplicate));

        let result = validator.validate("x", ["x", "x_1"]);
        assert_eq!(result.accepted, "x_2");
    }

    #[test]
    fn duplicate_check_runs_even_in_lenient_mode() {
        let result = NameValidator::new(false).validate("a b", ["a b"]);
        assert_eq!(result.accepted, "a b_1");
    }

    #[test]
    fn duplicate_suffix_keeps_invalid_characters() {
        // The duplicate path wins over sanitizing, even in strict mode.
        let result = NameValidator::new(true).validate("a.b", ["a.b"]);
        assert_eq!(result.accepted, "a.b_1");
        assert_eq!(result.correction, Some(NameCorrection::Duplicate));
    }

    #[test]
    fn strict_mode_sanitizes() {
        let result = NameValidator::new(true).validate("motor.speed (rpm)", []);
        assert_eq!(result.accepted, "motor_speed__rpm_");
        assert_eq!(result.correction, Some(NameCorrection::InvalidCharacters));
    }

    #[test]
    fn lenient_mode_accepts_anything_unique() {
        let result = NameValidator::new(false).validate("1.1", ["2.1"]);
        assert_eq!(result.accepted, "1.1");
        assert!(!result.is_corrected());
    }

    #[test]
    fn initial_alias_depends_on_strictness() {
        assert_eq!(NameValidator::new(true).initial_alias("2.1"), "2_1");
        assert_eq!(NameValidator::new(false).initial_alias("2.1"), "2.1");
    }
}
