//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// One violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every violated field of one validation pass.
///
/// Mutating operations report *all* violated fields at once, not just the
/// first, so the boundary layer can annotate a whole form in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|v| v.field)
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }
}

impl core::fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

/// Accumulator used by validation passes.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn push_if(&mut self, condition: bool, field: &'static str, message: impl Into<String>) {
        if condition {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was collected, the full violation list otherwise.
    pub fn into_result(self) -> DomainResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(FieldViolations(self.0)))
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, shortfalls). Infrastructure concerns belong elsewhere. All of
/// these are recoverable and surfaced to the caller for user-facing
/// messaging; programming-contract violations (e.g. negative consumption
/// amounts) panic instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Input failed one or more field constraints.
    #[error("validation failed: {0}")]
    Validation(FieldViolations),

    /// A referenced entity id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A consumption request exceeded the available stock. Carries the
    /// requested/available amounts so the caller can report a precise
    /// shortfall; the stock itself is never clamped.
    #[error("insufficient stock of {item}: requested {requested}, available {available}")]
    InsufficientStock {
        item: String,
        requested: f64,
        available: f64,
    },

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(FieldViolations(vec![FieldViolation {
            field,
            message: message.into(),
        }]))
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_accumulate_every_field() {
        let mut v = Violations::new();
        v.push("name", "must not be empty");
        v.push_if(true, "initial_count", "must be positive");
        v.push_if(false, "breed_id", "unknown breed");

        let err = v.into_result().unwrap_err();
        match err {
            DomainError::Validation(fields) => {
                let names: Vec<_> = fields.fields().collect();
                assert_eq!(names, vec!["name", "initial_count"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_violations_are_ok() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn insufficient_stock_message_carries_amounts() {
        let err = DomainError::InsufficientStock {
            item: "Starter feed".into(),
            requested: 120.0,
            available: 80.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("120"));
        assert!(msg.contains("80"));
    }
}
