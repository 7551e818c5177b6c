use std::fmt;

use crate::span::Span;

/// The single error kind the compiler ever raises, carrying the offending
/// span, the offending lexeme, and an optional detail sentence appended
/// after the common "Invalid syntax near ..." prefix.
///
/// Every diagnostic in the pipeline — lexer, parser, transformer — is one
/// of these; the `detail` field is what distinguishes a bare syntax error
/// from an unknown-member, type-mismatch, unsupported-call, or
/// result-mismatch report. All five forms share one message shape, so
/// `Display` is written by hand rather than derived per-variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicQueryError {
    pub span: Span,
    pub text: String,
    pub detail: Option<String>,
}

impl DynamicQueryError {
    pub fn position(&self) -> u32 {
        self.span.position()
    }

    /// Unexpected or missing tokens; no further detail.
    pub fn syntax(span: Span, text: impl Into<String>) -> Self {
        DynamicQueryError {
            span,
            text: text.into(),
            detail: None,
        }
    }

    /// A field name that is not a public member of the record type.
    pub fn unknown_member(span: Span, text: impl Into<String>, name: &str, record: &str) -> Self {
        DynamicQueryError {
            span,
            text: text.into(),
            detail: Some(format!("'{name}' is not a public member of '{record}'.")),
        }
    }

    /// An operand type violates an operator's type rule. `expected` lists
    /// the acceptable types in the order they should be quoted.
    pub fn type_mismatch(
        span: Span,
        text: impl Into<String>,
        role: &str,
        expected: &[crate::field_type::FieldType],
    ) -> Self {
        let joined = join_types(expected);
        DynamicQueryError {
            span,
            text: text.into(),
            detail: Some(format!("The {role} must be a {joined}.")),
        }
    }

    /// A call name outside the built-in function table.
    pub fn unsupported_call(span: Span, text: impl Into<String>, name: &str) -> Self {
        DynamicQueryError {
            span,
            text: text.into(),
            detail: Some(format!("Method '{name}' not supported.")),
        }
    }

    /// The final expression type is not assignable to the caller-requested
    /// output type.
    pub fn result_mismatch(span: Span, text: impl Into<String>, name: &str) -> Self {
        DynamicQueryError {
            span,
            text: text.into(),
            detail: Some(format!("The result of the expression must be a {name}.")),
        }
    }
}

fn join_types(types: &[crate::field_type::FieldType]) -> String {
    let mut out = String::new();
    for (i, ty) in types.iter().enumerate() {
        if i == 0 {
            out.push_str(&ty.to_string());
        } else {
            out.push_str(" or a ");
            out.push_str(&ty.to_string());
        }
    }
    out
}

impl fmt::Display for DynamicQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid syntax near '{}' at position {}.",
            self.text,
            self.position()
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DynamicQueryError {}

pub type Result<T> = std::result::Result<T, DynamicQueryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::FieldType;

    #[test]
    fn syntax_message_has_no_detail() {
        let err = DynamicQueryError::syntax(Span::point(1), "?");
        assert_eq!(err.to_string(), "Invalid syntax near '?' at position 1.");
    }

    #[test]
    fn unknown_member_message() {
        let err = DynamicQueryError::unknown_member(Span::point(5), "Bogus", "Bogus", "Record");
        assert_eq!(
            err.to_string(),
            "Invalid syntax near 'Bogus' at position 5. 'Bogus' is not a public member of 'Record'."
        );
    }

    #[test]
    fn type_mismatch_joins_multiple_expected_types() {
        let err = DynamicQueryError::type_mismatch(
            Span::point(1),
            "\"A\"",
            "value on the left",
            &[FieldType::Int, FieldType::Double],
        );
        assert_eq!(
            err.to_string(),
            "Invalid syntax near '\"A\"' at position 1. The value on the left must be a Int32 or a Double."
        );
    }

    #[test]
    fn unsupported_call_message() {
        let err = DynamicQueryError::unsupported_call(Span::point(1), "FOO", "FOO");
        assert_eq!(
            err.to_string(),
            "Invalid syntax near 'FOO' at position 1. Method 'FOO' not supported."
        );
    }

    #[test]
    fn result_mismatch_message() {
        let err = DynamicQueryError::result_mismatch(Span::point(1), "clause", "Boolean");
        assert_eq!(
            err.to_string(),
            "Invalid syntax near 'clause' at position 1. The result of the expression must be a Boolean."
        );
    }
}
