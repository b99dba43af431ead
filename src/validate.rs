//! Declarative field validation.
//!
//! # Responsibilities
//! - Apply required/optional rules to decoded shapes
//! - Recurse into nested shapes with dotted field paths
//! - Abort on the first failing field with an error naming field and rule
//!
//! # Design Decisions
//! - `optional` is the default: a field with no rule is never checked
//! - `required` fails when the value equals its shape's zero value, which is
//!   also what an absent field decodes to
//! - Validation is all-or-nothing per invocation; there is no partial success

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// A failed field rule.
///
/// `field` is the dotted path from the handler's input shape down to the
/// offending field.
#[derive(Debug, Clone, Error)]
#[error("field validation for '{field}' failed on the '{rule}' rule")]
pub struct ValidationError {
    pub field: String,
    pub rule: &'static str,
}

impl ValidationError {
    /// Prepend an enclosing field name to the path.
    pub fn prefixed(mut self, outer: &str) -> Self {
        self.field = format!("{outer}.{}", self.field);
        self
    }
}

/// Declarative validation over a decoded shape.
///
/// Implementations list their rules with the [`rule`] helpers; the default
/// body accepts everything, so shapes without rules need a bare impl only.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A `None` never validates; a `Some` validates its contents.
impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

/// Zero-value test backing the `required` rule.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

macro_rules! impl_blank_numeric {
    ( $($ty:ty),* ) => {
        $(
            impl Blank for $ty {
                fn is_blank(&self) -> bool {
                    *self == <$ty>::default()
                }
            }
        )*
    };
}

impl_blank_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Blank for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for HashMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Blank for BTreeMap<K, V> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Rule helpers for [`Validate`] impls.
pub mod rule {
    use super::{Blank, Validate, ValidationError};

    /// The field must not be absent or equal to its zero value.
    pub fn required<T: Blank>(field: &str, value: &T) -> Result<(), ValidationError> {
        if value.is_blank() {
            Err(ValidationError {
                field: field.to_string(),
                rule: "required",
            })
        } else {
            Ok(())
        }
    }

    /// Validate a nested shape, extending the field path on failure.
    pub fn nested<T: Validate>(field: &str, value: &T) -> Result<(), ValidationError> {
        value.validate().map_err(|e| e.prefixed(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Address {
        city: String,
    }

    impl Validate for Address {
        fn validate(&self) -> Result<(), ValidationError> {
            rule::required("City", &self.city)?;
            Ok(())
        }
    }

    struct User {
        name: String,
        // No rule: optional by default.
        #[allow(dead_code)]
        note: String,
        address: Address,
    }

    impl Validate for User {
        fn validate(&self) -> Result<(), ValidationError> {
            rule::required("Name", &self.name)?;
            rule::nested("Address", &self.address)?;
            Ok(())
        }
    }

    #[test]
    fn test_blank_values() {
        assert!(0i64.is_blank());
        assert!(!1i64.is_blank());
        assert!("".to_string().is_blank());
        assert!(!"x".to_string().is_blank());
        assert!(Option::<String>::None.is_blank());
        assert!(!Some("x".to_string()).is_blank());
        assert!(Vec::<u8>::new().is_blank());
        assert!(false.is_blank());
        assert!(!true.is_blank());
    }

    #[test]
    fn test_required_field_missing() {
        let user = User {
            name: String::new(),
            note: String::new(),
            address: Address {
                city: "Oslo".to_string(),
            },
        };
        let err = user.validate().unwrap_err();
        assert_eq!(err.field, "Name");
        assert!(err.to_string().contains("'required'"));
    }

    #[test]
    fn test_optional_field_may_be_blank() {
        let user = User {
            name: "x".to_string(),
            note: String::new(),
            address: Address {
                city: "Oslo".to_string(),
            },
        };
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_nested_failure_extends_path() {
        let user = User {
            name: "x".to_string(),
            note: String::new(),
            address: Address {
                city: String::new(),
            },
        };
        let err = user.validate().unwrap_err();
        assert_eq!(err.field, "Address.City");
    }

    #[test]
    fn test_option_validates_contents() {
        let some_bad = Some(Address {
            city: String::new(),
        });
        assert!(some_bad.validate().is_err());
        assert!(Option::<Address>::None.validate().is_ok());
    }
}
