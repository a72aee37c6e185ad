//! Terraform variable file model and rendering.

use std::fmt;

use serde_json::Value;

use crate::error::{Result, TfvarsError};

/// Right-hand side of a `name = value` line.
#[derive(Debug, Clone, PartialEq)]
pub enum TfvarsValue {
    /// Emitted verbatim.
    Number(String),
    /// Emitted double quoted.
    String(String),
    /// Emitted as `["a", "b"]`.
    List(Vec<String>),
}

impl TfvarsValue {
    /// Build a number from an environment value, rejecting anything Terraform
    /// would not read as a number.
    pub fn number(name: &str, raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && is_hcl_number(trimmed) => {
                Ok(Self::Number(trimmed.to_string()))
            }
            _ => Err(TfvarsError::InvalidNumber {
                name: name.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

/// `-?digits(.digits)?([eE][+-]?digits)?`, the HCL number literal plus a
/// leading minus. Rust's float parser also takes `1.`, `.5` and `+3`.
fn is_hcl_number(s: &str) -> bool {
    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    let s = s.strip_prefix('-').unwrap_or(s);
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => digits(int) && digits(frac),
        None => digits(mantissa),
    };
    let exponent_ok = exponent.map_or(true, |e| {
        digits(e.strip_prefix(['+', '-']).unwrap_or(e))
    });
    mantissa_ok && exponent_ok
}

/// JSON escaping handles `"` and `\`; HCL templates also need `${` and `%{`
/// doubled so they stay literal.
fn quote(s: &str) -> String {
    Value::String(s.to_string())
        .to_string()
        .replace("${", "$${")
        .replace("%{", "%%{")
}

impl fmt::Display for TfvarsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(n),
            Self::String(s) => f.write_str(&quote(s)),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(|i| quote(i)).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: TfvarsValue,
}

/// Ordered assignments, split into blank-line separated groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfvarsDocument {
    groups: Vec<Vec<Assignment>>,
}

impl TfvarsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new group; following `push` calls land in it.
    pub fn group(mut self) -> Self {
        self.groups.push(Vec::new());
        self
    }

    pub fn push(mut self, name: &str, value: TfvarsValue) -> Self {
        if self.groups.is_empty() {
            self.groups.push(Vec::new());
        }
        if let Some(group) = self.groups.last_mut() {
            group.push(Assignment {
                name: name.to_string(),
                value,
            });
        }
        self
    }

    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.groups.iter().flatten()
    }

    pub fn get(&self, name: &str) -> Option<&TfvarsValue> {
        self.assignments()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}

impl fmt::Display for TfvarsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.groups.iter().filter(|g| !g.is_empty());
        for (i, group) in groups.enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for a in group {
                writeln!(f, "{} = {}", a.name, a.value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_quoted_and_escaped() {
        let v = TfvarsValue::String(r#"pa"ss\word"#.to_string());
        assert_eq!(v.to_string(), r#""pa\"ss\\word""#);
    }

    #[test]
    fn test_template_sequences_are_escaped() {
        let v = TfvarsValue::String("p${var.x}%{if true}".to_string());
        assert_eq!(v.to_string(), r#""p$${var.x}%%{if true}""#);

        let v = TfvarsValue::List(vec!["a${b}".to_string(), "c%{d}".to_string()]);
        assert_eq!(v.to_string(), r#"["a$${b}", "c%%{d}"]"#);

        // Lone markers are not template openers.
        let v = TfvarsValue::String("$5 and 100%".to_string());
        assert_eq!(v.to_string(), r#""$5 and 100%""#);
    }

    #[test]
    fn test_list_format() {
        let v = TfvarsValue::List(vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()]);
        assert_eq!(v.to_string(), r#"["10.0.0.1", "10.0.0.2"]"#);
        assert_eq!(TfvarsValue::List(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_number_accepts_integers_and_decimals() {
        assert_eq!(
            TfvarsValue::number("KAFKA_BROKER_CPU", "4").unwrap(),
            TfvarsValue::Number("4".to_string())
        );
        assert_eq!(
            TfvarsValue::number("KAFKA_BROKER_RAM", " 0.5 ").unwrap().to_string(),
            "0.5"
        );
        for raw in ["-2", "1e3", "2.5E-1", "10"] {
            assert!(TfvarsValue::number("KAFKA_BROKER_DISK_SIZE", raw).is_ok(), "{raw:?}");
        }
    }

    #[test]
    fn test_number_rejects_garbage() {
        for raw in ["", "four", "1:10", "NaN", "inf", "+3", "1.", ".5", "-.5", "0x10", "1e", "1e999"] {
            assert!(
                matches!(
                    TfvarsValue::number("KAFKA_BROKER_CPU", raw),
                    Err(TfvarsError::InvalidNumber { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_document_groups() {
        let doc = TfvarsDocument::new()
            .group()
            .push("a", TfvarsValue::Number("1".to_string()))
            .push("b", TfvarsValue::String("x".to_string()))
            .group()
            .push("C", TfvarsValue::List(vec!["y".to_string()]));
        assert_eq!(doc.to_string(), "a = 1\nb = \"x\"\n\nC = [\"y\"]\n");
        assert_eq!(doc.get("b"), Some(&TfvarsValue::String("x".to_string())));
        assert_eq!(doc.get("missing"), None);
    }

    #[test]
    fn test_empty_groups_skipped() {
        let doc = TfvarsDocument::new()
            .group()
            .group()
            .push("a", TfvarsValue::Number("1".to_string()));
        assert_eq!(doc.to_string(), "a = 1\n");
        assert_eq!(TfvarsDocument::new().to_string(), "");
    }
}
