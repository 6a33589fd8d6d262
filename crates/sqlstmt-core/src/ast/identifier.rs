//! Identifiers and their owner/identifier qualification.

use serde::Serialize;

use super::Node;

/// A single name component with its quoting removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierValue {
    /// Case-preserving value without quotes.
    pub value: String,
    /// Whether the component was written quoted.
    pub quoted: bool,
}

impl IdentifierValue {
    /// Strips backtick, double-quote, bracket or (for string aliases)
    /// single-quote quoting and collapses doubled quote characters.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let mut chars = raw.chars();
        let (Some(open), Some(close)) = (chars.next(), raw.chars().last()) else {
            return Self {
                value: String::new(),
                quoted: false,
            };
        };
        let expected_close = match open {
            '`' => '`',
            '"' => '"',
            '\'' => '\'',
            '[' => ']',
            _ => {
                return Self {
                    value: raw.to_string(),
                    quoted: false,
                }
            }
        };
        if raw.len() < 2 || close != expected_close {
            return Self {
                value: raw.to_string(),
                quoted: false,
            };
        }
        let inner = &raw[open.len_utf8()..raw.len() - close.len_utf8()];
        let doubled: String = [close, close].iter().collect();
        Self {
            value: inner.replace(&doubled, &close.to_string()),
            quoted: true,
        }
    }
}

/// A dotted name exactly as written, e.g. `` db.`my table` ``.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FullId {
    pub node: Node,
    /// Raw components, quotes included.
    pub parts: Vec<String>,
}

impl FullId {
    /// The components with quoting removed.
    #[must_use]
    pub fn values(&self) -> Vec<IdentifierValue> {
        self.parts.iter().map(|p| IdentifierValue::from_raw(p)).collect()
    }

    /// Splits into owner and identifier: one component is identifier-only,
    /// two or more are owner + identifier. Returns the remaining components.
    fn split(&self) -> (Option<String>, String, Vec<String>) {
        let mut values = self.values().into_iter().map(|v| v.value);
        match self.parts.len() {
            0 => (None, String::new(), Vec::new()),
            1 => (None, values.next().unwrap_or_default(), Vec::new()),
            _ => {
                let owner = values.next();
                let identifier = values.next().unwrap_or_default();
                (owner, identifier, values.collect())
            }
        }
    }
}

/// A table reference qualified by at most one owner (database or schema).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableName {
    pub node: Node,
    pub owner: Option<String>,
    pub identifier: String,
}

impl TableName {
    /// Qualifies a dotted name. Components beyond the second are dropped.
    #[must_use]
    pub fn from_full_id(id: FullId) -> Self {
        let (owner, identifier, _dropped) = id.split();
        Self {
            node: id.node,
            owner,
            identifier,
        }
    }

    /// `owner.identifier`, or just the identifier.
    #[must_use]
    pub fn qualified(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}.{}", self.identifier),
            None => self.identifier.clone(),
        }
    }
}

/// A column reference such as `col`, `t.col` or `t.col.field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnName {
    pub node: Node,
    pub owner: Option<String>,
    pub identifier: String,
    /// Components after the identifier.
    pub nested_object_attrs: Vec<String>,
}

impl ColumnName {
    #[must_use]
    pub fn from_full_id(id: FullId) -> Self {
        let (owner, identifier, nested_object_attrs) = id.split();
        Self {
            node: id.node,
            owner,
            identifier,
            nested_object_attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectKind;
    use crate::lexer::Position;

    fn full_id(parts: &[&str]) -> FullId {
        let text = parts.join(".");
        let end = text.len();
        FullId {
            node: Node::new(
                Position::new(1, 1, 0),
                Position::new(1, end + 1, end),
                text,
                DialectKind::MySql,
            ),
            parts: parts.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_unquote() {
        assert_eq!(
            IdentifierValue::from_raw("`a``b`"),
            IdentifierValue {
                value: "a`b".into(),
                quoted: true
            }
        );
        assert_eq!(IdentifierValue::from_raw("\"Mixed\"").value, "Mixed");
        assert_eq!(IdentifierValue::from_raw("[x]").value, "x");
        assert!(!IdentifierValue::from_raw("plain").quoted);
    }

    #[test]
    fn test_table_name_qualification() {
        let one = TableName::from_full_id(full_id(&["users"]));
        assert_eq!(one.owner, None);
        assert_eq!(one.identifier, "users");

        let two = TableName::from_full_id(full_id(&["shop", "`Orders`"]));
        assert_eq!(two.owner.as_deref(), Some("shop"));
        assert_eq!(two.identifier, "Orders");
        assert_eq!(two.qualified(), "shop.Orders");

        let three = TableName::from_full_id(full_id(&["cat", "sch", "tbl"]));
        assert_eq!(three.owner.as_deref(), Some("cat"));
        assert_eq!(three.identifier, "sch");
    }

    #[test]
    fn test_column_name_keeps_nested_attrs() {
        let col = ColumnName::from_full_id(full_id(&["t", "doc", "field"]));
        assert_eq!(col.owner.as_deref(), Some("t"));
        assert_eq!(col.identifier, "doc");
        assert_eq!(col.nested_object_attrs, vec!["field".to_string()]);
    }
}
