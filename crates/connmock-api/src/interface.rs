//! Runtime tags for the interfaces of the connectivity API.

use std::fmt;

/// One interface of the connectivity API.
///
/// Each interface extends at most one other interface of the family:
/// `CallableStatement` → `PreparedStatement` → `Statement`, and
/// `NClob` → `Clob`. Every other interface is a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interface {
    Blob,
    CallableStatement,
    Clob,
    Connection,
    DatabaseMetaData,
    NClob,
    ParameterMetaData,
    PreparedStatement,
    ResultSet,
    ResultSetMetaData,
    Savepoint,
    Statement,
}

impl Interface {
    pub const ALL: [Interface; 12] = [
        Interface::Blob,
        Interface::CallableStatement,
        Interface::Clob,
        Interface::Connection,
        Interface::DatabaseMetaData,
        Interface::NClob,
        Interface::ParameterMetaData,
        Interface::PreparedStatement,
        Interface::ResultSet,
        Interface::ResultSetMetaData,
        Interface::Savepoint,
        Interface::Statement,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Interface::Blob => "Blob",
            Interface::CallableStatement => "CallableStatement",
            Interface::Clob => "Clob",
            Interface::Connection => "Connection",
            Interface::DatabaseMetaData => "DatabaseMetaData",
            Interface::NClob => "NClob",
            Interface::ParameterMetaData => "ParameterMetaData",
            Interface::PreparedStatement => "PreparedStatement",
            Interface::ResultSet => "ResultSet",
            Interface::ResultSetMetaData => "ResultSetMetaData",
            Interface::Savepoint => "Savepoint",
            Interface::Statement => "Statement",
        }
    }

    /// The single interface of the family this one extends.
    pub const fn parent(self) -> Option<Interface> {
        match self {
            Interface::CallableStatement => Some(Interface::PreparedStatement),
            Interface::PreparedStatement => Some(Interface::Statement),
            Interface::NClob => Some(Interface::Clob),
            _ => None,
        }
    }

    /// This interface followed by every interface it extends, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = Interface> {
        std::iter::successors(Some(self), |i| i.parent())
    }

    /// True when a value of this interface is also a value of `other`.
    pub fn is_a(self, other: Interface) -> bool {
        self.ancestors().any(|i| i == other)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtypes_are_their_supertypes() {
        assert!(Interface::CallableStatement.is_a(Interface::Statement));
        assert!(Interface::CallableStatement.is_a(Interface::PreparedStatement));
        assert!(Interface::NClob.is_a(Interface::Clob));
        assert!(Interface::Statement.is_a(Interface::Statement));
        assert!(!Interface::Statement.is_a(Interface::PreparedStatement));
        assert!(!Interface::Clob.is_a(Interface::NClob));
        assert!(!Interface::Blob.is_a(Interface::Clob));
    }

    #[test]
    fn ancestors_walk_nearest_first() {
        let chain: Vec<_> = Interface::CallableStatement.ancestors().collect();
        assert_eq!(
            chain,
            vec![
                Interface::CallableStatement,
                Interface::PreparedStatement,
                Interface::Statement
            ]
        );
    }
}
