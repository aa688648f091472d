//! Fragment type naming.
//!
//! A hyper-relationship fragment is a binary edge whose type name is
//! `base + SEPARATOR + role`. The separator is part of the persisted format:
//! changing it makes every stored hyper-relationship undecodable.

/// Reserved infix between a base type name and a role name.
///
/// Persisted-format constant (format version 1). Edge type names and role
/// names may not contain it.
pub const SEPARATOR: &str = "/#/";

/// Build the substrate type name of a fragment.
pub fn fragment_type_name(base: &str, role: &str) -> String {
    let mut name = String::with_capacity(base.len() + SEPARATOR.len() + role.len());
    name.push_str(base);
    name.push_str(SEPARATOR);
    name.push_str(role);
    name
}

/// The prefix shared by every fragment of a base type.
pub fn fragment_prefix(base: &str) -> String {
    let mut prefix = String::with_capacity(base.len() + SEPARATOR.len());
    prefix.push_str(base);
    prefix.push_str(SEPARATOR);
    prefix
}

/// Check whether a name contains the reserved separator.
pub fn contains_separator(name: &str) -> bool {
    name.contains(SEPARATOR)
}

/// A parsed fragment type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentName<'a> {
    /// Base hyper type name.
    pub base: &'a str,
    /// Role the target vertex plays.
    pub role: &'a str,
}

/// Classification of a substrate edge type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName<'a> {
    /// No separator: the edge is itself the relationship.
    Plain(&'a str),
    /// Exactly one separator with a non-empty base and role.
    Fragment(FragmentName<'a>),
    /// Contains the separator but does not split into a base/role pair.
    Malformed(&'a str),
}

impl<'a> TypeName<'a> {
    /// Classify a substrate type name.
    pub fn parse(name: &'a str) -> Self {
        match name.split_once(SEPARATOR) {
            None => TypeName::Plain(name),
            Some((base, role))
                if !base.is_empty() && !role.is_empty() && !role.contains(SEPARATOR) =>
            {
                TypeName::Fragment(FragmentName { base, role })
            }
            Some(_) => TypeName::Malformed(name),
        }
    }

    /// Returns true if the name carries the separator at all.
    pub fn is_encoded(&self) -> bool {
        !matches!(self, TypeName::Plain(_))
    }
}
