//! Namespace-qualified identifiers for cataloged entities.

use serde::{Deserialize, Serialize};

/// An ordered sequence of name levels qualifying an entity.
///
/// A model lives under `metalake.catalog.schema`, a catalog under
/// `metalake`, a metalake under the empty namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    /// Creates a namespace from an ordered list of levels.
    pub fn of<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(levels.into_iter().map(Into::into).collect())
    }

    /// The empty namespace, used for top-level entities such as metalakes.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Returns the name levels in order.
    pub fn levels(&self) -> &[String] {
        &self.0
    }

    /// Returns true if this namespace has no levels.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first level, if any. For entities inside a metalake
    /// this is the metalake name.
    pub fn metalake(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Returns a child namespace with one more level appended.
    pub fn child(&self, level: impl Into<String>) -> Self {
        let mut levels = self.0.clone();
        levels.push(level.into());
        Self(levels)
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A fully qualified, stable reference to one cataloged entity.
///
/// Equality and hashing are structural over the namespace and name, so
/// identifiers can key maps and be compared across crates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameIdentifier {
    namespace: Namespace,
    name: String,
}

impl NameIdentifier {
    /// Creates an identifier from a namespace and a name.
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Identifier of a metalake.
    pub fn of_metalake(metalake: impl Into<String>) -> Self {
        Self::new(Namespace::empty(), metalake)
    }

    /// Identifier of the catalog root itself.
    ///
    /// Used as the target of operations with no containing entity, such
    /// as listing metalakes. The name is a reserved marker so the root
    /// stays distinguishable in listener and log output.
    pub fn root() -> Self {
        Self::new(Namespace::empty(), "(root)")
    }

    /// Identifier of a catalog within a metalake.
    pub fn of_catalog(metalake: impl Into<String>, catalog: impl Into<String>) -> Self {
        Self::new(Namespace::of([metalake.into()]), catalog)
    }

    /// Identifier of a schema within a catalog.
    pub fn of_schema(
        metalake: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Self::new(Namespace::of([metalake.into(), catalog.into()]), schema)
    }

    /// Identifier of a table within a schema.
    pub fn of_table(
        metalake: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self::new(
            Namespace::of([metalake.into(), catalog.into(), schema.into()]),
            table,
        )
    }

    /// Identifier of a model within a schema.
    pub fn of_model(
        metalake: impl Into<String>,
        catalog: impl Into<String>,
        schema: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::new(
            Namespace::of([metalake.into(), catalog.into(), schema.into()]),
            model,
        )
    }

    /// Identifier of a group within a metalake.
    pub fn of_group(metalake: impl Into<String>, group: impl Into<String>) -> Self {
        Self::new(Namespace::of([metalake.into()]), group)
    }

    /// Returns the namespace qualifying this identifier.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the unqualified entity name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a new identifier with the same namespace and a different
    /// name. Used when a rename change is applied.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(self.namespace.clone(), name)
    }
}

impl std::fmt::Display for NameIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_display_joins_levels() {
        let ns = Namespace::of(["lake", "cat", "sch"]);
        assert_eq!(ns.to_string(), "lake.cat.sch");
        assert_eq!(Namespace::empty().to_string(), "");
    }

    #[test]
    fn identifier_display_is_fully_qualified() {
        let ident = NameIdentifier::of_model("lake", "cat", "sch", "m1");
        assert_eq!(ident.to_string(), "lake.cat.sch.m1");

        let ident = NameIdentifier::of_metalake("lake");
        assert_eq!(ident.to_string(), "lake");
    }

    #[test]
    fn identifier_equality_is_structural() {
        let a = NameIdentifier::of_model("lake", "cat", "sch", "m1");
        let b = NameIdentifier::of_model("lake", "cat", "sch", "m1");
        let c = NameIdentifier::of_model("lake", "cat", "sch", "m2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn root_identifier_has_a_visible_name() {
        let root = NameIdentifier::root();
        assert!(root.namespace().is_empty());
        assert_eq!(root.name(), "(root)");
        assert_eq!(root.to_string(), "(root)");
    }

    #[test]
    fn with_name_keeps_namespace() {
        let ident = NameIdentifier::of_table("lake", "cat", "sch", "t1");
        let renamed = ident.with_name("t2");
        assert_eq!(renamed.namespace(), ident.namespace());
        assert_eq!(renamed.name(), "t2");
    }

    #[test]
    fn namespace_metalake_level() {
        let ns = Namespace::of(["lake", "cat"]);
        assert_eq!(ns.metalake(), Some("lake"));
        assert_eq!(Namespace::empty().metalake(), None);
    }

    #[test]
    fn identifier_serialization_roundtrip() {
        let ident = NameIdentifier::of_group("lake", "admins");
        let json = serde_json::to_string(&ident).unwrap();
        let back: NameIdentifier = serde_json::from_str(&json).unwrap();
        assert_eq!(ident, back);
    }
}
