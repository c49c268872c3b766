//! Type-identity keys for property tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity a property table belongs to.
///
/// A scope is a qualified name split into segments. `com.foo.Bar` and
/// `com::foo::Bar` name the same scope; the last segment is the simple name
/// and the others form the namespace the properties resource lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    /// Create a scope from a `.` or `::` separated name.
    ///
    /// Generic arguments (`Foo<Bar>`) and reference or pointer prefixes are
    /// dropped, so every instantiation of a generic type shares one scope.
    pub fn new(name: &str) -> Self {
        let mut name = name.trim();
        loop {
            let stripped = ["&mut ", "&", "*const ", "*mut ", "dyn "]
                .iter()
                .find_map(|prefix| name.strip_prefix(prefix));
            match stripped {
                Some(rest) => name = rest.trim_start(),
                None => break,
            }
        }
        if let Some(generic_start) = name.find('<') {
            name = &name[..generic_start];
        }

        let segments = name
            .split("::")
            .flat_map(|part| part.split('.'))
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();

        Self { segments }
    }

    /// Scope of a Rust type.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Scope of a value's type.
    pub fn of_val<T: ?Sized>(_value: &T) -> Self {
        Self::of::<T>()
    }

    /// Last segment of the name.
    pub fn simple_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// Segments before the simple name.
    pub fn namespace(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, namespace)) => namespace,
            None => &[],
        }
    }

    pub fn qualified_name(&self) -> String {
        self.segments.join("::")
    }

    /// Resource path of this scope's table: `<namespace>/<SimpleName><suffix>`.
    pub fn resource_path(&self, suffix: &str) -> String {
        let file_name = format!("{}{}", self.simple_name(), suffix);
        let namespace = self.namespace();
        if namespace.is_empty() {
            file_name
        } else {
            format!("{}/{}", namespace.join("/"), file_name)
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

impl From<&str> for Scope {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
