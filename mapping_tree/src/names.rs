use std::fmt::{Debug, Formatter};
use anyhow::{bail, Context, Error, Result};
use java_string::{JavaStr, JavaString};

/// Describes a given namespace of a mapping tree.
///
/// This is only an index. Creating one never fails, instead every lookup of a [`MappingTree`][crate::MappingTree]
/// checks that the namespace is in range and returns an error otherwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(usize);

impl Namespace {
	pub const fn new(id: usize) -> Namespace {
		Namespace(id)
	}

	pub const fn id(self) -> usize {
		self.0
	}
}

impl From<usize> for Namespace {
	fn from(value: usize) -> Self {
		Namespace(value)
	}
}

/// A struct storing the names of the namespaces.
#[derive(Clone, PartialEq)]
pub struct Namespaces {
	names: Vec<String>,
}

impl Namespaces {
	pub fn names(&self) -> &[String] {
		&self.names
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Returns the name of the given namespace.
	pub fn get(&self, namespace: Namespace) -> Result<&str> {
		self.names.get(namespace.0)
			.map(String::as_str)
			.with_context(|| format!("namespace {namespace:?} is out of range for namespaces {self:?}"))
	}

	pub fn get_namespace(&self, name: &str) -> Result<Namespace> {
		for (id, namespace) in self.names.iter().enumerate() {
			if namespace == name {
				return Ok(Namespace(id));
			}
		}
		bail!("cannot find namespace with name {name:?}, only got {self:?}");
	}

	/// Returns an error if `namespace` doesn't describe one of these namespaces.
	pub(crate) fn check(&self, namespace: Namespace) -> Result<()> {
		if namespace.0 >= self.names.len() {
			bail!("namespace {namespace:?} is out of range for namespaces {self:?}");
		}
		Ok(())
	}

	/// Returns an error if the names of `self` aren't the names given in the argument.
	pub fn check_that(&self, names: &[&str]) -> Result<()> {
		if self.names != names {
			bail!("expected namespaces {names:?}, got {self:?}");
		}
		Ok(())
	}
}

impl Debug for Namespaces {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(&self.names)
			.finish()
	}
}

impl TryFrom<Vec<String>> for Namespaces {
	type Error = Error;

	fn try_from(value: Vec<String>) -> Result<Self> {
		if value.len() < 2 {
			bail!("need at least two namespaces, got {value:?}");
		}
		if value.iter().any(|i| i.is_empty()) {
			bail!("found empty namespace name in {value:?}, every namespace name must be non-empty");
		}
		for (i, name) in value.iter().enumerate() {
			if value[..i].contains(name) {
				bail!("found duplicate namespace name {name:?} in {value:?}");
			}
		}

		Ok(Namespaces { names: value })
	}
}

impl<const N: usize> TryFrom<[&str; N]> for Namespaces {
	type Error = Error;

	fn try_from(value: [&str; N]) -> Result<Self> {
		Namespaces::try_from(Vec::from(value.map(String::from)))
	}
}

/// The names of one class, field or method, one slot per namespace.
///
/// A slot being `None` means there's no name in that namespace.
#[derive(Clone, PartialEq, Eq)]
pub struct Names {
	names: Vec<Option<JavaString>>,
}

impl Names {
	pub fn names(&self) -> &[Option<JavaString>] {
		&self.names
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Gets the name in the given namespace, if there is one.
	///
	/// Fails if the namespace is out of range.
	pub fn get(&self, namespace: Namespace) -> Result<Option<&JavaStr>> {
		self.names.get(namespace.0)
			.map(|name| name.as_deref())
			.with_context(|| format!("namespace {namespace:?} is out of range for names {self:?}"))
	}

	pub(crate) fn first_name(&self) -> Result<&JavaStr> {
		self.names.first()
			.context("no namespaces at all, can't get name in first namespace")?
			.as_deref()
			.with_context(|| format!("no name for the first namespace: {self:?}"))
	}
}

impl Debug for Names {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(&self.names)
			.finish()
	}
}

/// Note that empty inputs are converted into `None`.
impl<S: AsRef<str>, const N: usize> From<[S; N]> for Names {
	fn from(value: [S; N]) -> Self {
		let names = value.iter()
			.map(|x| x.as_ref())
			.map(|x| if x.is_empty() { None } else { Some(JavaString::from(x)) })
			.collect();

		Names { names }
	}
}

impl TryFrom<Vec<Option<JavaString>>> for Names {
	type Error = Error;

	fn try_from(value: Vec<Option<JavaString>>) -> Result<Self> {
		if value.iter().any(|i| i.as_ref().is_some_and(|i| i.is_empty())) {
			bail!("cannot create names where an existing name is an empty string: {value:?}");
		}

		Ok(Names { names: value })
	}
}

impl From<Names> for Vec<Option<JavaString>> {
	fn from(value: Names) -> Self {
		value.names
	}
}

#[cfg(test)]
mod testing {
	use anyhow::Result;
	use java_string::{JavaStr, JavaString};
	use pretty_assertions::assert_eq;
	use crate::names::{Names, Namespace, Namespaces};

	#[test]
	fn namespaces() -> Result<()> {
		let namespaces = Namespaces::try_from(["official", "intermediary", "named"])?;

		assert_eq!(namespaces.get_namespace("intermediary")?, Namespace::new(1));
		assert!(namespaces.get_namespace("mojmap").is_err());
		assert_eq!(namespaces.get(Namespace::new(2))?, "named");
		assert!(namespaces.get(Namespace::new(3)).is_err());
		namespaces.check_that(&["official", "intermediary", "named"])?;
		assert!(namespaces.check_that(&["official", "named"]).is_err());

		Ok(())
	}

	#[test]
	fn namespaces_invalid() {
		assert!(Namespaces::try_from(["official"]).is_err());
		assert!(Namespaces::try_from(["official", ""]).is_err());
		assert!(Namespaces::try_from(["official", "named", "official"]).is_err());
	}

	#[test]
	fn names_empty_is_none() -> Result<()> {
		let names = Names::from(["a", "", "c"]);

		assert_eq!(names.get(Namespace::new(0))?, Some(JavaStr::from_str("a")));
		assert_eq!(names.get(Namespace::new(1))?, None);
		assert_eq!(names.get(Namespace::new(2))?, Some(JavaStr::from_str("c")));
		assert!(names.get(Namespace::new(3)).is_err());
		assert_eq!(names.first_name()?, "a");

		assert!(Names::from(["", "b"]).first_name().is_err());
		assert!(Names::try_from(vec![Some(JavaString::from("a")), Some(JavaString::new())]).is_err());

		Ok(())
	}
}
