//! The mapping table a [`MixinRemapper`][crate::remapper::MixinRemapper] reads from.

use std::fmt::Debug;
use anyhow::Result;
use java_string::{JavaStr, JavaString};
use mapping_tree::{MappingTree, MemberMapping};
use mapping_tree::names::Namespace;

/// A queryable mapping table, holding names of classes, fields and methods in several namespaces.
///
/// Implementations must be total for [`MappingTable::map_class_name`] and [`MappingTable::map_desc`]: a class
/// without a mapping maps to itself. Field and method lookups instead report a missing mapping as `Ok(None)`.
///
/// Errors are reserved for invalid input, like a malformed descriptor or a namespace the table doesn't know.
pub trait MappingTable {
	type Namespace: Copy + Debug;
	type Field: MemberNames<Self::Namespace>;
	type Method: MemberNames<Self::Namespace>;

	/// Looks up a field, with `owner`, `name` and `desc` in `namespace`.
	fn get_field(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Self::Namespace) -> Result<Option<&Self::Field>>;

	/// Looks up a method, with `owner`, `name` and `desc` in `namespace`.
	fn get_method(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Self::Namespace) -> Result<Option<&Self::Method>>;

	fn map_class_name(&self, name: &JavaStr, from: Self::Namespace, to: Self::Namespace) -> Result<JavaString>;

	fn map_desc(&self, desc: &JavaStr, from: Self::Namespace, to: Self::Namespace) -> Result<JavaString>;
}

/// The names of a field or method found in a [`MappingTable`].
pub trait MemberNames<N> {
	/// The name in `namespace`, or `None` if the member has no name there.
	fn get_name(&self, namespace: N) -> Result<Option<&JavaStr>>;
}

impl MemberNames<Namespace> for MemberMapping {
	fn get_name(&self, namespace: Namespace) -> Result<Option<&JavaStr>> {
		MemberMapping::get_name(self, namespace)
	}
}

impl MappingTable for MappingTree {
	type Namespace = Namespace;
	type Field = MemberMapping;
	type Method = MemberMapping;

	fn get_field(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Namespace) -> Result<Option<&MemberMapping>> {
		MappingTree::get_field(self, owner, name, desc, namespace)
	}

	fn get_method(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Namespace) -> Result<Option<&MemberMapping>> {
		MappingTree::get_method(self, owner, name, desc, namespace)
	}

	fn map_class_name(&self, name: &JavaStr, from: Namespace, to: Namespace) -> Result<JavaString> {
		MappingTree::map_class_name(self, name, from, to)
	}

	fn map_desc(&self, desc: &JavaStr, from: Namespace, to: Namespace) -> Result<JavaString> {
		MappingTree::map_desc(self, desc, from, to)
	}
}
