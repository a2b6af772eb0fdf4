//! Remapping of class names, descriptors, field names and method names between two namespaces.
//!
//! A bytecode transformer only sees the [`Remapper`] trait. The implementation provided here is [`MixinRemapper`],
//! which reads from any [`MappingTable`].
//!
//! # Missing mappings
//! A field or method without a mapping keeps its name: members that are never renamed (synthetic ones, or ones
//! inherited from outside the mappings) have the same name in every namespace. This is not an error.
//!
//! Class names and descriptors never "miss": the table itself returns classes without a mapping unchanged.
//!
//! # Direction
//! [`Remapper::map`] and [`Remapper::unmap`] (and the descriptor variants) just ask the table in the two directions.
//! They're only inverse to each other if the table maps that class one to one.

use anyhow::Result;
use java_string::{JavaStr, JavaString};
use log::{debug, trace};
use mapping_tree::MappingTree;
use crate::table::{MappingTable, MemberNames};

/// A remapper for class names, descriptors, field names and method names.
///
/// Member arguments (owner, name and descriptor) are always given in the namespace mapped *from*.
pub trait Remapper {
	/// Maps a method name. If there's no mapping for the method, returns `name`.
	fn map_method_name(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr) -> Result<JavaString>;

	/// Maps a field name. If there's no mapping for the field, returns `name`.
	fn map_field_name(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr) -> Result<JavaString>;

	/// Maps a class name.
	fn map(&self, type_name: &JavaStr) -> Result<JavaString>;

	/// Maps a class name in the opposite direction of [`Remapper::map`].
	fn unmap(&self, type_name: &JavaStr) -> Result<JavaString>;

	/// Maps all class names in a field or method descriptor.
	fn map_desc(&self, desc: &JavaStr) -> Result<JavaString>;

	/// Maps all class names in a field or method descriptor, in the opposite direction of [`Remapper::map_desc`].
	fn unmap_desc(&self, desc: &JavaStr) -> Result<JavaString>;

	/// Maps a reference to a method, taking care of the owner and descriptor as well.
	///
	/// Do not implement this yourself.
	fn map_method_ref(&self, method_ref: &MemberRef) -> Result<MemberRef> {
		Ok(MemberRef {
			name: self.map_method_name(&method_ref.owner, &method_ref.name, &method_ref.desc)?,
			owner: self.map(&method_ref.owner)?,
			desc: self.map_desc(&method_ref.desc)?,
		})
	}

	/// Maps a reference to a field, taking care of the owner and descriptor as well.
	///
	/// Do not implement this yourself.
	fn map_field_ref(&self, field_ref: &MemberRef) -> Result<MemberRef> {
		Ok(MemberRef {
			name: self.map_field_name(&field_ref.owner, &field_ref.name, &field_ref.desc)?,
			owner: self.map(&field_ref.owner)?,
			desc: self.map_desc(&field_ref.desc)?,
		})
	}
}

/// A reference to a field or a method: the class declaring it, its name and its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberRef {
	pub owner: JavaString,
	pub name: JavaString,
	pub desc: JavaString,
}

impl MemberRef {
	pub fn new(owner: impl Into<JavaString>, name: impl Into<JavaString>, desc: impl Into<JavaString>) -> MemberRef {
		MemberRef {
			owner: owner.into(),
			name: name.into(),
			desc: desc.into(),
		}
	}
}

/// A [`Remapper`] reading from a [`MappingTable`], mapping from one namespace to another.
///
/// Holds nothing but a reference to the table and the two namespaces, so it can be shared between threads as
/// long as the table can.
#[derive(Debug)]
pub struct MixinRemapper<'a, T: MappingTable> {
	mappings: &'a T,
	from: T::Namespace,
	to: T::Namespace,
}

impl<T: MappingTable> Clone for MixinRemapper<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: MappingTable> Copy for MixinRemapper<'_, T> {}

impl<'a, T: MappingTable> MixinRemapper<'a, T> {
	/// Creates a remapper from namespace `from` to namespace `to`.
	///
	/// The namespaces are not checked here, using ones the table doesn't know fails on the first lookup.
	pub fn new(mappings: &'a T, from: T::Namespace, to: T::Namespace) -> MixinRemapper<'a, T> {
		debug!("creating remapper from namespace {from:?} to namespace {to:?}");
		MixinRemapper { mappings, from, to }
	}

	/// Returns a remapper for the opposite direction, over the same table.
	pub fn reversed(&self) -> MixinRemapper<'a, T> {
		MixinRemapper::new(self.mappings, self.to, self.from)
	}

	/// The table this remapper looks names up in.
	pub fn mappings(&self) -> &'a T {
		self.mappings
	}

	/// The namespace names are mapped from.
	pub fn from(&self) -> T::Namespace {
		self.from
	}

	/// The namespace names are mapped to.
	pub fn to(&self) -> T::Namespace {
		self.to
	}

	fn member_name<M>(&self, member: Option<&M>, owner: &JavaStr, name: &JavaStr, desc: &JavaStr) -> Result<JavaString>
	where
		M: MemberNames<T::Namespace>,
	{
		let Some(member) = member else {
			trace!("no mapping for {owner:?} {name:?} {desc:?} in namespace {:?}, keeping the name", self.from);
			return Ok(name.to_owned());
		};

		match member.get_name(self.to)? {
			Some(mapped) => Ok(mapped.to_owned()),
			None => {
				trace!("{owner:?} {name:?} {desc:?} has no name in namespace {:?}, keeping the name", self.to);
				Ok(name.to_owned())
			},
		}
	}
}

impl<'a> MixinRemapper<'a, MappingTree> {
	/// Creates a remapper between the namespaces with the given names.
	pub fn from_namespace_names(mappings: &'a MappingTree, from: &str, to: &str) -> Result<MixinRemapper<'a, MappingTree>> {
		let from = mappings.get_namespace(from)?;
		let to = mappings.get_namespace(to)?;
		Ok(MixinRemapper::new(mappings, from, to))
	}
}

impl<T: MappingTable> Remapper for MixinRemapper<'_, T> {
	fn map_method_name(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr) -> Result<JavaString> {
		let method = self.mappings.get_method(owner, name, desc, self.from)?;
		self.member_name(method, owner, name, desc)
	}

	fn map_field_name(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr) -> Result<JavaString> {
		let field = self.mappings.get_field(owner, name, desc, self.from)?;
		self.member_name(field, owner, name, desc)
	}

	fn map(&self, type_name: &JavaStr) -> Result<JavaString> {
		self.mappings.map_class_name(type_name, self.from, self.to)
	}

	fn unmap(&self, type_name: &JavaStr) -> Result<JavaString> {
		self.mappings.map_class_name(type_name, self.to, self.from)
	}

	fn map_desc(&self, desc: &JavaStr) -> Result<JavaString> {
		self.mappings.map_desc(desc, self.from, self.to)
	}

	fn unmap_desc(&self, desc: &JavaStr) -> Result<JavaString> {
		self.mappings.map_desc(desc, self.to, self.from)
	}
}
