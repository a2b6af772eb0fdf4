use std::hash::{Hash, Hasher};
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use java_string::{JavaStr, JavaString};
use log::trace;
use crate::descriptor::{self, DescriptorKind};
use crate::names::{Names, Namespace, Namespaces};

/// An in-memory mapping tree.
///
/// Classes are identified by their name in any namespace, members by their name in any namespace together with the
/// descriptor. Descriptors are only stored in the first namespace, for other namespaces they're derived by mapping
/// the class names in them.
///
/// After building, the tree is only read, so a shared reference to it can be used from many threads at once.
#[derive(Debug, Clone)]
pub struct MappingTree {
	namespaces: Namespaces,
	classes: Vec<ClassMapping>,
	/// For each namespace, the index into `classes` for a given class name.
	class_index: Vec<IndexMap<JavaString, usize>>,
}

#[derive(Debug, Clone)]
pub struct ClassMapping {
	names: Names,
	fields: MemberMappings,
	methods: MemberMappings,
}

/// The fields or the methods of one class.
#[derive(Debug, Clone)]
struct MemberMappings {
	members: Vec<MemberMapping>,
	/// For each namespace, the index into `members` for the name in that namespace together with the descriptor in
	/// the first namespace.
	index: Vec<IndexMap<MemberKey, usize>>,
}

impl MemberMappings {
	fn new(namespaces: usize) -> MemberMappings {
		MemberMappings {
			members: Vec::new(),
			index: (0..namespaces).map(|_| IndexMap::new()).collect(),
		}
	}

	/// `desc` is in the first namespace.
	fn get(&self, name: &JavaStr, desc: &JavaStr, namespace: Namespace) -> Option<&MemberMapping> {
		self.index.get(namespace.id())?
			.get(&MemberKeyRef { name, desc })
			.map(|&id| &self.members[id])
	}

	/// Fails if any name of `member` together with its descriptor is already used by another member in the same
	/// namespace.
	fn insert(&mut self, member: MemberMapping) -> Result<()> {
		for (index, name) in self.index.iter().zip(member.names.names()) {
			if let Some(name) = name {
				if let Some(&existing) = index.get(&MemberKeyRef { name, desc: &member.desc }) {
					bail!("there's already a member with name {name:?} and descriptor {:?}: {:?}", member.desc, self.members[existing]);
				}
			}
		}

		let id = self.members.len();
		for (index, name) in self.index.iter_mut().zip(member.names.names()) {
			if let Some(name) = name {
				index.insert(MemberKey { name: name.clone(), desc: member.desc.clone() }, id);
			}
		}
		self.members.push(member);

		Ok(())
	}
}

/// A field or method, with the descriptor in the first namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMapping {
	desc: JavaString,
	names: Names,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemberKey {
	name: JavaString,
	desc: JavaString,
}

impl Hash for MemberKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		JavaStr::hash(&self.name, state);
		JavaStr::hash(&self.desc, state);
	}
}

/// Borrowed form of [`MemberKey`], used for lookups without allocating.
#[derive(Debug, PartialEq, Eq)]
struct MemberKeyRef<'a> {
	name: &'a JavaStr,
	desc: &'a JavaStr,
}

impl Hash for MemberKeyRef<'_> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
		self.desc.hash(state);
	}
}

impl indexmap::Equivalent<MemberKey> for MemberKeyRef<'_> {
	fn equivalent(&self, key: &MemberKey) -> bool {
		self.name == &*key.name && self.desc == &*key.desc
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MemberKind {
	Field,
	Method,
}

impl MemberKind {
	fn descriptor_kind(self) -> DescriptorKind {
		match self {
			MemberKind::Field => DescriptorKind::Field,
			MemberKind::Method => DescriptorKind::Method,
		}
	}
}

impl ClassMapping {
	pub fn names(&self) -> &Names {
		&self.names
	}

	pub fn get_name(&self, namespace: Namespace) -> Result<Option<&JavaStr>> {
		self.names.get(namespace)
	}

	pub fn fields(&self) -> impl Iterator<Item=&MemberMapping> {
		self.fields.members.iter()
	}

	pub fn methods(&self) -> impl Iterator<Item=&MemberMapping> {
		self.methods.members.iter()
	}

	fn members(&self, kind: MemberKind) -> &MemberMappings {
		match kind {
			MemberKind::Field => &self.fields,
			MemberKind::Method => &self.methods,
		}
	}

	fn members_mut(&mut self, kind: MemberKind) -> &mut MemberMappings {
		match kind {
			MemberKind::Field => &mut self.fields,
			MemberKind::Method => &mut self.methods,
		}
	}
}

impl MemberMapping {
	/// The descriptor, in the first namespace.
	pub fn desc(&self) -> &JavaStr {
		&self.desc
	}

	pub fn names(&self) -> &Names {
		&self.names
	}

	pub fn get_name(&self, namespace: Namespace) -> Result<Option<&JavaStr>> {
		self.names.get(namespace)
	}
}

impl MappingTree {
	pub fn new(namespaces: Namespaces) -> MappingTree {
		let class_index = namespaces.names().iter().map(|_| IndexMap::new()).collect();
		MappingTree {
			namespaces,
			classes: Vec::new(),
			class_index,
		}
	}

	pub fn namespaces(&self) -> &Namespaces {
		&self.namespaces
	}

	pub fn get_namespace(&self, name: &str) -> Result<Namespace> {
		self.namespaces.get_namespace(name)
	}

	pub fn classes(&self) -> impl Iterator<Item=&ClassMapping> {
		self.classes.iter()
	}

	fn check_names(&self, names: &Names) -> Result<()> {
		if names.len() != self.namespaces.len() {
			bail!("expected {} names (for namespaces {:?}), got {names:?}", self.namespaces.len(), self.namespaces);
		}
		names.first_name()?;
		Ok(())
	}

	/// Adds a class. The class must have a name in the first namespace.
	///
	/// Fails if any of the names is already used by another class in the same namespace.
	pub fn add_class(&mut self, names: Names) -> Result<()> {
		self.check_names(&names)?;

		for (index, name) in self.class_index.iter().zip(names.names()) {
			if let Some(name) = name {
				if let Some(&existing) = index.get(&**name) {
					bail!("cannot add class {names:?}, as there's already one with name {name:?}: {:?}", self.classes[existing].names);
				}
			}
		}

		let id = self.classes.len();
		for (index, name) in self.class_index.iter_mut().zip(names.names()) {
			if let Some(name) = name {
				index.insert(name.clone(), id);
			}
		}
		self.classes.push(ClassMapping {
			names,
			fields: MemberMappings::new(self.namespaces.len()),
			methods: MemberMappings::new(self.namespaces.len()),
		});

		Ok(())
	}

	/// Adds a field to the class `owner`. Both `owner` and `desc` are in the first namespace.
	pub fn add_field(&mut self, owner: &JavaStr, names: Names, desc: JavaString) -> Result<()> {
		self.add_member(MemberKind::Field, owner, names, desc)
			.with_context(|| anyhow!("failed to add field to class {owner:?}"))
	}

	/// Adds a method to the class `owner`. Both `owner` and `desc` are in the first namespace.
	pub fn add_method(&mut self, owner: &JavaStr, names: Names, desc: JavaString) -> Result<()> {
		self.add_member(MemberKind::Method, owner, names, desc)
			.with_context(|| anyhow!("failed to add method to class {owner:?}"))
	}

	fn add_member(&mut self, kind: MemberKind, owner: &JavaStr, names: Names, desc: JavaString) -> Result<()> {
		self.check_names(&names)?;

		let found = descriptor::check_desc(&desc)?;
		if found != kind.descriptor_kind() {
			bail!("expected a {:?} descriptor, got {desc:?}", kind.descriptor_kind());
		}

		let &id = self.class_index[0].get(owner)
			.with_context(|| anyhow!("no class {owner:?} in the first namespace"))?;
		self.classes[id].members_mut(kind).insert(MemberMapping { desc, names })
	}

	/// Looks up a class by its name in the given namespace.
	pub fn get_class(&self, name: &JavaStr, namespace: Namespace) -> Result<Option<&ClassMapping>> {
		self.namespaces.check(namespace)?;

		Ok(self.class_index[namespace.id()].get(name).map(|&id| &self.classes[id]))
	}

	/// Looks up a field. The owner, name and descriptor all need to be given in `namespace`.
	pub fn get_field(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Namespace) -> Result<Option<&MemberMapping>> {
		self.get_member(MemberKind::Field, owner, name, desc, namespace)
	}

	/// Looks up a method. The owner, name and descriptor all need to be given in `namespace`.
	pub fn get_method(&self, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Namespace) -> Result<Option<&MemberMapping>> {
		self.get_member(MemberKind::Method, owner, name, desc, namespace)
	}

	fn get_member(&self, kind: MemberKind, owner: &JavaStr, name: &JavaStr, desc: &JavaStr, namespace: Namespace) -> Result<Option<&MemberMapping>> {
		let Some(class) = self.get_class(owner, namespace)? else {
			trace!("no class {owner:?} in namespace {namespace:?} when looking up {kind:?} {name:?} {desc:?}");
			return Ok(None);
		};
		let members = class.members(kind);

		let first = Namespace::new(0);
		if namespace == first {
			descriptor::check_desc(desc)
				.with_context(|| anyhow!("failed to look up {kind:?} {name:?} in class {owner:?}"))?;
			return Ok(members.get(name, desc, first));
		}

		// the index keys use descriptors in the first namespace
		let desc = self.map_desc(desc, namespace, first)?;

		Ok(members.get(name, &desc, namespace))
	}

	/// Maps a class name from one namespace to another.
	///
	/// If there's no class with that name, or it has no name in the namespace `to`, returns the input.
	/// Array class names (starting with `[`) are mapped like descriptors.
	pub fn map_class_name(&self, name: &JavaStr, from: Namespace, to: Namespace) -> Result<JavaString> {
		self.namespaces.check(from)?;
		self.namespaces.check(to)?;

		if name.starts_with('[') {
			// array class names are field descriptors
			return self.map_desc(name, from, to);
		}
		if from == to {
			return Ok(name.to_owned());
		}

		let mapped = match self.get_class(name, from)? {
			Some(class) => class.names.get(to)?,
			None => None,
		};

		Ok(mapped.unwrap_or(name).to_owned())
	}

	/// Maps a field or method descriptor from one namespace to another.
	///
	/// Each class name in the descriptor is mapped with [`MappingTree::map_class_name`]. Fails for malformed
	/// descriptors.
	pub fn map_desc(&self, desc: &JavaStr, from: Namespace, to: Namespace) -> Result<JavaString> {
		self.namespaces.check(from)?;
		self.namespaces.check(to)?;

		descriptor::map_desc(desc, |class| self.map_class_name(class, from, to))
			.with_context(|| anyhow!("failed to map descriptor {desc:?} from namespace {from:?} to {to:?}"))
	}
}
