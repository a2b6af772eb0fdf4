//! An in-memory mapping tree: names of classes, fields and methods in several namespaces.
//!
//! The tree is built with [`MappingTree::add_class`], [`MappingTree::add_field`] and [`MappingTree::add_method`]
//! and afterwards queried by name in any namespace. Reading mapping files is not part of this crate.
//!
//! ```
//! # use anyhow::Result;
//! use java_string::JavaStr;
//! use mapping_tree::MappingTree;
//! use mapping_tree::names::{Names, Namespaces};
//!
//! # fn main() -> Result<()> {
//! let mut tree = MappingTree::new(Namespaces::try_from(["official", "named"])?);
//! tree.add_class(Names::from(["a", "com/example/Foo"]))?;
//! tree.add_method(JavaStr::from_str("a"), Names::from(["b", "run"]), "(La;)V".into())?;
//!
//! let official = tree.get_namespace("official")?;
//! let named = tree.get_namespace("named")?;
//!
//! assert_eq!(tree.map_class_name(JavaStr::from_str("a"), official, named)?, "com/example/Foo");
//! assert_eq!(tree.map_desc(JavaStr::from_str("(La;)V"), official, named)?, "(Lcom/example/Foo;)V");
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod names;
mod tree;

pub use tree::{ClassMapping, MappingTree, MemberMapping};
