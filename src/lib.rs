//! Remapping of symbols used while transforming bytecode: class names, descriptors, field names and method names are
//! translated from one namespace of a mapping table to another.
//!
//! See the [`remapper`] module for the [`Remapper`] trait and its implementation [`MixinRemapper`]. The table it reads
//! from is described by [`MappingTable`], which is implemented for [`mapping_tree::MappingTree`].
//!
//! ```
//! # use anyhow::Result;
//! use java_string::JavaStr;
//! use mapping_tree::MappingTree;
//! use mapping_tree::names::{Names, Namespaces};
//! use symbol_remapper::{MixinRemapper, Remapper};
//!
//! # fn main() -> Result<()> {
//! let mut tree = MappingTree::new(Namespaces::try_from(["intermediary", "named"])?);
//! tree.add_class(Names::from(["class_1", "com/example/Main"]))?;
//! tree.add_method(JavaStr::from_str("class_1"), Names::from(["method_1", "tick"]), "()V".into())?;
//!
//! let remapper = MixinRemapper::from_namespace_names(&tree, "intermediary", "named")?;
//!
//! assert_eq!(remapper.map(JavaStr::from_str("class_1"))?, "com/example/Main");
//! assert_eq!(remapper.map_method_name(JavaStr::from_str("class_1"), JavaStr::from_str("method_1"), JavaStr::from_str("()V"))?, "tick");
//! assert_eq!(remapper.map_method_name(JavaStr::from_str("class_1"), JavaStr::from_str("method_2"), JavaStr::from_str("()V"))?, "method_2");
//! # Ok(())
//! # }
//! ```

pub mod remapper;
pub mod table;

pub use remapper::{MemberRef, MixinRemapper, Remapper};
pub use table::{MappingTable, MemberNames};
