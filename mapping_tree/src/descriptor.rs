//! Structural handling of field and method descriptors.
//!
//! Descriptors are walked according to the [grammar](https://docs.oracle.com/javase/specs/jvms/se22/html/jvms-4.html#jvms-4.3)
//! of the Java Virtual Machine Specification. Every class name found in `L...;` is handed to a closure, everything
//! else is copied over as is.

use std::iter::Peekable;
use anyhow::{anyhow, bail, Context, Result};
use java_string::{Chars, JavaCodePoint, JavaStr, JavaString};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
	Field,
	Method,
}

/// Maps all class names contained in a field or method descriptor.
///
/// Fails if `desc` isn't a valid field or method descriptor, or if `map_class` fails.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use java_string::{JavaStr, JavaString};
/// use mapping_tree::descriptor::map_desc;
///
/// let desc = JavaStr::from_str("(I[Ljava/lang/String;)Lfoo;");
/// let mapped = map_desc(desc, |class| Ok(if class == "foo" { "bar".into() } else { class.to_owned() })).unwrap();
/// assert_eq!(mapped, "(I[Ljava/lang/String;)Lbar;");
/// ```
pub fn map_desc(desc: &JavaStr, map_class: impl FnMut(&JavaStr) -> Result<JavaString>) -> Result<JavaString> {
	walk(desc, map_class).map(|(mapped, _)| mapped)
}

/// Checks that `desc` is a valid descriptor, returning which kind it is.
pub fn check_desc(desc: &JavaStr) -> Result<DescriptorKind> {
	walk(desc, |class| Ok(class.to_owned())).map(|(_, kind)| kind)
}

/// Collects the class names contained in a descriptor, in order of appearance.
pub fn class_names(desc: &JavaStr) -> Result<Vec<JavaString>> {
	let mut names = Vec::new();
	walk(desc, |class| {
		names.push(class.to_owned());
		Ok(class.to_owned())
	})?;
	Ok(names)
}

// The grammar for descriptors is:
//   FieldDescriptor:
//     FieldType
//
//   MethodDescriptor:
//     "(" FieldType* ")" ReturnDescriptor
//
//   ReturnDescriptor:
//     FieldType | "V"
//
//   FieldType:
//     "B" | "C" | "D" | "F" | "I" | "J" | "S" | "Z" |
//     "L" ClassName ";" |
//     "[" FieldType
fn walk(desc: &JavaStr, mut map_class: impl FnMut(&JavaStr) -> Result<JavaString>) -> Result<(JavaString, DescriptorKind)> {
	let mut out = JavaString::with_capacity(desc.len());
	let mut chars = desc.chars().peekable();

	let kind = if chars.next_if_eq(&'(').is_some() {
		out.push('(');
		loop {
			if chars.next_if_eq(&')').is_some() {
				out.push(')');
				break;
			}

			write_field_type(&mut chars, &mut out, &mut map_class)
				.with_context(|| anyhow!("failed to read parameter descriptor of {desc:?}"))?;
		}

		if chars.next_if_eq(&'V').is_some() {
			out.push('V');
		} else {
			write_field_type(&mut chars, &mut out, &mut map_class)
				.with_context(|| anyhow!("failed to read return descriptor of {desc:?}"))?;
		}

		DescriptorKind::Method
	} else {
		write_field_type(&mut chars, &mut out, &mut map_class)
			.with_context(|| anyhow!("failed to read field descriptor {desc:?}"))?;

		DescriptorKind::Field
	};

	if chars.peek().is_some() {
		bail!("expected end of descriptor {desc:?}, got {:?} remaining", JavaString::from_iter(chars));
	}

	Ok((out, kind))
}

fn write_field_type(
	chars: &mut Peekable<Chars>,
	out: &mut JavaString,
	map_class: &mut impl FnMut(&JavaStr) -> Result<JavaString>,
) -> Result<()> {
	const B: JavaCodePoint = JavaCodePoint::from_char('B');
	const C: JavaCodePoint = JavaCodePoint::from_char('C');
	const D: JavaCodePoint = JavaCodePoint::from_char('D');
	const F: JavaCodePoint = JavaCodePoint::from_char('F');
	const I: JavaCodePoint = JavaCodePoint::from_char('I');
	const J: JavaCodePoint = JavaCodePoint::from_char('J');
	const L: JavaCodePoint = JavaCodePoint::from_char('L');
	const S: JavaCodePoint = JavaCodePoint::from_char('S');
	const Z: JavaCodePoint = JavaCodePoint::from_char('Z');

	let mut array_dimension: usize = 0;
	while chars.next_if_eq(&'[').is_some() {
		array_dimension += 1;
		out.push('[');
	}
	if array_dimension > 255 {
		bail!("array dimension {array_dimension} is larger than 255");
	}

	let char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
	match char {
		B | C | D | F | I | J | S | Z => out.push_java(char),
		L => {
			let mut class_name = JavaString::new();

			let mut char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
			while char != ';' {
				if char == '.' || char == '[' {
					bail!("unexpected char {char:?} in class name {class_name:?} in descriptor");
				}
				class_name.push_java(char);

				char = chars.next().ok_or_else(|| anyhow!("unexpected abrupt ending of descriptor"))?;
			}

			if class_name.is_empty() {
				bail!("empty class name in descriptor");
			}

			let new_class_name = map_class(&*class_name)?;

			out.push('L');
			out.push_java_str(&new_class_name);
			out.push(';');
		},
		x => bail!("unexpected char {x:?} in descriptor"),
	}

	Ok(())
}
