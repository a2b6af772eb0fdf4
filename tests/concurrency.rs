use std::thread;
use anyhow::{anyhow, Result};
use java_string::{JavaStr, JavaString};
use pretty_assertions::assert_eq;
use mapping_tree::MappingTree;
use mapping_tree::names::{Names, Namespaces};
use symbol_remapper::{MixinRemapper, Remapper};

fn assert_send_sync<T: Send + Sync>(_: &T) {}

fn tree(classes: usize) -> Result<MappingTree> {
	let mut tree = MappingTree::new(Namespaces::try_from(["official", "named"])?);

	for i in 0..classes {
		let class = format!("c{i}");
		tree.add_class(Names::from([class.as_str(), format!("com/example/Class{i}").as_str()]))?;
		tree.add_method(JavaStr::from_str(&class), Names::from([format!("m{i}"), format!("method{i}")]), format!("(Lc{i};)V").into())?;
		tree.add_field(JavaStr::from_str(&class), Names::from([format!("f{i}"), format!("field{i}")]), "I".into())?;
	}

	Ok(tree)
}

/// Maps everything belonging to class `i`.
fn remap_class(remapper: &impl Remapper, i: usize) -> Result<Vec<JavaString>> {
	let class = format!("c{i}");
	let class = JavaStr::from_str(&class);
	let desc = format!("(Lc{i};)V");
	let desc = JavaStr::from_str(&desc);

	Ok(vec![
		remapper.map(class)?,
		remapper.map_method_name(class, JavaStr::from_str(&format!("m{i}")), desc)?,
		remapper.map_method_name(class, JavaStr::from_str(&format!("missing{i}")), desc)?,
		remapper.map_field_name(class, JavaStr::from_str(&format!("f{i}")), JavaStr::from_str("I"))?,
		remapper.map_desc(desc)?,
		remapper.unmap(&remapper.map(class)?)?,
	])
}

#[test]
fn concurrent_calls_match_sequential_ones() -> Result<()> {
	const CLASSES: usize = 64;
	const THREADS: usize = 8;

	let tree = tree(CLASSES)?;
	let remapper = MixinRemapper::from_namespace_names(&tree, "official", "named")?;
	assert_send_sync(&remapper);

	let sequential: Vec<Vec<JavaString>> = (0..CLASSES)
		.map(|i| remap_class(&remapper, i))
		.collect::<Result<_>>()?;

	assert_eq!(sequential[3], vec![
		JavaString::from("com/example/Class3"),
		JavaString::from("method3"),
		JavaString::from("missing3"),
		JavaString::from("field3"),
		JavaString::from("(Lcom/example/Class3;)V"),
		JavaString::from("c3"),
	]);

	let concurrent: Vec<Vec<(usize, Vec<JavaString>)>> = thread::scope(|scope| {
		let handles: Vec<_> = (0..THREADS)
			.map(|offset| {
				let remapper = &remapper;
				scope.spawn(move || {
					(offset..CLASSES).step_by(THREADS)
						.map(|i| remap_class(remapper, i).map(|result| (i, result)))
						.collect::<Result<Vec<_>>>()
				})
			})
			.collect();

		handles.into_iter()
			.map(|handle| handle.join().map_err(|_| anyhow!("remapping thread panicked"))?)
			.collect::<Result<_>>()
	})?;

	let mut count = 0;
	for (i, result) in concurrent.into_iter().flatten() {
		assert_eq!(result, sequential[i], "class {i}");
		count += 1;
	}
	assert_eq!(count, CLASSES);

	Ok(())
}
