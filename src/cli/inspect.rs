//! Inspect command handler: print the structural outline of one artifact.

use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::config::InspectConfig;
use crate::model::{MemberAccess, Value};
use crate::pipeline::{exit_codes, load_artifact, Artifact};

/// How many sequence elements the outline expands before eliding the rest.
const MAX_OUTLINE_ITEMS: usize = 10;

/// Run the inspect command, returning the desired exit code.
pub fn run_inspect(config: InspectConfig) -> Result<i32> {
    let artifact = load_artifact(&config.path)
        .with_context(|| format!("inspecting {}", config.path.display()))?;

    let mut out = String::new();
    match artifact {
        Artifact::Model(value) => {
            outline(&mut out, &value, 0, config.depth)?;
        }
        Artifact::Archive(entries) => {
            writeln!(out, "BND4 archive with {} entries:", entries.len())?;
            for entry in &entries {
                writeln!(
                    out,
                    "  [{}] {} ({} bytes)",
                    entry.id,
                    entry.name,
                    entry.bytes.len()
                )?;
            }
        }
    }
    print!("{out}");
    Ok(exit_codes::SUCCESS)
}

/// Depth-limited tree rendering of a value graph.
fn outline(out: &mut String, value: &Value, indent: usize, remaining: usize) -> Result<()> {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(obj) => {
            writeln!(out, "{pad}{}", obj.type_name())?;
            if remaining == 0 {
                return Ok(());
            }
            for (name, access) in obj.members() {
                match access {
                    MemberAccess::Readable(cell) => {
                        let member = cell.borrow();
                        match &*member {
                            Value::Object(_) | Value::Sequence(_) => {
                                writeln!(out, "{pad}  {name}:")?;
                                outline(out, &member, indent + 2, remaining - 1)?;
                            }
                            other => writeln!(out, "{pad}  {name}: {other}")?,
                        }
                    }
                    other => writeln!(out, "{pad}  {name}: <{other:?}>")?,
                }
            }
        }
        Value::Sequence(items) => {
            writeln!(out, "{pad}Sequence[{}]", items.len())?;
            if remaining == 0 {
                return Ok(());
            }
            for (i, item) in items.iter().take(MAX_OUTLINE_ITEMS).enumerate() {
                writeln!(out, "{pad}  [{i}]:")?;
                outline(out, item, indent + 2, remaining - 1)?;
            }
            if items.len() > MAX_OUTLINE_ITEMS {
                writeln!(out, "{pad}  … (+{} more)", items.len() - MAX_OUTLINE_ITEMS)?;
            }
        }
        other => writeln!(out, "{pad}{other}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Object;

    #[test]
    fn test_outline_shape() {
        let bone = Object::builder("Bone").property("Name", "Spine").build();
        let root = Object::builder("Flver")
            .property("Bones", Value::Sequence(vec![Value::Object(bone)]))
            .build();

        let mut out = String::new();
        outline(&mut out, &Value::Object(root), 0, 4).expect("outline");

        assert!(out.starts_with("Flver\n"));
        assert!(out.contains("Bones:"));
        assert!(out.contains("Sequence[1]"));
        assert!(out.contains("Name: Spine"));
    }

    #[test]
    fn test_outline_respects_depth_limit() {
        let inner = Object::builder("Inner").property("x", 1i64).build();
        let root = Object::builder("Outer")
            .property("Child", inner)
            .build();

        let mut out = String::new();
        outline(&mut out, &Value::Object(root), 0, 0).expect("outline");
        // Depth 0: the root type only, no members.
        assert_eq!(out, "Outer\n");
    }
}
