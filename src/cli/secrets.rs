//! Secret commands (list, get, set, rm).

use std::io::Read;
use std::path::Path;

use crate::cli::{output, Context};
use crate::core::domain::WriteOutcome;
use crate::core::patch::{self, Node, TextMode};
use crate::error::{Result, StoreError};

/// List secrets.
pub fn list(ctx: &Context, namespace: Option<&str>, json: bool) -> Result<()> {
    let vault = ctx.open()?;
    let index = vault.list(namespace)?;

    if json {
        let output = serde_json::json!({
            "secrets": index.iter().collect::<Vec<_>>(),
            "count": index.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if index.is_empty() {
        output::dimmed("no secrets found");
    } else {
        output::header(&format!("{} secrets:", index.len()));
        for entry in &index {
            let relative = entry.path().strip_prefix(vault.root()).unwrap_or(entry.path());
            println!(
                "  {}  {}",
                output::name(entry.name()),
                output::faint(&relative.display().to_string())
            );
        }
    }

    Ok(())
}

/// Print a decrypted secret, or one of its fields.
pub fn get(ctx: &Context, name: &str, field: Option<&str>) -> Result<()> {
    let vault = ctx.open()?;
    match field {
        Some(field) => println!("{}", vault.get(name, field)?.as_str()),
        None => print!("{}", vault.read(name)?.as_str()),
    }
    Ok(())
}

/// Create or update a secret.
pub fn set(
    ctx: &Context,
    name: &str,
    value: Option<&str>,
    file: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let (input, mode) = match (value, file) {
        (_, Some(file)) => (read_document(file)?, None),
        (Some("-"), None) => {
            let text = read_stdin()?;
            let mode = patch::classify(&text);
            (Node::str(text), Some(mode))
        }
        (Some(value), None) => (Node::str(value), Some(patch::classify(value))),
        (None, None) => (Node::str(""), Some(TextMode::Plain)),
    };

    let vault = ctx.open()?;

    if dry_run {
        let plan = vault.plan(name, &input)?;
        output::header(if plan.exists {
            "would patch:"
        } else {
            "would create:"
        });
        output::kv("name:", &plan.name);
        output::kv("path:", plan.path.display());
        if let Some(mode) = mode {
            output::kv("input:", mode);
        }
        if plan.operations.is_empty() {
            output::dimmed("no operations");
        }
        for op in &plan.operations {
            output::list_item(&op.to_string());
        }
        return Ok(());
    }

    match vault.write(name, &input)? {
        WriteOutcome::Created { name, path } => {
            output::success(&format!("created {} ({})", output::name(&name), output::path(&path)));
        }
        WriteOutcome::Patched {
            name, operations, ..
        } => {
            output::success(&format!(
                "updated {} ({} field operation(s))",
                output::name(&name),
                operations.len()
            ));
        }
    }
    Ok(())
}

/// Remove a secret.
pub fn rm(ctx: &Context, name: &str) -> Result<()> {
    let vault = ctx.open()?;
    let entry = vault.remove(name)?;
    output::success(&format!("removed {}", output::name(entry.name())));
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    // A single trailing newline is an artifact of `echo` and heredocs
    if text.ends_with('\n') && text.matches('\n').count() == 1 {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

/// Parse a YAML or JSON document into an input tree.
fn read_document(path: &Path) -> Result<Node> {
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(Node::from_json(serde_json::from_str(&contents)?))
    } else {
        Node::from_yaml(serde_yaml::from_str(&contents)?)
    }
}
