//! Resolve command.
//!
//! Shows which file a name maps to, and whether it matched by full or
//! short name.

use crate::cli::{output, Context};
use crate::core::resolve::Resolution;
use crate::error::Result;

/// Resolve a name and print the match.
pub fn execute(ctx: &Context, name: &str) -> Result<()> {
    let vault = ctx.open()?;
    let (resolution, index) = vault.lookup(name)?;

    let how = match &resolution {
        Resolution::Exact(_) => "full name",
        Resolution::Short(_) => "short name",
        Resolution::Collision(_) | Resolution::NotFound => "",
    };
    let entry = resolution.into_entry(name, &index)?;

    output::header(entry.name());
    output::kv("path:     ", output::path(entry.path()));
    let namespace = match entry.namespace() {
        "" => "(root)",
        ns => ns,
    };
    output::kv("namespace:", namespace);
    output::kv("matched:  ", how);
    Ok(())
}
