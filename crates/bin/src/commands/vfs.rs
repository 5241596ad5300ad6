//! Record storage, query and listing commands.

use precog::Precog;
use serde_json::Value;

use crate::cli::{Format, LsArgs, QueryArgs, StoreArgs};
use crate::output::print_value;

/// Run the `store` command
pub fn store(
    precog: &Precog,
    args: &StoreArgs,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let record: Value = serde_json::from_str(&args.record)
        .map_err(|e| format!("record is not valid JSON: {e}"))?;
    let result = precog.store(&args.path, &record)?;
    print_value(&result, format);
    Ok(())
}

/// Run the `query` command
pub fn query(
    precog: &Precog,
    args: &QueryArgs,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = precog.query(&args.path, &args.query)?;
    print_value(&result, format);
    Ok(())
}

/// Run the `ls` command
pub fn ls(
    precog: &Precog,
    args: &LsArgs,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let children = precog.list_children(&args.path)?;
    print_value(&children, format);
    Ok(())
}
