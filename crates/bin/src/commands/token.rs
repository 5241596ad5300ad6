//! Token management commands.

use precog::{Precog, auth::Token};

use crate::cli::{Format, TokenCreateArgs, TokenDeleteArgs};
use crate::output::print_value;

/// Token described by the `token create` arguments.
pub fn token_from_args(args: &TokenCreateArgs) -> Token {
    let token = if args.readwrite {
        Token::readwrite(args.path.as_str())
    } else {
        Token::readonly(args.path.as_str())
    };
    let token = token.with_grants(args.grants.iter().cloned());
    match args.expires {
        Some(expires) => token.with_expiration(expires),
        None => token,
    }
}

/// Run the `token create` command
pub fn create(
    precog: &Precog,
    args: &TokenCreateArgs,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = token_from_args(args);
    tracing::info!(
        path = %args.path,
        readwrite = args.readwrite,
        grants = token.grants().len(),
        "Creating token"
    );
    let created = precog.create_token(&token)?;
    print_value(&created, format);
    Ok(())
}

/// Run the `token show` command
pub fn show(precog: &Precog, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let info = precog.get_token()?;
    print_value(&info, format);
    Ok(())
}

/// Run the `token delete` command
pub fn delete(
    precog: &Precog,
    args: &TokenDeleteArgs,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(id = %args.id, "Deleting token");
    let result = precog.delete_token(&args.id)?;
    print_value(&result, format);
    Ok(())
}
