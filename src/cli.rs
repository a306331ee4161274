// cw_seeder/src/cli.rs
// Command Line Interface (CLI) specific logic for cw_seeder.

use clap::Parser;
use url::Url;

use crate::error::{Result, SeederError};

/// Command Line Interface for the cw_seeder utility.
#[derive(Parser, Debug,)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection string for the target document store. Credentials may be
    /// omitted here and supplied via --db-user / --db-password instead.
    #[clap(long, env = "DB_CONNECTION_STRING")]
    pub uri: String,

    /// Database user, injected into the connection string.
    #[clap(long, env = "DB_USER")]
    pub db_user: Option<String,>,

    /// Database password, injected into the connection string.
    #[clap(long, env = "DB_PW", hide_env_values = true)]
    pub db_password: Option<String,>,

    /// Name of the database holding the seeded collections.
    #[clap(long, default_value = crate::DEFAULT_DATABASE_NAME)]
    pub database: String,

    /// URL of the product feed (homogeneous JSON array).
    #[clap(long, default_value = crate::DEFAULT_PRODUCT_FEED_URL)]
    pub products_url: String,

    /// URL of the mixed customer/sales feed (discriminated JSON array).
    #[clap(long, default_value = crate::DEFAULT_CUSTOMER_FEED_URL)]
    pub customers_url: String,

    /// Keep going past records that fail validation and report them at the
    /// end, instead of aborting the run on the first one.
    #[clap(long)]
    pub skip_invalid: bool,
}

/// Inject credentials into a connection URI.
///
/// Username and password must be escaped according to RFC 3986; `Url`'s
/// setters percent-encode them, so raw values pass through here.
pub fn resolve_connection_uri(
    uri: &str,
    user: Option<&str,>,
    password: Option<&str,>,
) -> Result<String,> {
    let mut url = Url::parse(uri,)
        .map_err(|e| SeederError::Configuration(format!("Invalid connection string: {}", e),),)?;

    if let Some(user,) = user {
        url.set_username(user,).map_err(|_| {
            SeederError::Configuration("Connection string cannot carry a username".to_string(),)
        },)?;
    }
    if let Some(password,) = password {
        url.set_password(Some(password,),).map_err(|_| {
            SeederError::Configuration("Connection string cannot carry a password".to_string(),)
        },)?;
    }

    Ok(url.into(),)
}
