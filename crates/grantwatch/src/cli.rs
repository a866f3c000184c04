use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::Parser;

pub const USAGE: &str = "Usage: grantwatch <plan.json>";

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Report RBAC-relevant changes in a Terraform plan for review"
)]
pub struct Cli {
    #[arg(
        value_name = "PLAN_JSON",
        help = "Terraform plan rendered as JSON (terraform show -json)"
    )]
    pub plan: PathBuf,
}

pub fn parse_cli_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.get(1).is_some_and(|arg| arg == OsStr::new("--")) {
        args.remove(1);
    }

    Cli::try_parse_from(args)
}

/// Help and version requests are the only parse errors clap should report itself.
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
    )
}
