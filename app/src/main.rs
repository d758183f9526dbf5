//! User directory entry-point: wires the store, visits routes and prints the
//! rendered views.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use user_directory::inbound::views::CreateUserForm;
use user_directory::{AppContext, AppSettings};

/// `user-directory` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-directory",
    about = "Browse the user directory and optionally add a user",
    version
)]
struct CliArgs {
    /// Paths to visit, in order.
    #[arg(value_name = "path", default_value = "/")]
    paths: Vec<String>,
    /// Name of a user to create after the visits.
    #[arg(long, requires_all = ["email", "role"])]
    name: Option<String>,
    /// Email of the user to create.
    #[arg(long, requires = "name")]
    email: Option<String>,
    /// Role of the user to create: Admin, Editor or Viewer.
    #[arg(long, requires = "name")]
    role: Option<String>,
}

impl CliArgs {
    fn form(&self) -> Option<CreateUserForm> {
        Some(CreateUserForm {
            name: self.name.clone()?,
            email: self.email.clone()?,
            role: self.role.clone()?,
        })
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    // Settings come from the environment and config files only; the command
    // line belongs to `CliArgs`.
    let settings = AppSettings::load_from_iter([OsString::from("user-directory")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    // Store actions interleave only at awaits.
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args, &settings))
}

async fn run(args: CliArgs, settings: &AppSettings) -> Result<()> {
    let app = AppContext::from_settings(settings);
    let mut stdout = io::stdout().lock();

    for path in &args.paths {
        let rendered = app.visit(path).await?;
        writeln!(stdout, "{path}\n{rendered}\n")?;
    }

    if let Some(form) = args.form() {
        app.create_user(form).await?;
        let rendered = app.visit("/").await?;
        writeln!(stdout, "/\n{rendered}")?;
    }
    Ok(())
}
