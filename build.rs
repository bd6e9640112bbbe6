//! Renders the `pushwire(1)` manual page from the CLI definition.
//!
//! The page lands in `target/generated-man` unless `PUSHWIRE_MAN_DIR` names
//! another directory, which lets packagers write it straight into a staging
//! tree.

use std::{env, fs, path::PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

const MAN_DIR_VAR: &str = "PUSHWIRE_MAN_DIR";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-env-changed={MAN_DIR_VAR}");

    let out_dir = env::var_os(MAN_DIR_VAR)
        .map_or_else(|| PathBuf::from("target/generated-man"), PathBuf::from);
    fs::create_dir_all(&out_dir)?;

    let cmd = cli::Cli::command();
    let name = cmd.get_name().to_owned();
    let mut page = Vec::new();
    Man::new(cmd).section("1").render(&mut page)?;
    fs::write(out_dir.join(format!("{name}.1")), page)?;

    Ok(())
}
