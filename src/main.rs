// src/main.rs

use anyhow::Result;
use include_locator::commands;

fn main() -> Result<()> {
    commands::run_cli()
}
