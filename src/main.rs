use anyhow::{bail, Result};
use clap::Parser;

use crate::{
    cli::{Cli, Command},
    config::ContactFormConfig,
    contact::{ContactMessage, SubmitOutcome},
};

mod camera;
mod cli;
mod config;
mod contact;
mod frame_loop;
mod math;
mod page;
mod procedural;
mod rendering;
mod resize_debouncer;
mod scene_graph;
mod scenes;
mod signals;
mod viewport;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let scene_config = cli.scene_config();

    match cli.command {
        Some(Command::Contact {
            name,
            email,
            subject,
            message,
        }) => {
            let input = ContactMessage {
                name,
                email,
                subject,
                message,
            };
            if contact::run(input, ContactFormConfig::default())? != SubmitOutcome::Sent {
                bail!("Contact message was not sent");
            }
        }
        None => {
            pollster::block_on(window::run(scene_config, cli.scene, cli.seed))?;
        }
    }

    Ok(())
}
