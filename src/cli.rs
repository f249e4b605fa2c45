use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "folio-scenes")]
#[command(about = "Animated portfolio scenes", long_about = None)]
pub struct Cli {
    /// Which scenes to open
    #[arg(long, value_enum, default_value_t = SceneSelection::Both)]
    pub scene: SceneSelection,

    /// Seed for procedural content; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Upper bound for the device pixel ratio
    #[arg(long, default_value_t = 2.0)]
    pub max_pixel_ratio: f64,

    /// Quiet period before window resizes reach the scenes
    #[arg(long, default_value_t = 100)]
    pub debounce_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSelection {
    Hero,
    About,
    Both,
}

impl SceneSelection {
    pub fn hero(self) -> bool {
        matches!(self, SceneSelection::Hero | SceneSelection::Both)
    }

    pub fn about(self) -> bool {
        matches!(self, SceneSelection::About | SceneSelection::Both)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate and send a contact message
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

impl Cli {
    pub fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::default();
        config.renderer.max_pixel_ratio = self.max_pixel_ratio;
        config.resize_debounce = Duration::from_millis(self.debounce_ms);
        config
    }
}
