use std::path::PathBuf;

use clap::Parser;

use crate::policy::{OnEmpty, Preset};

#[derive(Parser, Debug)]
#[command(
    name = "quizreel",
    version,
    about = "Present a quiz with timed reveals, or export it as a video"
)]
pub struct Cli {
    /// Quiz file (.json or .csv) [default: built-in sample quiz]
    pub path: Option<PathBuf>,

    /// Timing preset
    #[arg(long, value_enum, default_value = "classic")]
    pub preset: Preset,

    /// YAML file overriding preset timing
    #[arg(long, value_name = "file")]
    pub config: Option<PathBuf>,

    /// Countdown length in seconds
    #[arg(long, value_name = "secs")]
    pub timer_secs: Option<u64>,

    /// Delay between option reveals in milliseconds
    #[arg(long, value_name = "ms")]
    pub reveal_ms: Option<u64>,

    /// Show explanations at once instead of typing them
    #[arg(long, conflicts_with = "typed")]
    pub instant: bool,

    /// Type explanations out character by character
    #[arg(long)]
    pub typed: bool,

    /// Length of the "next question" screen in milliseconds (0 disables it)
    #[arg(long, value_name = "ms")]
    pub transition_ms: Option<u64>,

    /// What to do when there are no questions
    #[arg(long, value_enum)]
    pub on_empty: Option<OnEmpty>,

    /// Render the quiz to a .webm, .mp4 or .cast file and exit
    #[arg(long, value_name = "file", conflicts_with = "record")]
    pub export: Option<PathBuf>,

    /// Record the live presentation to a .webm, .mp4 or .cast file
    #[arg(long, value_name = "file")]
    pub record: Option<PathBuf>,

    /// Validate the quiz and print a summary without presenting
    #[arg(long)]
    pub check: bool,

    /// Quiz title shown in the title bar
    #[arg(long, value_name = "text")]
    pub title: Option<String>,

    /// Footer text
    #[arg(long, value_name = "text")]
    pub footer: Option<String>,

    /// Promotion link shown in the side column
    #[arg(long, value_name = "url")]
    pub promo: Option<String>,

    /// Social proof line shown in the side column
    #[arg(long, value_name = "text")]
    pub social_proof: Option<String>,

    /// Remember the branding options for later runs
    #[arg(long)]
    pub save_branding: bool,

    /// Forget saved branding
    #[arg(long, conflicts_with = "save_branding")]
    pub clear_branding: bool,

    /// Write logs to this file
    #[arg(long, value_name = "file")]
    pub log: Option<PathBuf>,
}
