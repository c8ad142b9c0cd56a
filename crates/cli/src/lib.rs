pub mod commands;

use clap::{Parser, Subcommand};
use glowcart_core::quiz::QuizVariant;
use std::process::ExitCode;

const LONG_ABOUT: &str =
    "Walk the routine quiz, inspect the product mapping table, and price a recommendation cart.";

const AFTER_HELP: &str = concat!(
    "Examples:\n",
    "  glowcart questions --variant haircare\n",
    "  glowcart recommend --answer 1=Dry --answer 2=\"Barrier Repair/Hydration\"\n",
    "  glowcart cart --pick 1,3,5,0,0\n",
    "  glowcart table --gaps",
);

#[derive(Debug, Parser)]
#[command(
    name = "glowcart",
    about = "Glowcart storefront CLI",
    long_about = LONG_ABOUT,
    after_help = AFTER_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the questions and answer options of a quiz variant")]
    Questions {
        #[arg(long, help = "skincare|haircare|combined (defaults to quiz.default_variant)")]
        variant: Option<QuizVariant>,
    },
    #[command(about = "Run the recommendation engine on raw question tags")]
    Recommend {
        #[arg(long, help = "skincare|haircare|combined (defaults to quiz.default_variant)")]
        variant: Option<QuizVariant>,
        #[arg(
            long = "answer",
            value_name = "ID=TAG",
            value_parser = commands::recommend::parse_answer,
            help = "Answer tag for a question, repeatable"
        )]
        answers: Vec<(u8, String)>,
    },
    #[command(about = "Print the product mapping table or its coverage gaps")]
    Table {
        #[arg(long, help = "List composable keys that resolve to no product")]
        gaps: bool,
    },
    #[command(
        about = "Answer the quiz by option index, fill a cart, and build the checkout payload"
    )]
    Cart {
        #[arg(long, help = "skincare|haircare|combined (defaults to quiz.default_variant)")]
        variant: Option<QuizVariant>,
        #[arg(long, value_delimiter = ',', help = "0-based option index per question, in order")]
        pick: Vec<usize>,
        #[arg(long = "add", value_name = "PRODUCT_ID", help = "Extra catalog product, repeatable")]
        extra: Vec<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Questions { variant } => commands::questions::run(variant),
        Command::Recommend { variant, answers } => commands::recommend::run(variant, &answers),
        Command::Table { gaps } => commands::table::run(gaps),
        Command::Cart { variant, pick, extra } => commands::cart::run(variant, &pick, &extra),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
