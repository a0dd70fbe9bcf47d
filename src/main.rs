use anyhow::Result;
use clap::Parser;
use log::info;

use tinge::backends::{JsonBackend, PrettyBackend, ThemeBackend};
use tinge::cli::Args;
use tinge::pipeline::extract::extract_prominent_colors;
use tinge::theme::build_theme;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let colors = extract_prominent_colors(&args.image, usize::from(args.num_colors))?;
    let theme = build_theme(&colors, &args.theme_config())?;

    let backend: Box<dyn ThemeBackend> = if args.pretty && !args.json {
        Box::new(PrettyBackend)
    } else {
        Box::new(JsonBackend {
            indent: args.pretty,
        })
    };

    match &args.output {
        Some(path) => {
            backend.write_to(&theme, path)?;
            info!("wrote {} theme to {}", backend.name(), path.display());
        }
        None => println!("{}", backend.serialize(&theme)?.trim_end()),
    }

    Ok(())
}
