use clap::Parser;
use precio_luz::recipe::{variant_table, ContainerRecipe, Variant, DEFAULT_MANIFEST};
use precio_luz::utils::logger;

#[derive(Parser)]
#[command(name = "precio-luz-recipe")]
#[command(about = "Render the container build recipe for one of the supported base images")]
struct Args {
    /// Which base image and layout to render
    #[arg(long, value_enum, default_value = "python-slim")]
    variant: Variant,

    /// Dependency manifest path inside the build context
    #[arg(long, default_value = DEFAULT_MANIFEST)]
    manifest: String,

    /// Script run as the default command (variants that embed the app only)
    #[arg(long)]
    script: Option<String>,

    /// Write the Dockerfile here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// List the available variants and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if args.list {
        print!("{}", variant_table()?);
        return Ok(());
    }

    let mut recipe = ContainerRecipe::for_variant(args.variant)?.with_manifest(&args.manifest);
    if let Some(script) = &args.script {
        if recipe.entrypoint().is_none() {
            tracing::warn!("Variant {} has no default command; --script ignored", args.variant);
        }
        recipe = recipe.with_script(script);
    }

    if let Err(e) = recipe.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code().max(1));
    }

    match &args.output {
        Some(path) => {
            recipe.write_to(path)?;
            tracing::info!("📁 Wrote {} recipe to {}", args.variant, path);
        }
        None => print!("{}", recipe.render()),
    }

    Ok(())
}
