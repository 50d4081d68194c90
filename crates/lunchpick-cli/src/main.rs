use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod context;
mod enrich;
mod interactive;
mod render;

#[derive(Debug, Parser)]
#[command(name = "lunchpick")]
#[command(about = "Suggests a lunch spot from a shared list, rotating through it day by day")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show suggestions and read commands from stdin (the default)
    Interactive,
    /// Print a single suggestion and exit
    Pick {
        /// Skip the place-details lookup
        #[arg(long)]
        no_details: bool,
    },
    /// Print every place on the list
    List,
    /// Print the accent gradient for a place name
    Accent {
        /// Place name, exactly as it appears on the list
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Pure; needs no configuration.
        Some(Commands::Accent { name }) => {
            init_tracing("warn")?;
            render::print_accent(&name);
            Ok(())
        }
        command => run_configured(command).await,
    }
}

async fn run_configured(command: Option<Commands>) -> anyhow::Result<()> {
    let config = lunchpick_core::load_app_config()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");
    tracing::info!(env = %config.env, "lunchpick starting");

    let mut ctx = context::Context::new(config)?;

    match command {
        Some(Commands::Pick { no_details }) => run_pick(&mut ctx, no_details).await,
        Some(Commands::List) => run_list(&mut ctx).await,
        Some(Commands::Interactive | Commands::Accent { .. }) | None => {
            interactive::run(&mut ctx).await
        }
    }
}

/// Logs go to stderr; stdout is reserved for the picker itself.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run_pick(ctx: &mut context::Context, no_details: bool) -> anyhow::Result<()> {
    ctx.reload().await?;

    let mut rng = context::new_rng();
    let suggestion = ctx
        .session
        .suggest(lunchpick_core::DateKey::today(), &mut rng)?;
    print!("{}", render::suggestion_card(&suggestion));

    if let Some(record) = &suggestion.cached {
        print!("{}", render::details(record, ctx.places.as_deref()));
        return Ok(());
    }

    if no_details {
        return Ok(());
    }
    let Some(client) = ctx.places.clone() else {
        return Ok(());
    };

    let record = enrich::lookup_record(&client, &suggestion.place).await;
    if let Some(record) = ctx.session.apply_enrichment(
        suggestion.ticket,
        suggestion.place.lookup_id(),
        record,
    ) {
        print!("{}", render::details(record, Some(&client)));
    }
    Ok(())
}

async fn run_list(ctx: &mut context::Context) -> anyhow::Result<()> {
    ctx.reload().await?;
    print!(
        "{}",
        render::place_list(&ctx.session, ctx.config.sheet_edit_url.as_deref())
    );
    Ok(())
}
