//! The interactive picker loop.
//!
//! Commands are read line by line from stdin while place-details lookups
//! resolve in the background. A lookup that finishes after the user has
//! moved on is cached but not shown.

use lunchpick_core::{CoreError, DateKey, Suggestion};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::context::{new_rng, Context};
use crate::enrich::{spawn_lookup, Enriched};
use crate::render;

/// One keyboard command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Key {
    NotToday,
    NeverAgain,
    Hide,
    Pick,
    List,
    Reload,
    Help,
    Quit,
}

impl Key {
    /// Parse a typed line. Blank input is `None`; anything unrecognized is
    /// `Some(Err(..))` carrying the trimmed input.
    pub(crate) fn parse(line: &str) -> Option<Result<Self, String>> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }
        let key = match word.to_ascii_lowercase().as_str() {
            "n" | "not today" => Self::NotToday,
            "x" | "never" => Self::NeverAgain,
            "h" | "hide" => Self::Hide,
            "p" | "pick" => Self::Pick,
            "l" | "list" => Self::List,
            "r" | "reload" => Self::Reload,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Some(Err(word.to_string())),
        };
        Some(Ok(key))
    }
}

const HELP: &str = "  [n] not today  [x] never again  [h] hide  [p] pick  [l] list  [r] reload  [q] quit";

/// Run until `q` or end of input.
///
/// # Errors
///
/// Returns an error only if stdin cannot be read.
pub(crate) async fn run(ctx: &mut Context) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Enriched>(16);
    let mut rng = new_rng();

    match ctx.reload().await {
        Ok(_) => {
            let first = ctx.session.suggest(DateKey::today(), &mut rng);
            show(ctx, first, &tx);
        }
        Err(e) => print!("{}", render::load_failure(&e)),
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let key = match Key::parse(&line) {
                    None => continue,
                    Some(Ok(key)) => key,
                    Some(Err(word)) => {
                        println!("  unknown command {word:?}");
                        println!("{HELP}");
                        continue;
                    }
                };

                match key {
                    Key::Quit => break,
                    Key::Help => println!("{HELP}"),
                    Key::Pick => {
                        let next = ctx.session.suggest(DateKey::today(), &mut rng);
                        show(ctx, next, &tx);
                    }
                    Key::NotToday => {
                        let next = ctx.session.not_today(DateKey::today(), &mut rng);
                        show(ctx, next, &tx);
                    }
                    Key::Hide => {
                        ctx.session.hide();
                        println!("  hidden; press p for a new pick");
                    }
                    Key::NeverAgain => match ctx.session.never_again() {
                        Some(place) => print!(
                            "{}",
                            render::never_again_notice(&place, ctx.config.sheet_edit_url.as_deref())
                        ),
                        None => println!("  nothing is being suggested"),
                    },
                    Key::List => print!(
                        "{}",
                        render::place_list(&ctx.session, ctx.config.sheet_edit_url.as_deref())
                    ),
                    Key::Reload => match ctx.reload().await {
                        Ok(count) => println!("  reloaded {count} places"),
                        Err(e) => print!("{}", render::load_failure(&e)),
                    },
                }
            }
            Some(done) = rx.recv() => {
                let shown = ctx
                    .session
                    .apply_enrichment(done.ticket, &done.identifier, done.record)
                    .cloned();
                if let Some(record) = shown {
                    print!("{}", render::details(&record, ctx.places.as_deref()));
                }
            }
        }
    }

    Ok(())
}

/// Print a suggestion and start a lookup if nothing is cached for it.
fn show(ctx: &Context, next: Result<Suggestion, CoreError>, tx: &mpsc::Sender<Enriched>) {
    let suggestion = match next {
        Ok(suggestion) => suggestion,
        Err(CoreError::EmptyPlaceSet) => {
            println!("  no places loaded; press r to reload");
            return;
        }
    };

    print!("{}", render::suggestion_card(&suggestion));
    match (&suggestion.cached, &ctx.places) {
        (Some(record), _) => print!("{}", render::details(record, ctx.places.as_deref())),
        (None, Some(client)) => spawn_lookup(
            client.clone(),
            suggestion.place,
            suggestion.ticket,
            tx.clone(),
        ),
        (None, None) => {}
    }
}
