//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the same stores the TUI uses.
//! Each handler takes CLI args, a gateway and Output, returns ExitCode.

use std::time::Duration;

use crate::api::{Gateway, GatewayError};
use crate::cli::{
    DiscoverCmd, ExitCode, FavoritesAction, FavoritesCmd, GenresCmd, InfoCmd, Output, SearchCmd,
    SynthCmd, ToggleResponse, TrendingCmd,
};
use crate::models::{ActorFilter, CatalogItem, FilterPatch, ImageSize, MediaType};
use crate::store::search::MIN_QUERY_CHARS;
use crate::store::{CatalogStore, DetailLoader, FavoritesStore, SearchOverlay, SynthesisEngine};

/// Map a gateway failure to an exit code
fn failure_code(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<GatewayError>() {
        Some(GatewayError::NotFound) => ExitCode::NotFound,
        _ => ExitCode::NetworkError,
    }
}

fn item_lines(items: &[CatalogItem]) -> Vec<String> {
    items
        .iter()
        .map(|i| format!("{:>8}  ⭐ {:.1}  {}", i.id, i.vote_average, i))
        .collect()
}

/// Print a catalog listing; an empty list exits with NotFound
fn print_items(items: &[CatalogItem], output: &Output) -> ExitCode {
    if items.is_empty() {
        return output.error("No results", ExitCode::NotFound);
    }
    match output.print_lines(items, &item_lines(items)) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

/// Load `pages` pages into the store, surfacing gateway errors
async fn load_pages(
    store: &mut CatalogStore,
    pages: u32,
    gateway: &dyn Gateway,
) -> anyhow::Result<()> {
    let request = store.begin_first_page();
    let items = request.execute(gateway).await?;
    store.finish_page(&request, Ok(items));

    for _ in 1..pages {
        let Some(request) = store.begin_next_page() else {
            break;
        };
        let items = request.execute(gateway).await?;
        let exhausted = items.is_empty();
        store.finish_page(&request, Ok(items));
        if exhausted {
            break;
        }
    }
    Ok(())
}

// =============================================================================
// Catalog Commands
// =============================================================================

pub async fn trending_cmd(cmd: TrendingCmd, gateway: &dyn Gateway, output: &Output) -> ExitCode {
    let media_type = MediaType::from(cmd.media_type);
    output.info(format!("Fetching trending {}...", media_type));

    let mut store = CatalogStore::new(media_type);
    if let Err(e) = load_pages(&mut store, cmd.pages.max(1), gateway).await {
        return output.error(format!("Trending fetch failed: {}", e), failure_code(&e));
    }

    let mut items = store.items().to_vec();
    if let Some(limit) = cmd.limit {
        items.truncate(limit);
    }
    print_items(&items, output)
}

pub async fn discover_cmd(cmd: DiscoverCmd, gateway: &dyn Gateway, output: &Output) -> ExitCode {
    if !(0.0..=10.0).contains(&cmd.min_rating) {
        return output.error("--min-rating must be between 0 and 10", ExitCode::InvalidArgs);
    }

    let mut store = CatalogStore::new(cmd.media_type.into());
    store.set_filter(FilterPatch {
        genre: Some(cmd.genre),
        year: Some(cmd.year),
        min_rating: Some(cmd.min_rating),
        sort: Some(cmd.sort.into()),
        actor: Some(cmd.actor.map(|id| ActorFilter {
            id,
            name: format!("#{}", id),
        })),
    });

    if store.has_active_filter() {
        output.info("Discovering with filters...");
    } else {
        output.info("No filters given, showing trending...");
    }

    if let Err(e) = load_pages(&mut store, cmd.pages.max(1), gateway).await {
        return output.error(format!("Discover failed: {}", e), failure_code(&e));
    }

    let mut items = store.items().to_vec();
    if let Some(limit) = cmd.limit {
        items.truncate(limit);
    }
    print_items(&items, output)
}

pub async fn genres_cmd(cmd: GenresCmd, gateway: &dyn Gateway, output: &Output) -> ExitCode {
    match gateway.genres(cmd.media_type.into()).await {
        Ok(genres) => {
            let lines: Vec<String> = genres
                .iter()
                .map(|g| format!("{:>6}  {}", g.id, g.name))
                .collect();
            match output.print_lines(&genres, &lines) {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
        Err(e) => output.error(format!("Genre fetch failed: {}", e), failure_code(&e)),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, gateway: &dyn Gateway, output: &Output) -> ExitCode {
    output.info(format!("Getting info for: {}", cmd.id));

    let mut loader = DetailLoader::new();
    let request = loader.open_details(cmd.media_type.into(), cmd.id);
    let record = match request.execute(gateway).await {
        Ok(record) => record,
        Err(e) => return output.error(format!("Info failed: {}", e), failure_code(&e)),
    };
    loader.finish(&request, Ok(record));

    let Some(record) = loader.current() else {
        return output.error("Info failed", ExitCode::Error);
    };

    let mut lines = vec![record.to_string()];
    if !record.genres.is_empty() {
        lines.push(record.genres_str());
    }
    if !record.overview.is_empty() {
        lines.push(String::new());
        lines.push(record.overview.clone());
    }
    if !record.cast.is_empty() {
        lines.push(String::new());
        lines.push("Cast:".into());
        lines.extend(
            record
                .cast
                .iter()
                .take(10)
                .map(|c| format!("  {:>8}  {} as {}", c.id, c.name, c.character)),
        );
    }
    if let Some(trailer) = record.trailer() {
        lines.push(String::new());
        lines.push(format!("Trailer: {}", trailer.url()));
    }
    if let Some(path) = record.poster_path.as_deref() {
        lines.push(format!("Poster:  {}", ImageSize::Poster.url(path)));
    }

    match output.print_lines(record, &lines) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, gateway: &dyn Gateway, output: &Output) -> ExitCode {
    let mut overlay = SearchOverlay::global(cmd.media_type.into());
    overlay.open();

    let Some(request) = overlay.set_query(cmd.query.trim()) else {
        return output.error(
            format!("Query must be longer than {} characters", MIN_QUERY_CHARS),
            ExitCode::InvalidArgs,
        );
    };

    output.info(format!("Searching for: {}", request.query));
    let result = request.execute(gateway).await;
    if let Err(e) = &result {
        return output.error(format!("Search failed: {}", e), failure_code(e));
    }
    overlay.finish_search(&request, result);

    let mut results = overlay.results().to_vec();
    results.truncate(cmd.limit);
    print_items(&results, output)
}

// =============================================================================
// Favorites Command
// =============================================================================

/// Print the stored favorites; reads the local file only
pub fn favorites_list_cmd(favorites: &FavoritesStore, output: &Output) -> ExitCode {
    if favorites.is_empty() {
        output.info("No favorites yet");
    }
    match output.print_lines(favorites.items(), &item_lines(favorites.items())) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

pub async fn favorites_cmd(
    cmd: FavoritesCmd,
    favorites: &mut FavoritesStore,
    gateway: &dyn Gateway,
    output: &Output,
) -> ExitCode {
    match cmd.action {
        FavoritesAction::List => favorites_list_cmd(favorites, output),
        FavoritesAction::Toggle { id, media_type } => {
            let record = match gateway.details(media_type.into(), id).await {
                Ok(record) => record,
                Err(e) => return output.error(format!("Lookup failed: {}", e), failure_code(&e)),
            };

            let item = record.to_item();
            let favorite = match favorites.toggle_favorite(&item) {
                Ok(favorite) => favorite,
                Err(e) => {
                    return output.error(format!("Could not save favorites: {}", e), ExitCode::Error)
                }
            };

            let response = ToggleResponse {
                id,
                title: item.title.clone(),
                favorite,
            };
            let line = if favorite {
                format!("Added {} to favorites", item)
            } else {
                format!("Removed {} from favorites", item)
            };
            match output.print_lines(response, &[line]) {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
    }
}

// =============================================================================
// Synthesis Command
// =============================================================================

pub async fn synth_cmd(
    cmd: SynthCmd,
    delay: Duration,
    gateway: &dyn Gateway,
    output: &Output,
) -> ExitCode {
    let delay = if cmd.no_delay { Duration::ZERO } else { delay };
    let mut engine = SynthesisEngine::new().with_delay(delay);

    for id in &cmd.ids {
        let seed = CatalogItem {
            id: *id,
            title: format!("#{}", id),
            poster_path: None,
            release_date: None,
            vote_average: 0.0,
            media_type: MediaType::Movie,
        };
        if !engine.add_slot(&seed) {
            return output.error("Seed ids must be three distinct movies", ExitCode::InvalidArgs);
        }
    }

    let Some(request) = engine.begin_run() else {
        return output.error("Synthesis needs exactly three seeds", ExitCode::InvalidArgs);
    };

    output.info("Scanning...");
    let result = request.execute(gateway).await;
    if let Err(e) = &result {
        return output.error(format!("Synthesis failed: {}", e), failure_code(e));
    }
    engine.finish_run(&request, result);

    print_items(engine.results(), output)
}
