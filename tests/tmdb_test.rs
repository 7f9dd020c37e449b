//! TMDB API client tests
//!
//! Tests trending, discovery, search, details parsing and error handling.

use mockito::{Matcher, Server};
use fluxify::api::{Gateway, GatewayError, TmdbClient};
use fluxify::models::{ActorFilter, FilterState, MediaType, SortKey};

const KEY: &str = "test_key";

fn page_body() -> &'static str {
    r#"{
        "page": 1,
        "results": [
            {
                "id": 157336,
                "media_type": "movie",
                "title": "Interstellar",
                "release_date": "2014-11-05",
                "poster_path": "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
                "vote_average": 8.4
            },
            {
                "id": 1396,
                "media_type": "tv",
                "name": "Breaking Bad",
                "first_air_date": "2008-01-20",
                "vote_average": 8.9
            },
            {
                "id": 287,
                "media_type": "person",
                "name": "Brad Pitt"
            }
        ],
        "total_pages": 1
    }"#
}

fn gateway_error(err: &anyhow::Error) -> &GatewayError {
    err.downcast_ref::<GatewayError>()
        .expect("error should be a GatewayError")
}

// =============================================================================
// Trending Tests
// =============================================================================

#[tokio::test]
async fn test_trending_parses_results() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/trending/movie/day")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("api_key".into(), KEY.into()),
            Matcher::UrlEncoded("language".into(), "en-US".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body())
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let items = client.trending(MediaType::Movie, 1).await.unwrap();

    mock.assert_async().await;
    // The person entry is dropped
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].id, 157336);
    assert_eq!(items[0].title, "Interstellar");
    assert_eq!(items[0].year(), Some(2014));
    assert_eq!(items[0].media_type, MediaType::Movie);
    assert!((items[0].vote_average - 8.4).abs() < 0.01);

    assert_eq!(items[1].title, "Breaking Bad");
    assert_eq!(items[1].release_date.as_deref(), Some("2008-01-20"));
    assert_eq!(items[1].media_type, MediaType::Tv);
}

#[tokio::test]
async fn test_trending_requests_given_page() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/trending/tv/day")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .with_body(r#"{"page": 3, "results": []}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let items = client.trending(MediaType::Tv, 3).await.unwrap();

    mock.assert_async().await;
    assert!(items.is_empty());
}

// =============================================================================
// Discover Tests
// =============================================================================

#[tokio::test]
async fn test_discover_sends_filter_params() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("sort_by".into(), "vote_average.desc".into()),
            Matcher::UrlEncoded("with_genres".into(), "878".into()),
            Matcher::UrlEncoded("with_cast".into(), "1892".into()),
            Matcher::UrlEncoded("vote_average.gte".into(), "7".into()),
            Matcher::UrlEncoded("primary_release_date.gte".into(), "2014-01-01".into()),
            Matcher::UrlEncoded("primary_release_date.lte".into(), "2014-12-31".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"results": [{"id": 157336, "title": "Interstellar", "release_date": "2014-11-05", "vote_average": 8.4}]}"#,
        )
        .create_async()
        .await;

    let filter = FilterState {
        genre: Some(878),
        year: Some(2014),
        min_rating: 7.0,
        sort: SortKey::RatingDesc,
        actor: Some(ActorFilter {
            id: 1892,
            name: "Matt Damon".into(),
        }),
    };

    let client = TmdbClient::with_base_url(KEY, server.url());
    let items = client.discover(MediaType::Movie, &filter, 2).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 1);
    // Discover results carry no media_type field; the request's type is used
    assert_eq!(items[0].media_type, MediaType::Movie);
}

#[tokio::test]
async fn test_discover_tv_uses_first_air_date() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/discover/tv")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("first_air_date.gte".into(), "2008-01-01".into()),
            Matcher::UrlEncoded("first_air_date.lte".into(), "2008-12-31".into()),
            Matcher::UrlEncoded("sort_by".into(), "popularity.desc".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"results": [{"id": 1396, "name": "Breaking Bad"}]}"#)
        .create_async()
        .await;

    let filter = FilterState {
        year: Some(2008),
        ..FilterState::default()
    };

    let client = TmdbClient::with_base_url(KEY, server.url());
    let items = client.discover(MediaType::Tv, &filter, 1).await.unwrap();

    mock.assert_async().await;
    assert_eq!(items[0].media_type, MediaType::Tv);
    assert_eq!(items[0].year(), None);
}

// =============================================================================
// Genres Tests
// =============================================================================

#[tokio::test]
async fn test_genres_list() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let genres = client.genres(MediaType::Movie).await.unwrap();

    mock.assert_async().await;
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].id, 878);
    assert_eq!(genres[1].name, "Science Fiction");
}

// =============================================================================
// Details Tests
// =============================================================================

#[tokio::test]
async fn test_details_appends_credits_videos_similar() {
    let mut server = Server::new_async().await;

    let body = r#"{
        "id": 603,
        "title": "The Matrix",
        "release_date": "1999-03-30",
        "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
        "vote_average": 8.2,
        "runtime": 136,
        "overview": "Set in the 22nd century...",
        "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
        "credits": {
            "cast": [
                {"id": 6384, "name": "Keanu Reeves", "character": "Neo", "profile_path": "/4D0PpNI0kmP58hgrwGC3wCjxhnm.jpg"},
                {"id": 2975, "name": "Laurence Fishburne", "character": "Morpheus"}
            ]
        },
        "videos": {
            "results": [
                {"key": "abc", "site": "YouTube", "type": "Teaser", "name": "Teaser"},
                {"key": "vKQi3bBA1y8", "site": "YouTube", "type": "Trailer", "name": "Official Trailer"}
            ]
        },
        "similar": {
            "results": [
                {"id": 604, "title": "The Matrix Reloaded", "release_date": "2003-05-15", "vote_average": 7.0}
            ]
        }
    }"#;

    let mock = server
        .mock("GET", "/movie/603")
        .match_query(Matcher::UrlEncoded(
            "append_to_response".into(),
            "credits,videos,similar".into(),
        ))
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let record = client.details(MediaType::Movie, 603).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.title, "The Matrix");
    assert_eq!(record.year(), Some(1999));
    assert_eq!(record.runtime, Some(136));
    assert_eq!(record.genres_str(), "Action, Science Fiction");
    assert_eq!(record.cast.len(), 2);
    assert_eq!(record.cast[0].character, "Neo");
    assert_eq!(record.cast[1].profile_path, None);
    assert_eq!(record.similar.len(), 1);
    assert_eq!(record.similar[0].media_type, MediaType::Movie);
    assert_eq!(
        record.trailer().map(|v| v.url()),
        Some("https://www.youtube.com/watch?v=vKQi3bBA1y8".to_string())
    );
}

#[tokio::test]
async fn test_tv_details_use_episode_runtime() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tv/1396")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"id": 1396, "name": "Breaking Bad", "first_air_date": "2008-01-20", "episode_run_time": [47, 45]}"#,
        )
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let record = client.details(MediaType::Tv, 1396).await.unwrap();

    mock.assert_async().await;
    assert_eq!(record.title, "Breaking Bad");
    assert_eq!(record.runtime, Some(47));
    assert!(record.cast.is_empty());
    assert!(record.similar.is_empty());
    assert!(record.trailer().is_none());
}

// =============================================================================
// Search Tests
// =============================================================================

#[tokio::test]
async fn test_search_encodes_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::UrlEncoded("query".into(), "blade runner".into()))
        .with_status(200)
        .with_body(r#"{"results": [{"id": 78, "title": "Blade Runner", "release_date": "1982-06-25", "vote_average": 7.9}]}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let items = client.search(MediaType::Movie, "blade runner").await.unwrap();

    mock.assert_async().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 78);
}

// =============================================================================
// Authentication and Locale
// =============================================================================

#[tokio::test]
async fn test_long_key_sent_as_bearer_token() {
    let mut server = Server::new_async().await;
    let token = "t".repeat(120);

    let mock = server
        .mock("GET", "/genre/tv/list")
        .match_header("authorization", format!("Bearer {}", token).as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"genres": []}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(token.clone(), server.url());
    client.genres(MediaType::Tv).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_language_override() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::UrlEncoded("language".into(), "tr-TR".into()))
        .with_status(200)
        .with_body(r#"{"genres": [{"id": 28, "name": "Aksiyon"}]}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url()).language("tr-TR");
    let genres = client.genres(MediaType::Movie).await.unwrap();

    mock.assert_async().await;
    assert_eq!(genres[0].name, "Aksiyon");
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_404_is_not_found() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/movie/999999999")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"status_code": 34, "status_message": "The resource you requested could not be found."}"#)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let err = client.details(MediaType::Movie, 999999999).await.unwrap_err();

    assert!(matches!(gateway_error(&err), GatewayError::NotFound));
}

#[tokio::test]
async fn test_500_is_server_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/trending/movie/day")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let err = client.trending(MediaType::Movie, 1).await.unwrap_err();

    assert!(matches!(gateway_error(&err), GatewayError::Server(500)));
}

#[tokio::test]
async fn test_invalid_json() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/search/tv")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let err = client.search(MediaType::Tv, "dark").await.unwrap_err();

    assert!(matches!(
        gateway_error(&err),
        GatewayError::InvalidResponse(_)
    ));
}

#[tokio::test]
async fn test_rate_limit_retries_then_gives_up() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genre/movie/list")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("Retry-After", "0")
        // First attempt plus three retries
        .expect(4)
        .create_async()
        .await;

    let client = TmdbClient::with_base_url(KEY, server.url());
    let err = client.genres(MediaType::Movie).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(gateway_error(&err), GatewayError::RateLimited));
}
