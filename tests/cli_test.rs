//! CLI Command Tests
//!
//! Argument parsing, JSON output format and exit codes of the command
//! handlers against a mocked TMDB server.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use fluxify::cli::{Cli, Command, FavoritesAction, MediaTypeArg, SortArg};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command_basic() {
        let cli = Cli::parse_from(["fluxify", "search", "blade runner"]);
        assert!(cli.is_cli_mode());
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "blade runner");
                assert_eq!(cmd.limit, 20); // default
                assert_eq!(cmd.media_type, MediaTypeArg::Movie);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_trending_command() {
        let cli = Cli::parse_from(["fluxify", "trending", "-t", "tv", "-p", "3", "-l", "5"]);
        match cli.command {
            Some(Command::Trending(cmd)) => {
                assert_eq!(cmd.media_type, MediaTypeArg::Tv);
                assert_eq!(cmd.pages, 3);
                assert_eq!(cmd.limit, Some(5));
            }
            _ => panic!("Expected Trending command"),
        }
    }

    #[test]
    fn test_discover_defaults() {
        let cli = Cli::parse_from(["fluxify", "discover"]);
        match cli.command {
            Some(Command::Discover(cmd)) => {
                assert_eq!(cmd.genre, None);
                assert_eq!(cmd.year, None);
                assert_eq!(cmd.min_rating, 0.0);
                assert_eq!(cmd.sort, SortArg::Popular);
                assert_eq!(cmd.actor, None);
            }
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_discover_with_actor() {
        let cli = Cli::parse_from(["fluxify", "d", "-a", "6384", "-r", "7.5"]);
        match cli.command {
            Some(Command::Discover(cmd)) => {
                assert_eq!(cmd.actor, Some(6384));
                assert_eq!(cmd.min_rating, 7.5);
            }
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_info_command() {
        let cli = Cli::parse_from(["fluxify", "info", "1396", "-t", "tv"]);
        match cli.command {
            Some(Command::Info(cmd)) => {
                assert_eq!(cmd.id, 1396);
                assert_eq!(cmd.media_type, MediaTypeArg::Tv);
            }
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_info_requires_numeric_id() {
        assert!(Cli::try_parse_from(["fluxify", "info", "tt0133093"]).is_err());
    }

    #[test]
    fn test_favorites_subcommands() {
        let cli = Cli::parse_from(["fluxify", "fav", "ls"]);
        match cli.command {
            Some(Command::Favorites(cmd)) => assert!(matches!(cmd.action, FavoritesAction::List)),
            _ => panic!("Expected Favorites command"),
        }

        let cli = Cli::parse_from(["fluxify", "favorites", "toggle", "603", "-t", "movie"]);
        match cli.command {
            Some(Command::Favorites(cmd)) => match cmd.action {
                FavoritesAction::Toggle { id, media_type } => {
                    assert_eq!(id, 603);
                    assert_eq!(media_type, MediaTypeArg::Movie);
                }
                _ => panic!("Expected toggle"),
            },
            _ => panic!("Expected Favorites command"),
        }
    }

    #[test]
    fn test_synth_takes_exactly_three_ids() {
        assert!(Cli::try_parse_from(["fluxify", "synth", "603"]).is_err());
        assert!(Cli::try_parse_from(["fluxify", "synth", "1", "2", "3", "4"]).is_err());
        assert!(Cli::try_parse_from(["fluxify", "synth", "1", "2", "3"]).is_ok());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "fluxify",
            "--json",
            "--quiet",
            "--config",
            "/path/to/config.toml",
            "genres",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(
            cli.config,
            Some(std::path::PathBuf::from("/path/to/config.toml"))
        );
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["fluxify", "s", "alien"]);
        assert!(matches!(cli.command, Some(Command::Search(_))));

        let cli = Cli::parse_from(["fluxify", "tr"]);
        assert!(matches!(cli.command, Some(Command::Trending(_))));

        let cli = Cli::parse_from(["fluxify", "i", "123"]);
        assert!(matches!(cli.command, Some(Command::Info(_))));

        let cli = Cli::parse_from(["fluxify", "d"]);
        assert!(matches!(cli.command, Some(Command::Discover(_))));
    }
}

// =============================================================================
// JSON Output Tests
// =============================================================================

mod json_output {
    use fluxify::cli::{ExitCode, JsonOutput, ToggleResponse};

    #[test]
    fn test_json_output_success() {
        let output = JsonOutput::success(vec!["a", "b"]);
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"data":["a","b"]}"#);
    }

    #[test]
    fn test_json_output_error() {
        let output = JsonOutput::<()>::error_msg("No results", ExitCode::NotFound);
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains(r#""error":"No results""#));
        assert!(json.contains(r#""exit_code":4"#));
        assert!(!json.contains("data"));
    }

    #[test]
    fn test_toggle_response_format() {
        let response = ToggleResponse {
            id: 603,
            title: "The Matrix".into(),
            favorite: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 603);
        assert_eq!(json["favorite"], true);
    }
}

// =============================================================================
// Output Helper Tests
// =============================================================================

mod output_helpers {
    use clap::Parser;
    use fluxify::cli::{Cli, ExitCode, Output};

    #[test]
    fn test_output_json_mode() {
        let cli = Cli::parse_from(["fluxify", "--json", "genres"]);
        let output = Output::new(&cli);
        assert!(output.json);
    }

    #[test]
    fn test_output_quiet_mode() {
        let cli = Cli::parse_from(["fluxify", "--quiet", "genres"]);
        let output = Output::new(&cli);
        assert!(output.quiet);
    }

    #[test]
    fn test_error_returns_given_code() {
        let output = Output {
            json: true,
            quiet: true,
        };
        assert_eq!(output.error("boom", ExitCode::NetworkError), ExitCode::NetworkError);
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use mockito::{Matcher, Server};
    use std::time::Duration;
    use tempfile::TempDir;

    use fluxify::api::TmdbClient;
    use fluxify::cli::{
        DiscoverCmd, ExitCode, FavoritesAction, FavoritesCmd, InfoCmd, MediaTypeArg, Output,
        SearchCmd, SortArg, SynthCmd, TrendingCmd,
    };
    use fluxify::commands;
    use fluxify::store::FavoritesStore;

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn discover_cmd(min_rating: f32) -> DiscoverCmd {
        DiscoverCmd {
            media_type: MediaTypeArg::Movie,
            genre: Some(878),
            year: None,
            min_rating,
            sort: SortArg::Popular,
            actor: None,
            pages: 1,
            limit: None,
        }
    }

    #[tokio::test]
    async fn test_trending_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/trending/movie/day")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": [{"id": 1, "title": "One"}, {"id": 2, "title": "Two"}]}"#)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = TrendingCmd {
            media_type: MediaTypeArg::Movie,
            pages: 1,
            limit: Some(1),
        };
        let code = commands::trending_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_trending_empty_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/trending/tv/day")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = TrendingCmd {
            media_type: MediaTypeArg::Tv,
            pages: 2,
            limit: None,
        };
        let code = commands::trending_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/discover/movie")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("key", server.url());
        let code = commands::discover_cmd(discover_cmd(0.0), &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_discover_rejects_bad_rating() {
        let server = Server::new_async().await;
        let client = TmdbClient::with_base_url("key", server.url());
        let code = commands::discover_cmd(discover_cmd(11.0), &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_info_missing_title() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movie/42")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = InfoCmd {
            id: 42,
            media_type: MediaTypeArg::Movie,
        };
        let code = commands::info_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_search_short_query_rejected() {
        let server = Server::new_async().await;
        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = SearchCmd {
            query: " ab ".into(),
            media_type: MediaTypeArg::Movie,
            limit: 20,
        };
        let code = commands::search_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_favorites_toggle_persists() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/movie/603")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        let mut favorites = FavoritesStore::load(&path);

        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = FavoritesCmd {
            action: FavoritesAction::Toggle {
                id: 603,
                media_type: MediaTypeArg::Movie,
            },
        };
        let code = commands::favorites_cmd(cmd, &mut favorites, &client, &quiet_json()).await;

        assert_eq!(code, ExitCode::Success);
        let reloaded = FavoritesStore::load(&path);
        assert!(reloaded.contains(603));
        assert_eq!(reloaded.items()[0].title, "The Matrix");
    }

    #[test]
    fn test_favorites_list_needs_no_gateway() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(
            &path,
            r#"[{"id": 603, "title": "The Matrix", "vote_average": 8.2, "media_type": "movie"}]"#,
        )
        .unwrap();

        let favorites = FavoritesStore::load(&path);
        assert!(favorites.contains(603));
        assert_eq!(commands::favorites_list_cmd(&favorites, &quiet_json()), ExitCode::Success);

        let empty = FavoritesStore::load(dir.path().join("missing.json"));
        assert_eq!(commands::favorites_list_cmd(&empty, &quiet_json()), ExitCode::Success);
    }

    #[tokio::test]
    async fn test_synth_rejects_duplicate_seeds() {
        let server = Server::new_async().await;
        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = SynthCmd {
            ids: vec![603, 603, 604],
            no_delay: true,
        };
        let code = commands::synth_cmd(cmd, Duration::ZERO, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_synth_runs_over_similar_lists() {
        let mut server = Server::new_async().await;
        let mut mocks = Vec::new();
        for id in [1, 2, 3] {
            let body = format!(
                r#"{{"id": {id}, "title": "Seed {id}", "similar": {{"results": [{{"id": {sim}, "title": "Similar {sim}"}}]}}}}"#,
                id = id,
                sim = id * 10
            );
            mocks.push(
                server
                    .mock("GET", format!("/movie/{}", id).as_str())
                    .match_query(Matcher::Any)
                    .with_status(200)
                    .with_body(body)
                    .create_async()
                    .await,
            );
        }

        let client = TmdbClient::with_base_url("key", server.url());
        let cmd = SynthCmd {
            ids: vec![1, 2, 3],
            no_delay: false,
        };
        // The configured delay is already zero
        let code = commands::synth_cmd(cmd, Duration::ZERO, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::Success);
        for mock in mocks {
            mock.assert_async().await;
        }
    }
}
