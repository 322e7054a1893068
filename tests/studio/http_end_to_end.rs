use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use glyphcodex::commands::{Command, StudioContext, handle_command, parse_command};
use glyphcodex::config::Config;
use glyphcodex::lineage::RitualTag;
use glyphcodex::service::RitualKind;

async fn glyph_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/glyph/generate"))
        .and(query_param("format", "svg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<svg>seed</svg>", "image/svg+xml"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/glyph/generate"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"glyph": {"seed": 1}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/glyph/evolve"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"svg": "<svg>evolved</svg>", "glyph": {"gen": 2}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/glyph/mutate"))
        .and(body_json(json!({"glyph": {"gen": 2}, "format": "json"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"gen": 3})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/oracle/reflect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"insight": "it remembers"})))
        .mount(&server)
        .await;
    server
}

fn context_for(server: &MockServer, export_dir: &std::path::Path) -> StudioContext {
    let mut config = Config {
        export_dir: export_dir.to_path_buf(),
        ..Config::default()
    };
    config.service.base_url = server.uri();
    StudioContext::from_config(&config)
}

#[tokio::test]
async fn shell_session_against_http_service() {
    let server = glyph_server().await;
    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = context_for(&server, tmp.path());

    ctx.orchestrator.seed().await.unwrap();
    let seed = ctx.studio().current().unwrap();
    assert_eq!(seed.svg, "<svg>seed</svg>");
    assert_eq!(seed.glyph, json!({"seed": 1}));

    for line in ["/evolve", "/mutate", "/reflect"] {
        let command = parse_command(line).unwrap();
        handle_command(&ctx, &command).await;
    }

    let lineage = ctx.studio().lineage();
    let tags: Vec<_> = lineage.iter().map(|e| e.ritual).collect();
    assert_eq!(
        tags,
        vec![
            RitualTag::Init,
            RitualTag::Evolve,
            RitualTag::Mutate,
            RitualTag::Reflect
        ]
    );
    assert_eq!(lineage[2].glyph, json!({"gen": 3}));
    assert_eq!(lineage[3].insight.as_deref(), Some("it remembers"));
    assert_eq!(ctx.studio().insight().unwrap().text, "it remembers");

    handle_command(&ctx, &Command::Export { index: None }).await;
    let history = std::fs::read_to_string(tmp.path().join("glyph_lineage_history.json")).unwrap();
    let exported: Vec<serde_json::Value> = serde_json::from_str(&history).unwrap();
    assert_eq!(exported.len(), 4);
    assert_eq!(exported[3]["ritual"], "reflect");
}

#[tokio::test]
async fn dream_start_runs_first_step_over_http() {
    let server = glyph_server().await;
    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = context_for(&server, tmp.path());
    ctx.orchestrator.seed().await.unwrap();

    ctx.dream.start().await.unwrap();
    ctx.dream.stop();

    let log = ctx.dream.log();
    let kinds: Vec<_> = log.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![RitualKind::Evolve, RitualKind::Mutate, RitualKind::Reflect]
    );
    assert_eq!(log[2].insight.as_deref(), Some("it remembers"));
    assert_eq!(ctx.studio().lineage_len(), 4);
}

#[tokio::test]
async fn unreachable_service_reports_without_state_change() {
    let server = glyph_server().await;
    let tmp = tempfile::TempDir::new().unwrap();
    let ctx = context_for(&server, tmp.path());
    ctx.orchestrator.seed().await.unwrap();
    drop(server);

    let result = handle_command(&ctx, &Command::Ritual(RitualKind::Evolve)).await;
    assert!(result.text.contains("evolve failed"));
    assert_eq!(ctx.studio().lineage_len(), 1);
    assert!(ctx.studio().last_error().is_some());
}
