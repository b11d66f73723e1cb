use httpmock::prelude::*;
use libsearch::adapters::{AlexaAddressClient, CalilClient, CatalogClient, GeoApiClient};
use libsearch::domain::ports::ConfigProvider;
use libsearch::skill::{speech, RequestEnvelope, Skill, SkillResponse};
use libsearch::EnvConfig;

fn config(server: &MockServer) -> EnvConfig {
    EnvConfig {
        catalog_endpoint: server.url("/catalog"),
        catalog_locale: "ja_JP".to_string(),
        catalog_access_key: "test-access-key".to_string(),
        catalog_associate_tag: "test-tag".to_string(),
        geocode_endpoint: server.url("/geo"),
        library_endpoint: server.base_url(),
        library_app_key: "test-app-key".to_string(),
        poll_interval_ms: 1,
    }
}

fn skill(
    server: &MockServer,
) -> Skill<CatalogClient, GeoApiClient, CalilClient, AlexaAddressClient> {
    let config = config(server);
    Skill::new(
        CatalogClient::from_config(&config),
        GeoApiClient::from_config(&config),
        CalilClient::from_config(&config),
        AlexaAddressClient::new(),
        config.poll_interval(),
    )
}

fn search_envelope(server: &MockServer, title: &str) -> RequestEnvelope {
    serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "context": {
            "System": {
                "user": {"permissions": {"consentToken": "consent-1"}},
                "device": {"deviceId": "device-1"},
                "apiEndpoint": server.base_url(),
                "apiAccessToken": "api-token-1"
            }
        },
        "request": {
            "type": "IntentRequest",
            "intent": {
                "name": "SearchBook",
                "slots": {"book": {"name": "book", "value": title}}
            }
        }
    }))
    .unwrap()
}

fn mock_address(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/v1/devices/device-1/settings/address")
            .header("Authorization", "Bearer api-token-1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"postalCode": "160-0014"}));
    })
}

fn mock_geocode(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/geo")
            .query_param("method", "searchByPostal")
            .query_param("postal", "160-0014");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "response": {"location": [{"x": "139.719391", "y": "35.687574"}]}
            }));
    })
}

fn speech_text(response: &SkillResponse) -> String {
    response
        .response
        .output_speech
        .as_ref()
        .map(|speech| speech.text.clone())
        .unwrap_or_default()
}

// Scenario A: one nearby branch has the book on the shelf.
#[tokio::test]
async fn test_search_reports_available_branch() {
    let server = MockServer::start();
    mock_address(&server);
    mock_geocode(&server);

    let catalog = server.mock(|when, then| {
        when.method(GET)
            .path("/catalog")
            .query_param("Keywords", "デューン")
            .query_param("SearchIndex", "Books");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Items": [{"ItemAttributes": {"ISBN": "9784150000000", "Title": "Dune"}}]
            }));
    });
    let directory = server.mock(|when, then| {
        when.method(GET)
            .path("/library")
            .query_param("appkey", "test-app-key")
            .query_param("limit", "10")
            .query_param("geocode", "139.719391,35.687574");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"systemid": "Tokyo_001", "libkey": "central", "formal": "中央図書館"}
            ]));
    });
    let status = server.mock(|when, then| {
        when.method(GET)
            .path("/check")
            .query_param("isbn", "9784150000000")
            .query_param("systemid", "Tokyo_001");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "continue": 0,
                "books": {
                    "9784150000000": {
                        "Tokyo_001": {
                            "libkey": {"central": "貸出可"},
                            "status": "OK",
                            "reserveurl": "https://example.com/reserve"
                        }
                    }
                }
            }));
    });

    let response = skill(&server)
        .handle(&search_envelope(&server, "デューン"))
        .await;

    catalog.assert();
    directory.assert();
    status.assert();

    let text = speech_text(&response);
    assert!(text.starts_with("Dune、が借りられる近くの図書館は、"));
    assert!(text.contains("中央図書館"));

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["response"]["card"]["type"], "Simple");
    assert_eq!(value["response"]["card"]["title"], "Dune　が借りられる図書館");
    assert!(value["response"]["card"]["content"]
        .as_str()
        .unwrap()
        .contains("中央図書館:https://example.com/reserve"));
}

// Scenario A, still-computing variant: the status service never stops
// reporting the query as in progress, so the retry budget is spent (4
// requests total) and the last snapshot is used as-is.
#[tokio::test]
async fn test_search_exhausts_retry_budget_and_uses_stale_snapshot() {
    let server = MockServer::start();
    mock_address(&server);
    mock_geocode(&server);

    server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Items": [{"ItemAttributes": {"ISBN": "9784150000000", "Title": "Dune"}}]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/library");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"systemid": "Tokyo_001", "libkey": "central", "formal": "中央図書館"}
            ]));
    });
    let status = server.mock(|when, then| {
        when.method(GET)
            .path("/check")
            .query_param("systemid", "Tokyo_001");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "continue": 1,
                "session": "s1",
                "books": {
                    "9784150000000": {
                        "Tokyo_001": {
                            "libkey": {"central": "貸出可"},
                            "status": "Cache",
                            "reserveurl": "https://example.com/reserve"
                        }
                    }
                }
            }));
    });

    let response = skill(&server)
        .handle(&search_envelope(&server, "デューン"))
        .await;

    status.assert_hits(4);
    assert!(speech_text(&response).contains("中央図書館"));
}

// Scenario B: no catalog item carries a numeric ISBN, so the pipeline
// ends before any location work happens.
#[tokio::test]
async fn test_search_without_numeric_isbn_stops_early() {
    let server = MockServer::start();
    mock_address(&server);
    let geocode = mock_geocode(&server);

    let catalog = server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Items": [
                    {"ItemAttributes": {"Title": "Kindle edition only"}},
                    {"ItemAttributes": {"ISBN": "B00EXAMPLE", "Title": "Not a book"}}
                ]
            }));
    });
    let directory = server.mock(|when, then| {
        when.method(GET).path("/library");
        then.status(200).json_body(serde_json::json!([]));
    });
    let status = server.mock(|when, then| {
        when.method(GET).path("/check");
        then.status(200).json_body(serde_json::json!({}));
    });

    let response = skill(&server)
        .handle(&search_envelope(&server, "デューン"))
        .await;

    catalog.assert();
    assert_eq!(
        speech_text(&response),
        "デューン、に当てはまる本は見つかりませんでした。"
    );
    assert_eq!(geocode.hits(), 0);
    assert_eq!(directory.hits(), 0);
    assert_eq!(status.hits(), 0);
}

// Scenario C: three branches share one system; the system is polled once
// and two of the three branches are loanable, in directory order.
#[tokio::test]
async fn test_search_polls_shared_system_once_and_keeps_order() {
    let server = MockServer::start();
    mock_address(&server);
    mock_geocode(&server);

    server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Items": [{"ItemAttributes": {"ISBN": "9784150000000", "Title": "Dune"}}]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/library");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"systemid": "X", "libkey": "central", "formal": "中央図書館"},
                {"systemid": "X", "libkey": "north", "formal": "北図書館"},
                {"systemid": "X", "libkey": "south", "formal": "南図書館"}
            ]));
    });
    let status = server.mock(|when, then| {
        when.method(GET).path("/check").query_param("systemid", "X");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "continue": 0,
                "books": {
                    "9784150000000": {
                        "X": {
                            "libkey": {
                                "central": "貸出可",
                                "north": "貸出中",
                                "south": "貸出可"
                            },
                            "status": "OK",
                            "reserveurl": "https://example.com/x"
                        }
                    }
                }
            }));
    });

    let response = skill(&server)
        .handle(&search_envelope(&server, "デューン"))
        .await;

    status.assert_hits(1);

    let text = speech_text(&response);
    let central = text.find("中央図書館").expect("central branch spoken");
    let south = text.find("南図書館").expect("south branch spoken");
    assert!(central < south);
    assert!(!text.contains("北図書館"));

    let value = serde_json::to_value(&response).unwrap();
    let card_content = value["response"]["card"]["content"].as_str().unwrap();
    assert_eq!(card_content.matches("https://example.com/x").count(), 2);
}

// Scenario D: the geocoder rejects the postal code; no directory or
// status traffic happens.
#[tokio::test]
async fn test_search_with_unsupported_address_stops_before_directory() {
    let server = MockServer::start();
    mock_address(&server);

    server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Items": [{"ItemAttributes": {"ISBN": "9784150000000", "Title": "Dune"}}]
            }));
    });
    let geocode = server.mock(|when, then| {
        when.method(GET).path("/geo");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"response": {"error": "unsupported postal code"}}));
    });
    let directory = server.mock(|when, then| {
        when.method(GET).path("/library");
        then.status(200).json_body(serde_json::json!([]));
    });
    let status = server.mock(|when, then| {
        when.method(GET).path("/check");
        then.status(200).json_body(serde_json::json!({}));
    });

    let response = skill(&server)
        .handle(&search_envelope(&server, "デューン"))
        .await;

    geocode.assert();
    assert_eq!(speech_text(&response), speech::AREA_UNSUPPORTED);
    assert_eq!(directory.hits(), 0);
    assert_eq!(status.hits(), 0);
}

// Nothing loanable is a valid terminal outcome, not an error.
#[tokio::test]
async fn test_search_with_no_loanable_branch_speaks_no_availability() {
    let server = MockServer::start();
    mock_address(&server);
    mock_geocode(&server);

    server.mock(|when, then| {
        when.method(GET).path("/catalog");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Items": [{"ItemAttributes": {"ISBN": "9784150000000", "Title": "Dune"}}]
            }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/library");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"systemid": "Tokyo_001", "libkey": "central", "formal": "中央図書館"}
            ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/check");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "continue": 0,
                "books": {
                    "9784150000000": {
                        "Tokyo_001": {
                            "libkey": {"central": "貸出中"},
                            "status": "OK",
                            "reserveurl": "https://example.com/reserve"
                        }
                    }
                }
            }));
    });

    let response = skill(&server)
        .handle(&search_envelope(&server, "デューン"))
        .await;

    assert_eq!(
        speech_text(&response),
        "Dune、が借りられる近くの図書館は見つかりませんでした。"
    );
}
