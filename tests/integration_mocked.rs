/// Integration tests with mocked external APIs
/// Exercises the ViaCEP and WeatherAPI clients against wiremock servers
use cep_temperature_api::cep_client::ViaCepClient;
use cep_temperature_api::models::PostalLookupResult;
use cep_temperature_api::services::{ClientError, PostalLookup, Provider, WeatherLookup};
use cep_temperature_api::validation::validate_cep;
use cep_temperature_api::weather_client::WeatherApiClient;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn viacep_client(mock_server: &MockServer) -> ViaCepClient {
    ViaCepClient::new(
        format!("{}/ws/{{cep}}/json/", mock_server.uri()),
        Duration::from_secs(10),
    )
    .unwrap()
}

fn weather_client(mock_server: &MockServer, timeout: Duration) -> WeatherApiClient {
    WeatherApiClient::new(
        format!("{}/v1/current.json", mock_server.uri()),
        "test_key".to_string(),
        timeout,
    )
    .unwrap()
}

#[tokio::test]
async fn test_viacep_successful_response() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "cep": "01001-000",
        "logradouro": "Praça da Sé",
        "complemento": "lado ímpar",
        "bairro": "Sé",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308",
        "gia": "1004",
        "ddd": "11",
        "siafi": "7107"
    });

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = viacep_client(&mock_server);
    let zipcode = validate_cep(Some("01001-000")).unwrap();
    let result = client.lookup(&zipcode).await.unwrap();

    assert_eq!(result, PostalLookupResult::found("São Paulo"));
}

#[tokio::test]
async fn test_viacep_null_fields_still_resolve_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01001-000",
            "logradouro": null,
            "complemento": null,
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .mount(&mock_server)
        .await;

    let client = viacep_client(&mock_server);
    let zipcode = validate_cep(Some("01001000")).unwrap();
    let result = client.lookup(&zipcode).await.unwrap();

    assert_eq!(result, PostalLookupResult::found("São Paulo"));
}

#[tokio::test]
async fn test_viacep_erro_flag_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/11001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": true })))
        .mount(&mock_server)
        .await;

    let client = viacep_client(&mock_server);
    let zipcode = validate_cep(Some("11001000")).unwrap();
    let result = client.lookup(&zipcode).await.unwrap();

    assert!(!result.found);
}

#[tokio::test]
async fn test_viacep_legacy_string_erro_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "erro": "true" })),
        )
        .mount(&mock_server)
        .await;

    let client = viacep_client(&mock_server);
    let zipcode = validate_cep(Some("99999-999")).unwrap();
    let result = client.lookup(&zipcode).await.unwrap();

    assert!(!result.found);
}

#[tokio::test]
async fn test_viacep_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = viacep_client(&mock_server);
    let zipcode = validate_cep(Some("01001000")).unwrap();
    let err = client.lookup(&zipcode).await.unwrap_err();

    match err {
        ClientError::Status {
            provider, status, ..
        } => {
            assert_eq!(provider, Provider::ViaCep);
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_viacep_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = viacep_client(&mock_server);
    let zipcode = validate_cep(Some("01001000")).unwrap();
    let err = client.lookup(&zipcode).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Parse {
            provider: Provider::ViaCep,
            ..
        }
    ));
}

#[tokio::test]
async fn test_viacep_connection_refused() {
    // Reserve a free port, then release it so nothing is listening there
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = ViaCepClient::new(format!("{}/ws/{{cep}}/json/", uri), Duration::from_secs(2))
        .unwrap();
    let zipcode = validate_cep(Some("01001000")).unwrap();
    let err = client.lookup(&zipcode).await.unwrap_err();

    assert_eq!(err.provider(), Provider::ViaCep);
    assert!(matches!(
        err,
        ClientError::Transport { .. } | ClientError::Timeout { .. }
    ));
}

#[tokio::test]
async fn test_weather_api_successful_response() {
    let mock_server = MockServer::start().await;

    let mock_response = serde_json::json!({
        "location": {
            "name": "Sao Paulo",
            "region": "Sao Paulo",
            "country": "Brazil",
            "localtime": "2026-01-10 14:00"
        },
        "current": {
            "temp_c": 32.2,
            "temp_f": 90.0,
            "last_updated": "2026-01-10 13:45",
            "condition": { "text": "Sunny" }
        }
    });

    // wiremock matches on the decoded value, so this also checks the encoding round-trips
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "test_key"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("aqi", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = weather_client(&mock_server, Duration::from_secs(10));
    let observation = client.current("São Paulo").await.unwrap();

    assert_eq!(observation.temperature_celsius, 32.2);
    assert_eq!(observation.temperature_fahrenheit, 90.0);
}

#[tokio::test]
async fn test_weather_api_city_with_reserved_characters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "Embu das Artes & Cia"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": { "temp_c": 20.0, "temp_f": 68.0 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = weather_client(&mock_server, Duration::from_secs(10));
    let observation = client.current("Embu das Artes & Cia").await.unwrap();

    assert_eq!(observation.temperature_celsius, 20.0);
}

#[tokio::test]
async fn test_weather_api_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&mock_server)
        .await;

    let client = weather_client(&mock_server, Duration::from_secs(10));
    let err = client.current("Atlantis").await.unwrap_err();

    match err {
        ClientError::Status {
            provider,
            status,
            body,
        } => {
            assert_eq!(provider, Provider::WeatherApi);
            assert_eq!(status, 400);
            assert!(body.contains("No matching location"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_weather_api_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "current": { "temp_c": 1.0, "temp_f": 33.8 } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = weather_client(&mock_server, Duration::from_millis(200));
    let err = client.current("Curitiba").await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Timeout {
            provider: Provider::WeatherApi
        }
    ));
}

#[tokio::test]
async fn test_weather_api_missing_current_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "location": { "name": "Curitiba" }
        })))
        .mount(&mock_server)
        .await;

    let client = weather_client(&mock_server, Duration::from_secs(10));
    let err = client.current("Curitiba").await.unwrap_err();

    assert!(matches!(err, ClientError::Parse { .. }));
}
