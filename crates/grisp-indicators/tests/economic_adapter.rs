//! Integration tests for `EconomicAdapter` using wiremock HTTP mocks.

use grisp_core::format::FAILURE_PREFIX;
use grisp_core::TrailingWindow;
use grisp_indicators::EconomicAdapter;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INDICATOR_PATH: &str = "/v2/country/US/indicator/SP.POP.TOTL";

fn test_adapter(server: &MockServer) -> EconomicAdapter {
    EconomicAdapter::with_base_url(
        "grisp-test/0.1",
        TrailingWindow::new(2024, 10),
        &format!("{}/v2", server.uri()),
    )
    .expect("adapter construction should not fail")
}

fn metadata() -> serde_json::Value {
    json!({"page": 1, "pages": 9, "per_page": 1, "total": 9, "lastupdated": "2024-06-28"})
}

#[tokio::test]
async fn fetch_renders_scaled_value_with_metadata_names() {
    let server = MockServer::start().await;
    let body = json!([
        metadata(),
        [{
            "indicator": {"id": "SP.POP.TOTL", "value": "Population, total"},
            "country": {"id": "US", "value": "United States"},
            "countryiso3code": "USA",
            "date": "2022",
            "value": 331_000_000,
            "unit": "",
            "obs_status": "",
            "decimal": 0
        }]
    ]);

    Mock::given(method("GET"))
        .and(path(INDICATOR_PATH))
        .and(query_param("format", "json"))
        .and(query_param("per_page", "1"))
        .and(query_param("date", "2014:2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("US:SP.POP.TOTL").await;

    assert_eq!(
        output,
        "Economic Indicator for United States:\n\
         - Population, total: 331.00 Million (2022)\n\
         - Source: World Bank"
    );
}

#[tokio::test]
async fn fetch_falls_back_to_raw_codes_without_metadata() {
    let server = MockServer::start().await;
    let body = json!([metadata(), [{"date": "2022", "value": 331_000_000}]]);

    Mock::given(method("GET"))
        .and(path(INDICATOR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("US:SP.POP.TOTL").await;

    assert_eq!(
        output,
        "Economic Indicator for US:\n\
         - SP.POP.TOTL: 331.00 Million (2022)\n\
         - Source: World Bank"
    );
}

#[tokio::test]
async fn malformed_key_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("USSPPOPTOTL").await;

    assert_eq!(
        output,
        "Invalid input format: expected '<country_code>:<indicator_code>' \
         (e.g. 'US:SP.POP.TOTL'), got 'USSPPOPTOTL'."
    );
}

#[tokio::test]
async fn null_value_reports_not_available() {
    let server = MockServer::start().await;
    let body = json!([
        metadata(),
        [{
            "indicator": {"id": "SP.POP.TOTL", "value": "Population, total"},
            "country": {"id": "US", "value": "United States"},
            "date": "2023",
            "value": null
        }]
    ]);

    Mock::given(method("GET"))
        .and(path(INDICATOR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("US:SP.POP.TOTL").await;

    assert_eq!(
        output,
        "Population, total for United States is not available for 2023."
    );
}

#[tokio::test]
async fn empty_data_reports_not_found() {
    let server = MockServer::start().await;
    let body = json!([{"page": 0, "pages": 0, "per_page": 1, "total": 0}, null]);

    Mock::given(method("GET"))
        .and(path("/v2/country/XX/indicator/SP.POP.TOTL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("XX:SP.POP.TOTL").await;

    assert!(output.starts_with("No data found for XX (SP.POP.TOTL)"), "{output}");
    assert!(output.contains("between 2014 and 2024"), "{output}");
}

#[tokio::test]
async fn api_error_envelope_is_rendered_as_failure() {
    let server = MockServer::start().await;
    let body = json!([{
        "message": [{"id": "120", "key": "Invalid value", "value": "The provided parameter value is not valid"}]
    }]);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("US:NOT.A.CODE").await;

    assert!(output.starts_with(FAILURE_PREFIX), "{output}");
    assert!(output.contains("'US:NOT.A.CODE'"), "{output}");
    assert!(output.contains("The provided parameter value is not valid"), "{output}");
}

#[tokio::test]
async fn server_error_is_rendered_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = test_adapter(&server).fetch("US:SP.POP.TOTL").await;

    assert!(output.starts_with(FAILURE_PREFIX), "{output}");
    assert!(output.contains("World Bank"), "{output}");
    assert!(output.contains("500"), "{output}");
}

#[tokio::test]
async fn repeated_fetch_is_identical() {
    let server = MockServer::start().await;
    let body = json!([metadata(), [{"date": "2021", "value": 2.5e12}]]);

    Mock::given(method("GET"))
        .and(path(INDICATOR_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(2)
        .mount(&server)
        .await;

    let adapter = test_adapter(&server);
    let first = adapter.fetch("US:SP.POP.TOTL").await;
    let second = adapter.fetch("US:SP.POP.TOTL").await;

    assert_eq!(first, second);
    assert!(first.contains("2.50 Trillion (2021)"), "{first}");
}
