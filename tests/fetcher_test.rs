//! Fetch primitive tests against a mock gateway
//!
//! The gateway signals overload inside the body, so these tests stub the
//! busy page and count how many requests one logical fetch issues.

use daledou::client::Fetcher;
use daledou::config::FetchConfig;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUSY_BODY: &str = "<html><body>系统繁忙，请稍后再试</body></html>";
const CLEAN_BODY: &str = "<html><body><br />恭喜您获得斗豆*100<</body></html>";

fn test_fetcher(base_url: &str) -> Fetcher {
    let config = FetchConfig {
        busy_retry_delay_ms: 1,
        ..FetchConfig::default()
    };
    Fetcher::new(&config).unwrap().with_base_url(base_url)
}

/// Busy twice, then clean: exactly three requests, clean body returned
#[tokio::test]
async fn busy_then_clean_uses_three_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("cmd", "monthcard"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BUSY_BODY))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("cmd", "monthcard"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CLEAN_BODY))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(&mock_server.uri());
    let body = fetcher.get("uin=test", "cmd=monthcard&sub=1").await.unwrap();

    assert_eq!(body, CLEAN_BODY);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

/// Busy on every attempt: exactly three requests, last busy body returned
/// without an error
#[tokio::test]
async fn persistent_busy_returns_last_body_after_cap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BUSY_BODY))
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(&mock_server.uri());
    let body = fetcher.get("uin=test", "cmd=arena&op=challenge").await.unwrap();

    assert_eq!(body, BUSY_BODY);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}

/// A clean first response needs no retry
#[tokio::test]
async fn clean_body_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CLEAN_BODY))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(&mock_server.uri());
    let body = fetcher.get("uin=test", "cmd=wish&sub=1").await.unwrap();

    assert_eq!(body, CLEAN_BODY);
}

/// In-game error text is a valid payload, not a transport failure
#[tokio::test]
async fn error_body_is_returned_verbatim() {
    let mock_server = MockServer::start().await;
    let error_body = "<br />体力值不足，挑战失败<";

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(error_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = test_fetcher(&mock_server.uri());
    let body = fetcher.get("uin=test", "cmd=fight&B_UID=1").await.unwrap();

    assert_eq!(body, error_body);
}

/// A custom busy marker from configuration drives the retry decision
#[tokio::test]
async fn custom_busy_marker_is_honored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("please retry shortly"))
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        busy_marker: "please retry".to_string(),
        busy_retry_delay_ms: 1,
        ..FetchConfig::default()
    };
    let fetcher = Fetcher::new(&config)
        .unwrap()
        .with_base_url(&mock_server.uri());

    let body = fetcher.get("uin=test", "cmd=index").await.unwrap();

    assert_eq!(body, "please retry shortly");
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}
