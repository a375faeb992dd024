use ctfstats_lib::{CachedClient, CtfStatsError, DiskCache, RetryConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "<html><body>team</body></html>";

fn fast_retry(max_retries: usize) -> RetryConfig {
    RetryConfig {
        max_retries,
        base_delay_ms: 1,
        max_delay_ms: 5,
    }
}

fn temp_cache() -> DiskCache {
    let dir = std::env::temp_dir().join(format!("ctfstats-client-{}", uuid::Uuid::new_v4()));
    DiskCache::new(dir, None)
}

#[tokio::test]
async fn fetches_team_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/155626"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CachedClient::with_base_url(&mock_server.uri(), None).with_retry(fast_retry(0));
    let body = client.get_team_page("155626").await.unwrap();
    assert_eq!(body, PAGE);
}

#[tokio::test]
async fn retries_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/7"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/team/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CachedClient::with_base_url(&mock_server.uri(), None).with_retry(fast_retry(3));
    let body = client.get_team_page("7").await.unwrap();
    assert_eq!(body, PAGE);
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/7"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = CachedClient::with_base_url(&mock_server.uri(), None).with_retry(fast_retry(2));
    let result = client.get_team_page("7").await;
    assert!(matches!(
        result,
        Err(CtfStatsError::Api(ctfstats_lib::ctftime_api::Error::HttpStatus {
            status: 500,
            ..
        }))
    ));
}

#[tokio::test]
async fn does_not_retry_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/0"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = CachedClient::with_base_url(&mock_server.uri(), None).with_retry(fast_retry(3));
    assert!(client.get_team_page("0").await.is_err());
}

#[tokio::test]
async fn second_fetch_served_from_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/99"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = temp_cache();
    let dir = cache.dir().to_path_buf();
    let client =
        CachedClient::with_base_url(&mock_server.uri(), Some(cache)).with_retry(fast_retry(0));

    assert_eq!(client.get_team_page("99").await.unwrap(), PAGE);
    assert_eq!(client.get_team_page("99").await.unwrap(), PAGE);
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/5"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = CachedClient::with_base_url(&mock_server.uri(), Some(temp_cache()))
        .with_retry(fast_retry(0));

    assert!(client.get_team_page("5").await.is_err());
    assert!(client.get_team_page("5").await.is_err());
}

#[tokio::test]
async fn unusable_cache_does_not_fail_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/team/8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(2)
        .mount(&mock_server)
        .await;

    // A regular file where the cache directory should be: reads and writes both fail.
    let blocker = std::env::temp_dir().join(format!("ctfstats-blocker-{}", uuid::Uuid::new_v4()));
    std::fs::write(&blocker, b"x").unwrap();
    let cache = DiskCache::new(&blocker, None);
    let client =
        CachedClient::with_base_url(&mock_server.uri(), Some(cache)).with_retry(fast_retry(0));

    assert_eq!(client.get_team_page("8").await.unwrap(), PAGE);
    assert_eq!(client.get_team_page("8").await.unwrap(), PAGE);
    assert!(blocker.is_file());
    std::fs::remove_file(blocker).unwrap();
}
