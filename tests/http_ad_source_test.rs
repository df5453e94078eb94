use ad_feed::core::{AdLoadError, AdSource};
use ad_feed::{HttpAdSource, NativeAd, SequentialAdLoader};
use httpmock::prelude::*;
use std::time::Duration;

fn source(server: &MockServer, path: &str) -> HttpAdSource {
    HttpAdSource::new(server.url(path), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_decodes_app_install_ad() {
    let server = MockServer::start();
    let ad_mock = server.mock(|when, then| {
        when.method(GET).path("/ad");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "type": "app_install",
                "headline": "Recipe Box",
                "body": "Cook something new tonight",
                "call_to_action": "Install",
                "icon": "recipe_box_icon",
                "store": "Play Store",
                "star_rating": 4.2
            }));
    });

    let ad = source(&server, "/ad").request_ad().await.unwrap();
    ad_mock.assert();
    match ad {
        NativeAd::AppInstall(ad) => {
            assert_eq!(ad.headline, "Recipe Box");
            assert_eq!(ad.star_rating, Some(4.2));
            assert!(ad.price.is_none());
        }
        other => panic!("expected app install ad, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_content_is_no_fill() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/empty");
        then.status(204);
    });

    let err = source(&server, "/empty").request_ad().await.unwrap_err();
    assert_eq!(err.code, AdLoadError::ERROR_CODE_NO_FILL);
}

#[tokio::test]
async fn test_status_codes_map_to_error_codes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let err = source(&server, "/missing").request_ad().await.unwrap_err();
    assert_eq!(err.code, AdLoadError::ERROR_CODE_INVALID_REQUEST);

    let err = source(&server, "/broken").request_ad().await.unwrap_err();
    assert_eq!(err.code, AdLoadError::ERROR_CODE_INTERNAL_ERROR);
}

#[tokio::test]
async fn test_undecodable_body_is_internal_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/garbage");
        then.status(200).body("<html>not an ad</html>");
    });

    let err = source(&server, "/garbage").request_ad().await.unwrap_err();
    assert_eq!(err.code, AdLoadError::ERROR_CODE_INTERNAL_ERROR);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let source = HttpAdSource::new("http://127.0.0.1:1/ad", Duration::from_secs(2)).unwrap();
    let err = source.request_ad().await.unwrap_err();
    assert_eq!(err.code, AdLoadError::ERROR_CODE_NETWORK_ERROR);
}

#[tokio::test]
async fn test_loader_issues_exactly_quota_requests() {
    let server = MockServer::start();
    let ad_mock = server.mock(|when, then| {
        when.method(GET).path("/unit");
        then.status(500);
    });

    let loader = SequentialAdLoader::new(source(&server, "/unit"), 5);
    let ads = loader.load().await;

    assert!(ads.is_empty());
    ad_mock.assert_hits(5);
}
