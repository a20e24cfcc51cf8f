//! JWKS caching behaviour of the key set resolver

mod common;

use cognito_common::{CognitoOverrides, ResolveError};
use common::*;
use futures::future::join_all;
use std::sync::Arc;

#[tokio::test]
async fn key_set_is_fetched_once() {
    let jwks = MockJwks::start().await;
    jwks.serve_keys(vec![jwk(KID)], 1).await;
    let verifier = jwks.verifier();
    let token = mint_valid(&id_token_claims(3600));

    for _ in 0..5 {
        verifier
            .verify(&bearer_headers(&token), &overrides())
            .await
            .unwrap();
    }
    assert!(verifier.resolver().is_cached());
}

#[tokio::test]
async fn failed_verifications_still_reuse_the_cache() {
    let jwks = MockJwks::start().await;
    jwks.serve_keys(vec![jwk("other-kid")], 1).await;
    let verifier = jwks.verifier();
    let token = mint_valid(&id_token_claims(3600));

    for _ in 0..3 {
        assert!(verifier
            .verify(&bearer_headers(&token), &overrides())
            .await
            .is_err());
    }
}

#[tokio::test]
async fn clear_forces_a_refetch() {
    let jwks = MockJwks::start().await;
    jwks.serve_keys(vec![jwk(KID)], 2).await;
    let resolver = jwks.resolver();

    let first = resolver.resolve(REGION, USER_POOL_ID).await.unwrap();
    let cached = resolver.resolve(REGION, USER_POOL_ID).await.unwrap();
    assert!(Arc::ptr_eq(&first, &cached));

    resolver.clear();
    assert!(!resolver.is_cached());

    let refetched = resolver.resolve(REGION, USER_POOL_ID).await.unwrap();
    assert_eq!(*refetched, *first);
    assert!(!Arc::ptr_eq(&first, &refetched));
}

#[tokio::test]
async fn clones_share_one_cache() {
    let jwks = MockJwks::start().await;
    jwks.serve_keys(vec![jwk(KID)], 1).await;
    let resolver = jwks.resolver();
    let clone = resolver.clone();

    resolver.resolve(REGION, USER_POOL_ID).await.unwrap();
    assert!(clone.is_cached());
    clone.resolve(REGION, USER_POOL_ID).await.unwrap();
}

#[tokio::test]
async fn separate_resolvers_are_isolated() {
    let jwks = MockJwks::start().await;
    jwks.serve_keys(vec![jwk(KID)], 2).await;

    jwks.resolver().resolve(REGION, USER_POOL_ID).await.unwrap();
    jwks.resolver().resolve(REGION, USER_POOL_ID).await.unwrap();
}

#[tokio::test]
async fn cached_keys_are_served_for_any_pool() {
    let jwks = MockJwks::start().await;
    jwks.serve_keys(vec![jwk(KID)], 1).await;
    let verifier = jwks.verifier();
    let token = mint_valid(&id_token_claims(3600));

    verifier
        .verify(&bearer_headers(&token), &overrides())
        .await
        .unwrap();

    // A different pool is answered from the first pool's key set; the
    // token then fails on issuer, not on a fetch.
    let other_pool = CognitoOverrides::new("eu-west-1", "eu-west-1_Other", APP_CLIENT_ID);
    let result = verifier.verify(&bearer_headers(&token), &other_pool).await;
    assert!(matches!(
        result,
        Err(cognito_common::VerifyError::Auth(
            cognito_common::AuthError::InvalidToken
        ))
    ));
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let jwks = MockJwks::start().await;
    jwks.serve_status(500).await;
    let resolver = jwks.resolver();

    for _ in 0..2 {
        let err = resolver.resolve(REGION, USER_POOL_ID).await.unwrap_err();
        assert!(matches!(err, ResolveError::Fetch(_)));
    }
    assert!(!resolver.is_cached());
}

#[tokio::test]
async fn concurrent_first_calls_agree() {
    let jwks = MockJwks::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "keys": [jwk(KID)] })),
        )
        .expect(1..=8)
        .mount(&jwks.server)
        .await;

    let verifier = Arc::new(jwks.verifier());
    let token = mint_valid(&id_token_claims(3600));

    let calls = (0..8).map(|_| {
        let verifier = verifier.clone();
        let headers = bearer_headers(&token);
        async move { verifier.verify(&headers, &overrides()).await }
    });

    for result in join_all(calls).await {
        assert_eq!(result.unwrap().subject(), Some("user-123"));
    }
    assert!(verifier.resolver().is_cached());
}
