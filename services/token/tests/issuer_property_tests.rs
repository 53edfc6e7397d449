//! Property-based tests for token issuance.

use jwks_issuer::jwt::{IssuePolicy, JwtSerializer};
use jwks_issuer::{IssuerError, KeyStore, SqliteKeyStore, TokenIssuer};
use proptest::prelude::*;
use test_utils::fixtures::shared_private_pem;
use test_utils::{blank_subject_strategy, subject_strategy, FIXED_NOW};

const NOW: i64 = FIXED_NOW;

async fn issuer_with_keys() -> TokenIssuer<SqliteKeyStore> {
    let store = SqliteKeyStore::open_in_memory().unwrap();
    store.init().await.unwrap();
    store
        .insert(shared_private_pem().as_bytes(), NOW - 10)
        .await
        .unwrap();
    store
        .insert(shared_private_pem().as_bytes(), NOW + 3600)
        .await
        .unwrap();
    TokenIssuer::new(store, IssuePolicy::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    /// The subject and expiry policy survive into the signed claims.
    #[test]
    fn prop_claims_reflect_request(subject in subject_strategy(), want_expired in any::<bool>()) {
        let issued = tokio_test::block_on(async {
            issuer_with_keys().await.issue(&subject, want_expired, NOW).await.unwrap()
        });

        let (kid, claims) = JwtSerializer::decode_unverified(&issued.token).unwrap();
        prop_assert_eq!(&claims.sub, &subject);
        prop_assert_eq!(claims.iat, NOW);
        prop_assert_eq!(claims.exp, issued.expires_at);
        prop_assert_eq!(claims.is_expired_at(NOW), want_expired);
        prop_assert_eq!(kid.as_deref(), Some(if want_expired { "1" } else { "2" }));
    }

    /// Subjects without content are rejected as client errors.
    #[test]
    fn prop_blank_subject_rejected(subject in blank_subject_strategy()) {
        let err = tokio_test::block_on(async {
            issuer_with_keys().await.issue(&subject, false, NOW).await.unwrap_err()
        });

        prop_assert!(matches!(err, IssuerError::MissingSubject));
        prop_assert!(err.is_client_error());
    }
}
