use crate::support::*;
use account_reload::{
    Account, AccountService, AdapterRegistry, Handle, IdentityProvider, Izly, LocalAccount,
    LocalInstance, Reconnection, ReloadDispatcher, ReloadError, ReloadService, Session,
    Turboself,
};
use assert_json_diff::assert_json_eq;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn dispatcher_with_all() -> ReloadDispatcher {
    let izly_client = Arc::new(FakeClient::labelled("izly"));
    let registry = AdapterRegistry::builder()
        .pronote(|| async {
            Ok::<_, ReloadError>(FixedInstanceReloader {
                result: pronote_pair,
            })
        })
        .multi(|| async {
            Ok::<_, ReloadError>(FixedInstanceReloader { result: multi_pair })
        })
        .turboself(|| async { Ok::<_, ReloadError>(TurboselfReloader) })
        .izly(move || {
            let client = Arc::clone(&izly_client);
            async move { Ok::<_, ReloadError>(IzlyReloader { client }) }
        })
        .ard(|| async {
            Ok::<_, ReloadError>(ArdReloader {
                balances: Some(json!([{"label": "restauration", "amount": 8.1}])),
                calls: Arc::new(AtomicUsize::new(0)),
            })
        })
        .skolengo(|| async { Ok::<_, ReloadError>(BumpingSessionReloader) })
        .ecole_directe(|| async { Ok::<_, ReloadError>(BumpingSessionReloader) })
        .build();
    ReloadDispatcher::new(registry)
}

#[tokio::test]
async fn test_pronote_returns_adapter_pair() {
    let dispatcher = dispatcher_with_all();
    let account = Account::Pronote(Session::new(credentials(json!({"token": "prev"}))));

    match dispatcher.reload(&account).await.unwrap() {
        Reconnection::Pronote(reconnected) => {
            assert_eq!(reconnected.instance.unwrap().client().describe(), "pronote");
            assert_json_eq!(
                reconnected.authentication.to_value(),
                json!({"url": "https://demo.index-education.net", "token": "next"})
            );
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_multi_returns_adapter_pair() {
    let dispatcher = dispatcher_with_all();
    let account = Account::Multi(Session::new(credentials(json!({"refreshAuthToken": "r1"}))));

    match dispatcher.reload(&account).await.unwrap() {
        Reconnection::Multi(reconnected) => {
            assert_eq!(reconnected.instance.unwrap().client().describe(), "multi");
            assert_eq!(
                reconnected.authentication.get("refreshAuthToken"),
                Some(&json!("r2"))
            );
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_local_scenario_without_raw_data() {
    let dispatcher = ReloadDispatcher::default();
    let account = Account::Local(LocalAccount {
        identity_provider: Some(IdentityProvider {
            raw_data: None,
            ..IdentityProvider::default()
        }),
    });

    match dispatcher.reload(&account).await.unwrap() {
        Reconnection::Local(reconnected) => {
            assert_eq!(reconnected.instance, Some(LocalInstance::Ready));
            assert_eq!(reconnected.instance.unwrap().to_value(), json!(true));
            assert!(reconnected.authentication);
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_local_always_resolves_with_true_authentication() {
    let dispatcher = ReloadDispatcher::default();
    let payloads = [None, Some(json!(null)), Some(json!("")), Some(json!({"ine": "123"}))];

    for raw_data in payloads {
        let account = Account::Local(LocalAccount::with_raw_data(raw_data));
        let reconnection = dispatcher.reload(&account).await.unwrap();
        assert_eq!(reconnection.authentication_json().unwrap(), Some(json!(true)));
    }
}

#[tokio::test]
async fn test_unrecognized_resolves_to_empty_pair() {
    let dispatcher = dispatcher_with_all();
    let account = Account::Unrecognized {
        service: "appscho".to_string(),
    };

    let reconnection = dispatcher.reload(&account).await.unwrap();

    assert!(matches!(reconnection, Reconnection::Unrecognized));
    assert!(!reconnection.has_instance());
    assert_eq!(reconnection.authentication_json().unwrap(), None);
}

#[tokio::test]
async fn test_turboself_keeps_input_instance() {
    let dispatcher = dispatcher_with_all();
    let instance: Handle<Turboself> = Handle::new(FakeClient::labelled("turboself"));
    let account = Account::Turboself(
        Session::new(credentials(json!({"username": "jdoe", "session": {"token": "old"}})))
            .with_instance(instance.clone()),
    );

    match dispatcher.reload(&account).await.unwrap() {
        Reconnection::Turboself(reconnected) => {
            assert!(reconnected.instance.unwrap().ptr_eq(&instance));
            assert_json_eq!(
                reconnected.authentication.to_value(),
                json!({"username": "jdoe", "session": {"token": "refreshed"}})
            );
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_turboself_without_instance_stays_without() {
    let dispatcher = dispatcher_with_all();
    let account = Account::Turboself(Session::new(credentials(json!({"username": "jdoe"}))));

    let reconnection = dispatcher.reload(&account).await.unwrap();

    assert_eq!(reconnection.service(), AccountService::Turboself);
    assert!(!reconnection.has_instance());
}

#[tokio::test]
async fn test_izly_scenario_keeps_authentication() {
    let dispatcher = dispatcher_with_all();
    let account = Account::Izly(Session::new(credentials(json!({"token": "abc"}))));

    match dispatcher.reload(&account).await.unwrap() {
        Reconnection::Izly(reconnected) => {
            assert_eq!(reconnected.instance.unwrap().client().describe(), "izly");
            assert_json_eq!(reconnected.authentication.to_value(), json!({"token": "abc"}));
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_ard_adds_only_balances() {
    let dispatcher = dispatcher_with_all();
    let original = json!({"username": "jdoe", "password": "pw", "pid": "p-1"});
    let account = Account::Ard(Session::new(credentials(original.clone())));

    match dispatcher.reload(&account).await.unwrap() {
        Reconnection::Ard(reconnected) => {
            assert!(reconnected.instance.is_some());
            let authentication = reconnected.authentication;
            assert_eq!(authentication.len(), 4);
            for (key, value) in original.as_object().unwrap() {
                assert_eq!(authentication.get(key), Some(value));
            }
            assert_eq!(
                authentication.get("balances"),
                Some(&json!([{"label": "restauration", "amount": 8.1}]))
            );
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_ard_balances_failure_rejects_after_reload() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let registry = AdapterRegistry::builder()
        .ard(move || {
            let calls = Arc::clone(&counter);
            async move {
                Ok::<_, ReloadError>(ArdReloader {
                    balances: None,
                    calls,
                })
            }
        })
        .build();
    let dispatcher = ReloadDispatcher::new(registry);
    let account = Account::Ard(Session::new(credentials(json!({"username": "jdoe"}))));

    let result = dispatcher.reload(&account).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    match result {
        Err(ReloadError::Provider { service, message }) => {
            assert_eq!(service, AccountService::Ard);
            assert_eq!(message, "payments unavailable");
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(reconnection) => panic!("expected failure, got {}", reconnection.service()),
    }
}

#[tokio::test]
async fn test_skolengo_and_ecoledirecte_pass_through() {
    let dispatcher = dispatcher_with_all();
    let skolengo = Account::Skolengo(Session::new(credentials(json!({"generation": 1}))));
    let ecole_directe = Account::EcoleDirecte(Session::new(credentials(json!({"account": 5}))));

    match dispatcher.reload(&skolengo).await.unwrap() {
        Reconnection::Skolengo(reconnected) => {
            assert_eq!(reconnected.instance.unwrap().client().describe(), "fresh");
            assert_eq!(reconnected.authentication.get("generation"), Some(&json!(2)));
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }

    match dispatcher.reload(&ecole_directe).await.unwrap() {
        Reconnection::EcoleDirecte(reconnected) => {
            assert!(reconnected.instance.is_some());
            assert_json_eq!(
                reconnected.authentication.to_value(),
                json!({"account": 5, "generation": 1})
            );
        }
        other => panic!("unexpected reconnection for {}", other.service()),
    }
}

#[tokio::test]
async fn test_adapter_errors_propagate_unchanged() {
    let registry = AdapterRegistry::builder()
        .pronote(|| async {
            Ok::<_, ReloadError>(FixedInstanceReloader {
                result: pronote_expired,
            })
        })
        .turboself(|| async { Ok::<_, ReloadError>(FailingTurboselfReloader) })
        .build();
    let dispatcher = ReloadDispatcher::new(registry);

    let pronote = Account::Pronote(Session::new(credentials(json!({}))));
    let turboself = Account::Turboself(Session::new(credentials(json!({}))));

    assert!(matches!(
        dispatcher.reload(&pronote).await,
        Err(ReloadError::SessionExpired)
    ));
    let error = dispatcher.reload(&turboself).await.unwrap_err();
    assert!(matches!(error, ReloadError::BadCredentials));
    assert!(error.requires_login());
}

#[tokio::test]
async fn test_reload_does_not_mutate_account() {
    let dispatcher = dispatcher_with_all();
    let instance: Handle<Izly> = Handle::new(FakeClient::labelled("stale"));
    let account = Account::Izly(
        Session::new(credentials(json!({"token": "abc"}))).with_instance(instance.clone()),
    );

    dispatcher.reload(&account).await.unwrap();

    match &account {
        Account::Izly(session) => {
            assert!(session.instance.as_ref().unwrap().ptr_eq(&instance));
            assert_eq!(session.authentication.get("token"), Some(&json!("abc")));
        }
        other => panic!("unexpected account {other}"),
    }
}
