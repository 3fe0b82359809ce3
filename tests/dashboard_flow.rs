//! Dashboard feeds against a mocked API: optimistic update then
//! reconciliation, and list assembly.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use paie::api::client::ApiClient;
use paie::api::paiement::{CreatePaiement, StatsMoisCourant, payer_payslip};
use paie::bus::{DomainEvent, EventBus};
use paie::config::Config;
use paie::dashboard::{ListsFeed, StatsFeed, SyncPhase};
use paie::model::ModePaiement;

fn client_for(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&Config::for_url(server.base_url())).unwrap())
}

async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 2s");
}

#[tokio::test(flavor = "multi_thread")]
async fn stats_feed_applies_optimistic_patch_then_settles_on_server_truth() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/paiement/stats/entreprise/5/mois-courant");
            then.status(200).json_body(json!({
                "actifs": 12,
                "masseSalariale": 1_000_000.0,
                "montantPaye": 400_000.0,
                "montantRestant": 600_000.0
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/paiement");
            then.status(201)
                .json_body(json!({ "montant": 15_000.0, "payslipId": 42 }));
        })
        .await;

    let api = client_for(&server);
    let bus = EventBus::new();
    let feed = StatsFeed::attach(Arc::clone(&api), &bus, 5);

    // initial authoritative load
    feed.refresh().await.unwrap();
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.phase, SyncPhase::Settled);
    assert_eq!(snapshot.stats.montant_paye, 400_000.0);
    assert_eq!(snapshot.stats.actifs, 12);

    // payment: the optimistic patch is visible synchronously after the call
    payer_payslip(
        &api,
        &bus,
        &CreatePaiement {
            payslip_id: 42,
            montant: 15_000.0,
            mode: ModePaiement::Wave,
            date_paiement: None,
            pdf_recu: None,
        },
    )
    .await
    .unwrap();

    {
        let snapshot = feed.snapshot();
        // either still optimistic, or the reconcile already landed
        assert!(
            snapshot.stats.montant_paye == 415_000.0 || snapshot.stats.montant_paye == 400_000.0
        );
    }

    // the authoritative re-fetch wins in the end
    wait_until(|| {
        let s = feed.snapshot();
        s.phase == SyncPhase::Settled && s.stats.montant_paye == 400_000.0
    })
    .await;
    assert_eq!(feed.snapshot().stats.montant_restant, 600_000.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn stats_feed_keeps_last_known_values_when_the_refetch_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/paiement/stats/entreprise/6/mois-courant");
            then.status(503).json_body(json!({ "message": "indisponible" }));
        })
        .await;

    let api = client_for(&server);
    let bus = EventBus::new();
    let feed = StatsFeed::attach(Arc::clone(&api), &bus, 6);

    bus.emit(&DomainEvent::PaiementCreated(paie::PaiementCreated {
        montant: 10_000.0,
        payslip_id: 1,
    }));

    wait_until(|| feed.snapshot().error.is_some()).await;

    let snapshot = feed.snapshot();
    // the optimistic figure stays visible, the error is surfaced alongside
    assert_eq!(snapshot.stats.montant_paye, 10_000.0);
    assert_eq!(snapshot.phase, SyncPhase::StaleOptimistic);
    assert_eq!(snapshot.error.as_deref(), Some("indisponible"));
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_discards_a_stats_response_that_arrives_late() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/paiement/stats/entreprise/8/mois-courant");
            then.status(200)
                .delay(Duration::from_millis(300))
                .json_body(json!({
                    "actifs": 4,
                    "masseSalariale": 500_000.0,
                    "montantPaye": 123_000.0,
                    "montantRestant": 377_000.0
                }));
        })
        .await;

    let api = client_for(&server);
    let bus = EventBus::new();
    let feed = StatsFeed::attach(Arc::clone(&api), &bus, 8);

    // the payment kicks off a reconcile whose response will arrive late
    bus.emit(&DomainEvent::PaiementCreated(paie::PaiementCreated {
        montant: 5_000.0,
        payslip_id: 1,
    }));
    // logout while that fetch is still in flight
    bus.emit(&DomainEvent::Logout);

    let snapshot = feed.snapshot();
    assert_eq!(snapshot.stats, StatsMoisCourant::default());
    assert_eq!(snapshot.phase, SyncPhase::Settled);

    // the delayed response lands after the reset and must be dropped
    tokio::time::sleep(Duration::from_millis(600)).await;
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.stats, StatsMoisCourant::default());
    assert_eq!(snapshot.phase, SyncPhase::Settled);
    assert!(snapshot.error.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_initial_load_leaves_pristine_zeros_settled() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/paiement/stats/entreprise/9/mois-courant");
            then.status(503).json_body(json!({ "message": "indisponible" }));
        })
        .await;

    let api = client_for(&server);
    let bus = EventBus::new();
    let feed = StatsFeed::attach(Arc::clone(&api), &bus, 9);

    assert!(feed.refresh().await.is_err());

    // no optimistic patch was ever applied, so the zeros are not "optimistic"
    let snapshot = feed.snapshot();
    assert_eq!(snapshot.stats, StatsMoisCourant::default());
    assert_eq!(snapshot.phase, SyncPhase::Settled);
    assert_eq!(snapshot.error.as_deref(), Some("indisponible"));
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_feed_assembles_recent_and_upcoming_views() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/employe/entreprise/77");
            then.status(200).json_body(json!([
                {
                    "id": 1, "entrepriseId": 77, "nomComplet": "Awa Ndiaye",
                    "typeContrat": "FIXE", "salaireFixe": 300_000.0,
                    "statut": "ACTIF", "actif": true,
                    "createdAt": "2025-01-10T00:00:00Z", "updatedAt": "2025-01-10T00:00:00Z"
                },
                {
                    "id": 2, "entrepriseId": 77, "nomComplet": "Moussa Fall",
                    "typeContrat": "JOURNALIER", "tauxJournalier": 15_000.0,
                    "statut": "ACTIF", "actif": true,
                    "createdAt": "2025-02-01T00:00:00Z", "updatedAt": "2025-02-01T00:00:00Z"
                }
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/payslip/employe/1");
            then.status(200).json_body(json!([
                {
                    "id": 101, "employeId": 1, "netAPayer": 240_000.0, "statut": "PAYE",
                    "createdAt": "2025-09-05T10:00:00Z", "updatedAt": "2025-09-05T10:00:00Z"
                }
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/payslip/employe/2");
            then.status(200).json_body(json!([
                {
                    "id": 102, "employeId": 2, "netAPayer": 150_000.0, "statut": "EN_ATTENTE",
                    "createdAt": "2025-09-10T10:00:00Z", "updatedAt": "2025-09-10T10:00:00Z"
                }
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/paiement/payslip/101");
            then.status(200).json_body(json!([
                {
                    "id": 201, "payslipId": 101, "montant": 240_000.0, "mode": "VIREMENT",
                    "createdAt": "2025-09-06T10:00:00Z"
                }
            ]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/paiement/payslip/102");
            then.status(200).json_body(json!([]));
        })
        .await;

    let api = client_for(&server);
    let bus = EventBus::new();
    let feed = ListsFeed::attach(Arc::clone(&api), &bus, 77);

    feed.refresh().await.unwrap();
    let lists = feed.snapshot();

    // newest payslip first, each joined with its employé
    assert_eq!(lists.recent_payslips.len(), 2);
    assert_eq!(lists.recent_payslips[0].payslip.id, 102);
    assert_eq!(
        lists.recent_payslips[0]
            .employe
            .as_ref()
            .map(|e| e.nom_complet.as_str()),
        Some("Moussa Fall")
    );

    assert_eq!(lists.recent_payments.len(), 1);
    assert_eq!(lists.recent_payments[0].paiement.id, 201);
    assert_eq!(
        lists.recent_payments[0]
            .employe
            .as_ref()
            .map(|e| e.nom_complet.as_str()),
        Some("Awa Ndiaye")
    );

    // only EN_ATTENTE payslips are upcoming
    assert_eq!(lists.upcoming_payments.len(), 1);
    assert_eq!(lists.upcoming_payments[0].payslip.id, 102);

    // logout wipes everything
    bus.emit(&DomainEvent::Logout);
    let lists = feed.snapshot();
    assert!(lists.recent_payslips.is_empty());
    assert!(lists.recent_payments.is_empty());
    assert!(lists.upcoming_payments.is_empty());
}
