//! Game-flow integration tests: balance, spend, score submission.

mod common;

use common::TestHarness;
use hoursnake_core::PlayerId;
use hoursnake_store::Store;
use serde_json::json;

// ============================================================================
// Balance
// ============================================================================

#[tokio::test]
async fn stars_for_unknown_player_is_zero() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/game/stars")
        .json(&json!({ "telegram_id": 111 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["stars"], 0);

    // A pure read: still no account afterwards.
    let player = PlayerId::new(111).unwrap();
    assert!(harness.store.get_account(player).unwrap().is_none());
}

#[tokio::test]
async fn stars_rejects_invalid_id() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/game/stars")
        .json(&json!({ "telegram_id": -1 }))
        .await;

    response.assert_status_bad_request();
}

// ============================================================================
// Spend
// ============================================================================

#[tokio::test]
async fn first_spend_grants_default_then_deducts() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/game/spend")
        .json(&json!({ "telegram_id": 111, "username": "alice" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);
    // First contact: 100-star grant minus the 1-star entry fee.
    assert_eq!(body["stars"], 99);
}

#[tokio::test]
async fn draining_the_balance_hits_a_soft_refusal() {
    let harness = TestHarness::with_config(|c| c.default_stars = 2);

    for expected in [1, 0] {
        let response = harness
            .server
            .post("/game/spend")
            .json(&json!({ "telegram_id": 111 }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["stars"], expected);
    }

    // Balance is 0: refused with ok:false, balance untouched, still HTTP 200.
    let response = harness
        .server
        .post("/game/spend")
        .json(&json!({ "telegram_id": 111 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["stars"], 0);
    assert_eq!(body["message"], "Not enough stars. Please top up first.");
}

#[tokio::test]
async fn zero_default_config_means_no_free_games() {
    let harness = TestHarness::with_config(|c| c.default_stars = 0);

    let response = harness
        .server
        .post("/game/spend")
        .json(&json!({ "telegram_id": 111 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], false);
    assert_eq!(body["stars"], 0);
}

// ============================================================================
// Score submission
// ============================================================================

#[tokio::test]
async fn submit_score_merges_monotonic_max() {
    let harness = TestHarness::new();

    for (score, best, improved) in [(10, 10, true), (7, 10, false), (15, 15, true)] {
        let response = harness
            .server
            .post("/game/score")
            .json(&json!({ "telegram_id": 111, "score": score }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["ok"], true);
        assert_eq!(body["best"], best);
        assert_eq!(body["improved"], improved);
    }
}

#[tokio::test]
async fn submit_score_rejects_negative() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/game/score")
        .json(&json!({ "telegram_id": 111, "score": -5 }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn submit_score_creates_the_account() {
    let harness = TestHarness::new();

    harness
        .server
        .post("/game/score")
        .json(&json!({ "telegram_id": 111, "score": 0, "username": "alice" }))
        .await
        .assert_status_ok();

    // First contact through score submission still grants the default.
    let response = harness
        .server
        .post("/game/stars")
        .json(&json!({ "telegram_id": 111 }))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["stars"], 100);
}

// ============================================================================
// Admin top-up
// ============================================================================

#[tokio::test]
async fn topup_credits_and_creates_if_absent() {
    let harness = TestHarness::with_config(|c| c.default_stars = 0);

    let response = harness
        .server
        .post("/admin/topup")
        .json(&json!({ "telegram_id": 111, "amount": 25 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["stars"], 25);

    // And the spend that was refused before now succeeds.
    let response = harness
        .server
        .post("/game/spend")
        .json(&json!({ "telegram_id": 111 }))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["stars"], 24);
}

#[tokio::test]
async fn topup_rejects_non_positive_amounts() {
    let harness = TestHarness::new();

    for amount in [0, -10] {
        let response = harness
            .server
            .post("/admin/topup")
            .json(&json!({ "telegram_id": 111, "amount": amount }))
            .await;
        response.assert_status_bad_request();
    }
}
