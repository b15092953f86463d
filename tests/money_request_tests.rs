mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use common::{
    add_money_body, bearer, get, seed_bank_details, seed_request, seed_user, status_of,
    MultipartBody, StubImageHost, TestContext,
};
use entity::money_requests::{self, MoneyRequestStatus};
use entity::users::{self, UserRole};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::Value;

fn post_money(user: &users::Model, body: MultipartBody) -> TestRequest {
    body.attach(TestRequest::post().uri("/money").insert_header(bearer(user)))
}

async fn stored_requests(ctx: &TestContext) -> u64 {
    money_requests::Entity::find().count(&ctx.db).await.unwrap()
}

#[actix_web::test]
async fn accepted_submission_tops_the_admin_queue() {
    let ctx = TestContext::new().await;
    let admin = seed_user(&ctx.db, "Admin", UserRole::Admin).await;
    let ravi = seed_user(&ctx.db, "Ravi", UserRole::User).await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    seed_bank_details(&ctx.db, asha.id, "asha@upi", "HDFC 000123").await;
    for amount in 1..=8 {
        seed_request(&ctx.db, &ravi, amount, MoneyRequestStatus::Pending).await;
    }
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, post_money(&asha, add_money_body("500", "TXN123")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], "Money request submitted");
    assert!(body.get("values").is_none());
    assert_eq!(body["data"]["status"], "PENDING");
    assert_eq!(body["data"]["upiid"], "asha@upi");
    assert_eq!(body["data"]["account_number"], "HDFC 000123");

    let queue: Value = test::call_and_read_body_json(&app, get("/admin/wallet?page=1", &admin).to_request()).await;
    assert_eq!(queue["pagination"]["total_items"], 9);
    let first = &queue["items"][0];
    assert_eq!(first["transaction_id"], "TXN123");
    assert_eq!(first["name"], "Asha");
    assert_eq!(first["user_id"], asha.id);
    assert_eq!(first["amount_formatted"], "₹500.00");

    assert_eq!(ctx.host.upload_folders(), vec!["proofs".to_string()]);
}

#[actix_web::test]
async fn payment_fields_come_from_bank_details_not_the_form() {
    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    seed_bank_details(&ctx.db, asha.id, "asha@upi", "HDFC 000123").await;
    let app = test::init_service(ctx.app()).await;

    let body = add_money_body("250", "TXN777")
        .text("upiid", "mallory@upi")
        .text("accountNumber", "SBI 999")
        .text("userId", "9999");
    let resp = test::call_service(&app, post_money(&asha, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let saved = money_requests::Entity::find().one(&ctx.db).await.unwrap().unwrap();
    assert_eq!(saved.user_id, asha.id);
    assert_eq!(saved.upiid, "asha@upi");
    assert_eq!(saved.account_number, "HDFC 000123");
}

#[actix_web::test]
async fn missing_bank_details_store_blank_payment_fields() {
    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    let app = test::init_service(ctx.app()).await;

    let body = add_money_body("250", "TXN778").text("isProRecharge", "true");
    let resp = test::call_service(&app, post_money(&asha, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let saved = money_requests::Entity::find().one(&ctx.db).await.unwrap().unwrap();
    assert_eq!(saved.upiid, "");
    assert_eq!(saved.account_number, "");
    assert!(saved.is_pro_recharge);
}

#[actix_web::test]
async fn non_positive_amount_never_reaches_the_action() {
    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    let app = test::init_service(ctx.app()).await;

    for amount in ["0", "-5"] {
        let resp = test::call_service(&app, post_money(&asha, add_money_body(amount, "TXN123")).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "amount {}", amount);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["fields"]["amount"][0], "Amount must be greater than 0");
        assert_eq!(body["values"]["amount"], amount);
        assert_eq!(body["values"]["transactionId"], "TXN123");
        assert!(body.get("success").is_none());
    }

    assert!(ctx.host.upload_folders().is_empty());
    assert_eq!(stored_requests(&ctx).await, 0);
}

#[actix_web::test]
async fn every_invalid_field_is_reported_with_the_draft() {
    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    let app = test::init_service(ctx.app()).await;

    let body = MultipartBody::new()
        .text("amount", "abc")
        .text("transactionId", "  ")
        .text("isProRecharge", "true");
    let resp = test::call_service(&app, post_money(&asha, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["amount"][0], "Amount must be a number");
    assert_eq!(body["fields"]["transactionId"][0], "Transaction ID is required");
    assert_eq!(body["fields"]["image"][0], "Attach the payment screenshot");
    assert_eq!(body["values"]["amount"], "abc");
    assert_eq!(body["values"]["isProRecharge"], true);
    assert_eq!(stored_requests(&ctx).await, 0);
}

#[actix_web::test]
async fn second_submission_in_flight_is_refused() {
    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    let app = test::init_service(ctx.app()).await;

    let first = ctx.guard.try_begin(asha.id).unwrap();
    let resp = test::call_service(&app, post_money(&asha, add_money_body("500", "TXN123")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "A submission is already in progress");
    assert!(ctx.host.upload_folders().is_empty());

    drop(first);
    let resp = test::call_service(&app, post_money(&asha, add_money_body("500", "TXN123")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(!ctx.guard.is_pending(asha.id));
}

#[actix_web::test]
async fn blocked_user_cannot_submit() {
    let ctx = TestContext::new().await;
    let blocked = seed_user(&ctx.db, "Blocked", UserRole::Blocked).await;
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, post_money(&blocked, add_money_body("500", "TXN123")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(stored_requests(&ctx).await, 0);
}

#[actix_web::test]
async fn failed_upload_keeps_the_draft_and_stores_nothing() {
    let ctx = TestContext::with_host(StubImageHost::failing()).await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, post_money(&asha, add_money_body("500", "TXN123")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to upload image");
    assert_eq!(body["values"]["amount"], "500");
    assert_eq!(body["values"]["transactionId"], "TXN123");
    assert_eq!(stored_requests(&ctx).await, 0);
    assert!(!ctx.guard.is_pending(asha.id));
}

#[actix_web::test]
async fn history_lists_only_the_callers_requests() {
    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    let ravi = seed_user(&ctx.db, "Ravi", UserRole::User).await;
    let approved = seed_request(&ctx.db, &asha, 100, MoneyRequestStatus::Approved).await;
    seed_request(&ctx.db, &ravi, 200, MoneyRequestStatus::Pending).await;
    let pending = seed_request(&ctx.db, &asha, 300, MoneyRequestStatus::Pending).await;
    let app = test::init_service(ctx.app()).await;

    let body: Value = test::call_and_read_body_json(&app, get("/money", &asha).to_request()).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();

    assert_eq!(ids, vec![pending.id as i64, approved.id as i64]);
    assert_eq!(body["pagination"]["total_items"], 2);
    assert_eq!(body["data"][1]["status"], "APPROVED");
}

#[actix_web::test]
async fn failed_insert_removes_the_uploaded_screenshot() {
    use sea_orm::ConnectionTrait;

    let ctx = TestContext::new().await;
    let asha = seed_user(&ctx.db, "Asha", UserRole::User).await;
    ctx.db
        .execute_unprepared("DROP TABLE money_requests")
        .await
        .unwrap();
    let app = test::init_service(ctx.app()).await;

    let resp = test::call_service(&app, post_money(&asha, add_money_body("500", "TXN123")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Database error occurred");
    assert_eq!(body["values"]["amount"], "500");

    assert_eq!(ctx.host.upload_folders(), vec!["proofs".to_string()]);
    assert_eq!(ctx.host.destroyed_ids(), vec!["proofs/1".to_string()]);
}

#[actix_web::test]
async fn submission_requires_a_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = add_money_body("500", "TXN123").attach(TestRequest::post().uri("/money"));
    assert_eq!(status_of(&app, req.to_request()).await, StatusCode::UNAUTHORIZED);
}
