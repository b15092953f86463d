#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use async_trait::async_trait;
use chrono::Utc;
use entity::money_requests::{self, MoneyRequestStatus};
use entity::users::{self, UserRole};
use entity::bank_details;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema, Set,
};
use std::sync::{Arc, Mutex};

use wallet_desk::errors::AppError;
use wallet_desk::forms::proof_image::ProofImage;
use wallet_desk::services::image_host::{HostedImage, ImageHost};
use wallet_desk::services::submission_guard::SubmissionGuard;
use wallet_desk::utils::jwt::create_jwt_token;

pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00,
];

/// Records uploads instead of talking to a real image host.
#[derive(Default)]
pub struct StubImageHost {
    pub uploads: Mutex<Vec<String>>,
    pub destroyed: Mutex<Vec<String>>,
    pub fail_uploads: bool,
}

impl StubImageHost {
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Default::default()
        }
    }

    pub fn upload_folders(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn destroyed_ids(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(&self, image: &ProofImage, folder: &str) -> Result<HostedImage, AppError> {
        if self.fail_uploads {
            return Err(AppError::image_host("stub upload failure"));
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(folder.to_string());
        let public_id = format!("{}/{}", folder, uploads.len());
        Ok(HostedImage {
            secure_url: format!("https://img.test/{}.{}", public_id, image.extension),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AppError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub struct TestContext {
    pub db: DatabaseConnection,
    pub host: Arc<StubImageHost>,
    pub guard: web::Data<SubmissionGuard>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_host(StubImageHost::default()).await
    }

    pub async fn with_host(host: StubImageHost) -> Self {
        Self {
            db: setup_db().await,
            host: Arc::new(host),
            guard: web::Data::new(SubmissionGuard::new()),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let host: Arc<dyn ImageHost> = self.host.clone();
        App::new()
            .app_data(web::Data::new(self.db.clone()))
            .app_data(web::Data::from(host))
            .app_data(self.guard.clone())
            .service(wallet_desk::routes::api::configure_routes())
    }
}

/// One in-memory SQLite connection, so every query sees the same database.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);
    let tables = [
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(bank_details::Entity),
        schema.create_table_from_entity(money_requests::Entity),
    ];
    for table in tables.iter() {
        db.execute(db.get_database_backend().build(table))
            .await
            .unwrap();
    }
    db
}

pub async fn seed_user(db: &DatabaseConnection, name: &str, role: UserRole) -> users::Model {
    let now = Utc::now().naive_utc();
    users::ActiveModel {
        name: Set(name.to_string()),
        email: Set(format!("{}@wallet.test", name.to_lowercase())),
        role: Set(role),
        wallet_balance: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_bank_details(
    db: &DatabaseConnection,
    user_id: i32,
    upiid: &str,
    account_details: &str,
) -> bank_details::Model {
    let now = Utc::now().naive_utc();
    bank_details::ActiveModel {
        user_id: Set(user_id),
        upiid: Set(upiid.to_string()),
        account_details: Set(account_details.to_string()),
        public_id: Set(String::new()),
        secure_url: Set(String::new()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_request(
    db: &DatabaseConnection,
    user: &users::Model,
    amount: i64,
    status: MoneyRequestStatus,
) -> money_requests::Model {
    let now = Utc::now().naive_utc();
    money_requests::ActiveModel {
        user_id: Set(user.id),
        name: Set(user.name.clone()),
        transaction_id: Set(format!("TXN-{}-{}", user.id, amount)),
        amount: Set(Decimal::from(amount)),
        upiid: Set(String::new()),
        account_number: Set(String::new()),
        is_pro_recharge: Set(false),
        secure_url: Set("https://img.test/proofs/seed.png".to_string()),
        public_id: Set("proofs/seed".to_string()),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub fn bearer(user: &users::Model) -> (header::HeaderName, String) {
    let token = create_jwt_token(user.id, user.role).unwrap();
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Status of a request, whether the app answered it or a middleware refused it.
pub async fn status_of<S, B>(app: &S, req: Request) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    match test::try_call_service(app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

pub fn get(uri: &str, user: &users::Model) -> TestRequest {
    TestRequest::get().uri(uri).insert_header(bearer(user))
}

const BOUNDARY: &str = "wallet-desk-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Finishes the body and attaches it to `req` with the matching header.
    pub fn attach(mut self, req: TestRequest) -> TestRequest {
        self.buf
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        req.insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(self.buf)
    }
}

pub fn add_money_body(amount: &str, transaction_id: &str) -> MultipartBody {
    MultipartBody::new()
        .text("amount", amount)
        .text("transactionId", transaction_id)
        .file("image", "shot.png", PNG_BYTES)
}
