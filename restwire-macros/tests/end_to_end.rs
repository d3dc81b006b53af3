//! Generated clients talking to generated RPC services over an in-memory
//! transport.

use restwire::client::{ClientError, ClientFactory};
use restwire::server::{HttpDispatcher, RpcRegistry, ServiceError};
use restwire::transport::MemoryTransport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct Hello {
    pub person: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub greeting: String,
}

#[restwire::rpc]
pub trait Greeter {
    async fn say_hello(&self, request: Hello) -> Result<Greeting, ServiceError>;
    async fn shout(&self, text: String) -> String;
}

/// Application error every generated method converts into.
#[derive(Debug)]
pub enum AppError {
    Rejected(String),
    Call(ClientError),
}

impl From<ClientError> for AppError {
    fn from(error: ClientError) -> Self {
        match error.payload() {
            Some(payload) if payload.code == "InvalidArgument" => {
                AppError::Rejected(payload.message.clone())
            }
            _ => AppError::Call(error),
        }
    }
}

#[restwire::client]
pub trait GreeterApi {
    #[post("/sayHello")]
    async fn say_hello(&self, #[body] request: Hello) -> Result<Greeting, AppError>;

    #[post("/shout")]
    async fn shout(&self, #[body] text: String) -> Result<String, AppError>;

    #[post("/whisper")]
    async fn whisper(&self, #[body] text: String) -> Result<String, ClientError>;
}

struct Polite;

#[restwire::async_trait]
impl Greeter for Polite {
    async fn say_hello(&self, request: Hello) -> Result<Greeting, ServiceError> {
        if request.person.is_empty() {
            return Err(ServiceError::invalid_argument("person must not be empty"));
        }
        Ok(Greeting {
            greeting: format!("Hello, {}", request.person),
        })
    }

    async fn shout(&self, text: String) -> String {
        text.to_uppercase()
    }
}

fn client() -> GreeterApiClient {
    let registry = RpcRegistry::builder()
        .service(GreeterRpc::new(Polite))
        .build()
        .unwrap();
    let transport = MemoryTransport::new(Arc::new(HttpDispatcher::new(registry)));
    let factory = ClientFactory::builder()
        .transport(Arc::new(transport))
        .build()
        .unwrap();
    factory.bind("http://local/rpc").unwrap()
}

#[tokio::test]
async fn test_round_trip() {
    let client = client();
    let greeting = client
        .say_hello(Hello {
            person: "Alice".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(greeting.greeting, "Hello, Alice");

    let loud = client.shout("quiet please".to_string()).await.unwrap();
    assert_eq!(loud, "QUIET PLEASE");
}

#[tokio::test]
async fn test_service_error_reaches_custom_error_type() {
    let err = client()
        .say_hello(Hello {
            person: String::new(),
        })
        .await
        .unwrap_err();
    match err {
        AppError::Rejected(message) => assert_eq!(message, "person must not be empty"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_method_is_not_found() {
    let err = client().whisper("psst".to_string()).await.unwrap_err();
    assert_eq!(err.status(), Some(http::StatusCode::NOT_FOUND));
    let payload = err.payload().unwrap();
    assert_eq!(payload.code, "NotFound");
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let client = Arc::new(client());
    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .say_hello(Hello {
                    person: format!("p{}", i),
                })
                .await
                .map(|g| g.greeting)
        }));
    }
    for (i, handle) in handles.into_iter().enumerate() {
        let greeting = handle.await.unwrap().unwrap();
        assert_eq!(greeting, format!("Hello, p{}", i));
    }
}
