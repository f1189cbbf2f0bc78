//! Mock payment gateway for testing.
//!
//! Provides a configurable mock implementation of `PaymentGateway` for
//! unit and integration tests. Supports:
//! - Pre-configured URL and callback results
//! - Call tracking
//!
//! Unscripted callback processing reports an `Unsupported` failure, the
//! same shape a real provider without IPN support would return.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::payment::{
    CallbackFields, PaymentError, PaymentRequest, PaymentResult, PaymentUrlResult, ProviderId,
};
use crate::ports::PaymentGateway;

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::new(ProviderId::Momo);
/// mock.set_url_result(PaymentUrlResult::ok("https://pay.example.com/x"));
///
/// let result = mock.create_payment_url(&request).await;
/// assert_eq!(mock.create_calls(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct MockPaymentGateway {
    provider: ProviderId,
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default, Debug)]
struct MockState {
    url_result: Option<PaymentUrlResult>,
    callback_result: Option<PaymentResult>,
    create_calls: usize,
    callback_calls: usize,
}

impl MockPaymentGateway {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            inner: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Script the next `create_payment_url` outcome.
    pub fn set_url_result(&self, result: PaymentUrlResult) {
        self.inner.lock().expect("mock lock").url_result = Some(result);
    }

    /// Script the next `process_callback` outcome.
    pub fn set_callback_result(&self, result: PaymentResult) {
        self.inner.lock().expect("mock lock").callback_result = Some(result);
    }

    pub fn create_calls(&self) -> usize {
        self.inner.lock().expect("mock lock").create_calls
    }

    pub fn callback_calls(&self) -> usize {
        self.inner.lock().expect("mock lock").callback_calls
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    fn provider(&self) -> ProviderId {
        self.provider
    }

    async fn create_payment_url(&self, _request: &PaymentRequest) -> PaymentUrlResult {
        let mut state = self.inner.lock().expect("mock lock");
        state.create_calls += 1;
        state
            .url_result
            .clone()
            .unwrap_or_else(|| PaymentUrlResult::failed("mock gateway has no scripted result"))
    }

    async fn process_callback(&self, fields: &CallbackFields) -> PaymentResult {
        let mut state = self.inner.lock().expect("mock lock");
        state.callback_calls += 1;
        state.callback_result.clone().unwrap_or_else(|| {
            PaymentResult::rejected(
                self.provider,
                &PaymentError::Unsupported("callback processing"),
                fields.clone(),
            )
        })
    }
}
