//! In-memory `PaymentProvider` for handler tests.
//!
//! Accepts every operation unless told otherwise. Results can be scripted
//! in order, an operation can be made to fail persistently, and every call
//! is recorded with its arguments.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CancelSubscriptionRequest, PaymentError, PaymentProvider, ProviderResponse, RefundRequest,
};

/// Provider operation, used to target failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Refund,
    CancelSubscription,
}

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Refund {
        transaction_id: String,
        amount: u64,
        currency: String,
    },
    CancelSubscription {
        payment_method_token: String,
        subscription_id: String,
    },
}

impl ProviderCall {
    pub fn operation(&self) -> Operation {
        match self {
            ProviderCall::Refund { .. } => Operation::Refund,
            ProviderCall::CancelSubscription { .. } => Operation::CancelSubscription,
        }
    }
}

/// Shared handle; clones see the same script and call log.
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.push_response(ProviderResponse::rejected(Some("PSP_100".into()), json!({})));
/// mock.fail(Operation::CancelSubscription, PaymentError::network("timeout"));
///
/// let handler = RefundTransactionHandler::new(Arc::new(mock.clone()));
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentProvider {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    scripted: VecDeque<Result<ProviderResponse, PaymentError>>,
    failing: HashMap<Operation, PaymentError>,
    calls: Vec<ProviderCall>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result for the next call.
    pub fn push_response(&self, response: ProviderResponse) {
        self.state.lock().unwrap().scripted.push_back(Ok(response));
    }

    /// Queue an error for the next call.
    pub fn push_error(&self, error: PaymentError) {
        self.state.lock().unwrap().scripted.push_back(Err(error));
    }

    /// Make every call to `operation` fail until `reset`.
    pub fn fail(&self, operation: Operation, error: PaymentError) {
        self.state.lock().unwrap().failing.insert(operation, error);
    }

    /// Drop scripted results and persistent failures. The call log is kept.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.scripted.clear();
        state.failing.clear();
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    fn respond(
        &self,
        call: ProviderCall,
        reference: String,
    ) -> Result<ProviderResponse, PaymentError> {
        let mut state = self.state.lock().unwrap();
        let operation = call.operation();
        state.calls.push(call);

        if let Some(error) = state.failing.get(&operation) {
            return Err(error.clone());
        }

        state.scripted.pop_front().unwrap_or_else(|| {
            Ok(ProviderResponse::accepted(
                Some(reference),
                serde_json::json!({ "mock": true }),
            ))
        })
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn refund(&self, request: RefundRequest) -> Result<ProviderResponse, PaymentError> {
        let reference = format!("refund_{}", request.transaction_id);
        self.respond(
            ProviderCall::Refund {
                transaction_id: request.transaction_id,
                amount: request.amount.minor_units(),
                currency: request.currency.alpha_code().to_string(),
            },
            reference,
        )
    }

    async fn cancel_subscription(
        &self,
        request: CancelSubscriptionRequest,
    ) -> Result<ProviderResponse, PaymentError> {
        let reference = request.subscription_id.clone();
        self.respond(
            ProviderCall::CancelSubscription {
                payment_method_token: request.payment_method_token,
                subscription_id: request.subscription_id,
            },
            reference,
        )
    }
}
