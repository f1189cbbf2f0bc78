//! MoMo gateway implementation.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::config::{HttpClientConfig, MomoConfig};
use crate::domain::payment::{
    CallbackFields, PaymentError, PaymentRequest, PaymentResult, PaymentUrlResult, ProviderId,
};
use crate::domain::signing::{
    canonical_string, sign_hex, verify_fields, FieldOrdering, HmacAlgorithm,
};
use crate::ports::PaymentGateway;

use super::wire_types::{MomoCreateRequest, MomoCreateResponse};

/// Fields signed on the outbound create request, in MoMo's mandated order.
/// This sequence is hand-specified by the provider and is not alphabetical;
/// `requestType` and `lang` travel in the payload but outside the signature.
const CREATE_SIGNED_FIELDS: &[&str] = &[
    "partnerCode",
    "accessKey",
    "requestId",
    "amount",
    "orderId",
    "orderInfo",
    "returnUrl",
    "notifyUrl",
    "extraData",
];

/// Fields signed on the inbound IPN, in MoMo's mandated order.
const IPN_SIGNED_FIELDS: &[&str] = &[
    "partnerCode",
    "accessKey",
    "requestId",
    "amount",
    "orderId",
    "orderInfo",
    "orderType",
    "transId",
    "message",
    "localMessage",
    "responseTime",
    "errorCode",
    "payType",
    "extraData",
];

const REQUEST_TYPE: &str = "captureMoMoWallet";

/// MoMo gateway configuration.
#[derive(Clone, Debug)]
pub struct MomoGatewayConfig {
    partner_code: String,
    access_key: String,
    secret_key: SecretString,
    endpoint: String,
    timeout: Duration,
}

impl MomoGatewayConfig {
    /// Create a new MoMo gateway configuration.
    pub fn new(
        partner_code: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            partner_code: partner_code.into(),
            access_key: access_key.into(),
            secret_key: SecretString::new(secret_key.into()),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build from the validated configuration sections.
    pub fn from_config(momo: &MomoConfig, http: &HttpClientConfig) -> Self {
        Self {
            partner_code: momo.partner_code.clone(),
            access_key: momo.access_key.clone(),
            secret_key: SecretString::new(momo.secret_key.clone()),
            endpoint: momo.endpoint.clone(),
            timeout: Duration::from_secs(http.timeout_secs),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// MoMo payment gateway (remote link issuance).
#[derive(Debug)]
pub struct MomoGateway {
    config: MomoGatewayConfig,
    http_client: reqwest::Client,
}

impl MomoGateway {
    /// Create a new MoMo gateway with the given configuration.
    pub fn new(config: MomoGatewayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Build and sign the create-payment payload for one attempt.
    ///
    /// The `request_id` is a fresh idempotency token distinct from
    /// `order_id`; the signature covers `CREATE_SIGNED_FIELDS` in order.
    fn build_create_payload(&self, request: &PaymentRequest, request_id: &str) -> MomoCreateRequest {
        let fields: Vec<(String, String)> = vec![
            ("partnerCode".to_string(), self.config.partner_code.clone()),
            ("accessKey".to_string(), self.config.access_key.clone()),
            ("requestId".to_string(), request_id.to_string()),
            ("amount".to_string(), request.amount.to_string()),
            ("orderId".to_string(), request.order_id.clone()),
            ("orderInfo".to_string(), request.order_description.clone()),
            ("returnUrl".to_string(), request.return_url.clone()),
            ("notifyUrl".to_string(), request.notify_url.clone()),
            ("extraData".to_string(), String::new()),
        ];

        let canonical = canonical_string(&fields, FieldOrdering::Explicit(CREATE_SIGNED_FIELDS));
        let signature = sign_hex(
            &canonical,
            self.config.secret_key.expose_secret().as_bytes(),
            HmacAlgorithm::Sha256,
        );

        MomoCreateRequest {
            partner_code: self.config.partner_code.clone(),
            access_key: self.config.access_key.clone(),
            request_id: request_id.to_string(),
            amount: request.amount.to_string(),
            order_id: request.order_id.clone(),
            order_info: request.order_description.clone(),
            return_url: request.return_url.clone(),
            notify_url: request.notify_url.clone(),
            extra_data: String::new(),
            request_type: REQUEST_TYPE.to_string(),
            lang: request.language.momo_code().to_string(),
            signature,
        }
    }

    async fn post_create(
        &self,
        payload: &MomoCreateRequest,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.http_client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(payload)
            .send()
            .await
    }

    /// Verify an IPN signature against MoMo's mandated field sequence.
    fn verify_ipn_signature(&self, fields: &CallbackFields, signature: &str) -> bool {
        let pairs: Vec<(String, String)> = fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        verify_fields(
            &pairs,
            signature,
            self.config.secret_key.expose_secret().as_bytes(),
            HmacAlgorithm::Sha256,
            FieldOrdering::Explicit(IPN_SIGNED_FIELDS),
            &["signature"],
        )
    }
}

#[async_trait]
impl PaymentGateway for MomoGateway {
    fn provider(&self) -> ProviderId {
        ProviderId::Momo
    }

    /// Issue a payment link via MoMo's transaction endpoint.
    ///
    /// Retry policy: at most one retry, and only when the first attempt
    /// timed out. Connection errors and HTTP-level failures are
    /// single-shot; the caller decides whether to start a new attempt.
    async fn create_payment_url(&self, request: &PaymentRequest) -> PaymentUrlResult {
        if let Err(err) = request.validate() {
            return PaymentUrlResult::from_error(&err);
        }

        let request_id = Uuid::new_v4().to_string();
        let payload = self.build_create_payload(request, &request_id);

        let response = match self.post_create(&payload).await {
            Ok(response) => Ok(response),
            Err(err) if err.is_timeout() => {
                tracing::warn!(
                    order_id = %request.order_id,
                    request_id = %request_id,
                    "MoMo create call timed out, retrying once"
                );
                self.post_create(&payload).await
            }
            Err(err) => Err(err),
        };

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(
                    order_id = %request.order_id,
                    error = %err,
                    "MoMo create call failed"
                );
                return PaymentUrlResult::from_error(&PaymentError::Transport(
                    "could not reach payment provider".to_string(),
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                order_id = %request.order_id,
                status = %status,
                body = %body,
                "MoMo create call returned non-success status"
            );
            return PaymentUrlResult::from_error(&PaymentError::Transport(format!(
                "payment provider returned HTTP {status}"
            )));
        }

        let parsed: MomoCreateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::error!(
                    order_id = %request.order_id,
                    error = %err,
                    "MoMo create response body was unparseable"
                );
                return PaymentUrlResult::from_error(&PaymentError::MalformedResponse(
                    "could not parse provider response".to_string(),
                ));
            }
        };

        if parsed.error_code != 0 {
            let message = parsed
                .message
                .or(parsed.local_message)
                .unwrap_or_else(|| "payment link was refused".to_string());
            tracing::warn!(
                order_id = %request.order_id,
                error_code = parsed.error_code,
                "MoMo refused the payment link"
            );
            return PaymentUrlResult::from_error(&PaymentError::provider(
                parsed.error_code.to_string(),
                message,
            ));
        }

        match parsed.pay_url {
            Some(pay_url) => PaymentUrlResult::ok(pay_url),
            None => PaymentUrlResult::from_error(&PaymentError::MalformedResponse(
                "provider response carried no payUrl".to_string(),
            )),
        }
    }

    async fn process_callback(&self, fields: &CallbackFields) -> PaymentResult {
        let signature = match fields.get("signature") {
            Some(signature) => signature.clone(),
            None => {
                return PaymentResult::rejected(
                    ProviderId::Momo,
                    &PaymentError::MissingField("signature"),
                    fields.clone(),
                );
            }
        };

        // Signature first. A mismatch means nothing else in the payload can
        // be trusted, including the status code.
        if !self.verify_ipn_signature(fields, &signature) {
            tracing::warn!("MoMo IPN signature mismatch, payload rejected");
            return PaymentResult::rejected(
                ProviderId::Momo,
                &PaymentError::SignatureMismatch,
                fields.clone(),
            );
        }

        let order_id = fields.get("orderId").cloned().unwrap_or_default();

        let error_code = fields.get("errorCode").map(String::as_str).unwrap_or("");
        if error_code != "0" {
            let message = fields
                .get("message")
                .cloned()
                .unwrap_or_else(|| "payment not completed".to_string());
            return PaymentResult::not_completed(
                ProviderId::Momo,
                order_id,
                &PaymentError::provider(error_code, message),
                fields.clone(),
            );
        }

        let amount = fields
            .get("amount")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let transaction_id = fields.get("transId").cloned().unwrap_or_default();
        let paid_at = fields
            .get("responseTime")
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(chrono::DateTime::from_timestamp_millis);

        PaymentResult::completed(
            ProviderId::Momo,
            order_id,
            amount,
            transaction_id,
            paid_at,
            fields.clone(),
        )
    }
}
