//! VNPay gateway implementation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

use crate::config::VnpayConfig;
use crate::domain::payment::{
    CallbackFields, PaymentError, PaymentRequest, PaymentResult, PaymentUrlResult, ProviderId,
};
use crate::domain::sanitize::sanitize_text;
use crate::domain::signing::{
    canonical_string, sign_hex, verify_fields, FieldOrdering, HmacAlgorithm,
};
use crate::ports::PaymentGateway;

const VERSION: &str = "2.1.0";
const COMMAND: &str = "pay";
const CURRENCY_CODE: &str = "VND";
const ORDER_TYPE: &str = "other";
const DATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// Payment links expire this long after creation.
const EXPIRY_MINUTES: i64 = 15;

/// Maximum length VNPay accepts for `vnp_OrderInfo`.
const ORDER_INFO_MAX_LEN: usize = 255;

/// VNPay timestamps are expressed in Indochina time regardless of the
/// server's own timezone.
static VN_TZ: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset"));

/// VNPay gateway configuration.
#[derive(Clone, Debug)]
pub struct VnpayGatewayConfig {
    tmn_code: String,
    hash_secret: SecretString,
    payment_url: String,
}

impl VnpayGatewayConfig {
    /// Create a new VNPay gateway configuration.
    pub fn new(
        tmn_code: impl Into<String>,
        hash_secret: impl Into<String>,
        payment_url: impl Into<String>,
    ) -> Self {
        Self {
            tmn_code: tmn_code.into(),
            hash_secret: SecretString::new(hash_secret.into()),
            payment_url: payment_url.into(),
        }
    }

    /// Build from the validated configuration section.
    pub fn from_config(vnpay: &VnpayConfig) -> Self {
        Self {
            tmn_code: vnpay.tmn_code.clone(),
            hash_secret: SecretString::new(vnpay.hash_secret.clone()),
            payment_url: vnpay.payment_url.clone(),
        }
    }
}

/// VNPay payment gateway (local URL construction).
#[derive(Debug)]
pub struct VnpayGateway {
    config: VnpayGatewayConfig,
}

impl VnpayGateway {
    /// Create a new VNPay gateway with the given configuration.
    pub fn new(config: VnpayGatewayConfig) -> Self {
        Self { config }
    }

    /// Assemble the raw (unencoded) parameter set for one attempt.
    ///
    /// `now` is injected so the date/expiry window is testable; the public
    /// path passes the current instant.
    fn build_params(&self, request: &PaymentRequest, now: DateTime<Utc>) -> Vec<(String, String)> {
        let local = now.with_timezone(&*VN_TZ);
        let expire = local + Duration::minutes(EXPIRY_MINUTES);

        vec![
            ("vnp_Version".to_string(), VERSION.to_string()),
            ("vnp_Command".to_string(), COMMAND.to_string()),
            ("vnp_TmnCode".to_string(), self.config.tmn_code.clone()),
            // VNPay's minor unit is 1/100 of the major unit.
            ("vnp_Amount".to_string(), (request.amount * 100).to_string()),
            (
                "vnp_CreateDate".to_string(),
                local.format(DATE_FORMAT).to_string(),
            ),
            ("vnp_CurrCode".to_string(), CURRENCY_CODE.to_string()),
            ("vnp_IpAddr".to_string(), request.ip_address.clone()),
            (
                "vnp_Locale".to_string(),
                request.language.vnpay_code().to_string(),
            ),
            (
                "vnp_OrderInfo".to_string(),
                sanitize_text(&request.order_description, ORDER_INFO_MAX_LEN),
            ),
            ("vnp_OrderType".to_string(), ORDER_TYPE.to_string()),
            ("vnp_ReturnUrl".to_string(), request.return_url.clone()),
            ("vnp_TxnRef".to_string(), request.order_id.clone()),
            (
                "vnp_ExpireDate".to_string(),
                expire.format(DATE_FORMAT).to_string(),
            ),
        ]
    }

    /// Build the signed redirect URL from a parameter set.
    ///
    /// The canonical string over the form-encoded pairs doubles as the
    /// query string, so what gets signed is byte-for-byte what gets sent.
    fn build_url(&self, params: &[(String, String)]) -> String {
        let encoded = encode_pairs(params);
        let query = canonical_string(&encoded, FieldOrdering::Ordinal);
        let signature = sign_hex(
            &query,
            self.config.hash_secret.expose_secret().as_bytes(),
            HmacAlgorithm::Sha512,
        );
        format!(
            "{}?{}&vnp_SecureHash={}",
            self.config.payment_url, query, signature
        )
    }

    /// Verify a callback signature over the re-encoded `vnp_` fields.
    fn verify_callback_signature(&self, fields: &CallbackFields, signature: &str) -> bool {
        let signed: Vec<(String, String)> = fields
            .iter()
            .filter(|(key, _)| key.starts_with("vnp_"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let encoded = encode_pairs(&signed);

        verify_fields(
            &encoded,
            signature,
            self.config.hash_secret.expose_secret().as_bytes(),
            HmacAlgorithm::Sha512,
            FieldOrdering::Ordinal,
            &["vnp_SecureHash", "vnp_SecureHashType"],
        )
    }
}

/// Form-encode every key and value (space becomes `+`), the encoding VNPay
/// signs and transmits.
fn encode_pairs(params: &[(String, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (encode_component(k), encode_component(v)))
        .collect()
}

fn encode_component(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Parse a `yyyyMMddHHmmss` timestamp in Indochina time to UTC.
fn parse_vnpay_date(raw: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, DATE_FORMAT).ok()?;
    VN_TZ
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}

#[async_trait]
impl PaymentGateway for VnpayGateway {
    fn provider(&self) -> ProviderId {
        ProviderId::Vnpay
    }

    /// Assemble the hosted-checkout redirect URL locally.
    ///
    /// This pattern performs no I/O and cannot fail for transport reasons,
    /// only for an invalid request.
    async fn create_payment_url(&self, request: &PaymentRequest) -> PaymentUrlResult {
        if let Err(err) = request.validate() {
            return PaymentUrlResult::from_error(&err);
        }

        let params = self.build_params(request, Utc::now());
        PaymentUrlResult::ok(self.build_url(&params))
    }

    async fn process_callback(&self, fields: &CallbackFields) -> PaymentResult {
        let signature = match fields.get("vnp_SecureHash") {
            Some(signature) => signature.clone(),
            None => {
                return PaymentResult::rejected(
                    ProviderId::Vnpay,
                    &PaymentError::MissingField("vnp_SecureHash"),
                    fields.clone(),
                );
            }
        };

        // Signature first; status codes in an unverified payload mean
        // nothing.
        if !self.verify_callback_signature(fields, &signature) {
            tracing::warn!("VNPay callback signature mismatch, payload rejected");
            return PaymentResult::rejected(
                ProviderId::Vnpay,
                &PaymentError::SignatureMismatch,
                fields.clone(),
            );
        }

        let order_id = fields.get("vnp_TxnRef").cloned().unwrap_or_default();

        let response_code = fields
            .get("vnp_ResponseCode")
            .map(String::as_str)
            .unwrap_or("");
        if response_code != "00" {
            return PaymentResult::not_completed(
                ProviderId::Vnpay,
                order_id,
                &PaymentError::provider(response_code, "payment not completed"),
                fields.clone(),
            );
        }

        let amount = fields
            .get("vnp_Amount")
            .and_then(|v| v.parse::<u64>().ok())
            .map(|minor| minor / 100)
            .unwrap_or(0);
        let transaction_id = fields.get("vnp_TransactionNo").cloned().unwrap_or_default();
        let paid_at = fields
            .get("vnp_PayDate")
            .and_then(|raw| parse_vnpay_date(raw));

        PaymentResult::completed(
            ProviderId::Vnpay,
            order_id,
            amount,
            transaction_id,
            paid_at,
            fields.clone(),
        )
    }
}
